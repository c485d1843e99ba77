use serde::Serialize;

use crate::catalog::{ModelId, ALL_LABEL, ALL_SENTINEL};
use crate::filter::Selection;

const MAX_LEGEND_COLUMNS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendItem {
    pub model: ModelId,
    pub label: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendSpec {
    pub items: Vec<LegendItem>,
    pub grid_columns: usize,
}

/// Color key for the models currently shown, in selection order.
pub fn legend(selection: &Selection) -> LegendSpec {
    let items: Vec<LegendItem> = selection
        .shown_models()
        .into_iter()
        .map(|model| LegendItem {
            model,
            label: model.label(),
            color: model.color(),
        })
        .collect();
    LegendSpec {
        grid_columns: items.len().min(MAX_LEGEND_COLUMNS),
        items,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropdownOption {
    pub label: &'static str,
    pub value: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropdownSpec {
    pub options: Vec<DropdownOption>,
    /// `None` renders the placeholder.
    pub value: Option<Vec<&'static str>>,
    pub multi: bool,
    pub placeholder: &'static str,
}

/// The model filter: "all" first, then every model sorted by label.
pub fn model_dropdown(selection: &Selection) -> DropdownSpec {
    let mut models = ModelId::ALL.to_vec();
    models.sort_by_key(|m| m.label());
    let options = std::iter::once(DropdownOption {
        label: ALL_LABEL,
        value: ALL_SENTINEL,
    })
    .chain(models.into_iter().map(|m| DropdownOption {
        label: m.label(),
        value: m.code(),
    }))
    .collect();
    DropdownSpec {
        options,
        value: selection.dropdown_value(),
        multi: true,
        placeholder: "Select one or more models",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_shows_catalog() {
        let spec = legend(&Selection::All);
        assert_eq!(spec.items.len(), 10);
        assert_eq!(spec.grid_columns, 5);
        assert_eq!(spec.items[0].model, ModelId::Ridge);
    }

    #[test]
    fn test_selection_order_kept() {
        let spec = legend(&Selection::only(&[ModelId::En2, ModelId::Ridge]));
        let labels: Vec<_> = spec.items.iter().map(|i| i.label).collect();
        assert_eq!(labels, vec!["Elastic Net", "Ridge"]);
        assert_eq!(spec.grid_columns, 2);
        assert_eq!(spec.items[1].color, "#1f77b4");
    }

    #[test]
    fn test_dropdown_options_sorted() {
        let spec = model_dropdown(&Selection::All);
        assert_eq!(spec.options.len(), 11);
        assert_eq!(spec.options[0].value, "all");
        assert_eq!(spec.options[1].label, "Adaptive Lasso");
        assert!(spec.value.is_none());
    }
}
