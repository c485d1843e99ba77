//! The fixed model catalog: identifiers, display labels, colors.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Key of the benchmark row in the performance file.
pub const BENCHMARK_CODE: &str = "sp500";
pub const BENCHMARK_LABEL: &str = "S&P 500";

/// Sentinel selection value meaning "no restriction".
pub const ALL_SENTINEL: &str = "all";
pub const ALL_LABEL: &str = "All models";

/// Header background for columns that are not model columns.
pub const DEFAULT_HEADER_COLOR: &str = "#001F3F";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelId {
    Ridge,
    Lasso,
    En1,
    En2,
    Adlasso,
    RidgeDcsis,
    LassoDcsis,
    En1Dcsis,
    En2Dcsis,
    AdlassoDcsis,
}

impl ModelId {
    /// Catalog order.
    pub const ALL: [ModelId; 10] = [
        ModelId::Ridge,
        ModelId::Lasso,
        ModelId::En1,
        ModelId::En2,
        ModelId::Adlasso,
        ModelId::RidgeDcsis,
        ModelId::LassoDcsis,
        ModelId::En1Dcsis,
        ModelId::En2Dcsis,
        ModelId::AdlassoDcsis,
    ];

    /// Short code used in the input files.
    pub fn code(&self) -> &'static str {
        match self {
            ModelId::Ridge => "ridge",
            ModelId::Lasso => "lasso",
            ModelId::En1 => "en1",
            ModelId::En2 => "en2",
            ModelId::Adlasso => "adlasso",
            ModelId::RidgeDcsis => "ridge_dcsis",
            ModelId::LassoDcsis => "lasso_dcsis",
            ModelId::En1Dcsis => "en1_dcsis",
            ModelId::En2Dcsis => "en2_dcsis",
            ModelId::AdlassoDcsis => "adlasso_dcsis",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ModelId::Ridge => "Ridge",
            ModelId::Lasso => "Lasso",
            ModelId::En1 => "Elastic Net (α = 0.5)",
            ModelId::En2 => "Elastic Net",
            ModelId::Adlasso => "Adaptive Lasso",
            ModelId::RidgeDcsis => "Ridge (DC-SIS)",
            ModelId::LassoDcsis => "Lasso (DC-SIS)",
            ModelId::En1Dcsis => "Elastic Net (DC-SIS) (α = 0.5)",
            ModelId::En2Dcsis => "Elastic Net (DC-SIS)",
            ModelId::AdlassoDcsis => "Adaptive Lasso (DC-SIS)",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            ModelId::Ridge => "#1f77b4",
            ModelId::Lasso => "#ff7f0e",
            ModelId::En1 => "#2ca02c",
            ModelId::En2 => "#d62728",
            ModelId::Adlasso => "#9467bd",
            ModelId::RidgeDcsis => "#8c564b",
            ModelId::LassoDcsis => "#e377c2",
            ModelId::En1Dcsis => "#7f7f7f",
            ModelId::En2Dcsis => "#bcbd22",
            ModelId::AdlassoDcsis => "#17becf",
        }
    }

    /// Accepts either the short code or the display label.
    pub fn parse(raw: &str) -> Option<ModelId> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.code().eq_ignore_ascii_case(raw) || m.label() == raw)
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_and_colors_unique() {
        let codes: HashSet<_> = ModelId::ALL.iter().map(|m| m.code()).collect();
        let colors: HashSet<_> = ModelId::ALL.iter().map(|m| m.color()).collect();
        assert_eq!(codes.len(), 10);
        assert_eq!(colors.len(), 10);
    }

    #[test]
    fn test_parse_code_or_label() {
        assert_eq!(ModelId::parse("en1_dcsis"), Some(ModelId::En1Dcsis));
        assert_eq!(ModelId::parse("Elastic Net (α = 0.5)"), Some(ModelId::En1));
        assert_eq!(ModelId::parse(" Ridge "), Some(ModelId::Ridge));
        assert_eq!(ModelId::parse("all"), None);
        assert_eq!(ModelId::parse("sp500"), None);
    }
}
