//! Reactive controller: UI inputs in, recomputed output regions out.
//!
//! Each output region declares which session fields it reads. A batch of
//! inputs is folded into the session state first (last write wins); then every
//! region whose dependencies moved, plus any region an input forces, is
//! rendered exactly once from the final state. Rules never read each other's outputs, only the session state and
//! the immutable tables, so render order is irrelevant.

use serde::{Deserialize, Serialize};

use crate::filter::{Filterable, Selection};
use crate::logging::{v_str, ProfileScope};
use crate::session::SessionState;
use crate::table::{CoefficientTable, Dataset};
use crate::views::{
    alpha_chart, coefficient_table, lambda_chart, legend, model_dropdown, performance_charts,
    variable_count_chart, BarChartSpec, DropdownSpec, LegendSpec, LineChartSpec, TableSpec,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Input {
    /// Raw dropdown values.
    Select { models: Vec<String> },
    Reset,
    ToggleNormalization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StateField {
    Selection,
    Normalization,
}

impl StateField {
    pub fn as_str(&self) -> &'static str {
        match self {
            StateField::Selection => "selection",
            StateField::Normalization => "normalization",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    ModelFilter,
    Legend,
    AlphaChart,
    LambdaChart,
    VariableCountChart,
    NormalizationButton,
    CoefficientTable,
    PerformanceCharts,
}

impl Region {
    pub const ALL: [Region; 8] = [
        Region::ModelFilter,
        Region::Legend,
        Region::AlphaChart,
        Region::LambdaChart,
        Region::VariableCountChart,
        Region::NormalizationButton,
        Region::CoefficientTable,
        Region::PerformanceCharts,
    ];

    /// The dependency table.
    pub fn dependencies(&self) -> &'static [StateField] {
        match self {
            Region::ModelFilter
            | Region::Legend
            | Region::AlphaChart
            | Region::LambdaChart
            | Region::VariableCountChart
            | Region::PerformanceCharts => &[StateField::Selection],
            Region::NormalizationButton => &[StateField::Normalization],
            Region::CoefficientTable => &[StateField::Selection, StateField::Normalization],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::ModelFilter => "model_filter",
            Region::Legend => "legend",
            Region::AlphaChart => "alpha_chart",
            Region::LambdaChart => "lambda_chart",
            Region::VariableCountChart => "variable_count_chart",
            Region::NormalizationButton => "normalization_button",
            Region::CoefficientTable => "coefficient_table",
            Region::PerformanceCharts => "performance_charts",
        }
    }

    pub fn depends_on_any(&self, changed: &[StateField]) -> bool {
        self.dependencies().iter().any(|d| changed.contains(d))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ButtonSpec {
    pub label: &'static str,
    pub normalized: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "region", content = "spec", rename_all = "snake_case")]
pub enum RegionOutput {
    ModelFilter(DropdownSpec),
    Legend(LegendSpec),
    AlphaChart(BarChartSpec),
    LambdaChart(BarChartSpec),
    VariableCountChart(BarChartSpec),
    NormalizationButton(ButtonSpec),
    CoefficientTable(TableSpec),
    PerformanceCharts(Vec<LineChartSpec>),
}

impl RegionOutput {
    pub fn region(&self) -> Region {
        match self {
            RegionOutput::ModelFilter(_) => Region::ModelFilter,
            RegionOutput::Legend(_) => Region::Legend,
            RegionOutput::AlphaChart(_) => Region::AlphaChart,
            RegionOutput::LambdaChart(_) => Region::LambdaChart,
            RegionOutput::VariableCountChart(_) => Region::VariableCountChart,
            RegionOutput::NormalizationButton(_) => Region::NormalizationButton,
            RegionOutput::CoefficientTable(_) => Region::CoefficientTable,
            RegionOutput::PerformanceCharts(_) => Region::PerformanceCharts,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Update {
    pub state: SessionState,
    pub changed: Vec<StateField>,
    pub outputs: Vec<RegionOutput>,
}

impl Update {
    pub fn regions(&self) -> Vec<Region> {
        self.outputs.iter().map(RegionOutput::region).collect()
    }
}

/// Fold one input into the state.
pub fn apply(state: &mut SessionState, input: &Input) {
    match input {
        Input::Select { models } => state.selection = Selection::from_values(models),
        Input::Reset => state.selection = Selection::All,
        Input::ToggleNormalization => {
            state.normalization.toggle();
        }
    }
}

/// Fields that differ between two states.
pub fn changed_fields(before: &SessionState, after: &SessionState) -> Vec<StateField> {
    let mut changed = Vec::new();
    if before.selection != after.selection {
        changed.push(StateField::Selection);
    }
    if before.normalization != after.normalization {
        changed.push(StateField::Normalization);
    }
    changed
}

/// Regions re-emitted regardless of state changes. Reset always clears the
/// dropdown, even when the selection was already `All` (the "all" option).
pub fn forced_regions(inputs: &[Input]) -> Vec<Region> {
    if inputs.iter().any(|i| matches!(i, Input::Reset)) {
        vec![Region::ModelFilter]
    } else {
        Vec::new()
    }
}

/// Apply a batch of inputs and recompute the affected regions once each.
pub fn dispatch(state: &SessionState, inputs: &[Input], data: &Dataset) -> Update {
    let _scope = ProfileScope::new("dispatch");
    let mut next = state.clone();
    for input in inputs {
        apply(&mut next, input);
    }
    let changed = changed_fields(state, &next);
    let forced = forced_regions(inputs);
    let outputs = Region::ALL
        .iter()
        .filter(|r| r.depends_on_any(&changed) || forced.contains(r))
        .map(|r| render_region(*r, &next, data))
        .collect();
    Update {
        state: next,
        changed,
        outputs,
    }
}

/// Every region, for a first page load.
pub fn render_all(state: &SessionState, data: &Dataset) -> Update {
    let _scope = ProfileScope::new("render_all");
    Update {
        state: state.clone(),
        changed: Vec::new(),
        outputs: Region::ALL
            .iter()
            .map(|r| render_region(*r, state, data))
            .collect(),
    }
}

/// Filtered, and if enabled normalized, coefficients for a session.
pub fn coefficient_view(state: &SessionState, data: &Dataset) -> CoefficientTable {
    state
        .normalization
        .apply(&data.coefficients.filter(&state.selection))
}

pub fn render_region(region: Region, state: &SessionState, data: &Dataset) -> RegionOutput {
    let _scope = ProfileScope::with_context("render_region", &[("region", v_str(region.as_str()))]);
    let selection = &state.selection;
    match region {
        Region::ModelFilter => RegionOutput::ModelFilter(model_dropdown(selection)),
        Region::Legend => RegionOutput::Legend(legend(selection)),
        Region::AlphaChart => {
            RegionOutput::AlphaChart(alpha_chart(&data.hyperparameters.filter(selection)))
        }
        Region::LambdaChart => {
            RegionOutput::LambdaChart(lambda_chart(&data.hyperparameters.filter(selection)))
        }
        Region::VariableCountChart => RegionOutput::VariableCountChart(variable_count_chart(
            &data.variable_counts.filter(selection),
        )),
        Region::NormalizationButton => RegionOutput::NormalizationButton(ButtonSpec {
            label: state.normalization.label(),
            normalized: state.normalization.is_enabled(),
        }),
        Region::CoefficientTable => {
            RegionOutput::CoefficientTable(coefficient_table(&coefficient_view(state, data)))
        }
        Region::PerformanceCharts => {
            RegionOutput::PerformanceCharts(performance_charts(&data.performance.filter(selection)))
        }
    }
}
