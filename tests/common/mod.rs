#![allow(dead_code)]

use std::fs;
use std::path::Path;

use trackdash::catalog::ModelId;
use trackdash::table::{
    CoefficientTable, Dataset, HyperparameterRow, HyperparameterTable, Metric, ModelColumn,
    PerformanceRow, PerformanceTable, RowKey, VariableCountTable,
};

pub const HYPER_CSV: &str = "Model,alpha,lambda\n\
ridge,0.0,0.5\n\
lasso,1.0,0.00012\n\
en1,0.5,0.03\n";

pub const COUNTS_CSV: &str = "stock,ridge,lasso,en1\n\
SPX,120,15,30\n";

pub const COEF_CSV: &str = "stock,ridge,lasso,en1\n\
AAPL,0.0,0.5,0.2\n\
MSFT,2.0,,0.3\n\
NVDA,NaN,0.25,0\n\
AMZN,-2.0,0.25,0.5\n";

pub const PERF_CSV: &str = "Index_ETF,Tracking_Error,Active_Return,Information_Ratio,Correlation_SP500,Beta,Jensen_Alpha\n\
sp500,0,0,0,1,1,0\n\
ridge,0.0185,-0.0074,-0.4032,0.9143,1.0762,0.0003\n\
lasso,0.0212,0.0021,0.0991,0.9510,0.9874,-0.0001\n\
en1,0.0199,0.0011,0.0553,0.9611,0.9931,0.0001\n";

pub fn write_fixture_dir(dir: &Path) {
    fs::write(dir.join("hyperparameters.csv"), HYPER_CSV).unwrap();
    fs::write(dir.join("nb_variables.csv"), COUNTS_CSV).unwrap();
    fs::write(dir.join("coefficients.csv"), COEF_CSV).unwrap();
    fs::write(dir.join("performance.csv"), PERF_CSV).unwrap();
}

/// Same content as the CSV fixtures, built in memory.
pub fn fixture_dataset() -> Dataset {
    let models = [ModelId::Ridge, ModelId::Lasso, ModelId::En1];
    let entities: Vec<String> = ["AAPL", "MSFT", "NVDA", "AMZN"].iter().map(|s| s.to_string()).collect();
    let coef_values = [
        vec![Some(0.0), Some(2.0), Some(f64::NAN), Some(-2.0)],
        vec![Some(0.5), None, Some(0.25), Some(0.25)],
        vec![Some(0.2), Some(0.3), Some(0.0), Some(0.5)],
    ];
    Dataset {
        hyperparameters: HyperparameterTable::new(vec![
            HyperparameterRow { model: ModelId::Ridge, alpha: 0.0, lambda: 0.5 },
            HyperparameterRow { model: ModelId::Lasso, alpha: 1.0, lambda: 0.00012 },
            HyperparameterRow { model: ModelId::En1, alpha: 0.5, lambda: 0.03 },
        ]),
        variable_counts: VariableCountTable::new(
            vec!["SPX".to_string()],
            models
                .iter()
                .zip([120u32, 15, 30])
                .map(|(m, c)| ModelColumn { model: *m, values: vec![c] })
                .collect(),
        )
        .unwrap(),
        coefficients: CoefficientTable::new(
            entities,
            models
                .iter()
                .zip(coef_values)
                .map(|(m, values)| ModelColumn { model: *m, values })
                .collect(),
        )
        .unwrap(),
        performance: PerformanceTable::new(
            Metric::display_order().to_vec(),
            vec![
                PerformanceRow { key: RowKey::Benchmark, values: vec![0.0, 0.0, 0.0, 1.0, 1.0, 0.0] },
                PerformanceRow {
                    key: RowKey::Model(ModelId::Ridge),
                    values: vec![0.0185, -0.0074, -0.4032, 0.9143, 1.0762, 0.0003],
                },
                PerformanceRow {
                    key: RowKey::Model(ModelId::Lasso),
                    values: vec![0.0212, 0.0021, 0.0991, 0.9510, 0.9874, -0.0001],
                },
                PerformanceRow {
                    key: RowKey::Model(ModelId::En1),
                    values: vec![0.0199, 0.0011, 0.0553, 0.9611, 0.9931, 0.0001],
                },
            ],
        )
        .unwrap(),
    }
}
