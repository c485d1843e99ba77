mod common;

use trackdash::catalog::ModelId;
use trackdash::filter::{Filterable, Selection};
use trackdash::normalize::{column_sum, normalize};
use trackdash::table::{HyperparameterRow, HyperparameterTable};

fn selections() -> Vec<Selection> {
    vec![
        Selection::All,
        Selection::only(&[]),
        Selection::only(&[ModelId::Ridge]),
        Selection::only(&[ModelId::En1, ModelId::Ridge]),
        Selection::only(&[ModelId::Adlasso]),
        Selection::from_values(&["lasso", "unknown", "en1"]),
    ]
}

fn is_subsequence<T: PartialEq>(sub: &[T], full: &[T]) -> bool {
    let mut it = full.iter();
    sub.iter().all(|x| it.any(|y| y == x))
}

#[test]
fn filter_is_ordered_subset_and_idempotent() {
    let data = common::fixture_dataset();
    for sel in selections() {
        let h = data.hyperparameters.filter(&sel);
        assert!(is_subsequence(&h.models(), &data.hyperparameters.models()));
        assert_eq!(h.filter(&sel), h);

        let c = data.variable_counts.filter(&sel);
        assert!(is_subsequence(&c.models(), &data.variable_counts.models()));
        assert_eq!(c.entities, data.variable_counts.entities);
        assert_eq!(c.filter(&sel), c);

        let p = data.performance.filter(&sel);
        assert!(p.rows.len() <= data.performance.rows.len());
        assert_eq!(p.filter(&sel), p);
    }
}

#[test]
fn all_and_empty_input_are_identity() {
    let data = common::fixture_dataset();
    let empty: [&str; 0] = [];
    for sel in [Selection::All, Selection::from_values(&empty), Selection::from_values(&["all"])] {
        assert_eq!(data.hyperparameters.filter(&sel), data.hyperparameters);
        assert_eq!(data.variable_counts.filter(&sel), data.variable_counts);
        assert_eq!(data.performance.filter(&sel), data.performance);
        assert_eq!(
            data.coefficients.filter(&sel).models(),
            data.coefficients.models()
        );
    }
}

#[test]
fn hyperparameter_example() {
    let table = HyperparameterTable::new(vec![
        HyperparameterRow { model: ModelId::Ridge, alpha: 1.0, lambda: 0.1 },
        HyperparameterRow { model: ModelId::Lasso, alpha: 0.0, lambda: 0.2 },
    ]);
    let out = table.filter(&Selection::from_values(&["Ridge"]));
    assert_eq!(out.rows.len(), 1);
    assert_eq!(out.rows[0].model, ModelId::Ridge);
    assert_eq!(out.rows[0].alpha, 1.0);
}

#[test]
fn unknown_only_selection_empties_everything() {
    let data = common::fixture_dataset();
    let sel = Selection::from_values(&["nope"]);
    assert!(data.hyperparameters.filter(&sel).rows.is_empty());
    assert!(data.variable_counts.filter(&sel).columns.is_empty());
    assert_eq!(data.variable_counts.filter(&sel).entities, vec!["SPX".to_string()]);
    assert!(data.performance.filter(&sel).rows.is_empty());
}

#[test]
fn normalized_columns_sum_to_one() {
    let data = common::fixture_dataset();
    let out = normalize(&data.coefficients);
    for (src, col) in data.coefficients.columns.iter().zip(&out.columns) {
        if column_sum(&src.values) != 0.0 {
            assert!((column_sum(&col.values) - 1.0).abs() < 1e-9, "{:?}", col.model);
        }
    }
}

#[test]
fn zero_sum_column_left_alone() {
    let data = common::fixture_dataset();
    let out = normalize(&data.coefficients);
    let ridge = &out.column(ModelId::Ridge).unwrap().values;
    assert_eq!(ridge[0], Some(0.0));
    assert_eq!(ridge[1], Some(2.0));
    assert!(ridge[2].unwrap().is_nan());
    assert_eq!(ridge[3], Some(-2.0));
}

#[test]
fn normalize_is_idempotent_on_unit_columns() {
    let data = common::fixture_dataset();
    let once = normalize(&data.coefficients);
    let twice = normalize(&once);
    let a = &once.column(ModelId::Lasso).unwrap().values;
    let b = &twice.column(ModelId::Lasso).unwrap().values;
    for (x, y) in a.iter().zip(b) {
        match (x, y) {
            (Some(x), Some(y)) => assert!((x - y).abs() < 1e-12),
            (None, None) => {}
            other => panic!("cell changed shape: {:?}", other),
        }
    }
}
