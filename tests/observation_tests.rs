use calendar_chart::core::{ChartRow, Observation, chart_rows};
use rust_decimal::Decimal;

#[test]
fn decimal_observations_convert_to_f64() {
    let observation = Observation::from_decimal("user_1", Decimal::new(1_250, 2)).expect("decimal");
    assert_eq!(observation, Observation::new("user_1", 12.5));
}

#[test]
fn chart_rows_rename_label_to_name_in_order() {
    let rows = chart_rows(&[
        Observation::new("user_2", 2.0),
        Observation::new("user_1", 1.0),
    ]);
    assert_eq!(
        rows,
        vec![
            ChartRow {
                name: "user_2".to_owned(),
                value: 2.0,
            },
            ChartRow {
                name: "user_1".to_owned(),
                value: 1.0,
            },
        ]
    );
    assert!(chart_rows(&[]).is_empty());
}
