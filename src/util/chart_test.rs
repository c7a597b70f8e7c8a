use super::*;

fn series(stock: &str, prices: &[f64]) -> PriceSeries {
    PriceSeries {
        stock: stock.to_owned(),
        dates: (1..=prices.len()).map(|d| format!("2024-01-{d:02}")).collect(),
        prices: prices.to_vec(),
    }
}

#[test]
fn from_series_uses_first_dates_and_cycles_palette() {
    let list: Vec<PriceSeries> = (0..6).map(|i| series(&format!("S{i}"), &[1.0, 2.0])).collect();
    let chart = ChartData::from_series(&list);
    assert_eq!(chart.labels, vec!["2024-01-01", "2024-01-02"]);
    assert_eq!(chart.datasets.len(), 6);
    assert_eq!(chart.datasets[0].color, "rgba(255, 99, 132, 1)");
    assert_eq!(chart.datasets[5].color, chart.datasets[0].color);
    assert_eq!(chart.datasets[3].label, "S3");
}

#[test]
fn from_series_of_nothing_is_empty() {
    let chart = ChartData::from_series(&[]);
    assert!(chart.labels.is_empty());
    assert!(chart.is_empty());
    assert_eq!(chart.y_range(), None);
}

#[test]
fn y_range_spans_all_datasets() {
    let chart = ChartData::from_series(&[series("A", &[10.0, 12.0]), series("B", &[8.0, 20.0])]);
    assert_eq!(chart.y_range(), Some((8.0, 20.0)));
}

#[test]
fn flat_series_gets_padded_range() {
    let chart = ChartData::from_series(&[series("A", &[5.0, 5.0])]);
    assert_eq!(chart.y_range(), Some((4.0, 6.0)));
}

#[test]
fn polyline_maps_extremes_to_box_edges() {
    let points = polyline_points(&[0.0, 5.0, 10.0], (0.0, 10.0), 200.0, 100.0);
    assert_eq!(points, vec![(0.0, 100.0), (100.0, 50.0), (200.0, 0.0)]);
    assert_eq!(points_attr(&points), "0.0,100.0 100.0,50.0 200.0,0.0");
}

#[test]
fn polyline_single_point_is_centered() {
    assert_eq!(polyline_points(&[3.0], (2.0, 4.0), 100.0, 50.0), vec![(50.0, 25.0)]);
    assert!(polyline_points(&[], (0.0, 1.0), 100.0, 50.0).is_empty());
}

#[test]
fn risk_gauge_scales_class_to_percent() {
    assert_eq!(risk_gauge_value(5), 100.0);
    assert_eq!(risk_gauge_value(1), 20.0);
    assert_eq!(risk_gauge_value(0), 0.0);
    assert_eq!(risk_gauge_value(9), 100.0);
}

#[test]
fn gauge_color_switches_at_threshold() {
    assert_eq!(gauge_color(60.0, 60.0), GAUGE_DANGER_COLOR);
    assert_eq!(gauge_color(59.9, 60.0), GAUGE_SAFE_COLOR);
    assert_eq!(gauge_color(risk_gauge_value(5), DEFAULT_RISK_THRESHOLD), GAUGE_DANGER_COLOR);
}
