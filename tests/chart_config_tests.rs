use line_annotate::core::Viewport;
use line_annotate::host::{Chart, ChartConfig, ChartHost};
use line_annotate::AnnotateError;

#[test]
fn config_json_fills_optional_fields_with_defaults() {
    let input = r#"{
        "viewport": { "width": 640, "height": 360 },
        "x_start": 0.0,
        "x_end": 60.0
    }"#;

    let config = ChartConfig::from_json_str(input).expect("parse config");
    assert_eq!(config, ChartConfig::new(Viewport::new(640, 360), 0.0, 60.0));
    assert_eq!(config.y_max, 1.0);
    assert_eq!(config.element_left, 0.0);
}

#[test]
fn config_survives_json_persistence() {
    let config = ChartConfig::new(Viewport::new(800, 400), 10.0, 20.0)
        .with_y_domain(-5.0, 5.0)
        .with_element_origin(12.0, 34.0);
    let json = config.to_json_pretty().expect("serialize");
    assert!(json.contains("\"element_left\": 12.0"));
    assert_eq!(ChartConfig::from_json_str(&json).expect("parse"), config);
}

#[test]
fn malformed_config_reports_invalid_data() {
    let err = ChartConfig::from_json_str("{ \"viewport\": 3 }").expect_err("must fail");
    assert!(matches!(err, AnnotateError::InvalidData(_)));
}

#[test]
fn chart_rejects_invalid_viewport_and_domains() {
    let err = Chart::new(ChartConfig::new(Viewport::new(0, 10), 0.0, 1.0))
        .err()
        .expect("zero width must fail");
    assert!(matches!(
        err,
        AnnotateError::InvalidViewport {
            width: 0,
            height: 10
        }
    ));

    assert!(Chart::new(ChartConfig::new(Viewport::new(10, 10), 1.0, 1.0)).is_err());

    let mut chart = Chart::new(ChartConfig::new(Viewport::new(10, 10), 0.0, 1.0)).expect("chart");
    assert!(chart.set_y_domain(f64::NAN, 1.0).is_err());
    assert!(chart.set_viewport(Viewport::new(10, 0)).is_err());
}

#[test]
fn domain_changes_move_pixel_mapping() {
    let mut chart =
        Chart::new(ChartConfig::new(Viewport::new(200, 100), 0.0, 10.0).with_y_domain(0.0, 10.0))
            .expect("chart");
    assert!((chart.x(5.0).expect("x") - 100.0).abs() <= 1e-9);

    chart.set_x_domain(0.0, 20.0).expect("x domain");
    chart.set_y_domain(0.0, 20.0).expect("y domain");
    assert!((chart.x(5.0).expect("x") - 50.0).abs() <= 1e-9);
    assert!((chart.y(5.0).expect("y") - 75.0).abs() <= 1e-9);
}

#[test]
fn series_registry_lookup_and_removal() {
    use line_annotate::core::{Series, StackedPoint};

    let mut chart =
        Chart::new(ChartConfig::new(Viewport::new(200, 100), 0.0, 10.0)).expect("chart");
    chart
        .add_series(Series::new("a", vec![StackedPoint::new(1.0, 0.2)]))
        .expect("a");
    chart
        .add_series(Series::new("b", vec![StackedPoint::new(1.0, 0.3)]))
        .expect("b");
    assert_eq!(chart.series_count(), 2);
    assert_eq!(chart.series("b").map(|series| series.data.len()), Some(1));

    assert!(chart.remove_series("a"));
    assert!(!chart.remove_series("a"));
    assert!(chart.series("a").is_none());
    assert_eq!(chart.series_count(), 1);

    chart.update();
    assert_eq!(chart.active_series()[0].name, "b");
    assert!((chart.stacked_data()[0][0].y0).abs() <= 1e-12);
}

#[test]
fn linear_scale_reports_its_domain() {
    use line_annotate::core::LinearScale;

    let scale = LinearScale::new(-2.0, 8.0).expect("scale");
    assert_eq!(scale.domain(), (-2.0, 8.0));
    assert!((scale.pixel_to_domain(50.0, 100).expect("domain") - 3.0).abs() <= 1e-12);
}
