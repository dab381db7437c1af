use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use line_annotate::annotate::{AnnotateOptions, AnnotationPoint, LineAnnotate};
use line_annotate::core::{Series, StackedPoint, ValueScale, Viewport};
use line_annotate::host::{Chart, ChartConfig};

fn chart() -> Chart {
    let config = ChartConfig::new(Viewport::new(1000, 500), 0.0, 10.0).with_y_domain(0.0, 100.0);
    Chart::new(config).expect("chart init")
}

fn attach(chart: &mut Chart, options: AnnotateOptions) -> Rc<RefCell<LineAnnotate>> {
    LineAnnotate::attach(chart, options).expect("attach overlay")
}

#[test]
fn one_node_per_valued_point() {
    let mut chart = chart();
    chart
        .add_series(Series::new(
            "cpu",
            vec![
                StackedPoint::new(1.0, 10.0),
                StackedPoint::empty(2.0),
                StackedPoint::new(3.0, 30.0),
            ],
        ))
        .expect("cpu");
    chart
        .add_series(Series::new("mem", vec![StackedPoint::empty(1.0)]))
        .expect("mem");
    let overlay = attach(&mut chart, AnnotateOptions::default());

    chart.update();

    let overlay = overlay.borrow();
    assert_eq!(overlay.nodes().len(), 2);
    assert!(overlay.nodes().iter().all(|node| node.active));
    assert_eq!(overlay.nodes()[0].content, "cpu:\u{a0}10.00");
    assert_eq!(overlay.nodes()[1].content, "cpu:\u{a0}30.00");
}

#[test]
fn repeated_updates_replace_nodes() {
    let mut chart = chart();
    chart
        .add_series(Series::new("cpu", vec![StackedPoint::new(1.0, 10.0)]))
        .expect("cpu");
    let overlay = attach(&mut chart, AnnotateOptions::default());

    chart.update();
    chart.update();
    assert_eq!(overlay.borrow().nodes().len(), 1);

    chart
        .set_series_data("cpu", vec![StackedPoint::new(5.0, 42.0)])
        .expect("data");
    chart.update();

    let overlay = overlay.borrow();
    assert_eq!(overlay.nodes().len(), 1);
    assert_eq!(overlay.nodes()[0].content, "cpu:\u{a0}42.00");
    assert!((overlay.nodes()[0].left_px - 500.0).abs() <= 1e-9);
    assert_eq!(overlay.offset_left_px(), 0.0);
}

#[test]
fn hidden_overlay_renders_nothing_until_shown() {
    let hides = Arc::new(AtomicUsize::new(0));
    let shows = Arc::new(AtomicUsize::new(0));
    let hide_counter = hides.clone();
    let show_counter = shows.clone();

    let mut chart = chart();
    chart
        .add_series(Series::new("cpu", vec![StackedPoint::new(1.0, 10.0)]))
        .expect("cpu");
    let overlay = attach(
        &mut chart,
        AnnotateOptions::default()
            .with_on_hide(Arc::new(move || {
                hide_counter.fetch_add(1, Ordering::SeqCst);
            }))
            .with_on_show(Arc::new(move || {
                show_counter.fetch_add(1, Ordering::SeqCst);
            })),
    );

    chart.update();
    assert_eq!(overlay.borrow().nodes().len(), 1);
    assert_eq!(shows.load(Ordering::SeqCst), 1);

    overlay.borrow_mut().hide();
    assert!(overlay.borrow().is_inactive());
    assert_eq!(hides.load(Ordering::SeqCst), 1);

    chart.update();
    assert!(overlay.borrow().nodes().is_empty());
    assert!(!overlay.borrow().is_visible());

    overlay.borrow_mut().show();
    assert!(overlay.borrow().is_visible());
    assert!(!overlay.borrow().is_inactive());

    chart.update();
    assert_eq!(overlay.borrow().nodes().len(), 1);
    assert_eq!(shows.load(Ordering::SeqCst), 3);
}

#[test]
fn nodes_sit_at_stacked_top() {
    let mut chart = chart();
    chart
        .add_series(Series::new("base", vec![StackedPoint::new(2.0, 20.0)]))
        .expect("base");
    chart
        .add_series(Series::new("top", vec![StackedPoint::new(2.0, 30.0)]))
        .expect("top");
    let overlay = attach(&mut chart, AnnotateOptions::default());

    chart.update();

    let overlay = overlay.borrow();
    let top = &overlay.nodes()[1];
    assert_eq!(top.series_name, "top");
    // y domain 0..100 over 500px, stacked top = 50
    assert!((top.top_px - 250.0).abs() <= 1e-9);
    assert!((top.left_px - 200.0).abs() <= 1e-9);
    assert_eq!(top.content, "top:\u{a0}30.00");
}

#[test]
fn series_scale_is_inverted_before_formatting() {
    let mut chart = chart();
    chart
        .add_series(
            Series::new("ratio", vec![StackedPoint::new(1.0, 50.0)])
                .with_scale(ValueScale::new((0.0, 1.0), (0.0, 100.0)).expect("scale")),
        )
        .expect("ratio");

    let seen_y = Arc::new(Mutex::new(Vec::<f64>::new()));
    let sink = seen_y.clone();
    let overlay = attach(
        &mut chart,
        AnnotateOptions::default().with_formatter(Arc::new(
            move |series: &Series,
                  _x: f64,
                  y: f64,
                  formatted: Option<&str>,
                  _point: &AnnotationPoint<'_>| {
                sink.lock().expect("lock").push(y);
                format!("{}={}", series.name, formatted.unwrap_or("-"))
            },
        )),
    );

    chart.update();

    assert_eq!(overlay.borrow().nodes()[0].content, "ratio=0.50");
    assert_eq!(*seen_y.lock().expect("lock"), vec![0.5]);
}

#[test]
fn series_formatter_takes_precedence_over_overlay_formatter() {
    let mut chart = chart();
    chart
        .add_series(
            Series::new("bytes", vec![StackedPoint::new(1.0, 2.0)])
                .with_y_formatter(Arc::new(|value: Option<f64>| {
                    value.map(|v| format!("{v:.0} B"))
                })),
        )
        .expect("bytes");
    chart
        .add_series(Series::new("plain", vec![StackedPoint::new(1.0, 3.0)]))
        .expect("plain");
    let overlay = attach(
        &mut chart,
        AnnotateOptions::default()
            .with_y_formatter(Arc::new(|value: Option<f64>| value.map(|v| format!("~{v:.1}")))),
    );

    chart.update();

    let contents: Vec<String> = overlay
        .borrow()
        .nodes()
        .iter()
        .map(|node| node.content.clone())
        .collect();
    assert_eq!(
        contents,
        vec!["bytes:\u{a0}2 B".to_owned(), "plain:\u{a0}~3.0".to_owned()]
    );
}

#[test]
fn custom_text_formatter_changes_content_only() {
    let build = |options: AnnotateOptions| {
        let mut chart = chart();
        chart
            .add_series(Series::new("cpu", vec![StackedPoint::new(4.0, 25.0)]))
            .expect("cpu");
        let overlay = attach(&mut chart, options);
        chart.update();
        let node = overlay.borrow().nodes()[0].clone();
        node
    };

    let default_node = build(AnnotateOptions::default());
    let custom_node = build(AnnotateOptions::default().with_formatter(Arc::new(
        |_series: &Series,
         _x: f64,
         _y: f64,
         formatted: Option<&str>,
         point: &AnnotationPoint<'_>| {
            format!("#{} {}", point.order, formatted.unwrap_or_default())
        },
    )));

    assert_eq!(custom_node.content, "#1 25.00");
    assert_ne!(custom_node.content, default_node.content);
    assert_eq!(custom_node.left_px, default_node.left_px);
    assert_eq!(custom_node.top_px, default_node.top_px);
}

#[test]
fn on_render_receives_every_point_including_empty_ones() {
    let received = Arc::new(Mutex::new(Vec::<(String, usize, bool)>::new()));
    let sink = received.clone();

    let mut chart = chart();
    chart
        .add_series(Series::new(
            "a",
            vec![StackedPoint::new(1.0, 1.0), StackedPoint::empty(2.0)],
        ))
        .expect("a");
    chart
        .add_series(Series::new("b", vec![StackedPoint::new(1.0, 2.0)]))
        .expect("b");
    let _overlay = attach(
        &mut chart,
        AnnotateOptions::default().with_on_render(Arc::new(move |points: &[AnnotationPoint<'_>]| {
            let mut sink = sink.lock().expect("lock");
            sink.clear();
            sink.extend(
                points
                    .iter()
                    .map(|point| (point.name().to_owned(), point.order, point.has_value())),
            );
        })),
    );

    chart.update();

    assert_eq!(
        *received.lock().expect("lock"),
        vec![
            ("a".to_owned(), 1, true),
            ("a".to_owned(), 1, false),
            ("b".to_owned(), 2, true),
        ]
    );
}

#[test]
fn disabled_series_are_not_annotated() {
    let mut chart = chart();
    chart
        .add_series(Series::new("a", vec![StackedPoint::new(1.0, 1.0)]))
        .expect("a");
    chart
        .add_series(Series::new("b", vec![StackedPoint::new(1.0, 2.0)]).with_disabled(true))
        .expect("b");
    let overlay = attach(&mut chart, AnnotateOptions::default());

    chart.update();

    let overlay = overlay.borrow();
    assert_eq!(overlay.nodes().len(), 1);
    assert_eq!(overlay.nodes()[0].series_name, "a");
}
