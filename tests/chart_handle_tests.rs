use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use quillchart::config::{ChartConfig, PieConfig};
use quillchart::data::{ChartInput, Point, Series, SeriesOptions, SeriesType};
use quillchart::error::ChartError;
use quillchart::layout::PlotArea;
use quillchart::pie::{HoverEvent, PieState};
use quillchart::render::NullRenderer;
use quillchart::{ChartHandle, Graph};

fn area() -> PlotArea {
    PlotArea::new(400, 300)
}

fn line_chart(values: Vec<f64>) -> ChartHandle<NullRenderer> {
    ChartHandle::render(
        NullRenderer::default(),
        area(),
        ChartConfig::default(),
        ChartInput::Values(values),
    )
    .expect("render")
}

fn pie_series(values: &[f64]) -> Vec<Series> {
    values
        .iter()
        .map(|&value| {
            Series::new(
                vec![vec![Point::from_value(value)]],
                SeriesOptions {
                    kind: SeriesType::Pie,
                    ..SeriesOptions::default()
                },
            )
        })
        .collect()
}

fn pie_chart(values: &[f64]) -> ChartHandle<NullRenderer> {
    ChartHandle::render(
        NullRenderer::default(),
        area(),
        ChartConfig::default(),
        ChartInput::Series(pie_series(values)),
    )
    .expect("render")
}

#[test]
fn render_runs_the_full_pipeline() {
    let chart = line_chart(vec![1.0, 5.0, 3.0]);
    let graph = chart.graph();

    assert_eq!(graph.scale.num_points, 3);
    assert_eq!(graph.y_labels.len(), 5);
    assert!(chart.pie().is_none());
}

#[test]
fn draw_hands_geometry_to_the_renderer() {
    let mut chart = line_chart(vec![1.0, 5.0, 3.0]);
    chart.draw().expect("draw");

    let renderer = chart.renderer();
    // Grid lines plus the series polyline.
    assert!(renderer.last_path_count > 1);
    // Y-axis labels.
    assert_eq!(renderer.last_text_count, 5);
    // Point markers.
    assert_eq!(renderer.last_circle_count, 3);
    assert_eq!(renderer.last_rect_count, 0);
}

#[test]
fn bar_series_produce_rectangles() {
    let mut chart = ChartHandle::render(
        NullRenderer::default(),
        area(),
        ChartConfig::default(),
        ChartInput::Single {
            points: vec![Point::from_value(2.0), Point::from_value(4.0)],
            options: Some(SeriesOptions {
                kind: SeriesType::Bar,
                ..SeriesOptions::default()
            }),
        },
    )
    .expect("render");
    chart.draw().expect("draw");

    assert_eq!(chart.renderer().last_rect_count, 2);
    assert_eq!(chart.renderer().last_circle_count, 0);
}

#[test]
fn series_defaults_apply_to_bare_value_input() {
    let config = ChartConfig {
        series_defaults: SeriesOptions {
            kind: SeriesType::Bar,
            ..SeriesOptions::default()
        },
        ..ChartConfig::default()
    };
    let mut chart = ChartHandle::render(
        NullRenderer::default(),
        area(),
        config,
        ChartInput::Values(vec![1.0, 2.0]),
    )
    .expect("render");

    assert_eq!(chart.graph().options[0].kind, SeriesType::Bar);

    chart.draw().expect("draw");
    assert_eq!(chart.renderer().last_rect_count, 2);
    assert_eq!(chart.renderer().last_circle_count, 0);
}

#[test]
fn series_defaults_survive_an_update() {
    let config = ChartConfig {
        series_defaults: SeriesOptions {
            kind: SeriesType::Step,
            ..SeriesOptions::default()
        },
        ..ChartConfig::default()
    };
    let mut chart = ChartHandle::render(
        NullRenderer::default(),
        area(),
        config,
        ChartInput::Values(vec![1.0]),
    )
    .expect("render");
    chart
        .update(ChartInput::Values(vec![3.0, 4.0]))
        .expect("update");

    assert_eq!(chart.graph().options[0].kind, SeriesType::Step);
}

#[test]
fn update_rebuilds_the_graph_wholesale() {
    let mut chart = line_chart(vec![1.0, 2.0]);
    chart
        .update(ChartInput::Values(vec![10.0, 20.0, 30.0, 40.0]))
        .expect("update");

    assert_eq!(chart.graph().scale.num_points, 4);
}

#[test]
fn empty_palette_is_rejected() {
    let mut chart = line_chart(vec![1.0]);
    let result = chart.update_colors(Vec::new());
    assert!(matches!(result, Err(ChartError::EmptyPalette)));
}

#[test]
fn malformed_palette_entries_are_rejected() {
    let mut chart = line_chart(vec![1.0]);
    assert!(chart.update_colors(vec!["#12".to_owned()]).is_err());
    assert!(chart.update_colors(vec!["red".to_owned()]).is_err());

    chart
        .update_colors(vec!["#336699".to_owned(), "#fc3".to_owned()])
        .expect("valid palette");
    assert_eq!(chart.config().colors.len(), 2);
}

#[test]
fn pie_series_mount_a_pie_geometry() {
    let chart = pie_chart(&[1.0, 1.0, 2.0]);
    let pie = chart.pie().expect("pie");

    assert_eq!(pie.wedges().len(), 3);
    assert_relative_eq!(pie.wedges()[2].sweep_deg, 180.0);
    assert_eq!(pie.state(), PieState::Idle);
}

#[test]
fn pie_wedge_values_come_from_series_sums() {
    // A pie series with several points contributes its sum as one wedge.
    let series = vec![
        Series::new(
            vec![vec![Point::from_value(1.0), Point::from_value(2.0)]],
            SeriesOptions {
                kind: SeriesType::Pie,
                ..SeriesOptions::default()
            },
        ),
        Series::new(
            vec![vec![Point::from_value(3.0)]],
            SeriesOptions {
                kind: SeriesType::Pie,
                ..SeriesOptions::default()
            },
        ),
    ];
    let chart = ChartHandle::render(
        NullRenderer::default(),
        area(),
        ChartConfig::default(),
        ChartInput::Series(series),
    )
    .expect("render");

    let wedges = chart.pie().expect("pie").wedges();
    assert_relative_eq!(wedges[0].value, 3.0);
    assert_relative_eq!(wedges[1].value, 3.0);
    assert_relative_eq!(wedges[0].sweep_deg, 180.0);
}

#[test]
fn pie_operations_on_a_cartesian_chart_fail() {
    let mut chart = line_chart(vec![1.0, 2.0]);
    assert!(chart.rotate(90.0).is_err());
    assert!(chart.rotate_to_wedge(0).is_err());
    assert!(chart.update_live(&[1.0]).is_err());
    assert!(chart.click_wedge(0).is_err());
}

#[test]
fn default_click_behavior_rotates_the_selection_to_the_top() {
    let mut chart = pie_chart(&[1.0, 1.0, 2.0]);
    let change = chart.click_wedge(2).expect("click").expect("change");

    assert_eq!(change.next, Some(2));
    let pie = chart.pie().expect("pie");
    assert_eq!(pie.selected_wedge(), Some(2));
    // Wedge 2's midpoint (270) rotated to the top reference.
    assert_relative_eq!(pie.rotation_deg(), 90.0);
}

#[test]
fn custom_selection_handler_replaces_the_default_rotation() {
    let mut chart = pie_chart(&[1.0, 1.0]);
    chart.on_wedge_selection_changed(|_change| {});

    chart.click_wedge(1).expect("click").expect("change");
    // No rotate-to-wedge happened.
    assert_relative_eq!(chart.pie().expect("pie").rotation_deg(), 0.0);
}

#[test]
fn wedge_event_controls_pass_through_the_handle() {
    let mut chart = pie_chart(&[1.0, 1.0]);

    chart.wedge_events_disable().expect("disable");
    assert_eq!(chart.click_wedge(0).expect("click"), None);

    chart.wedge_events_enable(false).expect("enable");
    assert!(chart.click_wedge(0).expect("click").is_some());

    chart.wedge_events_disable().expect("disable");
    chart.wedge_events_disable().expect("disable");
    chart.wedge_events_enable(true).expect("force enable");
    assert!(chart.click_wedge(1).expect("click").is_some());
}

#[test]
fn update_live_resizes_wedges_in_place() {
    let mut chart = pie_chart(&[1.0, 1.0]);
    chart.update_live(&[3.0, 1.0]).expect("resize");

    let wedges = chart.pie().expect("pie").wedges();
    assert_relative_eq!(wedges[0].sweep_deg, 270.0);
}

#[test]
fn update_replaces_the_pie_wholesale() {
    let mut chart = pie_chart(&[1.0, 1.0]);
    chart
        .update(ChartInput::Series(pie_series(&[1.0, 1.0, 1.0, 1.0])))
        .expect("update");

    let pie = chart.pie().expect("pie");
    assert_eq!(pie.wedges().len(), 4);
    assert_relative_eq!(pie.wedges()[0].sweep_deg, 90.0);
}

#[test]
fn pie_draw_emits_filled_wedge_paths() {
    let mut chart = pie_chart(&[1.0, 1.0, 2.0]);
    chart.draw().expect("draw");
    // Grid paths plus three wedge paths.
    assert!(chart.renderer().last_path_count >= 3);
}

#[test]
fn update_series_accepts_canonical_data() {
    let mut chart = line_chart(vec![1.0]);
    chart
        .update_series(vec![Series::from_points(vec![
            Point::from_value(1.0),
            Point::from_value(2.0),
        ])])
        .expect("update");
    assert_eq!(chart.graph().scale.num_points, 2);
}

#[test]
fn pointer_move_is_inert_without_pass_through() {
    let mut chart = pie_chart(&[1.0, 1.0]);
    // Pointer well inside the right-half wedge.
    let events = chart.pointer_move(260.0, 120.0).expect("move");
    assert!(events.is_empty());
}

#[test]
fn pointer_move_passes_through_to_wedge_hover() {
    let config = ChartConfig {
        pie: PieConfig {
            use_pass_through: true,
            ..PieConfig::default()
        },
        ..ChartConfig::default()
    };
    let mut chart = ChartHandle::render(
        NullRenderer::default(),
        area(),
        config,
        ChartInput::Series(pie_series(&[1.0, 1.0])),
    )
    .expect("render");

    let seen: Rc<RefCell<Vec<HoverEvent>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    chart.on_wedge_hover_changed(move |event| sink.borrow_mut().push(event));

    // Into the right-half wedge, across to the left half, then off the pie.
    let entered = chart.pointer_move(260.0, 120.0).expect("move");
    assert_eq!(entered.as_slice(), &[HoverEvent::HoverIn { wedge: 0 }]);

    let crossed = chart.pointer_move(150.0, 180.0).expect("move");
    assert_eq!(
        crossed.as_slice(),
        &[
            HoverEvent::HoverOut { wedge: 0 },
            HoverEvent::HoverIn { wedge: 1 },
        ]
    );

    let left = chart.pointer_move(0.0, 0.0).expect("move");
    assert_eq!(left.as_slice(), &[HoverEvent::HoverOut { wedge: 1 }]);

    assert_eq!(
        seen.borrow().as_slice(),
        &[
            HoverEvent::HoverIn { wedge: 0 },
            HoverEvent::HoverOut { wedge: 0 },
            HoverEvent::HoverIn { wedge: 1 },
            HoverEvent::HoverOut { wedge: 1 },
        ]
    );
}

#[test]
fn highlighted_column_strokes_a_border_path() {
    let mut chart = ChartHandle::render(
        NullRenderer::default(),
        area(),
        ChartConfig::default(),
        ChartInput::Single {
            points: vec![Point::from_value(2.0), Point::gap(), Point::from_value(4.0)],
            options: Some(SeriesOptions {
                kind: SeriesType::Bar,
                ..SeriesOptions::default()
            }),
        },
    )
    .expect("render");

    chart.draw().expect("draw");
    let base = chart.renderer().last_path_count;

    chart.highlight_column(Some(2));
    chart.draw().expect("draw");
    assert_eq!(chart.renderer().last_path_count, base + 1);

    // The gap column holds no bars, so nothing is stroked.
    chart.highlight_column(Some(1));
    chart.draw().expect("draw");
    assert_eq!(chart.renderer().last_path_count, base);

    chart.highlight_column(None);
    chart.draw().expect("draw");
    assert_eq!(chart.renderer().last_path_count, base);
}

#[test]
fn pie_center_override_positions_the_geometry() {
    let config = ChartConfig {
        pie: PieConfig {
            center: Some((60.0, 70.0)),
            radius: Some(20.0),
            ..PieConfig::default()
        },
        ..ChartConfig::default()
    };
    let chart = ChartHandle::render(
        NullRenderer::default(),
        area(),
        config,
        ChartInput::Series(pie_series(&[1.0, 1.0])),
    )
    .expect("render");

    let pie = chart.pie().expect("pie");
    let hole = pie.pie_hole();
    assert_relative_eq!(hole.cx, 60.0);
    assert_relative_eq!(hole.cy, 70.0);
    assert_relative_eq!(pie.hit_shield().radius, 20.0);
}

#[test]
fn animation_disabled_forces_instant_transitions() {
    use quillchart::layout::FixedTextMeasurer;
    use quillchart::render::{AnimationHandle, AnimationScheduler, AnimationSpec};

    struct PendingScheduler;
    impl AnimationScheduler for PendingScheduler {
        fn animate(&mut self, _spec: AnimationSpec) -> AnimationHandle {
            AnimationHandle::pending()
        }
    }

    let config = ChartConfig {
        animation: false,
        ..ChartConfig::default()
    };
    let chart = ChartHandle::render_with(
        NullRenderer::default(),
        area(),
        config,
        ChartInput::Series(pie_series(&[1.0, 1.0])),
        Box::new(PendingScheduler),
        Box::new(FixedTextMeasurer::new(14.0)),
    )
    .expect("render");

    // The pending scheduler was ignored: the draw-in settled immediately.
    assert_eq!(chart.pie().expect("pie").state(), PieState::Idle);
}

#[test]
fn degenerate_area_fails_at_render() {
    let result = ChartHandle::render(
        NullRenderer::default(),
        PlotArea::new(0, 0),
        ChartConfig::default(),
        ChartInput::Values(vec![1.0]),
    );
    assert!(matches!(result, Err(ChartError::InvalidPlotArea { .. })));
}

#[test]
fn graph_snapshot_round_trips_through_serde() {
    let chart = line_chart(vec![1.0, 5.0, 3.0]);
    let snapshot = chart.graph().snapshot();

    let json = serde_json::to_string(&snapshot).expect("serialize");
    let back: quillchart::api::GraphSnapshot =
        serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, snapshot);
}

#[test]
fn dynamic_left_padding_widens_for_long_labels() {
    let config = ChartConfig {
        dynamic_left_padding: true,
        ..ChartConfig::default()
    };
    let chart = ChartHandle::render(
        NullRenderer::default(),
        area(),
        config,
        ChartInput::Values(vec![0.0, 1_000_000.0]),
    )
    .expect("render");

    // "1,000,000" at the rough advance width outgrows the 50px default.
    let graph: &Graph = chart.graph();
    assert!(graph.label_width > 50.0);
    assert_relative_eq!(graph.scale.padding().left, graph.label_width);
}
