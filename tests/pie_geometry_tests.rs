use approx::assert_relative_eq;
use quillchart::error::ChartError;
use quillchart::pie::{HoverEvent, PieGeometry, PieState, wedge_angles};
use quillchart::render::{InstantScheduler, PathCommand};

fn drawn_pie(values: &[f64]) -> PieGeometry {
    let mut pie = PieGeometry::new(100.0, 100.0, 50.0, 0.0).expect("pie");
    let mut scheduler = InstantScheduler::default();
    pie.draw(values, &mut scheduler).expect("draw");
    pie
}

#[test]
fn sweeps_are_proportional_and_cumulative() {
    let wedges = wedge_angles(&[1.0, 1.0, 2.0]);

    assert_relative_eq!(wedges[0].start_angle_deg, 0.0);
    assert_relative_eq!(wedges[0].sweep_deg, 90.0);
    assert_relative_eq!(wedges[1].start_angle_deg, 90.0);
    assert_relative_eq!(wedges[1].sweep_deg, 90.0);
    assert_relative_eq!(wedges[2].start_angle_deg, 180.0);
    assert_relative_eq!(wedges[2].sweep_deg, 180.0);

    let total: f64 = wedges.iter().map(|w| w.sweep_deg).sum();
    assert_relative_eq!(total, 360.0);
}

#[test]
fn zero_value_wedge_has_zero_sweep_and_is_hidden() {
    let wedges = wedge_angles(&[3.0, 0.0, 1.0]);
    assert_relative_eq!(wedges[1].sweep_deg, 0.0);
    assert!(!wedges[1].is_visible());
    // Later wedges are unaffected by the hidden one.
    assert_relative_eq!(wedges[2].start_angle_deg, 270.0);
}

#[test]
fn non_positive_total_degenerates_to_zero_sweeps() {
    for wedge in wedge_angles(&[0.0, 0.0]) {
        assert_relative_eq!(wedge.sweep_deg, 0.0);
    }
    for wedge in wedge_angles(&[-4.0, 2.0]) {
        assert_relative_eq!(wedge.sweep_deg, 0.0);
    }
}

#[test]
fn instant_draw_settles_straight_to_idle() {
    let pie = drawn_pie(&[1.0, 1.0]);
    assert_eq!(pie.state(), PieState::Idle);
    assert!(pie.wedge_events_enabled());
}

#[test]
fn rotation_wraps_into_the_canonical_range() {
    let mut pie = drawn_pie(&[1.0, 1.0]);
    let mut scheduler = InstantScheduler::default();

    pie.rotate(450.0, &mut scheduler).expect("rotate");
    assert_relative_eq!(pie.rotation_deg(), 90.0);

    pie.rotate(-90.0, &mut scheduler).expect("rotate");
    assert_relative_eq!(pie.rotation_deg(), 270.0);
}

#[test]
fn rotate_to_wedge_centers_its_midpoint_at_the_top() {
    let mut pie = drawn_pie(&[1.0, 1.0, 2.0]);
    let mut scheduler = InstantScheduler::default();

    // Wedge 2 spans 180..360, midpoint 270; target is 90.
    pie.rotate_to_wedge(2, &mut scheduler).expect("rotate");
    assert_relative_eq!(pie.rotation_deg(), 90.0);

    // Wedge 0 spans 0..90, midpoint 45; target is 315.
    pie.rotate_to_wedge(0, &mut scheduler).expect("rotate");
    assert_relative_eq!(pie.rotation_deg(), 315.0);
}

#[test]
fn resize_rejects_mismatched_value_counts() {
    let mut pie = drawn_pie(&[1.0, 2.0, 3.0]);
    let mut scheduler = InstantScheduler::default();

    let result = pie.resize(&[1.0, 2.0], &mut scheduler);
    assert!(matches!(result, Err(ChartError::InvalidData(_))));
    // Existing wedges survive a rejected resize.
    assert_eq!(pie.wedges().len(), 3);
}

#[test]
fn resize_recomputes_sweeps_in_place() {
    let mut pie = drawn_pie(&[1.0, 1.0]);
    let mut scheduler = InstantScheduler::default();

    pie.resize(&[3.0, 1.0], &mut scheduler).expect("resize");
    assert_relative_eq!(pie.wedges()[0].sweep_deg, 270.0);
    assert_relative_eq!(pie.wedges()[1].start_angle_deg, 270.0);
    assert_eq!(pie.state(), PieState::Idle);
}

#[test]
fn click_updates_selection_and_reports_the_change() {
    let mut pie = drawn_pie(&[1.0, 1.0]);

    let first = pie.click_wedge(0).expect("click").expect("change");
    assert_eq!(first.previous, None);
    assert_eq!(first.next, Some(0));

    let second = pie.click_wedge(1).expect("click").expect("change");
    assert_eq!(second.previous, Some(0));
    assert_eq!(second.next, Some(1));
    assert_eq!(pie.selected_wedge(), Some(1));
}

#[test]
fn click_on_hidden_wedge_is_swallowed() {
    let mut pie = drawn_pie(&[2.0, 0.0]);
    let outcome = pie.click_wedge(1).expect("click");
    assert_eq!(outcome, None);
    assert_eq!(pie.selected_wedge(), None);
}

#[test]
fn click_while_events_are_suspended_is_swallowed() {
    let mut pie = drawn_pie(&[1.0, 1.0]);
    pie.wedge_events_disable();
    assert_eq!(pie.click_wedge(0).expect("click"), None);

    pie.wedge_events_enable(false);
    assert!(pie.click_wedge(0).expect("click").is_some());
}

#[test]
fn out_of_range_wedge_index_is_an_error() {
    let mut pie = drawn_pie(&[1.0, 1.0]);
    let result = pie.click_wedge(9);
    assert!(matches!(
        result,
        Err(ChartError::WedgeNotFound { index: 9, count: 2 })
    ));
}

#[test]
fn hit_test_finds_the_wedge_under_the_pointer() {
    let pie = drawn_pie(&[1.0, 1.0, 2.0]);

    // 45 degrees clockwise from top at radius 25: inside wedge 0.
    assert_eq!(pie.hit_test(117.7, 82.3), Some(0));
    // 135 degrees: inside wedge 1.
    assert_eq!(pie.hit_test(117.7, 117.7), Some(1));
    // 270 degrees: inside wedge 2.
    assert_eq!(pie.hit_test(75.0, 100.0), Some(2));
    // Outside the radius entirely.
    assert_eq!(pie.hit_test(200.0, 200.0), None);
}

#[test]
fn hit_test_respects_rotation() {
    let mut pie = drawn_pie(&[1.0, 1.0, 2.0]);
    let mut scheduler = InstantScheduler::default();
    pie.rotate(90.0, &mut scheduler).expect("rotate");

    // The point at 135 degrees now falls in wedge 0 (0..90 rotated by 90).
    assert_eq!(pie.hit_test(117.7, 117.7), Some(0));
}

#[test]
fn hidden_wedges_never_hit() {
    let pie = drawn_pie(&[0.0, 4.0]);
    // Wedge 1 owns the full circle; wedge 0 must never intercept.
    assert_eq!(pie.hit_test(100.0, 80.0), Some(1));
    assert_eq!(pie.hit_test(117.7, 82.3), Some(1));
}

#[test]
fn pointer_move_synthesizes_hover_out_then_in_once() {
    let mut pie = drawn_pie(&[1.0, 1.0]);

    let entered = pie.pointer_move(117.7, 82.3);
    assert_eq!(entered.as_slice(), [HoverEvent::HoverIn { wedge: 0 }]);

    // Still inside the same wedge: no events.
    assert!(pie.pointer_move(115.0, 85.0).is_empty());

    let crossed = pie.pointer_move(117.7, 117.7);
    assert_eq!(
        crossed.as_slice(),
        [
            HoverEvent::HoverOut { wedge: 0 },
            HoverEvent::HoverIn { wedge: 1 },
        ]
    );

    let left = pie.pointer_move(300.0, 300.0);
    assert_eq!(left.as_slice(), [HoverEvent::HoverOut { wedge: 1 }]);
}

#[test]
fn pointer_move_while_suspended_produces_nothing() {
    let mut pie = drawn_pie(&[1.0, 1.0]);
    pie.wedge_events_disable();
    assert!(pie.pointer_move(117.7, 82.3).is_empty());
}

#[test]
fn nearest_wedge_accounts_for_rotation_and_wraparound() {
    let mut pie = drawn_pie(&[1.0, 1.0, 2.0]);
    assert_eq!(pie.nearest_wedge(40.0), Some(0));
    assert_eq!(pie.nearest_wedge(300.0), Some(2));

    let mut scheduler = InstantScheduler::default();
    pie.rotate(90.0, &mut scheduler).expect("rotate");
    // Wedge 0's midpoint moved from 45 to 135.
    assert_eq!(pie.nearest_wedge(135.0), Some(0));
}

#[test]
fn wedge_commands_trace_center_edge_arc_close() {
    let pie = drawn_pie(&[1.0, 3.0]);
    let commands = pie.wedge_commands(1).expect("commands");

    assert_eq!(commands.len(), 4);
    assert!(matches!(
        commands[0],
        PathCommand::MoveTo { x, y } if (x - 100.0).abs() < 1e-9 && (y - 100.0).abs() < 1e-9
    ));
    assert!(matches!(
        commands[2],
        PathCommand::ArcTo { large_arc: true, sweep: true, .. }
    ));
    assert!(matches!(commands[3], PathCommand::Close));
}

#[test]
fn pie_hole_and_hit_shield_share_the_center() {
    let mut pie = PieGeometry::new(100.0, 100.0, 50.0, 20.0).expect("pie");
    let mut scheduler = InstantScheduler::default();
    pie.draw(&[1.0], &mut scheduler).expect("draw");

    let hole = pie.pie_hole();
    assert_relative_eq!(hole.cx, 100.0);
    assert_relative_eq!(hole.radius, 20.0);

    let shield = pie.hit_shield();
    assert_relative_eq!(shield.radius, 50.0);
}

#[test]
fn invalid_radii_fail_construction() {
    assert!(PieGeometry::new(0.0, 0.0, 0.0, 0.0).is_err());
    assert!(PieGeometry::new(0.0, 0.0, -5.0, 0.0).is_err());
    assert!(PieGeometry::new(0.0, 0.0, 10.0, 10.0).is_err());
    assert!(PieGeometry::new(0.0, 0.0, 10.0, -1.0).is_err());
    assert!(PieGeometry::new(f64::NAN, 0.0, 10.0, 0.0).is_err());
}

#[test]
fn destroyed_pie_rejects_every_operation() {
    let mut pie = drawn_pie(&[1.0, 1.0]);
    let mut scheduler = InstantScheduler::default();
    pie.destroy();

    assert_eq!(pie.state(), PieState::Destroyed);
    assert!(pie.draw(&[1.0], &mut scheduler).is_err());
    assert!(pie.rotate(90.0, &mut scheduler).is_err());
    assert!(pie.resize(&[1.0, 1.0], &mut scheduler).is_err());
    assert!(pie.wedges().is_empty());
}
