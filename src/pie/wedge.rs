//! Pure wedge geometry: angular spans, vector paths, and polygon sampling
//! for hit-testing.
//!
//! Angles are degrees, `0°` at the top reference, increasing clockwise.

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::PathCommand;

/// Arc sampling density for hit-test polygons, in samples per degree.
const OUTLINE_SAMPLES_PER_DEG: f64 = 0.25;

/// One angular slice of a pie/donut chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wedge {
    pub value: f64,
    pub start_angle_deg: f64,
    pub sweep_deg: f64,
    /// Radial explode offset from the center, in pixels.
    pub offset: f64,
}

impl Wedge {
    /// Midpoint angle of the wedge span.
    #[must_use]
    pub fn mid_angle_deg(&self) -> f64 {
        self.start_angle_deg + self.sweep_deg / 2.0
    }

    /// A zero-sweep wedge is hidden and never intercepts hover or click.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.sweep_deg > 0.0
    }
}

/// Computes cumulative wedge spans from raw values.
///
/// Each wedge's start angle is the sum of the sweeps of all preceding wedges
/// in series order; sweeps are `360 * value / total`. A zero value gets zero
/// sweep. When the total is not positive the chart degenerates to all
/// zero-sweep wedges; that is the documented edge case, not auto-corrected.
#[must_use]
pub fn wedge_angles(values: &[f64]) -> Vec<Wedge> {
    let total: f64 = values.iter().filter(|v| v.is_finite()).sum();
    let mut cursor = 0.0_f64;

    values
        .iter()
        .map(|&value| {
            let sweep = if total > 0.0 && value.is_finite() && value > 0.0 {
                360.0 * value / total
            } else {
                0.0
            };
            let wedge = Wedge {
                value,
                start_angle_deg: cursor,
                sweep_deg: sweep,
                offset: 0.0,
            };
            cursor += sweep;
            wedge
        })
        .collect()
}

/// Builds the vector path of one wedge: center, radial edge, outer arc,
/// close.
///
/// Fails fast on a negative radius or non-finite angles; those are caller
/// bugs, never clamped.
pub fn wedge_path(
    cx: f64,
    cy: f64,
    radius: f64,
    start_deg: f64,
    end_deg: f64,
) -> ChartResult<Vec<PathCommand>> {
    validate_wedge_params(cx, cy, radius, start_deg, end_deg)?;

    let (x1, y1) = point_on_circle(cx, cy, radius, start_deg);
    let (x2, y2) = point_on_circle(cx, cy, radius, end_deg);
    let large_arc = (end_deg - start_deg).abs() > 180.0;

    Ok(vec![
        PathCommand::MoveTo { x: cx, y: cy },
        PathCommand::LineTo { x: x1, y: y1 },
        PathCommand::ArcTo {
            r: radius,
            large_arc,
            sweep: end_deg > start_deg,
            x: x2,
            y: y2,
        },
        PathCommand::Close,
    ])
}

/// Samples one wedge (with rotation applied) into a closed polygon for
/// point-in-polygon hit testing.
pub fn wedge_outline(
    cx: f64,
    cy: f64,
    radius: f64,
    start_deg: f64,
    end_deg: f64,
    rotation_deg: f64,
) -> ChartResult<Vec<(f64, f64)>> {
    validate_wedge_params(cx, cy, radius, start_deg, end_deg)?;
    if !rotation_deg.is_finite() {
        return Err(ChartError::InvalidGeometry(
            "rotation angle must be finite".to_owned(),
        ));
    }

    let span = end_deg - start_deg;
    let steps = ((span.abs() * OUTLINE_SAMPLES_PER_DEG).ceil() as usize).max(2);

    let mut polygon = Vec::with_capacity(steps + 2);
    polygon.push((cx, cy));
    for step in 0..=steps {
        let angle = start_deg + span * step as f64 / steps as f64 + rotation_deg;
        polygon.push(point_on_circle(cx, cy, radius, angle));
    }
    Ok(polygon)
}

/// Ray-casting point-in-polygon test.
#[must_use]
pub fn point_in_polygon(x: f64, y: f64, polygon: &[(f64, f64)]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (xi, yi) = polygon[i];
        let (xj, yj) = polygon[j];
        let crosses = (yi > y) != (yj > y);
        if crosses && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn point_on_circle(cx: f64, cy: f64, radius: f64, angle_deg: f64) -> (f64, f64) {
    // Shift so 0 degrees points at the top reference.
    let rad = (angle_deg - 90.0).to_radians();
    (cx + radius * rad.cos(), cy + radius * rad.sin())
}

fn validate_wedge_params(
    cx: f64,
    cy: f64,
    radius: f64,
    start_deg: f64,
    end_deg: f64,
) -> ChartResult<()> {
    if !cx.is_finite() || !cy.is_finite() {
        return Err(ChartError::InvalidGeometry(
            "wedge center must be finite".to_owned(),
        ));
    }
    if !radius.is_finite() || radius < 0.0 {
        return Err(ChartError::InvalidGeometry(format!(
            "wedge radius must be finite and >= 0, got {radius}"
        )));
    }
    if !start_deg.is_finite() || !end_deg.is_finite() {
        return Err(ChartError::InvalidGeometry(
            "wedge angles must be finite".to_owned(),
        ));
    }
    Ok(())
}
