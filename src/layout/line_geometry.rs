//! Line and step series geometry: continuous path segments with gap
//! handling, point markers, and hover target bands.

use smallvec::SmallVec;

use crate::config::LineConfig;
use crate::data::{Series, SeriesType};
use crate::layout::scale::ScaleArtifacts;
use crate::render::PathCommand;

/// One continuous polyline belonging to a subseries.
///
/// A subseries with gap points can produce several polylines.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub subseries: usize,
    pub commands: Vec<PathCommand>,
}

/// One visible point, with optional label emission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointMarker {
    pub subseries: usize,
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub value: f64,
    pub show_label: bool,
}

/// Hoverable vertical slice serving every subseries at one x-index.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverBand {
    pub index: usize,
    pub x: f64,
    pub width: f64,
    /// Pixel Y of each subseries' point at this index, for tooltip anchoring.
    pub point_ys: SmallVec<[f64; 4]>,
}

/// Geometry plan for one line/step series.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinePlan {
    pub polylines: Vec<Polyline>,
    /// Closed fill outlines down to the baseline, when `fill_lines` is set.
    pub fills: Vec<Polyline>,
    pub markers: Vec<PointMarker>,
    pub hover_bands: Vec<HoverBand>,
}

/// Walks each subseries index-by-index and produces draw geometry.
///
/// A line only begins once a non-gap point is seen. A gap breaks continuity
/// unless `interpolate_nulls` is set or the series is a step series, in which
/// case the previous real point stays the anchor and the line carries
/// forward. Step series insert a horizontal-then-vertical segment pair
/// instead of a direct diagonal.
///
/// Markers and labels are suppressed within `label_line_height` pixels of the
/// drawable top edge, and on indices skipped by the decimation stride.
#[must_use]
pub fn plan_line_series(
    series: &Series,
    series_index: usize,
    scale: &ScaleArtifacts,
    lines: &LineConfig,
) -> LinePlan {
    let mut plan = LinePlan::default();
    let num_points = scale.num_points;
    let is_step = series.options.kind == SeriesType::Step;
    let carry_over_gaps = is_step || series.options.interpolate_nulls;
    let center_offset = scale.x_tick_width / 2.0;

    let mut band_ys: Vec<SmallVec<[f64; 4]>> = vec![SmallVec::new(); num_points];

    for (subseries_index, run) in series.subseries.iter().enumerate() {
        let mut commands: Vec<PathCommand> = Vec::new();
        let mut line_started = false;
        let mut previous: Option<(f64, f64)> = None;

        for (index, point) in run.iter().enumerate().take(num_points) {
            let Some(value) = point.value else {
                if !carry_over_gaps {
                    flush_polyline(&mut plan, series.options.fill_lines, subseries_index, &mut commands, scale, series_index);
                    line_started = false;
                    previous = None;
                }
                continue;
            };

            let x = scale.pixel_x(index, center_offset);
            let y = scale.pixel_y(series_index, value);
            band_ys[index].push(y);

            if line_started {
                if is_step {
                    if let Some((_, prev_y)) = previous {
                        commands.push(PathCommand::LineTo { x, y: prev_y });
                    }
                }
                commands.push(PathCommand::LineTo { x, y });
            } else {
                commands.push(PathCommand::MoveTo { x, y });
                line_started = true;
            }
            previous = Some((x, y));

            let near_top = y < scale.drawable_top() + lines.label_line_height;
            let decimated = index % scale.show_every_nth != 0;
            if series.options.show_points && !near_top && !decimated {
                plan.markers.push(PointMarker {
                    subseries: subseries_index,
                    index,
                    x,
                    y,
                    value,
                    show_label: series.options.label_points,
                });
            }
        }

        flush_polyline(&mut plan, series.options.fill_lines, subseries_index, &mut commands, scale, series_index);
    }

    for (index, point_ys) in band_ys.into_iter().enumerate() {
        if point_ys.is_empty() {
            continue;
        }
        plan.hover_bands.push(HoverBand {
            index,
            x: scale.pixel_x(index, 0.0),
            width: scale.x_tick_width,
            point_ys,
        });
    }

    plan
}

fn flush_polyline(
    plan: &mut LinePlan,
    fill_lines: bool,
    subseries: usize,
    commands: &mut Vec<PathCommand>,
    scale: &ScaleArtifacts,
    series_index: usize,
) {
    if commands.len() < 2 {
        commands.clear();
        return;
    }

    let finished = std::mem::take(commands);

    if fill_lines
        && let (Some(first), Some(last)) = (endpoint(finished.first()), endpoint(finished.last()))
    {
        let baseline = scale.baseline_y(series_index);
        let mut outline = finished.clone();
        outline.push(PathCommand::LineTo { x: last.0, y: baseline });
        outline.push(PathCommand::LineTo { x: first.0, y: baseline });
        outline.push(PathCommand::Close);
        plan.fills.push(Polyline {
            subseries,
            commands: outline,
        });
    }

    plan.polylines.push(Polyline {
        subseries,
        commands: finished,
    });
}

fn endpoint(command: Option<&PathCommand>) -> Option<(f64, f64)> {
    match command {
        Some(PathCommand::MoveTo { x, y } | PathCommand::LineTo { x, y }) => Some((*x, *y)),
        _ => None,
    }
}
