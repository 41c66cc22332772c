//! `ChartHandle`: the caller-facing engine tying normalization, layout,
//! pie geometry, and the rendering backend together.

use smallvec::SmallVec;
use tracing::debug;

use crate::api::graph::Graph;
use crate::config::{AxisConfig, ChartConfig};
use crate::data::{ChartInput, Series, SeriesType, normalize_with};
use crate::error::{ChartError, ChartResult};
use crate::layout::headroom::{FixedTextMeasurer, TextMeasurer};
use crate::layout::scale::PlotArea;
use crate::layout::{ColumnTarget, plan_bar_series, plan_line_series};
use crate::pie::{HoverEvent, PieGeometry, SelectionChange};
use crate::render::{
    AnimationScheduler, CirclePrimitive, Color, InstantScheduler, PathCommand, PathPrimitive,
    RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

const AXIS_FONT_PX: f64 = 11.0;
const GRID_STROKE_PX: f64 = 1.0;
const GRID_COLOR: Color = Color::rgba(0.0, 0.0, 0.0, 0.15);
const LABEL_COLOR: Color = Color::rgba(0.0, 0.0, 0.0, 0.8);

type SelectionHandler = Box<dyn FnMut(SelectionChange)>;
type HoverHandler = Box<dyn FnMut(HoverEvent)>;

/// One mounted chart: owns the renderer, the computed `Graph`, and (for pie
/// series) the pie geometry engine.
///
/// The handle owns all mutable chart state; callers must serialize updates —
/// concurrent mutation is out of contract.
pub struct ChartHandle<R: Renderer> {
    renderer: R,
    config: ChartConfig,
    graph: Graph,
    pie: Option<PieGeometry>,
    scheduler: Box<dyn AnimationScheduler>,
    measurer: Box<dyn TextMeasurer>,
    selection_handler: Option<SelectionHandler>,
    hover_handler: Option<HoverHandler>,
    highlighted_column: Option<usize>,
}

impl<R: Renderer> ChartHandle<R> {
    /// Normalizes `input`, runs the layout pipeline, and mounts the chart.
    ///
    /// Uses an instant animation scheduler and a fixed-height text measurer;
    /// interactive hosts swap these via [`render_with`](Self::render_with).
    pub fn render(
        renderer: R,
        area: PlotArea,
        config: ChartConfig,
        input: ChartInput,
    ) -> ChartResult<Self> {
        Self::render_with(
            renderer,
            area,
            config,
            input,
            Box::new(InstantScheduler::default()),
            Box::new(FixedTextMeasurer::new(14.0)),
        )
    }

    pub fn render_with(
        renderer: R,
        area: PlotArea,
        config: ChartConfig,
        input: ChartInput,
        scheduler: Box<dyn AnimationScheduler>,
        measurer: Box<dyn TextMeasurer>,
    ) -> ChartResult<Self> {
        let series = normalize_with(input, config.series_defaults);
        let graph = Graph::build(area, &config, series, measurer.as_ref())?;

        // `animation: false` settles every transition immediately, whatever
        // scheduler the host supplied.
        let scheduler: Box<dyn AnimationScheduler> = if config.animation {
            scheduler
        } else {
            Box::new(InstantScheduler::default())
        };

        let mut handle = Self {
            renderer,
            config,
            graph,
            pie: None,
            scheduler,
            measurer,
            selection_handler: None,
            hover_handler: None,
            highlighted_column: None,
        };
        handle.rebuild_pie()?;
        Ok(handle)
    }

    /// Re-normalizes new data and recomputes the full scale/geometry
    /// pipeline, discarding prior geometry. Any in-flight pie animation is
    /// superseded, never interleaved.
    pub fn update(&mut self, input: ChartInput) -> ChartResult<()> {
        let series = normalize_with(input, self.config.series_defaults);
        self.graph = Graph::build(self.graph.area, &self.config, series, self.measurer.as_ref())?;
        if let Some(pie) = self.pie.as_mut() {
            pie.destroy();
        }
        self.pie = None;
        self.rebuild_pie()?;
        debug!(series = self.graph.series.len(), "chart updated");
        Ok(())
    }

    /// Assembles the draw geometry and hands it to the rendering backend.
    pub fn draw(&mut self) -> ChartResult<()> {
        let frame = self.build_frame()?;
        self.renderer.render(&frame)
    }

    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Replaces the color palette. An empty palette is a caller bug.
    pub fn update_colors(&mut self, colors: Vec<String>) -> ChartResult<()> {
        if colors.is_empty() {
            return Err(ChartError::EmptyPalette);
        }
        for color in &colors {
            Color::from_css_hex(color)?;
        }
        self.config.colors = colors;
        Ok(())
    }

    // Pie extensions. Each returns `InvalidData` when the chart holds no pie
    // series.

    #[must_use]
    pub fn pie(&self) -> Option<&PieGeometry> {
        self.pie.as_ref()
    }

    pub fn rotate(&mut self, degrees: f64) -> ChartResult<()> {
        let (pie, scheduler) = self.pie_and_scheduler()?;
        pie.rotate(degrees, scheduler).map(drop)
    }

    pub fn rotate_to_wedge(&mut self, index: usize) -> ChartResult<()> {
        let (pie, scheduler) = self.pie_and_scheduler()?;
        pie.rotate_to_wedge(index, scheduler).map(drop)
    }

    /// Resizes wedge sweeps in place from updated values (same wedge count).
    pub fn update_live(&mut self, values: &[f64]) -> ChartResult<()> {
        let (pie, scheduler) = self.pie_and_scheduler()?;
        pie.resize(values, scheduler).map(drop)
    }

    /// Click dispatch with the default selection behavior: rotate the newly
    /// selected wedge to the reference angle, unless a custom handler is
    /// registered.
    pub fn click_wedge(&mut self, index: usize) -> ChartResult<Option<SelectionChange>> {
        let change = self.pie_mut()?.click_wedge(index)?;
        let Some(change) = change else {
            return Ok(None);
        };

        if let Some(handler) = self.selection_handler.as_mut() {
            handler(change);
        } else if let Some(next) = change.next {
            self.rotate_to_wedge(next)?;
        }
        Ok(Some(change))
    }

    /// Overrides the default rotate-on-select behavior.
    pub fn on_wedge_selection_changed(&mut self, handler: impl FnMut(SelectionChange) + 'static) {
        self.selection_handler = Some(Box::new(handler));
    }

    /// Receives the hover-out/hover-in events synthesized by
    /// [`pointer_move`](Self::pointer_move).
    pub fn on_wedge_hover_changed(&mut self, handler: impl FnMut(HoverEvent) + 'static) {
        self.hover_handler = Some(Box::new(handler));
    }

    /// Pass-through pointer movement over the pie overlay.
    ///
    /// Hit-tests the pointer against the wedge outlines and synthesizes
    /// hover boundary crossings, which also fire the registered hover
    /// handler. Inert unless `pie.use_pass_through` is set.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> ChartResult<SmallVec<[HoverEvent; 2]>> {
        if !self.config.pie.use_pass_through {
            return Ok(SmallVec::new());
        }

        let events = self.pie_mut()?.pointer_move(x, y);
        if let Some(handler) = self.hover_handler.as_mut() {
            for event in &events {
                handler(*event);
            }
        }
        Ok(events)
    }

    /// Highlights one bar column (or clears the highlight with `None`).
    ///
    /// The next [`draw`](Self::draw) strokes a border rect around the column,
    /// sized from its hover target and styled by `bars.highlight_border_width`
    /// and `bars.highlight_color`. Columns with no bars are ignored.
    pub fn highlight_column(&mut self, column: Option<usize>) {
        self.highlighted_column = column;
    }

    pub fn wedge_events_enable(&mut self, force: bool) -> ChartResult<()> {
        self.pie_mut()?.wedge_events_enable(force);
        Ok(())
    }

    pub fn wedge_events_disable(&mut self) -> ChartResult<()> {
        self.pie_mut()?.wedge_events_disable();
        Ok(())
    }

    fn pie_mut(&mut self) -> ChartResult<&mut PieGeometry> {
        self.pie.as_mut().ok_or_else(|| {
            ChartError::InvalidData("chart holds no pie series".to_owned())
        })
    }

    fn pie_and_scheduler(
        &mut self,
    ) -> ChartResult<(&mut PieGeometry, &mut dyn AnimationScheduler)> {
        match self.pie.as_mut() {
            Some(pie) => Ok((pie, self.scheduler.as_mut())),
            None => Err(ChartError::InvalidData(
                "chart holds no pie series".to_owned(),
            )),
        }
    }

    fn rebuild_pie(&mut self) -> ChartResult<()> {
        let wedge_values: Vec<f64> = self
            .graph
            .series
            .iter()
            .zip(&self.graph.sums)
            .filter(|(series, _)| series.options.kind == SeriesType::Pie)
            .map(|(_, sum)| *sum)
            .collect();

        if wedge_values.is_empty() {
            return Ok(());
        }

        let padding = self.graph.scale.padding();
        let width = f64::from(self.graph.area.width) - padding.left - padding.right;
        let height = f64::from(self.graph.area.height) - padding.top - padding.bottom;
        let (cx, cy) = self
            .config
            .pie
            .center
            .unwrap_or((padding.left + width / 2.0, padding.top + height / 2.0));
        let radius = self
            .config
            .pie
            .radius
            .unwrap_or_else(|| width.min(height) / 2.0);

        let mut pie = PieGeometry::new(cx, cy, radius, self.config.pie.inner_radius)?;
        pie.draw(&wedge_values, self.scheduler.as_mut())?;
        self.pie = Some(pie);
        Ok(())
    }

    fn series_color(&self, series_index: usize) -> ChartResult<Color> {
        let palette = &self.config.colors;
        if palette.is_empty() {
            return Err(ChartError::EmptyPalette);
        }
        Color::from_css_hex(&palette[series_index % palette.len()])
    }

    fn build_frame(&self) -> ChartResult<RenderFrame> {
        let mut frame = RenderFrame::new(self.graph.area);
        let scale = &self.graph.scale;
        let padding = scale.padding();
        let plot_right = f64::from(self.graph.area.width) - padding.right;

        if self.config.grid.show {
            self.push_grid(&mut frame, plot_right);
        }
        if self.config.axes.y1.show {
            self.push_y_labels(&mut frame);
        }
        if self.config.axes.x1.show && !self.config.axes.x1.labels.is_empty() {
            self.push_x_labels(&mut frame);
        }
        if let Some(banner) = self.config.error_message.as_deref() {
            frame.push_text(TextPrimitive::new(
                banner,
                padding.left,
                padding.top,
                AXIS_FONT_PX,
                LABEL_COLOR,
                TextHAlign::Left,
            ));
        }

        let mut highlight_target: Option<ColumnTarget> = None;
        for (series_index, series) in self.graph.series.iter().enumerate() {
            let color = self.series_color(series_index)?;
            match series.options.kind {
                SeriesType::Line | SeriesType::Step => {
                    let plan = plan_line_series(series, series_index, scale, &self.config.lines);
                    for polyline in plan.fills {
                        let mut fill_color = color;
                        fill_color.alpha = self.config.lines.fill_opacity;
                        frame.push_path(PathPrimitive::filled(polyline.commands, fill_color));
                    }
                    for polyline in plan.polylines {
                        frame.push_path(PathPrimitive::stroked(
                            polyline.commands,
                            self.config.lines.width,
                            color,
                        ));
                    }
                    for marker in plan.markers {
                        frame.push_circle(CirclePrimitive::new(
                            marker.x,
                            marker.y,
                            self.config.lines.point_radius,
                            self.config.lines.point_stroke_width,
                            color,
                        ));
                    }
                }
                SeriesType::Bar | SeriesType::StackedBar => {
                    let plan = plan_bar_series(series, series_index, scale);
                    for rect in plan.rects {
                        frame.push_rect(RectPrimitive::new(
                            rect.x, rect.y, rect.width, rect.height, color,
                        ));
                    }
                    if highlight_target.is_none()
                        && let Some(column) = self.highlighted_column
                    {
                        highlight_target = plan
                            .column_targets
                            .iter()
                            .find(|target| target.index == column)
                            .copied();
                    }
                }
                SeriesType::Pie => {}
            }
        }

        if let Some(target) = highlight_target {
            frame.push_path(self.column_highlight_path(&target)?);
        }

        if let Some(pie) = self.pie.as_ref() {
            for (index, wedge) in pie.wedges().iter().enumerate() {
                if !wedge.is_visible() {
                    continue;
                }
                let color = self.series_color(index)?;
                frame.push_path(PathPrimitive::filled(pie.wedge_commands(index)?, color));
            }
            if self.config.pie.draw_pie_hole {
                frame.push_circle(pie.pie_hole());
            }
        }

        frame.validate()?;
        Ok(frame)
    }

    fn column_highlight_path(&self, target: &ColumnTarget) -> ChartResult<PathPrimitive> {
        let scale = &self.graph.scale;
        let top = scale.drawable_top();
        let bottom = f64::from(self.graph.area.height) - scale.padding().bottom;
        let right = target.x + target.width;

        Ok(PathPrimitive::stroked(
            vec![
                PathCommand::MoveTo { x: target.x, y: top },
                PathCommand::LineTo { x: right, y: top },
                PathCommand::LineTo { x: right, y: bottom },
                PathCommand::LineTo {
                    x: target.x,
                    y: bottom,
                },
                PathCommand::Close,
            ],
            self.config.bars.highlight_border_width,
            Color::from_css_hex(&self.config.bars.highlight_color)?,
        ))
    }

    fn push_grid(&self, frame: &mut RenderFrame, plot_right: f64) {
        let scale = &self.graph.scale;
        let axis_series = self.axis_series_index();
        let num_labels = self.graph.y_labels.len();
        if num_labels < 2 {
            return;
        }

        let min = scale.min_vals[axis_series];
        let max = scale.max_vals[axis_series];
        for index in 0..num_labels {
            let ratio = index as f64 / (num_labels - 1) as f64;
            let value = ratio * (max - min) + min;
            if value == min && !self.config.grid.show_baseline {
                continue;
            }
            let y = scale.pixel_y(axis_series, value);
            frame.push_path(PathPrimitive::stroked(
                vec![
                    PathCommand::MoveTo {
                        x: scale.padding().left,
                        y,
                    },
                    PathCommand::LineTo { x: plot_right, y },
                ],
                GRID_STROKE_PX,
                GRID_COLOR,
            ));
        }
    }

    fn push_y_labels(&self, frame: &mut RenderFrame) {
        let scale = &self.graph.scale;
        let axis_series = self.axis_series_index();
        let num_labels = self.graph.y_labels.len();
        if num_labels == 0 {
            return;
        }

        let min = scale.min_vals[axis_series];
        let max = scale.max_vals[axis_series];
        let last = num_labels - 1;
        for (index, label) in self.graph.y_labels.iter().enumerate() {
            let ratio = if last == 0 { 0.0 } else { index as f64 / last as f64 };
            let value = ratio * (max - min) + min;
            let text = decorate_label(label, &self.config.axes.y1, index == last);
            frame.push_text(TextPrimitive::new(
                text,
                scale.padding().left - 5.0,
                scale.pixel_y(axis_series, value),
                AXIS_FONT_PX,
                LABEL_COLOR,
                TextHAlign::Right,
            ));
        }
    }

    fn push_x_labels(&self, frame: &mut RenderFrame) {
        let scale = &self.graph.scale;
        let labels = &self.config.axes.x1.labels;
        let baseline = f64::from(self.graph.area.height) - scale.padding().bottom + AXIS_FONT_PX;

        for (index, label) in labels.iter().enumerate().take(scale.num_points) {
            if index % scale.show_every_nth != 0 {
                continue;
            }
            frame.push_text(TextPrimitive::new(
                label.clone(),
                scale.pixel_x(index, scale.x_tick_width / 2.0),
                baseline,
                AXIS_FONT_PX,
                LABEL_COLOR,
                TextHAlign::Center,
            ));
        }
    }

    fn axis_series_index(&self) -> usize {
        let count = self.graph.scale.max_vals.len();
        self.config
            .axes
            .y1
            .series_index
            .min(count.saturating_sub(1))
    }
}

impl<R: Renderer> Drop for ChartHandle<R> {
    fn drop(&mut self) {
        if let Some(pie) = self.pie.as_mut() {
            pie.destroy();
        }
    }
}

fn decorate_label(label: &str, axis: &AxisConfig, is_top: bool) -> String {
    let unit = if is_top && !axis.top_unit.is_empty() {
        axis.top_unit.as_str()
    } else {
        axis.unit.as_str()
    };
    if unit.is_empty() {
        return label.to_owned();
    }
    if axis.prefix_unit {
        format!("{unit}{label}")
    } else {
        format!("{label}{unit}")
    }
}

impl<R: Renderer + std::fmt::Debug> std::fmt::Debug for ChartHandle<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartHandle")
            .field("renderer", &self.renderer)
            .field("series", &self.graph.series.len())
            .field("pie", &self.pie)
            .finish()
    }
}

// `Series` is kept in the public signature so hosts can hand back canonical
// data without round-tripping through `ChartInput`.
impl<R: Renderer> ChartHandle<R> {
    pub fn update_series(&mut self, series: Vec<Series>) -> ChartResult<()> {
        self.update(ChartInput::Series(series))
    }
}
