//! Pie geometry engine: wedge set, rotation, selection, and the
//! animation-coupled state machine.
//!
//! State machine: `Initializing → AnimatingIn → Idle ⇄ Rotating ⇄ Resizing`,
//! with terminal `Destroyed`. Transition work that must wait for the visual
//! tween (outline regeneration, wedge event re-enabling) runs when the
//! transition's [`AnimationHandle`] settles.

use ordered_float::OrderedFloat;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::error::{ChartError, ChartResult};
use crate::pie::gate::WedgeEventGate;
use crate::pie::wedge::{Wedge, point_in_polygon, wedge_angles, wedge_outline, wedge_path};
use crate::render::{
    AnimationHandle, AnimationScheduler, AnimationSpec, CirclePrimitive, Color, PathCommand,
};

const TRANSITION_MS: f64 = 650.0;

/// Lifecycle states of one pie geometry instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieState {
    Initializing,
    AnimatingIn,
    Idle,
    Rotating,
    Resizing,
    Destroyed,
}

/// Selection-changed notification: previous and next selected wedge index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionChange {
    pub previous: Option<usize>,
    pub next: Option<usize>,
}

/// Hover boundary-crossing notification, synthesized exactly once per
/// crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverEvent {
    HoverOut { wedge: usize },
    HoverIn { wedge: usize },
}

/// Geometry and interaction state for one pie series.
pub struct PieGeometry {
    cx: f64,
    cy: f64,
    radius: f64,
    inner_radius: f64,
    rotation_deg: f64,
    wedges: Vec<Wedge>,
    /// Post-rotation hit-test polygons, one per wedge. Hit testing must run
    /// against transformed geometry, so these are rebuilt whenever rotation
    /// or sweeps change.
    outlines: Vec<Vec<(f64, f64)>>,
    state: PieState,
    gate: WedgeEventGate,
    selected: Option<usize>,
    hovered: Option<usize>,
    in_flight: Option<AnimationHandle>,
}

impl PieGeometry {
    /// Fails fast on invalid radii; those are caller bugs, never clamped.
    pub fn new(cx: f64, cy: f64, radius: f64, inner_radius: f64) -> ChartResult<Self> {
        if !cx.is_finite() || !cy.is_finite() {
            return Err(ChartError::InvalidGeometry(
                "pie center must be finite".to_owned(),
            ));
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ChartError::InvalidGeometry(format!(
                "pie radius must be finite and > 0, got {radius}"
            )));
        }
        if !inner_radius.is_finite() || inner_radius < 0.0 || inner_radius >= radius {
            return Err(ChartError::InvalidGeometry(format!(
                "pie inner radius must be in [0, radius), got {inner_radius}"
            )));
        }

        Ok(Self {
            cx,
            cy,
            radius,
            inner_radius,
            rotation_deg: 0.0,
            wedges: Vec::new(),
            outlines: Vec::new(),
            state: PieState::Initializing,
            gate: WedgeEventGate::new(),
            selected: None,
            hovered: None,
            in_flight: None,
        })
    }

    /// Rebuilds the wedge set from raw values and animates the pie in.
    ///
    /// Wedge sweeps always sum to 360 degrees for a positive total; a
    /// non-positive total degenerates to all zero-sweep wedges and renders
    /// nothing hit-testable.
    pub fn draw(
        &mut self,
        values: &[f64],
        scheduler: &mut dyn AnimationScheduler,
    ) -> ChartResult<AnimationHandle> {
        self.ensure_alive()?;
        self.wedges = wedge_angles(values);
        self.selected = None;
        self.hovered = None;
        debug!(wedges = self.wedges.len(), "pie draw");
        self.begin_transition(PieState::AnimatingIn, scheduler)
    }

    /// Applies a shared rotation to every wedge's transform.
    pub fn rotate(
        &mut self,
        target_deg: f64,
        scheduler: &mut dyn AnimationScheduler,
    ) -> ChartResult<AnimationHandle> {
        self.ensure_alive()?;
        if !target_deg.is_finite() {
            return Err(ChartError::InvalidGeometry(format!(
                "rotation angle must be finite, got {target_deg}"
            )));
        }

        self.rotation_deg = target_deg.rem_euclid(360.0);
        trace!(rotation = self.rotation_deg, "pie rotate");
        self.begin_transition(PieState::Rotating, scheduler)
    }

    /// Rotates so the wedge's midpoint sits at the top reference angle.
    pub fn rotate_to_wedge(
        &mut self,
        index: usize,
        scheduler: &mut dyn AnimationScheduler,
    ) -> ChartResult<AnimationHandle> {
        let mid_angle = self.wedge(index)?.mid_angle_deg();
        let target = (360.0 - mid_angle).rem_euclid(360.0);
        self.rotate(target, scheduler)
    }

    /// Recomputes wedge sweeps from updated values, preserving wedge
    /// identity and order. The wedge count must match; radius is unchanged.
    pub fn resize(
        &mut self,
        new_values: &[f64],
        scheduler: &mut dyn AnimationScheduler,
    ) -> ChartResult<AnimationHandle> {
        self.ensure_alive()?;
        if new_values.len() != self.wedges.len() {
            return Err(ChartError::InvalidData(format!(
                "resize expects {} values, got {}",
                self.wedges.len(),
                new_values.len()
            )));
        }

        let resized = wedge_angles(new_values);
        for (wedge, fresh) in self.wedges.iter_mut().zip(resized) {
            wedge.value = fresh.value;
            wedge.start_angle_deg = fresh.start_angle_deg;
            wedge.sweep_deg = fresh.sweep_deg;
        }
        self.begin_transition(PieState::Resizing, scheduler)
    }

    /// Settles the in-flight transition from the backend's completion
    /// callback. Deferred work (outline regeneration, event re-enabling)
    /// runs only here, after the visual tween.
    pub fn transition_settled(&mut self) {
        if self.in_flight.take().is_none() {
            return;
        }
        self.rebuild_outlines();
        self.gate.enable();
        if self.state != PieState::Destroyed {
            self.state = PieState::Idle;
        }
    }

    /// Click dispatch: updates selection and reports the change.
    ///
    /// Returns `None` when wedge events are suspended or the wedge is
    /// zero-sweep (hidden). The default follow-up — rotating the selected
    /// wedge to the reference angle — is the caller's to apply unless a
    /// custom handler overrides it.
    pub fn click_wedge(&mut self, index: usize) -> ChartResult<Option<SelectionChange>> {
        let wedge = *self.wedge(index)?;
        if !self.gate.is_enabled() || !wedge.is_visible() {
            return Ok(None);
        }

        let previous = self.selected.replace(index);
        Ok(Some(SelectionChange {
            previous,
            next: Some(index),
        }))
    }

    /// Pass-through hit test: which wedge's transformed outline contains the
    /// pointer. Zero-sweep wedges never match.
    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> Option<usize> {
        self.wedges
            .iter()
            .enumerate()
            .filter(|(_, wedge)| wedge.is_visible())
            .find(|(index, _)| {
                self.outlines
                    .get(*index)
                    .is_some_and(|outline| point_in_polygon(x, y, outline))
            })
            .map(|(index, _)| index)
    }

    /// Pointer movement over the pass-through overlay.
    ///
    /// Transitioning between wedges synthesizes hover-out then hover-in
    /// exactly once per boundary crossing. Suspended events produce nothing.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> SmallVec<[HoverEvent; 2]> {
        let mut events = SmallVec::new();
        if !self.gate.is_enabled() {
            return events;
        }

        let next = self.hit_test(x, y);
        if next == self.hovered {
            return events;
        }

        if let Some(previous) = self.hovered {
            events.push(HoverEvent::HoverOut { wedge: previous });
        }
        if let Some(entered) = next {
            events.push(HoverEvent::HoverIn { wedge: entered });
        }
        self.hovered = next;
        events
    }

    /// Nearest visible wedge to an angle, for keyboard/step navigation.
    #[must_use]
    pub fn nearest_wedge(&self, angle_deg: f64) -> Option<usize> {
        let pointer = angle_deg.rem_euclid(360.0);
        self.wedges
            .iter()
            .enumerate()
            .filter(|(_, wedge)| wedge.is_visible())
            .min_by_key(|(_, wedge)| {
                let mid = (wedge.mid_angle_deg() + self.rotation_deg).rem_euclid(360.0);
                let distance = (mid - pointer).abs();
                OrderedFloat(distance.min(360.0 - distance))
            })
            .map(|(index, _)| index)
    }

    /// Vector path of one wedge at the current rotation.
    pub fn wedge_commands(&self, index: usize) -> ChartResult<Vec<PathCommand>> {
        let wedge = self.wedge(index)?;
        wedge_path(
            self.cx,
            self.cy,
            self.radius,
            wedge.start_angle_deg + self.rotation_deg,
            wedge.start_angle_deg + wedge.sweep_deg + self.rotation_deg,
        )
    }

    /// Index of a wedge found by identity within the managed set.
    pub fn wedge_index(&self, wedge: &Wedge) -> ChartResult<usize> {
        self.wedges
            .iter()
            .position(|candidate| std::ptr::eq(candidate, wedge))
            .ok_or_else(|| {
                ChartError::InvalidData("wedge reference is not part of this pie".to_owned())
            })
    }

    /// Donut-hole circle geometry.
    #[must_use]
    pub fn pie_hole(&self) -> CirclePrimitive {
        CirclePrimitive::new(
            self.cx,
            self.cy,
            self.inner_radius,
            0.0,
            Color::rgba(0.0, 0.0, 0.0, 0.0),
        )
    }

    /// Transparent overlay circle that forwards pointer events to wedges.
    #[must_use]
    pub fn hit_shield(&self) -> CirclePrimitive {
        CirclePrimitive::new(
            self.cx,
            self.cy,
            self.radius,
            0.0,
            Color::rgba(0.0, 0.0, 0.0, 0.0),
        )
    }

    pub fn wedge_events_disable(&mut self) {
        self.gate.disable();
    }

    pub fn wedge_events_enable(&mut self, force: bool) {
        if force {
            self.gate.enable_force();
        } else {
            self.gate.enable();
        }
    }

    #[must_use]
    pub fn wedge_events_enabled(&self) -> bool {
        self.gate.is_enabled()
    }

    #[must_use]
    pub fn wedges(&self) -> &[Wedge] {
        &self.wedges
    }

    #[must_use]
    pub fn selected_wedge(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn state(&self) -> PieState {
        self.state
    }

    #[must_use]
    pub fn rotation_deg(&self) -> f64 {
        self.rotation_deg
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Tears the pie down; every later operation fails fast.
    pub fn destroy(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.interrupt();
        }
        self.wedges.clear();
        self.outlines.clear();
        self.selected = None;
        self.hovered = None;
        self.state = PieState::Destroyed;
    }

    fn wedge(&self, index: usize) -> ChartResult<&Wedge> {
        self.wedges.get(index).ok_or(ChartError::WedgeNotFound {
            index,
            count: self.wedges.len(),
        })
    }

    fn ensure_alive(&self) -> ChartResult<()> {
        if self.state == PieState::Destroyed {
            return Err(ChartError::InvalidGeometry(
                "pie geometry has been destroyed".to_owned(),
            ));
        }
        Ok(())
    }

    /// Cancel-and-restart: a new transition on the same geometry fully
    /// supersedes any in-flight one; old and new targets never interleave.
    fn begin_transition(
        &mut self,
        next: PieState,
        scheduler: &mut dyn AnimationScheduler,
    ) -> ChartResult<AnimationHandle> {
        if let Some(previous) = self.in_flight.take() {
            previous.interrupt();
            // Rebalance the suspension the superseded transition held.
            self.gate.enable();
        }

        self.gate.disable();
        self.state = next;
        let handle = scheduler.animate(AnimationSpec {
            duration_ms: TRANSITION_MS,
        });
        self.in_flight = Some(handle.clone());

        if handle.is_settled() {
            self.transition_settled();
        }
        Ok(handle)
    }

    fn rebuild_outlines(&mut self) {
        self.outlines = self
            .wedges
            .iter()
            .map(|wedge| {
                if !wedge.is_visible() {
                    return Vec::new();
                }
                wedge_outline(
                    self.cx,
                    self.cy,
                    self.radius,
                    wedge.start_angle_deg,
                    wedge.start_angle_deg + wedge.sweep_deg,
                    self.rotation_deg,
                )
                .unwrap_or_default()
            })
            .collect();
    }
}

impl std::fmt::Debug for PieGeometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PieGeometry")
            .field("radius", &self.radius)
            .field("inner_radius", &self.inner_radius)
            .field("rotation_deg", &self.rotation_deg)
            .field("wedges", &self.wedges.len())
            .field("state", &self.state)
            .field("selected", &self.selected)
            .finish()
    }
}
