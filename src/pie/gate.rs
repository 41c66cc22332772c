//! Counter-based wedge event gating.
//!
//! Animations disable input during their own transition and may themselves
//! run inside a caller-initiated disable, so the gate is a nesting-depth
//! counter, not a boolean: every `disable` must be matched by an `enable`
//! before events resume. `enable_force` resets unconditionally.

/// Nested enable/disable counter for wedge pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WedgeEventGate {
    depth: u32,
}

impl WedgeEventGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_enabled(self) -> bool {
        self.depth == 0
    }

    #[must_use]
    pub fn depth(self) -> u32 {
        self.depth
    }

    pub fn disable(&mut self) {
        self.depth += 1;
    }

    /// Releases one level of suspension. Unbalanced calls saturate at zero.
    pub fn enable(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Re-enables immediately regardless of nesting depth.
    pub fn enable_force(&mut self) {
        self.depth = 0;
    }

    /// Scoped suspension: the returned guard releases its level on drop.
    pub fn pause(&mut self) -> PausedWedgeEvents<'_> {
        self.disable();
        PausedWedgeEvents { gate: self }
    }
}

/// Guard holding one suspension level on a [`WedgeEventGate`].
#[derive(Debug)]
pub struct PausedWedgeEvents<'a> {
    gate: &'a mut WedgeEventGate,
}

impl Drop for PausedWedgeEvents<'_> {
    fn drop(&mut self) {
        self.gate.enable();
    }
}
