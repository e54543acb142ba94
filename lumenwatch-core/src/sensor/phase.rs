//! Reactor phase machine
//!
//! Tracks where the latest accepted edge is in its journey from the edge
//! handler to the panel.

/// Reactor phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Nothing pending, panel shows the last rendered state
    Idle,
    /// A sample was accepted and is waiting for the render worker
    Sampling,
    /// The render worker took the sample and is driving the bus
    Rendering,
}

/// Events that move the reactor between phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PhaseEvent {
    /// Edge passed the debounce window and was sampled
    EdgeAccepted,
    /// Render worker took the pending sample
    HandedOff,
    /// Render worker finished, `pending` if another sample is already waiting
    RenderComplete { pending: bool },
}

impl Phase {
    /// Check if the render worker currently owns the bus
    pub fn is_rendering(&self) -> bool {
        matches!(self, Phase::Rendering)
    }

    /// Process an event and return the next phase
    pub fn transition(self, event: PhaseEvent) -> Self {
        use Phase::*;
        use PhaseEvent::*;

        match (self, event) {
            (Idle, EdgeAccepted) => Sampling,
            // Newer sample replaces the one still waiting
            (Sampling, EdgeAccepted) => Sampling,
            (Sampling, HandedOff) => Rendering,
            // Queued behind the render in progress
            (Rendering, EdgeAccepted) => Rendering,
            (Rendering, RenderComplete { pending: true }) => Sampling,
            (Rendering, RenderComplete { pending: false }) => Idle,

            // A hand-off can race ahead of the edge bookkeeping; the worker
            // is rendering either way
            (Idle, HandedOff) | (Rendering, HandedOff) => Rendering,

            (state, _) => state,
        }
    }
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Idle
    }
}
