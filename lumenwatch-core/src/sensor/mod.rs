//! Light sensor reactor
//!
//! Splits sensor handling into the two contexts the hardware allows:
//!
//! - [`SensorReactor::on_edge`] runs on every rising edge of the sensor line.
//!   It debounces, samples the line and hands the sample off. It is short,
//!   never blocks and never touches the display bus.
//! - [`SensorReactor::wait`] is awaited by the render worker, which may block
//!   on the bus for as long as a full redraw takes.
//!
//! The hand-off is a single-slot [`Signal`]: if edges arrive faster than the
//! worker renders, only the latest sample is rendered. All shared state sits
//! behind a blocking mutex, so the reactor can live in a `static` and be
//! shared by reference between the two contexts.

pub mod phase;

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use lumenwatch_hal::{InputPin, Level};

use crate::config::SensorConfig;

pub use phase::{Phase, PhaseEvent};

/// Default debounce window in milliseconds
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// What the light sensor reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Light {
    /// Room is dark
    Absent,
    /// Light reached the sensor (someone is there)
    Present,
}

/// One accepted sensor reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorSample {
    pub light: Light,
    /// Monotonic timestamp of the accepted edge
    pub at_ms: u64,
}

/// Result of feeding an edge to the reactor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeOutcome {
    /// Edge sampled and handed to the render worker
    Accepted(SensorSample),
    /// Edge arrived inside the debounce window and was dropped
    Debounced { elapsed_ms: u64 },
}

#[derive(Debug, Clone, Copy)]
struct ReactorState {
    last_accepted_ms: Option<u64>,
    latest: Option<SensorSample>,
    phase: Phase,
    accepted: u32,
}

impl ReactorState {
    const fn new() -> Self {
        Self {
            last_accepted_ms: None,
            latest: None,
            phase: Phase::Idle,
            accepted: 0,
        }
    }
}

/// Debounces sensor edges and hands samples to the render worker
pub struct SensorReactor<M: RawMutex> {
    debounce_ms: u64,
    dark_when_high: bool,
    state: Mutex<M, Cell<ReactorState>>,
    handoff: Signal<M, SensorSample>,
}

impl<M: RawMutex> SensorReactor<M> {
    /// Create a reactor
    ///
    /// `dark_when_high` selects the comparator polarity: with the usual LDR
    /// divider the line reads high when no light reaches the sensor.
    pub const fn new(debounce_ms: u64, dark_when_high: bool) -> Self {
        Self {
            debounce_ms,
            dark_when_high,
            state: Mutex::new(Cell::new(ReactorState::new())),
            handoff: Signal::new(),
        }
    }

    pub fn from_config(config: &SensorConfig) -> Self {
        Self::new(config.debounce_ms, config.dark_when_high)
    }

    /// Edge handler
    ///
    /// Call on every rising edge of the sensor line with the current
    /// monotonic time. The first edge is always accepted.
    pub fn on_edge<P: InputPin>(&self, now_ms: u64, pin: &P) -> EdgeOutcome {
        let outcome = self.state.lock(|cell| {
            let mut state = cell.get();

            if let Some(last) = state.last_accepted_ms {
                let elapsed_ms = now_ms.saturating_sub(last);
                if elapsed_ms < self.debounce_ms {
                    return EdgeOutcome::Debounced { elapsed_ms };
                }
            }

            let sample = SensorSample {
                light: self.classify(pin.level()),
                at_ms: now_ms,
            };
            state.last_accepted_ms = Some(now_ms);
            state.latest = Some(sample);
            state.phase = state.phase.transition(PhaseEvent::EdgeAccepted);
            state.accepted = state.accepted.wrapping_add(1);
            cell.set(state);

            EdgeOutcome::Accepted(sample)
        });

        if let EdgeOutcome::Accepted(sample) = outcome {
            self.handoff.signal(sample);
        }

        outcome
    }

    /// Wait for the next sample to render
    pub async fn wait(&self) -> SensorSample {
        let sample = self.handoff.wait().await;
        self.advance(PhaseEvent::HandedOff);
        sample
    }

    /// Take a pending sample without waiting
    pub fn try_take(&self) -> Option<SensorSample> {
        let sample = self.handoff.try_take()?;
        self.advance(PhaseEvent::HandedOff);
        Some(sample)
    }

    /// Mark the render of the last taken sample finished
    pub fn complete(&self) {
        let pending = self.handoff.signaled();
        self.advance(PhaseEvent::RenderComplete { pending });
    }

    /// True if a sample is waiting for the render worker
    pub fn is_pending(&self) -> bool {
        self.handoff.signaled()
    }

    pub fn phase(&self) -> Phase {
        self.state.lock(|cell| cell.get().phase)
    }

    /// Most recently accepted sample
    pub fn latest(&self) -> Option<SensorSample> {
        self.state.lock(|cell| cell.get().latest)
    }

    /// Number of edges accepted since start
    pub fn accepted_count(&self) -> u32 {
        self.state.lock(|cell| cell.get().accepted)
    }

    pub fn debounce_ms(&self) -> u64 {
        self.debounce_ms
    }

    fn classify(&self, level: Level) -> Light {
        match (level, self.dark_when_high) {
            (Level::High, true) | (Level::Low, false) => Light::Absent,
            (Level::Low, true) | (Level::High, false) => Light::Present,
        }
    }

    fn advance(&self, event: PhaseEvent) {
        self.state.lock(|cell| {
            let mut state = cell.get();
            state.phase = state.phase.transition(event);
            cell.set(state);
        });
    }
}
