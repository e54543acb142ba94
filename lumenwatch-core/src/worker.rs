//! Deferred render worker
//!
//! Owns the panel and turns handed-off sensor samples into a full redraw.
//! Runs in a context that may block on the bus; nothing here is called from
//! the edge handler.

use embassy_sync::blocking_mutex::raw::RawMutex;
use lumenwatch_hal::I2cBus;

use crate::config::ResponseConfig;
use crate::sensor::{SensorReactor, SensorSample};
use crate::ssd1306::{DisplayError, Ssd1306};

/// One completed render attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rendered<E> {
    pub sample: SensorSample,
    pub result: Result<(), DisplayError<E>>,
}

/// Redraw the panel for `sample`
///
/// The panel is re-initialized on every call instead of patched in place;
/// the brief blank is accepted in exchange for never drawing over a stale
/// or half-written screen.
pub fn render_sample<B: I2cBus>(
    display: &mut Ssd1306<B>,
    responses: &ResponseConfig,
    sample: SensorSample,
) -> Result<(), DisplayError<B::Error>> {
    let response = responses.for_light(sample.light);

    display.initialize()?;
    display.set_cursor(0, 0)?;
    display.set_brightness(response.brightness)?;
    display.print_str(&response.message)
}

/// Waits for samples from a [`SensorReactor`] and renders them
pub struct RenderWorker<'a, M: RawMutex, B: I2cBus> {
    reactor: &'a SensorReactor<M>,
    display: Ssd1306<B>,
    responses: ResponseConfig,
    renders: u32,
}

impl<'a, M: RawMutex, B: I2cBus> RenderWorker<'a, M, B> {
    pub fn new(reactor: &'a SensorReactor<M>, display: Ssd1306<B>, responses: ResponseConfig) -> Self {
        Self {
            reactor,
            display,
            responses,
            renders: 0,
        }
    }

    /// Wait for the next sample and render it
    ///
    /// A transport error aborts this render only; the next sample is
    /// rendered from scratch.
    pub async fn run_once(&mut self) -> Rendered<B::Error> {
        let sample = self.reactor.wait().await;
        self.finish(sample)
    }

    /// Render a pending sample if there is one, without waiting
    pub fn try_run_once(&mut self) -> Option<Rendered<B::Error>> {
        let sample = self.reactor.try_take()?;
        Some(self.finish(sample))
    }

    /// Render attempts so far, failed ones included
    pub fn renders(&self) -> u32 {
        self.renders
    }

    pub fn display(&self) -> &Ssd1306<B> {
        &self.display
    }

    /// Hand the panel back, e.g. for the shutdown screen
    pub fn into_display(self) -> Ssd1306<B> {
        self.display
    }

    fn finish(&mut self, sample: SensorSample) -> Rendered<B::Error> {
        let result = render_sample(&mut self.display, &self.responses, sample);
        self.renders = self.renders.wrapping_add(1);
        self.reactor.complete();
        Rendered { sample, result }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{message, Response};
    use crate::sensor::{Light, Phase, DEFAULT_DEBOUNCE_MS};
    use crate::ssd1306::{font, DEFAULT_ADDRESS, RAM_SIZE};
    use crate::testing::{FailingBus, RecordingBus};
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use lumenwatch_hal::InputPin;
    use std::vec::Vec;

    struct Line(bool);

    impl InputPin for Line {
        fn is_high(&self) -> bool {
            self.0
        }
    }

    const DARK: Line = Line(true);
    const LIT: Line = Line(false);

    fn text_bytes(text: &str) -> Vec<u8> {
        let mut out = Vec::new();
        for c in text.chars().filter(|&c| c != '\n') {
            out.extend_from_slice(font::glyph(c).unwrap());
            out.push(0x00);
        }
        out
    }

    fn worker(reactor: &SensorReactor<NoopRawMutex>) -> RenderWorker<'_, NoopRawMutex, RecordingBus> {
        let display = Ssd1306::new(RecordingBus::new(), DEFAULT_ADDRESS);
        RenderWorker::new(reactor, display, ResponseConfig::default())
    }

    #[test]
    fn test_dark_renders_bright_notice() {
        let reactor = SensorReactor::<NoopRawMutex>::new(DEFAULT_DEBOUNCE_MS, true);
        let mut w = worker(&reactor);

        reactor.on_edge(1_000, &DARK);
        let rendered = embassy_futures::block_on(w.run_once());
        assert_eq!(rendered.sample.light, Light::Absent);
        assert_eq!(rendered.result, Ok(()));

        let display = w.into_display();
        assert_eq!(display.state().brightness, 149);

        let bus = display.release();
        assert_eq!(bus.contrast_values(), [0x80, 149]);
        let data = bus.data_bytes();
        assert_eq!(&data[RAM_SIZE..], text_bytes("No light detected.\n").as_slice());
    }

    #[test]
    fn test_light_renders_dim_notice() {
        let reactor = SensorReactor::<NoopRawMutex>::new(DEFAULT_DEBOUNCE_MS, true);
        let mut w = worker(&reactor);

        reactor.on_edge(1_000, &LIT);
        let rendered = w.try_run_once().unwrap();
        assert_eq!(rendered.sample.light, Light::Present);

        let display = w.into_display();
        assert_eq!(display.state().brightness, 3);

        let bus = display.release();
        assert_eq!(bus.contrast_values(), [0x80, 3]);
        let data = bus.data_bytes();
        assert_eq!(&data[RAM_SIZE..], text_bytes("Intruder detected.\n").as_slice());
    }

    #[test]
    fn test_render_starts_from_top_left() {
        let reactor = SensorReactor::<NoopRawMutex>::new(DEFAULT_DEBOUNCE_MS, true);
        let mut w = worker(&reactor);

        reactor.on_edge(0, &DARK);
        w.try_run_once().unwrap();
        // Message ends in a newline: cursor sits at the start of line 1
        assert_eq!(w.display().state().line, 1);
        assert_eq!(w.display().state().column, 0);
        assert_eq!(reactor.phase(), Phase::Idle);
    }

    #[test]
    fn test_bounce_renders_once() {
        let reactor = SensorReactor::<NoopRawMutex>::new(DEFAULT_DEBOUNCE_MS, true);
        let mut w = worker(&reactor);

        reactor.on_edge(2_000, &DARK);
        reactor.on_edge(2_100, &LIT);
        while w.try_run_once().is_some() {}

        assert_eq!(reactor.accepted_count(), 1);
        assert_eq!(w.renders(), 1);
    }

    #[test]
    fn test_separate_edges_render_twice() {
        let reactor = SensorReactor::<NoopRawMutex>::new(DEFAULT_DEBOUNCE_MS, true);
        let mut w = worker(&reactor);

        reactor.on_edge(2_000, &DARK);
        while w.try_run_once().is_some() {}
        reactor.on_edge(2_600, &LIT);
        while w.try_run_once().is_some() {}

        assert_eq!(reactor.accepted_count(), 2);
        assert_eq!(w.renders(), 2);
        assert_eq!(w.display().state().brightness, 3);
    }

    #[test]
    fn test_nothing_pending() {
        let reactor = SensorReactor::<NoopRawMutex>::new(DEFAULT_DEBOUNCE_MS, true);
        let mut w = worker(&reactor);
        assert!(w.try_run_once().is_none());
        assert_eq!(w.renders(), 0);
    }

    #[test]
    fn test_transport_failure_does_not_stop_later_renders() {
        let reactor = SensorReactor::<NoopRawMutex>::new(DEFAULT_DEBOUNCE_MS, true);
        let display = Ssd1306::new(FailingBus::once_after(5), DEFAULT_ADDRESS);
        let mut w = RenderWorker::new(&reactor, display, ResponseConfig::default());

        reactor.on_edge(0, &DARK);
        let first = w.try_run_once().unwrap();
        assert_eq!(first.result, Err(DisplayError::Transport(())));
        assert_eq!(reactor.phase(), Phase::Idle);

        reactor.on_edge(1_000, &LIT);
        let second = w.try_run_once().unwrap();
        assert_eq!(second.result, Ok(()));
        assert_eq!(w.display().state().brightness, 3);
    }

    #[test]
    fn test_custom_responses() {
        let reactor = SensorReactor::<NoopRawMutex>::new(DEFAULT_DEBOUNCE_MS, true);
        let responses = ResponseConfig {
            dark: Response {
                message: message("DARK"),
                brightness: 0xFF,
            },
            light: Response {
                message: message("LIGHT"),
                brightness: 0x01,
            },
        };
        let display = Ssd1306::new(RecordingBus::new(), DEFAULT_ADDRESS);
        let mut w = RenderWorker::new(&reactor, display, responses);

        reactor.on_edge(0, &DARK);
        w.try_run_once().unwrap();

        let bus = w.into_display().release();
        assert_eq!(bus.contrast_values(), [0x80, 0xFF]);
        assert_eq!(&bus.data_bytes()[RAM_SIZE..], text_bytes("DARK").as_slice());
    }
}
