//! Sensor edge task
//!
//! The fast context. Waits for the comparator edge, samples the line and
//! hands the sample to the render task. Never touches the I2C bus.

use defmt::*;
use embassy_time::Instant;

use lumenwatch_core::EdgeOutcome;

use crate::board::SensorLine;
use crate::Reactor;

#[embassy_executor::task]
pub async fn sensor_task(mut line: SensorLine, reactor: &'static Reactor) {
    info!(
        "Sensor task started (debounce {} ms)",
        reactor.debounce_ms()
    );

    loop {
        line.wait_for_edge().await;

        match reactor.on_edge(Instant::now().as_millis(), &line) {
            EdgeOutcome::Accepted(sample) => {
                debug!("Edge accepted: {} at {} ms", sample.light, sample.at_ms);
            }
            EdgeOutcome::Debounced { elapsed_ms } => {
                trace!("Edge debounced after {} ms", elapsed_ms);
            }
        }
    }
}
