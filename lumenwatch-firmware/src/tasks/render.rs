//! Render task
//!
//! The deferred context and sole owner of the panel. Blocking bus writes
//! happen here only.

use defmt::*;

use lumenwatch_core::config::ResponseConfig;
use lumenwatch_core::RenderWorker;

use crate::{Display, Reactor};

#[embassy_executor::task]
pub async fn render_task(reactor: &'static Reactor, display: Display, responses: ResponseConfig) {
    info!("Render task started");

    let mut worker = RenderWorker::new(reactor, display, responses);

    loop {
        let rendered = worker.run_once().await;
        match rendered.result {
            Ok(()) => debug!(
                "Rendered {} (render #{})",
                rendered.sample.light,
                worker.renders()
            ),
            Err(e) => warn!("Render for {} failed: {}", rendered.sample.light, e),
        }
    }
}
