
use std::time::Duration;

use tokio::sync::mpsc::Sender;
use tracing::{debug, warn};

use crate::detector::{ConcentrationReading, DetectorConfig, GasDetector};
use crate::error::GasError;
use crate::measurements::{VoltageSource, Wait};

/// Time between two reading cycles of the console loop.
pub const DEFAULT_PAUSE: Duration = Duration::from_millis(250);

#[derive(Debug)]
pub enum DetectorEvent {
    /// Ro is known; sent once before any reading.
    Ready { ro: f64, calibrated: bool },
    Reading(ConcentrationReading),
}

/// Builds the detector and keeps reading until the receiver goes away or
/// something fails. The first error is forwarded and ends the loop.
///
/// Blocking; meant to own a dedicated thread.
pub fn sampling_context<S, W>(
    source: S,
    mut wait: W,
    config: DetectorConfig,
    ro: Option<f64>,
    pause: Duration,
    events: Sender<Result<DetectorEvent, GasError>>,
) where
    S: VoltageSource,
    W: Wait + Clone,
{
    let mut detector = match GasDetector::new(source, wait.clone(), config, ro) {
        Ok(detector) => detector,
        Err(err) => {
            let _ = events.blocking_send(Err(err));
            return;
        }
    };

    debug!(config = ?detector.config(), "detector built");
    let ready = DetectorEvent::Ready {
        ro: detector.ro(),
        calibrated: ro.is_none(),
    };
    if events.blocking_send(Ok(ready)).is_err() {
        return;
    }

    loop {
        let event = detector.read_concentrations().map(DetectorEvent::Reading);
        let failed = event.is_err();
        if let Err(err) = &event {
            warn!("reading cycle failed: {err}");
        }
        if events.blocking_send(event).is_err() {
            debug!("receiver closed, stopping sampling");
            return;
        }
        if failed {
            return;
        }

        wait.wait(pause);
    }
}
