#[cfg(test)]
mod tests;

use std::future::Future;
use std::io::Write;

use anyhow::Context;
use tokio::sync::mpsc::Receiver;
use tracing::{debug, error, info};

use crate::error::GasError;
use crate::report;
use crate::worker::DetectorEvent;

/// Prints detector events to `out` until `shutdown` resolves or the worker
/// reports an error.
///
/// Shutdown is the clean exit and ends with the farewell line.
pub async fn display_context<F, O>(
    mut events: Receiver<Result<DetectorEvent, GasError>>,
    shutdown: F,
    out: &mut O,
    timestamps: bool,
) -> anyhow::Result<()>
where
    F: Future<Output = ()>,
    O: Write,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                writeln!(out)?;
                writeln!(out, "Aborted by user!")?;
                out.flush()?;
                return Ok(());
            }
            event = events.recv() => match event {
                Some(Ok(DetectorEvent::Ready { ro, calibrated })) => {
                    info!(ro, calibrated, "detector ready");
                    if calibrated {
                        writeln!(out, "Done ...")?;
                        writeln!(out)?;
                    }
                }
                Some(Ok(DetectorEvent::Reading(reading))) => {
                    debug!(rs = reading.resistance(), ratio = reading.ratio(), "reading");
                    write!(out, "{}", report::render(&reading, timestamps))?;
                    out.flush()?;
                }
                Some(Err(err)) => {
                    error!(kind = ?err.kind(), "{err}");
                    return Err(err).context("gas detection stopped");
                }
                None => anyhow::bail!("sampling thread exited without reporting"),
            }
        }
    }
}
