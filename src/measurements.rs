
/***
 * Measurements
 *
 *  A measurement cycle reads a configured number of voltage samples from the
 * sensor channel, paced by a wait between consecutive samples, converts each
 * one to a sensor resistance and averages them.
 *  Calibration and live reading run the same cycle with different cadences.
 */

use std::thread;
use std::time::Duration;

use tracing::trace;

use crate::error::{GasError, GasResult};
use crate::resistance::resistance;

/// Anything that can report the instantaneous voltage on a converter channel.
#[cfg_attr(test, mockall::automock)]
pub trait VoltageSource {
    fn read_voltage(&mut self, channel: u8) -> GasResult<f64>;
}

/// Pacing between samples. Split out so tests don't sleep.
#[cfg_attr(test, mockall::automock)]
pub trait Wait {
    fn wait(&mut self, duration: Duration);
}

/// Blocks the calling thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleep;

impl Wait for ThreadSleep {
    fn wait(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Number of samples per cycle and the time between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleCadence {
    pub count: usize,
    pub interval: Duration,
}

impl SampleCadence {
    /// Slow and long, run once in clean air.
    pub const CALIBRATION: SampleCadence = SampleCadence::new(50, Duration::from_millis(500));

    /// Used for every live reading.
    pub const READING: SampleCadence = SampleCadence::new(5, Duration::from_millis(50));

    pub const fn new(count: usize, interval: Duration) -> Self {
        Self { count, interval }
    }

    pub fn validate(&self) -> GasResult<()> {
        if self.count == 0 {
            return Err(GasError::invalid("sample_count", "at least one sample is required"));
        }
        if self.interval.is_zero() {
            return Err(GasError::invalid("interval", "must be longer than zero"));
        }
        Ok(())
    }
}

/// Electrical side of the resistance model shared by every cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Divider {
    pub load_resistance: f64,
    pub scale_max: f64,
}

/// Mean sensor resistance over one cycle.
///
/// Any failed sample ends the cycle; samples already taken are discarded.
pub fn average_resistance<S, W>(
    source: &mut S,
    wait: &mut W,
    channel: u8,
    cadence: SampleCadence,
    divider: Divider,
) -> GasResult<f64>
where
    S: VoltageSource + ?Sized,
    W: Wait + ?Sized,
{
    cadence.validate()?;

    // running mean, stays exact when every sample is the same
    let mut mean = 0.0;
    for i in 0..cadence.count {
        if i > 0 {
            wait.wait(cadence.interval);
        }
        let voltage = source.read_voltage(channel)?;
        let rs = resistance(voltage, divider.load_resistance, divider.scale_max)?;
        trace!(sample = i, voltage, rs, "sensor sample");
        mean += (rs - mean) / (i + 1) as f64;
    }

    Ok(mean)
}
