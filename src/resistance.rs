
use crate::error::{GasError, GasResult};

/// Largest raw code of the converter the resistance model was fitted against.
pub const DEFAULT_SCALE_MAX: f64 = 1023.0;

/// Load resistance on the MQ-2 breakout board, in kilo ohms.
pub const DEFAULT_LOAD_RESISTANCE: f64 = 5.0;

/// Sensor resistance (Rs) from one converter reading.
///
/// The sensor and the load resistor form a voltage divider, so knowing the
/// voltage across the load resistor and its value gives the sensor side.
/// Readings above `scale_max` produce a negative Rs; that is a wiring or
/// sensor fault and is left to the caller.
pub fn resistance(voltage: f64, load_resistance: f64, scale_max: f64) -> GasResult<f64> {
    // also rejects NaN
    if !(voltage > 0.0) {
        return Err(GasError::NonPositiveVoltage { voltage });
    }

    Ok(load_resistance * (scale_max - voltage) / voltage)
}
