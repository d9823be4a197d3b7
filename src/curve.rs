#[cfg(test)]
mod tests;

use std::fmt;

use crate::error::{GasError, GasResult};

/// Line through the sensitivity chart of one gas, in log-log space.
///
/// `x0` is the logarithm of the ppm at the left point, `y0` the logarithm of
/// the Rs/Ro ratio at that point and `slope` the two-point slope.
// CF: https://tutorials-raspberrypi.com/configure-and-read-out-the-raspberry-pi-gas-sensor-mq-x/
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasCurve {
    pub x0: f64,
    pub y0: f64,
    pub slope: f64,
}

impl GasCurve {
    pub const fn new(x0: f64, y0: f64, slope: f64) -> Self {
        Self { x0, y0, slope }
    }
}

pub const CO_CURVE: GasCurve = GasCurve::new(2.30775, 0.71569, -0.33539);
pub const H2_CURVE: GasCurve = GasCurve::new(2.30776, 0.71895, -0.33539);
pub const CH4_CURVE: GasCurve = GasCurve::new(2.30987, 0.48693, -0.37459);
pub const LPG_CURVE: GasCurve = GasCurve::new(2.30481, 0.20588, -0.46621);
pub const PROPANE_CURVE: GasCurve = GasCurve::new(2.30366, 0.23203, -0.46202);
pub const ALCOHOL_CURVE: GasCurve = GasCurve::new(2.30704, 0.45752, -0.37398);
pub const SMOKE_CURVE: GasCurve = GasCurve::new(2.30724, 0.53268, -0.44082);

/// Gases the MQ-2 curves are known for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gas {
    Co = 0,
    H2 = 1,
    Ch4 = 2,
    Lpg = 3,
    Propane = 4,
    Alcohol = 5,
    Smoke = 6,
}

impl Gas {
    pub const COUNT: usize = 7;

    /// Every gas, in report order.
    pub const ALL: [Gas; Gas::COUNT] = [
        Gas::Co,
        Gas::H2,
        Gas::Ch4,
        Gas::Lpg,
        Gas::Propane,
        Gas::Alcohol,
        Gas::Smoke,
    ];

    pub const fn curve(self) -> GasCurve {
        match self {
            Gas::Co => CO_CURVE,
            Gas::H2 => H2_CURVE,
            Gas::Ch4 => CH4_CURVE,
            Gas::Lpg => LPG_CURVE,
            Gas::Propane => PROPANE_CURVE,
            Gas::Alcohol => ALCOHOL_CURVE,
            Gas::Smoke => SMOKE_CURVE,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Gas::Co => "CO",
            Gas::H2 => "H2",
            Gas::Ch4 => "CH4",
            Gas::Lpg => "LPG",
            Gas::Propane => "PROPANE",
            Gas::Alcohol => "ALCOHOL",
            Gas::Smoke => "SMOKE",
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Gas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Concentration in ppm for an Rs/Ro ratio on the given curve.
///
/// With a point and the slope known, the x (log of ppm) of the line follows
/// from y (log of ratio); raising 10 to it gives back plain ppm.
pub fn percentage_for_ratio(ratio: f64, curve: &GasCurve) -> GasResult<f64> {
    if !(ratio > 0.0) {
        return Err(GasError::NonPositiveRatio { ratio });
    }

    Ok(10f64.powf((ratio.ln() - curve.y0) / curve.slope + curve.x0))
}
