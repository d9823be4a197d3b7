
use chrono::{DateTime, Local};
use tracing::{debug, info};

use crate::curve::{percentage_for_ratio, Gas};
use crate::error::{GasError, GasResult};
use crate::measurements::{average_resistance, Divider, SampleCadence, VoltageSource, Wait};
use crate::resistance::{DEFAULT_LOAD_RESISTANCE, DEFAULT_SCALE_MAX};

/// Rs/Ro in clean air, read off the MQ-2 datasheet chart.
pub const DEFAULT_CLEAN_AIR_FACTOR: f64 = 9.6;

/// Everything the detector needs besides its collaborators. Immutable once
/// handed to a detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorConfig {
    pub channel: u8,
    pub load_resistance: f64,
    pub scale_max: f64,
    pub clean_air_factor: f64,
    pub calibration: SampleCadence,
    pub reading: SampleCadence,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            channel: 0,
            load_resistance: DEFAULT_LOAD_RESISTANCE,
            scale_max: DEFAULT_SCALE_MAX,
            clean_air_factor: DEFAULT_CLEAN_AIR_FACTOR,
            calibration: SampleCadence::CALIBRATION,
            reading: SampleCadence::READING,
        }
    }
}

impl DetectorConfig {
    pub fn validate(&self) -> GasResult<()> {
        if !(self.load_resistance > 0.0) {
            return Err(GasError::invalid("load_resistance", "must be positive"));
        }
        if !(self.scale_max > 0.0) {
            return Err(GasError::invalid("scale_max", "must be positive"));
        }
        if !(self.clean_air_factor > 0.0) {
            return Err(GasError::invalid("clean_air_factor", "must be positive"));
        }
        self.calibration.validate()?;
        self.reading.validate()
    }

    fn divider(&self) -> Divider {
        Divider {
            load_resistance: self.load_resistance,
            scale_max: self.scale_max,
        }
    }
}

/// Baseline resistance (Ro) of the sensor.
///
/// Assumes the sensor currently sits in clean air; there is no way to tell
/// from the readings alone whether that holds.
pub fn calibrate<S, W>(source: &mut S, wait: &mut W, config: &DetectorConfig) -> GasResult<f64>
where
    S: VoltageSource + ?Sized,
    W: Wait + ?Sized,
{
    config.validate()?;

    let rs = average_resistance(
        source,
        wait,
        config.channel,
        config.calibration,
        config.divider(),
    )?;
    Ok(rs / config.clean_air_factor)
}

/// One full set of estimates, all taken from the same averaged resistance.
#[derive(Debug, Clone)]
pub struct ConcentrationReading {
    ppm: [f64; Gas::COUNT],
    resistance: f64,
    ratio: f64,
    taken_at: DateTime<Local>,
}

impl ConcentrationReading {
    pub fn ppm(&self, gas: Gas) -> f64 {
        self.ppm[gas.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Gas, f64)> + '_ {
        Gas::ALL.into_iter().map(move |gas| (gas, self.ppm(gas)))
    }

    /// Averaged Rs of the cycle.
    pub fn resistance(&self) -> f64 {
        self.resistance
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn taken_at(&self) -> DateTime<Local> {
        self.taken_at
    }
}

/// MQ-2 gas detector bound to one converter channel.
///
/// Ro is fixed for the lifetime of the detector, either supplied up front or
/// calibrated during construction.
pub struct GasDetector<S, W> {
    source: S,
    wait: W,
    config: DetectorConfig,
    ro: f64,
}

impl<S: VoltageSource, W: Wait> GasDetector<S, W> {
    /// Builds a detector, calibrating when `ro` is `None`.
    ///
    /// Calibration blocks for the whole calibration cadence, about 25 seconds
    /// with the defaults.
    pub fn new(
        mut source: S,
        mut wait: W,
        config: DetectorConfig,
        ro: Option<f64>,
    ) -> GasResult<Self> {
        config.validate()?;

        let ro = match ro {
            Some(ro) if ro.is_finite() && ro > 0.0 => ro,
            Some(_) => return Err(GasError::invalid("ro", "must be a positive finite resistance")),
            None => {
                info!(
                    samples = config.calibration.count,
                    interval_ms = config.calibration.interval.as_millis() as u64,
                    "calibrating in clean air"
                );
                let ro = calibrate(&mut source, &mut wait, &config)?;
                info!(ro, "calibration done");
                ro
            }
        };

        Ok(Self {
            source,
            wait,
            config,
            ro,
        })
    }

    pub fn ro(&self) -> f64 {
        self.ro
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Runs one reading cycle and evaluates every gas curve on its ratio.
    pub fn read_concentrations(&mut self) -> GasResult<ConcentrationReading> {
        let rs = average_resistance(
            &mut self.source,
            &mut self.wait,
            self.config.channel,
            self.config.reading,
            self.config.divider(),
        )?;
        let ratio = rs / self.ro;

        let mut ppm = [0.0; Gas::COUNT];
        for gas in Gas::ALL {
            ppm[gas.index()] = percentage_for_ratio(ratio, &gas.curve())?;
        }
        debug!(rs, ratio, "reading cycle done");

        Ok(ConcentrationReading {
            ppm,
            resistance: rs,
            ratio,
            taken_at: Local::now(),
        })
    }
}
