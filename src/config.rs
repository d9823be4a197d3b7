#[cfg(test)]
mod tests;

use std::ffi::OsString;
use std::time::Duration;

use clap::Parser;
use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take_while1},
    combinator::{all_consuming, success, value},
    IResult,
};

use crate::ads1x15::{Gain, Variant, DEFAULT_ADDRESS, DEFAULT_BUS, MAX_CHANNEL};
use crate::detector::{DetectorConfig, DEFAULT_CLEAN_AIR_FACTOR};
use crate::measurements::SampleCadence;
use crate::resistance::{DEFAULT_LOAD_RESISTANCE, DEFAULT_SCALE_MAX};
use crate::worker::DEFAULT_PAUSE;

/// Gas detection for Raspberry Pi using ADS1x15 and MQ-2 sensors
#[derive(Debug, Parser)]
#[command(name = "gas-detection", version, about)]
pub struct Args {
    /// Converter on the I2C bus
    #[arg(long, alias = "convertor", value_enum, default_value_t = Variant::Ads1115)]
    pub converter: Variant,

    /// Converter input the sensor is wired to (0-3)
    #[arg(long, default_value = "0", value_parser = parse_pin)]
    pub pin: u8,

    /// I2C address of the converter
    #[arg(long, default_value_t = DEFAULT_ADDRESS, value_parser = parse_address)]
    pub address: u16,

    /// I2C bus number, as in /dev/i2c-N
    #[arg(long, default_value_t = DEFAULT_BUS, value_parser = parse_bus)]
    pub bus: u8,

    /// Programmable gain of the converter
    #[arg(long, value_enum, default_value_t = Gain::One)]
    pub gain: Gain,

    /// Known Ro of the sensor; skips calibration
    #[arg(long)]
    pub ro: Option<f64>,

    /// Load resistance on the board, in kilo ohms
    #[arg(long, default_value_t = DEFAULT_LOAD_RESISTANCE)]
    pub load_resistance: f64,

    /// Rs/Ro of the sensor in clean air
    #[arg(long, default_value_t = DEFAULT_CLEAN_AIR_FACTOR)]
    pub clean_air_factor: f64,

    /// Full-scale constant of the resistance formula
    #[arg(long, default_value_t = DEFAULT_SCALE_MAX)]
    pub scale_max: f64,

    /// Samples taken during calibration
    #[arg(long, default_value_t = SampleCadence::CALIBRATION.count)]
    pub calibration_samples: usize,

    /// Milliseconds between calibration samples
    #[arg(long, default_value_t = SampleCadence::CALIBRATION.interval.as_millis() as u64)]
    pub calibration_interval: u64,

    /// Samples averaged per reading
    #[arg(long, default_value_t = SampleCadence::READING.count)]
    pub read_samples: usize,

    /// Milliseconds between reading samples
    #[arg(long, default_value_t = SampleCadence::READING.interval.as_millis() as u64)]
    pub read_interval: u64,

    /// Milliseconds between two printed readings
    #[arg(long, default_value_t = DEFAULT_PAUSE.as_millis() as u64)]
    pub pause: u64,

    /// Print the local time above each reading
    #[arg(long)]
    pub timestamps: bool,
}

impl Args {
    pub fn detector_config(&self) -> DetectorConfig {
        DetectorConfig {
            channel: self.pin,
            load_resistance: self.load_resistance,
            scale_max: self.scale_max,
            clean_air_factor: self.clean_air_factor,
            calibration: SampleCadence::new(
                self.calibration_samples,
                Duration::from_millis(self.calibration_interval),
            ),
            reading: SampleCadence::new(
                self.read_samples,
                Duration::from_millis(self.read_interval),
            ),
        }
    }

    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause)
    }
}

pub fn parse_config<I, T>(args: I) -> Result<Args, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Args::try_parse_from(args)
}

fn radix_and_digits(input: &str) -> IResult<&str, (u32, &str)> {
    let (input, radix) = alt((
        value(16u32, tag_no_case("0x")),
        value(8u32, tag_no_case("0o")),
        value(2u32, tag_no_case("0b")),
        success(10u32),
    ))(input)?;
    let (input, digits) = take_while1(move |c: char| c.is_digit(radix))(input)?;
    Ok((input, (radix, digits)))
}

/// Integer literal with an optional `0x`, `0o` or `0b` prefix.
pub fn parse_int(input: &str) -> Result<u32, String> {
    let (_, (radix, digits)) = all_consuming(radix_and_digits)(input.trim())
        .map_err(|_| format!("`{input}` is not an integer literal"))?;
    u32::from_str_radix(digits, radix).map_err(|e| format!("`{input}`: {e}"))
}

fn parse_pin(input: &str) -> Result<u8, String> {
    match parse_int(input)? {
        pin if pin <= u32::from(MAX_CHANNEL) => Ok(pin as u8),
        pin => Err(format!("pin {pin} is not one of 0-{MAX_CHANNEL}")),
    }
}

fn parse_address(input: &str) -> Result<u16, String> {
    let address = parse_int(input)?;
    u16::try_from(address).map_err(|_| format!("address {address:#x} does not fit an I2C address"))
}

fn parse_bus(input: &str) -> Result<u8, String> {
    let bus = parse_int(input)?;
    u8::try_from(bus).map_err(|_| format!("bus {bus} is out of range"))
}
