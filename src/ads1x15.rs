
// ADS1015 / ADS1115 single-ended, single-shot reads over I2C.
//  see datasheet:  https://www.ti.com/lit/ds/symlink/ads1115.pdf

use std::time::Duration;

use clap::ValueEnum;
use rppal::i2c::I2c;
use tracing::trace;

use crate::error::{GasError, GasResult};
use crate::measurements::{VoltageSource, Wait};

pub const DEFAULT_ADDRESS: u16 = 0x48;
pub const DEFAULT_BUS: u8 = 1;

pub const CONVERSION_REGISTER: u8 = 0x00;
pub const CONFIG_REGISTER: u8 = 0x01;

const CONFIG_OS_SINGLE: u16 = 0x8000;
const CONFIG_MUX_SINGLE_ENDED: u16 = 0x4000;
const CONFIG_MODE_SINGLE: u16 = 0x0100;
const CONFIG_COMP_QUE_DISABLE: u16 = 0x0003;
// 1600 SPS on the ADS1015, 128 SPS on the ADS1115
const CONFIG_DEFAULT_DATA_RATE: u16 = 0x0080;

/// Highest single-ended channel (P3).
pub const MAX_CHANNEL: u8 = 3;

const FULL_SCALE_CODE: f64 = 32767.0;

/// Which converter sits on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Variant {
    /// 12-bit
    Ads1015,
    /// 16-bit
    Ads1115,
}

impl Variant {
    pub const fn resolution_bits(self) -> u32 {
        match self {
            Variant::Ads1015 => 12,
            Variant::Ads1115 => 16,
        }
    }

    const fn samples_per_second(self) -> u64 {
        match self {
            Variant::Ads1015 => 1600,
            Variant::Ads1115 => 128,
        }
    }

    /// Time one conversion takes at the default data rate.
    pub fn conversion_time(self) -> Duration {
        Duration::from_micros(1_000_000 / self.samples_per_second() + 1)
    }
}

/// Programmable gain amplifier setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Gain {
    #[value(name = "2/3")]
    TwoThirds,
    #[value(name = "1")]
    One,
    #[value(name = "2")]
    Two,
    #[value(name = "4")]
    Four,
    #[value(name = "8")]
    Eight,
    #[value(name = "16")]
    Sixteen,
}

impl Gain {
    const fn config_bits(self) -> u16 {
        match self {
            Gain::TwoThirds => 0x0000,
            Gain::One => 0x0200,
            Gain::Two => 0x0400,
            Gain::Four => 0x0600,
            Gain::Eight => 0x0800,
            Gain::Sixteen => 0x0A00,
        }
    }

    /// Full-scale input range in volts.
    pub const fn full_scale_volts(self) -> f64 {
        match self {
            Gain::TwoThirds => 6.144,
            Gain::One => 4.096,
            Gain::Two => 2.048,
            Gain::Four => 1.024,
            Gain::Eight => 0.512,
            Gain::Sixteen => 0.256,
        }
    }
}

/// 16-bit big-endian register access to the converter.
#[cfg_attr(test, mockall::automock(type Error = std::io::Error;))]
pub trait RegisterBus {
    type Error: std::error::Error + Send + Sync + 'static;

    fn write_register(&mut self, register: u8, value: u16) -> Result<(), Self::Error>;
    fn read_register(&mut self, register: u8) -> Result<u16, Self::Error>;
}

impl RegisterBus for I2c {
    type Error = rppal::i2c::Error;

    fn write_register(&mut self, register: u8, value: u16) -> Result<(), Self::Error> {
        self.block_write(register, &value.to_be_bytes())
    }

    fn read_register(&mut self, register: u8) -> Result<u16, Self::Error> {
        let mut buffer = [0u8; 2];
        self.block_read(register, &mut buffer)?;
        Ok(u16::from_be_bytes(buffer))
    }
}

/// Config word that starts a single-shot conversion on `channel`.
pub fn single_shot_config(channel: u8, gain: Gain) -> u16 {
    CONFIG_OS_SINGLE
        | CONFIG_MUX_SINGLE_ENDED
        | (u16::from(channel & MAX_CHANNEL) << 12)
        | gain.config_bits()
        | CONFIG_MODE_SINGLE
        | CONFIG_DEFAULT_DATA_RATE
        | CONFIG_COMP_QUE_DISABLE
}

/// Conversion register contents to volts.
///
/// 12-bit results are left aligned in the register; they are brought down to
/// their resolution and back up to 16 bits so both variants share one scale.
pub fn raw_to_volts(raw: u16, variant: Variant, gain: Gain) -> f64 {
    let shift = 16 - variant.resolution_bits();
    let value = ((raw as i16) >> shift) << shift;
    f64::from(value) * gain.full_scale_volts() / FULL_SCALE_CODE
}

pub struct Ads1x15<B, W> {
    bus: B,
    wait: W,
    variant: Variant,
    gain: Gain,
}

impl<W: Wait> Ads1x15<I2c, W> {
    /// Opens `/dev/i2c-<bus>` and addresses the converter.
    pub fn open(bus: u8, address: u16, variant: Variant, gain: Gain, wait: W) -> GasResult<Self> {
        let mut i2c = I2c::with_bus(bus).map_err(GasError::transport)?;
        i2c.set_slave_address(address).map_err(GasError::transport)?;
        Ok(Self::new(i2c, variant, gain, wait))
    }
}

impl<B: RegisterBus, W: Wait> Ads1x15<B, W> {
    pub fn new(bus: B, variant: Variant, gain: Gain, wait: W) -> Self {
        Self {
            bus,
            wait,
            variant,
            gain,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Raw conversion register value of one single-shot read.
    ///
    /// Polls until the converter reports completion; there is no timeout.
    pub fn read_raw(&mut self, channel: u8) -> GasResult<u16> {
        if channel > MAX_CHANNEL {
            return Err(GasError::invalid("channel", "single-ended channels are 0 to 3"));
        }

        let config = single_shot_config(channel, self.gain);
        self.bus
            .write_register(CONFIG_REGISTER, config)
            .map_err(GasError::transport)?;

        loop {
            self.wait.wait(self.variant.conversion_time());
            let status = self
                .bus
                .read_register(CONFIG_REGISTER)
                .map_err(GasError::transport)?;
            if status & CONFIG_OS_SINGLE != 0 {
                break;
            }
        }

        let raw = self
            .bus
            .read_register(CONVERSION_REGISTER)
            .map_err(GasError::transport)?;
        trace!(channel, config, raw, "ads1x15 conversion");
        Ok(raw)
    }
}

impl<B: RegisterBus, W: Wait> VoltageSource for Ads1x15<B, W> {
    fn read_voltage(&mut self, channel: u8) -> GasResult<f64> {
        let raw = self.read_raw(channel)?;
        Ok(raw_to_volts(raw, self.variant, self.gain))
    }
}
