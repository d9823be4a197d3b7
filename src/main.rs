use std::{env, thread};

use anyhow::Context;
use tokio::{
    signal::unix::{signal, SignalKind},
    sync::mpsc,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod ads1x15;
mod config;
mod console;
mod curve;
mod detector;
mod error;
mod measurements;
mod report;
mod resistance;
mod worker;

use crate::ads1x15::Ads1x15;
use crate::measurements::ThreadSleep;
use crate::worker::sampling_context;

// readings are small, a short backlog is plenty for a console
const EVENT_BACKLOG: usize = 4;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // logs go to stderr, stdout is the report
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "gas_detection=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = config::parse_config(env::args_os()).unwrap_or_else(|e| e.exit());
    let config = args.detector_config();

    let adc = Ads1x15::open(args.bus, args.address, args.converter, args.gain, ThreadSleep)
        .with_context(|| {
            format!(
                "opening {:?} at {:#04x} on /dev/i2c-{}",
                args.converter, args.address, args.bus
            )
        })?;
    info!(variant = ?adc.variant(), pin = args.pin, "converter ready");

    // registered before anything is printed so an early Ctrl-C still says goodbye
    let mut interrupt = signal(SignalKind::interrupt()).context("listening for ctrl-c")?;
    let shutdown = async move {
        interrupt.recv().await;
    };

    if args.ro.is_none() {
        println!("Calibrating ...");
    }

    // the detector lives on its own thread: calibration blocks for a while
    // and an interrupt must not wait for a cycle to finish
    let (tx, rx) = mpsc::channel(EVENT_BACKLOG);
    let (ro, pause) = (args.ro, args.pause());
    thread::spawn(move || {
        sampling_context(adc, ThreadSleep, config, ro, pause, tx);
    });

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    console::display_context(rx, shutdown, &mut out, args.timestamps).await
}
