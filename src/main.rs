//! # Label Printer Application Entry Point
//!
//! Desktop builds compose a single label for the current time and save it to
//! `/tmp/Label.bmp`. Builds with the `hardware` feature wait for the GPIO button
//! and print one label per press until the process is killed.

#[cfg(all(target_os = "linux", feature = "hardware"))]
mod gpio_lines;

use anyhow::Context;
use chrono::{Local, NaiveDateTime};
use label_printer_lib::{config::Config, dispatch::CupsSpooler, station::LabelStation};
use log::info;

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Wait for presses and print a label for each one.
#[cfg(all(target_os = "linux", feature = "hardware"))]
fn run_embedded(config: Config) -> anyhow::Result<()> {
    use crate::gpio_lines::GpioLines;
    use label_printer_lib::button_loop::{ButtonLoop, ThreadSleeper};

    let gpio = config.gpio.clone();
    let GpioLines { button, led: _led } =
        GpioLines::open(&gpio).context("failed to acquire GPIO lines")?;
    info!(
        "🔌 GPIO ready: button on line {}, LED on line {}",
        gpio.button_offset, gpio.led_offset
    );

    let station = LabelStation::open(config, CupsSpooler::new())
        .context("failed to load label resources")?;
    station.configure_printer();

    info!("🔘 Waiting for button presses...");
    let mut button_loop = ButtonLoop::new(button, ThreadSleeper, &gpio);
    match button_loop.run(|| station.print_label(&now())) {
        Ok(never) => match never {},
        Err(e) => Err(e).context("button polling stopped"),
    }
}

/// Compose one label and save it without printing.
fn run_desktop(config: Config) -> anyhow::Result<()> {
    let station = LabelStation::open(config, CupsSpooler::new())
        .context("failed to load label resources")?;
    station
        .save_label(&now())
        .context("failed to generate label")?;
    Ok(())
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::default();
    info!(
        "🏷️  Label printer starting ({}x{} canvas)",
        config.layout.width, config.layout.height
    );

    #[cfg(all(target_os = "linux", feature = "hardware"))]
    {
        return run_embedded(config);
    }

    #[cfg(all(not(target_os = "linux"), feature = "hardware"))]
    {
        return Err(anyhow::anyhow!(
            "Hardware mode is only available on Linux. Rebuild without --features hardware."
        ));
    }

    #[allow(unreachable_code)]
    run_desktop(config)
}
