//! Battery-powered e-paper weather dashboard. Each boot is one wake cycle:
//! connect, sync the clock, compose and commit a frame, then deep sleep
//! until one second past the next cadence boundary.
//!
//! Without the `esp32` feature the same cycle runs against simulated
//! adapters and dumps the composed frame to `frame.pbm`.

mod config;
mod cycle;
mod dashboard;
mod datetime;
#[cfg(feature = "esp32")]
mod epd;
mod error;
mod fonts;
mod framebuffer;
mod layout;
mod poll;
mod power;
mod render;
mod time_sync;
mod weather_icons;
mod wifi;

use anyhow::Result;

use crate::cycle::{run_cycle, CycleContext};

#[cfg(feature = "esp32")]
fn main() -> Result<()> {
    use esp_idf_hal::peripherals::Peripherals;
    use esp_idf_svc::eventloop::EspSystemEventLoop;

    esp_idf_sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;

    let mut net = wifi::EspWifiLink::new(peripherals.modem, sysloop)?;
    let mut clock = time_sync::SntpClock::new();
    // EPD driver board wiring: BUSY 26, CS 5, RST 27, DC 13, SCK 25, MOSI 2.
    let mut panel = epd::EpdPanel::new(
        peripherals.spi2,
        peripherals.pins.gpio25,
        peripherals.pins.gpio2,
        peripherals.pins.gpio5,
        peripherals.pins.gpio26,
        peripherals.pins.gpio13,
        peripherals.pins.gpio27,
    );

    let ctx = CycleContext::from_config();
    let report = run_cycle(&ctx, &mut net, &mut clock, &mut panel);
    power::enter_deep_sleep(&report.sleep)
}

#[cfg(not(feature = "esp32"))]
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let base = time_sync::CalendarTime {
        year: 2019,
        month: 5,
        day: 31,
        weekday: 5,
        hour: 14,
        minute: 47,
        second: 10,
    };
    let mut net = wifi::SimWifi::new();
    let mut clock = time_sync::SimClock::new(base);
    let mut panel = render::PbmPanel::new("frame.pbm");

    let ctx = CycleContext::from_config();
    let report = run_cycle(&ctx, &mut net, &mut clock, &mut panel);
    power::enter_deep_sleep(&report.sleep)
}
