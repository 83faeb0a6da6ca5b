//! Waveshare 7.5" V2 panel behind the `Panel` contract. The SPI bus is
//! claimed and configured in `init`, not at construction, so every wake
//! cycle starts from a freshly reset bus.

use anyhow::{anyhow, Result};
use epd_waveshare::{epd7in5_v2::Epd7in5, prelude::*};
use esp_idf_hal::delay::Delay;
use esp_idf_hal::gpio::{Gpio13, Gpio2, Gpio25, Gpio26, Gpio27, Gpio5, Input, Output, PinDriver};
use esp_idf_hal::prelude::*;
use esp_idf_hal::spi::{config::Config as SpiConfig, SpiDeviceDriver, SpiDriver, SpiDriverConfig, SPI2};
use log::info;

use crate::framebuffer::FrameBuffer;
use crate::render::Panel;

type Spi = SpiDeviceDriver<'static, SpiDriver<'static>>;
type Busy = PinDriver<'static, Gpio26, Input>;
type Dc = PinDriver<'static, Gpio13, Output>;
type Rst = PinDriver<'static, Gpio27, Output>;

struct Parts {
    spi: SPI2,
    sclk: Gpio25,
    sdo: Gpio2,
    cs: Gpio5,
    busy: Gpio26,
    dc: Gpio13,
    rst: Gpio27,
}

struct Hw {
    spi: Spi,
    epd: Epd7in5<Spi, Busy, Dc, Rst, Delay>,
    delay: Delay,
}

pub struct EpdPanel {
    parts: Option<Parts>,
    hw: Option<Hw>,
}

impl EpdPanel {
    pub fn new(
        spi: SPI2,
        sclk: Gpio25,
        sdo: Gpio2,
        cs: Gpio5,
        busy: Gpio26,
        dc: Gpio13,
        rst: Gpio27,
    ) -> Self {
        Self {
            parts: Some(Parts {
                spi,
                sclk,
                sdo,
                cs,
                busy,
                dc,
                rst,
            }),
            hw: None,
        }
    }

    fn hw(&mut self) -> Result<&mut Hw> {
        self.hw.as_mut().ok_or_else(|| anyhow!("panel not initialized"))
    }
}

impl Panel for EpdPanel {
    fn init(&mut self) -> Result<()> {
        let parts = self
            .parts
            .take()
            .ok_or_else(|| anyhow!("panel already initialized"))?;

        let driver = SpiDriver::new(
            parts.spi,
            parts.sclk,
            parts.sdo,
            None::<esp_idf_hal::gpio::AnyIOPin>,
            &SpiDriverConfig::new(),
        )?;
        let mut spi = SpiDeviceDriver::new(
            driver,
            Some(parts.cs),
            &SpiConfig::new().baudrate(10.MHz().into()),
        )?;

        let busy = PinDriver::input(parts.busy)?;
        let dc = PinDriver::output(parts.dc)?;
        let rst = PinDriver::output(parts.rst)?;
        let mut delay = Delay::new_default();

        let epd = Epd7in5::new(&mut spi, busy, dc, rst, &mut delay, None)
            .map_err(|e| anyhow!("panel init: {e:?}"))?;
        info!("E-paper panel initialized");
        self.hw = Some(Hw { spi, epd, delay });
        Ok(())
    }

    fn commit(&mut self, frame: &FrameBuffer, full_refresh: bool) -> Result<()> {
        let hw = self.hw()?;
        if full_refresh {
            hw.epd
                .clear_frame(&mut hw.spi, &mut hw.delay)
                .map_err(|e| anyhow!("panel clear: {e:?}"))?;
        }
        hw.epd
            .update_frame(&mut hw.spi, frame.data(), &mut hw.delay)
            .map_err(|e| anyhow!("panel update: {e:?}"))?;
        hw.epd
            .display_frame(&mut hw.spi, &mut hw.delay)
            .map_err(|e| anyhow!("panel display: {e:?}"))?;
        info!("Frame committed to panel");
        Ok(())
    }

    fn power_off(&mut self) -> Result<()> {
        let hw = self.hw()?;
        hw.epd
            .sleep(&mut hw.spi, &mut hw.delay)
            .map_err(|e| anyhow!("panel sleep: {e:?}"))?;
        info!("Panel powered down");
        Ok(())
    }
}
