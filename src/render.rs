//! Render driver. Replays layout primitives onto the frame buffer, resolving
//! text alignment against measured glyph widths, and defines the panel
//! contract the hardware (or the host simulator) fulfils.

use anyhow::Result;
use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Line, PrimitiveStyle},
    text::Text,
};
use log::debug;

use crate::fonts::aligned_x;
use crate::framebuffer::FrameBuffer;
use crate::layout::DrawPrimitive;

/// Replay `primitives` in order onto `fb`. Drawing into the in-memory
/// frame cannot fail; anything off-canvas is clipped.
pub fn execute(primitives: &[DrawPrimitive], fb: &mut FrameBuffer) {
    let ink = PrimitiveStyle::with_stroke(BinaryColor::On, 1);
    for prim in primitives {
        match prim {
            DrawPrimitive::Text {
                anchor,
                text,
                font,
                align,
            } => {
                let w = font.text_width(text);
                let x = aligned_x(anchor.x, w, *align);
                let style = MonoTextStyle::new(font.mono(), BinaryColor::On);
                Text::new(text, Point::new(x, anchor.y), style)
                    .draw(fb)
                    .ok();
            }
            DrawPrimitive::Bitmap {
                top_left,
                icon,
                size,
            } => {
                debug!("blit {} ({}px) at {:?}", icon.label(), size, top_left);
                icon.draw(fb, *top_left, *size);
            }
            DrawPrimitive::Line { from, to } => {
                Line::new(*from, *to).into_styled(ink).draw(fb).ok();
            }
        }
    }
    debug!("Replayed {} draw primitives", primitives.len());
}

/// Display panel contract. One init, one commit, one power-off per wake
/// cycle; the panel never sees partial frames.
pub trait Panel {
    /// Bring the panel and its communication bus up from cold.
    fn init(&mut self) -> Result<()>;

    /// Push a finished frame. `full_refresh` forces the slow full-update
    /// waveform that clears ghosting.
    fn commit(&mut self, frame: &FrameBuffer, full_refresh: bool) -> Result<()>;

    /// Put the panel into its lowest-power state.
    fn power_off(&mut self) -> Result<()>;
}

/// Host-build panel: writes each committed frame to a PBM file so the
/// composed image can be inspected without hardware.
pub struct PbmPanel {
    path: std::path::PathBuf,
}

impl PbmPanel {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Panel for PbmPanel {
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    fn commit(&mut self, frame: &FrameBuffer, _full_refresh: bool) -> Result<()> {
        std::fs::write(&self.path, frame.to_pbm())?;
        log::info!("Frame written to {}", self.path.display());
        Ok(())
    }

    fn power_off(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::{Align, Font};
    use crate::layout::DrawPrimitive;
    use embedded_graphics::geometry::Point;

    #[test]
    fn text_lands_left_of_center_anchor() {
        let mut fb = FrameBuffer::new(200, 60);
        let prims = [DrawPrimitive::Text {
            anchor: Point::new(100, 40),
            text: "88".to_string(),
            font: Font::Numeral,
            align: Align::Center,
        }];
        execute(&prims, &mut fb);
        let w = Font::Numeral.text_width("88");
        let left = 100 - w / 2;
        // Ink appears inside the centered run, none before its left edge.
        let run_has_ink = (left..left + w).any(|x| (0..60).any(|y| fb.pixel_on(x, y)));
        let before_is_blank = (0..left).all(|x| (0..60).all(|y| !fb.pixel_on(x, y)));
        assert!(run_has_ink);
        assert!(before_is_blank);
    }

    #[test]
    fn line_primitive_draws_every_pixel() {
        let mut fb = FrameBuffer::new(32, 8);
        let prims = [DrawPrimitive::Line {
            from: Point::new(0, 4),
            to: Point::new(31, 4),
        }];
        execute(&prims, &mut fb);
        assert!((0..32).all(|x| fb.pixel_on(x, 4)));
        assert!(!fb.pixel_on(0, 3));
    }

    #[test]
    fn replay_is_idempotent() {
        let prims = [
            DrawPrimitive::Line {
                from: Point::new(0, 2),
                to: Point::new(15, 2),
            },
            DrawPrimitive::Text {
                anchor: Point::new(1, 7),
                text: "x".to_string(),
                font: Font::Tiny,
                align: Align::Left,
            },
        ];
        let mut once = FrameBuffer::new(16, 8);
        execute(&prims, &mut once);
        let mut twice = FrameBuffer::new(16, 8);
        execute(&prims, &mut twice);
        execute(&prims, &mut twice);
        assert_eq!(once.data(), twice.data());
    }
}
