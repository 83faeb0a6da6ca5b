//! Off-screen 1-bpp frame buffer. All draw primitives land here; nothing is
//! hardware-visible until the panel adapter commits the finished frame.
//! Bit layout matches the panel transfer format: one bit per pixel, rows
//! packed MSB-first, set bit = white. `BinaryColor::On` is ink (black).

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Size},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::Rectangle,
    Pixel,
};

pub struct FrameBuffer {
    buf: Vec<u8>,
    width: u32,
    height: u32,
    stride: usize,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let stride = ((width as usize) + 7) / 8;
        Self {
            buf: vec![0xFF; stride * height as usize],
            width,
            height,
            stride,
        }
    }

    /// Reset every pixel to white.
    pub fn clear(&mut self) {
        self.buf.fill(0xFF);
    }

    /// Packed pixel data in panel transfer order.
    pub fn data(&self) -> &[u8] {
        &self.buf
    }

    /// True if the pixel at (x, y) is inked. Out-of-range coordinates read
    /// as not inked.
    pub fn pixel_on(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return false;
        }
        let idx = y as usize * self.stride + (x as usize) / 8;
        let mask = 0x80 >> (x as usize % 8);
        self.buf[idx] & mask == 0
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: BinaryColor) {
        let idx = y as usize * self.stride + (x as usize) / 8;
        let mask = 0x80u8 >> (x as usize % 8);
        match color {
            BinaryColor::On => self.buf[idx] &= !mask,
            BinaryColor::Off => self.buf[idx] |= mask,
        }
    }

    /// Serialize as a binary PBM (P4) image, black = inked. Used by the
    /// host build to dump the composed frame for inspection.
    pub fn to_pbm(&self) -> Vec<u8> {
        let mut out = format!("P4\n{} {}\n", self.width, self.height).into_bytes();
        // PBM wants 1 = black, the buffer stores 1 = white.
        out.extend(self.buf.iter().map(|b| !b));
        out
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let (w, h) = (self.width, self.height);
        for Pixel(point, color) in pixels {
            if point.x >= 0 && point.y >= 0 && (point.x as u32) < w && (point.y as u32) < h {
                self.set_pixel(point.x as u32, point.y as u32, color);
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        for y in area.rows() {
            for x in area.columns() {
                self.set_pixel(x as u32, y as u32, color);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::PrimitiveStyle;

    #[test]
    fn starts_white() {
        let fb = FrameBuffer::new(16, 4);
        for y in 0..4 {
            for x in 0..16 {
                assert!(!fb.pixel_on(x, y));
            }
        }
    }

    #[test]
    fn draws_and_clears_single_pixels() {
        let mut fb = FrameBuffer::new(16, 4);
        fb.draw_iter([Pixel(Point::new(3, 1), BinaryColor::On)]).unwrap();
        assert!(fb.pixel_on(3, 1));
        assert!(!fb.pixel_on(4, 1));
        fb.draw_iter([Pixel(Point::new(3, 1), BinaryColor::Off)]).unwrap();
        assert!(!fb.pixel_on(3, 1));
    }

    #[test]
    fn clips_out_of_range_draws() {
        let mut fb = FrameBuffer::new(8, 8);
        fb.draw_iter([
            Pixel(Point::new(-1, 0), BinaryColor::On),
            Pixel(Point::new(8, 0), BinaryColor::On),
            Pixel(Point::new(0, 100), BinaryColor::On),
        ])
        .unwrap();
        assert!(fb.data().iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn fill_solid_inks_rectangle() {
        let mut fb = FrameBuffer::new(16, 16);
        Rectangle::new(Point::new(2, 2), Size::new(4, 3))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut fb)
            .unwrap();
        assert!(fb.pixel_on(2, 2));
        assert!(fb.pixel_on(5, 4));
        assert!(!fb.pixel_on(6, 4));
        assert!(!fb.pixel_on(2, 5));
    }

    #[test]
    fn pbm_header_and_payload_size() {
        let fb = FrameBuffer::new(800, 480);
        let pbm = fb.to_pbm();
        assert!(pbm.starts_with(b"P4\n800 480\n"));
        assert_eq!(pbm.len(), b"P4\n800 480\n".len() + 100 * 480);
    }

    #[test]
    fn odd_width_rows_are_byte_padded() {
        let mut fb = FrameBuffer::new(10, 2);
        fb.draw_iter([Pixel(Point::new(9, 1), BinaryColor::On)]).unwrap();
        assert!(fb.pixel_on(9, 1));
        assert_eq!(fb.data().len(), 2 * 2);
    }
}
