//! Monochrome icon set, drawn procedurally from primitives so the firmware
//! carries no bitmap assets. Every icon is composed inside a square cell of
//! the requested size; callers pick the cell size per region (196 for
//! current conditions, 64 for the forecast strip, 48 for metric rows).

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Circle, Line, PrimitiveStyle, Rectangle, Triangle},
};

/// Icon identifiers referenced by draw primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Icon {
    #[default]
    ClearDay,
    Cloudy,
    Fog,
    Rain,
    RainWind,
    Snow,
    Thunderstorm,
    Windy,
    Sunrise,
    Sunset,
    Wind,
    Humidity,
    UvIndex,
    Pressure,
    AirQuality,
    Visibility,
    IndoorTemp,
    IndoorHumidity,
    Warning,
}

impl Icon {
    /// Short text label for diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            Icon::ClearDay => "clear",
            Icon::Cloudy => "cloudy",
            Icon::Fog => "fog",
            Icon::Rain => "rain",
            Icon::RainWind => "rain-wind",
            Icon::Snow => "snow",
            Icon::Thunderstorm => "thunderstorm",
            Icon::Windy => "windy",
            Icon::Sunrise => "sunrise",
            Icon::Sunset => "sunset",
            Icon::Wind => "wind",
            Icon::Humidity => "humidity",
            Icon::UvIndex => "uv-index",
            Icon::Pressure => "pressure",
            Icon::AirQuality => "air-quality",
            Icon::Visibility => "visibility",
            Icon::IndoorTemp => "indoor-temp",
            Icon::IndoorHumidity => "indoor-humidity",
            Icon::Warning => "warning",
        }
    }

    /// Draw the icon into a `size`×`size` cell at `top_left`.
    pub fn draw<D>(self, target: &mut D, top_left: Point, size: u32)
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let c = Cell::new(top_left, size);
        match self {
            Icon::ClearDay => c.sun(target, c.center(), c.frac(4)),
            Icon::Cloudy => c.cloud(target),
            Icon::Fog => {
                c.cloud(target);
                c.hlines(target, 3, c.frac(8) * 5);
            }
            Icon::Rain => {
                c.cloud(target);
                c.rain(target);
            }
            Icon::RainWind => {
                c.cloud(target);
                c.rain(target);
                c.gusts(target);
            }
            Icon::Snow => {
                c.cloud(target);
                c.snow(target);
            }
            Icon::Thunderstorm => {
                c.cloud(target);
                c.bolt(target);
            }
            Icon::Windy => {
                c.hlines(target, 3, c.frac(3));
                c.gusts(target);
            }
            Icon::Sunrise => c.horizon_sun(target, true),
            Icon::Sunset => c.horizon_sun(target, false),
            Icon::Wind => {
                c.hlines(target, 3, c.frac(3));
                c.gusts(target);
            }
            Icon::Humidity => c.drop(target, c.center()),
            Icon::UvIndex => c.sun(target, c.center(), c.frac(4)),
            Icon::Pressure => c.gauge(target),
            Icon::AirQuality => c.hlines(target, 4, c.frac(4)),
            Icon::Visibility => c.eye(target),
            Icon::IndoorTemp => {
                c.house(target);
                c.stem(target);
            }
            Icon::IndoorHumidity => {
                c.house(target);
                c.drop(target, c.center() + Point::new(0, c.frac(8)));
            }
            Icon::Warning => c.warning(target),
        }
    }
}

/// Square drawing cell; all offsets are fractions of the cell size so the
/// same shape works at 48, 64 and 196 px.
struct Cell {
    origin: Point,
    size: i32,
}

impl Cell {
    fn new(origin: Point, size: u32) -> Self {
        Self {
            origin,
            size: size as i32,
        }
    }

    fn frac(&self, denom: i32) -> i32 {
        (self.size / denom).max(1)
    }

    fn stroke(&self) -> u32 {
        (self.size / 32).max(1) as u32
    }

    fn center(&self) -> Point {
        self.origin + Point::new(self.size / 2, self.size / 2)
    }

    fn at(&self, fx: i32, fy: i32, denom: i32) -> Point {
        self.origin + Point::new(self.size * fx / denom, self.size * fy / denom)
    }

    fn line<D>(&self, target: &mut D, a: Point, b: Point)
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        Line::new(a, b)
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, self.stroke()))
            .draw(target)
            .ok();
    }

    fn circle<D>(&self, target: &mut D, center: Point, radius: i32, filled: bool)
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let style = if filled {
            PrimitiveStyle::with_fill(BinaryColor::On)
        } else {
            PrimitiveStyle::with_stroke(BinaryColor::On, self.stroke())
        };
        Circle::with_center(center, (radius * 2) as u32)
            .into_styled(style)
            .draw(target)
            .ok();
    }

    /// Sun disc with eight rays.
    fn sun<D>(&self, target: &mut D, center: Point, radius: i32)
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        self.circle(target, center, radius, false);
        let inner = radius + self.frac(16);
        let outer = radius + self.frac(6);
        // 8 rays at 45° steps; offsets precomputed as (dx, dy) unit-ish pairs
        const DIRS: [(i32, i32); 8] = [
            (1, 0),
            (-1, 0),
            (0, 1),
            (0, -1),
            (1, 1),
            (1, -1),
            (-1, 1),
            (-1, -1),
        ];
        for (dx, dy) in DIRS {
            // Diagonal rays are shortened so all ray tips sit roughly on a circle.
            let (i, o) = if dx != 0 && dy != 0 {
                (inner * 5 / 7, outer * 5 / 7)
            } else {
                (inner, outer)
            };
            self.line(
                target,
                center + Point::new(dx * i, dy * i),
                center + Point::new(dx * o, dy * o),
            );
        }
    }

    /// Cloud silhouette: two stacked discs over a base bar.
    fn cloud<D>(&self, target: &mut D)
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let r_big = self.frac(4);
        let r_small = self.frac(5);
        self.circle(target, self.at(3, 3, 8), r_small, true);
        self.circle(target, self.at(5, 3, 8), r_big, true);
        let base = Rectangle::with_corners(self.at(1, 3, 8), self.at(7, 4, 8));
        base.into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(target)
            .ok();
    }

    /// Slanted rain strokes under the cloud base.
    fn rain<D>(&self, target: &mut D)
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let drop_len = self.frac(8);
        for i in 0..3 {
            let top = self.at(2 + 2 * i, 5, 8);
            self.line(target, top, top + Point::new(-drop_len / 2, drop_len));
        }
    }

    /// Snow dots under the cloud base.
    fn snow<D>(&self, target: &mut D)
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let r = self.frac(20);
        for i in 0..3 {
            self.circle(target, self.at(2 + 2 * i, 6, 8), r, true);
        }
    }

    /// Lightning bolt under the cloud base.
    fn bolt<D>(&self, target: &mut D)
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        Triangle::new(self.at(4, 4, 8), self.at(3, 6, 8), self.at(4, 6, 8))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(target)
            .ok();
        Triangle::new(self.at(4, 6, 8), self.at(5, 6, 8), self.at(3, 15, 16))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(target)
            .ok();
    }

    /// Horizontal streaks (fog banks, wind field, air layers).
    fn hlines<D>(&self, target: &mut D, count: i32, top: i32)
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let gap = self.frac(8);
        for i in 0..count {
            let y = top + i * gap;
            self.line(
                target,
                self.origin + Point::new(self.frac(8), y),
                self.origin + Point::new(self.size - self.frac(8), y),
            );
        }
    }

    /// Trailing gust curls on the right edge.
    fn gusts<D>(&self, target: &mut D)
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let r = self.frac(12);
        self.circle(target, self.at(7, 3, 8), r, false);
        self.circle(target, self.at(7, 5, 8), r, false);
    }

    /// Half sun on a horizon line with an up/down arrow.
    fn horizon_sun<D>(&self, target: &mut D, rising: bool)
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let horizon_y = self.size * 5 / 8;
        let center = self.origin + Point::new(self.size / 2, horizon_y);
        self.sun(target, center, self.frac(5));
        // Horizon line covers the lower half of the disc.
        let cover = Rectangle::with_corners(
            self.origin + Point::new(0, horizon_y + self.stroke() as i32),
            self.origin + Point::new(self.size, self.size),
        );
        cover
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::Off))
            .draw(target)
            .ok();
        self.line(
            target,
            self.origin + Point::new(self.frac(8), horizon_y),
            self.origin + Point::new(self.size - self.frac(8), horizon_y),
        );
        // Arrow under the horizon, pointing up when rising, down when setting.
        let (tip, base_l, base_r) = if rising {
            (self.at(4, 6, 8), self.at(3, 7, 8), self.at(5, 7, 8))
        } else {
            (self.at(4, 7, 8), self.at(3, 6, 8), self.at(5, 6, 8))
        };
        Triangle::new(tip, base_l, base_r)
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(target)
            .ok();
    }

    /// Water drop: triangle cap over a filled disc.
    fn drop<D>(&self, target: &mut D, center: Point)
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let r = self.frac(6);
        self.circle(target, center + Point::new(0, r / 2), r, true);
        Triangle::new(
            center + Point::new(0, -r * 2),
            center + Point::new(-r, r / 2),
            center + Point::new(r, r / 2),
        )
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
        .draw(target)
        .ok();
    }

    /// Pressure gauge: dial with a needle to the upper right.
    fn gauge<D>(&self, target: &mut D)
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let r = self.frac(3);
        self.circle(target, self.center(), r, false);
        self.line(
            target,
            self.center(),
            self.center() + Point::new(r * 5 / 8, -r * 5 / 8),
        );
    }

    /// Visibility: eye outline with a pupil.
    fn eye<D>(&self, target: &mut D)
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let w = self.frac(3);
        self.line(target, self.center() + Point::new(-w, 0), self.at(1, 1, 2) + Point::new(0, -self.frac(6)));
        self.line(target, self.at(1, 1, 2) + Point::new(0, -self.frac(6)), self.center() + Point::new(w, 0));
        self.line(target, self.center() + Point::new(-w, 0), self.at(1, 1, 2) + Point::new(0, self.frac(6)));
        self.line(target, self.at(1, 1, 2) + Point::new(0, self.frac(6)), self.center() + Point::new(w, 0));
        self.circle(target, self.center(), self.frac(10), true);
    }

    /// House outline used by the indoor metrics.
    fn house<D>(&self, target: &mut D)
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let wall = Rectangle::with_corners(self.at(2, 4, 8), self.at(6, 7, 8));
        wall.into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, self.stroke()))
            .draw(target)
            .ok();
        self.line(target, self.at(1, 4, 8), self.at(4, 1, 8));
        self.line(target, self.at(4, 1, 8), self.at(7, 4, 8));
    }

    /// Thermometer stem inside the house wall.
    fn stem<D>(&self, target: &mut D)
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        self.line(target, self.at(4, 4, 8), self.at(4, 6, 8));
        self.circle(target, self.at(4, 6, 8), self.frac(16), true);
    }

    /// Warning triangle with an exclamation stroke.
    fn warning<D>(&self, target: &mut D)
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        Triangle::new(self.at(4, 1, 8), self.at(1, 7, 8), self.at(7, 7, 8))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, self.stroke()))
            .draw(target)
            .ok();
        self.line(target, self.at(4, 3, 8), self.at(4, 5, 8));
        self.circle(target, self.at(4, 6, 8), self.frac(24), true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::FrameBuffer;

    /// Every icon must stay inside its cell; clipping in the framebuffer
    /// would hide errors, so draw into a larger canvas and check margins.
    #[test]
    fn icons_stay_inside_cell() {
        const CELL: u32 = 64;
        const PAD: u32 = 32;
        let all = [
            Icon::ClearDay,
            Icon::Cloudy,
            Icon::Fog,
            Icon::Rain,
            Icon::RainWind,
            Icon::Snow,
            Icon::Thunderstorm,
            Icon::Windy,
            Icon::Sunrise,
            Icon::Sunset,
            Icon::Wind,
            Icon::Humidity,
            Icon::UvIndex,
            Icon::Pressure,
            Icon::AirQuality,
            Icon::Visibility,
            Icon::IndoorTemp,
            Icon::IndoorHumidity,
            Icon::Warning,
        ];
        for icon in all {
            let mut fb = FrameBuffer::new(CELL + 2 * PAD, CELL + 2 * PAD);
            icon.draw(&mut fb, Point::new(PAD as i32, PAD as i32), CELL);
            for y in 0..(CELL + 2 * PAD) {
                for x in 0..(CELL + 2 * PAD) {
                    let inside = (PAD..PAD + CELL).contains(&x) && (PAD..PAD + CELL).contains(&y);
                    if !inside {
                        assert!(
                            !fb.pixel_on(x as i32, y as i32),
                            "{} leaked outside its cell at ({}, {})",
                            icon.label(),
                            x,
                            y
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn icons_draw_something() {
        let mut fb = FrameBuffer::new(64, 64);
        Icon::ClearDay.draw(&mut fb, Point::zero(), 64);
        let lit = (0..64)
            .flat_map(|y| (0..64).map(move |x| (x, y)))
            .filter(|&(x, y)| fb.pixel_on(x, y))
            .count();
        assert!(lit > 0);
    }
}
