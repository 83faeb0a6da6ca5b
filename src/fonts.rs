//! Font roles and glyph metrics. All fonts are fixed-pitch, so a string's
//! rendered width is exactly derivable from its character count; the layout
//! engine and the renderer both measure through here so placement and
//! alignment can never disagree.

use embedded_graphics::mono_font::MonoFont;
use profont::{
    PROFONT_12_POINT, PROFONT_14_POINT, PROFONT_18_POINT, PROFONT_24_POINT, PROFONT_7_POINT,
    PROFONT_9_POINT,
};

/// Font role, mapped to a concrete typeface size at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    /// Large current-temperature numeral.
    Numeral,
    /// Degree-unit suffix next to the numeral.
    Unit,
    /// Location line in the header.
    Location,
    /// Dateline and update-time line.
    Date,
    /// Feels-like line, forecast day labels, metric values.
    Body,
    /// Forecast high | low triples.
    Small,
    /// Metric row labels.
    Tiny,
}

impl Font {
    pub fn mono(self) -> &'static MonoFont<'static> {
        match self {
            Font::Numeral => &PROFONT_24_POINT,
            Font::Unit => &PROFONT_14_POINT,
            Font::Location => &PROFONT_18_POINT,
            Font::Date => &PROFONT_14_POINT,
            Font::Body => &PROFONT_12_POINT,
            Font::Small => &PROFONT_9_POINT,
            Font::Tiny => &PROFONT_7_POINT,
        }
    }

    /// Rendered width of `text` in this font, in pixels.
    pub fn text_width(self, text: &str) -> i32 {
        let font = self.mono();
        let n = text.chars().count() as i32;
        if n == 0 {
            return 0;
        }
        let advance = font.character_size.width as i32 + font.character_spacing as i32;
        n * advance - font.character_spacing as i32
    }

    /// Glyph cell height, used for vertical layout arithmetic.
    pub fn height(self) -> i32 {
        self.mono().character_size.height as i32
    }
}

/// Horizontal text alignment relative to an anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
    Center,
}

/// Left edge of a text run of measured width `w` anchored at `anchor_x`.
/// RIGHT subtracts the full width, CENTER half of it (truncating); the
/// baseline y is never adjusted.
pub fn aligned_x(anchor_x: i32, w: i32, align: Align) -> i32 {
    match align {
        Align::Left => anchor_x,
        Align::Right => anchor_x - w,
        Align::Center => anchor_x - w / 2,
    }
}
