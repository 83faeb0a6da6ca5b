//! Layout engine. Pure function from a dashboard snapshot and a canvas size
//! to an ordered list of draw primitives; no clocks, no I/O, no hardware.
//! The same snapshot always yields the same primitives, and replaying them
//! onto a blank frame always composes the same image.

use embedded_graphics::geometry::{Point, Size};

use crate::dashboard::DashboardSnapshot;
use crate::fonts::{Align, Font};
use crate::weather_icons::Icon;

// ── Spacing constants ───────────────────────────────────────────────

/// Current-conditions icon edge, px.
pub const CURRENT_ICON: u32 = 196;
/// Forecast column icon edge, px.
pub const FORECAST_ICON: u32 = 64;
/// Metric row icon edge, px.
pub const METRIC_ICON: u32 = 48;
/// Alert banner icon edge, px.
pub const ALERT_ICON: u32 = 48;

const FORECAST_COLS: usize = 5;
const FORECAST_COL_PITCH: i32 = 82;
const FORECAST_RIGHT_MARGIN: i32 = 10;
/// Forecast icons sit slightly above the temperature midline.
const FORECAST_ICON_LIFT: i32 = 6;
const FORECAST_DAY_GAP: i32 = 8;
const FORECAST_HILO_GAP: i32 = 4;

/// Width reserved for the temperature numeral block right of the icon.
const TEMP_SLOT_W: i32 = 164;
const FEELS_GAP: i32 = 12;

const HEADER_PAD: i32 = 2;
const HEADER_GAP: i32 = 4;

const ALERT_TOP: i32 = 8;
const ALERT_TEXT_GAP: i32 = 4;

const METRIC_ROWS: usize = 5;
const METRIC_ROW_GAP: i32 = 8;
const METRIC_COL2_X: i32 = 170;
const METRIC_PANEL_PAD: i32 = 8;
const METRIC_LABEL_DY: i32 = 10;

// ── Draw primitives ─────────────────────────────────────────────────

/// One drawing operation. Text anchors are baseline points; the renderer
/// resolves the horizontal alignment against the measured string width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawPrimitive {
    Text {
        anchor: Point,
        text: String,
        font: Font,
        align: Align,
    },
    Bitmap {
        top_left: Point,
        icon: Icon,
        size: u32,
    },
    Line {
        from: Point,
        to: Point,
    },
}

// ── Geometry ────────────────────────────────────────────────────────

/// Every fixed coordinate of the dashboard, derived in one place from the
/// canvas size, the icon edges, the font metrics and the spacing constants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Geometry {
    pub canvas: Size,
    /// Right edge the header lines are flush against.
    pub header_anchor_x: i32,
    pub location_baseline: i32,
    pub date_baseline: i32,
    pub update_baseline: i32,
    pub current_icon_origin: Point,
    /// Center anchor of the temperature numeral.
    pub temp_anchor: Point,
    /// Baseline of the degree-unit suffix (x depends on the numeral width).
    pub unit_baseline: i32,
    pub feels_anchor: Point,
    pub alert_icon_origin: Point,
    pub alert_text_anchor: Point,
    /// Left x of each forecast column.
    pub forecast_col_x: [i32; FORECAST_COLS],
    pub forecast_icon_y: i32,
    pub forecast_day_baseline: i32,
    pub forecast_hilo_baseline: i32,
    pub divider_y: i32,
    pub metric_col_x: [i32; 2],
    /// Icon top y of each metric row.
    pub metric_row_y: [i32; METRIC_ROWS],
    pub metric_label_offset: Point,
    pub metric_value_offset: Point,
}

impl Geometry {
    pub fn new(canvas: Size) -> Self {
        let w = canvas.width as i32;
        let icon = CURRENT_ICON as i32;
        let numeral_h = Font::Numeral.height();

        let location_baseline = HEADER_PAD + Font::Location.height();
        let date_baseline = location_baseline + HEADER_GAP + Font::Date.height();
        let update_baseline = date_baseline + HEADER_GAP + Font::Date.height();

        // Numeral centered on its slot, vertically against the conditions
        // icon; the unit suffix hangs off its measured right edge.
        let temp_anchor = Point::new(icon + TEMP_SLOT_W / 2, icon / 2 + numeral_h / 2);
        let unit_baseline = icon / 2 - numeral_h / 2 + Font::Unit.height();
        let feels_anchor = Point::new(
            icon + TEMP_SLOT_W / 2,
            temp_anchor.y + FEELS_GAP + Font::Body.height(),
        );

        let alert_icon_origin = Point::new(icon, ALERT_TOP);
        let alert_text_anchor = Point::new(
            icon + ALERT_ICON as i32 + ALERT_TEXT_GAP,
            ALERT_TOP + (ALERT_ICON as i32 - Font::Date.height()) / 2 + Font::Date.height(),
        );

        let forecast_x0 = w
            - (FORECAST_COLS as i32 - 1) * FORECAST_COL_PITCH
            - FORECAST_ICON as i32
            - FORECAST_RIGHT_MARGIN;
        let forecast_col_x = core::array::from_fn(|i| forecast_x0 + i as i32 * FORECAST_COL_PITCH);
        let forecast_icon_y = temp_anchor.y - FORECAST_ICON as i32 / 2 - FORECAST_ICON_LIFT;
        let forecast_day_baseline = forecast_icon_y - FORECAST_DAY_GAP;
        let forecast_hilo_baseline =
            forecast_icon_y + FORECAST_ICON as i32 + FORECAST_HILO_GAP + Font::Small.height();

        let divider_y = icon;

        let metric_top = divider_y + METRIC_PANEL_PAD;
        let metric_row_y = core::array::from_fn(|i| {
            metric_top + i as i32 * (METRIC_ICON as i32 + METRIC_ROW_GAP)
        });
        let metric_label_offset = Point::new(METRIC_ICON as i32, METRIC_LABEL_DY);
        let metric_value_offset = Point::new(
            METRIC_ICON as i32,
            METRIC_ICON as i32 / 2 + (Font::Body.height() + 1) / 2,
        );

        Self {
            canvas,
            header_anchor_x: w - 1,
            location_baseline,
            date_baseline,
            update_baseline,
            current_icon_origin: Point::zero(),
            temp_anchor,
            unit_baseline,
            feels_anchor,
            alert_icon_origin,
            alert_text_anchor,
            forecast_col_x,
            forecast_icon_y,
            forecast_day_baseline,
            forecast_hilo_baseline,
            divider_y,
            metric_col_x: [0, METRIC_COL2_X],
            metric_row_y,
            metric_label_offset,
            metric_value_offset,
        }
    }
}

// ── Engine ──────────────────────────────────────────────────────────

/// Compose one frame. Emission order is top of the canvas to the bottom:
/// header, current conditions, forecast strip, divider, metric grid.
pub fn layout(snapshot: &DashboardSnapshot, canvas: Size) -> Vec<DrawPrimitive> {
    let g = Geometry::new(canvas);
    let mut out = Vec::new();

    let text = |anchor, text: &str, font, align| DrawPrimitive::Text {
        anchor,
        text: text.to_string(),
        font,
        align,
    };

    // Header, right-aligned against the canvas edge.
    out.push(text(
        Point::new(g.header_anchor_x, g.location_baseline),
        &snapshot.location,
        Font::Location,
        Align::Right,
    ));
    out.push(text(
        Point::new(g.header_anchor_x, g.date_baseline),
        &snapshot.date_str,
        Font::Date,
        Align::Right,
    ));
    out.push(text(
        Point::new(g.header_anchor_x, g.update_baseline),
        &snapshot.time_str,
        Font::Date,
        Align::Right,
    ));

    if let Some(alert) = &snapshot.alert {
        out.push(DrawPrimitive::Bitmap {
            top_left: g.alert_icon_origin,
            icon: alert.icon,
            size: ALERT_ICON,
        });
        out.push(text(
            g.alert_text_anchor,
            &alert.headline,
            Font::Date,
            Align::Left,
        ));
    }

    // Current conditions.
    out.push(DrawPrimitive::Bitmap {
        top_left: g.current_icon_origin,
        icon: snapshot.icon,
        size: CURRENT_ICON,
    });
    out.push(text(
        g.temp_anchor,
        &snapshot.temperature,
        Font::Numeral,
        Align::Center,
    ));
    // Unit suffix starts at the right edge of the centered numeral.
    let numeral_w = Font::Numeral.text_width(&snapshot.temperature);
    out.push(text(
        Point::new(g.temp_anchor.x - numeral_w / 2 + numeral_w, g.unit_baseline),
        &snapshot.temp_unit,
        Font::Unit,
        Align::Left,
    ));
    out.push(text(
        g.feels_anchor,
        &snapshot.feels_like,
        Font::Body,
        Align::Center,
    ));

    // Forecast strip.
    for (i, entry) in snapshot.forecast.iter().enumerate() {
        let col = g.forecast_col_x[i];
        let center = col + FORECAST_ICON as i32 / 2;
        out.push(text(
            Point::new(center, g.forecast_day_baseline),
            &entry.day,
            Font::Body,
            Align::Center,
        ));
        out.push(DrawPrimitive::Bitmap {
            top_left: Point::new(col, g.forecast_icon_y),
            icon: entry.icon,
            size: FORECAST_ICON,
        });
        out.push(text(
            Point::new(center - 4, g.forecast_hilo_baseline),
            &entry.high,
            Font::Small,
            Align::Right,
        ));
        out.push(text(
            Point::new(center, g.forecast_hilo_baseline),
            "|",
            Font::Small,
            Align::Center,
        ));
        out.push(text(
            Point::new(center + 5, g.forecast_hilo_baseline),
            &entry.low,
            Font::Small,
            Align::Left,
        ));
    }

    // Divider between the conditions band and the metric grid.
    out.push(DrawPrimitive::Line {
        from: Point::new(0, g.divider_y),
        to: Point::new(g.canvas.width as i32 - 1, g.divider_y),
    });

    // Metric grid: left column rows 0..5, right column rows 5..10.
    for (i, entry) in snapshot.metrics.iter().enumerate() {
        let origin = Point::new(
            g.metric_col_x[i / METRIC_ROWS],
            g.metric_row_y[i % METRIC_ROWS],
        );
        out.push(DrawPrimitive::Bitmap {
            top_left: origin,
            icon: entry.icon,
            size: METRIC_ICON,
        });
        out.push(text(
            origin + g.metric_label_offset,
            entry.label,
            Font::Tiny,
            Align::Left,
        ));
        out.push(text(
            origin + g.metric_value_offset,
            &entry.value,
            Font::Body,
            Align::Left,
        ));
    }

    out
}
