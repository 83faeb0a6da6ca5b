//! Dashboard snapshot: every string and icon choice the layout engine needs
//! to compose one frame. Built once per wake cycle; the layout engine never
//! formats or fetches anything itself.

use crate::config::Units;
use crate::datetime;
use crate::time_sync::CalendarTime;
use crate::weather_icons::Icon;

/// Marker shown in place of any value that could not be obtained this cycle.
pub const UNAVAILABLE: &str = "--";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastEntry {
    pub icon: Icon,
    pub day: String,
    pub high: String,
    pub low: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricEntry {
    pub icon: Icon,
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertBanner {
    pub icon: Icon,
    pub headline: String,
}

/// One frame's worth of display data. Rows in `metrics` fill the left
/// column first (top to bottom), then the right column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSnapshot {
    pub location: String,
    pub date_str: String,
    pub time_str: String,
    /// Current temperature numeral, without the unit suffix.
    pub temperature: String,
    pub temp_unit: String,
    pub feels_like: String,
    pub icon: Icon,
    pub forecast: [ForecastEntry; 5],
    pub metrics: [MetricEntry; 10],
    pub alert: Option<AlertBanner>,
}

impl DashboardSnapshot {
    /// Placeholder conditions rendered until a live weather feed is wired
    /// in. Header strings come from the synced clock; with no time the
    /// dateline and update line degrade to the unavailable marker.
    pub fn placeholder(location: &str, lang: &str, units: Units, time: Option<CalendarTime>) -> Self {
        let (date_str, time_str) = match time {
            Some(t) => (
                datetime::format_date(&t, lang, units),
                datetime::format_update_time(&t, lang, units),
            ),
            None => (UNAVAILABLE.to_string(), UNAVAILABLE.to_string()),
        };

        let day = |offset: u8| match time {
            Some(t) => datetime::weekday_short(lang, (t.weekday + 1 + offset) % 7).to_string(),
            None => UNAVAILABLE.to_string(),
        };

        let forecast_icons = [
            Icon::Fog,
            Icon::RainWind,
            Icon::Snow,
            Icon::Thunderstorm,
            Icon::Windy,
        ];
        let highs = ["199", "199", "99", "0", "79"];
        let lows = ["198", "-22", "67", "0", "199"];
        let forecast = core::array::from_fn::<_, 5, _>(|i| ForecastEntry {
            icon: forecast_icons[i],
            day: day(i as u8),
            high: format!("{}\u{b0}", highs[i]),
            low: format!("{}\u{b0}", lows[i]),
        });

        let deg = match units {
            Units::Metric => "\u{b0}C",
            Units::Imperial => "\u{b0}F",
        };
        let speed = match units {
            Units::Metric => "km/h",
            Units::Imperial => "mph",
        };

        let metric = |icon, label: &'static str, value: String| MetricEntry { icon, label, value };
        let metrics = [
            metric(Icon::Sunrise, "Sunrise", "6:00".into()),
            metric(Icon::Wind, "Wind", format!("18 {speed}")),
            metric(Icon::UvIndex, "UV Index", "10 - High".into()),
            metric(Icon::AirQuality, "Air Quality", "Good".into()),
            metric(Icon::IndoorTemp, "Temperature", "78\u{b0}".into()),
            metric(Icon::Sunset, "Sunset", "18:00".into()),
            metric(Icon::Humidity, "Humidity", "12%".into()),
            metric(Icon::Pressure, "Pressure", "29.65 in".into()),
            metric(Icon::Visibility, "Visibility", "4000 ft".into()),
            metric(Icon::IndoorHumidity, "Humidity", "20%".into()),
        ];

        Self {
            location: location.to_string(),
            date_str,
            time_str,
            temperature: "88".to_string(),
            temp_unit: deg.to_string(),
            feels_like: "Feels Like 86\u{b0}".to_string(),
            icon: Icon::ClearDay,
            forecast,
            metrics,
            alert: None,
        }
    }
}
