//! Locale-aware date and time strings for the header. Formatting happens
//! once per wake cycle, right after time sync; the layout engine only ever
//! sees finished strings.
//!
//! The metric branch writes 24-hour times and (for the languages that do)
//! puts the day before the month name; the imperial branch writes
//! `Www Mmm-DD-YYYY` dates and 12-hour clock times with an AM/PM suffix.

use crate::config::Units;
use crate::time_sync::CalendarTime;

struct Locale {
    weekdays: [&'static str; 7],
    weekdays_short: [&'static str; 7],
    months: [&'static str; 12],
    months_short: [&'static str; 12],
    updated: &'static str,
}

static EN: Locale = Locale {
    weekdays: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
    weekdays_short: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
    months: [
        "January", "February", "March", "April", "May", "June", "July", "August", "September",
        "October", "November", "December",
    ],
    months_short: [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ],
    updated: "Updated",
};

static DE: Locale = Locale {
    weekdays: ["So.", "Mo.", "Di.", "Mi.", "Do.", "Fr.", "Sa."],
    weekdays_short: ["So", "Mo", "Di", "Mi", "Do", "Fr", "Sa"],
    months: [
        "Januar", "Februar", "M\u{e4}rz", "April", "Mai", "Juni", "Juli", "August", "September",
        "Oktober", "November", "Dezember",
    ],
    months_short: [
        "Jan", "Feb", "M\u{e4}r", "Apr", "Mai", "Jun", "Jul", "Aug", "Sep", "Okt", "Nov", "Dez",
    ],
    updated: "Aktualisiert",
};

/// Unknown language codes fall back to English.
fn locale(lang: &str) -> &'static Locale {
    match lang {
        "de" => &DE,
        _ => &EN,
    }
}

/// Languages whose dateline reads day-first ("So., 23. Juni 2019").
fn day_before_month(lang: &str) -> bool {
    matches!(lang, "cz" | "de" | "pl" | "nl")
}

/// Abbreviated weekday name for forecast column headings.
pub fn weekday_short(lang: &str, weekday: u8) -> &'static str {
    locale(lang).weekdays_short[weekday as usize % 7]
}

pub fn format_date(t: &CalendarTime, lang: &str, units: Units) -> String {
    let l = locale(lang);
    let weekday = l.weekdays[t.weekday as usize % 7];
    let month_idx = (t.month as usize - 1) % 12;
    match units {
        Units::Imperial => format!(
            "{} {}-{:02}-{:04}",
            weekday, l.months_short[month_idx], t.day, t.year
        ),
        Units::Metric if day_before_month(lang) => format!(
            "{}, {:02}. {} {:04}",
            weekday, t.day, l.months[month_idx], t.year
        ),
        Units::Metric => format!(
            "{} {:02}-{}-{:04}",
            weekday, t.day, l.months[month_idx], t.year
        ),
    }
}

pub fn format_update_time(t: &CalendarTime, lang: &str, units: Units) -> String {
    let l = locale(lang);
    match units {
        Units::Imperial => {
            let (hour12, suffix) = match t.hour {
                0 => (12, "AM"),
                1..=11 => (t.hour, "AM"),
                12 => (12, "PM"),
                _ => (t.hour - 12, "PM"),
            };
            format!(
                "{} {:02}:{:02}:{:02} {}",
                l.updated, hour12, t.minute, t.second, suffix
            )
        }
        Units::Metric => format!(
            "{} {:02}:{:02}:{:02}",
            l.updated, t.hour, t.minute, t.second
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CalendarTime {
        // Sunday 2019-06-23, 14:05:49.
        CalendarTime {
            year: 2019,
            month: 6,
            day: 23,
            weekday: 0,
            hour: 14,
            minute: 5,
            second: 49,
        }
    }

    #[test]
    fn german_metric_reads_day_before_month() {
        let date = format_date(&sample(), "de", Units::Metric);
        assert_eq!(date, "So., 23. Juni 2019");
    }

    #[test]
    fn english_metric_reads_day_first_numeric() {
        let date = format_date(&sample(), "en", Units::Metric);
        assert_eq!(date, "Sun 23-June-2019");
    }

    #[test]
    fn english_imperial_reads_month_first_abbreviated() {
        let t = CalendarTime {
            year: 2019,
            month: 5,
            day: 31,
            weekday: 6,
            ..sample()
        };
        assert_eq!(format_date(&t, "en", Units::Imperial), "Sat May-31-2019");
    }

    #[test]
    fn imperial_time_uses_twelve_hour_clock() {
        assert_eq!(
            format_update_time(&sample(), "en", Units::Imperial),
            "Updated 02:05:49 PM"
        );
    }

    #[test]
    fn imperial_midnight_and_noon_edges() {
        let mut t = sample();
        t.hour = 0;
        assert!(format_update_time(&t, "en", Units::Imperial).ends_with("12:05:49 AM"));
        t.hour = 12;
        assert!(format_update_time(&t, "en", Units::Imperial).ends_with("12:05:49 PM"));
    }

    #[test]
    fn metric_time_is_twenty_four_hour() {
        assert_eq!(
            format_update_time(&sample(), "de", Units::Metric),
            "Aktualisiert 14:05:49"
        );
    }

    #[test]
    fn unknown_language_falls_back_to_english() {
        let date = format_date(&sample(), "xx", Units::Imperial);
        assert!(date.starts_with("Sun "));
        assert_eq!(weekday_short("xx", 2), "Tue");
    }
}
