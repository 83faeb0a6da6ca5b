//! Clock source adapter. One bounded-wait sync per wake cycle; afterwards
//! the calendar time can be re-read cheaply (the sleep computation takes a
//! fresh read so elapsed processing time is accounted for).

use crate::error::AdapterError;

/// Calendar time for one wake cycle. Immutable once produced by `sync`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarTime {
    pub year: u16,
    /// 1–12.
    pub month: u8,
    /// 1–31.
    pub day: u8,
    /// 0 = Sunday.
    pub weekday: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl CalendarTime {
    /// Advance within the day, wrapping at midnight without touching the
    /// date. Good enough for the simulated clock and for tests; the real
    /// adapter always re-reads the RTC instead.
    pub fn plus_seconds(mut self, secs: u64) -> Self {
        let total = self.hour as u64 * 3600 + self.minute as u64 * 60 + self.second as u64 + secs;
        let total = total % 86_400;
        self.hour = (total / 3600) as u8;
        self.minute = ((total % 3600) / 60) as u8;
        self.second = (total % 60) as u8;
        self
    }
}

pub trait ClockSource {
    /// Synchronize against the time service, waiting at most the configured
    /// budget. Returns the calendar time used for the rest of the cycle.
    fn sync(&mut self) -> Result<CalendarTime, AdapterError>;

    /// Cheap local read after (or without) a successful sync. `None` when
    /// the clock has never been set.
    fn now(&mut self) -> Option<CalendarTime>;
}

// ── Simulated clock (host builds and tests) ─────────────────────────

pub struct SimClock {
    base: CalendarTime,
    reachable: bool,
    started: std::time::Instant,
}

impl SimClock {
    pub fn new(base: CalendarTime) -> Self {
        Self {
            base,
            reachable: true,
            started: std::time::Instant::now(),
        }
    }

    pub fn unreachable(base: CalendarTime) -> Self {
        Self {
            reachable: false,
            ..Self::new(base)
        }
    }
}

impl ClockSource for SimClock {
    fn sync(&mut self) -> Result<CalendarTime, AdapterError> {
        if self.reachable {
            Ok(self.base)
        } else {
            Err(AdapterError::TimeSyncTimeout(crate::config::NTP_TIMEOUT))
        }
    }

    fn now(&mut self) -> Option<CalendarTime> {
        self.reachable
            .then(|| self.base.plus_seconds(self.started.elapsed().as_secs()))
    }
}

// ── SNTP-backed clock (hardware builds) ─────────────────────────────

#[cfg(feature = "esp32")]
mod esp {
    use super::{CalendarTime, ClockSource};
    use crate::config;
    use crate::error::AdapterError;
    use crate::poll::poll_until;
    use esp_idf_svc::sntp::{EspSntp, OperatingMode, SntpConf, SyncMode, SyncStatus};
    use log::info;

    /// Clock below this is the unset epoch default, not real time.
    const EPOCH_GUARD: libc::time_t = 1_000_000_000;

    pub struct SntpClock {
        // Kept alive so the SNTP service keeps running until deep sleep.
        sntp: Option<EspSntp<'static>>,
    }

    impl SntpClock {
        pub fn new() -> Self {
            Self { sntp: None }
        }

        fn read_local() -> Option<CalendarTime> {
            let mut now: libc::time_t = 0;
            unsafe {
                libc::time(&mut now);
            }
            if now < EPOCH_GUARD {
                return None;
            }
            let mut tm: libc::tm = unsafe { std::mem::zeroed() };
            unsafe {
                libc::localtime_r(&now, &mut tm);
            }
            Some(CalendarTime {
                year: (tm.tm_year + 1900) as u16,
                month: (tm.tm_mon + 1) as u8,
                day: tm.tm_mday as u8,
                weekday: tm.tm_wday as u8,
                hour: tm.tm_hour as u8,
                minute: tm.tm_min as u8,
                second: tm.tm_sec as u8,
            })
        }
    }

    impl ClockSource for SntpClock {
        fn sync(&mut self) -> Result<CalendarTime, AdapterError> {
            info!("Setting timezone: {}", config::TIMEZONE);
            // Safety: single-threaded during cycle setup
            unsafe {
                std::env::set_var("TZ", config::TIMEZONE);
                libc::tzset();
            }

            let conf = SntpConf {
                servers: [config::NTP_SERVER_1, config::NTP_SERVER_2],
                sync_mode: SyncMode::Immediate,
                operating_mode: OperatingMode::Poll,
            };
            info!("Starting SNTP sync with {}", config::NTP_SERVER_1);
            let sntp = match EspSntp::new(&conf) {
                Ok(s) => s,
                Err(e) => {
                    log::warn!("SNTP client start failed: {}", e);
                    return Err(AdapterError::TimeSyncTimeout(config::NTP_TIMEOUT));
                }
            };

            let synced = poll_until(config::NTP_TIMEOUT, config::NTP_POLL_INTERVAL, || {
                (sntp.get_sync_status() == SyncStatus::Completed).then_some(())
            });
            self.sntp = Some(sntp);

            match synced.and_then(|_| Self::read_local()) {
                Some(t) => {
                    info!(
                        "SNTP time synchronized: {:04}-{:02}-{:02} {:02}:{:02}:{:02}",
                        t.year, t.month, t.day, t.hour, t.minute, t.second
                    );
                    Ok(t)
                }
                None => Err(AdapterError::TimeSyncTimeout(config::NTP_TIMEOUT)),
            }
        }

        fn now(&mut self) -> Option<CalendarTime> {
            Self::read_local()
        }
    }
}

#[cfg(feature = "esp32")]
pub use esp::SntpClock;

#[cfg(test)]
mod tests {
    use super::*;

    fn t(hour: u8, minute: u8, second: u8) -> CalendarTime {
        CalendarTime {
            year: 2019,
            month: 5,
            day: 31,
            weekday: 5,
            hour,
            minute,
            second,
        }
    }

    #[test]
    fn plus_seconds_carries_minutes_and_hours() {
        let advanced = t(13, 59, 30).plus_seconds(45);
        assert_eq!((advanced.hour, advanced.minute, advanced.second), (14, 0, 15));
    }

    #[test]
    fn plus_seconds_wraps_at_midnight() {
        let advanced = t(23, 59, 59).plus_seconds(2);
        assert_eq!((advanced.hour, advanced.minute, advanced.second), (0, 0, 1));
    }

    #[test]
    fn sim_clock_reports_sync_timeout() {
        let mut clock = SimClock::unreachable(t(12, 0, 0));
        assert!(matches!(
            clock.sync(),
            Err(crate::error::AdapterError::TimeSyncTimeout(_))
        ));
        assert_eq!(clock.now(), None);
    }
}
