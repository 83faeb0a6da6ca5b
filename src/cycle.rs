//! Wake-cycle orchestrator. Runs the fixed step sequence (connect, sync,
//! disconnect, compose, commit, plan sleep) and guarantees a sleep plan
//! comes out of every cycle no matter which steps fail along the way.

use std::time::{Duration, Instant};

use embedded_graphics::geometry::Size;
use log::{info, warn};

use crate::config::{self, Units};
use crate::dashboard::DashboardSnapshot;
use crate::framebuffer::FrameBuffer;
use crate::layout::layout;
use crate::render::{execute, Panel};
use crate::time_sync::ClockSource;
use crate::wifi::Connectivity;

/// Everything one wake cycle needs to know, resolved once at wake instead
/// of read piecemeal from configuration mid-flight.
#[derive(Debug, Clone)]
pub struct CycleContext {
    pub location: &'static str,
    pub lang: &'static str,
    pub units: Units,
    pub cadence_min: u32,
    pub canvas: Size,
}

impl CycleContext {
    pub fn from_config() -> Self {
        Self {
            location: config::LOCATION,
            lang: config::LANG,
            units: config::UNITS,
            cadence_min: config::SLEEP_CADENCE_MIN,
            canvas: Size::new(config::DISP_WIDTH, config::DISP_HEIGHT),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Rendered,
    SkippedRender,
}

/// How long to stay in deep sleep before the next wake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SleepPlan {
    pub duration: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    pub outcome: CycleOutcome,
    pub sleep: SleepPlan,
}

/// Seconds until one second past the next cadence boundary. The extra
/// second keeps a fast wake from landing on the same boundary twice.
pub fn compute_sleep_duration(cadence_min: u32, minute: u8, second: u8) -> Duration {
    let cadence = cadence_min.max(1) as i64;
    let into_period = (minute as i64 % cadence) * 60 + second as i64;
    let secs = (cadence * 60 - into_period + 1).max(0);
    Duration::from_secs(secs as u64)
}

/// Run one complete wake cycle. Every step failure is downgraded to a log
/// line and a degraded frame (or no frame); the returned plan is always
/// valid so the caller can unconditionally enter deep sleep.
pub fn run_cycle<N, C, P>(
    ctx: &CycleContext,
    net: &mut N,
    clock: &mut C,
    panel: &mut P,
) -> CycleReport
where
    N: Connectivity,
    C: ClockSource,
    P: Panel,
{
    let woke = Instant::now();

    let outcome = match net.connect() {
        Err(e) => {
            warn!("{e}; skipping render this cycle");
            CycleOutcome::SkippedRender
        }
        Ok(link) => {
            // Sync while the link is up, then drop the radio before the
            // panel starts drawing current.
            let time = match clock.sync() {
                Ok(t) => Some(t),
                Err(e) => {
                    warn!("{e}; header degrades to markers");
                    None
                }
            };
            info!("Link RSSI {} dBm", link.rssi_dbm);
            net.disconnect();

            let snapshot =
                DashboardSnapshot::placeholder(ctx.location, ctx.lang, ctx.units, time);
            let primitives = layout(&snapshot, ctx.canvas);
            let mut fb = FrameBuffer::new(ctx.canvas.width, ctx.canvas.height);
            execute(&primitives, &mut fb);

            let committed = panel
                .init()
                .and_then(|_| panel.commit(&fb, true))
                .and_then(|_| panel.power_off());
            if let Err(e) = committed {
                warn!("display: {e:#}");
            }
            CycleOutcome::Rendered
        }
    };

    // Fresh clock read so time spent in the cycle is accounted for. With
    // no usable time at all, sleep a full cadence blind.
    let sleep = match clock.now() {
        Some(t) => SleepPlan {
            duration: compute_sleep_duration(ctx.cadence_min, t.minute, t.second),
        },
        None => SleepPlan {
            duration: Duration::from_secs(ctx.cadence_min.max(1) as u64 * 60),
        },
    };

    info!(
        "Awake for {:.3} s, sleeping for {} s",
        woke.elapsed().as_secs_f32(),
        sleep.duration.as_secs()
    );
    CycleReport { outcome, sleep }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdapterError;
    use crate::time_sync::{CalendarTime, SimClock};
    use crate::wifi::{LinkQuality, SimWifi};
    use std::cell::RefCell;
    use std::rc::Rc;

    type Events = Rc<RefCell<Vec<&'static str>>>;

    struct RecordingPanel {
        events: Events,
    }

    impl Panel for RecordingPanel {
        fn init(&mut self) -> anyhow::Result<()> {
            self.events.borrow_mut().push("init");
            Ok(())
        }
        fn commit(&mut self, _frame: &FrameBuffer, _full: bool) -> anyhow::Result<()> {
            self.events.borrow_mut().push("commit");
            Ok(())
        }
        fn power_off(&mut self) -> anyhow::Result<()> {
            self.events.borrow_mut().push("power_off");
            Ok(())
        }
    }

    struct RecordingWifi {
        events: Events,
        reachable: bool,
    }

    impl Connectivity for RecordingWifi {
        fn connect(&mut self) -> Result<LinkQuality, AdapterError> {
            self.events.borrow_mut().push("connect");
            if self.reachable {
                Ok(LinkQuality { rssi_dbm: -60 })
            } else {
                Err(AdapterError::ConnectivityTimeout(config::WIFI_TIMEOUT))
            }
        }
        fn disconnect(&mut self) {
            self.events.borrow_mut().push("disconnect");
        }
    }

    fn at(minute: u8, second: u8) -> CalendarTime {
        CalendarTime {
            year: 2019,
            month: 5,
            day: 31,
            weekday: 5,
            hour: 14,
            minute,
            second,
        }
    }

    fn ctx() -> CycleContext {
        CycleContext {
            location: "Tucson, Arizona",
            lang: "en",
            units: Units::Imperial,
            cadence_min: 30,
            canvas: Size::new(800, 480),
        }
    }

    #[test]
    fn sleep_duration_example() {
        // 30-minute cadence at xx:47:10 sleeps 771 seconds to xx:00:01.
        assert_eq!(compute_sleep_duration(30, 47, 10).as_secs(), 771);
    }

    #[test]
    fn sleep_lands_one_second_past_a_cadence_boundary() {
        for cadence in [5u32, 15, 30, 60] {
            for minute in 0..60u8 {
                for second in [0u8, 1, 29, 59] {
                    let dur = compute_sleep_duration(cadence, minute, second).as_secs() as i64;
                    let into = (minute as i64 % cadence as i64) * 60 + second as i64;
                    assert_eq!((into + dur - 1) % (cadence as i64 * 60), 0);
                    assert!(dur > 0);
                }
            }
        }
    }

    #[test]
    fn zero_cadence_is_clamped() {
        assert!(compute_sleep_duration(0, 10, 0).as_secs() > 0);
    }

    #[test]
    fn full_cycle_runs_steps_in_order() {
        let events: Events = Rc::default();
        let mut net = RecordingWifi {
            events: events.clone(),
            reachable: true,
        };
        let mut clock = SimClock::new(at(47, 10));
        let mut panel = RecordingPanel {
            events: events.clone(),
        };

        let report = run_cycle(&ctx(), &mut net, &mut clock, &mut panel);
        assert_eq!(report.outcome, CycleOutcome::Rendered);
        assert_eq!(
            *events.borrow(),
            ["connect", "disconnect", "init", "commit", "power_off"]
        );
        // Sleep computed from the synced clock, give or take processing time.
        let secs = report.sleep.duration.as_secs();
        assert!((769..=771).contains(&secs));
    }

    #[test]
    fn connect_failure_skips_render_but_still_plans_sleep() {
        let events: Events = Rc::default();
        let mut net = RecordingWifi {
            events: events.clone(),
            reachable: false,
        };
        let mut clock = SimClock::new(at(12, 0));
        let mut panel = RecordingPanel {
            events: events.clone(),
        };

        let report = run_cycle(&ctx(), &mut net, &mut clock, &mut panel);
        assert_eq!(report.outcome, CycleOutcome::SkippedRender);
        // The panel is never touched and the radio is not re-dropped.
        assert_eq!(*events.borrow(), ["connect"]);
        assert!(report.sleep.duration.as_secs() > 0);
    }

    #[test]
    fn sync_failure_still_renders() {
        let events: Events = Rc::default();
        let mut net = RecordingWifi {
            events: events.clone(),
            reachable: true,
        };
        let mut clock = SimClock::unreachable(at(0, 0));
        let mut panel = RecordingPanel {
            events: events.clone(),
        };

        let report = run_cycle(&ctx(), &mut net, &mut clock, &mut panel);
        assert_eq!(report.outcome, CycleOutcome::Rendered);
        assert!(events.borrow().contains(&"commit"));
        // No clock at all falls back to a blind full-cadence sleep.
        assert_eq!(report.sleep.duration.as_secs(), 30 * 60);
    }

    #[test]
    fn sim_wifi_degrades_the_same_way() {
        let events: Events = Rc::default();
        let mut net = SimWifi::unreachable();
        let mut clock = SimClock::new(at(5, 30));
        let mut panel = RecordingPanel {
            events: events.clone(),
        };
        let report = run_cycle(&ctx(), &mut net, &mut clock, &mut panel);
        assert_eq!(report.outcome, CycleOutcome::SkippedRender);
        assert!(events.borrow().is_empty());
    }
}
