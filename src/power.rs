//! Deep-sleep entry. This is the only non-returning call in the firmware;
//! everything upstream hands over a finished sleep plan and never runs again
//! until the next wake resets the chip.

use log::info;

use crate::cycle::SleepPlan;

#[cfg(feature = "esp32")]
pub fn enter_deep_sleep(plan: &SleepPlan) -> ! {
    info!("Entering deep sleep for {} s", plan.duration.as_secs());
    unsafe {
        esp_idf_sys::esp_deep_sleep(plan.duration.as_micros() as u64);
    }
    unreachable!("deep sleep does not return");
}

/// Host builds have no sleep domain; exiting cleanly stands in for the
/// power-down so the cycle code upstream stays identical.
#[cfg(not(feature = "esp32"))]
pub fn enter_deep_sleep(plan: &SleepPlan) -> ! {
    info!(
        "Would enter deep sleep for {} s; exiting",
        plan.duration.as_secs()
    );
    std::process::exit(0);
}
