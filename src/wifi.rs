//! Connectivity adapter. One association attempt per wake cycle with a hard
//! budget; on failure the cycle degrades instead of retrying, since the next
//! wake is never more than one cadence away.

use crate::error::AdapterError;

/// Link quality sampled while the radio is still associated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkQuality {
    pub rssi_dbm: i8,
}

pub trait Connectivity {
    /// Bring the radio up and associate, waiting at most the configured
    /// budget. Returns the link quality measured at association time.
    fn connect(&mut self) -> Result<LinkQuality, AdapterError>;

    /// Drop the association and power the radio down. Idempotent.
    fn disconnect(&mut self);
}

// ── Simulated link (host builds and tests) ──────────────────────────

pub struct SimWifi {
    reachable: bool,
}

impl SimWifi {
    pub fn new() -> Self {
        Self { reachable: true }
    }

    pub fn unreachable() -> Self {
        Self { reachable: false }
    }
}

impl Connectivity for SimWifi {
    fn connect(&mut self) -> Result<LinkQuality, AdapterError> {
        if self.reachable {
            Ok(LinkQuality { rssi_dbm: -55 })
        } else {
            Err(AdapterError::ConnectivityTimeout(
                crate::config::WIFI_TIMEOUT,
            ))
        }
    }

    fn disconnect(&mut self) {}
}

// ── Station-mode link (hardware builds) ─────────────────────────────

#[cfg(feature = "esp32")]
mod esp {
    use super::{Connectivity, LinkQuality};
    use crate::config;
    use crate::error::AdapterError;
    use crate::poll::poll_until;
    use anyhow::{Context, Result};
    use esp_idf_hal::modem::Modem;
    use esp_idf_svc::eventloop::EspSystemEventLoop;
    use esp_idf_svc::nvs::EspDefaultNvsPartition;
    use esp_idf_svc::wifi::{AuthMethod, ClientConfiguration, Configuration, EspWifi};
    use log::{info, warn};

    pub struct EspWifiLink {
        wifi: EspWifi<'static>,
    }

    impl EspWifiLink {
        pub fn new(modem: Modem, sysloop: EspSystemEventLoop) -> Result<Self> {
            let nvs = EspDefaultNvsPartition::take()?;
            let mut wifi = EspWifi::new(modem, sysloop, Some(nvs))?;

            let auth_method = if config::WIFI_PASS.is_empty() {
                AuthMethod::None
            } else {
                AuthMethod::WPA2Personal
            };
            let client = ClientConfiguration {
                ssid: config::WIFI_SSID
                    .try_into()
                    .map_err(|_| anyhow::anyhow!("SSID too long"))?,
                password: config::WIFI_PASS
                    .try_into()
                    .map_err(|_| anyhow::anyhow!("password too long"))?,
                auth_method,
                ..Default::default()
            };
            wifi.set_configuration(&Configuration::Client(client))
                .context("wifi configuration")?;
            Ok(Self { wifi })
        }

        /// RSSI of the currently associated AP, from the IDF station info.
        fn rssi(&self) -> Option<i8> {
            let mut ap_info: esp_idf_sys::wifi_ap_record_t = unsafe { core::mem::zeroed() };
            let rc = unsafe { esp_idf_sys::esp_wifi_sta_get_ap_info(&mut ap_info) };
            (rc == esp_idf_sys::ESP_OK).then_some(ap_info.rssi)
        }
    }

    impl Connectivity for EspWifiLink {
        fn connect(&mut self) -> Result<LinkQuality, AdapterError> {
            info!("Connecting to SSID '{}'", config::WIFI_SSID);
            if let Err(e) = self.wifi.start().and_then(|_| self.wifi.connect()) {
                warn!("WiFi association start failed: {}", e);
                return Err(AdapterError::ConnectivityTimeout(config::WIFI_TIMEOUT));
            }

            let up = poll_until(config::WIFI_TIMEOUT, config::WIFI_POLL_INTERVAL, || {
                self.wifi
                    .is_up()
                    .unwrap_or(false)
                    .then_some(())
            });
            if up.is_none() {
                self.disconnect();
                return Err(AdapterError::ConnectivityTimeout(config::WIFI_TIMEOUT));
            }

            let rssi_dbm = self.rssi().unwrap_or(i8::MIN);
            info!("WiFi associated, RSSI {} dBm", rssi_dbm);
            Ok(LinkQuality { rssi_dbm })
        }

        fn disconnect(&mut self) {
            // Radio off before the display starts drawing current.
            self.wifi.disconnect().ok();
            self.wifi.stop().ok();
            info!("WiFi stopped");
        }
    }
}

#[cfg(feature = "esp32")]
pub use esp::EspWifiLink;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sim_link_reports_quality() {
        let mut link = SimWifi::new();
        let q = link.connect().unwrap();
        assert!(q.rssi_dbm < 0);
        link.disconnect();
    }

    #[test]
    fn unreachable_link_times_out() {
        let mut link = SimWifi::unreachable();
        assert!(matches!(
            link.connect(),
            Err(AdapterError::ConnectivityTimeout(_))
        ));
    }
}
