use std::time::Duration;

use bon::Builder;
use serde::Deserialize;

use crate::{api::alpha_ess::Credentials, core::Category};

/// `CONFIG` payload as sent by the host.
///
/// Display options travel in the same message and are ignored here.
#[derive(Clone, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMessage {
    #[serde(default)]
    #[builder(into)]
    pub app_id: String,

    #[serde(default)]
    #[builder(into)]
    pub app_secret: String,

    #[serde(default, rename = "sysSn")]
    #[builder(into)]
    pub serial_number: String,

    /// JavaScript number, so it may come negative or fractional.
    #[serde(default, alias = "updateIntervalRealtime")]
    pub realtime_interval_ms: Option<f64>,

    #[serde(default, alias = "updateIntervalSummary")]
    pub summary_interval_ms: Option<f64>,
}

/// Accepted configuration, immutable from here on.
#[must_use]
#[derive(Clone, Debug)]
pub struct Configuration {
    pub credentials: Credentials,
    pub realtime_interval: Duration,
    pub summary_interval: Duration,
}

impl Configuration {
    pub const DEFAULT_REALTIME_INTERVAL: Duration = Duration::from_secs(60);
    pub const DEFAULT_SUMMARY_INTERVAL: Duration = Duration::from_secs(600);
    pub const MIN_REALTIME_INTERVAL: Duration = Duration::from_secs(30);
    pub const MIN_SUMMARY_INTERVAL: Duration = Duration::from_secs(60);

    pub const fn interval(&self, category: Category) -> Duration {
        match category {
            Category::Realtime => self.realtime_interval,
            Category::Summary => self.summary_interval,
        }
    }
}

impl From<ConfigMessage> for Configuration {
    /// Apply the defaults and clamp the intervals to the floors.
    ///
    /// Credentials are not checked here: an incomplete configuration surfaces as an API error
    /// on every tick.
    fn from(message: ConfigMessage) -> Self {
        let realtime_interval = message
            .realtime_interval_ms
            .map_or(Self::DEFAULT_REALTIME_INTERVAL, from_millis)
            .max(Self::MIN_REALTIME_INTERVAL);
        let summary_interval = message
            .summary_interval_ms
            .map_or(Self::DEFAULT_SUMMARY_INTERVAL, from_millis)
            .max(Self::MIN_SUMMARY_INTERVAL);
        Self {
            credentials: Credentials {
                app_id: message.app_id,
                app_secret: message.app_secret,
                serial_number: message.serial_number,
            },
            realtime_interval,
            summary_interval,
        }
    }
}

/// Negative values saturate to zero, fractions are truncated.
fn from_millis(millis: f64) -> Duration {
    Duration::try_from_secs_f64(millis.max(0.0).trunc() / 1000.0).unwrap_or(Duration::MAX)
}
