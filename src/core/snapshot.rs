use derive_more::{Deref, From};
use serde::Serialize;
use serde_json::Value;

use crate::quantity::{energy::KilowattHours, percent::Percent, power::Watts};

/// Vendor `data` object, passed through as is.
pub type Payload = serde_json::Map<String, Value>;

/// Latest `getLastPowerData` payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deref, From)]
#[serde(transparent)]
pub struct RealtimeSnapshot(Payload);

impl RealtimeSnapshot {
    pub fn load_power(&self) -> Option<Watts> {
        number(&self.0, "pload").map(Watts)
    }

    pub fn pv_power(&self) -> Option<Watts> {
        number(&self.0, "ppv").map(Watts)
    }

    pub fn state_of_charge(&self) -> Option<Percent> {
        number(&self.0, "soc").map(Percent)
    }
}

/// Latest `getSumDataForCustomer` payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deref, From)]
#[serde(transparent)]
pub struct SummarySnapshot(Payload);

impl SummarySnapshot {
    /// Household consumption today.
    pub fn load_energy(&self) -> Option<KilowattHours> {
        number(&self.0, "eload").map(KilowattHours)
    }

    /// PV production today.
    pub fn pv_energy(&self) -> Option<KilowattHours> {
        number(&self.0, "epvtoday").map(KilowattHours)
    }

    /// Grid import today.
    pub fn grid_import_energy(&self) -> Option<KilowattHours> {
        number(&self.0, "einput").map(KilowattHours)
    }
}

/// The vendor is not consistent about numbers: some firmware sends them as strings.
fn number(payload: &Payload, key: &str) -> Option<f64> {
    match payload.get(key)? {
        Value::Number(number) => number.as_f64(),
        Value::String(string) => string.trim().parse().ok(),
        _ => None,
    }
}
