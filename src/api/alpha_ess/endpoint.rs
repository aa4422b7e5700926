use std::fmt::{Display, Formatter};

/// Fixed AlphaESS Open API endpoints.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Endpoint {
    /// Real-time power telemetry and state of charge.
    LastPowerData,

    /// Daily cumulative energy.
    SumDataForCustomer,
}

impl Endpoint {
    pub const fn path(self) -> &'static str {
        match self {
            Self::LastPowerData => "getLastPowerData",
            Self::SumDataForCustomer => "getSumDataForCustomer",
        }
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}
