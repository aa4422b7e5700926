use derive_more::Display;

use crate::api::alpha_ess::Endpoint;

/// Data class, each polled on its own cadence.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Display)]
pub enum Category {
    /// Instantaneous power and state of charge.
    #[display("realtime")]
    Realtime,

    /// Daily cumulative energy.
    #[display("summary")]
    Summary,
}

impl Category {
    pub const ALL: [Self; 2] = [Self::Realtime, Self::Summary];

    pub const fn endpoint(self) -> Endpoint {
        match self {
            Self::Realtime => Endpoint::LastPowerData,
            Self::Summary => Endpoint::SumDataForCustomer,
        }
    }
}
