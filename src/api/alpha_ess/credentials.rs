use std::fmt::{Debug, Formatter};

use bon::Builder;

use crate::api::alpha_ess::ApiError;

#[derive(Clone, Builder)]
pub struct Credentials {
    #[builder(into)]
    pub app_id: String,

    #[builder(into)]
    pub app_secret: String,

    /// System serial number, `sysSn`.
    #[builder(into)]
    pub serial_number: String,
}

impl Credentials {
    /// Fails on the first empty field, in the order the vendor documents them.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.app_id.is_empty() {
            Err(ApiError::Configuration("appId"))
        } else if self.app_secret.is_empty() {
            Err(ApiError::Configuration("appSecret"))
        } else if self.serial_number.is_empty() {
            Err(ApiError::Configuration("sysSn"))
        } else {
            Ok(())
        }
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("app_id", &self.app_id)
            .field("serial_number", &self.serial_number)
            .finish_non_exhaustive()
    }
}
