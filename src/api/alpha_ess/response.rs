use serde::Deserialize;
use serde_json::Value;

use crate::{
    api::alpha_ess::{ApiError, Endpoint},
    core::Payload,
};

/// Vendor response envelope: `{code, msg, data}`.
#[derive(Deserialize)]
pub struct Response {
    /// Application code, `200` means success.
    code: i64,

    #[serde(rename = "msg", default)]
    message: Option<String>,

    #[serde(default)]
    data: Option<Value>,
}

impl Response {
    /// Unwrap the `data` object, leaving its contents untouched.
    pub fn into_data(self, endpoint: Endpoint) -> Result<Payload, ApiError> {
        if self.code != 200 {
            return Err(ApiError::Application {
                endpoint,
                code: self.code,
                message: self.message.unwrap_or_default(),
            });
        }
        match self.data {
            Some(Value::Object(data)) => Ok(data),
            Some(Value::Null) | None => {
                Err(ApiError::InvalidResponse { endpoint, reason: "no `data` in the response".into() })
            }
            Some(_) => Err(ApiError::InvalidResponse {
                endpoint,
                reason: "`data` is not an object".into(),
            }),
        }
    }
}
