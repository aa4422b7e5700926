mod credentials;
mod endpoint;
mod error;
mod response;
mod signature;

use std::time::Duration;

use reqwest::{Client, Url};

pub use self::{
    credentials::Credentials,
    endpoint::Endpoint,
    error::ApiError,
    signature::Signature,
};
use crate::{api::alpha_ess::response::Response, core::Payload, prelude::*};

/// [AlphaESS Open API](https://open.alphaess.com) client.
pub struct Api {
    client: Client,
    base_url: Url,
    credentials: Credentials,
}

impl Api {
    pub const DEFAULT_BASE_URL: &'static str = "https://openapi.alphaess.com/api/";

    pub fn new(base_url: Url, credentials: Credentials) -> Result<Self> {
        let client = Client::builder()
            .user_agent("alphaess-monitor")
            .timeout(Duration::from_secs(20))
            .build()?;
        Ok(Self { client, base_url, credentials })
    }

    pub async fn get_last_power_data(&self) -> Result<Payload, ApiError> {
        self.get(Endpoint::LastPowerData, &[]).await
    }

    pub async fn get_sum_data_for_customer(&self) -> Result<Payload, ApiError> {
        self.get(Endpoint::SumDataForCustomer, &[]).await
    }

    /// Perform a signed `GET` and unwrap the envelope.
    ///
    /// `sysSn` defaults to the configured serial number unless the caller passes one.
    #[instrument(skip_all, fields(endpoint = %endpoint))]
    pub async fn get(
        &self,
        endpoint: Endpoint,
        query: &[(&str, &str)],
    ) -> Result<Payload, ApiError> {
        self.credentials.validate()?;

        let mut query = query.to_vec();
        if !query.iter().any(|(key, _)| *key == "sysSn") {
            query.push(("sysSn", self.credentials.serial_number.as_str()));
        }
        let signature = Signature::now(&self.credentials.app_id, &self.credentials.app_secret);
        let url = format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), endpoint.path());

        debug!(serial_number = %self.credentials.serial_number, "fetching…");
        let response = self
            .client
            .get(url)
            .header("appId", &self.credentials.app_id)
            .header("timeStamp", signature.timestamp)
            .header("sign", signature.sign)
            .query(&query)
            .send()
            .await
            .map_err(|source| ApiError::Transport { endpoint, source })?;

        let status = response.status();
        let body =
            response.text().await.map_err(|source| ApiError::Transport { endpoint, source })?;
        if !status.is_success() {
            warn!(%status, body = %body, "request failed");
            let body = if body.is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                body
            };
            return Err(ApiError::HttpStatus { endpoint, status, body });
        }

        let data = serde_json::from_str::<Response>(&body)
            .map_err(|error| ApiError::InvalidResponse { endpoint, reason: error.to_string() })?
            .into_data(endpoint)?;
        debug!(n_fields = data.len(), "call succeeded");
        Ok(data)
    }
}
