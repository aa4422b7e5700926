use clap::Parser;
use reqwest::Url;

use crate::api::alpha_ess::{Api, Credentials};

#[derive(Parser)]
pub struct AlphaEssApiArgs {
    #[clap(long = "app-id", env = "ALPHA_ESS_APP_ID", default_value = "")]
    pub app_id: String,

    #[clap(
        long = "app-secret",
        env = "ALPHA_ESS_APP_SECRET",
        hide_env_values = true,
        default_value = ""
    )]
    pub app_secret: String,

    /// System serial number, `sysSn`.
    #[clap(long, alias = "sys-sn", env = "ALPHA_ESS_SERIAL_NUMBER", default_value = "")]
    pub serial_number: String,

    #[clap(long = "base-url", env = "ALPHA_ESS_BASE_URL", default_value = Api::DEFAULT_BASE_URL)]
    pub base_url: Url,
}

impl AlphaEssApiArgs {
    pub fn credentials(&self) -> Credentials {
        Credentials::builder()
            .app_id(&self.app_id)
            .app_secret(&self.app_secret)
            .serial_number(&self.serial_number)
            .build()
    }
}
