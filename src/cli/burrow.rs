use clap::{Parser, Subcommand};

use crate::{api::alpha_ess::Api, cli::alpha_ess::AlphaEssApiArgs, prelude::*};

#[derive(Parser)]
pub struct BurrowArgs {
    #[clap(flatten)]
    alpha_ess_api: AlphaEssApiArgs,

    #[command(subcommand)]
    command: BurrowCommand,
}

#[derive(Copy, Clone, Subcommand)]
pub enum BurrowCommand {
    /// Fetch `getLastPowerData` once.
    Realtime,

    /// Fetch `getSumDataForCustomer` once.
    Summary,
}

impl BurrowArgs {
    #[instrument(skip_all)]
    pub async fn run(self) -> Result {
        let api = Api::new(self.alpha_ess_api.base_url.clone(), self.alpha_ess_api.credentials())
            .context("failed to build the API client")?;
        let data = match self.command {
            BurrowCommand::Realtime => api.get_last_power_data().await?,
            BurrowCommand::Summary => api.get_sum_data_for_customer().await?,
        };
        info!(n_fields = data.len(), "gotcha");
        println!("{}", serde_json::to_string_pretty(&data)?);
        Ok(())
    }
}
