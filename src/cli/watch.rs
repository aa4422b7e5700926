use std::time::Duration;

use clap::Parser;

use crate::{
    cli::{
        alpha_ess::AlphaEssApiArgs,
        display::{DisplayArgs, Output},
    },
    core::{ConfigMessage, Inbound, Monitor},
    display::View,
    prelude::*,
};

#[derive(Parser)]
pub struct WatchArgs {
    #[clap(flatten)]
    alpha_ess_api: AlphaEssApiArgs,

    /// Polling interval of `getLastPowerData`, clamped to 30 seconds at least.
    #[clap(long, env = "REALTIME_INTERVAL", default_value = "60s")]
    realtime_interval: humantime::Duration,

    /// Polling interval of `getSumDataForCustomer`, clamped to 1 minute at least.
    #[clap(long, env = "SUMMARY_INTERVAL", default_value = "10min")]
    summary_interval: humantime::Duration,

    #[clap(flatten)]
    display: DisplayArgs,
}

impl WatchArgs {
    pub async fn run(self) -> Result {
        let mut view = View::new(self.display.options()?);
        let (mut monitor, mut inbox) = Monitor::new(self.alpha_ess_api.base_url.clone());
        monitor.handle(Inbound::Config(self.config_message()))?;

        loop {
            let notification = tokio::select! {
                notification = inbox.recv() => notification,
                result = tokio::signal::ctrl_c() => {
                    result.context("failed to listen for Ctrl-C")?;
                    info!("interrupted");
                    break;
                }
            };
            let Some(notification) = notification else {
                warn!("the notification channel is closed");
                break;
            };
            match self.display.output {
                Output::Json => println!("{}", serde_json::to_string(&notification)?),
                Output::Table => {
                    view.apply(notification);
                    println!("{}", view.render());
                }
            }
        }

        monitor.stop();
        Ok(())
    }

    fn config_message(&self) -> ConfigMessage {
        ConfigMessage::builder()
            .app_id(&self.alpha_ess_api.app_id)
            .app_secret(&self.alpha_ess_api.app_secret)
            .serial_number(&self.alpha_ess_api.serial_number)
            .realtime_interval_ms(millis(self.realtime_interval.into()))
            .summary_interval_ms(millis(self.summary_interval.into()))
            .build()
    }
}

fn millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}
