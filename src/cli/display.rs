use clap::{Parser, ValueEnum};

use crate::{
    display::{DisplayOptions, SocThresholds},
    prelude::*,
    quantity::percent::Percent,
};

#[derive(Copy, Clone, Parser)]
pub struct DisplayArgs {
    /// Battery level at or below which it is rendered as low.
    #[clap(long = "soc-low", env = "SOC_THRESHOLD_LOW", default_value = "30")]
    soc_low: f64,

    /// Battery level at or above which it is rendered as high.
    #[clap(long = "soc-high", env = "SOC_THRESHOLD_HIGH", default_value = "75")]
    soc_high: f64,

    #[clap(long, env = "KW_DECIMAL_PLACES", default_value = "2")]
    kw_decimal_places: usize,

    #[clap(long, env = "KWH_DECIMAL_PLACES", default_value = "1")]
    kwh_decimal_places: usize,

    #[clap(long, env = "OUTPUT", value_enum, default_value = "table")]
    pub output: Output,
}

#[derive(Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum Output {
    /// Render the dashboard on every notification.
    Table,

    /// Print every notification as a JSON line.
    Json,
}

impl DisplayArgs {
    pub fn options(&self) -> Result<DisplayOptions> {
        ensure!(
            self.soc_low < self.soc_high,
            "the low battery threshold must be below the high one",
        );
        Ok(DisplayOptions::builder()
            .soc_thresholds(SocThresholds {
                low: Percent(self.soc_low),
                high: Percent(self.soc_high),
            })
            .kw_decimal_places(self.kw_decimal_places)
            .kwh_decimal_places(self.kwh_decimal_places)
            .build())
    }
}
