//! Thin display consumer of the monitor notifications.

use bon::Builder;
use comfy_table::Color;
use derive_more::Display;

use crate::{
    core::{Notification, RealtimeSnapshot, SummarySnapshot},
    quantity::{energy::KilowattHours, percent::Percent},
    tables::build_dashboard_table,
};

#[derive(Copy, Clone, Builder)]
pub struct DisplayOptions {
    pub soc_thresholds: SocThresholds,

    #[builder(default = 2)]
    pub kw_decimal_places: usize,

    #[builder(default = 1)]
    pub kwh_decimal_places: usize,
}

#[derive(Copy, Clone)]
pub struct SocThresholds {
    pub low: Percent,
    pub high: Percent,
}

impl Default for SocThresholds {
    fn default() -> Self {
        Self { low: Percent(30.0), high: Percent(75.0) }
    }
}

impl SocThresholds {
    pub fn level(self, state_of_charge: Percent) -> SocLevel {
        if state_of_charge <= self.low {
            SocLevel::Low
        } else if state_of_charge >= self.high {
            SocLevel::High
        } else {
            SocLevel::Medium
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SocLevel {
    Low,
    Medium,
    High,
}

impl SocLevel {
    pub const fn color(self) -> Color {
        match self {
            Self::Low => Color::Red,
            Self::Medium => Color::Yellow,
            Self::High => Color::Green,
        }
    }
}

/// Today's consumption split into self-consumption and grid import.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LoadMix {
    pub self_consumption: f64,
    pub grid: f64,
}

impl LoadMix {
    pub fn from_summary(summary: &SummarySnapshot) -> Option<Self> {
        let load = summary.load_energy()?;
        if load <= KilowattHours::ZERO {
            return None;
        }
        let grid_import = summary.grid_import_energy().unwrap_or(KilowattHours::ZERO);
        let self_consumption = (load - grid_import).0.max(0.0);
        Some(Self { self_consumption: self_consumption / load.0, grid: grid_import.0 / load.0 })
    }
}

/// User-facing hint for a known error.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Display)]
pub enum Hint {
    #[display("Set `appId`, `appSecret`, and `sysSn`.")]
    Configuration,

    #[display("Invalid request parameters. Check `sysSn`.")]
    InvalidParameters,

    #[display("Invalid signature. Check `appSecret` and `appId`.")]
    InvalidSignature,

    #[display("Empty signature. Check `appSecret`.")]
    EmptySignature,

    #[display("Invalid timestamp. Check the system clock.")]
    InvalidTimestamp,

    #[display("`appId` is not linked to `sysSn`.")]
    AppIdNotLinked,

    #[display("`sysSn` is incorrect or not linked to your account.")]
    SerialNumberNotLinked,

    #[display("Too many API requests. Increase the update interval.")]
    RateLimited,

    #[display("Network error or timeout. Check your internet connection.")]
    Network,
}

impl Hint {
    /// Match the raw error text, first match wins.
    pub fn from_message(message: &str) -> Option<Self> {
        const PATTERNS: [(&str, Hint); 10] = [
            ("configuration", Hint::Configuration),
            ("6001", Hint::InvalidParameters),
            ("6007", Hint::InvalidSignature),
            ("6010", Hint::EmptySignature),
            ("6006", Hint::InvalidTimestamp),
            ("6005", Hint::AppIdNotLinked),
            ("6002", Hint::SerialNumberNotLinked),
            ("429", Hint::RateLimited),
            ("fetch", Hint::Network),
            ("network", Hint::Network),
        ];
        let message = message.to_lowercase();
        PATTERNS.into_iter().find(|(pattern, _)| message.contains(pattern)).map(|(_, hint)| hint)
    }
}

/// What the display consumer has learnt so far.
pub struct View {
    options: DisplayOptions,
    is_loading: bool,
    error: Option<String>,
    realtime: Option<RealtimeSnapshot>,
    summary: Option<SummarySnapshot>,
}

#[derive(Debug, PartialEq)]
pub enum Screen<'a> {
    Loading,

    /// Error banner over the last known data, if there is any.
    Error { message: &'a str, hint: Option<Hint>, data: Option<Data<'a>> },

    WaitingForData,
    Data(Data<'a>),
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Data<'a> {
    pub realtime: &'a RealtimeSnapshot,
    pub summary: &'a SummarySnapshot,
}

impl View {
    pub const fn new(options: DisplayOptions) -> Self {
        Self { options, is_loading: true, error: None, realtime: None, summary: None }
    }

    pub fn apply(&mut self, notification: Notification) {
        match notification {
            Notification::DataResult(data_result) => {
                self.is_loading = false;
                if let Some(realtime) = data_result.realtime {
                    self.realtime = Some(realtime);
                }
                if let Some(summary) = data_result.summary {
                    self.summary = Some(summary);
                }
            }
            Notification::ApiError { message } => {
                self.is_loading = false;
                self.error = Some(message);
            }
            Notification::ApiErrorCleared => {
                self.error = None;
            }
        }
    }

    pub fn screen(&self) -> Screen<'_> {
        let data = match (&self.realtime, &self.summary) {
            (Some(realtime), Some(summary)) => Some(Data { realtime, summary }),
            _ => None,
        };
        if let Some(message) = &self.error {
            return Screen::Error { message, hint: Hint::from_message(message), data };
        }
        if self.is_loading {
            return Screen::Loading;
        }
        data.map_or(Screen::WaitingForData, Screen::Data)
    }

    pub fn render(&self) -> String {
        match self.screen() {
            Screen::Loading => "Loading…".to_string(),
            Screen::WaitingForData => "Waiting for data…".to_string(),
            Screen::Error { message, hint, data } => {
                let mut rendered = format!("Failed to fetch data: {message}");
                if let Some(hint) = hint {
                    rendered.push_str(&format!("\nHint: {hint}"));
                }
                if let Some(data) = data {
                    rendered.push('\n');
                    rendered.push_str(&self.render_data(data));
                }
                rendered
            }
            Screen::Data(data) => self.render_data(data),
        }
    }

    fn render_data(&self, data: Data<'_>) -> String {
        build_dashboard_table(data.realtime, data.summary, &self.options).to_string()
    }
}
