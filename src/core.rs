mod board;
mod cache;
mod category;
mod config;
mod error_reporter;
mod in_flight;
mod monitor;
mod notification;
mod scheduler;
mod snapshot;
mod source;

pub use self::{
    board::Board,
    cache::{Cache, DataResult},
    category::Category,
    config::{ConfigMessage, Configuration},
    error_reporter::ErrorReporter,
    in_flight::InFlight,
    monitor::Monitor,
    notification::{Inbound, Notification},
    scheduler::Scheduler,
    snapshot::{Payload, RealtimeSnapshot, SummarySnapshot},
    source::Source,
};
