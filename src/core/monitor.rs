use std::sync::Arc;

use reqwest::Url;
use tokio::sync::{
    mpsc::{UnboundedReceiver, unbounded_channel},
    watch,
};

use crate::{
    api::alpha_ess,
    core::{
        Board,
        Category,
        ConfigMessage,
        Configuration,
        Inbound,
        InFlight,
        Notification,
        Scheduler,
        Source,
    },
    prelude::*,
};

/// Data-acquisition service: owns both schedulers and everything they share.
pub struct Monitor {
    base_url: Url,
    board: Arc<Board>,
    realtime_in_flight: Arc<InFlight>,
    summary_in_flight: Arc<InFlight>,

    /// Stop signal of the running schedulers, if any.
    running: Option<watch::Sender<bool>>,

    is_stopped: bool,
}

impl Monitor {
    /// Create the monitor along with the receiving end of the display channel.
    pub fn new(base_url: Url) -> (Self, UnboundedReceiver<Notification>) {
        let (outbox, inbox) = unbounded_channel();
        let this = Self {
            base_url,
            board: Arc::new(Board::new(outbox)),
            realtime_in_flight: Arc::default(),
            summary_in_flight: Arc::default(),
            running: None,
            is_stopped: false,
        };
        (this, inbox)
    }

    pub fn handle(&mut self, inbound: Inbound) -> Result {
        match inbound {
            Inbound::Config(message) => self.configure(message),
        }
    }

    /// Accept the configuration and (re)start both schedulers with the vendor API as the source.
    #[instrument(skip_all)]
    pub fn configure(&mut self, message: ConfigMessage) -> Result {
        let configuration = Configuration::from(message);
        info!(
            realtime_interval = ?configuration.realtime_interval,
            summary_interval = ?configuration.summary_interval,
            "configuration accepted",
        );
        let api = alpha_ess::Api::new(self.base_url.clone(), configuration.credentials.clone())
            .context("failed to build the API client")?;
        self.start(&configuration, Arc::new(api));
        Ok(())
    }

    /// Start both schedulers, replacing the running ones.
    ///
    /// The replaced schedulers stop arming timers right away. Their in-flight flags are kept, so
    /// the new schedulers skip their first tick if the old fetch is still running.
    pub fn start(&mut self, configuration: &Configuration, source: Arc<dyn Source>) {
        if self.is_stopped {
            warn!("the monitor is stopped, ignoring the configuration");
            return;
        }
        self.halt();

        let (stop, stopped) = watch::channel(false);
        for category in Category::ALL {
            Scheduler::builder()
                .category(category)
                .interval(configuration.interval(category))
                .source(source.clone())
                .board(self.board.clone())
                .in_flight(self.in_flight(category).clone())
                .stopped(stopped.clone())
                .build()
                .spawn();
        }
        self.running = Some(stop);
    }

    /// Cancel the timers for good, a fetch in flight is left to finish and then discarded.
    #[instrument(skip_all)]
    pub fn stop(&mut self) {
        info!("stopping…");
        if self.realtime_in_flight.is_set() || self.summary_in_flight.is_set() {
            info!("a fetch is still in flight, its result will be discarded");
        }
        self.is_stopped = true;
        self.halt();
        self.realtime_in_flight.release();
        self.summary_in_flight.release();
    }

    fn halt(&mut self) {
        if let Some(stop) = self.running.take() {
            stop.send_replace(true);
        }
    }

    const fn in_flight(&self, category: Category) -> &Arc<InFlight> {
        match category {
            Category::Realtime => &self.realtime_in_flight,
            Category::Summary => &self.summary_in_flight,
        }
    }
}

impl Drop for Monitor {
    fn drop(&mut self) {
        self.halt();
    }
}
