use std::{sync::Arc, time::Duration};

use bon::Builder;
use tokio::{sync::watch, task::JoinHandle, time::sleep};

use crate::{
    core::{Board, Category, InFlight, Source},
    prelude::*,
};

/// Repeating fetch of a single category.
///
/// The next attempt is armed only after the previous one settles, so fetches never overlap even
/// when the interval is shorter than the fetch latency.
#[derive(Builder)]
pub struct Scheduler {
    category: Category,
    interval: Duration,
    source: Arc<dyn Source>,
    board: Arc<Board>,
    in_flight: Arc<InFlight>,

    /// Flips to `true` on shutdown or reconfiguration.
    stopped: watch::Receiver<bool>,
}

/// Outcome of a single tick.
#[must_use]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Tick {
    /// Another fetch of the same category is still in flight.
    Skipped,

    Recorded,
    Failed,

    /// The scheduler was stopped while the fetch was in flight.
    Discarded,
}

impl Scheduler {
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    #[instrument(skip_all, fields(category = %self.category))]
    async fn run(mut self) {
        info!(interval = ?self.interval, "started");
        while !self.is_stopped() {
            let _ = self.tick().await;
            tokio::select! {
                () = sleep(self.interval) => {}
                result = self.stopped.changed() => {
                    if result.is_err() {
                        warn!("the stop signal is gone");
                        break;
                    }
                }
            }
        }
        info!("stopped");
    }

    /// Fetch once, unless a fetch of this category is already in flight.
    pub async fn tick(&self) -> Tick {
        let Some(_guard) = self.in_flight.try_acquire() else {
            debug!("still fetching, skipping");
            return Tick::Skipped;
        };
        let result = self.source.fetch(self.category).await;
        if self.is_stopped() {
            info!("stopped while fetching, discarding the result");
            return Tick::Discarded;
        }
        match result {
            Ok(payload) => {
                info!(n_fields = payload.len(), "fetched");
                self.board.record(self.category, payload);
                Tick::Recorded
            }
            Err(error) => {
                warn!(code = ?error.code(), "failed to fetch: {error:#}");
                self.board.report(self.category, &error);
                Tick::Failed
            }
        }
    }

    fn is_stopped(&self) -> bool {
        *self.stopped.borrow()
    }
}

#[cfg(test)]
pub mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use serde_json::json;
    use tokio::{
        sync::mpsc::{UnboundedReceiver, unbounded_channel},
        task::yield_now,
    };

    use super::*;
    use crate::{
        api::alpha_ess::{ApiError, Endpoint},
        core::{Notification, Payload},
    };

    /// Counts calls per category and answers after a delay.
    #[derive(Default)]
    pub struct FakeSource {
        pub realtime_calls: AtomicUsize,
        pub summary_calls: AtomicUsize,
        pub realtime_delay: Duration,
        pub summary_delay: Duration,
        pub fail_with_code: Option<i64>,
    }

    impl FakeSource {
        pub fn calls(&self, category: Category) -> usize {
            match category {
                Category::Realtime => self.realtime_calls.load(Ordering::SeqCst),
                Category::Summary => self.summary_calls.load(Ordering::SeqCst),
            }
        }
    }

    #[async_trait]
    impl Source for FakeSource {
        async fn fetch(&self, category: Category) -> Result<Payload, ApiError> {
            let (calls, delay) = match category {
                Category::Realtime => (&self.realtime_calls, self.realtime_delay),
                Category::Summary => (&self.summary_calls, self.summary_delay),
            };
            calls.fetch_add(1, Ordering::SeqCst);
            if !delay.is_zero() {
                sleep(delay).await;
            }
            if let Some(code) = self.fail_with_code {
                return Err(ApiError::Application {
                    endpoint: category.endpoint(),
                    code,
                    message: "sn not bound".into(),
                });
            }
            let serde_json::Value::Object(payload) = json!({"soc": 55, "pload": 1200, "ppv": 3000})
            else {
                unreachable!()
            };
            Ok(payload)
        }
    }

    struct Fixture {
        source: Arc<FakeSource>,
        board: Arc<Board>,
        inbox: UnboundedReceiver<Notification>,
        in_flight: Arc<InFlight>,
        stop: watch::Sender<bool>,
    }

    impl Fixture {
        fn new(source: FakeSource) -> Self {
            let (outbox, inbox) = unbounded_channel();
            Self {
                source: Arc::new(source),
                board: Arc::new(Board::new(outbox)),
                inbox,
                in_flight: Arc::default(),
                stop: watch::channel(false).0,
            }
        }

        fn scheduler(&self, category: Category, interval: Duration) -> Scheduler {
            Scheduler::builder()
                .category(category)
                .interval(interval)
                .source(self.source.clone())
                .board(self.board.clone())
                .in_flight(self.in_flight.clone())
                .stopped(self.stop.subscribe())
                .build()
        }

        fn drain(&mut self) -> Vec<Notification> {
            std::iter::from_fn(|| self.inbox.try_recv().ok()).collect()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn tick_is_skipped_while_in_flight() {
        let fixture = Fixture::new(FakeSource {
            realtime_delay: Duration::from_secs(5),
            ..FakeSource::default()
        });
        let scheduler = Arc::new(fixture.scheduler(Category::Realtime, Duration::from_secs(30)));

        let first = tokio::spawn({
            let scheduler = scheduler.clone();
            async move { scheduler.tick().await }
        });
        yield_now().await;
        assert!(fixture.in_flight.is_set());

        assert_eq!(scheduler.tick().await, Tick::Skipped);
        assert_eq!(first.await.unwrap(), Tick::Recorded);
        assert_eq!(fixture.source.calls(Category::Realtime), 1);
        assert!(!fixture.in_flight.is_set());

        assert_eq!(scheduler.tick().await, Tick::Recorded);
        assert_eq!(fixture.source.calls(Category::Realtime), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn flag_is_released_after_failure() {
        let fixture =
            Fixture::new(FakeSource { fail_with_code: Some(6002), ..FakeSource::default() });
        let scheduler = fixture.scheduler(Category::Summary, Duration::from_secs(60));

        assert_eq!(scheduler.tick().await, Tick::Failed);
        assert!(!fixture.in_flight.is_set());
        assert_eq!(scheduler.tick().await, Tick::Failed);
        assert_eq!(fixture.source.calls(Category::Summary), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn next_tick_is_armed_after_the_interval() {
        let fixture = Fixture::new(FakeSource::default());
        let _handle = fixture.scheduler(Category::Realtime, Duration::from_secs(30)).spawn();

        yield_now().await;
        assert_eq!(fixture.source.calls(Category::Realtime), 1);

        sleep(Duration::from_secs(31)).await;
        assert_eq!(fixture.source.calls(Category::Realtime), 2);

        sleep(Duration::from_secs(30)).await;
        assert_eq!(fixture.source.calls(Category::Realtime), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_fetch_delays_the_next_tick() {
        let fixture = Fixture::new(FakeSource {
            realtime_delay: Duration::from_secs(50),
            ..FakeSource::default()
        });
        let _handle = fixture.scheduler(Category::Realtime, Duration::from_secs(30)).spawn();

        // Fetches start at 0 s and 80 s.
        sleep(Duration::from_secs(79)).await;
        assert_eq!(fixture.source.calls(Category::Realtime), 1);
        sleep(Duration::from_secs(2)).await;
        assert_eq!(fixture.source.calls(Category::Realtime), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn categories_do_not_block_each_other() {
        let fixture = Fixture::new(FakeSource {
            realtime_delay: Duration::from_secs(1000),
            ..FakeSource::default()
        });
        let in_flight = Arc::new(InFlight::default());
        let _realtime = fixture.scheduler(Category::Realtime, Duration::from_secs(30)).spawn();
        let _summary = Scheduler {
            in_flight,
            ..fixture.scheduler(Category::Summary, Duration::from_secs(60))
        }
        .spawn();

        sleep(Duration::from_secs(121)).await;
        assert_eq!(fixture.source.calls(Category::Realtime), 1);
        assert_eq!(fixture.source.calls(Category::Summary), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_error_is_reported_once() {
        let mut fixture =
            Fixture::new(FakeSource { fail_with_code: Some(6002), ..FakeSource::default() });
        let _handle = fixture.scheduler(Category::Realtime, Duration::from_secs(30)).spawn();

        sleep(Duration::from_secs(61)).await;

        assert_eq!(fixture.source.calls(Category::Realtime), 3);
        assert_eq!(
            fixture.drain(),
            [Notification::ApiError {
                message: "API reports error (6002, getLastPowerData): sn not bound".into(),
            }],
        );
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_the_timer() {
        let fixture = Fixture::new(FakeSource::default());
        let handle = fixture.scheduler(Category::Realtime, Duration::from_secs(30)).spawn();
        yield_now().await;

        fixture.stop.send_replace(true);
        handle.await.unwrap();

        sleep(Duration::from_secs(300)).await;
        assert_eq!(fixture.source.calls(Category::Realtime), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn result_after_stop_is_discarded() {
        let mut fixture = Fixture::new(FakeSource {
            realtime_delay: Duration::from_secs(10),
            ..FakeSource::default()
        });
        let handle = fixture.scheduler(Category::Realtime, Duration::from_secs(30)).spawn();
        yield_now().await;
        assert!(fixture.in_flight.is_set());

        fixture.stop.send_replace(true);
        handle.await.unwrap();

        assert_eq!(fixture.source.calls(Category::Realtime), 1);
        assert!(fixture.drain().is_empty());
        assert!(!fixture.in_flight.is_set());
    }

    #[test]
    fn endpoint_per_category() {
        assert_eq!(Category::Realtime.endpoint(), Endpoint::LastPowerData);
        assert_eq!(Category::Summary.endpoint(), Endpoint::SumDataForCustomer);
    }
}
