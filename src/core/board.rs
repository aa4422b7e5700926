use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc::UnboundedSender;

use crate::{
    api::alpha_ess::ApiError,
    core::{Cache, Category, ErrorReporter, Notification, Payload},
    prelude::*,
};

/// Shared state of both schedulers: the cache, the error reporter, and the outbox.
///
/// The lock is never held across an `.await`.
pub struct Board {
    state: Mutex<State>,
    outbox: UnboundedSender<Notification>,
}

#[derive(Default)]
struct State {
    cache: Cache,
    reporter: ErrorReporter,
}

impl Board {
    pub fn new(outbox: UnboundedSender<Notification>) -> Self {
        Self { state: Mutex::default(), outbox }
    }

    /// Store a successful fetch and notify the display consumer.
    #[instrument(skip_all, fields(category = %category))]
    pub fn record(&self, category: Category, payload: Payload) {
        let mut state = self.lock();
        if state.reporter.resolve(category) {
            info!("error cleared");
            self.emit(Notification::ApiErrorCleared);
        }
        let emission = match category {
            Category::Realtime => state.cache.record_realtime(payload.into()),
            Category::Summary => state.cache.record_summary(payload.into()),
        };
        if let Some(data_result) = emission {
            self.emit(Notification::DataResult(data_result));
        }
    }

    /// Forward the error unless it repeats the standing one.
    #[instrument(skip_all, fields(category = %category))]
    pub fn report(&self, category: Category, error: &ApiError) {
        match self.lock().reporter.report(category, error.to_string()) {
            Some(message) => self.emit(Notification::ApiError { message }),
            None => debug!("same error as before, skipping"),
        }
    }

    fn emit(&self, notification: Notification) {
        if self.outbox.send(notification).is_err() {
            debug!("nobody is listening");
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

    use super::*;
    use crate::{
        api::alpha_ess::Endpoint,
        core::{DataResult, RealtimeSnapshot, SummarySnapshot},
    };

    fn payload(value: serde_json::Value) -> Payload {
        let serde_json::Value::Object(payload) = value else { unreachable!() };
        payload
    }

    fn drain(receiver: &mut UnboundedReceiver<Notification>) -> Vec<Notification> {
        std::iter::from_fn(|| receiver.try_recv().ok()).collect()
    }

    fn sn_not_bound() -> ApiError {
        ApiError::Application {
            endpoint: Endpoint::LastPowerData,
            code: 6002,
            message: "sn not bound".into(),
        }
    }

    #[test]
    fn record_emits_combined_snapshot() {
        let (outbox, mut inbox) = unbounded_channel();
        let board = Board::new(outbox);

        board.record(Category::Realtime, payload(json!({"soc": 55, "pload": 1200, "ppv": 3000})));

        assert_eq!(
            drain(&mut inbox),
            [Notification::DataResult(DataResult {
                realtime: Some(RealtimeSnapshot::from(payload(
                    json!({"soc": 55, "pload": 1200, "ppv": 3000})
                ))),
                summary: None,
            })],
        );
    }

    #[test]
    fn repeated_error_is_emitted_once() {
        let (outbox, mut inbox) = unbounded_channel();
        let board = Board::new(outbox);

        for _ in 0..3 {
            board.report(Category::Realtime, &sn_not_bound());
        }

        assert_eq!(
            drain(&mut inbox),
            [Notification::ApiError {
                message: "API reports error (6002, getLastPowerData): sn not bound".into(),
            }],
        );
    }

    #[test]
    fn error_keeps_last_known_good_data() {
        let (outbox, mut inbox) = unbounded_channel();
        let board = Board::new(outbox);
        board.record(Category::Summary, payload(json!({"eload": 7.5})));
        board.report(Category::Realtime, &sn_not_bound());
        let _ = drain(&mut inbox);

        board.record(Category::Summary, payload(json!({"eload": 8.0})));

        assert_eq!(
            drain(&mut inbox),
            [Notification::DataResult(DataResult {
                realtime: None,
                summary: Some(SummarySnapshot::from(payload(json!({"eload": 8.0})))),
            })],
            "summary success must not clear the realtime error",
        );

        board.record(Category::Realtime, payload(json!({"soc": 60})));
        assert_eq!(drain(&mut inbox).first(), Some(&Notification::ApiErrorCleared));
    }

    #[test]
    fn failing_category_success_clears_the_error() {
        let (outbox, mut inbox) = unbounded_channel();
        let board = Board::new(outbox);
        board.report(Category::Realtime, &sn_not_bound());
        let _ = drain(&mut inbox);

        board.record(Category::Realtime, payload(json!({"soc": 60})));

        let notifications = drain(&mut inbox);
        assert_eq!(notifications.len(), 2);
        assert_eq!(notifications[0], Notification::ApiErrorCleared);
        assert!(matches!(notifications[1], Notification::DataResult(_)));

        board.report(Category::Realtime, &sn_not_bound());
        assert_eq!(drain(&mut inbox).len(), 1, "the same error is news again once cleared");
    }

    #[test]
    fn closed_outbox_is_fine() {
        let (outbox, inbox) = unbounded_channel();
        drop(inbox);
        Board::new(outbox).record(Category::Realtime, payload(json!({"soc": 1})));
    }
}
