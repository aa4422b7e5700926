use serde::Serialize;

use crate::core::{RealtimeSnapshot, SummarySnapshot};

/// Latest known value of each category.
///
/// Each category is replaced wholesale and never touches the other one.
#[derive(Default)]
pub struct Cache {
    realtime: Option<RealtimeSnapshot>,
    summary: Option<SummarySnapshot>,
}

/// Combined snapshot handed to the display consumer.
#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DataResult {
    pub realtime: Option<RealtimeSnapshot>,
    pub summary: Option<SummarySnapshot>,
}

impl Cache {
    pub fn record_realtime(&mut self, snapshot: RealtimeSnapshot) -> Option<DataResult> {
        self.realtime = Some(snapshot);
        self.emission()
    }

    pub fn record_summary(&mut self, snapshot: SummarySnapshot) -> Option<DataResult> {
        self.summary = Some(snapshot);
        self.emission()
    }

    /// Combined snapshot, unless there is nothing to show yet.
    pub fn emission(&self) -> Option<DataResult> {
        if self.realtime.is_none() && self.summary.is_none() {
            return None;
        }
        Some(DataResult { realtime: self.realtime.clone(), summary: self.summary.clone() })
    }
}
