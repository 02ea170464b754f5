/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 17/10/26
******************************************************************************/
use chrono::{DateTime, Utc};
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// Wall-clock span of one request, as recorded when timings are enabled
#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, PartialEq)]
pub struct TimingRecord {
    /// `"<METHOD> <path>"` of the timed request
    pub name: String,
    /// When the request was started
    pub start: DateTime<Utc>,
    /// When the request completed or failed
    pub end: DateTime<Utc>,
}

impl TimingRecord {
    /// Elapsed time between start and end
    #[must_use]
    pub fn elapsed(&self) -> chrono::Duration {
        self.end - self.start
    }
}

/// Append-only, shareable log of [`TimingRecord`]s
pub type Timings = Arc<Mutex<Vec<TimingRecord>>>;

/// Scope guard that appends a [`TimingRecord`] when dropped
///
/// The record is written whether the guarded request succeeded, failed or
/// was cancelled. A disabled guard records nothing.
pub struct TimingGuard {
    times: Timings,
    name: String,
    start: DateTime<Utc>,
    enabled: bool,
}

impl TimingGuard {
    /// Starts timing `name`; records into `times` only if `enabled`
    pub fn start(times: &Timings, enabled: bool, name: impl Into<String>) -> Self {
        Self {
            times: Arc::clone(times),
            name: name.into(),
            start: Utc::now(),
            enabled,
        }
    }
}

impl Drop for TimingGuard {
    fn drop(&mut self) {
        if !self.enabled {
            return;
        }
        let record = TimingRecord {
            name: std::mem::take(&mut self.name),
            start: self.start,
            end: Utc::now(),
        };
        if let Ok(mut times) = self.times.lock() {
            times.push(record);
        }
    }
}
