//! Time-based identity source for workout records.
//!
//! Ids are derived from the creation instant, which keeps them sortable by
//! creation time, plus a sequence number so that two records created within
//! the same millisecond still receive distinct ids.

use crate::WorkoutId;
use chrono::{DateTime, Utc};

/// Generates record ids unique within one store instance.
///
/// Uniqueness rules:
/// 1. Each id embeds the epoch-millisecond of the creation instant
/// 2. A monotonically increasing sequence breaks ties, including the case
///    where the wall clock moves backwards between calls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdSource {
    last_millis: i64,
    seq: u32,
}

impl IdSource {
    /// Create a fresh id source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate the next id for a record created at `now`.
    pub fn next(&mut self, now: DateTime<Utc>) -> WorkoutId {
        let millis = now.timestamp_millis();
        if millis <= self.last_millis {
            self.seq += 1;
        } else {
            self.last_millis = millis;
            self.seq = 0;
        }
        format!("{}-{}", self.last_millis, self.seq)
    }
}
