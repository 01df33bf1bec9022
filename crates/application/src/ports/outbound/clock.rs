//! Clock port - Interface for time operations.

use chrono::{DateTime, Utc};

/// Port for getting the current time.
///
/// Only the dispatch layer reads the clock, to stamp the per-request
/// context; use cases receive that value and never consult a clock.
pub trait Clock: Send + Sync {
    /// Get the current instant.
    fn now(&self) -> DateTime<Utc>;
}
