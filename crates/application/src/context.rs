//! Per-call request context.

use chrono::{DateTime, Utc};
use domain::auth::claims::Claims;

/// Context handed to every operation by the dispatch layer.
///
/// `now` is injected rather than read from a wall clock inside business
/// logic, so every timestamp an operation assigns is deterministic and
/// testable. Cancellation rides on the async runtime: dropping an
/// operation's future aborts the underlying storage call.
#[derive(Debug, Clone)]
pub struct GenericRequest {
    /// Verified identity and roles of the caller.
    pub claims: Claims,
    /// The moment this request entered the system.
    pub now: DateTime<Utc>,
}

impl GenericRequest {
    pub fn new(claims: Claims, now: DateTime<Utc>) -> Self {
        Self { claims, now }
    }
}
