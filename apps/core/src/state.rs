use crate::triage::MessageRouter;
use chrono::{DateTime, Utc};

/// Shared state handed to every request handler.
pub struct AppState {
    pub router: MessageRouter,
    started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(router: MessageRouter) -> Self {
        Self {
            router,
            started_at: Utc::now(),
        }
    }

    pub fn uptime_secs(&self) -> u64 {
        (Utc::now() - self.started_at).num_seconds().max(0) as u64
    }
}
