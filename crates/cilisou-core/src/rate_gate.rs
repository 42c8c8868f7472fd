//! Per-client admission control with a fixed cooldown window
//!
//! Each client identity gets at most one admitted request per cooldown
//! interval. Rejected calls do not advance the stored timestamp, so a
//! burst of rejected retries never extends the window.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

/// Default minimum spacing between two admitted requests per client.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(10);

/// Per-client request-rate gate
///
/// Entries are kept for every client identity ever seen and are never
/// pruned; the map is owned by the gateway instance rather than living
/// in ambient process state.
pub struct RateGate {
    cooldown: Duration,
    last_admitted: Mutex<HashMap<String, Instant>>,
}

impl RateGate {
    /// Create a gate with the given cooldown
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_admitted: Mutex::new(HashMap::new()),
        }
    }

    /// Decide whether a request from `client_id` at `now` is admitted
    ///
    /// Admits when the client has never been seen or when at least the
    /// cooldown has elapsed since its last admitted request (boundary
    /// inclusive). On admission the stored timestamp moves to `now`.
    ///
    /// # Errors
    /// Returns the remaining wait until the client may retry.
    pub async fn admit(&self, client_id: &str, now: Instant) -> Result<(), Duration> {
        let mut last_admitted = self.last_admitted.lock().await;

        if let Some(last) = last_admitted.get(client_id) {
            let elapsed = now.saturating_duration_since(*last);
            if elapsed < self.cooldown {
                return Err(self.cooldown - elapsed);
            }
        }

        last_admitted.insert(client_id.to_string(), now);
        Ok(())
    }

    /// The configured cooldown between admitted requests
    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }
}

impl Default for RateGate {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN)
    }
}
