use moka::future::Cache;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

type Window = Arc<Mutex<VecDeque<Instant>>>;

/// Outcome of a rate-limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed { remaining: u32 },
    Limited { retry_after: Duration },
}

/// Per-client sliding-window request limiter
///
/// Idle clients are evicted once their window has passed, so the map
/// never outgrows the set of recently active clients.
pub struct RateLimiter {
    windows: Cache<String, Window>,
    max_requests: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        let windows = moka::future::CacheBuilder::new(100_000)
            .time_to_idle(window)
            .build();

        Self {
            windows,
            max_requests: max_requests.max(1),
            window,
        }
    }

    /// Record a request from `client` and decide whether to serve it
    pub async fn check(&self, client: &str) -> RateLimitDecision {
        let window = self
            .windows
            .get_with(client.to_string(), async { Arc::new(Mutex::new(VecDeque::new())) })
            .await;

        let now = Instant::now();
        let mut hits = window.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        while hits
            .front()
            .is_some_and(|oldest| now.duration_since(*oldest) >= self.window)
        {
            hits.pop_front();
        }

        if hits.len() as u32 >= self.max_requests {
            let retry_after = hits
                .front()
                .map(|oldest| self.window.saturating_sub(now.duration_since(*oldest)))
                .unwrap_or(self.window);
            tracing::warn!("Rate limit exceeded for {}", client);
            return RateLimitDecision::Limited { retry_after };
        }

        hits.push_back(now);
        RateLimitDecision::Allowed {
            remaining: self.max_requests - hits.len() as u32,
        }
    }
}
