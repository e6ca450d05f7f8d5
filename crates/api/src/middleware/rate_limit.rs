//! Rate limiting middleware.
//!
//! Per-client-IP limiting. Data endpoints are read-heavy and cheap, but a
//! runaway dashboard poller can still saturate the pool, so each client IP
//! gets its own token bucket. Idle buckets are swept by a background task
//! (see `spawn_eviction_task`) so the map does not grow without bound.

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter as GovRateLimiter,
};
use std::{
    collections::HashMap,
    net::{IpAddr, SocketAddr},
    num::NonZeroU32,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use crate::app::AppState;
use crate::error::ApiError;

/// Type alias for the rate limiter used per client.
type ClientRateLimiter = GovRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// How often the background sweep runs.
const EVICTION_INTERVAL: Duration = Duration::from_secs(300);
/// Clients silent for this long lose their bucket.
const EVICTION_IDLE_FOR: Duration = Duration::from_secs(600);

struct ClientEntry {
    limiter: Arc<ClientRateLimiter>,
    last_seen: Instant,
}

/// Rate limiter state shared across all requests.
/// Uses a HashMap keyed by client IP with individual rate limiters.
pub struct RateLimiterState {
    clients: Mutex<HashMap<IpAddr, ClientEntry>>,
    rate_limit_per_minute: u32,
}

impl RateLimiterState {
    /// Create a new rate limiter state with the specified limit per minute.
    pub fn new(rate_limit_per_minute: u32) -> Self {
        Self {
            clients: Mutex::new(HashMap::new()),
            rate_limit_per_minute,
        }
    }

    /// Get or create a rate limiter for the given client IP, marking the
    /// client as seen.
    fn get_or_create_limiter(&self, client: IpAddr) -> Arc<ClientRateLimiter> {
        let mut clients = self.clients.lock().unwrap();
        let entry = clients.entry(client).or_insert_with(|| {
            let quota = Quota::per_minute(
                NonZeroU32::new(self.rate_limit_per_minute)
                    .unwrap_or(NonZeroU32::new(100).unwrap()),
            );
            ClientEntry {
                limiter: Arc::new(GovRateLimiter::direct(quota)),
                last_seen: Instant::now(),
            }
        });
        entry.last_seen = Instant::now();
        entry.limiter.clone()
    }

    /// Check if a request from the given client should be allowed.
    /// Returns Ok(()) if allowed, or Err with retry_after seconds if rate limited.
    pub fn check(&self, client: IpAddr) -> Result<(), u64> {
        let limiter = self.get_or_create_limiter(client);

        match limiter.check() {
            Ok(_) => Ok(()),
            Err(not_until) => {
                let wait_time = not_until.wait_time_from(governor::clock::Clock::now(
                    &governor::clock::DefaultClock::default(),
                ));
                // Minimum of 1 second so clients never hammer in a tight loop
                Err(wait_time.as_secs().max(1))
            }
        }
    }

    /// Drops buckets for clients not seen within `idle_for`. Returns how
    /// many entries were removed.
    pub fn evict_idle(&self, idle_for: Duration) -> usize {
        let mut clients = self.clients.lock().unwrap();
        let before = clients.len();
        let now = Instant::now();
        clients.retain(|_, entry| now.duration_since(entry.last_seen) < idle_for);
        before - clients.len()
    }

    fn active_clients(&self) -> usize {
        self.clients.lock().unwrap().len()
    }
}

impl std::fmt::Debug for RateLimiterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiterState")
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .field("active_clients", &self.active_clients())
            .finish()
    }
}

/// Spawns the periodic sweep that evicts idle client buckets. Runs for the
/// life of the process; must be called from within the runtime.
pub fn spawn_eviction_task(state: Arc<RateLimiterState>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(EVICTION_INTERVAL);
        interval.tick().await; // first tick fires immediately
        loop {
            interval.tick().await;
            let evicted = state.evict_idle(EVICTION_IDLE_FOR);
            if evicted > 0 {
                tracing::debug!(evicted, "evicted idle rate limit buckets");
            }
        }
    });
}

/// Middleware that applies rate limiting per client IP.
///
/// Requires the app to be served with `into_make_service_with_connect_info`
/// so the peer address is available in request extensions.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let Some(ref rate_limiter) = state.rate_limiter else {
        return next.run(req).await;
    };

    let client = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip());

    // No peer address (only possible in test harnesses without connect
    // info); let the request through rather than failing closed.
    let Some(client) = client else {
        return next.run(req).await;
    };

    if let Err(retry_after) = rate_limiter.check(client) {
        return rate_limited_response(retry_after);
    }

    next.run(req).await
}

/// 429 envelope with a Retry-After header.
fn rate_limited_response(retry_after: u64) -> Response {
    let mut response = ApiError::RateLimited.into_response();
    if let Ok(value) = retry_after.to_string().parse() {
        response.headers_mut().insert(header::RETRY_AFTER, value);
    }
    response
}
