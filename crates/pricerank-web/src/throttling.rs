use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use governor::clock::{Clock, DefaultClock};
use governor::state::direct::NotKeyed;
use governor::state::InMemoryState;
use governor::{Quota, RateLimiter};

use crate::ApiError;

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Process-wide request budget: `limit` requests per `window`, refilled
/// evenly across the window.
#[derive(Clone)]
pub struct RequestThrottle {
    limiter: Arc<DirectRateLimiter>,
    clock: DefaultClock,
}

impl RequestThrottle {
    pub fn new(window: Duration, limit: NonZeroU32) -> Self {
        Self {
            limiter: Arc::new(RateLimiter::direct(quota_from_window(window, limit))),
            clock: DefaultClock::default(),
        }
    }

    /// Takes one unit of budget, or returns how long until one is available.
    pub fn acquire(&self) -> Result<(), Duration> {
        self.limiter
            .check()
            .map_err(|not_until| not_until.wait_time_from(self.clock.now()))
    }
}

fn quota_from_window(window: Duration, limit: NonZeroU32) -> Quota {
    let seconds_per_cell = (window.as_secs_f64() / f64::from(limit.get())).max(0.001);
    let period = Duration::from_secs_f64(seconds_per_cell);

    Quota::with_period(period)
        .unwrap_or_else(|| Quota::per_second(limit))
        .allow_burst(limit)
}

/// Middleware rejecting requests once the shared budget is exhausted.
pub async fn enforce_rate_limit(
    State(throttle): State<RequestThrottle>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Err(retry_after) = throttle.acquire() {
        tracing::warn!(
            path = %request.uri().path(),
            retry_after_ms = retry_after.as_millis() as u64,
            "request quota exhausted"
        );
        return Err(ApiError::RateLimited { retry_after });
    }
    Ok(next.run(request).await)
}
