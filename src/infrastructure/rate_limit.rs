//! Fixed-window request limiting per client IP

use axum::{
    Json,
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const RATE_LIMIT_MESSAGE: &str = "Too many requests from this IP, please try again later.";

/// Above this many tracked clients, expired windows are dropped on the next check
const PRUNE_THRESHOLD: usize = 10_000;

/// Rate limit configuration
#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    /// Maximum requests per client within one window
    pub max_requests: u32,
    /// Window length
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window: Duration::from_secs(15 * 60),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed { remaining: u32, reset_after: Duration },
    Rejected { reset_after: Duration },
}

#[derive(Debug)]
struct Window {
    count: u32,
    started: Instant,
}

/// Shared limiter; clones share the same counters
#[derive(Clone)]
pub struct RateLimiter {
    config: RateLimitConfig,
    windows: Arc<DashMap<String, Window>>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: Arc::new(DashMap::new()),
        }
    }

    pub fn config(&self) -> RateLimitConfig {
        self.config
    }

    /// Count one request for `key` and decide whether it may proceed
    pub fn check(&self, key: &str) -> RateLimitDecision {
        self.check_at(key, Instant::now())
    }

    fn check_at(&self, key: &str, now: Instant) -> RateLimitDecision {
        if self.windows.len() > PRUNE_THRESHOLD {
            let window = self.config.window;
            self.windows
                .retain(|_, w| now.saturating_duration_since(w.started) < window);
        }

        let mut entry = self.windows.entry(key.to_string()).or_insert(Window {
            count: 0,
            started: now,
        });

        // Reset if in new window
        if now.saturating_duration_since(entry.started) >= self.config.window {
            entry.count = 0;
            entry.started = now;
        }

        let reset_after = self
            .config
            .window
            .saturating_sub(now.saturating_duration_since(entry.started));

        if entry.count >= self.config.max_requests {
            return RateLimitDecision::Rejected { reset_after };
        }

        entry.count += 1;
        RateLimitDecision::Allowed {
            remaining: self.config.max_requests - entry.count,
            reset_after,
        }
    }
}

fn client_key(req: &Request) -> String {
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn write_headers(headers: &mut HeaderMap, limit: u32, remaining: u32, reset_after: Duration) {
    headers.insert("ratelimit-limit", HeaderValue::from(limit));
    headers.insert("ratelimit-remaining", HeaderValue::from(remaining));
    // Round up so clients never retry a fraction of a second early
    let reset_secs = reset_after.as_secs() + u64::from(reset_after.subsec_nanos() > 0);
    headers.insert("ratelimit-reset", HeaderValue::from(reset_secs));
}

/// Axum middleware rejecting requests over the per-client budget
pub async fn limit_requests(
    State(limiter): State<RateLimiter>,
    req: Request,
    next: Next,
) -> Response {
    let key = client_key(&req);
    let limit = limiter.config().max_requests;

    match limiter.check(&key) {
        RateLimitDecision::Allowed {
            remaining,
            reset_after,
        } => {
            let mut response = next.run(req).await;
            write_headers(response.headers_mut(), limit, remaining, reset_after);
            response
        }
        RateLimitDecision::Rejected { reset_after } => {
            tracing::warn!(client = %key, "Rate limit exceeded");
            let mut response = (
                StatusCode::TOO_MANY_REQUESTS,
                Json(json!({ "error": RATE_LIMIT_MESSAGE })),
            )
                .into_response();
            write_headers(response.headers_mut(), limit, 0, reset_after);
            response
        }
    }
}
