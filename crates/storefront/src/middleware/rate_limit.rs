//! Fixed-window rate limiting for the contact endpoint.
//!
//! Each client IP gets a counter inside a fixed time window. The first
//! request opens the window; once the counter reaches the configured
//! maximum, further requests are rejected until the window expires, at which
//! point the counter resets and the window restarts from the rejected
//! request's timestamp.
//!
//! The client IP is resolved from proxy headers (Cloudflare and Fly.io both
//! sit in front of this service) before falling back to the socket address.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use axum::extract::ConnectInfo;
use axum::http::HeaderMap;
use axum::http::request::Parts;

use crate::config::RateLimitConfig;

/// Outcome of a rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// The request fits inside the current window.
    Allowed,
    /// The window's budget is spent; retry after the window expires.
    Limited,
}

#[derive(Debug)]
struct Window {
    started: Instant,
    count: u32,
}

#[derive(Debug)]
struct Windows {
    map: HashMap<String, Window>,
    last_sweep: Instant,
}

/// Per-key fixed-window request counter.
///
/// Expired windows are swept out at most once per window length, piggybacked
/// on an incoming check, so the map stays bounded by the set of clients seen
/// within the last two windows.
#[derive(Debug)]
pub struct FixedWindowLimiter {
    max_requests: u32,
    window: Duration,
    windows: Mutex<Windows>,
}

impl FixedWindowLimiter {
    #[must_use]
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            max_requests: config.max_requests,
            window: config.window,
            windows: Mutex::new(Windows {
                map: HashMap::new(),
                last_sweep: Instant::now(),
            }),
        }
    }

    /// Record a request for `key` against the wall clock.
    pub fn check(&self, key: &str) -> RateLimitDecision {
        self.check_at(key, Instant::now())
    }

    /// Record a request for `key` at an explicit instant.
    ///
    /// Taking the clock as a parameter keeps window-expiry behavior testable
    /// without sleeping.
    pub fn check_at(&self, key: &str, now: Instant) -> RateLimitDecision {
        let mut windows = self
            .windows
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        if now.duration_since(windows.last_sweep) >= self.window {
            let window_length = self.window;
            windows
                .map
                .retain(|_, w| now.duration_since(w.started) < window_length);
            windows.last_sweep = now;
        }

        let window = windows.map.entry(key.to_owned()).or_insert(Window {
            started: now,
            count: 0,
        });

        if now.duration_since(window.started) >= self.window {
            window.started = now;
            window.count = 0;
        }

        if window.count >= self.max_requests {
            return RateLimitDecision::Limited;
        }

        window.count += 1;
        RateLimitDecision::Allowed
    }

    #[cfg(test)]
    fn tracked_keys(&self) -> usize {
        self.windows
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .map
            .len()
    }
}

/// Resolve the real client IP from request parts.
///
/// Checks Cloudflare's `CF-Connecting-IP` first, then the standard proxy
/// headers, then Fly.io's `Fly-Client-IP`, and finally the peer socket
/// address.
#[must_use]
pub fn client_ip(parts: &Parts) -> Option<IpAddr> {
    if let Some(ip) = ip_from_headers(&parts.headers) {
        return Some(ip);
    }

    parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
}

fn ip_from_headers(headers: &HeaderMap) -> Option<IpAddr> {
    // CF-Connecting-IP is Cloudflare's real client IP
    if let Some(ip) = headers
        .get("cf-connecting-ip")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<IpAddr>().ok())
    {
        return Some(ip);
    }

    // X-Forwarded-For: first IP in the chain
    if let Some(ip) = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .and_then(|s| s.trim().parse::<IpAddr>().ok())
    {
        return Some(ip);
    }

    if let Some(ip) = headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<IpAddr>().ok())
    {
        return Some(ip);
    }

    // Fly.io's header
    headers
        .get("fly-client-ip")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<IpAddr>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn limiter(max: u32, window_secs: u64) -> FixedWindowLimiter {
        FixedWindowLimiter::new(&RateLimitConfig {
            max_requests: max,
            window: Duration::from_secs(window_secs),
        })
    }

    #[test]
    fn test_allows_up_to_max_then_limits() {
        let limiter = limiter(3, 3600);
        let now = Instant::now();

        for _ in 0..3 {
            assert_eq!(limiter.check_at("1.2.3.4", now), RateLimitDecision::Allowed);
        }
        assert_eq!(limiter.check_at("1.2.3.4", now), RateLimitDecision::Limited);
    }

    #[test]
    fn test_window_expiry_resets_counter() {
        let limiter = limiter(2, 60);
        let start = Instant::now();

        assert_eq!(limiter.check_at("k", start), RateLimitDecision::Allowed);
        assert_eq!(limiter.check_at("k", start), RateLimitDecision::Allowed);
        assert_eq!(
            limiter.check_at("k", start + Duration::from_secs(59)),
            RateLimitDecision::Limited
        );

        // a full window later the counter starts over
        let later = start + Duration::from_secs(60);
        assert_eq!(limiter.check_at("k", later), RateLimitDecision::Allowed);
        assert_eq!(limiter.check_at("k", later), RateLimitDecision::Allowed);
        assert_eq!(limiter.check_at("k", later), RateLimitDecision::Limited);
    }

    #[test]
    fn test_idle_windows_are_evicted() {
        let limiter = limiter(1, 60);
        let start = Instant::now();

        for i in 0..50 {
            limiter.check_at(&format!("10.0.0.{i}"), start);
        }
        assert_eq!(limiter.tracked_keys(), 50);

        // a fresh client after every window expired sweeps the stale entries
        let later = start + Duration::from_secs(61);
        assert_eq!(
            limiter.check_at("172.16.0.1", later),
            RateLimitDecision::Allowed
        );
        assert_eq!(limiter.tracked_keys(), 1);
    }

    #[test]
    fn test_keys_are_independent() {
        let limiter = limiter(1, 3600);
        let now = Instant::now();

        assert_eq!(limiter.check_at("a", now), RateLimitDecision::Allowed);
        assert_eq!(limiter.check_at("a", now), RateLimitDecision::Limited);
        assert_eq!(limiter.check_at("b", now), RateLimitDecision::Allowed);
    }

    #[test]
    fn test_header_priority() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("10.0.0.2, 10.0.0.9"));
        headers.insert("cf-connecting-ip", HeaderValue::from_static("10.0.0.1"));
        assert_eq!(
            ip_from_headers(&headers),
            Some("10.0.0.1".parse().expect("ip"))
        );

        headers.remove("cf-connecting-ip");
        assert_eq!(
            ip_from_headers(&headers),
            Some("10.0.0.2".parse().expect("ip"))
        );

        headers.remove("x-forwarded-for");
        headers.insert("fly-client-ip", HeaderValue::from_static("10.0.0.3"));
        assert_eq!(
            ip_from_headers(&headers),
            Some("10.0.0.3".parse().expect("ip"))
        );
    }

    #[test]
    fn test_no_headers_yields_none() {
        assert_eq!(ip_from_headers(&HeaderMap::new()), None);
    }
}
