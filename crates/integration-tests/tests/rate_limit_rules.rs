//! Fixed-window rate limiter behavior, as configured for the public
//! contact form.

use std::time::{Duration, Instant};

use auric_storefront::config::RateLimitConfig;
use auric_storefront::middleware::rate_limit::{FixedWindowLimiter, RateLimitDecision};

fn limiter(max_requests: u32, window_secs: u64) -> FixedWindowLimiter {
    FixedWindowLimiter::new(&RateLimitConfig {
        max_requests,
        window: Duration::from_secs(window_secs),
    })
}

#[test]
fn allows_up_to_the_limit_then_rejects() {
    let limiter = limiter(3, 60);
    let start = Instant::now();

    for _ in 0..3 {
        assert_eq!(
            limiter.check_at("203.0.113.7", start),
            RateLimitDecision::Allowed
        );
    }
    assert_eq!(
        limiter.check_at("203.0.113.7", start),
        RateLimitDecision::Limited
    );
}

#[test]
fn window_resets_after_it_elapses() {
    let limiter = limiter(1, 60);
    let start = Instant::now();

    assert_eq!(limiter.check_at("ip", start), RateLimitDecision::Allowed);
    assert_eq!(
        limiter.check_at("ip", start + Duration::from_secs(59)),
        RateLimitDecision::Limited
    );
    assert_eq!(
        limiter.check_at("ip", start + Duration::from_secs(60)),
        RateLimitDecision::Allowed
    );
}

#[test]
fn keys_are_independent() {
    let limiter = limiter(1, 60);
    let start = Instant::now();

    assert_eq!(limiter.check_at("a", start), RateLimitDecision::Allowed);
    assert_eq!(limiter.check_at("a", start), RateLimitDecision::Limited);
    assert_eq!(limiter.check_at("b", start), RateLimitDecision::Allowed);
}
