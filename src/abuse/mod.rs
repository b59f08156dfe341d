//! Abuse control in front of the lookup: Turnstile CAPTCHA verification and
//! sliding-window rate limits per client IP and per target domain.

pub mod captcha;
pub mod rate_limit;
pub mod store;

pub use captcha::TurnstileVerifier;
pub use rate_limit::{LimitScope, RateLimitRejection, RateLimiter};
pub use store::{LimitStore, MemoryStore, SlidingWindow, StoreError, UpstashStore};
