//! Feed discovery service.
//!
//! Given any page URL, finds the RSS and Atom feeds its site publishes, using
//! site rules, `<link rel="alternate">` tags, and probing of conventional feed
//! paths. The [`lookup`] layer puts CAPTCHA verification and rate limits in
//! front of discovery, and [`server`] exposes it over HTTP.

pub mod abuse;
pub mod analytics;
pub mod config;
pub mod feed;
pub mod lookup;
pub mod server;
pub mod util;
