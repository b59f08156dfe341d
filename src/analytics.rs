//! Fire-and-forget lookup events.
//!
//! Sinks must not fail the lookup, so [`EventSink::record`] returns nothing.

use std::time::Duration;

use crate::feed::Method;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventName {
    Lookup,
    RateLimit,
}

impl EventName {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventName::Lookup => "lookup",
            EventName::RateLimit => "rate_limit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    Success,
    NoFeeds,
    Error,
    Blocked,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Success => "success",
            EventStatus::NoFeeds => "no_feeds",
            EventStatus::Error => "error",
            EventStatus::Blocked => "blocked",
        }
    }
}

/// One analytics record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsEvent {
    pub name: EventName,
    pub status: EventStatus,
    pub method: Method,
    /// Short machine tag such as `invalid_url`, `http_503` or `ip`.
    pub error_type: Option<String>,
    /// Where the lookup came from, e.g. `api` or `cli`.
    pub source: String,
    pub feed_count: usize,
    pub duration: Duration,
    pub upstream_status: Option<u16>,
    pub external_requests: usize,
}

impl AnalyticsEvent {
    pub fn new(name: EventName, status: EventStatus, source: impl Into<String>) -> Self {
        Self {
            name,
            status,
            method: Method::None,
            error_type: None,
            source: source.into(),
            feed_count: 0,
            duration: Duration::ZERO,
            upstream_status: None,
            external_requests: 0,
        }
    }
}

pub trait EventSink: Send + Sync {
    fn record(&self, event: &AnalyticsEvent);
}

/// Writes each event as one `tracing` record under the `analytics` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: &AnalyticsEvent) {
        tracing::info!(
            target: "analytics",
            event = event.name.as_str(),
            status = event.status.as_str(),
            method = event.method.as_str(),
            error_type = event.error_type.as_deref().unwrap_or(""),
            source = %event.source,
            feed_count = event.feed_count,
            duration_ms = event.duration.as_millis() as u64,
            upstream_status = event.upstream_status.unwrap_or(0),
            external_requests = event.external_requests,
        );
    }
}
