//! Feed discovery engine.
//!
//! Given a page URL, works out which RSS/Atom feeds the site publishes:
//!
//! - [`rules`] - Site-specific rules that answer without fetching anything
//! - [`html`] - `<link rel="alternate">` extraction from the fetched page
//! - [`probe`] - Concurrent probing of conventional feed paths
//! - [`title`] - Channel title extraction from feed XML
//! - [`Discovery`] - The engine that sequences the above
//!
//! Leaf failures (one rule, one probe, one title fetch) surface as
//! [`Recovered`] values and are logged, never propagated.

mod discovery;
pub mod html;
pub mod http;
mod map;
pub mod probe;
mod recovered;
pub mod rules;
pub mod title;

pub use discovery::{Discovery, DiscoveryError, DiscoveryRun, Method};
pub use http::{build_client, client_builder, FetchError};
pub use map::{FeedEntry, FeedsMap};
pub use recovered::{Recovered, Stage};
pub use rules::{Rule, RuleRegistry};
