//! Utility functions for common operations.
//!
//! This module provides reusable utilities for:
//!
//! - **URL shaping**: `clean_url` strips query, fragment and a trailing slash
//!   before rule matching and URL derivation
//! - **URL policy**: security-focused validation so the lookup endpoint cannot
//!   be pointed at internal hosts
//! - **Text processing**: control-character stripping for titles taken from
//!   untrusted feed XML
//!
//! # Examples
//!
//! ```
//! use rsslookup::util::{clean_url, validate_url};
//!
//! assert_eq!(clean_url("https://example.com/blog/?page=2#top"), "https://example.com/blog");
//! assert!(validate_url("http://192.168.1.1/feed").is_err());
//! ```

mod text;
mod url_policy;

pub use text::strip_control_chars;
pub use url_policy::{clean_url, validate_url, UrlValidationError};
pub(crate) use url_policy::check_url_policy;
