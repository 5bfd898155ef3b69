//! URL handling module for Address-Trawl
//!
//! This module provides domain parsing and the candidate URL strategy used to
//! decide which pages of a site are probed for address data.

mod candidates;
mod domain;

// Re-export main functions
pub use candidates::{candidate_urls, is_relative_probe_path, DEFAULT_PROBE_PATHS};
pub use domain::Domain;

/// Scheme used for every probe; HTTPS upgrade is left to server redirects
pub const PROBE_SCHEME: &str = "http";
