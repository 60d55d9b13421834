//! URL cleanup and registrable domain extraction.
//!
//! This module contains the input-facing half of the crate:
//! - Cleanup and scheme inference for raw input strings
//! - Host extraction and bypass classification
//! - The normalizer pipelines built on top of the suffix resolver

pub mod host;
pub mod normalizer;

// Re-export main functionality
pub use host::{clean_input, hostname, is_ip_literal, is_web_scheme, parse_with_default_scheme};
pub use normalizer::Normalizer;
