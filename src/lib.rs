//! etldp1 - registrable domain extraction for database query engines
//!
//! This crate turns arbitrary URL or host strings into their registrable
//! domain (eTLD+1), the smallest domain an organization can register under a
//! public suffix. It backs the `get_etld_p1` database function and the
//! `etldp1` command-line tool.
//!
//! # Features
//!
//! - **Lenient input**: case folding, trimming, backslashes read as slashes,
//!   `http://` assumed when the scheme is missing
//! - **Bypasses**: `localhost`, IP literals and hosts of non-web schemes are
//!   returned as they are
//! - **Public Suffix List**: ICANN and private rules, with wildcard and
//!   exception handling, from the bundled list or a `.dat` file
//! - **Never fails loudly**: per-call problems are logged and reported as
//!   "no value"
//!
//! # Quick Start
//!
//! ```
//! use etldp1::{Normalizer, Resolver};
//!
//! let normalizer = Normalizer::bundled();
//!
//! let domain = normalizer.normalize("http://a.very.complex-domain.co.uk:8080/foo/bar");
//! assert_eq!(domain.unwrap().as_str(), "complex-domain.co.uk");
//!
//! let host = normalizer.normalize("http://localhost:3000/x");
//! assert_eq!(host.unwrap().as_str(), "localhost");
//!
//! // The strict pipeline takes the input as given
//! assert_eq!(normalizer.normalize_strict("http://192.168.1.1/x"), None);
//!
//! let suffix = Resolver::bundled().public_suffix("www.example.co.uk")?;
//! assert_eq!(suffix.suffix, "co.uk");
//! # Ok::<(), etldp1::EtldError>(())
//! ```
//!
//! # Error Handling
//!
//! The `try_*` functions return `Result<T, EtldError>`. The plain
//! `normalize` functions log the error and return `None`, matching the
//! database contract where a failed row yields `NULL`.

// Re-export main functionality
pub use crate::url::{clean_input, hostname, Normalizer};
pub use suffix::{BundledList, Resolver, SuffixMatch, SuffixRuleSet, SuffixSource};
pub use udf::{engine, ArgType, Engine, EtldFunction, InitOutcome, Mode};

// Re-export public types
pub use config::Config;
pub use error::EtldError;
pub use logging::{DiagnosticSink, MemorySink, TracingSink};
pub use types::{BypassReason, PublicSuffix, Resolved, Section};

// Module declarations
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod suffix;
pub mod types;
pub mod udf;
pub mod url;
