//! Public suffix resolution.
//!
//! This module contains the eTLD+1 machinery:
//! - A rule source abstraction shared by every lookup
//! - The suffix list compiled into the `psl` crate
//! - A rule table parsed from a `public_suffix_list.dat` file
//! - The resolver deriving registrable domains from matched suffixes

pub mod psl;
pub mod resolver;
pub mod rules;

use crate::types::Section;

// Re-export main functionality
pub use self::psl::BundledList;
pub use resolver::Resolver;
pub use rules::SuffixRuleSet;

/// Longest explicit rule match for a hostname.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuffixMatch {
    /// Number of trailing labels forming the public suffix.
    pub labels: usize,
    /// Section of the prevailing rule.
    pub section: Section,
}

/// A read-only table of public suffix rules.
///
/// Implementations are built once and shared between threads without locking.
pub trait SuffixSource: Send + Sync {
    /// Find the prevailing explicit rule for `host`.
    ///
    /// `host` is lowercase, non-empty and has no empty labels. Returns `None`
    /// when no rule in the table matches; the implicit `*` rule is applied by
    /// the [`Resolver`], not by the source.
    fn find_suffix(&self, host: &str) -> Option<SuffixMatch>;
}

/// Iterate over `host` and each of its parent names, longest first.
///
/// `"a.b.c"` yields `"a.b.c"`, `"b.c"`, `"c"`.
pub(crate) fn trailing_names(host: &str) -> impl Iterator<Item = &str> {
    std::iter::once(host).chain(host.match_indices('.').map(move |(i, _)| &host[i + 1..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_names() {
        let names: Vec<&str> = trailing_names("a.very.complex-domain.co.uk").collect();
        assert_eq!(
            names,
            vec![
                "a.very.complex-domain.co.uk",
                "very.complex-domain.co.uk",
                "complex-domain.co.uk",
                "co.uk",
                "uk"
            ]
        );
    }

    #[test]
    fn test_trailing_names_single_label() {
        let names: Vec<&str> = trailing_names("localhost").collect();
        assert_eq!(names, vec!["localhost"]);
    }
}
