//! Registrable domain (eTLD+1) derivation.

use std::fmt;
use std::sync::Arc;

use super::{trailing_names, BundledList, SuffixMatch, SuffixSource};
use crate::error::EtldError;
use crate::types::{PublicSuffix, Section};

/// Derives public suffixes and registrable domains from hostnames.
///
/// Cloning is cheap: every clone shares the same rule source.
#[derive(Clone)]
pub struct Resolver {
    source: Arc<dyn SuffixSource>,
}

impl Resolver {
    /// Create a resolver over the given rule source.
    pub fn new(source: Arc<dyn SuffixSource>) -> Self {
        Self { source }
    }

    /// Create a resolver over the suffix list bundled with the binary.
    pub fn bundled() -> Self {
        Self::new(Arc::new(BundledList))
    }

    /// Get the public suffix (eTLD) of a hostname.
    ///
    /// # Examples
    ///
    /// ```
    /// use etldp1::Resolver;
    ///
    /// let suffix = Resolver::bundled().public_suffix("www.example.co.uk").unwrap();
    /// assert_eq!(suffix.suffix, "co.uk");
    /// assert!(suffix.is_icann());
    /// ```
    pub fn public_suffix(&self, hostname: &str) -> Result<PublicSuffix, EtldError> {
        let hostname = &hostname.to_lowercase();
        let (labels, found) = self.locate(hostname)?;
        let suffix = label_tail(hostname, labels, found.labels)
            .ok_or_else(|| EtldError::InsufficientLabels(hostname.to_string()))?;

        Ok(PublicSuffix {
            suffix: suffix.to_string(),
            section: found.section,
        })
    }

    /// Get the registrable domain (eTLD+1) of a hostname.
    ///
    /// Matching is case-insensitive and the result is lowercase.
    /// The hostname must already be a plausible DNS name; IP literals and
    /// `localhost` are not special-cased and fail with
    /// [`EtldError::NoMatchingRule`].
    ///
    /// # Examples
    ///
    /// ```
    /// use etldp1::Resolver;
    ///
    /// let resolver = Resolver::bundled();
    /// assert_eq!(resolver.resolve("a.very.complex-domain.co.uk").unwrap(), "complex-domain.co.uk");
    /// assert!(resolver.resolve("co.uk").is_err());
    /// ```
    pub fn resolve(&self, hostname: &str) -> Result<String, EtldError> {
        let hostname = &hostname.to_lowercase();
        let (labels, found) = self.locate(hostname)?;
        if labels <= found.labels {
            return Err(EtldError::InsufficientLabels(hostname.to_string()));
        }

        label_tail(hostname, labels, found.labels + 1)
            .map(str::to_string)
            .ok_or_else(|| EtldError::InsufficientLabels(hostname.to_string()))
    }

    /// Count the labels of `hostname` and find its prevailing suffix rule.
    fn locate(&self, hostname: &str) -> Result<(usize, Found), EtldError> {
        if hostname.is_empty() || hostname.split('.').any(str::is_empty) {
            return Err(EtldError::InvalidHostname(hostname.to_string()));
        }
        let labels = hostname.split('.').count();

        if let Some(SuffixMatch { labels: suffix_labels, section }) = self.source.find_suffix(hostname) {
            return Ok((
                labels,
                Found {
                    labels: suffix_labels,
                    section: Some(section),
                },
            ));
        }

        // The implicit `*` rule: the last label is the suffix. It never applies
        // to single-label names or to a numeric last label (dotted IPv4).
        let last = hostname.rsplit('.').next().unwrap_or(hostname);
        if labels < 2 || last.bytes().all(|b| b.is_ascii_digit()) {
            return Err(EtldError::NoMatchingRule(hostname.to_string()));
        }

        Ok((
            labels,
            Found {
                labels: 1,
                section: None,
            },
        ))
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::bundled()
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver").finish_non_exhaustive()
    }
}

/// Suffix match with the implicit rule folded in.
struct Found {
    labels: usize,
    section: Option<Section>,
}

/// The last `count` labels of a hostname with `total` labels.
fn label_tail(hostname: &str, total: usize, count: usize) -> Option<&str> {
    if count == 0 || count > total {
        return None;
    }
    trailing_names(hostname).nth(total - count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suffix::SuffixRuleSet;

    fn sample_resolver() -> Resolver {
        let rules = SuffixRuleSet::parse(
            "com\nuk\nco.uk\njp\n*.kawasaki.jp\n!city.kawasaki.jp\n\
             // ===BEGIN PRIVATE DOMAINS===\nblogspot.com\n",
        )
        .unwrap();
        Resolver::new(Arc::new(rules))
    }

    #[test]
    fn test_label_tail() {
        assert_eq!(label_tail("a.b.c", 3, 1), Some("c"));
        assert_eq!(label_tail("a.b.c", 3, 3), Some("a.b.c"));
        assert_eq!(label_tail("a.b.c", 3, 4), None);
        assert_eq!(label_tail("a.b.c", 3, 0), None);
    }

    #[test]
    fn test_resolve_basic() {
        let resolver = sample_resolver();
        assert_eq!(resolver.resolve("example.com").unwrap(), "example.com");
        assert_eq!(resolver.resolve("www.example.com").unwrap(), "example.com");
        assert_eq!(resolver.resolve("a.b.example.co.uk").unwrap(), "example.co.uk");
    }

    #[test]
    fn test_resolve_private_rule() {
        let resolver = sample_resolver();
        assert_eq!(resolver.resolve("me.blogspot.com").unwrap(), "me.blogspot.com");
        let suffix = resolver.public_suffix("me.blogspot.com").unwrap();
        assert_eq!(suffix.suffix, "blogspot.com");
        assert_eq!(suffix.section, Some(Section::Private));
    }

    #[test]
    fn test_wildcard_and_exception() {
        let resolver = sample_resolver();
        assert_eq!(resolver.resolve("www.foo.kawasaki.jp").unwrap(), "www.foo.kawasaki.jp");
        assert_eq!(resolver.resolve("www.city.kawasaki.jp").unwrap(), "city.kawasaki.jp");
        assert!(matches!(
            resolver.resolve("foo.kawasaki.jp"),
            Err(EtldError::InsufficientLabels(_))
        ));
    }

    #[test]
    fn test_mixed_case_hostname() {
        let resolver = sample_resolver();
        assert_eq!(resolver.resolve("WWW.Example.CO.UK").unwrap(), "example.co.uk");
        assert_eq!(resolver.public_suffix("Me.BlogSpot.com").unwrap().suffix, "blogspot.com");
        assert!(matches!(resolver.resolve("CO.UK"), Err(EtldError::InsufficientLabels(_))));
    }

    #[test]
    fn test_implicit_rule() {
        let resolver = sample_resolver();
        assert_eq!(resolver.resolve("www.example.org").unwrap(), "example.org");
        let suffix = resolver.public_suffix("www.example.org").unwrap();
        assert_eq!(suffix.suffix, "org");
        assert_eq!(suffix.section, None);
    }

    #[test]
    fn test_suffix_only_fails() {
        let resolver = sample_resolver();
        assert_eq!(
            resolver.resolve("co.uk"),
            Err(EtldError::InsufficientLabels("co.uk".to_string()))
        );
        assert_eq!(
            resolver.resolve("com"),
            Err(EtldError::InsufficientLabels("com".to_string()))
        );
    }

    #[test]
    fn test_single_unknown_label_fails() {
        let resolver = sample_resolver();
        assert_eq!(
            resolver.resolve("localhost"),
            Err(EtldError::NoMatchingRule("localhost".to_string()))
        );
    }

    #[test]
    fn test_ip_literals_fail() {
        let resolver = sample_resolver();
        assert!(matches!(resolver.resolve("192.168.1.1"), Err(EtldError::NoMatchingRule(_))));
        assert!(matches!(resolver.resolve("::1"), Err(EtldError::NoMatchingRule(_))));
    }

    #[test]
    fn test_invalid_hostnames() {
        let resolver = sample_resolver();
        for host in ["", ".example.com", "example.com.", "a..example.com"] {
            assert_eq!(
                resolver.resolve(host),
                Err(EtldError::InvalidHostname(host.to_string())),
                "Expected invalid hostname for {:?}",
                host
            );
        }
    }
}
