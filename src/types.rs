//! Core data structures shared by the normalizer and the suffix resolver.

use std::fmt;

/// Section of the public suffix list a rule comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Rules maintained by registries (`===BEGIN ICANN DOMAINS===`).
    Icann,
    /// Opt-in rules submitted by private operators (`===BEGIN PRIVATE DOMAINS===`).
    Private,
}

/// A public suffix matched for a hostname.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicSuffix {
    /// The suffix itself, e.g. `co.uk`.
    pub suffix: String,
    /// Section of the rule that matched, `None` when only the implicit `*` rule applied.
    pub section: Option<Section>,
}

impl PublicSuffix {
    /// Whether an explicit rule from the list produced this suffix.
    pub fn is_known(&self) -> bool {
        self.section.is_some()
    }

    /// Whether the suffix comes from the ICANN section.
    pub fn is_icann(&self) -> bool {
        self.section == Some(Section::Icann)
    }
}

/// Why a hostname was returned without suffix resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BypassReason {
    /// The scheme is not `http`, `https` or `ftp` (app links and similar).
    NonWebScheme,
    /// The host is `localhost`.
    Localhost,
    /// The host is an IPv4 or IPv6 literal.
    IpLiteral,
}

/// Successful outcome of normalizing one input string.
///
/// Absence (SQL `NULL`) is represented by `Option::None` around this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// The registrable domain (eTLD+1) of the host.
    Registrable(String),
    /// The bare host, returned verbatim.
    Bypass { reason: BypassReason, host: String },
}

impl Resolved {
    /// The result string handed back to the caller.
    pub fn as_str(&self) -> &str {
        match self {
            Resolved::Registrable(domain) => domain,
            Resolved::Bypass { host, .. } => host,
        }
    }

    /// Consume the result, returning the string handed back to the caller.
    pub fn into_string(self) -> String {
        match self {
            Resolved::Registrable(domain) => domain,
            Resolved::Bypass { host, .. } => host,
        }
    }

    /// The bypass reason, if suffix resolution was skipped.
    pub fn bypass_reason(&self) -> Option<BypassReason> {
        match self {
            Resolved::Registrable(_) => None,
            Resolved::Bypass { reason, .. } => Some(*reason),
        }
    }
}

impl fmt::Display for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_accessors() {
        let registrable = Resolved::Registrable("example.co.uk".to_string());
        assert_eq!(registrable.as_str(), "example.co.uk");
        assert_eq!(registrable.bypass_reason(), None);

        let bypass = Resolved::Bypass {
            reason: BypassReason::Localhost,
            host: "localhost".to_string(),
        };
        assert_eq!(bypass.to_string(), "localhost");
        assert_eq!(bypass.bypass_reason(), Some(BypassReason::Localhost));
        assert_eq!(bypass.into_string(), "localhost");
    }

    #[test]
    fn test_public_suffix_sections() {
        let icann = PublicSuffix {
            suffix: "co.uk".to_string(),
            section: Some(Section::Icann),
        };
        assert!(icann.is_known());
        assert!(icann.is_icann());

        let implicit = PublicSuffix {
            suffix: "unknowntld".to_string(),
            section: None,
        };
        assert!(!implicit.is_known());
        assert!(!implicit.is_icann());
    }
}
