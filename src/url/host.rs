//! Input cleanup, URL parsing and host classification.

use std::net::IpAddr;

use url::{Host, Url};

use crate::error::EtldError;

/// Schemes for which a registrable domain is meaningful.
pub const WEB_SCHEMES: [&str; 3] = ["http", "https", "ftp"];

/// Scheme injected when the input has none.
pub const DEFAULT_SCHEME: &str = "http";

/// Lowercase, trim and turn backslashes into forward slashes.
///
/// Backslashes are not valid URL separators, but inputs typed with the wrong
/// slash direction are common enough to be accepted.
pub fn clean_input(raw: &str) -> String {
    raw.to_lowercase().trim().replace('\\', "/")
}

/// Parse `input`, retrying with `http://` prepended when it has no scheme.
pub fn parse_with_default_scheme(input: &str) -> Result<Url, EtldError> {
    match Url::parse(input) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Ok(Url::parse(&format!("{}://{}", DEFAULT_SCHEME, input))?)
        }
        Err(e) => Err(e.into()),
    }
}

/// The host of a URL without port or IPv6 brackets; empty if there is none.
pub fn hostname(url: &Url) -> String {
    match url.host() {
        Some(Host::Domain(domain)) => domain.to_string(),
        Some(Host::Ipv4(addr)) => addr.to_string(),
        Some(Host::Ipv6(addr)) => addr.to_string(),
        None => String::new(),
    }
}

pub fn is_web_scheme(scheme: &str) -> bool {
    WEB_SCHEMES.contains(&scheme)
}

pub fn is_localhost(host: &str) -> bool {
    host == "localhost"
}

/// Whether `host` is an IPv4 or IPv6 literal (without brackets).
pub fn is_ip_literal(host: &str) -> bool {
    host.parse::<IpAddr>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_input() {
        assert_eq!(clean_input("  HTTP://Example.COM/Path  "), "http://example.com/path");
        assert_eq!(clean_input("http:\\\\example.com\\path"), "http://example.com/path");
        assert_eq!(clean_input("\t\n"), "");
    }

    #[test]
    fn test_parse_keeps_explicit_scheme() {
        let url = parse_with_default_scheme("https://example.com/").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(hostname(&url), "example.com");
    }

    #[test]
    fn test_parse_injects_default_scheme() {
        let url = parse_with_default_scheme("com.s3-website-us-east-1.amazonaws.com").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(hostname(&url), "com.s3-website-us-east-1.amazonaws.com");

        let url = parse_with_default_scheme("192.168.1.1:8080/x").unwrap();
        assert_eq!(hostname(&url), "192.168.1.1");
    }

    #[test]
    fn test_parse_failure() {
        let err = parse_with_default_scheme("http://exa mple.com").unwrap_err();
        assert!(matches!(err, EtldError::ParseFailure(_)));

        let err = parse_with_default_scheme("http://[::1").unwrap_err();
        assert!(matches!(err, EtldError::ParseFailure(_)));
    }

    #[test]
    fn test_hostname_variants() {
        let url = Url::parse("http://[::1]:3000/").unwrap();
        assert_eq!(hostname(&url), "::1");

        let url = Url::parse("http://127.0.0.1:3000/").unwrap();
        assert_eq!(hostname(&url), "127.0.0.1");

        let url = Url::parse("myapp://open/profile/42").unwrap();
        assert_eq!(hostname(&url), "open");

        let url = Url::parse("mailto:someone@example.com").unwrap();
        assert_eq!(hostname(&url), "");
    }

    #[test]
    fn test_classification() {
        assert!(is_web_scheme("http"));
        assert!(is_web_scheme("https"));
        assert!(is_web_scheme("ftp"));
        assert!(!is_web_scheme("ws"));
        assert!(!is_web_scheme("myapp"));

        assert!(is_localhost("localhost"));
        assert!(!is_localhost("localhost.localdomain"));

        assert!(is_ip_literal("192.168.1.1"));
        assert!(is_ip_literal("::1"));
        assert!(is_ip_literal("2001:db8::1"));
        assert!(!is_ip_literal("[::1]"));
        assert!(!is_ip_literal("example.com"));
    }
}
