//! Raw input to registrable domain pipelines.

use std::fmt;
use std::sync::Arc;

use tracing::Level;

use super::host::{
    clean_input, hostname, is_ip_literal, is_localhost, is_web_scheme, parse_with_default_scheme,
};
use crate::error::EtldError;
use crate::logging::{DiagnosticSink, TracingSink};
use crate::suffix::Resolver;
use crate::types::{BypassReason, Resolved};

/// Turns untrusted URL or host strings into registrable domains.
///
/// Both pipelines are pure functions of their input and the shared rule
/// source. Failures are written to the diagnostic sink and reported to the
/// caller as `None`.
#[derive(Clone)]
pub struct Normalizer {
    resolver: Resolver,
    sink: Arc<dyn DiagnosticSink>,
}

impl Normalizer {
    pub fn new(resolver: Resolver, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { resolver, sink }
    }

    /// Normalizer over the bundled suffix list, logging through `tracing`.
    pub fn bundled() -> Self {
        Self::new(Resolver::bundled(), Arc::new(TracingSink))
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Extract the registrable domain of a URL or host string.
    ///
    /// Input is lowercased, trimmed and has backslashes turned into slashes;
    /// a missing scheme defaults to `http`. Hosts of non-web schemes,
    /// `localhost` and IP literals are returned as they are.
    ///
    /// # Examples
    ///
    /// ```
    /// use etldp1::Normalizer;
    ///
    /// let normalizer = Normalizer::bundled();
    /// let domain = normalizer.normalize("http://a.very.complex-domain.co.uk:8080/foo/bar");
    /// assert_eq!(domain.unwrap().as_str(), "complex-domain.co.uk");
    /// assert!(normalizer.normalize("").is_none());
    /// ```
    pub fn normalize(&self, raw: &str) -> Option<Resolved> {
        self.absorb(self.try_normalize(raw))
    }

    /// [`normalize`](Self::normalize) with the failure reason kept.
    pub fn try_normalize(&self, raw: &str) -> Result<Resolved, EtldError> {
        if raw.is_empty() {
            return Err(EtldError::EmptyInput);
        }

        let url = parse_with_default_scheme(&clean_input(raw))?;
        let host = hostname(&url);

        let bypass = if !is_web_scheme(url.scheme()) {
            Some(BypassReason::NonWebScheme)
        } else if is_localhost(&host) {
            Some(BypassReason::Localhost)
        } else if is_ip_literal(&host) {
            Some(BypassReason::IpLiteral)
        } else {
            None
        };

        if let Some(reason) = bypass {
            return Ok(Resolved::Bypass { reason, host });
        }

        self.resolver.resolve(&host).map(Resolved::Registrable)
    }

    /// Extract the registrable domain of a well-formed URL, without leniency.
    ///
    /// The input is parsed as given: no trimming, no backslash handling and
    /// no scheme inference. IP literals and `localhost` go through suffix
    /// resolution like any other host (and therefore fail). The resolved
    /// domain is lowercased.
    pub fn normalize_strict(&self, raw: &str) -> Option<String> {
        self.absorb(self.try_normalize_strict(raw))
    }

    /// [`normalize_strict`](Self::normalize_strict) with the failure reason kept.
    pub fn try_normalize_strict(&self, raw: &str) -> Result<String, EtldError> {
        if raw.is_empty() {
            return Err(EtldError::EmptyInput);
        }

        let url = url::Url::parse(raw)?;
        let domain = self.resolver.resolve(&hostname(&url))?;

        Ok(domain.to_lowercase())
    }

    /// The hostname the lenient pipeline would work with, before any bypass.
    pub fn hostname(&self, raw: &str) -> Result<String, EtldError> {
        if raw.is_empty() {
            return Err(EtldError::EmptyInput);
        }
        let url = parse_with_default_scheme(&clean_input(raw))?;
        Ok(hostname(&url))
    }

    pub(crate) fn report(&self, level: Level, message: &str) {
        self.sink.emit(level, message);
    }

    fn absorb<T>(&self, result: Result<T, EtldError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(EtldError::EmptyInput) => None,
            Err(e) => {
                self.report(Level::ERROR, &e.to_string());
                None
            }
        }
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::bundled()
    }
}

impl fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Normalizer")
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}
