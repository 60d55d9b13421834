//! Rule table parsed from the public suffix list file format.
//!
//! The format is the one published at <https://publicsuffix.org/list/>:
//! one rule per line, `//` comments, `!` for exception rules and a leading
//! `*.` for wildcard rules. Section markers inside comments split the list
//! into ICANN and private rules.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::{debug, warn};

use super::{trailing_names, SuffixMatch, SuffixSource};
use crate::error::EtldError;
use crate::types::Section;

const ICANN_MARKER: &str = "===BEGIN ICANN DOMAINS===";
const PRIVATE_MARKER: &str = "===BEGIN PRIVATE DOMAINS===";

/// Kind of a single suffix rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// `co.uk`
    Exact,
    /// `*.kawasaki.jp`, stored under `kawasaki.jp`
    Wildcard,
    /// `!city.kawasaki.jp`
    Exception,
}

/// An immutable table of public suffix rules.
#[derive(Debug, Clone, Default)]
pub struct SuffixRuleSet {
    exact: HashMap<String, Section>,
    wildcard: HashMap<String, Section>,
    exception: HashMap<String, Section>,
}

impl SuffixRuleSet {
    /// Parse rules from the text of a public suffix list.
    ///
    /// Rules that cannot be represented (non-ASCII labels that fail IDNA
    /// conversion, wildcards outside the leftmost label, single-label
    /// exceptions) are skipped with a warning. A list without any usable rule
    /// is rejected.
    pub fn parse(text: &str) -> Result<Self, EtldError> {
        let mut rules = Self::default();
        let mut section = Section::Icann;

        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(comment) = line.strip_prefix("//") {
                if comment.contains(ICANN_MARKER) {
                    section = Section::Icann;
                } else if comment.contains(PRIVATE_MARKER) {
                    section = Section::Private;
                }
                continue;
            }

            // Only the first whitespace-delimited token is the rule
            let token = line.split_whitespace().next().unwrap_or(line);
            if let Err(reason) = rules.insert(token, section) {
                warn!("Skipping suffix rule {:?} on line {}: {}", token, index + 1, reason);
            }
        }

        if rules.is_empty() {
            return Err(EtldError::RuleSetLoad("no usable rules found".to_string()));
        }

        debug!(
            "Loaded {} exact, {} wildcard and {} exception suffix rules",
            rules.exact.len(),
            rules.wildcard.len(),
            rules.exception.len()
        );

        Ok(rules)
    }

    /// Read and parse a public suffix list file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EtldError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| EtldError::RuleSetLoad(format!("{}: {}", path.display(), e)))?;
        Self::parse(&text)
    }

    /// Add one rule in list syntax.
    pub fn insert(&mut self, rule: &str, section: Section) -> Result<RuleKind, String> {
        let (kind, name) = if let Some(name) = rule.strip_prefix('!') {
            (RuleKind::Exception, name)
        } else if let Some(name) = rule.strip_prefix("*.") {
            (RuleKind::Wildcard, name)
        } else {
            (RuleKind::Exact, rule)
        };

        if name.is_empty() {
            return Err("empty rule".to_string());
        }
        if name.contains('*') {
            return Err("wildcards are only supported in the leftmost label".to_string());
        }
        if kind == RuleKind::Exception && !name.contains('.') {
            return Err("exception rules need at least two labels".to_string());
        }

        let ascii = idna::domain_to_ascii(&name.to_lowercase())
            .map_err(|e| format!("IDNA conversion failed: {:?}", e))?;
        if ascii.is_empty() || ascii.split('.').any(str::is_empty) {
            return Err("empty label".to_string());
        }

        let table = match kind {
            RuleKind::Exact => &mut self.exact,
            RuleKind::Wildcard => &mut self.wildcard,
            RuleKind::Exception => &mut self.exception,
        };
        table.insert(ascii, section);

        Ok(kind)
    }

    /// Total number of rules in the table.
    pub fn len(&self) -> usize {
        self.exact.len() + self.wildcard.len() + self.exception.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromStr for SuffixRuleSet {
    type Err = EtldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl SuffixSource for SuffixRuleSet {
    fn find_suffix(&self, host: &str) -> Option<SuffixMatch> {
        let names: Vec<&str> = trailing_names(host).collect();
        let total = names.len();

        // An exception rule prevails over everything else and drops its leftmost label
        for (i, name) in names.iter().enumerate() {
            if let Some(&section) = self.exception.get(*name) {
                return Some(SuffixMatch {
                    labels: total - i - 1,
                    section,
                });
            }
        }

        // Longest match wins; names are ordered longest first
        for (i, name) in names.iter().enumerate() {
            if let Some(&section) = self.exact.get(*name) {
                return Some(SuffixMatch {
                    labels: total - i,
                    section,
                });
            }

            // `*.parent` covers this name when its parent carries a wildcard rule
            let wildcard = names.get(i + 1).and_then(|parent| self.wildcard.get(*parent));
            if let Some(&section) = wildcard {
                return Some(SuffixMatch {
                    labels: total - i,
                    section,
                });
            }
        }

        None
    }
}
