//! Public Suffix List compiled into the `psl` crate.

use psl::{List, Psl, Type};

use super::{SuffixMatch, SuffixSource};
use crate::types::Section;

/// The suffix list bundled with the binary.
///
/// This is the default rule source: it needs no file access and is fixed at
/// build time, so every lookup sees the same snapshot of the list.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledList;

impl SuffixSource for BundledList {
    fn find_suffix(&self, host: &str) -> Option<SuffixMatch> {
        let suffix = List.suffix(host.as_bytes())?;

        // Unknown suffixes come from the `*` fallback, which the resolver owns
        if !suffix.is_known() {
            return None;
        }

        let section = match suffix.typ() {
            Some(Type::Private) => Section::Private,
            _ => Section::Icann,
        };
        let labels = suffix.as_bytes().split(|&b| b == b'.').count();

        Some(SuffixMatch { labels, section })
    }
}
