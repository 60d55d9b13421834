//! Command-line interface for the `etldp1` tool.
//!
//! The tool runs the same pipelines as the database functions, which makes
//! it handy for checking what a query would return and for batch jobs:
//!
//! ```text
//! etldp1 http://a.very.complex-domain.co.uk:8080/foo/bar
//! cat urls.txt | etldp1 --strict
//! etldp1 --suffix www.city.kawasaki.jp
//! ```
//!
//! Each input produces one output line; `NULL` stands for "no value".

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::Config;
use crate::types::Section;
use crate::url::Normalizer;

/// Printed when an input has no result.
pub const NULL_OUTPUT: &str = "NULL";

#[derive(Parser, Debug)]
#[command(
    name = "etldp1",
    about = "Extract registrable domains (eTLD+1) from URLs and hostnames",
    version
)]
pub struct Cli {
    /// URLs or hostnames to resolve; read from stdin (one per line) when omitted
    pub inputs: Vec<String>,

    /// Parse inputs as given, without cleanup, scheme inference or bypasses
    #[arg(long, conflicts_with = "suffix")]
    pub strict: bool,

    /// Print the public suffix and its section instead of the registrable domain
    #[arg(long)]
    pub suffix: bool,

    /// public_suffix_list.dat file to use instead of the bundled list
    #[arg(long, value_name = "PATH")]
    pub suffix_list: Option<PathBuf>,

    /// Log filter directives (e.g. "debug"); overrides ETLDP1_LOG
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,
}

impl Cli {
    /// Environment configuration with command-line overrides applied.
    pub fn config(&self) -> Config {
        let mut config = Config::from_env();
        if let Some(path) = &self.suffix_list {
            config.suffix_list = Some(path.clone());
        }
        if let Some(filter) = &self.log {
            config.log_filter = filter.clone();
        }
        config
    }

    /// Produce the output line for one input.
    pub fn render(&self, normalizer: &Normalizer, input: &str) -> String {
        let result = if self.suffix {
            normalizer
                .hostname(input)
                .and_then(|host| normalizer.resolver().public_suffix(&host))
                .ok()
                .map(|found| {
                    let section = match found.section {
                        Some(Section::Icann) => "icann",
                        Some(Section::Private) => "private",
                        None => "implicit",
                    };
                    format!("{}\t{}", found.suffix, section)
                })
        } else if self.strict {
            normalizer.normalize_strict(input)
        } else {
            normalizer.normalize(input).map(|r| r.into_string())
        };

        result.unwrap_or_else(|| NULL_OUTPUT.to_string())
    }

    /// Resolve every input and write one line per input to `out`.
    pub fn run(&self, normalizer: &Normalizer, input: impl BufRead, mut out: impl Write) -> Result<()> {
        if self.inputs.is_empty() {
            for line in input.lines() {
                let line = line.context("Failed to read input line")?;
                writeln!(out, "{}", self.render(normalizer, &line))?;
            }
        } else {
            for raw in &self.inputs {
                writeln!(out, "{}", self.render(normalizer, raw))?;
            }
        }

        out.flush().context("Failed to flush output")?;
        Ok(())
    }
}
