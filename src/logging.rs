//! Diagnostics for per-call failures.
//!
//! The normalizer never reports failures to its caller beyond "no value";
//! instead it writes one line per event to a [`DiagnosticSink`]. The default
//! sink forwards to `tracing`, which [`init_logging`] points at stderr with
//! timestamps.

use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Filter used when none is configured or the configured one is invalid.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Receives leveled diagnostic messages.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, level: Level, message: &str);
}

/// Forwards diagnostics to the `tracing` subscriber under the `etldp1` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, level: Level, message: &str) {
        if level == Level::ERROR {
            tracing::error!(target: "etldp1", "{}", message);
        } else if level == Level::WARN {
            tracing::warn!(target: "etldp1", "{}", message);
        } else if level == Level::INFO {
            tracing::info!(target: "etldp1", "{}", message);
        } else if level == Level::DEBUG {
            tracing::debug!(target: "etldp1", "{}", message);
        } else {
            tracing::trace!(target: "etldp1", "{}", message);
        }
    }
}

/// Keeps every diagnostic in memory, for tests and embedding callers.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<(Level, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events, oldest first.
    pub fn events(&self) -> Vec<(Level, String)> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events().is_empty()
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, level: Level, message: &str) {
        let mut events = match self.events.lock() {
            Ok(events) => events,
            Err(poisoned) => poisoned.into_inner(),
        };
        events.push((level, message.to_string()));
    }
}

/// Install a stderr subscriber using `filter` (an `EnvFilter` directive string).
///
/// Returns `false` if a global subscriber was already installed, which is
/// expected when the crate is embedded in a host that configures `tracing`
/// itself.
pub fn init_logging(filter: &str) -> bool {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_records_events() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());

        sink.emit(Level::ERROR, "first");
        sink.emit(Level::WARN, "second");

        assert_eq!(
            sink.events(),
            vec![
                (Level::ERROR, "first".to_string()),
                (Level::WARN, "second".to_string())
            ]
        );
    }

    #[test]
    fn test_tracing_sink_without_subscriber() {
        // Must not panic when nothing is listening
        TracingSink.emit(Level::ERROR, "nobody hears this");
        TracingSink.emit(Level::TRACE, "or this");
    }

    #[test]
    fn test_init_logging_is_repeatable() {
        // Only the first call in the process can install the subscriber
        let _ = init_logging("debug");
        assert!(!init_logging("not a [valid filter"));
    }
}
