//! Database function boundary.
//!
//! Models the lifecycle a MySQL-style loadable function goes through:
//! `init` once per statement with the argument types, `call` once per row,
//! `deinit` when the statement ends. A C shim exporting `get_etld_p1_init`,
//! `get_etld_p1` and `get_etld_p1_deinit` only has to marshal its arguments
//! into these methods.

use std::panic::{catch_unwind, AssertUnwindSafe};

use once_cell::sync::OnceCell;
use tracing::Level;

use crate::config::Config;
use crate::error::EtldError;
use crate::url::Normalizer;

/// SQL name of the lenient function.
pub const FUNCTION_NAME: &str = "get_etld_p1";

/// SQL name of the strict function.
pub const STRICT_FUNCTION_NAME: &str = "get_etld_p1_strict";

/// Argument types a host can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType {
    String,
    Integer,
    Real,
    Decimal,
}

/// Which normalizer pipeline a function runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Lenient cleanup, scheme inference and bypasses. Exactly one argument.
    Standard,
    /// Input parsed as given. Extra arguments are accepted and ignored.
    Strict,
}

/// What `init` reports back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitOutcome {
    /// The result may be `NULL`.
    pub maybe_null: bool,
}

/// One registered database function.
#[derive(Debug, Clone)]
pub struct EtldFunction {
    mode: Mode,
    normalizer: Normalizer,
}

impl EtldFunction {
    pub fn new(mode: Mode, normalizer: Normalizer) -> Self {
        Self { mode, normalizer }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// SQL name the function is registered under.
    pub fn name(&self) -> &'static str {
        match self.mode {
            Mode::Standard => FUNCTION_NAME,
            Mode::Strict => STRICT_FUNCTION_NAME,
        }
    }

    /// Check the declared arguments and coerce the first one to a string.
    ///
    /// This is the only place an error reaches the host: the returned
    /// message should be copied into the host's message buffer.
    pub fn init(&self, arg_types: &mut [ArgType]) -> Result<InitOutcome, EtldError> {
        let count = arg_types.len();
        let accepted = match self.mode {
            Mode::Standard => count == 1,
            Mode::Strict => count >= 1,
        };
        if !accepted {
            return Err(EtldError::InvalidParameterCount(count));
        }

        arg_types[0] = ArgType::String;

        Ok(InitOutcome { maybe_null: true })
    }

    /// Compute the result for one row.
    ///
    /// `args` holds the raw bytes of each argument, `None` for SQL `NULL`.
    /// Only the first argument is read. `None` is returned for "no value";
    /// the result length is the byte length of the returned string. This
    /// never panics across the boundary.
    pub fn call(&self, args: &[Option<&[u8]>]) -> Option<String> {
        let raw = args.first().copied().flatten()?;
        let input = String::from_utf8_lossy(raw);

        let outcome = catch_unwind(AssertUnwindSafe(|| match self.mode {
            Mode::Standard => self.normalizer.normalize(&input).map(|r| r.into_string()),
            Mode::Strict => self.normalizer.normalize_strict(&input),
        }));

        match outcome {
            Ok(result) => result,
            Err(_) => {
                self.normalizer
                    .report(Level::ERROR, &format!("{} panicked on input {:?}", self.name(), input));
                None
            }
        }
    }

    /// Release per-statement state. There is none.
    pub fn deinit(&self) {}
}

/// The pair of functions a loaded plugin exposes.
#[derive(Debug, Clone)]
pub struct Engine {
    pub standard: EtldFunction,
    pub strict: EtldFunction,
}

impl Engine {
    /// Build both functions over one shared rule source.
    pub fn from_config(config: &Config) -> Result<Self, EtldError> {
        let normalizer = config.normalizer()?;

        Ok(Self {
            standard: EtldFunction::new(Mode::Standard, normalizer.clone()),
            strict: EtldFunction::new(Mode::Strict, normalizer),
        })
    }

    /// Look a function up by its SQL name.
    pub fn function(&self, name: &str) -> Option<&EtldFunction> {
        [&self.standard, &self.strict]
            .into_iter()
            .find(|function| function.name().eq_ignore_ascii_case(name))
    }
}

static ENGINE: OnceCell<Engine> = OnceCell::new();

/// The process-wide engine, configured from the environment on first use.
///
/// Logging is set up at the same time. A failed build (unreadable rule
/// file) is returned to the caller and retried on the next call.
pub fn engine() -> Result<&'static Engine, EtldError> {
    ENGINE.get_or_try_init(|| {
        let config = Config::from_env();
        crate::logging::init_logging(&config.log_filter);
        Engine::from_config(&config)
    })
}
