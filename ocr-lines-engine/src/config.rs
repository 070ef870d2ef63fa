use std::time::Duration;

use tracing::warn;

pub const PYTHON_BIN_VAR: &str = "OCR_PYTHON_BIN";
pub const TIMEOUT_MS_VAR: &str = "OCR_TIMEOUT_MS";

const DEFAULT_PYTHON_BIN: &str = "python";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const MIN_TIMEOUT: Duration = Duration::from_secs(5);

/// How to reach the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Interpreter that can `import paddleocr`.
    pub python: String,
    /// Upper bound on one recognition call.
    pub timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            python: DEFAULT_PYTHON_BIN.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(python) = lookup(PYTHON_BIN_VAR).filter(|v| !v.trim().is_empty()) {
            config.python = python.trim().to_string();
        }

        if let Some(raw) = lookup(TIMEOUT_MS_VAR) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config.timeout = Duration::from_millis(ms).max(MIN_TIMEOUT),
                Err(err) => warn!(
                    value = raw.as_str(),
                    %err,
                    "ignoring {TIMEOUT_MS_VAR}, using {:?}",
                    config.timeout
                ),
            }
        }

        config
    }
}
