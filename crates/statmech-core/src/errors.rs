//! Structured error types shared across statmech crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`StatmechError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Short kebab-case code that tests and callers match on.
    pub code: String,
    /// What went wrong, for humans.
    pub message: String,
    /// Contextual key value pairs (sizes, paths, offending values).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional remediation hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Payload with a code and message and no context.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Records `key = value` alongside the error.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Attaches a suggestion for fixing the input.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            let pairs: Vec<String> = self
                .context
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect();
            write!(f, " | context: [{}]", pairs.join(", "))?;
        }
        match &self.hint {
            Some(hint) => write!(f, " | hint: {hint}"),
            None => Ok(()),
        }
    }
}

/// Canonical error type for the statmech crates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum StatmechError {
    /// Invalid lattice construction parameters or spin data.
    #[error("lattice error: {0}")]
    Lattice(ErrorInfo),
    /// Configuration parsing or validation failures.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Monte Carlo measurement failures.
    #[error("measurement error: {0}")]
    Measurement(ErrorInfo),
    /// Coin-flip sampling and histogram failures.
    #[error("sampling error: {0}")]
    Sampling(ErrorInfo),
    /// Seed derivation or RNG failures.
    #[error("rng error: {0}")]
    Rng(ErrorInfo),
    /// Filesystem, serialization and export errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl StatmechError {
    /// Payload shared by every family.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            StatmechError::Lattice(info)
            | StatmechError::Config(info)
            | StatmechError::Measurement(info)
            | StatmechError::Sampling(info)
            | StatmechError::Rng(info)
            | StatmechError::Serde(info) => info,
        }
    }

    /// Wraps an I/O or encoding failure on `path` into a [`StatmechError::Serde`].
    pub fn io(code: &str, err: impl ToString, path: &std::path::Path) -> Self {
        StatmechError::Serde(
            ErrorInfo::new(code, err.to_string()).with_context("path", path.display()),
        )
    }
}
