//! Error handling for AutoPaint
//!
//! Two kinds of failure exist in the pipeline:
//! - Configuration errors reject a job before any layer is touched.
//! - Geometry problems found while a job runs are recovered on the spot and
//!   only reported as [`Diagnostic`]s.
//!
//! All error types use `thiserror` for ergonomic error handling.

use std::io;
use thiserror::Error;

/// Configuration error type
///
/// Raised when settings or the palette cannot be used to start a job.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A numeric setting must be strictly positive
    #[error("Setting '{name}' must be positive, got {value}")]
    NonPositive {
        /// The setting name.
        name: String,
        /// The rejected value.
        value: f64,
    },

    /// A numeric setting is NaN or infinite
    #[error("Setting '{name}' must be a finite number")]
    NotFinite {
        /// The setting name.
        name: String,
    },

    /// The palette holds no tools
    #[error("Palette must contain at least one tool")]
    EmptyPalette,

    /// Two palette tools share a name
    #[error("Duplicate palette tool: {0}")]
    DuplicateTool(String),

    /// A tool index does not exist in the palette
    #[error("Unknown palette tool index {index}")]
    UnknownTool {
        /// The offending index.
        index: usize,
    },

    /// A color string could not be parsed
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// The fill strategy name is not one of hatch, pocket or overlay
    #[error("Unknown fill strategy '{0}' (expected hatch, pocket or overlay)")]
    UnknownStrategy(String),

    /// The settings file extension is not understood
    #[error("Unsupported settings format: {0}")]
    UnsupportedFormat(String),

    /// I/O error while reading or writing settings
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error
    #[error("TOML error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Conditions recovered locally while a job runs.
///
/// These never abort a job. They are logged when verbose diagnostics are
/// enabled so pathological artwork can be tracked down.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// Zero-length path or zero-area fill bounds; the path was dropped
    #[error("Degenerate geometry in '{path}': {reason}")]
    DegenerateGeometry {
        /// Name of the dropped path.
        path: String,
        /// What made it degenerate.
        reason: String,
    },

    /// A fill finished with partial (or no) coverage
    #[error("Incomplete fill coverage in '{path}': {reason}")]
    IncompleteFillCoverage {
        /// Name of the fill path.
        path: String,
        /// Which completion rule fired.
        reason: String,
    },
}

impl Diagnostic {
    /// Create a degenerate-geometry diagnostic
    pub fn degenerate(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an incomplete-coverage diagnostic
    pub fn incomplete(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::IncompleteFillCoverage {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Log this diagnostic if verbose diagnostics are enabled.
    pub fn report(&self, verbose: bool) {
        if verbose {
            tracing::debug!("{}", self);
        }
    }
}

/// Main error type for AutoPaint
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Scene could not be parsed
    #[error("Scene parse error: {0}")]
    Scene(#[from] serde_json::Error),
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
