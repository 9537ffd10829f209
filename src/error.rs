//! Error taxonomy for the composition engine.
//!
//! Only descriptor validation and registration surface errors to callers.
//! Resolution misses are recovered locally by the composer, which swaps in a
//! placeholder widget and records the miss on it.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::params::ParamShape;

/// A descriptor failed validation and was rejected before reaching the
/// registry or the composer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("empty id at {path}")]
    EmptyId { path: String },
    #[error("duplicate id `{id}` among siblings at {path}")]
    DuplicateId { path: String, id: String },
    #[error("submenu nesting at {path} exceeds {max} levels")]
    NestingTooDeep { path: String, max: usize },
    #[error("tool entry `{id}` at {path} has an empty widget kind")]
    EmptyWidgetKind { path: String, id: String },
}

/// Registry mutation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("widget kind `{kind}` is already registered with a different factory")]
    Conflict { kind: String },
    #[error("widget kind must not be empty")]
    EmptyKind,
}

/// Raised by a widget factory that could not build its widget.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct FactoryError(pub String);

impl FactoryError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Why a tool entry was rendered as a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionMiss {
    #[error("no widget factory registered for kind `{kind}`")]
    UnknownKind { kind: String },
    #[error("kind `{kind}` expects {expected} params, got {found}")]
    ParamsMismatch {
        kind: String,
        expected: ParamShape,
        found: ParamShape,
    },
    #[error("factory for kind `{kind}` failed: {source}")]
    FactoryFailed {
        kind: String,
        #[source]
        source: FactoryError,
    },
}

/// Failure to read descriptors from disk or parse them.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read descriptors from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse descriptors: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Failure to mount a shell.
#[derive(Debug, Error)]
pub enum MountError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("descriptors rejected: {0}")]
    Invalid(#[from] ValidationError),
}
