//! Error types for the plugin shim.
//!
//! Nothing in here crosses the flat ABI. Exported functions speak `HRESULT`
//! only; these errors are for Rust code embedding a plugin or loading a
//! shim library, and [`ShimError::code`] maps them back to the boundary.

use crate::types::{E_FAIL, E_NOTIMPL, HRESULT, S_FALSE, S_OK};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for shim operations.
pub type Result<T> = std::result::Result<T, ShimError>;

/// Stage at which loading a shim library failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStage {
    /// Failed to open the shared library
    Opening,
    /// Failed to resolve an exported symbol
    Symbols,
    /// `<kind>_create` returned null
    Instantiation,
    /// `<kind>_init` rejected the callback tables
    Initialization,
}

impl std::fmt::Display for LoadStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Opening => write!(f, "opening"),
            Self::Symbols => write!(f, "symbols"),
            Self::Instantiation => write!(f, "instantiation"),
            Self::Initialization => write!(f, "initialization"),
        }
    }
}

/// Errors raised by the Rust-side API of the shim.
#[derive(Debug, Error)]
pub enum ShimError {
    /// The host (or the plugin, seen from a loader) returned a failure code
    #[error("Call returned HRESULT {code:#010x}")]
    Host { code: HRESULT },

    /// The operation is a valid extension point the callee does not supply
    #[error("Not implemented")]
    NotImplemented,

    /// No callback table has been bound with `init` yet
    #[error("Callbacks not initialized")]
    NotInitialized,

    /// A pointer required by the operation was null
    #[error("Null pointer: {0}")]
    NullPointer(&'static str),

    /// A Rust string could not be handed to C (interior NUL)
    #[error("Invalid string: {0}")]
    InvalidString(String),

    /// Loading a shim library failed at a specific stage
    #[error("Failed to load plugin library at {path}: {stage} - {reason}")]
    LoadFailed {
        path: PathBuf,
        stage: LoadStage,
        reason: String,
    },

    /// The operation does not exist for this plugin kind
    #[error("Unsupported operation: {0}")]
    Unsupported(&'static str),
}

impl ShimError {
    /// The `HRESULT` this error is reported as across the flat ABI.
    pub fn code(&self) -> HRESULT {
        match self {
            Self::Host { code } => *code,
            Self::NotImplemented => E_NOTIMPL,
            _ => E_FAIL,
        }
    }
}

/// Turns a raw `HRESULT` into a `Result`.
///
/// `S_OK` and `S_FALSE` are both completions; the returned flag is `false`
/// for the benign-false case.
pub fn check(code: HRESULT) -> Result<bool> {
    match code {
        S_OK => Ok(true),
        S_FALSE => Ok(false),
        E_NOTIMPL => Err(ShimError::NotImplemented),
        code => Err(ShimError::Host { code }),
    }
}
