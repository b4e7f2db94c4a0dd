//! Error types for xdis-core.

use thiserror::Error;

use crate::RegisterClass;

/// Core error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Register index out of range for its class.
    #[error("register index {index} does not exist in class {class:?}")]
    InvalidRegisterIndex { class: RegisterClass, index: u8 },

    /// Unsupported processor bitness.
    #[error("unsupported bitness: {0}")]
    InvalidBitness(u32),
}
