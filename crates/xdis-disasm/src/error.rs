//! Decode error types.

use thiserror::Error;

/// Error type for instruction decoding.
///
/// The decoder never surfaces these as a failed call: every error becomes an
/// [`Mnemonic::Invalid`](xdis_core::Mnemonic::Invalid) instruction and the
/// error itself is kept beside it for callers that want the reason.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The bytes do not form a defined instruction (unknown opcode, forbidden
    /// ModRM form, mode restriction, or the 15 byte limit was exceeded).
    #[error("invalid instruction at {address:#x}")]
    InvalidInstruction { address: u64 },

    /// The buffer ended before the instruction was complete.
    #[error("truncated instruction at {address:#x}: need {needed} bytes, have {available}")]
    NoMoreBytes {
        address: u64,
        needed: usize,
        available: usize,
    },

    /// The prefix sequence cannot be resolved to a single encoding.
    #[error("conflicting prefixes at {address:#x}")]
    PrefixConflict { address: u64 },
}

impl DecodeError {
    /// Creates a new InvalidInstruction error.
    pub fn invalid(address: u64) -> Self {
        Self::InvalidInstruction { address }
    }

    /// Creates a new NoMoreBytes error.
    pub fn no_more_bytes(address: u64, needed: usize, available: usize) -> Self {
        Self::NoMoreBytes {
            address,
            needed,
            available,
        }
    }

    /// Creates a new PrefixConflict error.
    pub fn prefix_conflict(address: u64) -> Self {
        Self::PrefixConflict { address }
    }

    /// Address of the instruction that failed to decode.
    pub fn address(&self) -> u64 {
        match self {
            Self::InvalidInstruction { address }
            | Self::NoMoreBytes { address, .. }
            | Self::PrefixConflict { address } => *address,
        }
    }

    /// Short name of the error class, used in log output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInstruction { .. } => "invalid",
            Self::NoMoreBytes { .. } => "no_more_bytes",
            Self::PrefixConflict { .. } => "prefix_conflict",
        }
    }
}
