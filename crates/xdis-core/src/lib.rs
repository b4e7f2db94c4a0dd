//! # xdis-core
//!
//! Data model for the xdis x86 decoder. This crate defines the decoded
//! instruction record together with its operands, registers, memory size
//! tags and mnemonic identifiers. It holds no decoding logic; see
//! `xdis-disasm` for the decode engine.

pub mod arch;
pub mod error;
pub mod form;
pub mod instruction;
pub mod memory_size;
pub mod mnemonic;
pub mod operand;
pub mod register;

pub use arch::{Bitness, EncodingKind};
pub use error::Error;
pub use form::{InstructionForm, OperandShape};
pub use instruction::{Condition, ControlFlow, Instruction, PrefixInfo, RoundingControl};
pub use memory_size::{Element, MemorySize};
pub use mnemonic::Mnemonic;
pub use operand::{Immediate, ImmediateKind, MemoryRef, Operand};
pub use register::{Register, RegisterClass};
