//! x86 and x86-64 instruction decoder.
//!
//! Decoding runs in four stages:
//! - the prefix scanner consumes legacy prefixes, REX and the VEX, XOP and
//!   EVEX escapes (`prefix`)
//! - the opcode tables resolve the opcode to a handler, reading ModR/M and
//!   escape bytes on the way ([`tables`])
//! - the handler reads operands and immediates (`handlers`)
//! - the decoder applies prefix checks and classifies control flow
//!   (`decoder`)

mod context;
mod cursor;
mod decoder;
mod handlers;
mod modrm;
mod prefix;
mod size;
mod state;
pub mod tables;

pub use cursor::MAX_INSTRUCTION_LENGTH;
pub use decoder::{decode, Decoder, X86Disassembler};
pub use tables::{tables, Map, Tables};
