//! # xdis-disasm
//!
//! Table-driven x86 instruction decoder for 16, 32 and 64-bit code.
//!
//! This crate decodes:
//! - legacy and REX encoded instructions, including the 0F, 0F 38 and 0F 3A maps
//! - x87 and 3DNow!
//! - VEX (AVX, AVX2, FMA, BMI, AMX) and AMD XOP
//! - EVEX (AVX-512) with opmask, broadcast and embedded rounding
//!
//! ```
//! use xdis_core::{Bitness, Mnemonic};
//! use xdis_disasm::{decode, DecoderOptions};
//!
//! let inst = decode(&[0x62, 0xF1, 0x7C, 0x48, 0x58, 0xC1], 0, Bitness::Bits64, DecoderOptions::new());
//! assert_eq!(inst.mnemonic, Mnemonic::Vaddps);
//! assert_eq!(inst.length, 6);
//! ```

pub mod error;
pub mod options;
pub mod traits;
pub mod x86;

pub use error::DecodeError;
pub use options::{DecoderOptions, OptionKind};
pub use traits::{DecodedInstruction, Disassembler};
pub use x86::{decode, Decoder, X86Disassembler, MAX_INSTRUCTION_LENGTH};
