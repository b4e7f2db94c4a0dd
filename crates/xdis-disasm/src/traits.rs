//! The block decoding interface.

use crate::DecodeError;
use xdis_core::{Bitness, Instruction};

/// One decode step: the record, how far it advanced, and the failure if the
/// bytes were undefined.
#[derive(Debug, Clone)]
pub struct DecodedInstruction {
    /// Decoded record, or the Invalid sentinel.
    pub instruction: Instruction,
    /// Bytes read, including those of a rejected encoding.
    pub size: usize,
    /// Set exactly when `instruction` is the Invalid sentinel.
    pub error: Option<DecodeError>,
}

impl DecodedInstruction {
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// The record on success, the failure otherwise.
    pub fn into_result(self) -> Result<Instruction, DecodeError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.instruction),
        }
    }
}

/// A decoder bound to one processor mode that can walk a byte range.
pub trait Disassembler {
    /// Decodes the instruction at the front of `bytes`, which sit at
    /// `address`. Never fails outright: undefined bytes come back as the
    /// Invalid sentinel with the reason in [`DecodedInstruction::error`].
    fn decode_instruction(&self, bytes: &[u8], address: u64) -> DecodedInstruction;

    /// Shortest encoding in bytes.
    fn min_instruction_size(&self) -> usize;

    /// Longest encoding the processor accepts, in bytes.
    fn max_instruction_size(&self) -> usize;

    fn bitness(&self) -> Bitness;

    /// Decodes `bytes` back to back from `start_address`. Undefined
    /// encodings are reported in place and decoding resumes after the bytes
    /// they covered, so the result always spans the whole range.
    fn disassemble_block(&self, bytes: &[u8], start_address: u64) -> Vec<Result<Instruction, DecodeError>> {
        let mut out = Vec::new();
        let mut offset = 0;
        while let Some(rest) = bytes.get(offset..).filter(|rest| !rest.is_empty()) {
            let decoded = self.decode_instruction(rest, start_address.wrapping_add(offset as u64));
            offset += decoded.size.max(1);
            out.push(decoded.into_result());
        }
        out
    }
}
