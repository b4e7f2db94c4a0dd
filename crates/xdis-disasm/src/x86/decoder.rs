//! Decode entry point.
//!
//! Runs the prefix scanner, the table walk and the matched handler, then
//! applies the prefix checks that depend on what the handler accepted and
//! classifies control flow. Errors never escape: a failed decode yields an
//! [`Mnemonic::Invalid`] record whose length is the number of bytes read.

use tracing::trace;
use xdis_core::{Bitness, Condition, ControlFlow, EncodingKind, Instruction, Mnemonic, Register};

use super::context::DecodeContext;
use super::cursor::MAX_INSTRUCTION_LENGTH;
use super::prefix;
use super::state::StateFlags;
use super::tables;
use crate::error::DecodeError;
use crate::options::DecoderOptions;
use crate::traits::{DecodedInstruction, Disassembler};

/// Sequential decoder over a caller-owned buffer.
///
/// ```
/// use xdis_core::{Bitness, Mnemonic};
/// use xdis_disasm::{Decoder, DecoderOptions};
///
/// let code = [0x55, 0x48, 0x89, 0xE5, 0xC3];
/// let mut decoder = Decoder::new(Bitness::Bits64, &code, DecoderOptions::default());
/// decoder.set_ip(0x1000);
/// let mnemonics: Vec<_> = decoder.map(|i| i.mnemonic).collect();
/// assert_eq!(mnemonics, [Mnemonic::Push, Mnemonic::Mov, Mnemonic::Ret]);
/// ```
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    data: &'a [u8],
    position: usize,
    ip: u64,
    bitness: Bitness,
    options: DecoderOptions,
    last_error: Option<DecodeError>,
}

impl<'a> Decoder<'a> {
    /// Creates a decoder at offset 0 of `data` with instruction pointer 0.
    pub fn new(bitness: Bitness, data: &'a [u8], options: DecoderOptions) -> Self {
        Self {
            data,
            position: 0,
            ip: 0,
            bitness,
            options,
            last_error: None,
        }
    }

    /// Sets the address of the next instruction.
    pub fn set_ip(&mut self, ip: u64) {
        self.ip = ip & self.bitness.ip_mask();
    }

    /// Address of the next instruction.
    pub fn ip(&self) -> u64 {
        self.ip
    }

    /// Moves the read offset; offsets past the end clamp to the end.
    pub fn set_position(&mut self, position: usize) {
        self.position = position.min(self.data.len());
    }

    /// Offset of the next instruction in the buffer.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn bitness(&self) -> Bitness {
        self.bitness
    }

    pub fn options(&self) -> DecoderOptions {
        self.options
    }

    /// Returns whether any bytes are left to decode.
    pub fn can_decode(&self) -> bool {
        self.position < self.data.len()
    }

    /// Why the most recent decode produced an invalid instruction.
    pub fn last_error(&self) -> Option<&DecodeError> {
        self.last_error.as_ref()
    }

    /// Decodes the next instruction and advances past it.
    pub fn decode(&mut self) -> Instruction {
        let mut inst = Instruction::new(self.ip, self.bitness);
        self.decode_out(&mut inst);
        inst
    }

    /// Decodes the next instruction into `inst`, reusing its allocations.
    pub fn decode_out(&mut self, inst: &mut Instruction) {
        let result = decode_into(self.data, self.position, self.ip, self.bitness, self.options, inst);
        self.position += inst.length;
        self.ip = inst.next_ip();
        self.last_error = result.err();
    }
}

impl Iterator for Decoder<'_> {
    type Item = Instruction;

    fn next(&mut self) -> Option<Instruction> {
        if !self.can_decode() {
            return None;
        }
        Some(self.decode())
    }
}

/// Decodes the instruction at `position` of `buffer`.
///
/// The instruction address is its buffer offset. Use [`Decoder`] to decode
/// at another address or to walk a whole buffer.
pub fn decode(buffer: &[u8], position: usize, bitness: Bitness, options: DecoderOptions) -> Instruction {
    let mut inst = Instruction::new(position as u64, bitness);
    // The error is reported through the Invalid mnemonic only.
    let _ = decode_into(buffer, position, position as u64, bitness, options, &mut inst);
    inst
}

/// Fills `inst` with the instruction at `position`. On error `inst` is the
/// Invalid record and the error is returned beside it.
fn decode_into(
    data: &[u8],
    position: usize,
    ip: u64,
    bitness: Bitness,
    options: DecoderOptions,
    inst: &mut Instruction,
) -> Result<(), DecodeError> {
    inst.reset(ip, bitness);
    let mut cx = DecodeContext::new(data, position, ip, bitness, options);

    match decode_one(&mut cx, inst) {
        Ok(()) => Ok(()),
        Err(err) => {
            let available = data.len().saturating_sub(position);
            let length = cx.cursor.consumed().max(1).min(available).min(MAX_INSTRUCTION_LENGTH);
            trace!(
                address = format_args!("{:#x}", ip),
                length,
                kind = err.kind(),
                "invalid instruction"
            );
            inst.reset(ip, bitness);
            inst.length = length;
            inst.bytes.extend_from_slice(&data[position.min(data.len())..][..length]);
            Err(err)
        }
    }
}

fn decode_one(cx: &mut DecodeContext<'_>, inst: &mut Instruction) -> Result<(), DecodeError> {
    let (map, opcode) = prefix::scan(&mut cx.cursor, &mut cx.state)?;
    let (handler, opcode) = tables::resolve(cx, map, opcode)?;
    handler.decode(cx, opcode, inst)?;
    if inst.mnemonic == Mnemonic::Invalid {
        return Err(cx.invalid());
    }

    apply_prefixes(cx, inst)?;
    inst.encoding = if cx.state.flags.contains(StateFlags::NO_IMM) {
        EncodingKind::D3now
    } else {
        cx.state.encoding
    };
    inst.length = cx.cursor.consumed();
    inst.bytes.clear();
    inst.bytes.extend_from_slice(cx.cursor.instruction_bytes());
    inst.control_flow = classify(inst, opcode);
    Ok(())
}

/// Records the prefixes that survive decoding. LOCK on a form that does not
/// accept it makes the instruction invalid; F2/F3 that were not consumed as
/// a mandatory prefix become XACQUIRE/XRELEASE/BND where the form allows
/// and are otherwise kept as REPNE/REP.
fn apply_prefixes(cx: &DecodeContext<'_>, inst: &mut Instruction) -> Result<(), DecodeError> {
    let flags = cx.state.flags;
    let prefixes = &mut inst.prefixes;

    if flags.contains(StateFlags::LOCK) && !flags.contains(StateFlags::LOCK_CONSUMED) {
        if !flags.contains(StateFlags::ALLOW_LOCK) {
            return Err(cx.invalid());
        }
        prefixes.lock = true;
    }

    if !flags.contains(StateFlags::REP_CONSUMED) {
        if flags.contains(StateFlags::REPNE) {
            if flags.contains(StateFlags::ALLOW_XACQUIRE) {
                prefixes.xacquire = true;
            } else if flags.contains(StateFlags::ALLOW_BND) && cx.options.mpx {
                prefixes.bnd = true;
            } else {
                prefixes.repne = true;
            }
        }
        if flags.contains(StateFlags::REP) {
            if flags.contains(StateFlags::ALLOW_XRELEASE) {
                prefixes.xrelease = true;
            } else {
                prefixes.rep = true;
            }
        }
    }

    prefixes.segment = cx.state.segment;
    if cx.state.segment == Some(Register::DS) && flags.contains(StateFlags::ALLOW_NOTRACK) {
        prefixes.notrack = true;
        prefixes.segment = None;
    }
    Ok(())
}

/// Control flow of a decoded instruction. `opcode` is the last opcode byte,
/// whose low nibble is the condition code of Jcc.
fn classify(inst: &Instruction, opcode: u8) -> ControlFlow {
    let next = inst.next_ip();
    let target = inst.near_branch_target();
    match inst.mnemonic {
        Mnemonic::Jmp | Mnemonic::Jmpe => match target {
            Some(target) => ControlFlow::UnconditionalBranch { target },
            None => ControlFlow::IndirectBranch,
        },
        Mnemonic::Call => match target {
            Some(target) => ControlFlow::Call {
                target,
                return_addr: next,
            },
            None => ControlFlow::IndirectCall { return_addr: next },
        },
        Mnemonic::Jo
        | Mnemonic::Jno
        | Mnemonic::Jb
        | Mnemonic::Jae
        | Mnemonic::Je
        | Mnemonic::Jne
        | Mnemonic::Jbe
        | Mnemonic::Ja
        | Mnemonic::Js
        | Mnemonic::Jns
        | Mnemonic::Jp
        | Mnemonic::Jnp
        | Mnemonic::Jl
        | Mnemonic::Jge
        | Mnemonic::Jle
        | Mnemonic::Jg => conditional(target, Condition::from_cc(opcode), next),
        Mnemonic::Jcxz | Mnemonic::Jecxz | Mnemonic::Jrcxz => {
            conditional(target, Condition::CounterZero, next)
        }
        Mnemonic::Loop | Mnemonic::Loope | Mnemonic::Loopne => {
            conditional(target, Condition::CounterNotZero, next)
        }
        Mnemonic::Ret
        | Mnemonic::Retf
        | Mnemonic::Iret
        | Mnemonic::Iretd
        | Mnemonic::Iretq
        | Mnemonic::Sysret
        | Mnemonic::Sysretq
        | Mnemonic::Sysexit
        | Mnemonic::Sysexitq => ControlFlow::Return,
        Mnemonic::Int | Mnemonic::Int1 | Mnemonic::Int3 | Mnemonic::Into => ControlFlow::Interrupt,
        Mnemonic::Syscall | Mnemonic::Sysenter => ControlFlow::Syscall,
        Mnemonic::Hlt | Mnemonic::Ud0 | Mnemonic::Ud1 | Mnemonic::Ud2 => ControlFlow::Halt,
        _ => ControlFlow::Sequential,
    }
}

fn conditional(target: Option<u64>, condition: Condition, fallthrough: u64) -> ControlFlow {
    match target {
        Some(target) => ControlFlow::ConditionalBranch {
            target,
            condition,
            fallthrough,
        },
        None => ControlFlow::Sequential,
    }
}

/// Block-oriented front end over [`Decoder`].
#[derive(Debug, Clone, Copy)]
pub struct X86Disassembler {
    bitness: Bitness,
    options: DecoderOptions,
}

impl X86Disassembler {
    /// Creates a disassembler for `bitness` with default options.
    pub fn new(bitness: Bitness) -> Self {
        Self {
            bitness,
            options: DecoderOptions::default(),
        }
    }

    /// Replaces the decoder options.
    pub fn with_options(mut self, options: DecoderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> DecoderOptions {
        self.options
    }
}

impl Default for X86Disassembler {
    fn default() -> Self {
        Self::new(Bitness::Bits64)
    }
}

impl Disassembler for X86Disassembler {
    fn decode_instruction(&self, bytes: &[u8], address: u64) -> DecodedInstruction {
        let mut decoder = Decoder::new(self.bitness, bytes, self.options);
        decoder.set_ip(address);
        let instruction = decoder.decode();
        DecodedInstruction {
            size: instruction.length,
            error: decoder.last_error,
            instruction,
        }
    }

    fn min_instruction_size(&self) -> usize {
        1
    }

    fn max_instruction_size(&self) -> usize {
        MAX_INSTRUCTION_LENGTH
    }

    fn bitness(&self) -> Bitness {
        self.bitness
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xdis_core::{Operand, RegisterClass};

    fn decode64(bytes: &[u8]) -> Instruction {
        let mut decoder = Decoder::new(Bitness::Bits64, bytes, DecoderOptions::new());
        decoder.set_ip(0x1000);
        decoder.decode()
    }

    #[test]
    fn test_nop() {
        let inst = decode64(&[0x90]);
        assert_eq!(inst.mnemonic, Mnemonic::Nop);
        assert_eq!(inst.length, 1);
        assert_eq!(inst.bytes, [0x90]);
    }

    #[test]
    fn test_push_rbp() {
        let inst = decode64(&[0x55]);
        assert_eq!(inst.mnemonic, Mnemonic::Push);
        assert_eq!(inst.operands, [Operand::reg(Register::RBP)]);
    }

    #[test]
    fn test_ret() {
        let inst = decode64(&[0xC3]);
        assert_eq!(inst.mnemonic, Mnemonic::Ret);
        assert!(matches!(inst.control_flow, ControlFlow::Return));
    }

    #[test]
    fn test_call_rel32() {
        let inst = decode64(&[0xE8, 0x00, 0x01, 0x00, 0x00]);
        assert_eq!(inst.mnemonic, Mnemonic::Call);
        assert!(matches!(
            inst.control_flow,
            ControlFlow::Call { target: 0x1105, return_addr: 0x1005 }
        ));
    }

    #[test]
    fn test_jne_rel8() {
        let inst = decode64(&[0x75, 0x10]);
        assert!(matches!(
            inst.control_flow,
            ControlFlow::ConditionalBranch { target: 0x1012, condition: Condition::NotEqual, fallthrough: 0x1002 }
        ));
    }

    #[test]
    fn test_indirect_jump() {
        let inst = decode64(&[0xFF, 0xE0]);
        assert_eq!(inst.mnemonic, Mnemonic::Jmp);
        assert!(matches!(inst.control_flow, ControlFlow::IndirectBranch));
    }

    #[test]
    fn test_syscall() {
        let inst = decode64(&[0x0F, 0x05]);
        assert_eq!(inst.mnemonic, Mnemonic::Syscall);
        assert!(matches!(inst.control_flow, ControlFlow::Syscall));
    }

    #[test]
    fn test_empty_buffer() {
        let mut decoder = Decoder::new(Bitness::Bits32, &[], DecoderOptions::new());
        assert!(!decoder.can_decode());
        let inst = decoder.decode();
        assert!(inst.is_invalid());
        assert_eq!(inst.length, 0);
        assert!(matches!(decoder.last_error(), Some(DecodeError::NoMoreBytes { .. })));
    }

    #[test]
    fn test_truncated_immediate() {
        let mut decoder = Decoder::new(Bitness::Bits32, &[0x05, 0x01, 0x02], DecoderOptions::new());
        let inst = decoder.decode();
        assert!(inst.is_invalid());
        // The immediate read fails before consuming, so only the opcode counts.
        assert_eq!(inst.length, 1);
        assert_eq!(decoder.position(), 1);
    }

    #[test]
    fn test_lock_requires_memory_destination() {
        let inst = decode64(&[0xF0, 0x01, 0x00]);
        assert_eq!(inst.mnemonic, Mnemonic::Add);
        assert!(inst.prefixes.lock);
        assert!(decode64(&[0xF0, 0x01, 0xC0]).is_invalid());
        assert!(decode64(&[0xF0, 0x90]).is_invalid());
    }

    #[test]
    fn test_xacquire_and_xrelease() {
        let inst = decode64(&[0xF2, 0xF0, 0x01, 0x00]);
        assert!(inst.prefixes.xacquire);
        assert!(!inst.prefixes.repne);
        // F3 on MOV to memory is XRELEASE without LOCK.
        let inst = decode64(&[0xF3, 0x89, 0x00]);
        assert!(inst.prefixes.xrelease);
        // Without a lockable memory form F2 stays REPNE.
        let inst = decode64(&[0xF2, 0x01, 0x00]);
        assert!(inst.prefixes.repne);
        assert!(!inst.prefixes.xacquire);
    }

    #[test]
    fn test_bnd_needs_mpx() {
        let bytes = [0xF2, 0xC3];
        assert!(decode64(&bytes).prefixes.repne);
        let options = DecoderOptions::new().with_mpx(true);
        let inst = decode(&bytes, 0, Bitness::Bits64, options);
        assert!(inst.prefixes.bnd);
        assert!(!inst.prefixes.repne);
    }

    #[test]
    fn test_notrack() {
        let inst = decode64(&[0x3E, 0xFF, 0xD0]);
        assert_eq!(inst.mnemonic, Mnemonic::Call);
        assert!(inst.prefixes.notrack);
        assert_eq!(inst.prefixes.segment, None);
    }

    #[test]
    fn test_rep_string() {
        let inst = decode64(&[0xF3, 0xA4]);
        assert_eq!(inst.mnemonic, Mnemonic::Movsb);
        assert!(inst.prefixes.rep);
    }

    #[test]
    fn test_iterator_walks_buffer() {
        let code = [0x55, 0xFF, 0x90, 0x48, 0x89, 0xE5];
        let decoder = Decoder::new(Bitness::Bits64, &code, DecoderOptions::new());
        let lengths: Vec<_> = decoder.map(|i| i.length).collect();
        // FF 90 runs out of bytes in its disp32; only the bytes read are skipped.
        assert_eq!(lengths, [1, 2, 3]);
    }

    #[test]
    fn test_ip_wraps_in_16bit_mode() {
        let mut decoder = Decoder::new(Bitness::Bits16, &[0x90, 0x90], DecoderOptions::new());
        decoder.set_ip(0xFFFF);
        decoder.decode();
        assert_eq!(decoder.ip(), 0);
    }

    #[test]
    fn test_3dnow_encoding() {
        // PFADD mm0, mm1
        let inst = decode(&[0x0F, 0x0F, 0xC1, 0x9E], 0, Bitness::Bits32, DecoderOptions::new());
        assert_eq!(inst.mnemonic, Mnemonic::Pfadd);
        assert_eq!(inst.encoding, EncodingKind::D3now);
        assert_eq!(inst.operands[0], Operand::reg(Register::new(RegisterClass::Mmx, 0)));
    }

    #[test]
    fn test_disassembler_reports_error() {
        let disasm = X86Disassembler::new(Bitness::Bits64);
        let decoded = disasm.decode_instruction(&[0x0F, 0x0B], 0x400000);
        assert_eq!(decoded.instruction.mnemonic, Mnemonic::Ud2);
        assert!(decoded.error.is_none());
        assert!(matches!(decoded.instruction.control_flow, ControlFlow::Halt));

        let decoded = disasm.decode_instruction(&[0x06], 0x400000);
        assert!(decoded.instruction.is_invalid());
        assert_eq!(decoded.size, 1);
        assert_eq!(decoded.error, Some(DecodeError::invalid(0x400000)));
    }

    #[test]
    fn test_block_resumes_after_undefined_bytes() {
        let disasm = X86Disassembler::new(Bitness::Bits64);
        // push rbp; an opcode removed in 64-bit mode; ret.
        let block = disasm.disassemble_block(&[0x55, 0x06, 0xC3], 0x2000);
        assert_eq!(block.len(), 3);
        assert_eq!(block[0].as_ref().map(|inst| inst.mnemonic), Ok(Mnemonic::Push));
        assert_eq!(block[1], Err(DecodeError::invalid(0x2001)));
        let ret = block[2].as_ref().map(|inst| (inst.mnemonic, inst.address)).ok();
        assert_eq!(ret, Some((Mnemonic::Ret, 0x2002)));
        assert!(disasm.disassemble_block(&[], 0).is_empty());
    }
}
