//! Decode context threaded through table descent and handlers.

use xdis_core::{
    Bitness, Immediate, ImmediateKind, MemoryRef, MemorySize, Operand, Register, RegisterClass,
};

use super::cursor::ByteCursor;
use super::modrm::{self, MemoryForm, ModRm};
use super::size::{self, OpSize, SizePolicy};
use super::state::{DecoderState, StateFlags};
use crate::error::DecodeError;
use crate::options::DecoderOptions;

/// Cursor, state and options for one instruction.
#[derive(Debug, Clone)]
pub struct DecodeContext<'a> {
    pub cursor: ByteCursor<'a>,
    pub state: DecoderState,
    pub options: DecoderOptions,
}

impl<'a> DecodeContext<'a> {
    /// Creates a context for the instruction at `position` in `data`.
    pub fn new(
        data: &'a [u8],
        position: usize,
        address: u64,
        bitness: Bitness,
        options: DecoderOptions,
    ) -> Self {
        Self {
            cursor: ByteCursor::new(data, position, address),
            state: DecoderState::new(bitness),
            options,
        }
    }

    /// Error for an undefined encoding of the current instruction.
    pub fn invalid(&self) -> DecodeError {
        DecodeError::invalid(self.cursor.address())
    }

    /// Reads (or returns the already read) ModR/M byte.
    pub fn modrm(&mut self) -> Result<ModRm, DecodeError> {
        self.state.read_modrm(&mut self.cursor)
    }

    /// Reads ModR/M and fails unless it is the register form.
    pub fn modrm_register(&mut self) -> Result<ModRm, DecodeError> {
        let modrm = self.modrm()?;
        if !modrm.is_register() {
            return Err(self.invalid());
        }
        Ok(modrm)
    }

    /// Reads ModR/M and fails unless it is a memory form.
    pub fn modrm_memory(&mut self) -> Result<ModRm, DecodeError> {
        let modrm = self.modrm()?;
        if modrm.is_register() {
            return Err(self.invalid());
        }
        Ok(modrm)
    }

    /// Operand size of a form with the given policy.
    pub fn op_size(&self, policy: SizePolicy) -> OpSize {
        self.state.operand_size_for(policy, self.options.amd)
    }

    /// Marks prefixes the current form accepts.
    pub fn allow(&mut self, flags: StateFlags) {
        self.state.flags.insert(flags);
    }

    /// Extended ModR/M.reg index.
    pub fn reg_index(&self, modrm: ModRm) -> u8 {
        modrm.reg | self.state.ext_r
    }

    /// Extended ModR/M.rm index.
    pub fn rm_index(&self, modrm: ModRm) -> u8 {
        modrm.rm | self.state.ext_b
    }

    /// General purpose register of the given width.
    pub fn gpr(&self, size: OpSize, index: u8) -> Register {
        size::gpr(size, index, self.state.has_rex())
    }

    /// ModR/M.reg as a general purpose register.
    pub fn reg_gpr(&mut self, size: OpSize) -> Result<Operand, DecodeError> {
        let modrm = self.modrm()?;
        Ok(Operand::Register(self.gpr(size, self.reg_index(modrm))))
    }

    /// ModR/M.rm as a general purpose register or a memory operand.
    pub fn rm_gpr(&mut self, size: OpSize, mem: MemorySize) -> Result<Operand, DecodeError> {
        let modrm = self.modrm()?;
        if modrm.is_register() {
            Ok(Operand::Register(self.gpr(size, self.rm_index(modrm))))
        } else {
            self.memory(mem)
        }
    }

    /// ModR/M.rm as a memory operand; the register form is invalid.
    pub fn memory(&mut self, size: MemorySize) -> Result<Operand, DecodeError> {
        Ok(Operand::Memory(self.memory_ref(size, MemoryForm::PLAIN)?))
    }

    /// Decodes the memory form of ModR/M with explicit addressing options.
    pub fn memory_ref(&mut self, size: MemorySize, form: MemoryForm) -> Result<MemoryRef, DecodeError> {
        self.modrm_memory()?;
        modrm::decode_memory(&mut self.cursor, &self.state, size, form)
    }

    /// Register in the low three opcode bits, extended by REX.B.
    pub fn opcode_gpr(&self, opcode: u8, size: OpSize) -> Register {
        self.gpr(size, (opcode & 7) | self.state.ext_b)
    }

    /// Reads an immediate and extends it as `kind` describes.
    pub fn immediate(&mut self, kind: ImmediateKind) -> Result<Operand, DecodeError> {
        let value = match kind {
            ImmediateKind::Imm8 | ImmediateKind::Imm8Second => self.cursor.read_u8()? as u64,
            ImmediateKind::Imm16 => self.cursor.read_u16()? as u64,
            ImmediateKind::Imm32 => self.cursor.read_u32()? as u64,
            ImmediateKind::Imm64 => self.cursor.read_u64()?,
            ImmediateKind::Imm8to16 => self.cursor.read_u8()? as i8 as i16 as u16 as u64,
            ImmediateKind::Imm8to32 => self.cursor.read_u8()? as i8 as i32 as u32 as u64,
            ImmediateKind::Imm8to64 => self.cursor.read_u8()? as i8 as i64 as u64,
            ImmediateKind::Imm32to64 => self.cursor.read_u32()? as i32 as i64 as u64,
        };
        Ok(Operand::Immediate(Immediate { value, kind }))
    }

    /// Reads an `Iz` immediate: 16 or 32 bits, sign-extended for 64-bit operands.
    pub fn immediate_z(&mut self, size: OpSize) -> Result<Operand, DecodeError> {
        self.immediate(match size {
            OpSize::Size8 => ImmediateKind::Imm8,
            OpSize::Size16 => ImmediateKind::Imm16,
            OpSize::Size32 => ImmediateKind::Imm32,
            OpSize::Size64 => ImmediateKind::Imm32to64,
        })
    }

    /// Reads an 8-bit immediate sign-extended to the operand size.
    pub fn immediate_sx8(&mut self, size: OpSize) -> Result<Operand, DecodeError> {
        self.immediate(match size {
            OpSize::Size8 => ImmediateKind::Imm8,
            OpSize::Size16 => ImmediateKind::Imm8to16,
            OpSize::Size32 => ImmediateKind::Imm8to32,
            OpSize::Size64 => ImmediateKind::Imm8to64,
        })
    }

    /// Accumulator register of the given width.
    pub fn accumulator(&self, size: OpSize) -> Register {
        Register::new(size.gpr_class(), 0)
    }

    /// Index-register file for the current address size.
    pub fn address_class(&self) -> RegisterClass {
        self.state.address_size.gpr_class()
    }

    /// Computes a near branch target from a displacement read at the end of
    /// the instruction, truncated to the operand size.
    pub fn branch_target(&self, displacement: i64, size: OpSize) -> u64 {
        let next_ip = self
            .cursor
            .address()
            .wrapping_add(self.cursor.consumed() as u64);
        next_ip.wrapping_add(displacement as u64) & size.mask()
    }
}
