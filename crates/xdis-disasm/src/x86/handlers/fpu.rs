//! x87 forms.

use xdis_core::{Instruction, MemorySize, Mnemonic, Operand, Register};

use crate::error::DecodeError;
use crate::x86::context::DecodeContext;
use crate::x86::size::{OpSize, SizePolicy};

/// Register operand layout of an x87 register-form instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FpuForm {
    /// `st(0), st(i)`
    St0Sti,
    /// `st(i), st(0)`
    StiSt0,
    /// `st(i)`
    Sti,
    /// `ax` (FNSTSW AX and the 287 FSTDW/FSTSG forms)
    Ax,
}

pub(super) fn decode_fpu_mem(
    cx: &mut DecodeContext<'_>,
    inst: &mut Instruction,
    m: Mnemonic,
    size: MemorySize,
) -> Result<(), DecodeError> {
    let mem = cx.memory(size)?;
    inst.mnemonic = m;
    inst.operands.push(mem);
    Ok(())
}

/// FLDENV/FNSTENV and FRSTOR/FNSAVE; the image layout follows the operand size.
pub(super) fn decode_fpu_env(
    cx: &mut DecodeContext<'_>,
    inst: &mut Instruction,
    m: Mnemonic,
    state: bool,
) -> Result<(), DecodeError> {
    let small = cx.op_size(SizePolicy::Default) == OpSize::Size16;
    let size = match (state, small) {
        (false, true) => MemorySize::FpuEnv14,
        (false, false) => MemorySize::FpuEnv28,
        (true, true) => MemorySize::FpuState94,
        (true, false) => MemorySize::FpuState108,
    };
    decode_fpu_mem(cx, inst, m, size)
}

pub(super) fn decode_fpu_reg(
    cx: &mut DecodeContext<'_>,
    inst: &mut Instruction,
    m: Mnemonic,
    form: FpuForm,
) -> Result<(), DecodeError> {
    let modrm = cx.modrm_register()?;
    let sti = Operand::Register(Register::st(modrm.rm));
    let st0 = Operand::Register(Register::ST0);
    inst.mnemonic = m;
    match form {
        FpuForm::St0Sti => inst.operands.extend([st0, sti]),
        FpuForm::StiSt0 => inst.operands.extend([sti, st0]),
        FpuForm::Sti => inst.operands.push(sti),
        FpuForm::Ax => inst.operands.push(Operand::Register(Register::AX)),
    }
    Ok(())
}
