//! System and control-register forms.

use xdis_core::{Instruction, MemorySize, Mnemonic, Operand, Register, RegisterClass};

use crate::error::DecodeError;
use crate::x86::context::DecodeContext;
use crate::x86::size::{OpSize, SizePolicy};
use crate::x86::state::StateFlags;

pub(super) fn decode_rv(
    cx: &mut DecodeContext<'_>,
    inst: &mut Instruction,
    m: Mnemonic,
    size: SizePolicy,
) -> Result<(), DecodeError> {
    let modrm = cx.modrm_register()?;
    let size = cx.op_size(size);
    inst.mnemonic = m;
    inst.operands.push(Operand::Register(cx.gpr(size, cx.rm_index(modrm))));
    Ok(())
}

pub(super) fn decode_m(
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

pub(super) fn decode_ew(
    cx: &mut DecodeContext<'_>,
    inst: &mut Instruction,
    m: Mnemonic,
    sized_reg: bool,
) -> Result<(), DecodeError> {
    let size = if sized_reg {
        cx.op_size(SizePolicy::Default)
    } else {
        OpSize::Size16
    };
    let op = cx.rm_gpr(size, MemorySize::UInt16)?;
    inst.mnemonic = m;
    inst.operands.push(op);
    Ok(())
}

pub(super) fn decode_gew(cx: &mut DecodeContext<'_>, inst: &mut Instruction, m: Mnemonic) -> Result<(), DecodeError> {
    let size = cx.op_size(SizePolicy::Default);
    let dst = cx.reg_gpr(size)?;
    let src = cx.rm_gpr(size, MemorySize::UInt16)?;
    inst.mnemonic = m;
    inst.operands.extend([dst, src]);
    Ok(())
}

pub(super) fn decode_desc_table(
    cx: &mut DecodeContext<'_>,
    inst: &mut Instruction,
    m: Mnemonic,
) -> Result<(), DecodeError> {
    let size = if cx.state.is_64bit() {
        MemorySize::Fword10
    } else {
        MemorySize::Fword6
    };
    let mem = cx.memory(size)?;
    inst.mnemonic = m;
    inst.operands.push(mem);
    Ok(())
}

/// GPR side of MOV to/from CR/DR/TR. The mod field is ignored; the operand
/// is always a register of the mode's natural width.
fn control_gpr(cx: &mut DecodeContext<'_>) -> Result<Operand, DecodeError> {
    let modrm = cx.modrm()?;
    let size = if cx.state.is_64bit() {
        OpSize::Size64
    } else {
        OpSize::Size32
    };
    Ok(Operand::Register(cx.gpr(size, cx.rm_index(modrm))))
}

fn push_pair(inst: &mut Instruction, special: Operand, gpr: Operand, to_special: bool) {
    inst.mnemonic = Mnemonic::Mov;
    if to_special {
        inst.operands.extend([special, gpr]);
    } else {
        inst.operands.extend([gpr, special]);
    }
}

pub(super) fn decode_mov_cr(
    cx: &mut DecodeContext<'_>,
    inst: &mut Instruction,
    to_cr: bool,
) -> Result<(), DecodeError> {
    let modrm = cx.modrm()?;
    let mut index = cx.reg_index(modrm);
    // AMD encodes CR8 outside 64-bit mode as LOCK MOV CR0.
    if index == 0 && cx.options.amd && cx.state.flags.contains(StateFlags::LOCK) {
        cx.state.flags.insert(StateFlags::LOCK_CONSUMED);
        index = 8;
    }
    if !matches!(index, 0 | 2 | 3 | 4 | 8) {
        return Err(cx.invalid());
    }
    let gpr = control_gpr(cx)?;
    push_pair(inst, Operand::Register(Register::new(RegisterClass::Control, index)), gpr, to_cr);
    Ok(())
}

pub(super) fn decode_mov_dr(
    cx: &mut DecodeContext<'_>,
    inst: &mut Instruction,
    to_dr: bool,
) -> Result<(), DecodeError> {
    let modrm = cx.modrm()?;
    let index = cx.reg_index(modrm);
    if index > 7 {
        return Err(cx.invalid());
    }
    let gpr = control_gpr(cx)?;
    push_pair(inst, Operand::Register(Register::new(RegisterClass::Debug, index)), gpr, to_dr);
    Ok(())
}

pub(super) fn decode_mov_tr(
    cx: &mut DecodeContext<'_>,
    inst: &mut Instruction,
    to_tr: bool,
) -> Result<(), DecodeError> {
    if cx.state.is_64bit() {
        return Err(cx.invalid());
    }
    let modrm = cx.modrm()?;
    let gpr = control_gpr(cx)?;
    push_pair(inst, Operand::Register(Register::new(RegisterClass::Test, modrm.reg)), gpr, to_tr);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::test_util::run;
    use super::super::Handler;
    use super::*;
    use crate::options::DecoderOptions;
    use xdis_core::Bitness;

    #[test]
    fn test_mov_cr_ignores_mod() {
        let h = Handler::MovCr { to_cr: false };
        let (inst, len) = run(h, Bitness::Bits64, 0x20, &[0x18]).unwrap();
        assert_eq!(len, 1);
        assert_eq!(
            inst.operands,
            vec![
                Operand::reg(Register::RAX),
                Operand::reg(Register::new(RegisterClass::Control, 3))
            ]
        );
    }

    #[test]
    fn test_mov_cr_rejects_cr1() {
        assert!(run(Handler::MovCr { to_cr: true }, Bitness::Bits32, 0x22, &[0xC8]).is_err());
    }

    #[test]
    fn test_amd_lock_mov_cr0_is_cr8() {
        let bytes = [0xC0];
        let options = DecoderOptions::new().with_amd(true);
        let mut cx = DecodeContext::new(&bytes, 0, 0, Bitness::Bits32, options);
        cx.state.flags.insert(StateFlags::LOCK);
        let mut inst = Instruction::new(0, Bitness::Bits32);
        Handler::MovCr { to_cr: false }.decode(&mut cx, 0x20, &mut inst).unwrap();
        assert_eq!(inst.operands[1], Operand::reg(Register::new(RegisterClass::Control, 8)));
        assert!(cx.state.flags.contains(StateFlags::LOCK_CONSUMED));
    }

    #[test]
    fn test_desc_table_size() {
        let h = Handler::DescTable { m: Mnemonic::Sgdt };
        let (inst, _) = run(h, Bitness::Bits64, 0x01, &[0x00]).unwrap();
        assert_eq!(inst.operands[0].memory().unwrap().size, MemorySize::Fword10);
        assert!(run(h, Bitness::Bits32, 0x01, &[0xC0]).is_err());
    }

    #[test]
    fn test_rv_requires_register() {
        let h = Handler::Rv { m: Mnemonic::Rdrand, size: SizePolicy::Default };
        assert!(run(h, Bitness::Bits32, 0xC7, &[0x30]).is_err());
        let (inst, _) = run(h, Bitness::Bits32, 0xC7, &[0xF1]).unwrap();
        assert_eq!(inst.operands[0], Operand::reg(Register::ECX));
    }
}
