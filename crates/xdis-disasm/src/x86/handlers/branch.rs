//! Control transfer forms.

use xdis_core::{ImmediateKind, Instruction, MemorySize, Mnemonic, Operand};

use crate::error::DecodeError;
use crate::x86::context::DecodeContext;
use crate::x86::size::{OpSize, SizePolicy};
use crate::x86::state::StateFlags;

/// Operand shape of a control transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BranchKind {
    /// `rel8` (Jcc, JMP short).
    Rel8,
    /// `rel16/32` (Jcc near, JMP near, CALL near, XBEGIN).
    Rel,
    /// `Ev` near indirect (FF /2, FF /4).
    IndirectNear,
    /// `Mp` far indirect (FF /3, FF /5).
    IndirectFar,
    /// `ptr16:16/32` (9A, EA).
    FarPtr,
    /// Near return, optionally with an `Iw` stack adjustment.
    RetNear { imm: bool },
    /// Far return, optionally with an `Iw` stack adjustment.
    RetFar { imm: bool },
    /// JMPE `rel16/32` (0F B8).
    JmpeRel,
    /// JMPE `Ev` (0F 00 /6).
    JmpeIndirect,
}

pub(super) fn decode_branch(
    cx: &mut DecodeContext<'_>,
    inst: &mut Instruction,
    m: Mnemonic,
    kind: BranchKind,
) -> Result<(), DecodeError> {
    inst.mnemonic = m;
    match kind {
        BranchKind::Rel8 => {
            let size = cx.op_size(SizePolicy::Force64);
            let disp = cx.cursor.read_u8()? as i8 as i64;
            cx.allow(StateFlags::ALLOW_BND);
            inst.operands.push(near(cx, disp, size));
        }
        BranchKind::Rel => {
            let size = cx.op_size(SizePolicy::Force64);
            let disp = read_rel(cx, size)?;
            cx.allow(StateFlags::ALLOW_BND);
            inst.operands.push(near(cx, disp, size));
        }
        BranchKind::IndirectNear => {
            let size = cx.op_size(SizePolicy::Force64);
            let target = cx.rm_gpr(size, size.memory_size())?;
            cx.allow(StateFlags::ALLOW_BND | StateFlags::ALLOW_NOTRACK);
            inst.operands.push(target);
        }
        BranchKind::IndirectFar => {
            let mem_size = match cx.op_size(SizePolicy::Default) {
                OpSize::Size16 => MemorySize::FarPtr16_16,
                OpSize::Size64 => MemorySize::FarPtr16_64,
                _ => MemorySize::FarPtr16_32,
            };
            let target = cx.memory(mem_size)?;
            inst.operands.push(target);
        }
        BranchKind::FarPtr => {
            let size = cx.op_size(SizePolicy::Default);
            let offset = if size == OpSize::Size16 {
                cx.cursor.read_u16()? as u32
            } else {
                cx.cursor.read_u32()?
            };
            let selector = cx.cursor.read_u16()?;
            inst.operands.push(Operand::FarBranch {
                selector,
                offset,
                size: size.bits() as u8,
            });
        }
        BranchKind::RetNear { imm } => {
            if imm {
                inst.operands.push(cx.immediate(ImmediateKind::Imm16)?);
            }
            cx.allow(StateFlags::ALLOW_BND);
        }
        BranchKind::RetFar { imm } => {
            if imm {
                inst.operands.push(cx.immediate(ImmediateKind::Imm16)?);
            }
        }
        BranchKind::JmpeRel => {
            let size = cx.op_size(SizePolicy::Default);
            let disp = read_rel(cx, size)?;
            inst.operands.push(near(cx, disp, size));
        }
        BranchKind::JmpeIndirect => {
            let size = cx.op_size(SizePolicy::Default);
            let target = cx.rm_gpr(size, size.memory_size())?;
            inst.operands.push(target);
        }
    }
    Ok(())
}

/// JCXZ/JECXZ/JRCXZ and LOOP/LOOPE/LOOPNE. The counter register, and so the
/// mnemonic, follows the address size.
pub(super) fn decode_loop_jcx(
    cx: &mut DecodeContext<'_>,
    inst: &mut Instruction,
    m: [Mnemonic; 3],
) -> Result<(), DecodeError> {
    let size = cx.op_size(SizePolicy::Force64);
    let disp = cx.cursor.read_u8()? as i8 as i64;
    inst.mnemonic = match cx.state.address_size {
        OpSize::Size16 => m[0],
        OpSize::Size64 => m[2],
        _ => m[1],
    };
    inst.operands.push(near(cx, disp, size));
    Ok(())
}

fn read_rel(cx: &mut DecodeContext<'_>, size: OpSize) -> Result<i64, DecodeError> {
    Ok(if size == OpSize::Size16 {
        cx.cursor.read_u16()? as i16 as i64
    } else {
        cx.cursor.read_u32()? as i32 as i64
    })
}

fn near(cx: &DecodeContext<'_>, disp: i64, size: OpSize) -> Operand {
    Operand::near(cx.branch_target(disp, size), size.bits() as u8)
}

#[cfg(test)]
mod tests {
    use super::super::test_util::run;
    use super::super::Handler;
    use super::*;
    use xdis_core::{Bitness, Register};

    #[test]
    fn test_rel8_backwards() {
        let h = Handler::Branch { m: Mnemonic::Jmp, kind: BranchKind::Rel8 };
        // Opcode already consumed by the table walk is not part of `bytes`
        // here, so next ip is 0x1000 + 1.
        let (inst, len) = run(h, Bitness::Bits32, 0xEB, &[0xFE]).unwrap();
        assert_eq!(len, 1);
        assert_eq!(inst.operands[0], Operand::near(0xFFF, 32));
    }

    #[test]
    fn test_rel32_in_64bit_mode() {
        let h = Handler::Branch { m: Mnemonic::Call, kind: BranchKind::Rel };
        let (inst, len) = run(h, Bitness::Bits64, 0xE8, &[0x10, 0, 0, 0]).unwrap();
        assert_eq!(len, 4);
        assert_eq!(inst.operands[0], Operand::near(0x1014, 64));
    }

    #[test]
    fn test_indirect_near_is_64bit() {
        let h = Handler::Branch { m: Mnemonic::Jmp, kind: BranchKind::IndirectNear };
        let (inst, _) = run(h, Bitness::Bits64, 0xFF, &[0xE0]).unwrap();
        assert_eq!(inst.operands[0], Operand::reg(Register::RAX));
    }

    #[test]
    fn test_indirect_far_needs_memory() {
        let h = Handler::Branch { m: Mnemonic::Jmp, kind: BranchKind::IndirectFar };
        assert!(run(h, Bitness::Bits32, 0xFF, &[0xE8]).is_err());
        let (inst, _) = run(h, Bitness::Bits32, 0xFF, &[0x28]).unwrap();
        assert_eq!(inst.operands[0].memory().unwrap().size, MemorySize::FarPtr16_32);
    }

    #[test]
    fn test_far_pointer() {
        let h = Handler::Branch { m: Mnemonic::Jmp, kind: BranchKind::FarPtr };
        let (inst, len) = run(h, Bitness::Bits16, 0xEA, &[0x00, 0x7C, 0x00, 0xF0]).unwrap();
        assert_eq!(len, 4);
        assert_eq!(
            inst.operands[0],
            Operand::FarBranch { selector: 0xF000, offset: 0x7C00, size: 16 }
        );
    }

    #[test]
    fn test_loop_mnemonic_follows_address_size() {
        let h = Handler::LoopJcx { m: [Mnemonic::Jcxz, Mnemonic::Jecxz, Mnemonic::Jrcxz] };
        let (inst, _) = run(h, Bitness::Bits64, 0xE3, &[0x00]).unwrap();
        assert_eq!(inst.mnemonic, Mnemonic::Jrcxz);
        let (inst, _) = run(h, Bitness::Bits16, 0xE3, &[0x00]).unwrap();
        assert_eq!(inst.mnemonic, Mnemonic::Jcxz);
    }
}
