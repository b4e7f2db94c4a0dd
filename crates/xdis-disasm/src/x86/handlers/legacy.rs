//! Legacy integer instruction shapes.

use xdis_core::{
    ImmediateKind, Instruction, MemoryRef, MemorySize, Mnemonic, Operand, Register, RegisterClass,
};

use super::Attr;
use crate::error::DecodeError;
use crate::x86::context::DecodeContext;
use crate::x86::size::{OpSize, SizePolicy};
use crate::x86::state::StateFlags;

/// Immediate operand encodings of the `EImm`/`GEImm` shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImmForm {
    /// Unsigned 8-bit immediate.
    Ib,
    /// 8-bit immediate sign-extended to the operand size.
    IbSx,
    /// 16/32-bit immediate (sign-extended for 64-bit operands).
    Iz,
}

/// Count operand of the shift group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShiftCount {
    One,
    Cl,
    Ib,
}

/// Grants the prefixes `attr` allows once a memory destination is known.
pub(super) fn grant_memory_prefixes(cx: &mut DecodeContext<'_>, attr: Attr) {
    if attr.contains(Attr::LOCK) {
        cx.allow(StateFlags::ALLOW_LOCK);
    }
    let locked = cx.state.flags.contains(StateFlags::LOCK) || attr.contains(Attr::IMPLICIT_LOCK);
    if attr.contains(Attr::HLE) && locked {
        cx.allow(StateFlags::ALLOW_XACQUIRE | StateFlags::ALLOW_XRELEASE);
    }
    if attr.contains(Attr::XRELEASE) {
        cx.allow(StateFlags::ALLOW_XRELEASE);
    }
}

fn read_imm(cx: &mut DecodeContext<'_>, size: OpSize, imm: ImmForm) -> Result<Operand, DecodeError> {
    match imm {
        ImmForm::Ib => cx.immediate(ImmediateKind::Imm8),
        ImmForm::IbSx => cx.immediate_sx8(size),
        ImmForm::Iz => cx.immediate_z(size),
    }
}

pub(super) fn decode_eg(
    cx: &mut DecodeContext<'_>,
    inst: &mut Instruction,
    m: Mnemonic,
    size: SizePolicy,
    attr: Attr,
) -> Result<(), DecodeError> {
    let size = cx.op_size(size);
    let modrm = cx.modrm()?;
    let dst = cx.rm_gpr(size, size.memory_size())?;
    let src = cx.reg_gpr(size)?;
    if !modrm.is_register() {
        grant_memory_prefixes(cx, attr);
    }
    inst.mnemonic = m;
    inst.operands.extend([dst, src]);
    Ok(())
}

pub(super) fn decode_ge(
    cx: &mut DecodeContext<'_>,
    inst: &mut Instruction,
    m: Mnemonic,
    size: SizePolicy,
) -> Result<(), DecodeError> {
    let size = cx.op_size(size);
    let dst = cx.reg_gpr(size)?;
    let src = cx.rm_gpr(size, size.memory_size())?;
    inst.mnemonic = m;
    inst.operands.extend([dst, src]);
    Ok(())
}

pub(super) fn decode_acc_imm(
    cx: &mut DecodeContext<'_>,
    inst: &mut Instruction,
    m: Mnemonic,
    size: SizePolicy,
) -> Result<(), DecodeError> {
    let size = cx.op_size(size);
    let acc = cx.accumulator(size);
    let imm = cx.immediate_z(size)?;
    inst.mnemonic = m;
    inst.operands.extend([Operand::Register(acc), imm]);
    Ok(())
}

pub(super) fn decode_e_imm(
    cx: &mut DecodeContext<'_>,
    inst: &mut Instruction,
    m: Mnemonic,
    size: SizePolicy,
    imm: ImmForm,
    attr: Attr,
) -> Result<(), DecodeError> {
    let size = cx.op_size(size);
    let modrm = cx.modrm()?;
    let dst = cx.rm_gpr(size, size.memory_size())?;
    let imm = read_imm(cx, size, imm)?;
    if !modrm.is_register() {
        grant_memory_prefixes(cx, attr);
    }
    inst.mnemonic = m;
    inst.operands.extend([dst, imm]);
    Ok(())
}

pub(super) fn decode_e(
    cx: &mut DecodeContext<'_>,
    inst: &mut Instruction,
    m: Mnemonic,
    size: SizePolicy,
    attr: Attr,
) -> Result<(), DecodeError> {
    let size = cx.op_size(size);
    let modrm = cx.modrm()?;
    let op = cx.rm_gpr(size, size.memory_size())?;
    if !modrm.is_register() {
        grant_memory_prefixes(cx, attr);
    }
    inst.mnemonic = m;
    inst.operands.push(op);
    Ok(())
}

pub(super) fn decode_shift(
    cx: &mut DecodeContext<'_>,
    inst: &mut Instruction,
    m: Mnemonic,
    size: SizePolicy,
    count: ShiftCount,
) -> Result<(), DecodeError> {
    let size = cx.op_size(size);
    let dst = cx.rm_gpr(size, size.memory_size())?;
    let count = match count {
        ShiftCount::One => Operand::imm(1, ImmediateKind::Imm8),
        ShiftCount::Cl => Operand::Register(Register::CL),
        ShiftCount::Ib => cx.immediate(ImmediateKind::Imm8)?,
    };
    inst.mnemonic = m;
    inst.operands.extend([dst, count]);
    Ok(())
}

pub(super) fn decode_ge_imm(
    cx: &mut DecodeContext<'_>,
    inst: &mut Instruction,
    m: Mnemonic,
    imm: ImmForm,
) -> Result<(), DecodeError> {
    let size = cx.op_size(SizePolicy::Default);
    let dst = cx.reg_gpr(size)?;
    let src = cx.rm_gpr(size, size.memory_size())?;
    let imm = read_imm(cx, size, imm)?;
    inst.mnemonic = m;
    inst.operands.extend([dst, src, imm]);
    Ok(())
}

pub(super) fn decode_op_reg(
    cx: &mut DecodeContext<'_>,
    inst: &mut Instruction,
    opcode: u8,
    m: Mnemonic,
    size: SizePolicy,
) -> Result<(), DecodeError> {
    let size = cx.op_size(size);
    inst.mnemonic = m;
    inst.operands.push(Operand::Register(cx.opcode_gpr(opcode, size)));
    Ok(())
}

pub(super) fn decode_mov_reg_imm(
    cx: &mut DecodeContext<'_>,
    inst: &mut Instruction,
    opcode: u8,
    size: SizePolicy,
) -> Result<(), DecodeError> {
    let size = cx.op_size(size);
    let reg = cx.opcode_gpr(opcode, size);
    let imm = match size {
        OpSize::Size8 => cx.immediate(ImmediateKind::Imm8)?,
        OpSize::Size16 => cx.immediate(ImmediateKind::Imm16)?,
        OpSize::Size32 => cx.immediate(ImmediateKind::Imm32)?,
        OpSize::Size64 => cx.immediate(ImmediateKind::Imm64)?,
    };
    inst.mnemonic = Mnemonic::Mov;
    inst.operands.extend([Operand::Register(reg), imm]);
    Ok(())
}

pub(super) fn decode_xchg_acc(
    cx: &mut DecodeContext<'_>,
    inst: &mut Instruction,
    opcode: u8,
) -> Result<(), DecodeError> {
    let index = (opcode & 7) | cx.state.ext_b;
    if index == 0 {
        // 90 without REX.B is NOP; F3 90 is PAUSE.
        if cx.state.flags.contains(StateFlags::REP) && !cx.options.no_pause {
            cx.state.flags.insert(StateFlags::REP_CONSUMED);
            inst.mnemonic = Mnemonic::Pause;
        } else {
            inst.mnemonic = Mnemonic::Nop;
        }
        return Ok(());
    }
    let size = cx.op_size(SizePolicy::Default);
    inst.mnemonic = Mnemonic::Xchg;
    inst.operands.extend([
        Operand::Register(cx.gpr(size, index)),
        Operand::Register(cx.accumulator(size)),
    ]);
    Ok(())
}

pub(super) fn decode_lea(cx: &mut DecodeContext<'_>, inst: &mut Instruction) -> Result<(), DecodeError> {
    let size = cx.op_size(SizePolicy::Default);
    let dst = cx.reg_gpr(size)?;
    let src = cx.memory(MemorySize::Unknown)?;
    inst.mnemonic = Mnemonic::Lea;
    inst.operands.extend([dst, src]);
    Ok(())
}

pub(super) fn decode_gm(
    cx: &mut DecodeContext<'_>,
    inst: &mut Instruction,
    m: Mnemonic,
    bound: bool,
) -> Result<(), DecodeError> {
    let size = cx.op_size(SizePolicy::Default);
    let mem_size = match (bound, size) {
        (true, OpSize::Size16) => MemorySize::Bound16_16,
        (true, _) => MemorySize::Bound32_32,
        (false, OpSize::Size16) => MemorySize::FarPtr16_16,
        (false, OpSize::Size64) => MemorySize::FarPtr16_64,
        (false, _) => MemorySize::FarPtr16_32,
    };
    let dst = cx.reg_gpr(size)?;
    let src = cx.memory(mem_size)?;
    inst.mnemonic = m;
    inst.operands.extend([dst, src]);
    Ok(())
}

pub(super) fn decode_mov_seg(
    cx: &mut DecodeContext<'_>,
    inst: &mut Instruction,
    to_seg: bool,
) -> Result<(), DecodeError> {
    let modrm = cx.modrm()?;
    // ES, CS, SS, DS, FS, GS; MOV to CS is undefined.
    if modrm.reg > 5 || (to_seg && modrm.reg == 1) {
        return Err(cx.invalid());
    }
    let seg = Operand::Register(Register::new(RegisterClass::Segment, modrm.reg));
    inst.mnemonic = Mnemonic::Mov;
    if to_seg {
        let src = cx.rm_gpr(OpSize::Size16, MemorySize::UInt16)?;
        inst.operands.extend([seg, src]);
    } else {
        let size = cx.op_size(SizePolicy::Default);
        let dst = cx.rm_gpr(size, MemorySize::UInt16)?;
        inst.operands.extend([dst, seg]);
    }
    Ok(())
}

pub(super) fn decode_mov_moffs(
    cx: &mut DecodeContext<'_>,
    inst: &mut Instruction,
    size: SizePolicy,
    to_acc: bool,
) -> Result<(), DecodeError> {
    let size = cx.op_size(size);
    let (offset, displacement_size) = match cx.state.address_size {
        OpSize::Size16 => (cx.cursor.read_u16()? as u64, 2),
        OpSize::Size64 => (cx.cursor.read_u64()?, 8),
        _ => (cx.cursor.read_u32()? as u64, 4),
    };
    let (segment, segment_override) = cx.state.effective_segment(Register::DS);
    let mut mem = MemoryRef::absolute(segment, offset as i64, displacement_size, size.memory_size());
    mem.segment_override = segment_override;
    let acc = Operand::Register(cx.accumulator(size));
    let mem = Operand::Memory(mem);
    if !to_acc {
        grant_memory_prefixes(cx, Attr::XRELEASE);
    }
    inst.mnemonic = Mnemonic::Mov;
    if to_acc {
        inst.operands.extend([acc, mem]);
    } else {
        inst.operands.extend([mem, acc]);
    }
    Ok(())
}

pub(super) fn decode_push_seg(
    _cx: &mut DecodeContext<'_>,
    inst: &mut Instruction,
    m: Mnemonic,
    seg: Register,
) -> Result<(), DecodeError> {
    inst.mnemonic = m;
    inst.operands.push(Operand::Register(seg));
    Ok(())
}

pub(super) fn decode_push_imm(
    cx: &mut DecodeContext<'_>,
    inst: &mut Instruction,
    imm8: bool,
) -> Result<(), DecodeError> {
    let size = cx.op_size(SizePolicy::Default64);
    let imm = if imm8 {
        cx.immediate_sx8(size)?
    } else {
        cx.immediate_z(size)?
    };
    inst.mnemonic = Mnemonic::Push;
    inst.operands.push(imm);
    Ok(())
}

pub(super) fn decode_enter(cx: &mut DecodeContext<'_>, inst: &mut Instruction) -> Result<(), DecodeError> {
    let frame = cx.immediate(ImmediateKind::Imm16)?;
    let level = cx.immediate(ImmediateKind::Imm8Second)?;
    inst.mnemonic = Mnemonic::Enter;
    inst.operands.extend([frame, level]);
    Ok(())
}

pub(super) fn decode_ib(cx: &mut DecodeContext<'_>, inst: &mut Instruction, m: Mnemonic) -> Result<(), DecodeError> {
    let imm = cx.immediate(ImmediateKind::Imm8)?;
    inst.mnemonic = m;
    inst.operands.push(imm);
    Ok(())
}

pub(super) fn decode_in_out(
    cx: &mut DecodeContext<'_>,
    inst: &mut Instruction,
    m: Mnemonic,
    size: SizePolicy,
    dx: bool,
    out: bool,
) -> Result<(), DecodeError> {
    // Port I/O has no 64-bit form.
    let size = cx.op_size(size).min_32();
    let acc = Operand::Register(cx.accumulator(size));
    let port = if dx {
        Operand::Register(Register::DX)
    } else {
        cx.immediate(ImmediateKind::Imm8)?
    };
    inst.mnemonic = m;
    if out {
        inst.operands.extend([port, acc]);
    } else {
        inst.operands.extend([acc, port]);
    }
    Ok(())
}

pub(super) fn decode_movsxd(cx: &mut DecodeContext<'_>, inst: &mut Instruction) -> Result<(), DecodeError> {
    let size = cx.op_size(SizePolicy::Default);
    let src_size = if size == OpSize::Size16 {
        OpSize::Size16
    } else {
        OpSize::Size32
    };
    let dst = cx.reg_gpr(size)?;
    let src = cx.rm_gpr(src_size, src_size.memory_size())?;
    inst.mnemonic = Mnemonic::Movsxd;
    inst.operands.extend([dst, src]);
    Ok(())
}

pub(super) fn decode_arpl(cx: &mut DecodeContext<'_>, inst: &mut Instruction) -> Result<(), DecodeError> {
    let dst = cx.rm_gpr(OpSize::Size16, MemorySize::UInt16)?;
    let src = cx.reg_gpr(OpSize::Size16)?;
    inst.mnemonic = Mnemonic::Arpl;
    inst.operands.extend([dst, src]);
    Ok(())
}

pub(super) fn decode_movx(
    cx: &mut DecodeContext<'_>,
    inst: &mut Instruction,
    m: Mnemonic,
    src: OpSize,
) -> Result<(), DecodeError> {
    let size = cx.op_size(SizePolicy::Default);
    let dst = cx.reg_gpr(size)?;
    let src = cx.rm_gpr(src, src.memory_size())?;
    inst.mnemonic = m;
    inst.operands.extend([dst, src]);
    Ok(())
}

pub(super) fn decode_bswap(
    cx: &mut DecodeContext<'_>,
    inst: &mut Instruction,
    opcode: u8,
) -> Result<(), DecodeError> {
    let size = cx.op_size(SizePolicy::Default);
    inst.mnemonic = Mnemonic::Bswap;
    inst.operands.push(Operand::Register(cx.opcode_gpr(opcode, size)));
    Ok(())
}

pub(super) fn decode_setcc(cx: &mut DecodeContext<'_>, inst: &mut Instruction, m: Mnemonic) -> Result<(), DecodeError> {
    let dst = cx.rm_gpr(OpSize::Size8, MemorySize::UInt8)?;
    inst.mnemonic = m;
    inst.operands.push(dst);
    Ok(())
}

pub(super) fn decode_shift_double(
    cx: &mut DecodeContext<'_>,
    inst: &mut Instruction,
    m: Mnemonic,
    cl: bool,
) -> Result<(), DecodeError> {
    let size = cx.op_size(SizePolicy::Default);
    let dst = cx.rm_gpr(size, size.memory_size())?;
    let src = cx.reg_gpr(size)?;
    let count = if cl {
        Operand::Register(Register::CL)
    } else {
        cx.immediate(ImmediateKind::Imm8)?
    };
    inst.mnemonic = m;
    inst.operands.extend([dst, src, count]);
    Ok(())
}

pub(super) fn decode_cmpxchg8b(cx: &mut DecodeContext<'_>, inst: &mut Instruction) -> Result<(), DecodeError> {
    let (m, size) = if cx.state.w64() {
        (Mnemonic::Cmpxchg16b, MemorySize::UInt128)
    } else {
        (Mnemonic::Cmpxchg8b, MemorySize::UInt64)
    };
    let mem = cx.memory(size)?;
    grant_memory_prefixes(cx, Attr::RMW);
    inst.mnemonic = m;
    inst.operands.push(mem);
    Ok(())
}

/// `MOVBE Gv,Mv` / `MOVBE Mv,Gv`
pub(super) fn decode_movbe(
    cx: &mut DecodeContext<'_>,
    inst: &mut Instruction,
    to_mem: bool,
) -> Result<(), DecodeError> {
    let size = cx.op_size(SizePolicy::Default);
    let reg = cx.reg_gpr(size)?;
    let mem = cx.memory(size.memory_size())?;
    inst.mnemonic = Mnemonic::Movbe;
    if to_mem {
        inst.operands.extend([mem, reg]);
    } else {
        inst.operands.extend([reg, mem]);
    }
    Ok(())
}

/// `CRC32 Gy,Eb` / `CRC32 Gy,Ev`
pub(super) fn decode_crc32(
    cx: &mut DecodeContext<'_>,
    inst: &mut Instruction,
    byte: bool,
) -> Result<(), DecodeError> {
    let dst_size = if cx.state.w64() {
        OpSize::Size64
    } else {
        OpSize::Size32
    };
    let src_size = if byte {
        OpSize::Size8
    } else {
        cx.op_size(SizePolicy::Default)
    };
    let dst = cx.reg_gpr(dst_size)?;
    let src = cx.rm_gpr(src_size, src_size.memory_size())?;
    inst.mnemonic = Mnemonic::Crc32;
    inst.operands.extend([dst, src]);
    Ok(())
}

pub(super) fn decode_xlat(cx: &mut DecodeContext<'_>, inst: &mut Instruction) -> Result<(), DecodeError> {
    let base = Register::new(cx.address_class(), 3);
    let (segment, segment_override) = cx.state.effective_segment(Register::DS);
    let mut mem = MemoryRef::base(segment, base, MemorySize::UInt8);
    mem.segment_override = segment_override;
    mem.index = Some(Register::AL);
    inst.mnemonic = Mnemonic::Xlatb;
    inst.operands.push(Operand::Memory(mem));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::test_util::run;
    use super::super::Handler;
    use super::*;
    use xdis_core::Bitness;

    #[test]
    fn test_eg_register_form() {
        let h = Handler::EG { m: Mnemonic::Add, size: SizePolicy::Default, attr: Attr::RMW };
        let (inst, len) = run(h, Bitness::Bits32, 0x01, &[0xC8]).unwrap();
        assert_eq!(inst.mnemonic, Mnemonic::Add);
        assert_eq!(inst.operands, vec![Operand::reg(Register::EAX), Operand::reg(Register::ECX)]);
        assert_eq!(len, 1);
    }

    #[test]
    fn test_e_imm_sign_extension() {
        let h = Handler::EImm {
            m: Mnemonic::Sub,
            size: SizePolicy::Default,
            imm: ImmForm::IbSx,
            attr: Attr::RMW,
        };
        let (inst, len) = run(h, Bitness::Bits64, 0x83, &[0xE8, 0xFF]).unwrap();
        let imm = inst.operands[1].immediate().unwrap();
        assert_eq!(imm.value, 0xFFFF_FFFF);
        assert_eq!(imm.as_i64(), -1);
        assert_eq!(len, 2);
    }

    #[test]
    fn test_xchg_acc_nop() {
        let (inst, _) = run(Handler::XchgAcc, Bitness::Bits64, 0x90, &[]).unwrap();
        assert_eq!(inst.mnemonic, Mnemonic::Nop);
        let (inst, _) = run(Handler::XchgAcc, Bitness::Bits32, 0x91, &[]).unwrap();
        assert_eq!(inst.mnemonic, Mnemonic::Xchg);
        assert_eq!(inst.operands[0], Operand::reg(Register::ECX));
    }

    #[test]
    fn test_lea_rejects_register_form() {
        assert!(run(Handler::Lea, Bitness::Bits32, 0x8D, &[0xC0]).is_err());
    }

    #[test]
    fn test_mov_seg_rejects_cs_destination() {
        assert!(run(Handler::MovSeg { to_seg: true }, Bitness::Bits32, 0x8E, &[0xC8]).is_err());
        let (inst, _) = run(Handler::MovSeg { to_seg: true }, Bitness::Bits32, 0x8E, &[0xD8]).unwrap();
        assert_eq!(inst.operands[0], Operand::reg(Register::DS));
    }

    #[test]
    fn test_mov_moffs_uses_address_size() {
        let h = Handler::MovMoffs { size: SizePolicy::Default, to_acc: true };
        let (inst, len) = run(h, Bitness::Bits64, 0xA1, &[1, 0, 0, 0, 0, 0, 0, 0]).unwrap();
        assert_eq!(len, 8);
        assert_eq!(inst.operands[1].memory().unwrap().displacement, 1);
    }

    #[test]
    fn test_enter_immediates() {
        let (inst, len) = run(Handler::Enter, Bitness::Bits32, 0xC8, &[0x10, 0x00, 0x01]).unwrap();
        assert_eq!(len, 3);
        assert_eq!(inst.operands[0].immediate().unwrap().value, 0x10);
        assert_eq!(inst.operands[1].immediate().unwrap().kind, ImmediateKind::Imm8Second);
    }

    #[test]
    fn test_movbe_requires_memory() {
        assert!(run(Handler::Movbe { to_mem: false }, Bitness::Bits32, 0xF0, &[0xC1]).is_err());
        let (inst, _) = run(Handler::Movbe { to_mem: true }, Bitness::Bits32, 0xF1, &[0x08]).unwrap();
        assert_eq!(inst.operands[1], Operand::reg(Register::ECX));
        assert_eq!(inst.operands[0].memory().unwrap().size, MemorySize::UInt32);
    }

    #[test]
    fn test_crc32_byte_source() {
        let (inst, _) = run(Handler::Crc32 { byte: true }, Bitness::Bits32, 0xF0, &[0xC1]).unwrap();
        assert_eq!(inst.operands, vec![Operand::reg(Register::EAX), Operand::reg(Register::CL)]);
    }
}
