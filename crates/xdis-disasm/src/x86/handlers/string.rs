//! String instructions.
//!
//! Operands are implicit in the encoding; they are materialised as memory
//! operands over rSI/rDI so consumers see the addressing the instruction
//! performs. The rDI side is always ES and ignores segment overrides.

use xdis_core::{Instruction, MemoryRef, Mnemonic, Operand, Register};

use crate::error::DecodeError;
use crate::x86::context::DecodeContext;
use crate::x86::size::{OpSize, SizePolicy};

/// Which string instruction family a form belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringOp {
    Movs,
    Cmps,
    Stos,
    Lods,
    Scas,
    Ins,
    Outs,
}

pub(super) fn decode_string(
    cx: &mut DecodeContext<'_>,
    inst: &mut Instruction,
    m: [Mnemonic; 4],
    op: StringOp,
    byte: bool,
) -> Result<(), DecodeError> {
    let mut size = if byte {
        OpSize::Size8
    } else {
        cx.op_size(SizePolicy::Default)
    };
    if matches!(op, StringOp::Ins | StringOp::Outs) {
        size = size.min_32();
    }
    inst.mnemonic = match size {
        OpSize::Size8 => m[0],
        OpSize::Size16 => m[1],
        OpSize::Size32 => m[2],
        OpSize::Size64 => m[3],
    };

    let src = Operand::Memory(source(cx, size));
    let dst = Operand::Memory(destination(cx, size));
    let acc = Operand::Register(cx.accumulator(size));
    let port = Operand::Register(Register::DX);
    let operands = match op {
        StringOp::Movs => [dst, src],
        StringOp::Cmps => [src, dst],
        StringOp::Stos => [dst, acc],
        StringOp::Lods => [acc, src],
        StringOp::Scas => [acc, dst],
        StringOp::Ins => [dst, port],
        StringOp::Outs => [port, src],
    };
    inst.operands.extend(operands);
    Ok(())
}

/// `seg:[rSI]`, DS unless overridden.
fn source(cx: &DecodeContext<'_>, size: OpSize) -> MemoryRef {
    let (segment, segment_override) = cx.state.effective_segment(Register::DS);
    let base = Register::new(cx.address_class(), 6);
    let mut mem = MemoryRef::base(segment, base, size.memory_size());
    mem.segment_override = segment_override;
    mem
}

/// `es:[rDI]`
fn destination(cx: &DecodeContext<'_>, size: OpSize) -> MemoryRef {
    let base = Register::new(cx.address_class(), 7);
    MemoryRef::base(Register::ES, base, size.memory_size())
}

#[cfg(test)]
mod tests {
    use super::super::test_util::run;
    use super::super::Handler;
    use super::*;
    use xdis_core::{Bitness, MemorySize};

    const MOVS: [Mnemonic; 4] = [Mnemonic::Movsb, Mnemonic::Movsw, Mnemonic::Movsd, Mnemonic::Movsq];
    const INS: [Mnemonic; 4] = [Mnemonic::Insb, Mnemonic::Insw, Mnemonic::Insd, Mnemonic::Insd];

    #[test]
    fn test_movs_operands() {
        let h = Handler::String { m: MOVS, op: StringOp::Movs, byte: false };
        let (inst, len) = run(h, Bitness::Bits32, 0xA5, &[]).unwrap();
        assert_eq!(len, 0);
        assert_eq!(inst.mnemonic, Mnemonic::Movsd);
        let dst = inst.operands[0].memory().unwrap();
        let src = inst.operands[1].memory().unwrap();
        assert_eq!((dst.segment, dst.base), (Register::ES, Some(Register::EDI)));
        assert_eq!((src.segment, src.base), (Register::DS, Some(Register::ESI)));
        assert_eq!(src.size, MemorySize::UInt32);
    }

    #[test]
    fn test_byte_form() {
        let h = Handler::String { m: MOVS, op: StringOp::Movs, byte: true };
        let (inst, _) = run(h, Bitness::Bits64, 0xA4, &[]).unwrap();
        assert_eq!(inst.mnemonic, Mnemonic::Movsb);
        assert_eq!(inst.operands[0].memory().unwrap().base, Some(Register::RDI));
    }

    #[test]
    fn test_ins_port() {
        let h = Handler::String { m: INS, op: StringOp::Ins, byte: false };
        let (inst, _) = run(h, Bitness::Bits16, 0x6D, &[]).unwrap();
        assert_eq!(inst.mnemonic, Mnemonic::Insw);
        assert_eq!(inst.operands[1], Operand::reg(Register::DX));
        assert_eq!(inst.operands[0].memory().unwrap().base, Some(Register::DI));
    }
}
