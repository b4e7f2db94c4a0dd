//! Instruction-shape handlers.
//!
//! Table descent ends in a [`Handler`]. Each variant is one instruction
//! shape and carries the constant data its decode rule needs (mnemonics per
//! size, operand size policy, memory size). A handler reads whatever follows
//! the opcode (ModR/M, SIB, displacement, immediate) and fills in the
//! instruction record.

mod branch;
mod fpu;
mod legacy;
mod string;
mod system;
mod vector;

use bitflags::bitflags;
use xdis_core::{Element, Instruction, MemorySize, Mnemonic, Register};

pub use branch::BranchKind;
pub use fpu::FpuForm;
pub use legacy::{ImmForm, ShiftCount};
pub use string::StringOp;
pub use vector::{Gs, VAttr, VOp, Vw};

use super::context::DecodeContext;
use super::size::{OpSize, SizePolicy};
use crate::error::DecodeError;

bitflags! {
    /// Prefixes a legacy form accepts on its memory-destination variant.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attr: u8 {
        /// LOCK is accepted with a memory destination.
        const LOCK = 1 << 0;
        /// F2/F3 are XACQUIRE/XRELEASE when LOCK is present.
        const HLE = 1 << 1;
        /// The form is implicitly locked (XCHG), so HLE needs no LOCK.
        const IMPLICIT_LOCK = 1 << 2;
        /// F3 is XRELEASE on a memory store (MOV).
        const XRELEASE = 1 << 3;
        /// F2 is the MPX BND prefix.
        const BND = 1 << 4;
        /// 3E is NOTRACK.
        const NOTRACK = 1 << 5;
    }
}

impl Attr {
    /// LOCK and HLE, the usual read-modify-write set.
    pub const RMW: Attr = Attr::LOCK.union(Attr::HLE);
}

/// Decode rule for one instruction shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handler {
    /// No operands.
    Simple { m: Mnemonic },
    /// No operands, mnemonic picked by the 16/32/64-bit operand size.
    Sized { m: [Mnemonic; 3], size: SizePolicy },
    /// `Eb,Gb` / `Ev,Gv`
    EG { m: Mnemonic, size: SizePolicy, attr: Attr },
    /// `Gb,Eb` / `Gv,Ev`
    GE { m: Mnemonic, size: SizePolicy },
    /// `AL,Ib` / `rAX,Iz`
    AccImm { m: Mnemonic, size: SizePolicy },
    /// `Eb,Ib` / `Ev,Iz` / `Ev,Ib`
    EImm { m: Mnemonic, size: SizePolicy, imm: ImmForm, attr: Attr },
    /// `Eb` / `Ev`
    E { m: Mnemonic, size: SizePolicy, attr: Attr },
    /// Shift and rotate group: `Ev,1` / `Ev,CL` / `Ev,Ib`
    Shift { m: Mnemonic, size: SizePolicy, count: ShiftCount },
    /// `Gv,Ev,Iz` / `Gv,Ev,Ib`
    GEImm { m: Mnemonic, imm: ImmForm },
    /// Register in the low opcode bits.
    OpReg { m: Mnemonic, size: SizePolicy },
    /// `MOV r8,Ib` / `MOV rv,Iv`
    MovRegImm { size: SizePolicy },
    /// `XCHG rv,rAX`, including NOP and PAUSE at 90.
    XchgAcc,
    /// `LEA Gv,M`
    Lea,
    /// `Gv,Mp` (LES/LDS/LSS/LFS/LGS) and `Gv,Ma` (BOUND)
    GM { m: Mnemonic, bound: bool },
    /// `MOV Ev,Sw` / `MOV Sw,Ew`
    MovSeg { to_seg: bool },
    /// `MOV AL/rAX,moffs` / `MOV moffs,AL/rAX`
    MovMoffs { size: SizePolicy, to_acc: bool },
    /// `PUSH sreg` / `POP sreg`
    PushSeg { m: Mnemonic, seg: Register },
    /// `PUSH Iz` / `PUSH Ib`
    PushImm { imm8: bool },
    /// `ENTER Iw,Ib`
    Enter,
    /// Single 8-bit immediate (INT, AAM, AAD).
    Ib { m: Mnemonic },
    /// IN/OUT with an immediate port or DX.
    InOut { m: Mnemonic, size: SizePolicy, dx: bool, out: bool },
    /// `MOVSXD Gv,Ed`
    Movsxd,
    /// `ARPL Ew,Gw`
    Arpl,
    /// `MOVZX/MOVSX Gv,Eb|Ew`
    Movx { m: Mnemonic, src: OpSize },
    /// `BSWAP r32/r64`
    Bswap,
    /// `SETcc Eb`
    Setcc { m: Mnemonic },
    /// `SHLD/SHRD Ev,Gv,Ib|CL`
    ShiftDouble { m: Mnemonic, cl: bool },
    /// `CMPXCHG8B/16B Mq|Mdq`
    Cmpxchg8b,
    /// Register-only `Rv` (RDRAND, RDSEED, RDFSBASE...).
    Rv { m: Mnemonic, size: SizePolicy },
    /// Memory-only operand with a fixed size tag.
    M { m: Mnemonic, size: MemorySize },
    /// `Ew`; the register form is operand-sized when `sized_reg` is set.
    Ew { m: Mnemonic, sized_reg: bool },
    /// `Gv,Ew` (LAR/LSL)
    GEw { m: Mnemonic },
    /// Descriptor table pointer (SGDT/SIDT/LGDT/LIDT).
    DescTable { m: Mnemonic },
    /// `MOV Rd,Cd` / `MOV Cd,Rd`
    MovCr { to_cr: bool },
    /// `MOV Rd,Dd` / `MOV Dd,Rd`
    MovDr { to_dr: bool },
    /// `MOV Rd,Td` / `MOV Td,Rd`
    MovTr { to_tr: bool },
    /// `XLAT m8`
    Xlat,
    /// `MOVBE Gv,Mv` / `MOVBE Mv,Gv`
    Movbe { to_mem: bool },
    /// `CRC32 Gy,Eb|Ev`
    Crc32 { byte: bool },
    /// Relative and indirect control transfers.
    Branch { m: Mnemonic, kind: BranchKind },
    /// JCXZ/JECXZ/JRCXZ and LOOPcc, mnemonic picked by the address size.
    LoopJcx { m: [Mnemonic; 3] },
    /// String instructions. The mnemonic is `m[0]` for the byte form and is
    /// otherwise picked by the operand size (16/32/64).
    String { m: [Mnemonic; 4], op: StringOp, byte: bool },
    /// x87 memory operand with a fixed size.
    FpuMem { m: Mnemonic, size: MemorySize },
    /// x87 environment or state image, sized by the operand size.
    FpuEnv { m: Mnemonic, state: bool },
    /// x87 register forms.
    FpuReg { m: Mnemonic, form: FpuForm },
    /// SSE/MMX/VEX/XOP/EVEX forms described by an operand list.
    Vector { m: Mnemonic, ops: &'static [VOp], elem: Element, attr: VAttr },
    /// 3DNow! `Pq,Qq` with the mnemonic in the trailing suffix byte.
    D3now,
}

impl Handler {
    /// Decodes everything after the opcode byte(s).
    pub fn decode(
        &self,
        cx: &mut DecodeContext<'_>,
        opcode: u8,
        inst: &mut Instruction,
    ) -> Result<(), DecodeError> {
        match *self {
            Handler::Simple { m } => {
                inst.mnemonic = m;
                Ok(())
            }
            Handler::Sized { m, size } => {
                inst.mnemonic = match cx.op_size(size) {
                    OpSize::Size8 | OpSize::Size16 => m[0],
                    OpSize::Size32 => m[1],
                    OpSize::Size64 => m[2],
                };
                Ok(())
            }
            Handler::EG { m, size, attr } => legacy::decode_eg(cx, inst, m, size, attr),
            Handler::GE { m, size } => legacy::decode_ge(cx, inst, m, size),
            Handler::AccImm { m, size } => legacy::decode_acc_imm(cx, inst, m, size),
            Handler::EImm { m, size, imm, attr } => legacy::decode_e_imm(cx, inst, m, size, imm, attr),
            Handler::E { m, size, attr } => legacy::decode_e(cx, inst, m, size, attr),
            Handler::Shift { m, size, count } => legacy::decode_shift(cx, inst, m, size, count),
            Handler::GEImm { m, imm } => legacy::decode_ge_imm(cx, inst, m, imm),
            Handler::OpReg { m, size } => legacy::decode_op_reg(cx, inst, opcode, m, size),
            Handler::MovRegImm { size } => legacy::decode_mov_reg_imm(cx, inst, opcode, size),
            Handler::XchgAcc => legacy::decode_xchg_acc(cx, inst, opcode),
            Handler::Lea => legacy::decode_lea(cx, inst),
            Handler::GM { m, bound } => legacy::decode_gm(cx, inst, m, bound),
            Handler::MovSeg { to_seg } => legacy::decode_mov_seg(cx, inst, to_seg),
            Handler::MovMoffs { size, to_acc } => legacy::decode_mov_moffs(cx, inst, size, to_acc),
            Handler::PushSeg { m, seg } => legacy::decode_push_seg(cx, inst, m, seg),
            Handler::PushImm { imm8 } => legacy::decode_push_imm(cx, inst, imm8),
            Handler::Enter => legacy::decode_enter(cx, inst),
            Handler::Ib { m } => legacy::decode_ib(cx, inst, m),
            Handler::InOut { m, size, dx, out } => legacy::decode_in_out(cx, inst, m, size, dx, out),
            Handler::Movsxd => legacy::decode_movsxd(cx, inst),
            Handler::Arpl => legacy::decode_arpl(cx, inst),
            Handler::Movx { m, src } => legacy::decode_movx(cx, inst, m, src),
            Handler::Bswap => legacy::decode_bswap(cx, inst, opcode),
            Handler::Setcc { m } => legacy::decode_setcc(cx, inst, m),
            Handler::ShiftDouble { m, cl } => legacy::decode_shift_double(cx, inst, m, cl),
            Handler::Cmpxchg8b => legacy::decode_cmpxchg8b(cx, inst),
            Handler::Xlat => legacy::decode_xlat(cx, inst),
            Handler::Movbe { to_mem } => legacy::decode_movbe(cx, inst, to_mem),
            Handler::Crc32 { byte } => legacy::decode_crc32(cx, inst, byte),
            Handler::Rv { m, size } => system::decode_rv(cx, inst, m, size),
            Handler::M { m, size } => system::decode_m(cx, inst, m, size),
            Handler::Ew { m, sized_reg } => system::decode_ew(cx, inst, m, sized_reg),
            Handler::GEw { m } => system::decode_gew(cx, inst, m),
            Handler::DescTable { m } => system::decode_desc_table(cx, inst, m),
            Handler::MovCr { to_cr } => system::decode_mov_cr(cx, inst, to_cr),
            Handler::MovDr { to_dr } => system::decode_mov_dr(cx, inst, to_dr),
            Handler::MovTr { to_tr } => system::decode_mov_tr(cx, inst, to_tr),
            Handler::Branch { m, kind } => branch::decode_branch(cx, inst, m, kind),
            Handler::LoopJcx { m } => branch::decode_loop_jcx(cx, inst, m),
            Handler::String { m, op, byte } => string::decode_string(cx, inst, m, op, byte),
            Handler::FpuMem { m, size } => fpu::decode_fpu_mem(cx, inst, m, size),
            Handler::FpuEnv { m, state } => fpu::decode_fpu_env(cx, inst, m, state),
            Handler::FpuReg { m, form } => fpu::decode_fpu_reg(cx, inst, m, form),
            Handler::Vector { m, ops, elem, attr } => vector::decode_vector(cx, inst, m, ops, elem, attr),
            Handler::D3now => vector::decode_3dnow(cx, inst),
        }
    }
}
