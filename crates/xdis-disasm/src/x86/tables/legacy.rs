//! One-byte opcode map.

use xdis_core::{Mnemonic as M, Register};

use super::{x87, Map, NodeId, TableBuilder};
use crate::options::OptionKind;
use crate::x86::handlers::{Attr, BranchKind, Handler as H, ImmForm, ShiftCount, StringOp};
use crate::x86::size::{OpSize, SizePolicy};

const B8: SizePolicy = SizePolicy::Fixed(OpSize::Size8);
const DEF: SizePolicy = SizePolicy::Default;
const D64: SizePolicy = SizePolicy::Default64;

const NO: Attr = Attr::empty();
const RMW: Attr = Attr::RMW;

const ALU: [(M, Attr); 8] = [
    (M::Add, RMW),
    (M::Or, RMW),
    (M::Adc, RMW),
    (M::Sbb, RMW),
    (M::And, RMW),
    (M::Sub, RMW),
    (M::Xor, RMW),
    (M::Cmp, NO),
];

const SHIFTS: [M; 8] = [M::Rol, M::Ror, M::Rcl, M::Rcr, M::Shl, M::Shr, M::Sal, M::Sar];

const JCC: [M; 16] = [
    M::Jo,
    M::Jno,
    M::Jb,
    M::Jae,
    M::Je,
    M::Jne,
    M::Jbe,
    M::Ja,
    M::Js,
    M::Jns,
    M::Jp,
    M::Jnp,
    M::Jl,
    M::Jge,
    M::Jle,
    M::Jg,
];

pub(super) fn build(b: &mut TableBuilder) -> [NodeId; 256] {
    let mut t = [NodeId::INVALID; 256];

    // 00-3F: ALU block
    for (i, &(m, attr)) in ALU.iter().enumerate() {
        let base = i << 3;
        t[base] = b.leaf(H::EG { m, size: B8, attr });
        t[base + 1] = b.leaf(H::EG { m, size: DEF, attr });
        t[base + 2] = b.leaf(H::GE { m, size: B8 });
        t[base + 3] = b.leaf(H::GE { m, size: DEF });
        t[base + 4] = b.leaf(H::AccImm { m, size: B8 });
        t[base + 5] = b.leaf(H::AccImm { m, size: DEF });
    }
    for (push, seg) in [(0x06, Register::ES), (0x0E, Register::CS), (0x16, Register::SS), (0x1E, Register::DS)] {
        let node = b.leaf(H::PushSeg { m: M::Push, seg });
        t[push] = b.not64(node);
        if seg != Register::CS {
            let node = b.leaf(H::PushSeg { m: M::Pop, seg });
            t[push + 1] = b.not64(node);
        }
    }
    t[0x0F] = b.escape(Map::M0F);
    for (op, m) in [(0x27, M::Daa), (0x2F, M::Das), (0x37, M::Aaa), (0x3F, M::Aas)] {
        let node = b.simple(m);
        t[op] = b.not64(node);
    }

    // 40-5F: register in the opcode. In 64-bit mode 40-4F are REX and never
    // reach the table.
    for r in 0..8 {
        let inc = b.leaf(H::OpReg { m: M::Inc, size: DEF });
        t[0x40 + r] = b.not64(inc);
        let dec = b.leaf(H::OpReg { m: M::Dec, size: DEF });
        t[0x48 + r] = b.not64(dec);
        t[0x50 + r] = b.leaf(H::OpReg { m: M::Push, size: D64 });
        t[0x58 + r] = b.leaf(H::OpReg { m: M::Pop, size: D64 });
    }

    // 60-6F
    let pusha = b.leaf(H::Sized { m: [M::Pusha, M::Pushad, M::Pushad], size: DEF });
    t[0x60] = b.not64(pusha);
    let popa = b.leaf(H::Sized { m: [M::Popa, M::Popad, M::Popad], size: DEF });
    t[0x61] = b.not64(popa);
    let bound = b.leaf(H::GM { m: M::Bound, bound: true });
    t[0x62] = b.not64(bound);
    let movsxd = b.leaf(H::Movsxd);
    let arpl = b.leaf(H::Arpl);
    t[0x63] = b.bitness(movsxd, arpl);
    t[0x68] = b.leaf(H::PushImm { imm8: false });
    t[0x69] = b.leaf(H::GEImm { m: M::Imul, imm: ImmForm::Iz });
    t[0x6A] = b.leaf(H::PushImm { imm8: true });
    t[0x6B] = b.leaf(H::GEImm { m: M::Imul, imm: ImmForm::IbSx });
    const INS: [M; 4] = [M::Insb, M::Insw, M::Insd, M::Insd];
    const OUTS: [M; 4] = [M::Outsb, M::Outsw, M::Outsd, M::Outsd];
    t[0x6C] = b.leaf(H::String { m: INS, op: StringOp::Ins, byte: true });
    t[0x6D] = b.leaf(H::String { m: INS, op: StringOp::Ins, byte: false });
    t[0x6E] = b.leaf(H::String { m: OUTS, op: StringOp::Outs, byte: true });
    t[0x6F] = b.leaf(H::String { m: OUTS, op: StringOp::Outs, byte: false });

    // 70-7F: Jcc rel8
    for (i, &m) in JCC.iter().enumerate() {
        t[0x70 + i] = b.leaf(H::Branch { m, kind: BranchKind::Rel8 });
    }

    // 80-8F
    let grp1 = |b: &mut TableBuilder, size: SizePolicy, imm: ImmForm| {
        let mut g = [NodeId::INVALID; 8];
        for (slot, &(m, attr)) in g.iter_mut().zip(ALU.iter()) {
            *slot = b.leaf(H::EImm { m, size, imm, attr });
        }
        b.group(g)
    };
    t[0x80] = grp1(b, B8, ImmForm::Ib);
    t[0x81] = grp1(b, DEF, ImmForm::Iz);
    let grp82 = grp1(b, B8, ImmForm::Ib);
    t[0x82] = b.not64(grp82);
    t[0x83] = grp1(b, DEF, ImmForm::IbSx);
    t[0x84] = b.leaf(H::EG { m: M::Test, size: B8, attr: NO });
    t[0x85] = b.leaf(H::EG { m: M::Test, size: DEF, attr: NO });
    let xchg_attr = RMW | Attr::IMPLICIT_LOCK;
    t[0x86] = b.leaf(H::EG { m: M::Xchg, size: B8, attr: xchg_attr });
    t[0x87] = b.leaf(H::EG { m: M::Xchg, size: DEF, attr: xchg_attr });
    t[0x88] = b.leaf(H::EG { m: M::Mov, size: B8, attr: Attr::XRELEASE });
    t[0x89] = b.leaf(H::EG { m: M::Mov, size: DEF, attr: Attr::XRELEASE });
    t[0x8A] = b.leaf(H::GE { m: M::Mov, size: B8 });
    t[0x8B] = b.leaf(H::GE { m: M::Mov, size: DEF });
    t[0x8C] = b.leaf(H::MovSeg { to_seg: false });
    t[0x8D] = b.leaf(H::Lea);
    t[0x8E] = b.leaf(H::MovSeg { to_seg: true });
    let pop_ev = b.leaf(H::E { m: M::Pop, size: D64, attr: NO });
    t[0x8F] = b.group([pop_ev, NodeId::INVALID, NodeId::INVALID, NodeId::INVALID, NodeId::INVALID, NodeId::INVALID, NodeId::INVALID, NodeId::INVALID]);

    // 90-9F
    for r in 0..8 {
        t[0x90 + r] = b.leaf(H::XchgAcc);
    }
    t[0x98] = b.leaf(H::Sized { m: [M::Cbw, M::Cwde, M::Cdqe], size: DEF });
    t[0x99] = b.leaf(H::Sized { m: [M::Cwd, M::Cdq, M::Cqo], size: DEF });
    let callf = b.leaf(H::Branch { m: M::Call, kind: BranchKind::FarPtr });
    t[0x9A] = b.not64(callf);
    t[0x9B] = b.simple(M::Wait);
    t[0x9C] = b.leaf(H::Sized { m: [M::Pushf, M::Pushfd, M::Pushfq], size: D64 });
    t[0x9D] = b.leaf(H::Sized { m: [M::Popf, M::Popfd, M::Popfq], size: D64 });
    for (op, m) in [(0x9E, M::Sahf), (0x9F, M::Lahf)] {
        let node = b.simple(m);
        let gated = b.not64(node);
        t[op] = b.option(OptionKind::NoLahfSahf64, gated, node);
    }

    // A0-AF
    t[0xA0] = b.leaf(H::MovMoffs { size: B8, to_acc: true });
    t[0xA1] = b.leaf(H::MovMoffs { size: DEF, to_acc: true });
    t[0xA2] = b.leaf(H::MovMoffs { size: B8, to_acc: false });
    t[0xA3] = b.leaf(H::MovMoffs { size: DEF, to_acc: false });
    let strings: [(usize, [M; 4], StringOp); 5] = [
        (0xA4, [M::Movsb, M::Movsw, M::Movsd, M::Movsq], StringOp::Movs),
        (0xA6, [M::Cmpsb, M::Cmpsw, M::Cmpsd, M::Cmpsq], StringOp::Cmps),
        (0xAA, [M::Stosb, M::Stosw, M::Stosd, M::Stosq], StringOp::Stos),
        (0xAC, [M::Lodsb, M::Lodsw, M::Lodsd, M::Lodsq], StringOp::Lods),
        (0xAE, [M::Scasb, M::Scasw, M::Scasd, M::Scasq], StringOp::Scas),
    ];
    for (op, m, kind) in strings {
        t[op] = b.leaf(H::String { m, op: kind, byte: true });
        t[op + 1] = b.leaf(H::String { m, op: kind, byte: false });
    }
    t[0xA8] = b.leaf(H::AccImm { m: M::Test, size: B8 });
    t[0xA9] = b.leaf(H::AccImm { m: M::Test, size: DEF });

    // B0-BF
    for r in 0..8 {
        t[0xB0 + r] = b.leaf(H::MovRegImm { size: B8 });
        t[0xB8 + r] = b.leaf(H::MovRegImm { size: DEF });
    }

    // C0-CF
    let grp2 = |b: &mut TableBuilder, size: SizePolicy, count: ShiftCount| {
        let mut g = [NodeId::INVALID; 8];
        for (slot, &m) in g.iter_mut().zip(SHIFTS.iter()) {
            *slot = b.leaf(H::Shift { m, size, count });
        }
        b.group(g)
    };
    t[0xC0] = grp2(b, B8, ShiftCount::Ib);
    t[0xC1] = grp2(b, DEF, ShiftCount::Ib);
    t[0xD0] = grp2(b, B8, ShiftCount::One);
    t[0xD1] = grp2(b, DEF, ShiftCount::One);
    t[0xD2] = grp2(b, B8, ShiftCount::Cl);
    t[0xD3] = grp2(b, DEF, ShiftCount::Cl);
    t[0xC2] = b.leaf(H::Branch { m: M::Ret, kind: BranchKind::RetNear { imm: true } });
    t[0xC3] = b.leaf(H::Branch { m: M::Ret, kind: BranchKind::RetNear { imm: false } });
    let les = b.leaf(H::GM { m: M::Les, bound: false });
    t[0xC4] = b.not64(les);
    let lds = b.leaf(H::GM { m: M::Lds, bound: false });
    t[0xC5] = b.not64(lds);
    let grp11 = |b: &mut TableBuilder, mov: H, abort_or_begin: H| {
        let mov = b.leaf(mov);
        let other = b.leaf(abort_or_begin);
        let mut low = [NodeId::INVALID; 8];
        low[0] = mov;
        b.group8x64(low, &[(0xF8, other)])
    };
    t[0xC6] = grp11(
        b,
        H::EImm { m: M::Mov, size: B8, imm: ImmForm::Ib, attr: Attr::XRELEASE },
        H::Ib { m: M::Xabort },
    );
    t[0xC7] = grp11(
        b,
        H::EImm { m: M::Mov, size: DEF, imm: ImmForm::Iz, attr: Attr::XRELEASE },
        H::Branch { m: M::Xbegin, kind: BranchKind::Rel },
    );
    t[0xC8] = b.leaf(H::Enter);
    t[0xC9] = b.leaf(H::Sized { m: [M::Leave, M::Leave, M::Leave], size: D64 });
    t[0xCA] = b.leaf(H::Branch { m: M::Retf, kind: BranchKind::RetFar { imm: true } });
    t[0xCB] = b.leaf(H::Branch { m: M::Retf, kind: BranchKind::RetFar { imm: false } });
    t[0xCC] = b.simple(M::Int3);
    t[0xCD] = b.leaf(H::Ib { m: M::Int });
    let into = b.simple(M::Into);
    t[0xCE] = b.not64(into);
    t[0xCF] = b.leaf(H::Sized { m: [M::Iret, M::Iretd, M::Iretq], size: DEF });

    // D4-D7, D8-DF
    let aam = b.leaf(H::Ib { m: M::Aam });
    t[0xD4] = b.not64(aam);
    let aad = b.leaf(H::Ib { m: M::Aad });
    t[0xD5] = b.not64(aad);
    let salc = b.simple(M::Salc);
    t[0xD6] = b.not64(salc);
    t[0xD7] = b.leaf(H::Xlat);
    for esc in 0xD8..=0xDF {
        t[esc] = x87::build(b, esc as u8);
    }

    // E0-EF
    t[0xE0] = b.leaf(H::LoopJcx { m: [M::Loopne, M::Loopne, M::Loopne] });
    t[0xE1] = b.leaf(H::LoopJcx { m: [M::Loope, M::Loope, M::Loope] });
    t[0xE2] = b.leaf(H::LoopJcx { m: [M::Loop, M::Loop, M::Loop] });
    t[0xE3] = b.leaf(H::LoopJcx { m: [M::Jcxz, M::Jecxz, M::Jrcxz] });
    t[0xE4] = b.leaf(H::InOut { m: M::In, size: B8, dx: false, out: false });
    t[0xE5] = b.leaf(H::InOut { m: M::In, size: DEF, dx: false, out: false });
    t[0xE6] = b.leaf(H::InOut { m: M::Out, size: B8, dx: false, out: true });
    t[0xE7] = b.leaf(H::InOut { m: M::Out, size: DEF, dx: false, out: true });
    t[0xE8] = b.leaf(H::Branch { m: M::Call, kind: BranchKind::Rel });
    t[0xE9] = b.leaf(H::Branch { m: M::Jmp, kind: BranchKind::Rel });
    let jmpf = b.leaf(H::Branch { m: M::Jmp, kind: BranchKind::FarPtr });
    t[0xEA] = b.not64(jmpf);
    t[0xEB] = b.leaf(H::Branch { m: M::Jmp, kind: BranchKind::Rel8 });
    t[0xEC] = b.leaf(H::InOut { m: M::In, size: B8, dx: true, out: false });
    t[0xED] = b.leaf(H::InOut { m: M::In, size: DEF, dx: true, out: false });
    t[0xEE] = b.leaf(H::InOut { m: M::Out, size: B8, dx: true, out: true });
    t[0xEF] = b.leaf(H::InOut { m: M::Out, size: DEF, dx: true, out: true });

    // F0-FF; F0/F2/F3 are prefixes
    t[0xF1] = b.simple(M::Int1);
    t[0xF4] = b.simple(M::Hlt);
    t[0xF5] = b.simple(M::Cmc);
    let grp3 = |b: &mut TableBuilder, size: SizePolicy, imm: ImmForm| {
        let test = b.leaf(H::EImm { m: M::Test, size, imm, attr: NO });
        let e = |b: &mut TableBuilder, m: M, attr: Attr| b.leaf(H::E { m, size, attr });
        let g = [
            test,
            test,
            e(b, M::Not, RMW),
            e(b, M::Neg, RMW),
            e(b, M::Mul, NO),
            e(b, M::Imul, NO),
            e(b, M::Div, NO),
            e(b, M::Idiv, NO),
        ];
        b.group(g)
    };
    t[0xF6] = grp3(b, B8, ImmForm::Ib);
    t[0xF7] = grp3(b, DEF, ImmForm::Iz);
    for (op, m) in [(0xF8, M::Clc), (0xF9, M::Stc), (0xFA, M::Cli), (0xFB, M::Sti), (0xFC, M::Cld), (0xFD, M::Std)] {
        t[op] = b.simple(m);
    }
    let inc8 = b.leaf(H::E { m: M::Inc, size: B8, attr: RMW });
    let dec8 = b.leaf(H::E { m: M::Dec, size: B8, attr: RMW });
    t[0xFE] = b.group([inc8, dec8, NodeId::INVALID, NodeId::INVALID, NodeId::INVALID, NodeId::INVALID, NodeId::INVALID, NodeId::INVALID]);
    let grp5 = [
        b.leaf(H::E { m: M::Inc, size: DEF, attr: RMW }),
        b.leaf(H::E { m: M::Dec, size: DEF, attr: RMW }),
        b.leaf(H::Branch { m: M::Call, kind: BranchKind::IndirectNear }),
        b.leaf(H::Branch { m: M::Call, kind: BranchKind::IndirectFar }),
        b.leaf(H::Branch { m: M::Jmp, kind: BranchKind::IndirectNear }),
        b.leaf(H::Branch { m: M::Jmp, kind: BranchKind::IndirectFar }),
        b.leaf(H::E { m: M::Push, size: D64, attr: NO }),
        NodeId::INVALID,
    ];
    t[0xFF] = b.group(grp5);

    t
}
