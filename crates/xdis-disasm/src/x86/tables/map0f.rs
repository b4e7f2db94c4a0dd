//! Two-byte opcode map (`0F xx`).

use xdis_core::{Element as El, MemorySize as Ms, Mnemonic as M, Register};

use super::ops::*;
use super::{Map, NodeId, TableBuilder};
use crate::options::OptionKind;
use crate::x86::handlers::{Attr, BranchKind, Handler as H, ImmForm};
use crate::x86::size::{OpSize, SizePolicy};

const B8: SizePolicy = SizePolicy::Fixed(OpSize::Size8);
const DEF: SizePolicy = SizePolicy::Default;
const NO: Attr = Attr::empty();
const RMW: Attr = Attr::RMW;
const INV: NodeId = NodeId::INVALID;

/// One mandatory-prefix slot: mnemonic, operands, element type.
pub(super) type Form = Option<(M, Ops, El)>;

/// Packed and scalar floating point arithmetic: opcode, legacy
/// ps/pd/ss/sd mnemonics, VEX/EVEX ps/pd/ss/sd mnemonics.
pub(super) const FP_ARITH: [(u8, [M; 4], [M; 4]); 7] = [
    (0x51, [M::Sqrtps, M::Sqrtpd, M::Sqrtss, M::Sqrtsd], [M::Vsqrtps, M::Vsqrtpd, M::Vsqrtss, M::Vsqrtsd]),
    (0x58, [M::Addps, M::Addpd, M::Addss, M::Addsd], [M::Vaddps, M::Vaddpd, M::Vaddss, M::Vaddsd]),
    (0x59, [M::Mulps, M::Mulpd, M::Mulss, M::Mulsd], [M::Vmulps, M::Vmulpd, M::Vmulss, M::Vmulsd]),
    (0x5C, [M::Subps, M::Subpd, M::Subss, M::Subsd], [M::Vsubps, M::Vsubpd, M::Vsubss, M::Vsubsd]),
    (0x5D, [M::Minps, M::Minpd, M::Minss, M::Minsd], [M::Vminps, M::Vminpd, M::Vminss, M::Vminsd]),
    (0x5E, [M::Divps, M::Divpd, M::Divss, M::Divsd], [M::Vdivps, M::Vdivpd, M::Vdivss, M::Vdivsd]),
    (0x5F, [M::Maxps, M::Maxpd, M::Maxss, M::Maxsd], [M::Vmaxps, M::Vmaxpd, M::Vmaxss, M::Vmaxsd]),
];

/// Packed-only floating point forms: opcode, legacy ps/pd, VEX/EVEX ps/pd.
pub(super) const FP_PACKED: [(u8, [M; 2], [M; 2]); 6] = [
    (0x14, [M::Unpcklps, M::Unpcklpd], [M::Vunpcklps, M::Vunpcklpd]),
    (0x15, [M::Unpckhps, M::Unpckhpd], [M::Vunpckhps, M::Vunpckhpd]),
    (0x54, [M::Andps, M::Andpd], [M::Vandps, M::Vandpd]),
    (0x55, [M::Andnps, M::Andnpd], [M::Vandnps, M::Vandnpd]),
    (0x56, [M::Orps, M::Orpd], [M::Vorps, M::Vorpd]),
    (0x57, [M::Xorps, M::Xorpd], [M::Vxorps, M::Vxorpd]),
];

/// MMX/SSE2 integer forms: opcode, legacy and VEX mnemonics, element type,
/// and whether the second source is a 128-bit shift count.
pub(super) const INT_OPS: [(u8, M, M, El, bool); 57] = [
    (0x60, M::Punpcklbw, M::Vpunpcklbw, El::Int8, false),
    (0x61, M::Punpcklwd, M::Vpunpcklwd, El::Int16, false),
    (0x62, M::Punpckldq, M::Vpunpckldq, El::Int32, false),
    (0x63, M::Packsswb, M::Vpacksswb, El::Int16, false),
    (0x64, M::Pcmpgtb, M::Vpcmpgtb, El::Int8, false),
    (0x65, M::Pcmpgtw, M::Vpcmpgtw, El::Int16, false),
    (0x66, M::Pcmpgtd, M::Vpcmpgtd, El::Int32, false),
    (0x67, M::Packuswb, M::Vpackuswb, El::Int16, false),
    (0x68, M::Punpckhbw, M::Vpunpckhbw, El::Int8, false),
    (0x69, M::Punpckhwd, M::Vpunpckhwd, El::Int16, false),
    (0x6A, M::Punpckhdq, M::Vpunpckhdq, El::Int32, false),
    (0x6B, M::Packssdw, M::Vpackssdw, El::Int32, false),
    (0x74, M::Pcmpeqb, M::Vpcmpeqb, El::Int8, false),
    (0x75, M::Pcmpeqw, M::Vpcmpeqw, El::Int16, false),
    (0x76, M::Pcmpeqd, M::Vpcmpeqd, El::Int32, false),
    (0xD1, M::Psrlw, M::Vpsrlw, El::Int16, true),
    (0xD2, M::Psrld, M::Vpsrld, El::Int32, true),
    (0xD3, M::Psrlq, M::Vpsrlq, El::Int64, true),
    (0xD4, M::Paddq, M::Vpaddq, El::Int64, false),
    (0xD5, M::Pmullw, M::Vpmullw, El::Int16, false),
    (0xD8, M::Psubusb, M::Vpsubusb, El::UInt8, false),
    (0xD9, M::Psubusw, M::Vpsubusw, El::UInt16, false),
    (0xDA, M::Pminub, M::Vpminub, El::UInt8, false),
    (0xDB, M::Pand, M::Vpand, El::Int32, false),
    (0xDC, M::Paddusb, M::Vpaddusb, El::UInt8, false),
    (0xDD, M::Paddusw, M::Vpaddusw, El::UInt16, false),
    (0xDE, M::Pmaxub, M::Vpmaxub, El::UInt8, false),
    (0xDF, M::Pandn, M::Vpandn, El::Int32, false),
    (0xE0, M::Pavgb, M::Vpavgb, El::UInt8, false),
    (0xE1, M::Psraw, M::Vpsraw, El::Int16, true),
    (0xE2, M::Psrad, M::Vpsrad, El::Int32, true),
    (0xE3, M::Pavgw, M::Vpavgw, El::UInt16, false),
    (0xE4, M::Pmulhuw, M::Vpmulhuw, El::UInt16, false),
    (0xE5, M::Pmulhw, M::Vpmulhw, El::Int16, false),
    (0xE8, M::Psubsb, M::Vpsubsb, El::Int8, false),
    (0xE9, M::Psubsw, M::Vpsubsw, El::Int16, false),
    (0xEA, M::Pminsw, M::Vpminsw, El::Int16, false),
    (0xEB, M::Por, M::Vpor, El::Int32, false),
    (0xEC, M::Paddsb, M::Vpaddsb, El::Int8, false),
    (0xED, M::Paddsw, M::Vpaddsw, El::Int16, false),
    (0xEE, M::Pmaxsw, M::Vpmaxsw, El::Int16, false),
    (0xEF, M::Pxor, M::Vpxor, El::Int32, false),
    (0xF1, M::Psllw, M::Vpsllw, El::Int16, true),
    (0xF2, M::Pslld, M::Vpslld, El::Int32, true),
    (0xF3, M::Psllq, M::Vpsllq, El::Int64, true),
    (0xF4, M::Pmuludq, M::Vpmuludq, El::UInt32, false),
    (0xF5, M::Pmaddwd, M::Vpmaddwd, El::Int16, false),
    (0xF6, M::Psadbw, M::Vpsadbw, El::UInt8, false),
    (0xF8, M::Psubb, M::Vpsubb, El::Int8, false),
    (0xF9, M::Psubw, M::Vpsubw, El::Int16, false),
    (0xFA, M::Psubd, M::Vpsubd, El::Int32, false),
    (0xFB, M::Psubq, M::Vpsubq, El::Int64, false),
    (0xFC, M::Paddb, M::Vpaddb, El::Int8, false),
    (0xFD, M::Paddw, M::Vpaddw, El::Int16, false),
    (0xFE, M::Paddd, M::Vpaddd, El::Int32, false),
    // 66-only in the legacy map
    (0x6C, M::Punpcklqdq, M::Vpunpcklqdq, El::Int64, false),
    (0x6D, M::Punpckhqdq, M::Vpunpckhqdq, El::Int64, false),
];

const CMOVCC: [M; 16] = [
    M::Cmovo,
    M::Cmovno,
    M::Cmovb,
    M::Cmovae,
    M::Cmove,
    M::Cmovne,
    M::Cmovbe,
    M::Cmova,
    M::Cmovs,
    M::Cmovns,
    M::Cmovp,
    M::Cmovnp,
    M::Cmovl,
    M::Cmovge,
    M::Cmovle,
    M::Cmovg,
];

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

const SETCC: [M; 16] = [
    M::Seto,
    M::Setno,
    M::Setb,
    M::Setae,
    M::Sete,
    M::Setne,
    M::Setbe,
    M::Seta,
    M::Sets,
    M::Setns,
    M::Setp,
    M::Setnp,
    M::Setl,
    M::Setge,
    M::Setle,
    M::Setg,
];

/// Mandatory prefix split over vector forms, in none/66/F3/F2 order.
pub(super) fn sse(b: &mut TableBuilder, forms: [Form; 4]) -> NodeId {
    let t = forms.map(|f| match f {
        Some((m, ops, elem)) => b.vec(m, ops, elem),
        None => INV,
    });
    b.mp(t)
}

fn mmx_sse(b: &mut TableBuilder, m: M, elem: El) -> NodeId {
    sse(b, [Some((m, PQ, elem)), Some((m, VW, elem)), None, None])
}

fn mem(b: &mut TableBuilder, m: M, size: Ms) -> NodeId {
    b.leaf(H::M { m, size })
}

/// W0/W1 memory forms with distinct mnemonics (XSAVE and XSAVE64).
fn mem_w(b: &mut TableBuilder, m: M, m64: M, size: Ms) -> NodeId {
    let w0 = mem(b, m, size);
    let w1 = mem(b, m64, size);
    b.w(w0, w1)
}

pub(super) fn group(b: &mut TableBuilder, entries: &[(usize, NodeId)]) -> NodeId {
    let mut g = [INV; 8];
    for &(reg, node) in entries {
        g[reg] = node;
    }
    b.group(g)
}

pub(super) fn build(b: &mut TableBuilder) -> [NodeId; 256] {
    let mut t = [INV; 256];

    // 00-0F
    let jmpe_ev = b.leaf(H::Branch { m: M::Jmpe, kind: BranchKind::JmpeIndirect });
    let jmpe_ev = b.option(OptionKind::Jmpe, jmpe_ev, INV);
    let lkgs = b.leaf(H::Ew { m: M::Lkgs, sized_reg: false });
    let lkgs = b.only64(lkgs);
    let grp6_6 = b.mp([jmpe_ev, jmpe_ev, jmpe_ev, lkgs]);
    let grp6 = [
        b.leaf(H::Ew { m: M::Sldt, sized_reg: true }),
        b.leaf(H::Ew { m: M::Str, sized_reg: true }),
        b.leaf(H::Ew { m: M::Lldt, sized_reg: false }),
        b.leaf(H::Ew { m: M::Ltr, sized_reg: false }),
        b.leaf(H::Ew { m: M::Verr, sized_reg: false }),
        b.leaf(H::Ew { m: M::Verw, sized_reg: false }),
        grp6_6,
        INV,
    ];
    t[0x00] = b.group(grp6);
    t[0x01] = group7(b);
    t[0x02] = b.leaf(H::GEw { m: M::Lar });
    t[0x03] = b.leaf(H::GEw { m: M::Lsl });
    let syscall = b.simple(M::Syscall);
    let loadall = b.simple(M::Loadall);
    let legacy_05 = b.option(OptionKind::Loadall286, loadall, syscall);
    t[0x05] = b.bitness(syscall, legacy_05);
    t[0x06] = b.simple(M::Clts);
    let sysret = b.leaf(H::Sized { m: [M::Sysret, M::Sysret, M::Sysretq], size: DEF });
    let legacy_07 = b.option(OptionKind::Loadall386, loadall, sysret);
    t[0x07] = b.bitness(sysret, legacy_07);
    t[0x08] = b.simple(M::Invd);
    let wbinvd = b.simple(M::Wbinvd);
    let wbnoinvd = b.simple(M::Wbnoinvd);
    let split = b.mp([wbinvd, wbinvd, wbnoinvd, wbinvd]);
    t[0x09] = b.option(OptionKind::NoWbnoinvd, wbinvd, split);
    let cl1invmb = b.simple(M::Cl1invmb);
    t[0x0A] = b.option(OptionKind::Cl1invmb, cl1invmb, INV);
    t[0x0B] = b.simple(M::Ud2);
    let prefetch = [
        (0, mem(b, M::Prefetch, Ms::UInt8)),
        (1, mem(b, M::Prefetchw, Ms::UInt8)),
        (2, mem(b, M::Prefetchwt1, Ms::UInt8)),
    ];
    let prefetch = group(b, &prefetch);
    let prefetch = b.mem(prefetch);
    t[0x0D] = b.reserved_nop(prefetch);
    t[0x0E] = b.simple(M::Femms);
    let d3now = b.leaf(H::D3now);
    t[0x0F] = b.pnone(d3now);

    // 10-17
    let sse10 = sse(
        b,
        [
            Some((M::Movups, VW, El::Float32)),
            Some((M::Movupd, VW, El::Float64)),
            Some((M::Movss, VWS, El::Float32)),
            Some((M::Movsd, VWS, El::Float64)),
        ],
    );
    let sse11 = sse(
        b,
        [
            Some((M::Movups, WV, El::Float32)),
            Some((M::Movupd, WV, El::Float64)),
            Some((M::Movss, WSV, El::Float32)),
            Some((M::Movsd, WSV, El::Float64)),
        ],
    );
    let movhlps = b.vec(M::Movhlps, VUX, El::Float32);
    let movlps = b.vec(M::Movlps, VXMQ, El::Float32);
    let none12 = b.reg_mem(movhlps, movlps);
    let movlpd = b.vec(M::Movlpd, VXMQ, El::Float64);
    let movlpd = b.mem(movlpd);
    let movsldup = b.vec(M::Movsldup, VW, El::Float32);
    let movddup = b.vec(M::Movddup, VLWS, El::Float64);
    let sse12 = b.mp([none12, movlpd, movsldup, movddup]);
    let sse13 = sse(b, [Some((M::Movlps, MQVX, El::Float32)), Some((M::Movlpd, MQVX, El::Float64)), None, None]);
    let movlhps = b.vec(M::Movlhps, VUX, El::Float32);
    let movhps = b.vec(M::Movhps, VXMQ, El::Float32);
    let none16 = b.reg_mem(movlhps, movhps);
    let movhpd = b.vec(M::Movhpd, VXMQ, El::Float64);
    let movhpd = b.mem(movhpd);
    let movshdup = b.vec(M::Movshdup, VW, El::Float32);
    t[0x16] = b.mp([none16, movhpd, movshdup, INV]);
    t[0x17] = sse(b, [Some((M::Movhps, MQVX, El::Float32)), Some((M::Movhpd, MQVX, El::Float64)), None, None]);
    let umov = [
        b.leaf(H::EG { m: M::Umov, size: B8, attr: NO }),
        b.leaf(H::EG { m: M::Umov, size: DEF, attr: NO }),
        b.leaf(H::GE { m: M::Umov, size: B8 }),
        b.leaf(H::GE { m: M::Umov, size: DEF }),
    ];
    for (i, (node, umov)) in [sse10, sse11, sse12, sse13].into_iter().zip(umov).enumerate() {
        let legacy = b.bitness(node, umov);
        t[0x10 + i] = b.option(OptionKind::Umov, legacy, node);
    }

    // 18-1F: hint space
    let prefetch = [
        (0, mem(b, M::Prefetchnta, Ms::UInt8)),
        (1, mem(b, M::Prefetcht0, Ms::UInt8)),
        (2, mem(b, M::Prefetcht1, Ms::UInt8)),
        (3, mem(b, M::Prefetcht2, Ms::UInt8)),
    ];
    let prefetch = group(b, &prefetch);
    let prefetch = b.mem(prefetch);
    t[0x18] = b.reserved_nop(prefetch);
    t[0x19] = b.reserved_nop(INV);
    let bndldx = b.vec(M::Bndldx, BND_M, El::UInt64);
    let bndldx = b.mem(bndldx);
    let bndmov_load = b.vec(M::Bndmov, BND_BNDW, El::UInt64);
    let bndcl = b.vec(M::Bndcl, BND_EMODE, El::UInt64);
    let bndcu = b.vec(M::Bndcu, BND_EMODE, El::UInt64);
    let mpx_1a = b.mp([bndldx, bndmov_load, bndcl, bndcu]);
    let mpx_1a = b.option(OptionKind::Mpx, mpx_1a, INV);
    t[0x1A] = b.reserved_nop(mpx_1a);
    let bndstx = b.vec(M::Bndstx, M_BND, El::UInt64);
    let bndstx = b.mem(bndstx);
    let bndmov_store = b.vec(M::Bndmov, BNDW_BND, El::UInt64);
    let bndmk = b.vec(M::Bndmk, BND_M, El::UInt64);
    let bndmk = b.mem(bndmk);
    let bndcn = b.vec(M::Bndcn, BND_EMODE, El::UInt64);
    let mpx_1b = b.mp([bndstx, bndmov_store, bndmk, bndcn]);
    let mpx_1b = b.option(OptionKind::Mpx, mpx_1b, INV);
    t[0x1B] = b.reserved_nop(mpx_1b);
    let cldemote = [(0, mem(b, M::Cldemote, Ms::UInt8))];
    let cldemote = group(b, &cldemote);
    let cldemote = b.mem(cldemote);
    let cldemote = b.pnone(cldemote);
    t[0x1C] = b.reserved_nop(cldemote);
    t[0x1D] = b.reserved_nop(INV);
    let rdsspd = b.leaf(H::Rv { m: M::Rdsspd, size: SizePolicy::Fixed(OpSize::Size32) });
    let rdsspq = b.leaf(H::Rv { m: M::Rdsspq, size: SizePolicy::Fixed(OpSize::Size64) });
    let rdssp = b.w(rdsspd, rdsspq);
    let mut high: Vec<(u8, NodeId)> = (0xC8..=0xCF).map(|modrm| (modrm, rdssp)).collect();
    high.push((0xFA, b.simple(M::Endbr64)));
    high.push((0xFB, b.simple(M::Endbr32)));
    let cet = b.group8x64([INV; 8], &high);
    let cet = b.pf3(cet);
    t[0x1E] = b.reserved_nop(cet);
    let nop = b.leaf(H::E { m: M::Nop, size: DEF, attr: NO });
    let nop = group(b, &[(0, nop)]);
    t[0x1F] = b.reserved_nop(nop);

    // 20-2F
    t[0x20] = b.leaf(H::MovCr { to_cr: false });
    t[0x21] = b.leaf(H::MovDr { to_dr: false });
    t[0x22] = b.leaf(H::MovCr { to_cr: true });
    t[0x23] = b.leaf(H::MovDr { to_dr: true });
    let from_tr = b.leaf(H::MovTr { to_tr: false });
    t[0x24] = b.option(OptionKind::MovTr, from_tr, INV);
    let to_tr = b.leaf(H::MovTr { to_tr: true });
    t[0x26] = b.option(OptionKind::MovTr, to_tr, INV);
    t[0x28] = sse(b, [Some((M::Movaps, VW, El::Float32)), Some((M::Movapd, VW, El::Float64)), None, None]);
    t[0x29] = sse(b, [Some((M::Movaps, WV, El::Float32)), Some((M::Movapd, WV, El::Float64)), None, None]);
    t[0x2A] = sse(
        b,
        [
            Some((M::Cvtpi2ps, VXQ, El::Int32)),
            Some((M::Cvtpi2pd, VXQ, El::Int32)),
            Some((M::Cvtsi2ss, VEY, El::Float32)),
            Some((M::Cvtsi2sd, VEY, El::Float64)),
        ],
    );
    t[0x2B] = sse(
        b,
        [
            Some((M::Movntps, MV, El::Float32)),
            Some((M::Movntpd, MV, El::Float64)),
            Some((M::Movntss, MSSV, El::Float32)),
            Some((M::Movntsd, MSDV, El::Float64)),
        ],
    );
    t[0x2C] = sse(
        b,
        [
            Some((M::Cvttps2pi, PWHALF, El::Float32)),
            Some((M::Cvttpd2pi, PW, El::Float64)),
            Some((M::Cvttss2si, GYWS, El::Float32)),
            Some((M::Cvttsd2si, GYWS, El::Float64)),
        ],
    );
    t[0x2D] = sse(
        b,
        [
            Some((M::Cvtps2pi, PWHALF, El::Float32)),
            Some((M::Cvtpd2pi, PW, El::Float64)),
            Some((M::Cvtss2si, GYWS, El::Float32)),
            Some((M::Cvtsd2si, GYWS, El::Float64)),
        ],
    );
    t[0x2E] = sse(b, [Some((M::Ucomiss, VWS, El::Float32)), Some((M::Ucomisd, VWS, El::Float64)), None, None]);
    t[0x2F] = sse(b, [Some((M::Comiss, VWS, El::Float32)), Some((M::Comisd, VWS, El::Float64)), None, None]);

    // 30-3F
    for (op, m) in [(0x30, M::Wrmsr), (0x31, M::Rdtsc), (0x32, M::Rdmsr), (0x33, M::Rdpmc), (0x34, M::Sysenter)] {
        t[op] = b.simple(m);
    }
    let getsec = b.simple(M::Getsec);
    t[0x37] = b.pnone(getsec);
    t[0x35] = b.leaf(H::Sized { m: [M::Sysexit, M::Sysexit, M::Sysexitq], size: DEF });
    t[0x38] = b.escape(Map::M0F38);
    t[0x3A] = b.escape(Map::M0F3A);

    // 40-4F
    for (i, &m) in CMOVCC.iter().enumerate() {
        t[0x40 + i] = b.leaf(H::GE { m, size: DEF });
    }

    // 50-5F
    t[0x50] = sse(b, [Some((M::Movmskps, GDU, El::Float32)), Some((M::Movmskpd, GDU, El::Float64)), None, None]);
    for (op, m, _) in FP_ARITH {
        t[op as usize] = sse(
            b,
            [
                Some((m[0], VW, El::Float32)),
                Some((m[1], VW, El::Float64)),
                Some((m[2], VWS, El::Float32)),
                Some((m[3], VWS, El::Float64)),
            ],
        );
    }
    for (op, m, _) in FP_PACKED {
        t[op as usize] = sse(b, [Some((m[0], VW, El::Float32)), Some((m[1], VW, El::Float64)), None, None]);
    }
    t[0x52] = sse(b, [Some((M::Rsqrtps, VW, El::Float32)), None, Some((M::Rsqrtss, VWS, El::Float32)), None]);
    t[0x53] = sse(b, [Some((M::Rcpps, VW, El::Float32)), None, Some((M::Rcpss, VWS, El::Float32)), None]);
    t[0x5A] = sse(
        b,
        [
            Some((M::Cvtps2pd, VWHALF, El::Float32)),
            Some((M::Cvtpd2ps, VHALFW, El::Float64)),
            Some((M::Cvtss2sd, VWS, El::Float32)),
            Some((M::Cvtsd2ss, VWS, El::Float64)),
        ],
    );
    t[0x5B] = sse(
        b,
        [
            Some((M::Cvtdq2ps, VW, El::Int32)),
            Some((M::Cvtps2dq, VW, El::Float32)),
            Some((M::Cvttps2dq, VW, El::Float32)),
            None,
        ],
    );

    // 60-7F and D0-FF integer forms
    for (op, m, _, elem, _) in INT_OPS {
        t[op as usize] = if matches!(op, 0x6C | 0x6D) {
            sse(b, [None, Some((m, VW, elem)), None, None])
        } else {
            mmx_sse(b, m, elem)
        };
    }
    let movd_p = b.vec(M::Movd, PEY, El::Int32);
    let movq_p = b.vec(M::Movq, PEY, El::Int64);
    let to_mmx = b.w(movd_p, movq_p);
    let movd_v = b.vec(M::Movd, VEY, El::Int32);
    let movq_v = b.vec(M::Movq, VEY, El::Int64);
    let to_xmm = b.w(movd_v, movq_v);
    t[0x6E] = b.mp([to_mmx, to_xmm, INV, INV]);
    t[0x6F] = sse(
        b,
        [
            Some((M::Movq, PQ, El::Int64)),
            Some((M::Movdqa, VW, El::Int32)),
            Some((M::Movdqu, VW, El::Int32)),
            None,
        ],
    );
    t[0x70] = sse(
        b,
        [
            Some((M::Pshufw, PQIB, El::Int16)),
            Some((M::Pshufd, VWIB, El::Int32)),
            Some((M::Pshufhw, VWIB, El::Int16)),
            Some((M::Pshuflw, VWIB, El::Int16)),
        ],
    );
    let shift_imm = |b: &mut TableBuilder, entries: &[(usize, M, El, bool)]| {
        let mut g = [INV; 8];
        for &(reg, m, elem, xmm_only) in entries {
            let mmx = if xmm_only { None } else { Some((m, NIB, elem)) };
            g[reg] = sse(b, [mmx, Some((m, UIB, elem)), None, None]);
        }
        let g = b.group(g);
        b.reg(g)
    };
    t[0x71] = shift_imm(
        b,
        &[(2, M::Psrlw, El::Int16, false), (4, M::Psraw, El::Int16, false), (6, M::Psllw, El::Int16, false)],
    );
    t[0x72] = shift_imm(
        b,
        &[(2, M::Psrld, El::Int32, false), (4, M::Psrad, El::Int32, false), (6, M::Pslld, El::Int32, false)],
    );
    t[0x73] = shift_imm(
        b,
        &[
            (2, M::Psrlq, El::Int64, false),
            (3, M::Psrldq, El::UInt128, true),
            (6, M::Psllq, El::Int64, false),
            (7, M::Pslldq, El::UInt128, true),
        ],
    );
    let emms = b.simple(M::Emms);
    t[0x77] = b.pnone(emms);
    let vmread = b.vec(M::Vmread, EMODEGMODE, El::UInt64);
    let extrq = b.vec(M::Extrq, UXIBIB, El::UInt64);
    let extrq = group(b, &[(0, extrq)]);
    let insertq = b.vec(M::Insertq, VUXIBIB, El::UInt64);
    t[0x78] = b.mp([vmread, extrq, INV, insertq]);
    t[0x79] = sse(
        b,
        [
            Some((M::Vmwrite, GMODEEMODE, El::UInt64)),
            Some((M::Extrq, VUX, El::UInt64)),
            None,
            Some((M::Insertq, VUX, El::UInt64)),
        ],
    );
    t[0x7C] = sse(b, [None, Some((M::Haddpd, VW, El::Float64)), None, Some((M::Haddps, VW, El::Float32))]);
    t[0x7D] = sse(b, [None, Some((M::Hsubpd, VW, El::Float64)), None, Some((M::Hsubps, VW, El::Float32))]);
    let movd_e = b.vec(M::Movd, EYP, El::Int32);
    let movq_e = b.vec(M::Movq, EYP, El::Int64);
    let from_mmx = b.w(movd_e, movq_e);
    let movd_e = b.vec(M::Movd, EYV, El::Int32);
    let movq_e = b.vec(M::Movq, EYV, El::Int64);
    let from_xmm = b.w(movd_e, movq_e);
    let movq_xmm = b.vec(M::Movq, VWS, El::UInt64);
    t[0x7E] = b.mp([from_mmx, from_xmm, movq_xmm, INV]);
    t[0x7F] = sse(
        b,
        [
            Some((M::Movq, QP, El::Int64)),
            Some((M::Movdqa, WV, El::Int32)),
            Some((M::Movdqu, WV, El::Int32)),
            None,
        ],
    );

    // 80-9F
    for (i, &m) in JCC.iter().enumerate() {
        t[0x80 + i] = b.leaf(H::Branch { m, kind: BranchKind::Rel });
    }
    for (i, &m) in SETCC.iter().enumerate() {
        t[0x90 + i] = b.leaf(H::Setcc { m });
    }

    // A0-AF
    t[0xA0] = b.leaf(H::PushSeg { m: M::Push, seg: Register::FS });
    t[0xA1] = b.leaf(H::PushSeg { m: M::Pop, seg: Register::FS });
    t[0xA2] = b.simple(M::Cpuid);
    t[0xA3] = b.leaf(H::EG { m: M::Bt, size: DEF, attr: NO });
    t[0xA4] = b.leaf(H::ShiftDouble { m: M::Shld, cl: false });
    t[0xA5] = b.leaf(H::ShiftDouble { m: M::Shld, cl: true });
    let xbts = b.leaf(H::GE { m: M::Xbts, size: DEF });
    let ibts = b.leaf(H::EG { m: M::Ibts, size: DEF, attr: NO });
    let cmpxchg8 = b.leaf(H::EG { m: M::Cmpxchg, size: B8, attr: RMW });
    let cmpxchg = b.leaf(H::EG { m: M::Cmpxchg, size: DEF, attr: RMW });
    let (padlock_a6, padlock_a7) = padlock(b);
    let early_a6 = b.option(OptionKind::Cmpxchg486a, cmpxchg8, padlock_a6);
    let early_a7 = b.option(OptionKind::Cmpxchg486a, cmpxchg, padlock_a7);
    t[0xA6] = b.option(OptionKind::Xbts, xbts, early_a6);
    t[0xA7] = b.option(OptionKind::Xbts, ibts, early_a7);
    t[0xA8] = b.leaf(H::PushSeg { m: M::Push, seg: Register::GS });
    t[0xA9] = b.leaf(H::PushSeg { m: M::Pop, seg: Register::GS });
    t[0xAA] = b.simple(M::Rsm);
    t[0xAB] = b.leaf(H::EG { m: M::Bts, size: DEF, attr: RMW });
    t[0xAC] = b.leaf(H::ShiftDouble { m: M::Shrd, cl: false });
    t[0xAD] = b.leaf(H::ShiftDouble { m: M::Shrd, cl: true });
    t[0xAE] = group15(b);
    t[0xAF] = b.leaf(H::GE { m: M::Imul, size: DEF });

    // B0-BF
    t[0xB0] = cmpxchg8;
    t[0xB1] = cmpxchg;
    t[0xB2] = b.leaf(H::GM { m: M::Lss, bound: false });
    t[0xB3] = b.leaf(H::EG { m: M::Btr, size: DEF, attr: RMW });
    t[0xB4] = b.leaf(H::GM { m: M::Lfs, bound: false });
    t[0xB5] = b.leaf(H::GM { m: M::Lgs, bound: false });
    t[0xB6] = b.leaf(H::Movx { m: M::Movzx, src: OpSize::Size8 });
    t[0xB7] = b.leaf(H::Movx { m: M::Movzx, src: OpSize::Size16 });
    let jmpe = b.leaf(H::Branch { m: M::Jmpe, kind: BranchKind::JmpeRel });
    let jmpe = b.option(OptionKind::Jmpe, jmpe, INV);
    let popcnt = b.leaf(H::GE { m: M::Popcnt, size: DEF });
    t[0xB8] = b.mp([jmpe, jmpe, popcnt, INV]);
    t[0xB9] = b.leaf(H::GE { m: M::Ud1, size: DEF });
    t[0xBA] = {
        let g = [
            (4, b.leaf(H::EImm { m: M::Bt, size: DEF, imm: ImmForm::Ib, attr: NO })),
            (5, b.leaf(H::EImm { m: M::Bts, size: DEF, imm: ImmForm::Ib, attr: RMW })),
            (6, b.leaf(H::EImm { m: M::Btr, size: DEF, imm: ImmForm::Ib, attr: RMW })),
            (7, b.leaf(H::EImm { m: M::Btc, size: DEF, imm: ImmForm::Ib, attr: RMW })),
        ];
        group(b, &g)
    };
    t[0xBB] = b.leaf(H::EG { m: M::Btc, size: DEF, attr: RMW });
    for (op, plain, with_f3, option) in [
        (0xBC, M::Bsf, M::Tzcnt, OptionKind::NoMpfx0fbc),
        (0xBD, M::Bsr, M::Lzcnt, OptionKind::NoMpfx0fbd),
    ] {
        let plain = b.leaf(H::GE { m: plain, size: DEF });
        let with_f3 = b.leaf(H::GE { m: with_f3, size: DEF });
        let split = b.mp([plain, plain, with_f3, plain]);
        t[op] = b.option(option, plain, split);
    }
    t[0xBE] = b.leaf(H::Movx { m: M::Movsx, src: OpSize::Size8 });
    t[0xBF] = b.leaf(H::Movx { m: M::Movsx, src: OpSize::Size16 });

    // C0-CF
    t[0xC0] = b.leaf(H::EG { m: M::Xadd, size: B8, attr: RMW });
    t[0xC1] = b.leaf(H::EG { m: M::Xadd, size: DEF, attr: RMW });
    t[0xC2] = sse(
        b,
        [
            Some((M::Cmpps, VWIB, El::Float32)),
            Some((M::Cmppd, VWIB, El::Float64)),
            Some((M::Cmpss, VWSIB, El::Float32)),
            Some((M::Cmpsd, VWSIB, El::Float64)),
        ],
    );
    let movnti = b.vec(M::Movnti, MEYGY, El::UInt32);
    t[0xC3] = b.pnone(movnti);
    t[0xC4] = sse(b, [Some((M::Pinsrw, PEDWIB, El::Int16)), Some((M::Pinsrw, VEDWIB, El::Int16)), None, None]);
    t[0xC5] = sse(b, [Some((M::Pextrw, GDNIB, El::Int16)), Some((M::Pextrw, GDUIB, El::Int16)), None, None]);
    t[0xC6] = sse(b, [Some((M::Shufps, VWIB, El::Float32)), Some((M::Shufpd, VWIB, El::Float64)), None, None]);
    t[0xC7] = group9(b);
    for r in 0..8 {
        t[0xC8 + r] = b.leaf(H::Bswap);
    }

    // D0-FF leftovers
    t[0xD0] = sse(b, [None, Some((M::Addsubpd, VW, El::Float64)), None, Some((M::Addsubps, VW, El::Float32))]);
    t[0xD6] = sse(
        b,
        [
            None,
            Some((M::Movq, WSV, El::UInt64)),
            Some((M::Movq2dq, VXN, El::UInt64)),
            Some((M::Movdq2q, PUX, El::UInt64)),
        ],
    );
    t[0xD7] = sse(b, [Some((M::Pmovmskb, GDN, El::Int8)), Some((M::Pmovmskb, GDU, El::Int8)), None, None]);
    t[0xE6] = sse(
        b,
        [
            None,
            Some((M::Cvttpd2dq, VHALFW, El::Float64)),
            Some((M::Cvtdq2pd, VWHALF, El::Int32)),
            Some((M::Cvtpd2dq, VHALFW, El::Float64)),
        ],
    );
    t[0xE7] = sse(b, [Some((M::Movntq, MQP, El::Int64)), Some((M::Movntdq, MV, El::Int64)), None, None]);
    t[0xF0] = sse(b, [None, None, None, Some((M::Lddqu, VM, El::UInt8))]);
    t[0xF7] = sse(b, [Some((M::Maskmovq, PN, El::Int8)), Some((M::Maskmovdqu, VUX, El::Int8)), None, None]);
    t[0xFF] = b.leaf(H::GE { m: M::Ud0, size: DEF });

    t
}

/// 0F 01: descriptor tables and the system instructions keyed by ModRM.
fn group7(b: &mut TableBuilder) -> NodeId {
    let rstorssp = mem(b, M::Rstorssp, Ms::UInt64);
    let rstorssp = b.pf3(rstorssp);
    let low = [
        b.leaf(H::DescTable { m: M::Sgdt }),
        b.leaf(H::DescTable { m: M::Sidt }),
        b.leaf(H::DescTable { m: M::Lgdt }),
        b.leaf(H::DescTable { m: M::Lidt }),
        b.leaf(H::Ew { m: M::Smsw, sized_reg: true }),
        rstorssp,
        b.leaf(H::Ew { m: M::Lmsw, sized_reg: false }),
        mem(b, M::Invlpg, Ms::UInt8),
    ];
    let simple = [
        (0xC1, M::Vmcall),
        (0xC2, M::Vmlaunch),
        (0xC3, M::Vmresume),
        (0xC4, M::Vmxoff),
        (0xC5, M::Pconfig),
        (0xC8, M::Monitor),
        (0xC9, M::Mwait),
        (0xCA, M::Clac),
        (0xCB, M::Stac),
        (0xCF, M::Encls),
        (0xD0, M::Xgetbv),
        (0xD1, M::Xsetbv),
        (0xD4, M::Vmfunc),
        (0xD5, M::Xend),
        (0xD6, M::Xtest),
        (0xD7, M::Enclu),
        (0xD8, M::Vmrun),
        (0xD9, M::Vmmcall),
        (0xDA, M::Vmload),
        (0xDB, M::Vmsave),
        (0xDC, M::Stgi),
        (0xDD, M::Clgi),
        (0xDE, M::Skinit),
        (0xDF, M::Invlpga),
        (0xEE, M::Rdpkru),
        (0xEF, M::Wrpkru),
        (0xF9, M::Rdtscp),
        (0xFA, M::Monitorx),
        (0xFB, M::Mwaitx),
        (0xFC, M::Clzero),
        (0xFD, M::Rdpru),
    ];
    // No register form in this group takes a 66/F2/F3 prefix unless listed
    // below with its own split.
    let mut high: Vec<(u8, NodeId)> = simple
        .iter()
        .map(|&(modrm, m)| {
            let node = b.simple(m);
            (modrm, b.pnone(node))
        })
        .collect();
    let serialize = b.simple(M::Serialize);
    let setssbsy = b.simple(M::Setssbsy);
    let xsusldtrk = b.simple(M::Xsusldtrk);
    high.push((0xE8, b.mp([serialize, INV, setssbsy, xsusldtrk])));
    let xresldtrk = b.simple(M::Xresldtrk);
    high.push((0xE9, b.pf2(xresldtrk)));
    let saveprevssp = b.simple(M::Saveprevssp);
    high.push((0xEA, b.pf3(saveprevssp)));
    let swapgs = b.simple(M::Swapgs);
    let swapgs = b.only64(swapgs);
    high.push((0xF8, b.pnone(swapgs)));
    for (modrm, m) in [(0xFE, M::Invlpgb), (0xFF, M::Tlbsync)] {
        let node = b.simple(m);
        let node = b.pnone(node);
        high.push((modrm, b.option(OptionKind::NoInvlpgb, INV, node)));
    }
    b.group8x64(low, &high)
}

/// 0F AE: state save/restore, fences and FS/GS base access.
fn group15(b: &mut TableBuilder) -> NodeId {
    let xsaveopt = mem_w(b, M::Xsaveopt, M::Xsaveopt64, Ms::Xsave);
    let clwb = mem(b, M::Clwb, Ms::UInt8);
    let clrssbsy = mem(b, M::Clrssbsy, Ms::UInt64);
    let clflush = mem(b, M::Clflush, Ms::UInt8);
    let clflushopt = mem(b, M::Clflushopt, Ms::UInt8);
    let ptwrite = b.vec(M::Ptwrite, EY, El::UInt32);
    let xsave = mem_w(b, M::Xsave, M::Xsave64, Ms::Xsave);
    let state = [
        mem_w(b, M::Fxsave, M::Fxsave64, Ms::Fxsave512),
        mem_w(b, M::Fxrstor, M::Fxrstor64, Ms::Fxsave512),
        mem(b, M::Ldmxcsr, Ms::UInt32),
        mem(b, M::Stmxcsr, Ms::UInt32),
    ];
    let state = state.map(|node| b.pnone(node));
    let xrstor = mem_w(b, M::Xrstor, M::Xrstor64, Ms::Xsave);
    let low = [
        state[0],
        state[1],
        state[2],
        state[3],
        b.mp([xsave, INV, ptwrite, INV]),
        b.pnone(xrstor),
        b.mp([xsaveopt, clwb, clrssbsy, INV]),
        b.mp([clflush, clflushopt, INV, INV]),
    ];

    let mut high: Vec<(u8, NodeId)> = Vec::new();
    for (row, m) in [(0xC0u8, M::Rdfsbase), (0xC8, M::Rdgsbase), (0xD0, M::Wrfsbase), (0xD8, M::Wrgsbase)] {
        let node = b.leaf(H::Rv { m, size: DEF });
        let node = b.only64(node);
        let node = b.pf3(node);
        high.extend((row..row + 8).map(|modrm| (modrm, node)));
    }
    let lfence = b.simple(M::Lfence);
    let incsspd = b.leaf(H::Rv { m: M::Incsspd, size: SizePolicy::Fixed(OpSize::Size32) });
    let incsspq = b.leaf(H::Rv { m: M::Incsspq, size: SizePolicy::Fixed(OpSize::Size64) });
    let incssp = b.w(incsspd, incsspq);
    let e8 = b.mp([lfence, INV, incssp, INV]);
    high.extend((0xE8..=0xEF).map(|modrm| (modrm, e8)));
    let mfence = b.simple(M::Mfence);
    let tpause = b.vec(M::Tpause, RD, El::UInt32);
    let umonitor = b.vec(M::Umonitor, RMODE, El::UInt32);
    let umwait = b.vec(M::Umwait, RD, El::UInt32);
    let f0 = b.mp([mfence, tpause, umonitor, umwait]);
    high.extend((0xF0..=0xF7).map(|modrm| (modrm, f0)));
    let sfence = b.simple(M::Sfence);
    let sfence = b.pnone(sfence);
    high.extend((0xF9..=0xFF).map(|modrm| (modrm, sfence)));
    let pcommit = b.simple(M::Pcommit);
    let pcommit = b.option(OptionKind::Pcommit, pcommit, INV);
    let sfence_f8 = b.simple(M::Sfence);
    high.push((0xF8, b.mp([sfence_f8, pcommit, INV, INV])));
    let ptwrite = b.pf3(ptwrite);
    high.extend((0xE0..=0xE7).map(|modrm| (modrm, ptwrite)));
    b.group8x64(low, &high)
}

/// 0F A6 and 0F A7 register forms: the VIA PadLock hash, multiply and
/// crypt instructions. Everything but XSTORE requires F3.
fn padlock(b: &mut TableBuilder) -> (NodeId, NodeId) {
    let mut a6 = Vec::new();
    for (modrm, m) in [(0xC0u8, M::Montmul), (0xC8, M::Xsha1), (0xD0, M::Xsha256)] {
        let node = b.simple(m);
        a6.push((modrm, b.pf3(node)));
    }
    let xstore = b.simple(M::Xstore);
    let mut a7 = vec![(0xC0u8, b.mp([xstore, INV, xstore, INV]))];
    for (modrm, m) in [
        (0xC8u8, M::Xcryptecb),
        (0xD0, M::Xcryptcbc),
        (0xD8, M::Xcryptctr),
        (0xE0, M::Xcryptcfb),
        (0xE8, M::Xcryptofb),
    ] {
        let node = b.simple(m);
        a7.push((modrm, b.pf3(node)));
    }
    (b.group8x64([INV; 8], &a6), b.group8x64([INV; 8], &a7))
}

/// 0F C7: CMPXCHG8B/16B, XSAVE variants, VMX pointers and RDRAND/RDSEED.
fn group9(b: &mut TableBuilder) -> NodeId {
    let vmptrld = mem(b, M::Vmptrld, Ms::UInt64);
    let vmclear = mem(b, M::Vmclear, Ms::UInt64);
    let vmxon = mem(b, M::Vmxon, Ms::UInt64);
    let vmptrst = mem(b, M::Vmptrst, Ms::UInt64);
    let xrstors = mem_w(b, M::Xrstors, M::Xrstors64, Ms::Xsave);
    let xsavec = mem_w(b, M::Xsavec, M::Xsavec64, Ms::Xsave);
    let xsaves = mem_w(b, M::Xsaves, M::Xsaves64, Ms::Xsave);
    let low = [
        INV,
        b.leaf(H::Cmpxchg8b),
        INV,
        b.pnone(xrstors),
        b.pnone(xsavec),
        b.pnone(xsaves),
        b.mp([vmptrld, vmclear, vmxon, INV]),
        b.pnone(vmptrst),
    ];
    let rdrand = b.leaf(H::Rv { m: M::Rdrand, size: DEF });
    let senduipi = b.vec(M::Senduipi, RQ, El::UInt64);
    let senduipi = b.only64(senduipi);
    let rdrand = b.mp([rdrand, rdrand, senduipi, INV]);
    let rdseed = b.leaf(H::Rv { m: M::Rdseed, size: DEF });
    let rdpid = b.vec(M::Rdpid, RMODE, El::UInt64);
    let rdseed = b.mp([rdseed, rdseed, rdpid, INV]);
    let mut high: Vec<(u8, NodeId)> = (0xC0..=0xEF).map(|modrm| (modrm, INV)).collect();
    high.extend((0xF0..=0xF7).map(|modrm| (modrm, rdrand)));
    high.extend((0xF8..=0xFF).map(|modrm| (modrm, rdseed)));
    b.group8x64(low, &high)
}

#[cfg(test)]
mod tests {
    use super::super::resolve;
    use super::*;
    use crate::options::DecoderOptions;
    use crate::x86::context::DecodeContext;
    use xdis_core::Bitness;

    fn lookup(bitness: Bitness, bytes: &[u8], options: DecoderOptions) -> Option<H> {
        let mut cx = DecodeContext::new(bytes, 0, 0, bitness, options);
        let (map, opcode) = crate::x86::prefix::scan(&mut cx.cursor, &mut cx.state).ok()?;
        resolve(&mut cx, map, opcode).ok().map(|(h, _)| h)
    }

    fn mnemonic(bitness: Bitness, bytes: &[u8], options: DecoderOptions) -> Option<M> {
        match lookup(bitness, bytes, options)? {
            H::Simple { m } | H::GE { m, .. } | H::EG { m, .. } | H::Rv { m, .. } | H::M { m, .. } => Some(m),
            H::Vector { m, .. } | H::Branch { m, .. } | H::E { m, .. } | H::Ew { m, .. } => Some(m),
            H::DescTable { m } => Some(m),
            H::Sized { m, .. } => Some(m[0]),
            _ => None,
        }
    }

    #[test]
    fn test_prefix_selects_sse_form() {
        let opts = DecoderOptions::new();
        assert_eq!(mnemonic(Bitness::Bits64, &[0x0F, 0x58, 0xC1], opts), Some(M::Addps));
        assert_eq!(mnemonic(Bitness::Bits64, &[0xF3, 0x0F, 0x58, 0xC1], opts), Some(M::Addss));
        assert_eq!(mnemonic(Bitness::Bits64, &[0xF2, 0x0F, 0x58, 0xC1], opts), Some(M::Addsd));
        assert_eq!(mnemonic(Bitness::Bits64, &[0x0F, 0xFC, 0xC1], opts), Some(M::Paddb));
        assert_eq!(mnemonic(Bitness::Bits64, &[0x66, 0x0F, 0x6C, 0xC1], opts), Some(M::Punpcklqdq));
        assert_eq!(mnemonic(Bitness::Bits64, &[0x0F, 0x6C, 0xC1], opts), None);
    }

    #[test]
    fn test_group7_register_forms() {
        let opts = DecoderOptions::new();
        assert_eq!(mnemonic(Bitness::Bits64, &[0x0F, 0x01, 0xD0], opts), Some(M::Xgetbv));
        assert_eq!(mnemonic(Bitness::Bits64, &[0x0F, 0x01, 0xF8], opts), Some(M::Swapgs));
        assert_eq!(mnemonic(Bitness::Bits32, &[0x0F, 0x01, 0xF8], opts), None);
        assert_eq!(mnemonic(Bitness::Bits64, &[0x0F, 0x01, 0x10], opts), Some(M::Lgdt));
        assert_eq!(mnemonic(Bitness::Bits64, &[0x0F, 0x01, 0xFE], opts), Some(M::Invlpgb));
        let no_invlpgb = DecoderOptions::new().with_no_invlpgb(true);
        assert_eq!(mnemonic(Bitness::Bits64, &[0x0F, 0x01, 0xFE], no_invlpgb), None);
    }

    #[test]
    fn test_fences_and_fsgsbase() {
        let opts = DecoderOptions::new();
        assert_eq!(mnemonic(Bitness::Bits64, &[0x0F, 0xAE, 0xE8], opts), Some(M::Lfence));
        assert_eq!(mnemonic(Bitness::Bits64, &[0x0F, 0xAE, 0xF0], opts), Some(M::Mfence));
        assert_eq!(mnemonic(Bitness::Bits64, &[0x0F, 0xAE, 0xF8], opts), Some(M::Sfence));
        assert_eq!(mnemonic(Bitness::Bits64, &[0xF3, 0x0F, 0xAE, 0xC0], opts), Some(M::Rdfsbase));
        assert_eq!(mnemonic(Bitness::Bits32, &[0xF3, 0x0F, 0xAE, 0xC0], opts), None);
        assert_eq!(mnemonic(Bitness::Bits64, &[0x66, 0x0F, 0xAE, 0xF8], opts), None);
        let pcommit = DecoderOptions::new().with_pcommit(true);
        assert_eq!(mnemonic(Bitness::Bits64, &[0x66, 0x0F, 0xAE, 0xF8], pcommit), Some(M::Pcommit));
    }

    #[test]
    fn test_tzcnt_option() {
        let bytes = [0xF3, 0x0F, 0xBC, 0xC1];
        assert_eq!(mnemonic(Bitness::Bits64, &bytes, DecoderOptions::new()), Some(M::Tzcnt));
        let old = DecoderOptions::new().with_no_mpfx_0fbc(true);
        assert_eq!(mnemonic(Bitness::Bits64, &bytes, old), Some(M::Bsf));
    }

    #[test]
    fn test_umov_only_outside_64bit() {
        let umov = DecoderOptions::new().with_umov(true);
        assert_eq!(mnemonic(Bitness::Bits32, &[0x0F, 0x10, 0xC1], umov), Some(M::Umov));
        assert_eq!(mnemonic(Bitness::Bits64, &[0x0F, 0x10, 0xC1], umov), Some(M::Movups));
    }

    #[test]
    fn test_cet_hint_space() {
        let opts = DecoderOptions::new();
        assert_eq!(mnemonic(Bitness::Bits64, &[0xF3, 0x0F, 0x1E, 0xFA], opts), Some(M::Endbr64));
        assert_eq!(mnemonic(Bitness::Bits64, &[0x0F, 0x1E, 0xFA], opts), Some(M::ReservedNop));
        assert_eq!(mnemonic(Bitness::Bits64, &[0x0F, 0x1F, 0x00], opts), Some(M::Nop));
    }

    #[test]
    fn test_unprefixed_system_forms_reject_mandatory_prefixes() {
        let opts = DecoderOptions::new();
        assert_eq!(mnemonic(Bitness::Bits64, &[0x0F, 0x37], opts), Some(M::Getsec));
        assert_eq!(mnemonic(Bitness::Bits64, &[0x66, 0x0F, 0x37], opts), None);
        assert_eq!(mnemonic(Bitness::Bits64, &[0x0F, 0x01, 0xEF], opts), Some(M::Wrpkru));
        assert_eq!(mnemonic(Bitness::Bits64, &[0x66, 0x0F, 0x01, 0xEF], opts), None);
        assert_eq!(mnemonic(Bitness::Bits64, &[0x66, 0x0F, 0x01, 0xD1], opts), None);
        assert_eq!(mnemonic(Bitness::Bits64, &[0xF2, 0x0F, 0x01, 0xC1], opts), None);
        assert_eq!(mnemonic(Bitness::Bits64, &[0xF3, 0x0F, 0x01, 0xF8], opts), None);
        assert_eq!(mnemonic(Bitness::Bits64, &[0x0F, 0xAE, 0x00], opts), Some(M::Fxsave));
        assert_eq!(mnemonic(Bitness::Bits64, &[0x66, 0x0F, 0xAE, 0x00], opts), None);
        assert_eq!(mnemonic(Bitness::Bits64, &[0xF3, 0x0F, 0xAE, 0x10], opts), None);
        assert_eq!(mnemonic(Bitness::Bits64, &[0x66, 0x0F, 0xAE, 0x28], opts), None);
        assert_eq!(mnemonic(Bitness::Bits64, &[0x0F, 0xC7, 0x20], opts), Some(M::Xsavec));
        assert_eq!(mnemonic(Bitness::Bits64, &[0x66, 0x0F, 0xC7, 0x20], opts), None);
        assert_eq!(mnemonic(Bitness::Bits64, &[0xF2, 0x0F, 0xC7, 0x18], opts), None);
        assert_eq!(lookup(Bitness::Bits64, &[0x66, 0x0F, 0x0F, 0xC1, 0x9E], opts), None);
    }

    #[test]
    fn test_group15_f3_forms() {
        let opts = DecoderOptions::new();
        assert_eq!(mnemonic(Bitness::Bits64, &[0xF3, 0x0F, 0xAE, 0xE0], opts), Some(M::Ptwrite));
        assert_eq!(mnemonic(Bitness::Bits64, &[0xF3, 0x0F, 0xAE, 0x20], opts), Some(M::Ptwrite));
        assert_eq!(mnemonic(Bitness::Bits64, &[0x0F, 0xAE, 0x20], opts), Some(M::Xsave));
        assert_eq!(mnemonic(Bitness::Bits64, &[0x0F, 0xAE, 0xE0], opts), None);
        assert_eq!(mnemonic(Bitness::Bits64, &[0xF3, 0x0F, 0xAE, 0x30], opts), Some(M::Clrssbsy));
        assert_eq!(mnemonic(Bitness::Bits64, &[0x66, 0x0F, 0xAE, 0x30], opts), Some(M::Clwb));
    }

    #[test]
    fn test_late_additions_to_legacy_groups() {
        let opts = DecoderOptions::new();
        assert_eq!(mnemonic(Bitness::Bits64, &[0xF2, 0x0F, 0x00, 0xF0], opts), Some(M::Lkgs));
        assert_eq!(mnemonic(Bitness::Bits32, &[0xF2, 0x0F, 0x00, 0xF0], opts), None);
        assert_eq!(mnemonic(Bitness::Bits64, &[0xF3, 0x0F, 0xC7, 0xF0], opts), Some(M::Senduipi));
        assert_eq!(mnemonic(Bitness::Bits32, &[0xF3, 0x0F, 0xC7, 0xF0], opts), None);
        assert_eq!(mnemonic(Bitness::Bits64, &[0x0F, 0xC7, 0xF0], opts), Some(M::Rdrand));
        assert_eq!(mnemonic(Bitness::Bits64, &[0xF3, 0x0F, 0x2B, 0x00], opts), Some(M::Movntss));
        assert_eq!(mnemonic(Bitness::Bits64, &[0xF2, 0x0F, 0x2B, 0x00], opts), Some(M::Movntsd));
    }

    #[test]
    fn test_padlock() {
        let opts = DecoderOptions::new();
        assert_eq!(mnemonic(Bitness::Bits32, &[0xF3, 0x0F, 0xA6, 0xC0], opts), Some(M::Montmul));
        assert_eq!(mnemonic(Bitness::Bits32, &[0xF3, 0x0F, 0xA6, 0xD0], opts), Some(M::Xsha256));
        assert_eq!(mnemonic(Bitness::Bits32, &[0x0F, 0xA6, 0xC8], opts), None);
        assert_eq!(mnemonic(Bitness::Bits32, &[0x0F, 0xA7, 0xC0], opts), Some(M::Xstore));
        assert_eq!(mnemonic(Bitness::Bits32, &[0xF3, 0x0F, 0xA7, 0xC8], opts), Some(M::Xcryptecb));
        assert_eq!(mnemonic(Bitness::Bits64, &[0xF3, 0x0F, 0xA7, 0xE8], opts), Some(M::Xcryptofb));
        let xbts = DecoderOptions::new().with_xbts(true);
        assert_eq!(mnemonic(Bitness::Bits32, &[0x0F, 0xA7, 0xC0], xbts), Some(M::Ibts));
    }

    #[test]
    fn test_mpx_option() {
        let bytes = [0x66, 0x0F, 0x1A, 0xC1];
        assert_eq!(mnemonic(Bitness::Bits64, &bytes, DecoderOptions::new()), Some(M::ReservedNop));
        let mpx = DecoderOptions::new().with_mpx(true);
        assert_eq!(mnemonic(Bitness::Bits64, &bytes, mpx), Some(M::Bndmov));
    }
}
