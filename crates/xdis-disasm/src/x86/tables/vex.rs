//! VEX maps 0F, 0F38 and 0F3A.
//!
//! Every entry sits under a mandatory prefix node because VEX.pp always
//! selects one. Lengths and W are only split where the form cares.

use xdis_core::{Element as El, Mnemonic as M};

use super::map0f::{self, group, INT_OPS};
use super::map0f38::{PMOVX, SSE41, SSSE3};
use super::map0f3a::{IMM_FORMS, PCMPSTR};
use super::ops::*;
use super::{NodeId, TableBuilder};

const INV: NodeId = NodeId::INVALID;

const NP: usize = 0;
const P66: usize = 1;
const PF2: usize = 3;

/// Dot products into dword accumulators, W0, 128/256-bit: opcode and the
/// none/66/F3/F2 mnemonics.
const DOT: [(u8, [Option<M>; 4]); 6] = [
    (0x50, [Some(M::Vpdpbuud), Some(M::Vpdpbusd), Some(M::Vpdpbsud), Some(M::Vpdpbssd)]),
    (0x51, [Some(M::Vpdpbuuds), Some(M::Vpdpbusds), Some(M::Vpdpbsuds), Some(M::Vpdpbssds)]),
    (0x52, [None, Some(M::Vpdpwssd), None, None]),
    (0x53, [None, Some(M::Vpdpwssds), None, None]),
    (0xD2, [Some(M::Vpdpwuud), Some(M::Vpdpwusd), Some(M::Vpdpwsud), None]),
    (0xD3, [Some(M::Vpdpwuuds), Some(M::Vpdpwusds), Some(M::Vpdpwsuds), None]),
];

/// CMPccXADD in condition code order.
const CMPXADD: [M; 16] = [
    M::Cmpoxadd,
    M::Cmpnoxadd,
    M::Cmpbxadd,
    M::Cmpnbxadd,
    M::Cmpzxadd,
    M::Cmpnzxadd,
    M::Cmpbexadd,
    M::Cmpnbexadd,
    M::Cmpsxadd,
    M::Cmpnsxadd,
    M::Cmppxadd,
    M::Cmpnpxadd,
    M::Cmplxadd,
    M::Cmpnlxadd,
    M::Cmplexadd,
    M::Cmpnlexadd,
];

/// FMA forms: opcode, W0 and W1 mnemonics, scalar.
pub(super) const FMA: [(u8, M, M, bool); 30] = [
    (0x96, M::Vfmaddsub132ps, M::Vfmaddsub132pd, false),
    (0x97, M::Vfmsubadd132ps, M::Vfmsubadd132pd, false),
    (0x98, M::Vfmadd132ps, M::Vfmadd132pd, false),
    (0x99, M::Vfmadd132ss, M::Vfmadd132sd, true),
    (0x9A, M::Vfmsub132ps, M::Vfmsub132pd, false),
    (0x9B, M::Vfmsub132ss, M::Vfmsub132sd, true),
    (0x9C, M::Vfnmadd132ps, M::Vfnmadd132pd, false),
    (0x9D, M::Vfnmadd132ss, M::Vfnmadd132sd, true),
    (0x9E, M::Vfnmsub132ps, M::Vfnmsub132pd, false),
    (0x9F, M::Vfnmsub132ss, M::Vfnmsub132sd, true),
    (0xA6, M::Vfmaddsub213ps, M::Vfmaddsub213pd, false),
    (0xA7, M::Vfmsubadd213ps, M::Vfmsubadd213pd, false),
    (0xA8, M::Vfmadd213ps, M::Vfmadd213pd, false),
    (0xA9, M::Vfmadd213ss, M::Vfmadd213sd, true),
    (0xAA, M::Vfmsub213ps, M::Vfmsub213pd, false),
    (0xAB, M::Vfmsub213ss, M::Vfmsub213sd, true),
    (0xAC, M::Vfnmadd213ps, M::Vfnmadd213pd, false),
    (0xAD, M::Vfnmadd213ss, M::Vfnmadd213sd, true),
    (0xAE, M::Vfnmsub213ps, M::Vfnmsub213pd, false),
    (0xAF, M::Vfnmsub213ss, M::Vfnmsub213sd, true),
    (0xB6, M::Vfmaddsub231ps, M::Vfmaddsub231pd, false),
    (0xB7, M::Vfmsubadd231ps, M::Vfmsubadd231pd, false),
    (0xB8, M::Vfmadd231ps, M::Vfmadd231pd, false),
    (0xB9, M::Vfmadd231ss, M::Vfmadd231sd, true),
    (0xBA, M::Vfmsub231ps, M::Vfmsub231pd, false),
    (0xBB, M::Vfmsub231ss, M::Vfmsub231sd, true),
    (0xBC, M::Vfnmadd231ps, M::Vfnmadd231pd, false),
    (0xBD, M::Vfnmadd231ss, M::Vfnmadd231sd, true),
    (0xBE, M::Vfnmsub231ps, M::Vfnmsub231pd, false),
    (0xBF, M::Vfnmsub231ss, M::Vfnmsub231sd, true),
];

/// Opmask logic (VEX.L1): opcode, none-prefix W0/W1, 66-prefix W0/W1.
const KLOGIC: [(u8, [M; 2], [M; 2]); 6] = [
    (0x41, [M::Kandw, M::Kandq], [M::Kandb, M::Kandd]),
    (0x42, [M::Kandnw, M::Kandnq], [M::Kandnb, M::Kandnd]),
    (0x45, [M::Korw, M::Korq], [M::Korb, M::Kord]),
    (0x46, [M::Kxnorw, M::Kxnorq], [M::Kxnorb, M::Kxnord]),
    (0x47, [M::Kxorw, M::Kxorq], [M::Kxorb, M::Kxord]),
    (0x4A, [M::Kaddw, M::Kaddq], [M::Kaddb, M::Kaddd]),
];

/// FMA4: opcode, mnemonic, scalar.
const FMA4: [(u8, M, bool); 20] = [
    (0x5C, M::Vfmaddsubps, false),
    (0x5D, M::Vfmaddsubpd, false),
    (0x5E, M::Vfmsubaddps, false),
    (0x5F, M::Vfmsubaddpd, false),
    (0x68, M::Vfmaddps, false),
    (0x69, M::Vfmaddpd, false),
    (0x6A, M::Vfmaddss, true),
    (0x6B, M::Vfmaddsd, true),
    (0x6C, M::Vfmsubps, false),
    (0x6D, M::Vfmsubpd, false),
    (0x6E, M::Vfmsubss, true),
    (0x6F, M::Vfmsubsd, true),
    (0x78, M::Vfnmaddps, false),
    (0x79, M::Vfnmaddpd, false),
    (0x7A, M::Vfnmaddss, true),
    (0x7B, M::Vfnmaddsd, true),
    (0x7C, M::Vfnmsubps, false),
    (0x7D, M::Vfnmsubpd, false),
    (0x7E, M::Vfnmsubss, true),
    (0x7F, M::Vfnmsubsd, true),
];

/// Places `id` under VEX.pp slot `pp`.
fn at(b: &mut TableBuilder, pp: usize, id: NodeId) -> NodeId {
    let mut t = [INV; 4];
    t[pp] = id;
    b.mp(t)
}

/// 128- and 256-bit form.
fn l01(b: &mut TableBuilder, m: M, ops: Ops, elem: El) -> NodeId {
    let leaf = b.vec(m, ops, elem);
    b.l01(leaf)
}

/// 128-bit only form.
fn l0(b: &mut TableBuilder, m: M, ops: Ops, elem: El) -> NodeId {
    let leaf = b.vec(m, ops, elem);
    b.l0(leaf)
}

/// 256-bit only form.
fn l1(b: &mut TableBuilder, m: M, ops: Ops, elem: El) -> NodeId {
    let leaf = b.vec(m, ops, elem);
    b.vl([INV, leaf, INV, INV])
}

/// Length-ignored form.
fn lig(b: &mut TableBuilder, m: M, ops: Ops, elem: El) -> NodeId {
    b.vec(m, ops, elem)
}

/// `[none, 66, F3, F2]` slots.
fn pp4(b: &mut TableBuilder, t: [NodeId; 4]) -> NodeId {
    b.mp(t)
}

pub(super) fn build_0f(b: &mut TableBuilder) -> [NodeId; 256] {
    let mut t = [INV; 256];

    // 10-17
    let slots = [
        l01(b, M::Vmovups, VW, El::Float32),
        l01(b, M::Vmovupd, VW, El::Float64),
        {
            let reg = lig(b, M::Vmovss, VHUX, El::Float32);
            let mem = lig(b, M::Vmovss, VWS, El::Float32);
            b.reg_mem(reg, mem)
        },
        {
            let reg = lig(b, M::Vmovsd, VHUX, El::Float64);
            let mem = lig(b, M::Vmovsd, VWS, El::Float64);
            b.reg_mem(reg, mem)
        },
    ];
    t[0x10] = pp4(b, slots);
    let slots = [
        l01(b, M::Vmovups, WV, El::Float32),
        l01(b, M::Vmovupd, WV, El::Float64),
        {
            let reg = lig(b, M::Vmovss, UHVX, El::Float32);
            let mem = lig(b, M::Vmovss, WSV, El::Float32);
            b.reg_mem(reg, mem)
        },
        {
            let reg = lig(b, M::Vmovsd, UHVX, El::Float64);
            let mem = lig(b, M::Vmovsd, WSV, El::Float64);
            b.reg_mem(reg, mem)
        },
    ];
    t[0x11] = pp4(b, slots);
    let slots = [
        {
            let reg = l0(b, M::Vmovhlps, VHUX, El::Float32);
            let mem = l0(b, M::Vmovlps, VHMQ, El::Float32);
            b.reg_mem(reg, mem)
        },
        {
            let mem = l0(b, M::Vmovlpd, VHMQ, El::Float64);
            b.mem(mem)
        },
        l01(b, M::Vmovsldup, VW, El::Float32),
        {
            let x = b.vec(M::Vmovddup, VLWS, El::Float64);
            let y = b.vec(M::Vmovddup, VW, El::Float64);
            b.vl([x, y, INV, INV])
        },
    ];
    t[0x12] = pp4(b, slots);
    let slots = [
        l0(b, M::Vmovlps, MQVX, El::Float32),
        l0(b, M::Vmovlpd, MQVX, El::Float64),
        INV,
        INV,
    ];
    t[0x13] = pp4(b, slots);
    let slots = [
        {
            let reg = l0(b, M::Vmovlhps, VHUX, El::Float32);
            let mem = l0(b, M::Vmovhps, VHMQ, El::Float32);
            b.reg_mem(reg, mem)
        },
        {
            let mem = l0(b, M::Vmovhpd, VHMQ, El::Float64);
            b.mem(mem)
        },
        l01(b, M::Vmovshdup, VW, El::Float32),
        INV,
    ];
    t[0x16] = pp4(b, slots);
    let slots = [
        l0(b, M::Vmovhps, MQVX, El::Float32),
        l0(b, M::Vmovhpd, MQVX, El::Float64),
        INV,
        INV,
    ];
    t[0x17] = pp4(b, slots);

    // 28-2F
    let slots = [l01(b, M::Vmovaps, VW, El::Float32), l01(b, M::Vmovapd, VW, El::Float64), INV, INV];
    t[0x28] = pp4(b, slots);
    let slots = [l01(b, M::Vmovaps, WV, El::Float32), l01(b, M::Vmovapd, WV, El::Float64), INV, INV];
    t[0x29] = pp4(b, slots);
    let slots = [INV, INV, lig(b, M::Vcvtsi2ss, VHEY, El::Float32), lig(b, M::Vcvtsi2sd, VHEY, El::Float64)];
    t[0x2A] = pp4(b, slots);
    let slots = [l01(b, M::Vmovntps, MV, El::Float32), l01(b, M::Vmovntpd, MV, El::Float64), INV, INV];
    t[0x2B] = pp4(b, slots);
    let slots = [INV, INV, lig(b, M::Vcvttss2si, GYWS, El::Float32), lig(b, M::Vcvttsd2si, GYWS, El::Float64)];
    t[0x2C] = pp4(b, slots);
    let slots = [INV, INV, lig(b, M::Vcvtss2si, GYWS, El::Float32), lig(b, M::Vcvtsd2si, GYWS, El::Float64)];
    t[0x2D] = pp4(b, slots);
    let slots = [lig(b, M::Vucomiss, VWS, El::Float32), lig(b, M::Vucomisd, VWS, El::Float64), INV, INV];
    t[0x2E] = pp4(b, slots);
    let slots = [lig(b, M::Vcomiss, VWS, El::Float32), lig(b, M::Vcomisd, VWS, El::Float64), INV, INV];
    t[0x2F] = pp4(b, slots);

    // 41-4B: opmask logic
    for (op, none, p66) in KLOGIC {
        let w = b.vec(none[0], KKHKR, El::UInt16);
        let q = b.vec(none[1], KKHKR, El::UInt64);
        let none = b.w(w, q);
        let bb = b.vec(p66[0], KKHKR, El::UInt8);
        let d = b.vec(p66[1], KKHKR, El::UInt32);
        let p66 = b.w(bb, d);
        let slots = pp4(b, [none, p66, INV, INV]);
        t[op as usize] = b.vl([INV, slots, INV, INV]);
    }
    let knotw = b.vec(M::Knotw, KKR, El::UInt16);
    let knotq = b.vec(M::Knotq, KKR, El::UInt64);
    let knotb = b.vec(M::Knotb, KKR, El::UInt8);
    let knotd = b.vec(M::Knotd, KKR, El::UInt32);
    let none = b.w(knotw, knotq);
    let p66 = b.w(knotb, knotd);
    let slots = pp4(b, [none, p66, INV, INV]);
    t[0x44] = b.l0(slots);
    let wd = b.vec(M::Kunpckwd, KKHKR, El::UInt16);
    let dq = b.vec(M::Kunpckdq, KKHKR, El::UInt32);
    let bw = b.vec(M::Kunpckbw, KKHKR, El::UInt8);
    let none = b.w(wd, dq);
    let p66 = b.w0(bw);
    let slots = pp4(b, [none, p66, INV, INV]);
    t[0x4B] = b.vl([INV, slots, INV, INV]);

    // 50-5F
    let slots = [l01(b, M::Vmovmskps, GDU, El::Float32), l01(b, M::Vmovmskpd, GDU, El::Float64), INV, INV];
    t[0x50] = pp4(b, slots);
    for (op, _, m) in map0f::FP_ARITH {
        let packed = if op == 0x51 { VW } else { VHW };
        let slots = [
            l01(b, m[0], packed, El::Float32),
            l01(b, m[1], packed, El::Float64),
            lig(b, m[2], VHWS, El::Float32),
            lig(b, m[3], VHWS, El::Float64),
        ];
        t[op as usize] = pp4(b, slots);
    }
    for (op, _, m) in map0f::FP_PACKED {
        let slots = [l01(b, m[0], VHW, El::Float32), l01(b, m[1], VHW, El::Float64), INV, INV];
        t[op as usize] = pp4(b, slots);
    }
    let slots = [l01(b, M::Vrsqrtps, VW, El::Float32), INV, lig(b, M::Vrsqrtss, VHWS, El::Float32), INV];
    t[0x52] = pp4(b, slots);
    let slots = [l01(b, M::Vrcpps, VW, El::Float32), INV, lig(b, M::Vrcpss, VHWS, El::Float32), INV];
    t[0x53] = pp4(b, slots);
    let slots = [
        l01(b, M::Vcvtps2pd, VWHALF, El::Float32),
        l01(b, M::Vcvtpd2ps, VHALFW, El::Float64),
        lig(b, M::Vcvtss2sd, VHWS, El::Float32),
        lig(b, M::Vcvtsd2ss, VHWS, El::Float64),
    ];
    t[0x5A] = pp4(b, slots);
    let slots = [
        l01(b, M::Vcvtdq2ps, VW, El::Int32),
        l01(b, M::Vcvtps2dq, VW, El::Float32),
        l01(b, M::Vcvttps2dq, VW, El::Float32),
        INV,
    ];
    t[0x5B] = pp4(b, slots);

    // 60-7F and D0-FF integer forms
    for (op, _, m, elem, shift) in INT_OPS {
        let ops = if shift { VHWX } else { VHW };
        let node = l01(b, m, ops, elem);
        t[op as usize] = at(b, P66, node);
    }
    let vmovd = b.vec(M::Vmovd, VEY, El::Int32);
    let vmovq = b.vec(M::Vmovq, VEY, El::Int64);
    let node = b.w(vmovd, vmovq);
    let node = b.l0(node);
    t[0x6E] = at(b, P66, node);
    let slots = [INV, l01(b, M::Vmovdqa, VW, El::Int32), l01(b, M::Vmovdqu, VW, El::Int32), INV];
    t[0x6F] = pp4(b, slots);
    let slots = [
        INV,
        l01(b, M::Vpshufd, VWIB, El::Int32),
        l01(b, M::Vpshufhw, VWIB, El::Int16),
        l01(b, M::Vpshuflw, VWIB, El::Int16),
    ];
    t[0x70] = pp4(b, slots);
    let shift_imm = |b: &mut TableBuilder, entries: &[(usize, M, El)]| {
        let mut g = Vec::new();
        for &(reg, m, elem) in entries {
            let node = l01(b, m, HUIB, elem);
            g.push((reg, node));
        }
        let g = group(b, &g);
        let g = b.reg(g);
        at(b, P66, g)
    };
    t[0x71] = shift_imm(b, &[(2, M::Vpsrlw, El::Int16), (4, M::Vpsraw, El::Int16), (6, M::Vpsllw, El::Int16)]);
    t[0x72] = shift_imm(b, &[(2, M::Vpsrld, El::Int32), (4, M::Vpsrad, El::Int32), (6, M::Vpslld, El::Int32)]);
    t[0x73] = shift_imm(
        b,
        &[
            (2, M::Vpsrlq, El::Int64),
            (3, M::Vpsrldq, El::UInt128),
            (6, M::Vpsllq, El::Int64),
            (7, M::Vpslldq, El::UInt128),
        ],
    );
    let zeroupper = b.vec(M::Vzeroupper, NONE, El::UInt128);
    let zeroall = b.vec(M::Vzeroall, NONE, El::UInt128);
    let node = b.vl([zeroupper, zeroall, INV, INV]);
    t[0x77] = at(b, NP, node);
    let slots = [INV, l01(b, M::Vhaddpd, VHW, El::Float64), INV, l01(b, M::Vhaddps, VHW, El::Float32)];
    t[0x7C] = pp4(b, slots);
    let slots = [INV, l01(b, M::Vhsubpd, VHW, El::Float64), INV, l01(b, M::Vhsubps, VHW, El::Float32)];
    t[0x7D] = pp4(b, slots);
    let vmovd = b.vec(M::Vmovd, EYV, El::Int32);
    let vmovq = b.vec(M::Vmovq, EYV, El::Int64);
    let to_gpr = b.w(vmovd, vmovq);
    let to_gpr = b.l0(to_gpr);
    let slots = [INV, to_gpr, l0(b, M::Vmovq, VWS, El::UInt64), INV];
    t[0x7E] = pp4(b, slots);
    let slots = [INV, l01(b, M::Vmovdqa, WV, El::Int32), l01(b, M::Vmovdqu, WV, El::Int32), INV];
    t[0x7F] = pp4(b, slots);

    // 90-99: opmask moves and tests
    let kmov = |b: &mut TableBuilder, ops: [[(M, Ops); 2]; 4]| {
        let mut slots = [INV; 4];
        for (slot, [(m0, ops0), (m1, ops1)]) in slots.iter_mut().zip(ops) {
            let w0 = if m0 == M::Invalid { INV } else { b.vec(m0, ops0, El::UInt8) };
            let w1 = if m1 == M::Invalid { INV } else { b.vec(m1, ops1, El::UInt8) };
            *slot = b.w(w0, w1);
        }
        let node = b.mp(slots);
        b.l0(node)
    };
    const NIL: (M, Ops) = (M::Invalid, NONE);
    t[0x90] = kmov(
        b,
        [
            [(M::Kmovw, KKEW), (M::Kmovq, KKEQ)],
            [(M::Kmovb, KKEB), (M::Kmovd, KKED)],
            [NIL, NIL],
            [NIL, NIL],
        ],
    );
    t[0x91] = kmov(
        b,
        [[(M::Kmovw, MWK), (M::Kmovq, MQK)], [(M::Kmovb, MBK), (M::Kmovd, MDK)], [NIL, NIL], [NIL, NIL]],
    );
    t[0x92] = kmov(
        b,
        [[(M::Kmovw, KRD), NIL], [(M::Kmovb, KRD), NIL], [NIL, NIL], [(M::Kmovd, KRD), (M::Kmovq, KRQ)]],
    );
    t[0x93] = kmov(
        b,
        [[(M::Kmovw, GDKR), NIL], [(M::Kmovb, GDKR), NIL], [NIL, NIL], [(M::Kmovd, GDKR), (M::Kmovq, GQKR)]],
    );
    t[0x98] = kmov(
        b,
        [
            [(M::Kortestw, KKR), (M::Kortestq, KKR)],
            [(M::Kortestb, KKR), (M::Kortestd, KKR)],
            [NIL, NIL],
            [NIL, NIL],
        ],
    );
    t[0x99] = kmov(
        b,
        [[(M::Ktestw, KKR), (M::Ktestq, KKR)], [(M::Ktestb, KKR), (M::Ktestd, KKR)], [NIL, NIL], [NIL, NIL]],
    );

    // AE, C2-C6
    let ldmxcsr = l0(b, M::Vldmxcsr, MD, El::UInt32);
    let stmxcsr = l0(b, M::Vstmxcsr, MD, El::UInt32);
    let g = group(b, &[(2, ldmxcsr), (3, stmxcsr)]);
    let g = b.mem(g);
    t[0xAE] = at(b, NP, g);
    let slots = [
        l01(b, M::Vcmpps, VHWIB, El::Float32),
        l01(b, M::Vcmppd, VHWIB, El::Float64),
        lig(b, M::Vcmpss, VHWSIB, El::Float32),
        lig(b, M::Vcmpsd, VHWSIB, El::Float64),
    ];
    t[0xC2] = pp4(b, slots);
    let node = l0(b, M::Vpinsrw, VHEDWIB, El::Int16);
    t[0xC4] = at(b, P66, node);
    let node = l0(b, M::Vpextrw, GDUIB, El::Int16);
    t[0xC5] = at(b, P66, node);
    let slots = [l01(b, M::Vshufps, VHWIB, El::Float32), l01(b, M::Vshufpd, VHWIB, El::Float64), INV, INV];
    t[0xC6] = pp4(b, slots);

    // D0-FF leftovers
    let slots = [INV, l01(b, M::Vaddsubpd, VHW, El::Float64), INV, l01(b, M::Vaddsubps, VHW, El::Float32)];
    t[0xD0] = pp4(b, slots);
    let node = l0(b, M::Vmovq, WSV, El::UInt64);
    t[0xD6] = at(b, P66, node);
    let node = l01(b, M::Vpmovmskb, GDU, El::Int8);
    t[0xD7] = at(b, P66, node);
    let slots = [
        INV,
        l01(b, M::Vcvttpd2dq, VHALFW, El::Float64),
        l01(b, M::Vcvtdq2pd, VWHALF, El::Int32),
        l01(b, M::Vcvtpd2dq, VHALFW, El::Float64),
    ];
    t[0xE6] = pp4(b, slots);
    let node = l01(b, M::Vmovntdq, MV, El::Int64);
    t[0xE7] = at(b, P66, node);
    let node = l01(b, M::Vlddqu, VM, El::UInt8);
    t[0xF0] = at(b, PF2, node);
    let node = l0(b, M::Vmaskmovdqu, VUX, El::Int8);
    t[0xF7] = at(b, P66, node);

    t
}

pub(super) fn build_0f38(b: &mut TableBuilder) -> [NodeId; 256] {
    let mut t = [INV; 256];

    for (op, _, m, elem) in SSSE3 {
        let ops = if op >= 0x1C { VW } else { VHW };
        let node = l01(b, m, ops, elem);
        t[op as usize] = at(b, P66, node);
    }
    for (op, _, m, elem) in SSE41 {
        let node = l01(b, m, VHW, elem);
        let node = if op == 0xCF { b.w0(node) } else { node };
        t[op as usize] = at(b, P66, node);
    }
    for (op, _, m, elem, ops) in PMOVX {
        let node = l01(b, m, ops, elem);
        t[op as usize] = at(b, P66, node);
    }
    let w0_66 = |b: &mut TableBuilder, node: NodeId| {
        let node = b.w0(node);
        at(b, P66, node)
    };
    let node = l01(b, M::Vpermilps, VHW, El::Float32);
    t[0x0C] = w0_66(b, node);
    let node = l01(b, M::Vpermilpd, VHW, El::Float64);
    t[0x0D] = w0_66(b, node);
    let node = l01(b, M::Vtestps, VW, El::Float32);
    t[0x0E] = w0_66(b, node);
    let node = l01(b, M::Vtestpd, VW, El::Float64);
    t[0x0F] = w0_66(b, node);
    let node = l01(b, M::Vcvtph2ps, VWHALF, El::Float16);
    t[0x13] = w0_66(b, node);
    let node = l1(b, M::Vpermps, VHW, El::Float32);
    t[0x16] = w0_66(b, node);
    let node = l01(b, M::Vptest, VW, El::Int32);
    t[0x17] = at(b, P66, node);
    let node = l01(b, M::Vbroadcastss, VLWS, El::Float32);
    t[0x18] = w0_66(b, node);
    let node = l1(b, M::Vbroadcastsd, VLWS, El::Float64);
    t[0x19] = w0_66(b, node);
    let node = l1(b, M::Vbroadcastf128, VMX, El::Float32);
    t[0x1A] = w0_66(b, node);
    let node = l01(b, M::Vmovntdqa, VM, El::Int32);
    t[0x2A] = at(b, P66, node);
    for (op, m, ops, elem) in [
        (0x2C, M::Vmaskmovps, VHM, El::Float32),
        (0x2D, M::Vmaskmovpd, VHM, El::Float64),
        (0x2E, M::Vmaskmovps, MHV, El::Float32),
        (0x2F, M::Vmaskmovpd, MHV, El::Float64),
    ] {
        let node = l01(b, m, ops, elem);
        t[op] = w0_66(b, node);
    }
    let node = l1(b, M::Vpermd, VHW, El::Int32);
    t[0x36] = w0_66(b, node);
    let node = l0(b, M::Vphminposuw, VW, El::UInt16);
    t[0x41] = at(b, P66, node);
    for (op, d, q) in [
        (0x45, M::Vpsrlvd, Some(M::Vpsrlvq)),
        (0x46, M::Vpsravd, None),
        (0x47, M::Vpsllvd, Some(M::Vpsllvq)),
        (0x8C, M::Vpmaskmovd, Some(M::Vpmaskmovq)),
        (0x8E, M::Vpmaskmovd, Some(M::Vpmaskmovq)),
    ] {
        let ops = match op {
            0x8C => VHM,
            0x8E => MHV,
            _ => VHW,
        };
        let w0 = b.vec(d, ops, El::Int32);
        let w1 = match q {
            Some(q) => b.vec(q, ops, El::Int64),
            None => INV,
        };
        let node = b.w(w0, w1);
        let node = b.l01(node);
        t[op] = at(b, P66, node);
    }
    for (op, m, elem) in [
        (0x58, M::Vpbroadcastd, El::Int32),
        (0x59, M::Vpbroadcastq, El::Int64),
        (0x78, M::Vpbroadcastb, El::Int8),
        (0x79, M::Vpbroadcastw, El::Int16),
    ] {
        let node = l01(b, m, VLWS, elem);
        t[op] = w0_66(b, node);
    }
    let node = l1(b, M::Vbroadcasti128, VMX_INT, El::Int32);
    t[0x5A] = w0_66(b, node);

    // Gathers
    for (op, d, q) in [
        (0x90, (M::Vpgatherdd, GATHER_D, El::Int32), (M::Vpgatherdq, GATHER_DQ, El::Int64)),
        (0x91, (M::Vpgatherqd, GATHER_QD, El::Int32), (M::Vpgatherqq, GATHER_D, El::Int64)),
        (0x92, (M::Vgatherdps, GATHER_D, El::Float32), (M::Vgatherdpd, GATHER_DQ, El::Float64)),
        (0x93, (M::Vgatherqps, GATHER_QD, El::Float32), (M::Vgatherqpd, GATHER_D, El::Float64)),
    ] {
        let w0 = b.vec(d.0, d.1, d.2);
        let w1 = b.vec(q.0, q.1, q.2);
        let node = b.w(w0, w1);
        let node = b.l01(node);
        let node = b.mem(node);
        t[op] = at(b, P66, node);
    }

    // FMA
    for (op, ps, pd, scalar) in FMA {
        let node = if scalar {
            let w0 = lig(b, ps, VHWS, El::Float32);
            let w1 = lig(b, pd, VHWS, El::Float64);
            b.w(w0, w1)
        } else {
            let w0 = b.vec(ps, VHW, El::Float32);
            let w1 = b.vec(pd, VHW, El::Float64);
            let node = b.w(w0, w1);
            b.l01(node)
        };
        t[op as usize] = at(b, P66, node);
    }

    let node = l0(b, M::Vaesimc, VW, El::UInt128);
    t[0xDB] = at(b, P66, node);

    // VNNI
    for (op, forms) in DOT {
        let elem = if matches!(op, 0x50 | 0x51) { El::Int8 } else { El::Int16 };
        let slots = forms.map(|m| match m {
            Some(m) => {
                let node = l01(b, m, VHW, elem);
                b.w0(node)
            }
            None => INV,
        });
        t[op as usize] = pp4(b, slots);
    }
    for (op, m) in [(0xB4, M::Vpmadd52luq), (0xB5, M::Vpmadd52huq)] {
        let node = l01(b, m, VHW, El::UInt64);
        let node = b.w1(node);
        t[op] = at(b, P66, node);
    }

    // SM3/SM4
    let slots = [
        l0(b, M::Vsm3msg1, VHWX_X, El::UInt32),
        l0(b, M::Vsm3msg2, VHWX_X, El::UInt32),
        l01(b, M::Vsm4key4, VHW, El::UInt32),
        l01(b, M::Vsm4rnds4, VHW, El::UInt32),
    ];
    let node = pp4(b, slots);
    t[0xDA] = b.w0(node);

    // CMPccXADD: memory destination, 64-bit only
    for (cc, m) in CMPXADD.into_iter().enumerate() {
        let node = l0(b, m, MEYGYBY, El::UInt32);
        let node = b.mem(node);
        let node = b.only64(node);
        t[0xE0 + cc] = at(b, P66, node);
    }

    // BMI1/BMI2
    let node = l0(b, M::Andn, GYBYEY, El::UInt32);
    t[0xF2] = at(b, NP, node);
    let blsr = l0(b, M::Blsr, BYEY, El::UInt32);
    let blsmsk = l0(b, M::Blsmsk, BYEY, El::UInt32);
    let blsi = l0(b, M::Blsi, BYEY, El::UInt32);
    let g = group(b, &[(1, blsr), (2, blsmsk), (3, blsi)]);
    t[0xF3] = at(b, NP, g);
    let slots = [
        l0(b, M::Bzhi, GYEYBY, El::UInt32),
        INV,
        l0(b, M::Pext, GYBYEY, El::UInt32),
        l0(b, M::Pdep, GYBYEY, El::UInt32),
    ];
    t[0xF5] = pp4(b, slots);
    let node = l0(b, M::Mulx, GYBYEY, El::UInt32);
    t[0xF6] = at(b, PF2, node);
    let slots = [
        l0(b, M::Bextr, GYEYBY, El::UInt32),
        l0(b, M::Shlx, GYEYBY, El::UInt32),
        l0(b, M::Sarx, GYEYBY, El::UInt32),
        l0(b, M::Shrx, GYEYBY, El::UInt32),
    ];
    t[0xF7] = pp4(b, slots);

    // AMX (64-bit only)
    let amx = |b: &mut TableBuilder, slots: [NodeId; 4]| {
        let node = b.mp(slots);
        let node = b.w0(node);
        let node = b.l0(node);
        b.only64(node)
    };
    let ldtilecfg = b.vec(M::Ldtilecfg, M64B, El::UInt8);
    let tilerelease = b.vec(M::Tilerelease, NONE, El::UInt8);
    let release = b.group8x64([INV; 8], &[(0xC0, tilerelease)]);
    let load = group(b, &[(0, ldtilecfg)]);
    let none = b.reg_mem(release, load);
    let sttilecfg = b.vec(M::Sttilecfg, M64B, El::UInt8);
    let p66 = group(b, &[(0, sttilecfg)]);
    let p66 = b.mem(p66);
    let tilezero = b.vec(M::Tilezero, T_ONLY, El::UInt8);
    let rows: Vec<(u8, NodeId)> = (0..8u8).map(|reg| (0xC0 | (reg << 3), tilezero)).collect();
    let pf2 = b.group8x64([INV; 8], &rows);
    t[0x49] = amx(b, [none, p66, INV, pf2]);
    let slots = [
        INV,
        b.vec(M::Tileloaddt1, TM, El::UInt8),
        b.vec(M::Tilestored, MT, El::UInt8),
        b.vec(M::Tileloadd, TM, El::UInt8),
    ];
    let slots = slots.map(|id| if id == INV { INV } else { b.mem(id) });
    t[0x4B] = amx(b, slots);
    let slots = [INV, INV, b.vec(M::Tdpbf16ps, TTRTH, El::BFloat16), INV];
    t[0x5C] = amx(b, slots);
    let slots = [
        b.vec(M::Tdpbuud, TTRTH, El::UInt8),
        b.vec(M::Tdpbusd, TTRTH, El::UInt8),
        b.vec(M::Tdpbsud, TTRTH, El::Int8),
        b.vec(M::Tdpbssd, TTRTH, El::Int8),
    ];
    let slots = slots.map(|id| b.reg(id));
    t[0x5E] = amx(b, slots);

    t
}

pub(super) fn build_0f3a(b: &mut TableBuilder) -> [NodeId; 256] {
    let mut t = [INV; 256];

    for (op, _, _, ops, m, elem) in IMM_FORMS {
        let node = match op {
            0x0A | 0x0B => lig(b, m, ops, elem),
            0x14 | 0x15 | 0x17 | 0x20 | 0x21 | 0x41 => l0(b, m, ops, elem),
            _ => l01(b, m, ops, elem),
        };
        let node = if matches!(op, 0xCE | 0xCF) { b.w1(node) } else { node };
        t[op as usize] = at(b, P66, node);
    }
    let w0_66 = |b: &mut TableBuilder, node: NodeId| {
        let node = b.w0(node);
        at(b, P66, node)
    };
    let w1_66 = |b: &mut TableBuilder, node: NodeId| {
        let node = b.w1(node);
        at(b, P66, node)
    };
    let node = l1(b, M::Vpermq, VWIB, El::Int64);
    t[0x00] = w1_66(b, node);
    let node = l1(b, M::Vpermpd, VWIB, El::Float64);
    t[0x01] = w1_66(b, node);
    let node = l01(b, M::Vpblendd, VHWIB, El::Int32);
    t[0x02] = w0_66(b, node);
    let node = l01(b, M::Vpermilps, VWIB, El::Float32);
    t[0x04] = w0_66(b, node);
    let node = l01(b, M::Vpermilpd, VWIB, El::Float64);
    t[0x05] = w0_66(b, node);
    let node = l1(b, M::Vperm2f128, VHWIB, El::Float32);
    t[0x06] = w0_66(b, node);
    let d = b.vec(M::Vpextrd, EYVIB, El::Int32);
    let q = b.vec(M::Vpextrq, EYVIB, El::Int64);
    let node = b.w(d, q);
    let node = b.l0(node);
    t[0x16] = at(b, P66, node);
    let node = l1(b, M::Vinsertf128, VHWXIB, El::Float32);
    t[0x18] = w0_66(b, node);
    let node = l1(b, M::Vextractf128, WXVIB, El::Float32);
    t[0x19] = w0_66(b, node);
    let node = l01(b, M::Vcvtps2ph, WHALFVIB, El::Float16);
    t[0x1D] = w0_66(b, node);
    let d = b.vec(M::Vpinsrd, VHEYIB, El::Int32);
    let q = b.vec(M::Vpinsrq, VHEYIB, El::Int64);
    let node = b.w(d, q);
    let node = b.l0(node);
    t[0x22] = at(b, P66, node);
    for (op, w0, w1) in [
        (0x30, M::Kshiftrb, M::Kshiftrw),
        (0x31, M::Kshiftrd, M::Kshiftrq),
        (0x32, M::Kshiftlb, M::Kshiftlw),
        (0x33, M::Kshiftld, M::Kshiftlq),
    ] {
        let w0 = b.vec(w0, KKRIB, El::UInt8);
        let w1 = b.vec(w1, KKRIB, El::UInt8);
        let node = b.w(w0, w1);
        let node = b.l0(node);
        t[op] = at(b, P66, node);
    }
    let node = l1(b, M::Vinserti128, VHWXIB, El::Int32);
    t[0x38] = w0_66(b, node);
    let node = l1(b, M::Vextracti128, WXVIB, El::Int32);
    t[0x39] = w0_66(b, node);
    let node = l1(b, M::Vperm2i128, VHWIB, El::Int32);
    t[0x46] = w0_66(b, node);
    for (op, m, elem) in [(0x48, M::Vpermil2ps, El::Float32), (0x49, M::Vpermil2pd, El::Float64)] {
        let w0 = b.vec(m, VHWIS4IB, elem);
        let w1 = b.vec(m, VHIS4WIB, elem);
        let node = b.w(w0, w1);
        let node = b.l01(node);
        t[op] = at(b, P66, node);
    }
    for (op, m, elem) in [
        (0x4A, M::Vblendvps, El::Float32),
        (0x4B, M::Vblendvpd, El::Float64),
        (0x4C, M::Vpblendvb, El::Int8),
    ] {
        let node = l01(b, m, VHWIS4, elem);
        t[op] = w0_66(b, node);
    }
    for (op, m, scalar) in FMA4 {
        let elem = if op & 1 == 0 { El::Float32 } else { El::Float64 };
        let node = if scalar {
            let w0 = b.vec(m, VHWSIS4, elem);
            let w1 = b.vec(m, VHIS4WS, elem);
            b.w(w0, w1)
        } else {
            let w0 = b.vec(m, VHWIS4, elem);
            let w1 = b.vec(m, VHIS4W, elem);
            let node = b.w(w0, w1);
            b.l01(node)
        };
        t[op as usize] = at(b, P66, node);
    }
    for (op, _, m) in PCMPSTR {
        let node = l0(b, m, VWIB, El::Int8);
        t[op as usize] = at(b, P66, node);
    }
    let node = l0(b, M::Vsm3rnds2, VHWXIB_X, El::UInt32);
    let node = b.w0(node);
    t[0xDE] = at(b, P66, node);
    let node = l0(b, M::Vaeskeygenassist, VWIB, El::UInt128);
    t[0xDF] = at(b, P66, node);
    let node = l0(b, M::Rorx, GYEYIB, El::UInt32);
    t[0xF0] = at(b, PF2, node);

    t
}

#[cfg(test)]
mod tests {
    use super::super::resolve;
    use super::*;
    use crate::options::DecoderOptions;
    use crate::x86::context::DecodeContext;
    use crate::x86::handlers::Handler;
    use xdis_core::Bitness;

    fn mnemonic(bitness: Bitness, bytes: &[u8]) -> Option<M> {
        let mut cx = DecodeContext::new(bytes, 0, 0, bitness, DecoderOptions::new());
        let (map, opcode) = crate::x86::prefix::scan(&mut cx.cursor, &mut cx.state).ok()?;
        match resolve(&mut cx, map, opcode).ok()?.0 {
            Handler::Vector { m, .. } => Some(m),
            _ => None,
        }
    }

    #[test]
    fn test_vzero_split_on_length() {
        assert_eq!(mnemonic(Bitness::Bits64, &[0xC5, 0xF8, 0x77]), Some(M::Vzeroupper));
        assert_eq!(mnemonic(Bitness::Bits64, &[0xC5, 0xFC, 0x77]), Some(M::Vzeroall));
    }

    #[test]
    fn test_pp_selects_form() {
        assert_eq!(mnemonic(Bitness::Bits64, &[0xC5, 0xFC, 0x58, 0xC1]), Some(M::Vaddps));
        assert_eq!(mnemonic(Bitness::Bits64, &[0xC5, 0xFA, 0x58, 0xC1]), Some(M::Vaddss));
        assert_eq!(mnemonic(Bitness::Bits64, &[0xC5, 0xF9, 0xFE, 0xC1]), Some(M::Vpaddd));
        assert_eq!(mnemonic(Bitness::Bits64, &[0xC5, 0xF8, 0xFE, 0xC1]), None);
    }

    #[test]
    fn test_fma_w_split() {
        // VEX.66.0F38.W0 98 and W1 98
        assert_eq!(mnemonic(Bitness::Bits64, &[0xC4, 0xE2, 0x71, 0x98, 0xC2]), Some(M::Vfmadd132ps));
        assert_eq!(mnemonic(Bitness::Bits64, &[0xC4, 0xE2, 0xF1, 0x98, 0xC2]), Some(M::Vfmadd132pd));
    }

    #[test]
    fn test_bmi_requires_l0() {
        // ANDN eax, ecx, edx: C4 E2 70 F2 C2
        assert_eq!(mnemonic(Bitness::Bits64, &[0xC4, 0xE2, 0x70, 0xF2, 0xC2]), Some(M::Andn));
        assert_eq!(mnemonic(Bitness::Bits64, &[0xC4, 0xE2, 0x74, 0xF2, 0xC2]), None);
    }

    #[test]
    fn test_dot_product_families() {
        assert_eq!(mnemonic(Bitness::Bits64, &[0xC4, 0xE2, 0x79, 0x50, 0xC1]), Some(M::Vpdpbusd));
        assert_eq!(mnemonic(Bitness::Bits64, &[0xC4, 0xE2, 0x7D, 0x52, 0xC1]), Some(M::Vpdpwssd));
        assert_eq!(mnemonic(Bitness::Bits64, &[0xC4, 0xE2, 0x7B, 0x50, 0xC1]), Some(M::Vpdpbssd));
        assert_eq!(mnemonic(Bitness::Bits64, &[0xC4, 0xE2, 0x7A, 0xD3, 0xC1]), Some(M::Vpdpwsuds));
        assert_eq!(mnemonic(Bitness::Bits64, &[0xC4, 0xE2, 0x7B, 0xD2, 0xC1]), None);
        // W1 is undefined for all of them.
        assert_eq!(mnemonic(Bitness::Bits64, &[0xC4, 0xE2, 0xF9, 0x50, 0xC1]), None);
        assert_eq!(mnemonic(Bitness::Bits64, &[0xC4, 0xE2, 0xF9, 0xB4, 0xC1]), Some(M::Vpmadd52luq));
        assert_eq!(mnemonic(Bitness::Bits64, &[0xC4, 0xE2, 0x79, 0xB4, 0xC1]), None);
    }

    #[test]
    fn test_cmpccxadd_is_memory_and_64bit_only() {
        // CMPBEXADD [rax], ecx, edx
        assert_eq!(mnemonic(Bitness::Bits64, &[0xC4, 0xE2, 0x69, 0xE6, 0x08]), Some(M::Cmpbexadd));
        assert_eq!(mnemonic(Bitness::Bits64, &[0xC4, 0xE2, 0x69, 0xE6, 0xC8]), None);
        assert_eq!(mnemonic(Bitness::Bits32, &[0xC4, 0xE2, 0x69, 0xE6, 0x08]), None);
    }

    #[test]
    fn test_sm3_sm4() {
        assert_eq!(mnemonic(Bitness::Bits64, &[0xC4, 0xE2, 0x70, 0xDA, 0xC2]), Some(M::Vsm3msg1));
        assert_eq!(mnemonic(Bitness::Bits64, &[0xC4, 0xE2, 0x76, 0xDA, 0xC2]), Some(M::Vsm4key4));
        assert_eq!(mnemonic(Bitness::Bits64, &[0xC4, 0xE3, 0x71, 0xDE, 0xC2, 0x01]), Some(M::Vsm3rnds2));
    }

    #[test]
    fn test_opmask_logic() {
        // KANDW k1, k2, k3: C5 EC 41 CB
        assert_eq!(mnemonic(Bitness::Bits64, &[0xC5, 0xEC, 0x41, 0xCB]), Some(M::Kandw));
    }
}
