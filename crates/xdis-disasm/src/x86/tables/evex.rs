//! EVEX maps 0F, 0F38 and 0F3A (AVX-512 F, BW, DQ, CD, VL and the later
//! integer extensions).
//!
//! Unlike VEX, W is part of almost every opcode here: dword and single
//! precision forms are W0, qword and double precision forms W1, and byte
//! and word forms ignore it.

use xdis_core::{Element as El, Mnemonic as M};

use super::map0f::{self, group};
use super::map0f38::PMOVX;
use super::ops::*;
use super::vex::FMA;
use super::{NodeId, TableBuilder};
use crate::x86::handlers::VAttr;

const INV: NodeId = NodeId::INVALID;

const NOATTR: VAttr = VAttr::empty();
const KZB: VAttr = VAttr::KZB;
const KZB_ER: VAttr = VAttr::KZB_ER;
const KZB_SAE: VAttr = VAttr::KZB_SAE;
const KZ: VAttr = VAttr::KZ;
const KZ_ER: VAttr = VAttr::KZ.union(VAttr::ER);
const KZ_SAE: VAttr = VAttr::KZ.union(VAttr::SAE);
const K: VAttr = VAttr::K;
const K_BCST: VAttr = VAttr::K.union(VAttr::BCST);
const K_SAE: VAttr = VAttr::K.union(VAttr::SAE);
const K_BCST_SAE: VAttr = K_BCST.union(VAttr::SAE);
const GATHER: VAttr = VAttr::K.union(VAttr::KREQ);

/// Vector lengths a form accepts.
#[derive(Debug, Clone, Copy)]
enum Len {
    /// 128, 256 and 512 bits.
    All,
    /// 256 and 512 bits.
    L12,
    /// 512 bits only.
    L2,
    /// 128 bits only.
    L0,
    /// Scalar; L'L ignored.
    Lig,
}

/// W treatment of an integer form.
#[derive(Debug, Clone, Copy)]
enum Wc {
    /// Byte and word forms.
    Ig,
    W0,
    W1,
    /// Dword form at W0, qword form at W1.
    Dq(M),
}

fn form(b: &mut TableBuilder, len: Len, m: M, ops: Ops, elem: El, attr: VAttr) -> NodeId {
    let leaf = b.evec(m, ops, elem, attr);
    match len {
        Len::All => b.vl([leaf, leaf, leaf, INV]),
        Len::L12 => b.vl([INV, leaf, leaf, INV]),
        Len::L2 => b.vl([INV, INV, leaf, INV]),
        Len::L0 => b.l0(leaf),
        Len::Lig => leaf,
    }
}

fn w0(b: &mut TableBuilder, len: Len, m: M, ops: Ops, elem: El, attr: VAttr) -> NodeId {
    let node = form(b, len, m, ops, elem, attr);
    b.w0(node)
}

fn w1(b: &mut TableBuilder, len: Len, m: M, ops: Ops, elem: El, attr: VAttr) -> NodeId {
    let node = form(b, len, m, ops, elem, attr);
    b.w1(node)
}

/// `d` at W0 and `q` at W1.
fn dq(b: &mut TableBuilder, len: Len, d: (M, El), q: (M, El), ops: Ops, attr: VAttr) -> NodeId {
    let w0 = form(b, len, d.0, ops, d.1, attr);
    let w1 = form(b, len, q.0, ops, q.1, attr);
    b.w(w0, w1)
}

fn ps_pd(b: &mut TableBuilder, len: Len, ps: M, pd: M, ops: Ops, attr: VAttr) -> NodeId {
    dq(b, len, (ps, El::Float32), (pd, El::Float64), ops, attr)
}

fn d_q(b: &mut TableBuilder, len: Len, d: M, q: M, ops: Ops, attr: VAttr) -> NodeId {
    dq(b, len, (d, El::Int32), (q, El::Int64), ops, attr)
}

/// 66-prefixed integer forms shared with the VEX 0F map: opcode, mnemonic,
/// element, W class and whether the second source is a 128-bit shift count.
const INT: [(u8, M, El, Wc, bool); 50] = [
    (0x60, M::Vpunpcklbw, El::Int8, Wc::Ig, false),
    (0x61, M::Vpunpcklwd, El::Int16, Wc::Ig, false),
    (0x62, M::Vpunpckldq, El::Int32, Wc::W0, false),
    (0x63, M::Vpacksswb, El::Int16, Wc::Ig, false),
    (0x67, M::Vpackuswb, El::Int16, Wc::Ig, false),
    (0x68, M::Vpunpckhbw, El::Int8, Wc::Ig, false),
    (0x69, M::Vpunpckhwd, El::Int16, Wc::Ig, false),
    (0x6A, M::Vpunpckhdq, El::Int32, Wc::W0, false),
    (0x6B, M::Vpackssdw, El::Int32, Wc::W0, false),
    (0x6C, M::Vpunpcklqdq, El::Int64, Wc::W1, false),
    (0x6D, M::Vpunpckhqdq, El::Int64, Wc::W1, false),
    (0xD1, M::Vpsrlw, El::Int16, Wc::Ig, true),
    (0xD2, M::Vpsrld, El::Int32, Wc::W0, true),
    (0xD3, M::Vpsrlq, El::Int64, Wc::W1, true),
    (0xD4, M::Vpaddq, El::Int64, Wc::W1, false),
    (0xD5, M::Vpmullw, El::Int16, Wc::Ig, false),
    (0xD8, M::Vpsubusb, El::UInt8, Wc::Ig, false),
    (0xD9, M::Vpsubusw, El::UInt16, Wc::Ig, false),
    (0xDA, M::Vpminub, El::UInt8, Wc::Ig, false),
    (0xDB, M::Vpandd, El::Int32, Wc::Dq(M::Vpandq), false),
    (0xDC, M::Vpaddusb, El::UInt8, Wc::Ig, false),
    (0xDD, M::Vpaddusw, El::UInt16, Wc::Ig, false),
    (0xDE, M::Vpmaxub, El::UInt8, Wc::Ig, false),
    (0xDF, M::Vpandnd, El::Int32, Wc::Dq(M::Vpandnq), false),
    (0xE0, M::Vpavgb, El::UInt8, Wc::Ig, false),
    (0xE1, M::Vpsraw, El::Int16, Wc::Ig, true),
    (0xE2, M::Vpsrad, El::Int32, Wc::Dq(M::Vpsraq), true),
    (0xE3, M::Vpavgw, El::UInt16, Wc::Ig, false),
    (0xE4, M::Vpmulhuw, El::UInt16, Wc::Ig, false),
    (0xE5, M::Vpmulhw, El::Int16, Wc::Ig, false),
    (0xE8, M::Vpsubsb, El::Int8, Wc::Ig, false),
    (0xE9, M::Vpsubsw, El::Int16, Wc::Ig, false),
    (0xEA, M::Vpminsw, El::Int16, Wc::Ig, false),
    (0xEB, M::Vpord, El::Int32, Wc::Dq(M::Vporq), false),
    (0xEC, M::Vpaddsb, El::Int8, Wc::Ig, false),
    (0xED, M::Vpaddsw, El::Int16, Wc::Ig, false),
    (0xEE, M::Vpmaxsw, El::Int16, Wc::Ig, false),
    (0xEF, M::Vpxord, El::Int32, Wc::Dq(M::Vpxorq), false),
    (0xF1, M::Vpsllw, El::Int16, Wc::Ig, true),
    (0xF2, M::Vpslld, El::Int32, Wc::W0, true),
    (0xF3, M::Vpsllq, El::Int64, Wc::W1, true),
    (0xF4, M::Vpmuludq, El::UInt32, Wc::W1, false),
    (0xF5, M::Vpmaddwd, El::Int16, Wc::Ig, false),
    (0xF8, M::Vpsubb, El::Int8, Wc::Ig, false),
    (0xF9, M::Vpsubw, El::Int16, Wc::Ig, false),
    (0xFA, M::Vpsubd, El::Int32, Wc::W0, false),
    (0xFB, M::Vpsubq, El::Int64, Wc::W1, false),
    (0xFC, M::Vpaddb, El::Int8, Wc::Ig, false),
    (0xFD, M::Vpaddw, El::Int16, Wc::Ig, false),
    (0xFE, M::Vpaddd, El::Int32, Wc::W0, false),
];

fn int_form(b: &mut TableBuilder, m: M, elem: El, wc: Wc, shift: bool) -> NodeId {
    let ops = if shift { VHWX } else { VHW };
    // Byte/word forms and the xmm-count shifts have no embedded broadcast.
    let attr = if shift || matches!(wc, Wc::Ig) { KZ } else { KZB };
    match wc {
        Wc::Ig => form(b, Len::All, m, ops, elem, attr),
        Wc::W0 => w0(b, Len::All, m, ops, elem, attr),
        Wc::W1 => w1(b, Len::All, m, ops, elem, attr),
        Wc::Dq(q) => dq(b, Len::All, (m, elem), (q, El::Int64), ops, attr),
    }
}

pub(super) fn build_0f(b: &mut TableBuilder) -> [NodeId; 256] {
    let mut t = [INV; 256];

    // 10-17: moves
    let load_ss = {
        let reg = b.evec(M::Vmovss, VHUX, El::Float32, KZ);
        let mem = b.evec(M::Vmovss, VWS, El::Float32, KZ);
        let node = b.reg_mem(reg, mem);
        b.w0(node)
    };
    let load_sd = {
        let reg = b.evec(M::Vmovsd, VHUX, El::Float64, KZ);
        let mem = b.evec(M::Vmovsd, VWS, El::Float64, KZ);
        let node = b.reg_mem(reg, mem);
        b.w1(node)
    };
    let ups = w0(b, Len::All, M::Vmovups, VW, El::Float32, KZ);
    let upd = w1(b, Len::All, M::Vmovupd, VW, El::Float64, KZ);
    t[0x10] = b.mp([ups, upd, load_ss, load_sd]);
    let store_ss = {
        let reg = b.evec(M::Vmovss, UHVX, El::Float32, KZ);
        let mem = b.evec(M::Vmovss, WSV, El::Float32, K);
        let node = b.reg_mem(reg, mem);
        b.w0(node)
    };
    let store_sd = {
        let reg = b.evec(M::Vmovsd, UHVX, El::Float64, KZ);
        let mem = b.evec(M::Vmovsd, WSV, El::Float64, K);
        let node = b.reg_mem(reg, mem);
        b.w1(node)
    };
    let ups = w0(b, Len::All, M::Vmovups, WV, El::Float32, KZ);
    let upd = w1(b, Len::All, M::Vmovupd, WV, El::Float64, KZ);
    t[0x11] = b.mp([ups, upd, store_ss, store_sd]);

    let movhlps = b.evec(M::Vmovhlps, VHUX, El::Float32, NOATTR);
    let movlps = b.evec(M::Vmovlps, VHMQ, El::Float32, NOATTR);
    let none = b.reg_mem(movhlps, movlps);
    let none = b.l0(none);
    let none = b.w0(none);
    let movlpd = b.evec(M::Vmovlpd, VHMQ, El::Float64, NOATTR);
    let p66 = b.mem(movlpd);
    let p66 = b.l0(p66);
    let p66 = b.w1(p66);
    let sldup = w0(b, Len::All, M::Vmovsldup, VW, El::Float32, KZ);
    let ddup_x = b.evec(M::Vmovddup, VLWS, El::Float64, KZ);
    let ddup = b.evec(M::Vmovddup, VW, El::Float64, KZ);
    let ddup = b.vl([ddup_x, ddup, ddup, INV]);
    let ddup = b.w1(ddup);
    t[0x12] = b.mp([none, p66, sldup, ddup]);
    let lps = w0(b, Len::L0, M::Vmovlps, MQVX, El::Float32, NOATTR);
    let lpd = w1(b, Len::L0, M::Vmovlpd, MQVX, El::Float64, NOATTR);
    t[0x13] = b.mp([lps, lpd, INV, INV]);

    let movlhps = b.evec(M::Vmovlhps, VHUX, El::Float32, NOATTR);
    let movhps = b.evec(M::Vmovhps, VHMQ, El::Float32, NOATTR);
    let none = b.reg_mem(movlhps, movhps);
    let none = b.l0(none);
    let none = b.w0(none);
    let movhpd = b.evec(M::Vmovhpd, VHMQ, El::Float64, NOATTR);
    let p66 = b.mem(movhpd);
    let p66 = b.l0(p66);
    let p66 = b.w1(p66);
    let shdup = w0(b, Len::All, M::Vmovshdup, VW, El::Float32, KZ);
    t[0x16] = b.mp([none, p66, shdup, INV]);
    let hps = w0(b, Len::L0, M::Vmovhps, MQVX, El::Float32, NOATTR);
    let hpd = w1(b, Len::L0, M::Vmovhpd, MQVX, El::Float64, NOATTR);
    t[0x17] = b.mp([hps, hpd, INV, INV]);

    for (op, _, m) in map0f::FP_PACKED {
        let ps = w0(b, Len::All, m[0], VHW, El::Float32, KZB);
        let pd = w1(b, Len::All, m[1], VHW, El::Float64, KZB);
        t[op as usize] = b.mp([ps, pd, INV, INV]);
    }

    // 28-2F
    let aps = w0(b, Len::All, M::Vmovaps, VW, El::Float32, KZ);
    let apd = w1(b, Len::All, M::Vmovapd, VW, El::Float64, KZ);
    t[0x28] = b.mp([aps, apd, INV, INV]);
    let aps = w0(b, Len::All, M::Vmovaps, WV, El::Float32, KZ);
    let apd = w1(b, Len::All, M::Vmovapd, WV, El::Float64, KZ);
    t[0x29] = b.mp([aps, apd, INV, INV]);
    let ss = form(b, Len::Lig, M::Vcvtsi2ss, VHEY, El::Float32, VAttr::ER);
    let sd = form(b, Len::Lig, M::Vcvtsi2sd, VHEY, El::Float64, VAttr::ER);
    t[0x2A] = b.mp([INV, INV, ss, sd]);
    let ntps = w0(b, Len::All, M::Vmovntps, MV, El::Float32, NOATTR);
    let ntpd = w1(b, Len::All, M::Vmovntpd, MV, El::Float64, NOATTR);
    t[0x2B] = b.mp([ntps, ntpd, INV, INV]);
    for (op, ss, sd, attr) in [
        (0x2C, M::Vcvttss2si, M::Vcvttsd2si, VAttr::SAE),
        (0x2D, M::Vcvtss2si, M::Vcvtsd2si, VAttr::ER),
    ] {
        // W picks the GPR width, not the element.
        let ss = form(b, Len::Lig, ss, GYWS, El::Float32, attr);
        let sd = form(b, Len::Lig, sd, GYWS, El::Float64, attr);
        t[op] = b.mp([INV, INV, ss, sd]);
    }
    let ss = w0(b, Len::Lig, M::Vucomiss, VWS, El::Float32, VAttr::SAE);
    let sd = w1(b, Len::Lig, M::Vucomisd, VWS, El::Float64, VAttr::SAE);
    t[0x2E] = b.mp([ss, sd, INV, INV]);
    let ss = w0(b, Len::Lig, M::Vcomiss, VWS, El::Float32, VAttr::SAE);
    let sd = w1(b, Len::Lig, M::Vcomisd, VWS, El::Float64, VAttr::SAE);
    t[0x2F] = b.mp([ss, sd, INV, INV]);

    // 51-5F
    for (op, _, m) in map0f::FP_ARITH {
        let (packed, scalar) = match op {
            0x5D | 0x5F => (KZB_SAE, KZ_SAE),
            _ => (KZB_ER, KZ_ER),
        };
        let ops = if op == 0x51 { VW } else { VHW };
        let ps = w0(b, Len::All, m[0], ops, El::Float32, packed);
        let pd = w1(b, Len::All, m[1], ops, El::Float64, packed);
        let ss = w0(b, Len::Lig, m[2], VHWS, El::Float32, scalar);
        let sd = w1(b, Len::Lig, m[3], VHWS, El::Float64, scalar);
        t[op as usize] = b.mp([ps, pd, ss, sd]);
    }
    let none = w0(b, Len::All, M::Vcvtps2pd, VWHALF, El::Float32, KZB_SAE);
    let p66 = w1(b, Len::All, M::Vcvtpd2ps, VHALFW, El::Float64, KZB_ER);
    let f3 = w0(b, Len::Lig, M::Vcvtss2sd, VHWS, El::Float32, KZ_SAE);
    let f2 = w1(b, Len::Lig, M::Vcvtsd2ss, VHWS, El::Float64, KZ_ER);
    t[0x5A] = b.mp([none, p66, f3, f2]);
    let dq2ps = form(b, Len::All, M::Vcvtdq2ps, VW, El::Int32, KZB_ER);
    let qq2ps = form(b, Len::All, M::Vcvtqq2ps, VHALFW, El::Int64, KZB_ER);
    let none = b.w(dq2ps, qq2ps);
    let p66 = w0(b, Len::All, M::Vcvtps2dq, VW, El::Float32, KZB_ER);
    let f3 = w0(b, Len::All, M::Vcvttps2dq, VW, El::Float32, KZB_SAE);
    t[0x5B] = b.mp([none, p66, f3, INV]);

    // 60-6F, D0-FF: integer arithmetic
    for (op, m, elem, wc, shift) in INT {
        let node = int_form(b, m, elem, wc, shift);
        t[op as usize] = b.p66(node);
    }
    let psadbw = form(b, Len::All, M::Vpsadbw, VHW, El::UInt8, NOATTR);
    t[0xF6] = b.p66(psadbw);
    for (op, m, elem) in [
        (0x64, M::Vpcmpgtb, El::Int8),
        (0x65, M::Vpcmpgtw, El::Int16),
        (0x74, M::Vpcmpeqb, El::Int8),
        (0x75, M::Vpcmpeqw, El::Int16),
    ] {
        let node = form(b, Len::All, m, KHW, elem, K);
        t[op] = b.p66(node);
    }
    for (op, m) in [(0x66, M::Vpcmpgtd), (0x76, M::Vpcmpeqd)] {
        let node = w0(b, Len::All, m, KHW, El::Int32, K_BCST);
        t[op] = b.p66(node);
    }

    // 6E/7E/D6: vmovd/vmovq
    let node = d_q(b, Len::L0, M::Vmovd, M::Vmovq, VEY, NOATTR);
    t[0x6E] = b.p66(node);
    let p66 = d_q(b, Len::L0, M::Vmovd, M::Vmovq, EYV, NOATTR);
    let f3 = w1(b, Len::L0, M::Vmovq, VWS, El::UInt64, NOATTR);
    t[0x7E] = b.mp([INV, p66, f3, INV]);
    let node = w1(b, Len::L0, M::Vmovq, WSV, El::UInt64, NOATTR);
    t[0xD6] = b.p66(node);

    // 6F/7F: vmovdqa32/64, vmovdqu8/16/32/64
    for (op, ops) in [(0x6F, VW), (0x7F, WV)] {
        let p66 = d_q(b, Len::All, M::Vmovdqa32, M::Vmovdqa64, ops, KZ);
        let f3 = d_q(b, Len::All, M::Vmovdqu32, M::Vmovdqu64, ops, KZ);
        let f2 = dq(b, Len::All, (M::Vmovdqu8, El::Int8), (M::Vmovdqu16, El::Int16), ops, KZ);
        t[op] = b.mp([INV, p66, f3, f2]);
    }

    // 70-73
    let p66 = w0(b, Len::All, M::Vpshufd, VWIB, El::Int32, KZB);
    let f3 = form(b, Len::All, M::Vpshufhw, VWIB, El::Int16, KZ);
    let f2 = form(b, Len::All, M::Vpshuflw, VWIB, El::Int16, KZ);
    t[0x70] = b.mp([INV, p66, f3, f2]);
    let srlw = form(b, Len::All, M::Vpsrlw, HWIB, El::Int16, KZ);
    let sraw = form(b, Len::All, M::Vpsraw, HWIB, El::Int16, KZ);
    let sllw = form(b, Len::All, M::Vpsllw, HWIB, El::Int16, KZ);
    let g = group(b, &[(2, srlw), (4, sraw), (6, sllw)]);
    t[0x71] = b.p66(g);
    let ror = d_q(b, Len::All, M::Vprord, M::Vprorq, HWIB, KZB);
    let rol = d_q(b, Len::All, M::Vprold, M::Vprolq, HWIB, KZB);
    let srld = w0(b, Len::All, M::Vpsrld, HWIB, El::Int32, KZB);
    let sra = d_q(b, Len::All, M::Vpsrad, M::Vpsraq, HWIB, KZB);
    let slld = w0(b, Len::All, M::Vpslld, HWIB, El::Int32, KZB);
    let g = group(b, &[(0, ror), (1, rol), (2, srld), (4, sra), (6, slld)]);
    t[0x72] = b.p66(g);
    let srlq = w1(b, Len::All, M::Vpsrlq, HWIB, El::Int64, KZB);
    let srldq = form(b, Len::All, M::Vpsrldq, HWIB, El::UInt128, NOATTR);
    let sllq = w1(b, Len::All, M::Vpsllq, HWIB, El::Int64, KZB);
    let slldq = form(b, Len::All, M::Vpslldq, HWIB, El::UInt128, NOATTR);
    let g = group(b, &[(2, srlq), (3, srldq), (6, sllq), (7, slldq)]);
    t[0x73] = b.p66(g);

    // 78-7B: unsigned conversions
    for (op, none, p66, scalar, attr) in [
        (
            0x78,
            [M::Vcvttps2udq, M::Vcvttpd2udq],
            [M::Vcvttps2uqq, M::Vcvttpd2uqq],
            [M::Vcvttss2usi, M::Vcvttsd2usi],
            VAttr::SAE,
        ),
        (
            0x79,
            [M::Vcvtps2udq, M::Vcvtpd2udq],
            [M::Vcvtps2uqq, M::Vcvtpd2uqq],
            [M::Vcvtss2usi, M::Vcvtsd2usi],
            VAttr::ER,
        ),
    ] {
        let packed = KZB.union(attr);
        let ps = form(b, Len::All, none[0], VW, El::Float32, packed);
        let pd = form(b, Len::All, none[1], VHALFW, El::Float64, packed);
        let none = b.w(ps, pd);
        let ps = form(b, Len::All, p66[0], VWHALF, El::Float32, packed);
        let pd = form(b, Len::All, p66[1], VW, El::Float64, packed);
        let p66 = b.w(ps, pd);
        let ss = form(b, Len::Lig, scalar[0], GYWS, El::Float32, attr);
        let sd = form(b, Len::Lig, scalar[1], GYWS, El::Float64, attr);
        t[op] = b.mp([none, p66, ss, sd]);
    }
    let udq2pd = form(b, Len::All, M::Vcvtudq2pd, VWHALF, El::UInt32, KZB);
    let uqq2pd = form(b, Len::All, M::Vcvtuqq2pd, VW, El::UInt64, KZB_ER);
    let f3 = b.w(udq2pd, uqq2pd);
    let udq2ps = form(b, Len::All, M::Vcvtudq2ps, VW, El::UInt32, KZB_ER);
    let uqq2ps = form(b, Len::All, M::Vcvtuqq2ps, VHALFW, El::UInt64, KZB_ER);
    let f2 = b.w(udq2ps, uqq2ps);
    t[0x7A] = b.mp([INV, INV, f3, f2]);
    let f3 = form(b, Len::Lig, M::Vcvtusi2ss, VHEY, El::Float32, VAttr::ER);
    let f2 = form(b, Len::Lig, M::Vcvtusi2sd, VHEY, El::Float64, VAttr::ER);
    t[0x7B] = b.mp([INV, INV, f3, f2]);

    // C2-C6
    let ps = w0(b, Len::All, M::Vcmpps, KHWIB, El::Float32, K_BCST_SAE);
    let pd = w1(b, Len::All, M::Vcmppd, KHWIB, El::Float64, K_BCST_SAE);
    let ss = w0(b, Len::Lig, M::Vcmpss, KHWSIB, El::Float32, K_SAE);
    let sd = w1(b, Len::Lig, M::Vcmpsd, KHWSIB, El::Float64, K_SAE);
    t[0xC2] = b.mp([ps, pd, ss, sd]);
    let node = form(b, Len::L0, M::Vpinsrw, VHEDWIB, El::Int16, NOATTR);
    t[0xC4] = b.p66(node);
    let node = form(b, Len::L0, M::Vpextrw, GDUIB, El::Int16, NOATTR);
    t[0xC5] = b.p66(node);
    let ps = w0(b, Len::All, M::Vshufps, VHWIB, El::Float32, KZB);
    let pd = w1(b, Len::All, M::Vshufpd, VHWIB, El::Float64, KZB);
    t[0xC6] = b.mp([ps, pd, INV, INV]);

    // E6, E7
    let p66 = w1(b, Len::All, M::Vcvttpd2dq, VHALFW, El::Float64, KZB_SAE);
    let dq2pd = form(b, Len::All, M::Vcvtdq2pd, VWHALF, El::Int32, KZB);
    let qq2pd = form(b, Len::All, M::Vcvtqq2pd, VW, El::Int64, KZB_ER);
    let f3 = b.w(dq2pd, qq2pd);
    let f2 = w1(b, Len::All, M::Vcvtpd2dq, VHALFW, El::Float64, KZB_ER);
    t[0xE6] = b.mp([INV, p66, f3, f2]);
    let node = w0(b, Len::All, M::Vmovntdq, MV, El::Int64, NOATTR);
    t[0xE7] = b.p66(node);

    t
}

pub(super) fn build_0f38(b: &mut TableBuilder) -> [NodeId; 256] {
    let mut t = [INV; 256];
    let mut p66 = |b: &mut TableBuilder, op: usize, node: NodeId| t[op] = b.p66(node);

    for (op, m, elem, ops) in [
        (0x00, M::Vpshufb, El::Int8, VHW),
        (0x04, M::Vpmaddubsw, El::Int16, VHW),
        (0x0B, M::Vpmulhrsw, El::Int16, VHW),
        (0x1C, M::Vpabsb, El::Int8, VW),
        (0x1D, M::Vpabsw, El::Int16, VW),
        (0x3C, M::Vpmaxsb, El::Int8, VHW),
        (0x3E, M::Vpmaxuw, El::UInt16, VHW),
    ] {
        let node = form(b, Len::All, m, ops, elem, KZ);
        p66(b, op, node);
    }
    let node = w0(b, Len::All, M::Vpabsd, VW, El::Int32, KZB);
    p66(b, 0x1E, node);
    let node = w1(b, Len::All, M::Vpabsq, VW, El::Int64, KZB);
    p66(b, 0x1F, node);
    let node = w0(b, Len::All, M::Vpermilps, VHW, El::Float32, KZB);
    p66(b, 0x0C, node);
    let node = w1(b, Len::All, M::Vpermilpd, VHW, El::Float64, KZB);
    p66(b, 0x0D, node);
    for (op, m) in [(0x10, M::Vpsrlvw), (0x11, M::Vpsravw), (0x12, M::Vpsllvw)] {
        let node = w1(b, Len::All, m, VHW, El::Int16, KZ);
        p66(b, op, node);
    }
    let node = w0(b, Len::All, M::Vcvtph2ps, VWHALF, El::Float16, KZ_SAE);
    p66(b, 0x13, node);
    let node = d_q(b, Len::All, M::Vprorvd, M::Vprorvq, VHW, KZB);
    p66(b, 0x14, node);
    let node = d_q(b, Len::All, M::Vprolvd, M::Vprolvq, VHW, KZB);
    p66(b, 0x15, node);
    let node = ps_pd(b, Len::L12, M::Vpermps, M::Vpermpd, VHW, KZB);
    p66(b, 0x16, node);

    // Broadcasts
    let node = w0(b, Len::All, M::Vbroadcastss, VLWS, El::Float32, KZ);
    p66(b, 0x18, node);
    let node = dq(b, Len::L12, (M::Vbroadcastf32x2, El::UInt64), (M::Vbroadcastsd, El::Float64), VLWS, KZ);
    p66(b, 0x19, node);
    let node = dq(b, Len::L12, (M::Vbroadcastf32x4, El::Float32), (M::Vbroadcastf64x2, El::Float64), VM_X, KZ);
    p66(b, 0x1A, node);
    let node = dq(b, Len::L2, (M::Vbroadcastf32x8, El::Float32), (M::Vbroadcastf64x4, El::Float64), VM_Y, KZ);
    p66(b, 0x1B, node);
    let node = w0(b, Len::All, M::Vpbroadcastd, VLWS, El::Int32, KZ);
    p66(b, 0x58, node);
    let node = dq(b, Len::All, (M::Vbroadcasti32x2, El::UInt64), (M::Vpbroadcastq, El::Int64), VLWS, KZ);
    p66(b, 0x59, node);
    let node = dq(b, Len::L12, (M::Vbroadcasti32x4, El::Int32), (M::Vbroadcasti64x2, El::Int64), VM_X, KZ);
    p66(b, 0x5A, node);
    let node = dq(b, Len::L2, (M::Vbroadcasti32x8, El::Int32), (M::Vbroadcasti64x4, El::Int64), VM_Y, KZ);
    p66(b, 0x5B, node);
    let node = w0(b, Len::All, M::Vpbroadcastb, VLWS, El::Int8, KZ);
    p66(b, 0x78, node);
    let node = w0(b, Len::All, M::Vpbroadcastw, VLWS, El::Int16, KZ);
    p66(b, 0x79, node);
    let node = w0(b, Len::All, M::Vpbroadcastb, VRD, El::Int8, KZ);
    p66(b, 0x7A, node);
    let node = w0(b, Len::All, M::Vpbroadcastw, VRD, El::Int16, KZ);
    p66(b, 0x7B, node);
    let node = d_q(b, Len::All, M::Vpbroadcastd, M::Vpbroadcastq, VRY, KZ);
    p66(b, 0x7C, node);

    // Byte/word min/max, opcodes shared with the F3 mask conversions below
    let minsb = form(b, Len::All, M::Vpminsb, VHW, El::Int8, KZ);
    let minuw = form(b, Len::All, M::Vpminuw, VHW, El::UInt16, KZ);

    // Sign/zero extensions (66) and down-converts (F3)
    const NARROW: [(M, Ops); 12] = [
        (M::Vpmovswb, WHALFV),
        (M::Vpmovsdb, WQTRV),
        (M::Vpmovsqb, WEIGHTHV),
        (M::Vpmovsdw, WHALFV),
        (M::Vpmovsqw, WQTRV),
        (M::Vpmovsqd, WHALFV),
        (M::Vpmovwb, WHALFV),
        (M::Vpmovdb, WQTRV),
        (M::Vpmovqb, WEIGHTHV),
        (M::Vpmovdw, WHALFV),
        (M::Vpmovqw, WQTRV),
        (M::Vpmovqd, WHALFV),
    ];
    let mut slots = Vec::new();
    for ((op, _, m, elem, ops), (narrow, nops)) in PMOVX.into_iter().zip(NARROW) {
        let widen = if matches!(op, 0x25 | 0x35) {
            w0(b, Len::All, m, ops, elem, KZ)
        } else {
            form(b, Len::All, m, ops, elem, KZ)
        };
        let narrow = w0(b, Len::All, narrow, nops, elem, KZ);
        slots.push((op as usize, b.mp([INV, widen, narrow, INV])));
    }

    // Tests and mask conversions
    let testm = dq(b, Len::All, (M::Vptestmb, El::Int8), (M::Vptestmw, El::Int16), KHW, K);
    let testnm = dq(b, Len::All, (M::Vptestnmb, El::Int8), (M::Vptestnmw, El::Int16), KHW, K);
    slots.push((0x26, b.mp([INV, testm, testnm, INV])));
    let testm = d_q(b, Len::All, M::Vptestmd, M::Vptestmq, KHW, K_BCST);
    let testnm = d_q(b, Len::All, M::Vptestnmd, M::Vptestnmq, KHW, K_BCST);
    slots.push((0x27, b.mp([INV, testm, testnm, INV])));
    let muldq = w1(b, Len::All, M::Vpmuldq, VHW, El::Int64, KZB);
    let m2bw = dq(b, Len::All, (M::Vpmovm2b, El::Int8), (M::Vpmovm2w, El::Int16), VKR, NOATTR);
    slots.push((0x28, b.mp([INV, muldq, m2bw, INV])));
    let cmpeqq = w1(b, Len::All, M::Vpcmpeqq, KHW, El::Int64, K_BCST);
    let bw2m = dq(b, Len::All, (M::Vpmovb2m, El::Int8), (M::Vpmovw2m, El::Int16), KU, NOATTR);
    slots.push((0x29, b.mp([INV, cmpeqq, bw2m, INV])));
    let ntdqa = w0(b, Len::All, M::Vmovntdqa, VM, El::Int32, NOATTR);
    let mb2q = w1(b, Len::All, M::Vpbroadcastmb2q, VKR, El::Int64, NOATTR);
    slots.push((0x2A, b.mp([INV, ntdqa, mb2q, INV])));
    let m2dq = d_q(b, Len::All, M::Vpmovm2d, M::Vpmovm2q, VKR, NOATTR);
    slots.push((0x38, b.mp([INV, minsb, m2dq, INV])));
    let minsd = d_q(b, Len::All, M::Vpminsd, M::Vpminsq, VHW, KZB);
    let dq2m = d_q(b, Len::All, M::Vpmovd2m, M::Vpmovq2m, KU, NOATTR);
    slots.push((0x39, b.mp([INV, minsd, dq2m, INV])));
    let mw2d = w0(b, Len::All, M::Vpbroadcastmw2d, VKR, El::Int32, NOATTR);
    slots.push((0x3A, b.mp([INV, minuw, mw2d, INV])));
    for (op, node) in slots {
        t[op] = node;
    }
    let mut p66 = |b: &mut TableBuilder, op: usize, node: NodeId| t[op] = b.p66(node);

    let node = w0(b, Len::All, M::Vpackusdw, VHW, El::Int32, KZB);
    p66(b, 0x2B, node);
    let node = ps_pd(b, Len::All, M::Vscalefps, M::Vscalefpd, VHW, KZB_ER);
    p66(b, 0x2C, node);
    let node = ps_pd(b, Len::Lig, M::Vscalefss, M::Vscalefsd, VHWS, KZ_ER);
    p66(b, 0x2D, node);
    let node = d_q(b, Len::L12, M::Vpermd, M::Vpermq, VHW, KZB);
    p66(b, 0x36, node);
    let node = w1(b, Len::All, M::Vpcmpgtq, KHW, El::Int64, K_BCST);
    p66(b, 0x37, node);
    let node = dq(b, Len::All, (M::Vpminud, El::UInt32), (M::Vpminuq, El::UInt64), VHW, KZB);
    p66(b, 0x3B, node);
    let node = d_q(b, Len::All, M::Vpmaxsd, M::Vpmaxsq, VHW, KZB);
    p66(b, 0x3D, node);
    let node = dq(b, Len::All, (M::Vpmaxud, El::UInt32), (M::Vpmaxuq, El::UInt64), VHW, KZB);
    p66(b, 0x3F, node);
    let node = d_q(b, Len::All, M::Vpmulld, M::Vpmullq, VHW, KZB);
    p66(b, 0x40, node);
    let node = ps_pd(b, Len::All, M::Vgetexpps, M::Vgetexppd, VW, KZB_SAE);
    p66(b, 0x42, node);
    let node = ps_pd(b, Len::Lig, M::Vgetexpss, M::Vgetexpsd, VHWS, KZ_SAE);
    p66(b, 0x43, node);
    let node = d_q(b, Len::All, M::Vplzcntd, M::Vplzcntq, VW, KZB);
    p66(b, 0x44, node);
    for (op, d, q) in [
        (0x45, M::Vpsrlvd, M::Vpsrlvq),
        (0x46, M::Vpsravd, M::Vpsravq),
        (0x47, M::Vpsllvd, M::Vpsllvq),
        (0x64, M::Vpblendmd, M::Vpblendmq),
        (0x76, M::Vpermi2d, M::Vpermi2q),
        (0x7E, M::Vpermt2d, M::Vpermt2q),
    ] {
        let node = d_q(b, Len::All, d, q, VHW, KZB);
        p66(b, op, node);
    }
    for (op, ps, pd, ops, attr) in [
        (0x4C, M::Vrcp14ps, M::Vrcp14pd, VW, KZB),
        (0x4E, M::Vrsqrt14ps, M::Vrsqrt14pd, VW, KZB),
        (0x65, M::Vblendmps, M::Vblendmpd, VHW, KZB),
        (0x77, M::Vpermi2ps, M::Vpermi2pd, VHW, KZB),
        (0x7F, M::Vpermt2ps, M::Vpermt2pd, VHW, KZB),
        (0x88, M::Vexpandps, M::Vexpandpd, VW, KZ),
        (0x8A, M::Vcompressps, M::Vcompresspd, WV, KZ),
    ] {
        let node = ps_pd(b, Len::All, ps, pd, ops, attr);
        p66(b, op, node);
    }
    let node = ps_pd(b, Len::Lig, M::Vrcp14ss, M::Vrcp14sd, VHWS, KZ);
    p66(b, 0x4D, node);
    let node = ps_pd(b, Len::Lig, M::Vrsqrt14ss, M::Vrsqrt14sd, VHWS, KZ);
    p66(b, 0x4F, node);
    for (op, m8, m16) in [
        (0x66, M::Vpblendmb, M::Vpblendmw),
        (0x75, M::Vpermi2b, M::Vpermi2w),
        (0x7D, M::Vpermt2b, M::Vpermt2w),
        (0x8D, M::Vpermb, M::Vpermw),
    ] {
        let node = dq(b, Len::All, (m8, El::Int8), (m16, El::Int16), VHW, KZ);
        p66(b, op, node);
    }
    let node = w1(b, Len::All, M::Vpmultishiftqb, VHW, El::UInt8, KZB);
    p66(b, 0x83, node);
    let node = d_q(b, Len::All, M::Vpexpandd, M::Vpexpandq, VW, KZ);
    p66(b, 0x89, node);
    let node = d_q(b, Len::All, M::Vpcompressd, M::Vpcompressq, WV, KZ);
    p66(b, 0x8B, node);

    // Gathers and scatters: memory only, non-zero mask required
    for (op, d, q) in [
        (0x90, (M::Vpgatherdd, EGATHER_D, El::Int32), (M::Vpgatherdq, EGATHER_DQ, El::Int64)),
        (0x91, (M::Vpgatherqd, EGATHER_QD, El::Int32), (M::Vpgatherqq, EGATHER_D, El::Int64)),
        (0x92, (M::Vgatherdps, EGATHER_D, El::Float32), (M::Vgatherdpd, EGATHER_DQ, El::Float64)),
        (0x93, (M::Vgatherqps, EGATHER_QD, El::Float32), (M::Vgatherqpd, EGATHER_D, El::Float64)),
        (0xA0, (M::Vpscatterdd, ESCATTER_D, El::Int32), (M::Vpscatterdq, ESCATTER_DQ, El::Int64)),
        (0xA1, (M::Vpscatterqd, ESCATTER_QD, El::Int32), (M::Vpscatterqq, ESCATTER_D, El::Int64)),
        (0xA2, (M::Vscatterdps, ESCATTER_D, El::Float32), (M::Vscatterdpd, ESCATTER_DQ, El::Float64)),
        (0xA3, (M::Vscatterqps, ESCATTER_QD, El::Float32), (M::Vscatterqpd, ESCATTER_D, El::Float64)),
    ] {
        let w0 = form(b, Len::All, d.0, d.1, d.2, GATHER);
        let w1 = form(b, Len::All, q.0, q.1, q.2, GATHER);
        let node = b.w(w0, w1);
        let node = b.mem(node);
        p66(b, op, node);
    }

    // VNNI. F3 52 is the BF16 dot product; F2 52/53 are the four-iteration
    // word dot products.
    let dpbf16 = w0(b, Len::All, M::Vdpbf16ps, VHW, El::Float32, KZB);
    let mut four = [INV; 2];
    for (slot, m) in four.iter_mut().zip([M::Vp4dpwssd, M::Vp4dpwssds]) {
        let node = w0(b, Len::L2, m, VH4MW, El::Int16, KZ);
        *slot = b.mem(node);
    }
    for (op, m, f3, f2) in [
        (0x50, M::Vpdpbusd, INV, INV),
        (0x51, M::Vpdpbusds, INV, INV),
        (0x52, M::Vpdpwssd, dpbf16, four[0]),
        (0x53, M::Vpdpwssds, INV, four[1]),
    ] {
        let node = w0(b, Len::All, m, VHW, El::Int32, KZB);
        t[op] = b.mp([INV, node, f3, f2]);
    }

    // Variable-count concatenate and shift; the BF16 conversions share 72.
    let node = w1(b, Len::All, M::Vpshldvw, VHW, El::Int16, KZ);
    t[0x70] = b.p66(node);
    let node = d_q(b, Len::All, M::Vpshldvd, M::Vpshldvq, VHW, KZB);
    t[0x71] = b.p66(node);
    let shrdvw = w1(b, Len::All, M::Vpshrdvw, VHW, El::Int16, KZ);
    let cvtneps = w0(b, Len::All, M::Vcvtneps2bf16, VHALFW, El::Float32, KZB);
    let cvtne2ps = w0(b, Len::All, M::Vcvtne2ps2bf16, VHW, El::Float32, KZB);
    t[0x72] = b.mp([INV, shrdvw, cvtneps, cvtne2ps]);
    let node = d_q(b, Len::All, M::Vpshrdvd, M::Vpshrdvq, VHW, KZB);
    t[0x73] = b.p66(node);

    // FMA, with the four-iteration single precision forms on F2
    let fma4 = [
        (0x9A, w0(b, Len::L2, M::V4fmaddps, VH4MPS, El::Float32, KZ)),
        (0x9B, w0(b, Len::Lig, M::V4fmaddss, VH4MSS, El::Float32, KZ)),
        (0xAA, w0(b, Len::L2, M::V4fnmaddps, VH4MPS, El::Float32, KZ)),
        (0xAB, w0(b, Len::Lig, M::V4fnmaddss, VH4MSS, El::Float32, KZ)),
    ];
    for (op, ps, pd, scalar) in FMA {
        let node = if scalar {
            ps_pd(b, Len::Lig, ps, pd, VHWS, KZ_ER)
        } else {
            ps_pd(b, Len::All, ps, pd, VHW, KZB_ER)
        };
        let f2 = match fma4.iter().find(|&&(o, _)| o == op) {
            Some(&(_, wide)) => b.mem(wide),
            None => INV,
        };
        t[op as usize] = b.mp([INV, node, INV, f2]);
    }
    let mut p66 = |b: &mut TableBuilder, op: usize, node: NodeId| t[op] = b.p66(node);

    let node = w1(b, Len::All, M::Vpmadd52luq, VHW, El::UInt64, KZB);
    p66(b, 0xB4, node);
    let node = w1(b, Len::All, M::Vpmadd52huq, VHW, El::UInt64, KZB);
    p66(b, 0xB5, node);
    let node = d_q(b, Len::All, M::Vpconflictd, M::Vpconflictq, VW, KZB);
    p66(b, 0xC4, node);
    let node = w0(b, Len::All, M::Vgf2p8mulb, VHW, El::UInt8, KZ);
    p66(b, 0xCF, node);

    // ER: exponential and 28-bit reciprocal approximations
    for (op, ps, pd) in [
        (0xC8, M::Vexp2ps, M::Vexp2pd),
        (0xCA, M::Vrcp28ps, M::Vrcp28pd),
        (0xCC, M::Vrsqrt28ps, M::Vrsqrt28pd),
    ] {
        let node = ps_pd(b, Len::L2, ps, pd, VW, KZB_SAE);
        p66(b, op, node);
    }
    for (op, ss, sd) in [(0xCB, M::Vrcp28ss, M::Vrcp28sd), (0xCD, M::Vrsqrt28ss, M::Vrsqrt28sd)] {
        let node = ps_pd(b, Len::Lig, ss, sd, VHWS, KZ_SAE);
        p66(b, op, node);
    }
    for (op, m) in [
        (0xDC, M::Vaesenc),
        (0xDD, M::Vaesenclast),
        (0xDE, M::Vaesdec),
        (0xDF, M::Vaesdeclast),
    ] {
        let node = form(b, Len::All, m, VHW, El::UInt128, NOATTR);
        p66(b, op, node);
    }

    t
}

pub(super) fn build_0f3a(b: &mut TableBuilder) -> [NodeId; 256] {
    let mut t = [INV; 256];
    let mut p66 = |b: &mut TableBuilder, op: usize, node: NodeId| t[op] = b.p66(node);

    let node = w1(b, Len::L12, M::Vpermq, VWIB, El::Int64, KZB);
    p66(b, 0x00, node);
    let node = w1(b, Len::L12, M::Vpermpd, VWIB, El::Float64, KZB);
    p66(b, 0x01, node);
    let node = d_q(b, Len::All, M::Valignd, M::Valignq, VHWIB, KZB);
    p66(b, 0x03, node);
    let node = w0(b, Len::All, M::Vpermilps, VWIB, El::Float32, KZB);
    p66(b, 0x04, node);
    let node = w1(b, Len::All, M::Vpermilpd, VWIB, El::Float64, KZB);
    p66(b, 0x05, node);
    let node = w0(b, Len::All, M::Vrndscaleps, VWIB, El::Float32, KZB_SAE);
    p66(b, 0x08, node);
    let node = w1(b, Len::All, M::Vrndscalepd, VWIB, El::Float64, KZB_SAE);
    p66(b, 0x09, node);
    let node = w0(b, Len::Lig, M::Vrndscaless, VHWSIB, El::Float32, KZ_SAE);
    p66(b, 0x0A, node);
    let node = w1(b, Len::Lig, M::Vrndscalesd, VHWSIB, El::Float64, KZ_SAE);
    p66(b, 0x0B, node);
    let node = form(b, Len::All, M::Vpalignr, VHWIB, El::Int8, KZ);
    p66(b, 0x0F, node);

    // Element extract and insert (128-bit only)
    let node = form(b, Len::L0, M::Vpextrb, EDBVIB, El::Int8, NOATTR);
    p66(b, 0x14, node);
    let node = form(b, Len::L0, M::Vpextrw, EDWVIB, El::Int16, NOATTR);
    p66(b, 0x15, node);
    let node = d_q(b, Len::L0, M::Vpextrd, M::Vpextrq, EYVIB, NOATTR);
    p66(b, 0x16, node);
    let node = form(b, Len::L0, M::Vextractps, EDVIB, El::Float32, NOATTR);
    p66(b, 0x17, node);
    let node = form(b, Len::L0, M::Vpinsrb, VHEDBIB, El::Int8, NOATTR);
    p66(b, 0x20, node);
    let node = w0(b, Len::L0, M::Vinsertps, VHWSIB, El::Float32, NOATTR);
    p66(b, 0x21, node);
    let node = d_q(b, Len::L0, M::Vpinsrd, M::Vpinsrq, VHEYIB, NOATTR);
    p66(b, 0x22, node);

    // 128/256-bit lane insert and extract
    for (op, lo, hi, ops, float, len) in [
        (0x18, M::Vinsertf32x4, M::Vinsertf64x2, VHWXIB, true, Len::L12),
        (0x19, M::Vextractf32x4, M::Vextractf64x2, WXVIB, true, Len::L12),
        (0x1A, M::Vinsertf32x8, M::Vinsertf64x4, VHWYIB, true, Len::L2),
        (0x1B, M::Vextractf32x8, M::Vextractf64x4, WYVIB, true, Len::L2),
        (0x38, M::Vinserti32x4, M::Vinserti64x2, VHWXIB, false, Len::L12),
        (0x39, M::Vextracti32x4, M::Vextracti64x2, WXVIB, false, Len::L12),
        (0x3A, M::Vinserti32x8, M::Vinserti64x4, VHWYIB, false, Len::L2),
        (0x3B, M::Vextracti32x8, M::Vextracti64x4, WYVIB, false, Len::L2),
    ] {
        let node = if float {
            ps_pd(b, len, lo, hi, ops, KZ)
        } else {
            d_q(b, len, lo, hi, ops, KZ)
        };
        p66(b, op, node);
    }
    let node = w0(b, Len::All, M::Vcvtps2ph, WHALFVIB, El::Float16, KZ_SAE);
    p66(b, 0x1D, node);

    // Compares into opmasks
    let node = dq(b, Len::All, (M::Vpcmpud, El::UInt32), (M::Vpcmpuq, El::UInt64), KHWIB, K_BCST);
    p66(b, 0x1E, node);
    let node = d_q(b, Len::All, M::Vpcmpd, M::Vpcmpq, KHWIB, K_BCST);
    p66(b, 0x1F, node);
    let node = dq(b, Len::All, (M::Vpcmpub, El::UInt8), (M::Vpcmpuw, El::UInt16), KHWIB, K);
    p66(b, 0x3E, node);
    let node = dq(b, Len::All, (M::Vpcmpb, El::Int8), (M::Vpcmpw, El::Int16), KHWIB, K);
    p66(b, 0x3F, node);
    let node = ps_pd(b, Len::All, M::Vfpclassps, M::Vfpclasspd, KWIB, K_BCST);
    p66(b, 0x66, node);
    let node = ps_pd(b, Len::Lig, M::Vfpclassss, M::Vfpclasssd, KWSIB, K);
    p66(b, 0x67, node);

    // Lane shuffles and bitwise ternary logic
    let node = ps_pd(b, Len::L12, M::Vshuff32x4, M::Vshuff64x2, VHWIB, KZB);
    p66(b, 0x23, node);
    let node = d_q(b, Len::L12, M::Vshufi32x4, M::Vshufi64x2, VHWIB, KZB);
    p66(b, 0x43, node);
    let node = d_q(b, Len::All, M::Vpternlogd, M::Vpternlogq, VHWIB, KZB);
    p66(b, 0x25, node);

    // Floating point classification and range forms
    for (op, ps, pd, ops, packed) in [
        (0x26, M::Vgetmantps, M::Vgetmantpd, VWIB, true),
        (0x27, M::Vgetmantss, M::Vgetmantsd, VHWSIB, false),
        (0x50, M::Vrangeps, M::Vrangepd, VHWIB, true),
        (0x51, M::Vrangess, M::Vrangesd, VHWSIB, false),
        (0x54, M::Vfixupimmps, M::Vfixupimmpd, VHWIB, true),
        (0x55, M::Vfixupimmss, M::Vfixupimmsd, VHWSIB, false),
        (0x56, M::Vreduceps, M::Vreducepd, VWIB, true),
        (0x57, M::Vreducess, M::Vreducesd, VHWSIB, false),
    ] {
        let node = if packed {
            ps_pd(b, Len::All, ps, pd, ops, KZB_SAE)
        } else {
            ps_pd(b, Len::Lig, ps, pd, ops, KZ_SAE)
        };
        p66(b, op, node);
    }
    let node = w0(b, Len::All, M::Vdbpsadbw, VHWIB, El::UInt8, KZ);
    p66(b, 0x42, node);
    let node = form(b, Len::All, M::Vpclmulqdq, VHWIB, El::UInt64, NOATTR);
    p66(b, 0x44, node);

    // Concatenate and shift
    let node = w1(b, Len::All, M::Vpshldw, VHWIB, El::Int16, KZ);
    p66(b, 0x70, node);
    let node = d_q(b, Len::All, M::Vpshldd, M::Vpshldq, VHWIB, KZB);
    p66(b, 0x71, node);
    let node = w1(b, Len::All, M::Vpshrdw, VHWIB, El::Int16, KZ);
    p66(b, 0x72, node);
    let node = d_q(b, Len::All, M::Vpshrdd, M::Vpshrdq, VHWIB, KZB);
    p66(b, 0x73, node);

    let node = w1(b, Len::All, M::Vgf2p8affineqb, VHWIB, El::UInt8, KZB);
    p66(b, 0xCE, node);
    let node = w1(b, Len::All, M::Vgf2p8affineinvqb, VHWIB, El::UInt8, KZB);
    p66(b, 0xCF, node);

    // Half precision forms of the rounding and classification opcodes take
    // the no-prefix slot.
    let ph = [
        (0x08, w0(b, Len::All, M::Vrndscaleph, VWIB, El::Float16, KZB_SAE)),
        (0x0A, w0(b, Len::Lig, M::Vrndscalesh, VHWSIB, El::Float16, KZ_SAE)),
        (0x26, w0(b, Len::All, M::Vgetmantph, VWIB, El::Float16, KZB_SAE)),
        (0x27, w0(b, Len::Lig, M::Vgetmantsh, VHWSIB, El::Float16, KZ_SAE)),
        (0x56, w0(b, Len::All, M::Vreduceph, VWIB, El::Float16, KZB_SAE)),
        (0x57, w0(b, Len::Lig, M::Vreducesh, VHWSIB, El::Float16, KZ_SAE)),
        (0x66, w0(b, Len::All, M::Vfpclassph, KWIB, El::Float16, K_BCST)),
        (0x67, w0(b, Len::Lig, M::Vfpclasssh, KWSIB, El::Float16, K)),
    ];
    for (op, node) in ph {
        t[op] = b.mp([node, t[op], INV, INV]);
    }

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

    fn lookup(bytes: &[u8]) -> Option<(M, VAttr)> {
        let mut cx = DecodeContext::new(bytes, 0, 0, Bitness::Bits64, DecoderOptions::new());
        let (map, opcode) = crate::x86::prefix::scan(&mut cx.cursor, &mut cx.state).ok()?;
        match resolve(&mut cx, map, opcode).ok()?.0 {
            Handler::Vector { m, attr, .. } => Some((m, attr)),
            _ => None,
        }
    }

    fn mnemonic(bytes: &[u8]) -> Option<M> {
        lookup(bytes).map(|(m, _)| m)
    }

    #[test]
    fn test_vaddps_zmm() {
        assert_eq!(lookup(&[0x62, 0xF1, 0x7C, 0x48, 0x58, 0xC1]), Some((M::Vaddps, KZB_ER)));
    }

    #[test]
    fn test_w_selects_element_width() {
        // EVEX.66.0F.W1 58 is vaddpd; W0 is undefined.
        assert_eq!(mnemonic(&[0x62, 0xF1, 0xFD, 0x48, 0x58, 0xC1]), Some(M::Vaddpd));
        assert_eq!(mnemonic(&[0x62, 0xF1, 0x7D, 0x48, 0x58, 0xC1]), None);
    }

    #[test]
    fn test_movdqu_variants() {
        assert_eq!(mnemonic(&[0x62, 0xF1, 0x7E, 0x48, 0x6F, 0xC1]), Some(M::Vmovdqu32));
        assert_eq!(mnemonic(&[0x62, 0xF1, 0xFE, 0x48, 0x6F, 0xC1]), Some(M::Vmovdqu64));
        assert_eq!(mnemonic(&[0x62, 0xF1, 0x7F, 0x48, 0x6F, 0xC1]), Some(M::Vmovdqu8));
    }

    #[test]
    fn test_rounding_selects_512_entry() {
        // {rz-sae}: EVEX.b with L'L = 11 on a register form
        assert_eq!(mnemonic(&[0x62, 0xF1, 0x7C, 0x78, 0x58, 0xC1]), Some(M::Vaddps));
    }

    #[test]
    fn test_lane_insert_needs_256_or_512() {
        assert_eq!(mnemonic(&[0x62, 0xF3, 0x7D, 0x08, 0x18, 0xC1, 0x01]), None);
        assert_eq!(mnemonic(&[0x62, 0xF3, 0x7D, 0x48, 0x18, 0xC1, 0x01]), Some(M::Vinsertf32x4));
    }

    #[test]
    fn test_gather_is_memory_only() {
        assert_eq!(mnemonic(&[0x62, 0xF2, 0x7D, 0x49, 0x90, 0xC1]), None);
        assert_eq!(mnemonic(&[0x62, 0xF2, 0x7D, 0x49, 0x90, 0x04, 0x88]), Some(M::Vpgatherdd));
    }

    #[test]
    fn test_scalar_gpr_conversion_ignores_w() {
        // vcvtss2si eax / rax
        assert_eq!(mnemonic(&[0x62, 0xF1, 0x7E, 0x08, 0x2D, 0xC1]), Some(M::Vcvtss2si));
        assert_eq!(mnemonic(&[0x62, 0xF1, 0xFE, 0x08, 0x2D, 0xC1]), Some(M::Vcvtss2si));
    }

    #[test]
    fn test_vnni_and_bf16() {
        assert_eq!(mnemonic(&[0x62, 0xF2, 0x7D, 0x48, 0x50, 0xC1]), Some(M::Vpdpbusd));
        assert_eq!(mnemonic(&[0x62, 0xF2, 0x7D, 0x08, 0x53, 0xC1]), Some(M::Vpdpwssds));
        assert_eq!(mnemonic(&[0x62, 0xF2, 0x7E, 0x48, 0x52, 0xC1]), Some(M::Vdpbf16ps));
        assert_eq!(mnemonic(&[0x62, 0xF2, 0x7F, 0x48, 0x72, 0xC1]), Some(M::Vcvtne2ps2bf16));
        assert_eq!(mnemonic(&[0x62, 0xF2, 0x7E, 0x48, 0x72, 0xC1]), Some(M::Vcvtneps2bf16));
        assert_eq!(mnemonic(&[0x62, 0xF2, 0xFD, 0x48, 0x72, 0xC1]), Some(M::Vpshrdvw));
        assert_eq!(mnemonic(&[0x62, 0xF2, 0xFD, 0x48, 0x71, 0xC1]), Some(M::Vpshldvq));
    }

    #[test]
    fn test_four_iteration_forms_are_512bit_memory() {
        assert_eq!(mnemonic(&[0x62, 0xF2, 0x7F, 0x48, 0x9A, 0x08]), Some(M::V4fmaddps));
        assert_eq!(mnemonic(&[0x62, 0xF2, 0x7F, 0x48, 0x9A, 0xC1]), None);
        assert_eq!(mnemonic(&[0x62, 0xF2, 0x7F, 0x28, 0x9A, 0x08]), None);
        assert_eq!(mnemonic(&[0x62, 0xF2, 0x7F, 0x08, 0xAB, 0x08]), Some(M::V4fnmaddss));
        assert_eq!(mnemonic(&[0x62, 0xF2, 0x7F, 0x48, 0x52, 0x08]), Some(M::Vp4dpwssd));
        assert_eq!(mnemonic(&[0x62, 0xF2, 0xFD, 0x48, 0x9A, 0xC1]), Some(M::Vfmsub132pd));
    }

    #[test]
    fn test_exp2_and_28bit_approximations() {
        assert_eq!(mnemonic(&[0x62, 0xF2, 0x7D, 0x48, 0xCA, 0xC1]), Some(M::Vrcp28ps));
        assert_eq!(mnemonic(&[0x62, 0xF2, 0x7D, 0x28, 0xCA, 0xC1]), None);
        assert_eq!(mnemonic(&[0x62, 0xF2, 0xFD, 0x48, 0xC8, 0xC1]), Some(M::Vexp2pd));
        assert_eq!(mnemonic(&[0x62, 0xF2, 0x7D, 0x08, 0xCD, 0xC1]), Some(M::Vrsqrt28ss));
    }

    #[test]
    fn test_half_precision_takes_no_prefix_slot() {
        assert_eq!(mnemonic(&[0x62, 0xF3, 0x7C, 0x08, 0x27, 0xC1, 0x00]), Some(M::Vgetmantsh));
        assert_eq!(mnemonic(&[0x62, 0xF3, 0x7D, 0x08, 0x27, 0xC1, 0x00]), Some(M::Vgetmantss));
        assert_eq!(mnemonic(&[0x62, 0xF3, 0x7C, 0x08, 0x0A, 0xC1, 0x00]), Some(M::Vrndscalesh));
        assert_eq!(mnemonic(&[0x62, 0xF3, 0x7C, 0x08, 0x57, 0xC1, 0x00]), Some(M::Vreducesh));
        assert_eq!(mnemonic(&[0x62, 0xF3, 0x7C, 0x48, 0x08, 0xC1, 0x00]), Some(M::Vrndscaleph));
    }

    #[test]
    fn test_f3_mask_conversion_shares_opcode() {
        assert_eq!(mnemonic(&[0x62, 0xF2, 0x7D, 0x48, 0x38, 0xC1]), Some(M::Vpminsb));
        assert_eq!(mnemonic(&[0x62, 0xF2, 0x7E, 0x48, 0x38, 0xC1]), Some(M::Vpmovm2d));
    }
}
