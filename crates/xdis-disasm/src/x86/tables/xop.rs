//! AMD XOP maps 8, 9 and A.
//!
//! XOP.pp must be zero, so every root entry is wrapped in a no-prefix node.

use xdis_core::{Element as El, Mnemonic as M};

use super::map0f::group;
use super::ops::*;
use super::{NodeId, TableBuilder};

const INV: NodeId = NodeId::INVALID;

/// Multiply-accumulate forms, all `xmm, xmm, xmm/m128, xmm(is4)`.
const MACS: [(u8, M, El); 12] = [
    (0x85, M::Vpmacssww, El::Int16),
    (0x86, M::Vpmacsswd, El::Int16),
    (0x87, M::Vpmacssdql, El::Int32),
    (0x8E, M::Vpmacssdd, El::Int32),
    (0x8F, M::Vpmacssdqh, El::Int32),
    (0x95, M::Vpmacsww, El::Int16),
    (0x96, M::Vpmacswd, El::Int16),
    (0x97, M::Vpmacsdql, El::Int32),
    (0x9E, M::Vpmacsdd, El::Int32),
    (0x9F, M::Vpmacsdqh, El::Int32),
    (0xA6, M::Vpmadcsswd, El::Int16),
    (0xB6, M::Vpmadcswd, El::Int16),
];

const COMPARES: [(u8, M, El); 8] = [
    (0xCC, M::Vpcomb, El::Int8),
    (0xCD, M::Vpcomw, El::Int16),
    (0xCE, M::Vpcomd, El::Int32),
    (0xCF, M::Vpcomq, El::Int64),
    (0xEC, M::Vpcomub, El::UInt8),
    (0xED, M::Vpcomuw, El::UInt16),
    (0xEE, M::Vpcomud, El::UInt32),
    (0xEF, M::Vpcomuq, El::UInt64),
];

/// Variable rotates and shifts; W selects which operand is the count.
const SHIFTS: [(u8, M, El); 12] = [
    (0x90, M::Vprotb, El::Int8),
    (0x91, M::Vprotw, El::Int16),
    (0x92, M::Vprotd, El::Int32),
    (0x93, M::Vprotq, El::Int64),
    (0x94, M::Vpshlb, El::Int8),
    (0x95, M::Vpshlw, El::Int16),
    (0x96, M::Vpshld, El::Int32),
    (0x97, M::Vpshlq, El::Int64),
    (0x98, M::Vpshab, El::Int8),
    (0x99, M::Vpshaw, El::Int16),
    (0x9A, M::Vpshad, El::Int32),
    (0x9B, M::Vpshaq, El::Int64),
];

const HORIZONTAL: [(u8, M, El); 15] = [
    (0xC1, M::Vphaddbw, El::Int8),
    (0xC2, M::Vphaddbd, El::Int8),
    (0xC3, M::Vphaddbq, El::Int8),
    (0xC6, M::Vphaddwd, El::Int16),
    (0xC7, M::Vphaddwq, El::Int16),
    (0xCB, M::Vphadddq, El::Int32),
    (0xD1, M::Vphaddubw, El::UInt8),
    (0xD2, M::Vphaddubd, El::UInt8),
    (0xD3, M::Vphaddubq, El::UInt8),
    (0xD6, M::Vphadduwd, El::UInt16),
    (0xD7, M::Vphadduwq, El::UInt16),
    (0xDB, M::Vphaddudq, El::UInt32),
    (0xE1, M::Vphsubbw, El::Int8),
    (0xE2, M::Vphsubwd, El::Int16),
    (0xE3, M::Vphsubdq, El::Int32),
];

/// 128-bit, W0 form without a prefix.
fn x_w0(b: &mut TableBuilder, m: M, ops: Ops, elem: El) -> NodeId {
    let leaf = b.vec(m, ops, elem);
    let node = b.w0(leaf);
    let node = b.l0(node);
    b.pnone(node)
}

/// Wraps a finished node in the L0 and no-prefix checks.
fn l0_none(b: &mut TableBuilder, node: NodeId) -> NodeId {
    let node = b.l0(node);
    b.pnone(node)
}

pub(super) fn build_8(b: &mut TableBuilder) -> [NodeId; 256] {
    let mut t = [INV; 256];

    for (op, m, elem) in MACS {
        t[op as usize] = x_w0(b, m, VHWIS4_X, elem);
    }
    let w0 = b.vec(M::Vpcmov, VHWIS4, El::UInt64);
    let w1 = b.vec(M::Vpcmov, VHIS4W, El::UInt64);
    let node = b.w(w0, w1);
    let node = b.l01(node);
    t[0xA2] = b.pnone(node);
    let w0 = b.vec(M::Vpperm, VHWIS4_X, El::UInt8);
    let w1 = b.vec(M::Vpperm, VHIS4W_X, El::UInt8);
    let node = b.w(w0, w1);
    t[0xA3] = l0_none(b, node);
    for (op, m, elem) in [
        (0xC0, M::Vprotb, El::Int8),
        (0xC1, M::Vprotw, El::Int16),
        (0xC2, M::Vprotd, El::Int32),
        (0xC3, M::Vprotq, El::Int64),
    ] {
        t[op] = x_w0(b, m, VWXIB_X, elem);
    }
    for (op, m, elem) in COMPARES {
        t[op as usize] = x_w0(b, m, VHWXIB_X, elem);
    }

    t
}

pub(super) fn build_9(b: &mut TableBuilder) -> [NodeId; 256] {
    let mut t = [INV; 256];

    // TBM
    let tbm = |b: &mut TableBuilder, entries: &[(usize, M)]| {
        let mut g = Vec::with_capacity(entries.len());
        for &(reg, m) in entries {
            g.push((reg, b.vec(m, BYEY, El::UInt32)));
        }
        let g = group(b, &g);
        l0_none(b, g)
    };
    t[0x01] = tbm(
        b,
        &[
            (1, M::Blcfill),
            (2, M::Blsfill),
            (3, M::Blcs),
            (4, M::Tzmsk),
            (5, M::Blcic),
            (6, M::Blsic),
            (7, M::T1mskc),
        ],
    );
    t[0x02] = tbm(b, &[(1, M::Blcmsk), (6, M::Blci)]);

    // LWP control
    let llwpcb = b.vec(M::Llwpcb, RY, El::UInt32);
    let slwpcb = b.vec(M::Slwpcb, RY, El::UInt32);
    let g = group(b, &[(0, llwpcb), (1, slwpcb)]);
    let g = b.reg(g);
    t[0x12] = l0_none(b, g);

    let node = b.vec(M::Vfrczps, VW, El::Float32);
    let node = b.w0(node);
    let node = b.l01(node);
    t[0x80] = b.pnone(node);
    let node = b.vec(M::Vfrczpd, VW, El::Float64);
    let node = b.w0(node);
    let node = b.l01(node);
    t[0x81] = b.pnone(node);
    t[0x82] = x_w0(b, M::Vfrczss, VWS, El::Float32);
    t[0x83] = x_w0(b, M::Vfrczsd, VWS, El::Float64);

    for (op, m, elem) in SHIFTS {
        let w0 = b.vec(m, VWH_X, elem);
        let w1 = b.vec(m, VHWX_X, elem);
        let node = b.w(w0, w1);
        t[op as usize] = l0_none(b, node);
    }
    for (op, m, elem) in HORIZONTAL {
        t[op as usize] = x_w0(b, m, VWX_X, elem);
    }

    t
}

pub(super) fn build_a(b: &mut TableBuilder) -> [NodeId; 256] {
    let mut t = [INV; 256];

    let bextr = b.vec(M::Bextr, GYEYID, El::UInt32);
    t[0x10] = l0_none(b, bextr);
    let lwpins = b.vec(M::Lwpins, BYEDID, El::UInt32);
    let lwpval = b.vec(M::Lwpval, BYEDID, El::UInt32);
    let g = group(b, &[(0, lwpins), (1, lwpval)]);
    t[0x12] = l0_none(b, g);

    t
}
