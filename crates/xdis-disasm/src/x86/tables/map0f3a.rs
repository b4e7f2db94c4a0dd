//! Three-byte map `0F 3A xx` (forms with an immediate).

use xdis_core::{Element as El, Mnemonic as M};

use super::map0f::sse;
use super::ops::*;
use super::{NodeId, TableBuilder};

const INV: NodeId = NodeId::INVALID;

/// 66-prefixed forms with the same operand shape in the legacy and VEX
/// encodings: opcode, legacy operands, legacy mnemonic, VEX operands, VEX
/// mnemonic, element.
pub(super) const IMM_FORMS: [(u8, Ops, M, Ops, M, El); 19] = [
    (0x08, VWIB, M::Roundps, VWIB, M::Vroundps, El::Float32),
    (0x09, VWIB, M::Roundpd, VWIB, M::Vroundpd, El::Float64),
    (0x0A, VWSIB, M::Roundss, VHWSIB, M::Vroundss, El::Float32),
    (0x0B, VWSIB, M::Roundsd, VHWSIB, M::Vroundsd, El::Float64),
    (0x0C, VWIB, M::Blendps, VHWIB, M::Vblendps, El::Float32),
    (0x0D, VWIB, M::Blendpd, VHWIB, M::Vblendpd, El::Float64),
    (0x0E, VWIB, M::Pblendw, VHWIB, M::Vpblendw, El::Int16),
    (0x0F, VWIB, M::Palignr, VHWIB, M::Vpalignr, El::Int8),
    (0x14, EDBVIB, M::Pextrb, EDBVIB, M::Vpextrb, El::Int8),
    (0x15, EDWVIB, M::Pextrw, EDWVIB, M::Vpextrw, El::Int16),
    (0x17, EDVIB, M::Extractps, EDVIB, M::Vextractps, El::Float32),
    (0x20, VEDBIB, M::Pinsrb, VHEDBIB, M::Vpinsrb, El::Int8),
    (0x21, VWSIB, M::Insertps, VHWSIB, M::Vinsertps, El::Float32),
    (0x40, VWIB, M::Dpps, VHWIB, M::Vdpps, El::Float32),
    (0x41, VWIB, M::Dppd, VHWIB, M::Vdppd, El::Float64),
    (0x42, VWIB, M::Mpsadbw, VHWIB, M::Vmpsadbw, El::UInt8),
    (0x44, VWIB, M::Pclmulqdq, VHWIB, M::Vpclmulqdq, El::UInt64),
    (0xCE, VWIB, M::Gf2p8affineqb, VHWIB, M::Vgf2p8affineqb, El::UInt8),
    (0xCF, VWIB, M::Gf2p8affineinvqb, VHWIB, M::Vgf2p8affineinvqb, El::UInt8),
];

/// String compares, 128-bit only in both encodings.
pub(super) const PCMPSTR: [(u8, M, M); 4] = [
    (0x60, M::Pcmpestrm, M::Vpcmpestrm),
    (0x61, M::Pcmpestri, M::Vpcmpestri),
    (0x62, M::Pcmpistrm, M::Vpcmpistrm),
    (0x63, M::Pcmpistri, M::Vpcmpistri),
];

pub(super) fn build(b: &mut TableBuilder) -> [NodeId; 256] {
    let mut t = [INV; 256];

    for (op, ops, m, _, _, elem) in IMM_FORMS {
        t[op as usize] = sse(b, [None, Some((m, ops, elem)), None, None]);
    }
    t[0x0F] = sse(b, [Some((M::Palignr, PQIB, El::Int8)), Some((M::Palignr, VWIB, El::Int8)), None, None]);
    let pextrd = b.vec(M::Pextrd, EYVIB, El::Int32);
    let pextrq = b.vec(M::Pextrq, EYVIB, El::Int64);
    let pextr = b.w(pextrd, pextrq);
    t[0x16] = b.p66(pextr);
    let pinsrd = b.vec(M::Pinsrd, VEYIB, El::Int32);
    let pinsrq = b.vec(M::Pinsrq, VEYIB, El::Int64);
    let pinsr = b.w(pinsrd, pinsrq);
    t[0x22] = b.p66(pinsr);
    for (op, m, _) in PCMPSTR {
        t[op as usize] = sse(b, [None, Some((m, VWIB, El::Int8)), None, None]);
    }
    t[0xCC] = sse(b, [Some((M::Sha1rnds4, VWIB, El::UInt32)), None, None, None]);
    t[0xDF] = sse(b, [None, Some((M::Aeskeygenassist, VWIB, El::UInt128)), None, None]);

    t
}
