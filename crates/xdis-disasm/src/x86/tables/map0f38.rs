//! Three-byte map `0F 38 xx` (SSSE3, SSE4, SHA, AES, GFNI and GPR extensions).

use xdis_core::{Element as El, Mnemonic as M};

use super::map0f::sse;
use super::ops::*;
use super::{NodeId, TableBuilder};
use crate::x86::handlers::Handler as H;

const INV: NodeId = NodeId::INVALID;

/// SSSE3 forms with both an MMX and an SSE encoding.
pub(super) const SSSE3: [(u8, M, M, El); 15] = [
    (0x00, M::Pshufb, M::Vpshufb, El::Int8),
    (0x01, M::Phaddw, M::Vphaddw, El::Int16),
    (0x02, M::Phaddd, M::Vphaddd, El::Int32),
    (0x03, M::Phaddsw, M::Vphaddsw, El::Int16),
    (0x04, M::Pmaddubsw, M::Vpmaddubsw, El::Int16),
    (0x05, M::Phsubw, M::Vphsubw, El::Int16),
    (0x06, M::Phsubd, M::Vphsubd, El::Int32),
    (0x07, M::Phsubsw, M::Vphsubsw, El::Int16),
    (0x08, M::Psignb, M::Vpsignb, El::Int8),
    (0x09, M::Psignw, M::Vpsignw, El::Int16),
    (0x0A, M::Psignd, M::Vpsignd, El::Int32),
    (0x0B, M::Pmulhrsw, M::Vpmulhrsw, El::Int16),
    (0x1C, M::Pabsb, M::Vpabsb, El::Int8),
    (0x1D, M::Pabsw, M::Vpabsw, El::Int16),
    (0x1E, M::Pabsd, M::Vpabsd, El::Int32),
];

/// SSE4.1 two-operand-plus-destination forms (66 only).
pub(super) const SSE41: [(u8, M, M, El); 18] = [
    (0x28, M::Pmuldq, M::Vpmuldq, El::Int32),
    (0x29, M::Pcmpeqq, M::Vpcmpeqq, El::Int64),
    (0x2B, M::Packusdw, M::Vpackusdw, El::Int32),
    (0x37, M::Pcmpgtq, M::Vpcmpgtq, El::Int64),
    (0x38, M::Pminsb, M::Vpminsb, El::Int8),
    (0x39, M::Pminsd, M::Vpminsd, El::Int32),
    (0x3A, M::Pminuw, M::Vpminuw, El::UInt16),
    (0x3B, M::Pminud, M::Vpminud, El::UInt32),
    (0x3C, M::Pmaxsb, M::Vpmaxsb, El::Int8),
    (0x3D, M::Pmaxsd, M::Vpmaxsd, El::Int32),
    (0x3E, M::Pmaxuw, M::Vpmaxuw, El::UInt16),
    (0x3F, M::Pmaxud, M::Vpmaxud, El::UInt32),
    (0x40, M::Pmulld, M::Vpmulld, El::Int32),
    (0xDC, M::Aesenc, M::Vaesenc, El::UInt128),
    (0xDD, M::Aesenclast, M::Vaesenclast, El::UInt128),
    (0xDE, M::Aesdec, M::Vaesdec, El::UInt128),
    (0xDF, M::Aesdeclast, M::Vaesdeclast, El::UInt128),
    (0xCF, M::Gf2p8mulb, M::Vgf2p8mulb, El::UInt8),
];

/// Sign and zero extensions: opcode, legacy and VEX mnemonics, source
/// element, operand list.
pub(super) const PMOVX: [(u8, M, M, El, Ops); 12] = [
    (0x20, M::Pmovsxbw, M::Vpmovsxbw, El::Int8, VWHALF),
    (0x21, M::Pmovsxbd, M::Vpmovsxbd, El::Int8, VWQTR),
    (0x22, M::Pmovsxbq, M::Vpmovsxbq, El::Int8, VWEIGHTH),
    (0x23, M::Pmovsxwd, M::Vpmovsxwd, El::Int16, VWHALF),
    (0x24, M::Pmovsxwq, M::Vpmovsxwq, El::Int16, VWQTR),
    (0x25, M::Pmovsxdq, M::Vpmovsxdq, El::Int32, VWHALF),
    (0x30, M::Pmovzxbw, M::Vpmovzxbw, El::UInt8, VWHALF),
    (0x31, M::Pmovzxbd, M::Vpmovzxbd, El::UInt8, VWQTR),
    (0x32, M::Pmovzxbq, M::Vpmovzxbq, El::UInt8, VWEIGHTH),
    (0x33, M::Pmovzxwd, M::Vpmovzxwd, El::UInt16, VWHALF),
    (0x34, M::Pmovzxwq, M::Vpmovzxwq, El::UInt16, VWQTR),
    (0x35, M::Pmovzxdq, M::Vpmovzxdq, El::UInt32, VWHALF),
];

fn p66(b: &mut TableBuilder, m: M, ops: Ops, elem: El) -> NodeId {
    sse(b, [None, Some((m, ops, elem)), None, None])
}

fn pnone(b: &mut TableBuilder, m: M, ops: Ops, elem: El) -> NodeId {
    sse(b, [Some((m, ops, elem)), None, None, None])
}

pub(super) fn build(b: &mut TableBuilder) -> [NodeId; 256] {
    let mut t = [INV; 256];

    for (op, m, _, elem) in SSSE3 {
        t[op as usize] = sse(b, [Some((m, PQ, elem)), Some((m, VW, elem)), None, None]);
    }
    for (op, m, _, elem) in SSE41 {
        t[op as usize] = p66(b, m, VW, elem);
    }
    for (op, m, _, elem, ops) in PMOVX {
        t[op as usize] = p66(b, m, ops, elem);
    }
    t[0x10] = p66(b, M::Pblendvb, VW0, El::Int8);
    t[0x14] = p66(b, M::Blendvps, VW0, El::Float32);
    t[0x15] = p66(b, M::Blendvpd, VW0, El::Float64);
    t[0x17] = p66(b, M::Ptest, VW, El::Int32);
    t[0x2A] = p66(b, M::Movntdqa, VM, El::Int32);
    t[0x41] = p66(b, M::Phminposuw, VW, El::UInt16);
    t[0x80] = p66(b, M::Invept, GMODEMX, El::UInt128);
    t[0x81] = p66(b, M::Invvpid, GMODEMX, El::UInt128);
    t[0x82] = p66(b, M::Invpcid, GMODEMX, El::UInt128);

    // SHA
    t[0xC8] = pnone(b, M::Sha1nexte, VW, El::UInt32);
    t[0xC9] = pnone(b, M::Sha1msg1, VW, El::UInt32);
    t[0xCA] = pnone(b, M::Sha1msg2, VW, El::UInt32);
    t[0xCB] = pnone(b, M::Sha256rnds2, VW0, El::UInt32);
    t[0xCC] = pnone(b, M::Sha256msg1, VW, El::UInt32);
    t[0xCD] = pnone(b, M::Sha256msg2, VW, El::UInt32);
    t[0xDB] = p66(b, M::Aesimc, VW, El::UInt128);

    // MOVBE and CRC32 share F0/F1; 66 stays an operand-size prefix.
    let movbe_load = b.leaf(H::Movbe { to_mem: false });
    let movbe_store = b.leaf(H::Movbe { to_mem: true });
    let crc32_b = b.leaf(H::Crc32 { byte: true });
    let crc32_v = b.leaf(H::Crc32 { byte: false });
    t[0xF0] = b.mp([movbe_load, movbe_load, INV, crc32_b]);
    t[0xF1] = b.mp([movbe_store, movbe_store, INV, crc32_v]);

    let wrussd = b.vec(M::Wrussd, MEYGY, El::UInt32);
    let wrussq = b.vec(M::Wrussq, MEYGY, El::UInt64);
    let wruss = b.w(wrussd, wrussq);
    t[0xF5] = b.p66(wruss);
    let wrssd = b.vec(M::Wrssd, MEYGY, El::UInt32);
    let wrssq = b.vec(M::Wrssq, MEYGY, El::UInt64);
    let wrss = b.w(wrssd, wrssq);
    let adcx = b.vec(M::Adcx, GYEY, El::UInt32);
    let adox = b.vec(M::Adox, GYEY, El::UInt32);
    t[0xF6] = b.mp([wrss, adcx, adox, INV]);
    t[0xF8] = sse(
        b,
        [
            None,
            Some((M::Movdir64b, GMODEM512, El::UInt8)),
            Some((M::Enqcmds, GMODEM512, El::UInt8)),
            Some((M::Enqcmd, GMODEM512, El::UInt8)),
        ],
    );
    t[0xF9] = pnone(b, M::Movdiri, MEYGY, El::UInt32);
    t[0xFC] = sse(
        b,
        [
            Some((M::Aadd, MEYGY, El::UInt32)),
            Some((M::Aand, MEYGY, El::UInt32)),
            Some((M::Axor, MEYGY, El::UInt32)),
            Some((M::Aor, MEYGY, El::UInt32)),
        ],
    );

    t
}

#[cfg(test)]
mod tests {
    use super::super::resolve;
    use super::*;
    use crate::options::DecoderOptions;
    use crate::x86::context::DecodeContext;
    use xdis_core::Bitness;

    fn lookup(bytes: &[u8]) -> Option<H> {
        let mut cx = DecodeContext::new(bytes, 0, 0, Bitness::Bits64, DecoderOptions::new());
        let (map, opcode) = crate::x86::prefix::scan(&mut cx.cursor, &mut cx.state).ok()?;
        resolve(&mut cx, map, opcode).ok().map(|(h, _)| h)
    }

    #[test]
    fn test_movbe_and_crc32_share_opcodes() {
        assert_eq!(lookup(&[0x0F, 0x38, 0xF0, 0x00]), Some(H::Movbe { to_mem: false }));
        assert_eq!(lookup(&[0x66, 0x0F, 0x38, 0xF1, 0x00]), Some(H::Movbe { to_mem: true }));
        assert_eq!(lookup(&[0xF2, 0x0F, 0x38, 0xF0, 0xC1]), Some(H::Crc32 { byte: true }));
        assert_eq!(lookup(&[0xF3, 0x0F, 0x38, 0xF0, 0xC1]), None);
    }

    #[test]
    fn test_sse41_needs_66() {
        assert!(matches!(
            lookup(&[0x66, 0x0F, 0x38, 0x40, 0xC1]),
            Some(H::Vector { m: M::Pmulld, .. })
        ));
        assert_eq!(lookup(&[0x0F, 0x38, 0x40, 0xC1]), None);
    }

    #[test]
    fn test_atomic_memory_ops_split_on_prefix() {
        assert!(matches!(lookup(&[0x0F, 0x38, 0xFC, 0x08]), Some(H::Vector { m: M::Aadd, .. })));
        assert!(matches!(lookup(&[0x66, 0x0F, 0x38, 0xFC, 0x08]), Some(H::Vector { m: M::Aand, .. })));
        assert!(matches!(lookup(&[0xF2, 0x0F, 0x38, 0xFC, 0x08]), Some(H::Vector { m: M::Aor, .. })));
        assert!(matches!(lookup(&[0xF3, 0x0F, 0x38, 0xFC, 0x08]), Some(H::Vector { m: M::Axor, .. })));
    }

    #[test]
    fn test_adcx_adox() {
        assert!(matches!(lookup(&[0x66, 0x0F, 0x38, 0xF6, 0xC1]), Some(H::Vector { m: M::Adcx, .. })));
        assert!(matches!(lookup(&[0xF3, 0x0F, 0x38, 0xF6, 0xC1]), Some(H::Vector { m: M::Adox, .. })));
    }
}
