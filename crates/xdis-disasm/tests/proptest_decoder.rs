//! Property-based tests for the x86 decoder.
//!
//! These tests verify invariants that hold for every input:
//! - Decoding never panics and never reads past the buffer
//! - Decoded length is within the architectural bounds
//! - Invalid records and reported errors agree
//! - Deterministic decoding (same input → same output)
//! - Every opcode of every map resolves to a handler or the Invalid leaf

use proptest::prelude::*;

use xdis_core::{Bitness, MemorySize, Operand, Register};
use xdis_disasm::x86::{tables, Map};
use xdis_disasm::{Decoder, DecoderOptions, Disassembler, X86Disassembler, MAX_INSTRUCTION_LENGTH};

fn bitness() -> impl Strategy<Value = Bitness> {
    prop_oneof![Just(Bitness::Bits16), Just(Bitness::Bits32), Just(Bitness::Bits64)]
}

/// Prepends the escape bytes that select `map` in front of `opcode`.
/// `fields` fills the free payload bits of the VEX/XOP/EVEX prefix.
fn encode_in_map(map: Map, fields: u8, opcode: u8, tail: &[u8]) -> Vec<u8> {
    let mut bytes = match map {
        Map::Legacy => vec![],
        Map::M0F => vec![0x0F],
        Map::M0F38 => vec![0x0F, 0x38],
        Map::M0F3A => vec![0x0F, 0x3A],
        Map::Vex0F => vec![0xC4, 0xE1, fields],
        Map::Vex0F38 => vec![0xC4, 0xE2, fields],
        Map::Vex0F3A => vec![0xC4, 0xE3, fields],
        Map::Xop8 => vec![0x8F, 0xE8, fields],
        Map::Xop9 => vec![0x8F, 0xE9, fields],
        Map::XopA => vec![0x8F, 0xEA, fields],
        Map::Evex0F => vec![0x62, 0xF1, fields | 0x04, fields.rotate_left(3) | 0x08],
        Map::Evex0F38 => vec![0x62, 0xF2, fields | 0x04, fields.rotate_left(3) | 0x08],
        Map::Evex0F3A => vec![0x62, 0xF3, fields | 0x04, fields.rotate_left(3) | 0x08],
    };
    bytes.push(opcode);
    bytes.extend_from_slice(tail);
    bytes
}

#[test]
fn tables_are_total() {
    assert!(tables().is_total());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(10000))]

    /// Decoding arbitrary bytes never panics and the length stays in bounds.
    #[test]
    fn decode_length_is_bounded(
        bytes in prop::collection::vec(any::<u8>(), 0..32),
        bitness in bitness(),
    ) {
        let inst = xdis_disasm::decode(&bytes, 0, bitness, DecoderOptions::new());
        if bytes.is_empty() {
            prop_assert_eq!(inst.length, 0);
        } else {
            prop_assert!(inst.length >= 1, "length must be at least 1");
            prop_assert!(inst.length <= MAX_INSTRUCTION_LENGTH, "length must be at most 15");
            prop_assert!(inst.length <= bytes.len(), "length cannot exceed the input");
        }
        prop_assert_eq!(inst.bytes.as_slice(), &bytes[..inst.length]);
    }

    /// The error is reported exactly when the record is the Invalid sentinel.
    #[test]
    fn error_matches_invalid(bytes in prop::collection::vec(any::<u8>(), 1..32), bitness in bitness()) {
        let disasm = X86Disassembler::new(bitness);
        let decoded = disasm.decode_instruction(&bytes, 0x1000);
        prop_assert_eq!(decoded.instruction.is_invalid(), decoded.error.is_some());
        prop_assert_eq!(decoded.size, decoded.instruction.length);
    }

    /// Decoding is deterministic: same input always produces same output.
    #[test]
    fn decode_is_deterministic(bytes in prop::collection::vec(any::<u8>(), 1..32), bitness in bitness()) {
        let disasm = X86Disassembler::new(bitness);
        let first = disasm.decode_instruction(&bytes, 0x1000);
        let second = disasm.decode_instruction(&bytes, 0x1000);
        prop_assert_eq!(&first.instruction, &second.instruction);
        prop_assert_eq!(first.error, second.error);
    }

    /// Decoded instructions carry the address they were decoded at.
    #[test]
    fn decoded_address_matches(
        bytes in prop::collection::vec(any::<u8>(), 1..32),
        addr in 0x1000u64..0xFFFF_FFFF_FFFF_0000u64
    ) {
        let disasm = X86Disassembler::new(Bitness::Bits64);
        let decoded = disasm.decode_instruction(&bytes, addr);
        prop_assert_eq!(decoded.instruction.address, addr);
    }

    /// Sequential decoding covers all bytes with no gaps or overlaps.
    #[test]
    fn sequential_decode_covers_all_bytes(
        bytes in prop::collection::vec(any::<u8>(), 16..128),
        bitness in bitness(),
    ) {
        let decoder = Decoder::new(bitness, &bytes, DecoderOptions::new());
        let mut offset = 0;
        for inst in decoder {
            prop_assert!(inst.length > 0, "decoded length must be positive");
            prop_assert_eq!(inst.bytes.as_slice(), &bytes[offset..offset + inst.length]);
            offset += inst.length;
        }
        prop_assert_eq!(offset, bytes.len());
    }

    /// Every opcode of every map reaches a handler or the Invalid leaf.
    #[test]
    fn every_map_resolves(
        map_index in 0..Map::ALL.len(),
        fields in any::<u8>(),
        opcode in any::<u8>(),
        tail in prop::collection::vec(any::<u8>(), 0..12),
        bitness in bitness(),
    ) {
        let bytes = encode_in_map(Map::ALL[map_index], fields, opcode, &tail);
        let inst = xdis_disasm::decode(&bytes, 0, bitness, DecoderOptions::new());
        prop_assert!(inst.length >= 1 && inst.length <= bytes.len());
    }
}

// =============================================================================
// Operand shape properties
// =============================================================================

/// `Ev,Gv` forms: the r/m operand comes first.
const EV_GV: [u8; 8] = [0x01, 0x09, 0x11, 0x19, 0x21, 0x29, 0x31, 0x89];
/// `Gv,Ev` forms: the r/m operand comes second.
const GV_EV: [u8; 8] = [0x03, 0x0B, 0x13, 0x1B, 0x23, 0x2B, 0x33, 0x8B];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    /// mod == 3 gives a register operand and mod != 3 a memory operand of the
    /// declared size.
    #[test]
    fn modrm_kind_is_consistent(
        which in 0usize..16,
        modrm in any::<u8>(),
        tail in prop::array::uniform6(any::<u8>()),
        p66 in any::<bool>(),
    ) {
        let (opcode, rm_slot) = if which < 8 { (EV_GV[which], 0) } else { (GV_EV[which - 8], 1) };
        let mut bytes = Vec::new();
        if p66 {
            bytes.push(0x66);
        }
        bytes.extend_from_slice(&[opcode, modrm]);
        bytes.extend_from_slice(&tail);

        let inst = xdis_disasm::decode(&bytes, 0, Bitness::Bits32, DecoderOptions::new());
        prop_assert!(!inst.is_invalid());
        let expected = if p66 { MemorySize::UInt16 } else { MemorySize::UInt32 };
        match &inst.operands[rm_slot] {
            Operand::Register(reg) => prop_assert_eq!(modrm >> 6, 3, "register form for {:?}", reg),
            Operand::Memory(mem) => {
                prop_assert_ne!(modrm >> 6, 3);
                prop_assert_eq!(mem.size, expected);
            }
            other => prop_assert!(false, "unexpected operand {:?}", other),
        }
    }

    /// REX.B extends the r/m register of a register-form instruction.
    #[test]
    fn rex_b_extends_rm(rm in 0u8..8, reg in 0u8..8) {
        let modrm = 0xC0 | (reg << 3) | rm;
        let inst = xdis_disasm::decode(&[0x49, 0x89, modrm], 0, Bitness::Bits64, DecoderOptions::new());
        let expected = Register::new(xdis_core::RegisterClass::Gpr64, rm + 8);
        prop_assert_eq!(&inst.operands[0], &Operand::reg(expected));
    }
}

// =============================================================================
// Escape handling
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Legacy prefixes in front of a VEX/XOP/EVEX escape make it invalid.
    #[test]
    fn prefix_before_vex_is_invalid(
        prefix in prop::sample::select(vec![0x66u8, 0xF0, 0xF2, 0xF3, 0x48]),
        escape in prop::sample::select(vec![0xC5u8, 0xC4, 0x62]),
        payload in prop::array::uniform5(any::<u8>()),
    ) {
        let mut bytes = vec![prefix, escape];
        bytes.extend_from_slice(&payload);
        bytes[2] |= 0xC0;
        let inst = xdis_disasm::decode(&bytes, 0, Bitness::Bits64, DecoderOptions::new());
        prop_assert!(inst.is_invalid());
    }

    /// Strings of redundant prefixes never produce an instruction longer than 15 bytes.
    #[test]
    fn prefix_run_hits_length_limit(count in 1usize..20, prefix in prop::sample::select(vec![0x26u8, 0x2E, 0x66, 0x67])) {
        let mut bytes = vec![prefix; count];
        bytes.push(0x90);
        let inst = xdis_disasm::decode(&bytes, 0, Bitness::Bits32, DecoderOptions::new());
        if count < MAX_INSTRUCTION_LENGTH {
            prop_assert!(!inst.is_invalid());
            prop_assert_eq!(inst.length, count + 1);
        } else {
            prop_assert!(inst.is_invalid());
            prop_assert!(inst.length <= MAX_INSTRUCTION_LENGTH);
        }
    }
}
