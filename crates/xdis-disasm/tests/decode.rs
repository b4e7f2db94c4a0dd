//! Concrete decodes across the encodings and decoder options.

use xdis_core::{
    Bitness, ControlFlow, EncodingKind, ImmediateKind, Instruction, MemorySize, Mnemonic, Operand, Register,
    RoundingControl,
};
use xdis_disasm::{decode, DecodeError, Decoder, DecoderOptions};

fn decode32(bytes: &[u8]) -> Instruction {
    decode(bytes, 0, Bitness::Bits32, DecoderOptions::new())
}

fn decode64(bytes: &[u8]) -> Instruction {
    decode(bytes, 0, Bitness::Bits64, DecoderOptions::new())
}

fn with_options(bitness: Bitness, bytes: &[u8], options: DecoderOptions) -> Instruction {
    decode(bytes, 0, bitness, options)
}

/// Routes decoder traces to the test output; filter with `RUST_LOG`.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

// =============================================================================
// Legacy encodings
// =============================================================================

#[test]
fn test_operand_size_toggle() {
    let inst = decode32(&[0x01, 0xC0]);
    assert_eq!(inst.mnemonic, Mnemonic::Add);
    assert_eq!(inst.operands, [Operand::reg(Register::EAX), Operand::reg(Register::EAX)]);

    let inst = decode32(&[0x66, 0x01, 0xC0]);
    assert_eq!(inst.mnemonic, Mnemonic::Add);
    assert_eq!(inst.operands, [Operand::reg(Register::AX), Operand::reg(Register::AX)]);
    assert_eq!(inst.length, 3);
}

#[test]
fn test_operand_size_selects_form() {
    let forms: Vec<String> = [&[0x66, 0x01, 0xC0][..], &[0x01, 0xC0], &[0x48, 0x01, 0xC0]]
        .iter()
        .map(|bytes| decode64(bytes).form().to_string())
        .collect();
    assert_eq!(forms, ["add r16, r16", "add r32, r32", "add r64, r64"]);

    let inst = decode64(&[0x48, 0x01, 0xC8]);
    assert_eq!(inst.form(), decode64(&[0x48, 0x01, 0xC0]).form());
    let inst = decode64(&[0x48, 0x01, 0x08]);
    assert_eq!(inst.form().to_string(), "add m64, r64");
}

#[test]
fn test_sign_extended_immediate() {
    let inst = decode32(&[0x83, 0xC0, 0x05]);
    assert_eq!(inst.mnemonic, Mnemonic::Add);
    assert_eq!(inst.operands[0], Operand::reg(Register::EAX));
    assert_eq!(inst.operands[1], Operand::imm(5, ImmediateKind::Imm8to32));

    let inst = decode32(&[0x83, 0xC0, 0xFF]);
    assert_eq!(inst.operands[1].immediate().map(|imm| imm.as_i64()), Some(-1));
}

#[test]
fn test_multibyte_nop_memory_form() {
    let inst = decode32(&[0x0F, 0x1F, 0x00]);
    assert_eq!(inst.mnemonic, Mnemonic::Nop);
    let mem = inst.memory_operand().expect("memory operand");
    assert_eq!(mem.base, Some(Register::EAX));
    assert_eq!(mem.index, None);
    assert_eq!(mem.displacement, 0);
    assert_eq!(mem.displacement_size, 0);
}

#[test]
fn test_memory_only_form_rejects_register() {
    // LSS Gv,Mp with mod=3
    let inst = decode32(&[0x0F, 0xB2, 0xC0]);
    assert!(inst.is_invalid());
    assert!(inst.length >= 3);
    let inst = decode32(&[0x8D, 0xC0]);
    assert!(inst.is_invalid());
}

#[test]
fn test_les_register_form_is_vex_outside_64bit() {
    // C4 with mod=3 in the next byte starts a VEX prefix instead of LES.
    let inst = decode32(&[0xC4, 0xE2, 0x7D, 0x18, 0x07]);
    assert_eq!(inst.mnemonic, Mnemonic::Vbroadcastss);
    assert_eq!(inst.encoding, EncodingKind::Vex);
    let inst = decode32(&[0xC4, 0x07]);
    assert_eq!(inst.mnemonic, Mnemonic::Les);
}

#[test]
fn test_mode_gating() {
    for bytes in [&[0x37][..], &[0x27], &[0xD4, 0x0A], &[0x06], &[0x60], &[0xCE]] {
        assert!(decode64(bytes).is_invalid(), "{bytes:02x?} should be invalid in 64-bit mode");
        assert!(!decode32(bytes).is_invalid(), "{bytes:02x?} should decode in 32-bit mode");
    }
    assert_eq!(decode32(&[0x63, 0xC1]).mnemonic, Mnemonic::Arpl);
    assert_eq!(decode64(&[0x48, 0x63, 0xC1]).mnemonic, Mnemonic::Movsxd);
}

#[test]
fn test_rip_relative() {
    let inst = decode64(&[0x48, 0x8B, 0x05, 0x10, 0x00, 0x00, 0x00]);
    let mem = inst.memory_operand().expect("memory operand");
    assert_eq!(mem.base, Some(Register::RIP));
    assert_eq!(mem.ip_relative_target(inst.next_ip()), Some(0x17));
}

#[test]
fn test_high_byte_registers_need_no_rex() {
    // mov ah, bh / mov spl, dil
    let inst = decode64(&[0x88, 0xFC]);
    assert_eq!(inst.operands[0].register().map(|r| r.name()), Some("ah"));
    let inst = decode64(&[0x40, 0x88, 0xFC]);
    assert_eq!(inst.operands[0].register().map(|r| r.name()), Some("spl"));
}

#[test]
fn test_x87() {
    let inst = decode32(&[0xD9, 0xC9]);
    assert_eq!(inst.mnemonic, Mnemonic::Fxch);
    let inst = decode32(&[0xDD, 0x00]);
    assert_eq!(inst.mnemonic, Mnemonic::Fld);
    assert_eq!(inst.memory_operand().map(|m| m.size), Some(MemorySize::Float64));
}

// =============================================================================
// Branches
// =============================================================================

#[test]
fn test_branch_targets() {
    let mut decoder = Decoder::new(Bitness::Bits32, &[0xE8, 0xFB, 0xFF, 0xFF, 0xFF], DecoderOptions::new());
    decoder.set_ip(0x1000);
    let inst = decoder.decode();
    assert_eq!(inst.near_branch_target(), Some(0x1000));
    assert!(matches!(inst.control_flow, ControlFlow::Call { target: 0x1000, return_addr: 0x1005 }));

    let mut decoder = Decoder::new(Bitness::Bits64, &[0xEB, 0x80], DecoderOptions::new());
    decoder.set_ip(0x1000);
    assert_eq!(decoder.decode().near_branch_target(), Some(0x1000 + 2 - 0x80));
}

#[test]
fn test_rel16_branch_truncates() {
    let mut decoder = Decoder::new(Bitness::Bits32, &[0x66, 0xE9, 0x00, 0x10], DecoderOptions::new());
    decoder.set_ip(0xFFFF_F000);
    let inst = decoder.decode();
    assert_eq!(inst.mnemonic, Mnemonic::Jmp);
    assert_eq!(inst.near_branch_target(), Some((0xFFFF_F004u64 + 0x1000) & 0xFFFF));
}

#[test]
fn test_64bit_branch_ignores_66_unless_amd() {
    let bytes = [0x66, 0xE8, 0x00, 0x00, 0x00, 0x00];
    assert_eq!(decode64(&bytes).length, 6);
    let amd = with_options(Bitness::Bits64, &bytes, DecoderOptions::new().with_amd(true));
    assert_eq!(amd.length, 4);
}

// =============================================================================
// VEX, XOP and EVEX
// =============================================================================

#[test]
fn test_vzeroupper() {
    let inst = decode64(&[0xC5, 0xF8, 0x77]);
    assert_eq!(inst.mnemonic, Mnemonic::Vzeroupper);
    assert_eq!(inst.encoding, EncodingKind::Vex);
    assert!(inst.operands.is_empty());
}

#[test]
fn test_vex_vaddps_ymm() {
    let inst = decode64(&[0xC5, 0xFC, 0x58, 0xC1]);
    assert_eq!(inst.mnemonic, Mnemonic::Vaddps);
    assert_eq!(
        inst.operands,
        [Operand::reg(Register::ymm(0)), Operand::reg(Register::ymm(0)), Operand::reg(Register::ymm(1))]
    );
}

#[test]
fn test_evex_vaddps_zmm() {
    let inst = decode64(&[0x62, 0xF1, 0x7C, 0x48, 0x58, 0xC1]);
    assert_eq!(inst.mnemonic, Mnemonic::Vaddps);
    assert_eq!(inst.encoding, EncodingKind::Evex);
    assert_eq!(inst.length, 6);
    assert_eq!(
        inst.operands,
        [Operand::reg(Register::zmm(0)), Operand::reg(Register::zmm(0)), Operand::reg(Register::zmm(1))]
    );
    assert_eq!(inst.op_mask, None);
    assert!(!inst.zeroing_masking);
}

#[test]
fn test_evex_compressed_disp8() {
    // vaddps zmm0, zmm0, [rax+0x40]
    let inst = decode64(&[0x62, 0xF1, 0x7C, 0x48, 0x58, 0x40, 0x01]);
    let mem = inst.memory_operand().expect("memory operand");
    assert_eq!(mem.displacement, 64);
    assert_eq!(mem.displacement_size, 1);
    // {1to16} broadcast scales by the element size instead.
    let inst = decode64(&[0x62, 0xF1, 0x7C, 0x58, 0x58, 0x40, 0x01]);
    let mem = inst.memory_operand().expect("memory operand");
    assert_eq!(mem.displacement, 4);
    assert!(mem.size.is_broadcast());
}

#[test]
fn test_evex_mask_and_rounding() {
    // vaddps zmm0{k1}{z}, zmm0, zmm1, {rz-sae}
    let inst = decode64(&[0x62, 0xF1, 0x7C, 0xF9, 0x58, 0xC1]);
    assert_eq!(inst.mnemonic, Mnemonic::Vaddps);
    assert_eq!(inst.op_mask, Some(Register::k(1)));
    assert!(inst.zeroing_masking);
    assert_eq!(inst.rounding, Some(RoundingControl::RoundTowardZero));
}

#[test]
fn test_evex_outside_64bit_needs_v_prime() {
    let inst = decode32(&[0x62, 0xF1, 0x7C, 0x48, 0x58, 0xC1]);
    assert_eq!(inst.mnemonic, Mnemonic::Vaddps);
    let inst = decode32(&[0x62, 0xF1, 0x7C, 0x40, 0x58, 0xC1]);
    assert!(inst.is_invalid());
}

#[test]
fn test_xop_vprotb() {
    let inst = decode64(&[0x8F, 0xE8, 0x78, 0xC0, 0xC1, 0x05]);
    assert_eq!(inst.mnemonic, Mnemonic::Vprotb);
    assert_eq!(inst.encoding, EncodingKind::Xop);
    assert_eq!(inst.operands[0], Operand::reg(Register::xmm(0)));
    assert_eq!(inst.operands[1], Operand::reg(Register::xmm(1)));
    assert_eq!(inst.operands[2].immediate().map(|imm| imm.value), Some(5));
}

#[test]
fn test_pop_is_not_xop() {
    let inst = decode32(&[0x8F, 0xC0]);
    assert_eq!(inst.mnemonic, Mnemonic::Pop);
}

#[test]
fn test_prefix_before_vex_conflicts() {
    init_tracing();
    let mut decoder = Decoder::new(Bitness::Bits64, &[0x66, 0xC5, 0xF8, 0x77], DecoderOptions::new());
    let inst = decoder.decode();
    assert!(inst.is_invalid());
    assert!(matches!(decoder.last_error(), Some(DecodeError::PrefixConflict { .. })));
}

#[test]
fn test_opmask_register_cannot_be_extended() {
    // korb with VEX.R set names k8
    assert!(decode64(&[0xC5, 0x7D, 0x45, 0xC5]).is_invalid());
    assert_eq!(decode64(&[0xC5, 0xFD, 0x45, 0xC5]).mnemonic, Mnemonic::Korb);
    // vcmppd into k8
    assert!(decode64(&[0x62, 0x51, 0xAD, 0x2C, 0xC2, 0xC1, 0x00]).is_invalid());
    let inst = decode64(&[0x62, 0xD1, 0xAD, 0x2C, 0xC2, 0xC1, 0x00]);
    assert_eq!(inst.mnemonic, Mnemonic::Vcmppd);
    assert_eq!(inst.operands[0], Operand::reg(Register::k(0)));
    // vptestnmq with EVEX.R' set names k19
    assert!(decode64(&[0x62, 0xE2, 0xD6, 0x29, 0x27, 0xD9]).is_invalid());
    let inst = decode64(&[0x62, 0xF2, 0xD6, 0x29, 0x27, 0xD9]);
    assert_eq!(inst.mnemonic, Mnemonic::Vptestnmq);
    assert_eq!(inst.operands[0], Operand::reg(Register::k(3)));
}

#[test]
fn test_zeroing_needs_opmask() {
    assert!(decode64(&[0x62, 0xF1, 0x7C, 0xC8, 0x5F, 0xC1]).is_invalid());
    let inst = decode64(&[0x62, 0xF1, 0x7C, 0xC9, 0x5F, 0xC1]);
    assert_eq!(inst.mnemonic, Mnemonic::Vmaxps);
    assert!(inst.zeroing_masking);
}

#[test]
fn test_no_prefix_system_forms() {
    for bytes in [
        &[0x66, 0x0F, 0xAE, 0x00][..],
        &[0x66, 0x0F, 0x37],
        &[0x66, 0x0F, 0x01, 0xEF],
        &[0x66, 0x0F, 0x01, 0xD1],
        &[0xF2, 0x0F, 0x01, 0xC1],
        &[0xF3, 0x0F, 0xC7, 0x28],
    ] {
        assert!(decode64(bytes).is_invalid(), "{:02x?}", bytes);
    }
    assert_eq!(decode64(&[0x0F, 0xAE, 0x00]).mnemonic, Mnemonic::Fxsave);
    assert_eq!(decode64(&[0x0F, 0x01, 0xD1]).mnemonic, Mnemonic::Xsetbv);
}

#[test]
fn test_dot_products_and_ptwrite() {
    let inst = decode64(&[0x62, 0xF2, 0x7D, 0x48, 0x50, 0xC1]);
    assert_eq!(inst.mnemonic, Mnemonic::Vpdpbusd);
    assert_eq!(inst.operands[0], Operand::reg(Register::zmm(0)));
    let inst = decode64(&[0xC4, 0xE2, 0x79, 0x50, 0xC1]);
    assert_eq!(inst.mnemonic, Mnemonic::Vpdpbusd);
    assert_eq!(inst.operands[2], Operand::reg(Register::xmm(1)));
    let inst = decode64(&[0xF3, 0x0F, 0xAE, 0xE0]);
    assert_eq!(inst.mnemonic, Mnemonic::Ptwrite);
    assert_eq!(inst.operands, [Operand::reg(Register::EAX)]);
    assert!(!inst.prefixes.rep);
}

// =============================================================================
// Prefix rules
// =============================================================================

#[test]
fn test_lock() {
    let inst = decode64(&[0xF0, 0x01, 0x00]);
    assert_eq!(inst.mnemonic, Mnemonic::Add);
    assert!(inst.prefixes.lock);
    assert!(decode64(&[0xF0, 0x01, 0xC0]).is_invalid());
}

#[test]
fn test_segment_override_in_64bit_mode() {
    let inst = decode64(&[0x26, 0x8B, 0x00]);
    assert_eq!(inst.memory_operand().map(|m| m.segment), Some(Register::DS));
    let inst = decode64(&[0x65, 0x8B, 0x00]);
    assert_eq!(inst.memory_operand().map(|m| m.segment), Some(Register::GS));
}

#[test]
fn test_fifteen_byte_limit() {
    let mut bytes = vec![0x66; 14];
    bytes.push(0x90);
    assert!(!decode32(&bytes).is_invalid());
    bytes.insert(0, 0x66);
    let inst = decode32(&bytes);
    assert!(inst.is_invalid());
    assert_eq!(inst.length, 15);
}

// =============================================================================
// Decoder options
// =============================================================================

#[test]
fn test_umov_option() {
    assert_eq!(decode32(&[0x0F, 0x10, 0xC1]).mnemonic, Mnemonic::Movups);
    let umov = with_options(Bitness::Bits32, &[0x0F, 0x10, 0xC1], DecoderOptions::new().with_umov(true));
    assert_eq!(umov.mnemonic, Mnemonic::Umov);
}

#[test]
fn test_loadall_options() {
    assert_eq!(decode32(&[0x0F, 0x05]).mnemonic, Mnemonic::Syscall);
    let opts = DecoderOptions::new().with_loadall286(true);
    assert_eq!(with_options(Bitness::Bits16, &[0x0F, 0x05], opts).mnemonic, Mnemonic::Loadall);
    assert_eq!(with_options(Bitness::Bits64, &[0x0F, 0x05], opts).mnemonic, Mnemonic::Syscall);
    let opts = DecoderOptions::new().with_loadall386(true);
    assert_eq!(with_options(Bitness::Bits32, &[0x0F, 0x07], opts).mnemonic, Mnemonic::Loadall);
}

#[test]
fn test_cl1invmb_option() {
    assert!(decode32(&[0x0F, 0x0A]).is_invalid());
    let opts = DecoderOptions::new().with_cl1invmb(true);
    assert_eq!(with_options(Bitness::Bits32, &[0x0F, 0x0A], opts).mnemonic, Mnemonic::Cl1invmb);
}

#[test]
fn test_pause_option() {
    assert_eq!(decode64(&[0xF3, 0x90]).mnemonic, Mnemonic::Pause);
    let opts = DecoderOptions::new().with_no_pause(true);
    assert_eq!(with_options(Bitness::Bits64, &[0xF3, 0x90], opts).mnemonic, Mnemonic::Nop);
}

#[test]
fn test_tzcnt_option() {
    assert_eq!(decode64(&[0xF3, 0x0F, 0xBC, 0xC1]).mnemonic, Mnemonic::Tzcnt);
    let opts = DecoderOptions::new().with_no_mpfx_0fbc(true);
    assert_eq!(with_options(Bitness::Bits64, &[0xF3, 0x0F, 0xBC, 0xC1], opts).mnemonic, Mnemonic::Bsf);
}

#[test]
fn test_reserved_nop_option() {
    let opts = DecoderOptions::new().with_force_reserved_nop(true);
    let inst = with_options(Bitness::Bits64, &[0x0F, 0x18, 0x00], opts);
    assert_eq!(inst.mnemonic, Mnemonic::ReservedNop);
    assert_eq!(decode64(&[0x0F, 0x18, 0x00]).mnemonic, Mnemonic::Prefetchnta);
}

#[test]
fn test_lahf_option() {
    assert_eq!(decode64(&[0x9F]).mnemonic, Mnemonic::Lahf);
    let opts = DecoderOptions::new().with_no_lahf_sahf_64(true);
    assert!(with_options(Bitness::Bits64, &[0x9F], opts).is_invalid());
    assert_eq!(with_options(Bitness::Bits32, &[0x9F], opts).mnemonic, Mnemonic::Lahf);
}
