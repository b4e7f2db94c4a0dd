#![no_main]

use libfuzzer_sys::fuzz_target;
use xdis_core::Bitness;
use xdis_disasm::{Decoder, DecoderOptions, MAX_INSTRUCTION_LENGTH};

fuzz_target!(|data: &[u8]| {
    let Some((&selector, code)) = data.split_first() else {
        return;
    };
    let bitness = match selector % 3 {
        0 => Bitness::Bits16,
        1 => Bitness::Bits32,
        _ => Bitness::Bits64,
    };
    // The high bits toggle a few option paths.
    let options = DecoderOptions::new()
        .with_amd(selector & 0x10 != 0)
        .with_mpx(selector & 0x20 != 0)
        .with_umov(selector & 0x40 != 0)
        .with_old_fpu(selector & 0x80 != 0);

    let mut decoder = Decoder::new(bitness, code, options);
    let mut offset = 0;
    while decoder.can_decode() {
        let inst = decoder.decode();
        assert!(inst.length >= 1 && inst.length <= MAX_INSTRUCTION_LENGTH);
        assert_eq!(inst.is_invalid(), decoder.last_error().is_some());
        assert_eq!(&code[offset..offset + inst.length], inst.bytes.as_slice());
        offset += inst.length;
    }
    assert_eq!(offset, code.len());
});
