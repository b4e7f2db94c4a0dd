//! Benchmarks for decode throughput.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use xdis_core::{Bitness, Instruction};
use xdis_disasm::{Decoder, DecoderOptions, Disassembler, X86Disassembler};

/// A small function: prologue, arithmetic, a branch and the epilogue.
const INTEGER_CODE: &[u8] = &[
    0x55, // push rbp
    0x48, 0x89, 0xe5, // mov rbp, rsp
    0x48, 0x83, 0xec, 0x20, // sub rsp, 0x20
    0x48, 0x89, 0x7d, 0xf8, // mov [rbp-8], rdi
    0x48, 0x8b, 0x45, 0xf8, // mov rax, [rbp-8]
    0x48, 0x83, 0xc0, 0x01, // add rax, 1
    0x48, 0x89, 0x45, 0xf0, // mov [rbp-16], rax
    0x48, 0x83, 0x7d, 0xf0, 0x0a, // cmp qword [rbp-16], 10
    0x7e, 0x07, // jle .L1
    0xb8, 0x01, 0x00, 0x00, 0x00, // mov eax, 1
    0xeb, 0x05, // jmp .L2
    0xb8, 0x00, 0x00, 0x00, 0x00, // .L1: mov eax, 0
    0x48, 0x83, 0xc4, 0x20, // .L2: add rsp, 0x20
    0x5d, // pop rbp
    0xc3, // ret
];

/// Vector code mixing the VEX, EVEX and XOP encodings.
const VECTOR_CODE: &[u8] = &[
    0xc5, 0xfc, 0x58, 0xc1, // vaddps ymm0, ymm0, ymm1
    0x62, 0xf1, 0x7c, 0x48, 0x58, 0xc1, // vaddps zmm0, zmm0, zmm1
    0x62, 0xf1, 0x7c, 0xc9, 0x59, 0x40, 0x01, // vmulps zmm0{k1}{z}, zmm0, [rax+0x40]
    0xc4, 0xe2, 0x7d, 0x18, 0x07, // vbroadcastss ymm0, [rdi]
    0x8f, 0xe8, 0x78, 0xc0, 0xc1, 0x05, // vprotb xmm0, xmm1, 5
    0xc4, 0xe2, 0x71, 0xb8, 0xc2, // vfmadd231ps xmm0, xmm1, xmm2
    0xc5, 0xf8, 0x77, // vzeroupper
];

fn repeat(pattern: &[u8], size: usize) -> Vec<u8> {
    pattern.iter().copied().cycle().take(size).collect()
}

fn bench_disassembly(c: &mut Criterion) {
    let disasm = X86Disassembler::new(Bitness::Bits64);

    let mut group = c.benchmark_group("x86_disassembly");

    group.bench_function("single_instruction", |b| {
        b.iter(|| disasm.decode_instruction(black_box(&INTEGER_CODE[1..4]), 0x1000))
    });

    group.bench_function("small_function", |b| {
        b.iter(|| disasm.disassemble_block(black_box(INTEGER_CODE), 0x1000))
    });

    group.bench_function("vector_block", |b| {
        b.iter(|| disasm.disassemble_block(black_box(VECTOR_CODE), 0x1000))
    });

    for size in [1024, 4096, 16384, 65536] {
        let code = repeat(INTEGER_CODE, size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("throughput", size), &code, |b, code| {
            b.iter(|| disasm.disassemble_block(black_box(code), 0x1000))
        });
    }

    group.finish();
}

/// Streaming decode that reuses one instruction record.
fn bench_decoder_reuse(c: &mut Criterion) {
    let mut group = c.benchmark_group("x86_decoder");

    for (name, pattern) in [("integer", INTEGER_CODE), ("vector", VECTOR_CODE)] {
        let code = repeat(pattern, 16384);
        group.throughput(Throughput::Bytes(code.len() as u64));
        group.bench_with_input(BenchmarkId::new("decode_out", name), &code, |b, code| {
            b.iter(|| {
                let mut decoder = Decoder::new(Bitness::Bits64, black_box(code), DecoderOptions::new());
                let mut inst = Instruction::new(0, Bitness::Bits64);
                let mut count = 0usize;
                while decoder.can_decode() {
                    decoder.decode_out(&mut inst);
                    count += 1;
                }
                count
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_disassembly, bench_decoder_reuse);
criterion_main!(benches);
