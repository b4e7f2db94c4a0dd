//! x87 escape opcodes D8-DF.
//!
//! Memory forms are keyed by ModRM.reg and register forms by the full ModRM
//! byte, which is what [`TableBuilder::group8x64`] expresses.

use xdis_core::{MemorySize as Ms, Mnemonic as M};

use super::{NodeId, TableBuilder};
use crate::options::OptionKind;
use crate::x86::handlers::{FpuForm, Handler as H};

const ARITH: [M; 8] = [M::Fadd, M::Fmul, M::Fcom, M::Fcomp, M::Fsub, M::Fsubr, M::Fdiv, M::Fdivr];
const IARITH: [M; 8] = [M::Fiadd, M::Fimul, M::Ficom, M::Ficomp, M::Fisub, M::Fisubr, M::Fidiv, M::Fidivr];

enum Mem {
    None,
    Sized(M, Ms),
    Env(M, bool),
}

/// Builds the node for escape byte `esc` (D8-DF).
pub(super) fn build(b: &mut TableBuilder, esc: u8) -> NodeId {
    let (mem, regs) = match esc {
        0xD8 => (
            ARITH.map(|m| Mem::Sized(m, Ms::Float32)),
            ARITH.iter().map(|&m| (m, FpuForm::St0Sti)).collect::<Vec<_>>(),
        ),
        0xD9 => (
            [
                Mem::Sized(M::Fld, Ms::Float32),
                Mem::None,
                Mem::Sized(M::Fst, Ms::Float32),
                Mem::Sized(M::Fstp, Ms::Float32),
                Mem::Env(M::Fldenv, false),
                Mem::Sized(M::Fldcw, Ms::UInt16),
                Mem::Env(M::Fnstenv, false),
                Mem::Sized(M::Fnstcw, Ms::UInt16),
            ],
            Vec::new(),
        ),
        0xDA => (IARITH.map(|m| Mem::Sized(m, Ms::Int32)), Vec::new()),
        0xDB => (
            [
                Mem::Sized(M::Fild, Ms::Int32),
                Mem::Sized(M::Fisttp, Ms::Int32),
                Mem::Sized(M::Fist, Ms::Int32),
                Mem::Sized(M::Fistp, Ms::Int32),
                Mem::None,
                Mem::Sized(M::Fld, Ms::Float80),
                Mem::None,
                Mem::Sized(M::Fstp, Ms::Float80),
            ],
            Vec::new(),
        ),
        0xDC => (
            ARITH.map(|m| Mem::Sized(m, Ms::Float64)),
            [M::Fadd, M::Fmul, M::Fcom2, M::Fcomp3, M::Fsubr, M::Fsub, M::Fdivr, M::Fdiv]
                .iter()
                .map(|&m| {
                    let form = if matches!(m, M::Fcom2 | M::Fcomp3) { FpuForm::Sti } else { FpuForm::StiSt0 };
                    (m, form)
                })
                .collect(),
        ),
        0xDD => (
            [
                Mem::Sized(M::Fld, Ms::Float64),
                Mem::Sized(M::Fisttp, Ms::Int64),
                Mem::Sized(M::Fst, Ms::Float64),
                Mem::Sized(M::Fstp, Ms::Float64),
                Mem::Env(M::Frstor, true),
                Mem::None,
                Mem::Env(M::Fnsave, true),
                Mem::Sized(M::Fnstsw, Ms::UInt16),
            ],
            Vec::new(),
        ),
        0xDE => (IARITH.map(|m| Mem::Sized(m, Ms::Int16)), Vec::new()),
        _ => (
            [
                Mem::Sized(M::Fild, Ms::Int16),
                Mem::Sized(M::Fisttp, Ms::Int16),
                Mem::Sized(M::Fist, Ms::Int16),
                Mem::Sized(M::Fistp, Ms::Int16),
                Mem::Sized(M::Fbld, Ms::Bcd),
                Mem::Sized(M::Fild, Ms::Int64),
                Mem::Sized(M::Fbstp, Ms::Bcd),
                Mem::Sized(M::Fistp, Ms::Int64),
            ],
            Vec::new(),
        ),
    };

    let mut low = [NodeId::INVALID; 8];
    for (slot, mem) in low.iter_mut().zip(mem) {
        *slot = match mem {
            Mem::None => NodeId::INVALID,
            Mem::Sized(m, size) => b.leaf(H::FpuMem { m, size }),
            Mem::Env(m, state) => b.leaf(H::FpuEnv { m, state }),
        };
    }

    // Register forms: whole rows of eight first, then single bytes.
    let mut high: Vec<(u8, NodeId)> = Vec::new();
    let row = |b: &mut TableBuilder, high: &mut Vec<(u8, NodeId)>, base: u8, m: M, form: FpuForm| {
        let node = b.leaf(H::FpuReg { m, form });
        for i in 0..8 {
            high.push((base + i, node));
        }
    };
    let single = |b: &mut TableBuilder, high: &mut Vec<(u8, NodeId)>, modrm: u8, m: M, form: FpuForm| {
        let node = b.leaf(H::FpuReg { m, form });
        high.push((modrm, node));
    };
    let plain = |b: &mut TableBuilder, high: &mut Vec<(u8, NodeId)>, modrm: u8, m: M| {
        let node = b.simple(m);
        high.push((modrm, node));
    };

    for (i, &(m, form)) in regs.iter().enumerate() {
        row(b, &mut high, 0xC0 + 8 * i as u8, m, form);
    }
    match esc {
        0xD9 => {
            row(b, &mut high, 0xC0, M::Fld, FpuForm::Sti);
            row(b, &mut high, 0xC8, M::Fxch, FpuForm::St0Sti);
            plain(b, &mut high, 0xD0, M::Fnop);
            row(b, &mut high, 0xD8, M::Fstp1, FpuForm::Sti);
            let ops = [
                (0xE0, M::Fchs),
                (0xE1, M::Fabs),
                (0xE4, M::Ftst),
                (0xE5, M::Fxam),
                (0xE8, M::Fld1),
                (0xE9, M::Fldl2t),
                (0xEA, M::Fldl2e),
                (0xEB, M::Fldpi),
                (0xEC, M::Fldlg2),
                (0xED, M::Fldln2),
                (0xEE, M::Fldz),
                (0xF0, M::F2xm1),
                (0xF1, M::Fyl2x),
                (0xF2, M::Fptan),
                (0xF3, M::Fpatan),
                (0xF4, M::Fxtract),
                (0xF5, M::Fprem1),
                (0xF6, M::Fdecstp),
                (0xF7, M::Fincstp),
                (0xF8, M::Fprem),
                (0xF9, M::Fyl2xp1),
                (0xFA, M::Fsqrt),
                (0xFB, M::Fsincos),
                (0xFC, M::Frndint),
                (0xFD, M::Fscale),
                (0xFE, M::Fsin),
                (0xFF, M::Fcos),
            ];
            for (modrm, m) in ops {
                plain(b, &mut high, modrm, m);
            }
        }
        0xDA => {
            row(b, &mut high, 0xC0, M::Fcmovb, FpuForm::St0Sti);
            row(b, &mut high, 0xC8, M::Fcmove, FpuForm::St0Sti);
            row(b, &mut high, 0xD0, M::Fcmovbe, FpuForm::St0Sti);
            row(b, &mut high, 0xD8, M::Fcmovu, FpuForm::St0Sti);
            plain(b, &mut high, 0xE9, M::Fucompp);
        }
        0xDB => {
            row(b, &mut high, 0xC0, M::Fcmovnb, FpuForm::St0Sti);
            row(b, &mut high, 0xC8, M::Fcmovne, FpuForm::St0Sti);
            row(b, &mut high, 0xD0, M::Fcmovnbe, FpuForm::St0Sti);
            row(b, &mut high, 0xD8, M::Fcmovnu, FpuForm::St0Sti);
            plain(b, &mut high, 0xE0, M::Fneni);
            plain(b, &mut high, 0xE1, M::Fndisi);
            plain(b, &mut high, 0xE2, M::Fnclex);
            plain(b, &mut high, 0xE3, M::Fninit);
            plain(b, &mut high, 0xE4, M::Fnsetpm);
            let frstpm = b.simple(M::Frstpm);
            let frstpm = b.option(OptionKind::OldFpu, frstpm, NodeId::INVALID);
            high.push((0xE5, frstpm));
            row(b, &mut high, 0xE8, M::Fucomi, FpuForm::St0Sti);
            row(b, &mut high, 0xF0, M::Fcomi, FpuForm::St0Sti);
        }
        0xDD => {
            row(b, &mut high, 0xC0, M::Ffree, FpuForm::Sti);
            row(b, &mut high, 0xC8, M::Fxch4, FpuForm::Sti);
            row(b, &mut high, 0xD0, M::Fst, FpuForm::Sti);
            row(b, &mut high, 0xD8, M::Fstp, FpuForm::Sti);
            row(b, &mut high, 0xE0, M::Fucom, FpuForm::Sti);
            row(b, &mut high, 0xE8, M::Fucomp, FpuForm::Sti);
        }
        0xDE => {
            row(b, &mut high, 0xC0, M::Faddp, FpuForm::StiSt0);
            row(b, &mut high, 0xC8, M::Fmulp, FpuForm::StiSt0);
            row(b, &mut high, 0xD0, M::Fcomp5, FpuForm::Sti);
            plain(b, &mut high, 0xD9, M::Fcompp);
            row(b, &mut high, 0xE0, M::Fsubrp, FpuForm::StiSt0);
            row(b, &mut high, 0xE8, M::Fsubp, FpuForm::StiSt0);
            row(b, &mut high, 0xF0, M::Fdivrp, FpuForm::StiSt0);
            row(b, &mut high, 0xF8, M::Fdivp, FpuForm::StiSt0);
        }
        0xDF => {
            row(b, &mut high, 0xC0, M::Ffreep, FpuForm::Sti);
            row(b, &mut high, 0xC8, M::Fxch7, FpuForm::Sti);
            row(b, &mut high, 0xD0, M::Fstp8, FpuForm::Sti);
            row(b, &mut high, 0xD8, M::Fstp9, FpuForm::Sti);
            single(b, &mut high, 0xE0, M::Fnstsw, FpuForm::Ax);
            for (modrm, m) in [(0xE1, M::Fstdw), (0xE2, M::Fstsg)] {
                let node = b.leaf(H::FpuReg { m, form: FpuForm::Ax });
                let node = b.option(OptionKind::OldFpu, node, NodeId::INVALID);
                high.push((modrm, node));
            }
            row(b, &mut high, 0xE8, M::Fucomip, FpuForm::St0Sti);
            row(b, &mut high, 0xF0, M::Fcomip, FpuForm::St0Sti);
        }
        _ => {}
    }

    // Register forms left unassigned are invalid, not the memory form.
    let mut all = [NodeId::INVALID; 64];
    for (modrm, node) in high {
        all[(modrm - 0xC0) as usize] = node;
    }
    let entries: Vec<(u8, NodeId)> = all.iter().enumerate().map(|(i, &n)| (0xC0 + i as u8, n)).collect();
    b.group8x64(low, &entries)
}

#[cfg(test)]
mod tests {
    use super::super::resolve;
    use crate::options::DecoderOptions;
    use crate::x86::context::DecodeContext;
    use crate::x86::handlers::{FpuForm, Handler};
    use crate::x86::tables::Map;
    use xdis_core::{Bitness, MemorySize, Mnemonic};

    fn lookup(bytes: &[u8], options: DecoderOptions) -> Option<Handler> {
        let mut cx = DecodeContext::new(bytes, 0, 0, Bitness::Bits32, options);
        let opcode = cx.cursor.read_u8().ok()?;
        resolve(&mut cx, Map::Legacy, opcode).ok().map(|(h, _)| h)
    }

    #[test]
    fn test_memory_and_register_forms() {
        let opts = DecoderOptions::new();
        assert_eq!(
            lookup(&[0xD9, 0x00], opts),
            Some(Handler::FpuMem { m: Mnemonic::Fld, size: MemorySize::Float32 })
        );
        assert_eq!(
            lookup(&[0xD9, 0xC1], opts),
            Some(Handler::FpuReg { m: Mnemonic::Fld, form: FpuForm::Sti })
        );
        assert_eq!(lookup(&[0xD9, 0xE8], opts), Some(Handler::Simple { m: Mnemonic::Fld1 }));
        assert_eq!(lookup(&[0xD9, 0xD1], opts), None);
        assert_eq!(lookup(&[0xD9, 0x08], opts), None);
    }

    #[test]
    fn test_dc_register_forms_swap_sub_and_subr() {
        let opts = DecoderOptions::new();
        assert_eq!(
            lookup(&[0xDC, 0xE1], opts),
            Some(Handler::FpuReg { m: Mnemonic::Fsubr, form: FpuForm::StiSt0 })
        );
        assert_eq!(
            lookup(&[0xDC, 0xE9], opts),
            Some(Handler::FpuReg { m: Mnemonic::Fsub, form: FpuForm::StiSt0 })
        );
    }

    #[test]
    fn test_old_fpu_forms() {
        assert_eq!(lookup(&[0xDB, 0xE4], DecoderOptions::new()), Some(Handler::Simple { m: Mnemonic::Fnsetpm }));
        assert_eq!(lookup(&[0xDB, 0xE5], DecoderOptions::new()), None);
        let old = DecoderOptions::new().with_old_fpu(true);
        assert_eq!(lookup(&[0xDB, 0xE5], old), Some(Handler::Simple { m: Mnemonic::Frstpm }));
        assert_eq!(
            lookup(&[0xDF, 0xE1], old),
            Some(Handler::FpuReg { m: Mnemonic::Fstdw, form: FpuForm::Ax })
        );
        assert_eq!(lookup(&[0xDF, 0xE1], DecoderOptions::new()), None);
    }
}
