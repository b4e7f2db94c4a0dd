//! MMX, SSE, VEX, XOP and EVEX forms.
//!
//! Vector instructions vary mostly in which fields supply their operands, so
//! instead of one shape per form they share a single handler driven by a
//! static operand list. Each [`VOp`] names the encoding field an operand
//! comes from and the width class it has; widths scale with the vector
//! length, so one list covers the 128-, 256- and 512-bit forms of an
//! instruction.
//!
//! Immediates are read after every ModRM-derived operand, whatever their
//! position in the list, because the displacement precedes them in the
//! byte stream.

use bitflags::bitflags;
use xdis_core::{
    Element, EncodingKind, ImmediateKind, Instruction, MemorySize, Mnemonic, Operand, Register,
    RegisterClass, RoundingControl,
};

use crate::error::DecodeError;
use crate::x86::context::DecodeContext;
use crate::x86::modrm::{MemoryForm, ModRm};
use crate::x86::size::OpSize;
use crate::x86::state::StateFlags;
use crate::x86::tables;

/// Width class of a vector operand, relative to the vector length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vw {
    /// The full vector length (16 bytes for legacy SSE).
    L,
    /// Always 128 bits.
    X,
    /// Always 256 bits.
    Y,
    /// Half the vector length.
    Half,
    /// A quarter of the vector length.
    Quarter,
    /// An eighth of the vector length.
    Eighth,
}

/// Width of a general purpose operand inside a vector form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gs {
    /// 32 bits.
    D,
    /// 64 bits.
    Q,
    /// 64 bits with W in 64-bit mode, else 32.
    Y,
    /// r32 or m16.
    DW,
    /// r32 or m8.
    DB,
    /// 64 bits in 64-bit mode, else 32, whatever W says.
    Mode,
}

/// Operand source inside a vector operand list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VOp {
    /// Vector register in ModRM.reg.
    V(Vw),
    /// Vector register in vvvv.
    H(Vw),
    /// Vector register in ModRM.rm or packed memory.
    W(Vw),
    /// xmm register in ModRM.rm or a single element in memory.
    Ws,
    /// Vector register in ModRM.rm; memory forms are invalid.
    U(Vw),
    /// Packed memory only.
    M(Vw),
    /// Memory only, with a fixed size tag.
    Mf(MemorySize),
    /// VSIB memory; the index register has the given width.
    Vsib(Vw),
    /// An implicit register.
    Fixed(Register),
    /// GPR in ModRM.reg.
    G(Gs),
    /// GPR in ModRM.rm; memory forms are invalid.
    R(Gs),
    /// GPR in ModRM.rm or memory.
    E(Gs),
    /// GPR in vvvv.
    B(Gs),
    /// Memory only, sized like a GPR of the given width.
    Me(Gs),
    /// Opmask in ModRM.reg.
    K,
    /// Opmask in vvvv.
    KH,
    /// Opmask in ModRM.rm; memory forms are invalid.
    KR,
    /// Opmask in ModRM.rm or memory of the given size.
    KE(MemorySize),
    /// MMX register in ModRM.reg.
    P,
    /// MMX register in ModRM.rm or 64-bit memory.
    Q,
    /// MMX register in ModRM.rm; memory forms are invalid.
    N,
    /// 8-bit immediate.
    Ib,
    /// Second 8-bit immediate.
    Ib2,
    /// 32-bit immediate.
    Id,
    /// Vector register in bits 7:4 of an immediate byte.
    Is4(Vw),
    /// MPX bound register in ModRM.reg.
    Bnd,
    /// MPX bound register in ModRM.rm or a bound pair in memory.
    BndW,
    /// AMX tile register in ModRM.reg.
    T,
    /// AMX tile register in ModRM.rm; memory forms are invalid.
    TR,
    /// AMX tile register in vvvv.
    TH,
}

impl VOp {
    fn uses_modrm(&self) -> bool {
        !matches!(
            self,
            VOp::H(_)
                | VOp::Fixed(_)
                | VOp::B(_)
                | VOp::KH
                | VOp::TH
                | VOp::Ib
                | VOp::Ib2
                | VOp::Id
                | VOp::Is4(_)
        )
    }

    fn is_immediate(&self) -> bool {
        matches!(self, VOp::Ib | VOp::Ib2 | VOp::Id | VOp::Is4(_))
    }

    fn uses_vvvv(&self) -> bool {
        matches!(self, VOp::H(_) | VOp::B(_) | VOp::KH | VOp::TH)
    }
}

bitflags! {
    /// EVEX features a form supports.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct VAttr: u8 {
        /// Opmask `{k}` allowed.
        const K = 1 << 0;
        /// Zeroing `{z}` allowed.
        const Z = 1 << 1;
        /// Embedded broadcast on memory forms.
        const BCST = 1 << 2;
        /// Embedded rounding on register forms.
        const ER = 1 << 3;
        /// Suppress-all-exceptions on register forms.
        const SAE = 1 << 4;
        /// A non-zero opmask is required (gather/scatter).
        const KREQ = 1 << 5;
    }
}

impl VAttr {
    /// Merge masking, zeroing and broadcast: the common arithmetic set.
    pub const KZB: VAttr = VAttr::K.union(VAttr::Z).union(VAttr::BCST);
    /// `KZB` plus embedded rounding.
    pub const KZB_ER: VAttr = VAttr::KZB.union(VAttr::ER);
    /// `KZB` plus suppress-all-exceptions.
    pub const KZB_SAE: VAttr = VAttr::KZB.union(VAttr::SAE);
    /// Masking and zeroing only.
    pub const KZ: VAttr = VAttr::K.union(VAttr::Z);
}

/// Vector length and EVEX memory treatment resolved for one instruction.
#[derive(Debug, Clone, Copy)]
struct Layout {
    /// Vector length in bytes.
    vl: usize,
    /// EVEX.b on a memory form.
    broadcast: bool,
}

pub(super) fn decode_vector(
    cx: &mut DecodeContext<'_>,
    inst: &mut Instruction,
    m: Mnemonic,
    ops: &'static [VOp],
    elem: Element,
    attr: VAttr,
) -> Result<(), DecodeError> {
    let modrm = if ops.iter().any(VOp::uses_modrm) {
        Some(cx.modrm()?)
    } else {
        None
    };
    let register_form = modrm.map_or(true, |modrm| modrm.is_register());
    let layout = resolve_layout(cx, inst, attr, register_form)?;

    let vsib = ops.iter().any(|op| matches!(op, VOp::Vsib(_)));
    if !ops.iter().any(VOp::uses_vvvv) {
        let vvvv = if vsib { cx.state.vvvv & 0x0F } else { cx.state.vvvv };
        if vvvv != 0 {
            return Err(cx.invalid());
        }
    }

    let mut slots: [Option<Operand>; 6] = Default::default();
    if ops.len() > slots.len() {
        return Err(cx.invalid());
    }
    for (slot, op) in slots.iter_mut().zip(ops) {
        if !op.is_immediate() {
            *slot = Some(operand(cx, *op, modrm, elem, layout)?);
        }
    }

    let mut is4_byte = None;
    for (slot, op) in slots.iter_mut().zip(ops) {
        *slot = Some(match *op {
            VOp::Ib => match is4_byte {
                // The is4 byte's low nibble doubles as the immediate.
                Some(byte) => Operand::imm(u64::from(byte & 0x0F), ImmediateKind::Imm8),
                None => cx.immediate(ImmediateKind::Imm8)?,
            },
            VOp::Ib2 => cx.immediate(ImmediateKind::Imm8Second)?,
            VOp::Id => cx.immediate(ImmediateKind::Imm32)?,
            VOp::Is4(w) => {
                let byte = cx.cursor.read_u8()?;
                is4_byte = Some(byte);
                let index = if cx.state.is_64bit() { byte >> 4 } else { (byte >> 4) & 7 };
                Operand::Register(vector_register(width(w, layout.vl), index))
            }
            _ => continue,
        });
    }

    inst.mnemonic = m;
    inst.operands.extend(slots.into_iter().take(ops.len()).flatten());
    Ok(())
}

/// Applies the EVEX masking/broadcast/rounding rules and resolves the vector
/// length.
fn resolve_layout(
    cx: &DecodeContext<'_>,
    inst: &mut Instruction,
    attr: VAttr,
    register_form: bool,
) -> Result<Layout, DecodeError> {
    let state = &cx.state;
    match state.encoding {
        EncodingKind::Vex | EncodingKind::Xop => Ok(Layout {
            vl: 16 << state.vector_length,
            broadcast: false,
        }),
        EncodingKind::Evex => {
            if state.aaa != 0 && !attr.contains(VAttr::K) {
                return Err(cx.invalid());
            }
            if attr.contains(VAttr::KREQ) && state.aaa == 0 {
                return Err(cx.invalid());
            }
            let zeroing = state.flags.contains(StateFlags::EVEX_Z);
            // {z} without an opmask has nothing to zero with.
            if zeroing && (!attr.contains(VAttr::Z) || state.aaa == 0) {
                return Err(cx.invalid());
            }
            inst.op_mask = (state.aaa != 0).then(|| Register::k(state.aaa));
            inst.zeroing_masking = zeroing;

            let mut layout = Layout {
                vl: 16 << state.vector_length,
                broadcast: false,
            };
            if state.flags.contains(StateFlags::EVEX_B) {
                if register_form {
                    if attr.contains(VAttr::ER) {
                        inst.rounding = Some(RoundingControl::from_bits(state.vector_length));
                    } else if attr.contains(VAttr::SAE) {
                        inst.suppress_all_exceptions = true;
                    } else {
                        return Err(cx.invalid());
                    }
                    // L'L holds the rounding mode; the length is implied 512.
                    layout.vl = 64;
                    return Ok(layout);
                }
                if !attr.contains(VAttr::BCST) {
                    return Err(cx.invalid());
                }
                layout.broadcast = true;
            }
            if state.vector_length == 3 {
                return Err(cx.invalid());
            }
            Ok(layout)
        }
        _ => Ok(Layout {
            vl: 16,
            broadcast: false,
        }),
    }
}

fn width(w: Vw, vl: usize) -> usize {
    match w {
        Vw::L => vl,
        Vw::X => 16,
        Vw::Y => 32,
        Vw::Half => vl / 2,
        Vw::Quarter => vl / 4,
        Vw::Eighth => vl / 8,
    }
}

fn vector_class(bytes: usize) -> RegisterClass {
    match bytes {
        64 => RegisterClass::Zmm,
        32 => RegisterClass::Ymm,
        _ => RegisterClass::Xmm,
    }
}

fn vector_register(bytes: usize, index: u8) -> Register {
    Register::new(vector_class(bytes), index)
}

fn gpr_size(cx: &DecodeContext<'_>, g: Gs) -> OpSize {
    match g {
        Gs::Q => OpSize::Size64,
        Gs::Y if cx.state.w64() => OpSize::Size64,
        Gs::Mode if cx.state.is_64bit() => OpSize::Size64,
        _ => OpSize::Size32,
    }
}

fn gpr_memory_size(cx: &DecodeContext<'_>, g: Gs) -> MemorySize {
    match g {
        Gs::DW => MemorySize::UInt16,
        Gs::DB => MemorySize::UInt8,
        _ => gpr_size(cx, g).memory_size(),
    }
}

/// ModRM.rm index of a vector register; EVEX.X reaches registers 16-31.
fn rm_vector_index(cx: &DecodeContext<'_>, modrm: ModRm) -> u8 {
    let high = if cx.state.encoding == EncodingKind::Evex {
        cx.state.ext_x << 1
    } else {
        0
    };
    cx.rm_index(modrm) | high
}

fn reg_vector_index(cx: &DecodeContext<'_>, modrm: ModRm) -> u8 {
    cx.reg_index(modrm) | cx.state.ext_r2
}

fn memory_operand(
    cx: &mut DecodeContext<'_>,
    size: MemorySize,
    vsib: Option<RegisterClass>,
) -> Result<Operand, DecodeError> {
    let disp8_scale = if cx.state.encoding == EncodingKind::Evex {
        size.size().max(1) as u32
    } else {
        1
    };
    let mem = cx.memory_ref(size, MemoryForm { disp8_scale, vsib })?;
    Ok(Operand::Memory(mem))
}

fn modrm_of(cx: &DecodeContext<'_>, modrm: Option<ModRm>) -> Result<ModRm, DecodeError> {
    modrm.ok_or_else(|| cx.invalid())
}

fn operand(
    cx: &mut DecodeContext<'_>,
    op: VOp,
    modrm: Option<ModRm>,
    elem: Element,
    layout: Layout,
) -> Result<Operand, DecodeError> {
    let vl = layout.vl;
    let reg = |r: Register| -> Result<Operand, DecodeError> { Ok(Operand::Register(r)) };
    match op {
        VOp::V(w) => {
            let modrm = modrm_of(cx, modrm)?;
            reg(vector_register(width(w, vl), reg_vector_index(cx, modrm)))
        }
        VOp::H(w) => {
            if cx.state.encoding == EncodingKind::Legacy {
                return Err(cx.invalid());
            }
            reg(vector_register(width(w, vl), cx.state.vvvv))
        }
        VOp::W(w) => {
            let modrm = modrm_of(cx, modrm)?;
            let bytes = width(w, vl);
            if modrm.is_register() {
                reg(vector_register(bytes, rm_vector_index(cx, modrm)))
            } else if layout.broadcast {
                memory_operand(cx, MemorySize::Broadcast(elem), None)
            } else {
                memory_operand(cx, MemorySize::packed(bytes, elem), None)
            }
        }
        VOp::Ws => {
            let modrm = modrm_of(cx, modrm)?;
            if modrm.is_register() {
                reg(Register::xmm(rm_vector_index(cx, modrm)))
            } else {
                memory_operand(cx, elem.scalar(), None)
            }
        }
        VOp::U(w) => {
            let modrm = modrm_of(cx, modrm)?;
            if !modrm.is_register() {
                return Err(cx.invalid());
            }
            reg(vector_register(width(w, vl), rm_vector_index(cx, modrm)))
        }
        VOp::M(w) => {
            let size = if layout.broadcast {
                MemorySize::Broadcast(elem)
            } else {
                MemorySize::packed(width(w, vl), elem)
            };
            memory_operand(cx, size, None)
        }
        VOp::Mf(size) => memory_operand(cx, size, None),
        VOp::Vsib(w) => memory_operand(cx, elem.scalar(), Some(vector_class(width(w, vl)))),
        VOp::Fixed(r) => reg(r),
        VOp::G(g) => {
            let modrm = modrm_of(cx, modrm)?;
            let size = gpr_size(cx, g);
            reg(cx.gpr(size, cx.reg_index(modrm)))
        }
        VOp::R(g) => {
            let modrm = modrm_of(cx, modrm)?;
            if !modrm.is_register() {
                return Err(cx.invalid());
            }
            let size = gpr_size(cx, g);
            reg(cx.gpr(size, cx.rm_index(modrm)))
        }
        VOp::E(g) => {
            let size = gpr_size(cx, g);
            let mem = gpr_memory_size(cx, g);
            cx.rm_gpr(size, mem)
        }
        VOp::B(g) => {
            if cx.state.encoding == EncodingKind::Legacy {
                return Err(cx.invalid());
            }
            let size = gpr_size(cx, g);
            reg(cx.gpr(size, cx.state.vvvv & 0x0F))
        }
        VOp::Me(g) => {
            let size = gpr_memory_size(cx, g);
            memory_operand(cx, size, None)
        }
        VOp::K => {
            let modrm = modrm_of(cx, modrm)?;
            small_register(cx, RegisterClass::Opmask, reg_vector_index(cx, modrm))
        }
        VOp::KH => small_register(cx, RegisterClass::Opmask, cx.state.vvvv),
        VOp::KR => {
            let modrm = modrm_of(cx, modrm)?;
            if !modrm.is_register() {
                return Err(cx.invalid());
            }
            small_register(cx, RegisterClass::Opmask, rm_vector_index(cx, modrm))
        }
        VOp::KE(size) => {
            let modrm = modrm_of(cx, modrm)?;
            if modrm.is_register() {
                small_register(cx, RegisterClass::Opmask, rm_vector_index(cx, modrm))
            } else {
                memory_operand(cx, size, None)
            }
        }
        VOp::P => {
            let modrm = modrm_of(cx, modrm)?;
            reg(Register::new(RegisterClass::Mmx, modrm.reg))
        }
        VOp::Q => {
            let modrm = modrm_of(cx, modrm)?;
            if modrm.is_register() {
                reg(Register::new(RegisterClass::Mmx, modrm.rm))
            } else {
                memory_operand(cx, MemorySize::packed(8, elem), None)
            }
        }
        VOp::N => {
            let modrm = modrm_of(cx, modrm)?;
            if !modrm.is_register() {
                return Err(cx.invalid());
            }
            reg(Register::new(RegisterClass::Mmx, modrm.rm))
        }
        VOp::Bnd => {
            let modrm = modrm_of(cx, modrm)?;
            bound_register(cx, cx.reg_index(modrm))
        }
        VOp::BndW => {
            let modrm = modrm_of(cx, modrm)?;
            if modrm.is_register() {
                bound_register(cx, cx.rm_index(modrm))
            } else {
                let size = if cx.state.is_64bit() {
                    MemorySize::Bnd64
                } else {
                    MemorySize::Bnd32
                };
                memory_operand(cx, size, None)
            }
        }
        VOp::T => {
            let modrm = modrm_of(cx, modrm)?;
            small_register(cx, RegisterClass::Tile, cx.reg_index(modrm))
        }
        VOp::TR => {
            let modrm = modrm_of(cx, modrm)?;
            if !modrm.is_register() {
                return Err(cx.invalid());
            }
            small_register(cx, RegisterClass::Tile, cx.rm_index(modrm))
        }
        VOp::TH => small_register(cx, RegisterClass::Tile, cx.state.vvvv),
        VOp::Ib | VOp::Ib2 | VOp::Id | VOp::Is4(_) => Err(cx.invalid()),
    }
}

/// Opmask or tile register. Both files have eight entries, so an index
/// extended past 7 by R, R', B, X or vvvv is undefined.
fn small_register(cx: &DecodeContext<'_>, class: RegisterClass, index: u8) -> Result<Operand, DecodeError> {
    if index > 7 {
        return Err(cx.invalid());
    }
    Ok(Operand::Register(Register::new(class, index)))
}

/// bnd0-bnd3; the extended encodings are undefined.
fn bound_register(cx: &DecodeContext<'_>, index: u8) -> Result<Operand, DecodeError> {
    if index > 3 {
        return Err(cx.invalid());
    }
    Ok(Operand::Register(Register::new(RegisterClass::Bound, index)))
}

/// 3DNow!: `0F 0F /r suffix`. The suffix byte after the operands selects
/// the instruction.
pub(super) fn decode_3dnow(cx: &mut DecodeContext<'_>, inst: &mut Instruction) -> Result<(), DecodeError> {
    let modrm = cx.modrm()?;
    let dst = Operand::Register(Register::new(RegisterClass::Mmx, modrm.reg));
    let src = if modrm.is_register() {
        Operand::Register(Register::new(RegisterClass::Mmx, modrm.rm))
    } else {
        cx.memory(MemorySize::Packed64(Element::Float32))?
    };
    let suffix = cx.cursor.read_u8()?;
    inst.mnemonic = tables::d3now_mnemonic(suffix).ok_or_else(|| cx.invalid())?;
    cx.state.flags.insert(StateFlags::NO_IMM);
    inst.operands.extend([dst, src]);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::Handler;
    use super::*;
    use crate::options::DecoderOptions;
    use xdis_core::Bitness;

    const VHW: &[VOp] = &[VOp::V(Vw::L), VOp::H(Vw::L), VOp::W(Vw::L)];

    fn evex_cx(bytes: &[u8], ll: u8, aaa: u8, b: bool, z: bool) -> DecodeContext<'_> {
        let mut cx = DecodeContext::new(bytes, 0, 0x1000, Bitness::Bits64, DecoderOptions::new());
        cx.state.encoding = EncodingKind::Evex;
        cx.state.vector_length = ll;
        cx.state.aaa = aaa;
        cx.state.flags.set(StateFlags::EVEX_B, b);
        cx.state.flags.set(StateFlags::EVEX_Z, z);
        cx
    }

    fn run(cx: &mut DecodeContext<'_>, h: Handler) -> Result<Instruction, DecodeError> {
        let mut inst = Instruction::new(0x1000, Bitness::Bits64);
        h.decode(cx, 0x58, &mut inst)?;
        Ok(inst)
    }

    const VADDPS: Handler = Handler::Vector {
        m: Mnemonic::Vaddps,
        ops: VHW,
        elem: Element::Float32,
        attr: VAttr::KZB_ER,
    };

    #[test]
    fn test_evex_zmm_registers() {
        let bytes = [0xC1];
        let mut cx = evex_cx(&bytes, 2, 0, false, false);
        let inst = run(&mut cx, VADDPS).unwrap();
        assert_eq!(
            inst.operands,
            vec![
                Operand::reg(Register::zmm(0)),
                Operand::reg(Register::zmm(0)),
                Operand::reg(Register::zmm(1))
            ]
        );
    }

    #[test]
    fn test_evex_compressed_disp8() {
        // [rax + 1*64]
        let bytes = [0x40, 0x01];
        let mut cx = evex_cx(&bytes, 2, 1, false, false);
        let inst = run(&mut cx, VADDPS).unwrap();
        let mem = inst.operands[2].memory().unwrap();
        assert_eq!(mem.displacement, 64);
        assert_eq!(mem.size, MemorySize::Packed512(Element::Float32));
        assert_eq!(inst.op_mask, Some(Register::k(1)));
    }

    #[test]
    fn test_evex_broadcast_scales_by_element() {
        let bytes = [0x40, 0x01];
        let mut cx = evex_cx(&bytes, 2, 0, true, false);
        let inst = run(&mut cx, VADDPS).unwrap();
        let mem = inst.operands[2].memory().unwrap();
        assert_eq!(mem.displacement, 4);
        assert_eq!(mem.size, MemorySize::Broadcast(Element::Float32));
    }

    #[test]
    fn test_evex_rounding_on_register_form() {
        let bytes = [0xC1];
        let mut cx = evex_cx(&bytes, 3, 0, true, false);
        let inst = run(&mut cx, VADDPS).unwrap();
        assert_eq!(inst.rounding, Some(RoundingControl::RoundTowardZero));
        assert_eq!(inst.operands[0], Operand::reg(Register::zmm(0)));
    }

    #[test]
    fn test_evex_length_3_without_rounding_is_invalid() {
        let bytes = [0xC1];
        let mut cx = evex_cx(&bytes, 3, 0, false, false);
        assert!(run(&mut cx, VADDPS).is_err());
    }

    #[test]
    fn test_zeroing_requires_support() {
        let h = Handler::Vector {
            m: Mnemonic::Vaddps,
            ops: VHW,
            elem: Element::Float32,
            attr: VAttr::K,
        };
        let bytes = [0xC1];
        let mut cx = evex_cx(&bytes, 0, 1, false, true);
        assert!(run(&mut cx, h).is_err());
    }

    #[test]
    fn test_zeroing_without_opmask_is_invalid() {
        let bytes = [0xC1];
        let mut cx = evex_cx(&bytes, 0, 0, false, true);
        assert!(run(&mut cx, VADDPS).is_err());
        let mut cx = evex_cx(&bytes, 0, 1, false, true);
        let inst = run(&mut cx, VADDPS).unwrap();
        assert!(inst.zeroing_masking);
        assert_eq!(inst.op_mask, Some(Register::k(1)));
    }

    #[test]
    fn test_opmask_operands_reject_extended_indices() {
        let vptestnmq = Handler::Vector {
            m: Mnemonic::Vptestnmq,
            ops: &[VOp::K, VOp::H(Vw::L), VOp::W(Vw::L)],
            elem: Element::Int64,
            attr: VAttr::K.union(VAttr::BCST),
        };
        // k3, ymm0, ymm1
        let bytes = [0xD9];
        let mut cx = evex_cx(&bytes, 1, 0, false, false);
        let inst = run(&mut cx, vptestnmq).unwrap();
        assert_eq!(inst.operands[0], Operand::reg(Register::k(3)));
        let mut cx = evex_cx(&bytes, 1, 0, false, false);
        cx.state.ext_r2 = 16;
        assert!(run(&mut cx, vptestnmq).is_err());
        let mut cx = evex_cx(&bytes, 1, 0, false, false);
        cx.state.ext_r = 8;
        assert!(run(&mut cx, vptestnmq).is_err());

        let korb = Handler::Vector {
            m: Mnemonic::Korb,
            ops: &[VOp::K, VOp::KH, VOp::KR],
            elem: Element::UInt8,
            attr: VAttr::empty(),
        };
        let bytes: &[u8] = &[0xC5];
        let vex = |ext_r: u8, ext_b: u8, vvvv: u8| {
            let mut cx = DecodeContext::new(bytes, 0, 0, Bitness::Bits64, DecoderOptions::new());
            cx.state.encoding = EncodingKind::Vex;
            cx.state.vector_length = 1;
            cx.state.ext_r = ext_r;
            cx.state.ext_b = ext_b;
            cx.state.vvvv = vvvv;
            cx
        };
        let inst = run(&mut vex(0, 0, 2), korb).unwrap();
        assert_eq!(
            inst.operands,
            vec![Operand::reg(Register::k(0)), Operand::reg(Register::k(2)), Operand::reg(Register::k(5))]
        );
        assert!(run(&mut vex(8, 0, 2), korb).is_err());
        assert!(run(&mut vex(0, 8, 2), korb).is_err());
        assert!(run(&mut vex(0, 0, 10), korb).is_err());
    }

    #[test]
    fn test_tile_operands_reject_extended_indices() {
        let tdpbssd = Handler::Vector {
            m: Mnemonic::Tdpbssd,
            ops: &[VOp::T, VOp::TR, VOp::TH],
            elem: Element::Int8,
            attr: VAttr::empty(),
        };
        let bytes: &[u8] = &[0xCA];
        let tile = |ext_r: u8, vvvv: u8| {
            let mut cx = DecodeContext::new(bytes, 0, 0, Bitness::Bits64, DecoderOptions::new());
            cx.state.encoding = EncodingKind::Vex;
            cx.state.ext_r = ext_r;
            cx.state.vvvv = vvvv;
            cx
        };
        let inst = run(&mut tile(0, 3), tdpbssd).unwrap();
        assert_eq!(inst.operands[0], Operand::reg(Register::new(RegisterClass::Tile, 1)));
        assert!(run(&mut tile(8, 3), tdpbssd).is_err());
        assert!(run(&mut tile(0, 11), tdpbssd).is_err());
    }

    #[test]
    fn test_unused_vvvv_must_be_zero() {
        let h = Handler::Vector {
            m: Mnemonic::Vmovups,
            ops: &[VOp::V(Vw::L), VOp::W(Vw::L)],
            elem: Element::Float32,
            attr: VAttr::empty(),
        };
        let bytes = [0xC1];
        let mut cx = DecodeContext::new(&bytes, 0, 0, Bitness::Bits64, DecoderOptions::new());
        cx.state.encoding = EncodingKind::Vex;
        cx.state.vvvv = 3;
        assert!(run(&mut cx, h).is_err());
    }

    #[test]
    fn test_is4_register_after_memory() {
        let h = Handler::Vector {
            m: Mnemonic::Vblendvps,
            ops: &[VOp::V(Vw::L), VOp::H(Vw::L), VOp::W(Vw::L), VOp::Is4(Vw::L)],
            elem: Element::Float32,
            attr: VAttr::empty(),
        };
        // [rax + 8], is4 = xmm3
        let bytes = [0x40, 0x08, 0x30];
        let mut cx = DecodeContext::new(&bytes, 0, 0, Bitness::Bits64, DecoderOptions::new());
        cx.state.encoding = EncodingKind::Vex;
        cx.state.vvvv = 2;
        let inst = run(&mut cx, h).unwrap();
        assert_eq!(inst.operands[1], Operand::reg(Register::xmm(2)));
        assert_eq!(inst.operands[2].memory().unwrap().displacement, 8);
        assert_eq!(inst.operands[3], Operand::reg(Register::xmm(3)));
        assert_eq!(cx.cursor.consumed(), 3);
    }

    #[test]
    fn test_legacy_sse_is_128_bit() {
        let h = Handler::Vector {
            m: Mnemonic::Addps,
            ops: &[VOp::V(Vw::L), VOp::W(Vw::L)],
            elem: Element::Float32,
            attr: VAttr::empty(),
        };
        let bytes = [0x00];
        let mut cx = DecodeContext::new(&bytes, 0, 0, Bitness::Bits32, DecoderOptions::new());
        let inst = run(&mut cx, h).unwrap();
        assert_eq!(inst.operands[0], Operand::reg(Register::xmm(0)));
        assert_eq!(inst.operands[1].memory().unwrap().size, MemorySize::Packed128(Element::Float32));
    }

    #[test]
    fn test_3dnow_suffix() {
        // pfadd mm0, mm1
        let bytes = [0xC1, 0x9E];
        let mut cx = DecodeContext::new(&bytes, 0, 0, Bitness::Bits32, DecoderOptions::new());
        let mut inst = Instruction::new(0, Bitness::Bits32);
        Handler::D3now.decode(&mut cx, 0x0F, &mut inst).unwrap();
        assert_eq!(inst.mnemonic, Mnemonic::Pfadd);
        assert!(cx.state.flags.contains(StateFlags::NO_IMM));

        let bytes = [0xC1, 0x00];
        let mut cx = DecodeContext::new(&bytes, 0, 0, Bitness::Bits32, DecoderOptions::new());
        assert!(Handler::D3now.decode(&mut cx, 0x0F, &mut inst).is_err());
    }
}
