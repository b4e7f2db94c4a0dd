//! Operand lists shared by the vector table modules.
//!
//! Names spell the operand sources in order, using the manual's letters
//! (V = ModRM.reg, H = vvvv, W = ModRM.rm or memory, U = ModRM.rm register,
//! M = memory, E/G/B/R = general purpose register sources, K = opmask,
//! P/Q/N = MMX). A trailing `S` marks a scalar rm operand; `X` a fixed
//! 128-bit operand; `HALF`/`QTR`/`EIGHTH` a narrowed rm operand.

use xdis_core::{Element, MemorySize, Register};

use super::super::handlers::{Gs, VOp, VOp::*, Vw::*};

pub type Ops = &'static [VOp];

pub const NONE: Ops = &[];

// SSE / AVX, vector length scaled
pub const VW: Ops = &[V(L), W(L)];
pub const WV: Ops = &[W(L), V(L)];
pub const VWIB: Ops = &[V(L), W(L), Ib];
pub const VHW: Ops = &[V(L), H(L), W(L)];
pub const VHWIB: Ops = &[V(L), H(L), W(L), Ib];
pub const VHWX: Ops = &[V(L), H(L), W(X)];
pub const VHWXIB: Ops = &[V(L), H(L), W(X), Ib];
pub const VHWIS4: Ops = &[V(L), H(L), W(L), Is4(L)];
pub const VHIS4W: Ops = &[V(L), H(L), Is4(L), W(L)];
pub const VHWIS4IB: Ops = &[V(L), H(L), W(L), Is4(L), Ib];
pub const VHIS4WIB: Ops = &[V(L), H(L), Is4(L), W(L), Ib];
pub const VW0: Ops = &[V(L), W(L), Fixed(Register::xmm(0))];
pub const VM: Ops = &[V(L), M(L)];
pub const MV: Ops = &[M(L), V(L)];
pub const VHM: Ops = &[V(L), H(L), M(L)];
pub const MHV: Ops = &[M(L), H(L), V(L)];
pub const UIB: Ops = &[U(L), Ib];
pub const HUIB: Ops = &[H(L), U(L), Ib];
pub const VWHALF: Ops = &[V(L), W(Half)];
pub const VWQTR: Ops = &[V(L), W(Quarter)];
pub const VWEIGHTH: Ops = &[V(L), W(Eighth)];
pub const VHALFW: Ops = &[V(Half), W(L)];
pub const WHALFV: Ops = &[W(Half), V(L)];
pub const WQTRV: Ops = &[W(Quarter), V(L)];
pub const WEIGHTHV: Ops = &[W(Eighth), V(L)];
pub const WHALFVIB: Ops = &[W(Half), V(L), Ib];
pub const WXVIB: Ops = &[W(X), V(L), Ib];
pub const WYVIB: Ops = &[W(Y), V(L), Ib];
pub const VHWYIB: Ops = &[V(L), H(L), W(Y), Ib];
pub const VMX: Ops = &[V(L), Mf(MemorySize::Packed128(Element::Float32))];
pub const VMX_INT: Ops = &[V(L), Mf(MemorySize::Packed128(Element::Int32))];

// Scalar forms: xmm register or a single element in memory
pub const VWS: Ops = &[V(X), Ws];
pub const WSV: Ops = &[Ws, V(X)];
pub const VWSIB: Ops = &[V(X), Ws, Ib];
pub const VHWS: Ops = &[V(X), H(X), Ws];
pub const VHWSIB: Ops = &[V(X), H(X), Ws, Ib];
pub const VHUX: Ops = &[V(X), H(X), U(X)];
pub const UHVX: Ops = &[U(X), H(X), V(X)];
pub const VLWS: Ops = &[V(L), Ws];
pub const VHWSIS4: Ops = &[V(X), H(X), Ws, Is4(X)];
pub const VHIS4WS: Ops = &[V(X), H(X), Is4(X), Ws];

// Fixed 128-bit forms
pub const VWX_X: Ops = &[V(X), W(X)];
pub const VWXIB_X: Ops = &[V(X), W(X), Ib];
pub const VHWX_X: Ops = &[V(X), H(X), W(X)];
pub const VHWXIB_X: Ops = &[V(X), H(X), W(X), Ib];
pub const VHWIS4_X: Ops = &[V(X), H(X), W(X), Is4(X)];
pub const VHIS4W_X: Ops = &[V(X), H(X), Is4(X), W(X)];
pub const VWH_X: Ops = &[V(X), W(X), H(X)];
pub const VUX: Ops = &[V(X), U(X)];
pub const VUXIBIB: Ops = &[V(X), U(X), Ib, Ib2];
pub const UXIBIB: Ops = &[U(X), Ib, Ib2];
pub const VXMQ: Ops = &[V(X), Mf(MemorySize::UInt64)];
pub const MQVX: Ops = &[Mf(MemorySize::UInt64), V(X)];
pub const VHMQ: Ops = &[V(X), H(X), Mf(MemorySize::UInt64)];
pub const MD: Ops = &[Mf(MemorySize::UInt32)];
pub const MSSV: Ops = &[Mf(MemorySize::Float32), V(X)];
pub const MSDV: Ops = &[Mf(MemorySize::Float64), V(X)];

// General purpose operands inside vector encodings
pub const GDU: Ops = &[G(Gs::D), U(L)];
pub const GYWS: Ops = &[G(Gs::Y), Ws];
pub const VEY: Ops = &[V(X), E(Gs::Y)];
pub const EYV: Ops = &[E(Gs::Y), V(X)];
pub const VHEY: Ops = &[V(X), H(X), E(Gs::Y)];
pub const VEYIB: Ops = &[V(X), E(Gs::Y), Ib];
pub const VHEYIB: Ops = &[V(X), H(X), E(Gs::Y), Ib];
pub const VEDWIB: Ops = &[V(X), E(Gs::DW), Ib];
pub const VHEDWIB: Ops = &[V(X), H(X), E(Gs::DW), Ib];
pub const VEDBIB: Ops = &[V(X), E(Gs::DB), Ib];
pub const VHEDBIB: Ops = &[V(X), H(X), E(Gs::DB), Ib];
pub const EDBVIB: Ops = &[E(Gs::DB), V(X), Ib];
pub const EDWVIB: Ops = &[E(Gs::DW), V(X), Ib];
pub const EYVIB: Ops = &[E(Gs::Y), V(X), Ib];
pub const EDVIB: Ops = &[E(Gs::D), V(X), Ib];
pub const GDUIB: Ops = &[G(Gs::D), U(X), Ib];
pub const MEYGY: Ops = &[Me(Gs::Y), G(Gs::Y)];
pub const MEYGYBY: Ops = &[Me(Gs::Y), G(Gs::Y), B(Gs::Y)];
pub const EY: Ops = &[E(Gs::Y)];
pub const GYEY: Ops = &[G(Gs::Y), E(Gs::Y)];
pub const GYBYEY: Ops = &[G(Gs::Y), B(Gs::Y), E(Gs::Y)];
pub const GYEYBY: Ops = &[G(Gs::Y), E(Gs::Y), B(Gs::Y)];
pub const GYEYIB: Ops = &[G(Gs::Y), E(Gs::Y), Ib];
pub const GYEYID: Ops = &[G(Gs::Y), E(Gs::Y), Id];
pub const BYEY: Ops = &[B(Gs::Y), E(Gs::Y)];
pub const BYEDID: Ops = &[B(Gs::Y), E(Gs::D), Id];
pub const RY: Ops = &[R(Gs::Y)];
pub const RD: Ops = &[R(Gs::D)];
pub const RQ: Ops = &[R(Gs::Q)];
pub const RMODE: Ops = &[R(Gs::Mode)];
pub const EMODEGMODE: Ops = &[E(Gs::Mode), G(Gs::Mode)];
pub const GMODEEMODE: Ops = &[G(Gs::Mode), E(Gs::Mode)];
pub const GMODEMX: Ops = &[G(Gs::Mode), Mf(MemorySize::UInt128)];
pub const GMODEM512: Ops = &[G(Gs::Mode), Mf(MemorySize::UInt512Block)];

// MMX
pub const PQ: Ops = &[P, Q];
pub const QP: Ops = &[Q, P];
pub const PQIB: Ops = &[P, Q, Ib];
pub const NIB: Ops = &[N, Ib];
pub const PN: Ops = &[P, N];
pub const PEY: Ops = &[P, E(Gs::Y)];
pub const EYP: Ops = &[E(Gs::Y), P];
pub const PEDWIB: Ops = &[P, E(Gs::DW), Ib];
pub const GDNIB: Ops = &[G(Gs::D), N, Ib];
pub const GDN: Ops = &[G(Gs::D), N];
pub const MQP: Ops = &[Mf(MemorySize::UInt64), P];
pub const PWHALF: Ops = &[P, W(Half)];
pub const PW: Ops = &[P, W(L)];
pub const VXQ: Ops = &[V(X), Q];
pub const VXN: Ops = &[V(X), N];
pub const PUX: Ops = &[P, U(X)];

// Opmask
pub const KKHKR: Ops = &[K, KH, KR];
pub const KKR: Ops = &[K, KR];
pub const KKRIB: Ops = &[K, KR, Ib];
pub const KKEB: Ops = &[K, KE(MemorySize::UInt8)];
pub const KKEW: Ops = &[K, KE(MemorySize::UInt16)];
pub const KKED: Ops = &[K, KE(MemorySize::UInt32)];
pub const KKEQ: Ops = &[K, KE(MemorySize::UInt64)];
pub const MBK: Ops = &[Mf(MemorySize::UInt8), K];
pub const MWK: Ops = &[Mf(MemorySize::UInt16), K];
pub const MDK: Ops = &[Mf(MemorySize::UInt32), K];
pub const MQK: Ops = &[Mf(MemorySize::UInt64), K];
pub const KRD: Ops = &[K, R(Gs::D)];
pub const KRQ: Ops = &[K, R(Gs::Q)];
pub const GDKR: Ops = &[G(Gs::D), KR];
pub const GQKR: Ops = &[G(Gs::Q), KR];

// Gathers and scatters (VSIB)
pub const GATHER_D: Ops = &[V(L), Vsib(L), H(L)];
pub const GATHER_DQ: Ops = &[V(L), Vsib(Half), H(L)];
pub const GATHER_QD: Ops = &[V(Half), Vsib(L), H(Half)];

// EVEX opmask destinations, GPR broadcasts and VSIB forms without a mask
// operand in vvvv
pub const KHW: Ops = &[K, H(L), W(L)];
pub const KHWIB: Ops = &[K, H(L), W(L), Ib];
pub const KHWSIB: Ops = &[K, H(X), Ws, Ib];
pub const KWIB: Ops = &[K, W(L), Ib];
pub const KWSIB: Ops = &[K, Ws, Ib];
pub const KU: Ops = &[K, U(L)];
pub const VKR: Ops = &[V(L), KR];
pub const HWIB: Ops = &[H(L), W(L), Ib];
pub const VRD: Ops = &[V(L), R(Gs::D)];
pub const VRY: Ops = &[V(L), R(Gs::Y)];
pub const VM_X: Ops = &[V(L), M(X)];
pub const VM_Y: Ops = &[V(L), M(Y)];
pub const EGATHER_D: Ops = &[V(L), Vsib(L)];
pub const EGATHER_DQ: Ops = &[V(L), Vsib(Half)];
pub const EGATHER_QD: Ops = &[V(Half), Vsib(L)];
pub const ESCATTER_D: Ops = &[Vsib(L), V(L)];
pub const ESCATTER_DQ: Ops = &[Vsib(Half), V(L)];
pub const ESCATTER_QD: Ops = &[Vsib(L), V(Half)];

// Four-iteration forms: H names the first of a block of four registers
pub const VH4MPS: Ops = &[V(L), H(L), Mf(MemorySize::Packed128(Element::Float32))];
pub const VH4MSS: Ops = &[V(X), H(X), Mf(MemorySize::Packed128(Element::Float32))];
pub const VH4MW: Ops = &[V(L), H(L), Mf(MemorySize::Packed128(Element::Int16))];

// MPX
pub const BND_EMODE: Ops = &[Bnd, E(Gs::Mode)];
pub const BND_M: Ops = &[Bnd, Mf(MemorySize::Unknown)];
pub const M_BND: Ops = &[Mf(MemorySize::Unknown), Bnd];
pub const BND_BNDW: Ops = &[Bnd, BndW];
pub const BNDW_BND: Ops = &[BndW, Bnd];

// AMX
pub const TM: Ops = &[T, Mf(MemorySize::Unknown)];
pub const MT: Ops = &[Mf(MemorySize::Unknown), T];
pub const T_ONLY: Ops = &[T];
pub const TTRTH: Ops = &[T, TR, TH];
pub const M64B: Ops = &[Mf(MemorySize::UInt512Block)];
