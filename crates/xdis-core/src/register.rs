//! x86 register representation.

use crate::Error;

/// Register file a register belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegisterClass {
    /// 8-bit general purpose (al..r15b, ah..bh).
    Gpr8,
    /// 16-bit general purpose (ax..r15w).
    Gpr16,
    /// 32-bit general purpose (eax..r15d).
    Gpr32,
    /// 64-bit general purpose (rax..r15).
    Gpr64,
    /// Segment registers (es, cs, ss, ds, fs, gs).
    Segment,
    /// Instruction pointer (eip, rip), used for relative addressing.
    InstructionPointer,
    /// Control registers (cr0..cr15).
    Control,
    /// Debug registers (dr0..dr15).
    Debug,
    /// 386/486 test registers (tr0..tr7).
    Test,
    /// x87 stack registers (st0..st7).
    St,
    /// MMX registers (mm0..mm7).
    Mmx,
    /// 128-bit vector registers.
    Xmm,
    /// 256-bit vector registers.
    Ymm,
    /// 512-bit vector registers.
    Zmm,
    /// AVX-512 opmask registers (k0..k7).
    Opmask,
    /// MPX bound registers (bnd0..bnd3).
    Bound,
    /// AMX tile registers (tmm0..tmm7).
    Tile,
}

impl RegisterClass {
    /// Number of registers in this class.
    pub fn count(&self) -> u8 {
        match self {
            Self::Gpr8 => 20,
            Self::Gpr16 | Self::Gpr32 | Self::Gpr64 => 16,
            Self::Segment => 6,
            Self::InstructionPointer => 2,
            Self::Control | Self::Debug => 16,
            Self::Test | Self::St | Self::Mmx | Self::Opmask | Self::Tile => 8,
            Self::Xmm | Self::Ymm | Self::Zmm => 32,
            Self::Bound => 4,
        }
    }
}

/// An x86 register, identified by its class and index within the class.
///
/// GPR indices follow the hardware encoding (0 = ax, 1 = cx, ...). In the
/// 8-bit file, indices 16..=19 name the legacy high-byte registers ah, ch,
/// dh and bh, which are only reachable without a REX prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Register {
    /// The register file.
    pub class: RegisterClass,
    /// Index within the file.
    pub index: u8,
}

impl Register {
    /// Creates a register without validating the index.
    pub const fn new(class: RegisterClass, index: u8) -> Self {
        Self { class, index }
    }

    /// Creates a register, checking that the index exists in the class.
    pub fn try_new(class: RegisterClass, index: u8) -> Result<Self, Error> {
        if index < class.count() {
            Ok(Self { class, index })
        } else {
            Err(Error::InvalidRegisterIndex { class, index })
        }
    }

    pub const AL: Register = Register::new(RegisterClass::Gpr8, 0);
    pub const CL: Register = Register::new(RegisterClass::Gpr8, 1);
    pub const DL: Register = Register::new(RegisterClass::Gpr8, 2);
    pub const BL: Register = Register::new(RegisterClass::Gpr8, 3);
    pub const AH: Register = Register::new(RegisterClass::Gpr8, 16);

    pub const AX: Register = Register::new(RegisterClass::Gpr16, 0);
    pub const CX: Register = Register::new(RegisterClass::Gpr16, 1);
    pub const DX: Register = Register::new(RegisterClass::Gpr16, 2);
    pub const BX: Register = Register::new(RegisterClass::Gpr16, 3);
    pub const SP: Register = Register::new(RegisterClass::Gpr16, 4);
    pub const BP: Register = Register::new(RegisterClass::Gpr16, 5);
    pub const SI: Register = Register::new(RegisterClass::Gpr16, 6);
    pub const DI: Register = Register::new(RegisterClass::Gpr16, 7);

    pub const EAX: Register = Register::new(RegisterClass::Gpr32, 0);
    pub const ECX: Register = Register::new(RegisterClass::Gpr32, 1);
    pub const EDX: Register = Register::new(RegisterClass::Gpr32, 2);
    pub const EBX: Register = Register::new(RegisterClass::Gpr32, 3);
    pub const ESP: Register = Register::new(RegisterClass::Gpr32, 4);
    pub const EBP: Register = Register::new(RegisterClass::Gpr32, 5);
    pub const ESI: Register = Register::new(RegisterClass::Gpr32, 6);
    pub const EDI: Register = Register::new(RegisterClass::Gpr32, 7);

    pub const RAX: Register = Register::new(RegisterClass::Gpr64, 0);
    pub const RCX: Register = Register::new(RegisterClass::Gpr64, 1);
    pub const RDX: Register = Register::new(RegisterClass::Gpr64, 2);
    pub const RBX: Register = Register::new(RegisterClass::Gpr64, 3);
    pub const RSP: Register = Register::new(RegisterClass::Gpr64, 4);
    pub const RBP: Register = Register::new(RegisterClass::Gpr64, 5);
    pub const RSI: Register = Register::new(RegisterClass::Gpr64, 6);
    pub const RDI: Register = Register::new(RegisterClass::Gpr64, 7);
    pub const R8: Register = Register::new(RegisterClass::Gpr64, 8);
    pub const R15: Register = Register::new(RegisterClass::Gpr64, 15);

    pub const ES: Register = Register::new(RegisterClass::Segment, 0);
    pub const CS: Register = Register::new(RegisterClass::Segment, 1);
    pub const SS: Register = Register::new(RegisterClass::Segment, 2);
    pub const DS: Register = Register::new(RegisterClass::Segment, 3);
    pub const FS: Register = Register::new(RegisterClass::Segment, 4);
    pub const GS: Register = Register::new(RegisterClass::Segment, 5);

    pub const EIP: Register = Register::new(RegisterClass::InstructionPointer, 0);
    pub const RIP: Register = Register::new(RegisterClass::InstructionPointer, 1);

    pub const ST0: Register = Register::new(RegisterClass::St, 0);
    pub const K0: Register = Register::new(RegisterClass::Opmask, 0);

    /// Returns the xmm register with the given index.
    pub const fn xmm(index: u8) -> Self {
        Self::new(RegisterClass::Xmm, index)
    }

    /// Returns the ymm register with the given index.
    pub const fn ymm(index: u8) -> Self {
        Self::new(RegisterClass::Ymm, index)
    }

    /// Returns the zmm register with the given index.
    pub const fn zmm(index: u8) -> Self {
        Self::new(RegisterClass::Zmm, index)
    }

    /// Returns the x87 stack register st(i).
    pub const fn st(index: u8) -> Self {
        Self::new(RegisterClass::St, index)
    }

    /// Returns the opmask register with the given index.
    pub const fn k(index: u8) -> Self {
        Self::new(RegisterClass::Opmask, index)
    }

    /// Returns the register size in bits (0 for tiles, whose size is configured).
    pub fn size(&self) -> u16 {
        match self.class {
            RegisterClass::Gpr8 => 8,
            RegisterClass::Gpr16 | RegisterClass::Segment => 16,
            RegisterClass::Gpr32 | RegisterClass::Test => 32,
            RegisterClass::Gpr64 | RegisterClass::Mmx | RegisterClass::Opmask => 64,
            RegisterClass::InstructionPointer => {
                if self.index == 0 {
                    32
                } else {
                    64
                }
            }
            RegisterClass::Control | RegisterClass::Debug => 64,
            RegisterClass::St => 80,
            RegisterClass::Xmm | RegisterClass::Bound => 128,
            RegisterClass::Ymm => 256,
            RegisterClass::Zmm => 512,
            RegisterClass::Tile => 0,
        }
    }

    /// Returns true for any general purpose register.
    pub fn is_gpr(&self) -> bool {
        matches!(
            self.class,
            RegisterClass::Gpr8 | RegisterClass::Gpr16 | RegisterClass::Gpr32 | RegisterClass::Gpr64
        )
    }

    /// Returns true for xmm, ymm and zmm registers.
    pub fn is_vector(&self) -> bool {
        matches!(self.class, RegisterClass::Xmm | RegisterClass::Ymm | RegisterClass::Zmm)
    }

    /// Returns the canonical lower-case name.
    pub fn name(&self) -> &'static str {
        let i = self.index as usize;
        let names: &[&'static str] = match self.class {
            RegisterClass::Gpr8 => &GPR8_NAMES,
            RegisterClass::Gpr16 => &GPR16_NAMES,
            RegisterClass::Gpr32 => &GPR32_NAMES,
            RegisterClass::Gpr64 => &GPR64_NAMES,
            RegisterClass::Segment => &["es", "cs", "ss", "ds", "fs", "gs"],
            RegisterClass::InstructionPointer => &["eip", "rip"],
            RegisterClass::Control => &CR_NAMES,
            RegisterClass::Debug => &DR_NAMES,
            RegisterClass::Test => &["tr0", "tr1", "tr2", "tr3", "tr4", "tr5", "tr6", "tr7"],
            RegisterClass::St => &["st0", "st1", "st2", "st3", "st4", "st5", "st6", "st7"],
            RegisterClass::Mmx => &["mm0", "mm1", "mm2", "mm3", "mm4", "mm5", "mm6", "mm7"],
            RegisterClass::Xmm => &XMM_NAMES,
            RegisterClass::Ymm => &YMM_NAMES,
            RegisterClass::Zmm => &ZMM_NAMES,
            RegisterClass::Opmask => &["k0", "k1", "k2", "k3", "k4", "k5", "k6", "k7"],
            RegisterClass::Bound => &["bnd0", "bnd1", "bnd2", "bnd3"],
            RegisterClass::Tile => &["tmm0", "tmm1", "tmm2", "tmm3", "tmm4", "tmm5", "tmm6", "tmm7"],
        };
        names.get(i).copied().unwrap_or("unknown")
    }
}

impl std::fmt::Display for Register {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

const GPR8_NAMES: [&str; 20] = [
    "al", "cl", "dl", "bl", "spl", "bpl", "sil", "dil", "r8b", "r9b", "r10b", "r11b", "r12b",
    "r13b", "r14b", "r15b", "ah", "ch", "dh", "bh",
];

const GPR16_NAMES: [&str; 16] = [
    "ax", "cx", "dx", "bx", "sp", "bp", "si", "di", "r8w", "r9w", "r10w", "r11w", "r12w", "r13w",
    "r14w", "r15w",
];

const GPR32_NAMES: [&str; 16] = [
    "eax", "ecx", "edx", "ebx", "esp", "ebp", "esi", "edi", "r8d", "r9d", "r10d", "r11d", "r12d",
    "r13d", "r14d", "r15d",
];

const GPR64_NAMES: [&str; 16] = [
    "rax", "rcx", "rdx", "rbx", "rsp", "rbp", "rsi", "rdi", "r8", "r9", "r10", "r11", "r12", "r13",
    "r14", "r15",
];

const CR_NAMES: [&str; 16] = [
    "cr0", "cr1", "cr2", "cr3", "cr4", "cr5", "cr6", "cr7", "cr8", "cr9", "cr10", "cr11", "cr12",
    "cr13", "cr14", "cr15",
];

const DR_NAMES: [&str; 16] = [
    "dr0", "dr1", "dr2", "dr3", "dr4", "dr5", "dr6", "dr7", "dr8", "dr9", "dr10", "dr11", "dr12",
    "dr13", "dr14", "dr15",
];

const XMM_NAMES: [&str; 32] = [
    "xmm0", "xmm1", "xmm2", "xmm3", "xmm4", "xmm5", "xmm6", "xmm7", "xmm8", "xmm9", "xmm10",
    "xmm11", "xmm12", "xmm13", "xmm14", "xmm15", "xmm16", "xmm17", "xmm18", "xmm19", "xmm20",
    "xmm21", "xmm22", "xmm23", "xmm24", "xmm25", "xmm26", "xmm27", "xmm28", "xmm29", "xmm30",
    "xmm31",
];

const YMM_NAMES: [&str; 32] = [
    "ymm0", "ymm1", "ymm2", "ymm3", "ymm4", "ymm5", "ymm6", "ymm7", "ymm8", "ymm9", "ymm10",
    "ymm11", "ymm12", "ymm13", "ymm14", "ymm15", "ymm16", "ymm17", "ymm18", "ymm19", "ymm20",
    "ymm21", "ymm22", "ymm23", "ymm24", "ymm25", "ymm26", "ymm27", "ymm28", "ymm29", "ymm30",
    "ymm31",
];

const ZMM_NAMES: [&str; 32] = [
    "zmm0", "zmm1", "zmm2", "zmm3", "zmm4", "zmm5", "zmm6", "zmm7", "zmm8", "zmm9", "zmm10",
    "zmm11", "zmm12", "zmm13", "zmm14", "zmm15", "zmm16", "zmm17", "zmm18", "zmm19", "zmm20",
    "zmm21", "zmm22", "zmm23", "zmm24", "zmm25", "zmm26", "zmm27", "zmm28", "zmm29", "zmm30",
    "zmm31",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpr_names() {
        assert_eq!(Register::EAX.name(), "eax");
        assert_eq!(Register::new(RegisterClass::Gpr8, 4).name(), "spl");
        assert_eq!(Register::new(RegisterClass::Gpr8, 17).name(), "ch");
        assert_eq!(Register::R15.name(), "r15");
        assert_eq!(Register::new(RegisterClass::Gpr16, 9).name(), "r9w");
    }

    #[test]
    fn test_vector_names_and_sizes() {
        assert_eq!(Register::zmm(31).name(), "zmm31");
        assert_eq!(Register::ymm(3).size(), 256);
        assert_eq!(Register::RIP.size(), 64);
        assert_eq!(Register::EIP.size(), 32);
        assert!(Register::xmm(0).is_vector());
        assert!(!Register::k(1).is_vector());
    }

    #[test]
    fn test_try_new_rejects_out_of_range() {
        assert!(Register::try_new(RegisterClass::Segment, 5).is_ok());
        assert!(matches!(
            Register::try_new(RegisterClass::Segment, 6),
            Err(Error::InvalidRegisterIndex { index: 6, .. })
        ));
    }
}
