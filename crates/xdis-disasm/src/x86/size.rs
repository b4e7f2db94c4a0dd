//! Operand-size and register-file resolution.
//!
//! Everything here is a pure function of the prefix state, so the same
//! inputs always produce the same width and register.

use xdis_core::{Bitness, MemorySize, Register, RegisterClass};

/// A resolved operand or address width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpSize {
    Size8,
    Size16,
    Size32,
    Size64,
}

impl OpSize {
    /// Width in bits.
    pub fn bits(&self) -> u32 {
        match self {
            Self::Size8 => 8,
            Self::Size16 => 16,
            Self::Size32 => 32,
            Self::Size64 => 64,
        }
    }

    /// The general purpose register file of this width.
    pub fn gpr_class(&self) -> RegisterClass {
        match self {
            Self::Size8 => RegisterClass::Gpr8,
            Self::Size16 => RegisterClass::Gpr16,
            Self::Size32 => RegisterClass::Gpr32,
            Self::Size64 => RegisterClass::Gpr64,
        }
    }

    /// Unsigned integer memory size of this width.
    pub fn memory_size(&self) -> MemorySize {
        match self {
            Self::Size8 => MemorySize::UInt8,
            Self::Size16 => MemorySize::UInt16,
            Self::Size32 => MemorySize::UInt32,
            Self::Size64 => MemorySize::UInt64,
        }
    }

    /// Mask covering a value of this width.
    pub fn mask(&self) -> u64 {
        match self {
            Self::Size8 => 0xFF,
            Self::Size16 => 0xFFFF,
            Self::Size32 => 0xFFFF_FFFF,
            Self::Size64 => u64::MAX,
        }
    }

    /// Clamps 64 down to 32; the default operand size of 64-bit mode is 32.
    pub fn min_32(self) -> Self {
        match self {
            Self::Size64 => Self::Size32,
            other => other,
        }
    }

    /// Default width for a processor mode.
    pub fn from_bitness(bitness: Bitness) -> Self {
        match bitness {
            Bitness::Bits16 => Self::Size16,
            Bitness::Bits32 => Self::Size32,
            Bitness::Bits64 => Self::Size64,
        }
    }
}

/// How an instruction form picks its operand size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizePolicy {
    /// 66h toggles between 16 and 32 bits; REX.W selects 64 bits.
    Default,
    /// 64 bits by default in 64-bit mode; 66h selects 16 bits.
    /// Behaves like `Default` in the other modes.
    Default64,
    /// Always 64 bits in 64-bit mode. 66h selects 16 bits only with AMD
    /// semantics. Behaves like `Default` in the other modes.
    Force64,
    /// Unaffected by any prefix.
    Fixed(OpSize),
}

/// Resolves the operand size of an instruction form.
///
/// `has_66` must already exclude a 66h that was consumed as a mandatory prefix.
pub fn operand_size(
    bitness: Bitness,
    has_66: bool,
    rex_w: bool,
    policy: SizePolicy,
    amd: bool,
) -> OpSize {
    match (policy, bitness) {
        (SizePolicy::Fixed(size), _) => size,
        (_, Bitness::Bits16) => {
            if has_66 {
                OpSize::Size32
            } else {
                OpSize::Size16
            }
        }
        (_, Bitness::Bits32) => {
            if has_66 {
                OpSize::Size16
            } else {
                OpSize::Size32
            }
        }
        (SizePolicy::Default, Bitness::Bits64) => {
            if rex_w {
                OpSize::Size64
            } else if has_66 {
                OpSize::Size16
            } else {
                OpSize::Size32
            }
        }
        (SizePolicy::Default64, Bitness::Bits64) => {
            if has_66 && !rex_w {
                OpSize::Size16
            } else {
                OpSize::Size64
            }
        }
        (SizePolicy::Force64, Bitness::Bits64) => {
            if amd && has_66 && !rex_w {
                OpSize::Size16
            } else {
                OpSize::Size64
            }
        }
    }
}

/// Resolves the address size. Only 67h and the mode matter; REX.W never does.
pub fn address_size(bitness: Bitness, has_67: bool) -> OpSize {
    match (bitness, has_67) {
        (Bitness::Bits16, false) | (Bitness::Bits32, true) => OpSize::Size16,
        (Bitness::Bits16, true) | (Bitness::Bits32, false) | (Bitness::Bits64, true) => {
            OpSize::Size32
        }
        (Bitness::Bits64, false) => OpSize::Size64,
    }
}

/// Returns the general purpose register `index` of the given width.
///
/// Without a REX prefix, 8-bit indices 4..=7 name ah, ch, dh and bh instead
/// of spl, bpl, sil and dil.
pub fn gpr(size: OpSize, index: u8, has_rex: bool) -> Register {
    let index = index & 0x0F;
    match size {
        OpSize::Size8 if !has_rex && (4..8).contains(&index) => {
            Register::new(RegisterClass::Gpr8, index + 12)
        }
        _ => Register::new(size.gpr_class(), index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        use Bitness::*;
        let d = SizePolicy::Default;
        assert_eq!(operand_size(Bits16, false, false, d, false), OpSize::Size16);
        assert_eq!(operand_size(Bits16, true, false, d, false), OpSize::Size32);
        assert_eq!(operand_size(Bits32, false, false, d, false), OpSize::Size32);
        assert_eq!(operand_size(Bits32, true, false, d, false), OpSize::Size16);
        assert_eq!(operand_size(Bits64, true, false, d, false), OpSize::Size16);
        assert_eq!(operand_size(Bits64, true, true, d, false), OpSize::Size64);
        assert_eq!(operand_size(Bits64, false, false, d, false), OpSize::Size32);
    }

    #[test]
    fn test_default64_and_force64() {
        use Bitness::*;
        assert_eq!(
            operand_size(Bits64, false, false, SizePolicy::Default64, false),
            OpSize::Size64
        );
        assert_eq!(
            operand_size(Bits64, true, false, SizePolicy::Default64, false),
            OpSize::Size16
        );
        assert_eq!(
            operand_size(Bits64, true, false, SizePolicy::Force64, false),
            OpSize::Size64
        );
        assert_eq!(
            operand_size(Bits64, true, false, SizePolicy::Force64, true),
            OpSize::Size16
        );
        assert_eq!(
            operand_size(Bits32, true, false, SizePolicy::Force64, false),
            OpSize::Size16
        );
    }

    #[test]
    fn test_fixed_ignores_prefixes() {
        let fixed = SizePolicy::Fixed(OpSize::Size8);
        assert_eq!(operand_size(Bitness::Bits64, true, true, fixed, true), OpSize::Size8);
    }

    #[test]
    fn test_address_size() {
        assert_eq!(address_size(Bitness::Bits16, false), OpSize::Size16);
        assert_eq!(address_size(Bitness::Bits16, true), OpSize::Size32);
        assert_eq!(address_size(Bitness::Bits32, true), OpSize::Size16);
        assert_eq!(address_size(Bitness::Bits64, false), OpSize::Size64);
        assert_eq!(address_size(Bitness::Bits64, true), OpSize::Size32);
    }

    #[test]
    fn test_high_byte_registers() {
        assert_eq!(gpr(OpSize::Size8, 4, false), Register::AH);
        assert_eq!(gpr(OpSize::Size8, 4, true).name(), "spl");
        assert_eq!(gpr(OpSize::Size8, 7, false).name(), "bh");
        assert_eq!(gpr(OpSize::Size8, 12, true).name(), "r12b");
        assert_eq!(gpr(OpSize::Size32, 0, false), Register::EAX);
        assert_eq!(gpr(OpSize::Size64, 15, true), Register::R15);
    }
}
