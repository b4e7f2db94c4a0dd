//! Instruction operand types.

use crate::{MemorySize, Register};

/// An instruction operand.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operand {
    /// Register operand.
    Register(Register),
    /// Memory reference.
    Memory(MemoryRef),
    /// Immediate value.
    Immediate(Immediate),
    /// Near (same segment) branch target.
    NearBranch {
        /// Absolute target, truncated to the operand size.
        target: u64,
        /// Operand size in bits (16, 32 or 64).
        size: u8,
    },
    /// Far branch with an explicit selector (CALL/JMP ptr16:16/32).
    FarBranch {
        selector: u16,
        offset: u32,
        /// Offset size in bits (16 or 32).
        size: u8,
    },
}

impl Operand {
    /// Creates a register operand.
    pub fn reg(reg: Register) -> Self {
        Self::Register(reg)
    }

    /// Creates an immediate operand.
    pub fn imm(value: u64, kind: ImmediateKind) -> Self {
        Self::Immediate(Immediate { value, kind })
    }

    /// Creates a near branch operand.
    pub fn near(target: u64, size: u8) -> Self {
        Self::NearBranch { target, size }
    }

    /// Returns true if this is a register operand.
    pub fn is_register(&self) -> bool {
        matches!(self, Self::Register(_))
    }

    /// Returns true if this is an immediate operand.
    pub fn is_immediate(&self) -> bool {
        matches!(self, Self::Immediate(_))
    }

    /// Returns true if this is a memory operand.
    pub fn is_memory(&self) -> bool {
        matches!(self, Self::Memory(_))
    }

    /// Returns the register if this is a register operand.
    pub fn register(&self) -> Option<Register> {
        match self {
            Self::Register(r) => Some(*r),
            _ => None,
        }
    }

    /// Returns the memory reference if this is a memory operand.
    pub fn memory(&self) -> Option<&MemoryRef> {
        match self {
            Self::Memory(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the immediate if this is an immediate operand.
    pub fn immediate(&self) -> Option<Immediate> {
        match self {
            Self::Immediate(i) => Some(*i),
            _ => None,
        }
    }
}

/// How an immediate was encoded and extended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImmediateKind {
    Imm8,
    Imm16,
    Imm32,
    Imm64,
    /// 8-bit immediate sign-extended to 16 bits.
    Imm8to16,
    /// 8-bit immediate sign-extended to 32 bits.
    Imm8to32,
    /// 8-bit immediate sign-extended to 64 bits.
    Imm8to64,
    /// 32-bit immediate sign-extended to 64 bits.
    Imm32to64,
    /// Second 8-bit immediate (ENTER, EXTRQ/INSERTQ).
    Imm8Second,
}

impl ImmediateKind {
    /// Number of encoded bytes.
    pub fn encoded_size(&self) -> usize {
        match self {
            Self::Imm8 | Self::Imm8to16 | Self::Imm8to32 | Self::Imm8to64 | Self::Imm8Second => 1,
            Self::Imm16 => 2,
            Self::Imm32 | Self::Imm32to64 => 4,
            Self::Imm64 => 8,
        }
    }

    /// Width of the slot the value is extended into, in bits.
    pub fn width(&self) -> u8 {
        match self {
            Self::Imm8 | Self::Imm8Second => 8,
            Self::Imm16 | Self::Imm8to16 => 16,
            Self::Imm32 | Self::Imm8to32 => 32,
            Self::Imm64 | Self::Imm8to64 | Self::Imm32to64 => 64,
        }
    }

    /// Returns true if the encoded value is sign-extended.
    pub fn is_sign_extended(&self) -> bool {
        matches!(
            self,
            Self::Imm8to16 | Self::Imm8to32 | Self::Imm8to64 | Self::Imm32to64
        )
    }
}

/// Immediate value operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Immediate {
    /// The value, extended to the slot width and zero-filled above it.
    pub value: u64,
    /// Encoding of the value.
    pub kind: ImmediateKind,
}

impl Immediate {
    /// Returns the value as an unsigned u64.
    pub fn as_u64(&self) -> u64 {
        self.value
    }

    /// Returns the value interpreted as signed at its slot width.
    pub fn as_i64(&self) -> i64 {
        match self.kind.width() {
            8 => self.value as u8 as i8 as i64,
            16 => self.value as u16 as i16 as i64,
            32 => self.value as u32 as i32 as i64,
            _ => self.value as i64,
        }
    }
}

/// Memory reference operand.
///
/// Represents `segment:[base + index*scale + displacement]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemoryRef {
    /// Effective segment register.
    pub segment: Register,
    /// True if the segment came from an override prefix.
    pub segment_override: bool,
    /// Base register (eip/rip for relative addressing).
    pub base: Option<Register>,
    /// Index register (a vector register for VSIB).
    pub index: Option<Register>,
    /// Scale factor for index (1, 2, 4, or 8).
    pub scale: u8,
    /// Sign-extended displacement (already scaled for EVEX disp8*N).
    pub displacement: i64,
    /// Encoded displacement size in bytes (0, 1, 2, 4 or 8).
    pub displacement_size: u8,
    /// Access size tag.
    pub size: MemorySize,
    /// True for vector-SIB (gather/scatter) addressing.
    pub vsib: bool,
}

impl MemoryRef {
    /// Creates a memory reference with just a base register.
    pub fn base(segment: Register, reg: Register, size: MemorySize) -> Self {
        Self {
            segment,
            segment_override: false,
            base: Some(reg),
            index: None,
            scale: 1,
            displacement: 0,
            displacement_size: 0,
            size,
            vsib: false,
        }
    }

    /// Creates a memory reference with just a displacement (absolute address).
    pub fn absolute(segment: Register, address: i64, displacement_size: u8, size: MemorySize) -> Self {
        Self {
            segment,
            segment_override: false,
            base: None,
            index: None,
            scale: 1,
            displacement: address,
            displacement_size,
            size,
            vsib: false,
        }
    }

    /// Returns true for eip/rip-relative addressing.
    pub fn is_ip_relative(&self) -> bool {
        matches!(self.base, Some(Register { class: crate::RegisterClass::InstructionPointer, .. }))
    }

    /// Resolves an ip-relative reference against the address of the next instruction.
    pub fn ip_relative_target(&self, next_ip: u64) -> Option<u64> {
        let base = self.base?;
        if !self.is_ip_relative() {
            return None;
        }
        let target = next_ip.wrapping_add(self.displacement as u64);
        Some(if base == Register::EIP { target & 0xFFFF_FFFF } else { target })
    }
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Register(reg) => write!(f, "{}", reg.name()),
            Self::Immediate(imm) => {
                if imm.kind.is_sign_extended() && imm.as_i64() < 0 {
                    write!(f, "-{:#x}", imm.as_i64().unsigned_abs())
                } else {
                    write!(f, "{:#x}", imm.value)
                }
            }
            Self::Memory(mem) => {
                let keyword = mem.size.keyword();
                if !keyword.is_empty() {
                    write!(f, "{} ptr ", keyword)?;
                }
                if mem.segment_override {
                    write!(f, "{}:", mem.segment)?;
                }
                write!(f, "[")?;
                let mut has_content = false;

                if let Some(ref base) = mem.base {
                    write!(f, "{}", base.name())?;
                    has_content = true;
                }

                if let Some(ref index) = mem.index {
                    if has_content {
                        write!(f, " + ")?;
                    }
                    write!(f, "{}", index.name())?;
                    if mem.scale > 1 {
                        write!(f, "*{}", mem.scale)?;
                    }
                    has_content = true;
                }

                if mem.displacement != 0 || !has_content {
                    if has_content {
                        if mem.displacement > 0 {
                            write!(f, " + {:#x}", mem.displacement)?;
                        } else {
                            write!(f, " - {:#x}", mem.displacement.unsigned_abs())?;
                        }
                    } else {
                        write!(f, "{:#x}", mem.displacement as u64)?;
                    }
                }

                write!(f, "]")
            }
            Self::NearBranch { target, .. } => write!(f, "{:#x}", target),
            Self::FarBranch {
                selector, offset, ..
            } => write!(f, "{:#x}:{:#x}", selector, offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_immediate_sign_interpretation() {
        let imm = Immediate {
            value: 0xFFFF_FFFB,
            kind: ImmediateKind::Imm8to32,
        };
        assert_eq!(imm.as_i64(), -5);
        assert_eq!(imm.kind.encoded_size(), 1);
        assert_eq!(imm.kind.width(), 32);
    }

    #[test]
    fn test_ip_relative_target() {
        let mut mem = MemoryRef::base(Register::DS, Register::RIP, MemorySize::UInt32);
        mem.displacement = -0x10;
        assert_eq!(mem.ip_relative_target(0x1010), Some(0x1000));

        let plain = MemoryRef::base(Register::DS, Register::RAX, MemorySize::UInt32);
        assert_eq!(plain.ip_relative_target(0x1010), None);
    }

    #[test]
    fn test_memory_display() {
        let mut mem = MemoryRef::base(Register::DS, Register::EAX, MemorySize::UInt32);
        mem.index = Some(Register::ECX);
        mem.scale = 4;
        mem.displacement = -8;
        assert_eq!(
            Operand::Memory(mem).to_string(),
            "dword ptr [eax + ecx*4 - 0x8]"
        );
    }
}
