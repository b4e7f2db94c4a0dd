//! Memory operand size tags.

/// Element type of a packed or broadcast memory operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Element {
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float16,
    BFloat16,
    Float32,
    Float64,
    UInt128,
}

impl Element {
    /// Element size in bytes.
    pub fn size(&self) -> usize {
        match self {
            Self::Int8 | Self::UInt8 => 1,
            Self::Int16 | Self::UInt16 | Self::Float16 | Self::BFloat16 => 2,
            Self::Int32 | Self::UInt32 | Self::Float32 => 4,
            Self::Int64 | Self::UInt64 | Self::Float64 => 8,
            Self::UInt128 => 16,
        }
    }

    /// Returns the scalar memory size for one element.
    pub fn scalar(&self) -> MemorySize {
        match self {
            Self::Int8 | Self::UInt8 => MemorySize::UInt8,
            Self::Int16 | Self::UInt16 | Self::BFloat16 => MemorySize::UInt16,
            Self::Float16 => MemorySize::Float16,
            Self::Int32 => MemorySize::Int32,
            Self::UInt32 => MemorySize::UInt32,
            Self::Float32 => MemorySize::Float32,
            Self::Int64 => MemorySize::Int64,
            Self::UInt64 => MemorySize::UInt64,
            Self::Float64 => MemorySize::Float64,
            Self::UInt128 => MemorySize::UInt128,
        }
    }
}

/// Size tag of a memory operand.
///
/// The tag comes from the instruction form, never from the ModRM byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MemorySize {
    /// No size (e.g. LEA, NOP, prefetch hints).
    #[default]
    Unknown,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    UInt128,
    UInt256,
    UInt512,
    Int16,
    Int32,
    Int64,
    Float16,
    Float32,
    Float64,
    Float80,
    /// 80-bit packed BCD (FBLD/FBSTP).
    Bcd,
    /// 16-bit offset + 16-bit selector.
    FarPtr16_16,
    /// 32-bit offset + 16-bit selector.
    FarPtr16_32,
    /// 64-bit offset + 16-bit selector.
    FarPtr16_64,
    /// Pair of 16-bit bounds (BOUND).
    Bound16_16,
    /// Pair of 32-bit bounds (BOUND).
    Bound32_32,
    /// MPX bound pair in 32-bit mode.
    Bnd32,
    /// MPX bound pair in 64-bit mode.
    Bnd64,
    /// 6-byte descriptor table pointer (LGDT/SGDT outside 64-bit mode).
    Fword6,
    /// 10-byte descriptor table pointer (64-bit mode).
    Fword10,
    /// 16-bit x87 environment.
    FpuEnv14,
    /// 32-bit x87 environment.
    FpuEnv28,
    /// 16-bit x87 state.
    FpuState94,
    /// 32-bit x87 state.
    FpuState108,
    /// FXSAVE area.
    Fxsave512,
    /// XSAVE area (variable length).
    Xsave,
    /// MOVDIR64B/ENQCMD 64-byte block.
    UInt512Block,
    /// Packed 64-bit vector of elements.
    Packed64(Element),
    /// Packed 128-bit vector of elements.
    Packed128(Element),
    /// Packed 256-bit vector of elements.
    Packed256(Element),
    /// Packed 512-bit vector of elements.
    Packed512(Element),
    /// EVEX embedded broadcast of a single element.
    Broadcast(Element),
}

impl MemorySize {
    /// Size in bytes (0 when unknown or variable).
    pub fn size(&self) -> usize {
        match self {
            Self::Unknown | Self::Xsave => 0,
            Self::UInt8 => 1,
            Self::UInt16 | Self::Int16 | Self::Float16 => 2,
            Self::UInt32 | Self::Int32 | Self::Float32 | Self::FarPtr16_16 | Self::Bound16_16 => 4,
            Self::UInt64 | Self::Int64 | Self::Float64 | Self::Bound32_32 | Self::Bnd32 => 8,
            Self::FarPtr16_32 | Self::Fword6 => 6,
            Self::Float80 | Self::Bcd | Self::FarPtr16_64 | Self::Fword10 => 10,
            Self::UInt128 | Self::Bnd64 => 16,
            Self::UInt256 => 32,
            Self::UInt512 | Self::UInt512Block => 64,
            Self::FpuEnv14 => 14,
            Self::FpuEnv28 => 28,
            Self::FpuState94 => 94,
            Self::FpuState108 => 108,
            Self::Fxsave512 => 512,
            Self::Packed64(_) => 8,
            Self::Packed128(_) => 16,
            Self::Packed256(_) => 32,
            Self::Packed512(_) => 64,
            Self::Broadcast(e) => e.size(),
        }
    }

    /// Returns a packed size of `bytes` bytes holding `element`s.
    pub fn packed(bytes: usize, element: Element) -> Self {
        match bytes {
            8 => Self::Packed64(element),
            16 => Self::Packed128(element),
            32 => Self::Packed256(element),
            64 => Self::Packed512(element),
            4 => match element {
                Element::Float32 => Self::Float32,
                Element::Int32 => Self::Int32,
                _ => Self::UInt32,
            },
            2 => Self::UInt16,
            _ => Self::Unknown,
        }
    }

    /// Returns true for broadcast memory operands.
    pub fn is_broadcast(&self) -> bool {
        matches!(self, Self::Broadcast(_))
    }

    /// Returns the element type for packed and broadcast sizes.
    pub fn element(&self) -> Option<Element> {
        match self {
            Self::Packed64(e)
            | Self::Packed128(e)
            | Self::Packed256(e)
            | Self::Packed512(e)
            | Self::Broadcast(e) => Some(*e),
            _ => None,
        }
    }

    /// Returns the conventional size keyword for this tag.
    pub fn keyword(&self) -> &'static str {
        match self.size() {
            1 => "byte",
            2 => "word",
            4 => "dword",
            6 => "fword",
            8 => "qword",
            10 => "tbyte",
            16 => "xmmword",
            32 => "ymmword",
            64 => "zmmword",
            _ => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes() {
        assert_eq!(MemorySize::Packed256(Element::Float32).size(), 32);
        assert_eq!(MemorySize::Broadcast(Element::Float64).size(), 8);
        assert_eq!(MemorySize::FarPtr16_32.size(), 6);
        assert_eq!(MemorySize::Float80.keyword(), "tbyte");
    }

    #[test]
    fn test_packed_constructor() {
        assert_eq!(
            MemorySize::packed(64, Element::Int32),
            MemorySize::Packed512(Element::Int32)
        );
        assert_eq!(MemorySize::packed(4, Element::Float32), MemorySize::Float32);
        assert_eq!(
            MemorySize::packed(16, Element::Float64).element(),
            Some(Element::Float64)
        );
    }
}
