//! Processor mode and encoding identification.

/// Processor bitness (default code size) the decoder runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bitness {
    /// Real mode or 16-bit protected mode.
    Bits16,
    /// 32-bit protected mode.
    Bits32,
    /// 64-bit long mode.
    Bits64,
}

impl Bitness {
    /// Returns the bitness as a number of bits.
    pub fn bits(&self) -> u32 {
        match self {
            Self::Bits16 => 16,
            Self::Bits32 => 32,
            Self::Bits64 => 64,
        }
    }

    /// Parses a bit count (16, 32 or 64).
    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            16 => Some(Self::Bits16),
            32 => Some(Self::Bits32),
            64 => Some(Self::Bits64),
            _ => None,
        }
    }

    /// Returns whether this is 64-bit long mode.
    pub fn is_64bit(&self) -> bool {
        matches!(self, Self::Bits64)
    }

    /// Returns the mask applied to instruction pointers in this mode.
    pub fn ip_mask(&self) -> u64 {
        match self {
            Self::Bits16 => 0xFFFF,
            Self::Bits32 => 0xFFFF_FFFF,
            Self::Bits64 => u64::MAX,
        }
    }
}

impl TryFrom<u32> for Bitness {
    type Error = crate::Error;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        Self::from_bits(bits).ok_or(crate::Error::InvalidBitness(bits))
    }
}

impl std::fmt::Display for Bitness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}

/// Encoding family an instruction was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EncodingKind {
    /// Legacy and REX encoded (including 0F, 0F 38 and 0F 3A maps).
    #[default]
    Legacy,
    /// VEX (C4/C5) encoded.
    Vex,
    /// AMD XOP (8F) encoded.
    Xop,
    /// EVEX (62) encoded.
    Evex,
    /// AMD 3DNow! (0F 0F ... suffix) encoded.
    D3now,
}

impl EncodingKind {
    /// Returns the name of this encoding.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Vex => "vex",
            Self::Xop => "xop",
            Self::Evex => "evex",
            Self::D3now => "3dnow",
        }
    }
}
