//! Per-instruction decoder state.

use bitflags::bitflags;
use xdis_core::{Bitness, EncodingKind, Register, RegisterClass};

use super::cursor::ByteCursor;
use super::modrm::ModRm;
use super::size::{self, OpSize, SizePolicy};
use crate::error::DecodeError;

/// Mandatory prefix class of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MandatoryPrefix {
    #[default]
    None,
    P66,
    PF3,
    PF2,
}

impl MandatoryPrefix {
    /// Index into a four-way mandatory prefix table.
    pub fn index(&self) -> usize {
        match self {
            Self::None => 0,
            Self::P66 => 1,
            Self::PF3 => 2,
            Self::PF2 => 3,
        }
    }

    /// Maps the VEX/XOP/EVEX `pp` field.
    pub fn from_pp(pp: u8) -> Self {
        match pp & 3 {
            0 => Self::None,
            1 => Self::P66,
            2 => Self::PF3,
            _ => Self::PF2,
        }
    }
}

bitflags! {
    /// Prefix presence and per-instruction permissions.
    ///
    /// The scanner sets the prefix bits; table descent sets the `*_CONSUMED`
    /// bits; handlers set the `ALLOW_*` bits for the prefixes their form
    /// accepts.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StateFlags: u32 {
        /// REX byte immediately before the opcode.
        const REX = 1 << 0;
        const P66 = 1 << 1;
        const P67 = 1 << 2;
        const LOCK = 1 << 3;
        /// F3 was the last of F2/F3.
        const REP = 1 << 4;
        /// F2 was the last of F2/F3.
        const REPNE = 1 << 5;
        /// 66h selected a mandatory prefix table entry.
        const P66_CONSUMED = 1 << 6;
        /// F2/F3 selected a mandatory prefix table entry.
        const REP_CONSUMED = 1 << 7;
        /// LOCK was folded into the opcode (AMD MOV CR8).
        const LOCK_CONSUMED = 1 << 8;
        /// EVEX.b
        const EVEX_B = 1 << 9;
        /// EVEX.z
        const EVEX_Z = 1 << 10;
        /// The trailing byte is an opcode suffix, not an immediate operand.
        const NO_IMM = 1 << 11;
        const ALLOW_LOCK = 1 << 12;
        const ALLOW_XACQUIRE = 1 << 13;
        const ALLOW_XRELEASE = 1 << 14;
        const ALLOW_BND = 1 << 15;
        const ALLOW_NOTRACK = 1 << 16;
    }
}

/// Mutable context for one decode call.
#[derive(Debug, Clone)]
pub struct DecoderState {
    pub bitness: Bitness,
    pub encoding: EncodingKind,
    /// Operand size under the default policy.
    pub operand_size: OpSize,
    pub address_size: OpSize,
    pub mandatory_prefix: MandatoryPrefix,
    /// Last segment override prefix seen.
    pub segment: Option<Register>,
    pub flags: StateFlags,
    /// REX.W, VEX.W, XOP.W or EVEX.W.
    pub w: bool,
    /// ModRM.reg extension (8 when REX.R or inverted VEX.R is set).
    pub ext_r: u8,
    /// SIB.index extension.
    pub ext_x: u8,
    /// ModRM.rm / SIB.base / opcode register extension.
    pub ext_b: u8,
    /// EVEX.R' (16 when set).
    pub ext_r2: u8,
    /// EVEX.V' (16 when set), extends vvvv and the VSIB index.
    pub ext_v2: u8,
    /// Decoded (non-inverted) vvvv, including V' for EVEX.
    pub vvvv: u8,
    /// VEX.L or EVEX.L'L.
    pub vector_length: u8,
    /// EVEX opmask selector.
    pub aaa: u8,
    /// ModRM once it has been read.
    pub modrm: Option<ModRm>,
}

impl DecoderState {
    /// Creates a fresh state for the given mode.
    pub fn new(bitness: Bitness) -> Self {
        Self {
            bitness,
            encoding: EncodingKind::Legacy,
            operand_size: OpSize::from_bitness(bitness).min_32(),
            address_size: OpSize::from_bitness(bitness),
            mandatory_prefix: MandatoryPrefix::None,
            segment: None,
            flags: StateFlags::empty(),
            w: false,
            ext_r: 0,
            ext_x: 0,
            ext_b: 0,
            ext_r2: 0,
            ext_v2: 0,
            vvvv: 0,
            vector_length: 0,
            aaa: 0,
            modrm: None,
        }
    }

    /// Returns whether 64-bit mode is active.
    pub fn is_64bit(&self) -> bool {
        self.bitness.is_64bit()
    }

    /// Returns whether a REX prefix applies to this instruction.
    pub fn has_rex(&self) -> bool {
        self.flags.contains(StateFlags::REX)
    }

    /// Returns whether 66h still acts as the operand-size override.
    pub fn has_operand_size_prefix(&self) -> bool {
        self.flags.contains(StateFlags::P66) && !self.flags.contains(StateFlags::P66_CONSUMED)
    }

    /// Returns whether W is honoured (64-bit mode only for GPR widths).
    pub fn w64(&self) -> bool {
        self.w && self.is_64bit()
    }

    /// Recomputes the derived sizes after prefixes change.
    pub fn update_sizes(&mut self) {
        self.operand_size = size::operand_size(
            self.bitness,
            self.has_operand_size_prefix(),
            self.w && self.encoding == EncodingKind::Legacy,
            SizePolicy::Default,
            false,
        );
        self.address_size = size::address_size(self.bitness, self.flags.contains(StateFlags::P67));
    }

    /// Resolves the operand size for a form with the given policy.
    pub fn operand_size_for(&self, policy: SizePolicy, amd: bool) -> OpSize {
        let rex_w = self.w && self.encoding == EncodingKind::Legacy;
        size::operand_size(
            self.bitness,
            self.has_operand_size_prefix(),
            rex_w,
            policy,
            amd,
        )
    }

    /// Marks 66h as consumed by a mandatory prefix table.
    pub fn consume_operand_size_prefix(&mut self) {
        self.flags.insert(StateFlags::P66_CONSUMED);
        self.update_sizes();
    }

    /// Reads the ModRM byte on first use; later calls return the same value.
    pub fn read_modrm(&mut self, cursor: &mut ByteCursor<'_>) -> Result<ModRm, DecodeError> {
        if let Some(modrm) = self.modrm {
            return Ok(modrm);
        }
        let modrm = ModRm::parse(cursor.read_u8()?);
        self.modrm = Some(modrm);
        Ok(modrm)
    }

    /// Returns the effective segment of a memory operand and whether it came
    /// from an override. In 64-bit mode only FS and GS overrides apply.
    pub fn effective_segment(&self, default: Register) -> (Register, bool) {
        match self.segment {
            Some(seg) if !self.is_64bit() || seg == Register::FS || seg == Register::GS => {
                (seg, true)
            }
            _ => (default, false),
        }
    }
}

/// Maps a segment override prefix byte to its register.
pub fn segment_from_prefix(byte: u8) -> Option<Register> {
    let index = match byte {
        0x26 => 0,
        0x2E => 1,
        0x36 => 2,
        0x3E => 3,
        0x64 => 4,
        0x65 => 5,
        _ => return None,
    };
    Some(Register::new(RegisterClass::Segment, index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modrm_read_once() {
        let data = [0xC1, 0xFF];
        let mut cursor = ByteCursor::new(&data, 0, 0);
        let mut state = DecoderState::new(Bitness::Bits32);
        let first = state.read_modrm(&mut cursor).unwrap();
        let second = state.read_modrm(&mut cursor).unwrap();
        assert_eq!(first, second);
        assert_eq!(cursor.consumed(), 1);
        assert_eq!(first.reg, 0);
        assert_eq!(first.rm, 1);
    }

    #[test]
    fn test_consumed_66_restores_size() {
        let mut state = DecoderState::new(Bitness::Bits32);
        state.flags.insert(StateFlags::P66);
        state.update_sizes();
        assert_eq!(state.operand_size, OpSize::Size16);
        state.consume_operand_size_prefix();
        assert_eq!(state.operand_size, OpSize::Size32);
    }

    #[test]
    fn test_segment_overrides_in_64bit_mode() {
        let mut state = DecoderState::new(Bitness::Bits64);
        state.segment = Some(Register::ES);
        assert_eq!(state.effective_segment(Register::DS), (Register::DS, false));
        state.segment = Some(Register::GS);
        assert_eq!(state.effective_segment(Register::DS), (Register::GS, true));
    }
}
