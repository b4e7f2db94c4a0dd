//! Prefix and escape scanner.
//!
//! Consumes legacy prefixes, REX and the VEX/XOP/EVEX escapes, leaving the
//! cursor on the byte after the opcode and the state describing everything
//! in front of it.

use xdis_core::EncodingKind;

use super::cursor::ByteCursor;
use super::state::{segment_from_prefix, DecoderState, MandatoryPrefix, StateFlags};
use super::tables::Map;
use crate::error::DecodeError;

/// REX prefix fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rex {
    /// REX.W - 64-bit operand size
    pub w: bool,
    /// REX.R - extends ModR/M reg field
    pub r: bool,
    /// REX.X - extends SIB index field
    pub x: bool,
    /// REX.B - extends ModR/M r/m, SIB base, or opcode reg
    pub b: bool,
}

impl Rex {
    /// Parse a REX byte.
    pub fn from_byte(byte: u8) -> Self {
        Self {
            w: byte & 0x08 != 0,
            r: byte & 0x04 != 0,
            x: byte & 0x02 != 0,
            b: byte & 0x01 != 0,
        }
    }
}

/// VEX or XOP prefix (2-byte C5, 3-byte C4 or 8F).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Vex {
    /// VEX.R (~REX.R) - extends ModR/M reg field
    pub r: bool,
    /// VEX.X (~REX.X) - extends SIB index field (only in 3-byte VEX)
    pub x: bool,
    /// VEX.B (~REX.B) - extends ModR/M r/m field (only in 3-byte VEX)
    pub b: bool,
    /// VEX.W - 64-bit operand size / opcode extension
    pub w: bool,
    /// VEX.vvvv - additional operand, already un-inverted
    pub vvvv: u8,
    /// VEX.L - vector length (0 = 128-bit, 1 = 256-bit)
    pub l: bool,
    /// VEX.pp - implied prefix (00=none, 01=0x66, 10=0xF3, 11=0xF2)
    pub pp: u8,
    /// VEX.mmmmm - opcode map
    pub map: u8,
}

impl Vex {
    /// Parse a 2-byte VEX prefix (0xC5 RvvvvLpp).
    pub fn from_2byte(byte1: u8) -> Self {
        Self {
            r: (byte1 & 0x80) == 0,
            x: false,
            b: false,
            w: false,
            vvvv: (!byte1 >> 3) & 0x0F,
            l: (byte1 & 0x04) != 0,
            pp: byte1 & 0x03,
            map: 1,
        }
    }

    /// Parse a 3-byte VEX or XOP prefix (0xC4/0x8F RXBmmmmm WvvvvLpp).
    pub fn from_3byte(byte1: u8, byte2: u8) -> Self {
        Self {
            r: (byte1 & 0x80) == 0,
            x: (byte1 & 0x40) == 0,
            b: (byte1 & 0x20) == 0,
            w: (byte2 & 0x80) != 0,
            vvvv: (!byte2 >> 3) & 0x0F,
            l: (byte2 & 0x04) != 0,
            pp: byte2 & 0x03,
            map: byte1 & 0x1F,
        }
    }
}

/// EVEX prefix (0x62 P0 P1 P2).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Evex {
    pub r: bool,
    pub x: bool,
    pub b: bool,
    /// EVEX.R' - high bit of the reg field
    pub r_prime: bool,
    pub map: u8,
    pub w: bool,
    /// vvvv, already un-inverted (without V')
    pub vvvv: u8,
    pub pp: u8,
    pub z: bool,
    /// EVEX.L'L
    pub ll: u8,
    /// EVEX.b - broadcast / rounding / SAE
    pub bcst: bool,
    /// EVEX.V' - high bit of vvvv
    pub v_prime: bool,
    pub aaa: u8,
}

impl Evex {
    /// Parses the three payload bytes, rejecting reserved bit patterns.
    pub fn parse(p0: u8, p1: u8, p2: u8) -> Option<Self> {
        // P0[3:2] reserved zero, P1[2] fixed one.
        if p0 & 0x0C != 0 || p1 & 0x04 == 0 {
            return None;
        }
        Some(Self {
            r: (p0 & 0x80) == 0,
            x: (p0 & 0x40) == 0,
            b: (p0 & 0x20) == 0,
            r_prime: (p0 & 0x10) == 0,
            map: p0 & 0x03,
            w: (p1 & 0x80) != 0,
            vvvv: (!p1 >> 3) & 0x0F,
            pp: p1 & 0x03,
            z: (p2 & 0x80) != 0,
            ll: (p2 >> 5) & 0x03,
            bcst: (p2 & 0x10) != 0,
            v_prime: (p2 & 0x08) == 0,
            aaa: p2 & 0x07,
        })
    }
}

/// Scans prefixes and escapes. Returns the opcode map and the opcode byte.
pub fn scan(cursor: &mut ByteCursor<'_>, state: &mut DecoderState) -> Result<(Map, u8), DecodeError> {
    let opcode = loop {
        let byte = cursor.read_u8()?;
        match byte {
            0x26 | 0x2E | 0x36 | 0x3E | 0x64 | 0x65 => {
                state.segment = segment_from_prefix(byte);
            }
            0x66 => state.flags.insert(StateFlags::P66),
            0x67 => state.flags.insert(StateFlags::P67),
            0xF0 => state.flags.insert(StateFlags::LOCK),
            0xF2 => {
                state.flags.remove(StateFlags::REP);
                state.flags.insert(StateFlags::REPNE);
            }
            0xF3 => {
                state.flags.remove(StateFlags::REPNE);
                state.flags.insert(StateFlags::REP);
            }
            0x40..=0x4F if state.is_64bit() => {
                apply_rex(state, Rex::from_byte(byte));
                continue;
            }
            _ => break byte,
        }
        // Only a REX immediately in front of the opcode counts.
        discard_rex(state);
    };

    state.mandatory_prefix = if state.flags.contains(StateFlags::REP) {
        MandatoryPrefix::PF3
    } else if state.flags.contains(StateFlags::REPNE) {
        MandatoryPrefix::PF2
    } else if state.flags.contains(StateFlags::P66) {
        MandatoryPrefix::P66
    } else {
        MandatoryPrefix::None
    };
    state.update_sizes();

    match opcode {
        0xC5 if is_vex_escape(cursor, state) => {
            check_no_legacy_prefixes(cursor, state)?;
            let vex = Vex::from_2byte(cursor.read_u8()?);
            apply_vex(state, &vex, EncodingKind::Vex);
            Ok((Map::Vex0F, cursor.read_u8()?))
        }
        0xC4 if is_vex_escape(cursor, state) => {
            check_no_legacy_prefixes(cursor, state)?;
            let byte1 = cursor.read_u8()?;
            let byte2 = cursor.read_u8()?;
            let vex = Vex::from_3byte(byte1, byte2);
            let map = match vex.map {
                1 => Map::Vex0F,
                2 => Map::Vex0F38,
                3 => Map::Vex0F3A,
                _ => return Err(DecodeError::invalid(cursor.address())),
            };
            apply_vex(state, &vex, EncodingKind::Vex);
            Ok((map, cursor.read_u8()?))
        }
        0x8F if is_xop_escape(cursor) => {
            check_no_legacy_prefixes(cursor, state)?;
            let byte1 = cursor.read_u8()?;
            let byte2 = cursor.read_u8()?;
            let xop = Vex::from_3byte(byte1, byte2);
            let map = match xop.map {
                0x08 => Map::Xop8,
                0x09 => Map::Xop9,
                0x0A => Map::XopA,
                _ => return Err(DecodeError::invalid(cursor.address())),
            };
            // Outside 64-bit mode nothing can be extended: R and X must be
            // clear and vvvv must name one of the eight registers.
            if !state.is_64bit() && (xop.r || xop.x || xop.vvvv > 7) {
                return Err(DecodeError::invalid(cursor.address()));
            }
            apply_vex(state, &xop, EncodingKind::Xop);
            Ok((map, cursor.read_u8()?))
        }
        0x62 if is_vex_escape(cursor, state) => {
            check_no_legacy_prefixes(cursor, state)?;
            let p0 = cursor.read_u8()?;
            let p1 = cursor.read_u8()?;
            let p2 = cursor.read_u8()?;
            let evex = Evex::parse(p0, p1, p2).ok_or_else(|| DecodeError::invalid(cursor.address()))?;
            let map = match evex.map {
                1 => Map::Evex0F,
                2 => Map::Evex0F38,
                3 => Map::Evex0F3A,
                _ => return Err(DecodeError::invalid(cursor.address())),
            };
            if !state.is_64bit() && evex.v_prime {
                return Err(DecodeError::invalid(cursor.address()));
            }
            apply_evex(state, &evex);
            Ok((map, cursor.read_u8()?))
        }
        _ => Ok((Map::Legacy, opcode)),
    }
}

/// C4/C5/62 start a VEX/EVEX prefix in 64-bit mode, and elsewhere only when
/// the next byte would be an invalid register-form LES/LDS/BOUND ModR/M.
fn is_vex_escape(cursor: &ByteCursor<'_>, state: &DecoderState) -> bool {
    state.is_64bit() || matches!(cursor.peek_u8(), Some(next) if next & 0xC0 == 0xC0)
}

/// 8F is XOP when the map-select field is 8 or more; POP Ev has reg=0 there.
fn is_xop_escape(cursor: &ByteCursor<'_>) -> bool {
    matches!(cursor.peek_u8(), Some(next) if next & 0x1F >= 0x08)
}

fn check_no_legacy_prefixes(cursor: &ByteCursor<'_>, state: &DecoderState) -> Result<(), DecodeError> {
    let conflicting = StateFlags::P66 | StateFlags::LOCK | StateFlags::REP | StateFlags::REPNE | StateFlags::REX;
    if state.flags.intersects(conflicting) {
        return Err(DecodeError::prefix_conflict(cursor.address()));
    }
    Ok(())
}

fn apply_rex(state: &mut DecoderState, rex: Rex) {
    state.flags.insert(StateFlags::REX);
    state.w = rex.w;
    state.ext_r = (rex.r as u8) << 3;
    state.ext_x = (rex.x as u8) << 3;
    state.ext_b = (rex.b as u8) << 3;
}

fn discard_rex(state: &mut DecoderState) {
    if state.flags.contains(StateFlags::REX) {
        state.flags.remove(StateFlags::REX);
        state.w = false;
        state.ext_r = 0;
        state.ext_x = 0;
        state.ext_b = 0;
    }
}

fn apply_vex(state: &mut DecoderState, vex: &Vex, encoding: EncodingKind) {
    state.encoding = encoding;
    state.mandatory_prefix = MandatoryPrefix::from_pp(vex.pp);
    state.w = vex.w;
    state.vector_length = vex.l as u8;
    if state.is_64bit() {
        state.ext_r = (vex.r as u8) << 3;
        state.ext_x = (vex.x as u8) << 3;
        state.ext_b = (vex.b as u8) << 3;
        state.vvvv = vex.vvvv;
    } else {
        state.vvvv = vex.vvvv & 0x07;
    }
    state.update_sizes();
}

fn apply_evex(state: &mut DecoderState, evex: &Evex) {
    state.encoding = EncodingKind::Evex;
    state.mandatory_prefix = MandatoryPrefix::from_pp(evex.pp);
    state.w = evex.w;
    state.vector_length = evex.ll;
    state.aaa = evex.aaa;
    state.flags.set(StateFlags::EVEX_Z, evex.z);
    state.flags.set(StateFlags::EVEX_B, evex.bcst);
    if state.is_64bit() {
        state.ext_r = (evex.r as u8) << 3;
        state.ext_x = (evex.x as u8) << 3;
        state.ext_b = (evex.b as u8) << 3;
        state.ext_r2 = (evex.r_prime as u8) << 4;
        state.ext_v2 = (evex.v_prime as u8) << 4;
        state.vvvv = evex.vvvv | state.ext_v2;
    } else {
        state.vvvv = evex.vvvv & 0x07;
    }
    state.update_sizes();
}

#[cfg(test)]
mod tests {
    use super::*;
    use xdis_core::{Bitness, Register};

    fn scan_bytes(bitness: Bitness, bytes: &[u8]) -> Result<(Map, u8, DecoderState, usize), DecodeError> {
        let mut cursor = ByteCursor::new(bytes, 0, 0);
        let mut state = DecoderState::new(bitness);
        let (map, opcode) = scan(&mut cursor, &mut state)?;
        Ok((map, opcode, state, cursor.consumed()))
    }

    #[test]
    fn test_last_segment_and_rep_win() {
        let (map, opcode, state, len) =
            scan_bytes(Bitness::Bits32, &[0x2E, 0x64, 0xF2, 0xF3, 0xA4]).unwrap();
        assert_eq!(map, Map::Legacy);
        assert_eq!(opcode, 0xA4);
        assert_eq!(state.segment, Some(Register::FS));
        assert!(state.flags.contains(StateFlags::REP));
        assert!(!state.flags.contains(StateFlags::REPNE));
        assert_eq!(state.mandatory_prefix, MandatoryPrefix::PF3);
        assert_eq!(len, 5);
    }

    #[test]
    fn test_rex_must_precede_opcode() {
        let (_, _, state, _) = scan_bytes(Bitness::Bits64, &[0x48, 0x01, 0xC0]).unwrap();
        assert!(state.has_rex());
        assert!(state.w);

        let (_, _, state, _) = scan_bytes(Bitness::Bits64, &[0x48, 0x66, 0x01, 0xC0]).unwrap();
        assert!(!state.has_rex());
        assert!(!state.w);
    }

    #[test]
    fn test_rex_is_inc_outside_64bit() {
        let (map, opcode, state, len) = scan_bytes(Bitness::Bits32, &[0x40]).unwrap();
        assert_eq!((map, opcode, len), (Map::Legacy, 0x40, 1));
        assert!(!state.has_rex());
    }

    #[test]
    fn test_vex_escape_disambiguation() {
        // C5 F8 in 32-bit mode: next byte has both top bits set, so VEX.
        let (map, opcode, state, _) = scan_bytes(Bitness::Bits32, &[0xC5, 0xF8, 0x77]).unwrap();
        assert_eq!((map, opcode), (Map::Vex0F, 0x77));
        assert_eq!(state.encoding, EncodingKind::Vex);

        // C5 00 in 32-bit mode is LDS.
        let (map, opcode, _, _) = scan_bytes(Bitness::Bits32, &[0xC5, 0x00]).unwrap();
        assert_eq!((map, opcode), (Map::Legacy, 0xC5));
    }

    #[test]
    fn test_vex_after_66_is_a_conflict() {
        let err = scan_bytes(Bitness::Bits64, &[0x66, 0xC5, 0xF8, 0x77]).unwrap_err();
        assert_eq!(err, DecodeError::prefix_conflict(0));
    }

    #[test]
    fn test_xop_and_pop() {
        let (map, opcode, state, _) =
            scan_bytes(Bitness::Bits64, &[0x8F, 0xE8, 0x78, 0xC0]).unwrap();
        assert_eq!((map, opcode), (Map::Xop8, 0xC0));
        assert_eq!(state.encoding, EncodingKind::Xop);
        assert_eq!(state.vvvv, 0);

        let (map, opcode, _, _) = scan_bytes(Bitness::Bits64, &[0x8F, 0xC0]).unwrap();
        assert_eq!((map, opcode), (Map::Legacy, 0x8F));
    }

    #[test]
    fn test_xop_extension_bits_outside_64bit() {
        assert!(scan_bytes(Bitness::Bits32, &[0x8F, 0xE8, 0x78, 0xC0]).is_ok());
        // R inverted to 0.
        assert!(scan_bytes(Bitness::Bits32, &[0x8F, 0x68, 0x78, 0xC0]).is_err());
        // X inverted to 0.
        assert!(scan_bytes(Bitness::Bits16, &[0x8F, 0xA8, 0x78, 0xC0]).is_err());
        // vvvv = 8.
        assert!(scan_bytes(Bitness::Bits32, &[0x8F, 0xE8, 0x38, 0xC0]).is_err());
        // The same bytes are fine in 64-bit mode.
        let (_, _, state, _) = scan_bytes(Bitness::Bits64, &[0x8F, 0x68, 0x38, 0xC0]).unwrap();
        assert_eq!(state.ext_r, 8);
        assert_eq!(state.vvvv, 8);
    }

    #[test]
    fn test_evex_fields() {
        let (map, opcode, state, len) =
            scan_bytes(Bitness::Bits64, &[0x62, 0xF1, 0x7C, 0x48, 0x58]).unwrap();
        assert_eq!((map, opcode, len), (Map::Evex0F, 0x58, 5));
        assert_eq!(state.vector_length, 2);
        assert_eq!(state.vvvv, 0);
        assert_eq!(state.aaa, 0);
    }

    #[test]
    fn test_evex_reserved_bits() {
        // P1 bit 2 clear.
        assert!(scan_bytes(Bitness::Bits64, &[0x62, 0xF1, 0x78, 0x48, 0x58]).is_err());
        // Map 0.
        assert!(scan_bytes(Bitness::Bits64, &[0x62, 0xF0, 0x7C, 0x48, 0x58]).is_err());
    }
}
