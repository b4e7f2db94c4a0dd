//! ModR/M and SIB byte decoding.

use xdis_core::{MemoryRef, MemorySize, Register, RegisterClass};

use super::cursor::ByteCursor;
use super::size::OpSize;
use super::state::DecoderState;
use crate::error::DecodeError;

/// A ModR/M byte split into its three fields. `reg` and `rm` are the
/// unextended 3-bit values; callers OR in REX/VEX/EVEX bits themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModRm {
    pub byte: u8,
    /// Bits 7:6. `0b11` selects a register in `rm`.
    pub mod_: u8,
    /// Bits 5:3: a register, or an opcode extension in group opcodes.
    pub reg: u8,
    /// Bits 2:0: a register, or the addressing form when `mod_` is not `0b11`.
    pub rm: u8,
}

impl ModRm {
    pub fn parse(byte: u8) -> Self {
        Self {
            byte,
            mod_: byte >> 6,
            reg: (byte >> 3) & 7,
            rm: byte & 7,
        }
    }

    pub fn is_register(&self) -> bool {
        self.mod_ == 0b11
    }

    /// rm = 100 with a memory form escapes to a SIB byte. Only meaningful
    /// with 32- or 64-bit addressing.
    pub fn needs_sib(&self) -> bool {
        !self.is_register() && self.rm == 0b100
    }
}

/// A SIB byte: `base + index << scale`, with the unextended register fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sib {
    /// log2 of the index multiplier.
    pub scale: u8,
    pub index: u8,
    pub base: u8,
}

impl Sib {
    pub fn parse(byte: u8) -> Self {
        Self {
            scale: byte >> 6,
            index: (byte >> 3) & 7,
            base: byte & 7,
        }
    }

    /// Index multiplier: 1, 2, 4 or 8.
    pub fn scale_factor(&self) -> u8 {
        1 << self.scale
    }
}

/// How a memory operand is addressed beyond its size tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoryForm {
    /// EVEX compressed displacement multiplier (1 outside EVEX).
    pub disp8_scale: u32,
    /// Vector index register file for VSIB addressing.
    pub vsib: Option<RegisterClass>,
}

impl MemoryForm {
    /// Plain addressing.
    pub const PLAIN: Self = Self {
        disp8_scale: 1,
        vsib: None,
    };
}

// 16-bit addressing: (base, index) per rm value.
const MODRM16: [(Register, Option<Register>); 8] = [
    (Register::BX, Some(Register::SI)),
    (Register::BX, Some(Register::DI)),
    (Register::BP, Some(Register::SI)),
    (Register::BP, Some(Register::DI)),
    (Register::SI, None),
    (Register::DI, None),
    (Register::BP, None),
    (Register::BX, None),
];

/// Decodes the memory form of the current ModR/M (mod != 3), reading the SIB
/// byte and displacement. The ModR/M byte must already have been read.
pub fn decode_memory(
    cursor: &mut ByteCursor<'_>,
    state: &DecoderState,
    size: MemorySize,
    form: MemoryForm,
) -> Result<MemoryRef, DecodeError> {
    let modrm = match state.modrm {
        Some(modrm) if !modrm.is_register() => modrm,
        _ => return Err(DecodeError::invalid(cursor.address())),
    };

    if state.address_size == OpSize::Size16 {
        if form.vsib.is_some() {
            return Err(DecodeError::invalid(cursor.address()));
        }
        return decode_memory16(cursor, state, modrm, size, form);
    }

    let class = state.address_size.gpr_class();
    let mut base: Option<Register> = None;
    let mut index: Option<Register> = None;
    let mut scale = 1;
    let mut disp32 = modrm.mod_ == 0b10;

    if modrm.needs_sib() {
        let sib = Sib::parse(cursor.read_u8()?);
        match form.vsib {
            Some(vclass) => {
                index = Some(Register::new(
                    vclass,
                    sib.index | state.ext_x | state.ext_v2,
                ));
                scale = sib.scale_factor();
            }
            None => {
                let idx = sib.index | state.ext_x;
                if idx != 4 {
                    index = Some(Register::new(class, idx));
                    scale = sib.scale_factor();
                }
            }
        }
        if sib.base == 0b101 && modrm.mod_ == 0b00 {
            disp32 = true;
        } else {
            base = Some(Register::new(class, sib.base | state.ext_b));
        }
    } else if form.vsib.is_some() {
        return Err(DecodeError::invalid(cursor.address()));
    } else if modrm.rm == 0b101 && modrm.mod_ == 0b00 {
        disp32 = true;
        if state.is_64bit() {
            base = Some(if state.address_size == OpSize::Size64 {
                Register::RIP
            } else {
                Register::EIP
            });
        }
    } else {
        base = Some(Register::new(class, modrm.rm | state.ext_b));
    }

    let (displacement, displacement_size) = if disp32 {
        (cursor.read_u32()? as i32 as i64, 4)
    } else if modrm.mod_ == 0b01 {
        let disp = cursor.read_u8()? as i8 as i64;
        (disp * form.disp8_scale.max(1) as i64, 1)
    } else {
        (0, 0)
    };

    // esp/ebp based addressing defaults to the stack segment; r12/r13 do not.
    let default_segment = match base {
        Some(reg) if reg.class == class && (reg.index == 4 || reg.index == 5) => Register::SS,
        _ => Register::DS,
    };
    let (segment, segment_override) = state.effective_segment(default_segment);

    // A bare displacement outside 64-bit addressing is an absolute offset.
    let displacement = if base.is_none() && index.is_none() && state.address_size == OpSize::Size32 {
        displacement & 0xFFFF_FFFF
    } else {
        displacement
    };

    Ok(MemoryRef {
        segment,
        segment_override,
        base,
        index,
        scale,
        displacement,
        displacement_size,
        size,
        vsib: form.vsib.is_some(),
    })
}

fn decode_memory16(
    cursor: &mut ByteCursor<'_>,
    state: &DecoderState,
    modrm: ModRm,
    size: MemorySize,
    form: MemoryForm,
) -> Result<MemoryRef, DecodeError> {
    if modrm.mod_ == 0b00 && modrm.rm == 0b110 {
        let disp = cursor.read_u16()?;
        let (segment, segment_override) = state.effective_segment(Register::DS);
        return Ok(MemoryRef {
            segment,
            segment_override,
            base: None,
            index: None,
            scale: 1,
            displacement: disp as i64,
            displacement_size: 2,
            size,
            vsib: false,
        });
    }

    let (base, index) = MODRM16[modrm.rm as usize];
    let (displacement, displacement_size) = match modrm.mod_ {
        0b01 => {
            let disp = cursor.read_u8()? as i8 as i64;
            (disp * form.disp8_scale.max(1) as i64, 1)
        }
        0b10 => (cursor.read_u16()? as i16 as i64, 2),
        _ => (0, 0),
    };
    let default_segment = if base == Register::BP {
        Register::SS
    } else {
        Register::DS
    };
    let (segment, segment_override) = state.effective_segment(default_segment);

    Ok(MemoryRef {
        segment,
        segment_override,
        base: Some(base),
        index,
        scale: 1,
        displacement,
        displacement_size,
        size,
        vsib: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use xdis_core::Bitness;

    fn decode(bitness: Bitness, bytes: &[u8]) -> (MemoryRef, usize) {
        let mut cursor = ByteCursor::new(bytes, 0, 0x1000);
        let mut state = DecoderState::new(bitness);
        state.read_modrm(&mut cursor).unwrap();
        let mem = decode_memory(&mut cursor, &state, MemorySize::UInt32, MemoryForm::PLAIN).unwrap();
        (mem, cursor.consumed())
    }

    #[test]
    fn test_plain_base() {
        let (mem, len) = decode(Bitness::Bits32, &[0x00]);
        assert_eq!(mem.base, Some(Register::EAX));
        assert_eq!(mem.index, None);
        assert_eq!(mem.displacement_size, 0);
        assert_eq!(len, 1);
    }

    #[test]
    fn test_sib_with_disp8() {
        // [esp + ecx*4 - 8]
        let (mem, len) = decode(Bitness::Bits32, &[0x44, 0x8C, 0xF8]);
        assert_eq!(mem.base, Some(Register::ESP));
        assert_eq!(mem.index, Some(Register::ECX));
        assert_eq!(mem.scale, 4);
        assert_eq!(mem.displacement, -8);
        assert_eq!(mem.segment, Register::SS);
        assert_eq!(len, 3);
    }

    #[test]
    fn test_sib_without_base_or_index() {
        // [disp32], SIB base=5 mod=0, index=4
        let (mem, len) = decode(Bitness::Bits64, &[0x04, 0x25, 0x00, 0x10, 0x00, 0x00]);
        assert_eq!(mem.base, None);
        assert_eq!(mem.index, None);
        assert_eq!(mem.displacement, 0x1000);
        assert_eq!(len, 6);
    }

    #[test]
    fn test_rip_relative() {
        let (mem, _) = decode(Bitness::Bits64, &[0x05, 0x10, 0x00, 0x00, 0x00]);
        assert_eq!(mem.base, Some(Register::RIP));
        assert_eq!(mem.displacement, 0x10);
        assert!(mem.is_ip_relative());

        let (mem, _) = decode(Bitness::Bits32, &[0x05, 0x00, 0x00, 0x00, 0x80]);
        assert_eq!(mem.base, None);
        assert_eq!(mem.displacement, 0x8000_0000);
    }

    #[test]
    fn test_16bit_addressing() {
        // [bp + di + 0x10]
        let (mem, len) = decode(Bitness::Bits16, &[0x43, 0x10]);
        assert_eq!(mem.base, Some(Register::BP));
        assert_eq!(mem.index, Some(Register::DI));
        assert_eq!(mem.displacement, 0x10);
        assert_eq!(mem.segment, Register::SS);
        assert_eq!(len, 2);

        // [disp16]
        let (mem, len) = decode(Bitness::Bits16, &[0x06, 0x34, 0x12]);
        assert_eq!(mem.base, None);
        assert_eq!(mem.displacement, 0x1234);
        assert_eq!(len, 3);
    }

    #[test]
    fn test_truncated_displacement() {
        let bytes = [0x80];
        let mut cursor = ByteCursor::new(&bytes, 0, 0);
        let mut state = DecoderState::new(Bitness::Bits32);
        state.read_modrm(&mut cursor).unwrap();
        let err = decode_memory(&mut cursor, &state, MemorySize::UInt8, MemoryForm::PLAIN);
        assert!(matches!(err, Err(DecodeError::NoMoreBytes { .. })));
    }
}
