//! Instruction forms.
//!
//! A [`Mnemonic`] names an operation; an [`InstructionForm`] names one
//! encoding shape of it, the way reference manuals list `ADD r32, r/m32`
//! and `ADD r64, r/m64` as separate rows. Two decodes share a form exactly
//! when they share a mnemonic and every operand has the same shape.

use std::fmt;

use crate::{Instruction, MemorySize, Mnemonic, Operand, RegisterClass};

/// Shape of one operand: its kind and width, without the concrete register,
/// address or value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OperandShape {
    Register(RegisterClass),
    Memory(MemorySize),
    /// Immediate, by the width it is extended into.
    Immediate(u8),
    /// Near branch, by operand size.
    NearBranch(u8),
    /// Far pointer, by offset size.
    FarBranch(u8),
}

impl From<&Operand> for OperandShape {
    fn from(op: &Operand) -> Self {
        match op {
            Operand::Register(reg) => Self::Register(reg.class),
            Operand::Memory(mem) => Self::Memory(mem.size),
            Operand::Immediate(imm) => Self::Immediate(imm.kind.width()),
            Operand::NearBranch { size, .. } => Self::NearBranch(*size),
            Operand::FarBranch { size, .. } => Self::FarBranch(*size),
        }
    }
}

impl fmt::Display for OperandShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Register(class) => f.write_str(class_name(*class)),
            Self::Memory(MemorySize::Broadcast(e)) => write!(f, "m{}bcst", e.size() * 8),
            Self::Memory(size) => match size.size() {
                0 => f.write_str("m"),
                bytes => write!(f, "m{}", bytes * 8),
            },
            Self::Immediate(bits) => write!(f, "imm{}", bits),
            Self::NearBranch(bits) => write!(f, "rel{}", bits),
            Self::FarBranch(bits) => write!(f, "ptr16:{}", bits),
        }
    }
}

fn class_name(class: RegisterClass) -> &'static str {
    match class {
        RegisterClass::Gpr8 => "r8",
        RegisterClass::Gpr16 => "r16",
        RegisterClass::Gpr32 => "r32",
        RegisterClass::Gpr64 => "r64",
        RegisterClass::Segment => "sreg",
        RegisterClass::InstructionPointer => "ip",
        RegisterClass::Control => "cr",
        RegisterClass::Debug => "dr",
        RegisterClass::Test => "tr",
        RegisterClass::St => "st",
        RegisterClass::Mmx => "mm",
        RegisterClass::Xmm => "xmm",
        RegisterClass::Ymm => "ymm",
        RegisterClass::Zmm => "zmm",
        RegisterClass::Opmask => "k",
        RegisterClass::Bound => "bnd",
        RegisterClass::Tile => "tmm",
    }
}

/// A mnemonic together with the shape of each operand.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstructionForm {
    pub mnemonic: Mnemonic,
    pub operands: Vec<OperandShape>,
}

impl Instruction {
    /// Returns the form this instruction was decoded as.
    pub fn form(&self) -> InstructionForm {
        InstructionForm {
            mnemonic: self.mnemonic,
            operands: self.operands.iter().map(OperandShape::from).collect(),
        }
    }
}

impl fmt::Display for InstructionForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic)?;
        for (i, op) in self.operands.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{}{}", sep, op)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Bitness, Element, ImmediateKind, Register};

    #[test]
    fn test_operand_size_separates_forms() {
        let mut add32 = Instruction::new(0, Bitness::Bits32);
        add32.mnemonic = Mnemonic::Add;
        add32.operands = vec![Operand::reg(Register::EAX), Operand::reg(Register::EAX)];
        let mut add16 = add32.clone();
        add16.operands = vec![Operand::reg(Register::AX), Operand::reg(Register::AX)];
        assert_eq!(add32.form().to_string(), "add r32, r32");
        assert_eq!(add16.form().to_string(), "add r16, r16");
        assert_ne!(add32.form(), add16.form());

        // Different registers of one width share a form.
        let mut add32_ecx = add32.clone();
        add32_ecx.operands[1] = Operand::reg(Register::ECX);
        assert_eq!(add32.form(), add32_ecx.form());
    }

    #[test]
    fn test_shape_names() {
        assert_eq!(OperandShape::Immediate(ImmediateKind::Imm8to32.width()).to_string(), "imm32");
        assert_eq!(OperandShape::Memory(MemorySize::Packed512(Element::Float32)).to_string(), "m512");
        assert_eq!(OperandShape::Memory(MemorySize::Broadcast(Element::Float32)).to_string(), "m32bcst");
        assert_eq!(OperandShape::Memory(MemorySize::Unknown).to_string(), "m");
        assert_eq!(OperandShape::Register(RegisterClass::Opmask).to_string(), "k");
    }
}
