//! Decoded x86 instruction record.

use crate::{Bitness, EncodingKind, MemoryRef, Mnemonic, Operand, Register};

/// A decoded instruction.
///
/// Created by the decoder, populated by the matched handler and returned to
/// the caller. An undecodable byte sequence yields an instruction whose
/// mnemonic is [`Mnemonic::Invalid`] and whose length is the number of bytes
/// consumed (never zero).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instruction {
    /// Address of the first byte.
    pub address: u64,
    /// Length in bytes.
    pub length: usize,
    /// Raw bytes of the instruction.
    pub bytes: Vec<u8>,
    /// Processor bitness the instruction was decoded in.
    pub code_size: Bitness,
    /// Encoding family.
    pub encoding: EncodingKind,
    /// Mnemonic identifier.
    pub mnemonic: Mnemonic,
    /// Operands in the order the architecture manuals list them.
    pub operands: Vec<Operand>,
    /// Prefix attributes that survive decoding.
    pub prefixes: PrefixInfo,
    /// EVEX opmask register (k1..k7), if any.
    pub op_mask: Option<Register>,
    /// EVEX zeroing-masking (`{z}`).
    pub zeroing_masking: bool,
    /// EVEX embedded rounding control.
    pub rounding: Option<RoundingControl>,
    /// EVEX suppress-all-exceptions (`{sae}`).
    pub suppress_all_exceptions: bool,
    /// Control flow information.
    pub control_flow: ControlFlow,
}

/// Prefix attributes recorded on a decoded instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrefixInfo {
    /// Segment override (last one wins).
    pub segment: Option<Register>,
    /// LOCK prefix, only kept on forms that accept it.
    pub lock: bool,
    /// REP/REPE prefix not consumed as a mandatory prefix.
    pub rep: bool,
    /// REPNE prefix not consumed as a mandatory prefix.
    pub repne: bool,
    /// F2 reinterpreted as XACQUIRE.
    pub xacquire: bool,
    /// F3 reinterpreted as XRELEASE.
    pub xrelease: bool,
    /// F2 reinterpreted as the MPX BND prefix.
    pub bnd: bool,
    /// 3E reinterpreted as NOTRACK on indirect branches.
    pub notrack: bool,
}

/// EVEX static rounding mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundingControl {
    RoundToNearest,
    RoundDown,
    RoundUp,
    RoundTowardZero,
}

impl RoundingControl {
    /// Maps the EVEX.L'L field of a register-form instruction with EVEX.b set.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 3 {
            0 => Self::RoundToNearest,
            1 => Self::RoundDown,
            2 => Self::RoundUp,
            _ => Self::RoundTowardZero,
        }
    }
}

impl Instruction {
    /// Creates an empty instruction at `address`.
    pub fn new(address: u64, code_size: Bitness) -> Self {
        Self {
            address,
            length: 0,
            bytes: Vec::new(),
            code_size,
            encoding: EncodingKind::Legacy,
            mnemonic: Mnemonic::Invalid,
            operands: Vec::new(),
            prefixes: PrefixInfo::default(),
            op_mask: None,
            zeroing_masking: false,
            rounding: None,
            suppress_all_exceptions: false,
            control_flow: ControlFlow::Sequential,
        }
    }

    /// Resets every field so the record can be reused for the next decode.
    pub fn reset(&mut self, address: u64, code_size: Bitness) {
        self.address = address;
        self.length = 0;
        self.bytes.clear();
        self.code_size = code_size;
        self.encoding = EncodingKind::Legacy;
        self.mnemonic = Mnemonic::Invalid;
        self.operands.clear();
        self.prefixes = PrefixInfo::default();
        self.op_mask = None;
        self.zeroing_masking = false;
        self.rounding = None;
        self.suppress_all_exceptions = false;
        self.control_flow = ControlFlow::Sequential;
    }

    /// Returns true if this is the invalid sentinel.
    pub fn is_invalid(&self) -> bool {
        self.mnemonic == Mnemonic::Invalid
    }

    /// Number of operands.
    pub fn op_count(&self) -> usize {
        self.operands.len()
    }

    /// Returns operand `i`, if present.
    pub fn operand(&self, i: usize) -> Option<&Operand> {
        self.operands.get(i)
    }

    /// Returns the first memory operand, if any.
    pub fn memory_operand(&self) -> Option<&MemoryRef> {
        self.operands.iter().find_map(Operand::memory)
    }

    /// Returns the address of the following instruction.
    pub fn next_ip(&self) -> u64 {
        self.address.wrapping_add(self.length as u64) & self.code_size.ip_mask()
    }

    /// Returns the near branch target if the instruction has one.
    pub fn near_branch_target(&self) -> Option<u64> {
        self.operands.iter().find_map(|op| match op {
            Operand::NearBranch { target, .. } => Some(*target),
            _ => None,
        })
    }

    /// Returns true if control can leave the fall-through path.
    pub fn is_branch(&self) -> bool {
        !matches!(self.control_flow, ControlFlow::Sequential)
    }

    /// Returns true if this instruction is a call.
    pub fn is_call(&self) -> bool {
        matches!(
            self.control_flow,
            ControlFlow::Call { .. } | ControlFlow::IndirectCall { .. }
        )
    }

    /// Returns true if this instruction is a return.
    pub fn is_return(&self) -> bool {
        matches!(self.control_flow, ControlFlow::Return)
    }
}

/// Branch condition for conditional jumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Condition {
    // Unsigned comparisons
    Equal,
    NotEqual,
    Above,         // CF=0 and ZF=0
    AboveOrEqual,  // CF=0
    Below,         // CF=1
    BelowOrEqual,  // CF=1 or ZF=1

    // Signed comparisons
    Greater,       // ZF=0 and SF=OF
    GreaterOrEqual,// SF=OF
    Less,          // SF!=OF
    LessOrEqual,   // ZF=1 or SF!=OF

    // Flag-based
    Sign,          // SF=1
    NotSign,       // SF=0
    Overflow,      // OF=1
    NotOverflow,   // OF=0
    Parity,        // PF=1
    NotParity,     // PF=0

    // Counter-based
    CounterZero,
    CounterNotZero,
}

impl Condition {
    /// Decodes the condition code in the low nibble of a Jcc/SETcc/CMOVcc opcode.
    pub fn from_cc(cc: u8) -> Self {
        match cc & 0x0F {
            0x0 => Self::Overflow,
            0x1 => Self::NotOverflow,
            0x2 => Self::Below,
            0x3 => Self::AboveOrEqual,
            0x4 => Self::Equal,
            0x5 => Self::NotEqual,
            0x6 => Self::BelowOrEqual,
            0x7 => Self::Above,
            0x8 => Self::Sign,
            0x9 => Self::NotSign,
            0xA => Self::Parity,
            0xB => Self::NotParity,
            0xC => Self::Less,
            0xD => Self::GreaterOrEqual,
            0xE => Self::LessOrEqual,
            _ => Self::Greater,
        }
    }
}

/// Control flow classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ControlFlow {
    /// Sequential - falls through to next instruction.
    Sequential,

    /// Unconditional branch to a known address.
    UnconditionalBranch {
        target: u64,
    },

    /// Conditional branch - may fall through or jump.
    ConditionalBranch {
        target: u64,
        condition: Condition,
        fallthrough: u64,
    },

    /// Indirect or far jump (target in register, memory or selector).
    IndirectBranch,

    /// Call to a known address.
    Call {
        target: u64,
        return_addr: u64,
    },

    /// Indirect or far call.
    IndirectCall {
        return_addr: u64,
    },

    /// Return (near or far, including IRET).
    Return,

    /// Software interrupt (INT n, INT3, INTO, INT1).
    Interrupt,

    /// System call (SYSCALL, SYSENTER).
    Syscall,

    /// Halts execution (HLT, UD0/UD1/UD2).
    Halt,
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#010x}:  ", self.address)?;

        // Print bytes
        for byte in &self.bytes {
            write!(f, "{:02x} ", byte)?;
        }

        // Pad to align mnemonic
        for _ in self.bytes.len()..8 {
            write!(f, "   ")?;
        }

        if self.prefixes.lock {
            write!(f, " lock")?;
        }
        if self.prefixes.rep {
            write!(f, " rep")?;
        }
        if self.prefixes.repne {
            write!(f, " repne")?;
        }

        write!(f, " {}", self.mnemonic)?;

        if !self.operands.is_empty() {
            write!(f, " ")?;
            for (i, op) in self.operands.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", op)?;
                if i == 0 {
                    if let Some(k) = self.op_mask {
                        write!(f, "{{{}}}", k)?;
                    }
                    if self.zeroing_masking {
                        write!(f, "{{z}}")?;
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_from_cc() {
        assert_eq!(Condition::from_cc(0x74), Condition::Equal);
        assert_eq!(Condition::from_cc(0x8F), Condition::Greater);
        assert_eq!(Condition::from_cc(0x0F), Condition::Greater);
    }

    #[test]
    fn test_next_ip_wraps_in_16bit_mode() {
        let mut inst = Instruction::new(0xFFFF, Bitness::Bits16);
        inst.length = 2;
        assert_eq!(inst.next_ip(), 0x0001);
    }

    #[test]
    fn test_reset_clears_operands() {
        let mut inst = Instruction::new(0x1000, Bitness::Bits64);
        inst.mnemonic = Mnemonic::Nop;
        inst.operands.push(Operand::reg(Register::RAX));
        inst.reset(0x2000, Bitness::Bits32);
        assert!(inst.is_invalid());
        assert!(inst.operands.is_empty());
        assert_eq!(inst.address, 0x2000);
        assert_eq!(inst.code_size, Bitness::Bits32);
    }

    #[test]
    fn test_control_flow_predicates() {
        let mut inst = Instruction::new(0x1000, Bitness::Bits64);
        assert!(!inst.is_branch());
        inst.control_flow = ControlFlow::IndirectCall { return_addr: 0x1002 };
        assert!(inst.is_branch());
        assert!(inst.is_call());
        inst.control_flow = ControlFlow::Return;
        assert!(inst.is_return());
        assert!(!inst.is_call());
    }
}
