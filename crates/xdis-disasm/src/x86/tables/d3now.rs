//! 3DNow! suffix opcodes (`0F 0F /r ib`).

use xdis_core::Mnemonic as M;

/// Maps the trailing suffix byte of a 3DNow! instruction to its mnemonic.
pub fn d3now_mnemonic(suffix: u8) -> Option<M> {
    let m = match suffix {
        0x0C => M::Pi2fw,
        0x0D => M::Pi2fd,
        0x1C => M::Pf2iw,
        0x1D => M::Pf2id,
        0x86 => M::Pfrcpv,
        0x87 => M::Pfrsqrtv,
        0x8A => M::Pfnacc,
        0x8E => M::Pfpnacc,
        0x90 => M::Pfcmpge,
        0x94 => M::Pfmin,
        0x96 => M::Pfrcp,
        0x97 => M::Pfrsqrt,
        0x9A => M::Pfsub,
        0x9E => M::Pfadd,
        0xA0 => M::Pfcmpgt,
        0xA4 => M::Pfmax,
        0xA6 => M::Pfrcpit1,
        0xA7 => M::Pfrsqit1,
        0xAA => M::Pfsubr,
        0xAE => M::Pfacc,
        0xB0 => M::Pfcmpeq,
        0xB4 => M::Pfmul,
        0xB6 => M::Pfrcpit2,
        0xB7 => M::Pmulhrw,
        0xBB => M::Pswapd,
        0xBF => M::Pavgusb,
        _ => return None,
    };
    Some(m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_unknown_suffixes() {
        assert_eq!(d3now_mnemonic(0x9E), Some(M::Pfadd));
        assert_eq!(d3now_mnemonic(0xBF), Some(M::Pavgusb));
        assert_eq!(d3now_mnemonic(0x00), None);
        assert_eq!(d3now_mnemonic(0xFF), None);
    }
}
