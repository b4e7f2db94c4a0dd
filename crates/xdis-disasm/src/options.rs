//! Decoder configuration.
//!
//! Every option toggles exactly one historical, vendor specific or otherwise
//! non-default decode path. All options are off by default, which decodes
//! the instruction set of a current Intel processor.

macro_rules! decoder_options {
    ($(
        $(#[doc = $doc:literal])*
        $field:ident, $setter:ident, $kind:ident;
    )*) => {
        /// Options that alter how specific opcodes decode.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(default))]
        pub struct DecoderOptions {
            $(
                $(#[doc = $doc])*
                pub $field: bool,
            )*
        }

        impl DecoderOptions {
            $(
                $(#[doc = $doc])*
                pub const fn $setter(mut self, enabled: bool) -> Self {
                    self.$field = enabled;
                    self
                }
            )*

            /// Returns whether the option selected by `kind` is enabled.
            pub fn is_set(&self, kind: OptionKind) -> bool {
                match kind {
                    $(OptionKind::$kind => self.$field,)*
                }
            }
        }

        /// Identifies a single decoder option, used by table nodes that
        /// switch on one.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum OptionKind {
            $($kind,)*
        }

        impl OptionKind {
            /// All option identifiers.
            pub const ALL: &'static [OptionKind] = &[$(OptionKind::$kind,)*];

            /// Name of the option field.
            pub fn name(&self) -> &'static str {
                match self {
                    $(OptionKind::$kind => stringify!($field),)*
                }
            }
        }
    };
}

decoder_options! {
    /// AMD semantics: 66h shortens 64-bit near branches, and LOCK MOV CR0 reaches CR8.
    amd, with_amd, Amd;
    /// 0F 0D and 0F 18-1F always decode as reserved NOPs.
    force_reserved_nop, with_force_reserved_nop, ForceReservedNop;
    /// 0F 10-13 decode as UMOV outside 64-bit mode.
    umov, with_umov, Umov;
    /// 0F A6/A7 decode as XBTS/IBTS.
    xbts, with_xbts, Xbts;
    /// 0F A6/A7 decode as the early 486 CMPXCHG.
    cmpxchg486a, with_cmpxchg486a, Cmpxchg486a;
    /// DB E5 decodes as FRSTPM and DF E1/E2 as the 287 FSTDW/FSTSG AX.
    old_fpu, with_old_fpu, OldFpu;
    /// 66 0F AE F8 decodes as PCOMMIT.
    pcommit, with_pcommit, Pcommit;
    /// 0F 05 decodes as the 286 LOADALL outside 64-bit mode.
    loadall286, with_loadall286, Loadall286;
    /// 0F 07 decodes as the 386 LOADALL outside 64-bit mode.
    loadall386, with_loadall386, Loadall386;
    /// 0F 0A decodes as CL1INVMB.
    cl1invmb, with_cl1invmb, Cl1invmb;
    /// 0F 24/26 decode as MOV to and from test registers.
    mov_tr, with_mov_tr, MovTr;
    /// 0F 00 /6 and 0F B8 (without F3) decode as JMPE.
    jmpe, with_jmpe, Jmpe;
    /// F3 90 decodes as NOP instead of PAUSE.
    no_pause, with_no_pause, NoPause;
    /// F3 0F 09 decodes as WBINVD instead of WBNOINVD.
    no_wbnoinvd, with_no_wbnoinvd, NoWbnoinvd;
    /// 0F 1A/1B decode as MPX instructions and F2 on branches is tagged BND.
    mpx, with_mpx, Mpx;
    /// F3 0F BC decodes as BSF instead of TZCNT.
    no_mpfx_0fbc, with_no_mpfx_0fbc, NoMpfx0fbc;
    /// F3 0F BD decodes as BSR instead of LZCNT.
    no_mpfx_0fbd, with_no_mpfx_0fbd, NoMpfx0fbd;
    /// LAHF and SAHF are invalid in 64-bit mode.
    no_lahf_sahf_64, with_no_lahf_sahf_64, NoLahfSahf64;
    /// 0F 01 FE/FF decode as reserved instead of INVLPGB/TLBSYNC.
    no_invlpgb, with_no_invlpgb, NoInvlpgb;
}

impl DecoderOptions {
    /// Creates the default option set (everything off).
    pub const fn new() -> Self {
        Self {
            amd: false,
            force_reserved_nop: false,
            umov: false,
            xbts: false,
            cmpxchg486a: false,
            old_fpu: false,
            pcommit: false,
            loadall286: false,
            loadall386: false,
            cl1invmb: false,
            mov_tr: false,
            jmpe: false,
            no_pause: false,
            no_wbnoinvd: false,
            mpx: false,
            no_mpfx_0fbc: false,
            no_mpfx_0fbd: false,
            no_lahf_sahf_64: false,
            no_invlpgb: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_all_off() {
        let options = DecoderOptions::default();
        assert_eq!(options, DecoderOptions::new());
        for kind in OptionKind::ALL {
            assert!(!options.is_set(*kind), "{} should be off", kind.name());
        }
    }

    #[test]
    fn test_setter_toggles_one_option() {
        let options = DecoderOptions::new().with_umov(true);
        for kind in OptionKind::ALL {
            assert_eq!(options.is_set(*kind), *kind == OptionKind::Umov);
        }
        assert!(!options.with_umov(false).umov);
    }
}
