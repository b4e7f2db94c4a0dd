//! Mnemonic identifiers.
//!
//! A [`Mnemonic`] names an instruction independently of its operands. The
//! set covers every instruction the decoder produces; it is not a complete
//! catalogue of the architecture.

macro_rules! mnemonics {
    ($($variant:ident => $name:literal,)*) => {
        /// Instruction mnemonic.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum Mnemonic {
            /// Sentinel for bytes that do not decode to an instruction.
            #[default]
            Invalid,
            /// Opcode space reserved as a hint NOP (0F 0D, 0F 18-1F).
            ReservedNop,
            $($variant,)*
        }

        impl Mnemonic {
            /// Every mnemonic, sentinel first.
            pub const ALL: &'static [Mnemonic] = &[
                Mnemonic::Invalid,
                Mnemonic::ReservedNop,
                $(Mnemonic::$variant,)*
            ];

            /// Lower-case assembler name.
            pub fn name(&self) -> &'static str {
                match self {
                    Mnemonic::Invalid => "(bad)",
                    Mnemonic::ReservedNop => "reservednop",
                    $(Mnemonic::$variant => $name,)*
                }
            }
        }
    };
}

mnemonics! {
    Aaa => "aaa",
    Aad => "aad",
    Aadd => "aadd",
    Aam => "aam",
    Aand => "aand",
    Aas => "aas",
    Adc => "adc",
    Adcx => "adcx",
    Add => "add",
    Addpd => "addpd",
    Addps => "addps",
    Addsd => "addsd",
    Addss => "addss",
    Addsubpd => "addsubpd",
    Addsubps => "addsubps",
    Adox => "adox",
    Aesdec => "aesdec",
    Aesdeclast => "aesdeclast",
    Aesenc => "aesenc",
    Aesenclast => "aesenclast",
    Aesimc => "aesimc",
    Aeskeygenassist => "aeskeygenassist",
    And => "and",
    Andn => "andn",
    Andnpd => "andnpd",
    Andnps => "andnps",
    Andpd => "andpd",
    Andps => "andps",
    Aor => "aor",
    Arpl => "arpl",
    Axor => "axor",
    Bextr => "bextr",
    Blcfill => "blcfill",
    Blci => "blci",
    Blcic => "blcic",
    Blcmsk => "blcmsk",
    Blcs => "blcs",
    Blendpd => "blendpd",
    Blendps => "blendps",
    Blendvpd => "blendvpd",
    Blendvps => "blendvps",
    Blsfill => "blsfill",
    Blsi => "blsi",
    Blsic => "blsic",
    Blsmsk => "blsmsk",
    Blsr => "blsr",
    Bndcl => "bndcl",
    Bndcn => "bndcn",
    Bndcu => "bndcu",
    Bndldx => "bndldx",
    Bndmk => "bndmk",
    Bndmov => "bndmov",
    Bndstx => "bndstx",
    Bound => "bound",
    Bsf => "bsf",
    Bsr => "bsr",
    Bswap => "bswap",
    Bt => "bt",
    Btc => "btc",
    Btr => "btr",
    Bts => "bts",
    Bzhi => "bzhi",
    Call => "call",
    Cbw => "cbw",
    Cdq => "cdq",
    Cdqe => "cdqe",
    Cl1invmb => "cl1invmb",
    Clac => "clac",
    Clc => "clc",
    Cld => "cld",
    Cldemote => "cldemote",
    Clflush => "clflush",
    Clflushopt => "clflushopt",
    Clgi => "clgi",
    Cli => "cli",
    Clrssbsy => "clrssbsy",
    Clts => "clts",
    Clwb => "clwb",
    Clzero => "clzero",
    Cmc => "cmc",
    Cmova => "cmova",
    Cmovae => "cmovae",
    Cmovb => "cmovb",
    Cmovbe => "cmovbe",
    Cmove => "cmove",
    Cmovg => "cmovg",
    Cmovge => "cmovge",
    Cmovl => "cmovl",
    Cmovle => "cmovle",
    Cmovne => "cmovne",
    Cmovno => "cmovno",
    Cmovnp => "cmovnp",
    Cmovns => "cmovns",
    Cmovo => "cmovo",
    Cmovp => "cmovp",
    Cmovs => "cmovs",
    Cmp => "cmp",
    Cmpbexadd => "cmpbexadd",
    Cmpbxadd => "cmpbxadd",
    Cmplexadd => "cmplexadd",
    Cmplxadd => "cmplxadd",
    Cmpnbexadd => "cmpnbexadd",
    Cmpnbxadd => "cmpnbxadd",
    Cmpnlexadd => "cmpnlexadd",
    Cmpnlxadd => "cmpnlxadd",
    Cmpnoxadd => "cmpnoxadd",
    Cmpnpxadd => "cmpnpxadd",
    Cmpnsxadd => "cmpnsxadd",
    Cmpnzxadd => "cmpnzxadd",
    Cmpoxadd => "cmpoxadd",
    Cmppd => "cmppd",
    Cmpps => "cmpps",
    Cmppxadd => "cmppxadd",
    Cmpsb => "cmpsb",
    Cmpsd => "cmpsd",
    Cmpsq => "cmpsq",
    Cmpss => "cmpss",
    Cmpsw => "cmpsw",
    Cmpsxadd => "cmpsxadd",
    Cmpxchg => "cmpxchg",
    Cmpxchg16b => "cmpxchg16b",
    Cmpxchg8b => "cmpxchg8b",
    Cmpzxadd => "cmpzxadd",
    Comisd => "comisd",
    Comiss => "comiss",
    Cpuid => "cpuid",
    Cqo => "cqo",
    Crc32 => "crc32",
    Cvtdq2pd => "cvtdq2pd",
    Cvtdq2ps => "cvtdq2ps",
    Cvtpd2dq => "cvtpd2dq",
    Cvtpd2pi => "cvtpd2pi",
    Cvtpd2ps => "cvtpd2ps",
    Cvtpi2pd => "cvtpi2pd",
    Cvtpi2ps => "cvtpi2ps",
    Cvtps2dq => "cvtps2dq",
    Cvtps2pd => "cvtps2pd",
    Cvtps2pi => "cvtps2pi",
    Cvtsd2si => "cvtsd2si",
    Cvtsd2ss => "cvtsd2ss",
    Cvtsi2sd => "cvtsi2sd",
    Cvtsi2ss => "cvtsi2ss",
    Cvtss2sd => "cvtss2sd",
    Cvtss2si => "cvtss2si",
    Cvttpd2dq => "cvttpd2dq",
    Cvttpd2pi => "cvttpd2pi",
    Cvttps2dq => "cvttps2dq",
    Cvttps2pi => "cvttps2pi",
    Cvttsd2si => "cvttsd2si",
    Cvttss2si => "cvttss2si",
    Cwd => "cwd",
    Cwde => "cwde",
    Daa => "daa",
    Das => "das",
    Dec => "dec",
    Div => "div",
    Divpd => "divpd",
    Divps => "divps",
    Divsd => "divsd",
    Divss => "divss",
    Dppd => "dppd",
    Dpps => "dpps",
    Emms => "emms",
    Encls => "encls",
    Enclu => "enclu",
    Endbr32 => "endbr32",
    Endbr64 => "endbr64",
    Enqcmd => "enqcmd",
    Enqcmds => "enqcmds",
    Enter => "enter",
    Extractps => "extractps",
    Extrq => "extrq",
    F2xm1 => "f2xm1",
    Fabs => "fabs",
    Fadd => "fadd",
    Faddp => "faddp",
    Fbld => "fbld",
    Fbstp => "fbstp",
    Fchs => "fchs",
    Fcmovb => "fcmovb",
    Fcmovbe => "fcmovbe",
    Fcmove => "fcmove",
    Fcmovnb => "fcmovnb",
    Fcmovnbe => "fcmovnbe",
    Fcmovne => "fcmovne",
    Fcmovnu => "fcmovnu",
    Fcmovu => "fcmovu",
    Fcom => "fcom",
    Fcom2 => "fcom2",
    Fcomi => "fcomi",
    Fcomip => "fcomip",
    Fcomp => "fcomp",
    Fcomp3 => "fcomp3",
    Fcomp5 => "fcomp5",
    Fcompp => "fcompp",
    Fcos => "fcos",
    Fdecstp => "fdecstp",
    Fdiv => "fdiv",
    Fdivp => "fdivp",
    Fdivr => "fdivr",
    Fdivrp => "fdivrp",
    Femms => "femms",
    Ffree => "ffree",
    Ffreep => "ffreep",
    Fiadd => "fiadd",
    Ficom => "ficom",
    Ficomp => "ficomp",
    Fidiv => "fidiv",
    Fidivr => "fidivr",
    Fild => "fild",
    Fimul => "fimul",
    Fincstp => "fincstp",
    Fist => "fist",
    Fistp => "fistp",
    Fisttp => "fisttp",
    Fisub => "fisub",
    Fisubr => "fisubr",
    Fld => "fld",
    Fld1 => "fld1",
    Fldcw => "fldcw",
    Fldenv => "fldenv",
    Fldl2e => "fldl2e",
    Fldl2t => "fldl2t",
    Fldlg2 => "fldlg2",
    Fldln2 => "fldln2",
    Fldpi => "fldpi",
    Fldz => "fldz",
    Fmul => "fmul",
    Fmulp => "fmulp",
    Fnclex => "fnclex",
    Fndisi => "fndisi",
    Fneni => "fneni",
    Fninit => "fninit",
    Fnop => "fnop",
    Fnsave => "fnsave",
    Fnsetpm => "fnsetpm",
    Fnstcw => "fnstcw",
    Fnstenv => "fnstenv",
    Fnstsw => "fnstsw",
    Fpatan => "fpatan",
    Fprem => "fprem",
    Fprem1 => "fprem1",
    Fptan => "fptan",
    Frndint => "frndint",
    Frstor => "frstor",
    Frstpm => "frstpm",
    Fscale => "fscale",
    Fsin => "fsin",
    Fsincos => "fsincos",
    Fsqrt => "fsqrt",
    Fst => "fst",
    Fstdw => "fstdw",
    Fstp => "fstp",
    Fstp1 => "fstp1",
    Fstp8 => "fstp8",
    Fstp9 => "fstp9",
    Fstsg => "fstsg",
    Fsub => "fsub",
    Fsubp => "fsubp",
    Fsubr => "fsubr",
    Fsubrp => "fsubrp",
    Ftst => "ftst",
    Fucom => "fucom",
    Fucomi => "fucomi",
    Fucomip => "fucomip",
    Fucomp => "fucomp",
    Fucompp => "fucompp",
    Fxam => "fxam",
    Fxch => "fxch",
    Fxch4 => "fxch4",
    Fxch7 => "fxch7",
    Fxrstor => "fxrstor",
    Fxrstor64 => "fxrstor64",
    Fxsave => "fxsave",
    Fxsave64 => "fxsave64",
    Fxtract => "fxtract",
    Fyl2x => "fyl2x",
    Fyl2xp1 => "fyl2xp1",
    Getsec => "getsec",
    Gf2p8affineinvqb => "gf2p8affineinvqb",
    Gf2p8affineqb => "gf2p8affineqb",
    Gf2p8mulb => "gf2p8mulb",
    Haddpd => "haddpd",
    Haddps => "haddps",
    Hlt => "hlt",
    Hsubpd => "hsubpd",
    Hsubps => "hsubps",
    Ibts => "ibts",
    Idiv => "idiv",
    Imul => "imul",
    In => "in",
    Inc => "inc",
    Incsspd => "incsspd",
    Incsspq => "incsspq",
    Insb => "insb",
    Insd => "insd",
    Insertps => "insertps",
    Insertq => "insertq",
    Insw => "insw",
    Int => "int",
    Int1 => "int1",
    Int3 => "int3",
    Into => "into",
    Invd => "invd",
    Invept => "invept",
    Invlpg => "invlpg",
    Invlpga => "invlpga",
    Invlpgb => "invlpgb",
    Invpcid => "invpcid",
    Invvpid => "invvpid",
    Iret => "iret",
    Iretd => "iretd",
    Iretq => "iretq",
    Ja => "ja",
    Jae => "jae",
    Jb => "jb",
    Jbe => "jbe",
    Jcxz => "jcxz",
    Je => "je",
    Jecxz => "jecxz",
    Jg => "jg",
    Jge => "jge",
    Jl => "jl",
    Jle => "jle",
    Jmp => "jmp",
    Jmpe => "jmpe",
    Jne => "jne",
    Jno => "jno",
    Jnp => "jnp",
    Jns => "jns",
    Jo => "jo",
    Jp => "jp",
    Jrcxz => "jrcxz",
    Js => "js",
    Kaddb => "kaddb",
    Kaddd => "kaddd",
    Kaddq => "kaddq",
    Kaddw => "kaddw",
    Kandb => "kandb",
    Kandd => "kandd",
    Kandnb => "kandnb",
    Kandnd => "kandnd",
    Kandnq => "kandnq",
    Kandnw => "kandnw",
    Kandq => "kandq",
    Kandw => "kandw",
    Kmovb => "kmovb",
    Kmovd => "kmovd",
    Kmovq => "kmovq",
    Kmovw => "kmovw",
    Knotb => "knotb",
    Knotd => "knotd",
    Knotq => "knotq",
    Knotw => "knotw",
    Korb => "korb",
    Kord => "kord",
    Korq => "korq",
    Kortestb => "kortestb",
    Kortestd => "kortestd",
    Kortestq => "kortestq",
    Kortestw => "kortestw",
    Korw => "korw",
    Kshiftlb => "kshiftlb",
    Kshiftld => "kshiftld",
    Kshiftlq => "kshiftlq",
    Kshiftlw => "kshiftlw",
    Kshiftrb => "kshiftrb",
    Kshiftrd => "kshiftrd",
    Kshiftrq => "kshiftrq",
    Kshiftrw => "kshiftrw",
    Ktestb => "ktestb",
    Ktestd => "ktestd",
    Ktestq => "ktestq",
    Ktestw => "ktestw",
    Kunpckbw => "kunpckbw",
    Kunpckdq => "kunpckdq",
    Kunpckwd => "kunpckwd",
    Kxnorb => "kxnorb",
    Kxnord => "kxnord",
    Kxnorq => "kxnorq",
    Kxnorw => "kxnorw",
    Kxorb => "kxorb",
    Kxord => "kxord",
    Kxorq => "kxorq",
    Kxorw => "kxorw",
    Lahf => "lahf",
    Lar => "lar",
    Lddqu => "lddqu",
    Ldmxcsr => "ldmxcsr",
    Lds => "lds",
    Ldtilecfg => "ldtilecfg",
    Lea => "lea",
    Leave => "leave",
    Les => "les",
    Lfence => "lfence",
    Lfs => "lfs",
    Lgdt => "lgdt",
    Lgs => "lgs",
    Lidt => "lidt",
    Lkgs => "lkgs",
    Lldt => "lldt",
    Llwpcb => "llwpcb",
    Lmsw => "lmsw",
    Loadall => "loadall",
    Lodsb => "lodsb",
    Lodsd => "lodsd",
    Lodsq => "lodsq",
    Lodsw => "lodsw",
    Loop => "loop",
    Loope => "loope",
    Loopne => "loopne",
    Lsl => "lsl",
    Lss => "lss",
    Ltr => "ltr",
    Lwpins => "lwpins",
    Lwpval => "lwpval",
    Lzcnt => "lzcnt",
    Maskmovdqu => "maskmovdqu",
    Maskmovq => "maskmovq",
    Maxpd => "maxpd",
    Maxps => "maxps",
    Maxsd => "maxsd",
    Maxss => "maxss",
    Mfence => "mfence",
    Minpd => "minpd",
    Minps => "minps",
    Minsd => "minsd",
    Minss => "minss",
    Monitor => "monitor",
    Monitorx => "monitorx",
    Montmul => "montmul",
    Mov => "mov",
    Movapd => "movapd",
    Movaps => "movaps",
    Movbe => "movbe",
    Movd => "movd",
    Movddup => "movddup",
    Movdir64b => "movdir64b",
    Movdiri => "movdiri",
    Movdq2q => "movdq2q",
    Movdqa => "movdqa",
    Movdqu => "movdqu",
    Movhlps => "movhlps",
    Movhpd => "movhpd",
    Movhps => "movhps",
    Movlhps => "movlhps",
    Movlpd => "movlpd",
    Movlps => "movlps",
    Movmskpd => "movmskpd",
    Movmskps => "movmskps",
    Movntdq => "movntdq",
    Movntdqa => "movntdqa",
    Movnti => "movnti",
    Movntpd => "movntpd",
    Movntps => "movntps",
    Movntq => "movntq",
    Movntsd => "movntsd",
    Movntss => "movntss",
    Movq => "movq",
    Movq2dq => "movq2dq",
    Movsb => "movsb",
    Movsd => "movsd",
    Movshdup => "movshdup",
    Movsldup => "movsldup",
    Movsq => "movsq",
    Movss => "movss",
    Movsw => "movsw",
    Movsx => "movsx",
    Movsxd => "movsxd",
    Movupd => "movupd",
    Movups => "movups",
    Movzx => "movzx",
    Mpsadbw => "mpsadbw",
    Mul => "mul",
    Mulpd => "mulpd",
    Mulps => "mulps",
    Mulsd => "mulsd",
    Mulss => "mulss",
    Mulx => "mulx",
    Mwait => "mwait",
    Mwaitx => "mwaitx",
    Neg => "neg",
    Nop => "nop",
    Not => "not",
    Or => "or",
    Orpd => "orpd",
    Orps => "orps",
    Out => "out",
    Outsb => "outsb",
    Outsd => "outsd",
    Outsw => "outsw",
    Pabsb => "pabsb",
    Pabsd => "pabsd",
    Pabsw => "pabsw",
    Packssdw => "packssdw",
    Packsswb => "packsswb",
    Packusdw => "packusdw",
    Packuswb => "packuswb",
    Paddb => "paddb",
    Paddd => "paddd",
    Paddq => "paddq",
    Paddsb => "paddsb",
    Paddsw => "paddsw",
    Paddusb => "paddusb",
    Paddusw => "paddusw",
    Paddw => "paddw",
    Palignr => "palignr",
    Pand => "pand",
    Pandn => "pandn",
    Pause => "pause",
    Pavgb => "pavgb",
    Pavgusb => "pavgusb",
    Pavgw => "pavgw",
    Pblendvb => "pblendvb",
    Pblendw => "pblendw",
    Pclmulqdq => "pclmulqdq",
    Pcmpeqb => "pcmpeqb",
    Pcmpeqd => "pcmpeqd",
    Pcmpeqq => "pcmpeqq",
    Pcmpeqw => "pcmpeqw",
    Pcmpestri => "pcmpestri",
    Pcmpestrm => "pcmpestrm",
    Pcmpgtb => "pcmpgtb",
    Pcmpgtd => "pcmpgtd",
    Pcmpgtq => "pcmpgtq",
    Pcmpgtw => "pcmpgtw",
    Pcmpistri => "pcmpistri",
    Pcmpistrm => "pcmpistrm",
    Pcommit => "pcommit",
    Pconfig => "pconfig",
    Pdep => "pdep",
    Pext => "pext",
    Pextrb => "pextrb",
    Pextrd => "pextrd",
    Pextrq => "pextrq",
    Pextrw => "pextrw",
    Pf2id => "pf2id",
    Pf2iw => "pf2iw",
    Pfacc => "pfacc",
    Pfadd => "pfadd",
    Pfcmpeq => "pfcmpeq",
    Pfcmpge => "pfcmpge",
    Pfcmpgt => "pfcmpgt",
    Pfmax => "pfmax",
    Pfmin => "pfmin",
    Pfmul => "pfmul",
    Pfnacc => "pfnacc",
    Pfpnacc => "pfpnacc",
    Pfrcp => "pfrcp",
    Pfrcpit1 => "pfrcpit1",
    Pfrcpit2 => "pfrcpit2",
    Pfrcpv => "pfrcpv",
    Pfrsqit1 => "pfrsqit1",
    Pfrsqrt => "pfrsqrt",
    Pfrsqrtv => "pfrsqrtv",
    Pfsub => "pfsub",
    Pfsubr => "pfsubr",
    Phaddd => "phaddd",
    Phaddsw => "phaddsw",
    Phaddw => "phaddw",
    Phminposuw => "phminposuw",
    Phsubd => "phsubd",
    Phsubsw => "phsubsw",
    Phsubw => "phsubw",
    Pi2fd => "pi2fd",
    Pi2fw => "pi2fw",
    Pinsrb => "pinsrb",
    Pinsrd => "pinsrd",
    Pinsrq => "pinsrq",
    Pinsrw => "pinsrw",
    Pmaddubsw => "pmaddubsw",
    Pmaddwd => "pmaddwd",
    Pmaxsb => "pmaxsb",
    Pmaxsd => "pmaxsd",
    Pmaxsw => "pmaxsw",
    Pmaxub => "pmaxub",
    Pmaxud => "pmaxud",
    Pmaxuw => "pmaxuw",
    Pminsb => "pminsb",
    Pminsd => "pminsd",
    Pminsw => "pminsw",
    Pminub => "pminub",
    Pminud => "pminud",
    Pminuw => "pminuw",
    Pmovmskb => "pmovmskb",
    Pmovsxbd => "pmovsxbd",
    Pmovsxbq => "pmovsxbq",
    Pmovsxbw => "pmovsxbw",
    Pmovsxdq => "pmovsxdq",
    Pmovsxwd => "pmovsxwd",
    Pmovsxwq => "pmovsxwq",
    Pmovzxbd => "pmovzxbd",
    Pmovzxbq => "pmovzxbq",
    Pmovzxbw => "pmovzxbw",
    Pmovzxdq => "pmovzxdq",
    Pmovzxwd => "pmovzxwd",
    Pmovzxwq => "pmovzxwq",
    Pmuldq => "pmuldq",
    Pmulhrsw => "pmulhrsw",
    Pmulhrw => "pmulhrw",
    Pmulhuw => "pmulhuw",
    Pmulhw => "pmulhw",
    Pmulld => "pmulld",
    Pmullw => "pmullw",
    Pmuludq => "pmuludq",
    Pop => "pop",
    Popa => "popa",
    Popad => "popad",
    Popcnt => "popcnt",
    Popf => "popf",
    Popfd => "popfd",
    Popfq => "popfq",
    Por => "por",
    Prefetch => "prefetch",
    Prefetchnta => "prefetchnta",
    Prefetcht0 => "prefetcht0",
    Prefetcht1 => "prefetcht1",
    Prefetcht2 => "prefetcht2",
    Prefetchw => "prefetchw",
    Prefetchwt1 => "prefetchwt1",
    Psadbw => "psadbw",
    Pshufb => "pshufb",
    Pshufd => "pshufd",
    Pshufhw => "pshufhw",
    Pshuflw => "pshuflw",
    Pshufw => "pshufw",
    Psignb => "psignb",
    Psignd => "psignd",
    Psignw => "psignw",
    Pslld => "pslld",
    Pslldq => "pslldq",
    Psllq => "psllq",
    Psllw => "psllw",
    Psrad => "psrad",
    Psraw => "psraw",
    Psrld => "psrld",
    Psrldq => "psrldq",
    Psrlq => "psrlq",
    Psrlw => "psrlw",
    Psubb => "psubb",
    Psubd => "psubd",
    Psubq => "psubq",
    Psubsb => "psubsb",
    Psubsw => "psubsw",
    Psubusb => "psubusb",
    Psubusw => "psubusw",
    Psubw => "psubw",
    Pswapd => "pswapd",
    Ptest => "ptest",
    Ptwrite => "ptwrite",
    Punpckhbw => "punpckhbw",
    Punpckhdq => "punpckhdq",
    Punpckhqdq => "punpckhqdq",
    Punpckhwd => "punpckhwd",
    Punpcklbw => "punpcklbw",
    Punpckldq => "punpckldq",
    Punpcklqdq => "punpcklqdq",
    Punpcklwd => "punpcklwd",
    Push => "push",
    Pusha => "pusha",
    Pushad => "pushad",
    Pushf => "pushf",
    Pushfd => "pushfd",
    Pushfq => "pushfq",
    Pxor => "pxor",
    Rcl => "rcl",
    Rcpps => "rcpps",
    Rcpss => "rcpss",
    Rcr => "rcr",
    Rdfsbase => "rdfsbase",
    Rdgsbase => "rdgsbase",
    Rdmsr => "rdmsr",
    Rdpid => "rdpid",
    Rdpkru => "rdpkru",
    Rdpmc => "rdpmc",
    Rdpru => "rdpru",
    Rdrand => "rdrand",
    Rdseed => "rdseed",
    Rdsspd => "rdsspd",
    Rdsspq => "rdsspq",
    Rdtsc => "rdtsc",
    Rdtscp => "rdtscp",
    Ret => "ret",
    Retf => "retf",
    Rol => "rol",
    Ror => "ror",
    Rorx => "rorx",
    Roundpd => "roundpd",
    Roundps => "roundps",
    Roundsd => "roundsd",
    Roundss => "roundss",
    Rsm => "rsm",
    Rsqrtps => "rsqrtps",
    Rsqrtss => "rsqrtss",
    Rstorssp => "rstorssp",
    Sahf => "sahf",
    Sal => "sal",
    Salc => "salc",
    Sar => "sar",
    Sarx => "sarx",
    Saveprevssp => "saveprevssp",
    Sbb => "sbb",
    Scasb => "scasb",
    Scasd => "scasd",
    Scasq => "scasq",
    Scasw => "scasw",
    Senduipi => "senduipi",
    Serialize => "serialize",
    Seta => "seta",
    Setae => "setae",
    Setb => "setb",
    Setbe => "setbe",
    Sete => "sete",
    Setg => "setg",
    Setge => "setge",
    Setl => "setl",
    Setle => "setle",
    Setne => "setne",
    Setno => "setno",
    Setnp => "setnp",
    Setns => "setns",
    Seto => "seto",
    Setp => "setp",
    Sets => "sets",
    Setssbsy => "setssbsy",
    Sfence => "sfence",
    Sgdt => "sgdt",
    Sha1msg1 => "sha1msg1",
    Sha1msg2 => "sha1msg2",
    Sha1nexte => "sha1nexte",
    Sha1rnds4 => "sha1rnds4",
    Sha256msg1 => "sha256msg1",
    Sha256msg2 => "sha256msg2",
    Sha256rnds2 => "sha256rnds2",
    Shl => "shl",
    Shld => "shld",
    Shlx => "shlx",
    Shr => "shr",
    Shrd => "shrd",
    Shrx => "shrx",
    Shufpd => "shufpd",
    Shufps => "shufps",
    Sidt => "sidt",
    Skinit => "skinit",
    Sldt => "sldt",
    Slwpcb => "slwpcb",
    Smsw => "smsw",
    Sqrtpd => "sqrtpd",
    Sqrtps => "sqrtps",
    Sqrtsd => "sqrtsd",
    Sqrtss => "sqrtss",
    Stac => "stac",
    Stc => "stc",
    Std => "std",
    Stgi => "stgi",
    Sti => "sti",
    Stmxcsr => "stmxcsr",
    Stosb => "stosb",
    Stosd => "stosd",
    Stosq => "stosq",
    Stosw => "stosw",
    Str => "str",
    Sttilecfg => "sttilecfg",
    Sub => "sub",
    Subpd => "subpd",
    Subps => "subps",
    Subsd => "subsd",
    Subss => "subss",
    Swapgs => "swapgs",
    Syscall => "syscall",
    Sysenter => "sysenter",
    Sysexit => "sysexit",
    Sysexitq => "sysexitq",
    Sysret => "sysret",
    Sysretq => "sysretq",
    T1mskc => "t1mskc",
    Tdpbf16ps => "tdpbf16ps",
    Tdpbssd => "tdpbssd",
    Tdpbsud => "tdpbsud",
    Tdpbusd => "tdpbusd",
    Tdpbuud => "tdpbuud",
    Test => "test",
    Tileloadd => "tileloadd",
    Tileloaddt1 => "tileloaddt1",
    Tilerelease => "tilerelease",
    Tilestored => "tilestored",
    Tilezero => "tilezero",
    Tlbsync => "tlbsync",
    Tpause => "tpause",
    Tzcnt => "tzcnt",
    Tzmsk => "tzmsk",
    Ucomisd => "ucomisd",
    Ucomiss => "ucomiss",
    Ud0 => "ud0",
    Ud1 => "ud1",
    Ud2 => "ud2",
    Umonitor => "umonitor",
    Umov => "umov",
    Umwait => "umwait",
    Unpckhpd => "unpckhpd",
    Unpckhps => "unpckhps",
    Unpcklpd => "unpcklpd",
    Unpcklps => "unpcklps",
    V4fmaddps => "v4fmaddps",
    V4fmaddss => "v4fmaddss",
    V4fnmaddps => "v4fnmaddps",
    V4fnmaddss => "v4fnmaddss",
    Vaddpd => "vaddpd",
    Vaddps => "vaddps",
    Vaddsd => "vaddsd",
    Vaddss => "vaddss",
    Vaddsubpd => "vaddsubpd",
    Vaddsubps => "vaddsubps",
    Vaesdec => "vaesdec",
    Vaesdeclast => "vaesdeclast",
    Vaesenc => "vaesenc",
    Vaesenclast => "vaesenclast",
    Vaesimc => "vaesimc",
    Vaeskeygenassist => "vaeskeygenassist",
    Valignd => "valignd",
    Valignq => "valignq",
    Vandnpd => "vandnpd",
    Vandnps => "vandnps",
    Vandpd => "vandpd",
    Vandps => "vandps",
    Vblendmpd => "vblendmpd",
    Vblendmps => "vblendmps",
    Vblendpd => "vblendpd",
    Vblendps => "vblendps",
    Vblendvpd => "vblendvpd",
    Vblendvps => "vblendvps",
    Vbroadcastf128 => "vbroadcastf128",
    Vbroadcastf32x2 => "vbroadcastf32x2",
    Vbroadcastf32x4 => "vbroadcastf32x4",
    Vbroadcastf32x8 => "vbroadcastf32x8",
    Vbroadcastf64x2 => "vbroadcastf64x2",
    Vbroadcastf64x4 => "vbroadcastf64x4",
    Vbroadcasti128 => "vbroadcasti128",
    Vbroadcasti32x2 => "vbroadcasti32x2",
    Vbroadcasti32x4 => "vbroadcasti32x4",
    Vbroadcasti32x8 => "vbroadcasti32x8",
    Vbroadcasti64x2 => "vbroadcasti64x2",
    Vbroadcasti64x4 => "vbroadcasti64x4",
    Vbroadcastsd => "vbroadcastsd",
    Vbroadcastss => "vbroadcastss",
    Vcmppd => "vcmppd",
    Vcmpps => "vcmpps",
    Vcmpsd => "vcmpsd",
    Vcmpss => "vcmpss",
    Vcomisd => "vcomisd",
    Vcomiss => "vcomiss",
    Vcompresspd => "vcompresspd",
    Vcompressps => "vcompressps",
    Vcvtdq2pd => "vcvtdq2pd",
    Vcvtdq2ps => "vcvtdq2ps",
    Vcvtne2ps2bf16 => "vcvtne2ps2bf16",
    Vcvtneps2bf16 => "vcvtneps2bf16",
    Vcvtpd2dq => "vcvtpd2dq",
    Vcvtpd2ps => "vcvtpd2ps",
    Vcvtpd2udq => "vcvtpd2udq",
    Vcvtpd2uqq => "vcvtpd2uqq",
    Vcvtph2ps => "vcvtph2ps",
    Vcvtps2dq => "vcvtps2dq",
    Vcvtps2pd => "vcvtps2pd",
    Vcvtps2ph => "vcvtps2ph",
    Vcvtps2udq => "vcvtps2udq",
    Vcvtps2uqq => "vcvtps2uqq",
    Vcvtqq2pd => "vcvtqq2pd",
    Vcvtqq2ps => "vcvtqq2ps",
    Vcvtsd2si => "vcvtsd2si",
    Vcvtsd2ss => "vcvtsd2ss",
    Vcvtsd2usi => "vcvtsd2usi",
    Vcvtsi2sd => "vcvtsi2sd",
    Vcvtsi2ss => "vcvtsi2ss",
    Vcvtss2sd => "vcvtss2sd",
    Vcvtss2si => "vcvtss2si",
    Vcvtss2usi => "vcvtss2usi",
    Vcvttpd2dq => "vcvttpd2dq",
    Vcvttpd2udq => "vcvttpd2udq",
    Vcvttpd2uqq => "vcvttpd2uqq",
    Vcvttps2dq => "vcvttps2dq",
    Vcvttps2udq => "vcvttps2udq",
    Vcvttps2uqq => "vcvttps2uqq",
    Vcvttsd2si => "vcvttsd2si",
    Vcvttsd2usi => "vcvttsd2usi",
    Vcvttss2si => "vcvttss2si",
    Vcvttss2usi => "vcvttss2usi",
    Vcvtudq2pd => "vcvtudq2pd",
    Vcvtudq2ps => "vcvtudq2ps",
    Vcvtuqq2pd => "vcvtuqq2pd",
    Vcvtuqq2ps => "vcvtuqq2ps",
    Vcvtusi2sd => "vcvtusi2sd",
    Vcvtusi2ss => "vcvtusi2ss",
    Vdbpsadbw => "vdbpsadbw",
    Vdivpd => "vdivpd",
    Vdivps => "vdivps",
    Vdivsd => "vdivsd",
    Vdivss => "vdivss",
    Vdpbf16ps => "vdpbf16ps",
    Vdppd => "vdppd",
    Vdpps => "vdpps",
    Verr => "verr",
    Verw => "verw",
    Vexp2pd => "vexp2pd",
    Vexp2ps => "vexp2ps",
    Vexpandpd => "vexpandpd",
    Vexpandps => "vexpandps",
    Vextractf128 => "vextractf128",
    Vextractf32x4 => "vextractf32x4",
    Vextractf32x8 => "vextractf32x8",
    Vextractf64x2 => "vextractf64x2",
    Vextractf64x4 => "vextractf64x4",
    Vextracti128 => "vextracti128",
    Vextracti32x4 => "vextracti32x4",
    Vextracti32x8 => "vextracti32x8",
    Vextracti64x2 => "vextracti64x2",
    Vextracti64x4 => "vextracti64x4",
    Vextractps => "vextractps",
    Vfixupimmpd => "vfixupimmpd",
    Vfixupimmps => "vfixupimmps",
    Vfixupimmsd => "vfixupimmsd",
    Vfixupimmss => "vfixupimmss",
    Vfmadd132pd => "vfmadd132pd",
    Vfmadd132ps => "vfmadd132ps",
    Vfmadd132sd => "vfmadd132sd",
    Vfmadd132ss => "vfmadd132ss",
    Vfmadd213pd => "vfmadd213pd",
    Vfmadd213ps => "vfmadd213ps",
    Vfmadd213sd => "vfmadd213sd",
    Vfmadd213ss => "vfmadd213ss",
    Vfmadd231pd => "vfmadd231pd",
    Vfmadd231ps => "vfmadd231ps",
    Vfmadd231sd => "vfmadd231sd",
    Vfmadd231ss => "vfmadd231ss",
    Vfmaddpd => "vfmaddpd",
    Vfmaddps => "vfmaddps",
    Vfmaddsd => "vfmaddsd",
    Vfmaddss => "vfmaddss",
    Vfmaddsub132pd => "vfmaddsub132pd",
    Vfmaddsub132ps => "vfmaddsub132ps",
    Vfmaddsub213pd => "vfmaddsub213pd",
    Vfmaddsub213ps => "vfmaddsub213ps",
    Vfmaddsub231pd => "vfmaddsub231pd",
    Vfmaddsub231ps => "vfmaddsub231ps",
    Vfmaddsubpd => "vfmaddsubpd",
    Vfmaddsubps => "vfmaddsubps",
    Vfmsub132pd => "vfmsub132pd",
    Vfmsub132ps => "vfmsub132ps",
    Vfmsub132sd => "vfmsub132sd",
    Vfmsub132ss => "vfmsub132ss",
    Vfmsub213pd => "vfmsub213pd",
    Vfmsub213ps => "vfmsub213ps",
    Vfmsub213sd => "vfmsub213sd",
    Vfmsub213ss => "vfmsub213ss",
    Vfmsub231pd => "vfmsub231pd",
    Vfmsub231ps => "vfmsub231ps",
    Vfmsub231sd => "vfmsub231sd",
    Vfmsub231ss => "vfmsub231ss",
    Vfmsubadd132pd => "vfmsubadd132pd",
    Vfmsubadd132ps => "vfmsubadd132ps",
    Vfmsubadd213pd => "vfmsubadd213pd",
    Vfmsubadd213ps => "vfmsubadd213ps",
    Vfmsubadd231pd => "vfmsubadd231pd",
    Vfmsubadd231ps => "vfmsubadd231ps",
    Vfmsubaddpd => "vfmsubaddpd",
    Vfmsubaddps => "vfmsubaddps",
    Vfmsubpd => "vfmsubpd",
    Vfmsubps => "vfmsubps",
    Vfmsubsd => "vfmsubsd",
    Vfmsubss => "vfmsubss",
    Vfnmadd132pd => "vfnmadd132pd",
    Vfnmadd132ps => "vfnmadd132ps",
    Vfnmadd132sd => "vfnmadd132sd",
    Vfnmadd132ss => "vfnmadd132ss",
    Vfnmadd213pd => "vfnmadd213pd",
    Vfnmadd213ps => "vfnmadd213ps",
    Vfnmadd213sd => "vfnmadd213sd",
    Vfnmadd213ss => "vfnmadd213ss",
    Vfnmadd231pd => "vfnmadd231pd",
    Vfnmadd231ps => "vfnmadd231ps",
    Vfnmadd231sd => "vfnmadd231sd",
    Vfnmadd231ss => "vfnmadd231ss",
    Vfnmaddpd => "vfnmaddpd",
    Vfnmaddps => "vfnmaddps",
    Vfnmaddsd => "vfnmaddsd",
    Vfnmaddss => "vfnmaddss",
    Vfnmsub132pd => "vfnmsub132pd",
    Vfnmsub132ps => "vfnmsub132ps",
    Vfnmsub132sd => "vfnmsub132sd",
    Vfnmsub132ss => "vfnmsub132ss",
    Vfnmsub213pd => "vfnmsub213pd",
    Vfnmsub213ps => "vfnmsub213ps",
    Vfnmsub213sd => "vfnmsub213sd",
    Vfnmsub213ss => "vfnmsub213ss",
    Vfnmsub231pd => "vfnmsub231pd",
    Vfnmsub231ps => "vfnmsub231ps",
    Vfnmsub231sd => "vfnmsub231sd",
    Vfnmsub231ss => "vfnmsub231ss",
    Vfnmsubpd => "vfnmsubpd",
    Vfnmsubps => "vfnmsubps",
    Vfnmsubsd => "vfnmsubsd",
    Vfnmsubss => "vfnmsubss",
    Vfpclasspd => "vfpclasspd",
    Vfpclassph => "vfpclassph",
    Vfpclassps => "vfpclassps",
    Vfpclasssd => "vfpclasssd",
    Vfpclasssh => "vfpclasssh",
    Vfpclassss => "vfpclassss",
    Vfrczpd => "vfrczpd",
    Vfrczps => "vfrczps",
    Vfrczsd => "vfrczsd",
    Vfrczss => "vfrczss",
    Vgatherdpd => "vgatherdpd",
    Vgatherdps => "vgatherdps",
    Vgatherqpd => "vgatherqpd",
    Vgatherqps => "vgatherqps",
    Vgetexppd => "vgetexppd",
    Vgetexpps => "vgetexpps",
    Vgetexpsd => "vgetexpsd",
    Vgetexpss => "vgetexpss",
    Vgetmantpd => "vgetmantpd",
    Vgetmantph => "vgetmantph",
    Vgetmantps => "vgetmantps",
    Vgetmantsd => "vgetmantsd",
    Vgetmantsh => "vgetmantsh",
    Vgetmantss => "vgetmantss",
    Vgf2p8affineinvqb => "vgf2p8affineinvqb",
    Vgf2p8affineqb => "vgf2p8affineqb",
    Vgf2p8mulb => "vgf2p8mulb",
    Vhaddpd => "vhaddpd",
    Vhaddps => "vhaddps",
    Vhsubpd => "vhsubpd",
    Vhsubps => "vhsubps",
    Vinsertf128 => "vinsertf128",
    Vinsertf32x4 => "vinsertf32x4",
    Vinsertf32x8 => "vinsertf32x8",
    Vinsertf64x2 => "vinsertf64x2",
    Vinsertf64x4 => "vinsertf64x4",
    Vinserti128 => "vinserti128",
    Vinserti32x4 => "vinserti32x4",
    Vinserti32x8 => "vinserti32x8",
    Vinserti64x2 => "vinserti64x2",
    Vinserti64x4 => "vinserti64x4",
    Vinsertps => "vinsertps",
    Vlddqu => "vlddqu",
    Vldmxcsr => "vldmxcsr",
    Vmaskmovdqu => "vmaskmovdqu",
    Vmaskmovpd => "vmaskmovpd",
    Vmaskmovps => "vmaskmovps",
    Vmaxpd => "vmaxpd",
    Vmaxps => "vmaxps",
    Vmaxsd => "vmaxsd",
    Vmaxss => "vmaxss",
    Vmcall => "vmcall",
    Vmclear => "vmclear",
    Vmfunc => "vmfunc",
    Vminpd => "vminpd",
    Vminps => "vminps",
    Vminsd => "vminsd",
    Vminss => "vminss",
    Vmlaunch => "vmlaunch",
    Vmload => "vmload",
    Vmmcall => "vmmcall",
    Vmovapd => "vmovapd",
    Vmovaps => "vmovaps",
    Vmovd => "vmovd",
    Vmovddup => "vmovddup",
    Vmovdqa => "vmovdqa",
    Vmovdqa32 => "vmovdqa32",
    Vmovdqa64 => "vmovdqa64",
    Vmovdqu => "vmovdqu",
    Vmovdqu16 => "vmovdqu16",
    Vmovdqu32 => "vmovdqu32",
    Vmovdqu64 => "vmovdqu64",
    Vmovdqu8 => "vmovdqu8",
    Vmovhlps => "vmovhlps",
    Vmovhpd => "vmovhpd",
    Vmovhps => "vmovhps",
    Vmovlhps => "vmovlhps",
    Vmovlpd => "vmovlpd",
    Vmovlps => "vmovlps",
    Vmovmskpd => "vmovmskpd",
    Vmovmskps => "vmovmskps",
    Vmovntdq => "vmovntdq",
    Vmovntdqa => "vmovntdqa",
    Vmovntpd => "vmovntpd",
    Vmovntps => "vmovntps",
    Vmovq => "vmovq",
    Vmovsd => "vmovsd",
    Vmovshdup => "vmovshdup",
    Vmovsldup => "vmovsldup",
    Vmovss => "vmovss",
    Vmovupd => "vmovupd",
    Vmovups => "vmovups",
    Vmpsadbw => "vmpsadbw",
    Vmptrld => "vmptrld",
    Vmptrst => "vmptrst",
    Vmread => "vmread",
    Vmresume => "vmresume",
    Vmrun => "vmrun",
    Vmsave => "vmsave",
    Vmulpd => "vmulpd",
    Vmulps => "vmulps",
    Vmulsd => "vmulsd",
    Vmulss => "vmulss",
    Vmwrite => "vmwrite",
    Vmxoff => "vmxoff",
    Vmxon => "vmxon",
    Vorpd => "vorpd",
    Vorps => "vorps",
    Vp4dpwssd => "vp4dpwssd",
    Vp4dpwssds => "vp4dpwssds",
    Vpabsb => "vpabsb",
    Vpabsd => "vpabsd",
    Vpabsq => "vpabsq",
    Vpabsw => "vpabsw",
    Vpackssdw => "vpackssdw",
    Vpacksswb => "vpacksswb",
    Vpackusdw => "vpackusdw",
    Vpackuswb => "vpackuswb",
    Vpaddb => "vpaddb",
    Vpaddd => "vpaddd",
    Vpaddq => "vpaddq",
    Vpaddsb => "vpaddsb",
    Vpaddsw => "vpaddsw",
    Vpaddusb => "vpaddusb",
    Vpaddusw => "vpaddusw",
    Vpaddw => "vpaddw",
    Vpalignr => "vpalignr",
    Vpand => "vpand",
    Vpandd => "vpandd",
    Vpandn => "vpandn",
    Vpandnd => "vpandnd",
    Vpandnq => "vpandnq",
    Vpandq => "vpandq",
    Vpavgb => "vpavgb",
    Vpavgw => "vpavgw",
    Vpblendd => "vpblendd",
    Vpblendmb => "vpblendmb",
    Vpblendmd => "vpblendmd",
    Vpblendmq => "vpblendmq",
    Vpblendmw => "vpblendmw",
    Vpblendvb => "vpblendvb",
    Vpblendw => "vpblendw",
    Vpbroadcastb => "vpbroadcastb",
    Vpbroadcastd => "vpbroadcastd",
    Vpbroadcastmb2q => "vpbroadcastmb2q",
    Vpbroadcastmw2d => "vpbroadcastmw2d",
    Vpbroadcastq => "vpbroadcastq",
    Vpbroadcastw => "vpbroadcastw",
    Vpclmulqdq => "vpclmulqdq",
    Vpcmov => "vpcmov",
    Vpcmpb => "vpcmpb",
    Vpcmpd => "vpcmpd",
    Vpcmpeqb => "vpcmpeqb",
    Vpcmpeqd => "vpcmpeqd",
    Vpcmpeqq => "vpcmpeqq",
    Vpcmpeqw => "vpcmpeqw",
    Vpcmpestri => "vpcmpestri",
    Vpcmpestrm => "vpcmpestrm",
    Vpcmpgtb => "vpcmpgtb",
    Vpcmpgtd => "vpcmpgtd",
    Vpcmpgtq => "vpcmpgtq",
    Vpcmpgtw => "vpcmpgtw",
    Vpcmpistri => "vpcmpistri",
    Vpcmpistrm => "vpcmpistrm",
    Vpcmpq => "vpcmpq",
    Vpcmpub => "vpcmpub",
    Vpcmpud => "vpcmpud",
    Vpcmpuq => "vpcmpuq",
    Vpcmpuw => "vpcmpuw",
    Vpcmpw => "vpcmpw",
    Vpcomb => "vpcomb",
    Vpcomd => "vpcomd",
    Vpcompressd => "vpcompressd",
    Vpcompressq => "vpcompressq",
    Vpcomq => "vpcomq",
    Vpcomub => "vpcomub",
    Vpcomud => "vpcomud",
    Vpcomuq => "vpcomuq",
    Vpcomuw => "vpcomuw",
    Vpcomw => "vpcomw",
    Vpconflictd => "vpconflictd",
    Vpconflictq => "vpconflictq",
    Vpdpbssd => "vpdpbssd",
    Vpdpbssds => "vpdpbssds",
    Vpdpbsud => "vpdpbsud",
    Vpdpbsuds => "vpdpbsuds",
    Vpdpbusd => "vpdpbusd",
    Vpdpbusds => "vpdpbusds",
    Vpdpbuud => "vpdpbuud",
    Vpdpbuuds => "vpdpbuuds",
    Vpdpwssd => "vpdpwssd",
    Vpdpwssds => "vpdpwssds",
    Vpdpwsud => "vpdpwsud",
    Vpdpwsuds => "vpdpwsuds",
    Vpdpwusd => "vpdpwusd",
    Vpdpwusds => "vpdpwusds",
    Vpdpwuud => "vpdpwuud",
    Vpdpwuuds => "vpdpwuuds",
    Vperm2f128 => "vperm2f128",
    Vperm2i128 => "vperm2i128",
    Vpermb => "vpermb",
    Vpermd => "vpermd",
    Vpermi2b => "vpermi2b",
    Vpermi2d => "vpermi2d",
    Vpermi2pd => "vpermi2pd",
    Vpermi2ps => "vpermi2ps",
    Vpermi2q => "vpermi2q",
    Vpermi2w => "vpermi2w",
    Vpermil2pd => "vpermil2pd",
    Vpermil2ps => "vpermil2ps",
    Vpermilpd => "vpermilpd",
    Vpermilps => "vpermilps",
    Vpermpd => "vpermpd",
    Vpermps => "vpermps",
    Vpermq => "vpermq",
    Vpermt2b => "vpermt2b",
    Vpermt2d => "vpermt2d",
    Vpermt2pd => "vpermt2pd",
    Vpermt2ps => "vpermt2ps",
    Vpermt2q => "vpermt2q",
    Vpermt2w => "vpermt2w",
    Vpermw => "vpermw",
    Vpexpandd => "vpexpandd",
    Vpexpandq => "vpexpandq",
    Vpextrb => "vpextrb",
    Vpextrd => "vpextrd",
    Vpextrq => "vpextrq",
    Vpextrw => "vpextrw",
    Vpgatherdd => "vpgatherdd",
    Vpgatherdq => "vpgatherdq",
    Vpgatherqd => "vpgatherqd",
    Vpgatherqq => "vpgatherqq",
    Vphaddbd => "vphaddbd",
    Vphaddbq => "vphaddbq",
    Vphaddbw => "vphaddbw",
    Vphaddd => "vphaddd",
    Vphadddq => "vphadddq",
    Vphaddsw => "vphaddsw",
    Vphaddubd => "vphaddubd",
    Vphaddubq => "vphaddubq",
    Vphaddubw => "vphaddubw",
    Vphaddudq => "vphaddudq",
    Vphadduwd => "vphadduwd",
    Vphadduwq => "vphadduwq",
    Vphaddw => "vphaddw",
    Vphaddwd => "vphaddwd",
    Vphaddwq => "vphaddwq",
    Vphminposuw => "vphminposuw",
    Vphsubbw => "vphsubbw",
    Vphsubd => "vphsubd",
    Vphsubdq => "vphsubdq",
    Vphsubsw => "vphsubsw",
    Vphsubw => "vphsubw",
    Vphsubwd => "vphsubwd",
    Vpinsrb => "vpinsrb",
    Vpinsrd => "vpinsrd",
    Vpinsrq => "vpinsrq",
    Vpinsrw => "vpinsrw",
    Vplzcntd => "vplzcntd",
    Vplzcntq => "vplzcntq",
    Vpmacsdd => "vpmacsdd",
    Vpmacsdqh => "vpmacsdqh",
    Vpmacsdql => "vpmacsdql",
    Vpmacssdd => "vpmacssdd",
    Vpmacssdqh => "vpmacssdqh",
    Vpmacssdql => "vpmacssdql",
    Vpmacsswd => "vpmacsswd",
    Vpmacssww => "vpmacssww",
    Vpmacswd => "vpmacswd",
    Vpmacsww => "vpmacsww",
    Vpmadcsswd => "vpmadcsswd",
    Vpmadcswd => "vpmadcswd",
    Vpmadd52huq => "vpmadd52huq",
    Vpmadd52luq => "vpmadd52luq",
    Vpmaddubsw => "vpmaddubsw",
    Vpmaddwd => "vpmaddwd",
    Vpmaskmovd => "vpmaskmovd",
    Vpmaskmovq => "vpmaskmovq",
    Vpmaxsb => "vpmaxsb",
    Vpmaxsd => "vpmaxsd",
    Vpmaxsq => "vpmaxsq",
    Vpmaxsw => "vpmaxsw",
    Vpmaxub => "vpmaxub",
    Vpmaxud => "vpmaxud",
    Vpmaxuq => "vpmaxuq",
    Vpmaxuw => "vpmaxuw",
    Vpminsb => "vpminsb",
    Vpminsd => "vpminsd",
    Vpminsq => "vpminsq",
    Vpminsw => "vpminsw",
    Vpminub => "vpminub",
    Vpminud => "vpminud",
    Vpminuq => "vpminuq",
    Vpminuw => "vpminuw",
    Vpmovb2m => "vpmovb2m",
    Vpmovd2m => "vpmovd2m",
    Vpmovdb => "vpmovdb",
    Vpmovdw => "vpmovdw",
    Vpmovm2b => "vpmovm2b",
    Vpmovm2d => "vpmovm2d",
    Vpmovm2q => "vpmovm2q",
    Vpmovm2w => "vpmovm2w",
    Vpmovmskb => "vpmovmskb",
    Vpmovq2m => "vpmovq2m",
    Vpmovqb => "vpmovqb",
    Vpmovqd => "vpmovqd",
    Vpmovqw => "vpmovqw",
    Vpmovsdb => "vpmovsdb",
    Vpmovsdw => "vpmovsdw",
    Vpmovsqb => "vpmovsqb",
    Vpmovsqd => "vpmovsqd",
    Vpmovsqw => "vpmovsqw",
    Vpmovswb => "vpmovswb",
    Vpmovsxbd => "vpmovsxbd",
    Vpmovsxbq => "vpmovsxbq",
    Vpmovsxbw => "vpmovsxbw",
    Vpmovsxdq => "vpmovsxdq",
    Vpmovsxwd => "vpmovsxwd",
    Vpmovsxwq => "vpmovsxwq",
    Vpmovw2m => "vpmovw2m",
    Vpmovwb => "vpmovwb",
    Vpmovzxbd => "vpmovzxbd",
    Vpmovzxbq => "vpmovzxbq",
    Vpmovzxbw => "vpmovzxbw",
    Vpmovzxdq => "vpmovzxdq",
    Vpmovzxwd => "vpmovzxwd",
    Vpmovzxwq => "vpmovzxwq",
    Vpmuldq => "vpmuldq",
    Vpmulhrsw => "vpmulhrsw",
    Vpmulhuw => "vpmulhuw",
    Vpmulhw => "vpmulhw",
    Vpmulld => "vpmulld",
    Vpmullq => "vpmullq",
    Vpmullw => "vpmullw",
    Vpmultishiftqb => "vpmultishiftqb",
    Vpmuludq => "vpmuludq",
    Vpor => "vpor",
    Vpord => "vpord",
    Vporq => "vporq",
    Vpperm => "vpperm",
    Vprold => "vprold",
    Vprolq => "vprolq",
    Vprolvd => "vprolvd",
    Vprolvq => "vprolvq",
    Vprord => "vprord",
    Vprorq => "vprorq",
    Vprorvd => "vprorvd",
    Vprorvq => "vprorvq",
    Vprotb => "vprotb",
    Vprotd => "vprotd",
    Vprotq => "vprotq",
    Vprotw => "vprotw",
    Vpsadbw => "vpsadbw",
    Vpscatterdd => "vpscatterdd",
    Vpscatterdq => "vpscatterdq",
    Vpscatterqd => "vpscatterqd",
    Vpscatterqq => "vpscatterqq",
    Vpshab => "vpshab",
    Vpshad => "vpshad",
    Vpshaq => "vpshaq",
    Vpshaw => "vpshaw",
    Vpshlb => "vpshlb",
    Vpshld => "vpshld",
    Vpshldd => "vpshldd",
    Vpshldq => "vpshldq",
    Vpshldvd => "vpshldvd",
    Vpshldvq => "vpshldvq",
    Vpshldvw => "vpshldvw",
    Vpshldw => "vpshldw",
    Vpshlq => "vpshlq",
    Vpshlw => "vpshlw",
    Vpshrdd => "vpshrdd",
    Vpshrdq => "vpshrdq",
    Vpshrdvd => "vpshrdvd",
    Vpshrdvq => "vpshrdvq",
    Vpshrdvw => "vpshrdvw",
    Vpshrdw => "vpshrdw",
    Vpshufb => "vpshufb",
    Vpshufd => "vpshufd",
    Vpshufhw => "vpshufhw",
    Vpshuflw => "vpshuflw",
    Vpsignb => "vpsignb",
    Vpsignd => "vpsignd",
    Vpsignw => "vpsignw",
    Vpslld => "vpslld",
    Vpslldq => "vpslldq",
    Vpsllq => "vpsllq",
    Vpsllvd => "vpsllvd",
    Vpsllvq => "vpsllvq",
    Vpsllvw => "vpsllvw",
    Vpsllw => "vpsllw",
    Vpsrad => "vpsrad",
    Vpsraq => "vpsraq",
    Vpsravd => "vpsravd",
    Vpsravq => "vpsravq",
    Vpsravw => "vpsravw",
    Vpsraw => "vpsraw",
    Vpsrld => "vpsrld",
    Vpsrldq => "vpsrldq",
    Vpsrlq => "vpsrlq",
    Vpsrlvd => "vpsrlvd",
    Vpsrlvq => "vpsrlvq",
    Vpsrlvw => "vpsrlvw",
    Vpsrlw => "vpsrlw",
    Vpsubb => "vpsubb",
    Vpsubd => "vpsubd",
    Vpsubq => "vpsubq",
    Vpsubsb => "vpsubsb",
    Vpsubsw => "vpsubsw",
    Vpsubusb => "vpsubusb",
    Vpsubusw => "vpsubusw",
    Vpsubw => "vpsubw",
    Vpternlogd => "vpternlogd",
    Vpternlogq => "vpternlogq",
    Vptest => "vptest",
    Vptestmb => "vptestmb",
    Vptestmd => "vptestmd",
    Vptestmq => "vptestmq",
    Vptestmw => "vptestmw",
    Vptestnmb => "vptestnmb",
    Vptestnmd => "vptestnmd",
    Vptestnmq => "vptestnmq",
    Vptestnmw => "vptestnmw",
    Vpunpckhbw => "vpunpckhbw",
    Vpunpckhdq => "vpunpckhdq",
    Vpunpckhqdq => "vpunpckhqdq",
    Vpunpckhwd => "vpunpckhwd",
    Vpunpcklbw => "vpunpcklbw",
    Vpunpckldq => "vpunpckldq",
    Vpunpcklqdq => "vpunpcklqdq",
    Vpunpcklwd => "vpunpcklwd",
    Vpxor => "vpxor",
    Vpxord => "vpxord",
    Vpxorq => "vpxorq",
    Vrangepd => "vrangepd",
    Vrangeps => "vrangeps",
    Vrangesd => "vrangesd",
    Vrangess => "vrangess",
    Vrcp14pd => "vrcp14pd",
    Vrcp14ps => "vrcp14ps",
    Vrcp14sd => "vrcp14sd",
    Vrcp14ss => "vrcp14ss",
    Vrcp28pd => "vrcp28pd",
    Vrcp28ps => "vrcp28ps",
    Vrcp28sd => "vrcp28sd",
    Vrcp28ss => "vrcp28ss",
    Vrcpps => "vrcpps",
    Vrcpss => "vrcpss",
    Vreducepd => "vreducepd",
    Vreduceph => "vreduceph",
    Vreduceps => "vreduceps",
    Vreducesd => "vreducesd",
    Vreducesh => "vreducesh",
    Vreducess => "vreducess",
    Vrndscalepd => "vrndscalepd",
    Vrndscaleph => "vrndscaleph",
    Vrndscaleps => "vrndscaleps",
    Vrndscalesd => "vrndscalesd",
    Vrndscalesh => "vrndscalesh",
    Vrndscaless => "vrndscaless",
    Vroundpd => "vroundpd",
    Vroundps => "vroundps",
    Vroundsd => "vroundsd",
    Vroundss => "vroundss",
    Vrsqrt14pd => "vrsqrt14pd",
    Vrsqrt14ps => "vrsqrt14ps",
    Vrsqrt14sd => "vrsqrt14sd",
    Vrsqrt14ss => "vrsqrt14ss",
    Vrsqrt28pd => "vrsqrt28pd",
    Vrsqrt28ps => "vrsqrt28ps",
    Vrsqrt28sd => "vrsqrt28sd",
    Vrsqrt28ss => "vrsqrt28ss",
    Vrsqrtps => "vrsqrtps",
    Vrsqrtss => "vrsqrtss",
    Vscalefpd => "vscalefpd",
    Vscalefps => "vscalefps",
    Vscalefsd => "vscalefsd",
    Vscalefss => "vscalefss",
    Vscatterdpd => "vscatterdpd",
    Vscatterdps => "vscatterdps",
    Vscatterqpd => "vscatterqpd",
    Vscatterqps => "vscatterqps",
    Vshuff32x4 => "vshuff32x4",
    Vshuff64x2 => "vshuff64x2",
    Vshufi32x4 => "vshufi32x4",
    Vshufi64x2 => "vshufi64x2",
    Vshufpd => "vshufpd",
    Vshufps => "vshufps",
    Vsm3msg1 => "vsm3msg1",
    Vsm3msg2 => "vsm3msg2",
    Vsm3rnds2 => "vsm3rnds2",
    Vsm4key4 => "vsm4key4",
    Vsm4rnds4 => "vsm4rnds4",
    Vsqrtpd => "vsqrtpd",
    Vsqrtps => "vsqrtps",
    Vsqrtsd => "vsqrtsd",
    Vsqrtss => "vsqrtss",
    Vstmxcsr => "vstmxcsr",
    Vsubpd => "vsubpd",
    Vsubps => "vsubps",
    Vsubsd => "vsubsd",
    Vsubss => "vsubss",
    Vtestpd => "vtestpd",
    Vtestps => "vtestps",
    Vucomisd => "vucomisd",
    Vucomiss => "vucomiss",
    Vunpckhpd => "vunpckhpd",
    Vunpckhps => "vunpckhps",
    Vunpcklpd => "vunpcklpd",
    Vunpcklps => "vunpcklps",
    Vxorpd => "vxorpd",
    Vxorps => "vxorps",
    Vzeroall => "vzeroall",
    Vzeroupper => "vzeroupper",
    Wait => "wait",
    Wbinvd => "wbinvd",
    Wbnoinvd => "wbnoinvd",
    Wrfsbase => "wrfsbase",
    Wrgsbase => "wrgsbase",
    Wrmsr => "wrmsr",
    Wrpkru => "wrpkru",
    Wrssd => "wrssd",
    Wrssq => "wrssq",
    Wrussd => "wrussd",
    Wrussq => "wrussq",
    Xabort => "xabort",
    Xadd => "xadd",
    Xbegin => "xbegin",
    Xbts => "xbts",
    Xchg => "xchg",
    Xcryptcbc => "xcryptcbc",
    Xcryptcfb => "xcryptcfb",
    Xcryptctr => "xcryptctr",
    Xcryptecb => "xcryptecb",
    Xcryptofb => "xcryptofb",
    Xend => "xend",
    Xgetbv => "xgetbv",
    Xlatb => "xlatb",
    Xor => "xor",
    Xorpd => "xorpd",
    Xorps => "xorps",
    Xresldtrk => "xresldtrk",
    Xrstor => "xrstor",
    Xrstor64 => "xrstor64",
    Xrstors => "xrstors",
    Xrstors64 => "xrstors64",
    Xsave => "xsave",
    Xsave64 => "xsave64",
    Xsavec => "xsavec",
    Xsavec64 => "xsavec64",
    Xsaveopt => "xsaveopt",
    Xsaveopt64 => "xsaveopt64",
    Xsaves => "xsaves",
    Xsaves64 => "xsaves64",
    Xsetbv => "xsetbv",
    Xsha1 => "xsha1",
    Xsha256 => "xsha256",
    Xstore => "xstore",
    Xsusldtrk => "xsusldtrk",
    Xtest => "xtest",
}

impl Mnemonic {
    /// Looks up a mnemonic by its lower-case name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.name() == name)
    }
}

impl std::fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
