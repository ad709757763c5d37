//! Canonical instruction names.
//!
//! Every mnemonic is declared once in `define_mnemonics!` together with its
//! control-flow / memory class, so the classifier predicates on
//! [`Instruction`](crate::Instruction) can never disagree with what the
//! decoders produce.
use std::{fmt, str::FromStr};

/// Classification attached to a mnemonic
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Class {
    Other,
    /// Conditional branch
    Branch,
    /// Unconditional jump through a register
    Jump,
    /// Unconditional jump to a pc-relative target
    JumpPcRelative,
    Load,
    Store,
}

macro_rules! define_mnemonics {
    ( $( $variant:ident => $text:literal : $class:ident ),+ $(,)? ) => {
        /// Canonical lowercase instruction name
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Mnemonic {
            $( $variant ),+
        }

        impl Mnemonic {
            /// Every mnemonic any extension table can produce
            pub const ALL: &'static [Mnemonic] = &[$( Mnemonic::$variant ),+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $( Mnemonic::$variant => $text ),+
                }
            }

            pub const fn class(self) -> Class {
                match self {
                    $( Mnemonic::$variant => Class::$class ),+
                }
            }
        }

        impl FromStr for Mnemonic {
            type Err = UnknownMnemonic;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $text => Ok(Mnemonic::$variant), )+
                    _ => Err(UnknownMnemonic(s.to_string())),
                }
            }
        }
    };
}

define_mnemonics! {
    // RV32I
    Lui => "lui": Other,
    Auipc => "auipc": Other,
    Jal => "jal": JumpPcRelative,
    Jalr => "jalr": Jump,
    Beq => "beq": Branch,
    Bne => "bne": Branch,
    Blt => "blt": Branch,
    Bge => "bge": Branch,
    Bltu => "bltu": Branch,
    Bgeu => "bgeu": Branch,
    Lb => "lb": Load,
    Lh => "lh": Load,
    Lw => "lw": Load,
    Lbu => "lbu": Load,
    Lhu => "lhu": Load,
    Sb => "sb": Store,
    Sh => "sh": Store,
    Sw => "sw": Store,
    Addi => "addi": Other,
    Slti => "slti": Other,
    Sltiu => "sltiu": Other,
    Xori => "xori": Other,
    Ori => "ori": Other,
    Andi => "andi": Other,
    Slli => "slli": Other,
    Srli => "srli": Other,
    Srai => "srai": Other,
    Add => "add": Other,
    Sub => "sub": Other,
    Sll => "sll": Other,
    Slt => "slt": Other,
    Sltu => "sltu": Other,
    Xor => "xor": Other,
    Srl => "srl": Other,
    Sra => "sra": Other,
    Or => "or": Other,
    And => "and": Other,
    Fence => "fence": Other,
    FenceI => "fence.i": Other,
    Ecall => "ecall": Other,
    Ebreak => "ebreak": Other,
    Csrrw => "csrrw": Other,
    Csrrs => "csrrs": Other,
    Csrrc => "csrrc": Other,
    Csrrwi => "csrrwi": Other,
    Csrrsi => "csrrsi": Other,
    Csrrci => "csrrci": Other,

    // RV32M
    Mul => "mul": Other,
    Mulh => "mulh": Other,
    Mulhsu => "mulhsu": Other,
    Mulhu => "mulhu": Other,
    Div => "div": Other,
    Divu => "divu": Other,
    Rem => "rem": Other,
    Remu => "remu": Other,

    // RVC, quadrant 0
    CAddi4spn => "c.addi4spn": Other,
    CFld => "c.fld": Load,
    CLw => "c.lw": Load,
    CFlw => "c.flw": Load,
    CFsd => "c.fsd": Store,
    CSw => "c.sw": Store,
    CFsw => "c.fsw": Store,
    // RVC, quadrant 1
    CNop => "c.nop": Other,
    CAddi => "c.addi": Other,
    CJal => "c.jal": JumpPcRelative,
    CLi => "c.li": Other,
    CAddi16sp => "c.addi16sp": Other,
    CLui => "c.lui": Other,
    CSrli => "c.srli": Other,
    CSrai => "c.srai": Other,
    CAndi => "c.andi": Other,
    CSub => "c.sub": Other,
    CXor => "c.xor": Other,
    COr => "c.or": Other,
    CAnd => "c.and": Other,
    CJ => "c.j": JumpPcRelative,
    CBeqz => "c.beqz": Branch,
    CBnez => "c.bnez": Branch,
    // RVC, quadrant 2
    CSlli => "c.slli": Other,
    CFldsp => "c.fldsp": Load,
    CLwsp => "c.lwsp": Load,
    CFlwsp => "c.flwsp": Load,
    CJr => "c.jr": Jump,
    CMv => "c.mv": Other,
    CEbreak => "c.ebreak": Other,
    CJalr => "c.jalr": Jump,
    CAdd => "c.add": Other,
    CFsdsp => "c.fsdsp": Store,
    CSwsp => "c.swsp": Store,
    CFswsp => "c.fswsp": Store,

    // RVV configuration
    Vsetvli => "vsetvli": Other,
    Vsetivli => "vsetivli": Other,
    Vsetvl => "vsetvl": Other,
    // RVV unit-stride and strided memory
    Vle8V => "vle8.v": Other,
    Vle16V => "vle16.v": Other,
    Vle32V => "vle32.v": Other,
    Vle64V => "vle64.v": Other,
    Vlse8V => "vlse8.v": Other,
    Vlse16V => "vlse16.v": Other,
    Vlse32V => "vlse32.v": Other,
    Vlse64V => "vlse64.v": Other,
    Vse8V => "vse8.v": Other,
    Vse16V => "vse16.v": Other,
    Vse32V => "vse32.v": Other,
    Vse64V => "vse64.v": Other,
    Vsse8V => "vsse8.v": Other,
    Vsse16V => "vsse16.v": Other,
    Vsse32V => "vsse32.v": Other,
    Vsse64V => "vsse64.v": Other,
    // RVV integer arithmetic
    VaddVv => "vadd.vv": Other,
    VaddVx => "vadd.vx": Other,
    VaddVi => "vadd.vi": Other,
    VsubVv => "vsub.vv": Other,
    VsubVx => "vsub.vx": Other,
    VrsubVx => "vrsub.vx": Other,
    VrsubVi => "vrsub.vi": Other,
    VminuVv => "vminu.vv": Other,
    VminuVx => "vminu.vx": Other,
    VminVv => "vmin.vv": Other,
    VminVx => "vmin.vx": Other,
    VmaxuVv => "vmaxu.vv": Other,
    VmaxuVx => "vmaxu.vx": Other,
    VmaxVv => "vmax.vv": Other,
    VmaxVx => "vmax.vx": Other,
    VandVv => "vand.vv": Other,
    VandVx => "vand.vx": Other,
    VandVi => "vand.vi": Other,
    VorVv => "vor.vv": Other,
    VorVx => "vor.vx": Other,
    VorVi => "vor.vi": Other,
    VxorVv => "vxor.vv": Other,
    VxorVx => "vxor.vx": Other,
    VxorVi => "vxor.vi": Other,
    VmergeVvm => "vmerge.vvm": Other,
    VmergeVxm => "vmerge.vxm": Other,
    VmergeVim => "vmerge.vim": Other,
    VmvVV => "vmv.v.v": Other,
    VmvVX => "vmv.v.x": Other,
    VmvVI => "vmv.v.i": Other,
    VmseqVv => "vmseq.vv": Other,
    VmseqVx => "vmseq.vx": Other,
    VmseqVi => "vmseq.vi": Other,
    VmsneVv => "vmsne.vv": Other,
    VmsneVx => "vmsne.vx": Other,
    VmsneVi => "vmsne.vi": Other,
    VmsltuVv => "vmsltu.vv": Other,
    VmsltuVx => "vmsltu.vx": Other,
    VmsltVv => "vmslt.vv": Other,
    VmsltVx => "vmslt.vx": Other,
    VmsleuVv => "vmsleu.vv": Other,
    VmsleuVx => "vmsleu.vx": Other,
    VmsleuVi => "vmsleu.vi": Other,
    VmsleVv => "vmsle.vv": Other,
    VmsleVx => "vmsle.vx": Other,
    VmsleVi => "vmsle.vi": Other,
    VmsgtuVx => "vmsgtu.vx": Other,
    VmsgtuVi => "vmsgtu.vi": Other,
    VmsgtVx => "vmsgt.vx": Other,
    VmsgtVi => "vmsgt.vi": Other,
    VsllVv => "vsll.vv": Other,
    VsllVx => "vsll.vx": Other,
    VsllVi => "vsll.vi": Other,
    VsrlVv => "vsrl.vv": Other,
    VsrlVx => "vsrl.vx": Other,
    VsrlVi => "vsrl.vi": Other,
    VsraVv => "vsra.vv": Other,
    VsraVx => "vsra.vx": Other,
    VsraVi => "vsra.vi": Other,
    // RVV integer multiply / divide
    VmulVv => "vmul.vv": Other,
    VmulVx => "vmul.vx": Other,
    VmulhVv => "vmulh.vv": Other,
    VmulhVx => "vmulh.vx": Other,
    VmulhuVv => "vmulhu.vv": Other,
    VmulhuVx => "vmulhu.vx": Other,
    VmulhsuVv => "vmulhsu.vv": Other,
    VmulhsuVx => "vmulhsu.vx": Other,
    VdivVv => "vdiv.vv": Other,
    VdivVx => "vdiv.vx": Other,
    VdivuVv => "vdivu.vv": Other,
    VdivuVx => "vdivu.vx": Other,
    VremVv => "vrem.vv": Other,
    VremVx => "vrem.vx": Other,
    VremuVv => "vremu.vv": Other,
    VremuVx => "vremu.vx": Other,
}

impl Mnemonic {
    pub const fn is_compressed(self) -> bool {
        // All compressed mnemonics carry the `c.` prefix
        let bytes = self.as_str().as_bytes();
        bytes.len() > 2 && bytes[0] == b'c' && bytes[1] == b'.'
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing a string that is not a known mnemonic
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mnemonic {0:?}")]
pub struct UnknownMnemonic(pub String);
