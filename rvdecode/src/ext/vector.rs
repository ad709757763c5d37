//! RVV vector extension, integer subset.
//!
//! Supported: configuration (`vsetvli`, `vsetivli`, `vsetvl`), unit-stride and
//! strided loads/stores, and the common OPIVV/OPIVX/OPIVI and OPMVV/OPMVX
//! integer operations. Floating-point, indexed, segment, whole-register and
//! fault-only-first forms decode as [`DecodeError::UnknownEncoding`].
//!
//! ```text
//! OP-V     | funct6 | vm |  vs2 | vs1/rs1/imm | funct3 |  vd  | 1010111 |
//!          | 31-26  | 25 |24-20 |   19-15     | 14-12  | 11-7 |         |
//!
//! LOAD-FP  |  nf  | mew | mop | vm | lumop/rs2 | rs1 | width |  vd  | 0000111 |
//! STORE-FP |  nf  | mew | mop | vm | sumop/rs2 | rs1 | width |  vs3 | 0100111 |
//!          | 31-29|  28 |27-26| 25 |   24-20   |19-15| 14-12 | 11-7 |         |
//! ```
use super::{Extension, ExtensionTable};
use crate::{
    bits::BitSequence,
    error::DecodeError,
    format::{sign_extend, Format, OpcodeKey},
    instruction::{Instruction, VectorMask},
    mnemonic::Mnemonic,
    register::Register::{V, X},
};

pub static TABLE: ExtensionTable = ExtensionTable {
    extension: Extension::V,
    entries: &[
        (OpcodeKey::OP_V, decode_op_v),
        (OpcodeKey::LOAD_FP, decode_load),
        (OpcodeKey::STORE_FP, decode_store),
    ],
    names: NAMES,
};

const NAMES: &[Mnemonic] = &[
    Mnemonic::Vsetvli,
    Mnemonic::Vsetivli,
    Mnemonic::Vsetvl,
    Mnemonic::Vle8V,
    Mnemonic::Vle16V,
    Mnemonic::Vle32V,
    Mnemonic::Vle64V,
    Mnemonic::Vlse8V,
    Mnemonic::Vlse16V,
    Mnemonic::Vlse32V,
    Mnemonic::Vlse64V,
    Mnemonic::Vse8V,
    Mnemonic::Vse16V,
    Mnemonic::Vse32V,
    Mnemonic::Vse64V,
    Mnemonic::Vsse8V,
    Mnemonic::Vsse16V,
    Mnemonic::Vsse32V,
    Mnemonic::Vsse64V,
    Mnemonic::VaddVv,
    Mnemonic::VaddVx,
    Mnemonic::VaddVi,
    Mnemonic::VsubVv,
    Mnemonic::VsubVx,
    Mnemonic::VrsubVx,
    Mnemonic::VrsubVi,
    Mnemonic::VminuVv,
    Mnemonic::VminuVx,
    Mnemonic::VminVv,
    Mnemonic::VminVx,
    Mnemonic::VmaxuVv,
    Mnemonic::VmaxuVx,
    Mnemonic::VmaxVv,
    Mnemonic::VmaxVx,
    Mnemonic::VandVv,
    Mnemonic::VandVx,
    Mnemonic::VandVi,
    Mnemonic::VorVv,
    Mnemonic::VorVx,
    Mnemonic::VorVi,
    Mnemonic::VxorVv,
    Mnemonic::VxorVx,
    Mnemonic::VxorVi,
    Mnemonic::VmergeVvm,
    Mnemonic::VmergeVxm,
    Mnemonic::VmergeVim,
    Mnemonic::VmvVV,
    Mnemonic::VmvVX,
    Mnemonic::VmvVI,
    Mnemonic::VmseqVv,
    Mnemonic::VmseqVx,
    Mnemonic::VmseqVi,
    Mnemonic::VmsneVv,
    Mnemonic::VmsneVx,
    Mnemonic::VmsneVi,
    Mnemonic::VmsltuVv,
    Mnemonic::VmsltuVx,
    Mnemonic::VmsltVv,
    Mnemonic::VmsltVx,
    Mnemonic::VmsleuVv,
    Mnemonic::VmsleuVx,
    Mnemonic::VmsleuVi,
    Mnemonic::VmsleVv,
    Mnemonic::VmsleVx,
    Mnemonic::VmsleVi,
    Mnemonic::VmsgtuVx,
    Mnemonic::VmsgtuVi,
    Mnemonic::VmsgtVx,
    Mnemonic::VmsgtVi,
    Mnemonic::VsllVv,
    Mnemonic::VsllVx,
    Mnemonic::VsllVi,
    Mnemonic::VsrlVv,
    Mnemonic::VsrlVx,
    Mnemonic::VsrlVi,
    Mnemonic::VsraVv,
    Mnemonic::VsraVx,
    Mnemonic::VsraVi,
    Mnemonic::VmulVv,
    Mnemonic::VmulVx,
    Mnemonic::VmulhVv,
    Mnemonic::VmulhVx,
    Mnemonic::VmulhuVv,
    Mnemonic::VmulhuVx,
    Mnemonic::VmulhsuVv,
    Mnemonic::VmulhsuVx,
    Mnemonic::VdivVv,
    Mnemonic::VdivVx,
    Mnemonic::VdivuVv,
    Mnemonic::VdivuVx,
    Mnemonic::VremVv,
    Mnemonic::VremVx,
    Mnemonic::VremuVv,
    Mnemonic::VremuVx,
];

/// funct3 values of OP-V
const OPIVV: u32 = 0b000;
const OPMVV: u32 = 0b010;
const OPIVI: u32 = 0b011;
const OPIVX: u32 = 0b100;
const OPMVX: u32 = 0b110;
const OPCFG: u32 = 0b111;

const VMERGE_VMV_FUNCT6: u32 = 0b010111;

/// Second operand of an OP-V arithmetic instruction
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Operand {
    /// `.vv`: vector register vs1
    Vector,
    /// `.vx`: integer register rs1
    Scalar,
    /// `.vi`: 5-bit immediate
    Immediate,
}

fn decode_op_v(bits: &BitSequence) -> Result<Instruction, DecodeError> {
    match bits.field(14, 12) {
        OPCFG => decode_vset(bits),
        OPIVV => decode_arith(bits, Operand::Vector, opi_mnemonic),
        OPIVX => decode_arith(bits, Operand::Scalar, opi_mnemonic),
        OPIVI => decode_arith(bits, Operand::Immediate, opi_mnemonic),
        OPMVV => decode_arith(bits, Operand::Vector, opm_mnemonic),
        OPMVX => decode_arith(bits, Operand::Scalar, opm_mnemonic),
        // OPFVV, OPFVF
        _ => Err(DecodeError::unknown(bits)),
    }
}

/// Decode vector configuration instructions.
///
/// Bit 31 separates `vsetvli` from the other two, bit 30 then separates
/// `vsetivli` (AVL in the rs1 field) from `vsetvl` (vtype in rs2).
fn decode_vset(bits: &BitSequence) -> Result<Instruction, DecodeError> {
    let rd = bits.field(11, 7) as u8;
    let rs1 = bits.field(19, 15) as u8;

    if bits.bit(31) == 0 {
        let vtypei = bits.field(30, 20) as i32;
        return Ok(Instruction::new(Mnemonic::Vsetvli, Format::V, *bits)
            .dest(X(rd))
            .src(X(rs1))
            .imm(vtypei));
    }

    if bits.bit(30) == 1 {
        let vtypei = bits.field(29, 20) as i32;
        return Ok(Instruction::new(Mnemonic::Vsetivli, Format::V, *bits)
            .dest(X(rd))
            .imm(rs1 as i32)
            .imm(vtypei));
    }

    if bits.field(31, 25) != 0b1000000 {
        return Err(DecodeError::unknown(bits));
    }
    let rs2 = bits.field(24, 20) as u8;
    Ok(Instruction::new(Mnemonic::Vsetvl, Format::V, *bits).dest(X(rd)).src(X(rs1)).src(X(rs2)))
}

fn decode_arith(
    bits: &BitSequence,
    operand: Operand,
    lookup: fn(u32, Operand, u32) -> Option<Mnemonic>,
) -> Result<Instruction, DecodeError> {
    let funct6 = bits.field(31, 26);
    let vm = bits.field(25, 25);
    let vs2 = bits.field(24, 20) as u8;
    let vs1 = bits.field(19, 15);
    let vd = bits.field(11, 7) as u8;

    let mnemonic = lookup(funct6, operand, vm).ok_or_else(|| DecodeError::unknown(bits))?;

    // vmv.v.* has no vs2 operand and requires the field to be zero
    let is_move = matches!(mnemonic, Mnemonic::VmvVV | Mnemonic::VmvVX | Mnemonic::VmvVI);
    if is_move && vs2 != 0 {
        return Err(DecodeError::unknown(bits));
    }

    let mut inst = Instruction::new(mnemonic, Format::V, *bits).dest(V(vd));
    if !is_move {
        inst = inst.src(V(vs2));
    }
    inst = match operand {
        Operand::Vector => inst.src(V(vs1 as u8)),
        Operand::Scalar => inst.src(X(vs1 as u8)),
        // Shift amounts are unsigned, every other immediate is sign-extended
        Operand::Immediate if is_shift(mnemonic) => inst.imm(vs1 as i32),
        Operand::Immediate => inst.imm(sign_extend(vs1, 5)),
    };

    Ok(inst.masked(VectorMask::from_vm(vm)))
}

fn is_shift(mnemonic: Mnemonic) -> bool {
    matches!(mnemonic, Mnemonic::VsllVi | Mnemonic::VsrlVi | Mnemonic::VsraVi)
}

/// OPIVV / OPIVX / OPIVI mnemonic for a funct6
fn opi_mnemonic(funct6: u32, operand: Operand, vm: u32) -> Option<Mnemonic> {
    use Operand::{Immediate as VI, Scalar as VX, Vector as VV};

    // vmerge when masked by v0, vmv.v.* otherwise
    if funct6 == VMERGE_VMV_FUNCT6 {
        return Some(match (vm, operand) {
            (0, VV) => Mnemonic::VmergeVvm,
            (0, VX) => Mnemonic::VmergeVxm,
            (0, VI) => Mnemonic::VmergeVim,
            (_, VV) => Mnemonic::VmvVV,
            (_, VX) => Mnemonic::VmvVX,
            (_, VI) => Mnemonic::VmvVI,
        });
    }

    let mnemonic = match (funct6, operand) {
        (0b000000, VV) => Mnemonic::VaddVv,
        (0b000000, VX) => Mnemonic::VaddVx,
        (0b000000, VI) => Mnemonic::VaddVi,
        (0b000010, VV) => Mnemonic::VsubVv,
        (0b000010, VX) => Mnemonic::VsubVx,
        (0b000011, VX) => Mnemonic::VrsubVx,
        (0b000011, VI) => Mnemonic::VrsubVi,
        (0b000100, VV) => Mnemonic::VminuVv,
        (0b000100, VX) => Mnemonic::VminuVx,
        (0b000101, VV) => Mnemonic::VminVv,
        (0b000101, VX) => Mnemonic::VminVx,
        (0b000110, VV) => Mnemonic::VmaxuVv,
        (0b000110, VX) => Mnemonic::VmaxuVx,
        (0b000111, VV) => Mnemonic::VmaxVv,
        (0b000111, VX) => Mnemonic::VmaxVx,
        (0b001001, VV) => Mnemonic::VandVv,
        (0b001001, VX) => Mnemonic::VandVx,
        (0b001001, VI) => Mnemonic::VandVi,
        (0b001010, VV) => Mnemonic::VorVv,
        (0b001010, VX) => Mnemonic::VorVx,
        (0b001010, VI) => Mnemonic::VorVi,
        (0b001011, VV) => Mnemonic::VxorVv,
        (0b001011, VX) => Mnemonic::VxorVx,
        (0b001011, VI) => Mnemonic::VxorVi,
        (0b011000, VV) => Mnemonic::VmseqVv,
        (0b011000, VX) => Mnemonic::VmseqVx,
        (0b011000, VI) => Mnemonic::VmseqVi,
        (0b011001, VV) => Mnemonic::VmsneVv,
        (0b011001, VX) => Mnemonic::VmsneVx,
        (0b011001, VI) => Mnemonic::VmsneVi,
        (0b011010, VV) => Mnemonic::VmsltuVv,
        (0b011010, VX) => Mnemonic::VmsltuVx,
        (0b011011, VV) => Mnemonic::VmsltVv,
        (0b011011, VX) => Mnemonic::VmsltVx,
        (0b011100, VV) => Mnemonic::VmsleuVv,
        (0b011100, VX) => Mnemonic::VmsleuVx,
        (0b011100, VI) => Mnemonic::VmsleuVi,
        (0b011101, VV) => Mnemonic::VmsleVv,
        (0b011101, VX) => Mnemonic::VmsleVx,
        (0b011101, VI) => Mnemonic::VmsleVi,
        (0b011110, VX) => Mnemonic::VmsgtuVx,
        (0b011110, VI) => Mnemonic::VmsgtuVi,
        (0b011111, VX) => Mnemonic::VmsgtVx,
        (0b011111, VI) => Mnemonic::VmsgtVi,
        (0b100101, VV) => Mnemonic::VsllVv,
        (0b100101, VX) => Mnemonic::VsllVx,
        (0b100101, VI) => Mnemonic::VsllVi,
        (0b101000, VV) => Mnemonic::VsrlVv,
        (0b101000, VX) => Mnemonic::VsrlVx,
        (0b101000, VI) => Mnemonic::VsrlVi,
        (0b101001, VV) => Mnemonic::VsraVv,
        (0b101001, VX) => Mnemonic::VsraVx,
        (0b101001, VI) => Mnemonic::VsraVi,
        _ => return None,
    };
    Some(mnemonic)
}

/// OPMVV / OPMVX mnemonic for a funct6
fn opm_mnemonic(funct6: u32, operand: Operand, _vm: u32) -> Option<Mnemonic> {
    use Operand::{Scalar as VX, Vector as VV};

    let mnemonic = match (funct6, operand) {
        (0b100000, VV) => Mnemonic::VdivuVv,
        (0b100000, VX) => Mnemonic::VdivuVx,
        (0b100001, VV) => Mnemonic::VdivVv,
        (0b100001, VX) => Mnemonic::VdivVx,
        (0b100010, VV) => Mnemonic::VremuVv,
        (0b100010, VX) => Mnemonic::VremuVx,
        (0b100011, VV) => Mnemonic::VremVv,
        (0b100011, VX) => Mnemonic::VremVx,
        (0b100100, VV) => Mnemonic::VmulhuVv,
        (0b100100, VX) => Mnemonic::VmulhuVx,
        (0b100101, VV) => Mnemonic::VmulVv,
        (0b100101, VX) => Mnemonic::VmulVx,
        (0b100110, VV) => Mnemonic::VmulhsuVv,
        (0b100110, VX) => Mnemonic::VmulhsuVx,
        (0b100111, VV) => Mnemonic::VmulhVv,
        (0b100111, VX) => Mnemonic::VmulhVx,
        _ => return None,
    };
    Some(mnemonic)
}

/// Element width index (0 = 8 bits .. 3 = 64 bits) for the vector `width` encodings.
///
/// The remaining encodings under LOAD-FP/STORE-FP are scalar floating point.
fn element_width(width: u32) -> Option<usize> {
    match width {
        0b000 => Some(0),
        0b101 => Some(1),
        0b110 => Some(2),
        0b111 => Some(3),
        _ => None,
    }
}

/// Common checks for vector loads and stores, returning (eew index, strided)
fn memory_shape(bits: &BitSequence) -> Result<(usize, bool), DecodeError> {
    let eew = element_width(bits.field(14, 12)).ok_or_else(|| DecodeError::unknown(bits))?;
    let nf = bits.field(31, 29);
    let mew = bits.bit(28);
    if nf != 0 || mew != 0 {
        return Err(DecodeError::unknown(bits));
    }

    match bits.field(27, 26) {
        // unit-stride, only the plain lumop/sumop
        0b00 if bits.field(24, 20) == 0 => Ok((eew, false)),
        0b10 => Ok((eew, true)),
        _ => Err(DecodeError::unknown(bits)),
    }
}

fn decode_load(bits: &BitSequence) -> Result<Instruction, DecodeError> {
    const UNIT: [Mnemonic; 4] =
        [Mnemonic::Vle8V, Mnemonic::Vle16V, Mnemonic::Vle32V, Mnemonic::Vle64V];
    const STRIDED: [Mnemonic; 4] =
        [Mnemonic::Vlse8V, Mnemonic::Vlse16V, Mnemonic::Vlse32V, Mnemonic::Vlse64V];

    let (eew, strided) = memory_shape(bits)?;
    let vd = bits.field(11, 7) as u8;
    let rs1 = bits.field(19, 15) as u8;
    let vm = bits.bit(25);

    let inst = if strided {
        let rs2 = bits.field(24, 20) as u8;
        Instruction::new(STRIDED[eew], Format::VL, *bits).dest(V(vd)).src(X(rs1)).src(X(rs2))
    } else {
        Instruction::new(UNIT[eew], Format::VL, *bits).dest(V(vd)).src(X(rs1))
    };
    Ok(inst.masked(VectorMask::from_vm(vm)))
}

fn decode_store(bits: &BitSequence) -> Result<Instruction, DecodeError> {
    const UNIT: [Mnemonic; 4] =
        [Mnemonic::Vse8V, Mnemonic::Vse16V, Mnemonic::Vse32V, Mnemonic::Vse64V];
    const STRIDED: [Mnemonic; 4] =
        [Mnemonic::Vsse8V, Mnemonic::Vsse16V, Mnemonic::Vsse32V, Mnemonic::Vsse64V];

    let (eew, strided) = memory_shape(bits)?;
    let vs3 = bits.field(11, 7) as u8;
    let rs1 = bits.field(19, 15) as u8;
    let vm = bits.bit(25);

    let inst = if strided {
        let rs2 = bits.field(24, 20) as u8;
        Instruction::new(STRIDED[eew], Format::VS, *bits).src(V(vs3)).src(X(rs1)).src(X(rs2))
    } else {
        Instruction::new(UNIT[eew], Format::VS, *bits).src(V(vs3)).src(X(rs1))
    };
    Ok(inst.masked(VectorMask::from_vm(vm)))
}
