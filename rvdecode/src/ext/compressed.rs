//! RV32C compressed instructions.
//!
//! Compressed instructions are organized by quadrants based on bits [1:0]:
//! - Quadrant 0 (00): Register-based loads/stores, wide immediates
//! - Quadrant 1 (01): Control transfers, integer constants and computations
//! - Quadrant 2 (10): Stack-pointer based operations, register moves
//! - Quadrant 3 (11): Reserved for 32-bit instructions
//!
//! Encodings the RVC tables mark reserved (including the all-zero illegal
//! instruction) decode as [`DecodeError::UnknownEncoding`]. HINT encodings
//! decode as the instruction they alias.
use super::{Extension, ExtensionTable};
use crate::{
    bits::BitSequence,
    error::DecodeError,
    format::{
        compressed::{
            cb_offset, ci_addi16sp_imm, ci_imm, ci_ldsp_offset, ci_lui_imm, ci_lwsp_offset,
            ci_shamt, cj_offset, cl_double_offset, cl_word_offset, css_sdsp_offset,
            css_swsp_offset, ciw_nzuimm, CFields,
        },
        Format, OpcodeKey,
    },
    instruction::Instruction,
    mnemonic::Mnemonic,
    register::Register::{self, F, X},
};

pub static TABLE: ExtensionTable = ExtensionTable {
    extension: Extension::C,
    entries: &[
        (OpcodeKey::QUADRANT_0, decode_quadrant_0),
        (OpcodeKey::QUADRANT_1, decode_quadrant_1),
        (OpcodeKey::QUADRANT_2, decode_quadrant_2),
    ],
    names: &[
        Mnemonic::CAddi4spn,
        Mnemonic::CFld,
        Mnemonic::CLw,
        Mnemonic::CFlw,
        Mnemonic::CFsd,
        Mnemonic::CSw,
        Mnemonic::CFsw,
        Mnemonic::CNop,
        Mnemonic::CAddi,
        Mnemonic::CJal,
        Mnemonic::CLi,
        Mnemonic::CAddi16sp,
        Mnemonic::CLui,
        Mnemonic::CSrli,
        Mnemonic::CSrai,
        Mnemonic::CAndi,
        Mnemonic::CSub,
        Mnemonic::CXor,
        Mnemonic::COr,
        Mnemonic::CAnd,
        Mnemonic::CJ,
        Mnemonic::CBeqz,
        Mnemonic::CBnez,
        Mnemonic::CSlli,
        Mnemonic::CFldsp,
        Mnemonic::CLwsp,
        Mnemonic::CFlwsp,
        Mnemonic::CJr,
        Mnemonic::CMv,
        Mnemonic::CEbreak,
        Mnemonic::CJalr,
        Mnemonic::CAdd,
        Mnemonic::CFsdsp,
        Mnemonic::CSwsp,
        Mnemonic::CFswsp,
    ],
};

/// Decode Quadrant 0 instructions (bits [1:0] = 00)
fn decode_quadrant_0(bits: &BitSequence) -> Result<Instruction, DecodeError> {
    let f = CFields::parse(bits);
    let rd = f.rs2_prime;
    let rs1 = f.rs1_prime;
    let rs2 = f.rs2_prime;

    match f.funct3 {
        0b000 => {
            // C.ADDI4SPN: nzuimm == 0 is reserved, which also covers the
            // all-zero illegal instruction
            let nzuimm = ciw_nzuimm(bits);
            if nzuimm == 0 {
                return Err(DecodeError::unknown(bits));
            }
            Ok(Instruction::new(Mnemonic::CAddi4spn, Format::CIW, *bits)
                .dest(X(rd))
                .src(Register::SP)
                .imm(nzuimm))
        }
        0b001 => load(bits, Mnemonic::CFld, Format::CL, F(rd), X(rs1), cl_double_offset(bits)),
        0b010 => load(bits, Mnemonic::CLw, Format::CL, X(rd), X(rs1), cl_word_offset(bits)),
        0b011 => load(bits, Mnemonic::CFlw, Format::CL, F(rd), X(rs1), cl_word_offset(bits)),
        0b101 => store(bits, Mnemonic::CFsd, Format::CS, X(rs1), F(rs2), cl_double_offset(bits)),
        0b110 => store(bits, Mnemonic::CSw, Format::CS, X(rs1), X(rs2), cl_word_offset(bits)),
        0b111 => store(bits, Mnemonic::CFsw, Format::CS, X(rs1), F(rs2), cl_word_offset(bits)),
        // 0b100 is reserved
        _ => Err(DecodeError::unknown(bits)),
    }
}

/// Decode Quadrant 1 instructions (bits [1:0] = 01)
fn decode_quadrant_1(bits: &BitSequence) -> Result<Instruction, DecodeError> {
    let f = CFields::parse(bits);
    let rd = f.rd;

    match f.funct3 {
        0b000 => {
            if rd == 0 {
                // C.NOP (a non-zero immediate is a HINT)
                Ok(Instruction::new(Mnemonic::CNop, Format::CI, *bits))
            } else {
                Ok(Instruction::new(Mnemonic::CAddi, Format::CI, *bits)
                    .dest(X(rd))
                    .src(X(rd))
                    .imm(ci_imm(bits)))
            }
        }
        // C.JAL is RV32 only and links to ra
        0b001 => Ok(Instruction::new(Mnemonic::CJal, Format::CJ, *bits)
            .dest(Register::RA)
            .imm(cj_offset(bits))),
        0b010 => {
            Ok(Instruction::new(Mnemonic::CLi, Format::CI, *bits).dest(X(rd)).imm(ci_imm(bits)))
        }
        0b011 => {
            if rd == 2 {
                let imm = ci_addi16sp_imm(bits);
                if imm == 0 {
                    return Err(DecodeError::unknown(bits));
                }
                Ok(Instruction::new(Mnemonic::CAddi16sp, Format::CI, *bits)
                    .dest(Register::SP)
                    .src(Register::SP)
                    .imm(imm))
            } else {
                let imm = ci_lui_imm(bits);
                if imm == 0 {
                    return Err(DecodeError::unknown(bits));
                }
                Ok(Instruction::new(Mnemonic::CLui, Format::CI, *bits).dest(X(rd)).imm(imm))
            }
        }
        0b100 => decode_quadrant_1_misc_alu(bits, &f),
        0b101 => Ok(Instruction::new(Mnemonic::CJ, Format::CJ, *bits).imm(cj_offset(bits))),
        0b110 => Ok(Instruction::new(Mnemonic::CBeqz, Format::CB, *bits)
            .src(X(f.rs1_prime))
            .imm(cb_offset(bits))),
        _ => Ok(Instruction::new(Mnemonic::CBnez, Format::CB, *bits)
            .src(X(f.rs1_prime))
            .imm(cb_offset(bits))),
    }
}

/// Decode Quadrant 1 miscellaneous ALU instructions (funct3 = 100)
fn decode_quadrant_1_misc_alu(bits: &BitSequence, f: &CFields) -> Result<Instruction, DecodeError> {
    let rd = f.rs1_prime;

    match bits.field(11, 10) {
        0b00 | 0b01 => {
            // shamt[5] must be zero on RV32
            if bits.bit(12) != 0 {
                return Err(DecodeError::unknown(bits));
            }
            let mnemonic =
                if bits.field(11, 10) == 0b00 { Mnemonic::CSrli } else { Mnemonic::CSrai };
            Ok(Instruction::new(mnemonic, Format::CB, *bits)
                .dest(X(rd))
                .src(X(rd))
                .imm(ci_shamt(bits) as i32))
        }
        0b10 => Ok(Instruction::new(Mnemonic::CAndi, Format::CB, *bits)
            .dest(X(rd))
            .src(X(rd))
            .imm(ci_imm(bits))),
        _ => {
            // bit 12 selects c.subw / c.addw, which are RV64 only
            if bits.bit(12) != 0 {
                return Err(DecodeError::unknown(bits));
            }
            let mnemonic = match f.funct2 {
                0b00 => Mnemonic::CSub,
                0b01 => Mnemonic::CXor,
                0b10 => Mnemonic::COr,
                _ => Mnemonic::CAnd,
            };
            Ok(Instruction::new(mnemonic, Format::CA, *bits)
                .dest(X(rd))
                .src(X(rd))
                .src(X(f.rs2_prime)))
        }
    }
}

/// Decode Quadrant 2 instructions (bits [1:0] = 10)
fn decode_quadrant_2(bits: &BitSequence) -> Result<Instruction, DecodeError> {
    let f = CFields::parse(bits);
    let rd = f.rd;
    let rs2 = f.rs2;

    match f.funct3 {
        0b000 => {
            if bits.bit(12) != 0 {
                return Err(DecodeError::unknown(bits));
            }
            Ok(Instruction::new(Mnemonic::CSlli, Format::CI, *bits)
                .dest(X(rd))
                .src(X(rd))
                .imm(ci_shamt(bits) as i32))
        }
        0b001 => {
            load(bits, Mnemonic::CFldsp, Format::CI, F(rd), Register::SP, ci_ldsp_offset(bits))
        }
        0b010 => {
            // rd == x0 is reserved
            if rd == 0 {
                return Err(DecodeError::unknown(bits));
            }
            load(bits, Mnemonic::CLwsp, Format::CI, X(rd), Register::SP, ci_lwsp_offset(bits))
        }
        0b011 => {
            load(bits, Mnemonic::CFlwsp, Format::CI, F(rd), Register::SP, ci_lwsp_offset(bits))
        }
        0b100 => decode_quadrant_2_misc(bits, &f),
        0b101 => {
            store(bits, Mnemonic::CFsdsp, Format::CSS, Register::SP, F(rs2), css_sdsp_offset(bits))
        }
        0b110 => {
            store(bits, Mnemonic::CSwsp, Format::CSS, Register::SP, X(rs2), css_swsp_offset(bits))
        }
        _ => {
            store(bits, Mnemonic::CFswsp, Format::CSS, Register::SP, F(rs2), css_swsp_offset(bits))
        }
    }
}

/// Decode Quadrant 2 miscellaneous instructions (funct3 = 100)
///
/// | bit 12 | rs2 | rd/rs1 | instruction |
/// |--------|-----|--------|-------------|
/// | 0      | 0   | != 0   | c.jr        |
/// | 0      | != 0| any    | c.mv        |
/// | 1      | 0   | 0      | c.ebreak    |
/// | 1      | 0   | != 0   | c.jalr      |
/// | 1      | != 0| any    | c.add       |
fn decode_quadrant_2_misc(bits: &BitSequence, f: &CFields) -> Result<Instruction, DecodeError> {
    let rd = f.rd;
    let rs2 = f.rs2;

    match (bits.bit(12), rs2, rd) {
        (0, 0, 0) => Err(DecodeError::unknown(bits)),
        (0, 0, _) => Ok(Instruction::new(Mnemonic::CJr, Format::CR, *bits).src(X(rd))),
        (0, _, _) => Ok(Instruction::new(Mnemonic::CMv, Format::CR, *bits).dest(X(rd)).src(X(rs2))),
        (_, 0, 0) => Ok(Instruction::new(Mnemonic::CEbreak, Format::CR, *bits)),
        (_, 0, _) => Ok(Instruction::new(Mnemonic::CJalr, Format::CR, *bits)
            .dest(Register::RA)
            .src(X(rd))),
        (_, _, _) => Ok(Instruction::new(Mnemonic::CAdd, Format::CR, *bits)
            .dest(X(rd))
            .src(X(rd))
            .src(X(rs2))),
    }
}

/// Loads list the base register as their only source
fn load(
    bits: &BitSequence,
    mnemonic: Mnemonic,
    format: Format,
    rd: Register,
    base: Register,
    offset: i32,
) -> Result<Instruction, DecodeError> {
    Ok(Instruction::new(mnemonic, format, *bits).dest(rd).src(base).imm(offset))
}

/// Stores list the base register first, then the data register
fn store(
    bits: &BitSequence,
    mnemonic: Mnemonic,
    format: Format,
    base: Register,
    rs2: Register,
    offset: i32,
) -> Result<Instruction, DecodeError> {
    Ok(Instruction::new(mnemonic, format, *bits).src(base).src(rs2).imm(offset))
}
