//! RV32M integer multiply and divide.
//!
//! These share the OP opcode with the base ALU instructions and are told apart
//! by funct7 = 0000001.
use super::{Extension, ExtensionTable};
use crate::{
    bits::BitSequence,
    error::DecodeError,
    format::{standard::RFields, Format, OpcodeKey},
    instruction::Instruction,
    mnemonic::Mnemonic,
    register::Register::X,
};

const MULDIV_FUNCT7: u8 = 0b0000001;

pub static TABLE: ExtensionTable = ExtensionTable {
    extension: Extension::M,
    entries: &[(OpcodeKey::OP, decode_op)],
    names: &[
        Mnemonic::Mul,
        Mnemonic::Mulh,
        Mnemonic::Mulhsu,
        Mnemonic::Mulhu,
        Mnemonic::Div,
        Mnemonic::Divu,
        Mnemonic::Rem,
        Mnemonic::Remu,
    ],
};

fn decode_op(bits: &BitSequence) -> Result<Instruction, DecodeError> {
    let f = RFields::parse(bits);
    if f.funct7 != MULDIV_FUNCT7 {
        return Err(DecodeError::unknown(bits));
    }

    let mnemonic = match f.funct3 {
        0b000 => Mnemonic::Mul,
        0b001 => Mnemonic::Mulh,
        0b010 => Mnemonic::Mulhsu,
        0b011 => Mnemonic::Mulhu,
        0b100 => Mnemonic::Div,
        0b101 => Mnemonic::Divu,
        0b110 => Mnemonic::Rem,
        _ => Mnemonic::Remu,
    };

    Ok(Instruction::new(mnemonic, Format::R, *bits).dest(X(f.rd)).src(X(f.rs1)).src(X(f.rs2)))
}
