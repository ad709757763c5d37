//! Field extraction for the six base 32-bit formats.
//!
//! ```text
//! R-type | funct7 |  rs2 |  rs1 | funct3 |   rd  | opcode |
//!        | 31-25  |24-20 |19-15 | 14-12  | 11-7  | 6-0    |
//!
//! I-type |   imm[11:0]    |  rs1 | funct3 |   rd  | opcode |
//!        |   31-20        |19-15 | 14-12  | 11-7  | 6-0    |
//!
//! S-type | imm[11:5] |  rs2 |  rs1 | funct3 | imm[4:0] | opcode |
//!        | 31-25     |24-20 |19-15 | 14-12  | 11-7     | 6-0    |
//!
//! B-type | imm[12] | imm[10:5] |  rs2 |  rs1 | funct3 | imm[4:1|11] | opcode |
//!        |   31    | 30-25     |24-20 |19-15 | 14-12  | 11-7        | 6-0    |
//!
//! U-type |                imm[31:12]                 |   rd  | opcode |
//!        |                31-12                      | 11-7  | 6-0    |
//!
//! J-type | imm[20] | imm[10:1] | imm[11] | imm[19:12] |   rd  | opcode |
//!        |   31    | 30-21     |   20    | 19-12      | 11-7  | 6-0    |
//! ```
//!
//! Note: `rd`, `rs1` and `rs2` always sit in the same bit positions when present.
use super::sign_extend;
use crate::bits::BitSequence;

#[inline(always)]
fn rd(bits: &BitSequence) -> u8 {
    bits.field(11, 7) as u8
}

#[inline(always)]
fn rs1(bits: &BitSequence) -> u8 {
    bits.field(19, 15) as u8
}

#[inline(always)]
fn rs2(bits: &BitSequence) -> u8 {
    bits.field(24, 20) as u8
}

#[inline(always)]
fn funct3(bits: &BitSequence) -> u8 {
    bits.field(14, 12) as u8
}

/// Register-register operations
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RFields {
    pub rd: u8,
    pub rs1: u8,
    pub rs2: u8,
    pub funct3: u8,
    pub funct7: u8,
}

impl RFields {
    pub fn parse(bits: &BitSequence) -> Self {
        Self {
            rd: rd(bits),
            rs1: rs1(bits),
            rs2: rs2(bits),
            funct3: funct3(bits),
            funct7: bits.field(31, 25) as u8,
        }
    }
}

/// Immediate operations, loads, `jalr` and system instructions
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct IFields {
    pub rd: u8,
    pub rs1: u8,
    pub funct3: u8,
    /// bits [31:20], sign-extended
    pub imm: i32,
    /// bits [31:20] without sign extension, used for CSR addresses and shifts
    pub raw_imm: u16,
}

impl IFields {
    pub fn parse(bits: &BitSequence) -> Self {
        let raw_imm = bits.field(31, 20);
        Self {
            rd: rd(bits),
            rs1: rs1(bits),
            funct3: funct3(bits),
            imm: sign_extend(raw_imm, 12),
            raw_imm: raw_imm as u16,
        }
    }
}

/// Stores
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SFields {
    pub rs1: u8,
    pub rs2: u8,
    pub funct3: u8,
    pub imm: i32,
}

impl SFields {
    pub fn parse(bits: &BitSequence) -> Self {
        let imm = (bits.field(31, 25) << 5) | bits.field(11, 7);
        Self { rs1: rs1(bits), rs2: rs2(bits), funct3: funct3(bits), imm: sign_extend(imm, 12) }
    }
}

/// Conditional branches
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BFields {
    pub rs1: u8,
    pub rs2: u8,
    pub funct3: u8,
    /// Branch offset in bytes, always even
    pub imm: i32,
}

impl BFields {
    pub fn parse(bits: &BitSequence) -> Self {
        let imm = (bits.bit(31) << 12)
            | (bits.bit(7) << 11)
            | (bits.field(30, 25) << 5)
            | (bits.field(11, 8) << 1);
        Self { rs1: rs1(bits), rs2: rs2(bits), funct3: funct3(bits), imm: sign_extend(imm, 13) }
    }
}

/// `lui` and `auipc`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct UFields {
    pub rd: u8,
    /// bits [31:12] in place, low 12 bits zero
    pub imm: i32,
}

impl UFields {
    pub fn parse(bits: &BitSequence) -> Self {
        Self { rd: rd(bits), imm: (bits.word() & 0xFFFF_F000) as i32 }
    }
}

/// `jal`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct JFields {
    pub rd: u8,
    /// Jump offset in bytes, always even
    pub imm: i32,
}

impl JFields {
    pub fn parse(bits: &BitSequence) -> Self {
        let imm = (bits.bit(31) << 20)
            | (bits.field(19, 12) << 12)
            | (bits.bit(20) << 11)
            | (bits.field(30, 21) << 1);
        Self { rd: rd(bits), imm: sign_extend(imm, 21) }
    }
}
