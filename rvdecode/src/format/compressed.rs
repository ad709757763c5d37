//! Field extraction for the 16-bit compressed formats.
//!
//! Compressed instructions use two register encodings:
//! - rd/rs1/rs2 (5-bit): full register x0-x31
//! - rd'/rs1'/rs2' (3-bit): the popular registers x8-x15
//!
//! ```text
//! CR-type | funct4 |   rd/rs1   |   rs2    | op |
//!         | 15-12  |    11-7    |   6-2    | 1-0|
//!
//! CI-type | funct3 | imm |   rd/rs1   | imm | op |
//!         | 15-13  | 12  |    11-7    | 6-2 | 1-0|
//!
//! CSS-type| funct3 |     imm     |   rs2    | op |
//!         | 15-13  |    12-7     |   6-2    | 1-0|
//!
//! CIW-type| funct3 |     imm      | rd' | op |
//!         | 15-13  |     12-5     | 4-2 | 1-0|
//!
//! CL-type | funct3 | imm | rs1' | imm | rd' | op |
//!         | 15-13  |12-10| 9-7  | 6-5 | 4-2 | 1-0|
//!
//! CS-type | funct3 | imm | rs1' | imm | rs2'| op |
//!         | 15-13  |12-10| 9-7  | 6-5 | 4-2 | 1-0|
//!
//! CA-type | funct6 | rd'/rs1' | funct2 | rs2'| op |
//!         | 15-10  |   9-7    |  6-5   | 4-2 | 1-0|
//!
//! CB-type | funct3 | off | rs1' |    offset    | op |
//!         | 15-13  | 12  | 9-7  |   6-2        | 1-0|
//!
//! CJ-type | funct3 |        jump target        | op |
//!         | 15-13  |          12-2             | 1-0|
//! ```
//!
//! Immediates are scrambled differently per instruction, not just per format,
//! so each scramble gets its own function below.
use super::sign_extend;
use crate::bits::BitSequence;

/// Convert compressed register index (3-bit) to full register index (x8-x15)
#[inline(always)]
pub const fn expand_reg(reg: u32) -> u8 {
    8 + (reg & 0b111) as u8
}

/// Register and funct fields of a compressed word.
///
/// This is a union of all the formats; the decoder picks the fields that
/// matter for the quadrant and funct3 it is looking at.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CFields {
    /// bits [15:13]
    pub funct3: u8,
    /// bits [15:12]
    pub funct4: u8,
    /// bits [15:10]
    pub funct6: u8,
    /// bits [6:5]
    pub funct2: u8,
    /// bits [11:7]
    pub rd: u8,
    /// bits [6:2]
    pub rs2: u8,
    /// bits [9:7] + 8
    pub rs1_prime: u8,
    /// bits [4:2] + 8, used both as rd' and rs2'
    pub rs2_prime: u8,
}

impl CFields {
    pub fn parse(bits: &BitSequence) -> Self {
        Self {
            funct3: bits.field(15, 13) as u8,
            funct4: bits.field(15, 12) as u8,
            funct6: bits.field(15, 10) as u8,
            funct2: bits.field(6, 5) as u8,
            rd: bits.field(11, 7) as u8,
            rs2: bits.field(6, 2) as u8,
            rs1_prime: expand_reg(bits.field(9, 7)),
            rs2_prime: expand_reg(bits.field(4, 2)),
        }
    }
}

/// CIW immediate of `c.addi4spn`: nzuimm[9:2], low two bits always 0
pub fn ciw_nzuimm(bits: &BitSequence) -> i32 {
    let imm = (bits.field(10, 7) << 6) // bits[10:7] -> imm[9:6]
        | (bits.field(12, 11) << 4) // bits[12:11] -> imm[5:4]
        | (bits.bit(5) << 3) // bit[5] -> imm[3]
        | (bits.bit(6) << 2); // bit[6] -> imm[2]
    imm as i32
}

/// CL/CS offset for word accesses (`c.lw`, `c.sw`, `c.flw`, `c.fsw`)
pub fn cl_word_offset(bits: &BitSequence) -> i32 {
    let offset = (bits.field(12, 10) << 3) // bits[12:10] -> offset[5:3]
        | (bits.bit(6) << 2) // bit[6] -> offset[2]
        | (bits.bit(5) << 6); // bit[5] -> offset[6]
    offset as i32
}

/// CL/CS offset for double-word accesses (`c.fld`, `c.fsd`)
pub fn cl_double_offset(bits: &BitSequence) -> i32 {
    let offset = (bits.field(12, 10) << 3) // bits[12:10] -> offset[5:3]
        | (bits.field(6, 5) << 6); // bits[6:5] -> offset[7:6]
    offset as i32
}

/// CI immediate: imm[5] = bit 12, imm[4:0] = bits[6:2], sign-extended
pub fn ci_imm(bits: &BitSequence) -> i32 {
    sign_extend((bits.bit(12) << 5) | bits.field(6, 2), 6)
}

/// CI shift amount. shamt[5] must be zero on RV32
pub fn ci_shamt(bits: &BitSequence) -> u32 {
    (bits.bit(12) << 5) | bits.field(6, 2)
}

/// CI immediate of `c.addi16sp`: nzimm[9:4], sign-extended
pub fn ci_addi16sp_imm(bits: &BitSequence) -> i32 {
    let imm = (bits.bit(6) << 4) // bit[6] -> imm[4]
        | (bits.bit(2) << 5) // bit[2] -> imm[5]
        | (bits.bit(5) << 6) // bit[5] -> imm[6]
        | (bits.field(4, 3) << 7) // bits[4:3] -> imm[8:7]
        | (bits.bit(12) << 9); // bit[12] -> imm[9]
    sign_extend(imm, 10)
}

/// CI immediate of `c.lui`: nzimm[17:12], sign-extended and kept in place
pub fn ci_lui_imm(bits: &BitSequence) -> i32 {
    let imm = (bits.field(6, 2) << 12) | (bits.bit(12) << 17);
    sign_extend(imm, 18)
}

/// CI offset of `c.lwsp` and `c.flwsp`
pub fn ci_lwsp_offset(bits: &BitSequence) -> i32 {
    let offset = (bits.field(6, 4) << 2) // bits[6:4] -> offset[4:2]
        | (bits.bit(12) << 5) // bit[12] -> offset[5]
        | (bits.field(3, 2) << 6); // bits[3:2] -> offset[7:6]
    offset as i32
}

/// CI offset of `c.fldsp`
pub fn ci_ldsp_offset(bits: &BitSequence) -> i32 {
    let offset = (bits.field(6, 5) << 3) // bits[6:5] -> offset[4:3]
        | (bits.bit(12) << 5) // bit[12] -> offset[5]
        | (bits.field(4, 2) << 6); // bits[4:2] -> offset[8:6]
    offset as i32
}

/// CSS offset of `c.swsp` and `c.fswsp`
pub fn css_swsp_offset(bits: &BitSequence) -> i32 {
    let offset = (bits.field(12, 9) << 2) // bits[12:9] -> offset[5:2]
        | (bits.field(8, 7) << 6); // bits[8:7] -> offset[7:6]
    offset as i32
}

/// CSS offset of `c.fsdsp`
pub fn css_sdsp_offset(bits: &BitSequence) -> i32 {
    let offset = (bits.field(12, 10) << 3) // bits[12:10] -> offset[5:3]
        | (bits.field(9, 7) << 6); // bits[9:7] -> offset[8:6]
    offset as i32
}

/// CJ jump offset, sign-extended from bit 11
pub fn cj_offset(bits: &BitSequence) -> i32 {
    let offset = (bits.field(5, 3) << 1) // bits[5:3] -> offset[3:1]
        | (bits.bit(11) << 4) // bit[11] -> offset[4]
        | (bits.bit(2) << 5) // bit[2] -> offset[5]
        | (bits.bit(7) << 6) // bit[7] -> offset[6]
        | (bits.bit(6) << 7) // bit[6] -> offset[7]
        | (bits.field(10, 9) << 8) // bits[10:9] -> offset[9:8]
        | (bits.bit(8) << 10) // bit[8] -> offset[10]
        | (bits.bit(12) << 11); // bit[12] -> offset[11]
    sign_extend(offset, 12)
}

/// CB branch offset, sign-extended from bit 8
pub fn cb_offset(bits: &BitSequence) -> i32 {
    let offset = (bits.field(4, 3) << 1) // bits[4:3] -> offset[2:1]
        | (bits.field(11, 10) << 3) // bits[11:10] -> offset[4:3]
        | (bits.bit(2) << 5) // bit[2] -> offset[5]
        | (bits.field(6, 5) << 6) // bits[6:5] -> offset[7:6]
        | (bits.bit(12) << 8); // bit[12] -> offset[8]
    sign_extend(offset, 9)
}
