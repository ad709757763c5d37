//! Opcode keys and per-format field extraction.
//!
//! Decoding is a two level dispatch. [`opcode_key`] reduces a word to a coarse
//! key (the 7-bit opcode of a standard word, or the quadrant of a compressed
//! one) which selects an entry in the extension tables. The selected decode
//! function then looks at funct3/funct7 (or funct4/funct6 for compressed words)
//! using the field helpers in [`standard`] and [`compressed`].
pub mod compressed;
pub mod standard;

use std::fmt;

use crate::bits::BitSequence;

/// Coarse key used to select a decode function
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OpcodeKey {
    /// Bits [6:0] of a 32-bit word
    Standard(u8),
    /// Bits [1:0] of a 16-bit word
    Compressed(u8),
}

#[allow(clippy::unusual_byte_groupings)]
impl OpcodeKey {
    pub const LOAD: Self = Self::Standard(0b00_000_11);
    pub const LOAD_FP: Self = Self::Standard(0b00_001_11);
    pub const MISC_MEM: Self = Self::Standard(0b00_011_11);
    pub const OP_IMM: Self = Self::Standard(0b00_100_11);
    pub const AUIPC: Self = Self::Standard(0b00_101_11);
    pub const STORE: Self = Self::Standard(0b01_000_11);
    pub const STORE_FP: Self = Self::Standard(0b01_001_11);
    pub const OP: Self = Self::Standard(0b01_100_11);
    pub const LUI: Self = Self::Standard(0b01_101_11);
    pub const OP_V: Self = Self::Standard(0b10_101_11);
    pub const BRANCH: Self = Self::Standard(0b11_000_11);
    pub const JALR: Self = Self::Standard(0b11_001_11);
    pub const JAL: Self = Self::Standard(0b11_011_11);
    pub const SYSTEM: Self = Self::Standard(0b11_100_11);

    pub const QUADRANT_0: Self = Self::Compressed(0b00);
    pub const QUADRANT_1: Self = Self::Compressed(0b01);
    pub const QUADRANT_2: Self = Self::Compressed(0b10);

    pub const fn is_compressed(&self) -> bool {
        matches!(self, Self::Compressed(_))
    }
}

impl fmt::Display for OpcodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard(opcode) => write!(f, "opcode {opcode:#09b}"),
            Self::Compressed(quadrant) => write!(f, "quadrant {quadrant}"),
        }
    }
}

/// Extract the opcode key of a word
#[inline(always)]
pub fn opcode_key(bits: &BitSequence) -> OpcodeKey {
    if bits.is_compressed() {
        OpcodeKey::Compressed(bits.field(1, 0) as u8)
    } else {
        OpcodeKey::Standard(bits.field(6, 0) as u8)
    }
}

/// Encoding layout of a decoded instruction
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Format {
    R,
    I,
    S,
    B,
    U,
    J,
    /// Compressed register
    CR,
    /// Compressed immediate
    CI,
    /// Compressed stack-relative store
    CSS,
    /// Compressed wide immediate
    CIW,
    /// Compressed load
    CL,
    /// Compressed store
    CS,
    /// Compressed arithmetic
    CA,
    /// Compressed branch
    CB,
    /// Compressed jump
    CJ,
    /// Vector arithmetic and configuration (OP-V)
    V,
    /// Vector load
    VL,
    /// Vector store
    VS,
}

impl Format {
    pub const fn as_str(self) -> &'static str {
        match self {
            Format::R => "R",
            Format::I => "I",
            Format::S => "S",
            Format::B => "B",
            Format::U => "U",
            Format::J => "J",
            Format::CR => "CR",
            Format::CI => "CI",
            Format::CSS => "CSS",
            Format::CIW => "CIW",
            Format::CL => "CL",
            Format::CS => "CS",
            Format::CA => "CA",
            Format::CB => "CB",
            Format::CJ => "CJ",
            Format::V => "V",
            Format::VL => "VL",
            Format::VS => "VS",
        }
    }

    pub const fn is_compressed(self) -> bool {
        matches!(
            self,
            Format::CR
                | Format::CI
                | Format::CSS
                | Format::CIW
                | Format::CL
                | Format::CS
                | Format::CA
                | Format::CB
                | Format::CJ
        )
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sign-extend the low `width` bits of `value`
#[inline(always)]
pub const fn sign_extend(value: u32, width: u32) -> i32 {
    debug_assert!(width > 0 && width <= 32);
    let shift = 32 - width;
    ((value << shift) as i32) >> shift
}
