//! Extension tables and the ISA configuration that selects them.
//!
//! Each extension exposes a static [`ExtensionTable`]: the opcode keys it owns,
//! the decode function for each key, and the mnemonics it can produce. The
//! [`Decoder`](crate::Decoder) merges the tables of the enabled extensions.
pub mod base;
pub mod compressed;
pub mod muldiv;
pub mod vector;

use std::{fmt, str::FromStr};

use crate::{
    bits::BitSequence, error::DecodeError, error::IsaError, format::OpcodeKey,
    instruction::Instruction, mnemonic::Mnemonic,
};

/// Decode function registered for an opcode key
pub type DecodeFn = fn(&BitSequence) -> Result<Instruction, DecodeError>;

/// RISC-V instruction set extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Extension {
    /// RV32I - Base integer instruction set
    I32,
    /// RV32M - Integer multiply/divide
    M,
    /// RVV - Vector extension (integer subset)
    V,
    /// RVC - Compressed instruction extension
    C,
}

impl Extension {
    /// Extensions in the order their tables are merged
    pub const ALL: [Extension; 4] = [Extension::I32, Extension::M, Extension::V, Extension::C];

    /// Tag used in configuration strings
    pub const fn tag(self) -> &'static str {
        match self {
            Extension::I32 => "32I",
            Extension::M => "M",
            Extension::V => "V",
            Extension::C => "C",
        }
    }

    pub fn table(self) -> &'static ExtensionTable {
        match self {
            Extension::I32 => &base::TABLE,
            Extension::M => &muldiv::TABLE,
            Extension::V => &vector::TABLE,
            Extension::C => &compressed::TABLE,
        }
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Extension::I32 => write!(f, "RV32I (Base Integer)"),
            Extension::M => write!(f, "RV32M (Multiply/Divide)"),
            Extension::V => write!(f, "RVV (Vector)"),
            Extension::C => write!(f, "RVC (Compressed)"),
        }
    }
}

/// Static description of one extension's decode table
#[derive(Debug)]
pub struct ExtensionTable {
    pub extension: Extension,
    pub entries: &'static [(OpcodeKey, DecodeFn)],
    /// Every mnemonic the entries can produce
    pub names: &'static [Mnemonic],
}

/// Set of enabled extensions, built with the `with_*` methods or parsed from
/// an ISA string such as `"RV32IMC"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExtensionSet {
    i: bool,
    m: bool,
    v: bool,
    c: bool,
}

impl ExtensionSet {
    /// Create a new set with just the RV32I base
    pub const fn new() -> Self {
        Self { i: true, m: false, v: false, c: false }
    }

    /// A set with nothing enabled
    pub const fn empty() -> Self {
        Self { i: false, m: false, v: false, c: false }
    }

    pub const fn with_i(mut self) -> Self {
        self.i = true;
        self
    }

    /// Enable multiply/divide extension (M)
    pub const fn with_m(mut self) -> Self {
        self.m = true;
        self
    }

    /// Enable vector extension (V)
    pub const fn with_v(mut self) -> Self {
        self.v = true;
        self
    }

    /// Enable compressed instruction extension (C)
    pub const fn with_c(mut self) -> Self {
        self.c = true;
        self
    }

    pub const fn with(self, extension: Extension) -> Self {
        match extension {
            Extension::I32 => self.with_i(),
            Extension::M => self.with_m(),
            Extension::V => self.with_v(),
            Extension::C => self.with_c(),
        }
    }

    pub const fn rv32i() -> Self {
        Self::new()
    }

    pub const fn rv32im() -> Self {
        Self::new().with_m()
    }

    pub const fn rv32imc() -> Self {
        Self::new().with_m().with_c()
    }

    pub const fn rv32imvc() -> Self {
        Self::new().with_m().with_v().with_c()
    }

    pub const fn supports(&self, extension: Extension) -> bool {
        match extension {
            Extension::I32 => self.i,
            Extension::M => self.m,
            Extension::V => self.v,
            Extension::C => self.c,
        }
    }

    pub const fn compressed_enabled(&self) -> bool {
        self.c
    }

    /// Enabled extensions in merge order
    pub fn iter(&self) -> impl Iterator<Item = Extension> + '_ {
        Extension::ALL.into_iter().filter(|ext| self.supports(*ext))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Canonical ISA string, e.g. `RV32IMC`
    pub fn isa_string(&self) -> String {
        let mut result = "RV32".to_string();
        for (enabled, letter) in [(self.i, 'I'), (self.m, 'M'), (self.v, 'V'), (self.c, 'C')] {
            if enabled {
                result.push(letter);
            }
        }
        result
    }
}

impl Default for ExtensionSet {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ExtensionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.isa_string())
    }
}

impl FromStr for ExtensionSet {
    type Err = IsaError;

    /// Accepts `"32I"`, `"32IMC"`, `"RV32IMVC"`, `"rv32imc"` and similar.
    ///
    /// The `RV` prefix and the `32` width marker are optional, letters may come in
    /// any order, and `_` separators are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let rest = upper.strip_prefix("RV").unwrap_or(&upper);
        let rest = rest.strip_prefix("32").unwrap_or(rest);

        if rest.is_empty() {
            return Err(IsaError::Empty);
        }

        let mut set = Self::empty();
        for letter in rest.chars().filter(|c| *c != '_') {
            set = match letter {
                'I' => set.with_i(),
                'M' => set.with_m(),
                'V' => set.with_v(),
                'C' => set.with_c(),
                other => return Err(IsaError::UnknownExtension(other.to_string())),
            };
        }

        if set.is_empty() {
            return Err(IsaError::Empty);
        }
        Ok(set)
    }
}
