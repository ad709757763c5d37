//! Error types returned by the decode pipeline and by ISA string parsing.
use crate::{bits::BitSequence, format::OpcodeKey};

/// Failure to turn text or a machine word into an [`Instruction`](crate::Instruction)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Input text contains characters that are not hexadecimal digits
    #[error("malformed hex input: {0:?}")]
    MalformedHex(String),
    /// Bit text has the right length but contains characters other than `0` and `1`
    #[error("malformed bit input: {0:?}")]
    MalformedBits(String),
    /// Input does not fit a 16-bit or 32-bit instruction word
    #[error("invalid instruction width: {0} bits")]
    InvalidWidth(usize),
    /// No active extension registers a decoder for this opcode key
    #[error("unsupported opcode: {0}")]
    UnsupportedOpcode(OpcodeKey),
    /// The opcode key is known but the funct fields select a reserved or illegal encoding
    #[error("unknown encoding for {key}: {bits:#x}")]
    UnknownEncoding { key: OpcodeKey, bits: BitSequence },
    /// A byte stream ended in the middle of an instruction
    #[error("truncated instruction at byte offset {0}")]
    Truncated(usize),
}

impl DecodeError {
    /// Shorthand used by the extension tables when funct fields do not match anything
    pub(crate) fn unknown(bits: &BitSequence) -> Self {
        Self::UnknownEncoding { key: crate::format::opcode_key(bits), bits: *bits }
    }
}

/// Failure to parse an ISA configuration string such as `"RV32IMC"`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IsaError {
    #[error("empty ISA string")]
    Empty,
    #[error("unknown extension {0:?} in ISA string")]
    UnknownExtension(String),
}
