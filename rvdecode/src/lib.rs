//! RISC-V instruction decoder for 32-bit and 16-bit compressed words.
//!
//! Decoding runs in four steps:
//! 1. hex or bit text becomes a [`BitSequence`] of 16 or 32 bits, the width
//!    being chosen from the lowest two bits of the word;
//! 2. [`opcode_key`] extracts the coarse opcode (or quadrant);
//! 3. the [`Decoder`] looks the key up in the tables of its enabled extensions
//!    ([`Extension::I32`], [`Extension::M`], [`Extension::V`], [`Extension::C`]);
//! 4. the selected decode function builds an [`Instruction`], which can be
//!    classified and rendered as assembly text.
//!
//! ```
//! use rvdecode::{Decoder, ExtensionSet};
//!
//! let decoder = Decoder::new(ExtensionSet::rv32imc());
//! let inst = decoder.decode_hex("0x00050293").unwrap();
//! assert_eq!(inst.to_string(), "addi t0,a0,0");
//! ```
pub mod bits;
pub mod decoder;
pub mod error;
pub mod ext;
pub mod format;
pub mod instruction;
pub mod mnemonic;
pub mod register;

pub use bits::{BitSequence, Width};
pub use decoder::{DecodeBytes, Decoder};
pub use error::{DecodeError, IsaError};
pub use ext::{Extension, ExtensionSet};
pub use format::{opcode_key, Format, OpcodeKey};
pub use instruction::{Instruction, VectorMask};
pub use mnemonic::{Class, Mnemonic};
pub use register::{print_name, Register};

static_assertions::assert_impl_all!(Instruction: Send, Sync);
static_assertions::assert_impl_all!(BitSequence: Send, Sync, Copy);
