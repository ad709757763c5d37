//! High-level decoder that merges the enabled extension tables.
use std::collections::{BTreeSet, HashMap};

use tracing::{debug, trace};

use crate::{
    bits::{BitSequence, Width},
    error::{DecodeError, IsaError},
    ext::{DecodeFn, Extension, ExtensionSet},
    format::{opcode_key, OpcodeKey},
    instruction::Instruction,
    mnemonic::Mnemonic,
};

/// A decode function together with the extension that registered it
#[derive(Debug, Clone, Copy)]
struct Entry {
    extension: Extension,
    decode: DecodeFn,
}

/// RISC-V instruction decoder for a fixed set of extensions.
///
/// The tables of every enabled extension are merged once at construction and
/// never change afterwards, so a single decoder can be shared across threads.
///
/// When two extensions register the same opcode key (M shares OP with the base
/// ISA) both decode functions are kept in merge order. Decoding tries them in
/// turn: the first success wins, an [`DecodeError::UnknownEncoding`] moves on to
/// the next one, and any other error is returned immediately.
#[derive(Debug, Clone)]
pub struct Decoder {
    extensions: ExtensionSet,
    table: HashMap<OpcodeKey, Vec<Entry>>,
    names: BTreeSet<Mnemonic>,
}

static_assertions::assert_impl_all!(Decoder: Send, Sync);

impl Decoder {
    /// Build a decoder for the given extensions
    pub fn new(extensions: ExtensionSet) -> Self {
        let mut table: HashMap<OpcodeKey, Vec<Entry>> = HashMap::new();
        let mut names = BTreeSet::new();

        for extension in extensions.iter() {
            let ext_table = extension.table();
            for &(key, decode) in ext_table.entries {
                let entries = table.entry(key).or_default();
                debug_assert!(
                    entries.iter().all(|e| e.extension != extension),
                    "{extension:?} registers {key} twice"
                );
                if !entries.is_empty() {
                    trace!("{key} shared by {:?} and {extension:?}", entries[0].extension);
                }
                entries.push(Entry { extension, decode });
            }
            names.extend(ext_table.names.iter().copied());
        }

        debug!(
            "Built {} decoder with {} opcode keys and {} instruction names",
            extensions,
            table.len(),
            names.len()
        );

        Self { extensions, table, names }
    }

    /// Build a decoder from an ISA string such as `"32I"` or `"RV32IMC"`
    pub fn from_isa(isa: &str) -> Result<Self, IsaError> {
        Ok(Self::new(isa.parse()?))
    }

    /// Decode a single instruction written in hexadecimal
    pub fn decode_hex(&self, text: &str) -> Result<Instruction, DecodeError> {
        self.decode(&BitSequence::from_hex(text)?)
    }

    /// Decode a single instruction
    pub fn decode(&self, bits: &BitSequence) -> Result<Instruction, DecodeError> {
        let key = opcode_key(bits);
        let entries = self.table.get(&key).ok_or(DecodeError::UnsupportedOpcode(key))?;

        let mut last_error = DecodeError::UnsupportedOpcode(key);
        for entry in entries {
            match (entry.decode)(bits) {
                Ok(instruction) => {
                    debug_assert!(self.names.contains(&instruction.mnemonic()));
                    return Ok(instruction);
                }
                Err(err @ DecodeError::UnknownEncoding { .. }) => {
                    trace!("{:?} does not recognize {bits:#x}", entry.extension);
                    last_error = err;
                }
                Err(err) => return Err(err),
            }
        }

        Err(last_error)
    }

    /// Decode a machine word, choosing its width from the lowest two bits
    pub fn decode_word(&self, word: u32) -> Result<Instruction, DecodeError> {
        self.decode(&BitSequence::from_word(word))
    }

    /// Decode a little-endian code buffer holding mixed 16/32-bit instructions.
    ///
    /// The iterator yields the byte offset of each instruction with its decode
    /// result and carries on past words that fail to decode.
    pub fn decode_bytes<'a>(&'a self, bytes: &'a [u8]) -> DecodeBytes<'a> {
        DecodeBytes { decoder: self, bytes, offset: 0 }
    }

    pub fn extensions(&self) -> ExtensionSet {
        self.extensions
    }

    /// Instruction names this decoder can produce, in mnemonic order
    pub fn names(&self) -> impl Iterator<Item = Mnemonic> + '_ {
        self.names.iter().copied()
    }

    /// Whether `name` is an instruction this decoder can produce
    pub fn recognizes(&self, name: &str) -> bool {
        name.parse::<Mnemonic>().is_ok_and(|mnemonic| self.names.contains(&mnemonic))
    }

    /// Opcode keys with at least one registered decode function
    pub fn keys(&self) -> impl Iterator<Item = OpcodeKey> + '_ {
        self.table.keys().copied()
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(ExtensionSet::default())
    }
}

/// Iterator returned by [`Decoder::decode_bytes`]
#[derive(Debug, Clone)]
pub struct DecodeBytes<'a> {
    decoder: &'a Decoder,
    bytes: &'a [u8],
    offset: usize,
}

impl Iterator for DecodeBytes<'_> {
    type Item = (usize, Result<Instruction, DecodeError>);

    fn next(&mut self) -> Option<Self::Item> {
        let offset = self.offset;
        let remaining = &self.bytes[offset.min(self.bytes.len())..];
        if remaining.is_empty() {
            return None;
        }

        if remaining.len() < 2 {
            self.offset = self.bytes.len();
            return Some((offset, Err(DecodeError::Truncated(offset))));
        }

        // Read first 16-bit half
        let first_half = u16::from_le_bytes([remaining[0], remaining[1]]);

        let result = match Width::of(first_half as u32) {
            Width::Compressed => {
                self.offset += 2;
                self.decoder.decode(&BitSequence::compressed(first_half))
            }
            Width::Standard => {
                // 32-bit instruction - need second half
                if remaining.len() < 4 {
                    self.offset = self.bytes.len();
                    return Some((offset, Err(DecodeError::Truncated(offset))));
                }
                let second_half = u16::from_le_bytes([remaining[2], remaining[3]]);
                self.offset += 4;
                let word = (first_half as u32) | ((second_half as u32) << 16);
                self.decoder.decode(&BitSequence::standard(word))
            }
        };

        if let Err(err) = &result {
            trace!("Skipping undecodable instruction at offset {offset}: {err}");
        }
        Some((offset, result))
    }
}
