//! Fixed-width bit sequences holding a single instruction word.
//!
//! A [`BitSequence`] is either 16 bits (a compressed instruction) or 32 bits
//! (a standard instruction). Bits are indexed MSB first, so index `i` is ISA
//! bit `len - 1 - i`; most callers use [`BitSequence::field`] which takes ISA
//! bit numbers directly.
use std::fmt;

use crate::error::DecodeError;

/// Instruction word width
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Width {
    /// 16-bit compressed encoding
    Compressed,
    /// 32-bit standard encoding
    Standard,
}

impl Width {
    /// Number of bits in a word of this width
    pub const fn bits(self) -> usize {
        match self {
            Width::Compressed => 16,
            Width::Standard => 32,
        }
    }

    /// Width of an instruction whose lowest bits are `low`.
    ///
    /// Only words ending in `0b11` are 32 bits wide, everything else is compressed.
    #[inline(always)]
    pub const fn of(low: u32) -> Self {
        if low & 0b11 == 0b11 {
            Width::Standard
        } else {
            Width::Compressed
        }
    }
}

/// An instruction word together with its width
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct BitSequence {
    word: u32,
    width: Width,
}

impl BitSequence {
    /// Wrap a 32-bit standard instruction word
    pub const fn standard(word: u32) -> Self {
        Self { word, width: Width::Standard }
    }

    /// Wrap a 16-bit compressed instruction word
    pub const fn compressed(half: u16) -> Self {
        Self { word: half as u32, width: Width::Compressed }
    }

    /// Wrap a machine word, choosing the width from its lowest two bits.
    ///
    /// When the word is compressed only the low 16 bits are kept.
    pub const fn from_word(word: u32) -> Self {
        match Width::of(word) {
            Width::Standard => Self::standard(word),
            Width::Compressed => Self::compressed(word as u16),
        }
    }

    /// Parse hexadecimal text such as `"0x00050293"` or `"4501"`.
    ///
    /// The width is 32 bits when the value ends in `0b11` and 16 bits otherwise.
    /// The value is zero padded on the left up to that width.
    pub fn from_hex(text: &str) -> Result<Self, DecodeError> {
        let trimmed = text.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        let digits: String = digits.chars().filter(|c| *c != '_').collect();

        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(DecodeError::MalformedHex(text.to_string()));
        }

        let significant = digits.trim_start_matches('0');
        if significant.len() > 8 {
            return Err(DecodeError::InvalidWidth(significant.len() * 4));
        }
        // At most 8 hex digits remain, so this cannot overflow
        let value = u32::from_str_radix(if significant.is_empty() { "0" } else { significant }, 16)
            .map_err(|_| DecodeError::MalformedHex(text.to_string()))?;

        let width = Width::of(value);
        let used = (u32::BITS - value.leading_zeros()) as usize;
        if used > width.bits() {
            return Err(DecodeError::InvalidWidth(used));
        }

        Ok(Self { word: value, width })
    }

    /// Wrap `0`/`1` text of exactly 16 or 32 characters, MSB first.
    pub fn from_bits(text: &str) -> Result<Self, DecodeError> {
        let width = match text.chars().count() {
            16 => Width::Compressed,
            32 => Width::Standard,
            n => return Err(DecodeError::InvalidWidth(n)),
        };

        let mut word = 0u32;
        for c in text.chars() {
            let bit = match c {
                '0' => 0,
                '1' => 1,
                _ => return Err(DecodeError::MalformedBits(text.to_string())),
            };
            word = (word << 1) | bit;
        }

        Ok(Self { word, width })
    }

    /// The raw word, zero extended to 32 bits
    #[inline(always)]
    pub const fn word(&self) -> u32 {
        self.word
    }

    pub const fn width(&self) -> Width {
        self.width
    }

    /// Number of bits, either 16 or 32
    pub const fn len(&self) -> usize {
        self.width.bits()
    }

    pub const fn is_empty(&self) -> bool {
        false
    }

    pub const fn is_compressed(&self) -> bool {
        matches!(self.width, Width::Compressed)
    }

    /// Bit at MSB-first index `i`, or `None` past the end
    pub fn get(&self, i: usize) -> Option<bool> {
        let len = self.len();
        if i >= len {
            return None;
        }
        Some((self.word >> (len - 1 - i)) & 1 == 1)
    }

    /// Bits `[hi:lo]` in ISA numbering, shifted down to bit 0
    #[inline(always)]
    pub const fn field(&self, hi: u32, lo: u32) -> u32 {
        debug_assert!(hi >= lo && hi < 32);
        let width = hi - lo + 1;
        let mask = if width == 32 { u32::MAX } else { (1 << width) - 1 };
        (self.word >> lo) & mask
    }

    /// Single ISA-numbered bit
    #[inline(always)]
    pub const fn bit(&self, pos: u32) -> u32 {
        (self.word >> pos) & 1
    }

    /// Iterate bits MSB first
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len()).map(move |i| (self.word >> (self.len() - 1 - i)) & 1 == 1)
    }
}

impl fmt::Display for BitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$b}", self.word, width = self.len())
    }
}

impl fmt::LowerHex for BitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.word, f)
    }
}

impl fmt::UpperHex for BitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.word, f)
    }
}

impl From<u16> for BitSequence {
    fn from(half: u16) -> Self {
        Self::compressed(half)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_standard() {
        let bits = BitSequence::from_hex("0x00050293").unwrap();
        assert_eq!(bits.len(), 32);
        assert_eq!(bits.word(), 0x0005_0293);
        assert_eq!(bits.to_string(), "00000000000001010000001010010011");
    }

    #[test]
    fn test_from_hex_compressed() {
        // c.li a0, 0
        let bits = BitSequence::from_hex("4501").unwrap();
        assert_eq!(bits.len(), 16);
        assert!(bits.is_compressed());
        assert_eq!(bits.to_string(), "0100010100000001");

        // leading zeros and upper case marker
        let bits = BitSequence::from_hex("0X0000_4501").unwrap();
        assert_eq!(bits.len(), 16);
        assert_eq!(bits.word(), 0x4501);
    }

    #[test]
    fn test_from_hex_small_values() {
        assert_eq!(BitSequence::from_hex("0").unwrap().len(), 16);
        assert_eq!(BitSequence::from_hex("3").unwrap().len(), 32);
        assert_eq!(BitSequence::from_hex("3").unwrap().to_string().len(), 32);
    }

    #[test]
    fn test_from_hex_malformed() {
        assert!(matches!(BitSequence::from_hex("0xzz"), Err(DecodeError::MalformedHex(_))));
        assert!(matches!(BitSequence::from_hex(""), Err(DecodeError::MalformedHex(_))));
        assert!(matches!(BitSequence::from_hex("0x"), Err(DecodeError::MalformedHex(_))));
        assert!(matches!(BitSequence::from_hex("12 34"), Err(DecodeError::MalformedHex(_))));
    }

    #[test]
    fn test_from_hex_too_wide() {
        // compressed value that needs more than 16 bits
        assert_eq!(BitSequence::from_hex("0x10000"), Err(DecodeError::InvalidWidth(17)));
        assert_eq!(BitSequence::from_hex("0x123456789"), Err(DecodeError::InvalidWidth(36)));
    }

    #[test]
    fn test_from_bits() {
        let bits = BitSequence::from_bits("0100010100000001").unwrap();
        assert_eq!(bits.word(), 0x4501);
        assert_eq!(bits.len(), 16);

        let bits = BitSequence::from_bits("00000000000001010000001010010011").unwrap();
        assert_eq!(bits.word(), 0x0005_0293);
        assert_eq!(bits.len(), 32);
    }

    #[test]
    fn test_from_bits_errors() {
        assert_eq!(BitSequence::from_bits("0101"), Err(DecodeError::InvalidWidth(4)));
        assert_eq!(BitSequence::from_bits(""), Err(DecodeError::InvalidWidth(0)));
        assert!(matches!(
            BitSequence::from_bits("010001010000000x"),
            Err(DecodeError::MalformedBits(_))
        ));
    }

    #[test]
    fn test_indexing() {
        let bits = BitSequence::from_bits("1000000000000011").unwrap();
        assert_eq!(bits.get(0), Some(true));
        assert_eq!(bits.get(1), Some(false));
        assert_eq!(bits.get(15), Some(true));
        assert_eq!(bits.get(16), None);
        assert_eq!(bits.bit(15), 1);
        assert_eq!(bits.field(1, 0), 0b11);
        assert_eq!(bits.iter().filter(|b| *b).count(), 3);
    }

    #[test]
    fn test_from_word() {
        assert_eq!(BitSequence::from_word(0x0005_0293).len(), 32);
        assert_eq!(BitSequence::from_word(0xdead_4501), BitSequence::compressed(0x4501));
    }

    #[test]
    fn test_hex_formatting() {
        let bits = BitSequence::standard(0x0005_0293);
        assert_eq!(format!("{bits:#x}"), "0x50293");
        assert_eq!(format!("{bits:08X}"), "00050293");
    }
}
