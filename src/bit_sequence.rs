use biterator::Bit;
use std::fmt;
use std::str::FromStr;

/// An ordered, finite sequence of bits.
///
/// Used both for the codeword assigned to a single symbol and for a whole
/// encoded message.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct BitSequence {
    bits: Vec<bool>,
}

/// Errors that can occur while parsing a bit sequence from text
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ParseBitsError {
    #[error("Invalid character {character:?} at position {position}, expected '0' or '1'")]
    InvalidCharacter { character: char, position: usize },
}

impl BitSequence {
    /// Create an empty bit sequence.
    pub fn new() -> Self {
        Self { bits: Vec::new() }
    }

    /// Create a bit sequence from raw bytes, taking the bits of each byte from
    /// most to least significant.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut bits = Vec::with_capacity(bytes.len() * 8);
        for byte in bytes {
            for offset in (0..8).rev() {
                bits.push((byte >> offset) & 1 == 1);
            }
        }
        Self { bits }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn push(&mut self, bit: Bit) {
        self.bits.push(is_one(bit));
    }

    /// Append a copy of `other` to the end of this sequence.
    pub fn append(&mut self, other: &BitSequence) {
        self.bits.extend_from_slice(&other.bits);
    }

    /// An iterator over the bits of the sequence, in order. Each call starts
    /// again from the first bit.
    pub fn iter(&self) -> Bits<'_> {
        Bits {
            inner: self.bits.iter(),
        }
    }
}

fn is_one(bit: Bit) -> bool {
    match bit {
        Bit::Zero => false,
        Bit::One => true,
    }
}

fn to_bit(value: bool) -> Bit {
    if value { Bit::One } else { Bit::Zero }
}

/// Iterator over the bits of a [`BitSequence`].
pub struct Bits<'a> {
    inner: std::slice::Iter<'a, bool>,
}

impl Iterator for Bits<'_> {
    type Item = Bit;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|&value| to_bit(value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Bits<'_> {}

impl<'a> IntoIterator for &'a BitSequence {
    type Item = Bit;
    type IntoIter = Bits<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Bit> for BitSequence {
    fn from_iter<I: IntoIterator<Item = Bit>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().map(is_one).collect(),
        }
    }
}

impl Extend<Bit> for BitSequence {
    fn extend<I: IntoIterator<Item = Bit>>(&mut self, iter: I) {
        self.bits.extend(iter.into_iter().map(is_one));
    }
}

impl FromStr for BitSequence {
    type Err = ParseBitsError;

    /// Parse a string of '0' and '1' characters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .map(|(position, character)| match character {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(ParseBitsError::InvalidCharacter {
                    character,
                    position,
                }),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(|bits| Self { bits })
    }
}

impl fmt::Display for BitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for BitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitSequence({self})")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use biterator::Bit::{One, Zero};

    #[test]
    fn parse_literal_text() {
        let bits: BitSequence = "0110".parse().unwrap();
        assert_eq!(bits.iter().collect::<Vec<_>>(), vec![Zero, One, One, Zero]);
        assert_eq!(bits.len(), 4);
    }

    #[test]
    fn parse_empty_text() {
        let bits: BitSequence = "".parse().unwrap();
        assert!(bits.is_empty());
        assert_eq!(bits, BitSequence::new());
    }

    #[test]
    fn reject_non_binary_character() {
        assert_eq!(
            "01x1".parse::<BitSequence>(),
            Err(ParseBitsError::InvalidCharacter {
                character: 'x',
                position: 2
            })
        );
    }

    #[test]
    fn bytes_are_read_most_significant_bit_first() {
        let bits = BitSequence::from_bytes(&[0b1000_0001, 0b0100_0000]);
        assert_eq!(bits.to_string(), "1000000101000000");
    }

    #[test]
    fn append_concatenates() {
        let mut bits: BitSequence = "01".parse().unwrap();
        let tail: BitSequence = "001".parse().unwrap();
        bits.append(&tail);
        assert_eq!(bits.to_string(), "01001");
        assert_eq!(tail.to_string(), "001");
    }

    #[test]
    fn clone_is_independent() {
        let original: BitSequence = "10".parse().unwrap();
        let mut copy = original.clone();
        copy.push(One);
        assert_eq!(original.to_string(), "10");
        assert_eq!(copy.to_string(), "101");
    }

    #[test]
    fn iteration_restarts() {
        let bits: BitSequence = "101".parse().unwrap();
        let first: BitSequence = bits.iter().collect();
        let second: BitSequence = bits.iter().collect();
        assert_eq!(first, bits);
        assert_eq!(second, bits);
    }
}
