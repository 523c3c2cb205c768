pub mod bit_sequence;
pub mod code_map;
pub mod decode_trie;
#[cfg(test)]
mod example;
pub mod symbol;

pub use bit_sequence::{BitSequence, Bits, ParseBitsError};
pub use code_map::{EncodeError, SymbolCodeMap, Symbols};
pub use decode_trie::{DecodeError, DecodeTrie, TrieNode};
pub use symbol::Symbol;
