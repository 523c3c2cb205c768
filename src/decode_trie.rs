use crate::bit_sequence::BitSequence;
use crate::code_map::SymbolCodeMap;
use crate::symbol::Symbol;
use biterator::Bit;
use log::{debug, trace, warn};

/// A node of a [`DecodeTrie`].
///
/// A valid node is either a leaf, holding a symbol and no children, or an
/// internal node, holding no symbol and both children.
#[derive(Debug, Clone, PartialEq)]
pub struct TrieNode<S: Symbol> {
    symbol: Option<S>,
    zero: Option<Box<TrieNode<S>>>,
    one: Option<Box<TrieNode<S>>>,
}

impl<S: Symbol> TrieNode<S> {
    /// A node with no symbol and no children.
    pub fn new() -> Self {
        Self {
            symbol: None,
            zero: None,
            one: None,
        }
    }

    pub fn leaf(symbol: S) -> Self {
        Self {
            symbol: Some(symbol),
            zero: None,
            one: None,
        }
    }

    pub fn internal(zero: TrieNode<S>, one: TrieNode<S>) -> Self {
        Self {
            symbol: None,
            zero: Some(Box::new(zero)),
            one: Some(Box::new(one)),
        }
    }

    pub fn symbol(&self) -> Option<S> {
        self.symbol
    }

    pub fn zero(&self) -> Option<&TrieNode<S>> {
        self.zero.as_deref()
    }

    pub fn one(&self) -> Option<&TrieNode<S>> {
        self.one.as_deref()
    }

    pub fn is_leaf(&self) -> bool {
        self.symbol.is_some() && self.zero.is_none() && self.one.is_none()
    }

    /// Whether this node and all of its descendants are valid.
    pub fn is_valid(&self) -> bool {
        match (&self.zero, &self.one) {
            (None, None) => self.symbol.is_some(),
            (Some(zero), Some(one)) => self.symbol.is_none() && zero.is_valid() && one.is_valid(),
            _ => false,
        }
    }

    fn child(&self, bit: Bit) -> Option<&TrieNode<S>> {
        match bit {
            Bit::Zero => self.zero(),
            Bit::One => self.one(),
        }
    }

    /// The child for `bit`, created empty if it does not exist yet.
    fn child_or_insert(&mut self, bit: Bit) -> &mut TrieNode<S> {
        let child = match bit {
            Bit::Zero => &mut self.zero,
            Bit::One => &mut self.one,
        };
        child.get_or_insert_with(|| {
            trace!("Creating placeholder node");
            Box::new(TrieNode::new())
        })
    }
}

impl<S: Symbol> Default for TrieNode<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// A binary trie from codewords to symbols, used for decoding.
///
/// Each bit of a codeword selects the zero or one child of the current node,
/// and the node reached at the end of the codeword holds its symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeTrie<S: Symbol> {
    root: TrieNode<S>,
}

/// Errors that can occur while decoding
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum DecodeError {
    /// The input either selected a child that does not exist, or ended part way
    /// through a codeword. `position` is the offset of the offending bit, or
    /// the input length in the second case.
    #[error("Malformed codeword at bit {position}")]
    MalformedCodeword { position: usize },
}

/// Where the decoder is in the trie between two bits.
enum Cursor<'t, S: Symbol> {
    AtRoot,
    AtNode(&'t TrieNode<S>),
}

impl<S: Symbol> DecodeTrie<S> {
    /// Create a trie whose root has no symbol and no children. Such a trie is
    /// not valid until codewords are inserted.
    pub fn new() -> Self {
        Self {
            root: TrieNode::new(),
        }
    }

    /// Create a trie from an already assembled tree.
    pub fn with_root(root: TrieNode<S>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &TrieNode<S> {
        &self.root
    }

    /// Store `symbol` at the node reached by following `codeword` from the
    /// root, creating empty nodes along the way. Any symbol already stored at
    /// that node is replaced.
    pub fn insert(&mut self, codeword: &BitSequence, symbol: S) {
        let mut node = &mut self.root;
        for bit in codeword {
            node = node.child_or_insert(bit);
        }

        if let Some(previous) = node.symbol.replace(symbol) {
            if previous != symbol {
                warn!("Codeword {codeword} reassigned from {previous:?} to {symbol:?}");
            }
        }
    }

    /// Whether every node in the trie, including the root, is valid.
    ///
    /// A trie is valid exactly when it was built from a complete prefix-free
    /// code. Decoding with an invalid trie may reject well-formed input.
    pub fn is_valid(&self) -> bool {
        self.root.is_valid()
    }

    /// Decode a stream of bits into the symbols it encodes.
    ///
    /// The output can be collected into any container of symbols, e.g. a
    /// `String` when the symbols are `char`s.
    pub fn decode<T>(&self, codeword: &BitSequence) -> Result<T, DecodeError>
    where
        T: FromIterator<S>,
    {
        let mut symbols = Vec::new();
        let mut cursor = Cursor::AtRoot;

        for (position, bit) in codeword.iter().enumerate() {
            let node = match cursor {
                Cursor::AtRoot => &self.root,
                Cursor::AtNode(node) => node,
            };
            let child = node
                .child(bit)
                .ok_or(DecodeError::MalformedCodeword { position })?;

            cursor = match child.symbol {
                Some(symbol) => {
                    symbols.push(symbol);
                    Cursor::AtRoot
                }
                None => Cursor::AtNode(child),
            };
        }

        if let Cursor::AtNode(_) = cursor {
            return Err(DecodeError::MalformedCodeword {
                position: codeword.len(),
            });
        }

        debug!("Decoded {} bits into {} symbols", codeword.len(), symbols.len());
        Ok(symbols.into_iter().collect())
    }
}

impl<S: Symbol> Default for DecodeTrie<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Symbol> From<&SymbolCodeMap<S>> for DecodeTrie<S> {
    /// Build a trie holding every codeword of `map`, inserting symbols in
    /// ascending order.
    fn from(map: &SymbolCodeMap<S>) -> Self {
        let mut trie = Self::new();
        let mut symbol_count = 0;

        for symbol in map {
            if let Some(codeword) = map.lookup(&symbol) {
                trie.insert(&codeword, symbol);
                symbol_count += 1;
            }
        }

        debug!("Built decode trie from {symbol_count} codewords");
        trie
    }
}
