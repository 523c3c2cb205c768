use crate::bit_sequence::BitSequence;
use crate::symbol::Symbol;
use log::{debug, trace, warn};
use std::cmp::Ordering;
use std::fmt;

/// A mapping from symbols to their codewords, used for encoding.
///
/// Entries live in an unbalanced binary search tree ordered by symbol. A
/// symbol that compares equal to a node's symbol is placed in that node's
/// right subtree, so inserting a symbol that is already present adds a node
/// that lookups never reach: the first codeword inserted for a symbol is the
/// one that is used.
pub struct SymbolCodeMap<S: Symbol> {
    root: Option<Box<LookupNode<S>>>,
}

struct LookupNode<S: Symbol> {
    symbol: S,
    codeword: BitSequence,
    left: Option<Box<LookupNode<S>>>,
    right: Option<Box<LookupNode<S>>>,
}

impl<S: Symbol> LookupNode<S> {
    fn new(symbol: S, codeword: BitSequence) -> Self {
        Self {
            symbol,
            codeword,
            left: None,
            right: None,
        }
    }
}

/// Errors that can occur while encoding
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum EncodeError<S: Symbol> {
    #[error("Symbol {0:?} has no codeword")]
    SymbolNotFound(S),
}

impl<S: Symbol> SymbolCodeMap<S> {
    /// Create an empty code map.
    pub fn new() -> Self {
        Self { root: None }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Assign `codeword` to `symbol`.
    ///
    /// This never replaces an existing entry. If `symbol` is already present
    /// the new node is unreachable and [`lookup`](Self::lookup) keeps
    /// returning the original codeword.
    pub fn insert(&mut self, symbol: S, codeword: BitSequence) {
        let mut link = &mut self.root;
        let mut depth = 0;
        let mut shadowed = false;

        while let Some(node) = link {
            if symbol < node.symbol {
                link = &mut node.left;
            } else {
                shadowed |= symbol == node.symbol;
                link = &mut node.right;
            }
            depth += 1;
        }

        if shadowed {
            warn!("Symbol {symbol:?} is already mapped, codeword {codeword} will be unreachable");
        }
        trace!("Inserting {symbol:?} -> {codeword} at depth {depth}");
        *link = Some(Box::new(LookupNode::new(symbol, codeword)));
    }

    /// Whether `symbol` has a codeword in this map.
    pub fn contains(&self, symbol: &S) -> bool {
        self.find(symbol).is_some()
    }

    /// Whether every one of `symbols` has a codeword in this map. Stops at the
    /// first symbol that is missing.
    pub fn contains_all<I>(&self, symbols: I) -> bool
    where
        I: IntoIterator<Item = S>,
    {
        symbols.into_iter().all(|symbol| self.contains(&symbol))
    }

    /// A copy of the codeword assigned to `symbol`, if there is one.
    pub fn lookup(&self, symbol: &S) -> Option<BitSequence> {
        self.find(symbol).map(|node| node.codeword.clone())
    }

    /// Encode a stream of symbols as the concatenation of their codewords.
    ///
    /// Fails on the first symbol that has no codeword.
    pub fn encode<I>(&self, text: I) -> Result<BitSequence, EncodeError<S>>
    where
        I: IntoIterator<Item = S>,
    {
        let mut output = BitSequence::new();
        let mut symbol_count = 0;

        for symbol in text {
            let node = self
                .find(&symbol)
                .ok_or(EncodeError::SymbolNotFound(symbol))?;
            output.append(&node.codeword);
            symbol_count += 1;
        }

        debug!("Encoded {symbol_count} symbols into {} bits", output.len());
        Ok(output)
    }

    /// An iterator over the symbols in the map, in ascending order.
    ///
    /// Every node is visited, so a symbol that was inserted more than once is
    /// yielded once per insertion.
    pub fn iter(&self) -> Symbols<'_, S> {
        let mut symbols = Symbols { stack: Vec::new() };
        symbols.descend_left(self.root.as_deref());
        symbols
    }

    /// The shallowest node holding `symbol`.
    fn find(&self, symbol: &S) -> Option<&LookupNode<S>> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match symbol.cmp(&node.symbol) {
                Ordering::Equal => return Some(node),
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        None
    }
}

// The tree can be as deep as it has entries, so none of the impls below may
// recurse per node.
impl<S: Symbol> Drop for SymbolCodeMap<S> {
    fn drop(&mut self) {
        let mut pending: Vec<Box<LookupNode<S>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

impl<S: Symbol> Clone for SymbolCodeMap<S> {
    fn clone(&self) -> Self {
        // Reversed, this is a post-order walk: both subtrees of a node are
        // rebuilt before the node itself, the right one on top.
        let mut order = Vec::new();
        let mut pending: Vec<&LookupNode<S>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = pending.pop() {
            order.push(node);
            pending.extend(node.left.as_deref());
            pending.extend(node.right.as_deref());
        }

        let mut built: Vec<Box<LookupNode<S>>> = Vec::with_capacity(order.len());
        for node in order.into_iter().rev() {
            let right = node.right.as_ref().and_then(|_| built.pop());
            let left = node.left.as_ref().and_then(|_| built.pop());
            built.push(Box::new(LookupNode {
                symbol: node.symbol,
                codeword: node.codeword.clone(),
                left,
                right,
            }));
        }

        Self { root: built.pop() }
    }
}

impl<S: Symbol> fmt::Debug for SymbolCodeMap<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut nodes = self.iter();
        let entries = std::iter::from_fn(|| nodes.next_node())
            .map(|node| (node.symbol, &node.codeword));
        f.debug_map().entries(entries).finish()
    }
}

impl<S: Symbol> Default for SymbolCodeMap<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Symbol> FromIterator<(S, BitSequence)> for SymbolCodeMap<S> {
    fn from_iter<I: IntoIterator<Item = (S, BitSequence)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<S: Symbol> Extend<(S, BitSequence)> for SymbolCodeMap<S> {
    fn extend<I: IntoIterator<Item = (S, BitSequence)>>(&mut self, iter: I) {
        for (symbol, codeword) in iter {
            self.insert(symbol, codeword);
        }
    }
}

/// In-order iterator over the symbols of a [`SymbolCodeMap`].
pub struct Symbols<'m, S: Symbol> {
    // Nodes whose left subtree has been yielded but which have not been
    // yielded themselves.
    stack: Vec<&'m LookupNode<S>>,
}

impl<'m, S: Symbol> Symbols<'m, S> {
    fn next_node(&mut self) -> Option<&'m LookupNode<S>> {
        let node = self.stack.pop()?;
        self.descend_left(node.right.as_deref());
        Some(node)
    }

    fn descend_left(&mut self, mut node: Option<&'m LookupNode<S>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<S: Symbol> Iterator for Symbols<'_, S> {
    type Item = S;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_node().map(|node| node.symbol)
    }
}

impl<'m, S: Symbol> IntoIterator for &'m SymbolCodeMap<S> {
    type Item = S;
    type IntoIter = Symbols<'m, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
