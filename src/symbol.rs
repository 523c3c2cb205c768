use std::fmt::Debug;

/// A unit of plaintext that can be assigned a codeword.
///
/// Symbols need a total order because the code map stores them in a binary
/// search tree.
pub trait Symbol: Ord + Copy + Debug {}

impl Symbol for char {}

impl Symbol for u8 {}
