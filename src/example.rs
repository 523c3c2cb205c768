use crate::bit_sequence::BitSequence;
use crate::code_map::SymbolCodeMap;

/// The codewords of the example code, in the order they are inserted.
///
/// The code is prefix-free but not complete: no symbol is assigned "000".
pub const EXAMPLE_CODEWORDS: [(char, &str); 3] = [('b', "001"), ('a', "01"), ('c', "1")];

/// A small code map over the symbols 'a', 'b' and 'c'.
pub fn example_code_map() -> SymbolCodeMap<char> {
    EXAMPLE_CODEWORDS
        .iter()
        .map(|&(symbol, codeword)| (symbol, codeword.parse::<BitSequence>().unwrap()))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_symbols() {
        let map = example_code_map();
        assert_eq!(map.iter().collect::<Vec<_>>(), vec!['a', 'b', 'c']);
    }

    #[test]
    fn test_codewords() {
        let map = example_code_map();
        for (symbol, codeword) in EXAMPLE_CODEWORDS {
            let expected: BitSequence = codeword.parse().unwrap();
            assert_eq!(map.lookup(&symbol), Some(expected));
        }
    }
}
