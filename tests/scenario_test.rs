use huffman_coding::{BitSequence, DecodeError, DecodeTrie, EncodeError, SymbolCodeMap};

fn bits(text: &str) -> BitSequence {
    text.parse().unwrap()
}

fn scenario_map() -> SymbolCodeMap<char> {
    let mut map = SymbolCodeMap::new();
    map.insert('b', bits("001"));
    map.insert('a', bits("01"));
    map.insert('c', bits("1"));
    map
}

#[test_log::test]
fn encode_then_decode() {
    let map = scenario_map();
    assert_eq!(map.iter().collect::<String>(), "abc");

    let encoded = map.encode("abc".chars()).unwrap();
    assert_eq!(encoded.to_string(), "010011");

    let trie = DecodeTrie::from(&map);
    let decoded: String = trie.decode(&encoded).unwrap();
    assert_eq!(decoded, "abc");
}

#[test_log::test]
fn truncated_input_is_malformed() {
    let trie = DecodeTrie::from(&scenario_map());
    assert_eq!(
        trie.decode::<String>(&bits("00")),
        Err(DecodeError::MalformedCodeword { position: 2 })
    );
}

#[test]
fn unknown_symbol_is_not_skipped() {
    let map = scenario_map();
    let error = map.encode("cab!".chars()).unwrap_err();
    assert_eq!(error, EncodeError::SymbolNotFound('!'));
    assert_eq!(error.to_string(), "Symbol '!' has no codeword");
}

#[test]
fn overlapping_codewords_are_invalid() {
    let mut trie = DecodeTrie::new();
    trie.insert(&bits("0"), 'a');
    trie.insert(&bits("01"), 'b');
    assert!(!trie.is_valid());
}

#[test]
fn decode_bytes() {
    let map: SymbolCodeMap<char> = [('x', bits("0")), ('y', bits("10")), ('z', bits("11"))]
        .into_iter()
        .collect();
    let trie = DecodeTrie::from(&map);
    assert!(trie.is_valid());

    // 0b1110_0100 -> z y x y x x
    let decoded: String = trie.decode(&BitSequence::from_bytes(&[0b1110_0100])).unwrap();
    assert_eq!(decoded, "zyxyxx");
}
