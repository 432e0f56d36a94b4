//! 単語数と `.txt` 付与のプロパティテスト

use noteit::file::ensure_txt_extension;
use noteit::word_count;
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;
use std::path::Path;

/// 空白と非空白が混在するテキスト
fn mixed_text() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            Just(' '),
            Just('\t'),
            Just('\n'),
            Just('\r'),
            Just('a'),
            Just('Z'),
            Just('語'),
            Just('.'),
        ],
        0..64,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

/// 非空白の連なりを数える参照実装
fn reference_count(text: &str) -> usize {
    let mut count = 0;
    let mut in_word = false;
    for ch in text.trim().chars() {
        if ch.is_whitespace() {
            in_word = false;
        } else if !in_word {
            in_word = true;
            count += 1;
        }
    }
    count
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]

    #[test]
    fn word_count_matches_reference(text in mixed_text()) {
        prop_assert_eq!(word_count(&text), reference_count(&text));
    }

    #[test]
    fn surrounding_whitespace_does_not_change_count(text in mixed_text(), pad in "[ \t\n]{0,5}") {
        let padded = format!("{}{}{}", pad, text, pad);
        prop_assert_eq!(word_count(&padded), word_count(&text));
    }

    #[test]
    fn names_without_txt_gain_exactly_one_suffix(name in "[a-zA-Z0-9_-]{1,12}") {
        let saved = ensure_txt_extension(Path::new(&name));
        prop_assert_eq!(saved.to_string_lossy().into_owned(), format!("{}.txt", name));
    }

    #[test]
    fn txt_suffix_is_idempotent(name in "[a-zA-Z0-9_-]{1,12}(\\.[a-z]{1,3})?") {
        let once = ensure_txt_extension(Path::new(&name));
        let twice = ensure_txt_extension(&once);
        prop_assert_eq!(&once, &twice);
        prop_assert!(once.to_string_lossy().contains(".txt"));
    }
}

#[test]
fn word_count_examples() {
    assert_eq!(word_count(""), 0);
    assert_eq!(word_count("   "), 0);
    assert_eq!(word_count("a  b\tc\n"), 3);
}
