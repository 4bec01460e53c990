//! Tests for [`Tokenizer`].

use std::sync::Arc;

use rstest::rstest;

use crate::{
    QuotePair, QuotePairs, RangePool, Tokenizer, TokenizerConfig, TokenizerFailureReason,
};

fn texts(input: &str, prefix: usize) -> Vec<String> {
    Tokenizer::default()
        .tokenize(input, prefix)
        .expect("tokenize")
        .tokens()
        .map(str::to_owned)
        .collect()
}

#[rstest]
#[case("", 0, &[])]
#[case("   ", 0, &[])]
#[case("ping", 0, &["ping"])]
#[case("  module   stats  ", 0, &["module", "stats"])]
#[case("!module stats", 1, &["module", "stats"])]
#[case("say 'hello world' and more", 0, &["say", "'hello world'", "and", "more"])]
#[case("tag \"a b\" \u{201C}c d\u{201D}", 0, &["tag", "\"a b\"", "\u{201C}c d\u{201D}"])]
#[case("don't stop", 0, &["don't", "stop"])]
#[case("say ''", 0, &["say", "''"])]
#[case("a\tb\nc", 0, &["a", "b", "c"])]
#[case("héllo wörld", 0, &["héllo", "wörld"])]
fn splits_tokens(#[case] input: &str, #[case] prefix: usize, #[case] expected: &[&str]) {
    assert_eq!(texts(input, prefix), expected);
}

#[rstest]
#[case("module stats")]
#[case("  say   'hello   world'  now ")]
#[case("«quoted» plain \"double quoted\"")]
#[case("ümlaut 'ç a' ß")]
fn slicing_ranges_round_trips_token_text(#[case] input: &str) {
    let tokenized = Tokenizer::default().tokenize(input, 0).expect("tokenize");
    let expected: Vec<&str> = input.split_whitespace().collect::<Vec<_>>();
    let sliced: Vec<&str> = tokenized
        .ranges()
        .map(|range| input.get(range).expect("range on char boundary"))
        .collect();
    // Quoted tokens keep their inner whitespace verbatim.
    assert_eq!(sliced.join(" ").split_whitespace().collect::<Vec<_>>(), expected);
    for token in &sliced {
        assert!(!token.is_empty());
        assert!(!token.starts_with(char::is_whitespace));
        assert!(!token.ends_with(char::is_whitespace));
    }
    assert_eq!(tokenized.tokens().collect::<Vec<_>>(), sliced);
    assert_eq!(tokenized.len(), sliced.len());
}

#[rstest]
#[case("say 'open", 4, TokenizerFailureReason::UnterminatedQuote)]
#[case("\"never closed", 0, TokenizerFailureReason::UnterminatedQuote)]
#[case("say 'closed'now", 12, TokenizerFailureReason::UnexpectedCharacterAfterQuote)]
#[case("say 'a''b'", 7, TokenizerFailureReason::UnexpectedCharacterAfterQuote)]
fn malformed_input_fails_with_offset(
    #[case] input: &str,
    #[case] offset: usize,
    #[case] reason: TokenizerFailureReason,
) {
    let failure = Tokenizer::default()
        .tokenize(input, 0)
        .expect_err("tokenization should fail");
    assert_eq!(failure.offset(), offset);
    assert_eq!(failure.reason(), reason);
    assert_eq!(failure.input(), input);
}

#[rstest]
#[case("abc", 4)]
#[case("\u{00E9}x", 1)]
fn prefix_outside_input_is_a_failure(#[case] input: &str, #[case] prefix: usize) {
    let failure = Tokenizer::default()
        .tokenize(input, prefix)
        .expect_err("prefix should be rejected");
    assert_eq!(failure.reason(), TokenizerFailureReason::PrefixOutOfBounds);
    assert_eq!(failure.offset(), prefix);
}

#[test]
fn prefix_equal_to_length_yields_no_tokens() {
    let tokenized = Tokenizer::default().tokenize("!", 1).expect("tokenize");
    assert!(tokenized.is_empty());
    assert_eq!(tokenized.len(), 0);
}

#[test]
fn overlong_input_is_a_failure() {
    let tokenizer = Tokenizer::new(TokenizerConfig::new(QuotePairs::default(), Some(8)));
    let failure = tokenizer
        .tokenize("a much longer line", 0)
        .expect_err("input should be rejected");
    assert_eq!(failure.reason(), TokenizerFailureReason::InputTooLong);
    assert_eq!(failure.offset(), 8);
}

#[test]
fn custom_quote_pairs_are_honoured() {
    let quotes = QuotePairs::new(vec![QuotePair::new('<', '>')]);
    let tokenizer = Tokenizer::new(TokenizerConfig::new(quotes, None));
    let tokenized = tokenizer.tokenize("say <a b> 'c d'", 0).expect("tokenize");
    let tokens: Vec<&str> = tokenized.tokens().collect();
    assert_eq!(tokens, vec!["say", "<a b>", "'c", "d'"]);
}

#[test]
fn token_ranges_index_the_original_input() {
    let tokenized = Tokenizer::default()
        .tokenize("?? hi 'there you'", 2)
        .expect("tokenize");
    let ranges: Vec<_> = tokenized.ranges().collect();
    assert_eq!(ranges, vec![3..5, 6..17]);
    assert_eq!(tokenized.source(), "?? hi 'there you'");
    assert_eq!(tokenized.index_set().reference_length(), 17);
}

#[test]
fn failed_tokenization_returns_the_block() {
    let pool = Arc::new(RangePool::default());
    let tokenizer = Tokenizer::with_pool(TokenizerConfig::default(), Arc::clone(&pool));

    assert!(tokenizer.tokenize("say 'oops", 0).is_err());
    assert_eq!(pool.idle_blocks(), 1);

    let tokenized = tokenizer.tokenize("say fine.", 0).expect("tokenize");
    assert_eq!(pool.idle_blocks(), 0);
    drop(tokenized);
    assert_eq!(pool.idle_blocks(), 1);
}
