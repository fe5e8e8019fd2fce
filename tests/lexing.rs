//! Tests for the tokenizer: keyword/identifier discrimination, multi-character operators, discarded trivia, and source positions.

use dice_language::lexer::{tokenize, TokenType};
use pretty_assertions::assert_eq;

fn token_types(code: &str) -> Vec<TokenType> {
	tokenize(code)
		.expect("the source should tokenize")
		.into_iter()
		.map(|token| token.token_type)
		.collect()
}

#[test]
fn keywords_are_not_identifiers() {
	assert_eq!(
		token_types("p print parallel func funky taskunit"),
		vec![
			TokenType::KeywordP,
			TokenType::Identifier,
			TokenType::KeywordParallel,
			TokenType::KeywordFunction,
			TokenType::Identifier,
			TokenType::KeywordTaskUnit,
		]
	);
}

#[test]
fn multi_character_operators_win_over_their_prefixes() {
	assert_eq!(
		token_types("-> - == = .. . <= < >= > != !"),
		vec![
			TokenType::Arrow,
			TokenType::Minus,
			TokenType::DoubleEquals,
			TokenType::Equal,
			TokenType::DotDot,
			TokenType::Dot,
			TokenType::LessThanOrEqual,
			TokenType::LessThan,
			TokenType::GreaterThanOrEqual,
			TokenType::GreaterThan,
			TokenType::NotEquals,
			TokenType::Bang,
		]
	);
}

#[test]
fn ranges_do_not_swallow_number_fractions() {
	assert_eq!(
		token_types("0..10 1.5..2.5"),
		vec![
			TokenType::Number,
			TokenType::DotDot,
			TokenType::Number,
			TokenType::Number,
			TokenType::DotDot,
			TokenType::Number,
		]
	);
}

#[test]
fn trivia_is_discarded() {
	assert_eq!(
		token_types("a // the rest is gone -> ;\n\tb"),
		vec![TokenType::Identifier, TokenType::Identifier]
	);
}

#[test]
fn strings_keep_their_quotes_and_escapes() {
	let tokens = tokenize(r#""one \"two\"""#).expect("the source should tokenize");
	assert_eq!(tokens.len(), 1);
	assert_eq!(tokens[0].token_type, TokenType::String);
	assert_eq!(tokens[0].value, r#""one \"two\"""#);
}

#[test]
fn tokens_carry_their_line_and_column() {
	let tokens = tokenize("a\n  bc @").expect("the source should tokenize");
	let positions: Vec<_> = tokens.iter().map(|token| (token.value.as_str(), token.line, token.column)).collect();
	assert_eq!(positions, vec![("a", 1, 1), ("bc", 2, 3), ("@", 2, 6)]);
}

#[test]
fn tokenizing_is_deterministic() {
	let code = r#"func main() { p loop i in 0..3 { print("x"); } }"#;
	assert_eq!(token_types(code), token_types(code));
}
