use std::sync::Arc;

use crate::{
	lexer::TokenType,
	parser::{Parse, TokenQueue, TokenQueueFunctionality as _},
	runtime::{scope::Scope, value::Value, Evaluate},
};

/// A number literal. DICE numbers are IEEE-754 doubles; Integer-valued numbers are required anywhere the language needs an integer, such as loop bounds.
#[derive(Debug, Clone)]
pub struct NumberLiteral {
	/// The numeric value of the literal.
	pub value: f64,
}

impl Parse for NumberLiteral {
	type Output = Self;

	fn parse(tokens: &mut TokenQueue) -> anyhow::Result<Self::Output> {
		let value = tokens.pop(TokenType::Number)?;
		Ok(Self {
			value: value.parse().map_err(|_| anyhow::anyhow!("parse error: \"{value}\" is not a representable number"))?,
		})
	}
}

impl Evaluate for NumberLiteral {
	fn evaluate(&self, _scope: &Arc<Scope>) -> anyhow::Result<Value> {
		Ok(Value::Number(self.value))
	}
}

/// A string literal. The lexer hands the literal over exactly as written, quotes and escapes included; Parsing strips the quotes and resolves the `\"` and
/// `\\` escape sequences.
#[derive(Debug, Clone)]
pub struct StringLiteral {
	/// The unescaped contents of the literal, without the surrounding quotes.
	pub value: String,
}

impl Parse for StringLiteral {
	type Output = Self;

	fn parse(tokens: &mut TokenQueue) -> anyhow::Result<Self::Output> {
		Ok(Self {
			value: unquote_string_lexeme(&tokens.pop(TokenType::String)?),
		})
	}
}

impl Evaluate for StringLiteral {
	fn evaluate(&self, _scope: &Arc<Scope>) -> anyhow::Result<Value> {
		Ok(Value::String(self.value.clone()))
	}
}

/// A boolean literal, i.e. `true` or `false`.
#[derive(Debug, Clone)]
pub struct BooleanLiteral {
	/// The value of the literal.
	pub value: bool,
}

impl Parse for BooleanLiteral {
	type Output = Self;

	fn parse(tokens: &mut TokenQueue) -> anyhow::Result<Self::Output> {
		if tokens.next_is(TokenType::KeywordTrue) {
			tokens.pop(TokenType::KeywordTrue).unwrap_or_else(|_| unreachable!());
			return Ok(Self { value: true });
		}
		tokens.pop(TokenType::KeywordFalse)?;
		Ok(Self { value: false })
	}
}

impl Evaluate for BooleanLiteral {
	fn evaluate(&self, _scope: &Arc<Scope>) -> anyhow::Result<Value> {
		Ok(Value::Boolean(self.value))
	}
}

/// Strips the surrounding double quotes off a string token's lexeme and resolves its escape sequences. `\"` becomes a double quote and `\\` becomes a single
/// backslash; A backslash before any other character is kept as written.
pub(crate) fn unquote_string_lexeme(lexeme: &str) -> String {
	let contents = lexeme.get(1..lexeme.len() - 1).unwrap_or_default();
	let mut unescaped = String::with_capacity(contents.len());
	let mut characters = contents.chars();
	while let Some(character) = characters.next() {
		if character == '\\' {
			match characters.next() {
				Some('"') => unescaped.push('"'),
				Some('\\') => unescaped.push('\\'),
				Some(other) => {
					unescaped.push('\\');
					unescaped.push(other);
				},
				None => unescaped.push('\\'),
			}
		} else {
			unescaped.push(character);
		}
	}
	unescaped
}
