use std::collections::VecDeque;

use colored::Colorize as _;

use crate::{
	lexer::{Token, TokenType},
	parser::statements::Statement,
};

/// The expressions module, which handles AST nodes that represent expressions.
pub mod expressions;
/// The statements module, which handles AST nodes that represent statements.
pub mod statements;

/// A queue of tokens, as produced by the lexer. The parser removes tokens from the front of the queue as it builds the abstract syntax tree.
pub type TokenQueue = VecDeque<Token>;

/// An abstract syntax tree of an entire program.
#[derive(Debug, Clone)]
pub struct Program {
	/// The statements that make up the program, in source order.
	pub statements: Vec<Statement>,
}

impl Parse for Program {
	type Output = Self;

	fn parse(tokens: &mut TokenQueue) -> anyhow::Result<Self::Output> {
		let mut statements = Vec::new();
		while !tokens.is_empty() {
			statements.push(Statement::parse(tokens).map_err(|error| anyhow::anyhow!("{error}\n\t{}", "while parsing the program's top-level statements".dimmed()))?);
		}
		Ok(Self { statements })
	}
}

/// Parses a token stream into an abstract syntax tree.
///
/// # Parameters
/// - `tokens` - A mutable reference to a token stream, as produced by `lexer::tokenize`.
///
/// # Returns
/// A `Result` containing either a `Program` or the first grammar error encountered.
pub fn parse(tokens: &mut TokenQueue) -> anyhow::Result<Program> {
	Program::parse(tokens)
}

/// A trait for parsing a token stream into an abstract syntax tree node using a specific rule.
pub trait Parse {
	/// The type of abstract syntax tree node that this rule parses into.
	type Output;

	/// Parses a token stream into an abstract syntax tree node using this rule.
	///
	/// # Parameters
	/// - `tokens` - The token stream to parse
	///
	/// # Returns
	/// A `Result` containing either an abstract syntax tree node or an `Error`.
	fn parse(tokens: &mut TokenQueue) -> anyhow::Result<Self::Output>;
}

/// A trait for treating a collection of tokens as a queue of tokens that can be parsed. This is implemented for `TokenQueue`.
pub trait TokenQueueFunctionality {
	/// Removes and returns the next token's value in the queue if the token matches the given token type. If it does not (or the token stream is empty),
	/// an error naming the expected and found token types, with the found token's position, is returned.
	fn pop(&mut self, token_type: TokenType) -> anyhow::Result<String>;

	/// Returns a reference to the next token in the queue without removing it, or `None` if the queue is empty.
	fn peek(&self) -> Option<&Token>;

	/// Returns a reference to the next token's type, or an "unexpected end of input" error if the queue is empty.
	fn peek_type(&self) -> anyhow::Result<&TokenType>;

	/// Returns a reference to the type of the token *after* the next token. This single extra token of lookahead is what distinguishes an assignment
	/// (`name = ...`) from an expression statement that starts with a name.
	fn peek_type2(&self) -> anyhow::Result<&TokenType>;

	/// Returns whether the next token in the queue matches the given token type.
	fn next_is(&self, token_type: TokenType) -> bool;

	/// Returns whether the next token in the queue matches one of the given token types.
	fn next_is_one_of(&self, token_types: &[TokenType]) -> bool {
		token_types.iter().any(|token_type| self.next_is(token_type.clone()))
	}
}

impl TokenQueueFunctionality for TokenQueue {
	fn pop(&mut self, token_type: TokenType) -> anyhow::Result<String> {
		// The mismatched token is consumed along the error path, which is fine: the first grammar error aborts the whole parse.
		if let Some(token) = self.pop_front() {
			if token.token_type == token_type {
				return Ok(token.value);
			}
			anyhow::bail!(
				"parse error at {}:{}: expected {}, but found {}",
				token.line,
				token.column,
				format!("{token_type}").bold().cyan(),
				format!("{}", token.token_type).bold().cyan()
			);
		}
		anyhow::bail!("parse error: expected {}, but found the end of the input", format!("{token_type}").bold().cyan());
	}

	fn peek(&self) -> Option<&Token> {
		self.front()
	}

	fn peek_type(&self) -> anyhow::Result<&TokenType> {
		Ok(&self.front().ok_or_else(|| anyhow::anyhow!("parse error: unexpected end of input"))?.token_type)
	}

	fn peek_type2(&self) -> anyhow::Result<&TokenType> {
		Ok(&self.get(1).ok_or_else(|| anyhow::anyhow!("parse error: unexpected end of input"))?.token_type)
	}

	fn next_is(&self, token_type: TokenType) -> bool {
		self.front().map_or(false, |token| token.token_type == token_type)
	}
}

/// Parses a parenthesized, comma-separated list of things. The opening and closing parentheses are consumed by the macro, and the given block is run once
/// per list element. This is used for function parameters, call arguments, and task group member lists.
///
/// Trailing commas are currently not allowed in the language.
#[macro_export]
macro_rules! parse_list {
	(
		$tokens: expr, $body: block
	) => {
		$tokens.pop($crate::lexer::TokenType::LeftParenthesis)?;
		if !$tokens.next_is($crate::lexer::TokenType::RightParenthesis) {
			$body;
			while $tokens.next_is($crate::lexer::TokenType::Comma) {
				$tokens.pop($crate::lexer::TokenType::Comma)?;
				$body;
			}
		}
		$tokens.pop($crate::lexer::TokenType::RightParenthesis)?;
	};
}
