use std::sync::Arc;

use crate::{
	lexer::TokenType,
	parser::{statements::Statement, Parse, TokenQueue, TokenQueueFunctionality as _},
	runtime::{scope::Scope, Execute},
};

/// A braced block of statements. Blocks are statement units, so a plain `{ ... }` can appear anywhere a statement can, including as an operand of `->` and
/// as the target of `@timed`.
#[derive(Debug, Clone)]
pub struct Block {
	/// The statements in the block, in source order.
	pub statements: Vec<Statement>,
}

impl Parse for Block {
	type Output = Self;

	fn parse(tokens: &mut TokenQueue) -> anyhow::Result<Self::Output> {
		tokens.pop(TokenType::LeftBrace)?;
		let mut statements = Vec::new();
		while !tokens.next_is(TokenType::RightBrace) {
			statements.push(Statement::parse(tokens)?);
		}
		tokens.pop(TokenType::RightBrace)?;
		Ok(Self { statements })
	}
}

impl Execute for Block {
	fn execute(&self, scope: &Arc<Scope>) -> anyhow::Result<()> {
		// Names assigned inside a block for the first time stay local to it.
		let inner = Scope::child_of(scope);
		for statement in &self.statements {
			statement.execute(&inner)?;
		}
		Ok(())
	}
}
