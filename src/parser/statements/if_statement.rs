use std::sync::Arc;

use colored::Colorize as _;

use crate::{
	lexer::TokenType,
	parser::{
		expressions::Expression,
		statements::block::Block,
		Parse, TokenQueue, TokenQueueFunctionality as _,
	},
	runtime::{scope::Scope, value::Value, Evaluate as _, Execute},
};

/// An `if` statement, with an optional `else` block.
#[derive(Debug, Clone)]
pub struct IfStatement {
	/// The condition, which must evaluate to a boolean.
	pub condition: Expression,
	/// The block run when the condition is true.
	pub body: Block,
	/// The block run when the condition is false, if present.
	pub else_body: Option<Block>,
}

impl Parse for IfStatement {
	type Output = Self;

	fn parse(tokens: &mut TokenQueue) -> anyhow::Result<Self::Output> {
		tokens.pop(TokenType::KeywordIf)?;
		tokens.pop(TokenType::LeftParenthesis)?;
		let condition = Expression::parse(tokens)?;
		tokens.pop(TokenType::RightParenthesis)?;
		let body = Block::parse(tokens)?;
		let else_body = if tokens.next_is(TokenType::KeywordElse) {
			tokens.pop(TokenType::KeywordElse).unwrap_or_else(|_| unreachable!());
			Some(Block::parse(tokens)?)
		} else {
			None
		};
		Ok(Self { condition, body, else_body })
	}
}

impl Execute for IfStatement {
	fn execute(&self, scope: &Arc<Scope>) -> anyhow::Result<()> {
		let condition = match self.condition.evaluate(scope)? {
			Value::Boolean(value) => value,
			other => anyhow::bail!(
				"runtime error: an if condition must be a Boolean, but got {}",
				other.type_name().bold().cyan()
			),
		};

		if condition {
			self.body.execute(scope)
		} else if let Some(else_body) = &self.else_body {
			else_body.execute(scope)
		} else {
			Ok(())
		}
	}
}
