use std::sync::Arc;

use crate::{
	lexer::TokenType,
	parser::{expressions::Expression, Parse, TokenQueue, TokenQueueFunctionality as _},
	runtime::{scope::Scope, Evaluate as _, Execute},
};

/// An assignment statement, such as `total = total + 1`. There are no declaration keywords in the language: assigning to a name that has no existing
/// binding creates one in the current scope, while assigning to a name that does resolves updates the nearest existing binding.
#[derive(Debug, Clone)]
pub struct Assignment {
	/// The name being assigned to.
	pub name: String,
	/// The expression whose value is assigned.
	pub value: Expression,
}

impl Parse for Assignment {
	type Output = Self;

	fn parse(tokens: &mut TokenQueue) -> anyhow::Result<Self::Output> {
		let name = tokens.pop(TokenType::Identifier)?;
		tokens.pop(TokenType::Equal)?;
		let value = Expression::parse(tokens)?;
		Ok(Self { name, value })
	}
}

impl Execute for Assignment {
	fn execute(&self, scope: &Arc<Scope>) -> anyhow::Result<()> {
		let value = self.value.evaluate(scope)?;
		scope.assign(&self.name, value);
		Ok(())
	}
}
