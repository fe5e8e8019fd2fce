use std::sync::Arc;

use colored::Colorize as _;

use crate::{
	lexer::TokenType,
	parser::{Parse, TokenQueue, TokenQueueFunctionality as _},
	runtime::{scope::Scope, value::Value, Evaluate},
};

/// A name in the language; A reference to a variable, function, task unit, or builtin.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct Name {
	name: String,
}

impl Name {
	/// Returns the name as it was written in the source code.
	#[must_use]
	pub fn as_str(&self) -> &str {
		&self.name
	}
}

impl Parse for Name {
	type Output = Self;

	fn parse(tokens: &mut TokenQueue) -> anyhow::Result<Self::Output> {
		Ok(Self {
			name: tokens
				.pop(TokenType::Identifier)
				.map_err(|error| anyhow::anyhow!("{error}\n\t{}", "while attempting to parse a name".dimmed()))?,
		})
	}
}

impl Evaluate for Name {
	fn evaluate(&self, scope: &Arc<Scope>) -> anyhow::Result<Value> {
		scope.lookup(&self.name).ok_or_else(|| {
			anyhow::anyhow!(
				"name error: nothing named \"{}\" is defined where it is referenced",
				self.name.bold().cyan()
			)
		})
	}
}
