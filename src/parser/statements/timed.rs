use std::{sync::Arc, time::Instant};

use colored::Colorize as _;

use crate::{
	lexer::TokenType,
	parser::{
		expressions::literals::unquote_string_lexeme,
		statements::Statement,
		Parse, TokenQueue, TokenQueueFunctionality as _,
	},
	runtime::{scope::Scope, Execute},
};

/// A `@timed` annotation. The annotated statement is executed normally, and a single line reporting its wall-clock duration is emitted when it completes -
/// whether it completed normally or with an error.
///
/// The label is resolved at parse time: an explicit string argument (`@timed("setup")`) wins, and otherwise a label is derived from the target statement.
/// When the target is a `func` declaration, the annotation attaches to the *definition*, and every invocation of the function is timed.
#[derive(Debug, Clone)]
pub struct TimedStatement {
	/// The label printed in the report line.
	pub label: String,
	/// The annotated statement.
	pub target: Box<Statement>,
}

impl Parse for TimedStatement {
	type Output = Self;

	fn parse(tokens: &mut TokenQueue) -> anyhow::Result<Self::Output> {
		tokens.pop(TokenType::At)?;
		let (line, column) = tokens.peek().map_or((0, 0), |token| (token.line, token.column));
		let annotation = tokens.pop(TokenType::Identifier)?;
		if annotation != "timed" {
			anyhow::bail!(
				"parse error at {line}:{column}: unknown annotation \"@{}\"",
				annotation.bold().cyan()
			);
		}

		let explicit_label = if tokens.next_is(TokenType::LeftParenthesis) {
			tokens.pop(TokenType::LeftParenthesis).unwrap_or_else(|_| unreachable!());
			let label = unquote_string_lexeme(&tokens.pop(TokenType::String)?);
			tokens.pop(TokenType::RightParenthesis)?;
			Some(label)
		} else {
			None
		};

		let target = Statement::parse(tokens)?;
		if let Statement::Timed(_) = target {
			anyhow::bail!("parse error at {line}:{column}: @timed may not wrap another @timed");
		}

		Ok(Self {
			label: explicit_label.unwrap_or_else(|| target.derived_label()),
			target: Box::new(target),
		})
	}
}

impl Execute for TimedStatement {
	fn execute(&self, scope: &Arc<Scope>) -> anyhow::Result<()> {
		// Timing a function definition times its invocations, not the (instantaneous) act of defining it.
		if let Statement::FunctionDeclaration(declaration) = self.target.as_ref() {
			declaration.declare_with_label(scope, Some(self.label.clone()));
			return Ok(());
		}

		let start = Instant::now();
		let result = self.target.execute(scope);
		scope
			.output()
			.line(&format!("[TIMED: {}] {:.4}s", self.label, start.elapsed().as_secs_f64()));
		result
	}
}
