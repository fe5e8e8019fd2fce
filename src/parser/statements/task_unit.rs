use std::sync::Arc;

use colored::Colorize as _;

use crate::{
	lexer::TokenType,
	parser::{statements::function_declaration::FunctionDeclaration, Parse, TokenQueue, TokenQueueFunctionality as _},
	runtime::{scope::Scope, tasks::TaskUnit, value::Value, Execute},
};

/// A `taskunit` declaration: a class-like definition whose zero-argument methods, conventionally named `step1`, `step2`, and so on, are run in lockstep by
/// `parallelTasks` groups. Executing the declaration binds a constructor value in the current scope; Calling the constructor creates an instance carrying
/// its own environment, so methods on different instances don't share locals.
#[derive(Debug, Clone)]
pub struct TaskUnitDeclaration {
	/// The name of the task unit.
	pub name: String,
	/// The methods of the task unit, in declaration order.
	pub methods: Vec<FunctionDeclaration>,
}

impl Parse for TaskUnitDeclaration {
	type Output = Self;

	fn parse(tokens: &mut TokenQueue) -> anyhow::Result<Self::Output> {
		tokens.pop(TokenType::KeywordTaskUnit)?;
		let name = tokens.pop(TokenType::Identifier)?;
		tokens.pop(TokenType::LeftBrace)?;
		let mut methods = Vec::new();
		while tokens.next_is(TokenType::KeywordFunction) {
			let method = FunctionDeclaration::parse(tokens)?;
			if !method.parameters.is_empty() {
				anyhow::bail!(
					"parse error: the task unit method \"{}\" declares parameters, but task unit methods take none",
					method.name.bold().cyan()
				);
			}
			methods.push(method);
		}
		tokens.pop(TokenType::RightBrace)?;
		Ok(Self { name, methods })
	}
}

impl Execute for TaskUnitDeclaration {
	fn execute(&self, scope: &Arc<Scope>) -> anyhow::Result<()> {
		scope.declare(
			&self.name,
			Value::TaskUnit(Arc::new(TaskUnit {
				declaration: self.clone(),
				environment: Arc::clone(scope),
			})),
		);
		Ok(())
	}
}
