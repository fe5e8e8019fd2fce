use std::sync::Arc;

use colored::Colorize as _;

use crate::{
	lexer::TokenType,
	parse_list,
	parser::{
		expressions::{operators::PrimaryExpression, Expression},
		Parse, TokenQueue, TokenQueueFunctionality as _,
	},
	runtime::{scope::Scope, value::Value, Evaluate},
};

/// A function call expression. The callee may be any expression, though in practice it is almost always a name; Calling a task unit's name constructs a new
/// instance of it.
#[derive(Debug, Clone)]
pub struct FunctionCall {
	/// The expression being called.
	pub function: Box<Expression>,
	/// The argument expressions, which are evaluated left-to-right at call time.
	pub arguments: Vec<Expression>,
}

/// A method call expression, such as `group.next()`. Method access in DICE is always immediately called; There is no way to reference a method without
/// calling it, so `receiver.name` not followed by an argument list is a parse error.
#[derive(Debug, Clone)]
pub struct MethodCall {
	/// The expression whose method is being called.
	pub receiver: Box<Expression>,
	/// The name of the method.
	pub name: String,
	/// The argument expressions. All methods in the language currently take zero arguments, but arguments are still parsed (and then rejected at call time)
	/// so that the error is friendlier than a grammar error.
	pub arguments: Vec<Expression>,
}

/// The postfix operators: function calls and method calls, which bind tighter than any unary or binary operator.
pub struct PostfixOperators;

impl Parse for PostfixOperators {
	type Output = Expression;

	fn parse(tokens: &mut TokenQueue) -> anyhow::Result<Self::Output> {
		// Primary expression
		let mut expression = PrimaryExpression::parse(tokens)?;

		// Postfix call and method-call operators
		loop {
			if tokens.next_is(TokenType::LeftParenthesis) {
				let mut arguments = Vec::new();
				parse_list!(tokens, {
					arguments.push(Expression::parse(tokens)?);
				});
				expression = Expression::FunctionCall(FunctionCall {
					function: Box::new(expression),
					arguments,
				});
			} else if tokens.next_is(TokenType::Dot) {
				tokens.pop(TokenType::Dot)?;
				let name = tokens.pop(TokenType::Identifier)?;
				let mut arguments = Vec::new();
				parse_list!(tokens, {
					arguments.push(Expression::parse(tokens)?);
				});
				expression = Expression::MethodCall(MethodCall {
					receiver: Box::new(expression),
					name,
					arguments,
				});
			} else {
				return Ok(expression);
			}
		}
	}
}

impl Evaluate for FunctionCall {
	fn evaluate(&self, scope: &Arc<Scope>) -> anyhow::Result<Value> {
		let callee = self.function.evaluate(scope)?;

		let mut arguments = Vec::new();
		for argument in &self.arguments {
			arguments.push(argument.evaluate(scope)?);
		}

		match callee {
			Value::Function(function) => function.call(arguments, scope),
			Value::TaskUnit(unit) => {
				if !arguments.is_empty() {
					anyhow::bail!(
						"runtime error: the task unit \"{}\" takes no construction arguments, but {} were given",
						unit.name().bold().cyan(),
						arguments.len()
					);
				}
				Ok(Value::TaskInstance(unit.instantiate()))
			},
			other => anyhow::bail!("runtime error: a {} is not callable", other.type_name().bold().cyan()),
		}
	}
}

impl Evaluate for MethodCall {
	fn evaluate(&self, scope: &Arc<Scope>) -> anyhow::Result<Value> {
		let receiver = self.receiver.evaluate(scope)?;

		let mut arguments = Vec::new();
		for argument in &self.arguments {
			arguments.push(argument.evaluate(scope)?);
		}
		if !arguments.is_empty() {
			anyhow::bail!(
				"runtime error: the method \"{}\" takes no arguments, but {} were given",
				self.name.bold().cyan(),
				arguments.len()
			);
		}

		match receiver {
			Value::TaskGroup(group) => {
				if self.name != "next" {
					anyhow::bail!(
						"runtime error: no method named \"{}\" is defined on parallel task groups",
						self.name.bold().cyan()
					);
				}
				group.next()?;
				Ok(Value::Unit)
			},
			Value::TaskInstance(instance) => {
				instance.invoke(&self.name)?;
				Ok(Value::Unit)
			},
			other => anyhow::bail!("runtime error: a {} has no methods", other.type_name().bold().cyan()),
		}
	}
}
