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

/// A sequential loop over an integer range, such as `loop i in 0..5 { ... }`. The range is half-open: the loop variable takes each value from the lower
/// bound up to, but not including, the upper bound.
#[derive(Debug, Clone)]
pub struct RangeLoop {
	/// The name of the loop variable.
	pub variable: String,
	/// The expression for the inclusive lower bound of the range.
	pub lower: Expression,
	/// The expression for the exclusive upper bound of the range.
	pub upper: Expression,
	/// The loop body.
	pub body: Block,
}

impl Parse for RangeLoop {
	type Output = Self;

	fn parse(tokens: &mut TokenQueue) -> anyhow::Result<Self::Output> {
		let (variable, lower, upper, body) = parse_range_loop_header(tokens)?;
		Ok(Self { variable, lower, upper, body })
	}
}

/// Parses `loop IDENT in lower..upper { ... }`, which is shared between sequential and parallel range loops; The `p`/`parallel` keyword of the latter has
/// already been consumed by the time this is called.
pub(crate) fn parse_range_loop_header(tokens: &mut TokenQueue) -> anyhow::Result<(String, Expression, Expression, Block)> {
	tokens.pop(TokenType::KeywordLoop)?;
	let variable = tokens.pop(TokenType::Identifier)?;
	tokens.pop(TokenType::KeywordIn)?;
	let lower = Expression::parse(tokens)?;
	tokens.pop(TokenType::DotDot)?;
	let upper = Expression::parse(tokens)?;
	let body = Block::parse(tokens)?;
	Ok((variable, lower, upper, body))
}

/// Evaluates the two bounds of a loop range. Both must be integer-valued numbers and the lower bound must not exceed the upper one.
pub(crate) fn evaluate_range_bounds(lower: &Expression, upper: &Expression, scope: &Arc<Scope>) -> anyhow::Result<(i64, i64)> {
	let lower = expect_integer_bound(lower.evaluate(scope)?)?;
	let upper = expect_integer_bound(upper.evaluate(scope)?)?;
	if lower > upper {
		anyhow::bail!("runtime error: the loop range {lower}..{upper} is reversed: its lower bound is greater than its upper bound");
	}
	Ok((lower, upper))
}

fn expect_integer_bound(value: Value) -> anyhow::Result<i64> {
	match value {
		Value::Number(number) if number.fract() == 0.0 => Ok(number as i64),
		Value::Number(number) => anyhow::bail!("runtime error: a loop bound must be an integer, but got {number}"),
		other => anyhow::bail!("runtime error: a loop bound must be a Number, but got {}", other.type_name().bold().cyan()),
	}
}

impl Execute for RangeLoop {
	fn execute(&self, scope: &Arc<Scope>) -> anyhow::Result<()> {
		let (lower, upper) = evaluate_range_bounds(&self.lower, &self.upper, scope)?;
		for iteration in lower..upper {
			// The loop variable is re-bound in a fresh frame each iteration, so the body never observes a stale binding.
			let frame = Scope::child_of(scope);
			frame.declare(&self.variable, Value::Number(iteration as f64));
			self.body.execute(&frame)?;
		}
		Ok(())
	}
}
