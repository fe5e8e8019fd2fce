use std::sync::Arc;

use crate::{
	lexer::TokenType,
	parser::{
		expressions::Expression,
		statements::{
			block::Block,
			range_loop::{evaluate_range_bounds, parse_range_loop_header},
		},
		Parse, TokenQueue, TokenQueueFunctionality as _,
	},
	runtime::{join_branches, scope::Scope, value::Value, Execute},
};

/// A parallel block, written `p { ... }` or `parallel { ... }`. Each immediate statement of the body is a concurrency root: the block spawns one branch per
/// immediate child, runs them concurrently, and completes only once every branch has joined. Nesting inside a branch stays sequential: a `->` chain that is
/// one of the children runs in order within its branch.
#[derive(Debug, Clone)]
pub struct ParallelBlock {
	/// The block whose immediate children become branches.
	pub body: Block,
}

impl Parse for ParallelBlock {
	type Output = Self;

	fn parse(tokens: &mut TokenQueue) -> anyhow::Result<Self::Output> {
		pop_parallel_keyword(tokens)?;
		Ok(Self { body: Block::parse(tokens)? })
	}
}

impl Execute for ParallelBlock {
	fn execute(&self, scope: &Arc<Scope>) -> anyhow::Result<()> {
		let branches = self
			.body
			.statements
			.iter()
			.map(|statement| {
				// Each branch gets its own child frame, so sibling branches never race on local binding creation.
				let branch_scope = Scope::child_of(scope);
				move || statement.execute(&branch_scope)
			})
			.collect();
		join_branches(branches)
	}
}

/// A parallel loop over an integer range, written `p loop i in 0..4 { ... }`. Unlike a sequential loop, all iterations run concurrently: one branch is
/// spawned per iteration value, and the loop completes once every branch has joined.
#[derive(Debug, Clone)]
pub struct ParallelRangeLoop {
	/// The name of the loop variable.
	pub variable: String,
	/// The expression for the inclusive lower bound of the range.
	pub lower: Expression,
	/// The expression for the exclusive upper bound of the range.
	pub upper: Expression,
	/// The body run by each branch.
	pub body: Block,
}

impl Parse for ParallelRangeLoop {
	type Output = Self;

	fn parse(tokens: &mut TokenQueue) -> anyhow::Result<Self::Output> {
		pop_parallel_keyword(tokens)?;
		let (variable, lower, upper, body) = parse_range_loop_header(tokens)?;
		Ok(Self { variable, lower, upper, body })
	}
}

impl Execute for ParallelRangeLoop {
	fn execute(&self, scope: &Arc<Scope>) -> anyhow::Result<()> {
		let (lower, upper) = evaluate_range_bounds(&self.lower, &self.upper, scope)?;
		let body = &self.body;
		let branches = (lower..upper)
			.map(|iteration| {
				let branch_scope = Scope::child_of(scope);
				branch_scope.declare(&self.variable, Value::Number(iteration as f64));
				move || body.execute(&branch_scope)
			})
			.collect();
		join_branches(branches)
	}
}

/// Consumes the keyword introducing a parallel construct; `p` and `parallel` are synonyms.
fn pop_parallel_keyword(tokens: &mut TokenQueue) -> anyhow::Result<()> {
	if tokens.next_is(TokenType::KeywordP) {
		tokens.pop(TokenType::KeywordP)?;
	} else {
		tokens.pop(TokenType::KeywordParallel)?;
	}
	Ok(())
}
