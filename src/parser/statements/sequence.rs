use std::sync::Arc;

use crate::{
	lexer::TokenType,
	parser::{
		expressions::Expression,
		statements::{
			assignment::Assignment,
			block::Block,
			if_statement::IfStatement,
			parallel::{ParallelBlock, ParallelRangeLoop},
			range_loop::RangeLoop,
			ExpressionStatement, Statement,
		},
		Parse, TokenQueue, TokenQueueFunctionality as _,
	},
	runtime::{scope::Scope, Execute},
};

/// A `head -> tail` sequence statement. The tail starts executing only once the head has fully completed; In particular, when the head is a parallel block,
/// all of its branches join before the tail starts.
///
/// `->` is right-associative, so a chain like `a -> b -> c` parses as `a -> (b -> c)`, and the interpreter effectively treats the right-leaning nesting as
/// an ordered list.
#[derive(Debug, Clone)]
pub struct SequenceStatement {
	/// The unit that runs first.
	pub head: Box<Statement>,
	/// The unit (or nested sequence) that runs after the head completes.
	pub tail: Box<Statement>,
}

impl Parse for SequenceStatement {
	type Output = Statement;

	fn parse(tokens: &mut TokenQueue) -> anyhow::Result<Self::Output> {
		let mut units = vec![parse_sequence_unit(tokens)?];
		while tokens.next_is(TokenType::Arrow) {
			tokens.pop(TokenType::Arrow)?;
			units.push(parse_sequence_unit(tokens)?);
		}

		// Fold the units into a right-leaning chain.
		let mut statement = units.pop().unwrap_or_else(|| unreachable!());
		while let Some(head) = units.pop() {
			statement = Statement::Sequence(Self {
				head: Box::new(head),
				tail: Box::new(statement),
			});
		}
		Ok(statement)
	}
}

/// Parses a single operand of the `->` operator: a block expression (`p { ... }`, `p loop`, `if`, `loop`, or a plain block), an assignment, or an
/// expression statement.
fn parse_sequence_unit(tokens: &mut TokenQueue) -> anyhow::Result<Statement> {
	Ok(match tokens.peek_type()? {
		TokenType::KeywordParallel | TokenType::KeywordP => {
			if tokens.peek_type2()? == &TokenType::KeywordLoop {
				Statement::ParallelLoop(ParallelRangeLoop::parse(tokens)?)
			} else {
				Statement::Parallel(ParallelBlock::parse(tokens)?)
			}
		},
		TokenType::KeywordIf => Statement::If(IfStatement::parse(tokens)?),
		TokenType::KeywordLoop => Statement::Loop(RangeLoop::parse(tokens)?),
		TokenType::LeftBrace => Statement::Block(Block::parse(tokens)?),
		TokenType::Identifier if tokens.peek_type2().map_or(false, |token_type| token_type == &TokenType::Equal) => {
			Statement::Assignment(Assignment::parse(tokens)?)
		},
		_ => Statement::Expression(ExpressionStatement {
			expression: Expression::parse(tokens)?,
		}),
	})
}

impl Execute for SequenceStatement {
	fn execute(&self, scope: &Arc<Scope>) -> anyhow::Result<()> {
		self.head.execute(scope)?;
		self.tail.execute(scope)
	}
}
