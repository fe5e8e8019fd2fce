//! # DICE
//!
//! An interpreter for DICE, a small imperative language whose defining feature is structured parallelism: programs compose `parallel` and sequential
//! fragments freely, nest them arbitrarily, and attach `@timed` annotations to measure the wall-clock duration of any such fragment.
//!
//! Running a program is a three-stage pipeline: the lexer segments source text into tokens, the parser builds an abstract syntax tree from them, and the
//! interpreter walks that tree, executing `main()` in the top-level environment.

use std::sync::Arc;

use crate::runtime::output::OutputSink;

/// The lexer module, which tokenizes source code into a stream of tokens.
pub mod lexer;

/// The parser module, which parses a stream of tokens into an abstract syntax tree.
pub mod parser;

/// The runtime module, which walks the abstract syntax tree: it evaluates expressions, executes statements, manages parallel branches, and implements
/// `@timed` and `parallelTasks`.
pub mod runtime;

/// Runs a string of DICE source code through the full pipeline: tokenize, parse, and execute, with the program's output going to the given sink.
///
/// # Errors
/// The first error of whichever stage fails first: a lex error, a parse error, or a name/runtime error raised while the program runs.
pub fn interpret(code: &str, output: &Arc<OutputSink>) -> anyhow::Result<()> {
	let mut tokens = lexer::tokenize(code)?;
	let program = parser::parse(&mut tokens)?;
	program.run(output)
}
