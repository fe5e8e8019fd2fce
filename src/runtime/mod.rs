use std::sync::Arc;

use colored::Colorize as _;

use crate::{
	parser::{
		expressions::{
			function_call::{FunctionCall, MethodCall},
			literals::{BooleanLiteral, NumberLiteral, StringLiteral},
			name::Name,
			operators::{BinaryExpression, UnaryExpression},
			Expression,
		},
		statements::{
			assignment::Assignment,
			block::Block,
			function_declaration::FunctionDeclaration,
			if_statement::IfStatement,
			parallel::{ParallelBlock, ParallelRangeLoop},
			range_loop::RangeLoop,
			sequence::SequenceStatement,
			task_unit::TaskUnitDeclaration,
			timed::TimedStatement,
			ExpressionStatement,
			Statement,
		},
		Program,
	},
	runtime::{output::OutputSink, scope::Scope, value::Value},
};

/// The `builtin` module, which holds the host-provided built-in functions.
pub mod builtin;
/// The `output` module, which handles the shared output sink that `print` and `@timed` write to.
pub mod output;
/// The `scope` module, which handles the chained environment frames that names resolve through.
pub mod scope;
/// The `tasks` module, which handles task units, their instances, and stepwise-synchronized task groups.
pub mod tasks;
/// The `value` module, which defines the runtime values DICE expressions evaluate to.
pub mod value;

/// A trait for evaluating an expression node to a value. Evaluation may block: an expression may call a function whose body contains parallel blocks, in
/// which case it completes only after every spawned branch has joined.
#[enum_dispatch::enum_dispatch]
pub trait Evaluate {
	/// Evaluates this expression in the given scope.
	fn evaluate(&self, scope: &Arc<Scope>) -> anyhow::Result<Value>;
}

/// A trait for executing a statement node for its effects. Like evaluation, execution may block until spawned branches join.
#[enum_dispatch::enum_dispatch]
pub trait Execute {
	/// Executes this statement in the given scope.
	fn execute(&self, scope: &Arc<Scope>) -> anyhow::Result<()>;
}

impl Program {
	/// Runs this program: executes the top-level statements in order, binding the program's declarations into a fresh global scope, and then invokes `main`
	/// with no arguments. All output of the run - `print` lines, `[TIMED: ...]` report lines, and sensor readings - goes through the given sink.
	///
	/// # Errors
	/// Any runtime or name error raised by the program, including the case where the program never defines `main`.
	pub fn run(&self, output: &Arc<OutputSink>) -> anyhow::Result<()> {
		let globals = Scope::global(output);
		for statement in &self.statements {
			statement.execute(&globals)?;
		}

		match globals.lookup("main") {
			Some(Value::Function(function)) => function.call(Vec::new(), &globals).map(|_value| ()),
			Some(other) => anyhow::bail!(
				"runtime error: \"{}\" is defined, but it is a {}, not a function",
				"main".bold().cyan(),
				other.type_name().bold().cyan()
			),
			None => anyhow::bail!("runtime error: the program defines no \"{}\" function", "main".bold().cyan()),
		}
	}
}

/// Runs the given branches concurrently, one thread per branch, and waits for all of them to finish. When branches fail, the error of the *first* failed
/// branch in join order is returned and the errors of later branches are discarded; Either way, every branch has finished by the time this returns.
pub(crate) fn join_branches<Branch>(branches: Vec<Branch>) -> anyhow::Result<()>
where
	Branch: FnOnce() -> anyhow::Result<()> + Send,
{
	let results: Vec<anyhow::Result<()>> = std::thread::scope(|threads| {
		let handles: Vec<_> = branches.into_iter().map(|branch| threads.spawn(branch)).collect();
		handles
			.into_iter()
			.map(|handle| handle.join().unwrap_or_else(|_| Err(anyhow::anyhow!("runtime error: a parallel branch panicked"))))
			.collect()
	});

	results.into_iter().collect::<anyhow::Result<Vec<_>>>()?;
	Ok(())
}
