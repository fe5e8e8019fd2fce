use std::sync::Arc;

use colored::Colorize as _;
use rand::Rng as _;

use crate::runtime::{
	scope::Scope,
	tasks::TaskGroup,
	value::Value,
};

/// A function provided by the host rather than declared by the program. The interpreter sees builtins only through this uniform interface: a name and a
/// callable taking the evaluated arguments plus the caller's scope (which is how builtins reach the output sink).
pub struct BuiltinFunction {
	/// The name the builtin is bound to in the global scope.
	name: &'static str,
	/// The host implementation of the builtin.
	evaluate: fn(&[Value], &Arc<Scope>) -> anyhow::Result<Value>,
}

impl BuiltinFunction {
	/// The name the builtin is bound to in the global scope.
	#[must_use]
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Calls the builtin with already-evaluated arguments.
	pub fn call(&self, arguments: &[Value], scope: &Arc<Scope>) -> anyhow::Result<Value> {
		(self.evaluate)(arguments, scope).map_err(|error| {
			anyhow::anyhow!(
				"{error}\n\t{}",
				format!("while calling the built-in function \"{}\"", self.name.bold().cyan()).dimmed()
			)
		})
	}
}

/// The built-in functions every DICE program can reach. The global scope is seeded from this map before the program's own declarations execute.
pub(crate) static BUILTINS: phf::Map<&'static str, BuiltinFunction> = phf::phf_map! {
	"print" => BuiltinFunction {
		name: "print",
		evaluate: |arguments: &[Value], scope: &Arc<Scope>| {
			let text = arguments.iter().map(Value::to_display_string).collect::<Vec<_>>().join(" ");
			scope.output().line(&text);
			Ok(Value::Unit)
		},
	},
	"sleep" => BuiltinFunction {
		name: "sleep",
		evaluate: |arguments: &[Value], _scope: &Arc<Scope>| {
			let seconds = expect_duration(arguments.first(), "sleep")?;
			std::thread::sleep(std::time::Duration::from_secs_f64(seconds));
			Ok(Value::Unit)
		},
	},
	"mock_sensor" => BuiltinFunction {
		name: "mock_sensor",
		evaluate: |arguments: &[Value], scope: &Arc<Scope>| {
			let label = match arguments.first() {
				Some(Value::String(label)) => label.clone(),
				Some(other) => anyhow::bail!("runtime error: mock_sensor's label must be a String, but got {}", other.type_name().bold().cyan()),
				None => anyhow::bail!("runtime error: mock_sensor expects a label and a delay, but no arguments were given"),
			};
			let delay = expect_duration(arguments.get(1), "mock_sensor")?;
			std::thread::sleep(std::time::Duration::from_secs_f64(delay));
			let reading = rand::thread_rng().gen_range(0.0..100.0);
			scope.output().line(&format!("[{label}] センサー値: {reading:.2}"));
			Ok(Value::Unit)
		},
	},
	"parallelTasks" => BuiltinFunction {
		name: "parallelTasks",
		evaluate: |arguments: &[Value], _scope: &Arc<Scope>| {
			if arguments.is_empty() {
				anyhow::bail!("runtime error: parallelTasks expects at least one task unit instance");
			}
			let mut members = Vec::with_capacity(arguments.len());
			for argument in arguments {
				match argument {
					Value::TaskInstance(instance) => members.push(Arc::clone(instance)),
					other => anyhow::bail!(
						"runtime error: every argument to parallelTasks must be a task unit instance, but got a {}",
						other.type_name().bold().cyan()
					),
				}
			}
			Ok(Value::TaskGroup(Arc::new(TaskGroup::new(members))))
		},
	},
};

/// Reads a non-negative number of seconds out of an optional argument, for the builtins that block the calling branch.
fn expect_duration(argument: Option<&Value>, builtin: &str) -> anyhow::Result<f64> {
	match argument {
		Some(Value::Number(seconds)) if seconds.is_finite() && *seconds >= 0.0 => Ok(*seconds),
		Some(Value::Number(seconds)) => anyhow::bail!("runtime error: {builtin} cannot wait {seconds} seconds"),
		Some(other) => anyhow::bail!(
			"runtime error: {builtin}'s duration must be a Number of seconds, but got {}",
			other.type_name().bold().cyan()
		),
		None => anyhow::bail!("runtime error: {builtin} expects a duration in seconds, but none was given"),
	}
}
