use std::{sync::Arc, time::Instant};

use colored::Colorize as _;

use crate::{
	parser::statements::block::Block,
	runtime::{
		builtin::BuiltinFunction,
		scope::Scope,
		tasks::{TaskGroup, TaskInstance, TaskUnit},
		Execute as _,
	},
};

/// A value a DICE expression evaluates to.
#[derive(Clone)]
pub enum Value {
	/// A number; DICE numbers are IEEE-754 doubles.
	Number(f64),
	/// A string.
	String(String),
	/// A boolean.
	Boolean(bool),
	/// A callable function; Either one declared by the program or one provided by the host.
	Function(Function),
	/// A task unit constructor, bound by a `taskunit` declaration. Calling it creates a `TaskInstance`.
	TaskUnit(Arc<TaskUnit>),
	/// An instance of a task unit, carrying its own environment.
	TaskInstance(Arc<TaskInstance>),
	/// A stepwise-synchronized group of task instances, created by `parallelTasks`.
	TaskGroup(Arc<TaskGroup>),
	/// The result of statements and of calls to functions that produce nothing.
	Unit,
}

impl Value {
	/// The name of this value's type, as shown in error messages.
	#[must_use]
	pub fn type_name(&self) -> &'static str {
		match self {
			Self::Number(_) => "Number",
			Self::String(_) => "String",
			Self::Boolean(_) => "Boolean",
			Self::Function(_) => "Function",
			Self::TaskUnit(_) => "TaskUnit",
			Self::TaskInstance(_) => "TaskInstance",
			Self::TaskGroup(_) => "TaskGroup",
			Self::Unit => "Unit",
		}
	}

	/// The string form of this value, as printed by the `print` builtin. Integer-valued numbers print without a trailing `.0`, so `loop` counters and
	/// arithmetic on whole numbers read naturally.
	#[must_use]
	pub fn to_display_string(&self) -> String {
		match self {
			Self::Number(number) => {
				// Doubles represent integers exactly up to 2^53; Past that, fall back to the float form rather than print a rounded integer.
				if number.fract() == 0.0 && number.abs() < 9_007_199_254_740_992.0 {
					format!("{}", *number as i64)
				} else {
					number.to_string()
				}
			},
			Self::String(string) => string.clone(),
			Self::Boolean(boolean) => boolean.to_string(),
			Self::Function(function) => format!("<function {}>", function.name()),
			Self::TaskUnit(unit) => format!("<taskunit {}>", unit.name()),
			Self::TaskInstance(instance) => format!("<{} instance>", instance.unit_name()),
			Self::TaskGroup(_) => "<parallel task group>".to_owned(),
			Self::Unit => "unit".to_owned(),
		}
	}
}

// Primitives compare by value; Functions, task units, task instances, and task groups compare by object identity.
impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Number(left), Self::Number(right)) => left == right,
			(Self::String(left), Self::String(right)) => left == right,
			(Self::Boolean(left), Self::Boolean(right)) => left == right,
			(Self::Function(left), Self::Function(right)) => left.is_same(right),
			(Self::TaskUnit(left), Self::TaskUnit(right)) => Arc::ptr_eq(left, right),
			(Self::TaskInstance(left), Self::TaskInstance(right)) => Arc::ptr_eq(left, right),
			(Self::TaskGroup(left), Self::TaskGroup(right)) => Arc::ptr_eq(left, right),
			(Self::Unit, Self::Unit) => true,
			_ => false,
		}
	}
}

impl std::fmt::Debug for Value {
	fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		// Function environments can refer back to the scope the function is bound in, so a derived debug representation would recurse forever; The display
		// string is finite and is what error messages want anyway.
		write!(formatter, "{}", self.to_display_string())
	}
}

/// A callable function value.
#[derive(Clone)]
pub enum Function {
	/// A function declared by the program with `func`.
	Declared(Arc<DeclaredFunction>),
	/// A function provided by the host, such as `print`.
	Builtin(&'static BuiltinFunction),
}

/// A function declared by the program, closed over its defining environment.
pub struct DeclaredFunction {
	/// The name the function was declared with.
	pub name: String,
	/// The parameter names, in declaration order.
	pub parameters: Vec<String>,
	/// The body of the function.
	pub body: Arc<Block>,
	/// The environment the function was declared in. Free names in the body resolve through this, not through the caller's environment.
	pub environment: Arc<Scope>,
	/// When present, the function was declared under `@timed`, and every invocation reports its duration under this label.
	pub timed_label: Option<String>,
}

impl Function {
	/// The name of the function.
	#[must_use]
	pub fn name(&self) -> &str {
		match self {
			Self::Declared(function) => &function.name,
			Self::Builtin(builtin) => builtin.name(),
		}
	}

	/// Whether this and the other function are the same function object.
	#[must_use]
	pub fn is_same(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Declared(left), Self::Declared(right)) => Arc::ptr_eq(left, right),
			(Self::Builtin(left), Self::Builtin(right)) => std::ptr::eq(*left, *right),
			_ => false,
		}
	}

	/// Calls the function with the given arguments. Declared functions get a fresh frame derived from their *defining* environment with the arguments bound
	/// positionally; Builtins are handed the arguments and the caller's scope directly.
	pub fn call(&self, arguments: Vec<Value>, caller_scope: &Arc<Scope>) -> anyhow::Result<Value> {
		match self {
			Self::Builtin(builtin) => builtin.call(&arguments, caller_scope),
			Self::Declared(function) => {
				if arguments.len() != function.parameters.len() {
					anyhow::bail!(
						"runtime error: \"{}\" expects {} arguments, but {} were given",
						function.name.bold().cyan(),
						function.parameters.len(),
						arguments.len()
					);
				}

				let frame = Scope::child_of(&function.environment);
				for (parameter, argument) in function.parameters.iter().zip(arguments) {
					frame.declare(parameter, argument);
				}

				// A function declared under @timed reports every invocation, including ones that fail.
				if let Some(label) = &function.timed_label {
					let start = Instant::now();
					let result = function.body.execute(&frame);
					frame
						.output()
						.line(&format!("[TIMED: {label}] {:.4}s", start.elapsed().as_secs_f64()));
					result?;
				} else {
					function.body.execute(&frame)?;
				}

				Ok(Value::Unit)
			},
		}
	}
}
