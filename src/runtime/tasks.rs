use std::sync::{Arc, Mutex};

use colored::Colorize as _;

use crate::{
	parser::statements::{function_declaration::FunctionDeclaration, task_unit::TaskUnitDeclaration},
	runtime::{
		join_branches,
		scope::{lock, Scope},
		Execute as _,
	},
};

/// A task unit constructor value, bound by executing a `taskunit` declaration. It pairs the declaration's method table with the environment the declaration
/// was executed in, which becomes the lexical parent of every instance's environment.
pub struct TaskUnit {
	/// The declaration this constructor was created from.
	pub declaration: TaskUnitDeclaration,
	/// The environment the declaration was executed in.
	pub environment: Arc<Scope>,
}

impl TaskUnit {
	/// The name of the task unit.
	#[must_use]
	pub fn name(&self) -> &str {
		&self.declaration.name
	}

	/// Creates a new instance of this task unit, with a fresh per-instance environment.
	#[must_use]
	pub fn instantiate(self: &Arc<Self>) -> Arc<TaskInstance> {
		Arc::new(TaskInstance {
			unit: Arc::clone(self),
			environment: Scope::child_of(&self.environment),
		})
	}
}

/// An instance of a task unit. Instances carry their method table (through their unit) and an environment of their own, so state a method leaves behind is
/// visible to the instance's later methods but not to other instances.
pub struct TaskInstance {
	/// The task unit this is an instance of.
	pub unit: Arc<TaskUnit>,
	/// The instance's own environment, a child of the unit's defining environment.
	pub environment: Arc<Scope>,
}

impl TaskInstance {
	/// The name of the task unit this is an instance of.
	#[must_use]
	pub fn unit_name(&self) -> &str {
		self.unit.name()
	}

	/// Looks up a method of this instance by name.
	#[must_use]
	pub fn method(&self, name: &str) -> Option<&FunctionDeclaration> {
		self.unit.declaration.methods.iter().find(|method| method.name == name)
	}

	/// Invokes a method of this instance. The method body runs directly against the instance's environment, so a name a method assigns for the first time
	/// lands there and is visible to the instance's later methods.
	pub fn invoke(&self, name: &str) -> anyhow::Result<()> {
		let method = self.method(name).ok_or_else(|| {
			anyhow::anyhow!(
				"runtime error: no method named \"{}\" is defined on the task unit \"{}\"",
				name.bold().cyan(),
				self.unit_name().bold().cyan()
			)
		})?;
		for statement in &method.body.statements {
			statement.execute(&self.environment)?;
		}
		Ok(())
	}
}

/// A stepwise-synchronized group of task instances, created by the `parallelTasks` builtin.
///
/// The group acts as a barrier per step: each `next()` call runs the current step's method on every member that defines it, concurrently, and returns only
/// once all of them have finished. Users write sequential code at the group level - `group.next(); group.next();` - and get fan-out within each step
/// without touching threading primitives.
pub struct TaskGroup {
	/// The members of the group, in the order they were given to `parallelTasks`.
	pub members: Vec<Arc<TaskInstance>>,
	/// The number of the step the next `next()` call will run, starting at 1.
	cursor: Mutex<usize>,
}

impl TaskGroup {
	/// Creates a group over the given members with its cursor at step 1.
	#[must_use]
	pub fn new(members: Vec<Arc<TaskInstance>>) -> Self {
		Self { members, cursor: Mutex::new(1) }
	}

	/// Runs the current step: every member that defines `step<cursor>` runs it in its own concurrent branch, and the call returns once all branches have
	/// joined. Members without the method are skipped silently - the group does not require equal step counts - but when *no* member defines the step, the
	/// group is exhausted and an error is raised.
	pub fn next(&self) -> anyhow::Result<()> {
		let step = *lock(&self.cursor);
		let step_name = format!("step{step}");

		let branches: Vec<_> = self
			.members
			.iter()
			.filter(|member| member.method(&step_name).is_some())
			.map(|member| {
				let step_name = step_name.clone();
				move || member.invoke(&step_name)
			})
			.collect();

		if branches.is_empty() {
			anyhow::bail!(
				"runtime error: the parallel task group is exhausted: no member defines \"{}\"",
				step_name.bold().cyan()
			);
		}

		join_branches(branches)?;
		*lock(&self.cursor) += 1;
		Ok(())
	}
}
