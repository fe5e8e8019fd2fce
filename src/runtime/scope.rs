use std::{
	collections::HashMap,
	sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::runtime::{
	output::OutputSink,
	value::{Function, Value},
};

/// A single frame in the chain of scopes that names resolve through. Each frame maps names to values and points at the frame it was derived from; A lookup
/// walks outward to the first binding, and an assignment updates the nearest existing binding or, when there is none, creates one in the current frame.
///
/// Frames are reference-counted: function values keep their defining frame alive (that's what makes closures work), and parallel branches each derive a
/// fresh child frame of the spawning one, so sibling branches never contend over local binding creation. The bindings themselves sit behind a mutex because
/// the language *permits* assigning to an outer binding from inside a branch - the effect is racy and the user's responsibility, but it must not be unsound.
pub struct Scope {
	/// The bindings of this frame.
	bindings: Mutex<HashMap<String, Value>>,
	/// The frame this one was derived from, or `None` for the global frame.
	parent: Option<Arc<Scope>>,
	/// The sink that output produced under this frame goes to.
	output: Arc<OutputSink>,
}

impl Scope {
	/// Creates a global frame seeded with the built-in functions, writing output to the given sink.
	#[must_use]
	pub fn global(output: &Arc<OutputSink>) -> Arc<Self> {
		let scope = Self {
			bindings: Mutex::new(HashMap::new()),
			parent: None,
			output: Arc::clone(output),
		};
		for (name, builtin) in crate::runtime::builtin::BUILTINS.entries() {
			lock(&scope.bindings).insert((*name).to_owned(), Value::Function(Function::Builtin(builtin)));
		}
		Arc::new(scope)
	}

	/// Creates a frame whose lookups fall back to the given parent frame.
	#[must_use]
	pub fn child_of(parent: &Arc<Self>) -> Arc<Self> {
		Arc::new(Self {
			bindings: Mutex::new(HashMap::new()),
			parent: Some(Arc::clone(parent)),
			output: Arc::clone(&parent.output),
		})
	}

	/// Resolves a name to a value, walking outward to the first frame that binds it.
	#[must_use]
	pub fn lookup(&self, name: &str) -> Option<Value> {
		let mut scope = self;
		loop {
			if let Some(value) = lock(&scope.bindings).get(name) {
				return Some(value.clone());
			}
			match &scope.parent {
				Some(parent) => scope = parent,
				None => return None,
			}
		}
	}

	/// Binds a name in this frame, shadowing any binding of the same name in outer frames.
	pub fn declare(&self, name: &str, value: Value) {
		lock(&self.bindings).insert(name.to_owned(), value);
	}

	/// Assigns to a name: the nearest existing binding is updated, and if no frame binds the name, a new binding is created in this frame.
	pub fn assign(&self, name: &str, value: Value) {
		let mut scope = self;
		loop {
			{
				let mut bindings = lock(&scope.bindings);
				if let Some(slot) = bindings.get_mut(name) {
					*slot = value;
					return;
				}
			}
			match &scope.parent {
				Some(parent) => scope = parent,
				None => break,
			}
		}
		lock(&self.bindings).insert(name.to_owned(), value);
	}

	/// The sink that output produced under this frame goes to.
	#[must_use]
	pub fn output(&self) -> &Arc<OutputSink> {
		&self.output
	}
}

/// Locks a mutex, recovering the guard when the mutex was poisoned. A poisoned frame means some parallel branch panicked mid-write; The language already
/// declares cross-branch writes racy, so the surviving branches just keep going with whatever value landed.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
	mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
