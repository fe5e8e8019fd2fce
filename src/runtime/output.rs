use std::sync::{Arc, Mutex};

use crate::runtime::scope::lock;

/// The single textual sink that a running program writes its observable output to: `print` lines, `[TIMED: ...]` report lines, and sensor readings.
///
/// Parallel branches share one sink, and each line is written with a single locked operation, so one branch's line is never interleaved mid-character with
/// another's. The *order* of lines across branches is whatever order the branches reach the sink in; The language deliberately makes no promise about it.
pub enum OutputSink {
	/// Writes each line to the process's standard output.
	Standard,
	/// Collects lines in memory. This is what tests run programs against, so they can assert on output ordering without capturing the process's stdout.
	Captured(Mutex<Vec<String>>),
}

impl OutputSink {
	/// Creates a sink that writes to the process's standard output.
	#[must_use]
	pub fn standard() -> Arc<Self> {
		Arc::new(Self::Standard)
	}

	/// Creates a sink that collects lines in memory, retrievable with `lines()`.
	#[must_use]
	pub fn captured() -> Arc<Self> {
		Arc::new(Self::Captured(Mutex::new(Vec::new())))
	}

	/// Writes a single line to the sink.
	pub fn line(&self, text: &str) {
		match self {
			Self::Standard => {
				use std::io::Write as _;
				let mut stdout = std::io::stdout().lock();
				let _ = writeln!(stdout, "{text}");
			},
			Self::Captured(lines) => lock(lines).push(text.to_owned()),
		}
	}

	/// Returns a copy of the lines written so far. A standard sink has already handed its lines to the terminal, so it returns nothing.
	#[must_use]
	pub fn lines(&self) -> Vec<String> {
		match self {
			Self::Standard => Vec::new(),
			Self::Captured(lines) => lock(lines).clone(),
		}
	}
}
