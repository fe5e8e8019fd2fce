//! Tests for the `@timed` annotation: label derivation, one line per execution, and emission on the error path.

mod common;

use common::{position_of, run, run_err, run_ok};
use pretty_assertions::assert_eq;
use unindent::unindent;

#[test]
fn timed_block_reports_its_duration() {
	let lines = run_ok(r#"func main() { @timed { sleep(0.1); } }"#);
	assert_eq!(lines.len(), 1);
	assert!(
		regex_macro::regex!(r"^\[TIMED: block\] 0\.1\d{3}s$").is_match(&lines[0]),
		"unexpected report line: {}",
		lines[0]
	);
}

#[test]
fn explicit_labels_replace_derived_ones() {
	let lines = run_ok(r#"func main() { @timed("setup") { print("working"); } }"#);
	assert_eq!(lines.len(), 2);
	assert_eq!(lines[0], "working");
	assert!(lines[1].starts_with("[TIMED: setup] "), "unexpected report line: {}", lines[1]);
}

#[test]
fn parallel_targets_derive_the_parallel_label() {
	let lines = run_ok(r#"func main() { @timed p { print("x"); } }"#);
	assert!(lines[1].starts_with("[TIMED: parallel] "), "unexpected report line: {}", lines[1]);
}

#[test]
fn call_targets_derive_the_callee_name() {
	let lines = run_ok(r#"func main() { @timed print("hi"); }"#);
	assert_eq!(lines[0], "hi");
	assert!(lines[1].starts_with("[TIMED: print] "), "unexpected report line: {}", lines[1]);
}

#[test]
fn timed_function_definitions_time_every_invocation() {
	let lines = run_ok(&unindent(
		r#"
		@timed func work() { print("w"); }
		func main() { work() -> work(); }
		"#,
	));
	let reports = lines.iter().filter(|line| line.starts_with("[TIMED: function] ")).count();
	assert_eq!(reports, 2);
	assert_eq!(lines.iter().filter(|line| line.as_str() == "w").count(), 2);
}

#[test]
fn nested_timed_blocks_report_one_line_per_level() {
	let lines = run_ok(&unindent(
		r#"
		func main() {
			@timed("outer") {
				@timed("inner") { print("x"); }
			}
		}
		"#,
	));
	assert_eq!(lines.len(), 3);
	assert_eq!(lines[0], "x");
	// The inner target completes first, so its report precedes the outer one.
	assert!(lines[1].starts_with("[TIMED: inner] "));
	assert!(lines[2].starts_with("[TIMED: outer] "));
}

#[test]
fn timed_reports_even_when_the_target_fails() {
	let (result, lines) = run(r#"func main() { @timed { explode(); } }"#);
	let error = format!("{:#}", result.expect_err("the target's name error should still propagate"));
	assert!(error.contains("name error"), "unexpected error: {error}");
	assert_eq!(lines.len(), 1);
	assert!(lines[0].starts_with("[TIMED: block] "), "unexpected report line: {}", lines[0]);
}

#[test]
fn timed_may_not_wrap_another_timed() {
	let (error, _lines) = run_err(r#"func main() { @timed @timed print("x"); }"#);
	assert!(error.contains("may not wrap"), "unexpected error: {error}");
}

#[test]
fn timed_sequences_report_after_the_whole_chain() {
	let lines = run_ok(r#"func main() { @timed("chain") print("a") -> print("b"); }"#);
	assert_eq!(lines.len(), 3);
	assert_eq!(position_of(&lines, "a"), 0);
	assert_eq!(position_of(&lines, "b"), 1);
	assert!(lines[2].starts_with("[TIMED: chain] "));
}
