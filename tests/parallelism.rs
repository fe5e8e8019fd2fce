//! Tests for parallel blocks and parallel loops: fan-out, join barriers, branch-local scoping, and error containment.

mod common;

use common::{position_of, run, run_err, run_ok};
use pretty_assertions::assert_eq;
use unindent::unindent;

#[test]
fn parallel_block_joins_before_the_sequence_continues() {
	let lines = run_ok(r#"func main() { p { print("x"); print("y"); } -> print("z"); }"#);
	assert_eq!(lines.len(), 3);
	// The relative order of "x" and "y" is unconstrained, but "z" must come strictly last.
	assert_eq!(lines.last().map(String::as_str), Some("z"));
	let _x = position_of(&lines, "x");
	let _y = position_of(&lines, "y");
}

#[test]
fn nesting_keeps_branches_internally_sequential() {
	let lines = run_ok(r#"func main() { p { print("1"); print("2") -> print("3"); } -> print("done"); }"#);
	assert_eq!(lines.len(), 4);
	assert!(position_of(&lines, "2") < position_of(&lines, "3"));
	assert_eq!(lines.last().map(String::as_str), Some("done"));
}

#[test]
fn parallel_and_p_are_synonyms() {
	let long_form = run_ok(r#"func main() { parallel { print("a"); } -> print("b"); }"#);
	let short_form = run_ok(r#"func main() { p { print("a"); } -> print("b"); }"#);
	assert_eq!(long_form, short_form);
	assert_eq!(long_form, vec!["a", "b"]);
}

#[test]
fn parallel_loop_runs_every_iteration() {
	let lines = run_ok(r#"func main() { p loop i in 0..6 { print(i); } -> print("done"); }"#);
	assert_eq!(lines.len(), 7);
	assert_eq!(lines.last().map(String::as_str), Some("done"));
	for iteration in 0..6 {
		let _position = position_of(&lines, &iteration.to_string());
	}
}

#[test]
fn empty_parallel_block_joins_immediately() {
	let lines = run_ok(r#"func main() { p { } -> print("after"); }"#);
	assert_eq!(lines, vec!["after"]);
}

#[test]
fn branches_read_the_enclosing_scope() {
	let lines = run_ok(&unindent(
		r#"
		func main() {
			shared = "visible";
			p { print(shared); } -> print("done");
		}
		"#,
	));
	assert_eq!(lines, vec!["visible", "done"]);
}

#[test]
fn branch_local_bindings_do_not_escape() {
	let (error, _lines) = run_err(r#"func main() { p { secret = 1; } -> print(secret); }"#);
	assert!(error.contains("name error"), "unexpected error: {error}");
}

#[test]
fn sibling_branches_finish_before_a_branch_error_propagates() {
	let (result, lines) = run(r#"func main() { p { print("ok"); fail(); } }"#);
	let error = format!("{:#}", result.expect_err("the failing branch should sink the program"));
	assert!(error.contains("name error"), "unexpected error: {error}");
	// The surviving branch ran to completion before the block re-raised.
	assert_eq!(lines, vec!["ok"]);
}

#[test]
fn deeply_nested_parallel_blocks_join_inside_out() {
	let lines = run_ok(&unindent(
		r#"
		func main() {
			p {
				p { print("inner"); } -> print("middle");
			} -> print("outer");
		}
		"#,
	));
	assert_eq!(lines, vec!["inner", "middle", "outer"]);
}

#[test]
fn sequence_heads_inside_branches_block_their_own_branch_only() {
	let lines = run_ok(&unindent(
		r#"
		func main() {
			p {
				print("a1") -> print("a2");
				print("b1") -> print("b2");
			} -> print("joined");
		}
		"#,
	));
	assert_eq!(lines.len(), 5);
	assert!(position_of(&lines, "a1") < position_of(&lines, "a2"));
	assert!(position_of(&lines, "b1") < position_of(&lines, "b2"));
	assert_eq!(lines.last().map(String::as_str), Some("joined"));
}
