//! Tests for the `->` sequencing operator and ordinary sequential control flow.

mod common;

use common::{run_err, run_ok};
use pretty_assertions::assert_eq;
use unindent::unindent;

#[test]
fn arrow_chain_runs_left_to_right() {
	let lines = run_ok(r#"func main() { print("a") -> print("b") -> print("c"); }"#);
	assert_eq!(lines, vec!["a", "b", "c"]);
}

#[test]
fn arrow_chains_associate_observably() {
	// Grouping the chain with plain blocks must not change the observed side-effect order.
	let left = run_ok(r#"func main() { { print("a") -> print("b") } -> print("c"); }"#);
	let right = run_ok(r#"func main() { print("a") -> { print("b") -> print("c") }; }"#);
	assert_eq!(left, right);
	assert_eq!(left, vec!["a", "b", "c"]);
}

#[test]
fn statements_run_in_source_order() {
	let lines = run_ok(&unindent(
		r#"
		func main() {
			print("first");
			print("second")
			print("third");
		}
		"#,
	));
	assert_eq!(lines, vec!["first", "second", "third"]);
}

#[test]
fn range_loop_iterates_in_order_over_half_open_range() {
	let lines = run_ok(r#"func main() { loop i in 0..4 { print(i); } }"#);
	assert_eq!(lines, vec!["0", "1", "2", "3"]);
}

#[test]
fn range_loop_bounds_may_be_expressions() {
	let lines = run_ok(&unindent(
		r#"
		func main() {
			n = 2;
			loop i in n..n + 3 { print(i); }
		}
		"#,
	));
	assert_eq!(lines, vec!["2", "3", "4"]);
}

#[test]
fn empty_range_loop_runs_zero_times() {
	let lines = run_ok(r#"func main() { loop i in 3..3 { print(i); } print("done"); }"#);
	assert_eq!(lines, vec!["done"]);
}

#[test]
fn loop_variable_is_scoped_to_the_loop() {
	let (error, _lines) = run_err(r#"func main() { loop i in 0..2 { } print(i); }"#);
	assert!(error.contains("name error"), "unexpected error: {error}");
}

#[test]
fn if_else_picks_one_branch() {
	let lines = run_ok(&unindent(
		r#"
		func main() {
			if (1 < 2) { print("then"); } else { print("else"); }
			if (1 > 2) { print("then"); } else { print("else"); }
			if (1 > 2) { print("silent"); }
		}
		"#,
	));
	assert_eq!(lines, vec!["then", "else"]);
}

#[test]
fn assignment_updates_the_nearest_existing_binding() {
	let lines = run_ok(&unindent(
		r#"
		func main() {
			total = 1;
			{ total = total + 10; }
			print(total);
		}
		"#,
	));
	assert_eq!(lines, vec!["11"]);
}

#[test]
fn first_assignment_in_a_block_stays_local_to_it() {
	let (error, _lines) = run_err(r#"func main() { { fresh = 1; } print(fresh); }"#);
	assert!(error.contains("name error"), "unexpected error: {error}");
}

#[test]
fn functions_resolve_free_names_lexically() {
	let lines = run_ok(&unindent(
		r#"
		greeting = "from the definition scope"
		func show() { print(greeting); }
		func shadow(greeting) { show(); }
		func main() { shadow("from the caller"); }
		"#,
	));
	// Under dynamic scoping `show` would see `shadow`'s parameter; Under lexical scoping it sees the global.
	assert_eq!(lines, vec!["from the definition scope"]);
}

#[test]
fn assignment_from_a_function_reaches_the_global_binding() {
	let lines = run_ok(&unindent(
		r#"
		counter = 0
		func bump() { counter = counter + 1; }
		func main() { bump() -> bump() -> print(counter); }
		"#,
	));
	assert_eq!(lines, vec!["2"]);
}

#[test]
fn arguments_bind_positionally() {
	let lines = run_ok(&unindent(
		r#"
		func describe(name, value) { print(name + " is " + value); }
		func main() { describe("left", "first") -> describe("right", "second"); }
		"#,
	));
	assert_eq!(lines, vec!["left is first", "right is second"]);
}
