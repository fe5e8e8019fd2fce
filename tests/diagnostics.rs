//! Tests for the four error kinds: lex errors, parse errors, name errors, and runtime errors. Each is fatal to the program; These tests pin down the kind
//! named in the message and, for the front-end stages, the reported position.

mod common;

use common::run_err;
use unindent::unindent;

#[test]
fn unrecognized_characters_are_lex_errors_with_a_position() {
	let (error, _lines) = run_err("func main() { $ }");
	assert!(error.contains("lex error at 1:15"), "unexpected error: {error}");
	assert!(error.contains("unrecognized character"), "unexpected error: {error}");
}

#[test]
fn lex_error_positions_account_for_earlier_lines() {
	let (error, _lines) = run_err("func main() {\n    ~\n}");
	assert!(error.contains("lex error at 2:5"), "unexpected error: {error}");
}

#[test]
fn unterminated_strings_are_lex_errors() {
	let (error, _lines) = run_err(r#"func main() { print("oops) }"#);
	assert!(error.contains("unterminated string"), "unexpected error: {error}");
}

#[test]
fn grammar_violations_are_parse_errors() {
	let (error, _lines) = run_err("func main() { if true { } }");
	assert!(error.contains("parse error"), "unexpected error: {error}");
	assert!(error.contains("expected"), "unexpected error: {error}");
}

#[test]
fn method_access_without_a_call_is_a_parse_error() {
	let (error, _lines) = run_err("func main() { group.next; }");
	assert!(error.contains("parse error"), "unexpected error: {error}");
}

#[test]
fn unknown_annotations_are_parse_errors() {
	let (error, _lines) = run_err(r#"func main() { @traced print("x"); }"#);
	assert!(error.contains("unknown annotation"), "unexpected error: {error}");
}

#[test]
fn unbound_names_are_name_errors() {
	let (error, _lines) = run_err("func main() { print(mystery); }");
	assert!(error.contains("name error"), "unexpected error: {error}");
}

#[test]
fn wrong_arity_is_a_runtime_error() {
	let (error, _lines) = run_err(&unindent(
		r#"
		func pair(left, right) { }
		func main() { pair(1); }
		"#,
	));
	assert!(error.contains("runtime error"), "unexpected error: {error}");
	assert!(error.contains("expects 2 arguments"), "unexpected error: {error}");
}

#[test]
fn mixed_type_arithmetic_is_a_runtime_error() {
	let (error, _lines) = run_err(r#"func main() { print(1 + "one"); }"#);
	assert!(error.contains("cannot add"), "unexpected error: {error}");
}

#[test]
fn comparing_non_numbers_is_a_runtime_error() {
	let (error, _lines) = run_err(r#"func main() { print("a" < "b"); }"#);
	assert!(error.contains("requires Numbers"), "unexpected error: {error}");
}

#[test]
fn non_boolean_conditions_are_runtime_errors() {
	let (error, _lines) = run_err("func main() { if (1) { } }");
	assert!(error.contains("must be a Boolean"), "unexpected error: {error}");
}

#[test]
fn reversed_ranges_are_runtime_errors() {
	let (error, _lines) = run_err("func main() { loop i in 5..2 { } }");
	assert!(error.contains("reversed"), "unexpected error: {error}");
}

#[test]
fn fractional_range_bounds_are_runtime_errors() {
	let (error, _lines) = run_err("func main() { p loop i in 0..2.5 { } }");
	assert!(error.contains("must be an integer"), "unexpected error: {error}");
}

#[test]
fn calling_a_non_function_is_a_runtime_error() {
	let (error, _lines) = run_err("func main() { x = 1; x(); }");
	assert!(error.contains("not callable"), "unexpected error: {error}");
}

#[test]
fn a_program_without_main_is_a_runtime_error() {
	let (error, _lines) = run_err(r#"func helper() { print("never"); }"#);
	assert!(error.contains("main"), "unexpected error: {error}");
}

#[test]
fn main_bound_to_a_non_function_is_a_runtime_error() {
	let (error, _lines) = run_err("taskunit main { }");
	assert!(error.contains("not a function"), "unexpected error: {error}");
}

#[test]
fn task_unit_methods_with_parameters_are_parse_errors() {
	let (error, _lines) = run_err(&unindent(
		r#"
		taskunit Device {
			func step1(rate) { }
		}
		func main() { }
		"#,
	));
	assert!(error.contains("take none"), "unexpected error: {error}");
}
