//! Tests for task units, their instances, and the stepwise synchronization of `parallelTasks` groups.

mod common;

use common::{position_of, run, run_err, run_ok};
use pretty_assertions::assert_eq;
use unindent::unindent;

fn two_device_program(drive: &str) -> String {
	unindent(&format!(
		r#"
		taskunit DeviceA {{
			func step1() {{ print("A1"); }}
			func step2() {{ print("A2"); }}
		}}
		taskunit DeviceB {{
			func step1() {{ print("B1"); }}
			func step2() {{ print("B2"); }}
		}}
		func main() {{
			{drive}
		}}
		"#
	))
}

#[test]
fn next_is_a_barrier_between_steps() {
	let lines = run_ok(&two_device_program(
		r#"group = parallelTasks(DeviceA(), DeviceB()); group.next(); group.next();"#,
	));
	assert_eq!(lines.len(), 4);
	let first_step_done = position_of(&lines, "A1").max(position_of(&lines, "B1"));
	let second_step_started = position_of(&lines, "A2").min(position_of(&lines, "B2"));
	assert!(
		first_step_done < second_step_started,
		"a step-2 line appeared before step 1 finished: {lines:#?}"
	);
}

#[test]
fn groups_chain_directly_off_the_builtin() {
	let lines = run_ok(&unindent(
		r#"
		taskunit Solo {
			func step1() { print("only"); }
		}
		func main() { parallelTasks(Solo()).next(); }
		"#,
	));
	assert_eq!(lines, vec!["only"]);
}

#[test]
fn members_missing_a_step_are_skipped_silently() {
	let lines = run_ok(&unindent(
		r#"
		taskunit Long {
			func step1() { print("L1"); }
			func step2() { print("L2"); }
		}
		taskunit Short {
			func step1() { print("S1"); }
		}
		func main() {
			group = parallelTasks(Long(), Short());
			group.next();
			group.next();
		}
		"#,
	));
	assert_eq!(lines.len(), 3);
	let _l1 = position_of(&lines, "L1");
	let _s1 = position_of(&lines, "S1");
	assert_eq!(lines.last().map(String::as_str), Some("L2"));
}

#[test]
fn exhausted_groups_raise() {
	let (result, lines) = run(&unindent(
		r#"
		taskunit Single {
			func step1() { print("ran"); }
		}
		func main() {
			group = parallelTasks(Single());
			group.next();
			group.next();
		}
		"#,
	));
	let error = format!("{:#}", result.expect_err("the second next() should find no step2 anywhere"));
	assert!(error.contains("exhausted"), "unexpected error: {error}");
	assert_eq!(lines, vec!["ran"]);
}

#[test]
fn instances_keep_state_between_steps() {
	let lines = run_ok(&unindent(
		r#"
		taskunit Counter {
			func step1() { seen = "step one ran"; }
			func step2() { print(seen); }
		}
		func main() {
			group = parallelTasks(Counter());
			group.next();
			group.next();
		}
		"#,
	));
	assert_eq!(lines, vec!["step one ran"]);
}

#[test]
fn instances_do_not_share_state() {
	let (error, _lines) = run_err(&unindent(
		r#"
		taskunit Leaky {
			func step1() { secret = 1; }
		}
		func main() {
			parallelTasks(Leaky()).next();
			other = Leaky();
			other.peek();
		}
		"#,
	));
	assert!(error.contains("no method named"), "unexpected error: {error}");
}

#[test]
fn method_calls_on_instances_work_outside_groups() {
	let lines = run_ok(&unindent(
		r#"
		taskunit Device {
			func step1() { print("stepped"); }
		}
		func main() {
			device = Device();
			device.step1();
		}
		"#,
	));
	assert_eq!(lines, vec!["stepped"]);
}

#[test]
fn unknown_methods_raise() {
	let (error, _lines) = run_err(&unindent(
		r#"
		taskunit Device {
			func step1() { }
		}
		func main() { Device().warmup(); }
		"#,
	));
	assert!(error.contains("no method named"), "unexpected error: {error}");
}

#[test]
fn parallel_tasks_rejects_non_instances() {
	let (error, _lines) = run_err(r#"func main() { parallelTasks(1); }"#);
	assert!(error.contains("task unit instance"), "unexpected error: {error}");
}

#[test]
fn parallel_tasks_requires_at_least_one_member() {
	let (error, _lines) = run_err(r#"func main() { parallelTasks(); }"#);
	assert!(error.contains("at least one"), "unexpected error: {error}");
}
