use dice_language::runtime::output::OutputSink;

/// Runs a DICE program against a captured output sink, returning the pipeline result and the lines the program wrote.
pub fn run(source: &str) -> (anyhow::Result<()>, Vec<String>) {
	let output = OutputSink::captured();
	let result = dice_language::interpret(source, &output);
	let lines = output.lines();
	(result, lines)
}

/// Runs a DICE program that is expected to succeed, returning the lines it wrote.
pub fn run_ok(source: &str) -> Vec<String> {
	let (result, lines) = run(source);
	if let Err(error) = result {
		panic!("the program should have run cleanly, but failed with: {error}\noutput so far: {lines:#?}");
	}
	lines
}

/// Runs a DICE program that is expected to fail, returning the error's full text and the lines written before the failure.
pub fn run_err(source: &str) -> (String, Vec<String>) {
	let (result, lines) = run(source);
	match result {
		Ok(()) => panic!("the program should have failed, but ran cleanly\noutput: {lines:#?}"),
		Err(error) => (format!("{error:#}"), lines),
	}
}

/// The index of the first line equal to `needle`, panicking with the full output when it never appears.
pub fn position_of(lines: &[String], needle: &str) -> usize {
	lines
		.iter()
		.position(|line| line == needle)
		.unwrap_or_else(|| panic!("expected a line \"{needle}\" in the output, but got: {lines:#?}"))
}
