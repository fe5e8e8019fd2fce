use std::path::PathBuf;

// Bring the `Parser` trait into scope from `clap`, which allows parsing argument structs from the command line. We assign it to underscore to indicate
// clearly that it's not used outside of bringing its trait methods into scope.
use clap::Parser as _;
use colored::Colorize as _;

use dice_language::runtime::output::OutputSink;

/// The command-line arguments for the interpreter.
#[derive(clap::Parser)]
#[command(name = "dice", about = "Run a DICE program.", version)]
struct DiceArguments {
	/// The path of the DICE source file to run.
	path: PathBuf,
}

/// The main entry point for the DICE interpreter. This parses the arguments passed at the command line, runs the given source file through the pipeline,
/// and exits non-zero if any stage of it fails.
fn main() {
	let arguments = DiceArguments::parse();
	if let Err(error) = run(&arguments.path) {
		eprintln!("{} {error:#}", "Error:".bold().red());
		std::process::exit(1);
	}
}

fn run(path: &std::path::Path) -> anyhow::Result<()> {
	let code = std::fs::read_to_string(path).map_err(|error| anyhow::anyhow!("couldn't read \"{}\": {error}", path.display()))?;
	dice_language::interpret(&code, &OutputSink::standard())
}
