use std::{
	env,
	io::{self, Write},
	ops::Range,
	process::ExitCode,
};

use ariadne::{Color, Label, Report, ReportKind, Source};
use dicebot::{
	dice::roller::OsRand,
	parse,
	slack::{Identity, Response},
	BlockReport,
};
use tracing_subscriber::filter::EnvFilter;

/// Source ID used for diagnostics about the input
const SOURCE: &str = "input";

fn main() -> ExitCode {
	let filter = if env::var("RUST_LOG").is_ok() {
		EnvFilter::from_default_env()
	} else {
		EnvFilter::new("dicebot=warn")
	};
	tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();

	let mut json = false;
	let args = env::args()
		.skip(1)
		.filter(|arg| {
			let flag = arg == "--json";
			json |= flag;
			!flag
		})
		.collect::<Vec<_>>();

	// Combine all args so that the expression can be left unquoted even with spaces
	let input = if args.is_empty() {
		match read_line() {
			Ok(line) => line,
			Err(err) => {
				log::error!("unable to read input: {err}");
				return ExitCode::FAILURE;
			}
		}
	} else {
		args.join(" ")
	};

	warn_unmatched(&input);

	let reports = match parse::command(&input).report(&mut OsRand) {
		Ok(reports) => reports,
		Err(err) => {
			log::error!("unable to roll: {err}");
			return ExitCode::FAILURE;
		}
	};

	if json {
		let identity = Identity::new(
			env::var("DICEBOT_USER_ID").unwrap_or_default(),
			env::var("DICEBOT_USER_NAME").unwrap_or_else(|_| "you".to_owned()),
		);
		match serde_json::to_string_pretty(&Response::new(&identity, &reports)) {
			Ok(payload) => println!("{payload}"),
			Err(err) => {
				log::error!("unable to serialize response: {err}");
				return ExitCode::FAILURE;
			}
		}
	} else {
		reports.iter().for_each(print_report);
	}

	ExitCode::SUCCESS
}

/// Reads the first line from stdin, displaying a prompt for it if there isn't already input available.
fn read_line() -> io::Result<String> {
	let mut lines = io::stdin().lines();
	if lines.size_hint().1.is_none() {
		print!("Enter dice: ");
		io::stdout().flush()?;
	}
	lines.next().unwrap_or_else(|| Ok(String::new()))
}

/// Prints a block report in plain text.
fn print_report(report: &BlockReport) {
	let tag = report.quality.map_or("", |quality| quality.color());
	println!("{} [{tag}]", report.fallback);
	for field in report.diagnostics.iter().flat_map(|diag| diag.fields()) {
		println!("  {}: {}", field.title, field.value);
	}
}

/// Prints a warning for every piece of the input that was ignored.
fn warn_unmatched(input: &str) {
	let ranges = parse::unmatched(input);
	if ranges.is_empty() {
		return;
	}

	let mut report = Report::build(ReportKind::Warning, (SOURCE, char_range(input, 0..input.len())))
		.with_message("Some of the input was ignored");
	for range in ranges {
		report = report.with_label(
			Label::new((SOURCE, char_range(input, range)))
				.with_message("not dice, a number, or an operator")
				.with_color(Color::Yellow),
		);
	}

	if let Err(err) = report.finish().eprint((SOURCE, Source::from(input))) {
		log::warn!("unable to print diagnostics: {err}");
	}
}

/// Converts a byte range of the input into a character range.
fn char_range(input: &str, range: Range<usize>) -> Range<usize> {
	let start = input[..range.start].chars().count();
	start..start + input[range].chars().count()
}
