use clap::Parser;
use doctag_cli::DoctagCli;
use doctag_cli::run;
use owo_colors::OwoColorize;
use owo_colors::Stream;
use tracing_subscriber::EnvFilter;

fn main() -> miette::Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.with_writer(std::io::stderr)
		.init();

	let args = DoctagCli::parse();
	let count = run(&args)?;

	println!(
		"Documented {} source file(s).",
		count.if_supports_color(Stream::Stdout, |count| count.bold())
	);

	Ok(())
}
