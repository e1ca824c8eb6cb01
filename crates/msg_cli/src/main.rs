//! `xeno-msg`: drives the message pipeline from the command line.
//!
//! UI events are printed to stdout as JSON lines; logs go to stderr.

mod cli;
mod script;
mod sink;

use std::io;
use std::path::Path;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Command};
use sink::JsonSink;
use tracing::info;
use xeno_messages::{MessageContext, MessageOptions, truncate_to_width};

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	setup_tracing(cli.verbose);

	let options = match &cli.config {
		Some(path) => MessageOptions::load(path).with_context(|| format!("loading options from {}", path.display()))?,
		None => MessageOptions::default(),
	};

	match cli.command {
		Command::Truncate { text, room, capacity } => {
			println!("{}", truncate_to_width(&text, room, capacity));
		}
		Command::Confirm {
			message,
			buttons,
			default,
			keys,
		} => {
			let mut ctx = MessageContext::new(options);
			let mut sink = JsonSink::new(io::stdout().lock());
			let choice = ctx.confirm(&mut sink, script::parse_keys(&keys), &message, &buttons.join("\n"), default);
			sink.write_value(&serde_json::json!({ "event": "confirm_choice", "choice": choice }));
			sink.finish()?;
		}
		Command::Replay { script: path } => {
			let input = if path == Path::new("-") {
				io::read_to_string(io::stdin()).context("reading script from stdin")?
			} else {
				std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?
			};
			let steps = script::parse(&input)?;
			info!(steps = steps.len(), "replaying message script");

			let mut ctx = MessageContext::new(options);
			let mut sink = JsonSink::new(io::stdout().lock());
			script::run(&mut ctx, &mut sink, &steps);
			sink.finish()?;
		}
	}

	Ok(())
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_env("XENO_MSG_LOG")
		.or_else(|_| EnvFilter::try_from_default_env())
		.unwrap_or_else(|_| {
			if verbose {
				EnvFilter::new("xeno_messages=trace,xeno_msg=debug,info")
			} else {
				EnvFilter::new("warn")
			}
		});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(io::stderr)
		.with_target(true)
		.init();
}
