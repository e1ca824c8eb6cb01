use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "xeno-msg")]
#[command(about = "Drive the xeno message pipeline and print UI events as JSON lines")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Message options file (TOML)
	#[arg(short, long, value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Verbose logging
	#[arg(short, long)]
	pub verbose: bool,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// Fit text into a number of terminal cells
	Truncate {
		/// Text to shorten
		text: String,

		/// Cells available
		#[arg(short, long)]
		room: usize,

		/// Maximum output size in bytes
		#[arg(long, default_value_t = 1024)]
		capacity: usize,
	},
	/// Show a confirm dialog and resolve it from scripted keys
	Confirm {
		/// Question shown above the buttons
		message: String,

		/// Button label; `&` marks the hotkey (repeat for each button)
		#[arg(short, long = "button", required = true)]
		buttons: Vec<String>,

		/// 1-based default button
		#[arg(short, long, default_value_t = 1)]
		default: usize,

		/// Keys typed, e.g. `xn` or `<CR>`
		#[arg(short, long, default_value = "")]
		keys: String,
	},
	/// Run a message script and print every UI event
	Replay {
		/// Script file, `-` for stdin
		script: PathBuf,
	},
}
