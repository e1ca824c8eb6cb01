//! Error types for the message pipeline.
//!
//! None of these reach callers of the display path: they are converted into
//! displayed error messages by [`MessageContext`](crate::MessageContext).

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by message commands, redirection and configuration.
#[derive(Debug, Error)]
pub enum MessageError {
	/// A command received an argument it does not understand.
	#[error("E474: Invalid argument: {0}")]
	InvalidArgument(String),

	/// The verbose file could not be opened.
	#[error("E484: Can't open file {}", .path.display())]
	CannotOpen {
		/// Path of the file that failed to open.
		path: PathBuf,
		/// The underlying I/O error.
		#[source]
		error: std::io::Error,
	},

	/// Writing to a redirect target failed.
	#[error("cannot write to redirect target: {0}")]
	Redirect(#[source] std::io::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {}: {error}", .path.display())]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// A `:filter` pattern failed to compile.
	#[error("E383: Invalid search pattern: {0}")]
	InvalidFilter(#[from] regex::Error),

	/// Error parsing TOML options.
	#[error("options parse error: {0}")]
	Config(#[from] toml::de::Error),
}

impl MessageError {
	/// Message text shown to the user for this error.
	///
	/// Argument errors show only the error code line, without the offending
	/// argument, matching the command-line convention.
	pub fn display_text(&self) -> String {
		match self {
			Self::InvalidArgument(_) => "E474: Invalid argument".to_string(),
			other => other.to_string(),
		}
	}
}

/// Result type for message pipeline operations.
pub type Result<T> = std::result::Result<T, MessageError>;
