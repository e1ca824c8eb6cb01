//! Options consumed by the message pipeline.
//!
//! Options are plain data; the editor's option store owns them and hands a
//! snapshot to [`MessageContext`](crate::MessageContext). A TOML form is
//! accepted for standalone use:
//!
//! ```toml
//! history-cap = 500
//! report = 0
//! verbose-file = "/tmp/xeno-verbose.log"
//! debug = "msg"
//!
//! [highlights]
//! error = 41
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{MessageError, Result};
use crate::highlight::HighlightTable;
use crate::history::DEFAULT_HISTORY_CAP;

/// Message pipeline options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct MessageOptions {
	/// Number of history entries kept before the oldest are evicted.
	pub history_cap: usize,
	/// Line-count threshold above which "N more lines" is reported.
	pub report: u32,
	/// File receiving a copy of all messages; messages sent through
	/// [`verbose`](crate::MessageContext::verbose) are silenced on screen
	/// while it is set.
	pub verbose_file: Option<PathBuf>,
	/// Debug flags. `m` shows errors even when they are switched off, `t`
	/// additionally lets them throw.
	pub debug: String,
	/// Cells available for a message that is kept for redisplay after a
	/// redraw. Longer messages are not kept.
	pub keep_width: usize,
	/// Highlight attribute ids used by the pipeline.
	pub highlights: HighlightTable,
}

impl Default for MessageOptions {
	fn default() -> Self {
		Self {
			history_cap: DEFAULT_HISTORY_CAP,
			report: 2,
			verbose_file: None,
			debug: String::new(),
			keep_width: 80,
			highlights: HighlightTable::default(),
		}
	}
}

impl MessageOptions {
	/// Parses options from TOML. Missing keys keep their defaults.
	pub fn from_toml_str(input: &str) -> Result<Self> {
		Ok(toml::from_str(input)?)
	}

	/// Reads and parses an options file.
	pub fn load(path: &Path) -> Result<Self> {
		let input = std::fs::read_to_string(path).map_err(|error| MessageError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&input)
	}

	/// Returns whether the debug option contains `flag`.
	pub fn has_debug_flag(&self, flag: char) -> bool {
		self.debug.contains(flag)
	}
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use super::*;
	use crate::highlight::HlAttr;

	#[test]
	fn empty_input_yields_defaults() {
		assert_eq!(MessageOptions::from_toml_str("").unwrap(), MessageOptions::default());
	}

	#[test]
	fn parses_kebab_case_keys_and_highlights() {
		let opts = MessageOptions::from_toml_str(
			r#"
			history-cap = 5
			report = 0
			verbose-file = "/tmp/verbose.log"
			debug = "mt"

			[highlights]
			error = 41
			"#,
		)
		.unwrap();
		assert_eq!(opts.history_cap, 5);
		assert_eq!(opts.report, 0);
		assert_eq!(opts.verbose_file, Some(PathBuf::from("/tmp/verbose.log")));
		assert!(opts.has_debug_flag('m'));
		assert!(opts.has_debug_flag('t'));
		assert_eq!(opts.highlights.error, HlAttr(41));
		assert_eq!(opts.highlights.warning, HighlightTable::default().warning);
	}

	#[test]
	fn invalid_toml_is_a_config_error() {
		let err = MessageOptions::from_toml_str("history-cap = \"lots\"").unwrap_err();
		assert!(matches!(err, MessageError::Config(_)));
	}

	#[test]
	fn load_reads_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "report = 7").unwrap();
		let opts = MessageOptions::load(file.path()).unwrap();
		assert_eq!(opts.report, 7);
	}

	#[test]
	fn load_missing_file_reports_path() {
		let err = MessageOptions::load(Path::new("/nonexistent/xeno/messages.toml")).unwrap_err();
		assert!(err.to_string().contains("/nonexistent/xeno/messages.toml"));
	}
}
