//! Copies of message output outside the presentation layer.
//!
//! Three destinations are supported: an in-memory capture buffer (used while
//! evaluating a command for its output), an external [`RedirectTarget`]
//! (register, file or variable, owned by the caller) and the verbose file.
//! Output is padded to the current message column so redirected text lines up
//! with what the message area shows.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{MessageError, Result};

/// External destination for redirected messages.
pub trait RedirectTarget {
	fn write(&mut self, text: &str) -> io::Result<()>;
}

impl RedirectTarget for String {
	fn write(&mut self, text: &str) -> io::Result<()> {
		self.push_str(text);
		Ok(())
	}
}

#[derive(Debug, Default)]
struct VerboseFile {
	path: Option<PathBuf>,
	file: Option<File>,
	/// Set after the first open attempt so a failure is reported only once.
	did_open: bool,
}

impl VerboseFile {
	fn open(&mut self) -> Result<()> {
		if self.file.is_some() || self.did_open {
			return Ok(());
		}
		self.did_open = true;
		let Some(path) = self.path.as_deref() else {
			return Ok(());
		};
		match OpenOptions::new().create(true).append(true).open(path) {
			Ok(file) => {
				tracing::debug!(path = %path.display(), "opened verbose file");
				self.file = Some(file);
				Ok(())
			}
			Err(error) => Err(MessageError::CannotOpen {
				path: path.to_path_buf(),
				error,
			}),
		}
	}

	fn stop(&mut self) {
		self.file = None;
		self.did_open = false;
	}
}

/// Redirection state for one message context.
#[derive(Default)]
pub struct Redirection {
	capture: Option<String>,
	target: Option<Box<dyn RedirectTarget>>,
	verbose: VerboseFile,
	off: bool,
	/// Column of the redirected output, used for padding.
	col: usize,
}

impl std::fmt::Debug for Redirection {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Redirection")
			.field("capture", &self.capture)
			.field("target", &self.target.is_some())
			.field("verbose", &self.verbose)
			.field("off", &self.off)
			.field("col", &self.col)
			.finish()
	}
}

impl Redirection {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns whether any destination is active.
	pub fn is_active(&self) -> bool {
		self.capture.is_some() || self.target.is_some() || self.verbose.path.is_some()
	}

	/// Replaces the external redirect target.
	pub fn set_target(&mut self, target: Option<Box<dyn RedirectTarget>>) {
		self.target = target;
	}

	/// Starts capturing output into a fresh buffer.
	pub fn start_capture(&mut self) {
		self.capture = Some(String::new());
	}

	/// Stops capturing and returns what was captured.
	pub fn take_capture(&mut self) -> Option<String> {
		self.capture.take()
	}

	/// Sets or clears the verbose file. The file is opened on the next write.
	pub fn set_verbose_file(&mut self, path: Option<PathBuf>) {
		self.verbose.stop();
		self.verbose.path = path;
	}

	pub fn verbose_file(&self) -> Option<&Path> {
		self.verbose.path.as_deref()
	}

	/// Closes the verbose file; the next write reopens it.
	pub fn verbose_stop(&mut self) {
		self.verbose.stop();
	}

	/// Suspends redirection, e.g. while drawing prompts.
	pub fn set_off(&mut self, off: bool) {
		self.off = off;
	}

	/// Writes `text` to every active destination.
	///
	/// `msg_col` is the length of the message being built; text that does not
	/// start a new line is padded with spaces up to it. A destination that
	/// fails is disabled and the failure returned, so it is reported once.
	pub fn write(&mut self, text: &str, msg_col: usize) -> Result<()> {
		if text.is_empty() || self.off {
			return Ok(());
		}

		let mut failure = if self.verbose.path.is_some() {
			self.verbose.open().err()
		} else {
			None
		};

		if !self.is_active() {
			return failure.map_or(Ok(()), Err);
		}

		if !text.starts_with(['\n', '\r']) && self.col < msg_col {
			let pad = " ".repeat(msg_col - self.col);
			self.emit(&pad, &mut failure);
			self.col = msg_col;
		}

		self.emit(text, &mut failure);
		for c in text.chars() {
			self.col = match c {
				'\r' | '\n' => 0,
				'\t' => self.col + (8 - self.col % 8),
				_ => self.col + 1,
			};
		}

		failure.map_or(Ok(()), Err)
	}

	fn emit(&mut self, text: &str, failure: &mut Option<MessageError>) {
		if let Some(capture) = self.capture.as_mut() {
			capture.push_str(text);
		} else if let Some(target) = self.target.as_mut()
			&& let Err(error) = target.write(text)
		{
			tracing::warn!(%error, "redirect target failed, disabling");
			self.target = None;
			failure.get_or_insert(MessageError::Redirect(error));
		}

		if let Some(file) = self.verbose.file.as_mut()
			&& let Err(error) = file.write_all(text.as_bytes())
		{
			tracing::warn!(%error, "verbose file write failed, closing");
			self.verbose.file = None;
		}
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use super::*;

	#[derive(Clone, Default)]
	struct Shared(Rc<RefCell<String>>);

	impl RedirectTarget for Shared {
		fn write(&mut self, text: &str) -> io::Result<()> {
			self.0.borrow_mut().push_str(text);
			Ok(())
		}
	}

	struct Broken;

	impl RedirectTarget for Broken {
		fn write(&mut self, _text: &str) -> io::Result<()> {
			Err(io::Error::other("disk full"))
		}
	}

	#[test]
	fn inactive_redirection_is_a_no_op() {
		let mut redir = Redirection::new();
		assert!(!redir.is_active());
		redir.write("hello", 0).unwrap();
		assert_eq!(redir.take_capture(), None);
	}

	#[test]
	fn capture_collects_output() {
		let mut redir = Redirection::new();
		redir.start_capture();
		redir.write("\n", 0).unwrap();
		redir.write("hello", 0).unwrap();
		assert_eq!(redir.take_capture().as_deref(), Some("\nhello"));
	}

	#[test]
	fn pads_to_message_column() {
		let mut redir = Redirection::new();
		redir.start_capture();
		redir.write("ab", 0).unwrap();
		redir.write("cd", 5).unwrap();
		assert_eq!(redir.take_capture().as_deref(), Some("ab   cd"));
	}

	#[test]
	fn capture_takes_precedence_over_target() {
		let shared = Shared::default();
		let mut redir = Redirection::new();
		redir.set_target(Some(Box::new(shared.clone())));
		redir.write("one", 0).unwrap();
		redir.start_capture();
		redir.write("\ntwo", 0).unwrap();
		assert_eq!(shared.0.borrow().as_str(), "one");
		assert_eq!(redir.take_capture().as_deref(), Some("\ntwo"));
	}

	#[test]
	fn failing_target_is_reported_once_and_dropped() {
		let mut redir = Redirection::new();
		redir.set_target(Some(Box::new(Broken)));
		assert!(matches!(redir.write("x", 0), Err(MessageError::Redirect(_))));
		assert!(!redir.is_active());
		assert!(redir.write("y", 0).is_ok());
	}

	#[test]
	fn verbose_file_receives_output() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("verbose.log");
		let mut redir = Redirection::new();
		redir.set_verbose_file(Some(path.clone()));
		redir.write("\n", 0).unwrap();
		redir.write("checking\tpaths", 0).unwrap();
		redir.verbose_stop();
		assert_eq!(std::fs::read_to_string(&path).unwrap(), "\nchecking\tpaths");
	}

	#[test]
	fn verbose_open_failure_reported_once() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("missing").join("verbose.log");
		let mut redir = Redirection::new();
		redir.set_verbose_file(Some(path));
		assert!(matches!(redir.write("a", 0), Err(MessageError::CannotOpen { .. })));
		assert!(redir.write("b", 0).is_ok());
	}

	#[test]
	fn off_suppresses_everything() {
		let mut redir = Redirection::new();
		redir.start_capture();
		redir.set_off(true);
		redir.write("hidden", 0).unwrap();
		assert_eq!(redir.take_capture().as_deref(), Some(""));
	}
}
