//! `:messages` and `:confirm` command surfaces.

use crate::dialog::{DialogKey, DialogSpec};
use crate::emit::MessageContext;
use crate::error::{MessageError, Result};
use crate::history::HistoryItem;
use crate::kind::MessageKind;
use crate::sink::UiSink;

/// Parsed `:messages` invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessagesCommand {
	/// Show the history, or only the last `count` entries.
	Show { count: Option<usize> },
	/// Clear the history, keeping the `keep` most recent entries.
	Clear { keep: usize },
}

impl MessagesCommand {
	/// Parses the command argument and optional count.
	pub fn parse(arg: &str, count: Option<usize>) -> Result<Self> {
		match arg.trim() {
			"" => Ok(Self::Show { count }),
			"clear" => Ok(Self::Clear {
				keep: count.unwrap_or(0),
			}),
			other => Err(MessageError::InvalidArgument(other.to_string())),
		}
	}
}

impl MessageContext {
	/// Runs `:messages`. An invalid argument is displayed as an error.
	pub fn messages(&mut self, ui: &mut dyn UiSink, arg: &str, count: Option<usize>) {
		match MessagesCommand::parse(arg, count) {
			Ok(cmd) => self.run_messages(ui, cmd),
			Err(err) => {
				self.show_error(ui, &err.display_text(), false);
			}
		}
	}

	pub fn run_messages(&mut self, ui: &mut dyn UiSink, cmd: MessagesCommand) {
		match cmd {
			MessagesCommand::Clear { keep } => {
				tracing::debug!(keep, "clearing message history");
				self.history.clear_to(keep);
			}
			MessagesCommand::Show { count } => {
				if self.flags.msg_silent > 0 {
					return;
				}
				let skip = count.map_or(0, |count| self.history.len().saturating_sub(count));
				let entries: Vec<HistoryItem> = self
					.history
					.iter_from(skip)
					.filter_map(|entry| entry.to_item())
					.collect();
				ui.deliver_history(entries);
				self.set_history_visible();
			}
		}
	}

	/// Asks the user to pick a button and returns its 1-based index, or 0 when
	/// cancelled.
	///
	/// Keys are consumed until one selects a button; running out of keys picks
	/// the default. In batch mode the default is returned without prompting.
	pub fn confirm(
		&mut self,
		ui: &mut dyn UiSink,
		keys: impl IntoIterator<Item = DialogKey>,
		message: &str,
		buttons: &str,
		default_button: usize,
	) -> usize {
		if self.flags.silent_mode {
			return default_button;
		}

		let spec = DialogSpec::encode(message, buttons, default_button);
		let attr = self.options.highlights.more_msg;

		// The prompt must be seen even under `:silent`.
		let saved_silent = std::mem::take(&mut self.flags.msg_silent);
		self.set_kind(ui, MessageKind::Confirm);
		self.start(ui);
		self.puts(ui, &spec.prompt, attr);
		self.flush(ui);
		self.flags.msg_silent = saved_silent;

		let choice = keys
			.into_iter()
			.find_map(|key| spec.resolve(key))
			.unwrap_or(spec.default_button);
		tracing::debug!(choice, buttons = spec.button_count(), "confirm answered");
		choice
	}
}
