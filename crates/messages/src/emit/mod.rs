//! The emission state machine.
//!
//! [`MessageContext`] is the single entry point for displaying messages. It
//! applies filtering and silencing, records history, writes through the
//! [`ChunkEmitter`] and flushes batches to the [`UiSink`] passed to each call.
//!
//! The sink receives the context back on delivery and may display further
//! messages from there. Nesting is capped at [`MAX_DEPTH`] levels; deeper
//! calls are skipped and report success.

use crate::chunks::{Chunk, ChunkEmitter};
use crate::config::MessageOptions;
use crate::filter::MessageFilter;
use crate::highlight::{HighlightTable, HlAttr};
use crate::history::{HistoryContent, HistoryLog};
use crate::kind::MessageKind;
use crate::redirect::Redirection;
use crate::sink::UiSink;
use crate::source::{SourceLocation, SourceTracker};
use crate::width::display_width;

mod errors;
mod output;

pub use errors::{ErrorThrower, IOSIZE, MULTILINE_BUFSIZE, ThrowOutcome};

/// Deepest nesting of [`MessageContext::show`] that still displays.
pub const MAX_DEPTH: u8 = 3;

/// Switches consulted on every message. Owned by the caller's command
/// machinery (`:silent`, `:silent!`, `try` blocks) and toggled directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageFlags {
	/// Nesting count of `:silent`; messages are not displayed or recorded.
	pub msg_silent: u32,
	/// Nesting count of `:silent!`; errors are not displayed.
	pub emsg_silent: u32,
	/// Errors are switched off entirely.
	pub emsg_off: u32,
	/// Errors are skipped, e.g. while evaluating a skipped branch.
	pub emsg_skip: u32,
	/// Silent errors are not copied to redirection either.
	pub emsg_noredir: bool,
	/// History recording is disabled.
	pub history_off: bool,
	/// Batch mode: no user interaction is possible.
	pub silent_mode: bool,
	/// A global command is running; line count reports wait until it ends.
	pub global_busy: bool,
	/// The user interrupted the current command.
	pub interrupted: bool,
}

/// Options for a single [`MessageContext::show`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShowOptions {
	/// Record the message in history.
	pub history: bool,
	/// Write tab, CR and NL as-is instead of translating them.
	pub multiline: bool,
	/// Keep the message for redisplay after a redraw when it fits.
	pub keep: bool,
}

impl ShowOptions {
	/// Recorded, single line, not kept. What [`MessageContext::msg`] uses.
	pub const HISTORY: Self = Self {
		history: true,
		multiline: false,
		keep: false,
	};
}

/// Message redisplayed after the screen is redrawn.
#[derive(Debug, Clone, PartialEq, Eq)]
struct KeptMessage {
	text: String,
	attr: HlAttr,
	/// Set when the message is a line count report, which later reports may
	/// replace.
	from_report: bool,
}

/// Script-visible copies of the last messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageVars {
	/// Last plain message.
	pub statusmsg: String,
	/// Last error message.
	pub errmsg: String,
	/// Last warning message.
	pub warningmsg: String,
}

#[derive(Debug, Default)]
struct ErrorState {
	/// Errors reported, including suppressed ones.
	called: u32,
	/// Errors that took effect (displayed or thrown).
	did: u32,
	/// The next error is severe, e.g. raised while an exception is pending.
	severe: bool,
	/// An error is on screen; filtering is bypassed until cleared.
	on_display: bool,
}

#[derive(Debug, Default)]
struct ClearState {
	/// Batches delivered since the last clear.
	visible: usize,
	keep_after_cmdline: bool,
	need_clear: bool,
	history_visible: bool,
}

/// All message pipeline state for one editor session.
pub struct MessageContext {
	pub(crate) options: MessageOptions,
	pub(crate) history: HistoryLog,
	pub(crate) emitter: ChunkEmitter,
	pub(crate) redirect: Redirection,
	pub flags: MessageFlags,
	sources: SourceTracker,
	sourcing: Option<SourceLocation>,
	in_source_banner: bool,
	filter: Option<MessageFilter>,
	errors: ErrorState,
	thrower: Option<Box<dyn ErrorThrower>>,
	depth: u8,
	keep: Option<KeptMessage>,
	vars: MessageVars,
	clear: ClearState,
	replace_last: bool,
}

impl std::fmt::Debug for MessageContext {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MessageContext")
			.field("flags", &self.flags)
			.field("depth", &self.depth)
			.field("history", &self.history.len())
			.field("pending_kind", &self.emitter.kind())
			.field("keep", &self.keep)
			.finish_non_exhaustive()
	}
}

impl Default for MessageContext {
	fn default() -> Self {
		Self::new(MessageOptions::default())
	}
}

impl MessageContext {
	pub fn new(options: MessageOptions) -> Self {
		let mut redirect = Redirection::new();
		redirect.set_verbose_file(options.verbose_file.clone());
		Self {
			history: HistoryLog::new(options.history_cap),
			options,
			emitter: ChunkEmitter::new(),
			redirect,
			flags: MessageFlags::default(),
			sources: SourceTracker::default(),
			sourcing: None,
			in_source_banner: false,
			filter: None,
			errors: ErrorState::default(),
			thrower: None,
			depth: 0,
			keep: None,
			vars: MessageVars::default(),
			clear: ClearState::default(),
			replace_last: false,
		}
	}

	pub fn options(&self) -> &MessageOptions {
		&self.options
	}

	/// Replaces the options. A changed verbose file is reopened on the next
	/// write; a smaller history cap takes effect on the next record.
	pub fn set_options(&mut self, options: MessageOptions) {
		if options.verbose_file != self.options.verbose_file {
			self.redirect.set_verbose_file(options.verbose_file.clone());
		}
		self.history.set_cap(options.history_cap);
		self.options = options;
	}

	pub fn highlights(&self) -> &HighlightTable {
		&self.options.highlights
	}

	pub fn history(&self) -> &HistoryLog {
		&self.history
	}

	pub fn redirection(&mut self) -> &mut Redirection {
		&mut self.redirect
	}

	pub fn vars(&self) -> &MessageVars {
		&self.vars
	}

	/// Current nesting of [`show`](Self::show).
	pub fn depth(&self) -> u8 {
		self.depth
	}

	/// Installs or removes the `:filter` pattern.
	pub fn set_filter(&mut self, filter: Option<MessageFilter>) {
		self.filter = filter;
	}

	fn filtered(&self, text: &str) -> bool {
		self.filter.as_ref().is_some_and(|filter| filter.filters(text))
	}

	/// Sets where the code currently executing came from, used for error
	/// banners.
	pub fn set_sourcing(&mut self, location: Option<SourceLocation>) {
		self.sourcing = location;
	}

	/// Makes the next error show its source banners again.
	pub fn reset_last_sourcing(&mut self) {
		self.sources.reset();
	}

	/// Marks the next delivered batch as replacing the last one on screen.
	pub fn replace_next(&mut self) {
		self.replace_last = true;
	}

	/// Displays `text`.
	///
	/// Always returns `true`: filtered, silenced and too deeply nested
	/// messages are skipped without error, and the pipeline never waits for
	/// the user.
	pub fn show(&mut self, ui: &mut dyn UiSink, text: &str, attr: HlAttr, opts: ShowOptions) -> bool {
		debug_assert!(!(opts.keep && opts.multiline), "kept messages are single line");

		if !self.errors.on_display && self.filtered(text) {
			tracing::trace!(text, "message filtered");
			return true;
		}

		if attr.is_none() {
			self.vars.statusmsg = text.to_owned();
		}

		if self.depth >= MAX_DEPTH {
			tracing::debug!(depth = self.depth, text, "message nesting too deep, skipped");
			return true;
		}
		self.depth += 1;

		if opts.history && !self.is_kept_reshow(text) && !self.repeats_last(text, attr) {
			let kind = self.emitter.kind();
			self.record(HistoryContent::Text(text.to_owned()), attr, opts.multiline, kind);
		}

		self.start(ui);
		if opts.multiline {
			self.write_multiline(ui, text, attr);
		} else {
			self.outtrans(ui, text, attr);
		}
		let retval = self.end(ui);

		if opts.keep && retval && display_width(text) < self.options.keep_width {
			self.set_keep(text, attr);
		}

		self.depth -= 1;
		true
	}

	/// Displays and records a single-line message.
	pub fn msg(&mut self, ui: &mut dyn UiSink, text: &str, attr: HlAttr) -> bool {
		self.show(ui, text, attr, ShowOptions::HISTORY)
	}

	/// Displays one message made of several highlighted chunks.
	pub fn show_multiattr(
		&mut self,
		ui: &mut dyn UiSink,
		chunks: Vec<Chunk>,
		kind: Option<MessageKind>,
		history: bool,
	) {
		if let Some(kind) = kind {
			self.set_kind(ui, kind);
		}
		self.start(ui);
		for chunk in &chunks {
			self.write_multiline(ui, &chunk.text, chunk.attr);
		}
		if history && !chunks.is_empty() {
			let kind = self.emitter.kind();
			self.record(HistoryContent::Chunks(chunks), HlAttr::NONE, true, kind);
		}
		self.end(ui);
	}

	/// The kept message shown again: recording it would duplicate it.
	fn is_kept_reshow(&self, text: &str) -> bool {
		let Some(keep) = &self.keep else {
			return false;
		};
		if keep.text != text {
			return false;
		}
		match self.history.last().and_then(|entry| entry.text()) {
			Some(last) => text.starts_with('<') || last == text,
			None => true,
		}
	}

	fn repeats_last(&self, text: &str, attr: HlAttr) -> bool {
		self.history.last().is_some_and(|entry| {
			entry.attr() == attr && entry.text() == Some(text.trim_matches('\n'))
		})
	}

	/// Records a history entry unless history is off or output is silenced.
	///
	/// Dropped content is released here. Returns whether an entry was added.
	pub fn record(
		&mut self,
		content: HistoryContent,
		attr: HlAttr,
		multiline: bool,
		kind: Option<MessageKind>,
	) -> bool {
		if self.flags.history_off || self.flags.msg_silent > 0 {
			tracing::trace!(
				history_off = self.flags.history_off,
				msg_silent = self.flags.msg_silent,
				"history entry dropped"
			);
			return false;
		}
		self.history.push(content, attr, multiline, kind)
	}

	/// Begins a message: drops the kept message, flushes earlier output and
	/// starts a new line in redirected output.
	///
	/// The pending kind survives the flush so it labels this message.
	pub fn start(&mut self, ui: &mut dyn UiSink) {
		if self.flags.msg_silent == 0 {
			self.keep = None;
		}
		let kind = self.emitter.kind();
		self.flush(ui);
		self.emitter.set_kind(kind);
		self.redirect_write(ui, "\n");
	}

	/// Ends a message. Returns `true`: the pipeline never waits for a key.
	pub fn end(&mut self, ui: &mut dyn UiSink) -> bool {
		self.flush(ui);
		true
	}

	/// Delivers the pending batch, if any.
	///
	/// The emitter is reset before the sink is called, so messages the sink
	/// produces start a new batch.
	pub fn flush(&mut self, ui: &mut dyn UiSink) {
		let Some(batch) = self.emitter.take_batch() else {
			return;
		};
		let replace_last = std::mem::take(&mut self.replace_last);
		self.clear.visible += 1;
		ui.deliver_chunks(self, batch.label(), batch.chunks, replace_last);
	}

	/// Sets the kind of the next batch, flushing first when output of a
	/// different kind is pending.
	pub fn set_kind(&mut self, ui: &mut dyn UiSink, kind: MessageKind) {
		if self.emitter.kind_conflicts(Some(kind)) {
			self.flush(ui);
		}
		self.emitter.set_kind(Some(kind));
	}

	/// Starts a batch of `kind` that is flushed when the guard drops.
	pub fn batch<'a>(&'a mut self, ui: &'a mut dyn UiSink, kind: MessageKind) -> MessageBatch<'a> {
		self.set_kind(ui, kind);
		MessageBatch { ctx: self, ui }
	}

	/// Delivers pending output as the mode indicator. Always delivers, an
	/// empty list clearing the indicator.
	pub fn flush_showmode(&mut self, ui: &mut dyn UiSink) {
		let chunks = self.emitter.take_showmode();
		ui.deliver_showmode(chunks);
	}

	/// Keeps `text` for redisplay after the next redraw.
	pub fn set_keep(&mut self, text: &str, attr: HlAttr) {
		self.keep = Some(KeptMessage {
			text: text.to_owned(),
			attr,
			from_report: false,
		});
	}

	/// The kept message and its attribute.
	pub fn kept(&self) -> Option<(&str, HlAttr)> {
		self.keep.as_ref().map(|keep| (keep.text.as_str(), keep.attr))
	}

	pub fn clear_keep(&mut self) {
		self.keep = None;
	}

	/// Reports that `n` lines were added (positive) or removed (negative).
	///
	/// Only counts above the `report` option are shown. A kept message is not
	/// overwritten unless it is itself an earlier report.
	pub fn more_lines(&mut self, ui: &mut dyn UiSink, n: i64) {
		if self.flags.global_busy {
			return;
		}
		if self.keep.as_ref().is_some_and(|keep| !keep.from_report) {
			return;
		}

		let count = n.unsigned_abs();
		if count <= u64::from(self.options.report) {
			return;
		}

		let mut text = match (n > 0, count) {
			(true, 1) => "1 more line".to_string(),
			(true, _) => format!("{count} more lines"),
			(false, 1) => "1 line less".to_string(),
			(false, _) => format!("{count} fewer lines"),
		};
		if self.flags.interrupted {
			text.push_str(" (Interrupted)");
		}

		if self.msg(ui, &text, HlAttr::NONE) {
			self.keep = Some(KeptMessage {
				text,
				attr: HlAttr::NONE,
				from_report: true,
			});
		}
	}

	/// Displays verbose output. While a verbose file is set the message only
	/// goes to the file.
	pub fn verbose(&mut self, ui: &mut dyn UiSink, text: &str) -> bool {
		let to_file = self.redirect.verbose_file().is_some();
		if to_file {
			self.flags.msg_silent += 1;
		} else {
			self.set_kind(ui, MessageKind::Verbose);
		}
		let shown = self.show(ui, text, HlAttr::NONE, ShowOptions::HISTORY);
		if to_file {
			self.flags.msg_silent -= 1;
		}
		shown
	}

	/// Keeps displayed messages through the next [`clear_ui`](Self::clear_ui)
	/// that is not forced.
	pub fn keep_after_cmdline(&mut self, keep: bool) {
		self.clear.keep_after_cmdline = keep;
	}

	/// Clears displayed messages and a displayed history.
	pub fn clear_ui(&mut self, ui: &mut dyn UiSink, force: bool) {
		if self.clear.visible > 0 && (!self.clear.keep_after_cmdline || force) {
			ui.clear();
			self.clear.visible = 0;
			self.replace_last = false;
			self.errors.on_display = false;
		}
		if self.clear.history_visible {
			ui.clear_history();
			self.clear.history_visible = false;
		}
		self.clear.keep_after_cmdline = false;
	}

	/// Requests a clear at the next [`check_clear`](Self::check_clear).
	pub fn clear_later(&mut self) {
		if self.clear.visible > 0 {
			self.clear.need_clear = true;
		}
	}

	/// Performs a clear requested by [`clear_later`](Self::clear_later).
	pub fn check_clear(&mut self, ui: &mut dyn UiSink) {
		if std::mem::take(&mut self.clear.need_clear) {
			self.clear_ui(ui, true);
		}
	}

	pub(crate) fn set_history_visible(&mut self) {
		self.clear.history_visible = true;
	}

	/// Writes to active redirection; a failing destination is reported as an
	/// error once.
	pub(crate) fn redirect_write(&mut self, ui: &mut dyn UiSink, text: &str) {
		let col = self.emitter.cur_len();
		if let Err(err) = self.redirect.write(text, col) {
			self.show_error(ui, &err.to_string(), false);
		}
	}
}

/// Scope guard returned by [`MessageContext::batch`]. Output written through
/// it is delivered as one batch when it drops.
pub struct MessageBatch<'a> {
	ctx: &'a mut MessageContext,
	ui: &'a mut dyn UiSink,
}

impl MessageBatch<'_> {
	pub fn puts(&mut self, text: &str, attr: HlAttr) {
		self.ctx.puts(&mut *self.ui, text, attr);
	}

	pub fn outtrans(&mut self, text: &str, attr: HlAttr) -> usize {
		self.ctx.outtrans(&mut *self.ui, text, attr)
	}

	pub fn context(&mut self) -> &mut MessageContext {
		self.ctx
	}
}

impl Drop for MessageBatch<'_> {
	fn drop(&mut self) {
		self.ctx.flush(&mut *self.ui);
	}
}
