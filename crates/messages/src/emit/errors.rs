//! Error and warning display.

use std::fmt;

use super::{MessageContext, ShowOptions};
use crate::highlight::HlAttr;
use crate::kind::MessageKind;
use crate::sink::UiSink;
use crate::width::clip_to_capacity;

/// Staging bound for formatted messages, in bytes including a terminator.
pub const IOSIZE: usize = 1024 + 1;

/// Staging bound for formatted multiline errors.
pub const MULTILINE_BUFSIZE: usize = 8192;

/// What the exception layer did with an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrowOutcome {
	/// Not converted; display the error normally.
	NotThrown,
	/// Converted into an exception; not displayed.
	Thrown,
	/// Swallowed by the exception layer without counting as an error.
	Ignored,
}

/// Exception layer consulted before an error is displayed, e.g. to turn it
/// into a script exception inside a `try` block.
pub trait ErrorThrower {
	fn throw(&mut self, text: &str, severe: bool) -> ThrowOutcome;
}

impl MessageContext {
	pub fn set_thrower(&mut self, thrower: Option<Box<dyn ErrorThrower>>) {
		self.thrower = thrower;
	}

	/// Errors reported so far, including suppressed ones.
	pub fn called_emsg(&self) -> u32 {
		self.errors.called
	}

	/// Errors that were displayed or thrown.
	pub fn did_emsg(&self) -> u32 {
		self.errors.did
	}

	/// Marks the next error as severe.
	pub fn set_severe(&mut self) {
		self.errors.severe = true;
	}

	/// Returns whether an error is on screen.
	pub fn error_displayed(&self) -> bool {
		self.errors.on_display
	}

	/// Returns whether errors are currently suppressed entirely.
	pub fn emsg_not_now(&self) -> bool {
		let debug_shows = self.options.has_debug_flag('m') || self.options.has_debug_flag('t');
		(self.flags.emsg_off > 0 && !debug_shows) || self.flags.emsg_skip > 0
	}

	/// Displays an error message.
	///
	/// The error may instead be thrown through the registered
	/// [`ErrorThrower`], or only copied to redirection under `:silent!`. Source
	/// banners precede the message when the location changed. Returns `true`.
	pub fn show_error(&mut self, ui: &mut dyn UiSink, text: &str, multiline: bool) -> bool {
		if self.emsg_not_now() {
			return true;
		}

		self.errors.called += 1;
		let severe = std::mem::take(&mut self.errors.severe);

		if self.flags.emsg_off == 0 || self.options.has_debug_flag('t') {
			if let Some(thrower) = self.thrower.as_mut() {
				match thrower.throw(text, severe) {
					ThrowOutcome::NotThrown => {}
					ThrowOutcome::Thrown => {
						self.errors.did += 1;
						return true;
					}
					ThrowOutcome::Ignored => return true,
				}
			}

			self.vars.errmsg = text.to_owned();

			if self.flags.emsg_silent > 0 {
				if !self.flags.emsg_noredir {
					self.start(ui);
					let current = self.sourcing.clone();
					if let Some(banner) = self.sources.name_banner(current.as_ref()) {
						self.redirect_write(ui, &banner);
						self.redirect_write(ui, "\n");
					}
					if let Some(banner) = self.sources.lnum_banner(current.as_ref()) {
						self.redirect_write(ui, &banner);
						self.redirect_write(ui, "\n");
					}
					self.redirect_write(ui, text);
				}
				tracing::debug!(text, "silent error");
				return true;
			}

			match &self.sourcing {
				Some(loc) => tracing::info!(source = %loc.name, lnum = loc.lnum, "{text}"),
				None => tracing::info!("{text}"),
			}

			// An error switches messages back on.
			self.flags.msg_silent = 0;
			self.errors.did += 1;
		}

		self.errors.on_display = true;
		let attr = self.options.highlights.error;

		// A kind set by the caller (e.g. `echoerr`) labels the banners too.
		let kind = self.emitter.kind().unwrap_or(MessageKind::Error);
		self.show_source(ui, kind);
		self.set_kind(ui, kind);

		self.show(
			ui,
			text,
			attr,
			ShowOptions {
				history: true,
				multiline,
				keep: false,
			},
		)
	}

	/// Shows "Error detected while processing" banners for the current
	/// location when it differs from the last one shown.
	fn show_source(&mut self, ui: &mut dyn UiSink, kind: MessageKind) {
		// A banner that itself errors must not recurse.
		if self.in_source_banner {
			return;
		}
		self.in_source_banner = true;

		let current = self.sourcing.clone();
		if let Some(banner) = self.sources.name_banner(current.as_ref()) {
			let attr = self.options.highlights.error;
			self.set_kind(ui, kind);
			self.msg(ui, &banner, attr);
		}
		let lnum_banner = self.sources.lnum_banner(current.as_ref());
		if let Some(banner) = &lnum_banner {
			let attr = self.options.highlights.line_nr;
			self.set_kind(ui, kind);
			self.msg(ui, banner, attr);
		}
		self.sources.remember(current.as_ref(), lnum_banner.is_some());

		self.in_source_banner = false;
	}

	/// Reports a bug in the editor itself. Panics in debug builds after
	/// displaying the message.
	pub fn show_internal_error(&mut self, ui: &mut dyn UiSink, text: &str) {
		self.show_error(ui, text, false);
		tracing::error!(text, "internal error");
		if cfg!(debug_assertions) {
			panic!("internal error: {text}");
		}
	}

	/// Displays a formatted message.
	pub fn show_fmt(&mut self, ui: &mut dyn UiSink, attr: HlAttr, args: fmt::Arguments<'_>) -> bool {
		let text = stage(args, IOSIZE);
		self.msg(ui, &text, attr)
	}

	/// Displays a formatted error message.
	pub fn show_error_fmt(&mut self, ui: &mut dyn UiSink, args: fmt::Arguments<'_>) -> bool {
		if self.emsg_not_now() {
			return true;
		}
		let text = stage(args, IOSIZE);
		self.show_error(ui, &text, false)
	}

	/// Displays a formatted error message that may span lines.
	pub fn show_error_multiline_fmt(&mut self, ui: &mut dyn UiSink, args: fmt::Arguments<'_>) -> bool {
		if self.emsg_not_now() {
			return true;
		}
		let text = stage(args, MULTILINE_BUFSIZE);
		self.show_error(ui, &text, true)
	}

	/// Displays a warning. Skipped under `:silent`; a displayed warning is
	/// kept for redisplay after a redraw.
	pub fn warn(&mut self, ui: &mut dyn UiSink, text: &str, highlight: bool) {
		if self.flags.msg_silent > 0 {
			return;
		}

		self.vars.warningmsg = text.to_owned();
		self.keep = None;
		let attr = if highlight {
			self.options.highlights.warning
		} else {
			HlAttr::NONE
		};

		self.set_kind(ui, MessageKind::Warning);
		if self.msg(ui, text, attr) {
			self.set_keep(text, attr);
		}
	}

	pub fn warn_fmt(&mut self, ui: &mut dyn UiSink, highlight: bool, args: fmt::Arguments<'_>) {
		let text = stage(args, IOSIZE);
		self.warn(ui, &text, highlight);
	}
}

/// Formats `args`, holding the result to `bound - 1` bytes.
///
/// Overflowing the bound is a caller bug; release builds clip on a character
/// boundary.
pub(super) fn stage(args: fmt::Arguments<'_>, bound: usize) -> String {
	let mut text = fmt::format(args);
	let max = bound - 1;
	debug_assert!(
		text.len() <= max,
		"formatted message of {} bytes exceeds {max}",
		text.len()
	);
	if text.len() > max {
		let keep = clip_to_capacity(&text, max).len();
		text.truncate(keep);
	}
	text
}

