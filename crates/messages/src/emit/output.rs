//! Low-level output primitives.
//!
//! Every byte of message output goes through [`MessageContext::puts`], which
//! copies it to redirection before the silence check and only then hands it to
//! the chunk emitter.

use std::path::{MAIN_SEPARATOR, Path};

use super::MessageContext;
use crate::highlight::HlAttr;
use crate::sink::UiSink;
use crate::transchar::transchar;
use crate::width::display_width;

impl MessageContext {
	/// Writes `text` as-is.
	pub fn puts(&mut self, ui: &mut dyn UiSink, text: &str, attr: HlAttr) {
		if text.is_empty() {
			return;
		}
		self.redirect_write(ui, text);
		if self.flags.msg_silent > 0 {
			return;
		}
		self.emitter.write(text, attr);
	}

	pub fn putchar(&mut self, ui: &mut dyn UiSink, c: char, attr: HlAttr) {
		let mut buf = [0; 4];
		self.puts(ui, c.encode_utf8(&mut buf), attr);
	}

	pub fn outnum(&mut self, ui: &mut dyn UiSink, n: i64) {
		self.puts(ui, &n.to_string(), HlAttr::NONE);
	}

	/// Writes `text` with unprintable characters translated, e.g. `^M` or
	/// `<200b>`. Translations use the special key highlight when `attr` is
	/// plain. Returns the display width written.
	pub fn outtrans(&mut self, ui: &mut dyn UiSink, text: &str, attr: HlAttr) -> usize {
		let special = if attr.is_none() {
			self.options.highlights.special_key
		} else {
			attr
		};

		let mut width = 0;
		let mut plain_start = 0;
		for (idx, c) in text.char_indices() {
			let Some(shown) = transchar(c) else {
				continue;
			};
			let plain = &text[plain_start..idx];
			width += display_width(plain);
			self.puts(ui, plain, attr);
			width += shown.len();
			self.puts(ui, &shown, special);
			plain_start = idx + c.len_utf8();
		}
		let rest = &text[plain_start..];
		width += display_width(rest);
		self.puts(ui, rest, attr);
		width
	}

	/// Writes `text`, passing tab, CR and NL through unchanged and translating
	/// everything else.
	pub fn write_multiline(&mut self, ui: &mut dyn UiSink, text: &str, attr: HlAttr) {
		let mut segment_start = 0;
		for (idx, sep) in text.match_indices(['\t', '\n', '\r']) {
			self.outtrans(ui, &text[segment_start..idx], attr);
			self.puts(ui, sep, attr);
			segment_start = idx + sep.len();
		}
		self.outtrans(ui, &text[segment_start..], attr);
	}

	/// Writes a path with the home directory shortened to `~`.
	pub fn show_path(&mut self, ui: &mut dyn UiSink, path: &Path, attr: HlAttr) -> usize {
		let text = home_replace(path);
		self.outtrans(ui, &text, attr)
	}

	/// Pads the current message with spaces up to byte column `col`.
	pub fn advance(&mut self, ui: &mut dyn UiSink, col: usize) {
		let pad = col.saturating_sub(self.emitter.cur_len());
		if pad > 0 {
			self.puts(ui, &" ".repeat(pad), HlAttr::NONE);
		}
	}
}

/// Replaces a leading home directory in `path` with `~`.
pub(crate) fn home_replace(path: &Path) -> String {
	if let Some(home) = dirs::home_dir()
		&& let Ok(rest) = path.strip_prefix(&home)
	{
		if rest.as_os_str().is_empty() {
			return "~".to_string();
		}
		return format!("~{MAIN_SEPARATOR}{}", rest.display());
	}
	path.display().to_string()
}
