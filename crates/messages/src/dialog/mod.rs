//! Confirm dialog prompts.
//!
//! A button specification lists labels separated by `\n`. `&` before a
//! character makes it the button's hotkey and `&&` is a literal `&`:
//!
//! ```text
//! "&Yes\n&No\n&Cancel"  ->  "(Y)es, (N)o, (C)ancel: "
//! ```
//!
//! A label without a hotkey uses its first character. The default button is
//! bracketed with `[]`, the others with `()`.

use smallvec::SmallVec;
use unicode_segmentation::UnicodeSegmentation;

/// Separates button labels in a specification.
pub const BUTTON_SEPARATOR: char = '\n';

/// Marks the following character as the button's hotkey.
pub const HOTKEY_MARKER: char = '&';

/// Placeholder hotkey for an empty label.
const NO_HOTKEY: char = '\0';

/// Encoded confirm dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogSpec {
	/// Text displayed to the user: message, button list and `": "`.
	pub prompt: String,
	/// Byte offset in `prompt` where the button list starts.
	pub choices_start: usize,
	/// Lower-cased hotkey of each button, in order.
	pub hotkeys: Vec<char>,
	/// 1-based default button; 0 when there is none.
	pub default_button: usize,
}

/// Keystroke fed to [`DialogSpec::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKey {
	Char(char),
	/// Enter or newline.
	Enter,
	Escape,
	/// Ctrl-C.
	Interrupt,
	/// Any key that cannot select a button (cursor keys, mouse).
	Other,
}

impl DialogSpec {
	/// Encodes `message` and the `buttons` specification.
	///
	/// `default_button` is 1-based; a value outside the buttons brackets none
	/// of them with `[]`.
	pub fn encode(message: &str, buttons: &str, default_button: usize) -> Self {
		let mut prompt = String::with_capacity(message.len() + buttons.len() * 2 + 6);
		prompt.push('\n');
		prompt.push_str(message);
		prompt.push('\n');
		let choices_start = prompt.len();

		let mut hotkeys = Vec::new();
		for (idx, label) in buttons.split(BUTTON_SEPARATOR).enumerate() {
			if idx > 0 {
				prompt.push_str(", ");
			}
			let brackets = if idx + 1 == default_button {
				('[', ']')
			} else {
				('(', ')')
			};
			hotkeys.push(encode_button(label, brackets, &mut prompt));
		}
		prompt.push_str(": ");

		Self {
			prompt,
			choices_start,
			hotkeys,
			default_button,
		}
	}

	/// Button list part of the prompt, without the trailing `": "`.
	pub fn choices(&self) -> &str {
		let end = self.prompt.len() - 2;
		&self.prompt[self.choices_start..end]
	}

	pub fn button_count(&self) -> usize {
		self.hotkeys.len()
	}

	/// Maps a keystroke to a 1-based button, 0 for cancel, or `None` when the
	/// key selects nothing and the dialog keeps waiting.
	pub fn resolve(&self, key: DialogKey) -> Option<usize> {
		match key {
			DialogKey::Enter => Some(self.default_button),
			DialogKey::Escape | DialogKey::Interrupt => Some(0),
			DialogKey::Char(c) => {
				let c = lower(c);
				self.hotkeys.iter().position(|&hotkey| hotkey == c).map(|idx| idx + 1)
			}
			DialogKey::Other => None,
		}
	}
}

/// Appends one rendered button to `out` and returns its hotkey.
fn encode_button(label: &str, (open, close): (char, char), out: &mut String) -> char {
	let mut text = String::with_capacity(label.len());
	// Byte offsets in `text` of declared hotkeys; the last one wins.
	let mut declared: SmallVec<[usize; 2]> = SmallVec::new();

	let mut chars = label.chars();
	while let Some(c) = chars.next() {
		if c != HOTKEY_MARKER {
			text.push(c);
			continue;
		}
		match chars.next() {
			Some(HOTKEY_MARKER) => text.push(HOTKEY_MARKER),
			Some(next) => {
				declared.push(text.len());
				text.push(next);
			}
			None if cfg!(debug_assertions) => panic!("hotkey marker at end of button label {label:?}"),
			None => {}
		}
	}

	let at = declared.last().copied().unwrap_or(0);
	let Some(key) = text[at..].graphemes(true).next() else {
		out.push(open);
		out.push(close);
		return NO_HOTKEY;
	};

	out.push_str(&text[..at]);
	out.push(open);
	out.push_str(key);
	out.push(close);
	out.push_str(&text[at + key.len()..]);

	key.chars().next().map_or(NO_HOTKEY, lower)
}

fn lower(c: char) -> char {
	c.to_lowercase().next().unwrap_or(c)
}

/// Common button specifications and their answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAnswer {
	Yes,
	No,
	All,
	DiscardAll,
	Cancel,
}

impl DialogAnswer {
	pub const YES_NO: &'static str = "&Yes\n&No";
	pub const YES_NO_CANCEL: &'static str = "&Yes\n&No\n&Cancel";
	pub const YES_NO_ALL_CANCEL: &'static str = "&Yes\n&No\nSave &All\n&Discard All\n&Cancel";

	/// Answer for a choice from [`YES_NO`](Self::YES_NO). Cancelling means no.
	pub fn yes_no(choice: usize) -> Self {
		if choice == 1 { Self::Yes } else { Self::No }
	}

	/// Answer for a choice from [`YES_NO_CANCEL`](Self::YES_NO_CANCEL).
	pub fn yes_no_cancel(choice: usize) -> Self {
		match choice {
			1 => Self::Yes,
			2 => Self::No,
			_ => Self::Cancel,
		}
	}

	/// Answer for a choice from [`YES_NO_ALL_CANCEL`](Self::YES_NO_ALL_CANCEL).
	pub fn yes_no_all_cancel(choice: usize) -> Self {
		match choice {
			1 => Self::Yes,
			2 => Self::No,
			3 => Self::All,
			4 => Self::DiscardAll,
			_ => Self::Cancel,
		}
	}
}

#[cfg(test)]
mod tests;
