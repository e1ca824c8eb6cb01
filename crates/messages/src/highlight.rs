use serde::{Deserialize, Serialize};

/// Highlight attribute id attached to a run of message text.
///
/// Attribute ids are opaque to the pipeline; the presentation layer maps them
/// to colors. `0` means "no highlight".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HlAttr(pub i32);

impl HlAttr {
	/// Plain text without highlighting.
	pub const NONE: Self = Self(0);

	pub const fn is_none(self) -> bool {
		self.0 == 0
	}
}

impl From<i32> for HlAttr {
	fn from(id: i32) -> Self {
		Self(id)
	}
}

/// Attribute ids for the highlight classes the pipeline itself uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct HighlightTable {
	/// Error messages.
	pub error: HlAttr,
	/// Warning messages.
	pub warning: HlAttr,
	/// Line number part of an error source banner.
	pub line_nr: HlAttr,
	/// Confirm prompts and "more" messages.
	pub more_msg: HlAttr,
	/// Questions.
	pub question: HlAttr,
	/// Translated unprintable characters.
	pub special_key: HlAttr,
	/// Titles.
	pub title: HlAttr,
	/// Directory and file names.
	pub directory: HlAttr,
}

impl Default for HighlightTable {
	fn default() -> Self {
		Self {
			error: HlAttr(1),
			warning: HlAttr(2),
			line_nr: HlAttr(3),
			more_msg: HlAttr(4),
			question: HlAttr(5),
			special_key: HlAttr(6),
			title: HlAttr(7),
			directory: HlAttr(8),
		}
	}
}

impl HighlightTable {
	/// Returns whether `attr` is the error highlight.
	pub fn is_error(&self, attr: HlAttr) -> bool {
		attr == self.error
	}
}
