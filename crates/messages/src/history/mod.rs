//! Bounded scrollback of displayed messages.
//!
//! Entries are appended at the back and destroyed only at the front, so the
//! log is a [`VecDeque`] with a capacity check on insert. Eviction is lazy:
//! the log may briefly hold `cap + 1` entries.

use std::collections::VecDeque;

use serde::Serialize;

use crate::chunks::Chunk;
use crate::highlight::HlAttr;
use crate::kind::MessageKind;

/// Default number of entries kept before eviction starts.
pub const DEFAULT_HISTORY_CAP: usize = 200;

/// Content handed to [`HistoryLog::push`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryContent {
	/// Single-attribute message text.
	Text(String),
	/// Multi-attribute message.
	Chunks(Vec<Chunk>),
}

/// One recorded message. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageHistoryEntry {
	text: Option<String>,
	attr: HlAttr,
	multiline: bool,
	kind: Option<MessageKind>,
	chunks: Vec<Chunk>,
}

impl MessageHistoryEntry {
	/// Message text; `None` for multi-attribute entries.
	pub fn text(&self) -> Option<&str> {
		self.text.as_deref()
	}

	pub fn attr(&self) -> HlAttr {
		self.attr
	}

	pub fn is_multiline(&self) -> bool {
		self.multiline
	}

	pub fn kind(&self) -> Option<MessageKind> {
		self.kind
	}

	/// Chunks of a multi-attribute entry; empty otherwise.
	pub fn chunks(&self) -> &[Chunk] {
		&self.chunks
	}

	/// Converts to the form delivered by `deliver_history`.
	pub fn to_item(&self) -> Option<HistoryItem> {
		let content = if !self.chunks.is_empty() {
			self.chunks.clone()
		} else {
			let text = self.text.as_deref().filter(|text| !text.is_empty())?;
			vec![Chunk::new(self.attr, text)]
		};
		Some(HistoryItem {
			kind: MessageKind::label(self.kind),
			content,
		})
	}
}

/// History entry as delivered to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryItem {
	pub kind: &'static str,
	pub content: Vec<Chunk>,
}

/// Ordered, bounded, append-only message log.
#[derive(Debug)]
pub struct HistoryLog {
	entries: VecDeque<MessageHistoryEntry>,
	cap: usize,
}

impl Default for HistoryLog {
	fn default() -> Self {
		Self::new(DEFAULT_HISTORY_CAP)
	}
}

impl HistoryLog {
	pub fn new(cap: usize) -> Self {
		Self {
			entries: VecDeque::new(),
			cap,
		}
	}

	pub fn cap(&self) -> usize {
		self.cap
	}

	/// Changes the cap. Existing entries are evicted on the next push.
	pub fn set_cap(&mut self, cap: usize) {
		self.cap = cap;
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn first(&self) -> Option<&MessageHistoryEntry> {
		self.entries.front()
	}

	pub fn last(&self) -> Option<&MessageHistoryEntry> {
		self.entries.back()
	}

	/// Appends an entry, evicting from the front while over the cap.
	///
	/// Leading and trailing newlines are stripped from text. Content that is
	/// empty after stripping is not recorded. Returns whether an entry was
	/// added.
	pub fn push(
		&mut self,
		content: HistoryContent,
		attr: HlAttr,
		multiline: bool,
		kind: Option<MessageKind>,
	) -> bool {
		let (text, chunks) = match content {
			HistoryContent::Text(text) => {
				let trimmed = text.trim_matches('\n');
				if trimmed.is_empty() {
					return false;
				}
				let text = if trimmed.len() == text.len() {
					text
				} else {
					trimmed.to_owned()
				};
				(Some(text), Vec::new())
			}
			HistoryContent::Chunks(chunks) if chunks.is_empty() => return false,
			HistoryContent::Chunks(chunks) => (None, chunks),
		};

		while self.entries.len() > self.cap {
			self.evict_oldest();
		}

		self.entries.push_back(MessageHistoryEntry {
			text,
			attr,
			multiline,
			kind,
			chunks,
		});
		true
	}

	/// Removes the oldest entry. Returns `false` when the log is empty.
	pub fn evict_oldest(&mut self) -> bool {
		self.entries.pop_front().is_some()
	}

	/// Evicts oldest entries until at most `keep` remain.
	pub fn clear_to(&mut self, keep: usize) {
		while self.entries.len() > keep {
			self.evict_oldest();
		}
	}

	pub fn iter(&self) -> impl Iterator<Item = &MessageHistoryEntry> {
		self.entries.iter()
	}

	/// Entries after skipping the `skip` oldest ones.
	pub fn iter_from(&self, skip: usize) -> impl Iterator<Item = &MessageHistoryEntry> {
		self.entries.iter().skip(skip)
	}
}

#[cfg(test)]
mod tests;
