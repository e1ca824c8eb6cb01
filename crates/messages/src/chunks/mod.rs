//! Attribute-coalescing batches for the presentation layer.
//!
//! The presentation layer pays per delivered batch, not per character, so
//! consecutive writes sharing an attribute merge into one [`Chunk`] and chunks
//! accumulate until a flush boundary. [`ChunkEmitter`] holds only the pending
//! state; delivery is done by [`MessageContext`](crate::MessageContext), which
//! takes the batch out before calling the sink so a re-entrant write starts a
//! fresh batch.

use serde::Serialize;

use crate::highlight::HlAttr;
use crate::kind::MessageKind;

/// A contiguous run of text sharing one highlight attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
	pub attr: HlAttr,
	pub text: String,
}

impl Chunk {
	pub fn new(attr: HlAttr, text: impl Into<String>) -> Self {
		Self {
			attr,
			text: text.into(),
		}
	}
}

/// Chunks accumulated since the last flush, delivered as one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
	pub kind: Option<MessageKind>,
	pub chunks: Vec<Chunk>,
}

impl Batch {
	/// Label sent with the batch; empty when no kind was set.
	pub fn label(&self) -> &'static str {
		MessageKind::label(self.kind)
	}
}

/// Pending output state between flushes.
#[derive(Debug, Default)]
pub struct ChunkEmitter {
	kind: Option<MessageKind>,
	chunks: Vec<Chunk>,
	/// Attribute of the open chunk; `None` when no chunk is open.
	current_attr: Option<HlAttr>,
	current_text: String,
	/// Bytes written since the last flush.
	cur_len: usize,
}

impl ChunkEmitter {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends `text` under `attr`, sealing the open chunk first when the
	/// attribute changes.
	pub fn write(&mut self, text: &str, attr: HlAttr) {
		if self.current_attr != Some(attr) {
			self.seal();
			self.current_attr = Some(attr);
		}
		self.current_text.push_str(text);
		self.cur_len += text.len();
	}

	/// Moves the open chunk, if any, into the batch.
	pub fn seal(&mut self) {
		let Some(attr) = self.current_attr.take() else {
			return;
		};
		let text = std::mem::take(&mut self.current_text);
		self.chunks.push(Chunk { attr, text });
	}

	/// Seals the open chunk and takes the batch when it has any chunks.
	///
	/// The emitter is reset (kind included) before the batch is returned. An
	/// empty batch yields `None` and leaves the pending kind in place.
	pub fn take_batch(&mut self) -> Option<Batch> {
		self.seal();
		if self.chunks.is_empty() {
			return None;
		}
		self.cur_len = 0;
		Some(Batch {
			kind: self.kind.take(),
			chunks: std::mem::take(&mut self.chunks),
		})
	}

	/// Seals and drains the chunks for the mode indicator channel, keeping
	/// the pending kind.
	pub fn take_showmode(&mut self) -> Vec<Chunk> {
		self.seal();
		self.cur_len = 0;
		std::mem::take(&mut self.chunks)
	}

	pub fn kind(&self) -> Option<MessageKind> {
		self.kind
	}

	/// Sets the kind for the pending batch. Callers flush first when a
	/// different kind is pending.
	pub fn set_kind(&mut self, kind: Option<MessageKind>) {
		self.kind = kind;
	}

	/// Returns whether a flush with `kind` would mix two kinds in one batch.
	pub fn kind_conflicts(&self, kind: Option<MessageKind>) -> bool {
		self.kind != kind
	}

	/// Bytes written since the last flush.
	pub fn cur_len(&self) -> usize {
		self.cur_len
	}

	pub fn is_empty(&self) -> bool {
		self.chunks.is_empty() && self.current_attr.is_none()
	}
}
