//! Presentation layer contract.

use serde::Serialize;

use crate::chunks::Chunk;
use crate::emit::MessageContext;
use crate::history::HistoryItem;

/// Receives batched message output.
///
/// Implementations may be local renderers or proxies to a remote UI. Batches
/// arrive already coalesced; each call is one unit of work for the receiver.
pub trait UiSink {
	/// Delivers one batch of chunks labelled with `kind`.
	///
	/// `ctx` is handed back so the sink can produce further messages while
	/// handling this one (e.g. a redraw that fails). The pending batch has
	/// already been reset, and such re-entry is capped at three nested levels.
	fn deliver_chunks(
		&mut self,
		ctx: &mut MessageContext,
		kind: &str,
		chunks: Vec<Chunk>,
		replace_last: bool,
	);

	/// Delivers the mode indicator. An empty list clears it.
	fn deliver_showmode(&mut self, _chunks: Vec<Chunk>) {}

	/// Shows the message history.
	fn deliver_history(&mut self, entries: Vec<HistoryItem>);

	/// Clears displayed messages.
	fn clear(&mut self);

	/// Hides a displayed message history.
	fn clear_history(&mut self);
}

/// One call received by a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum UiEvent {
	MsgShow {
		kind: String,
		chunks: Vec<Chunk>,
		replace_last: bool,
	},
	MsgShowmode {
		chunks: Vec<Chunk>,
	},
	MsgHistoryShow {
		entries: Vec<HistoryItem>,
	},
	MsgClear,
	MsgHistoryClear,
}

/// Sink that stores every call, for tests and tooling.
#[derive(Debug, Default)]
pub struct RecordingSink {
	pub events: Vec<UiEvent>,
}

impl RecordingSink {
	pub fn new() -> Self {
		Self::default()
	}

	/// Text of every delivered batch, chunks concatenated.
	pub fn shown_texts(&self) -> Vec<String> {
		self.events
			.iter()
			.filter_map(|event| match event {
				UiEvent::MsgShow { chunks, .. } => {
					Some(chunks.iter().map(|c| c.text.as_str()).collect())
				}
				_ => None,
			})
			.collect()
	}

	/// Drains recorded events.
	pub fn take(&mut self) -> Vec<UiEvent> {
		std::mem::take(&mut self.events)
	}
}

impl UiSink for RecordingSink {
	fn deliver_chunks(
		&mut self,
		_ctx: &mut MessageContext,
		kind: &str,
		chunks: Vec<Chunk>,
		replace_last: bool,
	) {
		self.events.push(UiEvent::MsgShow {
			kind: kind.to_string(),
			chunks,
			replace_last,
		});
	}

	fn deliver_showmode(&mut self, chunks: Vec<Chunk>) {
		self.events.push(UiEvent::MsgShowmode { chunks });
	}

	fn deliver_history(&mut self, entries: Vec<HistoryItem>) {
		self.events.push(UiEvent::MsgHistoryShow { entries });
	}

	fn clear(&mut self) {
		self.events.push(UiEvent::MsgClear);
	}

	fn clear_history(&mut self) {
		self.events.push(UiEvent::MsgHistoryClear);
	}
}
