//! UI sink printing events as JSON lines.

use std::io::{self, Write};

use xeno_messages::{Chunk, HistoryItem, MessageContext, UiEvent, UiSink};

/// Writes every received event as one JSON object per line.
///
/// The first write error stops output; [`finish`](Self::finish) reports it.
pub struct JsonSink<W: Write> {
	out: W,
	failed: Option<io::Error>,
}

impl<W: Write> JsonSink<W> {
	pub fn new(out: W) -> Self {
		Self { out, failed: None }
	}

	/// Writes an arbitrary JSON value, for output that is not a UI event.
	pub fn write_value(&mut self, value: &serde_json::Value) {
		self.write_line(value);
	}

	fn emit(&mut self, event: UiEvent) {
		self.write_line(&event);
	}

	fn write_line<T: serde::Serialize + ?Sized>(&mut self, value: &T) {
		if self.failed.is_some() {
			return;
		}
		let result = serde_json::to_writer(&mut self.out, value)
			.map_err(io::Error::from)
			.and_then(|()| self.out.write_all(b"\n"));
		if let Err(error) = result {
			tracing::warn!(%error, "event output failed");
			self.failed = Some(error);
		}
	}

	/// Flushes output and returns the underlying writer, or the first error.
	pub fn finish(mut self) -> io::Result<W> {
		if let Some(error) = self.failed.take() {
			return Err(error);
		}
		self.out.flush()?;
		Ok(self.out)
	}
}

impl<W: Write> UiSink for JsonSink<W> {
	fn deliver_chunks(&mut self, _ctx: &mut MessageContext, kind: &str, chunks: Vec<Chunk>, replace_last: bool) {
		self.emit(UiEvent::MsgShow {
			kind: kind.to_string(),
			chunks,
			replace_last,
		});
	}

	fn deliver_showmode(&mut self, chunks: Vec<Chunk>) {
		self.emit(UiEvent::MsgShowmode { chunks });
	}

	fn deliver_history(&mut self, entries: Vec<HistoryItem>) {
		self.emit(UiEvent::MsgHistoryShow { entries });
	}

	fn clear(&mut self) {
		self.emit(UiEvent::MsgClear);
	}

	fn clear_history(&mut self) {
		self.emit(UiEvent::MsgHistoryClear);
	}
}
