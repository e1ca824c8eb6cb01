//! End-to-end behaviour of the message pipeline through its public API.

use pretty_assertions::assert_eq;
use xeno_messages::{
	Chunk, DialogKey, HistoryItem, HlAttr, MessageContext, MessageKind, MessageOptions, RecordingSink, SourceLocation,
	UiEvent, UiSink, truncate_to_width,
};

/// Sink that redraws after every error, and the redraw itself fails once.
#[derive(Default)]
struct RedrawingSink {
	inner: RecordingSink,
	redraw_failed: bool,
}

impl UiSink for RedrawingSink {
	fn deliver_chunks(&mut self, ctx: &mut MessageContext, kind: &str, chunks: Vec<Chunk>, replace_last: bool) {
		self.inner.deliver_chunks(ctx, kind, chunks, replace_last);
		if kind == "emsg" && !self.redraw_failed {
			self.redraw_failed = true;
			ctx.show_error(self, "E315: redraw failed", false);
		}
	}

	fn deliver_history(&mut self, entries: Vec<HistoryItem>) {
		self.inner.deliver_history(entries);
	}

	fn clear(&mut self) {
		self.inner.clear();
	}

	fn clear_history(&mut self) {
		self.inner.clear_history();
	}
}

#[test]
fn reentrant_error_is_displayed_after_the_first() {
	let mut ctx = MessageContext::default();
	let mut ui = RedrawingSink::default();
	ctx.show_error(&mut ui, "E37: No write since last change", false);
	assert_eq!(
		ui.inner.shown_texts(),
		vec!["E37: No write since last change", "E315: redraw failed"]
	);
	assert_eq!(ctx.did_emsg(), 2);
	assert_eq!(ctx.depth(), 0);
}

#[test]
fn options_from_toml_drive_the_pipeline() {
	let opts = MessageOptions::from_toml_str(
		r#"
		history-cap = 2
		report = 0

		[highlights]
		error = 91
		"#,
	)
	.unwrap();
	let mut ctx = MessageContext::new(opts);
	let mut ui = RecordingSink::new();

	for n in 1..=5 {
		ctx.more_lines(&mut ui, n);
	}
	ctx.show_error(&mut ui, "E1: bad", false);

	assert_eq!(ctx.history().len(), 3);
	let texts: Vec<_> = ctx.history().iter().filter_map(|e| e.text()).collect();
	assert_eq!(texts, vec!["4 more lines", "5 more lines", "E1: bad"]);
	assert_eq!(ctx.history().last().map(|e| e.attr()), Some(HlAttr(91)));
}

#[test]
fn truncated_path_fits_message_area() {
	let mut ctx = MessageContext::default();
	let mut ui = RecordingSink::new();
	let path = "/home/user/projects/xeno/crates/messages/src/emit/mod.rs";
	let fitted = truncate_to_width(path, 30, 1024);
	assert_eq!(fitted, "/home/user/pr...rc/emit/mod.rs");
	ctx.msg(&mut ui, &format!("\"{fitted}\" 551L written"), HlAttr::NONE);
	assert_eq!(ui.shown_texts(), vec![format!("\"{fitted}\" 551L written")]);
}

#[test]
fn script_errors_then_messages_listing() {
	let mut ctx = MessageContext::default();
	let mut ui = RecordingSink::new();

	ctx.set_sourcing(Some(SourceLocation::new("~/.config/xeno/init.nu", 3)));
	ctx.show_error(&mut ui, "E121: Undefined variable: foo", false);
	ctx.set_sourcing(None);
	ctx.warn(&mut ui, "W10: Warning: Changing a readonly file", true);
	ui.take();

	ctx.messages(&mut ui, "", Some(2));
	assert_eq!(
		ui.events,
		vec![UiEvent::MsgHistoryShow {
			entries: vec![
				HistoryItem {
					kind: "emsg",
					content: vec![Chunk::new(HlAttr(1), "E121: Undefined variable: foo")],
				},
				HistoryItem {
					kind: "wmsg",
					content: vec![Chunk::new(HlAttr(2), "W10: Warning: Changing a readonly file")],
				},
			],
		}]
	);
}

#[test]
fn confirm_then_echo_keeps_kinds_apart() {
	let mut ctx = MessageContext::default();
	let mut ui = RecordingSink::new();
	let choice = ctx.confirm(&mut ui, [DialogKey::Char('a')], "Save all?", "&Yes\n&No\nSave &All", 1);
	{
		let mut batch = ctx.batch(&mut ui, MessageKind::Echo);
		batch.puts(&format!("picked {choice}"), HlAttr::NONE);
	}
	let kinds: Vec<_> = ui
		.events
		.iter()
		.filter_map(|event| match event {
			UiEvent::MsgShow { kind, .. } => Some(kind.clone()),
			_ => None,
		})
		.collect();
	assert_eq!(kinds, vec!["confirm", "echo"]);
	assert_eq!(ui.shown_texts()[1], "picked 3");
}
