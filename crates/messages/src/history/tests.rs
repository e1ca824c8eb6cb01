use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

fn push_text(log: &mut HistoryLog, text: &str) -> bool {
	log.push(HistoryContent::Text(text.to_string()), HlAttr::NONE, false, None)
}

fn texts(log: &HistoryLog) -> Vec<&str> {
	log.iter().filter_map(MessageHistoryEntry::text).collect()
}

#[test]
fn push_appends_in_order() {
	let mut log = HistoryLog::new(10);
	push_text(&mut log, "one");
	push_text(&mut log, "two");
	assert_eq!(texts(&log), vec!["one", "two"]);
	assert_eq!(log.first().and_then(|e| e.text()), Some("one"));
	assert_eq!(log.last().and_then(|e| e.text()), Some("two"));
}

#[test]
fn newlines_are_stripped_from_both_ends() {
	let mut log = HistoryLog::new(10);
	push_text(&mut log, "\n\nhello\nworld\n");
	assert_eq!(texts(&log), vec!["hello\nworld"]);
}

#[test]
fn empty_entries_are_never_recorded() {
	let mut log = HistoryLog::new(10);
	assert!(!push_text(&mut log, ""));
	assert!(!push_text(&mut log, "\n\n"));
	assert!(!log.push(HistoryContent::Chunks(Vec::new()), HlAttr::NONE, true, None));
	assert!(log.is_empty());
}

#[test]
fn chunk_entries_have_no_text() {
	let mut log = HistoryLog::new(10);
	let chunks = vec![Chunk::new(HlAttr(1), "a"), Chunk::new(HlAttr(2), "b")];
	log.push(HistoryContent::Chunks(chunks.clone()), HlAttr::NONE, true, Some(MessageKind::EchoMsg));

	let entry = log.last().unwrap();
	assert_eq!(entry.text(), None);
	assert_eq!(entry.chunks(), chunks.as_slice());
	assert!(entry.is_multiline());
	assert_eq!(
		entry.to_item(),
		Some(HistoryItem {
			kind: "echomsg",
			content: chunks,
		})
	);
}

#[test]
fn text_entry_converts_to_single_chunk_item() {
	let mut log = HistoryLog::new(10);
	log.push(HistoryContent::Text("E1: oops".into()), HlAttr(1), false, Some(MessageKind::Error));
	assert_eq!(
		log.last().unwrap().to_item(),
		Some(HistoryItem {
			kind: "emsg",
			content: vec![Chunk::new(HlAttr(1), "E1: oops")],
		})
	);
}

#[test]
fn eviction_is_lazy_and_exclusive() {
	let mut log = HistoryLog::new(2);
	for text in ["a", "b", "c"] {
		push_text(&mut log, text);
	}
	// cap + 1 entries are allowed between pushes
	assert_eq!(log.len(), 3);

	push_text(&mut log, "d");
	assert_eq!(texts(&log), vec!["b", "c", "d"]);
}

#[test]
fn evict_oldest_on_empty_reports_nothing() {
	let mut log = HistoryLog::new(2);
	assert!(!log.evict_oldest());
	push_text(&mut log, "x");
	assert!(log.evict_oldest());
	assert!(log.is_empty());
	assert!(log.first().is_none());
	assert!(log.last().is_none());
}

#[test]
fn clear_to_keeps_most_recent() {
	let mut log = HistoryLog::new(10);
	for text in ["a", "b", "c", "d"] {
		push_text(&mut log, text);
	}
	log.clear_to(2);
	assert_eq!(texts(&log), vec!["c", "d"]);
	log.clear_to(0);
	assert!(log.is_empty());
}

#[test]
fn iter_from_skips_and_restarts() {
	let mut log = HistoryLog::new(10);
	for text in ["a", "b", "c"] {
		push_text(&mut log, text);
	}
	let tail: Vec<_> = log.iter_from(1).filter_map(|e| e.text()).collect();
	assert_eq!(tail, vec!["b", "c"]);
	let again: Vec<_> = log.iter_from(1).filter_map(|e| e.text()).collect();
	assert_eq!(again, tail);
	assert_eq!(log.iter_from(5).count(), 0);
}

proptest! {
	#[test]
	fn count_never_exceeds_cap_plus_one(cap in 0usize..20, pushes in 0usize..100) {
		let mut log = HistoryLog::new(cap);
		for i in 0..pushes {
			push_text(&mut log, &format!("msg {i}"));
			prop_assert!(log.len() <= cap + 1);
		}
		prop_assert_eq!(log.len(), pushes.min(cap + 1));
	}
}
