//! Fitting text into a fixed number of terminal cells.
//!
//! [`truncate_to_width`] keeps a head and a tail of the text joined by `...`,
//! walking grapheme clusters so a multi-byte character is never split and a
//! composing mark never leaves its base character.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Text inserted between the kept head and tail.
pub const ELLIPSIS: &str = "...";

/// Cells (and bytes) taken by [`ELLIPSIS`].
pub const ELLIPSIS_WIDTH: usize = 3;

/// Number of terminal cells `text` occupies.
pub fn display_width(text: &str) -> usize {
	UnicodeWidthStr::width(text)
}

/// Returns the longest prefix of `text` that is at most `capacity` bytes and
/// ends on a grapheme cluster boundary.
pub fn clip_to_capacity(text: &str, capacity: usize) -> &str {
	if text.len() <= capacity {
		return text;
	}
	let mut end = 0;
	for (idx, grapheme) in text.grapheme_indices(true) {
		let next = idx + grapheme.len();
		if next > capacity {
			break;
		}
		end = next;
	}
	&text[..end]
}

/// Shortens `text` to fit in `room` cells, keeping the start and the end.
///
/// `capacity` bounds the result in bytes. Text that already fits is returned
/// unchanged (clipped to `capacity` only). Otherwise roughly half of the
/// available cells go to the head, the rest to the tail, and [`ELLIPSIS`]
/// joins them. When `room` is below the ellipsis width the result is the bare
/// ellipsis. If even the shortened text exceeds `capacity` it is clipped at a
/// cluster boundary.
///
/// Truncating a result again with the same arguments returns it unchanged.
pub fn truncate_to_width(text: &str, room: usize, capacity: usize) -> String {
	if text.is_empty() || display_width(text) <= room {
		return clip_to_capacity(text, capacity).to_owned();
	}

	let budget = room.saturating_sub(ELLIPSIS_WIDTH);
	let half = budget / 2;

	let mut used = 0;
	let mut head_end = 0;
	for (idx, grapheme) in text.grapheme_indices(true) {
		let cells = display_width(grapheme);
		let end = idx + grapheme.len();
		if used >= half || used + cells > half || end > capacity {
			break;
		}
		used += cells;
		head_end = end;
	}

	// Clusters starting at offset 0 never become tail; the head owns them.
	let mut tail_start = text.len();
	for (idx, grapheme) in text.grapheme_indices(true).rev() {
		let cells = display_width(grapheme);
		if idx == 0 || used + cells > budget {
			break;
		}
		used += cells;
		tail_start = idx;
	}

	if tail_start <= head_end + ELLIPSIS_WIDTH {
		return clip_to_capacity(text, capacity).to_owned();
	}

	let tail = &text[tail_start..];
	let mut out = String::with_capacity(head_end + ELLIPSIS.len() + tail.len());
	out.push_str(&text[..head_end]);
	out.push_str(ELLIPSIS);
	out.push_str(tail);
	if out.len() > capacity {
		let clipped = clip_to_capacity(&out, capacity).len();
		out.truncate(clipped);
	}
	out
}
