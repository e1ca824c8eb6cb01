//! "Error detected while processing" banners.
//!
//! Consecutive errors from the same script only show the file name once, and
//! the line number only when it changed.

/// Where the code currently being executed came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
	/// Script or function name.
	pub name: String,
	/// Line number; 0 when not executing a numbered line (e.g. a command given
	/// on the command line).
	pub lnum: u32,
}

impl SourceLocation {
	pub fn new(name: impl Into<String>, lnum: u32) -> Self {
		Self {
			name: name.into(),
			lnum,
		}
	}
}

/// Remembers the last source location shown in a banner.
#[derive(Debug, Default)]
pub struct SourceTracker {
	last_name: Option<String>,
	last_lnum: u32,
}

impl SourceTracker {
	/// Forgets the last banner so the next error shows it again.
	pub fn reset(&mut self) {
		self.last_name = None;
		self.last_lnum = 0;
	}

	fn other_name(&self, current: Option<&SourceLocation>) -> bool {
		match (current, &self.last_name) {
			(Some(cur), Some(last)) => cur.name != *last,
			(Some(_), None) => true,
			(None, _) => false,
		}
	}

	/// File banner for `current`, when its name differs from the last one.
	pub fn name_banner(&self, current: Option<&SourceLocation>) -> Option<String> {
		let cur = current?;
		self.other_name(current)
			.then(|| format!("Error detected while processing {}:", cur.name))
	}

	/// Line banner for `current`, when the name or line changed.
	pub fn lnum_banner(&self, current: Option<&SourceLocation>) -> Option<String> {
		let cur = current?;
		let changed = self.other_name(current) || cur.lnum != self.last_lnum;
		(changed && cur.lnum != 0).then(|| format!("line {:4}:", cur.lnum))
	}

	/// Records that the banners for `current` were shown.
	///
	/// The line is only remembered when its banner was produced; the name is
	/// remembered even when there is no current location.
	pub fn remember(&mut self, current: Option<&SourceLocation>, lnum_shown: bool) {
		if lnum_shown && let Some(cur) = current {
			self.last_lnum = cur.lnum;
		}
		if current.is_none() || self.other_name(current) {
			self.last_name = current.map(|cur| cur.name.clone());
		}
	}
}
