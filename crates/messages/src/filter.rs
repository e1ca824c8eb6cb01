use regex::Regex;

use crate::error::Result;

/// Active `:filter` pattern.
///
/// A message is filtered out when it does not match the pattern, or when it
/// does match and the filter is forced (`:filter!`).
#[derive(Debug, Clone)]
pub struct MessageFilter {
	pattern: Regex,
	force: bool,
}

impl MessageFilter {
	pub fn new(pattern: &str, force: bool) -> Result<Self> {
		Ok(Self {
			pattern: Regex::new(pattern)?,
			force,
		})
	}

	/// Returns whether `msg` should be suppressed.
	pub fn filters(&self, msg: &str) -> bool {
		self.pattern.is_match(msg) == self.force
	}
}
