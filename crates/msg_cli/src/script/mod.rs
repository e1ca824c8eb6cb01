//! Message scripts for `xeno-msg replay`.
//!
//! One step per line. Blank lines and lines starting with `#` are skipped.
//!
//! * `msg TEXT`, `echo TEXT`, `err TEXT`, `warn TEXT`, `verbose TEXT`
//! * `more N`: report N added (or, negative, removed) lines
//! * `showmode TEXT`: set the mode indicator (empty clears it)
//! * `source NAME LNUM` or `source -`: where subsequent errors come from
//! * `silent N`, `emsg-silent N`: `:silent` and `:silent!` nesting
//! * `filter PATTERN`, `filter! PATTERN`, `filter -`
//! * `messages [clear] [COUNT]`
//! * `confirm DEFAULT KEYS MESSAGE|BUTTON|BUTTON...`: keys as in
//!   [`parse_keys`], `-` for none
//! * `clear`: clear displayed messages

use std::io::Write;

use anyhow::{Context, bail};
use xeno_messages::{DialogKey, HlAttr, MessageContext, MessageFilter, MessageKind, SourceLocation};

use crate::sink::JsonSink;

/// One parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
	Msg(String),
	Echo(String),
	Error(String),
	Warn(String),
	Verbose(String),
	More(i64),
	Showmode(String),
	Source(Option<SourceLocation>),
	Silent(u32),
	EmsgSilent(u32),
	Filter(Option<(String, bool)>),
	Messages {
		arg: String,
		count: Option<usize>,
	},
	Confirm {
		default: usize,
		keys: Vec<DialogKey>,
		message: String,
		buttons: String,
	},
	Clear,
}

/// Parses a whole script.
pub fn parse(input: &str) -> anyhow::Result<Vec<Step>> {
	let mut steps = Vec::new();
	for (idx, line) in input.lines().enumerate() {
		if let Some(step) = parse_line(line).with_context(|| format!("script line {}", idx + 1))? {
			steps.push(step);
		}
	}
	Ok(steps)
}

/// Parses one line; `None` for blanks and comments.
pub fn parse_line(line: &str) -> anyhow::Result<Option<Step>> {
	let line = line.trim();
	if line.is_empty() || line.starts_with('#') {
		return Ok(None);
	}
	let (cmd, rest) = line.split_once(' ').unwrap_or((line, ""));

	let step = match cmd {
		"msg" => Step::Msg(rest.to_string()),
		"echo" => Step::Echo(rest.to_string()),
		"err" => Step::Error(rest.to_string()),
		"warn" => Step::Warn(rest.to_string()),
		"verbose" => Step::Verbose(rest.to_string()),
		"showmode" => Step::Showmode(rest.to_string()),
		"more" => Step::More(rest.trim().parse().context("line count")?),
		"silent" => Step::Silent(rest.trim().parse().context("silent level")?),
		"emsg-silent" => Step::EmsgSilent(rest.trim().parse().context("silent level")?),
		"source" => Step::Source(parse_source(rest.trim())?),
		"filter" | "filter!" => match rest.trim() {
			"" => bail!("filter needs a pattern or `-`"),
			"-" => Step::Filter(None),
			pattern => Step::Filter(Some((pattern.to_string(), cmd == "filter!"))),
		},
		"messages" => parse_messages(rest)?,
		"confirm" => parse_confirm(rest)?,
		"clear" => Step::Clear,
		other => bail!("unknown step `{other}`"),
	};
	Ok(Some(step))
}

fn parse_source(rest: &str) -> anyhow::Result<Option<SourceLocation>> {
	if rest == "-" {
		return Ok(None);
	}
	let Some((name, lnum)) = rest.rsplit_once(' ') else {
		bail!("expected `source NAME LNUM` or `source -`");
	};
	let lnum = lnum.parse().context("source line number")?;
	Ok(Some(SourceLocation::new(name.trim(), lnum)))
}

fn parse_messages(rest: &str) -> anyhow::Result<Step> {
	let mut arg = String::new();
	let mut count = None;
	for word in rest.split_whitespace() {
		match word.parse::<usize>() {
			Ok(n) if count.is_none() => count = Some(n),
			Ok(_) => bail!("more than one count"),
			Err(_) if arg.is_empty() => arg = word.to_string(),
			Err(_) => bail!("unexpected `{word}`"),
		}
	}
	Ok(Step::Messages { arg, count })
}

fn parse_confirm(rest: &str) -> anyhow::Result<Step> {
	let mut words = rest.splitn(3, ' ');
	let (Some(default), Some(keys), Some(spec)) = (words.next(), words.next(), words.next()) else {
		bail!("expected `confirm DEFAULT KEYS MESSAGE|BUTTON...`");
	};
	let default = default.parse().context("default button")?;
	let keys = if keys == "-" { Vec::new() } else { parse_keys(keys) };
	let Some((message, buttons)) = spec.split_once('|') else {
		bail!("confirm needs at least one button");
	};
	Ok(Step::Confirm {
		default,
		keys,
		message: message.to_string(),
		buttons: buttons.replace('|', "\n"),
	})
}

/// Parses typed keys: plain characters, plus `<CR>`, `<Esc>` and `<C-c>`.
/// Any other `<...>` name is a key that selects nothing.
pub fn parse_keys(keys: &str) -> Vec<DialogKey> {
	let mut out = Vec::new();
	let mut rest = keys;
	while let Some(c) = rest.chars().next() {
		if c == '<'
			&& let Some(end) = rest.find('>')
		{
			let key = match &rest[1..end] {
				"CR" | "Enter" | "NL" => DialogKey::Enter,
				"Esc" => DialogKey::Escape,
				"C-c" => DialogKey::Interrupt,
				_ => DialogKey::Other,
			};
			out.push(key);
			rest = &rest[end + 1..];
			continue;
		}
		out.push(DialogKey::Char(c));
		rest = &rest[c.len_utf8()..];
	}
	out
}

/// Runs `steps` against `ctx`, printing through `sink`.
pub fn run<W: Write>(ctx: &mut MessageContext, sink: &mut JsonSink<W>, steps: &[Step]) {
	for step in steps {
		tracing::debug!(?step, "replay step");
		match step {
			Step::Msg(text) => {
				ctx.msg(sink, text, HlAttr::NONE);
			}
			Step::Echo(text) => {
				let mut batch = ctx.batch(sink, MessageKind::Echo);
				batch.outtrans(text, HlAttr::NONE);
			}
			Step::Error(text) => {
				ctx.show_error(sink, text, text.contains('\n'));
			}
			Step::Warn(text) => ctx.warn(sink, text, true),
			Step::Verbose(text) => {
				ctx.verbose(sink, text);
			}
			Step::More(n) => ctx.more_lines(sink, *n),
			Step::Showmode(text) => {
				let attr = ctx.highlights().more_msg;
				ctx.puts(sink, text, attr);
				ctx.flush_showmode(sink);
			}
			Step::Source(location) => ctx.set_sourcing(location.clone()),
			Step::Silent(level) => ctx.flags.msg_silent = *level,
			Step::EmsgSilent(level) => ctx.flags.emsg_silent = *level,
			Step::Filter(None) => ctx.set_filter(None),
			Step::Filter(Some((pattern, force))) => match MessageFilter::new(pattern, *force) {
				Ok(filter) => ctx.set_filter(Some(filter)),
				Err(err) => {
					ctx.show_error(sink, &err.display_text(), false);
				}
			},
			Step::Messages { arg, count } => ctx.messages(sink, arg, *count),
			Step::Confirm {
				default,
				keys,
				message,
				buttons,
			} => {
				let choice = ctx.confirm(sink, keys.iter().copied(), message, buttons, *default);
				sink.write_value(&serde_json::json!({ "event": "confirm_choice", "choice": choice }));
			}
			Step::Clear => ctx.clear_ui(sink, true),
		}
	}
}

#[cfg(test)]
mod tests;
