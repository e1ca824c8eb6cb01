//! Printable forms for characters that cannot be shown as-is.
//!
//! Control characters become `^X`, DEL becomes `^?`, C1 controls become
//! `<xx>` and other unprintable code points (format characters, bidi controls,
//! noncharacters) become `<xxxx>`.

/// Code point ranges treated as unprintable beyond the control characters.
const UNPRINTABLE: &[(u32, u32)] = &[
	(0x070f, 0x070f),
	(0x180b, 0x180e),
	(0x200b, 0x200f),
	(0x202a, 0x202e),
	(0x2060, 0x206f),
	(0xfeff, 0xfeff),
	(0xfff9, 0xfffb),
	(0xfffe, 0xffff),
];

/// Returns whether `c` can be written to the message area unchanged.
///
/// Tab, newline and carriage return are not printable; multiline output
/// writes them through separately.
pub fn is_printable(c: char) -> bool {
	let cp = c as u32;
	if cp < 0x20 || (0x7f..0xa0).contains(&cp) {
		return false;
	}
	!UNPRINTABLE.iter().any(|&(lo, hi)| (lo..=hi).contains(&cp))
}

/// Printable replacement for `c`, or `None` when `c` is printable.
pub fn transchar(c: char) -> Option<String> {
	if is_printable(c) {
		return None;
	}
	let cp = c as u32;
	Some(match cp {
		0x7f => "^?".to_string(),
		0..0x20 => format!("^{}", char::from(b'@' + cp as u8)),
		0x80..0x100 => format!("<{cp:02x}>"),
		_ => format!("<{cp:04x}>"),
	})
}
