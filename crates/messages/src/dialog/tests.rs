use pretty_assertions::assert_eq;
use rstest::rstest;

use super::*;

#[test]
fn declared_hotkeys_with_default() {
	let spec = DialogSpec::encode("Save changes?", "&Yes\n&No", 1);
	assert_eq!(spec.hotkeys, vec!['y', 'n']);
	assert_eq!(spec.prompt, "\nSave changes?\n[Y]es, (N)o: ");
	assert_eq!(spec.choices(), "[Y]es, (N)o");
	assert_eq!(&spec.prompt[..spec.choices_start], "\nSave changes?\n");
}

#[test]
fn implicit_hotkeys_use_first_character() {
	let spec = DialogSpec::encode("Proceed?", "OK\nCancel", 2);
	assert_eq!(spec.hotkeys, vec!['o', 'c']);
	assert_eq!(spec.choices(), "(O)K, [C]ancel");
}

#[test]
fn hotkey_inside_label() {
	let spec = DialogSpec::encode("Quit?", DialogAnswer::YES_NO_ALL_CANCEL, 0);
	assert_eq!(spec.hotkeys, vec!['y', 'n', 'a', 'd', 'c']);
	assert_eq!(spec.choices(), "(Y)es, (N)o, Save (A)ll, (D)iscard All, (C)ancel");
}

#[rstest]
#[case::escaped_marker("Fish && &Chips", "Fish & (C)hips", 'c')]
#[case::escaped_only("R&&D", "(R)&D", 'r')]
#[case::later_marker_wins("&Load &File", "Load (F)ile", 'f')]
#[case::wide_character("&漢字", "(漢)字", '漢')]
#[case::combining_mark("e\u{301}tude", "(e\u{301})tude", 'e')]
#[case::empty_label("", "()", '\0')]
fn label_encoding(#[case] label: &str, #[case] rendered: &str, #[case] hotkey: char) {
	let spec = DialogSpec::encode("", label, 0);
	assert_eq!(spec.choices(), rendered);
	assert_eq!(spec.hotkeys, vec![hotkey]);
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "hotkey marker at end")]
fn trailing_marker_asserts_in_debug() {
	DialogSpec::encode("", "Yes&", 1);
}

#[test]
fn one_hotkey_per_button() {
	for buttons in ["A", "A\nB", "&x\n&&y\n\nz&&"] {
		let spec = DialogSpec::encode("msg", buttons, 1);
		assert_eq!(spec.button_count(), buttons.split('\n').count());
	}
}

#[rstest]
#[case(DialogKey::Char('y'), Some(1))]
#[case(DialogKey::Char('N'), Some(2))]
#[case(DialogKey::Char('C'), Some(3))]
#[case(DialogKey::Char('x'), None)]
#[case(DialogKey::Enter, Some(2))]
#[case(DialogKey::Escape, Some(0))]
#[case(DialogKey::Interrupt, Some(0))]
#[case(DialogKey::Other, None)]
fn resolve_keys(#[case] key: DialogKey, #[case] expected: Option<usize>) {
	let spec = DialogSpec::encode("Save?", DialogAnswer::YES_NO_CANCEL, 2);
	assert_eq!(spec.resolve(key), expected);
}

#[test]
fn answers_map_choices() {
	assert_eq!(DialogAnswer::yes_no(1), DialogAnswer::Yes);
	assert_eq!(DialogAnswer::yes_no(0), DialogAnswer::No);
	assert_eq!(DialogAnswer::yes_no_cancel(0), DialogAnswer::Cancel);
	assert_eq!(DialogAnswer::yes_no_cancel(2), DialogAnswer::No);
	assert_eq!(DialogAnswer::yes_no_all_cancel(3), DialogAnswer::All);
	assert_eq!(DialogAnswer::yes_no_all_cancel(4), DialogAnswer::DiscardAll);
	assert_eq!(DialogAnswer::yes_no_all_cancel(5), DialogAnswer::Cancel);
}
