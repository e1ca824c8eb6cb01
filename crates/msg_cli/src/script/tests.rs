use pretty_assertions::assert_eq;
use serde_json::Value;

use super::*;

fn replay(script: &str) -> Vec<Value> {
	let steps = parse(script).unwrap();
	let mut ctx = MessageContext::default();
	let mut sink = JsonSink::new(Vec::new());
	run(&mut ctx, &mut sink, &steps);
	let out = sink.finish().unwrap();
	String::from_utf8(out)
		.unwrap()
		.lines()
		.map(|line| serde_json::from_str(line).unwrap())
		.collect()
}

#[test]
fn parses_steps() {
	let steps = parse(
		"# comment\n\
		 msg hello world\n\
		 \n\
		 source init.nu 12\n\
		 source -\n\
		 filter! ^E\\d+\n\
		 messages clear 3\n\
		 confirm 2 x<CR> Save?|&Yes|&No\n\
		 more -4\n",
	)
	.unwrap();
	assert_eq!(
		steps,
		vec![
			Step::Msg("hello world".to_string()),
			Step::Source(Some(SourceLocation::new("init.nu", 12))),
			Step::Source(None),
			Step::Filter(Some(("^E\\d+".to_string(), true))),
			Step::Messages {
				arg: "clear".to_string(),
				count: Some(3),
			},
			Step::Confirm {
				default: 2,
				keys: vec![DialogKey::Char('x'), DialogKey::Enter],
				message: "Save?".to_string(),
				buttons: "&Yes\n&No".to_string(),
			},
			Step::More(-4),
		]
	);
}

#[test]
fn parse_errors_name_the_line() {
	let err = parse("msg ok\nbogus step\n").unwrap_err();
	assert_eq!(err.to_string(), "script line 2");
	assert!(format!("{err:#}").contains("unknown step `bogus`"));

	assert!(parse_line("more lots").is_err());
	assert!(parse_line("source init.nu").is_err());
	assert!(parse_line("confirm 1 y Question only").is_err());
	assert!(parse_line("messages 1 2").is_err());
}

#[test]
fn parses_special_keys() {
	assert_eq!(
		parse_keys("a<Esc><C-c><Left><"),
		vec![
			DialogKey::Char('a'),
			DialogKey::Escape,
			DialogKey::Interrupt,
			DialogKey::Other,
			DialogKey::Char('<'),
		]
	);
}

#[test]
fn replay_prints_events() {
	let events = replay("msg hello\nerr E1: broken\nconfirm 1 n Save?|&Yes|&No\nmessages 2\n");
	let names: Vec<&str> = events.iter().map(|e| e["event"].as_str().unwrap()).collect();
	assert_eq!(
		names,
		vec!["msg_show", "msg_show", "msg_show", "confirm_choice", "msg_history_show"]
	);
	assert_eq!(events[1]["kind"], "emsg");
	assert_eq!(events[1]["chunks"][0]["attr"], 1);
	assert_eq!(events[2]["kind"], "confirm");
	assert_eq!(events[3]["choice"], 2);
	assert_eq!(events[4]["entries"][0]["content"][0]["text"], "hello");
	assert_eq!(events[4]["entries"][1]["kind"], "emsg");
}

#[test]
fn invalid_filter_is_displayed() {
	let events = replay("filter (\nmsg after\n");
	assert_eq!(events[0]["kind"], "emsg");
	assert!(events[0]["chunks"][0]["text"].as_str().unwrap().starts_with("E383:"));
	// No filter was installed.
	assert_eq!(events[1]["chunks"][0]["text"], "after");
}

#[test]
fn silent_errors_are_hidden() {
	let events = replay("emsg-silent 1\nerr E1: hidden\nemsg-silent 0\nshowmode -- INSERT --\n");
	assert_eq!(events.len(), 1);
	assert_eq!(events[0]["event"], "msg_showmode");
	assert_eq!(events[0]["chunks"][0]["text"], "-- INSERT --");
}
