use std::fmt;

/// Label classifying where a displayed message came from.
///
/// The label travels with each delivered batch so the presentation layer can
/// style or route messages (e.g. show errors in a separate area). A batch
/// without a kind is delivered with an empty label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
	/// Error message (`emsg`).
	Error,
	/// Warning message (`wmsg`).
	Warning,
	/// Confirm dialog prompt.
	Confirm,
	/// `:echo` output.
	Echo,
	/// `:echomsg` output.
	EchoMsg,
	/// `:echoerr` output.
	EchoErr,
	/// Verbose logging.
	Verbose,
	/// Hit-enter prompt.
	ReturnPrompt,
	/// Any other label supplied by a caller.
	Custom(&'static str),
}

impl MessageKind {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Error => "emsg",
			Self::Warning => "wmsg",
			Self::Confirm => "confirm",
			Self::Echo => "echo",
			Self::EchoMsg => "echomsg",
			Self::EchoErr => "echoerr",
			Self::Verbose => "verbose",
			Self::ReturnPrompt => "return_prompt",
			Self::Custom(label) => label,
		}
	}

	/// Wire label for an optional kind.
	pub fn label(kind: Option<Self>) -> &'static str {
		kind.map_or("", Self::as_str)
	}
}

impl fmt::Display for MessageKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
