//! Message pipeline for the editor.
//!
//! Turns plain and highlighted text from error reporting, command feedback,
//! dialogs and verbose logging into three outputs:
//!
//! - batched [`Chunk`]s delivered to a [`UiSink`] (the presentation layer,
//!   possibly remote)
//! - a bounded scrollback [`HistoryLog`]
//! - redirected copies of the output (capture buffer, redirect target,
//!   verbose file)
//!
//! All state lives in one [`MessageContext`] per session. Operations that may
//! deliver to the presentation layer take the sink as an explicit argument, and
//! the sink receives the context back so it can re-enter (a redraw that
//! produces another message). Re-entry is capped at three levels.

/// Attribute-coalescing chunk batches.
pub mod chunks;
/// `:messages` and `:confirm` command surfaces.
pub mod commands;
/// Message pipeline options.
pub mod config;
/// Confirm dialog prompt and hotkey encoding.
pub mod dialog;
/// The emission state machine.
pub mod emit;
/// Error types.
pub mod error;
/// `:filter` pattern matching for messages.
pub mod filter;
/// Highlight attributes and semantic highlight classes.
pub mod highlight;
/// Bounded message history.
pub mod history;
/// Message kind labels.
pub mod kind;
/// Output redirection (capture, redirect target, verbose file).
pub mod redirect;
/// Presentation layer contract.
pub mod sink;
/// Source location banners for error messages.
pub mod source;
/// Printable translation of control and unprintable characters.
pub mod transchar;
/// Display-width aware truncation.
pub mod width;

pub use chunks::{Batch, Chunk, ChunkEmitter};
pub use commands::MessagesCommand;
pub use config::MessageOptions;
pub use dialog::{DialogAnswer, DialogKey, DialogSpec};
pub use emit::{ErrorThrower, MessageBatch, MessageContext, MessageFlags, ShowOptions, ThrowOutcome};
pub use error::{MessageError, Result};
pub use filter::MessageFilter;
pub use highlight::{HighlightTable, HlAttr};
pub use history::{HistoryContent, HistoryItem, HistoryLog, MessageHistoryEntry};
pub use kind::MessageKind;
pub use redirect::{RedirectTarget, Redirection};
pub use sink::{RecordingSink, UiEvent, UiSink};
pub use source::{SourceLocation, SourceTracker};
pub use width::{clip_to_capacity, display_width, truncate_to_width};
