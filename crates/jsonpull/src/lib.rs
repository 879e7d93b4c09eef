//! An incremental, non-blocking pull tokenizer for JSON.
//!
//! A producer pushes raw bytes into a [`StagingBuffer`] as they arrive; the
//! consumer repeatedly calls [`Tokenizer::next_event`] and gets one [`Event`]
//! per call. When the staged bytes run out mid-document the tokenizer answers
//! [`Event::NeedMoreInput`] and resumes exactly where it stopped once more
//! input is supplied, so documents can be read from sockets or pipes without
//! ever blocking.
//!
//! ```
//! use jsonpull::{Event, Tokenizer};
//!
//! let mut tokenizer = Tokenizer::default();
//! let mut events = Vec::new();
//! for chunk in [&br#"{"name": "Al"#[..], &br#"ice", "age": 3"#[..], &b"0}"[..]] {
//!     tokenizer.feed(chunk);
//!     loop {
//!         match tokenizer.next_event() {
//!             Event::NeedMoreInput => break,
//!             event => events.push((event, tokenizer.current_text().to_string())),
//!         }
//!     }
//! }
//! tokenizer.finish();
//! assert_eq!(tokenizer.next_event(), Event::EndOfInput);
//!
//! assert_eq!(events[1], (Event::FieldName, "name".to_string()));
//! assert_eq!(events[2], (Event::ValueString, "Alice".to_string()));
//! assert_eq!(events[4], (Event::ValueInt, "30".to_string()));
//! ```
//!
//! With the `tree` feature (on by default), [`JsonTree`] assembles the events
//! into a [`Value`] tree, [`visit`] walks it under the control of a
//! [`TreeNavigator`], and a [`ListenerRegistry`] fans out change
//! notifications.

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod chunk_utils;
mod class;
mod error;
mod escape_buffer;
mod event;
mod mode_stack;
mod options;
mod staging;
mod table;
mod tokenizer;

#[cfg(feature = "tree")]
mod path_component;
#[cfg(feature = "tree")]
mod tree;
#[cfg(feature = "tree")]
mod value;

#[cfg(test)]
mod tests;

pub use class::{CLASS_COUNT, CharClass, classify};
#[cfg(feature = "tree")]
pub use error::TreeError;
pub use error::{ConfigError, ErrorKind, ParserError, SourceError, SyntaxError, ValueError};
pub use event::Event;
pub use options::{DEFAULT_MAX_DEPTH, EscapeMode, TokenizerOptions};
pub use staging::{DEFAULT_CAPACITY, InputSource, StagingBuffer};
pub use table::{Action, LexState, STATE_COUNT, Transition, transition};
pub use tokenizer::Tokenizer;

#[cfg(feature = "tree")]
pub use path_component::{Index, PathComponent, PathComponentFrom};
#[cfg(feature = "tree")]
pub use tree::{JsonTree, ListenerRegistry, TreeChangeListener, TreeNavigator, visit};
#[cfg(feature = "tree")]
pub use value::{Array, Map, Value};

#[doc(hidden)]
pub use alloc::vec;
