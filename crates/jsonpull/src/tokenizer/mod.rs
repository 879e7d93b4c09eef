//! Incremental pull tokenizer.
//!
//! Overview
//! - The [`Tokenizer`] pulls one unit at a time from an [`InputSource`],
//!   classifies it, and looks up `(state, class)` in the transition table.
//!   A plain state change either accumulates the unit into the token buffer
//!   or, on arrival in [`LexState::Ok`], completes the token that was being
//!   lexed. A structural [`Action`] opens or closes containers, resolves a
//!   closing quote into a key or a string value, and handles separators.
//! - The tokenizer never blocks. When the source has nothing staged and the
//!   producer has not finished, [`Tokenizer::next_event`] returns
//!   [`Event::NeedMoreInput`] and resumes exactly where it stopped once more
//!   bytes are supplied, including inside a half-read token.
//!
//! Pending events
//! - A single unit can finish a number and close a container at once
//!   (`5}`). The value event is returned first and the close event is held
//!   in a second slot, returned by the following call without consuming
//!   input.
//!
//! Token text
//! - The text of the last key, string or number stays readable through
//!   [`Tokenizer::current_text`] until the next call to `next_event`.
//!
//! Errors
//! - Every failure yields [`Event::Error`]. The tokenizer keeps returning it
//!   afterwards, and [`Tokenizer::error`] tells what went wrong and where.

use alloc::vec::Vec;

use bstr::BStr;

use crate::{
    class::classify,
    error::{ConfigError, ParserError, SyntaxError, ValueError},
    escape_buffer::UnicodeEscapeBuffer,
    event::Event,
    mode_stack::{Mode, ModeStack, StackError},
    options::{EscapeMode, TokenizerOptions},
    staging::{InputSource, StagingBuffer},
    table::{Action, LexState, Transition, transition},
};

/// Pull tokenizer over an injected [`InputSource`].
///
/// # Examples
///
/// ```
/// use jsonpull::{Event, Tokenizer};
///
/// let mut tokenizer = Tokenizer::default();
/// tokenizer.feed(b"[4");
/// assert_eq!(tokenizer.next_event(), Event::StartArray);
/// assert_eq!(tokenizer.next_event(), Event::NeedMoreInput);
///
/// tokenizer.feed(b"2]");
/// tokenizer.finish();
/// assert_eq!(tokenizer.next_event(), Event::ValueInt);
/// assert_eq!(tokenizer.current_int(), Ok(42));
/// assert_eq!(tokenizer.next_event(), Event::EndArray);
/// assert_eq!(tokenizer.next_event(), Event::EndOfInput);
/// ```
#[derive(Debug)]
pub struct Tokenizer<S: InputSource = StagingBuffer> {
    source: S,

    state: LexState,
    modes: ModeStack,

    /// Text of the token being lexed, or of the last completed one.
    token: Vec<u8>,
    escapes: UnicodeEscapeBuffer,
    escape_mode: EscapeMode,

    primary: Option<Event>,
    secondary: Option<Event>,
    last_event: Option<Event>,
    /// Set once `EndOfInput` or `Error` was returned.
    terminal: Option<Event>,
    error: Option<ParserError>,

    /// Units consumed so far.
    offset: usize,
    line: usize,
    column: usize,
    after_newline: bool,
}

impl Default for Tokenizer<StagingBuffer> {
    fn default() -> Self {
        Self::new(StagingBuffer::default())
    }
}

impl<S: InputSource> Tokenizer<S> {
    /// Creates a tokenizer reading from `source` with default options.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self::with_options(source, TokenizerOptions::default())
    }

    /// Creates a tokenizer reading from `source`.
    #[must_use]
    pub fn with_options(source: S, options: TokenizerOptions) -> Self {
        Self {
            source,
            state: LexState::Start,
            modes: ModeStack::new(options.max_depth),
            token: Vec::new(),
            escapes: UnicodeEscapeBuffer::new(),
            escape_mode: options.escape_mode,
            primary: None,
            secondary: None,
            last_event: None,
            terminal: None,
            error: None,
            offset: 0,
            line: 1,
            column: 0,
            after_newline: false,
        }
    }

    /// Advances to the next event.
    ///
    /// Consumes units from the source until an event is known, returning
    /// [`Event::NeedMoreInput`] if the source runs dry before that. A buffered
    /// second event is returned without consuming anything.
    pub fn next_event(&mut self) -> Event {
        let event = self.advance();
        self.last_event = Some(event);
        event
    }

    fn advance(&mut self) -> Event {
        if let Some(event) = self.terminal {
            return event;
        }
        loop {
            #[cfg(any(test, feature = "fuzzing"))]
            assert!(
                self.primary.is_some() || self.secondary.is_none(),
                "Internal error: second pending event without a first"
            );
            if let Some(event) = self.primary.take() {
                self.primary = self.secondary.take();
                return event;
            }
            if !self.source.has_input() {
                if self.source.is_producer_done() {
                    return self.end_of_input();
                }
                return Event::NeedMoreInput;
            }
            let Ok(unit) = self.source.next_unit() else {
                return Event::NeedMoreInput;
            };
            if let Err(source) = self.step(unit) {
                return self.fail(source);
            }
        }
    }

    fn step(&mut self, unit: u8) -> Result<(), SyntaxError> {
        self.advance_position(unit);
        let class = classify(unit).ok_or(SyntaxError::InvalidCharacter(unit))?;
        match transition(self.state, class) {
            Transition::To(next) => {
                if next.is_in_token() {
                    self.accumulate(next, unit);
                } else if next == LexState::Ok {
                    self.primary = completed_token(self.state);
                }
                self.state = next;
                Ok(())
            }
            Transition::Act(action) => self.perform(action, unit),
            Transition::Reject => Err(SyntaxError::UnexpectedCharacter(unit)),
        }
    }

    fn accumulate(&mut self, next: LexState, unit: u8) {
        if !self.state.is_in_token() {
            // First unit of a new token. The opening quote is not content.
            self.token.clear();
            self.escapes.reset();
            if next != LexState::String {
                self.token.push(unit);
            }
            return;
        }
        if self.escape_mode == EscapeMode::Verbatim {
            self.token.push(unit);
            return;
        }
        match (self.state, next) {
            (LexState::String, LexState::Escape) => {}
            (LexState::Escape, LexState::U1) => self.escapes.begin(),
            (LexState::Escape, _) => {
                self.escapes.flush(&mut self.token);
                self.token.push(unescape(unit));
            }
            (LexState::U1 | LexState::U2 | LexState::U3 | LexState::U4, _) => {
                self.escapes.feed(unit, &mut self.token);
            }
            (LexState::String, _) => {
                self.escapes.flush(&mut self.token);
                self.token.push(unit);
            }
            _ => self.token.push(unit),
        }
    }

    fn perform(&mut self, action: Action, unit: u8) -> Result<(), SyntaxError> {
        match action {
            Action::CloseEmptyObject => {
                self.pop(Mode::Key, unit)?;
                self.state = LexState::Ok;
                self.primary = Some(Event::EndObject);
            }
            Action::CloseObject => {
                self.pop(Mode::Object, unit)?;
                self.close_container(Event::EndObject);
            }
            Action::CloseArray => {
                self.pop(Mode::Array, unit)?;
                self.close_container(Event::EndArray);
            }
            Action::OpenObject => {
                self.push(Mode::Key)?;
                self.state = LexState::Object;
                self.primary = Some(Event::StartObject);
            }
            Action::OpenArray => {
                self.push(Mode::Array)?;
                self.state = LexState::Array;
                self.primary = Some(Event::StartArray);
            }
            Action::Quote => {
                self.escapes.flush(&mut self.token);
                if self.modes.top() == Some(Mode::Key) {
                    self.state = LexState::Colon;
                    self.primary = Some(Event::FieldName);
                } else {
                    self.state = LexState::Ok;
                    self.primary = Some(Event::ValueString);
                }
            }
            Action::Comma => match self.modes.top() {
                Some(Mode::Object) => {
                    self.modes
                        .flip(Mode::Object, Mode::Key)
                        .map_err(|_| SyntaxError::UnexpectedSeparator(unit))?;
                    self.primary = number_token(self.state);
                    self.state = LexState::Key;
                }
                Some(Mode::Array) => {
                    self.primary = number_token(self.state);
                    self.state = LexState::Value;
                }
                _ => return Err(SyntaxError::UnexpectedSeparator(unit)),
            },
            Action::Colon => {
                self.modes
                    .flip(Mode::Key, Mode::Object)
                    .map_err(|_| SyntaxError::UnexpectedSeparator(unit))?;
                self.state = LexState::Value;
            }
        }
        Ok(())
    }

    /// Emits `end`, preceded by the number it terminates if there is one.
    fn close_container(&mut self, end: Event) {
        match number_token(self.state) {
            Some(value) => {
                tracing::trace!(?value, ?end, "queueing close behind value");
                self.primary = Some(value);
                self.secondary = Some(end);
            }
            None => self.primary = Some(end),
        }
        self.state = LexState::Ok;
    }

    fn push(&mut self, mode: Mode) -> Result<(), SyntaxError> {
        self.modes
            .push(mode)
            .map_err(|_| SyntaxError::DepthLimitExceeded(self.modes.max_depth()))
    }

    fn pop(&mut self, mode: Mode, unit: u8) -> Result<(), SyntaxError> {
        self.modes.pop(mode).map_err(|err| match err {
            StackError::Mismatch { .. } => SyntaxError::MismatchedClose(unit),
            StackError::TooDeep => SyntaxError::DepthLimitExceeded(self.modes.max_depth()),
        })
    }

    fn end_of_input(&mut self) -> Event {
        if let Some(event) = number_token(self.state) {
            self.state = LexState::Ok;
            return event;
        }
        if self.state == LexState::Ok && self.modes.pop(Mode::Done).is_ok() {
            self.terminal = Some(Event::EndOfInput);
            return Event::EndOfInput;
        }
        if self.after_newline {
            self.line += 1;
            self.column = 0;
            self.after_newline = false;
        }
        self.column += 1;
        self.fail(SyntaxError::UnexpectedEndOfInput)
    }

    fn fail(&mut self, source: SyntaxError) -> Event {
        let error = ParserError {
            source,
            offset: self.offset,
            line: self.line,
            column: self.column,
        };
        tracing::debug!(
            kind = ?error.kind(),
            offset = error.offset,
            line = error.line,
            column = error.column,
            "tokenizer failed: {error}"
        );
        self.error = Some(error);
        self.primary = None;
        self.secondary = None;
        self.terminal = Some(Event::Error);
        Event::Error
    }

    fn advance_position(&mut self, unit: u8) {
        self.offset += 1;
        if self.after_newline {
            self.line += 1;
            self.column = 0;
        }
        self.column += 1;
        self.after_newline = unit == b'\n';
    }

    /// Raw text of the last key, string or number.
    ///
    /// Only meaningful right after [`Event::FieldName`], [`Event::ValueString`],
    /// [`Event::ValueInt`] or [`Event::ValueDouble`]; the next call to
    /// [`next_event`](Self::next_event) may overwrite it. Bytes `>= 0x80` are
    /// passed through unchanged, so valid UTF-8 input yields valid UTF-8 text.
    #[must_use]
    pub fn current_text(&self) -> &BStr {
        BStr::new(&self.token)
    }

    /// The last key or string value as `&str`.
    ///
    /// # Errors
    ///
    /// [`ValueError::NotAvailable`] unless the last event was
    /// [`Event::FieldName`] or [`Event::ValueString`];
    /// [`ValueError::InvalidUtf8`] if the text is not UTF-8.
    pub fn current_str(&self) -> Result<&str, ValueError> {
        self.expect_last("string", &[Event::FieldName, Event::ValueString])?;
        core::str::from_utf8(&self.token).map_err(|_| ValueError::InvalidUtf8)
    }

    /// The last integer value.
    ///
    /// # Errors
    ///
    /// [`ValueError::NotAvailable`] unless the last event was
    /// [`Event::ValueInt`]; [`ValueError::IntegerOverflow`] if it does not fit
    /// in an `i64`.
    pub fn current_int(&self) -> Result<i64, ValueError> {
        self.expect_last("integer", &[Event::ValueInt])?;
        // Digits only, as guaranteed by the grammar, so failing means overflow.
        core::str::from_utf8(&self.token)
            .ok()
            .and_then(|digits| digits.parse().ok())
            .ok_or(ValueError::IntegerOverflow)
    }

    /// The last number value as a double. Integers are accepted as well.
    ///
    /// # Errors
    ///
    /// [`ValueError::NotAvailable`] unless the last event was
    /// [`Event::ValueDouble`] or [`Event::ValueInt`].
    pub fn current_double(&self) -> Result<f64, ValueError> {
        self.expect_last("number", &[Event::ValueDouble, Event::ValueInt])?;
        core::str::from_utf8(&self.token)
            .ok()
            .and_then(|digits| digits.parse().ok())
            .ok_or(ValueError::InvalidNumber)
    }

    fn expect_last(&self, expected: &'static str, allowed: &[Event]) -> Result<(), ValueError> {
        match self.last_event {
            Some(event) if allowed.contains(&event) => Ok(()),
            found => Err(ValueError::NotAvailable { expected, found }),
        }
    }

    /// The event returned by the last call to [`next_event`](Self::next_event).
    #[must_use]
    pub fn last_event(&self) -> Option<Event> {
        self.last_event
    }

    /// Details of the failure once [`Event::Error`] was returned.
    #[must_use]
    pub fn error(&self) -> Option<&ParserError> {
        self.error.as_ref()
    }

    /// Maximum number of simultaneously open containers.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.modes.max_depth()
    }

    /// Changes the nesting limit.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ParseInProgress`] once any input has been consumed.
    pub fn set_max_depth(&mut self, max_depth: usize) -> Result<(), ConfigError> {
        if self.offset > 0 {
            return Err(ConfigError::ParseInProgress);
        }
        self.modes.set_max_depth(max_depth);
        Ok(())
    }

    /// Number of containers currently open.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.modes.depth()
    }

    /// Number of units consumed so far.
    #[must_use]
    pub fn parsed_character_count(&self) -> usize {
        self.offset
    }

    /// The input source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The input source, for supplying more bytes.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Gives back the input source.
    pub fn into_source(self) -> S {
        self.source
    }

    /// Supplies bytes to the source; returns how many were accepted.
    pub fn feed(&mut self, bytes: &[u8]) -> usize {
        self.source.supply(bytes)
    }

    /// Signals that no more input will be supplied.
    pub fn finish(&mut self) {
        self.source.mark_producer_done();
    }
}

/// Event for a token completed by leaving `state`.
fn completed_token(state: LexState) -> Option<Event> {
    match state {
        LexState::True => Some(Event::ValueTrue),
        LexState::False => Some(Event::ValueFalse),
        LexState::Null => Some(Event::ValueNull),
        _ => number_token(state),
    }
}

/// Event for a number that may legally end in `state`.
fn number_token(state: LexState) -> Option<Event> {
    match state {
        LexState::Zero | LexState::Integer => Some(Event::ValueInt),
        LexState::Fraction | LexState::ExponentDigits => Some(Event::ValueDouble),
        _ => None,
    }
}

fn unescape(unit: u8) -> u8 {
    match unit {
        b'b' => 0x08,
        b'f' => 0x0C,
        b'n' => b'\n',
        b'r' => b'\r',
        b't' => b'\t',
        other => other,
    }
}
