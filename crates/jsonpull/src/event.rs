//! Events produced by the tokenizer.
//!
//! Every call to [`Tokenizer::next_event`](crate::Tokenizer::next_event)
//! yields exactly one [`Event`]. Value events carry no payload; the token
//! text is read through the tokenizer's accessors before the next call.
//!
//! # Examples
//!
//! ```
//! use jsonpull::Event;
//!
//! assert_eq!(Event::StartObject.code(), 1);
//! assert_eq!(Event::from_code(99), Some(Event::EndOfInput));
//! assert!(Event::ValueInt.is_value());
//! ```

/// One step of the event stream.
///
/// The discriminants are a stable contract shared with consumers that work
/// with raw integer codes.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Event {
    /// The input is malformed. Terminal.
    Error = -1,
    /// No staged input is left and the producer has not finished.
    NeedMoreInput = 0,
    /// `{`
    StartObject = 1,
    /// `}`
    EndObject = 2,
    /// `[`
    StartArray = 3,
    /// `]`
    EndArray = 4,
    /// An object key; the text is available.
    FieldName = 5,
    /// A string value; the text is available.
    ValueString = 6,
    /// An integer value.
    ValueInt = 7,
    /// A number with a fraction or an exponent.
    ValueDouble = 8,
    /// `true`
    ValueTrue = 9,
    /// `false`
    ValueFalse = 10,
    /// `null`
    ValueNull = 11,
    /// The document is complete. Terminal.
    EndOfInput = 99,
}

impl Event {
    /// The stable integer code of this event.
    #[inline]
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Looks up the event with the given integer code.
    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            -1 => Self::Error,
            0 => Self::NeedMoreInput,
            1 => Self::StartObject,
            2 => Self::EndObject,
            3 => Self::StartArray,
            4 => Self::EndArray,
            5 => Self::FieldName,
            6 => Self::ValueString,
            7 => Self::ValueInt,
            8 => Self::ValueDouble,
            9 => Self::ValueTrue,
            10 => Self::ValueFalse,
            11 => Self::ValueNull,
            99 => Self::EndOfInput,
            _ => return None,
        })
    }

    /// Returns `true` for the scalar value events.
    #[must_use]
    pub const fn is_value(self) -> bool {
        matches!(
            self,
            Self::ValueString
                | Self::ValueInt
                | Self::ValueDouble
                | Self::ValueTrue
                | Self::ValueFalse
                | Self::ValueNull
        )
    }

    /// Returns `true` for [`Event::EndOfInput`] and [`Event::Error`], after
    /// which the tokenizer produces nothing else.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::EndOfInput | Self::Error)
    }

    /// Returns `true` if [`Tokenizer::current_text`](crate::Tokenizer::current_text)
    /// holds the token that produced this event.
    #[must_use]
    pub const fn has_text(self) -> bool {
        matches!(
            self,
            Self::FieldName | Self::ValueString | Self::ValueInt | Self::ValueDouble
        )
    }
}

impl From<Event> for i32 {
    fn from(event: Event) -> Self {
        event.code()
    }
}

#[cfg(test)]
mod tests {
    use super::Event;

    #[test]
    fn codes_round_trip() {
        for code in -2..=100 {
            if let Some(event) = Event::from_code(code) {
                assert_eq!(event.code(), code);
            }
        }
        assert_eq!(Event::from_code(12), None);
        assert_eq!(Event::from_code(98), None);
    }

    #[test]
    fn stable_codes() {
        assert_eq!(i32::from(Event::Error), -1);
        assert_eq!(i32::from(Event::NeedMoreInput), 0);
        assert_eq!(i32::from(Event::FieldName), 5);
        assert_eq!(i32::from(Event::ValueNull), 11);
        assert_eq!(i32::from(Event::EndOfInput), 99);
    }

    #[test]
    fn classification() {
        assert!(Event::ValueNull.is_value());
        assert!(!Event::FieldName.is_value());
        assert!(Event::Error.is_terminal());
        assert!(!Event::NeedMoreInput.is_terminal());
        assert!(Event::ValueDouble.has_text());
        assert!(!Event::ValueTrue.has_text());
    }
}
