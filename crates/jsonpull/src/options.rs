/// Default nesting limit, in open containers.
pub const DEFAULT_MAX_DEPTH: usize = 2048;

/// Configuration options for the [`Tokenizer`](crate::Tokenizer).
///
/// # Examples
///
/// ```rust
/// use jsonpull::{EscapeMode, StagingBuffer, Tokenizer, TokenizerOptions};
///
/// let options = TokenizerOptions {
///     max_depth: 64,
///     escape_mode: EscapeMode::Verbatim,
/// };
/// let tokenizer = Tokenizer::with_options(StagingBuffer::default(), options);
/// assert_eq!(tokenizer.max_depth(), 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenizerOptions {
    /// Maximum number of simultaneously open arrays and objects.
    ///
    /// Opening one more container than this produces
    /// [`Event::Error`](crate::Event::Error).
    ///
    /// # Default
    ///
    /// `2048`
    pub max_depth: usize,

    /// How backslash escapes inside strings reach
    /// [`current_text`](crate::Tokenizer::current_text).
    ///
    /// # Default
    ///
    /// [`EscapeMode::Resolve`]
    pub escape_mode: EscapeMode,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            escape_mode: EscapeMode::default(),
        }
    }
}

/// Treatment of escape sequences in keys and string values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapeMode {
    /// Decode escapes while accumulating: `"a\nb"` yields the three bytes
    /// `a`, line feed, `b`. `\uXXXX` is written as UTF-8, surrogate pairs are
    /// combined and unpaired surrogates become U+FFFD.
    #[default]
    Resolve,
    /// Keep the source text between the quotes untouched: `"a\nb"` yields
    /// the four bytes `a`, `\`, `n`, `b`.
    Verbatim,
}
