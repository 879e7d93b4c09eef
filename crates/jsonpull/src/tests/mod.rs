use alloc::{string::String, vec::Vec};

use crate::{Event, InputSource, ParserError, StagingBuffer, Tokenizer};


/// Event paired with the token text read right after it was returned.
pub(crate) type Recorded = (Event, Option<String>);

/// Drives `tokenizer` over `chunks`, supplying the next piece of input each
/// time it asks for more and marking the producer done after the last one.
///
/// `NeedMoreInput` is not recorded. Returns the events up to the terminal
/// one and the error, if any.
pub(crate) fn record<'a, S, I>(
    tokenizer: &mut Tokenizer<S>,
    chunks: I,
) -> (Vec<Recorded>, Option<ParserError>)
where
    S: InputSource,
    I: IntoIterator<Item = &'a [u8]>,
{
    let mut chunks = chunks.into_iter();
    let mut pending: &[u8] = &[];
    let mut events = Vec::new();
    loop {
        match tokenizer.next_event() {
            Event::NeedMoreInput => {
                while pending.is_empty() {
                    match chunks.next() {
                        Some(chunk) => pending = chunk,
                        None => break,
                    }
                }
                if pending.is_empty() {
                    tokenizer.finish();
                } else {
                    let accepted = tokenizer.feed(pending);
                    pending = &pending[accepted..];
                }
            }
            event => {
                let text = event
                    .has_text()
                    .then(|| String::from_utf8_lossy(&tokenizer.current_text()[..]).into_owned());
                events.push((event, text));
                if event.is_terminal() {
                    return (events, tokenizer.error().cloned());
                }
            }
        }
    }
}

/// Records `input` fed in one piece through a default tokenizer.
pub(crate) fn record_whole(input: &[u8]) -> (Vec<Recorded>, Option<ParserError>) {
    record(&mut Tokenizer::default(), [input])
}

/// Just the events of `input`.
pub(crate) fn events(input: &[u8]) -> Vec<Event> {
    record_whole(input).0.into_iter().map(|(event, _)| event).collect()
}

/// Records `input` fed one byte at a time through a one-byte staging buffer.
pub(crate) fn record_bytewise(input: &[u8]) -> (Vec<Recorded>, Option<ParserError>) {
    let mut tokenizer = Tokenizer::new(StagingBuffer::with_capacity(1));
    record(&mut tokenizer, input.chunks(1))
}
