#![no_main]

use arbitrary::Arbitrary;
use jsonpull::{
    EscapeMode, Event, JsonTree, ParserError, StagingBuffer, Tokenizer, TokenizerOptions,
    chunk_utils::split_at_offsets,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    capacity: u8,
    verbatim: bool,
    splits: Vec<u16>,
    data: Vec<u8>,
}

type Trace = (Vec<(Event, Vec<u8>)>, Option<ParserError>);

fn trace(tokenizer: &mut Tokenizer, chunks: &[&[u8]]) -> Trace {
    let mut chunks = chunks.iter();
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
                events.push((event, tokenizer.current_text().to_vec()));
                if event.is_terminal() {
                    return (events, tokenizer.error().cloned());
                }
            }
        }
    }
}

fn tokenizer(capacity: usize, verbatim: bool) -> Tokenizer {
    let escape_mode = if verbatim {
        EscapeMode::Verbatim
    } else {
        EscapeMode::Resolve
    };
    Tokenizer::with_options(
        StagingBuffer::with_capacity(capacity),
        TokenizerOptions {
            escape_mode,
            ..TokenizerOptions::default()
        },
    )
}

fn run(input: &Input) {
    let splits: Vec<usize> = input.splits.iter().map(|&s| usize::from(s)).collect();
    let chunks = split_at_offsets(&input.data, &splits);

    // Chunking and staging capacity must not change a single event.
    let whole = trace(
        &mut tokenizer(jsonpull::DEFAULT_CAPACITY, input.verbatim),
        &[input.data.as_slice()],
    );
    let split = trace(&mut tokenizer(usize::from(input.capacity), input.verbatim), &chunks);
    assert_eq!(whole, split);

    if let Some(error) = &whole.1 {
        assert!(error.offset <= input.data.len());
        assert!(error.line >= 1 && error.column >= 1);
    }

    // Everything serde_json accepts as an array or object must be accepted too.
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(&input.data) {
        if value.is_array() || value.is_object() {
            assert!(whole.1.is_none(), "rejected valid input: {:?}", whole.1);
            assert!(JsonTree::from_slice(&input.data).is_ok());
        }
    }
}

fuzz_target!(|input: Input| run(&input));
