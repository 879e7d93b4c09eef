#![allow(missing_docs, dead_code)]
#![expect(clippy::needless_raw_string_hashes)]

use core::fmt::Write;

use jsonpull::{Event, InputSource, Tokenizer};

pub const ORIGINAL: &str = r#"
{
    "sensor": {
        "id": "probe-7",
        "active": true,
        "offset": null
    },
    "readings": [
        12,
        -3,
        0.25
    ],
    "notes": [
        "say \"hi\"",
        "café"
    ],
    "grid": [
        [
            0
        ],
        []
    ],
    "meta": {}
}"#;

// The compact form of `ORIGINAL`, cut mid-token and on structural seams.
#[rustfmt::skip]
pub const STREAM: [&str; 11] = [
    r#"{"sensor":{"id":"pro"#,          // inside a string value
    r#"be-7","active":tr"#,             // inside `true`
    r#"ue,"offset":nu"#,                // inside `null`
    r#"ll},"readings":[1"#,             // inside a number
    r#"2,-"#,                           // after a lone minus sign
    r#"3,0."#,                          // after the decimal point
    r#"25],"notes":["say \""#,          // right after an escape
    r#"hi\"","caf"#,                    // before a multi-byte character
    r#"é"],"grid":[[0"#,                // a zero awaiting its terminator
    r#"],[]],"meta":{"#,                // an empty array, then an open object
    r#"}}"#,                            // empty object close, then the root
];

/// One line per event: its name, then the token text where it has one.
/// `NeedMoreInput` marks each chunk boundary; a failure adds an `error:` line.
pub fn render_events<S: InputSource>(tokenizer: &mut Tokenizer<S>, stream: &[&[u8]]) -> String {
    let mut out = String::new();
    for chunk in stream {
        let mut rest = *chunk;
        while !rest.is_empty() {
            let accepted = tokenizer.feed(rest);
            rest = &rest[accepted..];
            if drain(&mut out, tokenizer) {
                return out;
            }
        }
    }
    tokenizer.finish();
    drain(&mut out, tokenizer);
    out
}

/// Renders events until more input is needed; `true` once a terminal event
/// was seen.
fn drain<S: InputSource>(out: &mut String, tokenizer: &mut Tokenizer<S>) -> bool {
    loop {
        let event = tokenizer.next_event();
        push_event(out, tokenizer, event);
        if event.is_terminal() {
            return true;
        }
        if event == Event::NeedMoreInput {
            return false;
        }
    }
}

fn push_event<S: InputSource>(out: &mut String, tokenizer: &Tokenizer<S>, event: Event) {
    if event.has_text() {
        writeln!(out, "{event:?} {:?}", tokenizer.current_text().to_string()).unwrap();
    } else {
        writeln!(out, "{event:?}").unwrap();
    }
    if let Some(error) = tokenizer.error().filter(|_| event == Event::Error) {
        writeln!(out, "error: {error}").unwrap();
    }
}

#[test]
fn stream_is_the_compact_original() {
    let streamed = STREAM.join("");

    let value: serde_json::Value = serde_json::from_str(ORIGINAL).unwrap();
    let original = serde_json::to_string(&value).unwrap();

    assert_eq!(streamed, original);
}
