//! Decoding of `\uXXXX` escape sequences into UTF-8.
//!
//! The transition table has already validated that exactly four hexadecimal
//! digits follow `\u`, so feeding never fails. A high surrogate is held back
//! until the next code unit shows whether it completes a pair; anything that
//! cannot form a valid scalar value is written as U+FFFD.
use alloc::vec::Vec;

const REPLACEMENT: char = char::REPLACEMENT_CHARACTER;

#[derive(Debug, Default)]
/// Accumulates the hex digits of one escape and pairs UTF-16 surrogates
/// across consecutive escapes.
pub(crate) struct UnicodeEscapeBuffer {
    code_unit: u16,
    len: u8,
    high_surrogate: Option<u16>,
}

impl UnicodeEscapeBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Forgets any digits and any pending surrogate.
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    /// Starts a new `\u` escape, keeping a pending high surrogate.
    pub(crate) fn begin(&mut self) {
        self.code_unit = 0;
        self.len = 0;
    }

    /// Feeds one hex digit. After the fourth digit the decoded text (if any is
    /// ready) is appended to `out`.
    pub(crate) fn feed(&mut self, digit: u8, out: &mut Vec<u8>) {
        let nibble = char::from(digit)
            .to_digit(16)
            .and_then(|d| u16::try_from(d).ok())
            .unwrap_or(0);
        self.code_unit = (self.code_unit << 4) | nibble;
        self.len += 1;
        if self.len == 4 {
            let unit = self.code_unit;
            self.begin();
            self.push_code_unit(unit, out);
        }
    }

    /// Writes out a high surrogate that was never completed.
    pub(crate) fn flush(&mut self, out: &mut Vec<u8>) {
        if self.high_surrogate.take().is_some() {
            push_char(REPLACEMENT, out);
        }
    }

    fn push_code_unit(&mut self, unit: u16, out: &mut Vec<u8>) {
        match unit {
            0xD800..=0xDBFF => {
                self.flush(out);
                self.high_surrogate = Some(unit);
            }
            0xDC00..=0xDFFF => match self.high_surrogate.take() {
                Some(high) => {
                    let scalar =
                        0x1_0000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(unit) - 0xDC00);
                    push_char(char::from_u32(scalar).unwrap_or(REPLACEMENT), out);
                }
                None => push_char(REPLACEMENT, out),
            },
            _ => {
                self.flush(out);
                push_char(char::from_u32(u32::from(unit)).unwrap_or(REPLACEMENT), out);
            }
        }
    }
}

fn push_char(ch: char, out: &mut Vec<u8>) {
    let mut tmp = [0u8; 4];
    out.extend_from_slice(ch.encode_utf8(&mut tmp).as_bytes());
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::UnicodeEscapeBuffer;

    fn decode(escapes: &[&str]) -> Vec<u8> {
        let mut buf = UnicodeEscapeBuffer::new();
        let mut out = Vec::new();
        for escape in escapes {
            buf.begin();
            for b in escape.bytes() {
                buf.feed(b, &mut out);
            }
        }
        buf.flush(&mut out);
        out
    }

    #[test]
    fn basic_decoding() {
        assert_eq!(decode(&["0041"]), b"A");
        assert_eq!(decode(&["00e9"]), "é".as_bytes());
    }

    #[test]
    fn mixed_case_hex() {
        assert_eq!(decode(&["AbCd"]), "\u{ABCD}".as_bytes());
    }

    #[test]
    fn surrogate_pair_combines() {
        assert_eq!(decode(&["D83D", "DE00"]), "😀".as_bytes());
    }

    #[test]
    fn lone_surrogates_are_replaced() {
        assert_eq!(decode(&["D800"]), "\u{FFFD}".as_bytes());
        assert_eq!(decode(&["DC00"]), "\u{FFFD}".as_bytes());
        assert_eq!(decode(&["D800", "0041"]), "\u{FFFD}A".as_bytes());
        assert_eq!(decode(&["D800", "D83D", "DE00"]), "\u{FFFD}😀".as_bytes());
    }

    #[test]
    fn reset_clears_pending_surrogate() {
        let mut buf = UnicodeEscapeBuffer::new();
        let mut out = Vec::new();
        for b in *b"D800" {
            buf.feed(b, &mut out);
        }
        buf.reset();
        buf.flush(&mut out);
        assert!(out.is_empty());
    }
}
