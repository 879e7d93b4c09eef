//! Character classification.
//!
//! Every input unit is bucketed into one of 31 [`CharClass`]es before the
//! tokenizer consults its transition table. Units are raw bytes: anything at
//! or above `0x80` is opaque and lands in [`CharClass::Etc`], so multi-byte
//! UTF-8 sequences pass through strings untouched without being decoded.
//!
//! Control bytes other than tab, line feed and carriage return have no class
//! and abort tokenization.

/// Lexical class of a single input unit.
///
/// The discriminant doubles as the column index of the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CharClass {
    /// ` `
    Space,
    /// `\t`, `\n`, `\r`
    White,
    /// `{`
    LCurly,
    /// `}`
    RCurly,
    /// `[`
    LSquare,
    /// `]`
    RSquare,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// `"`
    Quote,
    /// `\`
    Backslash,
    /// `/`
    Slash,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `.`
    Point,
    /// `0`
    Zero,
    /// `1`-`9`
    Digit,
    /// `a`
    LowA,
    /// `b`
    LowB,
    /// `c`
    LowC,
    /// `d`
    LowD,
    /// `e`
    LowE,
    /// `f`
    LowF,
    /// `l`
    LowL,
    /// `n`
    LowN,
    /// `r`
    LowR,
    /// `s`
    LowS,
    /// `t`
    LowT,
    /// `u`
    LowU,
    /// `A` `B` `C` `D` `F`
    UpperHex,
    /// `E`
    UpperE,
    /// Every other printable unit, including all bytes `>= 0x80`.
    Etc,
}

/// Number of character classes, i.e. the width of the transition table.
pub const CLASS_COUNT: usize = 31;

use CharClass::{
    Backslash, Colon, Comma, Digit, Etc, LCurly, LSquare, LowA, LowB, LowC, LowD, LowE, LowF,
    LowL, LowN, LowR, LowS, LowT, LowU, Minus, Plus, Point, Quote, RCurly, RSquare, Slash, Space,
    UpperE, UpperHex, White, Zero,
};

const XX: Option<CharClass> = None;
const SP: Option<CharClass> = Some(Space);
const WH: Option<CharClass> = Some(White);
const LC: Option<CharClass> = Some(LCurly);
const RC: Option<CharClass> = Some(RCurly);
const LS: Option<CharClass> = Some(LSquare);
const RS: Option<CharClass> = Some(RSquare);
const CL: Option<CharClass> = Some(Colon);
const CM: Option<CharClass> = Some(Comma);
const QU: Option<CharClass> = Some(Quote);
const BS: Option<CharClass> = Some(Backslash);
const SL: Option<CharClass> = Some(Slash);
const PL: Option<CharClass> = Some(Plus);
const MI: Option<CharClass> = Some(Minus);
const PT: Option<CharClass> = Some(Point);
const ZE: Option<CharClass> = Some(Zero);
const DI: Option<CharClass> = Some(Digit);
const LA: Option<CharClass> = Some(LowA);
const LB: Option<CharClass> = Some(LowB);
const LCC: Option<CharClass> = Some(LowC);
const LD: Option<CharClass> = Some(LowD);
const LE: Option<CharClass> = Some(LowE);
const LF: Option<CharClass> = Some(LowF);
const LL: Option<CharClass> = Some(LowL);
const LN: Option<CharClass> = Some(LowN);
const LR: Option<CharClass> = Some(LowR);
const LSS: Option<CharClass> = Some(LowS);
const LT: Option<CharClass> = Some(LowT);
const LU: Option<CharClass> = Some(LowU);
const UH: Option<CharClass> = Some(UpperHex);
const UE: Option<CharClass> = Some(UpperE);
const ET: Option<CharClass> = Some(Etc);

/// Class of each 7-bit code. `None` marks the rejected control codes.
#[rustfmt::skip]
static ASCII_CLASS: [Option<CharClass>; 128] = [
    XX, XX, XX, XX, XX, XX, XX, XX,
    XX, WH, WH, XX, XX, WH, XX, XX,
    XX, XX, XX, XX, XX, XX, XX, XX,
    XX, XX, XX, XX, XX, XX, XX, XX,

    SP, ET, QU, ET, ET, ET, ET, ET,
    ET, ET, ET, PL, CM, MI, PT, SL,
    ZE, DI, DI, DI, DI, DI, DI, DI,
    DI, DI, CL, ET, ET, ET, ET, ET,

    ET, UH, UH, UH, UH, UE, UH, ET,
    ET, ET, ET, ET, ET, ET, ET, ET,
    ET, ET, ET, ET, ET, ET, ET, ET,
    ET, ET, ET, LS, BS, RS, ET, ET,

    ET, LA, LB, LCC,LD, LE, LF, ET,
    ET, ET, ET, ET, LL, ET, LN, ET,
    ET, ET, LR, LSS,LT, LU, ET, ET,
    ET, ET, ET, LC, ET, RC, ET, ET,
];

/// Classifies one input unit.
///
/// Returns `None` for control codes that may not appear anywhere in a JSON
/// text (everything below `0x20` except tab, line feed and carriage return).
#[inline]
#[must_use]
pub fn classify(unit: u8) -> Option<CharClass> {
    if unit >= 0x80 {
        Some(Etc)
    } else {
        ASCII_CLASS[unit as usize]
    }
}
