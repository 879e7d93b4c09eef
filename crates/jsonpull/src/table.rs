//! Lexical states, actions and the state × class transition table.
//!
//! The table is consulted once per input unit. An entry is either a plain
//! state change, one of the structural [`Action`]s, or [`Transition::Reject`]
//! for a unit that is illegal in the current state.

use crate::class::{CLASS_COUNT, CharClass};

/// Position of the tokenizer within the JSON grammar.
///
/// Declaration order matters: everything from [`LexState::String`] onwards is
/// an "in-token" state whose units are accumulated into the token buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum LexState {
    /// Before the root value.
    Start,
    /// A token or container just completed.
    Ok,
    /// After `{`, expecting a key or `}`.
    Object,
    /// After `,` in an object, expecting a key.
    Key,
    /// After a key, expecting `:`.
    Colon,
    /// After `:` or `,` in an array, expecting a value.
    Value,
    /// After `[`, expecting a value or `]`.
    Array,
    /// Inside a string.
    String,
    /// After `\` inside a string.
    Escape,
    /// `\u`, expecting the first hex digit.
    U1,
    /// Expecting the second hex digit.
    U2,
    /// Expecting the third hex digit.
    U3,
    /// Expecting the fourth hex digit.
    U4,
    /// `-`
    Minus,
    /// A leading `0`.
    Zero,
    /// Integer digits.
    Integer,
    /// `.` seen, expecting a fraction digit.
    FractionStart,
    /// Fraction digits.
    Fraction,
    /// `e` or `E` seen.
    Exponent,
    /// Exponent sign seen.
    ExponentSign,
    /// Exponent digits.
    ExponentDigits,
    /// `t`
    Tr,
    /// `tr`
    Tru,
    /// `tru`
    True,
    /// `f`
    Fa,
    /// `fa`
    Fal,
    /// `fal`
    Fals,
    /// `fals`
    False,
    /// `n`
    Nu,
    /// `nu`
    Nul,
    /// `nul`
    Null,
}

/// Number of lexical states, i.e. the height of the transition table.
pub const STATE_COUNT: usize = 31;

impl LexState {
    /// Whether units read in this state belong to the token being lexed.
    #[inline]
    #[must_use]
    pub fn is_in_token(self) -> bool {
        self >= LexState::String
    }

    /// Whether the state lies inside a string literal, escapes included.
    #[inline]
    #[must_use]
    pub fn is_in_string(self) -> bool {
        matches!(
            self,
            LexState::String
                | LexState::Escape
                | LexState::U1
                | LexState::U2
                | LexState::U3
                | LexState::U4
        )
    }
}

/// Structural side effect triggered by a table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// Closing `"` of a key or string value.
    Quote,
    /// `[`
    OpenArray,
    /// `{`
    OpenObject,
    /// `]`
    CloseArray,
    /// `}` after a member value.
    CloseObject,
    /// `}` directly after `{`.
    CloseEmptyObject,
}

/// One cell of the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Move to another state.
    To(LexState),
    /// Perform a structural action; the action decides the next state.
    Act(Action),
    /// The unit is illegal here.
    Reject,
}

/// Looks up the table entry for `state` reading a unit of class `class`.
#[inline]
#[must_use]
pub fn transition(state: LexState, class: CharClass) -> Transition {
    TABLE[state as usize][class as usize]
}

const __: Transition = Transition::Reject;

const GO: Transition = Transition::To(LexState::Start);
const OK: Transition = Transition::To(LexState::Ok);
const OB: Transition = Transition::To(LexState::Object);
const KE: Transition = Transition::To(LexState::Key);
const CO: Transition = Transition::To(LexState::Colon);
const VA: Transition = Transition::To(LexState::Value);
const AR: Transition = Transition::To(LexState::Array);
const ST: Transition = Transition::To(LexState::String);
const ES: Transition = Transition::To(LexState::Escape);
const U1: Transition = Transition::To(LexState::U1);
const U2: Transition = Transition::To(LexState::U2);
const U3: Transition = Transition::To(LexState::U3);
const U4: Transition = Transition::To(LexState::U4);
const MI: Transition = Transition::To(LexState::Minus);
const ZE: Transition = Transition::To(LexState::Zero);
const IN: Transition = Transition::To(LexState::Integer);
const F0: Transition = Transition::To(LexState::FractionStart);
const FR: Transition = Transition::To(LexState::Fraction);
const E1: Transition = Transition::To(LexState::Exponent);
const E2: Transition = Transition::To(LexState::ExponentSign);
const E3: Transition = Transition::To(LexState::ExponentDigits);
const T1: Transition = Transition::To(LexState::Tr);
const T2: Transition = Transition::To(LexState::Tru);
const T3: Transition = Transition::To(LexState::True);
const F1: Transition = Transition::To(LexState::Fa);
const F2: Transition = Transition::To(LexState::Fal);
const F3: Transition = Transition::To(LexState::Fals);
const F4: Transition = Transition::To(LexState::False);
const N1: Transition = Transition::To(LexState::Nu);
const N2: Transition = Transition::To(LexState::Nul);
const N3: Transition = Transition::To(LexState::Null);

const CL: Transition = Transition::Act(Action::Colon);
const CM: Transition = Transition::Act(Action::Comma);
const QT: Transition = Transition::Act(Action::Quote);
const OA: Transition = Transition::Act(Action::OpenArray);
const OO: Transition = Transition::Act(Action::OpenObject);
const CA: Transition = Transition::Act(Action::CloseArray);
const CB: Transition = Transition::Act(Action::CloseObject);
const CE: Transition = Transition::Act(Action::CloseEmptyObject);

#[rustfmt::skip]
static TABLE: [[Transition; CLASS_COUNT]; STATE_COUNT] = [
    //            white                                        1-9                                   ABCDF  etc
    //      space |  {   }   [   ]   :   ,   "   \   /   +   -   .   0   |   a   b   c   d   e   f   l   n   r   s   t   u   |   E   |
    /*start */ [GO, GO, OO, __, OA, __, __, __, ST, __, __, __, MI, __, ZE, IN, __, __, __, __, __, F1, __, N1, __, __, T1, __, __, __, __],
    /*ok    */ [OK, OK, __, CB, __, CA, __, CM, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __],
    /*object*/ [OB, OB, __, CE, __, __, __, __, ST, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __],
    /*key   */ [KE, KE, __, __, __, __, __, __, ST, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __],
    /*colon */ [CO, CO, __, __, __, __, CL, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __],
    /*value */ [VA, VA, OO, __, OA, __, __, __, ST, __, __, __, MI, __, ZE, IN, __, __, __, __, __, F1, __, N1, __, __, T1, __, __, __, __],
    /*array */ [AR, AR, OO, __, OA, CA, __, __, ST, __, __, __, MI, __, ZE, IN, __, __, __, __, __, F1, __, N1, __, __, T1, __, __, __, __],
    /*string*/ [ST, __, ST, ST, ST, ST, ST, ST, QT, ES, ST, ST, ST, ST, ST, ST, ST, ST, ST, ST, ST, ST, ST, ST, ST, ST, ST, ST, ST, ST, ST],
    /*escape*/ [__, __, __, __, __, __, __, __, ST, ST, ST, __, __, __, __, __, __, ST, __, __, __, ST, __, ST, ST, __, ST, U1, __, __, __],
    /*u1    */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, U2, U2, U2, U2, U2, U2, U2, U2, __, __, __, __, __, __, U2, U2, __],
    /*u2    */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, U3, U3, U3, U3, U3, U3, U3, U3, __, __, __, __, __, __, U3, U3, __],
    /*u3    */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, U4, U4, U4, U4, U4, U4, U4, U4, __, __, __, __, __, __, U4, U4, __],
    /*u4    */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, ST, ST, ST, ST, ST, ST, ST, ST, __, __, __, __, __, __, ST, ST, __],
    /*minus */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, ZE, IN, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __],
    /*zero  */ [OK, OK, __, CB, __, CA, __, CM, __, __, __, __, __, F0, __, __, __, __, __, __, E1, __, __, __, __, __, __, __, __, E1, __],
    /*int   */ [OK, OK, __, CB, __, CA, __, CM, __, __, __, __, __, F0, IN, IN, __, __, __, __, E1, __, __, __, __, __, __, __, __, E1, __],
    /*frac0 */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, FR, FR, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __],
    /*frac  */ [OK, OK, __, CB, __, CA, __, CM, __, __, __, __, __, __, FR, FR, __, __, __, __, E1, __, __, __, __, __, __, __, __, E1, __],
    /*e     */ [__, __, __, __, __, __, __, __, __, __, __, E2, E2, __, E3, E3, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __],
    /*ex    */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, E3, E3, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __],
    /*exp   */ [OK, OK, __, CB, __, CA, __, CM, __, __, __, __, __, __, E3, E3, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __],
    /*tr    */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, T2, __, __, __, __, __, __],
    /*tru   */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, T3, __, __, __],
    /*true  */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, OK, __, __, __, __, __, __, __, __, __, __],
    /*fa    */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, F2, __, __, __, __, __, __, __, __, __, __, __, __, __, __],
    /*fal   */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, F3, __, __, __, __, __, __, __, __],
    /*fals  */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, F4, __, __, __, __, __],
    /*false */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, OK, __, __, __, __, __, __, __, __, __, __],
    /*nu    */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, N2, __, __, __],
    /*nul   */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, N3, __, __, __, __, __, __, __, __],
    /*null  */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, OK, __, __, __, __, __, __, __, __],
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::classify;

    fn step(state: LexState, unit: u8) -> Transition {
        transition(state, classify(unit).unwrap_or(CharClass::Etc))
    }

    #[test]
    fn rows_follow_declaration_order() {
        // Spot-check one distinguishing entry per row so a reordered row is caught.
        assert_eq!(step(LexState::Start, b'{'), OO);
        assert_eq!(step(LexState::Ok, b'}'), CB);
        assert_eq!(step(LexState::Object, b'}'), CE);
        assert_eq!(step(LexState::Key, b'}'), __);
        assert_eq!(step(LexState::Colon, b':'), CL);
        assert_eq!(step(LexState::Value, b']'), __);
        assert_eq!(step(LexState::Array, b']'), CA);
        assert_eq!(step(LexState::String, b'"'), QT);
        assert_eq!(step(LexState::Escape, b'u'), U1);
        assert_eq!(step(LexState::U1, b'a'), U2);
        assert_eq!(step(LexState::U2, b'F'), U3);
        assert_eq!(step(LexState::U3, b'E'), U4);
        assert_eq!(step(LexState::U4, b'9'), ST);
        assert_eq!(step(LexState::Minus, b'0'), ZE);
        assert_eq!(step(LexState::Zero, b'0'), __);
        assert_eq!(step(LexState::Integer, b'0'), IN);
        assert_eq!(step(LexState::FractionStart, b'5'), FR);
        assert_eq!(step(LexState::Fraction, b'E'), E1);
        assert_eq!(step(LexState::Exponent, b'+'), E2);
        assert_eq!(step(LexState::ExponentSign, b'+'), __);
        assert_eq!(step(LexState::ExponentDigits, b','), CM);
        assert_eq!(step(LexState::Tr, b'r'), T2);
        assert_eq!(step(LexState::Tru, b'u'), T3);
        assert_eq!(step(LexState::True, b'e'), OK);
        assert_eq!(step(LexState::Fa, b'a'), F2);
        assert_eq!(step(LexState::Fal, b'l'), F3);
        assert_eq!(step(LexState::Fals, b's'), F4);
        assert_eq!(step(LexState::False, b'e'), OK);
        assert_eq!(step(LexState::Nu, b'u'), N2);
        assert_eq!(step(LexState::Nul, b'l'), N3);
        assert_eq!(step(LexState::Null, b'l'), OK);
    }

    #[test]
    fn strings_reject_raw_line_breaks_but_accept_high_bytes() {
        assert_eq!(step(LexState::String, b'\n'), __);
        assert_eq!(step(LexState::String, b'\t'), __);
        assert_eq!(step(LexState::String, b' '), ST);
        assert_eq!(step(LexState::String, 0xC3), ST);
    }

    #[test]
    fn escape_accepts_only_json_escapes() {
        let accepted: alloc::vec::Vec<u8> = (0x20..0x7Fu8)
            .filter(|&b| step(LexState::Escape, b) != __)
            .collect();
        assert_eq!(accepted, b"\"/\\bfnrtu");
    }

    #[test]
    fn in_token_states() {
        assert!(!LexState::Array.is_in_token());
        assert!(LexState::String.is_in_token());
        assert!(LexState::Null.is_in_token());
        assert!(LexState::U4.is_in_string());
        assert!(!LexState::Minus.is_in_string());
    }
}
