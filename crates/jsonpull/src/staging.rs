//! Staging of raw input bytes for the tokenizer.
//!
//! A [`StagingBuffer`] owns two fixed-size regions. Producers append raw bytes
//! to the *byte region* with [`InputSource::supply`]; whenever the tokenizer
//! runs out of units, everything pending in the byte region is moved into the
//! larger *unit region* in one go, and the tokenizer then consumes it one
//! unit at a time. Staging is a 1:1 copy, not a decode: each byte becomes one
//! unit, so multi-byte UTF-8 sequences reach the tokenizer as opaque bytes.
//!
//! ```text
//!  supply()            stage (on has_input)          next_unit()
//! ---------> [ bytes | free ] ------------> [ consumed | staged ] ------->
//! ```
//!
//! When the byte region is full, [`InputSource::supply`] accepts nothing; the
//! producer retries after the tokenizer has drained the staged units.

use alloc::{boxed::Box, vec};

use crate::error::SourceError;

/// Default size of the byte region.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Source of input units for the [`Tokenizer`](crate::Tokenizer).
///
/// [`StagingBuffer`] is the standard implementation; the trait is the seam
/// for injecting another one.
pub trait InputSource {
    /// Appends as many of `bytes` as fit and returns how many were accepted.
    fn supply(&mut self, bytes: &[u8]) -> usize;

    /// Appends a single byte.
    ///
    /// # Errors
    ///
    /// [`SourceError::Full`] if the byte region has no room.
    fn supply_byte(&mut self, byte: u8) -> Result<(), SourceError> {
        if self.supply(core::slice::from_ref(&byte)) == 1 {
            Ok(())
        } else {
            Err(SourceError::Full)
        }
    }

    /// Returns `true` when no more bytes can be accepted until some are
    /// staged.
    fn is_full(&self) -> bool;

    /// Signals that no further bytes will ever be supplied.
    fn mark_producer_done(&mut self);

    /// Returns `true` once [`mark_producer_done`](Self::mark_producer_done)
    /// was called.
    fn is_producer_done(&self) -> bool;

    /// Stages pending bytes if no unit is ready and reports whether at least
    /// one unit is available.
    fn has_input(&mut self) -> bool;

    /// Returns `true` once the producer is done and every unit was consumed.
    fn is_done(&mut self) -> bool {
        self.is_producer_done() && !self.has_input()
    }

    /// Consumes one unit.
    ///
    /// # Errors
    ///
    /// [`SourceError::Exhausted`] if [`has_input`](Self::has_input) would
    /// return `false`.
    fn next_unit(&mut self) -> Result<u8, SourceError>;
}

impl<S: InputSource + ?Sized> InputSource for &mut S {
    fn supply(&mut self, bytes: &[u8]) -> usize {
        (**self).supply(bytes)
    }

    fn is_full(&self) -> bool {
        (**self).is_full()
    }

    fn mark_producer_done(&mut self) {
        (**self).mark_producer_done();
    }

    fn is_producer_done(&self) -> bool {
        (**self).is_producer_done()
    }

    fn has_input(&mut self) -> bool {
        (**self).has_input()
    }

    fn is_done(&mut self) -> bool {
        (**self).is_done()
    }

    fn next_unit(&mut self) -> Result<u8, SourceError> {
        (**self).next_unit()
    }
}

/// Fixed-capacity byte region feeding a unit region twice its size.
#[derive(Debug, Clone)]
pub struct StagingBuffer {
    bytes: Box<[u8]>,
    /// Bytes supplied but not yet staged.
    filled: usize,
    units: Box<[u8]>,
    /// Next unit to hand out.
    pos: usize,
    /// End of the staged units.
    limit: usize,
    producer_done: bool,
}

impl Default for StagingBuffer {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl StagingBuffer {
    /// Creates a buffer whose byte region holds `capacity` bytes (at least
    /// one).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            bytes: vec![0; capacity].into_boxed_slice(),
            filled: 0,
            units: vec![0; capacity.saturating_mul(2)].into_boxed_slice(),
            pos: 0,
            limit: 0,
            producer_done: false,
        }
    }

    /// Size of the byte region.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Bytes supplied but not yet staged.
    #[must_use]
    pub fn pending_bytes(&self) -> usize {
        self.filled
    }

    /// Units staged but not yet consumed.
    #[must_use]
    pub fn staged_units(&self) -> usize {
        self.limit - self.pos
    }

    fn stage(&mut self) -> bool {
        if self.pos < self.limit {
            return true;
        }
        if self.filled == 0 {
            return false;
        }
        let n = self.filled.min(self.units.len());
        self.units[..n].copy_from_slice(&self.bytes[..n]);
        self.bytes.copy_within(n..self.filled, 0);
        self.filled -= n;
        self.pos = 0;
        self.limit = n;
        tracing::trace!(staged = n, pending = self.filled, "staged input bytes");
        true
    }
}

impl InputSource for StagingBuffer {
    fn supply(&mut self, bytes: &[u8]) -> usize {
        let n = bytes.len().min(self.bytes.len() - self.filled);
        self.bytes[self.filled..self.filled + n].copy_from_slice(&bytes[..n]);
        self.filled += n;
        n
    }

    fn is_full(&self) -> bool {
        self.filled == self.bytes.len()
    }

    fn mark_producer_done(&mut self) {
        self.producer_done = true;
    }

    fn is_producer_done(&self) -> bool {
        self.producer_done
    }

    fn has_input(&mut self) -> bool {
        self.stage()
    }

    fn next_unit(&mut self) -> Result<u8, SourceError> {
        if !self.stage() {
            return Err(SourceError::Exhausted);
        }
        let unit = self.units[self.pos];
        self.pos += 1;
        Ok(unit)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    fn drain(buf: &mut StagingBuffer) -> Vec<u8> {
        let mut out = Vec::new();
        while buf.has_input() {
            out.push(buf.next_unit().unwrap());
        }
        out
    }

    #[test]
    fn supply_accepts_what_fits() {
        let mut buf = StagingBuffer::with_capacity(4);
        assert_eq!(buf.supply(b"abcdef"), 4);
        assert!(buf.is_full());
        assert_eq!(buf.supply(b"ef"), 0);
        assert_eq!(buf.supply_byte(b'e'), Err(SourceError::Full));
    }

    #[test]
    fn staging_frees_the_byte_region() {
        let mut buf = StagingBuffer::with_capacity(4);
        buf.supply(b"abcd");
        assert!(buf.has_input());
        assert_eq!(buf.staged_units(), 4);
        assert_eq!(buf.pending_bytes(), 0);
        assert!(!buf.is_full());
        // room again while staged units are still unread
        assert_eq!(buf.supply(b"efgh"), 4);
        assert_eq!(drain(&mut buf), b"abcdefgh");
    }

    #[test]
    fn units_keep_supply_order_across_stages() {
        let mut buf = StagingBuffer::with_capacity(3);
        let mut out = Vec::new();
        let input = b"[1,2,3,4,5]";
        let mut fed = 0;
        while fed < input.len() {
            fed += buf.supply(&input[fed..]);
            out.push(buf.next_unit().unwrap());
        }
        out.extend(drain(&mut buf));
        assert_eq!(out, input);
    }

    #[test]
    fn high_bytes_pass_through() {
        let mut buf = StagingBuffer::default();
        buf.supply("é€".as_bytes());
        assert_eq!(drain(&mut buf), "é€".as_bytes());
    }

    #[test]
    fn next_unit_without_input_fails() {
        let mut buf = StagingBuffer::default();
        assert_eq!(buf.next_unit(), Err(SourceError::Exhausted));
    }

    #[test]
    fn done_only_after_producer_finishes_and_units_drain() {
        let mut buf = StagingBuffer::default();
        buf.supply(b"x");
        assert!(!buf.is_done());
        buf.mark_producer_done();
        assert!(!buf.is_done());
        assert_eq!(buf.next_unit(), Ok(b'x'));
        assert!(buf.is_done());
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let mut buf = StagingBuffer::with_capacity(0);
        assert_eq!(buf.capacity(), 1);
        assert_eq!(buf.supply(b"ab"), 1);
    }

    #[test]
    fn borrowed_source_forwards() {
        fn produce<S: InputSource>(mut source: S) {
            source.supply(b"ok");
            source.mark_producer_done();
        }

        let mut buf = StagingBuffer::default();
        produce(&mut buf);
        assert!(buf.is_producer_done());
        assert_eq!(drain(&mut buf), b"ok");
    }
}
