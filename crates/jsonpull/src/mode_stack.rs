//! Bookkeeping of open containers, bounded by the configured nesting limit.
use alloc::vec::Vec;

/// Kind of container the tokenizer is currently inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Inside `[ ... ]`.
    Array,
    /// Sentinel below every container; popped once the document is complete.
    Done,
    /// Inside `{ ... }`, expecting a key.
    Key,
    /// Inside `{ ... }`, expecting a member value.
    Object,
}

const INITIAL_CAPACITY: usize = 16;

/// Stack of open container modes, anchored by [`Mode::Done`].
///
/// Capacity grows by doubling but never past what `max_depth` requires, and
/// a push that would open more than `max_depth` containers fails.
#[derive(Debug)]
pub(crate) struct ModeStack {
    modes: Vec<Mode>,
    max_depth: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StackError {
    /// The top of the stack was not the mode being popped.
    Mismatch { expected: Mode, found: Option<Mode> },
    /// Pushing would exceed the depth limit.
    TooDeep,
}

impl ModeStack {
    pub(crate) fn new(max_depth: usize) -> Self {
        let mut modes = Vec::with_capacity(INITIAL_CAPACITY.min(max_depth.saturating_add(1)));
        modes.push(Mode::Done);
        Self { modes, max_depth }
    }

    pub(crate) fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub(crate) fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth;
    }

    /// Number of open containers; the `Done` sentinel does not count.
    pub(crate) fn depth(&self) -> usize {
        self.modes.len().saturating_sub(1)
    }

    pub(crate) fn top(&self) -> Option<Mode> {
        self.modes.last().copied()
    }

    pub(crate) fn push(&mut self, mode: Mode) -> Result<(), StackError> {
        // The sentinel occupies one slot below the containers.
        let limit = self.max_depth.saturating_add(1);
        if self.modes.len() >= limit {
            return Err(StackError::TooDeep);
        }
        if self.modes.len() == self.modes.capacity() {
            let target = (self.modes.capacity().max(1) * 2).min(limit);
            tracing::trace!(from = self.modes.capacity(), to = target, "growing mode stack");
            self.modes.reserve_exact(target - self.modes.len());
        }
        self.modes.push(mode);
        Ok(())
    }

    pub(crate) fn pop(&mut self, expected: Mode) -> Result<(), StackError> {
        match self.modes.last() {
            Some(&top) if top == expected => {
                self.modes.pop();
                Ok(())
            }
            found => Err(StackError::Mismatch {
                expected,
                found: found.copied(),
            }),
        }
    }

    /// Replaces the top mode, which must be `from`, with `to`.
    pub(crate) fn flip(&mut self, from: Mode, to: Mode) -> Result<(), StackError> {
        self.pop(from)?;
        // Cannot exceed the limit: a slot was just freed.
        self.modes.push(to);
        Ok(())
    }
}
