//! Splitting helpers for driving the tokenizer with partial input.
use alloc::vec::Vec;

/// Split `payload` into `parts` chunks of roughly equal size.
///
/// Chunks are cut at arbitrary byte offsets, including inside multi-byte
/// UTF-8 sequences and escape sequences.
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn produce_chunks(payload: &[u8], parts: usize) -> Vec<&[u8]> {
    assert!(parts > 0);
    let chunk_size = payload.len().div_ceil(parts).max(1);
    payload.chunks(chunk_size).collect()
}

/// Split `payload` at the given offsets, taken modulo the remaining length.
///
/// Every offset yields a non-empty chunk; the tail after the last offset
/// forms the final chunk.
#[must_use]
pub fn split_at_offsets<'a>(payload: &'a [u8], offsets: &[usize]) -> Vec<&'a [u8]> {
    let mut chunks = Vec::with_capacity(offsets.len() + 1);
    let mut rest = payload;
    for &offset in offsets {
        if rest.is_empty() {
            break;
        }
        let (head, tail) = rest.split_at(1 + offset % rest.len());
        chunks.push(head);
        rest = tail;
    }
    if !rest.is_empty() {
        chunks.push(rest);
    }
    chunks
}

/// Return a sequence of prefixes converging to `payload`.
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn produce_prefixes(payload: &[u8], parts: usize) -> Vec<&[u8]> {
    let chunks = produce_chunks(payload, parts);
    let mut prefixes = Vec::with_capacity(chunks.len());
    let mut end = 0;
    for chunk in chunks {
        end += chunk.len();
        prefixes.push(&payload[..end]);
    }
    prefixes
}
