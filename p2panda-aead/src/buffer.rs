// SPDX-License-Identifier: MIT OR Apache-2.0

//! Output windows inside caller-owned buffers.
//!
//! Results are appended to a destination `Vec<u8>`, reusing its spare capacity when there is
//! enough of it. When the input lives in the same buffer as the output, both regions must either
//! start at the same offset (in-place) or not overlap at all.
use std::ops::Range;

use zeroize::Zeroize;

/// Grows `dst` by `len` zero bytes and returns the range of the new bytes.
///
/// The full result is `dst[..range.end]`, the writable window for the operation is `dst[range]`.
pub(crate) fn slice_for_append(dst: &mut Vec<u8>, len: usize) -> Range<usize> {
    let start = dst.len();
    dst.resize(start + len, 0);
    start..start + len
}

/// Returns `true` if the two regions share at least one byte.
pub(crate) fn any_overlap(a: &Range<usize>, b: &Range<usize>) -> bool {
    !a.is_empty() && !b.is_empty() && a.start < b.end && b.start < a.end
}

/// Returns `true` if the two regions overlap without starting at the same offset.
pub(crate) fn inexact_overlap(a: &Range<usize>, b: &Range<usize>) -> bool {
    if a.is_empty() || b.is_empty() || a.start == b.start {
        return false;
    }
    any_overlap(a, b)
}

/// Moves the input region of `buffer` into the output window `dst_len..dst_len + input.len()`,
/// growing the buffer as needed, and truncates the buffer to `dst_len + window_len`.
///
/// Panics if the input is out of bounds, if `dst_len` is past the end of the buffer, or if the
/// input and the output window overlap inexactly. The checks run before the buffer is touched.
pub(crate) fn place_in_window(
    buffer: &mut Vec<u8>,
    dst_len: usize,
    input: Range<usize>,
    window_len: usize,
) -> Range<usize> {
    let window = check_window(buffer, dst_len, &input, window_len);

    if buffer.len() < window.end {
        buffer.resize(window.end, 0);
    }

    if input.start != window.start {
        buffer.copy_within(input.clone(), window.start);
    }

    buffer.truncate(window.end);

    // Bytes of the window which were not covered by the input, e.g. room for a tag.
    buffer[window.start + input.len()..].fill(0);

    window
}

/// Panics if `dst_len` is past the end of `buffer` or `input` is out of its bounds.
pub(crate) fn check_bounds(buffer: &[u8], dst_len: usize, input: &Range<usize>) {
    assert!(
        dst_len <= buffer.len(),
        "destination length {dst_len} is past the end of the buffer ({})",
        buffer.len()
    );
    assert!(
        input.start <= input.end && input.end <= buffer.len(),
        "input range {input:?} is out of bounds for buffer of length {}",
        buffer.len()
    );
}

/// Validates the preconditions of [`place_in_window`] and returns the output window.
fn check_window(
    buffer: &[u8],
    dst_len: usize,
    input: &Range<usize>,
    window_len: usize,
) -> Range<usize> {
    check_bounds(buffer, dst_len, input);
    assert!(
        window_len >= input.len(),
        "output window is shorter than the input"
    );

    let window = dst_len..dst_len + window_len;
    assert!(!inexact_overlap(&window, input), "invalid buffer overlap");

    window
}

/// Zeroes everything after the first `dst_len` bytes and truncates the buffer to them.
pub(crate) fn discard_window(buffer: &mut Vec<u8>, dst_len: usize) {
    buffer[dst_len..].zeroize();
    buffer.truncate(dst_len);
}
