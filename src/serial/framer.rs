//! Newline framer for the serial value stream.
//!
//! The control host writes one `value,timestamp\n` line per sample, usually
//! faster than the pixel can usefully change. The framer therefore keeps only
//! what matters: the **latest** complete line. Older complete lines are
//! dropped when a newer one is extracted, and a runaway line without a
//! delimiter resets the buffer instead of growing it.
//!
//! ```text
//!   "0.5,1\n0.9,2\n0.3"   ── extract ──►  "0.9,2"   (buffer keeps "0.3")
//! ```
//!
//! No I/O and no clock: the caller feeds bytes and applies the idle timeout.

use heapless::String;

/// Default accumulator size in bytes.
pub const LINE_CAPACITY: usize = 128;

const DELIMITER: u8 = b'\n';

/// What happened to a single fed byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    /// Printable byte or delimiter appended.
    Stored,
    /// Control byte, non-ASCII byte or redundant delimiter ignored.
    Skipped,
    /// The buffer was full; it was cleared and the byte stored afresh.
    Overflowed,
}

/// Fixed-capacity line accumulator. Stack-allocated, no heap.
pub struct LineFramer<const N: usize = LINE_CAPACITY> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> Default for LineFramer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> LineFramer<N> {
    pub const fn new() -> Self {
        Self { buf: [0; N], len: 0 }
    }

    /// Accept one raw byte.
    ///
    /// `\r` and `\n` both become a single `\n`. A delimiter on an empty buffer
    /// or straight after another delimiter is dropped so CRLF endings and
    /// blank lines never produce empty segments.
    pub fn feed(&mut self, byte: u8) -> Feed {
        let byte = match byte {
            b'\r' | b'\n' => {
                if self.len == 0 || self.buf[self.len - 1] == DELIMITER {
                    return Feed::Skipped;
                }
                DELIMITER
            }
            0x20..=0x7E => byte,
            _ => return Feed::Skipped,
        };

        let mut outcome = Feed::Stored;
        if self.len == N {
            self.clear();
            outcome = Feed::Overflowed;
            if byte == DELIMITER {
                return outcome;
            }
        }

        self.buf[self.len] = byte;
        self.len += 1;
        outcome
    }

    /// Take the most recent complete line, discarding every line before it.
    ///
    /// Bytes after the last delimiter (a partial line) stay in the buffer.
    /// Returns `None` and leaves the buffer untouched when no delimiter is
    /// present.
    pub fn extract_latest_complete(&mut self) -> Option<String<N>> {
        let content = &self.buf[..self.len];
        let end = content.iter().rposition(|&b| b == DELIMITER)?;
        let start = content[..end]
            .iter()
            .rposition(|&b| b == DELIMITER)
            .map_or(0, |i| i + 1);

        // Only bytes in 0x20..=0x7E are ever stored, so this is valid UTF-8.
        let line = core::str::from_utf8(&content[start..end])
            .ok()
            .and_then(|s| String::try_from(s).ok());

        let tail = self.len - (end + 1);
        self.buf.copy_within(end + 1..self.len, 0);
        self.len = tail;

        line
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Bytes currently held, delimiters included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}
