//! Byte stream to line framing

/// Accumulates raw bytes and yields complete, trimmed lines
///
/// Bytes are decoded lossily: malformed UTF-8 sequences become the
/// replacement character instead of failing the whole read, since a
/// resetting device happily emits garbage mid-line. Partial trailing
/// data stays buffered until its terminator arrives.
#[derive(Debug, Default)]
pub struct LineFramer {
    buffer: String,
}

impl LineFramer {
    /// Create an empty framer
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed raw bytes, returning every complete line they finish
    ///
    /// Lines are split on `\n`, trimmed of surrounding whitespace
    /// (which also swallows `\r` from CRLF devices), and dropped when
    /// empty.
    pub fn push_bytes(&mut self, bytes: &[u8]) -> Vec<String> {
        if bytes.is_empty() {
            return Vec::new();
        }
        self.buffer.push_str(&String::from_utf8_lossy(bytes));

        let mut lines = Vec::new();
        while let Some(pos) = self.buffer.find('\n') {
            let rest = self.buffer.split_off(pos + 1);
            let segment = std::mem::replace(&mut self.buffer, rest);
            let trimmed = segment.trim();
            if !trimmed.is_empty() {
                lines.push(trimmed.to_string());
            }
        }
        lines
    }

    /// The unterminated remainder still buffered
    pub fn pending(&self) -> &str {
        &self.buffer
    }

    /// Discard any buffered partial line
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}
