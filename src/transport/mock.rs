//! Scripted transport for tests and headless runs
//!
//! Plays the role the mock probe plays in hardware-free testing:
//! incoming traffic is queued up front as byte chunks, outgoing
//! writes are recorded, and each failure point can be armed
//! independently.

use crate::error::{Result, RigError};
use crate::transport::SerialTransport;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Shared state so a test can keep feeding/inspecting the mock after
/// handing it to the session.
#[derive(Default)]
struct MockState {
    connected: bool,
    incoming: VecDeque<Vec<u8>>,
    written: Vec<u8>,
    fail_open: bool,
    fail_write: bool,
    fail_read: bool,
}

/// Scripted in-memory transport
///
/// `Clone` hands out another handle onto the same state, which is how
/// tests keep a controller side while the session owns the transport.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    /// Create a disconnected mock with no scripted traffic
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a chunk of incoming bytes, delivered by the next read
    pub fn push_incoming(&self, bytes: &[u8]) {
        self.state.lock().unwrap().incoming.push_back(bytes.to_vec());
    }

    /// Queue an incoming line, newline-terminated
    pub fn push_line(&self, line: &str) {
        self.push_incoming(format!("{}\n", line).as_bytes());
    }

    /// Everything written to the transport so far
    pub fn written(&self) -> Vec<u8> {
        self.state.lock().unwrap().written.clone()
    }

    /// Written bytes decoded as UTF-8 text
    pub fn written_text(&self) -> String {
        String::from_utf8_lossy(&self.written()).into_owned()
    }

    /// Arm the next `open` call to fail
    pub fn fail_next_open(&self) {
        self.state.lock().unwrap().fail_open = true;
    }

    /// Make every `write_all` fail until cleared
    pub fn fail_writes(&self, fail: bool) {
        self.state.lock().unwrap().fail_write = fail;
    }

    /// Make every `read_available` fail until cleared
    pub fn fail_reads(&self, fail: bool) {
        self.state.lock().unwrap().fail_read = fail;
    }

    fn io_error(message: &str) -> RigError {
        RigError::Io(std::io::Error::new(std::io::ErrorKind::Other, message))
    }
}

impl SerialTransport for MockTransport {
    fn open(&mut self, _device: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_open {
            state.fail_open = false;
            state.connected = false;
            return Err(Self::io_error("mock open failure"));
        }
        state.connected = true;
        Ok(())
    }

    fn close(&mut self) {
        self.state.lock().unwrap().connected = false;
    }

    fn is_connected(&self) -> bool {
        self.state.lock().unwrap().connected
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if !state.connected {
            return Err(RigError::NotConnected);
        }
        if state.fail_write {
            return Err(Self::io_error("mock write failure"));
        }
        state.written.extend_from_slice(bytes);
        Ok(())
    }

    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut state = self.state.lock().unwrap();
        if !state.connected {
            return Ok(0);
        }
        if state.fail_read {
            return Err(Self::io_error("mock read failure"));
        }
        let Some(mut chunk) = state.incoming.pop_front() else {
            return Ok(0);
        };
        let n = chunk.len().min(buf.len());
        buf[..n].copy_from_slice(&chunk[..n]);
        if n < chunk.len() {
            // Remainder goes back to the front for the next read
            chunk.drain(..n);
            state.incoming.push_front(chunk);
        }
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_close_cycle() {
        let mut mock = MockTransport::new();
        assert!(!mock.is_connected());
        mock.open("mock0").unwrap();
        assert!(mock.is_connected());
        mock.close();
        assert!(!mock.is_connected());
    }

    #[test]
    fn test_scripted_read() {
        let mut mock = MockTransport::new();
        mock.open("mock0").unwrap();
        mock.push_incoming(b"hello");

        let mut buf = [0u8; 16];
        let n = mock.read_available(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"hello");
        assert_eq!(mock.read_available(&mut buf).unwrap(), 0);
    }

    #[test]
    fn test_oversized_chunk_spans_reads() {
        let mut mock = MockTransport::new();
        mock.open("mock0").unwrap();
        mock.push_incoming(b"abcdef");

        let mut buf = [0u8; 4];
        assert_eq!(mock.read_available(&mut buf).unwrap(), 4);
        assert_eq!(&buf[..4], b"abcd");
        assert_eq!(mock.read_available(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], b"ef");
    }

    #[test]
    fn test_records_writes() {
        let mut mock = MockTransport::new();
        mock.open("mock0").unwrap();
        mock.write_all(b"M1+100\n").unwrap();
        mock.write_all(b"stop\n").unwrap();
        assert_eq!(mock.written_text(), "M1+100\nstop\n");
    }

    #[test]
    fn test_armed_open_failure_fires_once() {
        let mut mock = MockTransport::new();
        mock.fail_next_open();
        assert!(mock.open("mock0").is_err());
        assert!(!mock.is_connected());
        assert!(mock.open("mock0").is_ok());
    }

    #[test]
    fn test_write_when_disconnected_fails() {
        let mut mock = MockTransport::new();
        assert!(mock.write_all(b"stop\n").is_err());
    }
}
