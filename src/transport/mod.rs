//! Serial transport layer
//!
//! This module owns the physical connection to the rig. It follows a
//! trait-object design so the rest of the pipeline is oblivious to
//! whether it is talking to real hardware or a scripted mock:
//!
//! - [`SerialTransport`] - Unified open/close/read/write interface
//! - [`SerialLink`] - Real hardware implementation via the `serialport`
//!   crate
//! - [`MockTransport`] - Scripted transport for tests and headless use
//!
//! The transport is shared between the acquisition thread (which only
//! reads) and the request path (which only writes) through
//! [`SharedTransport`]; the mutex keeps `read_available`, `write_all`
//! and `close` from interleaving on the underlying handle.

pub mod mock;
pub mod serial;

pub use mock::MockTransport;
pub use serial::{list_ports, SerialLink};

use crate::error::Result;
use std::sync::{Arc, Mutex};

/// Unified interface for the rig's serial link
///
/// Implementations must be `Send` so the acquisition thread can poll
/// them. All calls return promptly: `read_available` is bounded by a
/// short per-call timeout and must report a timeout as `Ok(0)`, never
/// as an error.
pub trait SerialTransport: Send {
    /// Open the device at the fixed rig baud rate
    ///
    /// Performs the full settle sequence: acquire the handle, wait for
    /// the device reset to finish, then discard any stale buffered
    /// bytes. A failed open leaves the transport closed; it is never
    /// partially open.
    fn open(&mut self, device: &str) -> Result<()>;

    /// Close the transport. Idempotent; safe to call when closed.
    fn close(&mut self);

    /// Whether the transport currently holds an open handle
    fn is_connected(&self) -> bool;

    /// Write all bytes to the device
    fn write_all(&mut self, bytes: &[u8]) -> Result<()>;

    /// Read whatever bytes are currently available into `buf`
    ///
    /// Returns the number of bytes read; `Ok(0)` when nothing arrived
    /// within the read timeout or the transport is closed.
    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize>;
}

/// Shared handle over a transport, used by both the acquisition
/// thread and the command path.
pub type SharedTransport = Arc<Mutex<Box<dyn SerialTransport>>>;

/// Wrap a transport implementation into a [`SharedTransport`]
pub fn shared(transport: impl SerialTransport + 'static) -> SharedTransport {
    Arc::new(Mutex::new(Box::new(transport)))
}
