//! Background acquisition loop
//!
//! Runs on its own thread, independent of the consumer's pace: polls
//! the shared transport for available bytes, frames them into lines,
//! and forwards each line into the bounded queue the pump drains.
//!
//! The loop never terminates on disconnect. While the transport is
//! closed it idles at a low-frequency poll so a reconnect needs no
//! thread restart; while open it polls at the configured interval,
//! bounded by the transport's short read timeout, so a disconnect is
//! observed quickly. Read errors are treated as transient and
//! swallowed.
//!
//! Queue overflow policy is explicit: when the pump falls behind and
//! the queue fills, the newest line is dropped and counted, never
//! silently lost.

use crate::config::AcquisitionConfig;
use crate::protocol::LineFramer;
use crate::transport::SharedTransport;
use crossbeam_channel::{Sender, TrySendError};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

/// Read chunk size per poll; generous for 115200 baud at a 5 ms poll
const READ_CHUNK: usize = 512;

/// The acquisition worker that feeds the line queue
pub struct AcquisitionWorker {
    transport: SharedTransport,
    line_tx: Sender<String>,
    running: Arc<AtomicBool>,
    dropped: Arc<AtomicU64>,
    config: AcquisitionConfig,
    framer: LineFramer,
}

impl AcquisitionWorker {
    /// Create a worker over the shared transport
    pub fn new(
        transport: SharedTransport,
        line_tx: Sender<String>,
        running: Arc<AtomicBool>,
        dropped: Arc<AtomicU64>,
        config: AcquisitionConfig,
    ) -> Self {
        Self {
            transport,
            line_tx,
            running,
            dropped,
            config,
            framer: LineFramer::new(),
        }
    }

    /// Run the polling loop until the running flag clears or the
    /// consumer side of the queue goes away
    pub fn run(mut self) {
        tracing::debug!("Acquisition worker started");
        while self.running.load(Ordering::SeqCst) {
            let connected = self.poll_once();
            let interval = if connected {
                self.config.poll_interval()
            } else {
                self.config.idle_interval()
            };
            std::thread::sleep(interval);
        }
        tracing::debug!("Acquisition worker stopped");
    }

    /// One poll iteration; returns whether the transport was connected
    fn poll_once(&mut self) -> bool {
        let mut buf = [0u8; READ_CHUNK];
        let mut collected: Vec<u8> = Vec::new();

        {
            let mut transport = match self.transport.lock() {
                Ok(guard) => guard,
                // A poisoned lock means the command path panicked;
                // keep idling rather than taking the pipeline down.
                Err(_) => return false,
            };
            if !transport.is_connected() {
                return false;
            }
            loop {
                match transport.read_available(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => {
                        collected.extend_from_slice(&buf[..n]);
                        if n < buf.len() {
                            break;
                        }
                    }
                    Err(e) => {
                        // Transient: swallow and retry next poll
                        tracing::debug!("Transient read error: {}", e);
                        break;
                    }
                }
            }
        }

        for line in self.framer.push_bytes(&collected) {
            match self.line_tx.try_send(line) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    let dropped = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
                    tracing::warn!("Line queue full, dropped line (total dropped: {})", dropped);
                }
                Err(TrySendError::Disconnected(_)) => {
                    self.running.store(false, Ordering::SeqCst);
                    return true;
                }
            }
        }
        true
    }
}

/// Spawn the worker on a named thread
pub fn spawn(worker: AcquisitionWorker) -> JoinHandle<()> {
    std::thread::Builder::new()
        .name("rig-acquisition".to_string())
        .spawn(move || worker.run())
        .expect("failed to spawn acquisition thread")
}
