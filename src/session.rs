//! Rig session: explicit pipeline state and the consumption pump
//!
//! [`RigSession`] replaces the ambient all-on-one-object state of a
//! typical control panel with one explicit struct owned by the
//! consumer. It holds the shared transport, the line queue receiver,
//! the rolling history, the event log, and the connection state, and
//! it is the sole mutator of history and log: all mutation happens in
//! [`pump`](RigSession::pump), on the caller's single execution
//! context, so none of those structures need locking.
//!
//! # Concurrency domains
//!
//! - The acquisition thread (spawned on construction) only reads the
//!   transport and produces lines into the bounded queue.
//! - The pump drains the whole queue each tick, in FIFO order, so
//!   samples and events land in exactly the order they were framed.
//! - Outgoing writes happen synchronously on the request path
//!   ([`send`](RigSession::send)), guarded by the explicit
//!   [`ConnectionState`] and by the transport mutex.
//!
//! # Example
//!
//! ```ignore
//! use pressure_rig::{Command, JogDirection, RigConfig, RigSession};
//! use pressure_rig::config::PUMP_PERIOD;
//!
//! let mut session = RigSession::new(RigConfig::default());
//! session.connect("/dev/ttyUSB0")?;
//! session.send(Command::jog(2, JogDirection::Forward, 250)?)?;
//! loop {
//!     session.pump();
//!     let latest = session.latest_per_channel();
//!     std::thread::sleep(PUMP_PERIOD);
//! }
//! ```

use crate::acquisition::{self, AcquisitionWorker};
use crate::config::RigConfig;
use crate::error::{Result, RigError};
use crate::event_log::EventLog;
use crate::export;
use crate::history::TelemetryHistory;
use crate::protocol::{classify, Command, LineClass};
use crate::transport::{shared, SerialLink, SharedTransport};
use crate::types::{ConnectionState, PumpStats, TelemetrySample, CHANNEL_COUNT};
use crossbeam_channel::{bounded, Receiver};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

/// A live pipeline session over one serial transport
pub struct RigSession {
    transport: SharedTransport,
    line_rx: Receiver<String>,
    history: TelemetryHistory,
    events: EventLog,
    state: ConnectionState,
    stats: PumpStats,
    dropped: Arc<AtomicU64>,
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl RigSession {
    /// Create a session over a real serial link and start its
    /// acquisition thread
    pub fn new(config: RigConfig) -> Self {
        let link = SerialLink::new(config.connection.clone());
        Self::with_transport(config, shared(link))
    }

    /// Create a session over an arbitrary transport (mock in tests)
    pub fn with_transport(config: RigConfig, transport: SharedTransport) -> Self {
        let (line_tx, line_rx) = bounded(config.acquisition.line_queue_capacity);
        let running = Arc::new(AtomicBool::new(true));
        let dropped = Arc::new(AtomicU64::new(0));

        let worker = AcquisitionWorker::new(
            transport.clone(),
            line_tx,
            running.clone(),
            dropped.clone(),
            config.acquisition.clone(),
        );
        let worker = acquisition::spawn(worker);

        Self {
            transport,
            line_rx,
            history: TelemetryHistory::new(config.history.capacity, config.history.span_secs),
            events: EventLog::new(&config.event_log),
            state: ConnectionState::Disconnected,
            stats: PumpStats::default(),
            dropped,
            running,
            worker: Some(worker),
        }
    }

    /// Open the transport on `device`
    ///
    /// Performs the full open+settle+flush sequence. On failure the
    /// state stays `Disconnected` and the error is returned; nothing
    /// retries.
    pub fn connect(&mut self, device: &str) -> Result<()> {
        let result = match self.transport.lock() {
            Ok(mut transport) => transport.open(device),
            Err(_) => Err(RigError::Channel("transport lock poisoned".to_string())),
        };
        match result {
            Ok(()) => {
                self.state = ConnectionState::Connected;
                self.events.append(format!("Connected: {}", device));
                tracing::info!("Connected to {}", device);
                Ok(())
            }
            Err(e) => {
                self.state = ConnectionState::Disconnected;
                tracing::error!("Connect failed: {}", e);
                Err(e)
            }
        }
    }

    /// Close the transport; idempotent
    ///
    /// The acquisition thread keeps running (idling) so a later
    /// [`connect`](Self::connect) needs no restart.
    pub fn disconnect(&mut self) {
        if let Ok(mut transport) = self.transport.lock() {
            transport.close();
        }
        if self.state == ConnectionState::Connected {
            self.events.append("Disconnected from serial port");
            tracing::info!("Disconnected");
        }
        self.state = ConnectionState::Disconnected;
    }

    /// Current connection state
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Transmit a validated command
    ///
    /// Encodes the command, appends the protocol newline, and writes
    /// it synchronously. Refused with [`RigError::NotConnected`] when
    /// no transport is open; a write failure forces the state back to
    /// `Disconnected` and the command counts as not sent.
    pub fn send(&mut self, command: Command) -> Result<()> {
        if self.state != ConnectionState::Connected {
            return Err(RigError::NotConnected);
        }
        let encoded = command.encode();
        let result = match self.transport.lock() {
            Ok(mut transport) => transport.write_all(format!("{}\n", encoded).as_bytes()),
            Err(_) => Err(RigError::Channel("transport lock poisoned".to_string())),
        };
        match result {
            Ok(()) => {
                self.events.append(format!("> {}", encoded));
                Ok(())
            }
            Err(e) => {
                tracing::error!("Send failed for '{}': {}", encoded, e);
                self.state = ConnectionState::Disconnected;
                Err(RigError::Write(e.to_string()))
            }
        }
    }

    /// Drain the line queue and apply every classified line
    ///
    /// Call at a fixed cadence ([`PUMP_PERIOD`](crate::config::PUMP_PERIOD)).
    /// Lines are applied strictly in arrival order: telemetry advances
    /// the history (and the latest-value readout), events land in the
    /// log, everything else is counted and dropped. Returns the number
    /// of lines processed this tick.
    pub fn pump(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(line) = self.line_rx.try_recv() {
            processed += 1;
            match classify(&line) {
                LineClass::Telemetry(values) => {
                    self.history.admit(&TelemetrySample::new(values));
                    self.stats.telemetry_lines += 1;
                }
                LineClass::Event(text) => {
                    self.events.append(text);
                    self.stats.event_lines += 1;
                }
                LineClass::Ignored => {
                    self.stats.ignored_lines += 1;
                }
            }
        }
        self.stats.dropped_lines = self.dropped.load(Ordering::Relaxed);
        processed
    }

    /// Rolling history (read-only)
    pub fn history(&self) -> &TelemetryHistory {
        &self.history
    }

    /// Event log (read-only)
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Newest parsed value per channel, live even while paused
    pub fn latest_per_channel(&self) -> [f64; CHANNEL_COUNT] {
        self.history.latest_per_channel()
    }

    /// Pump counters
    pub fn stats(&self) -> PumpStats {
        self.stats
    }

    /// Gate whether new samples advance the rolling history
    pub fn set_capture_enabled(&mut self, enabled: bool) {
        self.history.set_capture_enabled(enabled);
    }

    /// Serialize the current export view (frozen snapshot while
    /// paused, live contents otherwise) to CSV bytes plus a suggested
    /// filename
    pub fn export(&self, title: &str) -> Result<(Vec<u8>, String)> {
        let rows = self.history.snapshot_for_export();
        let bytes = export::write_csv(&rows, &self.history.time_axis())?;
        Ok((bytes, export::suggested_filename(title)))
    }

    /// Stop the acquisition thread and close the transport; idempotent
    pub fn shutdown(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        self.disconnect();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for RigSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::JogDirection;
    use crate::transport::MockTransport;

    fn mock_session() -> (RigSession, MockTransport) {
        let mock = MockTransport::new();
        let session = RigSession::with_transport(RigConfig::default(), shared(mock.clone()));
        (session, mock)
    }

    /// Pump until `predicate` holds or a short deadline passes;
    /// bridges the acquisition thread's polling cadence.
    fn pump_until(session: &mut RigSession, predicate: impl Fn(&RigSession) -> bool) {
        for _ in 0..100 {
            session.pump();
            if predicate(session) {
                return;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        panic!("condition not reached within deadline");
    }

    #[test]
    fn test_send_when_disconnected_is_refused() {
        let (mut session, mock) = mock_session();
        let err = session.send(Command::stop()).unwrap_err();
        assert!(matches!(err, RigError::NotConnected));
        assert!(mock.written().is_empty());
    }

    #[test]
    fn test_connect_and_send() {
        let (mut session, mock) = mock_session();
        session.connect("mock0").unwrap();
        assert_eq!(session.state(), ConnectionState::Connected);

        session
            .send(Command::jog(2, JogDirection::Forward, 250).unwrap())
            .unwrap();
        assert_eq!(mock.written_text(), "M3+250\n");

        // Sent command is event-logged with the prompt prefix
        let lines = session.events().display_lines();
        assert!(lines.iter().any(|l| l.ends_with("| > M3+250")));
    }

    #[test]
    fn test_failed_connect_leaves_disconnected() {
        let (mut session, mock) = mock_session();
        mock.fail_next_open();
        assert!(session.connect("mock0").is_err());
        assert_eq!(session.state(), ConnectionState::Disconnected);
    }

    #[test]
    fn test_write_failure_surfaces_and_disconnects() {
        let (mut session, mock) = mock_session();
        session.connect("mock0").unwrap();
        mock.fail_writes(true);

        let err = session.send(Command::stop()).unwrap_err();
        assert!(matches!(err, RigError::Write(_)));
        assert_eq!(session.state(), ConnectionState::Disconnected);
    }

    #[test]
    fn test_pump_applies_telemetry_and_events() {
        let (mut session, mock) = mock_session();
        session.connect("mock0").unwrap();

        mock.push_line("1.25\t2.30\t0.00\t-0.05\t3.33\t12.00");
        mock.push_line("SET: P1 target 5.00");
        mock.push_line("noise to ignore");

        pump_until(&mut session, |s| s.stats().total_classified() >= 3);

        let stats = session.stats();
        assert_eq!(stats.telemetry_lines, 1);
        assert_eq!(stats.event_lines, 1);
        assert_eq!(stats.ignored_lines, 1);

        assert_eq!(
            session.latest_per_channel(),
            [1.25, 2.30, 0.00, -0.05, 3.33, 12.00]
        );
        assert!(session
            .events()
            .entries()
            .any(|e| e.message == "SET: P1 target 5.00"));
    }

    #[test]
    fn test_event_line_does_not_touch_history() {
        let (mut session, mock) = mock_session();
        session.connect("mock0").unwrap();
        let before = session.history().snapshot_for_export();

        mock.push_line("SET: P1 target 5.00");
        pump_until(&mut session, |s| s.stats().event_lines >= 1);

        assert_eq!(session.history().snapshot_for_export(), before);
    }

    #[test]
    fn test_pause_export_resume_scenario() {
        let (mut session, mock) = mock_session();
        session.connect("mock0").unwrap();

        mock.push_line("1.0\t1.0\t1.0\t1.0\t1.0\t1.0");
        pump_until(&mut session, |s| s.stats().telemetry_lines >= 1);

        session.set_capture_enabled(false);
        let frozen = session.history().snapshot_for_export();

        for i in 0..5 {
            mock.push_line(&format!("{0}.0\t{0}.0\t{0}.0\t{0}.0\t{0}.0\t{0}.0", i + 2));
        }
        pump_until(&mut session, |s| s.stats().telemetry_lines >= 6);

        // Export reflects the pre-pause snapshot, not the 5 new samples
        let (bytes, _name) = session.export("test").unwrap();
        let expected = crate::export::write_csv(&frozen, &session.history().time_axis()).unwrap();
        assert_eq!(bytes, expected);

        // But the latest readout tracked the newest of the 5
        assert_eq!(session.latest_per_channel()[0], 6.0);
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let (mut session, _mock) = mock_session();
        session.connect("mock0").unwrap();
        session.shutdown();
        session.shutdown();
        assert_eq!(session.state(), ConnectionState::Disconnected);
    }
}
