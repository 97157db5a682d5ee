//! # pressure-rig: serial control and live telemetry pipeline
//!
//! Library for driving a six-channel pressure/motor rig over a serial
//! link: it issues validated ASCII commands, ingests the device's
//! continuous telemetry stream, and maintains a rolling, exportable
//! history. The GUI (plotting, dialogs, layout) lives elsewhere and
//! consumes this crate's read-only views.
//!
//! ## Architecture
//!
//! - **Transport**: trait-object serial layer ([`transport`]) with a
//!   real `serialport` implementation and a scripted mock
//! - **Protocol**: byte-to-line framing, line classification, and
//!   outgoing command validation/encoding ([`protocol`])
//! - **State**: fixed-capacity rolling history ([`history`]) and a
//!   bounded event log ([`event_log`])
//! - **Pipeline**: a background acquisition thread ([`acquisition`])
//!   feeding a bounded crossbeam queue, drained by the session's
//!   periodic pump ([`session`])
//! - **Export**: pure CSV serialization of a history snapshot
//!   ([`export`])
//!
//! ## Example
//!
//! ```ignore
//! use pressure_rig::{Command, JogDirection, RigConfig, RigSession};
//! use pressure_rig::config::PUMP_PERIOD;
//!
//! let mut session = RigSession::new(RigConfig::default());
//! session.connect("/dev/ttyUSB0")?;
//! session.send(Command::jog(0, JogDirection::Forward, 100)?)?;
//!
//! loop {
//!     session.pump();
//!     println!("latest: {:?}", session.latest_per_channel());
//!     std::thread::sleep(PUMP_PERIOD);
//! }
//! ```

pub mod acquisition;
pub mod config;
pub mod error;
pub mod event_log;
pub mod export;
pub mod history;
pub mod protocol;
pub mod session;
pub mod transport;
pub mod types;

// Re-export commonly used types
pub use config::RigConfig;
pub use error::{Result, RigError};
pub use event_log::{EventLog, EventRecord};
pub use history::TelemetryHistory;
pub use protocol::{classify, Command, CommandError, JogDirection, LineClass, LineFramer};
pub use session::RigSession;
pub use transport::{list_ports, MockTransport, SerialLink, SerialTransport};
pub use types::{ConnectionState, PumpStats, TelemetrySample, CHANNEL_COUNT};
