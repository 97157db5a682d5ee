//! Error handling for the pressure-rig library
//!
//! This module defines the crate-wide error type and a Result alias.
//! The propagation policy follows the pipeline design: transient
//! conditions (read timeouts, unparseable lines) are never reported
//! through these types, while user-actionable conditions (validation,
//! write, export, transport-open failures) always are.

use crate::protocol::CommandError;
use thiserror::Error;

/// Main error type for pressure-rig operations
#[derive(Error, Debug)]
pub enum RigError {
    /// Errors raised by the serial port layer
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    /// IO errors (reads and writes on an open port)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An operation required a live transport but none was open
    #[error("Not connected")]
    NotConnected,

    /// A command failed validation before any bytes were written
    #[error("Invalid command: {0}")]
    Validation(#[from] CommandError),

    /// An outgoing command could not be transmitted
    #[error("Write failed: {0}")]
    Write(String),

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors producing an export buffer
    #[error("Export error: {0}")]
    Export(String),

    /// Errors related to channel communication with the acquisition thread
    #[error("Channel error: {0}")]
    Channel(String),
}

/// Result type alias for pressure-rig operations
pub type Result<T> = std::result::Result<T, RigError>;
