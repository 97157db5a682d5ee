//! Real serial port transport via the `serialport` crate

use crate::config::{ConnectionConfig, BAUD_RATE};
use crate::error::Result;
use crate::transport::SerialTransport;
use std::io::Read;

/// Serial transport backed by a physical port
///
/// The handle is created on [`open`](SerialTransport::open) and
/// dropped on [`close`](SerialTransport::close) or any fatal failure,
/// so `port.is_some()` is the single source of truth for
/// connectivity.
pub struct SerialLink {
    config: ConnectionConfig,
    port: Option<Box<dyn serialport::SerialPort>>,
}

impl SerialLink {
    /// Create a closed link with the given connection settings
    pub fn new(config: ConnectionConfig) -> Self {
        Self { config, port: None }
    }
}

impl SerialTransport for SerialLink {
    fn open(&mut self, device: &str) -> Result<()> {
        // Re-opening replaces any existing handle
        self.close();

        let port = serialport::new(device, BAUD_RATE)
            .timeout(self.config.read_timeout())
            .open()?;

        // Opening the port resets most USB-serial devices; give the
        // firmware time to boot, then drop whatever it printed while
        // resetting.
        std::thread::sleep(self.config.settle_delay());
        port.clear(serialport::ClearBuffer::All)?;

        tracing::info!("Opened {} at {} baud", device, BAUD_RATE);
        self.port = Some(port);
        Ok(())
    }

    fn close(&mut self) {
        if self.port.take().is_some() {
            tracing::info!("Closed serial port");
        }
    }

    fn is_connected(&self) -> bool {
        self.port.is_some()
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        match self.port.as_mut() {
            Some(port) => {
                port.write_all(bytes)?;
                port.flush()?;
                Ok(())
            }
            None => Err(crate::error::RigError::NotConnected),
        }
    }

    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize> {
        let Some(port) = self.port.as_mut() else {
            return Ok(0);
        };
        match port.read(buf) {
            Ok(n) => Ok(n),
            // Timeouts are the normal idle case for short-timeout reads
            Err(ref e) if e.kind() == std::io::ErrorKind::TimedOut => Ok(0),
            Err(e) => Err(e.into()),
        }
    }
}

/// List device paths of the serial ports currently present
///
/// On macOS only `/dev/cu.*` devices are reported; the `/dev/tty.*`
/// twins block on open waiting for carrier detect.
pub fn list_ports() -> Result<Vec<String>> {
    let ports = serialport::available_ports()?;
    Ok(ports
        .into_iter()
        .map(|p| p.port_name)
        .filter(|_name| {
            #[cfg(target_os = "macos")]
            {
                !_name.starts_with("/dev/tty.")
            }
            #[cfg(not(target_os = "macos"))]
            {
                true
            }
        })
        .collect())
}
