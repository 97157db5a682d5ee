//! Wire protocol: framing, classification, and outgoing commands
//!
//! The rig speaks newline-delimited ASCII in both directions:
//!
//! - Incoming telemetry: exactly six tab-separated signed decimals,
//!   e.g. `1.25\t2.30\t0.00\t-0.05\t3.33\t12.00`
//! - Incoming events: free text carrying one of the known tag tokens
//!   (`SET:`, `DONE:`, `ERR:`, `STOP:`, `OK:`, `MOV:`, `>`)
//! - Outgoing: `M{1-6}{+|-}{steps}`, `P{1-6}-{psi}`, `stop`, or a raw
//!   passthrough line
//!
//! [`LineFramer`] turns the byte stream into trimmed lines,
//! [`classify`] tags each line, and [`Command`] validates and renders
//! the outgoing side.

pub mod classifier;
pub mod command;
pub mod framer;

pub use classifier::{classify, LineClass, EVENT_TAGS};
pub use command::{Command, CommandError, JogDirection};
pub use framer::LineFramer;
