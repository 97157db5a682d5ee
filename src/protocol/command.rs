//! Outgoing command validation and encoding

use crate::types::CHANNEL_COUNT;
use thiserror::Error;

/// Lowest setpoint the rig accepts, in psi
pub const MIN_SETPOINT_PSI: f64 = 0.25;

/// Highest setpoint the rig accepts, in psi
pub const MAX_SETPOINT_PSI: f64 = 12.5;

/// Validation failures raised before any bytes are written
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    /// Jog step count must be strictly positive
    #[error("steps must be > 0 (got {0})")]
    StepsNotPositive(i64),

    /// Jog step count exceeds what the wire format can carry
    #[error("steps {0} exceed the maximum of 4294967295")]
    StepsTooLarge(i64),

    /// Motor index outside the rig's six motors
    #[error("motor index {0} out of range 0..=5")]
    MotorIndexOutOfRange(usize),

    /// Channel index outside the rig's six pressure channels
    #[error("channel index {0} out of range 0..=5")]
    ChannelIndexOutOfRange(usize),

    /// Setpoint outside the permitted pressure band
    #[error("target {0} psi outside [{MIN_SETPOINT_PSI}, {MAX_SETPOINT_PSI}]")]
    SetpointOutOfRange(f64),

    /// Raw command was empty after trimming
    #[error("empty command")]
    EmptyCommand,
}

/// Jog direction for relative motor moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JogDirection {
    Forward,
    Backward,
}

/// A validated outgoing command
///
/// Instances only exist after validation, so [`encode`](Command::encode)
/// is infallible. The rendered text excludes the trailing newline; the
/// transmission path appends it.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Relative motor move
    Jog {
        motor: usize,
        direction: JogDirection,
        steps: u32,
    },
    /// Pressure target for one channel
    Setpoint { channel: usize, target_psi: f64 },
    /// Emergency stop for all motors
    Stop,
    /// Trimmed free-text passthrough
    Raw(String),
}

impl Command {
    /// Build a jog command: `motor` in 0..6, `steps` in `1..=u32::MAX`
    pub fn jog(motor: usize, direction: JogDirection, steps: i64) -> Result<Self, CommandError> {
        if motor >= CHANNEL_COUNT {
            return Err(CommandError::MotorIndexOutOfRange(motor));
        }
        if steps <= 0 {
            return Err(CommandError::StepsNotPositive(steps));
        }
        let steps = u32::try_from(steps).map_err(|_| CommandError::StepsTooLarge(steps))?;
        Ok(Command::Jog {
            motor,
            direction,
            steps,
        })
    }

    /// Build a setpoint command: `channel` in 0..6, `target_psi` in
    /// the closed interval [0.25, 12.5]
    pub fn setpoint(channel: usize, target_psi: f64) -> Result<Self, CommandError> {
        if channel >= CHANNEL_COUNT {
            return Err(CommandError::ChannelIndexOutOfRange(channel));
        }
        if !target_psi.is_finite()
            || target_psi < MIN_SETPOINT_PSI
            || target_psi > MAX_SETPOINT_PSI
        {
            return Err(CommandError::SetpointOutOfRange(target_psi));
        }
        Ok(Command::Setpoint {
            channel,
            target_psi,
        })
    }

    /// The stop-all command
    pub fn stop() -> Self {
        Command::Stop
    }

    /// Build a raw passthrough command from user text
    pub fn raw(text: &str) -> Result<Self, CommandError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(CommandError::EmptyCommand);
        }
        Ok(Command::Raw(trimmed.to_string()))
    }

    /// Render the exact wire text, without the trailing newline
    pub fn encode(&self) -> String {
        match self {
            Command::Jog {
                motor,
                direction,
                steps,
            } => {
                let sign = match direction {
                    JogDirection::Forward => '+',
                    JogDirection::Backward => '-',
                };
                format!("M{}{}{}", motor + 1, sign, steps)
            }
            Command::Setpoint {
                channel,
                target_psi,
            } => format!("P{}-{:.2}", channel + 1, target_psi),
            Command::Stop => "stop".to_string(),
            Command::Raw(text) => text.clone(),
        }
    }
}
