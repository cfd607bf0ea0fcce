//! Monitor input errors
//!
//! Every variant is a user mistake. The shell prints it as one console line
//! and keeps running.

use alloc::string::String;
use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorError {
    /// The line had more tokens than the argument vector holds
    TooManyArguments { max: usize },
    /// The first token is not in the command table
    UnknownCommand(String),
    /// An address argument is not a valid hexadecimal number
    WrongAddress,
    /// Wrong number of arguments; carries the usage line
    Usage(&'static str),
}

impl fmt::Display for MonitorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorError::TooManyArguments { max } => {
                write!(f, "Too many arguments (max {})", max)
            }
            MonitorError::UnknownCommand(name) => write!(f, "Unknown command '{}'", name),
            MonitorError::WrongAddress => f.write_str("Wrong address!"),
            MonitorError::Usage(usage) => write!(f, "Usage: {}", usage),
        }
    }
}
