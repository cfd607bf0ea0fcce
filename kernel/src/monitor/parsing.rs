//! Command-line parsing
//!
//! Tokenizing a line into a bounded argument vector, and parsing the
//! hexadecimal addresses commands take.

use super::error::MonitorError;
use core::ops::Deref;
use kmon_shared::constants::monitor::MAX_ARGS;

/// Characters that separate tokens
pub const WHITESPACE: &[char] = &['\t', '\r', '\n', ' '];

/// Tokens of one command line, borrowed from the line
///
/// Holds at most `MAX_ARGS - 1` tokens; token 0 is the command name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Args<'a> {
    tokens: [&'a str; MAX_ARGS - 1],
    len: usize,
}

impl<'a> Deref for Args<'a> {
    type Target = [&'a str];

    fn deref(&self) -> &[&'a str] {
        &self.tokens[..self.len]
    }
}

/// Split `line` on [`WHITESPACE`].
///
/// Runs of separators count as one and leading or trailing separators are
/// ignored. A line with `MAX_ARGS` or more tokens is rejected as a whole.
pub fn tokenize(line: &str) -> Result<Args<'_>, MonitorError> {
    let mut args = Args {
        tokens: [""; MAX_ARGS - 1],
        len: 0,
    };
    for token in line.split(WHITESPACE).filter(|t| !t.is_empty()) {
        let slot = args
            .tokens
            .get_mut(args.len)
            .ok_or(MonitorError::TooManyArguments { max: MAX_ARGS })?;
        *slot = token;
        args.len += 1;
    }
    Ok(args)
}

/// Parse a base-16 address, with or without a `0x`/`0X` prefix.
///
/// At least one digit is required, every character after the prefix must be
/// a hex digit, and the value must fit in 64 bits. Signs are rejected.
pub fn parse_hex_address(s: &str) -> Result<u64, MonitorError> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(MonitorError::WrongAddress);
    }
    u64::from_str_radix(digits, 16).map_err(|_| MonitorError::WrongAddress)
}
