//! Kernel configuration constants
//!
//! Centralized configuration for monitor behavior and debug toggles. Other
//! modules should import these values from `kmon_kernel::config` to keep
//! configuration in a single place.

/// When `true`, `monitor::enter` runs the interactive monitor on COM1.
/// When `false` it parks the CPU instead.
pub const ENABLE_KERNEL_MONITOR: bool = true;

/// Prompt printed before every command line.
pub const MONITOR_PROMPT: &str = "K> ";

/// Upper bound on frames printed by `backtrace`.
///
/// `None` walks the saved frame-pointer chain until it reaches zero. A
/// corrupted chain that loops over mapped memory never terminates in that
/// mode; set a bound when debugging a kernel whose stacks may be smashed.
pub const BACKTRACE_FRAME_LIMIT: Option<usize> = None;

// ============================================================================
// Logging Configuration
// ============================================================================

use crate::logging::{LogLevel, OutputTarget};

/// Default log level for modules without specific configuration
pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

/// Per-module log level overrides
///
/// Format: ("module::path", LogLevel::Level)
///
/// Paths match exactly; a parent entry does not cover its submodules.
pub const MODULE_LOG_LEVELS: &[(&str, LogLevel)] = &[
    ("kmon_kernel::monitor", LogLevel::Debug),
    ("kmon_kernel::monitor::commands::stack", LogLevel::Debug),
    ("kmon_kernel::monitor::commands::memory", LogLevel::Debug),
    // ("kmon_kernel::backtrace", LogLevel::Trace),
];

/// Output target for ERROR level logs
pub const LOG_OUTPUT_ERROR: OutputTarget = OutputTarget::Both;

/// Output target for WARN level logs
pub const LOG_OUTPUT_WARN: OutputTarget = OutputTarget::QemuDebug;

/// Output target for INFO level logs
pub const LOG_OUTPUT_INFO: OutputTarget = OutputTarget::QemuDebug;

/// Output target for DEBUG level logs
pub const LOG_OUTPUT_DEBUG: OutputTarget = OutputTarget::QemuDebug;

/// Output target for TRACE level logs
pub const LOG_OUTPUT_TRACE: OutputTarget = OutputTarget::QemuDebug;
