/// Galaxy3D Engine - global logging entry point
///
/// The picking core keeps no global geometry state: meshes, scenes, transform
/// stores and draggers are owned by the caller. The only process-wide state is
/// the logger sink and its severity threshold, stored behind a `RwLock` so the
/// `engine_*!` macros can be used from any module.

use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

// ===== INTERNAL STATE =====

/// Logger sink plus the minimum severity that reaches it
struct LoggerState {
    logger: Box<dyn Logger>,
    min_severity: LogSeverity,
}

impl LoggerState {
    fn new() -> Self {
        Self {
            logger: Box::new(DefaultLogger),
            min_severity: LogSeverity::Info,
        }
    }
}

/// Global logger (initialized with DefaultLogger at Info level)
static LOGGER: OnceLock<RwLock<LoggerState>> = OnceLock::new();

fn logger_state() -> &'static RwLock<LoggerState> {
    LOGGER.get_or_init(|| RwLock::new(LoggerState::new()))
}

// ===== PUBLIC API =====

/// Engine facade for the logging subsystem
///
/// # Example
///
/// ```no_run
/// use galaxy_3d_picking::galaxy3d::{Engine, log::{Logger, LogEntry, LogSeverity}};
///
/// struct Silent;
/// impl Logger for Silent {
///     fn log(&self, _entry: &LogEntry) {}
/// }
///
/// Engine::set_logger(Silent);
/// Engine::set_log_level(LogSeverity::Trace);
/// ```
pub struct Engine;

impl Engine {
    /// Replace the current logger with a custom implementation
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        if let Ok(mut lock) = logger_state().write() {
            lock.logger = Box::new(logger);
        }
    }

    /// Reset logger to DefaultLogger and the threshold to Info
    pub fn reset_logger() {
        if let Ok(mut lock) = logger_state().write() {
            *lock = LoggerState::new();
        }
    }

    /// Set the minimum severity forwarded to the logger
    ///
    /// Drag updates log at Trace every frame; the default threshold (Info)
    /// keeps them out of the console.
    pub fn set_log_level(severity: LogSeverity) {
        if let Ok(mut lock) = logger_state().write() {
            lock.min_severity = severity;
        }
    }

    /// Current minimum severity
    pub fn log_level() -> LogSeverity {
        logger_state()
            .read()
            .map(|lock| lock.min_severity)
            .unwrap_or(LogSeverity::Info)
    }

    /// Internal logging method (for simple logs without file:line)
    ///
    /// Used by macros like engine_info!, engine_warn!, etc.
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        Self::dispatch(severity, source, message, None, None);
    }

    /// Internal logging method with file:line information (for ERROR logs)
    ///
    /// Used by engine_error! (and therefore engine_err!/engine_bail!).
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        Self::dispatch(severity, source, message, Some(file), Some(line));
    }

    fn dispatch(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: Option<&'static str>,
        line: Option<u32>,
    ) {
        if let Ok(lock) = logger_state().read() {
            if severity < lock.min_severity {
                return;
            }
            lock.logger.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file,
                line,
            });
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
