//! Diagnostic output routed to a log file next to the executable
//!
//! Redirection is best-effort: when the log file cannot be opened the sink
//! falls back to [`DiagnosticSink::Null`] and startup carries on. Records
//! from the `log` facade and panic reports both land in the active sink.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;

/// Name of the diagnostics file
pub const LOG_FILE_NAME: &str = "errors.log";

static SINK: Mutex<DiagnosticSink> = Mutex::new(DiagnosticSink::Null);

static LOGGER: DiagnosticLogger = DiagnosticLogger;

/// Get the directory where the executable is located
pub fn exe_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Log file location for the current platform, `None` where diagnostics
/// stay on the standard streams (macOS).
pub fn default_target() -> Option<PathBuf> {
    if cfg!(target_os = "macos") {
        None
    } else {
        Some(exe_dir().join(LOG_FILE_NAME))
    }
}

/// Destination for diagnostic output
#[derive(Debug, Default)]
pub enum DiagnosticSink {
    /// Append-mode log file
    File { file: File, path: PathBuf },
    /// Discards everything
    #[default]
    Null,
}

impl DiagnosticSink {
    /// Open the sink for `target`, falling back to `Null` on any failure
    pub fn open(target: Option<&Path>) -> Self {
        let Some(path) = target else {
            return DiagnosticSink::Null;
        };

        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => DiagnosticSink::File {
                file,
                path: path.to_path_buf(),
            },
            Err(_) => DiagnosticSink::Null,
        }
    }

    /// Path of the backing file, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            DiagnosticSink::File { path, .. } => Some(path),
            DiagnosticSink::Null => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, DiagnosticSink::Null)
    }

    /// Write one timestamped line; write errors are dropped
    pub fn write_line(&mut self, line: &str) {
        if let DiagnosticSink::File { file, .. } = self {
            let ts = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
            let _ = writeln!(file, "[{}] {}", ts, line);
            let _ = file.flush();
        }
    }
}

/// `log` backend writing into the process-wide sink
struct DiagnosticLogger;

impl Log for DiagnosticLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        // Format before locking: the panic hook takes the same lock.
        let line = format!("{:<5} {}", record.level(), record.args());
        SINK.lock().write_line(&line);
    }

    fn flush(&self) {
        if let DiagnosticSink::File { file, .. } = &mut *SINK.lock() {
            let _ = file.flush();
        }
    }
}

/// Route diagnostics to `target`.
///
/// Returns the path of the log file now receiving output, or `None` when
/// the no-op sink is in place. Never fails.
pub fn redirect(target: Option<&Path>) -> Option<PathBuf> {
    let sink = DiagnosticSink::open(target);
    let active = sink.path().map(Path::to_path_buf);
    *SINK.lock() = sink;

    // The logger and panic hook are process-wide and only installed once.
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(if cfg!(debug_assertions) {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        });
        install_panic_hook();
    }

    active
}

fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        SINK.lock().write_line(&format!("PANIC {}", info));
        previous(info);
    }));
}
