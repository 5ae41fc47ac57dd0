use parking_lot::Mutex;
/// Debug logging for tabshift
///
/// Controlled by DEBUG_LEVEL environment variable:
/// - 0 or unset: No debugging
/// - 1: Errors only
/// - 2: Info level (decisions, config reloads)
/// - 3: Debug level (predicate rebuilds, per-tab matches)
/// - 4: Trace level (pattern expansion, cache activity)
///
/// All output goes to /tmp/tabshift_debug.log on Unix/macOS,
/// or %TEMP%\tabshift_debug.log on Windows.
/// `log` crate records are routed there by [`init_log_bridge`]; when RUST_LOG
/// is set they are mirrored to stderr as well.
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Debug level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DebugLevel {
    Off = 0,
    Error = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl DebugLevel {
    fn from_env() -> Option<Self> {
        let val = std::env::var("DEBUG_LEVEL").ok()?;
        match val.trim().parse::<u8>() {
            Ok(0) => Some(DebugLevel::Off),
            Ok(1) => Some(DebugLevel::Error),
            Ok(2) => Some(DebugLevel::Info),
            Ok(3) => Some(DebugLevel::Debug),
            Ok(4) => Some(DebugLevel::Trace),
            _ => None,
        }
    }

    fn to_filter(self) -> log::LevelFilter {
        match self {
            DebugLevel::Off => log::LevelFilter::Off,
            DebugLevel::Error => log::LevelFilter::Error,
            DebugLevel::Info => log::LevelFilter::Info,
            DebugLevel::Debug => log::LevelFilter::Debug,
            DebugLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Path of the debug log file
pub fn log_path() -> PathBuf {
    #[cfg(windows)]
    let path = std::env::temp_dir().join("tabshift_debug.log");
    #[cfg(not(windows))]
    let path = PathBuf::from("/tmp/tabshift_debug.log");
    path
}

/// Sink shared by every log record
///
/// The file is opened (and truncated) when the first record is written, so
/// a run with logging off leaves any previous log untouched.
struct DebugLogger {
    file: Option<std::fs::File>,
    opened: bool,
    mirror_stderr: bool,
}

impl DebugLogger {
    fn new(mirror_stderr: bool) -> Self {
        DebugLogger {
            file: None,
            opened: false,
            mirror_stderr,
        }
    }

    fn open(&mut self) {
        self.opened = true;
        self.file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(log_path())
            // Silently fall back to stderr-only when the file can't be opened
            .ok();

        self.write_raw(&format!(
            "\n{}\ntabshift debug session started at {}\n{}\n",
            "=".repeat(80),
            get_timestamp(),
            "=".repeat(80)
        ));
    }

    fn write_raw(&mut self, msg: &str) {
        if let Some(ref mut file) = self.file {
            let _ = file.write_all(msg.as_bytes());
            let _ = file.flush();
        }
    }

    fn write_record(&mut self, level: log::Level, target: &str, msg: &str) {
        if !self.opened {
            self.open();
        }
        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            get_timestamp(),
            level,
            target,
            msg
        );
        self.write_raw(&line);
        if self.mirror_stderr {
            let _ = std::io::stderr().write_all(line.as_bytes());
        }
    }
}

/// `log::Log` implementation forwarding to the debug file
struct LogBridge {
    logger: Mutex<DebugLogger>,
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            self.logger.lock().write_record(
                record.level(),
                record.target(),
                &record.args().to_string(),
            );
        }
    }

    fn flush(&self) {
        if let Some(ref mut file) = self.logger.lock().file {
            let _ = file.flush();
        }
    }
}

static BRIDGE: OnceLock<LogBridge> = OnceLock::new();

/// Set when the level came from CLI or environment, so config can't lower it
static LEVEL_PINNED: OnceLock<bool> = OnceLock::new();

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Level from RUST_LOG when it names a plain level (`debug`, `info`, ...)
fn rust_log_level() -> Option<log::LevelFilter> {
    let val = std::env::var("RUST_LOG").ok()?;
    val.split(',')
        .find(|directive| !directive.contains('='))
        .and_then(|directive| directive.trim().parse().ok())
}

/// Install the log bridge.
///
/// Level precedence: `cli_level`, then RUST_LOG, then DEBUG_LEVEL; without
/// any of them the level stays at Warn until [`apply_config_debug`] runs.
/// Calling this more than once has no effect.
pub fn init_log_bridge(cli_level: Option<log::LevelFilter>) {
    let mirror_stderr = std::env::var_os("RUST_LOG").is_some();
    let explicit = cli_level
        .or_else(rust_log_level)
        .or_else(|| DebugLevel::from_env().map(DebugLevel::to_filter));

    let bridge = BRIDGE.get_or_init(|| LogBridge {
        logger: Mutex::new(DebugLogger::new(mirror_stderr)),
    });
    if log::set_logger(bridge).is_err() {
        return;
    }

    let _ = LEVEL_PINNED.set(explicit.is_some());
    log::set_max_level(explicit.unwrap_or(log::LevelFilter::Warn));
    log::debug!("Log bridge initialized at {}", log::max_level());
}

/// Apply the config `debug` flag, unless CLI or environment chose a level.
pub fn apply_config_debug(debug: bool) {
    if LEVEL_PINNED.get().copied().unwrap_or(false) {
        return;
    }
    let level = if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    log::set_max_level(level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_level_ordering() {
        assert!(DebugLevel::Error < DebugLevel::Trace);
        assert_eq!(DebugLevel::Debug.to_filter(), log::LevelFilter::Debug);
        assert_eq!(DebugLevel::Off.to_filter(), log::LevelFilter::Off);
    }

    #[test]
    fn test_timestamp_format() {
        let ts = get_timestamp();
        let (secs, micros) = ts.split_once('.').expect("timestamp has a dot");
        assert!(secs.parse::<u64>().is_ok());
        assert_eq!(micros.len(), 6);
    }

    #[test]
    fn test_logger_opens_file_on_first_record() {
        let mut logger = DebugLogger::new(false);
        assert!(!logger.opened);
        assert!(logger.file.is_none());

        logger.write_record(log::Level::Warn, "tabshift", "first record");
        assert!(logger.opened);
    }
}
