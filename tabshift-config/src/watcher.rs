//! Config file watcher for automatic reload.
//!
//! Watches the config file's directory and reports changes to the file
//! itself. Editors often write a file several times per save, so events that
//! arrive within the debounce window of the previous one are dropped.

use anyhow::{Context, Result};
use notify::{Config as NotifyConfig, Event, EventKind, PollWatcher, RecursiveMode, Watcher};
use parking_lot::Mutex;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::time::{Duration, Instant};

/// Poll interval used when the native backend is unavailable.
const POLL_INTERVAL_MS: u64 = 500;

/// Event indicating the config file has changed and needs reloading.
#[derive(Debug, Clone)]
pub struct ConfigReloadEvent {
    /// Path to the config file that changed.
    pub path: PathBuf,
}

/// Watches the config file for changes and sends reload events.
pub struct ConfigWatcher {
    /// Kept alive to keep watching.
    _watcher: Box<dyn Watcher + Send>,
    event_receiver: Receiver<ConfigReloadEvent>,
}

impl std::fmt::Debug for ConfigWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigWatcher").finish_non_exhaustive()
    }
}

/// Filters raw notify events down to debounced reload events for one file.
#[derive(Clone)]
struct ReloadFilter {
    filename: OsString,
    path: PathBuf,
    debounce: Duration,
    last_sent: Arc<Mutex<Option<Instant>>>,
    tx: Sender<ConfigReloadEvent>,
}

impl ReloadFilter {
    fn handle(&self, result: notify::Result<Event>) {
        let event = match result {
            Ok(event) => event,
            Err(e) => {
                log::debug!("Config watcher error: {}", e);
                return;
            }
        };

        // Create covers editors that save by writing a new file and renaming
        if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
            return;
        }
        if !event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(self.filename.as_os_str()))
        {
            return;
        }

        {
            let now = Instant::now();
            let mut last = self.last_sent.lock();
            if last.is_some_and(|t| now.duration_since(t) < self.debounce) {
                log::trace!("Debouncing config reload event");
                return;
            }
            *last = Some(now);
        }

        log::info!("Config file changed: {}", self.path.display());
        let reload = ConfigReloadEvent {
            path: self.path.clone(),
        };
        if let Err(e) = self.tx.send(reload) {
            log::error!("Failed to send config reload event: {}", e);
        }
    }
}

impl ConfigWatcher {
    /// Start watching `config_path`.
    ///
    /// Uses the platform's native watcher and falls back to polling every
    /// 500 ms when that is unavailable (containers, network filesystems).
    ///
    /// # Errors
    /// Returns an error if the file doesn't exist or neither backend can watch
    /// its directory.
    pub fn new(config_path: &Path, debounce_delay_ms: u64) -> Result<Self> {
        if !config_path.exists() {
            anyhow::bail!("Config file not found: {}", config_path.display());
        }

        let canonical = config_path
            .canonicalize()
            .unwrap_or_else(|_| config_path.to_path_buf());
        let filename = canonical
            .file_name()
            .context("Config path has no filename")?
            .to_os_string();
        let parent_dir = canonical
            .parent()
            .context("Config path has no parent directory")?
            .to_path_buf();

        let (tx, rx) = channel();
        let filter = ReloadFilter {
            filename,
            path: canonical.clone(),
            debounce: Duration::from_millis(debounce_delay_ms),
            last_sent: Arc::new(Mutex::new(None)),
            tx,
        };

        let mut watcher = Self::create_watcher(filter)?;
        watcher
            .watch(&parent_dir, RecursiveMode::NonRecursive)
            .with_context(|| {
                format!("Failed to watch config directory: {}", parent_dir.display())
            })?;

        log::info!("Config hot reload: watching {}", canonical.display());

        Ok(Self {
            _watcher: watcher,
            event_receiver: rx,
        })
    }

    fn create_watcher(filter: ReloadFilter) -> Result<Box<dyn Watcher + Send>> {
        let native = filter.clone();
        match notify::recommended_watcher(move |res| native.handle(res)) {
            Ok(w) => {
                log::debug!("Config watcher: using native backend");
                Ok(Box::new(w))
            }
            Err(e) => {
                log::warn!(
                    "Config watcher: native backend unavailable ({}); falling back to polling",
                    e
                );
                let poll = PollWatcher::new(
                    move |res| filter.handle(res),
                    NotifyConfig::default()
                        .with_poll_interval(Duration::from_millis(POLL_INTERVAL_MS)),
                )
                .context("Failed to create fallback PollWatcher")?;
                Ok(Box::new(poll))
            }
        }
    }

    /// Next pending reload event, if any (non-blocking).
    pub fn try_recv(&self) -> Option<ConfigReloadEvent> {
        self.event_receiver.try_recv().ok()
    }

    /// Wait up to `timeout` for a reload event.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<ConfigReloadEvent> {
        self.event_receiver.recv_timeout(timeout).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_file(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("config.yaml");
        fs::write(&path, "padding: 0\n").expect("Failed to write config");
        path
    }

    #[test]
    fn test_watcher_creation_with_existing_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = config_file(&temp_dir);
        assert!(ConfigWatcher::new(&path, 100).is_ok());
    }

    #[test]
    fn test_watcher_creation_with_nonexistent_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("missing.yaml");
        assert!(ConfigWatcher::new(&path, 100).is_err());
    }

    #[test]
    fn test_no_initial_events() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = config_file(&temp_dir);
        let watcher = ConfigWatcher::new(&path, 100).expect("Failed to create watcher");
        assert!(watcher.try_recv().is_none());
        assert!(format!("{:?}", watcher).contains("ConfigWatcher"));
    }

    #[test]
    fn test_file_change_detection() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = config_file(&temp_dir);
        let watcher = ConfigWatcher::new(&path, 50).expect("Failed to create watcher");

        std::thread::sleep(Duration::from_millis(100));
        fs::write(&path, "padding: 2\n").expect("Failed to write config");

        // Backend timing varies by platform, so only check the payload if one arrives
        if let Some(event) = watcher.recv_timeout(Duration::from_millis(1500)) {
            assert!(event.path.ends_with("config.yaml"));
        }
    }

    #[test]
    fn test_filter_debounces_bursts() {
        let (tx, rx) = channel();
        let filter = ReloadFilter {
            filename: OsString::from("config.yaml"),
            path: PathBuf::from("/cfg/config.yaml"),
            debounce: Duration::from_secs(60),
            last_sent: Arc::new(Mutex::new(None)),
            tx,
        };
        let event = || {
            Ok(Event::new(EventKind::Modify(notify::event::ModifyKind::Any))
                .add_path(PathBuf::from("/cfg/config.yaml")))
        };

        filter.handle(event());
        filter.handle(event());
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_filter_ignores_other_files() {
        let (tx, rx) = channel();
        let filter = ReloadFilter {
            filename: OsString::from("config.yaml"),
            path: PathBuf::from("/cfg/config.yaml"),
            debounce: Duration::ZERO,
            last_sent: Arc::new(Mutex::new(None)),
            tx,
        };
        filter.handle(Ok(Event::new(EventKind::Modify(notify::event::ModifyKind::Any))
            .add_path(PathBuf::from("/cfg/other.yaml"))));
        assert!(rx.try_recv().is_err());
    }
}
