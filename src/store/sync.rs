//! Cross-instance change notification. Every successful save publishes a
//! lightweight `{origin_id, timestamp}` signal; other instances watch the
//! signal slot and reconcile by fully reloading the persisted state.
//!
//! The watcher path uses the platform file notifier; when that cannot be
//! set up, the listener degrades to polling the same slot with identical
//! semantics.

use std::path::{Path, PathBuf};
use std::sync::mpsc;

use chrono::{DateTime, Utc};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};

use super::persist::atomic_write;

/// Signal slot inside the data directory, independent of the state slots.
pub const SIGNAL_FILE: &str = "sync.json";

/// The change notification written after every successful save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncSignal {
    pub origin_id: String,
    pub timestamp: DateTime<Utc>,
}

/// A foreign state change observed by a listener. The receiver is expected
/// to reload the whole state, never to patch.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncEvent {
    pub origin_id: String,
    pub timestamp: DateTime<Utc>,
}

/// Publish a change signal for this instance.
pub fn write_signal(dir: &Path, origin_id: &str) -> std::io::Result<()> {
    let signal = SyncSignal {
        origin_id: origin_id.to_string(),
        timestamp: Utc::now(),
    };
    let blob = serde_json::to_string(&signal).map_err(std::io::Error::other)?;
    atomic_write(&dir.join(SIGNAL_FILE), blob.as_bytes())
}

/// Read the current change signal, if any. Malformed signals read as absent.
pub fn read_signal(dir: &Path) -> Option<SyncSignal> {
    let raw = std::fs::read_to_string(dir.join(SIGNAL_FILE)).ok()?;
    serde_json::from_str(&raw).ok()
}

enum Backend {
    /// File-notifier driven; `poll` only touches the slot after a wakeup.
    Watched {
        _watcher: RecommendedWatcher,
        rx: mpsc::Receiver<()>,
    },
    /// Fallback: check the slot on every poll.
    Polled,
}

/// Watches the signal slot and surfaces foreign changes.
pub struct SyncListener {
    dir: PathBuf,
    own_origin: String,
    last_seen: Option<DateTime<Utc>>,
    backend: Backend,
}

impl SyncListener {
    /// Start listening for foreign changes in `dir`. Falls back to polling
    /// with a stderr warning when the file notifier is unavailable.
    pub fn start(dir: &Path, own_origin: &str) -> SyncListener {
        match Self::watched(dir, own_origin) {
            Ok(listener) => listener,
            Err(e) => {
                eprintln!(
                    "warning: change watcher unavailable ({}), falling back to polling",
                    e
                );
                Self::polling(dir, own_origin)
            }
        }
    }

    fn watched(dir: &Path, own_origin: &str) -> Result<SyncListener, notify::Error> {
        let (tx, rx) = mpsc::channel();

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                let event = match result {
                    Ok(e) => e,
                    Err(_) => return,
                };
                match event.kind {
                    EventKind::Create(_) | EventKind::Modify(_) => {}
                    _ => return,
                }
                // Only the signal slot matters; state writes are covered by
                // the signal that follows them.
                let relevant = event
                    .paths
                    .iter()
                    .any(|p| p.file_name().and_then(|n| n.to_str()) == Some(SIGNAL_FILE));
                if relevant {
                    let _ = tx.send(());
                }
            },
            Config::default(),
        )?;
        watcher.watch(dir, RecursiveMode::NonRecursive)?;

        Ok(SyncListener {
            dir: dir.to_path_buf(),
            own_origin: own_origin.to_string(),
            // A signal predating this listener is not a change
            last_seen: read_signal(dir).map(|s| s.timestamp),
            backend: Backend::Watched {
                _watcher: watcher,
                rx,
            },
        })
    }

    /// Construct a listener in polling mode directly (also used by tests,
    /// where it makes reconciliation deterministic).
    pub fn polling(dir: &Path, own_origin: &str) -> SyncListener {
        SyncListener {
            dir: dir.to_path_buf(),
            own_origin: own_origin.to_string(),
            last_seen: read_signal(dir).map(|s| s.timestamp),
            backend: Backend::Polled,
        }
    }

    /// Whether the file notifier is active (false = polling fallback).
    pub fn is_watching(&self) -> bool {
        matches!(self.backend, Backend::Watched { .. })
    }

    /// Non-blocking check for a foreign change since the last poll.
    ///
    /// Signals from this instance's own origin advance the cursor but are
    /// never surfaced. Coalesces bursts: at most one event per poll.
    pub fn poll(&mut self) -> Option<SyncEvent> {
        if let Backend::Watched { rx, .. } = &self.backend {
            let mut woken = false;
            while rx.try_recv().is_ok() {
                woken = true;
            }
            if !woken {
                return None;
            }
        }

        let signal = read_signal(&self.dir)?;
        if self.last_seen == Some(signal.timestamp) {
            return None;
        }
        self.last_seen = Some(signal.timestamp);

        if signal.origin_id == self.own_origin {
            return None;
        }
        Some(SyncEvent {
            origin_id: signal.origin_id,
            timestamp: signal.timestamp,
        })
    }
}
