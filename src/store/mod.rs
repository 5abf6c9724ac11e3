pub mod demo;
pub mod facade;
pub mod integrity;
pub mod lock;
pub mod persist;
pub mod sync;

use std::path::PathBuf;

pub use facade::Store;

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warn,
    Error,
}

/// A transient, user-visible message produced by the state layer
/// (load recovery, persist failures, operation summaries).
#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
}

impl Notice {
    pub fn new(text: impl Into<String>, kind: NoticeKind) -> Notice {
        Notice {
            text: text.into(),
            kind,
        }
    }
}

/// Resolve the data directory: `TRAILHEAD_DATA_DIR` > `$XDG_DATA_HOME/trailhead`
/// > `~/.local/share/trailhead`.
pub fn default_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("TRAILHEAD_DATA_DIR") {
        return PathBuf::from(dir);
    }
    let data_home = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local").join("share"));
    data_home.join("trailhead")
}

fn home_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}
