//! Durable persistence of the whole application state: one serialized
//! blob in a primary slot, a rolling backup slot, and an integrity check
//! before any loaded blob is trusted.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::model::state::AppState;

use super::demo;
use super::integrity::{self, IntegrityError};
use super::lock::{LockError, StoreLock};
use super::{Notice, NoticeKind};

/// Primary state slot inside the data directory.
pub const STATE_FILE: &str = "state.json";
/// Rolling backup slot, written before every primary overwrite.
pub const BACKUP_FILE: &str = "state.backup.json";

/// Error type for state writes.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error(transparent)]
    Lock(#[from] LockError),
    #[error("could not serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("could not copy state to backup slot: {0}")]
    Backup(#[source] io::Error),
    #[error("could not write state: {0}")]
    Write(#[source] io::Error),
}

/// Which slot a load was ultimately served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Primary,
    RestoredFromBackup,
    Fresh,
}

/// A loaded-and-repaired state plus how it was obtained.
#[derive(Debug)]
pub struct LoadOutcome {
    pub state: AppState,
    pub source: LoadSource,
    pub notice: Option<Notice>,
}

/// Why a single slot could not be used.
#[derive(Debug, thiserror::Error)]
enum SlotError {
    #[error("read failed: {0}")]
    Read(#[from] io::Error),
    #[error("parse failed: {0}")]
    Parse(serde_json::Error),
    #[error(transparent)]
    Integrity(#[from] IntegrityError),
    #[error("unexpected shape: {0}")]
    Shape(serde_json::Error),
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Persist the full state snapshot.
///
/// Ordering is load-bearing: the existing primary blob is copied to the
/// backup slot *before* the primary is overwritten, so a crash mid-write
/// never loses the last-good state. The whole sequence runs under the
/// store lock to keep concurrent instances from interleaving.
pub fn save(dir: &Path, state: &AppState) -> Result<(), PersistError> {
    fs::create_dir_all(dir).map_err(PersistError::Write)?;
    let _lock = StoreLock::acquire_default(dir)?;

    let primary = dir.join(STATE_FILE);
    if primary.exists() {
        fs::copy(&primary, dir.join(BACKUP_FILE)).map_err(PersistError::Backup)?;
    }

    let blob = serde_json::to_string_pretty(state)?;
    atomic_write(&primary, blob.as_bytes()).map_err(PersistError::Write)?;
    Ok(())
}

/// Read and validate one slot: parse to a JSON value, run the integrity
/// check against the raw text, then deserialize into the typed state.
fn load_slot(path: &Path) -> Result<AppState, SlotError> {
    let raw = fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&raw).map_err(SlotError::Parse)?;
    integrity::check(&raw, &value)?;
    let state: AppState = serde_json::from_value(value).map_err(SlotError::Shape)?;
    Ok(state)
}

/// Load the state from the primary slot, falling back to the backup slot
/// and finally to a fresh demo-seeded state. Never fails; the outcome
/// records where the state came from and carries any user-facing notice.
pub fn load(dir: &Path) -> LoadOutcome {
    let primary = dir.join(STATE_FILE);

    match load_slot(&primary) {
        // An empty project list parses fine but means "never initialized"
        Ok(state) if state.projects.is_empty() => fresh_outcome(None),
        Ok(mut state) => {
            state.repair_current_project_id();
            LoadOutcome {
                state,
                source: LoadSource::Primary,
                notice: None,
            }
        }
        // First run: no slot yet, nothing to warn about
        Err(SlotError::Read(e)) if e.kind() == io::ErrorKind::NotFound => fresh_outcome(None),
        Err(e) => {
            eprintln!("warning: could not load {}: {}", primary.display(), e);
            load_backup(dir)
        }
    }
}

fn load_backup(dir: &Path) -> LoadOutcome {
    match load_slot(&dir.join(BACKUP_FILE)) {
        Ok(mut state) if !state.projects.is_empty() => {
            state.repair_current_project_id();
            LoadOutcome {
                state,
                source: LoadSource::RestoredFromBackup,
                notice: Some(Notice::new("State restored from backup", NoticeKind::Warn)),
            }
        }
        _ => fresh_outcome(Some(Notice::new(
            "Could not load saved state, started with a new project",
            NoticeKind::Error,
        ))),
    }
}

fn fresh_outcome(notice: Option<Notice>) -> LoadOutcome {
    LoadOutcome {
        state: demo::fresh_state(),
        source: LoadSource::Fresh,
        notice,
    }
}
