//! The mutation façade. All state changes flow through [`Store::commit`]
//! or [`Store::with_current_project`] so that persistence and cross-
//! instance notification are never skipped, and nothing outside this
//! module hands out mutable access to the state.

use std::path::{Path, PathBuf};

use crate::model::project::Project;
use crate::model::state::AppState;
use crate::util::ids::origin_id;

use super::persist::{self, LoadSource};
use super::sync;
use super::{Notice, NoticeKind};

pub struct Store {
    dir: PathBuf,
    origin_id: String,
    state: AppState,
    notices: Vec<Notice>,
}

impl Store {
    /// Load (or seed) the state from `dir` and bind a fresh instance
    /// origin id. Load-time notices are queued for the UI layer.
    pub fn open(dir: &Path) -> Store {
        let outcome = persist::load(dir);
        let mut store = Store {
            dir: dir.to_path_buf(),
            origin_id: origin_id(),
            state: outcome.state,
            notices: Vec::new(),
        };
        if let Some(notice) = outcome.notice {
            store.notices.push(notice);
        }
        store
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn origin_id(&self) -> &str {
        &self.origin_id
    }

    pub fn current_project(&self) -> Option<&Project> {
        self.state.current_project()
    }

    /// Run a mutation against the live state, then persist and broadcast.
    ///
    /// A persist failure is surfaced as an error notice and swallowed; the
    /// in-memory state stays authoritative. The mutator's return value is
    /// passed through so operations can report ids or summaries.
    pub fn commit<T>(&mut self, mutate: impl FnOnce(&mut AppState) -> T) -> T {
        let result = mutate(&mut self.state);

        match persist::save(&self.dir, &self.state) {
            Ok(()) => {
                if let Err(e) = sync::write_signal(&self.dir, &self.origin_id) {
                    eprintln!("warning: could not publish change signal: {}", e);
                }
            }
            Err(e) => {
                self.notices
                    .push(Notice::new(format!("Could not save state: {}", e), NoticeKind::Error));
            }
        }
        result
    }

    /// Run a mutation against the current project inside a commit.
    /// No-op (returns `None`) when no project is current.
    pub fn with_current_project<T>(
        &mut self,
        mutate: impl FnOnce(&mut Project) -> T,
    ) -> Option<T> {
        if self.state.current_project().is_none() {
            return None;
        }
        Some(self.commit(|state| {
            let project = state
                .current_project_mut()
                .expect("current project checked above");
            mutate(project)
        }))
    }

    /// Replace the in-memory state with a full reload from disk, as run
    /// after a foreign change notification. Returns the slot the reload
    /// was served from.
    pub fn reconcile(&mut self) -> LoadSource {
        let outcome = persist::load(&self.dir);
        self.state = outcome.state;
        if let Some(notice) = outcome.notice {
            self.notices.push(notice);
        }
        outcome.source
    }

    pub fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    /// Drain queued notices for display.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}
