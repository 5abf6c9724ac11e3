//! Remote sync adapter: mirrors project CRUD to an HTTP backend when a
//! remote identity is established, and degrades to local no-ops when it
//! is not. A remote failure never crashes the local flow — every call
//! returns a `RemoteError` the caller surfaces as a notice before
//! continuing locally.
//!
//! Wire contract: rows are `{id, user_id, <denormalized columns>, data}`
//! with the full project payload under `data`. Every operation is scoped
//! by `user_id`; a project stored under one user is never readable or
//! mutable under another.

use serde::{Deserialize, Serialize};

use crate::config::RemoteConfig;
use crate::model::project::Project;
use crate::util::ids::{LOCAL_ID_PREFIX, local_uid};

/// An external identity supplied by the host environment at startup.
#[derive(Debug, Clone)]
pub struct Identity {
    pub external_id: String,
    pub display_name: String,
}

/// A user record as the remote store knows it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteUser {
    pub id: String,
    pub external_id: String,
    #[serde(default)]
    pub display_name: String,
}

/// Error type for remote operations. Never fatal: callers fall back to
/// local-only continuation.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("remote call failed: {0}")]
    Network(String),
    #[error("remote returned status {status}: {message}")]
    Api { status: u16, message: String },
    #[error("could not decode remote response: {0}")]
    Decode(String),
}

/// One project row on the wire. The denormalized columns exist for
/// server-side filtering; the authoritative payload is `data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRow {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub data: Project,
}

impl ProjectRow {
    fn from_project(user_id: &str, project: &Project) -> ProjectRow {
        ProjectRow {
            id: project.id.clone(),
            user_id: user_id.to_string(),
            title: project.title.clone(),
            data: project.clone(),
        }
    }

    /// Map a row back to the domain model. The row id is authoritative —
    /// it overlays whatever id the payload carried (e.g. a `local-` one).
    pub fn into_project(self) -> Project {
        let mut project = self.data;
        project.id = self.id;
        project
    }
}

/// The adapter. Holds the optional remote configuration and, once
/// authenticated, the remote user every call is scoped by.
pub struct RemoteSync {
    config: Option<RemoteConfig>,
    user: Option<RemoteUser>,
}

impl RemoteSync {
    pub fn new(config: Option<RemoteConfig>) -> RemoteSync {
        RemoteSync { config, user: None }
    }

    /// Whether calls will actually reach a backend: a remote must be
    /// configured and a user authenticated.
    pub fn is_online(&self) -> bool {
        self.config.is_some() && self.user.is_some()
    }

    pub fn user(&self) -> Option<&RemoteUser> {
        self.user.as_ref()
    }

    /// Establish the remote user for this identity, creating it on first
    /// contact. Without a configured remote this echoes an offline user
    /// and the adapter stays in local mode.
    pub fn authenticate_or_create_user(
        &mut self,
        identity: &Identity,
    ) -> Result<RemoteUser, RemoteError> {
        let Some(config) = &self.config else {
            return Ok(RemoteUser {
                id: format!("{}{}", LOCAL_ID_PREFIX, identity.external_id),
                external_id: identity.external_id.clone(),
                display_name: identity.display_name.clone(),
            });
        };

        let url = format!("{}/users", config.base_url.trim_end_matches('/'));
        let request = with_auth(ureq::post(&url), config);
        let response = request
            .send_json(serde_json::json!({
                "external_id": identity.external_id,
                "display_name": identity.display_name,
            }))
            .map_err(map_error)?;

        let user: RemoteUser = response
            .into_json()
            .map_err(|e| RemoteError::Decode(e.to_string()))?;
        self.user = Some(user.clone());
        Ok(user)
    }

    /// All projects stored for the authenticated user, most recent first.
    /// Local mode returns an empty list.
    pub fn list_projects(&self) -> Result<Vec<Project>, RemoteError> {
        let Some((config, user)) = self.online() else {
            return Ok(Vec::new());
        };

        let url = format!(
            "{}/projects?user_id={}",
            config.base_url.trim_end_matches('/'),
            user.id
        );
        let response = with_auth(ureq::get(&url), config).call().map_err(map_error)?;
        let rows: Vec<ProjectRow> = response
            .into_json()
            .map_err(|e| RemoteError::Decode(e.to_string()))?;
        Ok(rows.into_iter().map(ProjectRow::into_project).collect())
    }

    /// Store a new project under the authenticated user. The returned
    /// copy carries the server-assigned id. Local mode echoes the input
    /// (assigning a `local-` id if it had none).
    pub fn create_project(&self, project: &Project) -> Result<Project, RemoteError> {
        let Some((config, user)) = self.online() else {
            let mut echoed = project.clone();
            if echoed.id.is_empty() {
                echoed.id = local_uid("project");
            }
            return Ok(echoed);
        };

        let url = format!("{}/projects", config.base_url.trim_end_matches('/'));
        let row = ProjectRow::from_project(&user.id, project);
        let response = with_auth(ureq::post(&url), config)
            .send_json(serde_json::to_value(&row).map_err(|e| RemoteError::Decode(e.to_string()))?)
            .map_err(map_error)?;

        let stored: ProjectRow = response
            .into_json()
            .map_err(|e| RemoteError::Decode(e.to_string()))?;
        Ok(stored.into_project())
    }

    /// Update a stored project in place. Local mode echoes the input.
    pub fn update_project(
        &self,
        project_id: &str,
        project: &Project,
    ) -> Result<Project, RemoteError> {
        let Some((config, user)) = self.online() else {
            let mut echoed = project.clone();
            echoed.id = project_id.to_string();
            return Ok(echoed);
        };

        let url = format!(
            "{}/projects/{}?user_id={}",
            config.base_url.trim_end_matches('/'),
            project_id,
            user.id
        );
        let row = ProjectRow::from_project(&user.id, project);
        let response = with_auth(ureq::request("PATCH", &url), config)
            .send_json(serde_json::to_value(&row).map_err(|e| RemoteError::Decode(e.to_string()))?)
            .map_err(map_error)?;

        let stored: ProjectRow = response
            .into_json()
            .map_err(|e| RemoteError::Decode(e.to_string()))?;
        Ok(stored.into_project())
    }

    /// Delete a stored project. Local mode is a no-op.
    pub fn delete_project(&self, project_id: &str) -> Result<(), RemoteError> {
        let Some((config, user)) = self.online() else {
            return Ok(());
        };

        let url = format!(
            "{}/projects/{}?user_id={}",
            config.base_url.trim_end_matches('/'),
            project_id,
            user.id
        );
        with_auth(ureq::delete(&url), config)
            .call()
            .map_err(map_error)?;
        Ok(())
    }

    fn online(&self) -> Option<(&RemoteConfig, &RemoteUser)> {
        match (&self.config, &self.user) {
            (Some(config), Some(user)) => Some((config, user)),
            _ => None,
        }
    }
}

fn with_auth(request: ureq::Request, config: &RemoteConfig) -> ureq::Request {
    match &config.api_key {
        Some(key) => request.set("Authorization", &format!("Bearer {}", key)),
        None => request,
    }
}

fn map_error(error: ureq::Error) -> RemoteError {
    match error {
        ureq::Error::Status(status, response) => RemoteError::Api {
            status,
            message: response.into_string().unwrap_or_default(),
        },
        other => RemoteError::Network(other.to_string()),
    }
}
