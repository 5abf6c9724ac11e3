//! Semantic mutations over the application state. Each operation
//! validates its inputs before touching anything, appends an activity
//! line to the affected project, and is routed through the store façade
//! by the CLI layer.

pub mod diary_ops;
pub mod gear_ops;
pub mod meal_ops;
pub mod project_ops;

use crate::validate::ValidationError;

/// Error type for state operations
#[derive(Debug, thiserror::Error)]
pub enum OpError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("project not found: {0}")]
    ProjectNotFound(String),
    #[error("no current project")]
    NoCurrentProject,
    #[error("participant not found: {0}")]
    ParticipantNotFound(String),
    #[error("cannot remove the project owner")]
    OwnerRemoval,
    #[error("gear item not found: {0}")]
    GearNotFound(String),
    #[error("gear item {0:?} is already on the list")]
    DuplicateGear(String),
    #[error("meal entry not found: {0}")]
    MealNotFound(String),
    #[error("unknown dish: {0}")]
    UnknownDish(String),
    #[error("template not found: {0}")]
    TemplateNotFound(String),
    #[error("diary entry not found: {0}")]
    DiaryNotFound(String),
}
