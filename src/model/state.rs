use serde::{Deserialize, Serialize};

use super::project::Project;
use super::template::MealTemplate;

/// Which view of the client is active. Not business-critical; persisted so
/// a reload lands on the same screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveModule {
    #[default]
    Projects,
    Gear,
    Meals,
    Weight,
    Checklist,
    Tools,
}

/// Result of the water-need calculator, kept as scratch state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterCalcResult {
    pub per_person_liters: f64,
    pub total_liters: f64,
}

/// Ephemeral scratch state for the standalone tools.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolsState {
    #[serde(default)]
    pub water_calc: Option<WaterCalcResult>,
}

/// The entire client-side application state, persisted as a single unit.
///
/// Invariants maintained by the store façade and load-time repair:
/// - `projects` is never empty (a demo project is synthesized otherwise);
/// - `current_project_id` always references an entry of `projects`;
/// - `projects` serializes as a JSON array (the integrity check relies on it).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default)]
    pub active_module: ActiveModule,
    #[serde(default)]
    pub current_project_id: String,
    pub projects: Vec<Project>,
    #[serde(default)]
    pub user_templates: Vec<MealTemplate>,
    #[serde(default)]
    pub tools: ToolsState,
}

impl AppState {
    pub fn current_project(&self) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == self.current_project_id)
    }

    pub fn current_project_mut(&mut self) -> Option<&mut Project> {
        let id = self.current_project_id.clone();
        self.projects.iter_mut().find(|p| p.id == id)
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Point `current_project_id` at the first project if it dangles.
    /// No-op when `projects` is empty; the caller reseeds first.
    pub fn repair_current_project_id(&mut self) {
        let current_exists = self.projects.iter().any(|p| p.id == self.current_project_id);
        if !current_exists
            && let Some(first) = self.projects.first()
        {
            self.current_project_id = first.id.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::demo::fresh_state;

    #[test]
    fn repair_points_at_first_project() {
        let mut state = fresh_state();
        state.current_project_id = "project-nonexistent".into();
        state.repair_current_project_id();
        assert_eq!(state.current_project_id, state.projects[0].id);
    }

    #[test]
    fn repair_keeps_valid_reference() {
        let mut state = fresh_state();
        let mut second = state.projects[0].clone();
        second.id = "project-second".into();
        state.projects.push(second);
        state.current_project_id = "project-second".into();
        state.repair_current_project_id();
        assert_eq!(state.current_project_id, "project-second");
    }

    #[test]
    fn state_with_missing_optional_fields_deserializes() {
        let json = r#"{"projects": []}"#;
        let state: AppState = serde_json::from_str(json).unwrap();
        assert_eq!(state.active_module, ActiveModule::Projects);
        assert!(state.user_templates.is_empty());
        assert!(state.tools.water_calc.is_none());
    }
}
