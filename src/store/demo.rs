//! Demo/seed generation. Deterministic in shape, fresh ids and near-future
//! dates on every call. This is the sole guarantee that the "projects
//! non-empty" invariant holds after first run, unrecoverable load, and
//! last-project deletion.

use chrono::{Duration, Local, Utc};

use crate::model::project::{
    BodyType, ChatMessage, GearItem, MealEntry, MealType, Participant, Project, Role, Season,
    TripType,
};
use crate::model::state::{ActiveModule, AppState, ToolsState};
use crate::util::ids::{local_uid, uid};

/// Build the invite link for a project id.
pub fn invite_link(project_id: &str) -> String {
    format!("https://trailhead.example/invite/{}", project_id)
}

/// A fully populated example project: three participants, assigned gear,
/// a starter meal plan and one activity entry. Starts twelve days out.
pub fn demo_project() -> Project {
    let project_id = local_uid("project");
    let owner_id = uid("member");
    let ivan_id = uid("member");
    let olga_id = uid("member");

    let today = Local::now().date_naive();
    let now = Utc::now();

    let mut project = Project {
        id: project_id.clone(),
        title: "Carpathians: training trek".into(),
        start_date: Some(today + Duration::days(12)),
        end_date: Some(today + Duration::days(15)),
        trip_type: TripType::Hiking,
        season: Season::Summer,
        body_type: BodyType::Medium,
        invite_link: invite_link(&project_id),
        participants: vec![
            Participant {
                id: owner_id.clone(),
                name: "You".into(),
                role: Role::Owner,
            },
            Participant {
                id: ivan_id.clone(),
                name: "Ivan".into(),
                role: Role::Editor,
            },
            Participant {
                id: olga_id.clone(),
                name: "Olga".into(),
                role: Role::Editor,
            },
        ],
        gear_items: vec![
            GearItem {
                id: uid("gear"),
                name: "2-person tent".into(),
                category: "Shelter".into(),
                weight_kg: 3.2,
                responsible_id: Some(ivan_id),
                hint: "Check the poles and fly sheet".into(),
                packed: false,
            },
            GearItem {
                id: uid("gear"),
                name: "Gas stove".into(),
                category: "Kitchen".into(),
                weight_kg: 0.45,
                responsible_id: Some(olga_id),
                hint: "Check the valve thread".into(),
                packed: false,
            },
            GearItem {
                id: uid("gear"),
                name: "First aid kit".into(),
                category: "Safety".into(),
                weight_kg: 0.35,
                responsible_id: Some(owner_id),
                hint: "Personal medication and plasters".into(),
                packed: true,
            },
        ],
        meal_entries: vec![
            MealEntry {
                id: uid("meal"),
                day: 1,
                meal_type: MealType::Breakfast,
                dish_id: "dish-oatmeal".into(),
                servings: 1.0,
                packed: false,
            },
            MealEntry {
                id: uid("meal"),
                day: 1,
                meal_type: MealType::Dinner,
                dish_id: "dish-buckwheat".into(),
                servings: 1.0,
                packed: false,
            },
            MealEntry {
                id: uid("meal"),
                day: 2,
                meal_type: MealType::Lunch,
                dish_id: "dish-energy-snack".into(),
                servings: 1.0,
                packed: false,
            },
        ],
        chat: vec![
            ChatMessage {
                id: uid("msg"),
                author: "You".into(),
                message: "Base gear list and meal plan by Friday.".into(),
                created_at: now,
            },
            ChatMessage {
                id: uid("msg"),
                author: "Ivan".into(),
                message: "I'll take the tent and the stove.".into(),
                created_at: now,
            },
        ],
        diary: Vec::new(),
        activity: Vec::new(),
    };

    project.add_activity("Project created");
    project
}

/// A freshly initialized application state holding one demo project.
pub fn fresh_state() -> AppState {
    let demo = demo_project();
    AppState {
        active_module: ActiveModule::Projects,
        current_project_id: demo.id.clone(),
        projects: vec![demo],
        user_templates: Vec::new(),
        tools: ToolsState::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc;
    use crate::util::ids::is_local_id;

    #[test]
    fn demo_project_holds_model_invariants() {
        let project = demo_project();

        let owners = project
            .participants
            .iter()
            .filter(|p| p.role == Role::Owner)
            .count();
        assert_eq!(owners, 1);

        // Every responsible reference resolves
        for gear in &project.gear_items {
            let responsible = gear.responsible_id.as_deref().unwrap();
            assert!(project.participant(responsible).is_some());
        }

        // Every meal references a catalog dish within the trip span
        let days = calc::duration_days(&project);
        for meal in &project.meal_entries {
            assert!(crate::model::catalog::dish(&meal.dish_id).is_some());
            assert!(meal.day >= 1 && meal.day <= days);
        }

        assert_eq!(project.activity.len(), 1);
        assert_eq!(project.activity[0].text, "Project created");
        assert!(project.invite_link.contains(&project.id));
    }

    #[test]
    fn demo_ids_are_fresh_each_time() {
        let a = demo_project();
        let b = demo_project();
        assert_ne!(a.id, b.id);
        assert_ne!(a.participants[0].id, b.participants[0].id);
    }

    #[test]
    fn demo_project_id_is_marked_unsynced() {
        assert!(is_local_id(&demo_project().id));
    }

    #[test]
    fn fresh_state_is_self_consistent() {
        let state = fresh_state();
        assert_eq!(state.projects.len(), 1);
        assert_eq!(state.current_project_id, state.projects[0].id);
        assert!(state.current_project().is_some());
    }
}
