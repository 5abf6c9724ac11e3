use crate::calc::duration_days;
use crate::model::catalog::{self, community_templates};
use crate::model::project::{MealEntry, MealType, Project};
use crate::model::state::AppState;
use crate::model::template::{MealTemplate, TemplateEntry, TemplateSource};
use crate::util::ids::uid;
use crate::validate;

use super::OpError;

/// Add a meal entry to the current plan. The day must fall inside the
/// trip span and the dish must exist in the catalog.
pub fn add_meal(
    project: &mut Project,
    day: u32,
    meal_type: MealType,
    dish_id: &str,
    servings: f64,
) -> Result<String, OpError> {
    let day = validate::meal_day(day, duration_days(project))?;
    let servings = validate::servings(servings)?;
    let recipe =
        catalog::dish(dish_id).ok_or_else(|| OpError::UnknownDish(dish_id.to_string()))?;

    let meal_id = uid("meal");
    project.meal_entries.push(MealEntry {
        id: meal_id.clone(),
        day,
        meal_type,
        dish_id: dish_id.to_string(),
        servings,
        packed: false,
    });
    project.add_activity(format!("Meal added: {}", recipe.name));
    Ok(meal_id)
}

pub fn remove_meal(project: &mut Project, meal_id: &str) -> Result<(), OpError> {
    let before = project.meal_entries.len();
    project.meal_entries.retain(|m| m.id != meal_id);
    if project.meal_entries.len() == before {
        return Err(OpError::MealNotFound(meal_id.to_string()));
    }
    project.add_activity("Meal removed");
    Ok(())
}

pub fn set_packed(project: &mut Project, meal_id: &str, packed: bool) -> Result<(), OpError> {
    let entry = project
        .meal_entry_mut(meal_id)
        .ok_or_else(|| OpError::MealNotFound(meal_id.to_string()))?;
    entry.packed = packed;
    let (day, meal_type) = (entry.day, entry.meal_type);
    project.add_activity(format!(
        "Day {} {}: {}",
        day,
        meal_type,
        if packed { "prepared" } else { "not prepared" }
    ));
    Ok(())
}

pub fn clear_plan(project: &mut Project) {
    project.meal_entries.clear();
    project.add_activity("Meal plan cleared");
}

/// Save the current project's meal plan as a user template. Templates go
/// to the front of the user list. Returns the template id.
pub fn save_template(state: &mut AppState, name: &str) -> Result<String, OpError> {
    let name = validate::template_name(name)?;
    let project = state
        .current_project()
        .ok_or(OpError::NoCurrentProject)?;

    let template = MealTemplate {
        id: uid("tpl"),
        name,
        source: TemplateSource::User,
        trip_type: project.trip_type,
        season: project.season,
        days: duration_days(project),
        entries: project
            .meal_entries
            .iter()
            .map(|entry| TemplateEntry {
                day: entry.day,
                meal_type: entry.meal_type,
                dish_id: entry.dish_id.clone(),
                servings: entry.servings,
            })
            .collect(),
    };
    let template_id = template.id.clone();
    state.user_templates.insert(0, template);
    Ok(template_id)
}

/// Find a template by id among the community catalog and user templates.
pub fn find_template(state: &AppState, template_id: &str) -> Option<MealTemplate> {
    community_templates()
        .into_iter()
        .find(|t| t.id == template_id)
        .or_else(|| state.user_templates.iter().find(|t| t.id == template_id).cloned())
}

/// Replace the current project's meal plan with a template's entries.
/// Entries beyond the project's duration are dropped; everything gets a
/// fresh id and an unpacked state.
pub fn apply_template(state: &mut AppState, template_id: &str) -> Result<String, OpError> {
    let template = find_template(state, template_id)
        .ok_or_else(|| OpError::TemplateNotFound(template_id.to_string()))?;
    let project = state
        .current_project_mut()
        .ok_or(OpError::NoCurrentProject)?;

    let day_count = duration_days(project);
    project.meal_entries = template
        .entries
        .iter()
        .filter(|entry| entry.day <= day_count)
        .map(|entry| MealEntry {
            id: uid("meal"),
            day: entry.day,
            meal_type: entry.meal_type,
            dish_id: entry.dish_id.clone(),
            servings: entry.servings,
            packed: false,
        })
        .collect();

    project.add_activity(format!("Meal plan template applied: {}", template.name));
    Ok(template.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::demo::fresh_state;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn add_meal_validates_day_against_duration() {
        let mut state = fresh_state();
        let project = &mut state.projects[0];
        // Demo trip spans 4 days
        assert!(add_meal(project, 9, MealType::Lunch, "dish-oatmeal", 1.0).is_err());
        assert!(add_meal(project, 0, MealType::Lunch, "dish-oatmeal", 1.0).is_err());

        let id = add_meal(project, 3, MealType::Lunch, "dish-oatmeal", 1.0).unwrap();
        assert!(project.meal_entries.iter().any(|m| m.id == id));
    }

    #[test]
    fn add_meal_rejects_unknown_dishes() {
        let mut state = fresh_state();
        let project = &mut state.projects[0];
        assert!(matches!(
            add_meal(project, 1, MealType::Lunch, "dish-moon-cheese", 1.0),
            Err(OpError::UnknownDish(_))
        ));
    }

    #[test]
    fn clear_plan_empties_and_logs() {
        let mut state = fresh_state();
        let project = &mut state.projects[0];
        clear_plan(project);
        assert!(project.meal_entries.is_empty());
        assert_eq!(project.activity[0].text, "Meal plan cleared");
    }

    #[test]
    fn saved_template_mirrors_the_current_plan() {
        let mut state = fresh_state();
        let entries_before = state.projects[0].meal_entries.len();

        let template_id = save_template(&mut state, "My base plan").unwrap();

        let template = &state.user_templates[0];
        assert_eq!(template.id, template_id);
        assert_eq!(template.source, TemplateSource::User);
        assert_eq!(template.entries.len(), entries_before);
        assert_eq!(template.trip_type, state.projects[0].trip_type);
    }

    #[test]
    fn applying_a_template_clamps_to_the_trip_length() {
        let mut state = fresh_state();
        {
            let project = state.current_project_mut().unwrap();
            // Shrink the trip to 2 days; the summer template plans 3
            project.start_date = Some(date("2027-07-01"));
            project.end_date = Some(date("2027-07-02"));
        }

        apply_template(&mut state, "tpl-community-summer-3d").unwrap();

        let project = state.current_project().unwrap();
        assert!(!project.meal_entries.is_empty());
        assert!(project.meal_entries.iter().all(|m| m.day <= 2));
        assert!(project.meal_entries.iter().all(|m| !m.packed));
    }

    #[test]
    fn applying_an_unknown_template_fails() {
        let mut state = fresh_state();
        assert!(matches!(
            apply_template(&mut state, "tpl-ghost"),
            Err(OpError::TemplateNotFound(_))
        ));
    }

    #[test]
    fn user_templates_are_found_after_community_ones() {
        let mut state = fresh_state();
        let template_id = save_template(&mut state, "Mine").unwrap();
        assert!(find_template(&state, &template_id).is_some());
        assert!(find_template(&state, "tpl-community-winter-2d").is_some());
        assert!(find_template(&state, "tpl-nope").is_none());
    }

    #[test]
    fn meal_packing_logs_the_day_and_type() {
        let mut state = fresh_state();
        let project = &mut state.projects[0];
        let meal_id = project.meal_entries[0].id.clone();

        set_packed(project, &meal_id, true).unwrap();
        assert!(project.meal_entries[0].packed);
        assert!(project.activity[0].text.contains("prepared"));
    }
}
