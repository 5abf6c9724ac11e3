use crate::model::project::{
    BodyType, ChatMessage, Participant, Project, Role, Season, TripType,
};
use crate::model::state::AppState;
use crate::store::demo;
use crate::util::ids::{local_uid, uid};
use crate::validate;

use super::OpError;

/// Create a project with the given title and date range and make it
/// current. New projects go to the front of the list (recency order).
/// Returns the new project's id.
pub fn create_project(
    state: &mut AppState,
    title: &str,
    start: &str,
    end: &str,
) -> Result<String, OpError> {
    let title = validate::project_title(title)?;
    let (start_date, end_date) = validate::date_range(start, end)?;

    let project_id = local_uid("project");
    let mut project = Project {
        id: project_id.clone(),
        title,
        start_date: Some(start_date),
        end_date: Some(end_date),
        trip_type: TripType::Hiking,
        season: Season::Summer,
        body_type: BodyType::Medium,
        invite_link: demo::invite_link(&project_id),
        participants: vec![Participant {
            id: uid("member"),
            name: "You".into(),
            role: Role::Owner,
        }],
        gear_items: Vec::new(),
        meal_entries: Vec::new(),
        chat: Vec::new(),
        diary: Vec::new(),
        activity: Vec::new(),
    };
    project.add_activity("Project created");

    state.projects.insert(0, project);
    state.current_project_id = project_id.clone();
    Ok(project_id)
}

/// Partial update of a project's settings. Only the provided fields change.
#[derive(Debug, Default)]
pub struct SettingsUpdate {
    pub title: Option<String>,
    pub dates: Option<(String, String)>,
    pub trip_type: Option<TripType>,
    pub season: Option<Season>,
    pub body_type: Option<BodyType>,
}

pub fn update_settings(project: &mut Project, update: SettingsUpdate) -> Result<(), OpError> {
    // Validate everything up front so a bad field leaves the project untouched
    let title = update.title.as_deref().map(validate::project_title).transpose()?;
    let dates = update
        .dates
        .as_ref()
        .map(|(s, e)| validate::date_range(s, e))
        .transpose()?;

    if let Some(title) = title {
        project.title = title;
    }
    if let Some((start, end)) = dates {
        project.start_date = Some(start);
        project.end_date = Some(end);
    }
    if let Some(trip_type) = update.trip_type {
        project.trip_type = trip_type;
    }
    if let Some(season) = update.season {
        project.season = season;
    }
    if let Some(body_type) = update.body_type {
        project.body_type = body_type;
    }
    project.add_activity("Project settings updated");
    Ok(())
}

pub fn switch_project(state: &mut AppState, project_id: &str) -> Result<(), OpError> {
    if state.project(project_id).is_none() {
        return Err(OpError::ProjectNotFound(project_id.to_string()));
    }
    state.current_project_id = project_id.to_string();
    Ok(())
}

/// Delete a project. The collection is never left empty: deleting the
/// last project synthesizes a fresh demo project. A dangling current-id
/// is repaired to the first remaining project.
pub fn delete_project(state: &mut AppState, project_id: &str) -> Result<(), OpError> {
    let before = state.projects.len();
    state.projects.retain(|p| p.id != project_id);
    if state.projects.len() == before {
        return Err(OpError::ProjectNotFound(project_id.to_string()));
    }

    if state.projects.is_empty() {
        state.projects.push(demo::demo_project());
    }
    state.repair_current_project_id();
    Ok(())
}

/// Add a participant. Only the project creator is the owner; everyone
/// added later joins as editor or viewer.
pub fn add_participant(project: &mut Project, name: &str, role: Role) -> Result<String, OpError> {
    let name = validate::participant_name(name)?;
    let role = match role {
        // A second owner would break the exactly-one-owner invariant
        Role::Owner => Role::Editor,
        other => other,
    };

    let member_id = uid("member");
    project.participants.push(Participant {
        id: member_id.clone(),
        name: name.clone(),
        role,
    });
    project.add_activity(format!("Participant added: {}", name));
    Ok(member_id)
}

/// Remove a participant and repair any gear assignments that pointed at
/// them: items move to the first remaining participant, or become
/// unassigned when nobody is left. Appends exactly one activity entry.
pub fn remove_participant(project: &mut Project, member_id: &str) -> Result<(), OpError> {
    let member = project
        .participant(member_id)
        .ok_or_else(|| OpError::ParticipantNotFound(member_id.to_string()))?;
    if member.role == Role::Owner {
        return Err(OpError::OwnerRemoval);
    }
    let name = member.name.clone();

    project.participants.retain(|p| p.id != member_id);

    let heir = project.participants.first().map(|p| p.id.clone());
    for gear in &mut project.gear_items {
        if gear.responsible_id.as_deref() == Some(member_id) {
            gear.responsible_id = heir.clone();
        }
    }

    project.add_activity(format!("Participant removed: {}", name));
    Ok(())
}

pub fn post_chat_message(
    project: &mut Project,
    author: &str,
    message: &str,
) -> Result<(), OpError> {
    let message = validate::chat_message(message)?;
    let author = author.trim();
    let author = if author.is_empty() { "Participant" } else { author };

    project.chat.push(ChatMessage {
        id: uid("msg"),
        author: author.to_string(),
        message,
        created_at: chrono::Utc::now(),
    });
    project.add_activity(format!("{}: message posted", author));
    Ok(())
}
