use crate::model::catalog::GEAR_LIBRARY;
use crate::model::project::{GearItem, Project};
use crate::util::ids::uid;
use crate::validate::{self, normalize_name};

use super::OpError;

/// Add a gear item. Names are unique per project, compared
/// case/whitespace-insensitively. Returns the new item's id.
pub fn add_gear(
    project: &mut Project,
    name: &str,
    category: &str,
    weight_kg: f64,
    responsible_id: Option<&str>,
    hint: &str,
) -> Result<String, OpError> {
    let name = validate::gear_name(name)?;
    let category = validate::category(category)?;
    let weight_kg = validate::weight_kg(weight_kg)?;
    let hint = validate::hint(hint)?;

    if has_gear_named(project, &name) {
        return Err(OpError::DuplicateGear(name));
    }
    if let Some(member_id) = responsible_id
        && project.participant(member_id).is_none()
    {
        return Err(OpError::ParticipantNotFound(member_id.to_string()));
    }

    let gear_id = uid("gear");
    project.gear_items.push(GearItem {
        id: gear_id.clone(),
        name: name.clone(),
        category,
        weight_kg,
        responsible_id: responsible_id.map(String::from),
        hint,
        packed: false,
    });
    project.add_activity(format!("Gear added: {}", name));
    Ok(gear_id)
}

pub fn remove_gear(project: &mut Project, gear_id: &str) -> Result<(), OpError> {
    let name = project
        .gear_item(gear_id)
        .map(|g| g.name.clone())
        .ok_or_else(|| OpError::GearNotFound(gear_id.to_string()))?;
    project.gear_items.retain(|g| g.id != gear_id);
    project.add_activity(format!("Gear removed: {}", name));
    Ok(())
}

pub fn set_packed(project: &mut Project, gear_id: &str, packed: bool) -> Result<(), OpError> {
    let item = project
        .gear_item_mut(gear_id)
        .ok_or_else(|| OpError::GearNotFound(gear_id.to_string()))?;
    item.packed = packed;
    let name = item.name.clone();
    project.add_activity(format!(
        "{}: {}",
        name,
        if packed { "packed" } else { "unpacked" }
    ));
    Ok(())
}

pub fn set_weight(project: &mut Project, gear_id: &str, weight_kg: f64) -> Result<(), OpError> {
    let weight_kg = validate::weight_kg(weight_kg)?;
    let item = project
        .gear_item_mut(gear_id)
        .ok_or_else(|| OpError::GearNotFound(gear_id.to_string()))?;
    item.weight_kg = weight_kg;
    Ok(())
}

/// Point a gear item at a participant, or clear the assignment.
pub fn assign_responsible(
    project: &mut Project,
    gear_id: &str,
    member_id: Option<&str>,
) -> Result<(), OpError> {
    if project.gear_item(gear_id).is_none() {
        return Err(OpError::GearNotFound(gear_id.to_string()));
    }
    let member_name = match member_id {
        Some(id) => Some(
            project
                .participant(id)
                .map(|p| p.name.clone())
                .ok_or_else(|| OpError::ParticipantNotFound(id.to_string()))?,
        ),
        None => None,
    };

    let item = project.gear_item_mut(gear_id).expect("checked above");
    item.responsible_id = member_id.map(String::from);
    let gear_name = item.name.clone();

    match member_name {
        Some(name) => project.add_activity(format!("{}: assigned to {}", gear_name, name)),
        None => project.add_activity(format!("{}: unassigned", gear_name)),
    }
    Ok(())
}

/// Fill the gear list from the built-in library, filtered by the
/// project's trip type and season. Items already on the list (by
/// normalized name) are skipped. Returns how many items were added.
pub fn autofill(project: &mut Project) -> usize {
    let default_responsible = project.participants.first().map(|p| p.id.clone());
    let mut added = 0;

    for suggestion in GEAR_LIBRARY {
        if !suggestion.matches(project.trip_type, project.season) {
            continue;
        }
        if has_gear_named(project, suggestion.name) {
            continue;
        }
        project.gear_items.push(GearItem {
            id: uid("gear"),
            name: suggestion.name.into(),
            category: suggestion.category.into(),
            weight_kg: suggestion.weight_kg,
            responsible_id: default_responsible.clone(),
            hint: suggestion.hint.into(),
            packed: false,
        });
        added += 1;
    }

    project.add_activity(format!("Autofill added {} item(s)", added));
    added
}

fn has_gear_named(project: &Project, name: &str) -> bool {
    let wanted = normalize_name(name);
    project
        .gear_items
        .iter()
        .any(|g| normalize_name(&g.name) == wanted)
}
