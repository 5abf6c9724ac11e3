//! The interactive pre-departure checklist: a merged, read-only view over
//! gear pack state and meal preparation state.

use crate::model::catalog;
use crate::model::project::Project;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecklistKind {
    Gear,
    Meal,
}

/// One row of the checklist, pointing back at the underlying entity.
#[derive(Debug, Clone)]
pub struct ChecklistRow {
    pub kind: ChecklistKind,
    pub id: String,
    pub done: bool,
    pub title: String,
    pub owner: String,
}

/// Build the merged checklist: gear first, then meals, in list order.
pub fn build_checklist(project: &Project) -> Vec<ChecklistRow> {
    let mut rows = Vec::with_capacity(project.gear_items.len() + project.meal_entries.len());

    for item in &project.gear_items {
        let owner = item
            .responsible_id
            .as_deref()
            .and_then(|id| project.participant(id))
            .map(|p| p.name.clone())
            .unwrap_or_else(|| "Unassigned".into());
        rows.push(ChecklistRow {
            kind: ChecklistKind::Gear,
            id: item.id.clone(),
            done: item.packed,
            title: item.name.clone(),
            owner,
        });
    }

    for entry in &project.meal_entries {
        let dish_name = catalog::dish(&entry.dish_id)
            .map(|d| d.name)
            .unwrap_or("Unknown dish");
        rows.push(ChecklistRow {
            kind: ChecklistKind::Meal,
            id: entry.id.clone(),
            done: entry.packed,
            title: format!("Day {} {} — {}", entry.day, entry.meal_type, dish_name),
            owner: "Kitchen".into(),
        });
    }

    rows
}

/// How many rows are checked off.
pub fn done_count(rows: &[ChecklistRow]) -> usize {
    rows.iter().filter(|r| r.done).count()
}
