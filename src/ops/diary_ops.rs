use crate::model::project::{DiaryEntry, Project};
use crate::util::ids::uid;
use crate::validate;

use super::OpError;

/// Add a diary entry. Text is required; geotag and photo payload are
/// optional. Returns the entry id.
pub fn add_entry(
    project: &mut Project,
    text: &str,
    geotag: Option<&str>,
    photo: Option<&str>,
) -> Result<String, OpError> {
    let text = validate::diary_text(text)?;

    let entry_id = uid("entry");
    project.diary.push(DiaryEntry {
        id: entry_id.clone(),
        text,
        geotag: geotag.map(str::trim).filter(|g| !g.is_empty()).map(String::from),
        photo: photo.filter(|p| !p.is_empty()).map(String::from),
        created_at: chrono::Utc::now(),
    });
    project.add_activity("Diary entry added");
    Ok(entry_id)
}

pub fn remove_entry(project: &mut Project, entry_id: &str) -> Result<(), OpError> {
    let before = project.diary.len();
    project.diary.retain(|e| e.id != entry_id);
    if project.diary.len() == before {
        return Err(OpError::DiaryNotFound(entry_id.to_string()));
    }
    project.add_activity("Diary entry removed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::demo::demo_project;

    #[test]
    fn entries_keep_optional_fields() {
        let mut project = demo_project();
        let id = add_entry(
            &mut project,
            "Reached the pass before noon",
            Some("48.15990, 24.50030"),
            None,
        )
        .unwrap();

        let entry = project.diary.iter().find(|e| e.id == id).unwrap();
        assert_eq!(entry.geotag.as_deref(), Some("48.15990, 24.50030"));
        assert!(entry.photo.is_none());
        assert_eq!(project.activity[0].text, "Diary entry added");
    }

    #[test]
    fn blank_geotag_is_stored_as_absent() {
        let mut project = demo_project();
        let id = add_entry(&mut project, "No fix today", Some("   "), None).unwrap();
        let entry = project.diary.iter().find(|e| e.id == id).unwrap();
        assert!(entry.geotag.is_none());
    }

    #[test]
    fn empty_text_is_rejected() {
        let mut project = demo_project();
        assert!(add_entry(&mut project, "   ", None, None).is_err());
        assert!(project.diary.is_empty());
    }

    #[test]
    fn remove_requires_an_existing_entry() {
        let mut project = demo_project();
        let id = add_entry(&mut project, "First camp", None, None).unwrap();

        remove_entry(&mut project, &id).unwrap();
        assert!(project.diary.is_empty());
        assert!(matches!(
            remove_entry(&mut project, &id),
            Err(OpError::DiaryNotFound(_))
        ));
    }
}
