use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::util::ids::uid;

/// Maximum number of activity entries kept per project (newest first).
pub const ACTIVITY_CAP: usize = 80;

/// Kind of trip being planned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripType {
    Hiking,
    Ski,
    Water,
}

impl TripType {
    pub fn parse(s: &str) -> Option<TripType> {
        match s {
            "hiking" => Some(TripType::Hiking),
            "ski" => Some(TripType::Ski),
            "water" => Some(TripType::Water),
            _ => None,
        }
    }
}

impl std::fmt::Display for TripType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TripType::Hiking => write!(f, "hiking"),
            TripType::Ski => write!(f, "ski"),
            TripType::Water => write!(f, "water"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    pub fn parse(s: &str) -> Option<Season> {
        match s {
            "spring" => Some(Season::Spring),
            "summer" => Some(Season::Summer),
            "autumn" => Some(Season::Autumn),
            "winter" => Some(Season::Winter),
            _ => None,
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Season::Spring => write!(f, "spring"),
            Season::Summer => write!(f, "summer"),
            Season::Autumn => write!(f, "autumn"),
            Season::Winter => write!(f, "winter"),
        }
    }
}

/// Body build of the person carrying the pack — drives the carry limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyType {
    Light,
    #[default]
    Medium,
    Strong,
}

impl BodyType {
    /// Recommended carry limit in kilograms for this build.
    pub fn carry_limit_kg(self) -> f64 {
        match self {
            BodyType::Light => 18.0,
            BodyType::Medium => 22.0,
            BodyType::Strong => 27.0,
        }
    }

    pub fn parse(s: &str) -> Option<BodyType> {
        match s {
            "light" => Some(BodyType::Light),
            "medium" => Some(BodyType::Medium),
            "strong" => Some(BodyType::Strong),
            _ => None,
        }
    }
}

/// Role of a participant within a project.
/// Exactly one participant per project holds `Owner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Editor,
    Viewer,
}

impl Role {
    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "owner" => Some(Role::Owner),
            "editor" => Some(Role::Editor),
            "viewer" => Some(Role::Viewer),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn parse(s: &str) -> Option<MealType> {
        match s {
            "breakfast" => Some(MealType::Breakfast),
            "lunch" => Some(MealType::Lunch),
            "dinner" => Some(MealType::Dinner),
            "snack" => Some(MealType::Snack),
            _ => None,
        }
    }
}

impl std::fmt::Display for MealType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MealType::Breakfast => write!(f, "breakfast"),
            MealType::Lunch => write!(f, "lunch"),
            MealType::Dinner => write!(f, "dinner"),
            MealType::Snack => write!(f, "snack"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub role: Role,
}

/// A gear item on the packing list. `responsible_id` is a weak reference
/// to a participant; it is repaired when that participant is removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GearItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub weight_kg: f64,
    #[serde(default)]
    pub responsible_id: Option<String>,
    #[serde(default)]
    pub hint: String,
    #[serde(default)]
    pub packed: bool,
}

/// One planned meal: a dish from the recipe catalog on a given trip day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealEntry {
    pub id: String,
    pub day: u32,
    pub meal_type: MealType,
    pub dish_id: String,
    pub servings: f64,
    #[serde(default)]
    pub packed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub author: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub geotag: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One line in the project's audit trail (newest first, capped).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// One planned expedition and all its associated planning data.
/// Owned exclusively by `AppState`; mutated only through the store façade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub trip_type: TripType,
    pub season: Season,
    #[serde(default)]
    pub body_type: BodyType,
    #[serde(default)]
    pub invite_link: String,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub gear_items: Vec<GearItem>,
    #[serde(default)]
    pub meal_entries: Vec<MealEntry>,
    #[serde(default)]
    pub chat: Vec<ChatMessage>,
    #[serde(default)]
    pub diary: Vec<DiaryEntry>,
    #[serde(default)]
    pub activity: Vec<Activity>,
}

impl Project {
    pub fn participant(&self, id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    pub fn gear_item(&self, id: &str) -> Option<&GearItem> {
        self.gear_items.iter().find(|g| g.id == id)
    }

    pub fn gear_item_mut(&mut self, id: &str) -> Option<&mut GearItem> {
        self.gear_items.iter_mut().find(|g| g.id == id)
    }

    pub fn meal_entry_mut(&mut self, id: &str) -> Option<&mut MealEntry> {
        self.meal_entries.iter_mut().find(|m| m.id == id)
    }

    /// Prepend an activity line, keeping the log at most `ACTIVITY_CAP` long.
    pub fn add_activity(&mut self, text: impl Into<String>) {
        self.activity.insert(
            0,
            Activity {
                id: uid("act"),
                text: text.into(),
                created_at: Utc::now(),
            },
        );
        self.activity.truncate(ACTIVITY_CAP);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_project() -> Project {
        Project {
            id: uid("project"),
            title: "Test trek".into(),
            start_date: None,
            end_date: None,
            trip_type: TripType::Hiking,
            season: Season::Summer,
            body_type: BodyType::Medium,
            invite_link: String::new(),
            participants: Vec::new(),
            gear_items: Vec::new(),
            meal_entries: Vec::new(),
            chat: Vec::new(),
            diary: Vec::new(),
            activity: Vec::new(),
        }
    }

    #[test]
    fn activity_log_is_newest_first_and_capped() {
        let mut project = bare_project();
        for i in 0..100 {
            project.add_activity(format!("event {}", i));
        }
        assert_eq!(project.activity.len(), ACTIVITY_CAP);
        assert_eq!(project.activity[0].text, "event 99");
        assert_eq!(project.activity.last().unwrap().text, "event 20");
    }

    #[test]
    fn enums_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Owner).unwrap(), "\"owner\"");
        assert_eq!(
            serde_json::to_string(&MealType::Breakfast).unwrap(),
            "\"breakfast\""
        );
        assert_eq!(serde_json::to_string(&TripType::Ski).unwrap(), "\"ski\"");
        assert_eq!(
            serde_json::to_string(&Season::Autumn).unwrap(),
            "\"autumn\""
        );
        assert_eq!(
            serde_json::to_string(&BodyType::Strong).unwrap(),
            "\"strong\""
        );
    }

    #[test]
    fn carry_limits_by_body_type() {
        assert_eq!(BodyType::Light.carry_limit_kg(), 18.0);
        assert_eq!(BodyType::Medium.carry_limit_kg(), 22.0);
        assert_eq!(BodyType::Strong.carry_limit_kg(), 27.0);
    }

    #[test]
    fn minimal_project_deserializes_with_defaults() {
        let json = r#"{
            "id": "project-1",
            "title": "Bare",
            "trip_type": "hiking",
            "season": "summer"
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.body_type, BodyType::Medium);
        assert!(project.start_date.is_none());
        assert!(project.participants.is_empty());
        assert!(project.activity.is_empty());
    }
}
