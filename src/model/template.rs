use serde::{Deserialize, Serialize};

use super::project::{MealType, Season, TripType};

/// One line of a meal-plan template: which dish on which day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateEntry {
    pub day: u32,
    pub meal_type: MealType,
    pub dish_id: String,
    pub servings: f64,
}

/// Where a template came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateSource {
    Community,
    User,
}

/// A reusable meal plan. Community templates ship with the binary;
/// user templates are saved from a project's current plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealTemplate {
    pub id: String,
    pub name: String,
    pub source: TemplateSource,
    pub trip_type: TripType,
    pub season: Season,
    pub days: u32,
    pub entries: Vec<TemplateEntry>,
}
