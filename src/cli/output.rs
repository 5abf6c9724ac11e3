use serde::Serialize;

use crate::calc::{ChecklistRow, DayWeight, NutritionTotals, WeightReport};
use crate::model::project::{GearItem, MealEntry, Participant, Project};
use crate::store::{Notice, NoticeKind};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ProjectJson {
    pub id: String,
    pub title: String,
    pub current: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub trip_type: String,
    pub season: String,
    pub participants: usize,
}

impl ProjectJson {
    pub fn from_project(project: &Project, current: bool) -> ProjectJson {
        ProjectJson {
            id: project.id.clone(),
            title: project.title.clone(),
            current,
            start_date: project.start_date.map(|d| d.to_string()),
            end_date: project.end_date.map(|d| d.to_string()),
            trip_type: project.trip_type.to_string(),
            season: project.season.to_string(),
            participants: project.participants.len(),
        }
    }
}

#[derive(Serialize)]
pub struct GearJson {
    pub id: String,
    pub name: String,
    pub category: String,
    pub weight_kg: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsible: Option<String>,
    pub packed: bool,
}

#[derive(Serialize)]
pub struct MealJson {
    pub id: String,
    pub day: u32,
    pub meal_type: String,
    pub dish: String,
    pub servings: f64,
    pub packed: bool,
    pub calories: f64,
    pub grams: f64,
}

#[derive(Serialize)]
pub struct NutritionJson {
    pub grams: f64,
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

impl From<NutritionTotals> for NutritionJson {
    fn from(totals: NutritionTotals) -> NutritionJson {
        NutritionJson {
            grams: totals.grams,
            calories: totals.calories,
            protein: totals.protein,
            fat: totals.fat,
            carbs: totals.carbs,
        }
    }
}

#[derive(Serialize)]
pub struct DayWeightJson {
    pub day: u32,
    pub kg: f64,
}

#[derive(Serialize)]
pub struct WeightJson {
    pub gear_kg: f64,
    pub max_carry_kg: f64,
    pub limit_kg: f64,
    pub overweight: bool,
    pub daily_carry: Vec<DayWeightJson>,
    pub heaviest: Vec<String>,
}

impl From<&WeightReport> for WeightJson {
    fn from(report: &WeightReport) -> WeightJson {
        WeightJson {
            gear_kg: report.gear_kg,
            max_carry_kg: report.max_carry_kg,
            limit_kg: report.limit_kg,
            overweight: report.overweight,
            daily_carry: report
                .daily_carry
                .iter()
                .map(|d| DayWeightJson { day: d.day, kg: d.kg })
                .collect(),
            heaviest: report
                .heaviest
                .iter()
                .map(|(name, kg)| format!("{} ({:.1} kg)", name, kg))
                .collect(),
        }
    }
}

#[derive(Serialize)]
pub struct ChecklistJson {
    pub done: usize,
    pub total: usize,
    pub rows: Vec<ChecklistRowJson>,
}

#[derive(Serialize)]
pub struct ChecklistRowJson {
    pub kind: String,
    pub id: String,
    pub done: bool,
    pub title: String,
    pub owner: String,
}

impl From<&ChecklistRow> for ChecklistRowJson {
    fn from(row: &ChecklistRow) -> ChecklistRowJson {
        ChecklistRowJson {
            kind: match row.kind {
                crate::calc::ChecklistKind::Gear => "gear".into(),
                crate::calc::ChecklistKind::Meal => "meal".into(),
            },
            id: row.id.clone(),
            done: row.done,
            title: row.title.clone(),
            owner: row.owner.clone(),
        }
    }
}

#[derive(Serialize)]
pub struct StatusJson {
    pub project: String,
    pub project_id: String,
    pub projects: usize,
    pub participants: usize,
    pub gear_kg: f64,
    pub calories: f64,
    pub duration_days: u32,
}

pub fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).expect("output structs always serialize")
    );
}

// ---------------------------------------------------------------------------
// Text output helpers
// ---------------------------------------------------------------------------

fn role_str(role: crate::model::project::Role) -> &'static str {
    match role {
        crate::model::project::Role::Owner => "owner",
        crate::model::project::Role::Editor => "editor",
        crate::model::project::Role::Viewer => "viewer",
    }
}

pub fn participant_line(p: &Participant) -> String {
    format!("{}  {}  {}", p.id, role_str(p.role), p.name)
}

pub fn gear_line(item: &GearItem, owner: Option<&str>) -> String {
    format!(
        "[{}] {}  {}  {:.2} kg  ({})",
        if item.packed { "x" } else { " " },
        item.id,
        item.name,
        item.weight_kg,
        owner.unwrap_or("unassigned"),
    )
}

pub fn meal_line(entry: &MealEntry, dish_name: &str, calories: f64) -> String {
    format!(
        "[{}] {}  day {}  {}  {}  x{:.1}  {:.0} kcal",
        if entry.packed { "x" } else { " " },
        entry.id,
        entry.day,
        entry.meal_type,
        dish_name,
        entry.servings,
        calories,
    )
}

pub fn day_weight_line(day: &DayWeight) -> String {
    format!("  day {}: {:.2} kg", day.day, day.kg)
}

/// Print queued notices: info to stdout, warnings and errors to stderr.
/// With `force_stderr` everything goes to stderr (JSON mode keeps stdout
/// machine-readable).
pub fn print_notices(notices: &[Notice], force_stderr: bool) {
    for notice in notices {
        match notice.kind {
            NoticeKind::Info if !force_stderr => println!("{}", notice.text),
            NoticeKind::Info => eprintln!("{}", notice.text),
            NoticeKind::Warn => eprintln!("warning: {}", notice.text),
            NoticeKind::Error => eprintln!("error: {}", notice.text),
        }
    }
}
