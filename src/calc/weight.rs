//! Weight aggregation: gear totals, day-by-day food mass, and the
//! carry-limit check against the owner's body type.

use indexmap::IndexMap;

use crate::model::project::Project;

use super::nutrition::{duration_days, entry_nutrition, participant_count};

/// Food mass carried on one trip day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayWeight {
    pub day: u32,
    pub kg: f64,
}

/// Food mass bucketed per trip day. Every day of the trip gets a bucket,
/// zero-filled when nothing is planned — the day-by-day chart depends on
/// the full range being present. Entries with out-of-range days are
/// ignored rather than growing the range.
pub fn food_weight_by_day(project: &Project) -> Vec<DayWeight> {
    let days = duration_days(project);
    let people = participant_count(project);

    let mut buckets: Vec<DayWeight> = (1..=days).map(|day| DayWeight { day, kg: 0.0 }).collect();
    for entry in &project.meal_entries {
        if entry.day >= 1 && entry.day <= days {
            let nutrition = entry_nutrition(entry, people);
            buckets[(entry.day - 1) as usize].kg += nutrition.grams / 1000.0;
        }
    }
    buckets
}

/// Total gear weight in kilograms, independent of pack state.
pub fn gear_weight(project: &Project) -> f64 {
    project.gear_items.iter().map(|g| g.weight_kg).sum()
}

/// Gear weight grouped by category, in first-appearance order (chart feed).
pub fn gear_weight_by_category(project: &Project) -> IndexMap<String, f64> {
    let mut by_category: IndexMap<String, f64> = IndexMap::new();
    for item in &project.gear_items {
        *by_category.entry(item.category.clone()).or_insert(0.0) += item.weight_kg;
    }
    by_category
}

/// The weight-budget check for a project.
#[derive(Debug, Clone)]
pub struct WeightReport {
    pub gear_kg: f64,
    /// Total carry per day: gear plus that day's food.
    pub daily_carry: Vec<DayWeight>,
    /// Peak daily carry across the trip.
    pub max_carry_kg: f64,
    /// Recommended limit for the project's body type.
    pub limit_kg: f64,
    pub overweight: bool,
    /// Up to three heaviest gear items, heaviest first.
    pub heaviest: Vec<(String, f64)>,
}

pub fn weight_report(project: &Project) -> WeightReport {
    let gear_kg = gear_weight(project);
    let daily_carry: Vec<DayWeight> = food_weight_by_day(project)
        .into_iter()
        .map(|d| DayWeight {
            day: d.day,
            kg: gear_kg + d.kg,
        })
        .collect();

    let max_carry_kg = daily_carry
        .iter()
        .map(|d| d.kg)
        .fold(gear_kg, f64::max);
    let limit_kg = project.body_type.carry_limit_kg();

    let mut heaviest: Vec<(String, f64)> = project
        .gear_items
        .iter()
        .map(|g| (g.name.clone(), g.weight_kg))
        .collect();
    heaviest.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    heaviest.truncate(3);

    WeightReport {
        gear_kg,
        daily_carry,
        max_carry_kg,
        limit_kg,
        overweight: max_carry_kg > limit_kg,
        heaviest,
    }
}
