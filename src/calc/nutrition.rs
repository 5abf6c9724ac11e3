//! Nutrition math over a project snapshot. Everything here is pure: the
//! same project value always produces the same output, with no reliance
//! on the wall clock.

use crate::model::catalog::{self, Recipe};
use crate::model::project::{MealEntry, Project};

/// Trip length in days: `floor((end - start) / 1 day) + 1`, clamped to a
/// minimum of one. Missing or inverted dates count as a one-day trip.
pub fn duration_days(project: &Project) -> u32 {
    let (Some(start), Some(end)) = (project.start_date, project.end_date) else {
        return 1;
    };
    let days = (end - start).num_days() + 1;
    if days > 0 { days as u32 } else { 1 }
}

/// Participant count clamped to at least one, so per-person scaling never
/// multiplies by zero.
pub fn participant_count(project: &Project) -> u32 {
    (project.participants.len() as u32).max(1)
}

/// Nutrition contribution of one ingredient line of one meal entry.
#[derive(Debug, Clone)]
pub struct IngredientNutrition {
    pub name: String,
    pub grams: f64,
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

/// Nutrition of one meal entry, summed and broken out per ingredient.
#[derive(Debug, Clone)]
pub struct EntryNutrition {
    pub dish_name: String,
    pub grams: f64,
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub ingredients: Vec<IngredientNutrition>,
}

impl EntryNutrition {
    fn unknown_dish() -> EntryNutrition {
        EntryNutrition {
            dish_name: "Unknown dish".into(),
            grams: 0.0,
            calories: 0.0,
            protein: 0.0,
            fat: 0.0,
            carbs: 0.0,
            ingredients: Vec::new(),
        }
    }
}

/// Compute the nutrition of a meal entry for the given head count.
/// A dangling dish reference yields an explicit zeroed result.
pub fn entry_nutrition(entry: &MealEntry, participant_count: u32) -> EntryNutrition {
    let Some(recipe) = catalog::dish(&entry.dish_id) else {
        return EntryNutrition::unknown_dish();
    };
    entry_nutrition_for(recipe, entry.servings, participant_count)
}

fn entry_nutrition_for(recipe: &Recipe, servings: f64, participant_count: u32) -> EntryNutrition {
    let mut totals = EntryNutrition {
        dish_name: recipe.name.into(),
        grams: 0.0,
        calories: 0.0,
        protein: 0.0,
        fat: 0.0,
        carbs: 0.0,
        ingredients: Vec::with_capacity(recipe.ingredients.len()),
    };

    for ingredient in recipe.ingredients {
        let grams = ingredient.grams_per_person * participant_count as f64 * servings;
        let per_100 = grams / 100.0;
        let line = IngredientNutrition {
            name: ingredient.name.into(),
            grams,
            calories: per_100 * ingredient.kcal_per_100,
            protein: per_100 * ingredient.protein,
            fat: per_100 * ingredient.fat,
            carbs: per_100 * ingredient.carbs,
        };

        totals.grams += line.grams;
        totals.calories += line.calories;
        totals.protein += line.protein;
        totals.fat += line.fat;
        totals.carbs += line.carbs;
        totals.ingredients.push(line);
    }

    totals
}

/// Whole-project nutrition totals.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NutritionTotals {
    pub grams: f64,
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

/// Sum [`entry_nutrition`] over every meal entry of the project.
pub fn project_totals(project: &Project) -> NutritionTotals {
    let people = participant_count(project);
    let mut totals = NutritionTotals::default();
    for entry in &project.meal_entries {
        let nutrition = entry_nutrition(entry, people);
        totals.grams += nutrition.grams;
        totals.calories += nutrition.calories;
        totals.protein += nutrition.protein;
        totals.fat += nutrition.fat;
        totals.carbs += nutrition.carbs;
    }
    totals
}
