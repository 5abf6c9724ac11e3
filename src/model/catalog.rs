//! Fixed catalogs compiled into the binary: the recipe library the meal
//! planner draws from, the gear library behind autofill, the community
//! meal templates, and the first-aid reference.

use super::project::{MealType, Season, TripType};
use super::template::{MealTemplate, TemplateEntry, TemplateSource};

/// One ingredient line of a recipe. Nutrition values are per 100 g.
#[derive(Debug, Clone, Copy)]
pub struct Ingredient {
    pub name: &'static str,
    pub grams_per_person: f64,
    pub kcal_per_100: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct Recipe {
    pub id: &'static str,
    pub name: &'static str,
    pub ingredients: &'static [Ingredient],
}

pub const RECIPES: &[Recipe] = &[
    Recipe {
        id: "dish-oatmeal",
        name: "Oatmeal with dried fruit",
        ingredients: &[
            Ingredient {
                name: "Rolled oats",
                grams_per_person: 80.0,
                kcal_per_100: 365.0,
                protein: 12.0,
                fat: 6.0,
                carbs: 62.0,
            },
            Ingredient {
                name: "Dried fruit",
                grams_per_person: 30.0,
                kcal_per_100: 280.0,
                protein: 2.0,
                fat: 0.5,
                carbs: 66.0,
            },
            Ingredient {
                name: "Nuts",
                grams_per_person: 20.0,
                kcal_per_100: 610.0,
                protein: 17.0,
                fat: 53.0,
                carbs: 11.0,
            },
        ],
    },
    Recipe {
        id: "dish-buckwheat",
        name: "Buckwheat with canned beef",
        ingredients: &[
            Ingredient {
                name: "Buckwheat",
                grams_per_person: 90.0,
                kcal_per_100: 343.0,
                protein: 13.0,
                fat: 3.4,
                carbs: 71.0,
            },
            Ingredient {
                name: "Canned beef",
                grams_per_person: 120.0,
                kcal_per_100: 240.0,
                protein: 15.0,
                fat: 20.0,
                carbs: 0.0,
            },
            Ingredient {
                name: "Dried onion",
                grams_per_person: 10.0,
                kcal_per_100: 320.0,
                protein: 9.0,
                fat: 1.0,
                carbs: 68.0,
            },
        ],
    },
    Recipe {
        id: "dish-couscous",
        name: "Couscous with vegetables",
        ingredients: &[
            Ingredient {
                name: "Couscous",
                grams_per_person: 85.0,
                kcal_per_100: 376.0,
                protein: 12.0,
                fat: 0.6,
                carbs: 77.0,
            },
            Ingredient {
                name: "Vegetable mix",
                grams_per_person: 45.0,
                kcal_per_100: 280.0,
                protein: 9.0,
                fat: 2.0,
                carbs: 52.0,
            },
            Ingredient {
                name: "Olive oil",
                grams_per_person: 10.0,
                kcal_per_100: 884.0,
                protein: 0.0,
                fat: 100.0,
                carbs: 0.0,
            },
        ],
    },
    Recipe {
        id: "dish-noodle-soup",
        name: "Noodle soup",
        ingredients: &[
            Ingredient {
                name: "Noodles",
                grams_per_person: 80.0,
                kcal_per_100: 350.0,
                protein: 12.0,
                fat: 1.2,
                carbs: 72.0,
            },
            Ingredient {
                name: "Dried meat",
                grams_per_person: 35.0,
                kcal_per_100: 410.0,
                protein: 45.0,
                fat: 20.0,
                carbs: 2.0,
            },
            Ingredient {
                name: "Dried vegetables",
                grams_per_person: 20.0,
                kcal_per_100: 290.0,
                protein: 9.0,
                fat: 2.0,
                carbs: 58.0,
            },
        ],
    },
    Recipe {
        id: "dish-energy-snack",
        name: "Energy snack",
        ingredients: &[
            Ingredient {
                name: "Energy bar",
                grams_per_person: 55.0,
                kcal_per_100: 430.0,
                protein: 8.0,
                fat: 15.0,
                carbs: 63.0,
            },
            Ingredient {
                name: "Isotonic mix",
                grams_per_person: 25.0,
                kcal_per_100: 380.0,
                protein: 0.0,
                fat: 0.0,
                carbs: 95.0,
            },
        ],
    },
];

/// Look up a recipe by catalog id.
pub fn dish(dish_id: &str) -> Option<&'static Recipe> {
    RECIPES.iter().find(|r| r.id == dish_id)
}

/// A gear library entry for autofill. An empty `seasons` slice means the
/// item applies to every season.
#[derive(Debug, Clone, Copy)]
pub struct GearSuggestion {
    pub name: &'static str,
    pub category: &'static str,
    pub weight_kg: f64,
    pub hint: &'static str,
    pub trip_types: &'static [TripType],
    pub seasons: &'static [Season],
}

impl GearSuggestion {
    /// Whether this suggestion applies to a trip of the given type and season.
    pub fn matches(&self, trip_type: TripType, season: Season) -> bool {
        self.trip_types.contains(&trip_type)
            && (self.seasons.is_empty() || self.seasons.contains(&season))
    }
}

pub const GEAR_LIBRARY: &[GearSuggestion] = &[
    GearSuggestion {
        name: "2-person tent",
        category: "Shelter",
        weight_kg: 3.2,
        hint: "Take the fly sheet in rainy seasons",
        trip_types: &[TripType::Hiking],
        seasons: &[Season::Summer, Season::Autumn],
    },
    GearSuggestion {
        name: "Tarp",
        category: "Shelter",
        weight_kg: 0.8,
        hint: "Extra cover against precipitation",
        trip_types: &[TripType::Hiking, TripType::Water],
        seasons: &[],
    },
    GearSuggestion {
        name: "Sleeping bag",
        category: "Sleep",
        weight_kg: 1.4,
        hint: "Match the comfort temperature rating",
        trip_types: &[TripType::Hiking, TripType::Ski],
        seasons: &[],
    },
    GearSuggestion {
        name: "Sleeping pad",
        category: "Sleep",
        weight_kg: 0.6,
        hint: "R-value above 4 for winter",
        trip_types: &[TripType::Hiking, TripType::Ski, TripType::Water],
        seasons: &[],
    },
    GearSuggestion {
        name: "Gas stove",
        category: "Kitchen",
        weight_kg: 0.45,
        hint: "Check canister compatibility",
        trip_types: &[TripType::Hiking, TripType::Ski],
        seasons: &[],
    },
    GearSuggestion {
        name: "Cook pot",
        category: "Kitchen",
        weight_kg: 0.65,
        hint: "One liter per 1-2 people",
        trip_types: &[TripType::Hiking, TripType::Ski, TripType::Water],
        seasons: &[],
    },
    GearSuggestion {
        name: "First aid kit",
        category: "Safety",
        weight_kg: 0.35,
        hint: "Add personal medication",
        trip_types: &[TripType::Hiking, TripType::Ski, TripType::Water],
        seasons: &[],
    },
    GearSuggestion {
        name: "Avalanche kit",
        category: "Safety",
        weight_kg: 1.1,
        hint: "Beacon, probe and shovel",
        trip_types: &[TripType::Ski],
        seasons: &[Season::Winter],
    },
    GearSuggestion {
        name: "Dry bag",
        category: "Water",
        weight_kg: 0.4,
        hint: "Keeps food and electronics dry",
        trip_types: &[TripType::Water],
        seasons: &[],
    },
    GearSuggestion {
        name: "Life vest",
        category: "Water",
        weight_kg: 0.9,
        hint: "Size by weight and volume",
        trip_types: &[TripType::Water],
        seasons: &[],
    },
    GearSuggestion {
        name: "Trekking poles",
        category: "Movement",
        weight_kg: 0.5,
        hint: "Take load off the knees",
        trip_types: &[TripType::Hiking],
        seasons: &[],
    },
    GearSuggestion {
        name: "Crampons and ice axe",
        category: "Movement",
        weight_kg: 1.8,
        hint: "For icy sections",
        trip_types: &[TripType::Ski],
        seasons: &[Season::Winter, Season::Spring],
    },
];

/// The community meal templates shipped with the binary.
pub fn community_templates() -> Vec<MealTemplate> {
    vec![
        MealTemplate {
            id: "tpl-community-summer-3d".into(),
            name: "Summer 3 days (hiking)".into(),
            source: TemplateSource::Community,
            trip_type: TripType::Hiking,
            season: Season::Summer,
            days: 3,
            entries: vec![
                template_entry(1, MealType::Breakfast, "dish-oatmeal", 1.0),
                template_entry(1, MealType::Dinner, "dish-buckwheat", 1.0),
                template_entry(2, MealType::Breakfast, "dish-oatmeal", 1.0),
                template_entry(2, MealType::Lunch, "dish-energy-snack", 1.0),
                template_entry(2, MealType::Dinner, "dish-couscous", 1.0),
                template_entry(3, MealType::Breakfast, "dish-oatmeal", 1.0),
                template_entry(3, MealType::Lunch, "dish-noodle-soup", 1.0),
            ],
        },
        MealTemplate {
            id: "tpl-community-winter-2d".into(),
            name: "Winter 2 days (ski)".into(),
            source: TemplateSource::Community,
            trip_type: TripType::Ski,
            season: Season::Winter,
            days: 2,
            entries: vec![
                template_entry(1, MealType::Breakfast, "dish-oatmeal", 1.1),
                template_entry(1, MealType::Lunch, "dish-energy-snack", 1.2),
                template_entry(1, MealType::Dinner, "dish-buckwheat", 1.2),
                template_entry(2, MealType::Breakfast, "dish-oatmeal", 1.1),
                template_entry(2, MealType::Lunch, "dish-noodle-soup", 1.1),
            ],
        },
    ]
}

fn template_entry(day: u32, meal_type: MealType, dish_id: &str, servings: f64) -> TemplateEntry {
    TemplateEntry {
        day,
        meal_type,
        dish_id: dish_id.into(),
        servings,
    }
}

/// A static first-aid reference topic.
#[derive(Debug, Clone, Copy)]
pub struct FirstAidTopic {
    pub title: &'static str,
    pub steps: &'static str,
}

pub const FIRST_AID_GUIDE: &[FirstAidTopic] = &[
    FirstAidTopic {
        title: "Hypothermia",
        steps: "Remove wet clothing, wrap the person up, give a warm sweet drink. \
                Rewarm gradually; never rub with snow.",
    },
    FirstAidTopic {
        title: "Sprain or bruise",
        steps: "Rest, cold for 10-15 minutes, elastic bandage, elevate the limb. \
                Restrict movement and evacuate if pain is severe.",
    },
    FirstAidTopic {
        title: "Burn",
        steps: "Cool with clean cool water for 10-20 minutes, cover with a sterile \
                dressing, do not open blisters.",
    },
    FirstAidTopic {
        title: "Cut",
        steps: "Stop the bleeding with a pressure dressing, treat the edges with \
                antiseptic, keep the wound clean.",
    },
    FirstAidTopic {
        title: "Insect bite",
        steps: "Remove the sting if present, disinfect the bite, give an \
                antihistamine if a reaction develops.",
    },
];
