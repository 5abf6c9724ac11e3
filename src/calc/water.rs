//! Standalone water-need calculator. Pure; the result is stored in the
//! tools scratch state by the caller.

use crate::model::state::WaterCalcResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weather {
    Cold,
    Mild,
    Hot,
}

impl Weather {
    pub fn parse(s: &str) -> Option<Weather> {
        match s {
            "cold" => Some(Weather::Cold),
            "mild" => Some(Weather::Mild),
            "hot" => Some(Weather::Hot),
            _ => None,
        }
    }

    fn factor(self) -> f64 {
        match self {
            Weather::Cold => 1.0,
            Weather::Mild => 1.2,
            Weather::Hot => 1.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityLevel {
    Low,
    Medium,
    High,
}

impl ActivityLevel {
    pub fn parse(s: &str) -> Option<ActivityLevel> {
        match s {
            "low" => Some(ActivityLevel::Low),
            "medium" => Some(ActivityLevel::Medium),
            "high" => Some(ActivityLevel::High),
            _ => None,
        }
    }

    fn factor(self) -> f64 {
        match self {
            ActivityLevel::Low => 0.8,
            ActivityLevel::Medium => 1.0,
            ActivityLevel::High => 1.25,
        }
    }
}

/// Liters of water needed for a day on the move. Per-person need is
/// floored at 0.7 l regardless of how short the day is.
pub fn water_need(
    weather: Weather,
    activity: ActivityLevel,
    hours: f64,
    people: u32,
) -> WaterCalcResult {
    let per_person = (hours * 0.3 * weather.factor() * activity.factor()).max(0.7);
    WaterCalcResult {
        per_person_liters: per_person,
        total_liters: per_person * people.max(1) as f64,
    }
}
