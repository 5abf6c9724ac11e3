//! Pure, side-effect-free derivations over a project snapshot: nutrition
//! totals, weight aggregation, the checklist view, and the water tool.

pub mod checklist;
pub mod nutrition;
pub mod water;
pub mod weight;

pub use checklist::*;
pub use nutrition::*;
pub use water::*;
pub use weight::*;
