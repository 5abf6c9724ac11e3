//! Trailhead: expedition planning with a local-first state store.
//!
//! The design-bearing core is the state layer: a single persisted
//! `AppState` blob with a rolling backup and integrity checking
//! ([`store::persist`]), cross-instance reconciliation over a change
//! signal ([`store::sync`]), a mutation façade that keeps persistence and
//! notification from ever being skipped ([`store::Store`]), and pure
//! derivations for nutrition and weight ([`calc`]).

pub mod calc;
pub mod cli;
pub mod config;
pub mod model;
pub mod ops;
pub mod remote;
pub mod store;
pub mod util;
pub mod validate;
