pub mod catalog;
pub mod project;
pub mod state;
pub mod template;

pub use project::*;
pub use state::*;
pub use template::*;
