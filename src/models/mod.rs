//! Core data models for the match tracker.

mod archetype;
mod class;
mod ids;
mod match_record;
mod user;

pub use archetype::*;
pub use class::*;
pub use ids::*;
pub use match_record::*;
pub use user::*;
