pub mod roster;
pub mod scorecard;
