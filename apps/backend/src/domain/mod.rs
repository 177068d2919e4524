//! Domain layer: pure game rules, no IO.

pub mod catalog;
pub mod city;
pub mod deck;
pub mod lifecycle;
pub mod player;
pub mod resolution;
pub mod room;
pub mod scoring;
pub mod tally;
pub mod view;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_room_helpers;
#[cfg(test)]
mod tests_lifecycle;
#[cfg(test)]
mod tests_petitions;
#[cfg(test)]
mod tests_props_city;
#[cfg(test)]
mod tests_scoring;
#[cfg(test)]
mod tests_view;

// Re-exports for ergonomics
pub use catalog::{Catalog, MasterIdeology, MasterPolicy, PolicyCategory, PolicyDraft, PolicyOption};
pub use city::{CityState, Dimension, EffectVector};
pub use lifecycle::{LeaveOutcome, NextTurnOutcome, RoomAggregate};
pub use player::Player;
pub use room::{FlavorImage, Room, RoomStatus, VoteResult};
pub use scoring::{PlayerScore, ScoreResult};
pub use view::RoomView;
