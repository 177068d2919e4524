//! Adapters for external dependencies.

pub mod catalog_sea;
pub mod room_players_sea;
pub mod rooms_sea;
