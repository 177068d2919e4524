//! Domain-facing persistence: adapters below, `DomainError` out.

pub mod catalog;
pub mod rooms;
