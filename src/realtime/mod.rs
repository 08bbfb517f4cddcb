//! # Realtime Module
//!
//! WebSocket channel for Kanban board snapshots. A `tasks` event moves every
//! task to the category of the bucket it sits in, and the first task whose
//! category actually changed is announced back as a `notification` event.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

#[cfg(test)]
mod tests;

pub use routes::realtime_routes;
