//! # Tasks Module
//!
//! Task CRUD over the `tasks` collection. Ownership is the denormalized
//! `email` string; nothing ties it to a registered user.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validators;

#[cfg(test)]
mod tests;

pub use routes::tasks_routes;
