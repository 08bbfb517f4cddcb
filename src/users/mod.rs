//! # Users Module
//!
//! Register-or-login by email. Users are created on first sight of an email
//! and never updated or deleted.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validators;


pub use routes::users_routes;
