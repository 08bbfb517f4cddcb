//! # Notifications Module
//!
//! Notifications are written only by the realtime board channel and are
//! never updated or deleted. This module stores them and lists them by owner.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;


pub use routes::notifications_routes;
