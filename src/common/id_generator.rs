// src/common/id_generator.rs
//! Crockford Base32 ID Generator
//!
//! Generates prefixed document IDs using Crockford Base32 encoding.
//! Format: PREFIX_XXXXXX (e.g., T_K7NP3X for tasks)
//!
//! The alphabet excludes I, L, O, U so IDs can be read back without ambiguity.

use rand::Rng;

/// Crockford Base32 alphabet (excludes I, L, O, U to avoid confusion)
const CROCKFORD_ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Default number of random characters after the prefix
const ID_LENGTH: usize = 6;

/// Entity type prefixes for ID generation
#[derive(Debug, Clone, Copy)]
pub enum EntityPrefix {
    /// User (U_)
    User,
    /// Task (T_)
    Task,
    /// Notification (N_)
    Notification,
    /// Realtime connection (WS_), never persisted
    Connection,
}

impl EntityPrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityPrefix::User => "U",
            EntityPrefix::Task => "T",
            EntityPrefix::Notification => "N",
            EntityPrefix::Connection => "WS",
        }
    }
}

fn generate_crockford_string(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..32);
            CROCKFORD_ALPHABET[idx] as char
        })
        .collect()
}

/// Generate a prefixed ID in the format "PREFIX_XXXXXX"
pub fn generate_id(prefix: EntityPrefix) -> String {
    format!("{}_{}", prefix.as_str(), generate_crockford_string(ID_LENGTH))
}

pub fn generate_user_id() -> String {
    generate_id(EntityPrefix::User)
}

pub fn generate_task_id() -> String {
    generate_id(EntityPrefix::Task)
}

pub fn generate_notification_id() -> String {
    generate_id(EntityPrefix::Notification)
}

pub fn generate_connection_id() -> String {
    generate_id(EntityPrefix::Connection)
}
