use super::models::{Registration, User};
use crate::common::{generate_user_id, normalize_email, safe_email_log, ApiError};
use sqlx::SqlitePool;
use tracing::{error, info};

pub struct UsersService {
    db: SqlitePool,
}

impl UsersService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Find a user by email (case-insensitive)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let email = normalize_email(email);
        sqlx::query_as::<_, User>("SELECT id, display_name, email FROM users WHERE email = ?")
            .bind(&email)
            .fetch_optional(&self.db)
            .await
            .map_err(ApiError::DatabaseError)
    }

    /// Return the user registered under `email`, creating it on first sight
    pub async fn register_or_login(
        &self,
        email: &str,
        display_name: &str,
    ) -> Result<Registration, ApiError> {
        let email = normalize_email(email);

        if let Some(user) = self.find_by_email(&email).await? {
            info!(email = %safe_email_log(&email), user_id = %user.id, "Existing user logged in");
            return Ok(Registration::Existing(user));
        }

        let user = User {
            id: generate_user_id(),
            display_name: display_name.trim().to_string(),
            email,
        };

        let inserted = sqlx::query("INSERT INTO users (id, display_name, email) VALUES (?, ?, ?)")
            .bind(&user.id)
            .bind(&user.display_name)
            .bind(&user.email)
            .execute(&self.db)
            .await;

        match inserted {
            Ok(_) => {
                info!(email = %safe_email_log(&user.email), user_id = %user.id, "User created");
                Ok(Registration::Created(user))
            }
            // A concurrent registration won the race for this email
            Err(e) if e.to_string().contains("UNIQUE constraint failed") => self
                .find_by_email(&user.email)
                .await?
                .map(Registration::Existing)
                .ok_or(ApiError::DatabaseError(e)),
            Err(e) => {
                error!(error = %e, email = %safe_email_log(&user.email), "Database error creating user");
                Err(ApiError::DatabaseError(e))
            }
        }
    }
}
