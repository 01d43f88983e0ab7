use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Identity is owned by the auth gateway in front of this service; we only
/// keep what the chatbot needs, chiefly the course code that scopes
/// timetable lookups.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    pub coursecode: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub coursecode: String,
}
