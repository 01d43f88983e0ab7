use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Per-user container of assignment items, created lazily on the first add.
/// A user has at most one tray.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AssignmentTray {
    pub id: String,
    pub user_id: String,
    pub time_created: String,
}

/// Due date is free text on purpose; the name doubles as the deletion key.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AssignmentItem {
    pub id: String,
    pub tray_id: String,
    pub assignment_name: String,
    pub due_date: String,
}
