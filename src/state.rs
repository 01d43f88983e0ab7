use std::sync::Arc;

use sqlx::SqlitePool;

use crate::chat::ChatService;
use crate::courses::CourseDirectory;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub chat: Arc<ChatService>,
    pub directory: Arc<CourseDirectory>,
}
