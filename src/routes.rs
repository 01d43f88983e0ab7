use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::Deserialize;
use tracing::error;

use crate::db::repository;
use crate::error::AppError;
use crate::models::{SignupRequest, User};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/signup", post(signup))
        .route("/chat", get(chat))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("select 1").execute(&state.db).await {
        Ok(_) => StatusCode::OK,
        Err(err) => {
            error!("health check failed: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// The auth gateway owns passwords and sessions; signup here records only
/// what the chatbot needs and validates the course code.
async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    if !state.directory.is_valid(&req.coursecode) {
        return Err(AppError::BadRequest("not a valid course".to_string()));
    }

    if repository::find_user_by_email(&state.db, &req.email)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("email is already taken".to_string()));
    }

    let user = repository::insert_user(&state.db, &req.email, &req.coursecode).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[derive(Debug, Deserialize)]
struct ChatParams {
    user: String,
    msg: String,
}

/// One chat turn. Plain text out, HTML line breaks inline — no envelope.
async fn chat(
    State(state): State<AppState>,
    Query(params): Query<ChatParams>,
) -> Result<String, AppError> {
    let user = repository::find_user_by_id(&state.db, &params.user)
        .await?
        .ok_or(AppError::NotFound)?;

    state.chat.respond(&user, &params.msg).await
}
