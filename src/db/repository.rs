use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::{AssignmentItem, AssignmentTray, User};

pub async fn find_user_by_id(db: &SqlitePool, id: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT id, email, coursecode, created_at FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn find_user_by_email(db: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT id, email, coursecode, created_at FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(db)
        .await
}

pub async fn insert_user(
    db: &SqlitePool,
    email: &str,
    coursecode: &str,
) -> Result<User, sqlx::Error> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();
    let coursecode = coursecode.to_uppercase();

    sqlx::query("INSERT INTO users (id, email, coursecode, created_at) VALUES (?, ?, ?, ?)")
        .bind(&id)
        .bind(email)
        .bind(&coursecode)
        .bind(&now)
        .execute(db)
        .await?;

    Ok(User {
        id,
        email: email.to_string(),
        coursecode,
        created_at: now,
    })
}

/// Course codes are stored upper-cased; the caller validates them first.
pub async fn update_user_course(
    db: &SqlitePool,
    user_id: &str,
    coursecode: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET coursecode = ? WHERE id = ?")
        .bind(coursecode.to_uppercase())
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(())
}

pub async fn find_tray(db: &SqlitePool, user_id: &str) -> Result<Option<AssignmentTray>, sqlx::Error> {
    sqlx::query_as::<_, AssignmentTray>(
        "SELECT id, user_id, time_created FROM assignment_trays WHERE user_id = ?",
    )
    .bind(user_id)
    .fetch_optional(db)
    .await
}

/// Returns the user's tray, creating it on first use.
pub async fn ensure_tray(db: &SqlitePool, user_id: &str) -> Result<AssignmentTray, sqlx::Error> {
    if let Some(tray) = find_tray(db, user_id).await? {
        return Ok(tray);
    }

    let id = Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();

    sqlx::query("INSERT INTO assignment_trays (id, user_id, time_created) VALUES (?, ?, ?)")
        .bind(&id)
        .bind(user_id)
        .bind(&now)
        .execute(db)
        .await?;

    Ok(AssignmentTray {
        id,
        user_id: user_id.to_string(),
        time_created: now,
    })
}

pub async fn insert_item(
    db: &SqlitePool,
    tray_id: &str,
    name: &str,
    due_date: &str,
) -> Result<AssignmentItem, sqlx::Error> {
    let id = Uuid::new_v4().to_string();

    sqlx::query(
        "INSERT INTO assignment_items (id, tray_id, assignment_name, due_date) VALUES (?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(tray_id)
    .bind(name)
    .bind(due_date)
    .execute(db)
    .await?;

    Ok(AssignmentItem {
        id,
        tray_id: tray_id.to_string(),
        assignment_name: name.to_string(),
        due_date: due_date.to_string(),
    })
}

pub async fn fetch_items(db: &SqlitePool, tray_id: &str) -> Result<Vec<AssignmentItem>, sqlx::Error> {
    sqlx::query_as::<_, AssignmentItem>(
        "SELECT id, tray_id, assignment_name, due_date FROM assignment_items WHERE tray_id = ? ORDER BY rowid",
    )
    .bind(tray_id)
    .fetch_all(db)
    .await
}

/// Deletes every item with the given name in the tray; the name is the
/// deletion key. Returns how many rows went away.
pub async fn delete_items_by_name(
    db: &SqlitePool,
    tray_id: &str,
    name: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "DELETE FROM assignment_items WHERE tray_id = ? AND assignment_name = ?",
    )
    .bind(tray_id)
    .bind(name)
    .execute(db)
    .await?;

    Ok(result.rows_affected())
}
