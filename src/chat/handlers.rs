//! Command handlers. Every outcome, including the error cases, is a plain
//! reply string; nothing here surfaces as an HTTP error.

use sqlx::SqlitePool;

use crate::courses::CourseDirectory;
use crate::db::repository;
use crate::error::AppError;

pub const ASSIGNMENT_ADDED: &str = "Assignment added :)";
pub const ASSIGNMENT_DELETED: &str = "Assignment deleted :)";
pub const NO_SUCH_ASSIGNMENT: &str = "You have no assignments with this name";
pub const NO_ASSIGNMENTS: &str = "You have no assignments.";
pub const COURSE_UPDATED: &str = "I have updated your course";
pub const INVALID_COURSE: &str = "Sorry that is not a valid course.";

pub async fn add_assignment(
    db: &SqlitePool,
    user_id: &str,
    name: &str,
    due_date: &str,
) -> Result<String, AppError> {
    let tray = repository::ensure_tray(db, user_id).await?;
    repository::insert_item(db, &tray.id, name, due_date).await?;
    Ok(ASSIGNMENT_ADDED.to_string())
}

/// Delete-by-name removes every item with that name; the tray allows
/// duplicates and the name is the only key the user can give us.
pub async fn delete_assignment(
    db: &SqlitePool,
    user_id: &str,
    name: &str,
) -> Result<String, AppError> {
    let Some(tray) = repository::find_tray(db, user_id).await? else {
        return Ok(NO_SUCH_ASSIGNMENT.to_string());
    };

    let deleted = repository::delete_items_by_name(db, &tray.id, name).await?;
    if deleted == 0 {
        return Ok(NO_SUCH_ASSIGNMENT.to_string());
    }
    Ok(ASSIGNMENT_DELETED.to_string())
}

pub async fn view_assignments(db: &SqlitePool, user_id: &str) -> Result<String, AppError> {
    let Some(tray) = repository::find_tray(db, user_id).await? else {
        return Ok(NO_ASSIGNMENTS.to_string());
    };

    let items = repository::fetch_items(db, &tray.id).await?;
    if items.is_empty() {
        return Ok(NO_ASSIGNMENTS.to_string());
    }

    let mut out = String::from("Here are your current assignments:");
    for item in &items {
        out.push_str("<br><br>");
        out.push_str(&item.assignment_name);
        out.push_str("<br>");
        out.push_str(&item.due_date);
    }
    Ok(out)
}

pub async fn update_course(
    db: &SqlitePool,
    directory: &CourseDirectory,
    user_id: &str,
    code: &str,
) -> Result<String, AppError> {
    if !directory.is_valid(code) {
        return Ok(INVALID_COURSE.to_string());
    }

    repository::update_user_course(db, user_id, code).await?;
    Ok(COURSE_UPDATED.to_string())
}
