pub mod assignment;
pub mod user;

pub use assignment::{AssignmentItem, AssignmentTray};
pub use user::{SignupRequest, User};
