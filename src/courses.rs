use std::collections::HashMap;

use crate::error::AppError;

/// Static map from course code to the identity the timetabling service
/// uses for that course. Codes are stored upper-cased; lookups upper-case
/// their input.
#[derive(Debug, Clone)]
pub struct CourseDirectory {
    identities: HashMap<String, String>,
}

impl CourseDirectory {
    pub fn from_embedded() -> Result<Self, AppError> {
        Self::from_json(include_str!("../resources/course_identities.json"))
    }

    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        let parsed: HashMap<String, String> = serde_json::from_str(raw)
            .map_err(|e| AppError::BadRequest(format!("Failed to parse course identities: {}", e)))?;

        let identities = parsed
            .into_iter()
            .map(|(code, identity)| (code.to_uppercase(), identity))
            .collect();

        Ok(Self { identities })
    }

    pub fn is_valid(&self, code: &str) -> bool {
        self.identities.contains_key(&code.to_uppercase())
    }

    pub fn identity(&self, code: &str) -> Option<&str> {
        self.identities.get(&code.to_uppercase()).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}
