use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::AppError;

const FALLBACK_REPLY: &str =
    "I am sorry, but I do not understand. I am still learning. <br><br> Try asking about your timetable, or type help.";

/// Text-in/text-out boundary to the chat engine. The production engine is an
/// external collaborator; everything behind this trait is a black box to the
/// rest of the service.
#[async_trait]
pub trait ChatEngine: Send + Sync {
    async fn reply(&self, input: &str) -> String;
}

/// Canned-reply engine over a small corpus: case-insensitive exact match on
/// the whole message, fixed fallback otherwise. Enough to drive the
/// timetable prompts and the tests.
pub struct ScriptedEngine {
    replies: HashMap<String, String>,
}

impl ScriptedEngine {
    pub fn from_embedded() -> Result<Self, AppError> {
        Self::from_json(include_str!("../../resources/corpus.json"))
    }

    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        let parsed: HashMap<String, String> = serde_json::from_str(raw)
            .map_err(|e| AppError::BadRequest(format!("Failed to parse corpus: {}", e)))?;

        let replies = parsed
            .into_iter()
            .map(|(input, reply)| (input.to_lowercase(), reply))
            .collect();

        Ok(Self { replies })
    }
}

#[async_trait]
impl ChatEngine for ScriptedEngine {
    async fn reply(&self, input: &str) -> String {
        let key = input.trim().to_lowercase();
        self.replies
            .get(&key)
            .cloned()
            .unwrap_or_else(|| FALLBACK_REPLY.to_string())
    }
}
