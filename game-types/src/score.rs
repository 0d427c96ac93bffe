use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Score submission as reported by the client. The `score` itself is never
/// part of this payload: it is recomputed server-side from these fields.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreSubmission {
    pub player: String,
    pub won: bool,
    pub word: Option<String>,
    pub word_length: i32,
    pub mistakes: i32,
    pub correct: i32,
    pub accuracy: f64,
    pub duration_ms: i64,
    pub level: Option<i32>,
}

/// A persisted leaderboard entry.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreRecord {
    pub id: i32,
    pub player: String,
    pub won: bool,
    pub word: Option<String>,
    pub word_length: i32,
    pub mistakes: i32,
    pub correct: i32,
    pub accuracy: f64,
    pub duration_ms: i64,
    pub score: i32,
    pub created_at: String, // ISO 8601 string
}
