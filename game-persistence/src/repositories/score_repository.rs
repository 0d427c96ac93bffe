use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::entities::{prelude::*, scores};
use game_core::ScoreEngine;
use game_types::{ScoreRecord, ScoreSubmission};

pub const DEFAULT_LEADERBOARD_LIMIT: u64 = 20;
pub const DEFAULT_HISTORY_LIMIT: u64 = 50;
const MAX_LIMIT: u64 = 100;
const MAX_TEXT_LEN: usize = 64;

pub struct ScoreRepository {
    db: DatabaseConnection,
}

fn truncate(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

fn clamp_limit(requested: Option<u64>, default: u64) -> u64 {
    requested.unwrap_or(default).clamp(1, MAX_LIMIT)
}

impl ScoreRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_record(model: scores::Model) -> ScoreRecord {
        ScoreRecord {
            id: model.id,
            player: model.player,
            won: model.won,
            word: model.word,
            word_length: model.word_length,
            mistakes: model.mistakes,
            correct: model.correct,
            accuracy: (model.accuracy * 10.0).round() / 10.0,
            duration_ms: model.duration_ms,
            score: model.score,
            created_at: model.created_at.to_rfc3339(),
        }
    }

    /// Persist a submitted score. The score value is always recomputed here
    /// from the submitted metrics, never taken from the client.
    pub async fn insert(&self, submission: &ScoreSubmission) -> Result<ScoreRecord> {
        let level = submission.level.unwrap_or(1);
        let score = ScoreEngine::compute(
            submission.won,
            submission.word_length,
            submission.mistakes,
            submission.duration_ms,
            submission.accuracy,
            level,
        );

        let model = scores::ActiveModel {
            player: sea_orm::ActiveValue::Set(truncate(&submission.player, MAX_TEXT_LEN)),
            won: sea_orm::ActiveValue::Set(submission.won),
            word: sea_orm::ActiveValue::Set(
                submission.word.as_deref().map(|w| truncate(w, MAX_TEXT_LEN)),
            ),
            word_length: sea_orm::ActiveValue::Set(submission.word_length),
            mistakes: sea_orm::ActiveValue::Set(submission.mistakes),
            correct: sea_orm::ActiveValue::Set(submission.correct),
            accuracy: sea_orm::ActiveValue::Set(submission.accuracy),
            duration_ms: sea_orm::ActiveValue::Set(submission.duration_ms),
            score: sea_orm::ActiveValue::Set(score),
            created_at: sea_orm::ActiveValue::Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        let saved = Scores::insert(model).exec(&self.db).await?;

        let created = Scores::find_by_id(saved.last_insert_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Failed to retrieve inserted score"))?;

        Ok(Self::model_to_record(created))
    }

    /// Top scores ordered by score descending, ties broken by most recent.
    pub async fn top_scores(&self, limit: Option<u64>) -> Result<Vec<ScoreRecord>> {
        let limit = clamp_limit(limit, DEFAULT_LEADERBOARD_LIMIT);

        let models = Scores::find()
            .order_by_desc(scores::Column::Score)
            .order_by_desc(scores::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Self::model_to_record).collect())
    }

    /// A player's recent scores, newest first. Exact match on the name as
    /// submitted.
    pub async fn scores_by_player(
        &self,
        player: &str,
        limit: Option<u64>,
    ) -> Result<Vec<ScoreRecord>> {
        let limit = clamp_limit(limit, DEFAULT_HISTORY_LIMIT);

        let models = Scores::find()
            .filter(scores::Column::Player.eq(player))
            .order_by_desc(scores::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Self::model_to_record).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::connect_to_memory_database;
    use migration::{Migrator, MigratorTrait};

    async fn setup_test_db() -> ScoreRepository {
        let db = connect_to_memory_database().await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        ScoreRepository::new(db)
    }

    fn submission(player: &str, won: bool, mistakes: i32) -> ScoreSubmission {
        ScoreSubmission {
            player: player.to_string(),
            won,
            word: Some("TIGER".to_string()),
            word_length: 5,
            mistakes,
            correct: 5,
            accuracy: 100.0,
            duration_ms: 10_000,
            level: Some(1),
        }
    }

    #[tokio::test]
    async fn test_insert_computes_score_server_side() {
        let repo = setup_test_db().await;

        let record = repo.insert(&submission("Alice", true, 0)).await.unwrap();

        // 100 + 40 + 50 + 100 - 10 - 0 = 280
        assert_eq!(record.score, 280);
        assert_eq!(record.player, "Alice");
        assert!(record.won);
        assert_eq!(record.word.as_deref(), Some("TIGER"));
        assert!(!record.created_at.is_empty());
    }

    #[tokio::test]
    async fn test_insert_truncates_long_names() {
        let repo = setup_test_db().await;

        let long_name = "x".repeat(200);
        let record = repo
            .insert(&submission(&long_name, false, 2))
            .await
            .unwrap();

        assert_eq!(record.player.chars().count(), 64);
    }

    #[tokio::test]
    async fn test_top_scores_ordering() {
        let repo = setup_test_db().await;

        // Different mistake counts give distinct scores.
        repo.insert(&submission("low", true, 10)).await.unwrap();
        repo.insert(&submission("high", true, 0)).await.unwrap();
        repo.insert(&submission("mid", true, 5)).await.unwrap();

        let top = repo.top_scores(Some(10)).await.unwrap();
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].player, "high");
        assert_eq!(top[1].player, "mid");
        assert_eq!(top[2].player, "low");
        assert!(top[0].score >= top[1].score && top[1].score >= top[2].score);
    }

    #[tokio::test]
    async fn test_top_scores_ties_break_newest_first() {
        let repo = setup_test_db().await;

        repo.insert(&submission("older", true, 0)).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        repo.insert(&submission("newer", true, 0)).await.unwrap();

        let top = repo.top_scores(Some(10)).await.unwrap();
        assert_eq!(top[0].player, "newer");
        assert_eq!(top[1].player, "older");
        assert_eq!(top[0].score, top[1].score);
    }

    #[tokio::test]
    async fn test_top_scores_limit_clamped() {
        let repo = setup_test_db().await;

        for i in 0..5 {
            repo.insert(&submission(&format!("p{}", i), true, i)).await.unwrap();
        }

        let top = repo.top_scores(Some(3)).await.unwrap();
        assert_eq!(top.len(), 3);

        // A zero limit still returns at least one record.
        let top = repo.top_scores(Some(0)).await.unwrap();
        assert_eq!(top.len(), 1);
    }

    #[tokio::test]
    async fn test_scores_by_player_is_exact_and_recent_first() {
        let repo = setup_test_db().await;

        repo.insert(&submission("Alice", false, 3)).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        repo.insert(&submission("Alice", true, 0)).await.unwrap();
        repo.insert(&submission("alice", true, 0)).await.unwrap();
        repo.insert(&submission("Bob", true, 0)).await.unwrap();

        let history = repo.scores_by_player("Alice", None).await.unwrap();
        assert_eq!(history.len(), 2);
        assert!(history[0].won);
        assert!(!history[1].won);

        let other = repo.scores_by_player("Charlie", None).await.unwrap();
        assert!(other.is_empty());
    }
}
