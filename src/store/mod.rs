use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::ai_match::AiGeneratedMatch;
use crate::models::match_model::{Match, MatchChanges, MatchStatus, MatchWithRelations, NewMatch};
use crate::models::tournament::Tournament;

pub mod postgres;

#[cfg(test)]
pub mod memory;

/// Gateway failure. "Row absent" and "query failed" are distinct variants so
/// callers never have to pattern-match driver error codes to tell them apart.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("query failed: {0}")]
    Query(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            other => StoreError::Query(other.to_string()),
        }
    }
}

/// Persistence gateway consumed by the lifecycle engine and the permission
/// evaluator. Point lookups return `Ok(None)` when the record is absent;
/// `StoreError::NotFound` is reserved for rows that must exist (vanished
/// relations, update targets).
#[async_trait]
pub trait MatchStore: Send + Sync {
    /// Fetch an AI proposal by id, joined with its planning row so the
    /// owning tournament id comes along.
    async fn get_proposal(&self, id: Uuid) -> Result<Option<AiGeneratedMatch>, StoreError>;

    /// Flip a consumed proposal to `completed`. One-way, never reversed.
    async fn mark_proposal_completed(&self, id: Uuid) -> Result<(), StoreError>;

    async fn get_tournament(&self, id: Uuid) -> Result<Option<Tournament>, StoreError>;

    async fn get_match_with_relations(
        &self,
        id: Uuid,
    ) -> Result<Option<MatchWithRelations>, StoreError>;

    async fn insert_match(&self, new_match: NewMatch) -> Result<MatchWithRelations, StoreError>;

    /// Status-guarded conditional update: applies `changes` only while the
    /// match status still equals `expected_status`. Returns `Ok(None)` when
    /// the guard missed (row gone or status moved concurrently).
    async fn update_match(
        &self,
        id: Uuid,
        expected_status: MatchStatus,
        changes: MatchChanges,
    ) -> Result<Option<Match>, StoreError>;

    /// Ids of all teams registered for a tournament.
    async fn list_team_ids(&self, tournament_id: Uuid) -> Result<Vec<Uuid>, StoreError>;

    /// Whether `user_id` is a member of any of `team_ids`. No membership row
    /// is `Ok(false)`, not an error.
    async fn membership_exists(&self, user_id: Uuid, team_ids: &[Uuid])
        -> Result<bool, StoreError>;
}
