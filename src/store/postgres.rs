use async_trait::async_trait;
use uuid::Uuid;

use crate::db::DbPool;
use crate::models::ai_match::AiGeneratedMatch;
use crate::models::match_model::{Match, MatchChanges, MatchStatus, MatchWithRelations, NewMatch};
use crate::models::tournament::{Team, Tournament};
use crate::store::{MatchStore, StoreError};

/// sqlx-backed gateway. Queries are runtime-checked so the crate builds
/// without a live database.
pub struct PgMatchStore {
    pool: DbPool,
}

impl PgMatchStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Load the tournament and both team rows for a match. These are FK
    /// targets, so an absent row is a `NotFound` gateway failure rather than
    /// an `Ok(None)`.
    async fn load_relations(&self, record: Match) -> Result<MatchWithRelations, StoreError> {
        let tournament = sqlx::query_as::<_, Tournament>("SELECT * FROM tournament WHERE id = $1")
            .bind(record.tournament_id)
            .fetch_one(&self.pool)
            .await?;

        let team_a = sqlx::query_as::<_, Team>("SELECT * FROM team WHERE id = $1")
            .bind(record.team_a_id)
            .fetch_one(&self.pool)
            .await?;

        let team_b = sqlx::query_as::<_, Team>("SELECT * FROM team WHERE id = $1")
            .bind(record.team_b_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(MatchWithRelations {
            record,
            tournament,
            team_a,
            team_b,
        })
    }
}

#[async_trait]
impl MatchStore for PgMatchStore {
    async fn get_proposal(&self, id: Uuid) -> Result<Option<AiGeneratedMatch>, StoreError> {
        let proposal = sqlx::query_as::<_, AiGeneratedMatch>(
            r#"
            SELECT p.*, pl.tournament_id
            FROM ai_generated_match p
            JOIN ai_tournament_planning pl ON pl.id = p.planning_id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(proposal)
    }

    async fn mark_proposal_completed(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE ai_generated_match SET status = 'completed' WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn get_tournament(&self, id: Uuid) -> Result<Option<Tournament>, StoreError> {
        let tournament = sqlx::query_as::<_, Tournament>("SELECT * FROM tournament WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(tournament)
    }

    async fn get_match_with_relations(
        &self,
        id: Uuid,
    ) -> Result<Option<MatchWithRelations>, StoreError> {
        let record = sqlx::query_as::<_, Match>(r#"SELECT * FROM "match" WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match record {
            Some(record) => Ok(Some(self.load_relations(record).await?)),
            None => Ok(None),
        }
    }

    async fn insert_match(&self, new_match: NewMatch) -> Result<MatchWithRelations, StoreError> {
        let record = sqlx::query_as::<_, Match>(
            r#"
            INSERT INTO "match" (
                tournament_id, team_a_id, team_b_id, source_ai_match_id,
                created_from_ai, status, team_a_score, team_b_score,
                current_set, current_set_score, sets_data,
                court_number, schedule_time, phase,
                round_number, match_number_in_round, metadata,
                created_by, last_modified_by
            ) VALUES (
                $1, $2, $3, $4, $5, $6, 0, 0,
                1, '{"team_a": 0, "team_b": 0}'::jsonb, '[]'::jsonb,
                $7, $8, $9, $10, $11, $12, $13, $13
            )
            RETURNING *
            "#,
        )
        .bind(new_match.tournament_id)
        .bind(new_match.team_a_id)
        .bind(new_match.team_b_id)
        .bind(new_match.source_ai_match_id)
        .bind(new_match.created_from_ai)
        .bind(new_match.status)
        .bind(new_match.court_number)
        .bind(new_match.schedule_time)
        .bind(new_match.phase)
        .bind(new_match.round_number)
        .bind(new_match.match_number_in_round)
        .bind(new_match.metadata)
        .bind(new_match.created_by)
        .fetch_one(&self.pool)
        .await?;

        self.load_relations(record).await
    }

    async fn update_match(
        &self,
        id: Uuid,
        expected_status: MatchStatus,
        changes: MatchChanges,
    ) -> Result<Option<Match>, StoreError> {
        let record = sqlx::query_as::<_, Match>(
            r#"
            UPDATE "match" SET
                status = COALESCE($3, status),
                team_a_score = COALESCE($4, team_a_score),
                team_b_score = COALESCE($5, team_b_score),
                actual_start_time = COALESCE($6, actual_start_time),
                actual_end_time = COALESCE($7, actual_end_time),
                last_modified_by = COALESCE($8, last_modified_by),
                updated_at = NOW()
            WHERE id = $1 AND status = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(expected_status)
        .bind(changes.status)
        .bind(changes.team_a_score)
        .bind(changes.team_b_score)
        .bind(changes.actual_start_time)
        .bind(changes.actual_end_time)
        .bind(changes.last_modified_by)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn list_team_ids(&self, tournament_id: Uuid) -> Result<Vec<Uuid>, StoreError> {
        let ids = sqlx::query_scalar::<_, Uuid>("SELECT id FROM team WHERE tournament_id = $1")
            .bind(tournament_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(ids)
    }

    async fn membership_exists(
        &self,
        user_id: Uuid,
        team_ids: &[Uuid],
    ) -> Result<bool, StoreError> {
        let row = sqlx::query_scalar::<_, i32>(
            "SELECT 1 FROM team_member WHERE user_id = $1 AND team_id = ANY($2) LIMIT 1",
        )
        .bind(user_id)
        .bind(team_ids.to_vec())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.is_some())
    }
}
