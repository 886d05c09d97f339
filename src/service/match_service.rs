use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::ai_match::ProposalStatus;
use crate::models::match_model::{
    Match, MatchChanges, MatchStatus, MatchWithRelations, NewMatch,
};
use crate::service::permission_service::PermissionService;
use crate::store::{MatchStore, StoreError};

pub const MIN_WIN_SCORE: i32 = 25;
pub const MIN_LEAD_TO_WIN: i32 = 2;

/// Single-set win rule: a side wins at 25+ points with a lead of at least 2.
/// Multi-set matches are not modelled; the set-tracking fields on `Match`
/// pass through untouched.
pub fn is_match_finished(team_a_score: i32, team_b_score: i32) -> bool {
    (team_a_score >= MIN_WIN_SCORE && team_a_score - team_b_score >= MIN_LEAD_TO_WIN)
        || (team_b_score >= MIN_WIN_SCORE && team_b_score - team_a_score >= MIN_LEAD_TO_WIN)
}

/// Failure taxonomy of the lifecycle operations. Every variant is a
/// recoverable, caller-visible failure; nothing here is fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("ai generated match is already completed")]
    AlreadyCompleted,

    #[error("teams are not resolved yet")]
    TeamsUnresolved,

    #[error("match is {actual}, expected {expected}")]
    InvalidState {
        expected: MatchStatus,
        actual: MatchStatus,
    },

    #[error("scores cannot be negative")]
    InvalidInput,

    #[error("actor is not allowed to modify this match")]
    Unauthorized,

    #[error("no teams found in tournament")]
    NoTeams,

    #[error("query failed: {0}")]
    QueryFailed(String),
}

impl From<StoreError> for MatchError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => MatchError::NotFound("match"),
            StoreError::Query(message) => MatchError::QueryFailed(message),
        }
    }
}

/// Match Lifecycle Engine: validates preconditions, applies transitions and
/// computes derived fields. Holds no state between calls; every operation is
/// an independent read-check-write sequence against the gateway.
pub struct MatchService {
    store: Arc<dyn MatchStore>,
    permissions: PermissionService,
}

impl MatchService {
    pub fn new(store: Arc<dyn MatchStore>) -> Self {
        let permissions = PermissionService::new(store.clone());
        Self { store, permissions }
    }

    /// Materialize a match from an AI-planned proposal. Only the tournament
    /// organizer may do this: at creation time no team is involved yet, so
    /// the membership path of the permission evaluator does not apply.
    pub async fn create_from_proposal(
        &self,
        proposal_id: Uuid,
        actor: Uuid,
    ) -> Result<MatchWithRelations, MatchError> {
        let proposal = self
            .store
            .get_proposal(proposal_id)
            .await
            .map_err(|e| MatchError::QueryFailed(e.to_string()))?
            .ok_or(MatchError::NotFound("ai generated match"))?;

        if proposal.status == ProposalStatus::Completed {
            return Err(MatchError::AlreadyCompleted);
        }

        let (team_a_id, team_b_id) = match (proposal.resolved_team_a_id, proposal.resolved_team_b_id)
        {
            (Some(a), Some(b)) => (a, b),
            _ => return Err(MatchError::TeamsUnresolved),
        };

        let tournament = self
            .store
            .get_tournament(proposal.tournament_id)
            .await
            .map_err(|e| MatchError::QueryFailed(e.to_string()))?;
        match tournament {
            Some(t) if t.organizer_id == actor => {}
            _ => return Err(MatchError::Unauthorized),
        }

        info!(
            proposal_id = %proposal_id,
            tournament_id = %proposal.tournament_id,
            actor = %actor,
            "Creating match from AI proposal"
        );

        let new_match = NewMatch {
            tournament_id: proposal.tournament_id,
            team_a_id,
            team_b_id,
            source_ai_match_id: Some(proposal.id),
            created_from_ai: true,
            status: MatchStatus::Scheduled,
            court_number: proposal.court_number,
            schedule_time: proposal.schedule_time,
            phase: proposal.phase.clone(),
            round_number: proposal.round_number.unwrap_or(1),
            match_number_in_round: proposal.match_number_in_round(),
            metadata: serde_json::json!({
                "ai_match_id": proposal.ai_match_id,
                "poule_id": proposal.poule_id,
                "original_team_names": {
                    "team_a": proposal.team_a_name,
                    "team_b": proposal.team_b_name,
                },
            }),
            created_by: actor,
        };

        let created = self.store.insert_match(new_match).await?;

        // Best-effort consumption of the proposal: the match already exists,
        // so a failure here is logged for reconciliation, not propagated.
        if let Err(e) = self.store.mark_proposal_completed(proposal_id).await {
            warn!(
                proposal_id = %proposal_id,
                match_id = %created.record.id,
                error = %e,
                "Match created but proposal could not be marked completed"
            );
        }

        info!(match_id = %created.record.id, "Match created from proposal");
        Ok(created)
    }

    /// Start a match (`ready` -> `in_progress`), stamping the actual start
    /// time exactly once.
    pub async fn start(&self, match_id: Uuid, actor: Uuid) -> Result<MatchWithRelations, MatchError> {
        let current = self.fetch_match(match_id).await?;
        self.require_status(&current.record, MatchStatus::Ready)?;
        self.permissions.authorize(actor, &current).await?;

        info!(match_id = %match_id, actor = %actor, "Starting match");

        let changes = MatchChanges {
            status: Some(MatchStatus::InProgress),
            actual_start_time: Some(Utc::now()),
            last_modified_by: Some(actor),
            ..MatchChanges::default()
        };
        let updated = self
            .apply_guarded(match_id, MatchStatus::Ready, changes)
            .await?;

        Ok(MatchWithRelations {
            record: updated,
            ..current
        })
    }

    /// Replace both scores on an `in_progress` match. When the new scores
    /// satisfy the win rule the match is completed and the actual end time
    /// stamped in the same write.
    pub async fn update_score(
        &self,
        match_id: Uuid,
        team_a_score: i32,
        team_b_score: i32,
        actor: Uuid,
    ) -> Result<MatchWithRelations, MatchError> {
        // Checked before any gateway access.
        if team_a_score < 0 || team_b_score < 0 {
            return Err(MatchError::InvalidInput);
        }

        let current = self.fetch_match(match_id).await?;
        self.require_status(&current.record, MatchStatus::InProgress)?;
        self.permissions.authorize(actor, &current).await?;

        let finished = is_match_finished(team_a_score, team_b_score);

        info!(
            match_id = %match_id,
            team_a_score,
            team_b_score,
            finished,
            "Updating match score"
        );

        let changes = MatchChanges {
            team_a_score: Some(team_a_score),
            team_b_score: Some(team_b_score),
            status: finished.then_some(MatchStatus::Completed),
            actual_end_time: finished.then(Utc::now),
            last_modified_by: Some(actor),
            ..MatchChanges::default()
        };
        let updated = self
            .apply_guarded(match_id, MatchStatus::InProgress, changes)
            .await?;

        if finished {
            info!(match_id = %match_id, "Match completed");
        }

        Ok(MatchWithRelations {
            record: updated,
            ..current
        })
    }

    async fn fetch_match(&self, match_id: Uuid) -> Result<MatchWithRelations, MatchError> {
        self.store
            .get_match_with_relations(match_id)
            .await
            .map_err(|e| MatchError::QueryFailed(e.to_string()))?
            .ok_or(MatchError::NotFound("match"))
    }

    fn require_status(&self, record: &Match, expected: MatchStatus) -> Result<(), MatchError> {
        if record.status != expected {
            return Err(MatchError::InvalidState {
                expected,
                actual: record.status,
            });
        }
        Ok(())
    }

    /// Run the status-guarded conditional update. A guard miss means the
    /// match changed between our read and this write; re-fetch to report
    /// what it looks like now, the same way a failed precondition does.
    async fn apply_guarded(
        &self,
        match_id: Uuid,
        expected: MatchStatus,
        changes: MatchChanges,
    ) -> Result<Match, MatchError> {
        match self.store.update_match(match_id, expected, changes).await? {
            Some(updated) => Ok(updated),
            None => {
                let actual = self.fetch_match(match_id).await?.record.status;
                Err(MatchError::InvalidState { expected, actual })
            }
        }
    }
}
