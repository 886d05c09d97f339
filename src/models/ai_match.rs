use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// AI proposal status. `completed` means the proposal has been consumed by
/// match creation; a proposal is never un-consumed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "ai_match_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    Pending,
    Completed,
}

/// An AI-planned candidate match awaiting organizer confirmation.
///
/// `tournament_id` comes from the join with the proposal's planning row; the
/// proposal itself only stores `planning_id`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AiGeneratedMatch {
    pub id: Uuid,
    pub planning_id: Uuid,
    /// Planner-assigned string id, e.g. `poule1_match_3`.
    pub ai_match_id: String,
    pub status: ProposalStatus,
    pub resolved_team_a_id: Option<Uuid>,
    pub resolved_team_b_id: Option<Uuid>,
    /// Display names as the planner knew them, before team resolution.
    pub team_a_name: String,
    pub team_b_name: String,
    pub phase: Option<String>,
    pub round_number: Option<i32>,
    pub court_number: Option<i32>,
    pub schedule_time: Option<DateTime<Utc>>,
    pub poule_id: Option<String>,
    pub tournament_id: Uuid,
}

impl AiGeneratedMatch {
    /// Position of the match in its round, derived from the trailing
    /// `_<n>` segment of the planner id. Defaults to 1 when the id does not
    /// carry a numeric suffix.
    pub fn match_number_in_round(&self) -> i32 {
        self.ai_match_id
            .rsplit('_')
            .next()
            .and_then(|tail| tail.parse().ok())
            .unwrap_or(1)
    }
}
