use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::tournament::{Team, Tournament};

/// Match lifecycle status - a forward-only state machine.
///
/// `ready` is reached by external readiness logic (team confirmations, court
/// assignment); this service only consumes it as the precondition for
/// starting a match.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "match_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Scheduled,
    Ready,
    InProgress,
    Completed,
}

impl MatchStatus {
    /// Check if transition to another state is valid
    pub fn can_transition_to(&self, to: &MatchStatus) -> bool {
        matches!(
            (self, to),
            (MatchStatus::Scheduled, MatchStatus::Ready)
                | (MatchStatus::Ready, MatchStatus::InProgress)
                | (MatchStatus::InProgress, MatchStatus::Completed)
        )
    }

    /// Check if state is terminal
    pub fn is_terminal(&self) -> bool {
        matches!(self, MatchStatus::Completed)
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchStatus::Scheduled => write!(f, "scheduled"),
            MatchStatus::Ready => write!(f, "ready"),
            MatchStatus::InProgress => write!(f, "in_progress"),
            MatchStatus::Completed => write!(f, "completed"),
        }
    }
}

/// Core match entity.
///
/// `current_set`, `current_set_score` and `sets_data` are reserved for a
/// set-based scoring extension; no lifecycle operation reads them, they are
/// carried as opaque JSON.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Match {
    pub id: Uuid,
    pub tournament_id: Uuid,
    pub team_a_id: Uuid,
    pub team_b_id: Uuid,
    pub source_ai_match_id: Option<Uuid>,
    pub created_from_ai: bool,
    pub status: MatchStatus,
    pub team_a_score: i32,
    pub team_b_score: i32,
    pub current_set: i32,
    pub current_set_score: serde_json::Value,
    pub sets_data: serde_json::Value,
    pub court_number: Option<i32>,
    pub schedule_time: Option<DateTime<Utc>>,
    pub phase: Option<String>,
    pub round_number: i32,
    pub match_number_in_round: i32,
    pub metadata: serde_json::Value,
    pub created_by: Uuid,
    pub last_modified_by: Uuid,
    pub actual_start_time: Option<DateTime<Utc>>,
    pub actual_end_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Match together with its tournament and team relations, the shape every
/// lifecycle operation returns to the HTTP layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchWithRelations {
    #[serde(flatten)]
    pub record: Match,
    pub tournament: Tournament,
    pub team_a: Team,
    pub team_b: Team,
}

/// Insert payload for a match materialized from an AI proposal.
#[derive(Debug, Clone)]
pub struct NewMatch {
    pub tournament_id: Uuid,
    pub team_a_id: Uuid,
    pub team_b_id: Uuid,
    pub source_ai_match_id: Option<Uuid>,
    pub created_from_ai: bool,
    pub status: MatchStatus,
    pub court_number: Option<i32>,
    pub schedule_time: Option<DateTime<Utc>>,
    pub phase: Option<String>,
    pub round_number: i32,
    pub match_number_in_round: i32,
    pub metadata: serde_json::Value,
    pub created_by: Uuid,
}

/// Partial update applied through the status-guarded conditional update.
/// `None` fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct MatchChanges {
    pub status: Option<MatchStatus>,
    pub team_a_score: Option<i32>,
    pub team_b_score: Option<i32>,
    pub actual_start_time: Option<DateTime<Utc>>,
    pub actual_end_time: Option<DateTime<Utc>>,
    pub last_modified_by: Option<Uuid>,
}
