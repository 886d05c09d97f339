//! In-memory `MatchStore` used by the engine and permission tests. Failure
//! flags let tests inject gateway errors; counters let them assert which
//! lookups were (not) issued.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::models::ai_match::AiGeneratedMatch;
use crate::models::match_model::{Match, MatchChanges, MatchStatus, MatchWithRelations, NewMatch};
use crate::models::tournament::{Team, TeamMember, Tournament};
use crate::store::{MatchStore, StoreError};

#[derive(Default)]
struct State {
    proposals: HashMap<Uuid, AiGeneratedMatch>,
    tournaments: HashMap<Uuid, Tournament>,
    teams: Vec<Team>,
    members: Vec<TeamMember>,
    matches: HashMap<Uuid, Match>,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    pub match_reads: AtomicUsize,
    pub team_list_calls: AtomicUsize,
    pub fail_team_query: AtomicBool,
    pub fail_membership_query: AtomicBool,
    pub fail_mark_proposal: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_tournament(&self, name: &str, organizer_id: Uuid) -> Uuid {
        let id = Uuid::new_v4();
        self.state.lock().unwrap().tournaments.insert(
            id,
            Tournament {
                id,
                name: name.to_string(),
                organizer_id,
                created_at: Utc::now(),
            },
        );
        id
    }

    pub fn add_team(&self, tournament_id: Uuid, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.state.lock().unwrap().teams.push(Team {
            id,
            tournament_id,
            name: name.to_string(),
            created_at: Utc::now(),
        });
        id
    }

    pub fn add_member(&self, team_id: Uuid, user_id: Uuid) {
        self.state.lock().unwrap().members.push(TeamMember {
            id: Uuid::new_v4(),
            team_id,
            user_id,
            created_at: Utc::now(),
        });
    }

    pub fn add_proposal(&self, proposal: AiGeneratedMatch) -> Uuid {
        let id = proposal.id;
        self.state.lock().unwrap().proposals.insert(id, proposal);
        id
    }

    pub fn add_match(&self, record: Match) -> Uuid {
        let id = record.id;
        self.state.lock().unwrap().matches.insert(id, record);
        id
    }

    pub fn proposal_status(&self, id: Uuid) -> Option<crate::models::ai_match::ProposalStatus> {
        self.state.lock().unwrap().proposals.get(&id).map(|p| p.status)
    }

    pub fn stored_match(&self, id: Uuid) -> Option<Match> {
        self.state.lock().unwrap().matches.get(&id).cloned()
    }

    fn relations_for(&self, state: &State, record: Match) -> Result<MatchWithRelations, StoreError> {
        let tournament = state
            .tournaments
            .get(&record.tournament_id)
            .cloned()
            .ok_or(StoreError::NotFound)?;
        let team_a = state
            .teams
            .iter()
            .find(|t| t.id == record.team_a_id)
            .cloned()
            .ok_or(StoreError::NotFound)?;
        let team_b = state
            .teams
            .iter()
            .find(|t| t.id == record.team_b_id)
            .cloned()
            .ok_or(StoreError::NotFound)?;

        Ok(MatchWithRelations {
            record,
            tournament,
            team_a,
            team_b,
        })
    }
}

#[async_trait]
impl MatchStore for MemoryStore {
    async fn get_proposal(&self, id: Uuid) -> Result<Option<AiGeneratedMatch>, StoreError> {
        Ok(self.state.lock().unwrap().proposals.get(&id).cloned())
    }

    async fn mark_proposal_completed(&self, id: Uuid) -> Result<(), StoreError> {
        if self.fail_mark_proposal.load(Ordering::SeqCst) {
            return Err(StoreError::Query("injected proposal update failure".into()));
        }
        let mut state = self.state.lock().unwrap();
        let proposal = state.proposals.get_mut(&id).ok_or(StoreError::NotFound)?;
        proposal.status = crate::models::ai_match::ProposalStatus::Completed;
        Ok(())
    }

    async fn get_tournament(&self, id: Uuid) -> Result<Option<Tournament>, StoreError> {
        Ok(self.state.lock().unwrap().tournaments.get(&id).cloned())
    }

    async fn get_match_with_relations(
        &self,
        id: Uuid,
    ) -> Result<Option<MatchWithRelations>, StoreError> {
        self.match_reads.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock().unwrap();
        match state.matches.get(&id).cloned() {
            Some(record) => Ok(Some(self.relations_for(&state, record)?)),
            None => Ok(None),
        }
    }

    async fn insert_match(&self, new_match: NewMatch) -> Result<MatchWithRelations, StoreError> {
        let now = Utc::now();
        let record = Match {
            id: Uuid::new_v4(),
            tournament_id: new_match.tournament_id,
            team_a_id: new_match.team_a_id,
            team_b_id: new_match.team_b_id,
            source_ai_match_id: new_match.source_ai_match_id,
            created_from_ai: new_match.created_from_ai,
            status: new_match.status,
            team_a_score: 0,
            team_b_score: 0,
            current_set: 1,
            current_set_score: serde_json::json!({"team_a": 0, "team_b": 0}),
            sets_data: serde_json::json!([]),
            court_number: new_match.court_number,
            schedule_time: new_match.schedule_time,
            phase: new_match.phase,
            round_number: new_match.round_number,
            match_number_in_round: new_match.match_number_in_round,
            metadata: new_match.metadata,
            created_by: new_match.created_by,
            last_modified_by: new_match.created_by,
            actual_start_time: None,
            actual_end_time: None,
            created_at: now,
            updated_at: now,
        };

        let mut state = self.state.lock().unwrap();
        state.matches.insert(record.id, record.clone());
        self.relations_for(&state, record)
    }

    async fn update_match(
        &self,
        id: Uuid,
        expected_status: MatchStatus,
        changes: MatchChanges,
    ) -> Result<Option<Match>, StoreError> {
        let mut state = self.state.lock().unwrap();
        let record = match state.matches.get_mut(&id) {
            Some(record) if record.status == expected_status => record,
            _ => return Ok(None),
        };

        if let Some(status) = changes.status {
            record.status = status;
        }
        if let Some(score) = changes.team_a_score {
            record.team_a_score = score;
        }
        if let Some(score) = changes.team_b_score {
            record.team_b_score = score;
        }
        if let Some(start) = changes.actual_start_time {
            record.actual_start_time = Some(start);
        }
        if let Some(end) = changes.actual_end_time {
            record.actual_end_time = Some(end);
        }
        if let Some(actor) = changes.last_modified_by {
            record.last_modified_by = actor;
        }
        record.updated_at = Utc::now();

        Ok(Some(record.clone()))
    }

    async fn list_team_ids(&self, tournament_id: Uuid) -> Result<Vec<Uuid>, StoreError> {
        self.team_list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_team_query.load(Ordering::SeqCst) {
            return Err(StoreError::Query("injected team query failure".into()));
        }
        Ok(self
            .state
            .lock()
            .unwrap()
            .teams
            .iter()
            .filter(|t| t.tournament_id == tournament_id)
            .map(|t| t.id)
            .collect())
    }

    async fn membership_exists(
        &self,
        user_id: Uuid,
        team_ids: &[Uuid],
    ) -> Result<bool, StoreError> {
        if self.fail_membership_query.load(Ordering::SeqCst) {
            return Err(StoreError::Query("injected membership query failure".into()));
        }
        Ok(self
            .state
            .lock()
            .unwrap()
            .members
            .iter()
            .any(|m| m.user_id == user_id && team_ids.contains(&m.team_id)))
    }
}
