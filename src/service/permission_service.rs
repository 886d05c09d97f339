use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::models::match_model::MatchWithRelations;
use crate::service::match_service::MatchError;
use crate::store::MatchStore;

/// Decides whether an actor may mutate a given match. The tournament
/// organizer has blanket rights; anyone else must belong to a team
/// registered for the match's tournament.
pub struct PermissionService {
    store: Arc<dyn MatchStore>,
}

impl PermissionService {
    pub fn new(store: Arc<dyn MatchStore>) -> Self {
        Self { store }
    }

    pub async fn authorize(
        &self,
        actor: Uuid,
        record: &MatchWithRelations,
    ) -> Result<(), MatchError> {
        if record.tournament.organizer_id == actor {
            debug!(actor = %actor, match_id = %record.record.id, "Authorized as organizer");
            return Ok(());
        }

        let team_ids = self
            .store
            .list_team_ids(record.record.tournament_id)
            .await
            .map_err(|e| MatchError::QueryFailed(format!("error fetching teams: {}", e)))?;

        if team_ids.is_empty() {
            return Err(MatchError::NoTeams);
        }

        let is_member = self
            .store
            .membership_exists(actor, &team_ids)
            .await
            .map_err(|e| MatchError::QueryFailed(format!("error checking membership: {}", e)))?;

        if !is_member {
            return Err(MatchError::Unauthorized);
        }

        debug!(actor = %actor, match_id = %record.record.id, "Authorized as team member");
        Ok(())
    }
}
