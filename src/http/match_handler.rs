use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::api_error::ApiError;
use crate::http::identity::ActorId;
use crate::service::match_service::MatchService;

/// Application state shared by the match routes.
pub struct AppState {
    pub match_service: Arc<MatchService>,
}

/// POST /api/matches/from-ai/{aiMatchId}
/// Materialize a match from an AI-planned proposal (organizer only).
pub async fn create_match_from_ai(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    actor: ActorId,
) -> Result<impl Responder, ApiError> {
    let proposal_id = path.into_inner();

    info!(proposal_id = %proposal_id, actor = %actor.0, "Received create match request");

    let result = state
        .match_service
        .create_from_proposal(proposal_id, actor.0)
        .await?;

    Ok(HttpResponse::Created().json(result))
}

/// POST /api/matches/{matchId}/start
/// Start a ready match (transition to in_progress).
pub async fn start_match(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    actor: ActorId,
) -> Result<impl Responder, ApiError> {
    let match_id = path.into_inner();

    info!(match_id = %match_id, actor = %actor.0, "Received start match request");

    let result = state.match_service.start(match_id, actor.0).await?;

    Ok(HttpResponse::Ok().json(result))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScoreRequest {
    #[validate(range(min = 0))]
    pub team1_score: i32,
    #[validate(range(min = 0))]
    pub team2_score: i32,
}

/// PATCH /api/matches/{matchId}/score
/// Replace both scores on an in-progress match; completes it when the win
/// rule is satisfied.
pub async fn update_score(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateScoreRequest>,
    actor: ActorId,
) -> Result<impl Responder, ApiError> {
    let match_id = path.into_inner();

    req.validate()
        .map_err(|e| ApiError::ValidationError(e.to_string()))?;

    info!(
        match_id = %match_id,
        team1_score = req.team1_score,
        team2_score = req.team2_score,
        actor = %actor.0,
        "Received score update request"
    );

    let result = state
        .match_service
        .update_score(match_id, req.team1_score, req.team2_score, actor.0)
        .await?;

    Ok(HttpResponse::Ok().json(result))
}

/// Configure match lifecycle routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/matches")
            .route("/from-ai/{aiMatchId}", web::post().to(create_match_from_ai))
            .route("/{matchId}/start", web::post().to(start_match))
            .route("/{matchId}/score", web::patch().to(update_score)),
    );
}
