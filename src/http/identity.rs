use std::future::{ready, Ready};

use actix_web::{dev::Payload, FromRequest, HttpRequest};
use uuid::Uuid;

use crate::api_error::ApiError;

pub const ACTOR_ID_HEADER: &str = "x-actor-id";

/// Authenticated actor identity, forwarded by the gateway in front of this
/// service. Authentication itself happens upstream; the engine treats this
/// id as already verified.
#[derive(Debug, Clone, Copy)]
pub struct ActorId(pub Uuid);

impl FromRequest for ActorId {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let actor = req
            .headers()
            .get(ACTOR_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value).ok());

        ready(match actor {
            Some(id) => Ok(ActorId(id)),
            None => Err(ApiError::Unauthorized),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_extracts_actor_from_header() {
        let id = Uuid::new_v4();
        let req = TestRequest::default()
            .insert_header((ACTOR_ID_HEADER, id.to_string()))
            .to_http_request();

        let actor = ActorId::extract(&req).await.unwrap();
        assert_eq!(actor.0, id);
    }

    #[actix_web::test]
    async fn test_rejects_missing_header() {
        let req = TestRequest::default().to_http_request();
        assert!(ActorId::extract(&req).await.is_err());
    }

    #[actix_web::test]
    async fn test_rejects_malformed_id() {
        let req = TestRequest::default()
            .insert_header((ACTOR_ID_HEADER, "not-a-uuid"))
            .to_http_request();
        assert!(ActorId::extract(&req).await.is_err());
    }
}
