// Service layer
pub mod match_service;
pub mod permission_service;


pub use match_service::{MatchError, MatchService};
pub use permission_service::PermissionService;
