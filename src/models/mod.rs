// Core models
pub mod ai_match;
pub mod match_model;
pub mod tournament;

// Re-export commonly used types
pub use ai_match::*;
pub use match_model::*;
pub use tournament::*;
