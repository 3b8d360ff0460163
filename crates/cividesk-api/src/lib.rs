//! # cividesk-api
//!
//! HTTP API layer for the CiviDesk auth subsystem.
//!
//! Record collaborators consume the protected-route contract exported
//! here: the [`extractors::AuthAccount`] extractor produces a verified
//! principal, and the [`middleware::guard`] helpers evaluate the role ×
//! verb matrix, admin requirements, and the per-entity ownership check.

pub mod cookies;
pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
