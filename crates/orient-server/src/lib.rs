//! Orient server library (used by the `orient` binary and integration tests).
//!
//! - [`gateway`] - axum router, handlers and shared state
//! - [`judge`] - optional LLM relevance judge with guaranteed fallback
//! - [`translate`] - best-effort localization of display fields
//! - [`audit`] - file-backed audit event log
//! - [`careers`] - static career-path data

pub mod audit;
pub mod careers;
pub mod gateway;
pub mod judge;
pub mod translate;

pub use gateway::{HandlerState, create_router_with_state};
