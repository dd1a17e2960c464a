//! Application layer wiring DTOs, shared state and services.

pub mod dtos;
pub mod services;
pub mod state;

pub use dtos::{
    AnalyzeRequest, AnswerRequest, IndexRequest, Preferences, SearchRequest, SimilarityRequest,
    TransformRequest,
};
pub use services::{ActionInput, ActionKind, ActionService, Dispatch, HealthMonitor};
pub use state::AppState;
