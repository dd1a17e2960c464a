//! Domain layer: request/response shapes and error types for the triad API.

pub mod errors;
pub mod models;

pub use errors::{ApiError, ClientError};
pub use models::{
    AnswerResult, DomainList, DomainTag, HttpMethod, IndexResult, MetadataFlags, SearchHit,
    SearchResult, SimilarityResult, TransformResult, Triad, TriadTarget,
};
