//! Facade over the triad API: one `call` primitive plus typed helpers.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::application::dtos::{
    AnalyzeRequest, AnswerRequest, IndexRequest, SearchRequest, SimilarityRequest,
    TransformRequest,
};
use crate::domain::{
    AnswerResult, ApiError, ClientError, DomainList, HttpMethod, IndexResult, SearchResult,
    SimilarityResult, TransformResult,
};

use super::{
    handle_response, HttpRequest, HttpTransport, UreqTransport, JSON_HEADERS, PROBE_TIMEOUT,
};

/// Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct ApiClient {
    base_url: Arc<str>,
    transport: Arc<dyn HttpTransport>,
}

impl ApiClient {
    /// Create a client for `base_url`. The URL is fixed for the client's lifetime.
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn HttpTransport>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: Arc::from(base_url.trim_end_matches('/')),
            transport,
        }
    }

    /// Client backed by a real `ureq` transport.
    pub fn with_ureq(base_url: impl Into<String>) -> Self {
        Self::new(base_url, Arc::new(UreqTransport::new()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a path-rooted endpoint.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}/{}", self.base_url, endpoint)
        }
    }

    /// Issue one request and return the decoded JSON body verbatim.
    ///
    /// Runs exactly once: no retry, no timeout beyond the transport default.
    pub async fn call(
        &self,
        endpoint: &str,
        method: HttpMethod,
        payload: Option<Value>,
    ) -> Result<Value, ApiError> {
        self.dispatch(endpoint, method, payload, None).await
    }

    async fn dispatch(
        &self,
        endpoint: &str,
        method: HttpMethod,
        payload: Option<Value>,
        timeout: Option<Duration>,
    ) -> Result<Value, ApiError> {
        let request = HttpRequest {
            method,
            url: self.endpoint_url(endpoint),
            headers: JSON_HEADERS.to_vec(),
            body: payload.map(|body| body.to_string()),
            timeout,
        };

        debug!(
            target: "triad_client::http",
            method = %request.method,
            url = %request.url,
            "issuing request"
        );

        let transport = Arc::clone(&self.transport);
        let url = request.url.clone();
        let outcome = tokio::task::spawn_blocking(move || transport.execute(&request))
            .await
            .map_err(|err| ApiError::transport(format!("request task failed: {}", err)))?;

        let result = match outcome {
            Ok(response) => handle_response(response),
            Err(err) => Err(ApiError::transport(err.0)),
        };

        if let Err(err) = &result {
            warn!(target: "triad_client::http", url = %url, error = %err, "request failed");
        }
        result
    }

    /// Serialize `body` and POST it. An unserializable body never reaches
    /// the transport.
    async fn post<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<Value, ClientError> {
        let payload = serde_json::to_value(body)
            .map_err(|err| ClientError::other(format!("failed to encode request: {}", err)))?;
        Ok(self.call(endpoint, HttpMethod::Post, Some(payload)).await?)
    }

    /// `GET /health` with a short probe timeout. Any 2xx counts as healthy.
    pub async fn health(&self) -> Result<Value, ApiError> {
        self.dispatch("/health", HttpMethod::Get, None, Some(PROBE_TIMEOUT))
            .await
    }

    pub async fn transform(
        &self,
        request: &TransformRequest,
    ) -> Result<TransformResult, ClientError> {
        let value = self.post("/transform", request).await?;
        Ok(TransformResult::from_json(&value))
    }

    pub async fn similarity(
        &self,
        request: &SimilarityRequest,
    ) -> Result<SimilarityResult, ClientError> {
        let value = self.post("/similarity", request).await?;
        Ok(SimilarityResult::from_json(&value))
    }

    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResult, ClientError> {
        let value = self.post("/unified/search", request).await?;
        Ok(SearchResult::from_json(&value))
    }

    pub async fn answer(&self, request: &AnswerRequest) -> Result<AnswerResult, ClientError> {
        let value = self.post("/unified/answer", request).await?;
        Ok(AnswerResult::from_json(&value))
    }

    pub async fn domains(&self) -> Result<DomainList, ClientError> {
        let value = self.call("/domains", HttpMethod::Get, None).await?;
        Ok(DomainList::from_json(&value))
    }

    pub async fn stats(&self) -> Result<Value, ClientError> {
        Ok(self.call("/stats", HttpMethod::Get, None).await?)
    }

    /// Symbolic analysis of one piece of content; returned verbatim.
    pub async fn analyze(&self, request: &AnalyzeRequest) -> Result<Value, ClientError> {
        self.post("/analyze", request).await
    }

    pub async fn unified_index(&self, request: &IndexRequest) -> Result<IndexResult, ClientError> {
        let value = self.post("/unified/index", request).await?;
        Ok(IndexResult::from_json(&value))
    }

    pub async fn unified_stats(&self) -> Result<Value, ClientError> {
        Ok(self.call("/unified/stats", HttpMethod::Get, None).await?)
    }
}
