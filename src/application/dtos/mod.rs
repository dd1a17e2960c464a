use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{DomainTag, TriadTarget};

/// Body of `POST /transform`. Encoding sends the same shape with equal domains.
#[derive(Debug, Clone, Serialize)]
pub struct TransformRequest {
    pub content: String,
    pub source_domain: DomainTag,
    pub target_domain: DomainTag,
}

impl TransformRequest {
    pub fn encode(content: impl Into<String>, domain: DomainTag) -> Self {
        Self {
            content: content.into(),
            source_domain: domain,
            target_domain: domain,
        }
    }
}

/// Body of `POST /similarity`.
#[derive(Debug, Clone, Serialize)]
pub struct SimilarityRequest {
    pub content1: String,
    pub content2: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<DomainTag>,
}

/// Body of `POST /unified/search`.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub k: usize,
    pub triad_target: TriadTarget,
}

/// Body of `POST /unified/answer`.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerRequest {
    pub query: String,
    pub k: usize,
    pub triad_target_mode: String,
}

/// Body of `POST /analyze`.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeRequest {
    pub content: String,
    pub domain: DomainTag,
}

/// Body of `POST /unified/index`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IndexRequest {
    pub texts: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadatas: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<String>>,
}

/// Persisted UI preference payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub dark_mode: bool,
}

pub const fn default_k() -> usize {
    5
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn transform_request_uses_canonical_field_names() {
        let body = serde_json::to_value(TransformRequest {
            content: "x".into(),
            source_domain: DomainTag::Text,
            target_domain: DomainTag::Code,
        })
        .unwrap();
        assert_eq!(
            body,
            json!({ "content": "x", "source_domain": "text", "target_domain": "code" })
        );
    }

    #[test]
    fn similarity_request_omits_missing_domain() {
        let body = serde_json::to_value(SimilarityRequest {
            content1: "a".into(),
            content2: "b".into(),
            domain: None,
        })
        .unwrap();
        assert!(body.get("domain").is_none());
    }

    #[test]
    fn search_request_serializes_auto_target() {
        let body = serde_json::to_value(SearchRequest {
            query: "q".into(),
            k: default_k(),
            triad_target: TriadTarget::Auto,
        })
        .unwrap();
        assert_eq!(body, json!({ "query": "q", "k": 5, "triad_target": "auto" }));
    }
}
