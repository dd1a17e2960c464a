use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ClientError;

/// Content-type tag selecting how the backend interprets input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainTag {
    Text,
    Code,
    Geometry,
    Image,
}

impl DomainTag {
    pub const ALL: [DomainTag; 4] = [
        DomainTag::Text,
        DomainTag::Code,
        DomainTag::Geometry,
        DomainTag::Image,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DomainTag::Text => "text",
            DomainTag::Code => "code",
            DomainTag::Geometry => "geometry",
            DomainTag::Image => "image",
        }
    }
}

impl fmt::Display for DomainTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DomainTag {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(DomainTag::Text),
            "code" => Ok(DomainTag::Code),
            "geometry" => Ok(DomainTag::Geometry),
            "image" => Ok(DomainTag::Image),
            other => Err(ClientError::validation(format!("unknown domain '{}'", other))),
        }
    }
}

/// Search ranking target: a specific domain or backend-chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriadTarget {
    #[default]
    Auto,
    Domain(DomainTag),
}

impl TriadTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriadTarget::Auto => "auto",
            TriadTarget::Domain(tag) => tag.as_str(),
        }
    }
}

impl Serialize for TriadTarget {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl FromStr for TriadTarget {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("auto") {
            return Ok(TriadTarget::Auto);
        }
        trimmed.parse().map(TriadTarget::Domain)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three-component score vector (∆∞Θ).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Triad {
    pub delta: f64,
    pub infinity: f64,
    pub theta: f64,
}

impl Triad {
    pub fn new(delta: f64, infinity: f64, theta: f64) -> Self {
        Self {
            delta: clamp_unit(delta),
            infinity: clamp_unit(infinity),
            theta: clamp_unit(theta),
        }
    }

    /// Decode from either `{delta, infinity, theta}` or the hatted
    /// `{delta_hat, infty_hat, theta_hat}` form. Anything that is not an
    /// object yields `None`.
    pub fn from_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let component = |primary: &str, alias: &str| {
            object
                .get(primary)
                .or_else(|| object.get(alias))
                .and_then(Value::as_f64)
                .unwrap_or(0.0)
        };
        Some(Self::new(
            component("delta", "delta_hat"),
            component("infinity", "infty_hat"),
            component("theta", "theta_hat"),
        ))
    }
}

/// Flags the backend attaches to transform results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MetadataFlags {
    pub learned: bool,
    pub numtriad_used: bool,
}

impl MetadataFlags {
    fn from_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let flag = |key: &str| object.get(key).and_then(Value::as_bool).unwrap_or(false);
        Some(Self {
            learned: flag("learned"),
            numtriad_used: flag("numtriad_used"),
        })
    }
}

/// Response of `/transform`; also used for the encode action.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TransformResult {
    pub text: Option<String>,
    pub triad: Option<Triad>,
    pub embedding: Vec<f64>,
    pub content_type: Option<String>,
    pub domain: Option<String>,
    pub metadata: Option<MetadataFlags>,
}

impl TransformResult {
    pub fn from_json(value: &Value) -> Self {
        let embedding = value
            .get("embedding")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(|v| v.as_f64().unwrap_or(0.0)).collect())
            .unwrap_or_default();

        Self {
            text: string_field(value, "result").or_else(|| string_field(value, "transformed")),
            triad: value.get("triad").and_then(Triad::from_json),
            embedding,
            content_type: string_field(value, "content_type"),
            domain: string_field(value, "domain"),
            metadata: value.get("metadata").and_then(MetadataFlags::from_json),
        }
    }

    pub fn has_embedding(&self) -> bool {
        !self.embedding.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SimilarityResult {
    pub similarity: f64,
}

impl SimilarityResult {
    pub fn from_json(value: &Value) -> Self {
        Self {
            similarity: clamp_unit(number_field(value, "similarity")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub doc_id: String,
    pub content: Option<String>,
    pub score: f64,
}

/// Ordered hits from `/unified/search`; order is the backend's ranking.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SearchResult {
    pub results: Vec<SearchHit>,
}

impl SearchResult {
    pub fn from_json(value: &Value) -> Self {
        let results = value
            .get("results")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .map(|item| SearchHit {
                        doc_id: match item.get("doc_id") {
                            Some(Value::String(id)) => id.clone(),
                            Some(Value::Null) | None => String::new(),
                            Some(other) => other.to_string(),
                        },
                        // Older backends return `text` rather than `content`.
                        content: string_field(item, "content")
                            .or_else(|| string_field(item, "text")),
                        score: clamp_unit(number_field(item, "score")),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self { results }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AnswerResult {
    pub answer: Option<String>,
    pub style: Option<String>,
    pub num_documents: u64,
    pub triad_question: Option<Triad>,
    pub confidence: Option<f64>,
}

impl AnswerResult {
    pub fn from_json(value: &Value) -> Self {
        Self {
            answer: string_field(value, "answer"),
            style: string_field(value, "style"),
            num_documents: value
                .get("num_documents")
                .and_then(Value::as_u64)
                .unwrap_or(0),
            triad_question: value.get("triad_question").and_then(Triad::from_json),
            confidence: value.get("confidence").and_then(Value::as_f64),
        }
    }
}

/// Response of `GET /domains`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DomainList {
    pub domains: Vec<String>,
    pub count: u64,
}

impl DomainList {
    pub fn from_json(value: &Value) -> Self {
        let domains: Vec<String> = value
            .get("domains")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default();
        let count = value
            .get("count")
            .and_then(Value::as_u64)
            .unwrap_or(domains.len() as u64);

        Self { domains, count }
    }
}

/// Response of `POST /unified/index`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct IndexResult {
    pub num_indexed: u64,
    pub message: Option<String>,
}

impl IndexResult {
    pub fn from_json(value: &Value) -> Self {
        Self {
            num_indexed: value
                .get("num_indexed")
                .and_then(Value::as_u64)
                .unwrap_or(0),
            message: string_field(value, "message"),
        }
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(String::from)
}

fn number_field(value: &Value, key: &str) -> f64 {
    value.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn triad_accepts_hatted_alias() {
        let triad = Triad::from_json(&json!({
            "delta_hat": 0.2,
            "infty_hat": 0.5,
            "theta_hat": 0.3
        }))
        .unwrap();
        assert_eq!(triad, Triad::new(0.2, 0.5, 0.3));
    }

    #[test]
    fn triad_components_are_clamped_and_default_to_zero() {
        let triad = Triad::from_json(&json!({ "delta": 1.7, "theta": -0.2 })).unwrap();
        assert_eq!(triad.delta, 1.0);
        assert_eq!(triad.infinity, 0.0);
        assert_eq!(triad.theta, 0.0);
        assert!(Triad::from_json(&json!("0.3/0.3/0.4")).is_none());
    }

    #[test]
    fn transform_result_reads_either_text_field() {
        let v3 = TransformResult::from_json(&json!({ "result": "def f(): pass" }));
        let v4 = TransformResult::from_json(&json!({ "transformed": "a function" }));
        assert_eq!(v3.text.as_deref(), Some("def f(): pass"));
        assert_eq!(v4.text.as_deref(), Some("a function"));
        assert!(v3.triad.is_none());
        assert!(!v3.has_embedding());
    }

    #[test]
    fn transform_result_reads_metadata_flags() {
        let result = TransformResult::from_json(&json!({
            "result": "ok",
            "metadata": { "learned": true },
            "embedding": [0.1, 0.2, 0.3]
        }));
        assert_eq!(
            result.metadata,
            Some(MetadataFlags {
                learned: true,
                numtriad_used: false
            })
        );
        assert_eq!(result.embedding.len(), 3);
    }

    #[test]
    fn search_result_preserves_order_and_tolerates_missing_fields() {
        let result = SearchResult::from_json(&json!({
            "results": [
                { "doc_id": "d1", "content": "a", "score": 0.9 },
                { "doc_id": 7 },
            ]
        }));
        assert_eq!(result.results.len(), 2);
        assert_eq!(result.results[0].doc_id, "d1");
        assert_eq!(result.results[1].doc_id, "7");
        assert_eq!(result.results[1].score, 0.0);
        assert!(result.results[1].content.is_none());

        assert!(SearchResult::from_json(&json!({})).results.is_empty());
    }

    #[test]
    fn answer_result_defaults_missing_document_count() {
        let answer = AnswerResult::from_json(&json!({ "answer": "42", "style": "concise" }));
        assert_eq!(answer.num_documents, 0);
        assert_eq!(answer.style.as_deref(), Some("concise"));
    }

    #[test]
    fn triad_target_parses_auto_and_domains() {
        assert_eq!("auto".parse::<TriadTarget>().unwrap(), TriadTarget::Auto);
        assert_eq!(
            "Code".parse::<TriadTarget>().unwrap(),
            TriadTarget::Domain(DomainTag::Code)
        );
        assert!("audio".parse::<TriadTarget>().is_err());
        assert_eq!(
            serde_json::to_value(TriadTarget::Domain(DomainTag::Image)).unwrap(),
            json!("image")
        );
    }

    #[test]
    fn domain_list_falls_back_to_length_for_count() {
        let list = DomainList::from_json(&json!({ "domains": ["text", "code"] }));
        assert_eq!(list.count, 2);
    }
}
