//! The five user actions, described as data.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::application::dtos::{AnswerRequest, SearchRequest, SimilarityRequest, TransformRequest};
use crate::domain::{ClientError, DomainTag, HttpMethod, TriadTarget};

use super::render::{
    render_answer, render_encode, render_search, render_similarity, render_transform, ResultView,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Encode,
    Transform,
    Similarity,
    Search,
    Answer,
}

impl ActionKind {
    pub const ALL: [ActionKind; 5] = [
        ActionKind::Encode,
        ActionKind::Transform,
        ActionKind::Similarity,
        ActionKind::Search,
        ActionKind::Answer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Encode => "encode",
            ActionKind::Transform => "transform",
            ActionKind::Similarity => "similarity",
            ActionKind::Search => "search",
            ActionKind::Answer => "answer",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Form values captured for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionInput {
    Encode {
        content: String,
        domain: DomainTag,
    },
    Transform {
        content: String,
        source: DomainTag,
        target: DomainTag,
    },
    Similarity {
        content1: String,
        content2: String,
        domain: Option<DomainTag>,
    },
    Search {
        query: String,
        k: usize,
        triad_target: TriadTarget,
    },
    Answer {
        query: String,
        k: usize,
        mode: String,
    },
}

impl ActionInput {
    pub fn kind(&self) -> ActionKind {
        match self {
            ActionInput::Encode { .. } => ActionKind::Encode,
            ActionInput::Transform { .. } => ActionKind::Transform,
            ActionInput::Similarity { .. } => ActionKind::Similarity,
            ActionInput::Search { .. } => ActionKind::Search,
            ActionInput::Answer { .. } => ActionKind::Answer,
        }
    }

    /// Required text inputs must be non-blank. Nothing else is checked locally.
    pub fn validate(&self) -> Result<(), ClientError> {
        let (fields, message): (Vec<&str>, &str) = match self {
            ActionInput::Encode { content, .. } => {
                (vec![content.as_str()], "Please enter content to encode.")
            }
            ActionInput::Transform { content, .. } => {
                (vec![content.as_str()], "Please enter content to transform.")
            }
            ActionInput::Similarity {
                content1, content2, ..
            } => (
                vec![content1.as_str(), content2.as_str()],
                "Please enter both contents.",
            ),
            ActionInput::Search { query, .. } => {
                (vec![query.as_str()], "Please enter a search query.")
            }
            ActionInput::Answer { query, .. } => {
                (vec![query.as_str()], "Please enter a question.")
            }
        };

        if fields.iter().any(|field| field.trim().is_empty()) {
            return Err(ClientError::validation(message));
        }
        Ok(())
    }
}

/// Everything the dispatcher needs to run one action.
pub struct ActionDescriptor {
    pub kind: ActionKind,
    pub endpoint: &'static str,
    pub method: HttpMethod,
    pub idle_label: &'static str,
    pub pending_label: &'static str,
    pub success_message: &'static str,
    pub failure_prefix: &'static str,
    pub build_payload: fn(&ActionInput) -> Result<Value, ClientError>,
    pub render: fn(&Value) -> ResultView,
}

static DESCRIPTORS: [ActionDescriptor; 5] = [
    ActionDescriptor {
        kind: ActionKind::Encode,
        endpoint: "/transform",
        method: HttpMethod::Post,
        idle_label: "Encode",
        pending_label: "Encoding...",
        success_message: "Encoding successful!",
        failure_prefix: "Encoding failed",
        build_payload: encode_payload,
        render: render_encode,
    },
    ActionDescriptor {
        kind: ActionKind::Transform,
        endpoint: "/transform",
        method: HttpMethod::Post,
        idle_label: "Transform",
        pending_label: "Transforming...",
        success_message: "Transformation completed!",
        failure_prefix: "Transformation failed",
        build_payload: transform_payload,
        render: render_transform,
    },
    ActionDescriptor {
        kind: ActionKind::Similarity,
        endpoint: "/similarity",
        method: HttpMethod::Post,
        idle_label: "Calculate Similarity",
        pending_label: "Calculating...",
        success_message: "Similarity calculated!",
        failure_prefix: "Similarity calculation failed",
        build_payload: similarity_payload,
        render: render_similarity,
    },
    ActionDescriptor {
        kind: ActionKind::Search,
        endpoint: "/unified/search",
        method: HttpMethod::Post,
        idle_label: "Search",
        pending_label: "Searching...",
        success_message: "Search completed!",
        failure_prefix: "Search failed",
        build_payload: search_payload,
        render: render_search,
    },
    ActionDescriptor {
        kind: ActionKind::Answer,
        endpoint: "/unified/answer",
        method: HttpMethod::Post,
        idle_label: "Generate Answer",
        pending_label: "Generating...",
        success_message: "Answer generated!",
        failure_prefix: "Answer generation failed",
        build_payload: answer_payload,
        render: render_answer,
    },
];

pub fn descriptor(kind: ActionKind) -> &'static ActionDescriptor {
    match kind {
        ActionKind::Encode => &DESCRIPTORS[0],
        ActionKind::Transform => &DESCRIPTORS[1],
        ActionKind::Similarity => &DESCRIPTORS[2],
        ActionKind::Search => &DESCRIPTORS[3],
        ActionKind::Answer => &DESCRIPTORS[4],
    }
}

fn to_payload<T: Serialize>(body: &T) -> Result<Value, ClientError> {
    serde_json::to_value(body)
        .map_err(|err| ClientError::other(format!("failed to encode request: {}", err)))
}

fn mismatched(expected: ActionKind, input: &ActionInput) -> ClientError {
    ClientError::other(format!(
        "{} action received {} input",
        expected,
        input.kind()
    ))
}

fn encode_payload(input: &ActionInput) -> Result<Value, ClientError> {
    match input {
        ActionInput::Encode { content, domain } => {
            to_payload(&TransformRequest::encode(content.clone(), *domain))
        }
        other => Err(mismatched(ActionKind::Encode, other)),
    }
}

fn transform_payload(input: &ActionInput) -> Result<Value, ClientError> {
    match input {
        ActionInput::Transform {
            content,
            source,
            target,
        } => to_payload(&TransformRequest {
            content: content.clone(),
            source_domain: *source,
            target_domain: *target,
        }),
        other => Err(mismatched(ActionKind::Transform, other)),
    }
}

fn similarity_payload(input: &ActionInput) -> Result<Value, ClientError> {
    match input {
        ActionInput::Similarity {
            content1,
            content2,
            domain,
        } => to_payload(&SimilarityRequest {
            content1: content1.trim().to_string(),
            content2: content2.trim().to_string(),
            domain: *domain,
        }),
        other => Err(mismatched(ActionKind::Similarity, other)),
    }
}

fn search_payload(input: &ActionInput) -> Result<Value, ClientError> {
    match input {
        ActionInput::Search {
            query,
            k,
            triad_target,
        } => to_payload(&SearchRequest {
            query: query.trim().to_string(),
            k: (*k).max(1),
            triad_target: *triad_target,
        }),
        other => Err(mismatched(ActionKind::Search, other)),
    }
}

fn answer_payload(input: &ActionInput) -> Result<Value, ClientError> {
    match input {
        ActionInput::Answer { query, k, mode } => {
            let mode = mode.trim();
            to_payload(&AnswerRequest {
                query: query.trim().to_string(),
                k: (*k).max(1),
                triad_target_mode: if mode.is_empty() { "auto" } else { mode }.to_string(),
            })
        }
        other => Err(mismatched(ActionKind::Answer, other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn descriptor_table_is_indexed_by_kind() {
        for kind in ActionKind::ALL {
            assert_eq!(descriptor(kind).kind, kind);
        }
    }

    #[test]
    fn whitespace_only_input_fails_validation() {
        let inputs = [
            ActionInput::Encode {
                content: "  ".into(),
                domain: DomainTag::Text,
            },
            ActionInput::Similarity {
                content1: "fine".into(),
                content2: "\n\t".into(),
                domain: None,
            },
            ActionInput::Answer {
                query: String::new(),
                k: 5,
                mode: "auto".into(),
            },
        ];
        for input in inputs {
            assert!(matches!(input.validate(), Err(ClientError::Validation(_))));
        }
    }

    #[test]
    fn encode_sends_same_source_and_target() {
        let input = ActionInput::Encode {
            content: "triangle".into(),
            domain: DomainTag::Geometry,
        };
        let payload = (descriptor(ActionKind::Encode).build_payload)(&input).unwrap();
        assert_eq!(
            payload,
            json!({ "content": "triangle", "source_domain": "geometry", "target_domain": "geometry" })
        );
    }

    #[test]
    fn transform_keeps_content_untrimmed() {
        let input = ActionInput::Transform {
            content: "    return 1\n".into(),
            source: DomainTag::Code,
            target: DomainTag::Text,
        };
        let payload = (descriptor(ActionKind::Transform).build_payload)(&input).unwrap();
        assert_eq!(payload["content"], "    return 1\n");
    }

    #[test]
    fn search_and_answer_use_their_own_target_field() {
        let search = ActionInput::Search {
            query: " triads ".into(),
            k: 0,
            triad_target: TriadTarget::Domain(DomainTag::Code),
        };
        let payload = (descriptor(ActionKind::Search).build_payload)(&search).unwrap();
        assert_eq!(
            payload,
            json!({ "query": "triads", "k": 1, "triad_target": "code" })
        );

        let answer = ActionInput::Answer {
            query: "why".into(),
            k: 3,
            mode: "".into(),
        };
        let payload = (descriptor(ActionKind::Answer).build_payload)(&answer).unwrap();
        assert_eq!(
            payload,
            json!({ "query": "why", "k": 3, "triad_target_mode": "auto" })
        );
    }

    #[test]
    fn mismatched_input_is_rejected() {
        let input = ActionInput::Search {
            query: "q".into(),
            k: 5,
            triad_target: TriadTarget::Auto,
        };
        assert!((descriptor(ActionKind::Answer).build_payload)(&input).is_err());
    }
}
