//! View models: what a surface should paint for each successful action.

use serde::Serialize;
use serde_json::Value;

use crate::domain::{AnswerResult, SearchResult, SimilarityResult, TransformResult, Triad};

const NO_RESULTS: &str = "No results found";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriadRow {
    pub label: &'static str,
    pub value_text: String,
    pub bar_width: String,
}

/// Always three rows: ∆ Delta, ∞ Infinity, Θ Theta.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriadView {
    pub rows: Vec<TriadRow>,
}

impl From<&Triad> for TriadView {
    fn from(triad: &Triad) -> Self {
        let row = |label, value: f64| TriadRow {
            label,
            value_text: score_text(value),
            bar_width: bar_width(value),
        };
        Self {
            rows: vec![
                row("∆ Delta", triad.delta),
                row("∞ Infinity", triad.infinity),
                row("Θ Theta", triad.theta),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncodeView {
    pub embedding_shape: String,
    pub content_type: String,
    pub domain: String,
    pub triad: Option<TriadView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformView {
    pub text: String,
    pub triad: Option<TriadView>,
    pub learned: bool,
    pub numtriad_used: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityView {
    pub score_text: String,
    pub bar_width: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchItemView {
    pub title: String,
    pub body: String,
    pub score_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchView {
    pub items: Vec<SearchItemView>,
    /// Set when there is nothing to list.
    pub placeholder: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerView {
    pub answer: String,
    pub metadata: String,
    pub triad: Option<TriadView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ResultView {
    Encode(EncodeView),
    Transform(TransformView),
    Similarity(SimilarityView),
    Search(SearchView),
    Answer(AnswerView),
}

pub fn render_encode(value: &Value) -> ResultView {
    let result = TransformResult::from_json(value);
    ResultView::Encode(EncodeView {
        embedding_shape: if result.has_embedding() {
            result.embedding.len().to_string()
        } else {
            "N/A".to_string()
        },
        content_type: result.content_type.unwrap_or_else(|| "unknown".into()),
        domain: result.domain.unwrap_or_else(|| "auto".into()),
        triad: result.triad.as_ref().map(TriadView::from),
    })
}

pub fn render_transform(value: &Value) -> ResultView {
    let result = TransformResult::from_json(value);
    let flags = result.metadata.unwrap_or_default();
    ResultView::Transform(TransformView {
        text: result
            .text
            .unwrap_or_else(|| "Transformation failed".into()),
        triad: result.triad.as_ref().map(TriadView::from),
        learned: flags.learned,
        numtriad_used: flags.numtriad_used,
    })
}

pub fn render_similarity(value: &Value) -> ResultView {
    let result = SimilarityResult::from_json(value);
    ResultView::Similarity(SimilarityView {
        score_text: score_text(result.similarity),
        bar_width: bar_width(result.similarity),
    })
}

pub fn render_search(value: &Value) -> ResultView {
    let result = SearchResult::from_json(value);
    let items: Vec<SearchItemView> = result
        .results
        .into_iter()
        .map(|hit| SearchItemView {
            title: hit.doc_id,
            body: hit.content.unwrap_or_else(|| "No content".into()),
            score_text: score_text(hit.score),
        })
        .collect();
    let placeholder = items.is_empty().then_some(NO_RESULTS);
    ResultView::Search(SearchView { items, placeholder })
}

pub fn render_answer(value: &Value) -> ResultView {
    let result = AnswerResult::from_json(value);
    ResultView::Answer(AnswerView {
        answer: result
            .answer
            .unwrap_or_else(|| "No answer generated".into()),
        metadata: format!(
            "Style: {} | Documents: {}",
            result.style.as_deref().unwrap_or("default"),
            result.num_documents
        ),
        triad: result.triad_question.as_ref().map(TriadView::from),
    })
}

fn score_text(value: f64) -> String {
    format!("{:.3}", value)
}

fn bar_width(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}
