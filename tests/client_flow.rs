use std::sync::Arc;

use serde_json::json;
use triad_client_lib::application::services::{ResultView, UiSurface};
use triad_client_lib::application::{ActionInput, ActionKind, Dispatch};
use triad_client_lib::domain::{ClientError, DomainTag, HttpMethod, TriadTarget};
use triad_client_lib::infrastructure::{MemorySurface, ScriptedTransport};
use triad_client_lib::settings::{ClientConfig, PreferenceStore};
use triad_client_lib::{build_with, AppHandles};

fn setup(preferences: PreferenceStore) -> (AppHandles, Arc<ScriptedTransport>, Arc<MemorySurface>) {
    let transport = Arc::new(ScriptedTransport::new());
    let surface = Arc::new(MemorySurface::new());
    let handles = build_with(
        ClientConfig::default(),
        transport.clone(),
        Arc::new(preferences),
        surface.clone() as Arc<dyn UiSurface>,
    );
    (handles, transport, surface)
}

fn search(query: &str) -> ActionInput {
    ActionInput::Search {
        query: query.to_string(),
        k: 5,
        triad_target: TriadTarget::Auto,
    }
}

#[tokio::test]
async fn offline_probe_gates_actions_until_recovery() {
    let (handles, transport, surface) = setup(PreferenceStore::ephemeral());

    transport.respond(HttpMethod::Get, "/health", 500, json!({ "detail": "down" }));
    assert!(!handles.monitor.probe_once().await);

    let err = handles.actions.run(search("triads")).await.unwrap_err();
    assert!(matches!(err, ClientError::Offline));
    assert_eq!(transport.count_for("/unified/search"), 0);
    assert_eq!(surface.banner().unwrap().message, "API offline");

    transport.respond(HttpMethod::Get, "/health", 200, json!({ "status": "healthy" }));
    transport.respond(
        HttpMethod::Post,
        "/unified/search",
        200,
        json!({
            "status": "success",
            "results": [
                { "doc_id": "d1", "content": "a", "score": 0.9 },
                { "doc_id": "d2", "content": "b", "score": 0.4 }
            ]
        }),
    );
    assert!(handles.monitor.probe_once().await);
    assert_eq!(surface.api_online(), Some(true));

    let dispatch = handles.actions.run(search("triads")).await.unwrap();
    let Dispatch::Completed(ResultView::Search(view)) = dispatch else {
        panic!("expected search results");
    };
    let titles: Vec<_> = view.items.iter().map(|item| item.title.as_str()).collect();
    assert_eq!(titles, ["d1", "d2"]);
    assert_eq!(surface.view(ActionKind::Search), Some(ResultView::Search(view)));

    let sent = transport.requests();
    let body: serde_json::Value =
        serde_json::from_str(sent.last().unwrap().body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({ "query": "triads", "k": 5, "triad_target": "auto" }));
}

#[tokio::test]
async fn distinct_controls_settle_independently() {
    let (handles, transport, surface) = setup(PreferenceStore::ephemeral());
    handles.state.set_online(true);
    transport.respond(HttpMethod::Post, "/similarity", 200, json!({ "similarity": 0.5 }));
    transport.respond(
        HttpMethod::Post,
        "/transform",
        200,
        json!({ "embedding": [0.1, 0.2], "content_type": "text", "domain": "text",
                "triad": { "delta_hat": 0.6, "infty_hat": 0.3, "theta_hat": 0.1 } }),
    );

    let similarity = handles.actions.run(ActionInput::Similarity {
        content1: "a".into(),
        content2: "b".into(),
        domain: None,
    });
    let encode = handles.actions.run(ActionInput::Encode {
        content: "hello".into(),
        domain: DomainTag::Text,
    });
    let (similarity, encode) = tokio::join!(similarity, encode);
    assert!(matches!(similarity.unwrap(), Dispatch::Completed(_)));
    assert!(matches!(encode.unwrap(), Dispatch::Completed(_)));

    let Some(ResultView::Encode(view)) = surface.view(ActionKind::Encode) else {
        panic!("encode view missing");
    };
    assert_eq!(view.embedding_shape, "2");
    assert_eq!(view.triad.unwrap().rows[0].value_text, "0.600");
    assert!(surface.view(ActionKind::Similarity).is_some());
}

#[tokio::test]
async fn dark_mode_preference_persists() {
    let dir = tempfile::tempdir().unwrap();
    {
        let (handles, _, _) = setup(PreferenceStore::load(dir.path()).unwrap());
        assert!(!handles.state.dark_mode());
        assert!(handles.state.toggle_dark_mode().unwrap());
    }

    let (handles, _, _) = setup(PreferenceStore::load(dir.path()).unwrap());
    assert!(handles.state.dark_mode());
}

#[tokio::test]
async fn typed_helpers_cover_auxiliary_endpoints() {
    let (handles, transport, _) = setup(PreferenceStore::ephemeral());
    transport.respond(
        HttpMethod::Get,
        "/domains",
        200,
        json!({ "domains": ["geometry", "text", "code"], "count": 3 }),
    );
    transport.respond(
        HttpMethod::Get,
        "/unified/stats",
        200,
        json!({ "status": "success", "system": { "rag_index": { "num_documents": 0 } } }),
    );

    let domains = handles.client.domains().await.unwrap();
    assert_eq!(domains.count, 3);
    assert!(domains.domains.contains(&"code".to_string()));

    let stats = handles.client.unified_stats().await.unwrap();
    assert_eq!(stats["system"]["rag_index"]["num_documents"], 0);

    let err = handles.client.stats().await.unwrap_err();
    let ClientError::Api(api) = err else {
        panic!("expected an API error, got {err:?}");
    };
    assert_eq!(api.status, Some(404));
    assert_eq!(api.message, "Not Found");
}
