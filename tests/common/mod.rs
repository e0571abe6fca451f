// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use church_admin::config::Config;
use church_admin::models::{Group, Member, MemberDraft, MemberRole, Members};
use church_admin::routes::create_router;
use church_admin::services::MemoryStore;
use church_admin::AppState;
use std::sync::Arc;

/// Create a test app backed by an empty in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(MemoryStore::new())
}

#[allow(dead_code)]
pub fn create_test_app_with(store: MemoryStore) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState {
        config: Config::default(),
        store,
    });
    (create_router(state.clone()), state)
}

/// Serve `router` on an ephemeral local port and return its base URL.
#[allow(dead_code)]
pub async fn spawn(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });
    format!("http://{}", addr)
}

/// Serve a store over HTTP; returns the base URL and the store handle.
#[allow(dead_code)]
pub async fn spawn_store(store: MemoryStore) -> (String, MemoryStore) {
    let (router, state) = create_test_app_with(store);
    (spawn(router).await, state.store.clone())
}

#[allow(dead_code)]
pub fn member(id: &str, names: &str, last_names: &str) -> Member {
    Member {
        id: id.to_string(),
        names: names.to_string(),
        last_names: last_names.to_string(),
        role: Some(MemberRole::Member),
        minister: Some(Group::Youth),
        address: "Calle 1".to_string(),
        email: format!("{}@iglesia.org", names.to_lowercase()),
        phone: "555-0100".to_string(),
        image: None,
        baptized: false,
    }
}

/// Store seeded with three members.
#[allow(dead_code)]
pub fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();
    let mut jose = member("1", "José", "Pérez");
    jose.baptized = true;
    jose.role = Some(MemberRole::Pastor);
    let mut maria = member("2", "María", "Gómez");
    maria.minister = Some(Group::Worship);
    let luis = member("3", "Luis", "Ruiz");
    for m in [jose, maria, luis] {
        store.insert::<Members>(&m).expect("Failed to seed member");
    }
    store
}

#[allow(dead_code)]
pub fn valid_draft(names: &str, last_names: &str) -> MemberDraft {
    MemberDraft {
        names: names.to_string(),
        last_names: last_names.to_string(),
        address: "Av. Central 10".to_string(),
        email: "ana@iglesia.org".to_string(),
        phone: "555-0199".to_string(),
        ..MemberDraft::default()
    }
}
