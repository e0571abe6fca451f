// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Member list view driven through the cache and the REST client.

use axum::{
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use church_admin::cache::QueryCache;
use church_admin::models::{Group, Member, MemberRole, Members, Record};
use church_admin::services::{ApiClient, MemoryStore};
use church_admin::views::{BaptismFilter, Choice, MemberListView, Variant};

mod common;

async fn loaded_view() -> (MemberListView, QueryCache<ApiClient>) {
    let (url, _) = common::spawn_store(common::seeded_store()).await;
    let cache = QueryCache::new(ApiClient::new(url));
    let mut view = MemberListView::new();
    view.load(&cache).await.unwrap();
    assert!(view.notifications().is_empty());
    (view, cache)
}

#[tokio::test]
async fn test_add_member_appends_exactly_one_record() {
    let (mut view, cache) = loaded_view().await;
    let before: Vec<Member> = view.records().to_vec();

    view.open_create();
    assert_eq!(view.form_title(), Some("Agregar Nuevo Miembro"));
    *view.draft_mut().unwrap() = common::valid_draft("Ana", "Ruiz");
    let created = view.submit(&cache).await.unwrap().expect("create succeeds");

    assert_eq!(view.total(), before.len() + 1);
    assert!(before.iter().all(|m| m.id != created.id));
    assert_eq!(&view.records()[..before.len()], &before[..]);
    assert_eq!(view.records().last().unwrap().display_name(), "Ana Ruiz");
    assert!(!view.form().is_open());

    let notifications = view.take_notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].description, "Miembro agregado exitosamente");
    assert_eq!(notifications[0].variant, Variant::Default);
}

#[tokio::test]
async fn test_edit_member_replaces_only_that_record() {
    let (mut view, cache) = loaded_view().await;

    assert!(view.open_edit("2"));
    assert_eq!(view.form_title(), Some("Editar Miembro"));
    let draft = view.draft_mut().unwrap();
    assert_eq!(draft.names, "María");
    draft.phone = "555-9999".to_string();
    draft.role = Some(MemberRole::Leader);
    view.submit(&cache).await.unwrap().expect("update succeeds");

    let records = view.records();
    assert_eq!(records.len(), 3);
    assert_eq!(records[1].id, "2");
    assert_eq!(records[1].phone, "555-9999");
    assert_eq!(records[1].role, Some(MemberRole::Leader));
    assert_eq!(records[1].role_label(), "Líder");
    assert_eq!(records[0].phone, "555-0100");
    assert_eq!(records[2].phone, "555-0100");
    assert!(view.selected().is_none());
}

#[tokio::test]
async fn test_failed_create_keeps_collection_and_form() {
    let router = Router::new().route(
        "/api/members",
        get(|| async { Json(vec![common::member("1", "José", "Pérez")]) })
            .post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let cache = QueryCache::new(ApiClient::new(common::spawn(router).await));
    let mut view = MemberListView::new();
    view.load(&cache).await.unwrap();

    view.open_create();
    *view.draft_mut().unwrap() = common::valid_draft("Ana", "Ruiz");
    let outcome = view.submit(&cache).await.unwrap();

    assert!(outcome.is_none());
    assert_eq!(view.total(), 1);
    assert!(view.form().is_open());
    assert_eq!(view.form().draft().unwrap().names, "Ana");

    let notifications = view.take_notifications();
    assert_eq!(notifications.len(), 1);
    assert!(notifications[0].is_error());
    assert_eq!(notifications[0].description, "No se pudo agregar el miembro");
}

#[tokio::test]
async fn test_incomplete_draft_is_rejected_before_any_request() {
    let (mut view, cache) = loaded_view().await;

    view.open_create();
    view.draft_mut().unwrap().names = "Ana".to_string();

    assert!(view.submit(&cache).await.is_err());
    assert!(view.form().is_open());
    assert_eq!(view.total(), 3);
}

#[tokio::test]
async fn test_load_failure_becomes_notification() {
    let cache = QueryCache::new(ApiClient::new("http://127.0.0.1:9"));
    let mut view = MemberListView::new();

    view.load(&cache).await.unwrap();

    assert_eq!(view.total(), 0);
    let notifications = view.take_notifications();
    assert_eq!(notifications[0].description, "No se pudieron cargar los miembros");
}

#[tokio::test]
async fn test_filters_combine() {
    let (mut view, _cache) = loaded_view().await;

    view.filter.baptism = BaptismFilter::Yes;
    let baptized: Vec<_> = view.filtered().iter().map(|m| m.id.clone()).collect();
    view.filter.baptism = BaptismFilter::No;
    let unbaptized: Vec<_> = view.filtered().iter().map(|m| m.id.clone()).collect();
    assert_eq!(baptized, vec!["1"]);
    assert_eq!(unbaptized, vec!["2", "3"]);

    view.filter.baptism = BaptismFilter::All;
    view.filter.group = Choice::Only(Group::Worship);
    assert_eq!(view.filtered().len(), 1);

    view.filter.group = Choice::All;
    view.filter.search = "josÉ".to_string();
    assert_eq!(view.filtered()[0].id, "1");
    view.filter.search = "jose".to_string();
    assert!(view.filtered().is_empty());
    // Only the given names are searched.
    view.filter.search = "pérez".to_string();
    assert!(view.filtered().is_empty());
}

#[tokio::test]
async fn test_member_count_follows_writes() {
    let (mut view, cache) = loaded_view().await;
    assert_eq!(view.member_count(&cache).await.unwrap(), Some(3));

    view.open_create();
    *view.draft_mut().unwrap() = common::valid_draft("Ana", "Ruiz");
    view.submit(&cache).await.unwrap();

    assert_eq!(view.member_count(&cache).await.unwrap(), Some(4));
}

#[tokio::test]
async fn test_failed_update_keeps_collection_and_form() {
    let router = Router::new()
        .route(
            "/api/members",
            get(|| async {
                Json(vec![
                    common::member("1", "José", "Pérez"),
                    common::member("2", "María", "Gómez"),
                ])
            }),
        )
        .route(
            "/api/members/{id}",
            put(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
    let cache = QueryCache::new(ApiClient::new(common::spawn(router).await));
    let mut view = MemberListView::new();
    view.load(&cache).await.unwrap();
    let before: Vec<Member> = view.records().to_vec();

    assert!(view.open_edit("2"));
    view.draft_mut().unwrap().phone = "555-9999".to_string();
    let outcome = view.submit(&cache).await.unwrap();

    assert!(outcome.is_none());
    assert_eq!(view.records(), &before[..]);
    assert!(view.form().is_open());
    assert_eq!(view.form().draft().unwrap().phone, "555-9999");
    assert_eq!(view.form_title(), Some("Editar Miembro"));

    let notifications = view.take_notifications();
    assert_eq!(notifications.len(), 1);
    assert!(notifications[0].is_error());
    assert_eq!(notifications[0].description, "No se pudo actualizar el miembro");
}

#[tokio::test]
async fn test_edit_keeps_unset_role_and_group() {
    let store = MemoryStore::new();
    let mut friend = common::member("1", "Luis", "Ruiz");
    friend.role = None;
    friend.minister = None;
    store.insert::<Members>(&friend).unwrap();
    let (url, store) = common::spawn_store(store).await;

    let cache = QueryCache::new(ApiClient::new(url));
    let mut view = MemberListView::new();
    view.load(&cache).await.unwrap();

    assert!(view.open_edit("1"));
    let draft = view.draft_mut().unwrap();
    assert_eq!(draft.role, None);
    assert_eq!(draft.minister, None);
    draft.phone = "555-4321".to_string();
    let saved = view.submit(&cache).await.unwrap().expect("update succeeds");

    assert_eq!(saved.phone, "555-4321");
    assert_eq!(saved.role, None);
    assert_eq!(saved.minister, None);
    let stored = store.records::<Members>().unwrap();
    assert_eq!(stored[0].role, None);
    assert_eq!(stored[0].minister, None);
    assert_eq!(stored[0].role_label(), "Amigo");
}
