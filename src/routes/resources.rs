// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! REST endpoints for members, ministries and roles, served from the
//! in-memory store.
//!
//! Bodies are taken as raw JSON objects so partial updates only touch the
//! fields they carry.

use crate::error::Result;
use crate::models::{Members, Ministries, Resource, Roles};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde_json::Value;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/members/count", get(member_count))
        .merge(resource_routes::<Members>())
        .merge(resource_routes::<Ministries>())
        .merge(resource_routes::<Roles>())
}

/// `GET|POST /api/{resource}` and `PUT|DELETE /api/{resource}/{id}`.
fn resource_routes<R: Resource>() -> Router<Arc<AppState>> {
    let collection = format!("/api/{}", R::PATH);
    let item = format!("{}/{{id}}", collection);

    Router::new()
        .route(&collection, get(list::<R>).post(create::<R>))
        .route(&item, put(update::<R>).delete(remove::<R>))
}

async fn list<R: Resource>(State(state): State<Arc<AppState>>) -> Result<Json<Vec<R::Record>>> {
    Ok(Json(state.store.records::<R>()?))
}

async fn create<R: Resource>(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<R::Record>)> {
    let record = state.store.create_json::<R>(body)?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn update<R: Resource>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<R::Record>> {
    Ok(Json(state.store.update_json::<R>(&id, body)?))
}

async fn remove<R: Resource>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.store.remove::<R>(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn member_count(State(state): State<Arc<AppState>>) -> Json<u64> {
    Json(state.store.count::<Members>())
}
