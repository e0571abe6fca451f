// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Church administration client.
//!
//! This crate provides the data access layer, query cache and view state
//! for managing church members, ministries and roles against a REST API,
//! plus a local in-memory API server for development.

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod views;

use config::Config;
use services::MemoryStore;

/// Shared state of the local API server.
pub struct AppState {
    pub config: Config,
    pub store: MemoryStore,
}
