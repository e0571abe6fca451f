// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - data access layer.
//!
//! [`DataAccess`] is the per-resource contract the cache and views are
//! written against. [`ApiClient`] talks to the remote REST API;
//! [`MemoryStore`] keeps everything in process and backs the local server.

pub mod api;
pub mod store;

pub use api::ApiClient;
pub use store::MemoryStore;

use crate::error::Result;
use crate::models::Resource;
use std::future::Future;

/// Persistence operations for every resource.
///
/// Each call is a single attempt: no retry, no timeout, no backoff.
pub trait DataAccess: Clone + Send + Sync + 'static {
    fn list<R: Resource>(&self) -> impl Future<Output = Result<Vec<R::Record>>> + Send;

    fn create<R: Resource>(
        &self,
        draft: &R::Draft,
    ) -> impl Future<Output = Result<R::Record>> + Send;

    fn update<R: Resource>(
        &self,
        id: &str,
        draft: &R::Draft,
    ) -> impl Future<Output = Result<R::Record>> + Send;

    /// Not used by any view.
    fn delete<R: Resource>(&self, id: &str) -> impl Future<Output = Result<()>> + Send;

    /// Number of members known to the store.
    fn member_count(&self) -> impl Future<Output = Result<u64>> + Send;
}
