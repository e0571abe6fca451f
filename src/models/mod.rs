// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for members, ministries and roles.
//!
//! Each resource is described by a zero-sized marker type implementing
//! [`Resource`], which ties together the stored record, the draft the forms
//! edit, the REST path and the user-facing messages.

pub mod member;
pub mod ministry;
pub mod role;

pub use member::{Group, Member, MemberDraft, MemberRole, Members};
pub use ministry::{Ministries, Ministry, MinistryDraft};
pub use role::{Role, RoleDraft, Roles};

use crate::cache::QueryKey;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Debug;
use std::str::FromStr;
use validator::Validate;

/// A record owned by the remote store.
pub trait Record: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Store-assigned identity.
    fn id(&self) -> &str;

    /// Full name shown in command output and logs.
    fn display_name(&self) -> String;
}

/// Ties a record type to its draft, REST path and messages.
pub trait Resource: Send + Sync + 'static {
    type Record: Record;
    type Draft: Clone
        + Debug
        + Default
        + PartialEq
        + Serialize
        + Validate
        + Send
        + Sync
        + 'static
        + for<'a> From<&'a Self::Record>;

    /// Cache key holding the collection.
    const KEY: QueryKey;
    /// Path segment under `/api/`.
    const PATH: &'static str;
    const MESSAGES: &'static Messages;
}

/// Fixed user-facing texts for one resource.
#[derive(Debug)]
pub struct Messages {
    // Data access failures
    pub list_failed: &'static str,
    pub create_failed: &'static str,
    pub update_failed: &'static str,
    pub delete_failed: &'static str,

    // Notifications
    pub load_failed_toast: &'static str,
    pub created_toast: &'static str,
    pub create_failed_toast: &'static str,
    pub updated_toast: &'static str,
    pub update_failed_toast: &'static str,

    // Dialog and header
    pub create_title: &'static str,
    pub edit_title: &'static str,
    pub total_label: &'static str,
}

/// A closed enumeration with a wire value, legacy aliases and a display label.
pub trait ClosedEnum: Copy + Eq + Debug + 'static {
    const ALL: &'static [Self];

    /// Value sent to and expected from the API.
    fn wire(self) -> &'static str;

    /// Human-readable label.
    fn label(self) -> &'static str;

    /// Older spellings still accepted when parsing.
    fn aliases(self) -> &'static [&'static str] {
        &[]
    }

    fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.wire() == value || v.label() == value || v.aliases().contains(&value))
    }
}

/// Error returned when a string is not part of a closed enumeration.
#[derive(Debug, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownValue {
    pub kind: &'static str,
    pub value: String,
}

/// Deserialize an optional closed-enum field, mapping unknown values to `None`.
///
/// Records written by other clients may carry labels outside the current
/// enumeration; they must not make the whole collection unreadable.
pub(crate) fn lenient_option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| {
        let parsed = value.parse().ok();
        if parsed.is_none() && !value.is_empty() {
            tracing::debug!(value = %value, "Ignoring unknown enumeration value");
        }
        parsed
    }))
}
