// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! View state for the administration screens.

pub mod filter;
pub mod form;
pub mod list;
pub mod notify;

pub use filter::{BaptismFilter, Choice, MemberFilter, NoFilter, RecordFilter};
pub use form::{FormMode, RecordForm};
pub use list::{ListView, MemberListView, MinistryListView, RoleListView};
pub use notify::{Notification, Notifications, Variant};
