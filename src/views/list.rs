// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! List view state: loaded collection, filters, selection and form.
//!
//! The view owns all of its UI state; nothing is global. Network failures
//! (`AppError::Fetch`) are turned into notifications here. Any other error
//! is returned to the caller.

use super::filter::{self, MemberFilter, NoFilter, RecordFilter};
use super::form::{FormMode, RecordForm};
use super::notify::{Notification, Notifications};
use crate::cache::QueryCache;
use crate::error::Result;
use crate::models::{Member, Members, Ministries, Record, Resource, Roles};
use crate::services::DataAccess;
use std::sync::Arc;

pub type MemberListView = ListView<Members, MemberFilter>;
pub type MinistryListView = ListView<Ministries>;
pub type RoleListView = ListView<Roles>;

pub struct ListView<R: Resource, F = NoFilter> {
    records: Arc<Vec<R::Record>>,
    selected: Option<R::Record>,
    form: RecordForm<R::Draft>,
    /// Current filter selections; edit freely, results follow on the next
    /// call to [`ListView::filtered`].
    pub filter: F,
    notifications: Notifications,
}

impl<R: Resource, F: RecordFilter<R::Record> + Default> Default for ListView<R, F> {
    fn default() -> Self {
        Self::with_records(Vec::new())
    }
}

impl<R: Resource, F: RecordFilter<R::Record> + Default> ListView<R, F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// View pre-populated with `records` (no load required).
    pub fn with_records(records: Vec<R::Record>) -> Self {
        Self {
            records: Arc::new(records),
            selected: None,
            form: RecordForm::default(),
            filter: F::default(),
            notifications: Notifications::default(),
        }
    }

    // ─── Collection ──────────────────────────────────────────────────────

    /// The full loaded collection.
    pub fn records(&self) -> &[R::Record] {
        &self.records
    }

    /// Total number of loaded records (header card).
    pub fn total(&self) -> usize {
        self.records.len()
    }

    pub fn total_label(&self) -> String {
        format!("{}: {}", R::MESSAGES.total_label, self.total())
    }

    /// Records passing every active filter, in collection order.
    pub fn filtered(&self) -> Vec<&R::Record> {
        filter::apply(&self.records, &self.filter)
    }

    /// Load (or reload) the collection through the cache.
    pub async fn load<D: DataAccess>(&mut self, cache: &QueryCache<D>) -> Result<()> {
        match cache.fetch::<R>().await {
            Ok(records) => {
                self.records = records;
                Ok(())
            }
            Err(e) if e.is_fetch_error() => {
                self.notifications
                    .push(Notification::error(R::MESSAGES.load_failed_toast));
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    // ─── Selection and form ──────────────────────────────────────────────

    pub fn selected(&self) -> Option<&R::Record> {
        self.selected.as_ref()
    }

    pub fn form(&self) -> &RecordForm<R::Draft> {
        &self.form
    }

    /// Editable draft of the open form.
    pub fn draft_mut(&mut self) -> Option<&mut R::Draft> {
        self.form.draft_mut()
    }

    /// Dialog title for the current mode.
    pub fn form_title(&self) -> Option<&'static str> {
        self.form.mode().map(|mode| match mode {
            FormMode::Create => R::MESSAGES.create_title,
            FormMode::Edit { .. } => R::MESSAGES.edit_title,
        })
    }

    /// "Add": open an empty form.
    pub fn open_create(&mut self) {
        self.selected = None;
        self.form.open_create();
    }

    /// Select the record with `id` and open the form with a copy of it.
    /// Returns `false` if no loaded record has that id.
    pub fn open_edit(&mut self, id: &str) -> bool {
        let Some(record) = self.records.iter().find(|r| r.id() == id).cloned() else {
            return false;
        };
        self.form.open_edit(id, R::Draft::from(&record));
        self.selected = Some(record);
        true
    }

    pub fn close_form(&mut self) {
        self.form.cancel();
        self.selected = None;
    }

    /// Submit the open form.
    ///
    /// On success the returned record is merged into the visible collection,
    /// the form closes, the selection clears and the collection is
    /// reloaded through the cache. On a fetch failure an error notification
    /// is queued, the collection is unchanged and the form stays open; the
    /// result is then `Ok(None)`.
    pub async fn submit<D: DataAccess>(
        &mut self,
        cache: &QueryCache<D>,
    ) -> Result<Option<R::Record>> {
        let (mode, draft) = self.form.begin_submit()?;

        let result = match &mode {
            FormMode::Create => cache.create::<R>(&draft).await,
            FormMode::Edit { id } => cache.update::<R>(id, &draft).await,
        };

        let record = match result {
            Ok(record) => record,
            Err(e) => {
                self.form.finish_submit(false);
                if !e.is_fetch_error() {
                    return Err(e);
                }
                let message = match mode {
                    FormMode::Create => R::MESSAGES.create_failed_toast,
                    FormMode::Edit { .. } => R::MESSAGES.update_failed_toast,
                };
                self.notifications.push(Notification::error(message));
                return Ok(None);
            }
        };

        self.merge(&mode, record.clone());
        self.form.finish_submit(true);
        self.selected = None;
        self.notifications.push(Notification::success(match mode {
            FormMode::Create => R::MESSAGES.created_toast,
            FormMode::Edit { .. } => R::MESSAGES.updated_toast,
        }));

        self.refresh(cache).await;
        Ok(Some(record))
    }

    /// Apply a confirmed write to the visible collection.
    fn merge(&mut self, mode: &FormMode, record: R::Record) {
        let records = Arc::make_mut(&mut self.records);
        match mode {
            FormMode::Create => records.push(record),
            FormMode::Edit { id } => {
                if let Some(slot) = records.iter_mut().find(|r| r.id() == id) {
                    *slot = record;
                }
            }
        }
    }

    /// Reload after a write. On failure the locally merged collection stays.
    async fn refresh<D: DataAccess>(&mut self, cache: &QueryCache<D>) {
        match cache.fetch::<R>().await {
            Ok(records) => self.records = records,
            Err(e) => {
                tracing::warn!(resource = R::PATH, error = %e, "Refetch after write failed");
            }
        }
    }

    // ─── Notifications ───────────────────────────────────────────────────

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }
}

impl<F: RecordFilter<Member> + Default> ListView<Members, F> {
    /// Server-side member count for the header; `None` if unavailable.
    pub async fn member_count<D: DataAccess>(&self, cache: &QueryCache<D>) -> Result<Option<u64>> {
        match cache.member_count().await {
            Ok(count) => Ok(Some(count)),
            Err(e) if e.is_fetch_error() => {
                tracing::warn!(error = %e, "Member count unavailable");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
