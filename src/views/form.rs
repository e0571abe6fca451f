// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Record form dialog state machine.
//!
//! ```text
//! Closed ──open_create──▶ Open(Create) ──begin_submit──▶ Submitting ──ok──▶ Closed
//!        ──open_edit───▶ Open(Edit)                              └─err─▶ Open
//! ```
//!
//! The form only closes after the save is confirmed; a failed save leaves
//! it open with the draft intact.

use crate::error::{AppError, Result};
use validator::Validate;

/// Whether the dialog creates a new record or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum RecordForm<D> {
    #[default]
    Closed,
    Open {
        mode: FormMode,
        draft: D,
    },
    Submitting {
        mode: FormMode,
        draft: D,
    },
}

impl<D: Clone + Default + Validate> RecordForm<D> {
    /// Open with default field values and no identity.
    pub fn open_create(&mut self) {
        *self = RecordForm::Open {
            mode: FormMode::Create,
            draft: D::default(),
        };
    }

    /// Open pre-filled with a copy of an existing record.
    pub fn open_edit(&mut self, id: impl Into<String>, draft: D) {
        *self = RecordForm::Open {
            mode: FormMode::Edit { id: id.into() },
            draft,
        };
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, RecordForm::Closed)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, RecordForm::Submitting { .. })
    }

    pub fn mode(&self) -> Option<&FormMode> {
        match self {
            RecordForm::Closed => None,
            RecordForm::Open { mode, .. } | RecordForm::Submitting { mode, .. } => Some(mode),
        }
    }

    pub fn draft(&self) -> Option<&D> {
        match self {
            RecordForm::Closed => None,
            RecordForm::Open { draft, .. } | RecordForm::Submitting { draft, .. } => Some(draft),
        }
    }

    /// Editable draft; only while open and not submitting.
    pub fn draft_mut(&mut self) -> Option<&mut D> {
        match self {
            RecordForm::Open { draft, .. } => Some(draft),
            _ => None,
        }
    }

    /// Validate required fields and move to `Submitting`.
    ///
    /// Returns the mode and a copy of the full draft to hand to the save
    /// callback. Invalid drafts leave the form open.
    pub fn begin_submit(&mut self) -> Result<(FormMode, D)> {
        let RecordForm::Open { draft, .. } = self else {
            return Err(AppError::Invalid("form is not open".to_string()));
        };
        draft.validate()?;

        match std::mem::take(self) {
            RecordForm::Open { mode, draft } => {
                let submitted = (mode.clone(), draft.clone());
                *self = RecordForm::Submitting { mode, draft };
                Ok(submitted)
            }
            other => {
                *self = other;
                Err(AppError::Invalid("form is not open".to_string()))
            }
        }
    }

    /// Resolve a pending submission: close on success, reopen on failure.
    pub fn finish_submit(&mut self, succeeded: bool) {
        match std::mem::take(self) {
            RecordForm::Submitting { .. } if succeeded => {}
            RecordForm::Submitting { mode, draft } => *self = RecordForm::Open { mode, draft },
            other => *self = other,
        }
    }

    /// Dismiss the dialog.
    pub fn cancel(&mut self) {
        *self = RecordForm::Closed;
    }
}
