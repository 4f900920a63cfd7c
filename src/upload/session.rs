//! Local state of one upload widget.
//!
//! The session owns the selected file and the preview. Every accepted file
//! starts a decode tagged with a fresh [`DecodeTicket`]; only the completion
//! carrying the latest ticket is applied, so a slow read of an older file can
//! never overwrite the preview of a newer one.

use super::preview::Preview;
use super::{accept_single, DecodeError, FileSource, MediaKind, Rejection};
use crate::form::{FieldRules, FormBinder};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Editable,
    ViewOnly,
}

/// Sequence number attached to a decode request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DecodeTicket(u64);

/// Coarse state, mostly for logging and rendering decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Empty,
    Decoding,
    Previewing,
    ViewOnly,
}

/// A file the session accepted and now needs decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<F> {
    pub ticket: DecodeTicket,
    pub file: F,
    pub mime: &'static str,
}

/// Outcome of handing a decode result back to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Stale,
    Failed(DecodeError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CancelError {
    #[error("cannot cancel a view-only field")]
    ViewOnly,
}

#[derive(Debug)]
pub struct UploadSession<F> {
    kind: MediaKind,
    mode: Mode,
    selected: Option<F>,
    preview: Preview,
    issued: u64,
    pending: Option<DecodeTicket>,
}

impl<F: FileSource + Clone> UploadSession<F> {
    /// A non-empty `view` value makes the session view-only; `edit` only
    /// seeds the preview.
    pub fn new(kind: MediaKind, view: Option<&str>, edit: Option<&str>) -> Self {
        let mode = match view {
            Some(v) if !v.is_empty() => Mode::ViewOnly,
            _ => Mode::Editable,
        };

        Self {
            kind,
            mode,
            selected: None,
            preview: Preview::initial(view, edit),
            issued: 0,
            pending: None,
        }
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_view_only(&self) -> bool {
        self.mode == Mode::ViewOnly
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    pub fn selected(&self) -> Option<&F> {
        self.selected.as_ref()
    }

    pub fn phase(&self) -> Phase {
        if self.is_view_only() {
            Phase::ViewOnly
        } else if self.pending.is_some() {
            Phase::Decoding
        } else if self.preview.is_empty() {
            Phase::Empty
        } else {
            Phase::Previewing
        }
    }

    /// Runs the accept policy over a drop or browse result. On success the
    /// file replaces any earlier selection and a decode ticket is issued;
    /// on rejection nothing changes.
    pub fn select(&mut self, files: Vec<F>) -> Result<Selection<F>, Rejection> {
        if self.is_view_only() {
            return Err(Rejection::ViewOnly);
        }

        let accepted = accept_single(self.kind, files)?;
        self.issued += 1;
        let ticket = DecodeTicket(self.issued);
        self.pending = Some(ticket);
        self.selected = Some(accepted.file.clone());

        Ok(Selection {
            ticket,
            file: accepted.file,
            mime: accepted.mime,
        })
    }

    /// Applies a finished decode if its ticket is still the outstanding one.
    /// A failed decode leaves the preview as it was.
    pub fn complete(&mut self, ticket: DecodeTicket, result: Result<String, DecodeError>) -> Completion {
        if self.pending != Some(ticket) {
            return Completion::Stale;
        }
        self.pending = None;

        match result {
            Ok(uri) => {
                self.preview = Preview::Decoded(uri);
                Completion::Applied
            }
            Err(err) => Completion::Failed(err),
        }
    }

    /// Drops the selection and the preview. Any decode still in flight is
    /// orphaned and its completion will be reported stale.
    pub fn cancel(&mut self) -> Result<(), CancelError> {
        if self.is_view_only() {
            return Err(CancelError::ViewOnly);
        }

        self.selected = None;
        self.preview = Preview::Empty;
        self.pending = None;
        Ok(())
    }
}

/// Operations that also keep the bound form field in step with the session.
impl<F: FileSource + Clone> UploadSession<F> {
    /// Registers `name` as a required field. View-only sessions never write a
    /// value, so they are not registered and `false` is returned.
    pub fn register_with(&self, binder: &dyn FormBinder<F>, name: &str) -> bool {
        if self.is_view_only() {
            return false;
        }
        binder.register(name, FieldRules::required());
        true
    }

    /// [`select`](Self::select), then writes the accepted file into `name`.
    /// A rejected selection leaves the field untouched.
    pub fn select_into(
        &mut self,
        binder: &dyn FormBinder<F>,
        name: &str,
        files: Vec<F>,
    ) -> Result<Selection<F>, Rejection> {
        let selection = self.select(files)?;
        binder.set_value(name, Some(selection.file.clone()));
        Ok(selection)
    }

    /// [`cancel`](Self::cancel), then clears `name`.
    pub fn cancel_into(&mut self, binder: &dyn FormBinder<F>, name: &str) -> Result<(), CancelError> {
        self.cancel()?;
        binder.set_value(name, None);
        Ok(())
    }
}
