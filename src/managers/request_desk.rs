use chrono::{Local, TimeZone};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::error::DeskError;
use crate::messages::{self, Notice};
use crate::models::{Submission, TrainingRequest};
use crate::state::{Clock, FileStorage, KeyValueStorage, RequestStore, SystemClock};
use crate::validation::{
    email_status, truncate_request_text, validate_submission_with_limit, CharCounter, FieldStatus,
    ValidationErrors, MAX_REQUEST_CHARS,
};
use crate::view::{count_label, RequestQuery, TimeFilter};

/// Why a submit did not produce a record
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Invalid submission: {0}")]
    Invalid(#[from] ValidationErrors),

    #[error(transparent)]
    Store(#[from] DeskError),
}

impl SubmitError {
    /// Notification to show for this failure
    pub fn notice(&self) -> Notice {
        match self {
            SubmitError::Invalid(_) => messages::fix_errors(),
            SubmitError::Store(e) => messages::save_failed(&e.to_string()),
        }
    }
}

/// First step of a delete, waiting for the admin to confirm.
/// Only [`RequestDesk::request_delete`] hands these out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingDeletion {
    id: i64,
}

impl PendingDeletion {
    pub fn id(&self) -> i64 {
        self.id
    }
}

/// Live feedback for the email field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailFeedback {
    pub status: FieldStatus,
    /// Whether the admin view button should be shown
    pub admin_unlocked: bool,
}

/// What the admin view renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSnapshot {
    /// Filtered, searched, newest first
    pub requests: Vec<TrainingRequest>,
    /// "N Requests" for the visible list
    pub count_label: String,
    /// Everything in the store, regardless of filter
    pub total: usize,
}

#[derive(Debug, Default)]
struct AdminViewState {
    open: bool,
    query: RequestQuery,
    pending: Option<PendingDeletion>,
}

/// Command surface for the form and the admin view.
///
/// Owns the store and the admin view state (open flag, filter, search term,
/// pending delete). The presentation layer calls in and renders what comes back.
#[derive(Debug)]
pub struct RequestDesk<S, C = SystemClock> {
    store: RequestStore<S, C>,
    admin_email: String,
    max_request_chars: usize,
    view: AdminViewState,
}

impl RequestDesk<FileStorage, SystemClock> {
    /// File-backed desk under `config.storage_dir`
    pub fn from_config(config: &AppConfig) -> Self {
        let storage = FileStorage::new(&config.storage_dir);
        Self::new(RequestStore::new(storage, config.storage_key.clone()), config)
    }
}

impl<S: KeyValueStorage, C: Clock> RequestDesk<S, C> {
    pub fn new(store: RequestStore<S, C>, config: &AppConfig) -> Self {
        Self {
            store,
            admin_email: config.admin_email.clone(),
            max_request_chars: config.max_request_chars.min(MAX_REQUEST_CHARS),
            view: AdminViewState::default(),
        }
    }

    pub fn store(&self) -> &RequestStore<S, C> {
        &self.store
    }

    /// Whether `email` is the configured admin address.
    ///
    /// Plain string equality that only decides whether to show the admin
    /// button. It is not authentication and protects nothing.
    pub fn is_admin_email(&self, email: &str) -> bool {
        email.trim() == self.admin_email
    }

    pub fn email_feedback(&self, raw: &str) -> EmailFeedback {
        EmailFeedback {
            status: email_status(raw),
            admin_unlocked: self.is_admin_email(raw),
        }
    }

    /// Cut the textarea content to the cap and measure it
    pub fn request_input<'a>(&self, raw: &'a str) -> (&'a str, CharCounter) {
        let counter = CharCounter::measure(raw, self.max_request_chars);
        (truncate_request_text(raw, self.max_request_chars), counter)
    }

    /// Validate and store a submission. All fields are trimmed first.
    pub fn submit(&self, input: &Submission) -> Result<(TrainingRequest, Notice), SubmitError> {
        let input = input.trimmed();
        if let Err(errors) = validate_submission_with_limit(&input, self.max_request_chars) {
            debug!("Rejected submission with {} field errors", errors.len());
            return Err(errors.into());
        }

        let record = self
            .store
            .create(&input.email, &input.discord, &input.request)?;
        Ok((record, messages::submitted()))
    }

    /// Size of the store, for the summary counter
    pub fn total(&self) -> usize {
        self.store.count()
    }

    pub fn is_admin_open(&self) -> bool {
        self.view.open
    }

    pub fn open_admin(&mut self) {
        self.view.open = true;
        info!("Admin view opened");
    }

    /// Close the admin view and reset search, filter and any pending delete
    pub fn close_admin(&mut self) {
        self.view = AdminViewState::default();
        info!("Admin view closed");
    }

    pub fn query(&self) -> &RequestQuery {
        &self.view.query
    }

    pub fn set_filter(&mut self, filter: TimeFilter) {
        self.view.query.filter = filter;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.view.query.search = search.into();
    }

    /// Current admin view as seen from the local time zone
    pub fn snapshot(&self) -> AdminSnapshot {
        self.snapshot_in(&Local)
    }

    pub fn snapshot_in<Tz: TimeZone>(&self, tz: &Tz) -> AdminSnapshot {
        let all = self.store.list();
        let total = all.len();
        let now = self.store.clock().now().with_timezone(tz);
        let requests = self.view.query.apply(all, &now);

        AdminSnapshot {
            count_label: count_label(requests.len()),
            requests,
            total,
        }
    }

    /// Explicit reload requested by the admin
    pub fn refresh_in<Tz: TimeZone>(&self, tz: &Tz) -> (AdminSnapshot, Notice) {
        (self.snapshot_in(tz), messages::refreshed())
    }

    pub fn refresh(&self) -> (AdminSnapshot, Notice) {
        self.refresh_in(&Local)
    }

    /// Remember `id` as the delete target until confirmed or cancelled
    pub fn request_delete(&mut self, id: i64) -> PendingDeletion {
        let pending = PendingDeletion { id };
        self.view.pending = Some(pending);
        debug!("Delete of {} awaiting confirmation", id);
        pending
    }

    pub fn pending_deletion(&self) -> Option<PendingDeletion> {
        self.view.pending
    }

    pub fn cancel_delete(&mut self) {
        self.view.pending = None;
    }

    /// Second step of a delete. Acts only on the deletion currently pending;
    /// a cancelled or stale one leaves the store untouched. Returns the notice
    /// to show when a record was removed.
    pub fn confirm_delete(
        &mut self,
        pending: PendingDeletion,
    ) -> crate::error::Result<Option<Notice>> {
        if self.view.pending != Some(pending) {
            debug!("Ignoring confirmation for {}, not pending", pending.id);
            return Ok(None);
        }
        self.view.pending = None;

        let removed = self.store.delete(pending.id)?;
        Ok(removed.then(messages::deleted))
    }
}
