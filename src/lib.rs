//! Training request desk.
//!
//! Core of a single-page "training request" form: visitors submit an email,
//! a Discord handle and a free-text description, which is validated and kept
//! in a local key/value slot. An admin view lists, filters, searches and
//! deletes the stored requests.
//!
//! Rendering is left to the caller. [`RequestDesk`] is the command surface a
//! presentation layer drives.

pub mod config;
pub mod error;
pub mod logging;
pub mod managers;
pub mod messages;
pub mod models;
pub mod state;
pub mod validation;
pub mod view;

pub use config::AppConfig;
pub use error::{DeskError, Result};
pub use managers::{PendingDeletion, RequestDesk, SubmitError};
pub use models::{Submission, TrainingRequest};
pub use state::{Clock, FileStorage, KeyValueStorage, MemoryStorage, RequestStore, SystemClock};
pub use validation::{FieldError, ValidationErrors};
pub use view::{RequestQuery, TimeFilter};
