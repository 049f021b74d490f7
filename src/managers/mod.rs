pub mod request_desk;

pub use request_desk::{AdminSnapshot, EmailFeedback, PendingDeletion, RequestDesk, SubmitError};
