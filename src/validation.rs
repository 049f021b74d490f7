//! Field validation for submitted training requests.
//!
//! Each field is checked on its own and reports its own error, so the form can
//! show one message per field. Nothing here touches storage.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::messages;
use crate::models::Submission;

/// Minimum number of characters a Discord handle needs after trimming
pub const MIN_DISCORD_CHARS: usize = 2;

/// Minimum number of characters in the request description after trimming
pub const MIN_REQUEST_CHARS: usize = 10;

/// Hard cap on the request description
pub const MAX_REQUEST_CHARS: usize = 500;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

/// `local@domain.tld` shape check. No DNS lookup, no uniqueness check.
///
/// `\s` here is Unicode `White_Space`, which unlike JavaScript's `\s` does not
/// include U+FEFF, so an address containing a BOM is accepted.
pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn validate_discord(discord: &str) -> bool {
    discord.trim().chars().count() >= MIN_DISCORD_CHARS
}

/// At least 10 characters once trimmed, at most 500 as typed.
///
/// Input longer than the cap should have been cut by [`truncate_request_text`]
/// before it gets here.
pub fn validate_request_text(text: &str) -> bool {
    request_text_error(text, MAX_REQUEST_CHARS).is_none()
}

fn request_text_error(text: &str, max: usize) -> Option<FieldError> {
    if text.chars().count() > max {
        Some(FieldError::RequestTooLong { max })
    } else if text.trim().chars().count() < MIN_REQUEST_CHARS {
        Some(FieldError::RequestTooShort)
    } else {
        None
    }
}

/// Form field a validation error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Email,
    Discord,
    Request,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    InvalidEmail,
    DiscordTooShort,
    RequestTooShort,
    RequestTooLong { max: usize },
}

impl FieldError {
    pub fn field(&self) -> Field {
        match self {
            FieldError::InvalidEmail => Field::Email,
            FieldError::DiscordTooShort => Field::Discord,
            FieldError::RequestTooShort | FieldError::RequestTooLong { .. } => Field::Request,
        }
    }

    /// Text shown under the field after a failed submit
    pub fn message(&self) -> String {
        match self {
            FieldError::InvalidEmail => messages::INVALID_EMAIL.to_string(),
            FieldError::DiscordTooShort => messages::MISSING_DISCORD.to_string(),
            FieldError::RequestTooShort => messages::REQUEST_TOO_SHORT.to_string(),
            FieldError::RequestTooLong { max } => messages::request_too_long(*max),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Every field that failed, in form order (email, discord, request)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn for_field(&self, field: Field) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field() == field)
    }

    fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.errors.iter().map(|e| e.message()).collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Check all three fields of an already-trimmed submission
pub fn validate_submission(input: &Submission) -> Result<(), ValidationErrors> {
    validate_submission_with_limit(input, MAX_REQUEST_CHARS)
}

/// Same as [`validate_submission`] with a configurable request text cap
pub fn validate_submission_with_limit(
    input: &Submission,
    max_request_chars: usize,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if input.email.is_empty() || !validate_email(&input.email) {
        errors.push(FieldError::InvalidEmail);
    }
    if !validate_discord(&input.discord) {
        errors.push(FieldError::DiscordTooShort);
    }
    if let Some(err) = request_text_error(&input.request, max_request_chars) {
        errors.push(err);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Live status indicator next to an input while the visitor types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldStatus {
    /// Nothing typed yet, show nothing
    Empty,
    Valid,
    Invalid(String),
}

pub fn email_status(raw: &str) -> FieldStatus {
    let email = raw.trim();
    if email.is_empty() {
        FieldStatus::Empty
    } else if validate_email(email) {
        FieldStatus::Valid
    } else {
        FieldStatus::Invalid(messages::INVALID_EMAIL.to_string())
    }
}

pub fn discord_status(raw: &str) -> FieldStatus {
    let discord = raw.trim();
    if discord.is_empty() {
        FieldStatus::Empty
    } else if validate_discord(discord) {
        FieldStatus::Valid
    } else {
        FieldStatus::Invalid(messages::DISCORD_TOO_SHORT.to_string())
    }
}

/// Cut `text` to at most `max` characters on a char boundary
pub fn truncate_request_text(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterLevel {
    Normal,
    /// Above 90% of the cap
    Warning,
    /// Input hit the cap and was truncated
    AtLimit,
}

/// "`length` / `max`" counter under the request textarea
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharCounter {
    pub length: usize,
    pub max: usize,
    pub level: CounterLevel,
}

impl CharCounter {
    pub fn measure(text: &str, max: usize) -> Self {
        let length = text.chars().count();
        if length > max {
            Self {
                length: max,
                max,
                level: CounterLevel::AtLimit,
            }
        } else if length * 10 > max * 9 {
            Self {
                length,
                max,
                level: CounterLevel::Warning,
            }
        } else {
            Self {
                length,
                max,
                level: CounterLevel::Normal,
            }
        }
    }
}

impl fmt::Display for CharCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.length, self.max)
    }
}
