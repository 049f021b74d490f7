// src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored training request. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingRequest {
    /// Creation time in milliseconds since the Unix epoch, bumped when needed to stay unique
    pub id: i64,
    pub email: String,
    pub discord: String,
    pub request: String,
    /// Creation instant, stored as `YYYY-MM-DDTHH:MM:SS.mmmZ`
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
}

impl TrainingRequest {
    /// Case-insensitive substring match against email, discord and request text.
    /// `needle` must already be lower-cased.
    pub fn matches(&self, needle: &str) -> bool {
        self.email.to_lowercase().contains(needle)
            || self.discord.to_lowercase().contains(needle)
            || self.request.to_lowercase().contains(needle)
    }
}

/// Raw form input as typed by the visitor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub email: String,
    pub discord: String,
    pub request: String,
}

impl Submission {
    pub fn new(
        email: impl Into<String>,
        discord: impl Into<String>,
        request: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            discord: discord.into(),
            request: request.into(),
        }
    }

    /// Copy with surrounding whitespace removed from every field
    pub fn trimmed(&self) -> Self {
        Self {
            email: self.email.trim().to_string(),
            discord: self.discord.trim().to_string(),
            request: self.request.trim().to_string(),
        }
    }
}

/// ISO-8601 instants with millisecond precision and a `Z` suffix
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(ts: &DateTime<Utc>) -> String {
        ts.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(ts))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
