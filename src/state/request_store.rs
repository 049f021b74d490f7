use std::collections::HashSet;
use tracing::{debug, error, info, warn};

use super::clock::{Clock, SystemClock};
use super::storage::KeyValueStorage;
use crate::error::{DeskError, Result};
use crate::models::TrainingRequest;

/// Storage slot used when none is configured
pub const DEFAULT_STORAGE_KEY: &str = "trainingRequests";

/// Training requests kept as one JSON array under a single storage key.
///
/// Every write re-serializes the whole list. Reads never fail: a missing,
/// unreadable or non-array slot reads as an empty list, and array elements
/// that do not decode are skipped. Input is not validated here, callers run
/// [`crate::validation`] first.
#[derive(Debug)]
pub struct RequestStore<S, C = SystemClock> {
    storage: S,
    key: String,
    clock: C,
}

impl<S: KeyValueStorage> RequestStore<S, SystemClock> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self::with_clock(storage, key, SystemClock)
    }
}

impl<S: KeyValueStorage, C: Clock> RequestStore<S, C> {
    pub fn with_clock(storage: S, key: impl Into<String>, clock: C) -> Self {
        Self {
            storage,
            key: key.into(),
            clock,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Append a new record stamped with the current time and persist the list
    pub fn create(&self, email: &str, discord: &str, request: &str) -> Result<TrainingRequest> {
        let mut requests = self.list();
        let now = self.clock.now();

        let id = next_id(now.timestamp_millis(), &requests).ok_or(DeskError::IdSpaceExhausted)?;

        let record = TrainingRequest {
            id,
            email: email.to_string(),
            discord: discord.to_string(),
            request: request.to_string(),
            timestamp: now,
        };

        requests.push(record.clone());
        self.write_all(&requests)?;

        info!("Stored training request {} from {}", record.id, record.email);
        Ok(record)
    }

    /// All stored records in insertion order
    pub fn list(&self) -> Vec<TrainingRequest> {
        let content = match self.storage.get_item(&self.key) {
            Ok(Some(content)) => content,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Could not read '{}': {}, treating as empty", self.key, e);
                return Vec::new();
            }
        };

        if content.trim().is_empty() {
            return Vec::new();
        }

        let values = match serde_json::from_str::<Vec<serde_json::Value>>(&content) {
            Ok(values) => values,
            Err(e) => {
                error!("Stored data under '{}' is not a JSON array: {}, treating as empty", self.key, e);
                return Vec::new();
            }
        };

        let total = values.len();
        let requests: Vec<TrainingRequest> = values
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value::<TrainingRequest>(value) {
                Ok(request) => Some(request),
                Err(e) => {
                    error!("Dropping undecodable record {} under '{}': {}", index, self.key, e);
                    None
                }
            })
            .collect();

        debug!("Loaded {} of {} training requests from '{}'", requests.len(), total, self.key);
        requests
    }

    pub fn get(&self, id: i64) -> Option<TrainingRequest> {
        self.list().into_iter().find(|r| r.id == id)
    }

    /// Remove the record with `id`. Returns whether anything was removed;
    /// an unknown id is a no-op.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let mut requests = self.list();
        let before = requests.len();
        requests.retain(|r| r.id != id);

        if requests.len() == before {
            warn!("Delete of unknown training request {} ignored", id);
            return Ok(false);
        }

        if requests.is_empty() {
            self.storage.remove_item(&self.key)?;
        } else {
            self.write_all(&requests)?;
        }
        info!("Deleted training request {}", id);
        Ok(true)
    }

    pub fn count(&self) -> usize {
        self.list().len()
    }

    fn write_all(&self, requests: &[TrainingRequest]) -> Result<()> {
        let content = serde_json::to_string(requests)?;
        self.storage.set_item(&self.key, &content)
    }
}

/// Creation time in ms, bumped past the largest stored id so ids stay unique
/// when two records land in the same millisecond or the clock goes backwards.
/// If the largest id is already `i64::MAX`, takes the first free id counting
/// up from `now_millis` and wrapping around. `None` only when every id is taken.
fn next_id(now_millis: i64, existing: &[TrainingRequest]) -> Option<i64> {
    match existing.iter().map(|r| r.id).max() {
        Some(max) if max >= now_millis => max.checked_add(1).or_else(|| {
            let taken: HashSet<i64> = existing.iter().map(|r| r.id).collect();
            (now_millis..=i64::MAX)
                .chain(i64::MIN..now_millis)
                .find(|id| !taken.contains(id))
        }),
        _ => Some(now_millis),
    }
}
