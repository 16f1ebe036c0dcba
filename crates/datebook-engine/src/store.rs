//! The storage collaborator contract and two implementations.
//!
//! Loading never fails: a missing, unreadable or undecodable collection is
//! logged and surfaces as an empty list. Saving reports its errors.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::error::StoreError;
use crate::event::Event;

/// Durable home of the event collection.
pub trait EventStore {
    fn load(&self) -> Vec<Event>;

    fn save(&self, events: &[Event]) -> Result<(), StoreError>;
}

/// Decode a JSON event collection, treating any failure as empty.
pub fn decode_events(json: &str) -> Vec<Event> {
    match serde_json::from_str(json) {
        Ok(events) => events,
        Err(e) => {
            warn!(error = %e, "failed to decode stored events, starting empty");
            Vec::new()
        }
    }
}

pub fn encode_events(events: &[Event]) -> Result<String, StoreError> {
    Ok(serde_json::to_string_pretty(events)?)
}

/// Events kept as a JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventStore for JsonFileStore {
    fn load(&self) -> Vec<Event> {
        match fs::read_to_string(&self.path) {
            Ok(json) => {
                let events = decode_events(&json);
                debug!(path = %self.path.display(), count = events.len(), "loaded events");
                events
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read events file");
                Vec::new()
            }
        }
    }

    fn save(&self, events: &[Event]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, encode_events(events)?)?;
        debug!(path = %self.path.display(), count = events.len(), "saved events");
        Ok(())
    }
}

/// In-memory store, for hosts that persist elsewhere and for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    events: Mutex<Vec<Event>>,
}

impl MemoryStore {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events: Mutex::new(events),
        }
    }
}

impl EventStore for MemoryStore {
    fn load(&self) -> Vec<Event> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    fn save(&self, events: &[Event]) -> Result<(), StoreError> {
        match self.events.lock() {
            Ok(mut stored) => *stored = events.to_vec(),
            Err(poisoned) => *poisoned.into_inner() = events.to_vec(),
        }
        Ok(())
    }
}
