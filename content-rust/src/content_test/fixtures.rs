use crate::{Clock, ContentEntry, ContentType, ContentTypeField, EntryCollection};
use serde_json::Value;
use std::{
    sync::Mutex,
    time::{Duration, Instant},
};

/// A clock tests advance by hand.
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().expect("clock state poisoned");
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().expect("clock state poisoned")
    }
}

/// Build a content type whose fields are string fields with the given ids.
#[must_use]
pub fn content_type(id: &str, field_ids: &[&str]) -> ContentType {
    ContentType {
        id: id.to_string(),
        name: id.to_string(),
        display_field: field_ids.first().map(|field| (*field).to_string()),
        fields: field_ids
            .iter()
            .map(|field| ContentTypeField {
                id: (*field).to_string(),
                name: (*field).to_string(),
                field_type: "Symbol".to_string(),
                required: false,
            })
            .collect(),
    }
}

/// Build an entry from a JSON object of fields.
///
/// # Panics
/// Panics when `fields` is not a JSON object.
#[must_use]
pub fn entry(id: &str, content_type: &str, fields: Value) -> ContentEntry {
    let Value::Object(fields) = fields else {
        panic!("entry fields must be a JSON object");
    };
    ContentEntry {
        id: id.to_string(),
        content_type: content_type.to_string(),
        created_at: Some("2024-01-15T12:00:00Z".parse().expect("fixture timestamp")),
        fields,
    }
}

/// Wrap entries in a collection with no included assets.
#[must_use]
pub fn collection(items: Vec<ContentEntry>) -> EntryCollection {
    EntryCollection {
        items,
        assets: std::collections::HashMap::new(),
    }
}
