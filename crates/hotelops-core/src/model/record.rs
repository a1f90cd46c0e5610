// ── Opaque API records ──
//
// Hotels, employees, advances, expenses, materials, ledger entries and
// report rows all have a server-defined shape. The core only reads `id`;
// everything else rides along in `fields` for the presentation layer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::EntityId;

/// Anything the list store can deduplicate.
pub trait Identified {
    fn id(&self) -> &EntityId;
}

/// A record whose fields are owned by the remote API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: EntityId,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Record {
    pub fn new(id: impl Into<EntityId>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    /// Builder-style field setter, mostly for tests and fixtures.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_owned(), value.into());
        self
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        if name == "id" {
            return None;
        }
        self.fields.get(name)
    }

    /// Field rendered for tables: strings unquoted, null/missing as empty.
    pub fn display_field(&self, name: &str) -> String {
        if name == "id" {
            return self.id.to_string();
        }
        self.fields.get(name).map(display_value).unwrap_or_default()
    }

    /// Field names in server order, `id` first.
    pub fn field_names(&self) -> Vec<String> {
        std::iter::once("id".to_owned())
            .chain(self.fields.keys().cloned())
            .collect()
    }
}

/// Plain-text rendering of a JSON value: strings unquoted, null empty.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl Identified for Record {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

/// Hotel reference data, shared by every screen's hotel picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: EntityId,
    #[serde(alias = "hotel_name")]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Identified for Hotel {
    fn id(&self) -> &EntityId {
        &self.id
    }
}
