//! Event and location records.
//!
//! Field names on the wire and on disk are the Spanish ones used by the
//! database document (`titulo_evento`, `nombre`, ...).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AgendaError, AgendaResult};
use crate::store::Record;

/// Column order of an event record.
pub const EVENT_FIELDS: [&str; 4] = [
    "titulo_evento",
    "fecha_hora_evento",
    "descripcion_evento",
    "ubicacion_evento",
];

/// An event as stored in the `eventos` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoredEvent {
    #[serde(rename = "titulo_evento")]
    pub title: String,
    /// Canonical `YYYY-MM-DD HH:MM:SS` text.
    #[serde(rename = "fecha_hora_evento")]
    pub start: String,
    #[serde(rename = "descripcion_evento")]
    pub description: String,
    /// Position in the `ubicaciones` table.
    #[serde(rename = "ubicacion_evento")]
    pub location: usize,
}

impl StoredEvent {
    pub fn from_record(record: &Record) -> AgendaResult<Self> {
        serde_json::from_value(Value::Object(record.clone()))
            .map_err(|e| AgendaError::Schema(format!("event record: {e}")))
    }

    /// Values in [`EVENT_FIELDS`] order.
    pub fn values(&self) -> Vec<Value> {
        vec![
            Value::from(self.title.as_str()),
            Value::from(self.start.as_str()),
            Value::from(self.description.as_str()),
            Value::from(self.location),
        ]
    }

    pub fn hydrate(self, location: Location) -> EventView {
        EventView {
            title: self.title,
            start: self.start,
            description: self.description,
            location,
        }
    }
}

/// A place events can be booked at. Read-only for the event subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Location {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "direccion")]
    pub address: String,
}

impl Location {
    pub fn from_record(record: &Record) -> AgendaResult<Self> {
        serde_json::from_value(Value::Object(record.clone()))
            .map_err(|e| AgendaError::Schema(format!("location record: {e}")))
    }
}

/// An event with its location reference replaced by the full location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventView {
    #[serde(rename = "titulo_evento")]
    pub title: String,
    #[serde(rename = "fecha_hora_evento")]
    pub start: String,
    #[serde(rename = "descripcion_evento")]
    pub description: String,
    #[serde(rename = "ubicacion_evento")]
    pub location: Location,
}
