//! Event endpoints

use std::fmt;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    routing::get,
};
use serde::Deserialize;
use serde_json::{Map, Value};

use agenda_core::{AgendaError, EventView, schedule};

use crate::routes::{AppError, DataResponse, MessageResponse};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route(
            "/events/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
}

#[derive(Clone, Copy)]
enum FieldType {
    Text,
    Integer,
}

impl FieldType {
    fn matches(self, value: &Value) -> bool {
        match self {
            FieldType::Text => value.is_string(),
            FieldType::Integer => value.is_i64() || value.is_u64(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FieldType::Text => write!(f, "texto"),
            FieldType::Integer => write!(f, "entero"),
        }
    }
}

const EVENT_BODY: [(&str, FieldType); 4] = [
    ("titulo_evento", FieldType::Text),
    ("fecha_hora_evento", FieldType::Text),
    ("descripcion_evento", FieldType::Text),
    ("ubicacion_evento", FieldType::Integer),
];

/// Request body for creating or replacing an event
#[derive(Deserialize)]
pub struct EventRequest {
    #[serde(rename = "titulo_evento")]
    pub title: String,
    /// `YYYY-MM-DD HH:MM:SS`, parsed only after the shape check.
    #[serde(rename = "fecha_hora_evento")]
    pub start: String,
    #[serde(rename = "descripcion_evento")]
    pub description: String,
    #[serde(rename = "ubicacion_evento")]
    pub location: i128,
}

impl EventRequest {
    /// Presence and type checks only. Missing fields are reported together,
    /// then the first field with the wrong type.
    fn from_body(body: &[u8]) -> Result<Self, AppError> {
        let fields: Map<String, Value> = serde_json::from_slice(body).map_err(|_| {
            AppError::BadRequest("El cuerpo de la petición debe ser un objeto JSON".into())
        })?;

        let missing: Vec<&str> = EVENT_BODY
            .iter()
            .map(|(name, _)| *name)
            .filter(|name| !fields.contains_key(*name))
            .collect();
        if !missing.is_empty() {
            return Err(AppError::BadRequest(format!(
                "Faltan campos: {}",
                missing.join(", ")
            )));
        }

        for (name, kind) in EVENT_BODY {
            if !kind.matches(&fields[name]) {
                return Err(AppError::BadRequest(format!(
                    "El campo '{name}' debe ser de tipo {kind}"
                )));
            }
        }

        serde_json::from_value(Value::Object(fields))
            .map_err(|e| AppError::BadRequest(e.to_string()))
    }
}

/// Only plain decimal digits route to an event, anything else is a 404.
/// A numeric id too large for any position is simply not found (500).
fn parse_id(raw: &str) -> Result<usize, AppError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::NotFound(format!("No existe la ruta /events/{raw}")));
    }
    raw.parse()
        .map_err(|_| AppError::Internal(AgendaError::NotFound.into()))
}

/// GET /events - List every event with its location
async fn list_events(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<EventView>>>, AppError> {
    let events = state.manager().await.list_events()?;
    Ok(DataResponse::new(events))
}

/// POST /events - Create a new event
async fn create_event(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<MessageResponse>, AppError> {
    let req = EventRequest::from_body(&body)?;
    let start = schedule::parse_start(&req.start)?;

    state
        .manager()
        .await
        .create_event(&req.title, start, &req.description, req.location)?;

    Ok(MessageResponse::new("Evento creado"))
}

/// GET /events/:id - One event with its location
async fn get_event(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<DataResponse<EventView>>, AppError> {
    let id = parse_id(&raw_id)?;
    let event = state.manager().await.get_event(id)?;
    Ok(DataResponse::new(event))
}

/// PUT /events/:id - Replace an event
async fn update_event(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&raw_id)?;
    let req = EventRequest::from_body(&body)?;
    let start = schedule::parse_start(&req.start)?;

    state
        .manager()
        .await
        .update_event(&req.title, start, &req.description, req.location, id)?;

    Ok(MessageResponse::new(format!(
        "Evento ({}) actualizado",
        schedule::clean_title(&req.title)
    )))
}

/// DELETE /events/:id - Remove an event
async fn delete_event(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&raw_id)?;
    let removed = state.manager().await.delete_event(id)?;
    Ok(MessageResponse::new(format!(
        "Evento ({}) eliminado",
        removed.title
    )))
}
