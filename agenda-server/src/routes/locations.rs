//! Location endpoints

use axum::{Json, Router, extract::State, routing::get};

use agenda_core::Location;

use crate::routes::{AppError, DataResponse};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/locations", get(list_locations))
}

/// GET /locations - List every location
async fn list_locations(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<Location>>>, AppError> {
    let locations = state.manager().await.locations().all()?;
    Ok(DataResponse::new(locations))
}
