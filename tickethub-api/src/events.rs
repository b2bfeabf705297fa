use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tickethub_shared::{Event, EventCategory, Show};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    pub category: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Serialize)]
pub struct EventDetail {
    pub event: Event,
    pub shows: Vec<Show>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/events", get(list_events))
        .route("/api/events/{id}", get(get_event))
}

async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Result<Json<Vec<Event>>, AppError> {
    let catalog = &state.deps.catalog;

    let events: Vec<&Event> = match query.category.as_deref().map(str::trim) {
        None | Some("") | Some("all") => catalog.events().iter().collect(),
        Some(raw) => {
            let category: EventCategory = raw.parse().map_err(AppError::BadRequest)?;
            catalog.by_category(category)
        }
    };

    Ok(Json(
        events
            .into_iter()
            .filter(|e| !query.featured || e.featured)
            .cloned()
            .collect(),
    ))
}

async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EventDetail>, AppError> {
    let catalog = &state.deps.catalog;
    let event = catalog.event(&id)?.clone();
    let shows = catalog.shows_for(&id).into_iter().cloned().collect();
    Ok(Json(EventDetail { event, shows }))
}
