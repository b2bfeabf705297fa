use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tickethub_shared::{Booking, Event, Show};

use crate::error::AppError;
use crate::state::AppState;

/// One booking with what is needed to print the ticket
#[derive(Debug, Serialize)]
pub struct TicketView {
    pub booking: Booking,
    pub event: Option<Event>,
    pub show: Option<Show>,
    pub qr_data: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/bookings", get(list_bookings))
        .route("/api/bookings/{id}", get(get_booking))
}

async fn list_bookings(State(state): State<AppState>) -> Result<Json<Vec<Booking>>, AppError> {
    Ok(Json(state.bookings.list().await?))
}

async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TicketView>, AppError> {
    let booking = state
        .bookings
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Booking not found: {}", id)))?;

    // Catalog entries can disappear after a booking was made
    let catalog = &state.deps.catalog;
    let event = catalog.event(&booking.event_id).ok().cloned();
    let show = catalog.show(&booking.show_id).ok().cloned();
    let qr_data = state.recorder.tickets().qr_data(&booking);

    Ok(Json(TicketView {
        booking,
        event,
        show,
        qr_data,
    }))
}
