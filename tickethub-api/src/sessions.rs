use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tickethub_catalog::{PromoOutcome, Quote, SeatMap};
use tickethub_order::{BookingSession, SelectionError, SessionError, SessionSnapshot};
use tickethub_shared::{Booking, Notice, Seat, SeatStatus};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::{AppState, SessionHandle};

#[derive(Debug, Deserialize)]
pub struct OpenShowRequest {
    pub event_id: String,
    pub show_id: String,
}

#[derive(Debug, Deserialize)]
pub struct PricingQuery {
    pub promo: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CheckoutRequest {
    pub promo: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SeatRow {
    pub row: String,
    pub seats: Vec<Seat>,
}

/// Seat map as the session sees it: seats it holds are shown `selected`
#[derive(Debug, Serialize)]
pub struct SeatMapView {
    pub show_id: String,
    pub available: usize,
    pub booked: usize,
    pub rows: Vec<SeatRow>,
}

impl SeatMapView {
    fn render(seat_map: &SeatMap, session: &BookingSession) -> Self {
        let rows = seat_map
            .rows()
            .into_iter()
            .map(|(row, seats)| SeatRow {
                row: row.to_string(),
                seats: seats
                    .into_iter()
                    .map(|s| {
                        if session.is_selected(&s.id) {
                            s.as_selected()
                        } else {
                            s.clone()
                        }
                    })
                    .collect(),
            })
            .collect();

        Self {
            show_id: seat_map.show_id.clone(),
            available: seat_map.count(SeatStatus::Available),
            booked: seat_map.count(SeatStatus::Booked),
            rows,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SelectionResponse {
    pub notice: Option<Notice>,
    pub session: SessionSnapshot,
    pub quote: Quote,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/{id}", get(get_session).delete(close_session))
        .route("/api/sessions/{id}/show", post(open_show))
        .route("/api/sessions/{id}/seats", get(seat_map).delete(clear_selection))
        .route("/api/sessions/{id}/seats/{seat}", post(select_seat).delete(deselect_seat))
        .route("/api/sessions/{id}/pricing", get(pricing))
        .route("/api/sessions/{id}/checkout", post(checkout))
}

pub(crate) async fn find(state: &AppState, id: Uuid) -> Result<Arc<SessionHandle>, AppError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session not found: {}", id)))
}

fn normalize_promo(promo: Option<&str>) -> Option<&str> {
    promo.map(str::trim).filter(|p| !p.is_empty())
}

async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<SessionSnapshot>) {
    let handle = state.sessions.create(state.deps.clone()).await;
    let snapshot = handle.session.lock().await.snapshot();
    (StatusCode::CREATED, Json(snapshot))
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let handle = find(&state, id).await?;
    let snapshot = handle.session.lock().await.snapshot();
    Ok(Json(snapshot))
}

async fn close_session(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode, AppError> {
    if state.sessions.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Session not found: {}", id)))
    }
}

async fn open_show(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<OpenShowRequest>,
) -> Result<Json<SeatMapView>, AppError> {
    let handle = find(&state, id).await?;
    let mut session = handle.session.lock().await;

    session.open_show(&req.event_id, &req.show_id)?;
    let seat_map = session.seat_map().ok_or(AppError::MissingContext)?;
    Ok(Json(SeatMapView::render(seat_map, &session)))
}

async fn seat_map(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SeatMapView>, AppError> {
    let handle = find(&state, id).await?;
    let session = handle.session.lock().await;

    let seat_map = session.seat_map().ok_or(AppError::MissingContext)?;
    Ok(Json(SeatMapView::render(seat_map, &session)))
}

async fn select_seat(
    State(state): State<AppState>,
    Path((id, seat_id)): Path<(Uuid, String)>,
) -> Result<Json<SelectionResponse>, AppError> {
    let handle = find(&state, id).await?;
    let mut session = handle.session.lock().await;

    match session.select(&seat_id) {
        Ok(notice) => {
            handle.notify(notice.clone());
            Ok(Json(SelectionResponse {
                notice: Some(notice),
                quote: session.quote(None),
                session: session.snapshot(),
            }))
        }
        Err(SessionError::Selection(e)) => {
            if let SelectionError::CapacityExceeded { max } = &e {
                handle.notify(Notice::capacity_exceeded(*max));
            }
            Err(SessionError::Selection(e).into())
        }
        Err(e) => Err(e.into()),
    }
}

async fn deselect_seat(
    State(state): State<AppState>,
    Path((id, seat_id)): Path<(Uuid, String)>,
) -> Result<Json<SelectionResponse>, AppError> {
    let handle = find(&state, id).await?;
    let mut session = handle.session.lock().await;

    let notice = session.deselect(&seat_id)?;
    if let Some(notice) = &notice {
        handle.notify(notice.clone());
    }
    Ok(Json(SelectionResponse {
        notice,
        quote: session.quote(None),
        session: session.snapshot(),
    }))
}

async fn clear_selection(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let handle = find(&state, id).await?;
    let mut session = handle.session.lock().await;
    session.clear()?;
    Ok(Json(session.snapshot()))
}

async fn pricing(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<PricingQuery>,
) -> Result<Json<Quote>, AppError> {
    let handle = find(&state, id).await?;
    let session = handle.session.lock().await;

    let quote = session.quote(normalize_promo(query.promo.as_deref()));
    match &quote.promo {
        PromoOutcome::Applied { code, percent } => handle.notify(Notice::promo_applied(code, *percent)),
        PromoOutcome::Rejected { .. } => handle.notify(Notice::promo_rejected()),
        PromoOutcome::None => {}
    }
    Ok(Json(quote))
}

async fn checkout(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Bytes,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let handle = find(&state, id).await?;
    // The body is optional; without one there is no promo code
    let req: CheckoutRequest = if body.is_empty() {
        CheckoutRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| AppError::BadRequest(e.to_string()))?
    };
    let promo = normalize_promo(req.promo.as_deref());

    // Unknown promo codes fail the checkout
    if let Some(code) = promo {
        state.deps.pricing.validate_promo(code)?;
    }

    let booking = state.recorder.checkout_session(&handle.session, promo).await?;
    handle.notify(Notice::booking_confirmed());
    Ok((StatusCode::CREATED, Json(booking)))
}
