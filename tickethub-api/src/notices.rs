use axum::{
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
    Router,
};
use futures_util::stream::{Stream, StreamExt};
use tokio_stream::wrappers::BroadcastStream;
use uuid::Uuid;

use crate::error::AppError;
use crate::sessions::find;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/sessions/{id}/notices", get(stream_notices))
}

/// Server-sent stream of a session's notices (seat changes, promo results,
/// hold expiry, confirmations)
async fn stream_notices(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, AppError> {
    let handle = find(&state, id).await?;

    let stream = BroadcastStream::new(handle.subscribe()).filter_map(move |result| async move {
        match result {
            Ok(notice) => Some(Event::default().event("notice").json_data(&notice)),
            Err(e) => {
                tracing::warn!(session_id = %id, error = %e, "Notice stream lagged");
                None
            }
        }
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
