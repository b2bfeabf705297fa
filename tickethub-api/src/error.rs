use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde_json::json;
use tickethub_catalog::{CatalogError, PricingError};
use tickethub_core::CoreError;
use tickethub_order::{CheckoutError, SelectionError, SessionError};

/// Where a request without an open event/show is sent back to
pub const CATALOG_ENTRY: &str = "/api/events";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Unprocessable(String),
    #[error("No event or show selected")]
    MissingContext,
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::MissingContext => {
                return Redirect::to(CATALOG_ENTRY).into_response();
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {:#}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        AppError::NotFound(err.to_string())
    }
}

impl From<PricingError> for AppError {
    fn from(err: PricingError) -> Self {
        AppError::Unprocessable(err.to_string())
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        AppError::Anyhow(err.into())
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            // An unknown event or show, or nothing selected, leaves no context to book
            SessionError::MissingBookingContext
            | SessionError::Catalog(_)
            | SessionError::EmptySelection => AppError::MissingContext,
            SessionError::Selection(SelectionError::CapacityExceeded { .. })
            | SessionError::Selection(SelectionError::UnavailableSeat(_))
            | SessionError::CheckoutInProgress => AppError::Conflict(err.to_string()),
            SessionError::UnknownSeat(_) => AppError::NotFound(err.to_string()),
        }
    }
}

impl From<CheckoutError> for AppError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::Session(e) => e.into(),
            CheckoutError::AlreadyProcessing(_) | CheckoutError::AlreadyCompleted(_) => {
                AppError::Conflict(err.to_string())
            }
            CheckoutError::Payment(CoreError::PaymentDeclined(_)) => AppError::Conflict(err.to_string()),
            CheckoutError::Payment(e) | CheckoutError::Storage(e) => e.into(),
        }
    }
}
