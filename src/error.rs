//! Error handling for the application

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::pricing::{PricingError, PricingErrorResponse};

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid JSON body: {0}")]
    InvalidJson(#[from] JsonRejection),

    #[error(transparent)]
    Pricing(#[from] PricingError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::InvalidJson(rejection) => {
                tracing::warn!("Rejected request body: {}", rejection.body_text());
                (
                    StatusCode::BAD_REQUEST,
                    PricingErrorResponse {
                        error_type: "invalid_json".to_string(),
                        message: rejection.body_text(),
                        details: None,
                    },
                )
            }
            AppError::Pricing(e) => {
                let mut details = json!({ "field": e.validation().field() });
                if let PricingError::InvalidVariation { index, .. } = e {
                    details["variation_index"] = json!(index);
                }
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    PricingErrorResponse {
                        error_type: "validation_error".to_string(),
                        message: e.to_string(),
                        details: Some(details),
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
