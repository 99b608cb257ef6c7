//! HTTP routes for the pricing calculator.

use axum::{
    extract::{rejection::JsonRejection, Path},
    routing::{get, post},
    Json, Router,
};

use crate::error::Result;

use super::calculators::icms_interestadual;
use super::requests::{PricingRequest, SimulateRequest};
use super::responses::{InterstateRateResponse, PricingResult, SimulationResponse};
use super::services;

/// Pricing routes, nested under `/api/pricing` by the application
pub fn router() -> Router {
    Router::new()
        .route("/calculate", post(calculate))
        .route("/simulate", post(simulate))
        .route("/icms/:origin/:destination", get(interstate_rate))
}

/// Calculate a sale price
async fn calculate(
    payload: std::result::Result<Json<PricingRequest>, JsonRejection>,
) -> Result<Json<PricingResult>> {
    let Json(request) = payload?;
    tracing::debug!(
        business_type = ?request.business_type,
        origin = %request.origin_state,
        destination = %request.destination_state,
        "Pricing calculation requested"
    );

    let result = services::calculate_validated(&request)?;
    Ok(Json(result))
}

/// Simulate variations around a base request
async fn simulate(
    payload: std::result::Result<Json<SimulateRequest>, JsonRejection>,
) -> Result<Json<SimulationResponse>> {
    let Json(body) = payload?;
    let response = services::simulate(&body.base_request, &body.variations)?;
    Ok(Json(response))
}

/// Look up the interstate ICMS rate between two states
async fn interstate_rate(
    Path((origin, destination)): Path<(String, String)>,
) -> Json<InterstateRateResponse> {
    let rate = icms_interestadual(&origin, &destination);
    Json(InterstateRateResponse {
        origin: origin.to_ascii_uppercase(),
        destination: destination.to_ascii_uppercase(),
        rate,
    })
}
