//! Pricing service functions.
//!
//! These wrap the pure calculator with input validation and the
//! what-if simulation used by the simulate endpoint.

use tracing::{debug, warn};

use super::calculators::{calculate, round_money};
use super::requests::{PricingRequest, PricingVariation, ValidationError};
use super::responses::{PricingResult, SimulationOutcome, SimulationResponse, VariationAnalysis};

/// Pricing calculation error types
#[derive(Debug, Clone, PartialEq)]
pub enum PricingError {
    InvalidRequest(ValidationError),
    InvalidVariation {
        index: usize,
        source: ValidationError,
    },
}

impl std::fmt::Display for PricingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PricingError::InvalidRequest(source) => write!(f, "Invalid pricing request: {}", source),
            PricingError::InvalidVariation { index, source } => {
                write!(f, "Invalid variation #{}: {}", index, source)
            }
        }
    }
}

impl std::error::Error for PricingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PricingError::InvalidRequest(source) => Some(source),
            PricingError::InvalidVariation { source, .. } => Some(source),
        }
    }
}

impl PricingError {
    /// The validation failure behind this error
    pub fn validation(&self) -> &ValidationError {
        match self {
            PricingError::InvalidRequest(source) => source,
            PricingError::InvalidVariation { source, .. } => source,
        }
    }
}

/// Validate a request from outside the process and calculate it.
pub fn calculate_validated(request: &PricingRequest) -> Result<PricingResult, PricingError> {
    request.validate().map_err(|e| {
        warn!(field = e.field(), "Rejected pricing request: {}", e);
        PricingError::InvalidRequest(e)
    })?;

    let result = calculate(request);
    debug!(
        price = result.calculated_price,
        margin = result.margin,
        recommendations = result.recommendations.len(),
        "Calculated price"
    );
    Ok(result)
}

/// Calculate the base request and every variation of it.
///
/// Each variation is applied to a copy of the base and validated on its own;
/// the first invalid one aborts the run with its index.
pub fn simulate(
    base: &PricingRequest,
    variations: &[PricingVariation],
) -> Result<SimulationResponse, PricingError> {
    let base_result = calculate_validated(base)?;

    let simulations = variations
        .iter()
        .enumerate()
        .map(|(index, variation)| {
            let varied = variation.apply(base);
            varied
                .validate()
                .map_err(|source| PricingError::InvalidVariation { index, source })?;
            Ok(SimulationOutcome {
                variation: variation.clone(),
                result: calculate(&varied),
            })
        })
        .collect::<Result<Vec<_>, PricingError>>()?;

    let variation_analysis = analyze_variations(&base_result, &simulations);
    debug!(
        simulations = simulations.len(),
        max_price_variation = variation_analysis.max_price_variation,
        "Simulated pricing variations"
    );

    Ok(SimulationResponse {
        base_result,
        simulations,
        variation_analysis,
    })
}

/// Measure how far each simulation moved price and margin from the base.
///
/// The most sensitive parameter is the set of fields changed by the
/// simulation with the largest price movement; the first one wins ties.
pub fn analyze_variations(
    base: &PricingResult,
    simulations: &[SimulationOutcome],
) -> VariationAnalysis {
    let mut max_price_variation = 0.0_f64;
    let mut max_margin_variation = 0.0_f64;
    let mut most_sensitive: Option<&SimulationOutcome> = None;

    for simulation in simulations {
        let price_delta = (simulation.result.calculated_price - base.calculated_price).abs();
        let margin_delta = (simulation.result.margin - base.margin).abs();

        if price_delta > max_price_variation {
            max_price_variation = price_delta;
            most_sensitive = Some(simulation);
        }
        max_margin_variation = max_margin_variation.max(margin_delta);
    }

    VariationAnalysis {
        most_sensitive_parameter: most_sensitive
            .map(|simulation| simulation.variation.changed_fields().join(",")),
        max_price_variation: round_money(max_price_variation, 2),
        max_margin_variation: round_money(max_margin_variation, 2),
    }
}
