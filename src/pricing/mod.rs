//! Pricing engine module for MeuCFO.ai.
//!
//! Derives a sale price, margin, tax breakdown and advisories from cost and
//! tax inputs. The calculator is pure; routes and services add validation,
//! simulations and the JSON call surface around it.

pub mod calculators;
pub mod models;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::{calculate, icms_interestadual, round_money};
pub use models::{CalculationEvent, PricingRecord};
pub use requests::{
    BusinessType, PricingRequest, PricingVariation, ProductType, TaxRegime, ValidationError,
};
pub use responses::{PricingErrorResponse, PricingResult};
pub use routes::router;
pub use services::{simulate, PricingError};
