//! Response DTOs for pricing API endpoints.

use serde::{Deserialize, Serialize};

use super::requests::{PricingVariation, TaxRegime};

/// Intermediate cost components of a calculation, rounded to cents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    #[serde(rename = "custo_produto")]
    pub product_cost: f64,
    #[serde(rename = "frete_seguro")]
    pub shipping_insurance: f64,
    #[serde(rename = "icms_compra")]
    pub icms_purchase: f64,
    #[serde(rename = "ipi")]
    pub ipi: f64,
    #[serde(rename = "despesas_variaveis")]
    pub variable_expenses: f64,
    /// Cost after purchase taxes and variable expenses
    #[serde(rename = "custo_total")]
    pub total_cost: f64,
    #[serde(rename = "despesas_fixas")]
    pub fixed_expenses: f64,
    #[serde(rename = "tributos_venda")]
    pub sale_taxes: f64,
    #[serde(rename = "receita_liquida")]
    pub net_revenue: f64,
}

/// Tax rates that apply to the request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicableRates {
    pub icms: f64,
    pub ipi: f64,
    pub pis_cofins: f64,
    pub iss: f64,
}

/// Tax detail attached to a calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxImpact {
    #[serde(rename = "icms_interestadual")]
    pub interstate_icms: f64,
    #[serde(rename = "regime_tributario")]
    pub tax_regime: TaxRegime,
    #[serde(rename = "aliquotas_aplicaveis")]
    pub applicable_rates: ApplicableRates,
}

/// Response for a price calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    pub calculated_price: f64,
    /// Net revenue as a percentage of the price
    pub margin: f64,
    pub cost_breakdown: CostBreakdown,
    pub recommendations: Vec<String>,
    pub tax_impact: TaxImpact,
}

/// One simulated variation and its outcome
#[derive(Debug, Clone, Serialize)]
pub struct SimulationOutcome {
    pub variation: PricingVariation,
    pub result: PricingResult,
}

/// How far the simulations moved away from the base result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariationAnalysis {
    pub most_sensitive_parameter: Option<String>,
    pub max_price_variation: f64,
    pub max_margin_variation: f64,
}

/// Response for a simulation run
#[derive(Debug, Clone, Serialize)]
pub struct SimulationResponse {
    pub base_result: PricingResult,
    pub simulations: Vec<SimulationOutcome>,
    pub variation_analysis: VariationAnalysis,
}

/// Response for an interstate ICMS lookup
#[derive(Debug, Serialize)]
pub struct InterstateRateResponse {
    pub origin: String,
    pub destination: String,
    pub rate: f64,
}

/// Generic pricing error response
#[derive(Debug, Serialize)]
pub struct PricingErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
