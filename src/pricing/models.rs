//! Storage and notification shapes for pricing calculations.
//!
//! Nothing here talks to a database or a webhook; these are the flat record
//! and event payload that the collaborators persist and forward.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::requests::{BusinessType, PricingRequest, ProductType, TaxRegime};
use super::responses::{ApplicableRates, CostBreakdown, PricingResult, TaxImpact};

/// Event name used when forwarding a calculation for analysis
pub const PRICING_CALCULATION_EVENT: &str = "pricing_calculation";

/// A calculation flattened into a single row: every request field, every
/// result field, the identifiers and the creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRecord {
    pub id: i64,
    pub user_id: i64,

    // Request
    pub business_type: BusinessType,
    pub product_cost: f64,
    pub shipping_insurance: f64,
    pub icms_purchase_percent: f64,
    pub ipi_percent: f64,
    pub variable_expenses_percent: f64,
    pub fixed_expenses_percent: f64,
    pub sale_taxes_percent: f64,
    pub net_profit_percent: f64,
    pub product_type: ProductType,
    pub tax_regime: TaxRegime,
    pub origin_state: String,
    pub destination_state: String,

    // Result
    pub calculated_price: f64,
    pub margin: f64,
    pub breakdown_product_cost: f64,
    pub breakdown_shipping_insurance: f64,
    pub breakdown_icms_purchase: f64,
    pub breakdown_ipi: f64,
    pub breakdown_variable_expenses: f64,
    pub breakdown_total_cost: f64,
    pub breakdown_fixed_expenses: f64,
    pub breakdown_sale_taxes: f64,
    pub breakdown_net_revenue: f64,
    pub recommendations: Vec<String>,
    pub icms_interestadual: f64,
    pub rate_icms: f64,
    pub rate_ipi: f64,
    pub rate_pis_cofins: f64,
    pub rate_iss: f64,

    pub created_at: DateTime<Utc>,
}

impl PricingRecord {
    /// Flatten a request/result pair into a record
    pub fn new(
        id: i64,
        user_id: i64,
        request: &PricingRequest,
        result: &PricingResult,
        created_at: DateTime<Utc>,
    ) -> Self {
        let breakdown = &result.cost_breakdown;
        let rates = &result.tax_impact.applicable_rates;

        Self {
            id,
            user_id,
            business_type: request.business_type,
            product_cost: request.product_cost,
            shipping_insurance: request.shipping_insurance,
            icms_purchase_percent: request.icms_purchase_percent,
            ipi_percent: request.ipi_percent,
            variable_expenses_percent: request.variable_expenses_percent,
            fixed_expenses_percent: request.fixed_expenses_percent,
            sale_taxes_percent: request.sale_taxes_percent,
            net_profit_percent: request.net_profit_percent,
            product_type: request.product_type,
            tax_regime: request.tax_regime,
            origin_state: request.origin_state.clone(),
            destination_state: request.destination_state.clone(),
            calculated_price: result.calculated_price,
            margin: result.margin,
            breakdown_product_cost: breakdown.product_cost,
            breakdown_shipping_insurance: breakdown.shipping_insurance,
            breakdown_icms_purchase: breakdown.icms_purchase,
            breakdown_ipi: breakdown.ipi,
            breakdown_variable_expenses: breakdown.variable_expenses,
            breakdown_total_cost: breakdown.total_cost,
            breakdown_fixed_expenses: breakdown.fixed_expenses,
            breakdown_sale_taxes: breakdown.sale_taxes,
            breakdown_net_revenue: breakdown.net_revenue,
            recommendations: result.recommendations.clone(),
            icms_interestadual: result.tax_impact.interstate_icms,
            rate_icms: rates.icms,
            rate_ipi: rates.ipi,
            rate_pis_cofins: rates.pis_cofins,
            rate_iss: rates.iss,
            created_at,
        }
    }

    /// Rebuild the request this record was created from
    pub fn request(&self) -> PricingRequest {
        PricingRequest {
            business_type: self.business_type,
            product_cost: self.product_cost,
            shipping_insurance: self.shipping_insurance,
            icms_purchase_percent: self.icms_purchase_percent,
            ipi_percent: self.ipi_percent,
            variable_expenses_percent: self.variable_expenses_percent,
            fixed_expenses_percent: self.fixed_expenses_percent,
            sale_taxes_percent: self.sale_taxes_percent,
            net_profit_percent: self.net_profit_percent,
            product_type: self.product_type,
            tax_regime: self.tax_regime,
            origin_state: self.origin_state.clone(),
            destination_state: self.destination_state.clone(),
        }
    }

    /// Rebuild the stored result
    pub fn result(&self) -> PricingResult {
        PricingResult {
            calculated_price: self.calculated_price,
            margin: self.margin,
            cost_breakdown: CostBreakdown {
                product_cost: self.breakdown_product_cost,
                shipping_insurance: self.breakdown_shipping_insurance,
                icms_purchase: self.breakdown_icms_purchase,
                ipi: self.breakdown_ipi,
                variable_expenses: self.breakdown_variable_expenses,
                total_cost: self.breakdown_total_cost,
                fixed_expenses: self.breakdown_fixed_expenses,
                sale_taxes: self.breakdown_sale_taxes,
                net_revenue: self.breakdown_net_revenue,
            },
            recommendations: self.recommendations.clone(),
            tax_impact: TaxImpact {
                interstate_icms: self.icms_interestadual,
                tax_regime: self.tax_regime,
                applicable_rates: ApplicableRates {
                    icms: self.rate_icms,
                    ipi: self.rate_ipi,
                    pis_cofins: self.rate_pis_cofins,
                    iss: self.rate_iss,
                },
            },
        }
    }
}

/// Body of a calculation notification
#[derive(Debug, Clone, Serialize)]
pub struct CalculationEventData {
    pub calculation_id: i64,
    pub user_id: i64,
    pub request: PricingRequest,
    pub result: PricingResult,
}

/// Notification envelope forwarded to the analysis webhook
#[derive(Debug, Clone, Serialize)]
pub struct CalculationEvent {
    pub event: &'static str,
    pub data: CalculationEventData,
}

impl CalculationEvent {
    pub fn pricing_calculation(
        calculation_id: i64,
        user_id: i64,
        request: PricingRequest,
        result: PricingResult,
    ) -> Self {
        Self {
            event: PRICING_CALCULATION_EVENT,
            data: CalculationEventData {
                calculation_id,
                user_id,
                request,
                result,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::calculators::calculate;
    use chrono::TimeZone;
    use serde_json::json;

    fn sample_request() -> PricingRequest {
        PricingRequest {
            business_type: BusinessType::Service,
            product_cost: 250.0,
            shipping_insurance: 15.0,
            icms_purchase_percent: 12.0,
            ipi_percent: 0.0,
            variable_expenses_percent: 4.0,
            fixed_expenses_percent: 10.0,
            sale_taxes_percent: 18.0,
            net_profit_percent: 12.0,
            product_type: ProductType::Services,
            tax_regime: TaxRegime::PresumedProfit,
            origin_state: "MG".to_string(),
            destination_state: "RJ".to_string(),
        }
    }

    #[test]
    fn test_record_flattens_every_field() {
        let request = sample_request();
        let result = calculate(&request);
        let created_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        let record = PricingRecord::new(42, 7, &request, &result, created_at);

        assert_eq!(record.id, 42);
        assert_eq!(record.user_id, 7);
        assert_eq!(record.created_at, created_at);
        assert_eq!(record.calculated_price, result.calculated_price);
        assert_eq!(record.breakdown_net_revenue, result.cost_breakdown.net_revenue);
        assert_eq!(record.icms_interestadual, 12.0);
        assert_eq!(record.rate_iss, 5.0);
        assert_eq!(record.request(), request);
        assert_eq!(record.result(), result);
    }

    #[test]
    fn test_record_serializes_flat() {
        let request = sample_request();
        let result = calculate(&request);
        let record = PricingRecord::new(1, 2, &request, &result, Utc::now());

        let value = serde_json::to_value(&record).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object["business_type"], json!("servicos"));
        assert_eq!(object["tax_regime"], json!("lucro_presumido"));
        assert!(object.values().all(|v| !v.is_object()));
    }

    #[test]
    fn test_calculation_event_payload() {
        let request = sample_request();
        let result = calculate(&request);

        let event = CalculationEvent::pricing_calculation(99, 7, request, result.clone());
        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(value["event"], json!("pricing_calculation"));
        assert_eq!(value["data"]["calculation_id"], json!(99));
        assert_eq!(value["data"]["user_id"], json!(7));
        assert_eq!(value["data"]["request"]["origin_state"], json!("MG"));
        assert_eq!(
            value["data"]["result"]["calculated_price"],
            json!(result.calculated_price)
        );
    }
}
