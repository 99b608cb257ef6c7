//! Request DTOs for pricing API endpoints.

use serde::{Deserialize, Serialize};

/// Kind of business the price is being computed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BusinessType {
    #[serde(rename = "varejo", alias = "retail")]
    Retail,
    #[serde(rename = "servicos", alias = "service")]
    Service,
}

/// Product category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductType {
    #[serde(rename = "alimenticio", alias = "food")]
    Food,
    #[serde(rename = "eletronicos", alias = "electronics")]
    Electronics,
    #[serde(rename = "vestuario", alias = "apparel")]
    Apparel,
    #[serde(rename = "farmacia", alias = "pharmacy")]
    Pharmacy,
    #[serde(rename = "servicos", alias = "services")]
    Services,
    #[serde(rename = "outros", alias = "other")]
    Other,
}

/// Brazilian tax regime of the seller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxRegime {
    #[serde(rename = "simples_nacional", alias = "simplified")]
    Simplified,
    #[serde(rename = "lucro_presumido", alias = "presumed_profit")]
    PresumedProfit,
    #[serde(rename = "lucro_real", alias = "real_profit")]
    RealProfit,
}

impl TaxRegime {
    /// Wire name of the regime
    pub fn as_str(&self) -> &'static str {
        match self {
            TaxRegime::Simplified => "simples_nacional",
            TaxRegime::PresumedProfit => "lucro_presumido",
            TaxRegime::RealProfit => "lucro_real",
        }
    }
}

/// Request to calculate a sale price.
///
/// Currency fields are non-negative amounts; percentage fields are whole
/// percentages in `[0, 100]`. Call [`PricingRequest::validate`] before handing
/// a request that came from outside the process to the calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRequest {
    pub business_type: BusinessType,
    pub product_cost: f64,
    #[serde(default)]
    pub shipping_insurance: f64,
    #[serde(default)]
    pub icms_purchase_percent: f64,
    #[serde(default)]
    pub ipi_percent: f64,
    #[serde(default, alias = "variable_expenses")]
    pub variable_expenses_percent: f64,
    #[serde(default)]
    pub fixed_expenses_percent: f64,
    #[serde(default)]
    pub sale_taxes_percent: f64,
    #[serde(default)]
    pub net_profit_percent: f64,
    pub product_type: ProductType,
    pub tax_regime: TaxRegime,
    pub origin_state: String,
    pub destination_state: String,
}

/// Rejection of a request that must not reach the calculator
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("{field} must be a positive value (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be between 0 and 100 (got {value})")]
    OutOfRange { field: &'static str, value: f64 },
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::NotFinite { field }
            | ValidationError::Negative { field, .. }
            | ValidationError::OutOfRange { field, .. } => field,
        }
    }
}

impl PricingRequest {
    fn currency_fields(&self) -> [(&'static str, f64); 2] {
        [
            ("product_cost", self.product_cost),
            ("shipping_insurance", self.shipping_insurance),
        ]
    }

    fn percent_fields(&self) -> [(&'static str, f64); 6] {
        [
            ("icms_purchase_percent", self.icms_purchase_percent),
            ("ipi_percent", self.ipi_percent),
            ("variable_expenses_percent", self.variable_expenses_percent),
            ("fixed_expenses_percent", self.fixed_expenses_percent),
            ("sale_taxes_percent", self.sale_taxes_percent),
            ("net_profit_percent", self.net_profit_percent),
        ]
    }

    /// Check the numeric invariants, reporting the first violation in field order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in self.currency_fields() {
            if !value.is_finite() {
                return Err(ValidationError::NotFinite { field });
            }
            if value < 0.0 {
                return Err(ValidationError::Negative { field, value });
            }
        }

        for (field, value) in self.percent_fields() {
            if !value.is_finite() {
                return Err(ValidationError::NotFinite { field });
            }
            if !(0.0..=100.0).contains(&value) {
                return Err(ValidationError::OutOfRange { field, value });
            }
        }

        Ok(())
    }
}

/// Partial override of a [`PricingRequest`] used by simulations.
///
/// Absent fields keep the base request's value. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingVariation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_type: Option<BusinessType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_insurance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icms_purchase_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipi_percent: Option<f64>,
    #[serde(
        default,
        alias = "variable_expenses",
        skip_serializing_if = "Option::is_none"
    )]
    pub variable_expenses_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_expenses_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_taxes_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_profit_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<ProductType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_regime: Option<TaxRegime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_state: Option<String>,
}

impl PricingVariation {
    /// Build a new request from `base` with this variation's fields applied
    pub fn apply(&self, base: &PricingRequest) -> PricingRequest {
        PricingRequest {
            business_type: self.business_type.unwrap_or(base.business_type),
            product_cost: self.product_cost.unwrap_or(base.product_cost),
            shipping_insurance: self.shipping_insurance.unwrap_or(base.shipping_insurance),
            icms_purchase_percent: self
                .icms_purchase_percent
                .unwrap_or(base.icms_purchase_percent),
            ipi_percent: self.ipi_percent.unwrap_or(base.ipi_percent),
            variable_expenses_percent: self
                .variable_expenses_percent
                .unwrap_or(base.variable_expenses_percent),
            fixed_expenses_percent: self
                .fixed_expenses_percent
                .unwrap_or(base.fixed_expenses_percent),
            sale_taxes_percent: self.sale_taxes_percent.unwrap_or(base.sale_taxes_percent),
            net_profit_percent: self.net_profit_percent.unwrap_or(base.net_profit_percent),
            product_type: self.product_type.unwrap_or(base.product_type),
            tax_regime: self.tax_regime.unwrap_or(base.tax_regime),
            origin_state: self
                .origin_state
                .clone()
                .unwrap_or_else(|| base.origin_state.clone()),
            destination_state: self
                .destination_state
                .clone()
                .unwrap_or_else(|| base.destination_state.clone()),
        }
    }

    /// Wire names of the fields this variation overrides, in declaration order
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let present = [
            ("business_type", self.business_type.is_some()),
            ("product_cost", self.product_cost.is_some()),
            ("shipping_insurance", self.shipping_insurance.is_some()),
            ("icms_purchase_percent", self.icms_purchase_percent.is_some()),
            ("ipi_percent", self.ipi_percent.is_some()),
            (
                "variable_expenses_percent",
                self.variable_expenses_percent.is_some(),
            ),
            ("fixed_expenses_percent", self.fixed_expenses_percent.is_some()),
            ("sale_taxes_percent", self.sale_taxes_percent.is_some()),
            ("net_profit_percent", self.net_profit_percent.is_some()),
            ("product_type", self.product_type.is_some()),
            ("tax_regime", self.tax_regime.is_some()),
            ("origin_state", self.origin_state.is_some()),
            ("destination_state", self.destination_state.is_some()),
        ];

        present
            .into_iter()
            .filter_map(|(name, is_set)| is_set.then_some(name))
            .collect()
    }
}

/// Request to simulate variations around a base request
#[derive(Debug, Deserialize)]
pub struct SimulateRequest {
    pub base_request: PricingRequest,
    #[serde(default)]
    pub variations: Vec<PricingVariation>,
}
