//! Core pricing calculation functions.
//!
//! Pure functions for pricing math - no I/O, no logging, no shared state.
//! Arithmetic runs in `f64` at full precision; only the final outputs are
//! rounded to cents.

use rust_decimal::prelude::*;

use crate::pricing::requests::{BusinessType, PricingRequest};
use crate::pricing::responses::{ApplicableRates, CostBreakdown, PricingResult, TaxImpact};

/// Share of the price that fixed expenses, sale taxes and profit may take
/// once their sum reaches 100%. Known simplification: it keeps the
/// denominator positive and must not change without a pricing review.
pub const MAX_PRICE_SHARE: f64 = 0.9;

/// Flat PIS/COFINS rate used for most products
pub const PIS_COFINS_RATE: f64 = 3.65;

/// ISS rate applied to service businesses
pub const ISS_SERVICE_RATE: f64 = 5.0;

/// Interstate ICMS rate for any origin outside the table
pub const DEFAULT_INTERSTATE_ICMS: f64 = 7.0;

/// Margin below this fraction of the target profit triggers an advisory
const LOW_MARGIN_FACTOR: f64 = 0.8;

/// Sale taxes above this percentage trigger an advisory
const HIGH_SALE_TAX_PERCENT: f64 = 15.0;

pub const LOW_MARGIN_ADVICE: &str = "A margem calculada está abaixo da desejada. Considere:\n\
     1. Negociar melhor com fornecedores\n\
     2. Reduzir despesas variáveis\n\
     3. Revisar estrutura de custos fixos";

pub const HIGH_TAX_ADVICE: &str = "A carga tributária está elevada. Considere:\n\
     1. Avaliar mudança de regime tributário\n\
     2. Verificar benefícios fiscais do segmento\n\
     3. Consultar especialista tributário";

/// Interstate ICMS rates for one origin state
struct OriginRates {
    origin: &'static str,
    destinations: &'static [(&'static str, f64)],
    other: f64,
}

const ICMS_INTERSTATE_TABLE: &[OriginRates] = &[
    OriginRates {
        origin: "SP",
        destinations: &[("SP", 18.0), ("RJ", 12.0), ("MG", 12.0), ("PR", 12.0), ("RS", 12.0)],
        other: 7.0,
    },
    OriginRates {
        origin: "RJ",
        destinations: &[("RJ", 18.0), ("SP", 12.0), ("MG", 12.0)],
        other: 7.0,
    },
    OriginRates {
        origin: "MG",
        destinations: &[("MG", 18.0), ("SP", 12.0), ("RJ", 12.0)],
        other: 7.0,
    },
    OriginRates {
        origin: "PR",
        destinations: &[("PR", 18.0), ("SP", 12.0), ("SC", 12.0)],
        other: 7.0,
    },
];

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// The float is converted to a `Decimal` holding its exact binary value, so a
/// literal like `2.675` (stored as 2.67499...) rounds down rather than being
/// treated as a midpoint. Non-finite values are returned unchanged.
///
/// # Examples
/// ```
/// use meucfo_web::pricing::round_money;
///
/// assert_eq!(round_money(0.125, 2), 0.12);   // exact midpoint, rounds to even
/// assert_eq!(round_money(0.375, 2), 0.38);   // exact midpoint, rounds to even
/// assert_eq!(round_money(2.675, 2), 2.67);   // binary value is below the midpoint
/// assert_eq!(round_money(1.234, 2), 1.23);
/// ```
pub fn round_money(value: f64, places: u32) -> f64 {
    let Some(exact) = Decimal::from_f64_retain(value) else {
        return value;
    };
    let rounded = exact.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven);
    // Parse the decimal text so the result is the nearest f64 to the rounded value
    rounded.to_string().parse().unwrap_or(value)
}

/// Look up the interstate ICMS rate for a shipment, case-insensitively.
///
/// State codes are compared as given; surrounding whitespace is part of the
/// code, so a padded code never matches a table entry.
///
/// Unknown destinations fall back to the origin's own "other" rate; unknown
/// origins use [`DEFAULT_INTERSTATE_ICMS`] regardless of destination.
pub fn icms_interestadual(origin: &str, destination: &str) -> f64 {
    let Some(rates) = ICMS_INTERSTATE_TABLE
        .iter()
        .find(|rates| rates.origin.eq_ignore_ascii_case(origin))
    else {
        return DEFAULT_INTERSTATE_ICMS;
    };

    rates
        .destinations
        .iter()
        .find(|(state, _)| state.eq_ignore_ascii_case(destination))
        .map(|(_, rate)| *rate)
        .unwrap_or(rates.other)
}

/// Denominator of the markup-on-price formula.
///
/// `1 - (fixed + sale taxes + profit) / 100`, with the combined share clamped
/// to [`MAX_PRICE_SHARE`] once it reaches 100%.
pub fn price_denominator(
    fixed_expenses_percent: f64,
    sale_taxes_percent: f64,
    net_profit_percent: f64,
) -> f64 {
    let mut total_percentages =
        (fixed_expenses_percent + sale_taxes_percent + net_profit_percent) / 100.0;
    if total_percentages >= 1.0 {
        total_percentages = MAX_PRICE_SHARE;
    }
    1.0 - total_percentages
}

/// Calculate the sale price, margin, breakdown and advisories for a request.
///
/// Purchase taxes cascade: ICMS is charged on cost, IPI on cost plus ICMS.
/// Variable expenses are charged on the taxed cost. The price is then solved
/// so that fixed expenses, sale taxes and profit are exact shares of it.
pub fn calculate(request: &PricingRequest) -> PricingResult {
    let total_cost = request.product_cost + request.shipping_insurance;

    let icms_purchase = total_cost * (request.icms_purchase_percent / 100.0);
    let ipi = (total_cost + icms_purchase) * (request.ipi_percent / 100.0);
    let cost_with_taxes = total_cost + icms_purchase + ipi;

    let variable_expenses = cost_with_taxes * (request.variable_expenses_percent / 100.0);
    let cost_with_variable = cost_with_taxes + variable_expenses;

    let calculated_price = cost_with_variable
        / price_denominator(
            request.fixed_expenses_percent,
            request.sale_taxes_percent,
            request.net_profit_percent,
        );

    let sale_taxes = calculated_price * (request.sale_taxes_percent / 100.0);
    let fixed_expenses = calculated_price * (request.fixed_expenses_percent / 100.0);
    let net_revenue = calculated_price - sale_taxes - fixed_expenses - cost_with_variable;
    let margin = if calculated_price > 0.0 {
        (net_revenue / calculated_price) * 100.0
    } else {
        0.0
    };

    let mut recommendations = Vec::new();
    if margin < request.net_profit_percent * LOW_MARGIN_FACTOR {
        recommendations.push(LOW_MARGIN_ADVICE.to_string());
    }
    if request.sale_taxes_percent > HIGH_SALE_TAX_PERCENT {
        recommendations.push(HIGH_TAX_ADVICE.to_string());
    }

    let iss = match request.business_type {
        BusinessType::Service => ISS_SERVICE_RATE,
        BusinessType::Retail => 0.0,
    };

    PricingResult {
        calculated_price: round_money(calculated_price, 2),
        margin: round_money(margin, 2),
        cost_breakdown: CostBreakdown {
            product_cost: round_money(request.product_cost, 2),
            shipping_insurance: round_money(request.shipping_insurance, 2),
            icms_purchase: round_money(icms_purchase, 2),
            ipi: round_money(ipi, 2),
            variable_expenses: round_money(variable_expenses, 2),
            total_cost: round_money(cost_with_variable, 2),
            fixed_expenses: round_money(fixed_expenses, 2),
            sale_taxes: round_money(sale_taxes, 2),
            net_revenue: round_money(net_revenue, 2),
        },
        recommendations,
        tax_impact: TaxImpact {
            interstate_icms: icms_interestadual(&request.origin_state, &request.destination_state),
            tax_regime: request.tax_regime,
            applicable_rates: ApplicableRates {
                icms: request.icms_purchase_percent,
                ipi: request.ipi_percent,
                pis_cofins: PIS_COFINS_RATE,
                iss,
            },
        },
    }
}
