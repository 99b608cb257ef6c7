//! Integration tests for the pricing HTTP endpoints
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use meucfo_web::{
    app,
    config::Config,
    pricing::calculators::{HIGH_TAX_ADVICE, LOW_MARGIN_ADVICE},
};
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_app() -> Router {
    let config = Config::from_source(|_| None).unwrap();
    app(&config)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn example_request() -> Value {
    json!({
        "business_type": "varejo",
        "product_cost": 100.0,
        "shipping_insurance": 0.0,
        "icms_purchase_percent": 0.0,
        "ipi_percent": 0.0,
        "variable_expenses_percent": 0.0,
        "fixed_expenses_percent": 10.0,
        "sale_taxes_percent": 10.0,
        "net_profit_percent": 10.0,
        "product_type": "outros",
        "tax_regime": "simples_nacional",
        "origin_state": "sp",
        "destination_state": "rj"
    })
}

#[tokio::test]
async fn test_health() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(test_app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_calculate_end_to_end() {
    let (status, body) = send(
        test_app(),
        post_json("/api/pricing/calculate", &example_request()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["calculated_price"], json!(142.86));
    assert_eq!(body["margin"], json!(10.0));
    assert_eq!(body["cost_breakdown"]["custo_produto"], json!(100.0));
    assert_eq!(body["cost_breakdown"]["tributos_venda"], json!(14.29));
    assert_eq!(body["cost_breakdown"]["despesas_fixas"], json!(14.29));
    assert_eq!(body["recommendations"], json!([]));
    assert_eq!(body["tax_impact"]["icms_interestadual"], json!(12.0));
    assert_eq!(body["tax_impact"]["regime_tributario"], json!("simples_nacional"));
    assert_eq!(
        body["tax_impact"]["aliquotas_aplicaveis"],
        json!({ "icms": 0.0, "ipi": 0.0, "pis_cofins": 3.65, "iss": 0.0 })
    );
}

#[tokio::test]
async fn test_calculate_emits_both_advisories_in_order() {
    let mut request = example_request();
    request["fixed_expenses_percent"] = json!(40.0);
    request["sale_taxes_percent"] = json!(40.0);
    request["net_profit_percent"] = json!(30.0);

    let (status, body) = send(test_app(), post_json("/api/pricing/calculate", &request)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["calculated_price"], json!(1000.0));
    assert_eq!(
        body["recommendations"],
        json!([LOW_MARGIN_ADVICE, HIGH_TAX_ADVICE])
    );
}

#[tokio::test]
async fn test_calculate_rejects_out_of_range_percent() {
    let mut request = example_request();
    request["ipi_percent"] = json!(120.0);

    let (status, body) = send(test_app(), post_json("/api/pricing/calculate", &request)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error_type"], json!("validation_error"));
    assert_eq!(body["details"]["field"], json!("ipi_percent"));
}

#[tokio::test]
async fn test_calculate_rejects_unknown_business_type() {
    let mut request = example_request();
    request["business_type"] = json!("atacado");

    let (status, body) = send(test_app(), post_json("/api/pricing/calculate", &request)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], json!("invalid_json"));
}

#[tokio::test]
async fn test_simulate() {
    let body = json!({
        "base_request": example_request(),
        "variations": [
            { "product_cost": 200.0 },
            { "sale_taxes_percent": 20.0 }
        ]
    });

    let (status, body) = send(test_app(), post_json("/api/pricing/simulate", &body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["base_result"]["calculated_price"], json!(142.86));
    assert_eq!(body["simulations"].as_array().unwrap().len(), 2);
    assert_eq!(body["simulations"][0]["variation"], json!({ "product_cost": 200.0 }));
    assert_eq!(body["simulations"][0]["result"]["calculated_price"], json!(285.71));
    assert_eq!(
        body["variation_analysis"]["most_sensitive_parameter"],
        json!("product_cost")
    );
}

#[tokio::test]
async fn test_simulate_reports_invalid_variation_index() {
    let body = json!({
        "base_request": example_request(),
        "variations": [
            { "product_cost": 50.0 },
            { "net_profit_percent": -1.0 }
        ]
    });

    let (status, body) = send(test_app(), post_json("/api/pricing/simulate", &body)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"]["variation_index"], json!(1));
    assert_eq!(body["details"]["field"], json!("net_profit_percent"));
}

#[tokio::test]
async fn test_interstate_rate_lookup() {
    let cases = [("sp", "rj", 12.0), ("SP", "SP", 18.0), ("SP", "BA", 7.0), ("BA", "SP", 7.0)];

    for (origin, destination, rate) in cases {
        let request = Request::builder()
            .uri(format!("/api/pricing/icms/{}/{}", origin, destination))
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(test_app(), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["origin"], json!(origin.to_uppercase()));
        assert_eq!(body["rate"], json!(rate));
    }
}

#[tokio::test]
async fn test_interstate_rate_padded_code_is_unmatched() {
    let request = Request::builder()
        .uri("/api/pricing/icms/%20sp/rj")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(test_app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["origin"], json!(" SP"));
    assert_eq!(body["destination"], json!("RJ"));
    assert_eq!(body["rate"], json!(7.0));
}

#[tokio::test]
async fn test_calculate_padded_state_uses_fallback_rate() {
    let mut request = example_request();
    request["origin_state"] = json!("SP ");

    let (status, body) = send(test_app(), post_json("/api/pricing/calculate", &request)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tax_impact"]["icms_interestadual"], json!(7.0));
}
