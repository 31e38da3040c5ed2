//! End-to-end tests against a live server.

use std::sync::Arc;

use price_calculator::observability::{Operation, RecordingReporter};
use price_calculator::pricing::PriceSettings;
use reqwest::StatusCode;

mod common;

#[tokio::test]
async fn test_set_then_calculate_scenario() {
    let server = common::start_server().await;
    let client = server.client();

    assert_eq!(client.calculate().await.unwrap().total_price, 0.0);

    let msg = client.set_base_price(100).await.unwrap();
    assert_eq!(msg.message, "Base price set");
    let msg = client.set_tax_rate(20).await.unwrap();
    assert_eq!(msg.message, "Tax rate set");

    assert_eq!(client.calculate().await.unwrap().total_price, 120.0);

    server.stop().await;
}

#[tokio::test]
async fn test_total_follows_last_set_values() {
    let server = common::start_server().await;
    let client = server.client();

    for (base, rate) in [(10.0, 0.0), (250.0, 8.0), (-40.0, 25.0), (0.5, 100.0)] {
        client.set_base_price(base).await.unwrap();
        client.set_tax_rate(rate).await.unwrap();
        let expected = base + base * rate / 100.0;
        assert_eq!(client.calculate().await.unwrap().total_price, expected);
    }

    server.stop().await;
}

#[tokio::test]
async fn test_non_numeric_value_is_rejected() {
    let server = common::start_server().await;
    let client = server.client();

    client.set_base_price(55).await.unwrap();

    let err = client.set_base_price("abc").await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    let err = client.set_tax_rate("twenty").await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));

    assert_eq!(
        server.store.get(),
        PriceSettings {
            base_price: 55.0,
            tax_rate: 0.0
        }
    );

    server.stop().await;
}

#[tokio::test]
async fn test_setting_same_value_twice_is_idempotent() {
    let server = common::start_server().await;
    let client = server.client();

    client.set_tax_rate(12.5).await.unwrap();
    let first = server.store.get();
    client.set_tax_rate(12.5).await.unwrap();
    assert_eq!(server.store.get(), first);

    server.stop().await;
}

#[tokio::test]
async fn test_calculate_ignores_request_body() {
    let server = common::start_server().await;
    server.client().set_base_price(10).await.unwrap();

    let res = reqwest::Client::builder()
        .no_proxy()
        .build()
        .unwrap()
        .post(format!("{}/calculate", server.url()))
        .json(&serde_json::json!({ "base_price": 999, "tax_rate": 999 }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, serde_json::json!({ "total_price": 10.0 }));

    server.stop().await;
}

#[tokio::test]
async fn test_error_body_is_plain_text() {
    let server = common::start_server().await;

    let res = reqwest::Client::builder()
        .no_proxy()
        .build()
        .unwrap()
        .post(format!("{}/setTaxRate/not-a-number", server.url()))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let content_type = res.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/plain"));
    assert_eq!(res.text().await.unwrap(), "Invalid tax rate");

    server.stop().await;
}

#[tokio::test]
async fn test_spans_reported_per_operation() {
    let reporter = Arc::new(RecordingReporter::new());
    let server = common::start_server_with(reporter.clone(), 0).await;
    let client = server.client();

    client.set_base_price(1).await.unwrap();
    client.set_tax_rate(2).await.unwrap();
    client.calculate().await.unwrap();

    assert_eq!(
        reporter.operations(),
        vec![
            Operation::SetBasePrice,
            Operation::SetTaxRate,
            Operation::CalculatePrice,
            Operation::CalculateTotalPrice,
        ]
    );

    server.stop().await;
}
