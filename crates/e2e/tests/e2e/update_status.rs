use {
    crate::helpers::run,
    axum::http::StatusCode,
    conformance::Outcome,
    e2e::setup::{Mock, order_service::sample_orders},
    serde_json::json,
};

#[tokio::test]
async fn known_order_is_updated() {
    let mock = Mock::order_service().await;
    let hash = sample_orders()[1]["hash"].as_str().unwrap().to_string();

    let outcome = run(
        &mock.url,
        &["update-status", "--hash", hash.as_str(), "--bill-status", "8"],
    )
    .await;
    assert_eq!(outcome, Outcome::Passed);
    assert_eq!(
        mock.requests(),
        [json!({"method": "updateStatus", "hash": hash, "billStatus": 8})]
    );
}

#[tokio::test]
async fn unknown_order_fails() {
    let mock = Mock::order_service().await;
    let hash = "0".repeat(64);
    let outcome = run(
        &mock.url,
        &["updateStatus", "--hash", hash.as_str(), "--bill-status", "1"],
    )
    .await;
    assert_eq!(outcome, Outcome::Failed);
}

#[tokio::test]
async fn malformed_error_response_fails() {
    let mock = Mock::fixed(StatusCode::BAD_REQUEST, r#"{"errorCode": "ORDER_NOT_FOUND"}"#).await;
    let outcome = run(&mock.url, &["update-status", "--hash", "ab", "--bill-status", "1"]).await;
    assert_eq!(outcome, Outcome::Failed);
}
