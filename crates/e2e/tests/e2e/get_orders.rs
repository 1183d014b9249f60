use {
    crate::helpers::{get_orders, run},
    axum::http::StatusCode,
    conformance::Outcome,
    e2e::setup::{Mock, mock::unreachable_url, order_service::sample_orders},
    serde_json::{Value, json},
};

/// A service that answers every request with the given orders.
async fn returning(orders: Vec<Value>) -> Mock {
    Mock::fixed(StatusCode::OK, Value::Array(orders).to_string()).await
}

#[tokio::test]
async fn conforming_service_passes() {
    let mock = Mock::order_service().await;

    assert_eq!(run(&mock.url, &get_orders(&[])).await, Outcome::Passed);
    assert_eq!(
        run(&mock.url, &get_orders(&["--bill-flag", "1", "--bill-flag", "8"])).await,
        Outcome::Passed
    );
    assert_eq!(
        run(&mock.url, &get_orders(&["--customer-id", "AA0002"])).await,
        Outcome::Passed
    );
}

#[tokio::test]
async fn flags_are_sent_as_a_mask() {
    let mock = Mock::order_service().await;
    run(&mock.url, &get_orders(&["--bill-flag", "8", "--bill-flag", "1"])).await;
    run(&mock.url, &get_orders(&["--customer-id", "AA0001"])).await;

    assert_eq!(
        mock.requests(),
        [
            json!([{
                "method": "getOrders",
                "customerId": null,
                "fromTime": "2025-11-24T19:00:00",
                "toTime": "2025-11-25T01:00:00",
                "billStatus": 9,
            }]),
            json!([{
                "method": "getOrders",
                "customerId": "AA0001",
                "fromTime": "2025-11-24T19:00:00",
                "toTime": "2025-11-25T01:00:00",
                "billStatus": null,
            }]),
        ]
    );
}

#[tokio::test]
async fn tampered_hash_is_a_hash_mismatch() {
    let mut orders = sample_orders();
    orders.truncate(3);
    orders[1]["items"][0]["unitPrice"] = json!(1300);
    let mock = returning(orders).await;

    assert_eq!(run(&mock.url, &get_orders(&[])).await, Outcome::HashMismatch);
}

#[tokio::test]
async fn order_outside_the_window_fails() {
    // The last sample order lies outside the requested window.
    let mock = returning(sample_orders()).await;
    assert_eq!(run(&mock.url, &get_orders(&[])).await, Outcome::Failed);
}

#[tokio::test]
async fn order_outside_the_mask_fails() {
    let mut orders = sample_orders();
    orders.truncate(3);
    let mock = returning(orders).await;
    // The sample orders carry statuses 1, 2 and 8.
    assert_eq!(
        run(&mock.url, &get_orders(&["--bill-flag", "1", "--bill-flag", "8"])).await,
        Outcome::Failed
    );
}

#[tokio::test]
async fn several_orders_for_one_customer_fail() {
    let orders = sample_orders();
    let mock = returning(vec![orders[0].clone(), orders[0].clone()]).await;
    assert_eq!(
        run(&mock.url, &get_orders(&["--customer-id", "AA0001"])).await,
        Outcome::Failed
    );
}

#[tokio::test]
async fn schema_violation_fails_before_hashes_are_checked() {
    let mut orders = sample_orders();
    orders.truncate(1);
    orders[0]["hash"] = json!("not a hash");
    orders[0].as_object_mut().unwrap().remove("entryTime");
    let mock = returning(orders).await;
    assert_eq!(run(&mock.url, &get_orders(&[])).await, Outcome::Failed);
}

#[tokio::test]
async fn error_response_fails() {
    let mock = Mock::order_service().await;
    // Inverted window.
    let command = [
        "get-orders",
        "--from",
        "2025-11-25T01:00:00",
        "--to",
        "2025-11-24T19:00:00",
    ];
    assert_eq!(run(&mock.url, &command).await, Outcome::Failed);
}

#[tokio::test]
async fn unreachable_service_fails() {
    assert_eq!(
        run(&unreachable_url().await, &get_orders(&[])).await,
        Outcome::Failed
    );
}
