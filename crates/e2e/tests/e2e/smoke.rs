use {
    crate::helpers::{arguments, run},
    api_client::OrdersApi,
    axum::http::StatusCode,
    conformance::{Outcome, commands, scenarios},
    e2e::setup::{self, Mock},
    std::time::Duration,
};

#[tokio::test]
async fn conforming_service_passes_the_built_in_table() {
    let mock = Mock::order_service().await;

    assert_eq!(run(&mock.url, &["smoke"]).await, Outcome::Passed);
    assert_eq!(mock.requests().len(), 16);
}

#[tokio::test]
async fn every_mismatching_scenario_is_reported() {
    setup::init();
    // Answers everything with an empty orders array.
    let mock = Mock::fixed(StatusCode::OK, "[]").await;
    let api = OrdersApi::new(&mock.url, Duration::from_secs(5)).unwrap();
    let table = scenarios::smoke().unwrap();

    let failed = commands::run_scenarios(&api, &table)
        .await
        .into_iter()
        .map(|(scenario, _)| scenario.id.as_str())
        .collect::<Vec<_>>();
    assert_eq!(
        failed,
        ["S04", "S05", "S06", "S07", "S08", "S09", "S10", "S11", "S12", "S13", "S16"]
    );
    assert_eq!(mock.requests().len(), 16);
}

#[tokio::test]
async fn scenarios_from_a_file() {
    let mock = Mock::order_service().await;
    let file = setup::config_tmp_file(
        r#"[
            {
                "id": "C01",
                "name": "customer outside the window",
                "request": [{"method": "getOrders", "customerId": "CC0001", "fromTime": "2025-11-24T19:00:00", "toTime": "2025-11-25T01:00:00", "billStatus": null}],
                "expect": {"isError": false}
            },
            {
                "id": "C02",
                "name": "request that is not an object",
                "request": "getOrders",
                "expect": {"isError": true, "errorCode": "INVALID_PARAMETER"}
            }
        ]"#,
    );
    let path = file.to_str().unwrap();

    assert_eq!(
        run(&mock.url, &["smoke", "--scenarios", path]).await,
        Outcome::Passed
    );
    assert_eq!(mock.requests().len(), 2);
}

#[tokio::test]
async fn unexpected_error_code_fails() {
    let mock = Mock::order_service().await;
    let file = setup::config_tmp_file(
        r#"[{
            "id": "C01",
            "name": "unknown hash",
            "request": {"method": "updateStatus", "hash": "ab", "billStatus": 1},
            "expect": {"isError": true, "errorCode": "MISSING_PARAMETER"}
        }]"#,
    );
    let path = file.to_str().unwrap();
    assert_eq!(
        run(&mock.url, &["smoke", "--scenarios", path]).await,
        Outcome::Failed
    );
}

#[tokio::test]
async fn unreadable_scenario_file_fails() {
    setup::init();
    let mock = Mock::order_service().await;
    let args = arguments(&mock.url, &["smoke", "--scenarios", "/nonexistent/scenarios.json"]);

    assert_eq!(conformance::run(&args).await, Outcome::Failed);
    assert!(mock.requests().is_empty());
}
