//! The three commands. Each prints the service's response followed by the
//! verdict to stdout and returns the [`Outcome`].

use {
    crate::{
        Outcome,
        arguments,
        scenarios::{Scenario, ScenarioFailure},
    },
    api_client::{ApiResponse, OrdersApi},
    model::{BillStatusMask, GetOrders, Request, UpdateStatus},
    order_validation::{
        OrdersExpectation,
        validate_error_response,
        validate_orders_response,
        verify_order_hashes,
    },
};

pub async fn get_orders(api: &OrdersApi, args: &arguments::GetOrders) -> Outcome {
    let request = GetOrders {
        customer_id: args.customer_id.clone(),
        from_time: args.from_time.clone(),
        to_time: args.to_time.clone(),
        bill_status: BillStatusMask::from_flags(args.bill_flags.iter().copied()),
    };
    let expectation = OrdersExpectation::from(&request);
    let response = api.send(&Request::from(request)).await;
    print_response(&response);

    if response.is_error() {
        return report_error_response(&response);
    }
    if let Err(err) = validate_orders_response(&response.body, &expectation) {
        println!("FAIL {err}");
        return Outcome::Failed;
    }
    // Validation above guarantees an array.
    let orders = response.body.as_array().map(Vec::as_slice).unwrap_or_default();
    if let Err(err) = verify_order_hashes(orders) {
        println!("FAIL {err}");
        for mismatch in &err.mismatches {
            println!("  {mismatch}");
        }
        return Outcome::HashMismatch;
    }

    println!("OK {} orders", orders.len());
    Outcome::Passed
}

pub async fn update_status(api: &OrdersApi, args: &arguments::UpdateStatus) -> Outcome {
    let request = Request::from(UpdateStatus {
        hash: args.hash.clone(),
        bill_status: args.bill_status,
    });
    let response = api.send(&request).await;
    print_response(&response);

    if response.is_error() {
        return report_error_response(&response);
    }
    println!("OK");
    Outcome::Passed
}

pub async fn smoke(api: &OrdersApi, scenarios: &[Scenario]) -> Outcome {
    let failures = run_scenarios(api, scenarios).await;
    if failures.is_empty() {
        println!("All {} smoke scenarios passed", scenarios.len());
        return Outcome::Passed;
    }
    println!("{} of {} smoke scenarios failed:", failures.len(), scenarios.len());
    for (scenario, failure) in &failures {
        println!("  {} {}: {failure}", scenario.id, scenario.name);
    }
    Outcome::Failed
}

/// Runs the scenarios one after the other and returns the ones that failed.
pub async fn run_scenarios<'a>(
    api: &OrdersApi,
    scenarios: &'a [Scenario],
) -> Vec<(&'a Scenario, ScenarioFailure)> {
    let mut failures = Vec::new();
    for scenario in scenarios {
        println!("== {} {}", scenario.id, scenario.name);
        let response = api.post_orders(&scenario.request).await;
        print_response(&response);
        match scenario.evaluate(&response) {
            Ok(()) => println!("OK"),
            Err(failure) => {
                println!("FAIL {failure}");
                tracing::info!(id = %scenario.id, %failure, "scenario failed");
                failures.push((scenario, failure));
            }
        }
    }
    failures
}

fn print_response(response: &ApiResponse) {
    match response.status {
        Some(status) => println!("HTTP {status}"),
        None => println!("no HTTP response"),
    }
    println!("{:#}", response.body);
}

/// An error response always fails the command; its shape is still checked so
/// that a malformed error is reported as such.
fn report_error_response(response: &ApiResponse) -> Outcome {
    match validate_error_response(&response.body) {
        Ok(error) => println!("FAIL error response {}: {}", error.error_code, error.message),
        Err(err) => println!("FAIL invalid error response: {err}"),
    }
    Outcome::Failed
}
