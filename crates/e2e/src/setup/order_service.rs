//! In-memory stand-in for the order service, good enough to answer every
//! request of the smoke scenario table the way a conforming service would.

use {
    axum::http::StatusCode,
    model::{BillStatusFlag, BillStatusMask, ErrorResponse},
    regex::Regex,
    serde_json::{Map, Value, json},
    std::sync::{LazyLock, Mutex},
};

static TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}$").unwrap()
});
static CUSTOMER_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2}[0-9]{4}$").unwrap());

type Rejection = (StatusCode, ErrorResponse);

pub struct OrderService {
    orders: Mutex<Vec<Value>>,
}

impl Default for OrderService {
    fn default() -> Self {
        Self {
            orders: Mutex::new(sample_orders()),
        }
    }
}

impl OrderService {
    pub fn handle(&self, request: &Value) -> (StatusCode, String) {
        let (status, body) = match self.dispatch(request) {
            Ok(orders) => (StatusCode::OK, Value::Array(orders)),
            Err((status, error)) => (status, error.to_json()),
        };
        (status, body.to_string())
    }

    fn dispatch(&self, request: &Value) -> Result<Vec<Value>, Rejection> {
        let request = match request {
            Value::Array(list) => match list.as_slice() {
                [request] => request,
                _ => return Err(invalid("a request list must hold exactly one request")),
            },
            request => request,
        };
        let Value::Object(request) = request else {
            return Err(invalid("request must be an object"));
        };

        match request.get("method") {
            None | Some(Value::Null) => Err(missing("method")),
            Some(method) if method == "getOrders" => self.get_orders(request),
            Some(method) if method == "updateStatus" => self.update_status(request),
            Some(method) => Err((
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(
                    "UNSUPPORTED_METHOD_TYPE",
                    format!("unsupported method {method}"),
                ),
            )),
        }
    }

    fn get_orders(&self, request: &Map<String, Value>) -> Result<Vec<Value>, Rejection> {
        let from_time = timestamp(request, "fromTime")?;
        let to_time = timestamp(request, "toTime")?;
        if from_time > to_time {
            return Err(invalid("fromTime must not be after toTime"));
        }
        let customer_id = match request.get("customerId") {
            None => return Err(missing("customerId")),
            Some(Value::Null) => None,
            Some(Value::String(id)) if CUSTOMER_ID.is_match(id) => Some(id.as_str()),
            Some(_) => return Err(invalid("customerId has an invalid format")),
        };
        let mask = match request.get("billStatus") {
            None => return Err(missing("billStatus")),
            Some(Value::Null) => None,
            Some(value) => Some(
                value
                    .as_i64()
                    .and_then(|mask| BillStatusMask::new(mask).ok())
                    .ok_or_else(|| invalid("billStatus must be a mask between 1 and 15"))?,
            ),
        };

        let orders = self.orders.lock().unwrap();
        Ok(orders
            .iter()
            .filter(|order| {
                let entry_time = order["entryTime"].as_str().unwrap_or_default();
                (from_time..=to_time).contains(&entry_time)
            })
            .filter(|order| customer_id.is_none_or(|id| order["customerId"] == id))
            .filter(|order| {
                mask.is_none_or(|mask| {
                    order["billStatus"]
                        .as_i64()
                        .and_then(|status| BillStatusFlag::new(status).ok())
                        .is_some_and(|flag| mask.contains(flag))
                })
            })
            .cloned()
            .collect())
    }

    fn update_status(&self, request: &Map<String, Value>) -> Result<Vec<Value>, Rejection> {
        let hash = match request.get("hash") {
            None | Some(Value::Null) => return Err(missing("hash")),
            Some(hash) => hash,
        };
        let flag = match request.get("billStatus") {
            None | Some(Value::Null) => return Err(missing("billStatus")),
            Some(value) => value
                .as_i64()
                .and_then(|status| BillStatusFlag::new(status).ok())
                .ok_or_else(|| {
                    (
                        StatusCode::BAD_REQUEST,
                        ErrorResponse::new(
                            "INVALID_BILL_STATUS",
                            "billStatus must be one of 1, 2, 4, 8",
                        ),
                    )
                })?,
        };

        let mut orders = self.orders.lock().unwrap();
        let order = orders
            .iter_mut()
            .find(|order| &order["hash"] == hash)
            .ok_or_else(|| {
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse::new("ORDER_NOT_FOUND", "no order with this hash"),
                )
            })?;
        // billStatus is not part of the hash.
        order["billStatus"] = json!(flag.bits());
        Ok(vec![order.clone()])
    }
}

/// Orders in the `2025-11-24T19:00:00`..`2025-11-25T01:00:00` window of the
/// smoke scenarios, plus one outside of it. Hashes are computed from content.
pub fn sample_orders() -> Vec<Value> {
    let orders = [
        json!({
            "storeNo": "AA",
            "customerId": "AA0001",
            "entryTime": "2025-11-24T20:00:00",
            "billStatus": 1,
            "items": [
                {"orderTime": "2025-11-24T19:58:00", "menuId": "D002", "unitPrice": 300, "taxRate": 8, "orderQty": 1, "offerQty": 1, "categoryId": "drink"},
                {"orderTime": "2025-11-24T19:55:00", "menuId": "F001", "unitPrice": 500, "taxRate": 10, "orderQty": 2, "offerQty": 0, "categoryId": "food"},
            ],
        }),
        json!({
            "storeNo": "AA",
            "customerId": "AA0002",
            "entryTime": "2025-11-24T21:30:00",
            "billStatus": 2,
            "items": [
                {"orderTime": "2025-11-24T21:31:00", "menuId": "F010", "unitPrice": 1200, "taxRate": 10, "orderQty": 1, "offerQty": 1, "categoryId": null},
            ],
        }),
        json!({
            "storeNo": "BB",
            "customerId": "BB0001",
            "entryTime": "2025-11-25T00:15:00",
            "billStatus": 8,
            "items": [],
            "tableNo": 4,
        }),
        json!({
            "storeNo": "CC",
            "customerId": "CC0001",
            "entryTime": "2025-11-26T12:00:00",
            "billStatus": 4,
            "items": null,
        }),
    ];
    orders
        .into_iter()
        .map(|mut order| {
            order["hash"] = json!(order_hash::compute_order_hash(&order));
            order
        })
        .collect()
}

fn timestamp<'a>(request: &'a Map<String, Value>, key: &str) -> Result<&'a str, Rejection> {
    match request.get(key) {
        None | Some(Value::Null) => Err(missing(key)),
        Some(Value::String(time)) if TIMESTAMP.is_match(time) => Ok(time),
        Some(_) => Err(invalid(&format!("{key} must be formatted as YYYY-MM-DDTHH:MM:SS"))),
    }
}

fn missing(key: &str) -> Rejection {
    (
        StatusCode::BAD_REQUEST,
        ErrorResponse::new("MISSING_PARAMETER", format!("{key} is required")),
    )
}

fn invalid(message: &str) -> Rejection {
    (
        StatusCode::BAD_REQUEST,
        ErrorResponse::new("INVALID_PARAMETER", message),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_orders(customer_id: Value, bill_status: Value) -> Value {
        json!([{
            "method": "getOrders",
            "customerId": customer_id,
            "fromTime": "2025-11-24T19:00:00",
            "toTime": "2025-11-25T01:00:00",
            "billStatus": bill_status,
        }])
    }

    fn respond(service: &OrderService, request: &Value) -> (StatusCode, Value) {
        let (status, body) = service.handle(request);
        (status, serde_json::from_str(&body).unwrap())
    }

    #[test]
    fn filters_by_window_customer_and_mask() {
        let service = OrderService::default();

        let (status, all) = respond(&service, &get_orders(Value::Null, Value::Null));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(all.as_array().unwrap().len(), 3);

        let (_, masked) = respond(&service, &get_orders(Value::Null, json!(9)));
        let customers = masked
            .as_array()
            .unwrap()
            .iter()
            .map(|order| order["customerId"].as_str().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(customers, ["AA0001", "BB0001"]);

        let (_, single) = respond(&service, &get_orders(json!("AA0002"), Value::Null));
        assert_eq!(single[0]["customerId"], "AA0002");
        assert_eq!(single.as_array().unwrap().len(), 1);
    }

    #[test]
    fn hashes_match_content() {
        for order in sample_orders() {
            assert_eq!(order["hash"], order_hash::compute_order_hash(&order));
        }
    }

    #[test]
    fn updating_keeps_the_hash() {
        let service = OrderService::default();
        let hash = sample_orders()[0]["hash"].clone();
        let (status, updated) = respond(
            &service,
            &json!({"method": "updateStatus", "hash": hash, "billStatus": 4}),
        );
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated[0]["billStatus"], 4);
        assert_eq!(updated[0]["hash"], order_hash::compute_order_hash(&updated[0]));
    }

    #[test]
    fn rejects_bad_requests() {
        let service = OrderService::default();
        let code = |request: Value| respond(&service, &request).1["errorCode"].clone();

        assert_eq!(code(get_orders(Value::Null, json!(0))), "INVALID_PARAMETER");
        assert_eq!(code(get_orders(json!("A0001"), Value::Null)), "INVALID_PARAMETER");
        assert_eq!(
            code(json!({"method": "updateStatus", "billStatus": 1})),
            "MISSING_PARAMETER"
        );
        assert_eq!(
            code(json!({"method": "updateStatus", "hash": "0".repeat(64), "billStatus": 1})),
            "ORDER_NOT_FOUND"
        );
        assert_eq!(
            code(json!({"method": "updateStatus", "hash": "0".repeat(64), "billStatus": 9})),
            "INVALID_BILL_STATUS"
        );
        assert_eq!(code(json!([{"method": "nope"}])), "UNSUPPORTED_METHOD_TYPE");
    }
}
