//! Mock order service for testing purposes. Every request to the orders
//! endpoint is recorded and answered by a configurable responder.

use {
    axum::{
        extract::State,
        http::{StatusCode, header},
        response::IntoResponse,
    },
    serde_json::Value,
    std::{
        sync::{Arc, Mutex},
        time::Duration,
    },
};

type Responder = dyn Fn(&Value) -> (StatusCode, String) + Send + Sync;

/// An HTTP server listening on an ephemeral local port.
pub struct Mock {
    state: Shared,
    /// Under which URL the service is reachable, without a trailing slash.
    pub url: String,
}

#[derive(Clone)]
struct Shared {
    /// In-memory log of the request bodies received. Bodies that are not
    /// valid JSON are recorded as strings.
    requests: Arc<Mutex<Vec<Value>>>,
    respond: Arc<Responder>,
    delay: Option<Duration>,
}

impl Mock {
    pub async fn start(
        respond: impl Fn(&Value) -> (StatusCode, String) + Send + Sync + 'static,
    ) -> Self {
        Self::serve(Arc::new(respond), None).await
    }

    /// Answers every request with the same raw body.
    pub async fn fixed(status: StatusCode, body: impl Into<String>) -> Self {
        let body = body.into();
        Self::start(move |_| (status, body.clone())).await
    }

    /// Like [`Mock::fixed`] but waits before answering.
    pub async fn slow(delay: Duration, body: impl Into<String>) -> Self {
        let body = body.into();
        Self::serve(Arc::new(move |_| (StatusCode::OK, body.clone())), Some(delay)).await
    }

    /// A mock backed by an in-memory [`crate::setup::OrderService`].
    pub async fn order_service() -> Self {
        let service = crate::setup::OrderService::default();
        Self::start(move |request| service.handle(request)).await
    }

    async fn serve(respond: Arc<Responder>, delay: Option<Duration>) -> Self {
        let state = Shared {
            requests: Default::default(),
            respond,
            delay,
        };
        let app = axum::Router::new()
            .route("/api/orders", axum::routing::post(orders))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        tokio::task::spawn(async move { axum::serve(listener, app).await.unwrap() });
        tracing::debug!(%url, "started mock order service");

        Self { state, url }
    }

    /// Returns all requests received so far.
    pub fn requests(&self) -> Vec<Value> {
        self.state.requests.lock().unwrap().clone()
    }
}

/// A URL on which nothing listens.
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    format!("http://{}", listener.local_addr().unwrap())
}

async fn orders(State(state): State<Shared>, body: String) -> impl IntoResponse {
    let request = serde_json::from_str(&body).unwrap_or(Value::String(body));
    let (status, body) = (state.respond)(&request);
    state.requests.lock().unwrap().push(request);
    if let Some(delay) = state.delay {
        tokio::time::sleep(delay).await;
    }
    tracing::trace!(%status, %body, "/api/orders");
    (status, [(header::CONTENT_TYPE, "application/json")], body)
}
