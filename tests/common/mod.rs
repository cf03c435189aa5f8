//! Shared helpers: spawn the full application on an ephemeral port.

#![allow(clippy::panic, dead_code, missing_docs)]

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};
use tokio::net::TcpListener;

use seat_gateway::api::build_app;
use seat_gateway::app_state::AppState;
use seat_gateway::domain::ChangeBus;
use seat_gateway::service::EventService;
use seat_gateway::store::InMemoryEventStore;

/// A running application with a client pointed at it.
#[derive(Debug)]
pub struct TestServer {
    /// Bound address, e.g. `127.0.0.1:40123`.
    pub addr: std::net::SocketAddr,
    /// Shared HTTP client.
    pub client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Creates an event and returns its JSON representation.
    pub async fn create_event(&self, name: &str, total_capacity: i64) -> Value {
        let response = self
            .client
            .post(self.url("/api/events"))
            .json(&event_body(name, total_capacity))
            .send()
            .await;
        let Ok(response) = response else {
            panic!("create request failed");
        };
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        let Ok(body) = response.json::<Value>().await else {
            panic!("create response is not JSON");
        };
        body
    }

    /// Books seats and returns status plus JSON body.
    pub async fn book(&self, id: &Value, body: Value) -> (reqwest::StatusCode, Value) {
        let response = self
            .client
            .post(self.url(&format!("/api/events/{id}/book")))
            .json(&body)
            .send()
            .await;
        let Ok(response) = response else {
            panic!("book request failed");
        };
        let status = response.status();
        let body = response.json::<Value>().await.unwrap_or(Value::Null);
        (status, body)
    }
}

pub fn event_body(name: &str, total_capacity: i64) -> Value {
    json!({
        "name": name,
        "description": format!("{name} description"),
        "date": "2025-06-01T20:00:00",
        "location": "Main Hall",
        "totalCapacity": total_capacity,
    })
}

pub async fn spawn_app() -> TestServer {
    let service = EventService::new(Arc::new(InMemoryEventStore::new()), ChangeBus::new(256));
    let app = build_app(AppState::new(service), Duration::from_secs(5));

    let Ok(listener) = TcpListener::bind("127.0.0.1:0").await else {
        panic!("cannot bind test listener");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("listener has no address");
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    TestServer {
        addr,
        client: reqwest::Client::new(),
    }
}
