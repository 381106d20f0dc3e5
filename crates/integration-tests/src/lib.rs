//! Integration tests for Meet Goiás.
//!
//! Tests drive the real router in-process with `tower::ServiceExt::oneshot`
//! against in-memory storage, so no socket, no filesystem, and no running
//! server are needed.
//!
//! # Test Categories
//!
//! - `public_flow` - challenge, submission, and public results
//! - `admin_flow` - login/session, moderation, stats, audit log, CSV export
//!
//! The session cookie from `Set-Cookie` is captured and replayed manually,
//! which is enough for tower-sessions' single-cookie model.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::path::PathBuf;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use meet_goias_server::config::ServerConfig;
use meet_goias_server::state::AppState;
use meet_goias_server::store::{MemoryStorage, NominationStore};
use secrecy::SecretString;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Admin credentials used by the test configuration.
pub const TEST_ADMIN_EMAIL: &str = "admin@goias.com.br";
pub const TEST_ADMIN_PASSWORD: &str = "123";

/// In-process harness around the production router.
pub struct TestContext {
    app: Router,
    store: NominationStore,
    cookie: Option<String>,
}

impl TestContext {
    /// Build the full application over empty in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        let store = NominationStore::new(MemoryStorage::shared());
        let state = AppState::new(test_config(), store.clone());
        Self {
            app: meet_goias_server::app(state),
            store,
            cookie: None,
        }
    }

    /// Direct handle to the store behind the router, for assertions that
    /// bypass the HTTP surface.
    #[must_use]
    pub fn store(&self) -> &NominationStore {
        &self.store
    }

    /// Seed the demo records, as the server does on first boot.
    pub async fn seed(&self) {
        self.store.seed_if_empty().await.unwrap();
    }

    /// Send a request, replaying the captured session cookie and capturing a
    /// new one if the response sets it. Returns status and parsed JSON body
    /// (`Value::Null` for empty bodies).
    pub async fn request(
        &mut self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let (status, _headers, bytes) = self.request_raw(method, uri, body).await;
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    /// Like [`request`](Self::request), but returns the raw response parts.
    pub async fn request_raw(
        &mut self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();

        if let Some(set_cookie) = headers.get(header::SET_COOKIE) {
            let pair = set_cookie
                .to_str()
                .unwrap()
                .split(';')
                .next()
                .unwrap()
                .to_owned();
            self.cookie = Some(pair);
        }

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, headers, bytes.to_vec())
    }

    /// Fetch a security challenge; returns the expected answer.
    pub async fn get_challenge(&mut self) -> i64 {
        let (status, body) = self.request(Method::GET, "/nominations/challenge", None).await;
        assert_eq!(status, StatusCode::OK);
        body["a"].as_i64().unwrap() + body["b"].as_i64().unwrap()
    }

    /// Run the full submission flow for a valid nomination.
    pub async fn submit_nomination(&mut self, dish: &str, restaurant: &str, city: &str) -> Value {
        let answer = self.get_challenge().await;
        let (status, body) = self
            .request(
                Method::POST,
                "/nominations",
                Some(json!({
                    "dishName": dish,
                    "restaurantName": restaurant,
                    "city": city,
                    "agreed": true,
                    "challengeAnswer": answer,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "submission failed: {body}");
        body["nomination"].clone()
    }

    /// Log in with the test admin credentials.
    pub async fn login(&mut self) {
        let (status, body) = self
            .request(
                Method::POST,
                "/admin/login",
                Some(json!({
                    "email": TEST_ADMIN_EMAIL,
                    "password": TEST_ADMIN_PASSWORD,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        base_url: "http://localhost:3000".to_owned(),
        data_path: PathBuf::from("unused-in-tests.json"),
        admin_email: TEST_ADMIN_EMAIL.to_owned(),
        admin_password: SecretString::from(TEST_ADMIN_PASSWORD),
        admin_name: "Administrador Principal".to_owned(),
    }
}
