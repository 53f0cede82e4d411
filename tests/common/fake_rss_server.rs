//! Fake RSS feed server for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Serves `GET /feeds/{name}` with whatever response was
//! configured for `name`:
//! - [`FakeRssServer::serve`]: 200 with an XML body
//! - [`FakeRssServer::fail`]: any status with an empty body
//! - [`FakeRssServer::stall`]: 200 after a delay
//!
//! Unknown names answer 404. Every request is counted so tests can assert a
//! feed was (or was not) fetched.
//!
//! # Example
//!
//! ```rust,no_run
//! let server = FakeRssServer::start().await.unwrap();
//! server.serve("a", &RssBuilder::new("A").item("President visits", "").build()).await;
//! let feed = rss_feed("A", &server.url("a"));
//! ```

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

#[derive(Clone)]
struct Route {
    status: StatusCode,
    body: String,
    delay: Duration,
}

/// State shared between the router and test code.
#[derive(Default)]
struct ServerState {
    routes: HashMap<String, Route>,
    hits: HashMap<String, usize>,
}

/// Handle to the running fake feed server.
pub struct FakeRssServer {
    addr: SocketAddr,
    state: Arc<Mutex<ServerState>>,
}

impl FakeRssServer {
    /// Start the server on a random port. Returns once it is listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ServerState::default()));

        let app = Router::new()
            .route("/feeds/{name}", get(feed))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// Base URL (e.g. `http://127.0.0.1:PORT`).
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// URL of the feed called `name`.
    pub fn url(&self, name: &str) -> String {
        format!("{}/feeds/{}", self.base_url(), name)
    }

    /// Serve `body` with 200 OK at `/feeds/{name}`.
    pub async fn serve(&self, name: &str, body: &str) {
        self.route(name, StatusCode::OK, body, Duration::ZERO).await;
    }

    /// Answer `/feeds/{name}` with `status` and an empty body.
    pub async fn fail(&self, name: &str, status: u16) {
        let status = StatusCode::from_u16(status).expect("valid status code");
        self.route(name, status, "", Duration::ZERO).await;
    }

    /// Serve `body` at `/feeds/{name}` only after `delay`.
    pub async fn stall(&self, name: &str, body: &str, delay: Duration) {
        self.route(name, StatusCode::OK, body, delay).await;
    }

    /// Number of requests received for `/feeds/{name}`.
    pub async fn hits(&self, name: &str) -> usize {
        self.state.lock().await.hits.get(name).copied().unwrap_or(0)
    }

    async fn route(&self, name: &str, status: StatusCode, body: &str, delay: Duration) {
        let mut state = self.state.lock().await;
        state.routes.insert(
            name.to_string(),
            Route {
                status,
                body: body.to_string(),
                delay,
            },
        );
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

async fn feed(Path(name): Path<String>, State(state): State<Arc<Mutex<ServerState>>>) -> Response {
    let route = {
        let mut state = state.lock().await;
        *state.hits.entry(name.clone()).or_default() += 1;
        state.routes.get(&name).cloned()
    };

    let Some(route) = route else {
        return StatusCode::NOT_FOUND.into_response();
    };

    if !route.delay.is_zero() {
        tokio::time::sleep(route.delay).await;
    }

    (
        route.status,
        [(header::CONTENT_TYPE, "application/rss+xml")],
        route.body,
    )
        .into_response()
}
