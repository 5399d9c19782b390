//! Test utilities for catat-core
//!
//! Provides a mock Google Sheets values API server for integration tests
//! of the store client, so tests never touch the real API.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Json, Path, State};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::oneshot;

type SheetRows = Arc<Mutex<Vec<Vec<String>>>>;

/// Mock Sheets server for testing
///
/// Serves the two values-API calls the store uses: a range GET and an
/// `:append` POST. Rows live in memory, seeded with the header row.
pub struct MockSheetsServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    rows: SheetRows,
}

impl MockSheetsServer {
    /// Start the mock server on an available port
    pub async fn start() -> Self {
        let rows: SheetRows = Arc::new(Mutex::new(vec![vec![
            "Date".to_string(),
            "Amount".to_string(),
            "Category".to_string(),
            "Description".to_string(),
        ]]));

        let app = Router::new()
            .route(
                "/v4/spreadsheets/:id/values/:range",
                get(handle_get).post(handle_append),
            )
            .with_state(rows.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
            rows,
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Snapshot of all rows, header included
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.rows.lock().unwrap().clone()
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockSheetsServer {
    fn drop(&mut self) {
        self.stop();
    }
}

#[derive(Deserialize)]
struct AppendBody {
    values: Vec<Vec<String>>,
}

async fn handle_get(State(rows): State<SheetRows>) -> Json<Value> {
    let rows = rows.lock().unwrap().clone();
    Json(json!({ "values": rows }))
}

async fn handle_append(
    State(rows): State<SheetRows>,
    Path((_id, range)): Path<(String, String)>,
    Json(body): Json<AppendBody>,
) -> Json<Value> {
    let appended = body.values.len();
    rows.lock().unwrap().extend(body.values);
    Json(json!({
        "updates": { "updatedRows": appended, "range": range }
    }))
}
