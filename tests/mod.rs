//! tests/mod.rs
//! Shared test helpers: store doubles and an app spawner on an ephemeral
//! port. Each API test file includes this module via `#[path]`.

#![allow(dead_code)]

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::net::TcpListener as TokioTcpListener;

use fasum_admin::config::environment::EnvironmentVariables;
use fasum_admin::config::state::AppState;
use fasum_admin::core::server::create_app;
use fasum_admin::store::TableStore;

/// Environment for tests; no variable reads, no `.env`.
pub fn test_environment() -> EnvironmentVariables {
    EnvironmentVariables {
        environment: Cow::Borrowed("test"),
        host: Cow::Borrowed("127.0.0.1"),
        port: 0,
        static_dir: Cow::Borrowed("public"),
        max_request_body_size: 2_097_152,
        supabase_url: Cow::Borrowed("http://localhost:54321"),
        supabase_key: Cow::Borrowed(""),
    }
}

/// In-memory stand-in for the hosted store. Assigns ascending integer ids
/// per table and reports single-row misses with the store's own message,
/// so routes exercise the same error path as in production.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<BTreeMap<String, BTreeMap<i64, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a row under an explicit id, bypassing assignment. Lets
    /// tests build collections in arbitrary id order.
    pub fn seed(&self, table: &str, id: i64, mut row: Value) {
        if let Value::Object(ref mut map) = row {
            map.insert("id".to_string(), json!(id));
        }

        self.tables
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default()
            .insert(id, row);
    }
}

fn parse_id(id: &str) -> Result<i64> {
    id.parse()
        .map_err(|_| anyhow!("invalid input syntax for type integer: \"{id}\""))
}

// The message the hosted store emits when a single-object read matches
// zero or multiple rows.
const SINGLE_ROW_MISS: &str = "JSON object requested, multiple (or no) rows returned";

#[async_trait]
impl TableStore for MemoryStore {
    async fn list_all(&self, table: &str) -> Result<Vec<Value>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .get(table)
            .map(|rows| rows.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn get_by_id(&self, table: &str, id: &str) -> Result<Value> {
        let id: i64 = parse_id(id)?;
        let tables = self.tables.lock().unwrap();
        tables
            .get(table)
            .and_then(|rows| rows.get(&id))
            .cloned()
            .ok_or_else(|| anyhow!(SINGLE_ROW_MISS))
    }

    async fn insert(&self, table: &str, row: Value) -> Result<Value> {
        let mut tables = self.tables.lock().unwrap();
        let rows = tables.entry(table.to_string()).or_default();
        let id: i64 = rows.keys().max().map_or(1, |max| max + 1);

        let mut stored: Value = row;
        match stored {
            Value::Object(ref mut map) => {
                map.insert("id".to_string(), json!(id));
            }
            _ => return Err(anyhow!("new row for \"{table}\" must be a JSON object")),
        }

        rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, table: &str, id: &str, row: Value) -> Result<Value> {
        let id: i64 = parse_id(id)?;
        let mut tables = self.tables.lock().unwrap();
        let stored: &mut Value = tables
            .get_mut(table)
            .and_then(|rows| rows.get_mut(&id))
            .ok_or_else(|| anyhow!("Store returned no rows for the operation"))?;

        if let (Value::Object(target), Value::Object(fields)) = (&mut *stored, &row) {
            for (key, value) in fields {
                target.insert(key.clone(), value.clone());
            }
        }

        Ok(stored.clone())
    }

    async fn delete_by_id(&self, table: &str, id: &str) -> Result<()> {
        let id: i64 = parse_id(id)?;
        let mut tables = self.tables.lock().unwrap();
        tables
            .get_mut(table)
            .and_then(|rows| rows.remove(&id))
            .map(|_| ())
            .ok_or_else(|| anyhow!("Row {id} does not exist in \"{table}\""))
    }
}

/// Store double whose every operation fails, for the error-shape tests.
pub struct FailingStore;

pub const FAILURE_MESSAGE: &str = "Database connection lost";

#[async_trait]
impl TableStore for FailingStore {
    async fn list_all(&self, _table: &str) -> Result<Vec<Value>> {
        Err(anyhow!(FAILURE_MESSAGE))
    }

    async fn get_by_id(&self, _table: &str, _id: &str) -> Result<Value> {
        Err(anyhow!(FAILURE_MESSAGE))
    }

    async fn insert(&self, _table: &str, _row: Value) -> Result<Value> {
        Err(anyhow!(FAILURE_MESSAGE))
    }

    async fn update(&self, _table: &str, _id: &str, _row: Value) -> Result<Value> {
        Err(anyhow!(FAILURE_MESSAGE))
    }

    async fn delete_by_id(&self, _table: &str, _id: &str) -> Result<()> {
        Err(anyhow!(FAILURE_MESSAGE))
    }
}

/// Spawns the app with the given store on a random unused port and
/// returns its base URL.
pub fn spawn_app(store: Arc<dyn TableStore>) -> String {
    let state: AppState = AppState::with_store(Arc::new(test_environment()), store);
    let app = create_app(state);

    // * Bind an ephemeral port using std::net::TcpListener.
    let std_listener: std::net::TcpListener =
        std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    std_listener.set_nonblocking(true).unwrap();

    let tokio_listener: TokioTcpListener =
        TokioTcpListener::from_std(std_listener).expect("Failed to convert to tokio listener");
    let addr: std::net::SocketAddr = tokio_listener.local_addr().unwrap();

    // * Spawn the server in a background task.
    tokio::spawn(async move {
        axum::serve(tokio_listener, app).await.expect("Server failed");
    });

    format!("http://{}", addr)
}
