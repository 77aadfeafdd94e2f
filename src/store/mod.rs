/*
* The hosted store seam. Routers only see the `TableStore` trait; the
* production implementation lives in `postgrest`.
*/

pub mod postgrest;

pub use postgrest::PostgrestStore;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// CRUD contract against the hosted store. Rows travel as raw JSON values
/// and are forwarded to the caller untouched, errors included.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// All rows of `table`, ordered ascending by `id`.
    async fn list_all(&self, table: &str) -> Result<Vec<Value>>;

    /// The single row whose `id` column equals `id`. Zero or multiple
    /// matches is the store's single-row error, forwarded verbatim. The id
    /// is forwarded unparsed; the store rejects non-integer input itself.
    async fn get_by_id(&self, table: &str, id: &str) -> Result<Value>;

    /// Inserts `row`, returning the created row including the assigned id.
    async fn insert(&self, table: &str, row: Value) -> Result<Value>;

    /// Overwrites the listed fields of the row with `id`, returning the
    /// updated row.
    async fn update(&self, table: &str, id: &str, row: Value) -> Result<Value>;

    /// Removes the row with `id`.
    async fn delete_by_id(&self, table: &str, id: &str) -> Result<()>;
}
