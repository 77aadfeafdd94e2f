// REST client for the hosted store. One round trip per operation, no
// retries, no caching; failures carry the store's own message.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use crate::config::environment::EnvironmentVariables;
use crate::store::TableStore;

// Accept header under which the store returns exactly one object and
// reports zero or multiple matching rows as its own error.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

pub struct PostgrestStore {
    client: Client,
    base_url: String,
}

impl PostgrestStore {
    /// Builds a client for the project configured in the environment. The
    /// access key rides along on every request as both the `apikey` and
    /// bearer headers, the way the hosted service expects.
    pub fn new(env: &EnvironmentVariables) -> Result<Self> {
        let mut headers: HeaderMap = HeaderMap::new();

        let api_key: HeaderValue = HeaderValue::from_str(&env.supabase_key)
            .context("SUPABASE_KEY is not a valid header value")?;
        headers.insert("apikey", api_key);

        let bearer: HeaderValue = HeaderValue::from_str(&format!("Bearer {}", env.supabase_key))
            .context("SUPABASE_KEY is not a valid header value")?;
        headers.insert(AUTHORIZATION, bearer);

        let client: Client = Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build the store HTTP client")?;

        Ok(Self {
            client,
            base_url: format!("{}/rest/v1", env.supabase_url.trim_end_matches('/')),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.base_url, table)
    }

    /// Resolves a response into its JSON body, turning non-success statuses
    /// into errors carrying the store's message.
    async fn into_json(response: Response) -> Result<Value> {
        let status: StatusCode = response.status();

        if status.is_success() {
            return response
                .json()
                .await
                .context("Store returned a malformed JSON body");
        }

        let body: String = response.text().await.unwrap_or_default();
        Err(anyhow!(error_message(status, &body)))
    }
}

/// The part of the store's error body we forward; everything else
/// (code, details, hint) stays behind.
#[derive(Debug, Deserialize)]
struct StoreErrorBody {
    message: Option<String>,
}

/// Pulls the store's own `message` out of an error body, falling back to
/// the raw text, then to the status line.
fn error_message(status: StatusCode, body: &str) -> String {
    let from_json: Option<String> = serde_json::from_str::<StoreErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message);

    match from_json {
        Some(message) if !message.is_empty() => message,
        _ if !body.trim().is_empty() => body.trim().to_owned(),
        _ => format!("Store request failed with status {status}"),
    }
}

/// Unwraps the one-row representation the store returns for writes.
fn first_row(value: Value) -> Result<Value> {
    match value {
        Value::Array(mut rows) => {
            if rows.is_empty() {
                Err(anyhow!("Store returned no rows for the operation"))
            } else {
                Ok(rows.remove(0))
            }
        }
        other => Ok(other),
    }
}

#[async_trait]
impl TableStore for PostgrestStore {
    async fn list_all(&self, table: &str) -> Result<Vec<Value>> {
        let response: Response = self
            .client
            .get(self.table_url(table))
            .query(&[("select", "*"), ("order", "id.asc")])
            .send()
            .await
            .context("Store request failed")?;

        match Self::into_json(response).await? {
            Value::Array(rows) => Ok(rows),
            _ => Err(anyhow!("Store returned a non-array listing")),
        }
    }

    async fn get_by_id(&self, table: &str, id: &str) -> Result<Value> {
        let filter: String = format!("eq.{id}");
        let response: Response = self
            .client
            .get(self.table_url(table))
            .header(ACCEPT, SINGLE_OBJECT)
            .query(&[("select", "*"), ("id", filter.as_str())])
            .send()
            .await
            .context("Store request failed")?;

        Self::into_json(response).await
    }

    async fn insert(&self, table: &str, row: Value) -> Result<Value> {
        let response: Response = self
            .client
            .post(self.table_url(table))
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await
            .context("Store request failed")?;

        first_row(Self::into_json(response).await?)
    }

    async fn update(&self, table: &str, id: &str, row: Value) -> Result<Value> {
        let filter: String = format!("eq.{id}");
        let response: Response = self
            .client
            .patch(self.table_url(table))
            .header("Prefer", "return=representation")
            .query(&[("id", filter.as_str())])
            .json(&row)
            .send()
            .await
            .context("Store request failed")?;

        first_row(Self::into_json(response).await?)
    }

    async fn delete_by_id(&self, table: &str, id: &str) -> Result<()> {
        let filter: String = format!("eq.{id}");
        let response: Response = self
            .client
            .delete(self.table_url(table))
            .query(&[("id", filter.as_str())])
            .send()
            .await
            .context("Store request failed")?;

        let status: StatusCode = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body: String = response.text().await.unwrap_or_default();
        Err(anyhow!(error_message(status, &body)))
    }
}
