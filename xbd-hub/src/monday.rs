//! Work-management API client (GraphQL over HTTP)
//!
//! All calls are single best-effort requests; failures map onto the shared
//! error taxonomy (Fetch for reads, Mutation for writes, Notify for
//! notifications) and abort the event being processed.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

use xbd_common::board::{Board, ColumnValue, Group, Item};
use xbd_common::{Error, Result};

use crate::token::AccessToken;

const USER_AGENT: &str = "xbd-hub/0.1.0";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Outbound calls used by the sync pipeline.
///
/// Behind a trait so integration tests can substitute a recording fake.
/// Every method takes the bearer token explicitly; the client itself is
/// credential-free.
#[async_trait]
pub trait MondayApi: Send + Sync {
    /// Fetch the full board set with nested items and column values.
    async fn fetch_boards(&self, token: &AccessToken) -> Result<Vec<Board>>;

    /// Rename an item, returning its id.
    async fn change_item_name(
        &self,
        token: &AccessToken,
        board_id: &str,
        item_id: &str,
        new_name: &str,
    ) -> Result<String>;

    /// Delete an item, returning its id.
    async fn delete_item(&self, token: &AccessToken, item_id: &str) -> Result<String>;

    /// Write a column value on an item, returning the item id.
    async fn change_column_value(
        &self,
        token: &AccessToken,
        board_id: &str,
        item_id: &str,
        column_id: &str,
        value: &Value,
    ) -> Result<String>;

    /// Send one notification to one user, targeting a board.
    async fn create_notification(
        &self,
        token: &AccessToken,
        user_id: u64,
        board_id: &str,
        message: &str,
    ) -> Result<()>;
}

/// Real client talking to the GraphQL endpoint.
pub struct MondayClient {
    http: reqwest::Client,
    api_url: String,
}

impl MondayClient {
    pub fn new(api_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Config(format!("HTTP client: {}", e)))?;
        Ok(Self { http, api_url: api_url.into() })
    }

    /// POST one GraphQL document, returning the response body.
    ///
    /// Error mapping onto the taxonomy is left to the callers, which know
    /// whether they are a fetch, a mutation or a notification.
    async fn query(&self, token: &AccessToken, query: &str) -> std::result::Result<Value, String> {
        let response = self
            .http
            .post(&self.api_url)
            .header("Authorization", token.secret())
            .json(&json!({ "query": query }))
            .send()
            .await
            .map_err(|e| format!("request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("API returned {}", status));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| format!("malformed API response: {}", e))?;
        if let Some(errors) = body.get("errors") {
            return Err(format!("API errors: {}", errors));
        }
        Ok(body)
    }
}

/// Quote and escape a string for inline use in a GraphQL document.
fn gql_str(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

fn returned_id(body: &Value, field: &str) -> String {
    body.pointer(&format!("/data/{}/id", field))
        .map(|id| match id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .unwrap_or_default()
}

#[derive(Debug, Deserialize)]
struct BoardsData {
    boards: Vec<BoardWire>,
}

#[derive(Debug, Deserialize)]
struct BoardWire {
    id: String,
    items_page: ItemsPage,
}

#[derive(Debug, Deserialize)]
struct ItemsPage {
    items: Vec<ItemWire>,
}

#[derive(Debug, Deserialize)]
struct ItemWire {
    id: String,
    name: String,
    #[serde(default)]
    group: Option<Group>,
    #[serde(default)]
    column_values: Vec<ColumnValue>,
}

impl From<BoardWire> for Board {
    fn from(wire: BoardWire) -> Self {
        let items = wire
            .items_page
            .items
            .into_iter()
            .map(|item| Item::new(item.id, item.name, item.group, item.column_values))
            .collect();
        Board { id: wire.id, items }
    }
}

const BOARDS_QUERY: &str = "query { boards { id items_page { items { id name group { title } column_values { id value type } } } } }";

#[async_trait]
impl MondayApi for MondayClient {
    async fn fetch_boards(&self, token: &AccessToken) -> Result<Vec<Board>> {
        let body = self
            .query(token, BOARDS_QUERY)
            .await
            .map_err(Error::Fetch)?;
        let data = body
            .get("data")
            .cloned()
            .ok_or_else(|| Error::Fetch("response carries no data".to_string()))?;
        let data: BoardsData = serde_json::from_value(data)
            .map_err(|e| Error::Fetch(format!("unexpected boards shape: {}", e)))?;
        Ok(data.boards.into_iter().map(Board::from).collect())
    }

    async fn change_item_name(
        &self,
        token: &AccessToken,
        board_id: &str,
        item_id: &str,
        new_name: &str,
    ) -> Result<String> {
        // Rename goes through change_multiple_column_values on the name
        // column; the API wants the column map as a JSON string argument.
        let column_values = json!({ "name": new_name }).to_string();
        let mutation = format!(
            "mutation {{ change_multiple_column_values(item_id: {}, board_id: {}, column_values: {}) {{ id }} }}",
            item_id,
            board_id,
            gql_str(&column_values)
        );
        let body = self.query(token, &mutation).await.map_err(Error::Mutation)?;
        Ok(returned_id(&body, "change_multiple_column_values"))
    }

    async fn delete_item(&self, token: &AccessToken, item_id: &str) -> Result<String> {
        let mutation = format!("mutation {{ delete_item(item_id: {}) {{ id }} }}", item_id);
        let body = self.query(token, &mutation).await.map_err(Error::Mutation)?;
        Ok(returned_id(&body, "delete_item"))
    }

    async fn change_column_value(
        &self,
        token: &AccessToken,
        board_id: &str,
        item_id: &str,
        column_id: &str,
        value: &Value,
    ) -> Result<String> {
        // The value argument is itself a serialized JSON document.
        let serialized = value.to_string();
        let mutation = format!(
            "mutation {{ change_column_value(item_id: {}, board_id: {}, column_id: {}, value: {}) {{ id }} }}",
            item_id,
            board_id,
            gql_str(column_id),
            gql_str(&serialized)
        );
        let body = self.query(token, &mutation).await.map_err(Error::Mutation)?;
        Ok(returned_id(&body, "change_column_value"))
    }

    async fn create_notification(
        &self,
        token: &AccessToken,
        user_id: u64,
        board_id: &str,
        message: &str,
    ) -> Result<()> {
        let mutation = format!(
            "mutation {{ create_notification(text: {}, user_id: {}, target_id: {}, target_type: Project) {{ id }} }}",
            gql_str(message),
            user_id,
            board_id
        );
        self.query(token, &mutation).await.map_err(Error::Notify)?;
        Ok(())
    }
}
