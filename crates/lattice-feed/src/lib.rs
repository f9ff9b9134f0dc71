//! Feed fetch collaborator
//!
//! Feed-oriented widgets pull their entries from a GraphQL endpoint. This
//! crate owns that network edge: shaping the request envelope, carrying the
//! bearer token, and unwrapping the `{ data, errors }` response shape. The
//! component runtime itself never touches the network; widgets hand the
//! fetched data to their render functions as ordinary content.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

/// Feed fetch failures
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("invalid feed endpoint '{0}'")]
    InvalidEndpoint(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("malformed feed response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("feed query rejected: {0}")]
    GraphQl(String),

    #[error("feed response carried no data")]
    EmptyData,
}

/// Request envelope for a GraphQL POST
#[derive(Debug, Clone, Serialize)]
pub struct FeedRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Value>,
}

impl FeedRequest {
    pub fn new(query: &str, variables: Option<Value>) -> Self {
        Self {
            query: query.to_string(),
            variables,
        }
    }
}

/// Response envelope: data plus any query-level errors
#[derive(Debug, Clone, Deserialize)]
pub struct FeedResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

/// One error entry from the `errors` array
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

impl FeedResponse {
    /// Unwrap the envelope. Query-level errors win over partial data.
    pub fn into_data(self) -> Result<Value, FeedError> {
        if let Some(err) = self.errors.first() {
            return Err(FeedError::GraphQl(err.message.clone()));
        }
        self.data.ok_or(FeedError::EmptyData)
    }
}

/// GraphQL feed client
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: reqwest::Client,
}

impl FeedClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// POST a query to a feed endpoint and unwrap the data payload.
    ///
    /// The token travels as a bearer credential; `variables` is passed
    /// through verbatim when supplied.
    pub async fn fetch(
        &self,
        query: &str,
        endpoint: &str,
        token: &str,
        variables: Option<Value>,
    ) -> Result<Value, FeedError> {
        let url =
            Url::parse(endpoint).map_err(|_| FeedError::InvalidEndpoint(endpoint.to_string()))?;
        let request = FeedRequest::new(query, variables);

        tracing::debug!(endpoint = %url, "fetching feed");
        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let envelope: FeedResponse = response.json().await?;
        envelope.into_data()
    }
}

impl Default for FeedClient {
    fn default() -> Self {
        Self::new()
    }
}
