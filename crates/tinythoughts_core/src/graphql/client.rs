//! Blocking HTTP client for GraphQL operations.
//!
//! # Responsibility
//! - Post operation documents with variables and decode typed envelopes.
//! - Emit `gql_request` logging events with duration and status.
//!
//! # Invariants
//! - One client instance is reused across operations (connection pooling).
//! - Error payload details go to the log, never to user-facing strings.

use super::{GraphQLError, GraphQLResult};
use crate::config::StoreConfig;
use log::{error, info};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// GraphQL-over-HTTP client bound to one endpoint.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct GraphQLClient {
    endpoint: String,
    auth_token: Option<String>,
    http: reqwest::blocking::Client,
}

#[derive(Serialize)]
struct RequestEnvelope<'a, V: Serialize> {
    query: &'a str,
    variables: &'a V,
}

#[derive(Deserialize)]
struct ResponseEnvelope<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<ResponseError>,
}

#[derive(Deserialize)]
struct ResponseError {
    message: String,
}

impl GraphQLClient {
    /// Builds a client from store configuration.
    ///
    /// # Errors
    /// - Returns a transport error when the underlying HTTP client cannot be
    ///   constructed (TLS backend initialization).
    pub fn new(config: &StoreConfig) -> GraphQLResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            endpoint: config.endpoint.clone(),
            auth_token: config.auth_token.clone(),
            http,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Executes one operation and decodes its `data` object into `T`.
    ///
    /// # Errors
    /// - `Transport` when the request never produced a response.
    /// - `Status` for non-success HTTP codes.
    /// - `Api` when the envelope carries `errors` entries.
    /// - `MissingData` / `Decode` for malformed envelopes.
    pub fn execute<V, T>(
        &self,
        operation: &'static str,
        document: &str,
        variables: &V,
    ) -> GraphQLResult<T>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        let started_at = Instant::now();
        info!("event=gql_request module=graphql op={operation} status=start");

        let mut request = self.http.post(&self.endpoint).json(&RequestEnvelope {
            query: document,
            variables,
        });
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = match request.send() {
            Ok(response) => response,
            Err(err) => {
                error!(
                    "event=gql_request module=graphql op={operation} status=error duration_ms={} error_code=transport error={err}",
                    started_at.elapsed().as_millis()
                );
                return Err(err.into());
            }
        };

        let status = response.status();
        let body = response.text().unwrap_or_default();
        if !status.is_success() {
            error!(
                "event=gql_request module=graphql op={operation} status=error duration_ms={} error_code=http_status http_status={}",
                started_at.elapsed().as_millis(),
                status.as_u16()
            );
            return Err(GraphQLError::Status {
                code: status.as_u16(),
                body,
            });
        }

        match decode_envelope(operation, &body) {
            Ok(data) => {
                info!(
                    "event=gql_request module=graphql op={operation} status=ok duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(data)
            }
            Err(err) => {
                error!(
                    "event=gql_request module=graphql op={operation} status=error duration_ms={} error_code=envelope error={err}",
                    started_at.elapsed().as_millis()
                );
                Err(err)
            }
        }
    }
}

/// Decodes a response body into the operation's `data` object.
///
/// `errors` entries take precedence over partial data: the store does not
/// distinguish validation from execution failures for this client, so any
/// reported error fails the whole operation.
fn decode_envelope<T: DeserializeOwned>(
    operation: &'static str,
    body: &str,
) -> GraphQLResult<T> {
    let envelope: ResponseEnvelope<T> = serde_json::from_str(body)?;
    if !envelope.errors.is_empty() {
        let messages = envelope
            .errors
            .into_iter()
            .map(|entry| entry.message)
            .collect();
        return Err(GraphQLError::Api(messages));
    }
    envelope.data.ok_or(GraphQLError::MissingData(operation))
}
