//! GraphQL transport layer for the hosted content store.
//!
//! # Responsibility
//! - Execute GraphQL operations over HTTP and decode response envelopes.
//! - Collapse transport and store-side failures into one error type; callers
//!   do not distinguish them (any failure is "operation failed").
//!
//! # Invariants
//! - A response carrying `errors` entries fails the operation even when
//!   partial `data` is present.
//! - Request bodies are `{ query, variables }` JSON posted to one endpoint.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod client;
pub mod operations;

pub use client::GraphQLClient;

pub type GraphQLResult<T> = Result<T, GraphQLError>;

/// Uniform failure for queries and mutations against the store.
#[derive(Debug)]
pub enum GraphQLError {
    /// Connection, TLS, or timeout failure before a response arrived.
    Transport(reqwest::Error),
    /// Non-success HTTP status from the endpoint.
    Status { code: u16, body: String },
    /// Store-side errors reported in the response envelope.
    Api(Vec<String>),
    /// Successful envelope without a `data` object for the operation.
    MissingData(&'static str),
    /// Response body was not a valid GraphQL envelope.
    Decode(serde_json::Error),
}

impl Display for GraphQLError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "transport failure: {err}"),
            Self::Status { code, body } => {
                write!(f, "endpoint returned status {code}: {body}")
            }
            Self::Api(messages) => write!(f, "store reported errors: {}", messages.join("; ")),
            Self::MissingData(operation) => {
                write!(f, "response for `{operation}` carried no data")
            }
            Self::Decode(err) => write!(f, "invalid response envelope: {err}"),
        }
    }
}

impl Error for GraphQLError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            Self::Decode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GraphQLError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value)
    }
}

impl From<serde_json::Error> for GraphQLError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value)
    }
}
