use crate::imageboards::BackendKind;
use thiserror::Error;

/// Enumerates everything that can go wrong while running a single search.
///
/// All variants are fatal to the request that produced them. Nothing is retried.
#[derive(Error, Debug)]
pub enum QueryError {
    /// The filter breaks one of the server's constraints. Raised before any request is sent.
    #[error("Invalid value for `{field}`: {constraint}")]
    InvalidFilter {
        field: &'static str,
        constraint: String,
    },

    /// The configured server has no endpoint for the requested search. Raised before any
    /// request is sent.
    #[error("Server {server} does not support {kind}")]
    UnsupportedSearch { server: String, kind: BackendKind },

    /// The request never produced a response body.
    #[error("Transport failure: {0}")]
    TransportFailure(#[from] TransportError),

    /// The response body could not be decoded into entries.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl QueryError {
    pub(crate) fn invalid(field: &'static str, constraint: impl Into<String>) -> Self {
        Self::InvalidFilter {
            field,
            constraint: constraint.into(),
        }
    }
}

/// Failure to obtain a response body from the server.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Connection-level failure (DNS, TLS, reset, body read).
    #[error("Connection Error")]
    ConnectionError(#[from] reqwest::Error),

    /// Failure reported by a custom [`Transport`](crate::imageboards::transport::Transport)
    /// implementation.
    #[error("{0}")]
    Other(String),
}

/// A response body that could not be turned into a [`ResultSet`](crate::ResultSet).
#[derive(Error, Debug)]
#[error("Failed to decode {len} byte response: {cause}")]
pub struct DecodeError {
    /// Length of the raw body that failed to decode.
    pub len: usize,
    #[source]
    pub cause: DecodeCause,
}

impl DecodeError {
    pub(crate) fn new(body: &[u8], cause: impl Into<DecodeCause>) -> Self {
        Self {
            len: body.len(),
            cause: cause.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum DecodeCause {
    #[error("response body is not valid UTF-8")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("malformed XML: {0}")]
    XmlSyntax(#[from] quick_xml::Error),

    #[error("XML does not match the expected schema: {0}")]
    XmlSchema(#[from] quick_xml::DeError),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected <{expected}> root element, found <{found}>")]
    UnexpectedRoot {
        expected: &'static str,
        found: String,
    },

    #[error("XML document has no root element")]
    MissingRoot,

    #[error("{kind} responses are not in this wire format")]
    UnsupportedKind { kind: BackendKind },
}
