use std::fmt;

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Longest error body excerpt rendered into error messages.
const BODY_EXCERPT_CHARS: usize = 512;

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error("pagination stopped at page {page} after {} rows: {source}", .collected.len())]
    Pagination {
        page: u32,
        collected: Vec<Value>,
        #[source]
        source: Box<Error>,
    },
    #[error("time conversion failed: {0}")]
    Time(#[from] jiff::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Auth(AuthError::Rejected { status, .. }) => Some(*status),
            Error::Request(RequestError::Status { status, .. }) => Some(*status),
            Error::Pagination { source, .. } => source.status(),
            _ => None,
        }
    }

    /// True when the failure happened while obtaining a bearer token.
    pub fn is_auth(&self) -> bool {
        match self {
            Error::Auth(_) => true,
            Error::Pagination { source, .. } => source.is_auth(),
            _ => false,
        }
    }
}

/// Token exchange failures.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("failed to connect to auth server {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("authentication failed with status {status}: {body}")]
    Rejected { status: StatusCode, body: ErrorBody },
    #[error("malformed authentication response: {0}")]
    MalformedResponse(String),
}

/// Resource request failures.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("failed to connect to {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{status} error for {url}: {body}")]
    Status {
        status: StatusCode,
        url: String,
        body: ErrorBody,
    },
    #[error("invalid request header '{name}'")]
    InvalidHeader { name: String },
}

/// Best-effort decoding of an error response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBody {
    Json(Value),
    Text(String),
}

impl ErrorBody {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(bytes) {
            Ok(value) => ErrorBody::Json(value),
            Err(_) => ErrorBody::Text(String::from_utf8_lossy(bytes).into_owned()),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ErrorBody::Json(value) => Some(value),
            ErrorBody::Text(_) => None,
        }
    }
}

impl fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = match self {
            ErrorBody::Json(value) => value.to_string(),
            ErrorBody::Text(text) => text.clone(),
        };
        if rendered.chars().count() > BODY_EXCERPT_CHARS {
            let excerpt: String = rendered.chars().take(BODY_EXCERPT_CHARS).collect();
            write!(f, "{excerpt}...")
        } else {
            f.write_str(&rendered)
        }
    }
}
