//! Credential-managing client for the ServiceTitan REST API.
//!
//! Tokens come from the OAuth2 client-credentials grant, are cached in
//! memory and refreshed lazily once they are within a minute of expiry.
//! Every request carries `Authorization: Bearer <token>` and `ST-App-Key`.

mod client;
pub mod clock;
pub mod config;
pub mod dispatch;
pub mod errors;
pub mod request;
pub mod response;
pub mod telemetry;
pub mod time;
pub mod token;
pub mod url;

pub use client::{ClientBuilder, ID_CHUNK_SIZE, ServiceTitanClient};
pub use config::{Config, Environment, PageFailurePolicy, Settings};
pub use errors::{AuthError, Error, ErrorBody, RequestError};
pub use request::RequestOptions;
pub use response::Payload;
pub use url::PathParts;
