use crate::config::Settings;
use crate::dispatch::RequestDispatcher;
use crate::time::ZoneConverter;

mod builder;
mod collections;
mod impls;

pub use builder::ClientBuilder;

/// Page size ServiceTitan accepts for comma-joined ID filters.
pub const ID_CHUNK_SIZE: usize = 50;

/// Authenticated client for the ServiceTitan REST API.
///
/// Cheap to clone; clones share one cached credential.
#[derive(Clone, Debug)]
pub struct ServiceTitanClient {
    settings: Settings,
    dispatcher: RequestDispatcher,
    zone: ZoneConverter,
}
