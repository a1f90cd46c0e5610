// hotelops-api: Async Rust client for the hotel back-office REST API

pub mod client;
pub mod envelope;
pub mod error;
pub mod resource;
pub mod transport;

pub use client::{ApiClient, MAX_PAGES};
pub use envelope::{EmptyResultMarkers, RawPage};
pub use error::Error;
pub use resource::Resource;
pub use transport::{TlsMode, TransportConfig};
