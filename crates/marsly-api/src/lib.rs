// marsly-api: Async Rust client for the Mars real-estate listings API

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::{DEFAULT_BASE_URL, MarsApiClient};
pub use error::Error;
pub use models::{FilterKind, MarsProperty};
pub use transport::{TlsMode, TransportConfig};
