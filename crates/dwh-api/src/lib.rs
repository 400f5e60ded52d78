// dwh-api: Async Rust client for the Portal Data Warehouse analytics API.

pub mod analytics;
pub mod error;
#[cfg(feature = "mock")]
pub mod mock;
pub mod transport;

pub use analytics::types;
pub use analytics::{DwhApi, DwhClient};
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
