pub mod client;
pub mod config;
pub mod domain;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod retry;
pub mod transport;
pub mod validate;
pub mod wire;

pub use client::{CatalogueClient, validate_config};
pub use config::{ClientConfig, RetryConfig, TimeoutConfig};
pub use domain::{AddressableKind, TypeCodeTable};
pub use error::{CatalogueError, CatalogueResult};
pub use retry::RetryPolicy;
pub use transport::{ApiResponse, HttpTransport, Transport};
pub use wire::Breadcrumb;
