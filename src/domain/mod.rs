//! Domain layer containing core types, traits, and error definitions.

pub mod error;
pub mod traits;
pub mod types;

pub use error::{ConfigError, FetchError, ProbeError, RegistryError, StartupError};
pub use traits::{BalanceClient, DiagnosticsSink, MetricsCollector};
pub use types::{
    BALANCE_METHOD, BalanceQuery, BalanceResponse, Credential, JSONRPC_VERSION, MetricDescriptor,
    MetricSample, REQUEST_ID,
};
