//! Infrastructure layer implementations.

pub mod blockpi;
pub mod exposition;
pub mod observability;

pub use blockpi::{DEFAULT_ENDPOINT, RpcBalanceClient, RpcClientConfig};
pub use exposition::MetricsRegistry;
pub use observability::{LogFormat, TracingDiagnostics, init_tracing};
