//! BlockPI upstream client implementations.

pub mod rpc;

pub use rpc::{DEFAULT_ENDPOINT, RpcBalanceClient, RpcClientConfig};
