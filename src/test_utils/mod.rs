//! Test utilities including mock implementations.
//!
//! This module is only available in test builds or when the `test-utils`
//! feature is enabled.

pub mod mocks;

pub use mocks::{MockBalanceClient, MockConfig, RecordingDiagnostics};
