//! API layer containing HTTP handlers and routing.

pub mod handlers;
pub mod router;

pub use router::create_router;
