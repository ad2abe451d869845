//! ShopSync API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! router composition) so integration tests and the binary entrypoint
//! both go through the same code paths.

pub mod config;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
