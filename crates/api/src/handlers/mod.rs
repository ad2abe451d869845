//! Handler layer.
//!
//! Handlers translate HTTP to repository/engine calls and back. Every
//! merchant-facing handler takes [`crate::identity::CurrentUser`] and
//! scopes its queries by it; webhook handlers are vendor-facing and
//! authenticate by signature instead.

pub mod orders;
pub mod platforms;
pub mod products;
pub mod sync;
pub mod webhooks;
