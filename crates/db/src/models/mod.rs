//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create/upsert DTO for inserts
//! - Query parameter structs where listing is filtered

pub mod order;
pub mod platform;
pub mod product;
pub mod sync_log;
pub mod webhook_event;
