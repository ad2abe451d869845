//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod order_repo;
pub mod platform_repo;
pub mod product_link_repo;
pub mod product_repo;
pub mod sync_log_repo;
pub mod webhook_event_repo;

pub use order_repo::OrderRepo;
pub use platform_repo::PlatformRepo;
pub use product_link_repo::ProductLinkRepo;
pub use product_repo::ProductRepo;
pub use sync_log_repo::SyncLogRepo;
pub use webhook_event_repo::WebhookEventRepo;
