pub mod connection;
pub mod error;
pub mod repositories;

pub use connection::pool::{PoolSettings, connect, connect_in_memory, run_migrations};
pub use error::{DbError, Result};
pub use repositories::delivery_repository::{DeliveryRecord, DeliveryRepository};
pub use repositories::user_repository::UserRepository;

/// Embedded schema migrations
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
