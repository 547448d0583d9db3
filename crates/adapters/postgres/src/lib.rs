//! bistro-adapter-postgres - PostgreSQL 适配器

mod connection;
mod migration;
mod repository;

pub use connection::*;
pub use migration::*;
pub use repository::*;
