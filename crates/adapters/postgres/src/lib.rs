//! partner-adapter-postgres - PostgreSQL 适配器

mod config;
mod connection;

pub use config::*;
pub use connection::*;
