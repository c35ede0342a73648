//! DBCHAT DB - PostgreSQL access layer.
//!
//! Connection pooling via deadpool-postgres plus the two operations the
//! pipeline needs: a textual schema description and raw query execution
//! with text rendering of the result rows.

mod client;
mod config;

pub use client::DbClient;
pub use config::DbConfig;
