pub mod migrations;
pub mod queries;
pub mod sqlite;

use anyhow::Context;
use async_trait::async_trait;
use rusqlite::Connection;

use crate::models::{Booking, BookingFilter, BookingRecord};

pub use sqlite::SqliteBookingStore;

/// Persistence backend for booking records.
///
/// Implementations must be safe to share across concurrent requests; every
/// call is a single round trip with no cross-call coordination.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Writes one record and returns the identifier the store assigned to it.
    async fn insert(&self, record: &BookingRecord) -> anyhow::Result<String>;

    async fn list(&self, filter: &BookingFilter, limit: u32) -> anyhow::Result<Vec<Booking>>;

    async fn ping(&self) -> anyhow::Result<()>;

    /// Names of up to `limit` collections (tables) held by the store.
    async fn collection_names(&self, limit: u32) -> anyhow::Result<Vec<String>>;
}

pub fn init_db(path: &str) -> anyhow::Result<Connection> {
    let conn = Connection::open(path).context("failed to open database")?;

    conn.execute_batch("PRAGMA journal_mode=WAL;")
        .context("failed to set database pragmas")?;

    migrations::run_migrations(&conn)?;

    Ok(conn)
}
