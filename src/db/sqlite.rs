use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::Connection;

use super::{queries, BookingStore};
use crate::models::{Booking, BookingFilter, BookingRecord};

pub struct SqliteBookingStore {
    conn: Mutex<Connection>,
}

impl SqliteBookingStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Opens (or creates) the database at `path` and applies migrations.
    pub fn open(path: &str) -> anyhow::Result<Self> {
        Ok(Self::new(super::init_db(path)?))
    }

    fn conn(&self) -> anyhow::Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("database connection lock poisoned"))
    }
}

#[async_trait]
impl BookingStore for SqliteBookingStore {
    async fn insert(&self, record: &BookingRecord) -> anyhow::Result<String> {
        let id = uuid::Uuid::new_v4().to_string();
        let created_at = Utc::now().naive_utc();
        let db = self.conn()?;
        queries::insert_booking(&db, &id, record, &created_at)?;
        Ok(id)
    }

    async fn list(&self, filter: &BookingFilter, limit: u32) -> anyhow::Result<Vec<Booking>> {
        let db = self.conn()?;
        queries::list_bookings(&db, filter, i64::from(limit))
    }

    async fn ping(&self) -> anyhow::Result<()> {
        let db = self.conn()?;
        queries::ping(&db)
    }

    async fn collection_names(&self, limit: u32) -> anyhow::Result<Vec<String>> {
        let db = self.conn()?;
        queries::list_tables(&db, i64::from(limit))
    }
}
