//! SQLite persistence layer.
//!
//! RULE: Only the store modules talk to the database. The generator and
//! the analytics engine call store methods — they never execute SQL
//! directly.
//!
//! Identifiers are AUTOINCREMENT rowids: strictly increasing per table,
//! never reused. Uniqueness (customer email) and referential integrity
//! (customer/order/product foreign keys) are enforced by the schema with
//! `PRAGMA foreign_keys=ON`; violations surface as
//! `DataError::ConstraintViolation`.

mod customer;
mod order;
mod product;
mod reports;

pub use customer::Customer;
pub use order::{Order, OrderItem, OrderStatus};
pub use product::Product;

use crate::error::{DataError, DataResult};
use chrono::NaiveDate;
use rusqlite::Connection;

pub struct SqlStore {
    conn: Connection,
}

impl SqlStore {
    /// Open (or create) the dataset database at `path`.
    pub fn open(path: &str) -> DataResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only matters for real files (:memory: ignores it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> DataResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> DataResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_schema.sql"))?;
        Ok(())
    }

    // ── Transaction control ────────────────────────────────────
    //
    // The generator wraps a whole run in one transaction so a mid-run
    // constraint violation never leaves a partial dataset behind.

    pub fn begin(&self) -> DataResult<()> {
        self.conn.execute_batch("BEGIN")?;
        Ok(())
    }

    pub fn commit(&self) -> DataResult<()> {
        self.conn.execute_batch("COMMIT")?;
        Ok(())
    }

    pub fn rollback(&self) -> DataResult<()> {
        self.conn.execute_batch("ROLLBACK")?;
        Ok(())
    }

    // ── Counts ─────────────────────────────────────────────────

    pub fn count(&self, entity: Entity) -> DataResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", entity.table());
        let n = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(n)
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }
}

/// The four entity collections the store holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entity {
    Customers,
    Products,
    Orders,
    OrderItems,
}

impl Entity {
    pub fn table(&self) -> &'static str {
        match self {
            Self::Customers => "customer",
            Self::Products => "product",
            Self::Orders => "shop_order",
            Self::OrderItems => "order_item",
        }
    }
}

/// Map SQLite constraint failures (UNIQUE, FOREIGN KEY, CHECK) to the
/// crate's ConstraintViolation; pass everything else through as a plain
/// database error.
pub(crate) fn map_constraint(err: rusqlite::Error) -> DataError {
    match err {
        rusqlite::Error::SqliteFailure(f, msg)
            if f.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            DataError::ConstraintViolation {
                detail: msg.unwrap_or_else(|| "constraint violation".into()),
            }
        }
        other => DataError::Database(other),
    }
}

/// Parse an ISO-8601 date column inside a `query_map` closure.
pub(crate) fn date_column(idx: usize, raw: String) -> rusqlite::Result<NaiveDate> {
    raw.parse().map_err(|e: chrono::ParseError| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}
