use super::{date_column, map_constraint, SqlStore};
use crate::config::CustomerSeed;
use crate::error::{DataError, DataResult};
use crate::types::CustomerId;
use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension};
use serde::Serialize;

/// A stored customer row. Created once at generation time; immutable
/// thereafter.
#[derive(Debug, Clone, Serialize)]
pub struct Customer {
    pub customer_id: CustomerId,
    pub name: String,
    pub email: String,
    pub city: String,
    pub region: String,
    pub registered_on: NaiveDate,
    pub active: bool,
}

impl SqlStore {
    /// Insert a customer and return its assigned identifier.
    /// Fails with `ConstraintViolation` on a duplicate email.
    pub fn insert_customer(&self, seed: &CustomerSeed) -> DataResult<CustomerId> {
        self.conn()
            .execute(
                "INSERT INTO customer (name, email, city, region, registered_on, active)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    seed.name,
                    seed.email,
                    seed.city,
                    seed.region,
                    seed.registered_on.to_string(),
                    seed.active as i64,
                ],
            )
            .map_err(map_constraint)?;
        Ok(self.conn().last_insert_rowid())
    }

    pub fn get_customer(&self, customer_id: CustomerId) -> DataResult<Customer> {
        let row = self
            .conn()
            .prepare(
                "SELECT customer_id, name, email, city, region, registered_on, active
                 FROM customer WHERE customer_id = ?1",
            )?
            .query_row(params![customer_id], read_customer)
            .optional()?;
        row.ok_or(DataError::NotFound {
            entity: "customer",
            id: customer_id,
        })
    }

    /// All customers in insertion order.
    pub fn all_customers(&self) -> DataResult<Vec<Customer>> {
        let mut stmt = self.conn().prepare(
            "SELECT customer_id, name, email, city, region, registered_on, active
             FROM customer ORDER BY customer_id ASC",
        )?;
        let rows = stmt.query_map([], read_customer)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

fn read_customer(row: &rusqlite::Row<'_>) -> rusqlite::Result<Customer> {
    Ok(Customer {
        customer_id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        city: row.get(3)?,
        region: row.get(4)?,
        registered_on: date_column(5, row.get::<_, String>(5)?)?,
        active: row.get::<_, i64>(6)? != 0,
    })
}
