use super::{map_constraint, SqlStore};
use crate::config::ProductSeed;
use crate::error::{DataError, DataResult};
use crate::types::{Cents, ProductId};
use rusqlite::{params, OptionalExtension};
use serde::Serialize;

/// A stored product row.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub product_id: ProductId,
    pub name: String,
    pub category: String,
    pub price_cents: Cents,
    pub stock: i64,
    pub supplier: String,
}

impl SqlStore {
    /// Insert a product and return its assigned identifier.
    pub fn insert_product(&self, seed: &ProductSeed) -> DataResult<ProductId> {
        self.conn()
            .execute(
                "INSERT INTO product (name, category, price_cents, stock, supplier)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    seed.name,
                    seed.category,
                    seed.price_cents,
                    seed.stock,
                    seed.supplier,
                ],
            )
            .map_err(map_constraint)?;
        Ok(self.conn().last_insert_rowid())
    }

    pub fn get_product(&self, product_id: ProductId) -> DataResult<Product> {
        let row = self
            .conn()
            .prepare(
                "SELECT product_id, name, category, price_cents, stock, supplier
                 FROM product WHERE product_id = ?1",
            )?
            .query_row(params![product_id], read_product)
            .optional()?;
        row.ok_or(DataError::NotFound {
            entity: "product",
            id: product_id,
        })
    }

    /// Catalog reprice. Order items keep the unit price captured when
    /// they were created — this never rewrites history.
    pub fn update_product_price(
        &self,
        product_id: ProductId,
        price_cents: Cents,
    ) -> DataResult<()> {
        let changed = self
            .conn()
            .execute(
                "UPDATE product SET price_cents = ?1 WHERE product_id = ?2",
                params![price_cents, product_id],
            )
            .map_err(map_constraint)?;
        if changed == 0 {
            return Err(DataError::NotFound {
                entity: "product",
                id: product_id,
            });
        }
        Ok(())
    }
}

fn read_product(row: &rusqlite::Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        product_id: row.get(0)?,
        name: row.get(1)?,
        category: row.get(2)?,
        price_cents: row.get(3)?,
        stock: row.get(4)?,
        supplier: row.get(5)?,
    })
}
