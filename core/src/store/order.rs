use super::{date_column, map_constraint, SqlStore};
use crate::error::{DataError, DataResult};
use crate::types::{Cents, CustomerId, ItemId, OrderId, ProductId};
use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Shipped,
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Shipped => "shipped",
            Self::Completed => "completed",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(Self::Pending),
            "shipped" => Some(Self::Shipped),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// A stored order. `total_cents` is 0 until finalization; an order is
/// not valid for aggregate queries until then.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    pub order_date: NaiveDate,
    pub status: OrderStatus,
    pub total_cents: Cents,
}

/// A stored order line. `unit_price_cents` is the product price captured
/// at purchase time — later catalog reprices do not touch it.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItem {
    pub item_id: ItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: i64,
    pub unit_price_cents: Cents,
    pub subtotal_cents: Cents,
}

impl SqlStore {
    /// Insert an order with total 0 and return its assigned identifier.
    /// Fails with `ConstraintViolation` if the customer does not exist.
    pub fn insert_order(
        &self,
        customer_id: CustomerId,
        order_date: NaiveDate,
        status: OrderStatus,
    ) -> DataResult<OrderId> {
        self.conn()
            .execute(
                "INSERT INTO shop_order (customer_id, order_date, status, total_cents)
                 VALUES (?1, ?2, ?3, 0)",
                params![customer_id, order_date.to_string(), status.as_str()],
            )
            .map_err(map_constraint)?;
        Ok(self.conn().last_insert_rowid())
    }

    /// Insert an order line and return its assigned identifier.
    /// Fails with `ConstraintViolation` if the order or product does not
    /// exist, or if the order already holds a line for this product.
    pub fn insert_order_item(
        &self,
        order_id: OrderId,
        product_id: ProductId,
        quantity: i64,
        unit_price_cents: Cents,
        subtotal_cents: Cents,
    ) -> DataResult<ItemId> {
        self.conn()
            .execute(
                "INSERT INTO order_item
                   (order_id, product_id, quantity, unit_price_cents, subtotal_cents)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![order_id, product_id, quantity, unit_price_cents, subtotal_cents],
            )
            .map_err(map_constraint)?;
        Ok(self.conn().last_insert_rowid())
    }

    /// The single permitted update: write an order's total once all its
    /// items exist. After this the order is read-only and eligible for
    /// aggregation.
    pub fn finalize_order_total(&self, order_id: OrderId, total_cents: Cents) -> DataResult<()> {
        let changed = self
            .conn()
            .execute(
                "UPDATE shop_order SET total_cents = ?1 WHERE order_id = ?2",
                params![total_cents, order_id],
            )
            .map_err(map_constraint)?;
        if changed == 0 {
            return Err(DataError::NotFound {
                entity: "order",
                id: order_id,
            });
        }
        Ok(())
    }

    pub fn get_order(&self, order_id: OrderId) -> DataResult<Order> {
        let row = self
            .conn()
            .prepare(
                "SELECT order_id, customer_id, order_date, status, total_cents
                 FROM shop_order WHERE order_id = ?1",
            )?
            .query_row(params![order_id], read_order)
            .optional()?;
        row.ok_or(DataError::NotFound {
            entity: "order",
            id: order_id,
        })
    }

    /// All orders for one customer, in insertion order.
    pub fn orders_for_customer(&self, customer_id: CustomerId) -> DataResult<Vec<Order>> {
        let mut stmt = self.conn().prepare(
            "SELECT order_id, customer_id, order_date, status, total_cents
             FROM shop_order WHERE customer_id = ?1 ORDER BY order_id ASC",
        )?;
        let rows = stmt.query_map(params![customer_id], read_order)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn all_orders(&self) -> DataResult<Vec<Order>> {
        let mut stmt = self.conn().prepare(
            "SELECT order_id, customer_id, order_date, status, total_cents
             FROM shop_order ORDER BY order_id ASC",
        )?;
        let rows = stmt.query_map([], read_order)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// All lines of one order, in insertion order.
    pub fn items_for_order(&self, order_id: OrderId) -> DataResult<Vec<OrderItem>> {
        let mut stmt = self.conn().prepare(
            "SELECT item_id, order_id, product_id, quantity, unit_price_cents, subtotal_cents
             FROM order_item WHERE order_id = ?1 ORDER BY item_id ASC",
        )?;
        let rows = stmt.query_map(params![order_id], |row| {
            Ok(OrderItem {
                item_id: row.get(0)?,
                order_id: row.get(1)?,
                product_id: row.get(2)?,
                quantity: row.get(3)?,
                unit_price_cents: row.get(4)?,
                subtotal_cents: row.get(5)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

fn read_order(row: &rusqlite::Row<'_>) -> rusqlite::Result<Order> {
    let status_raw: String = row.get(3)?;
    let status = OrderStatus::parse(&status_raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            rusqlite::types::Type::Text,
            format!("unknown order status: {status_raw}").into(),
        )
    })?;
    Ok(Order {
        order_id: row.get(0)?,
        customer_id: row.get(1)?,
        order_date: date_column(2, row.get::<_, String>(2)?)?,
        status,
        total_cents: row.get(4)?,
    })
}
