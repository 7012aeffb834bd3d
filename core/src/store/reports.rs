//! Report queries. Plain SQL, one method per report.
//!
//! Monetary sums stay in integer cents, so SUM() is exact; AVG() comes
//! back as f64 cents and is rounded only at presentation time.

use super::{date_column, SqlStore};
use crate::analytics::{
    CategoryRollupRow, ProductSalesRow, RecentOrderRow, RegionRollupRow, TopProductRow,
    VipCustomerRow,
};
use crate::error::DataResult;
use crate::store::OrderStatus;
use crate::types::Cents;
use rusqlite::params;

impl SqlStore {
    /// Two-table join: orders with their customers, newest first.
    /// Equal dates keep insertion order (stable descending sort).
    pub(crate) fn recent_orders(&self, limit: u32) -> DataResult<Vec<RecentOrderRow>> {
        let mut stmt = self.conn().prepare(
            "SELECT o.order_id, c.name, c.city, c.region, o.order_date, o.status, o.total_cents
             FROM shop_order o
             INNER JOIN customer c ON o.customer_id = c.customer_id
             ORDER BY o.order_date DESC, o.order_id ASC
             LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit], |row| {
            let status_raw: String = row.get(5)?;
            let status = OrderStatus::parse(&status_raw).ok_or_else(|| {
                rusqlite::Error::FromSqlConversionFailure(
                    5,
                    rusqlite::types::Type::Text,
                    format!("unknown order status: {status_raw}").into(),
                )
            })?;
            Ok(RecentOrderRow {
                order_id: row.get(0)?,
                customer_name: row.get(1)?,
                city: row.get(2)?,
                region: row.get(3)?,
                order_date: date_column(4, row.get::<_, String>(4)?)?,
                status,
                total_cents: row.get(6)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Three-table join + GROUP BY + HAVING: customers whose summed item
    /// subtotals exceed the threshold. AVG(total) runs over the joined
    /// item rows, so an order weighs once per line.
    pub(crate) fn vip_customers(&self, threshold_cents: Cents) -> DataResult<Vec<VipCustomerRow>> {
        let mut stmt = self.conn().prepare(
            "SELECT c.customer_id, c.name, c.city, c.region,
                    COUNT(DISTINCT o.order_id)  AS order_count,
                    COUNT(i.item_id)            AS item_count,
                    SUM(i.subtotal_cents)       AS spend_cents,
                    AVG(o.total_cents)          AS avg_order_cents
             FROM customer c
             INNER JOIN shop_order o ON o.customer_id = c.customer_id
             INNER JOIN order_item i ON i.order_id = o.order_id
             GROUP BY c.customer_id
             HAVING SUM(i.subtotal_cents) > ?1
             ORDER BY spend_cents DESC, c.customer_id ASC",
        )?;
        let rows = stmt.query_map(params![threshold_cents], |row| {
            Ok(VipCustomerRow {
                customer_id: row.get(0)?,
                name: row.get(1)?,
                city: row.get(2)?,
                region: row.get(3)?,
                order_count: row.get(4)?,
                item_count: row.get(5)?,
                spend_cents: row.get(6)?,
                avg_order_cents: row.get(7)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Join + scalar subquery: products whose distinct order count
    /// strictly exceeds the average distinct order count per product.
    /// The average is computed once, over products with at least one
    /// item row (the literal subquery groups existing items only).
    pub(crate) fn above_average_products(&self) -> DataResult<Vec<ProductSalesRow>> {
        let mut stmt = self.conn().prepare(
            "SELECT p.product_id, p.name, p.category, p.price_cents,
                    s.order_count, s.quantity, s.revenue_cents
             FROM product p
             INNER JOIN (
                 SELECT product_id,
                        COUNT(DISTINCT order_id) AS order_count,
                        SUM(quantity)            AS quantity,
                        SUM(subtotal_cents)      AS revenue_cents
                 FROM order_item
                 GROUP BY product_id
             ) s ON s.product_id = p.product_id
             WHERE s.order_count > (
                 SELECT AVG(order_count) FROM (
                     SELECT COUNT(DISTINCT order_id) AS order_count
                     FROM order_item
                     GROUP BY product_id
                 )
             )
             ORDER BY s.revenue_cents DESC, p.product_id ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(ProductSalesRow {
                product_id: row.get(0)?,
                name: row.get(1)?,
                category: row.get(2)?,
                list_price_cents: row.get(3)?,
                order_count: row.get(4)?,
                quantity: row.get(5)?,
                revenue_cents: row.get(6)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Category rollup over prices actually charged.
    pub(crate) fn category_rollup(&self) -> DataResult<Vec<CategoryRollupRow>> {
        let mut stmt = self.conn().prepare(
            "SELECT p.category,
                    COUNT(DISTINCT i.order_id) AS order_count,
                    SUM(i.quantity)            AS quantity,
                    SUM(i.subtotal_cents)      AS revenue_cents,
                    AVG(i.unit_price_cents)    AS avg_unit_price_cents
             FROM product p
             INNER JOIN order_item i ON i.product_id = p.product_id
             GROUP BY p.category
             ORDER BY revenue_cents DESC, p.category ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(CategoryRollupRow {
                category: row.get(0)?,
                order_count: row.get(1)?,
                quantity: row.get(2)?,
                revenue_cents: row.get(3)?,
                avg_unit_price_cents: row.get(4)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Top products by quantity sold.
    pub(crate) fn top_products(&self, limit: u32) -> DataResult<Vec<TopProductRow>> {
        let mut stmt = self.conn().prepare(
            "SELECT p.product_id, p.name, p.category,
                    SUM(i.quantity)       AS quantity,
                    SUM(i.subtotal_cents) AS revenue_cents
             FROM product p
             INNER JOIN order_item i ON i.product_id = p.product_id
             GROUP BY p.product_id
             ORDER BY quantity DESC, p.product_id ASC
             LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit], |row| {
            Ok(TopProductRow {
                product_id: row.get(0)?,
                name: row.get(1)?,
                category: row.get(2)?,
                quantity: row.get(3)?,
                revenue_cents: row.get(4)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Regional rollup over customers and their orders.
    pub(crate) fn regional_rollup(&self) -> DataResult<Vec<RegionRollupRow>> {
        let mut stmt = self.conn().prepare(
            "SELECT c.region,
                    COUNT(DISTINCT c.customer_id) AS customer_count,
                    COUNT(DISTINCT o.order_id)    AS order_count,
                    SUM(o.total_cents)            AS revenue_cents,
                    AVG(o.total_cents)            AS avg_order_cents
             FROM customer c
             INNER JOIN shop_order o ON o.customer_id = c.customer_id
             GROUP BY c.region
             ORDER BY revenue_cents DESC, c.region ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(RegionRollupRow {
                region: row.get(0)?,
                customer_count: row.get(1)?,
                order_count: row.get(2)?,
                revenue_cents: row.get(3)?,
                avg_order_cents: row.get(4)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
