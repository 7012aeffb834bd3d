//! Analytics engine — the six canonical reporting queries.
//!
//! Each query is a pure, stateless function of the current store
//! snapshot: join, group, aggregate, order, project. The engine holds no
//! session state. SQL lives in `store/reports.rs`; this module owns the
//! row schemas, the VIP threshold, and the one query precondition
//! (above-average products is undefined over an empty catalog).
//!
//! Ordering is fully deterministic: every query carries a secondary sort
//! key (insertion order) so equal primary keys cannot reorder between
//! runs.

use crate::error::{DataError, DataResult};
use crate::store::{Entity, OrderStatus, SqlStore};
use crate::types::{Cents, CustomerId, OrderId, ProductId};
use chrono::NaiveDate;
use serde::Serialize;

/// Row cap for the recent-orders query.
pub const RECENT_ORDER_LIMIT: u32 = 15;
/// Row cap for the top-products query.
pub const TOP_PRODUCT_LIMIT: u32 = 10;

// ── Row schemas ──────────────────────────────────────────────────────────────

/// Orders ⋈ customers, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct RecentOrderRow {
    pub order_id: OrderId,
    pub customer_name: String,
    pub city: String,
    pub region: String,
    pub order_date: NaiveDate,
    pub status: OrderStatus,
    pub total_cents: Cents,
}

/// One customer whose summed item spend exceeds the VIP threshold.
/// `avg_order_cents` is averaged over the joined item rows — an order
/// contributes once per line, not once per order.
#[derive(Debug, Clone, Serialize)]
pub struct VipCustomerRow {
    pub customer_id: CustomerId,
    pub name: String,
    pub city: String,
    pub region: String,
    pub order_count: i64,
    pub item_count: i64,
    pub spend_cents: Cents,
    pub avg_order_cents: f64,
}

/// Per-product sales, filtered to products whose distinct order count
/// strictly exceeds the population average.
#[derive(Debug, Clone, Serialize)]
pub struct ProductSalesRow {
    pub product_id: ProductId,
    pub name: String,
    pub category: String,
    pub list_price_cents: Cents,
    pub order_count: i64,
    pub quantity: i64,
    pub revenue_cents: Cents,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryRollupRow {
    pub category: String,
    pub order_count: i64,
    pub quantity: i64,
    pub revenue_cents: Cents,
    /// Average unit price actually charged (captured prices, not list).
    pub avg_unit_price_cents: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopProductRow {
    pub product_id: ProductId,
    pub name: String,
    pub category: String,
    pub quantity: i64,
    pub revenue_cents: Cents,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegionRollupRow {
    pub region: String,
    pub customer_count: i64,
    pub order_count: i64,
    pub revenue_cents: Cents,
    pub avg_order_cents: f64,
}

// ── Engine ───────────────────────────────────────────────────────────────────

pub struct AnalyticsEngine<'a> {
    store: &'a SqlStore,
    vip_threshold_cents: Cents,
}

impl<'a> AnalyticsEngine<'a> {
    pub fn new(store: &'a SqlStore, vip_threshold_cents: Cents) -> Self {
        Self {
            store,
            vip_threshold_cents,
        }
    }

    /// The 15 most recent orders with their customer fields.
    pub fn recent_orders(&self) -> DataResult<Vec<RecentOrderRow>> {
        self.store.recent_orders(RECENT_ORDER_LIMIT)
    }

    /// Customers whose summed item subtotals exceed the threshold,
    /// biggest spenders first.
    pub fn vip_customers(&self) -> DataResult<Vec<VipCustomerRow>> {
        self.store.vip_customers(self.vip_threshold_cents)
    }

    /// Products whose distinct order count strictly exceeds the average
    /// distinct order count per product, computed once over all products
    /// with at least one sale (the scalar subquery is undefined when the
    /// catalog is empty).
    pub fn above_average_products(&self) -> DataResult<Vec<ProductSalesRow>> {
        if self.store.count(Entity::Products)? == 0 {
            return Err(DataError::InvalidConfiguration(
                "above-average products is undefined over an empty product catalog".into(),
            ));
        }
        self.store.above_average_products()
    }

    pub fn category_rollup(&self) -> DataResult<Vec<CategoryRollupRow>> {
        self.store.category_rollup()
    }

    /// Top 10 products by quantity sold.
    pub fn top_products(&self) -> DataResult<Vec<TopProductRow>> {
        self.store.top_products(TOP_PRODUCT_LIMIT)
    }

    pub fn regional_rollup(&self) -> DataResult<Vec<RegionRollupRow>> {
        self.store.regional_rollup()
    }

    /// The three rollup result sets as one ordered triple, consumed
    /// atomically by the caller: category, top products, regions.
    #[allow(clippy::type_complexity)]
    pub fn all_rollups(
        &self,
    ) -> DataResult<(Vec<CategoryRollupRow>, Vec<TopProductRow>, Vec<RegionRollupRow>)> {
        Ok((
            self.category_rollup()?,
            self.top_products()?,
            self.regional_rollup()?,
        ))
    }
}
