//! Dataset generator — a deterministic catalog plus a randomized,
//! constraint-respecting order history.
//!
//! RULES:
//!   - All randomness flows through the RngBank; never the platform RNG.
//!   - The whole run happens inside one store transaction. Any
//!     constraint violation aborts and rolls back — a partial dataset is
//!     never left behind.
//!   - The generator assumes an empty store. Callers seed idempotently
//!     by checking population counts first; the generator itself does
//!     not.
//!
//! Per order the sequence is: insert with total 0, insert its items
//! (distinct products, sampled without replacement, unit price captured
//! from the catalog at that moment), then finalize the total as the
//! exact sum of the item subtotals. Only finalized orders are valid for
//! aggregation.

use crate::config::GenConfig;
use crate::error::DataResult;
use crate::rng::{RngBank, StreamSlot};
use crate::store::{OrderStatus, SqlStore};
use crate::types::Cents;
use chrono::Days;

const STATUSES: [OrderStatus; 3] = [
    OrderStatus::Pending,
    OrderStatus::Shipped,
    OrderStatus::Completed,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationSummary {
    pub customers: u64,
    pub products: u64,
    pub orders: u64,
    pub items: u64,
    /// Sum of all finalized order totals, exact.
    pub gross_cents: Cents,
}

pub struct DatasetGenerator {
    config: GenConfig,
    rng_bank: RngBank,
}

impl DatasetGenerator {
    pub fn new(config: GenConfig, seed: u64) -> Self {
        Self {
            config,
            rng_bank: RngBank::new(seed),
        }
    }

    /// Validate the configuration, then populate the store in one
    /// transaction. Fatal on any constraint violation.
    pub fn run(&self, store: &SqlStore) -> DataResult<GenerationSummary> {
        self.config.validate()?;
        store.begin()?;
        match self.populate(store) {
            Ok(summary) => {
                store.commit()?;
                log::info!(
                    "generation complete: {} customers, {} products, {} orders, {} items, gross {} cents",
                    summary.customers,
                    summary.products,
                    summary.orders,
                    summary.items,
                    summary.gross_cents
                );
                Ok(summary)
            }
            Err(e) => {
                // Best effort: the connection drops the open transaction
                // anyway if this fails.
                let _ = store.rollback();
                Err(e)
            }
        }
    }

    fn populate(&self, store: &SqlStore) -> DataResult<GenerationSummary> {
        let config = &self.config;

        let mut customer_ids = Vec::with_capacity(config.customers.len());
        for seed in &config.customers {
            customer_ids.push(store.insert_customer(seed)?);
        }

        let mut product_ids = Vec::with_capacity(config.products.len());
        for seed in &config.products {
            product_ids.push(store.insert_product(seed)?);
        }

        let mut order_rng = self.rng_bank.for_stream(StreamSlot::Order);
        let mut item_rng = self.rng_bank.for_stream(StreamSlot::Item);
        let status_weights = config.status_weights.to_array();

        let mut orders = 0u64;
        let mut items = 0u64;
        let mut gross: Cents = 0;

        for &customer_id in &customer_ids {
            let order_count = order_rng
                .range_inclusive(config.orders_per_customer.lo, config.orders_per_customer.hi);

            for _ in 0..order_count {
                let day_offset = order_rng.below(config.order_day_window + 1);
                let order_date = config
                    .base_order_date
                    .checked_add_days(Days::new(day_offset))
                    .expect("order date within chrono range");
                let status = STATUSES[order_rng.pick_weighted(&status_weights)];

                let order_id = store.insert_order(customer_id, order_date, status)?;

                let item_count =
                    item_rng.range_inclusive(config.items_per_order.lo, config.items_per_order.hi);
                let picks = item_rng.sample_distinct(product_ids.len(), item_count as usize);

                let mut total: Cents = 0;
                for pick in picks {
                    let product = store.get_product(product_ids[pick])?;
                    let quantity = item_rng
                        .range_inclusive(config.quantity_per_item.lo, config.quantity_per_item.hi)
                        as i64;
                    // Capture the current catalog price on the line item.
                    let subtotal = product.price_cents * quantity;
                    store.insert_order_item(
                        order_id,
                        product.product_id,
                        quantity,
                        product.price_cents,
                        subtotal,
                    )?;
                    total += subtotal;
                    items += 1;
                }

                store.finalize_order_total(order_id, total)?;
                gross += total;
                orders += 1;
            }
        }

        Ok(GenerationSummary {
            customers: customer_ids.len() as u64,
            products: product_ids.len() as u64,
            orders,
            items,
            gross_cents: gross,
        })
    }
}
