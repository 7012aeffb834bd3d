//! Generation configuration: the fixed catalogs plus every knob the
//! generator consumes. All parameters are explicit and validated before
//! a single row is inserted — there are no hidden defaults beyond the
//! ones `Default` ships.

use crate::error::{DataError, DataResult};
use crate::types::Cents;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// One customer in the fixed catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerSeed {
    pub name: String,
    pub email: String,
    pub city: String,
    pub region: String,
    pub registered_on: NaiveDate,
    pub active: bool,
}

/// One product in the fixed catalog. Prices are minor units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSeed {
    pub name: String,
    pub category: String,
    pub price_cents: Cents,
    pub stock: i64,
    pub supplier: String,
}

/// Discrete status distribution for generated orders.
/// Weights need not sum to 1; they are normalized at draw time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StatusWeights {
    pub pending: f64,
    pub shipped: f64,
    pub completed: f64,
}

impl StatusWeights {
    /// Weights in the fixed pending/shipped/completed order the
    /// generator indexes by.
    pub fn to_array(&self) -> [f64; 3] {
        [self.pending, self.shipped, self.completed]
    }
}

/// Inclusive integer range, e.g. orders per customer 2..=5.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoundedRange {
    pub lo: u64,
    pub hi: u64,
}

impl BoundedRange {
    pub fn new(lo: u64, hi: u64) -> Self {
        Self { lo, hi }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenConfig {
    pub customers: Vec<CustomerSeed>,
    pub products: Vec<ProductSeed>,
    pub orders_per_customer: BoundedRange,
    pub items_per_order: BoundedRange,
    pub quantity_per_item: BoundedRange,
    /// Order dates are `base_order_date + uniform(0..=order_day_window)`.
    pub base_order_date: NaiveDate,
    pub order_day_window: u64,
    pub status_weights: StatusWeights,
    /// HAVING threshold for the VIP customers query, minor units.
    pub vip_threshold_cents: Cents,
}

impl GenConfig {
    /// Load a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> DataResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())
            .map_err(|e| DataError::InvalidConfiguration(format!("config file: {e}")))?;
        let config: GenConfig = serde_json::from_str(&raw)?;
        Ok(config)
    }

    /// Reject out-of-range parameters before any insert occurs.
    pub fn validate(&self) -> DataResult<()> {
        fn bad(msg: String) -> DataResult<()> {
            Err(DataError::InvalidConfiguration(msg))
        }

        if self.customers.is_empty() {
            return bad("customer catalog is empty".into());
        }
        if self.products.is_empty() {
            return bad("product catalog is empty".into());
        }

        let mut emails = HashSet::new();
        for c in &self.customers {
            if !emails.insert(c.email.as_str()) {
                return bad(format!("duplicate catalog email: {}", c.email));
            }
        }
        for p in &self.products {
            if p.price_cents <= 0 {
                return bad(format!("product '{}' has non-positive price", p.name));
            }
            if p.stock < 0 {
                return bad(format!("product '{}' has negative stock", p.name));
            }
        }

        for (label, r) in [
            ("orders_per_customer", self.orders_per_customer),
            ("items_per_order", self.items_per_order),
            ("quantity_per_item", self.quantity_per_item),
        ] {
            if r.lo > r.hi {
                return bad(format!("{label}: lo {} > hi {}", r.lo, r.hi));
            }
        }
        if self.items_per_order.lo < 1 {
            return bad("items_per_order must draw at least one item".into());
        }
        if self.quantity_per_item.lo < 1 {
            return bad("quantity_per_item must draw at least 1".into());
        }
        // Items are sampled without replacement, so an order can never
        // hold more distinct products than the catalog has.
        if self.items_per_order.hi > self.products.len() as u64 {
            return bad(format!(
                "items_per_order hi {} exceeds catalog size {}",
                self.items_per_order.hi,
                self.products.len()
            ));
        }

        // ~270 years; keeps base_date + offset inside chrono's range.
        if self.order_day_window > 100_000 {
            return bad(format!(
                "order_day_window {} is out of range",
                self.order_day_window
            ));
        }

        let w = self.status_weights;
        if w.pending < 0.0 || w.shipped < 0.0 || w.completed < 0.0 {
            return bad("status weights must be non-negative".into());
        }
        if w.pending + w.shipped + w.completed <= 0.0 {
            return bad("status weights must sum to a positive value".into());
        }

        if self.vip_threshold_cents < 0 {
            return bad("vip_threshold_cents must be non-negative".into());
        }
        Ok(())
    }
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            customers: default_customers(),
            products: default_products(),
            orders_per_customer: BoundedRange::new(2, 5),
            items_per_order: BoundedRange::new(1, 5),
            quantity_per_item: BoundedRange::new(1, 3),
            base_order_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            order_day_window: 300,
            // Historical mix: roughly 3 completed for every pending or
            // shipped order.
            status_weights: StatusWeights {
                pending: 1.0,
                shipped: 1.0,
                completed: 3.0,
            },
            vip_threshold_cents: 500_000,
        }
    }
}

fn customer(
    name: &str,
    email: &str,
    city: &str,
    region: &str,
    registered_on: &str,
) -> CustomerSeed {
    CustomerSeed {
        name: name.into(),
        email: email.into(),
        city: city.into(),
        region: region.into(),
        registered_on: registered_on.parse().expect("catalog date"),
        active: true,
    }
}

fn product(name: &str, category: &str, price_cents: Cents, stock: i64, supplier: &str) -> ProductSeed {
    ProductSeed {
        name: name.into(),
        category: category.into(),
        price_cents,
        stock,
        supplier: supplier.into(),
    }
}

fn default_customers() -> Vec<CustomerSeed> {
    vec![
        customer("James Walker", "james.walker@example.com", "Austin", "TX", "2023-01-15"),
        customer("Maria Santos", "maria.santos@example.com", "Miami", "FL", "2023-02-20"),
        customer("Peter Olson", "peter.olson@example.com", "Denver", "CO", "2023-03-10"),
        customer("Anna Costa", "anna.costa@example.com", "Portland", "OR", "2023-04-05"),
        customer("Carl Soares", "carl.soares@example.com", "Seattle", "WA", "2023-05-12"),
        customer("Julia Lima", "julia.lima@example.com", "Austin", "TX", "2023-06-18"),
        customer("Robert Alves", "robert.alves@example.com", "Atlanta", "GA", "2023-07-22"),
        customer("Fernanda Rocha", "fernanda.rocha@example.com", "Chicago", "IL", "2023-08-30"),
        customer("Lucas Pereira", "lucas.pereira@example.com", "Boston", "MA", "2023-09-14"),
        customer("Patricia Martins", "patricia.martins@example.com", "Phoenix", "AZ", "2023-10-08"),
        customer("Richard Gomes", "richard.gomes@example.com", "Austin", "TX", "2023-11-01"),
        customer("Camila Ferreira", "camila.ferreira@example.com", "Miami", "FL", "2023-12-15"),
        customer("Thiago Barbosa", "thiago.barbosa@example.com", "Denver", "CO", "2024-01-20"),
        customer("Amanda Silva", "amanda.silva@example.com", "Portland", "OR", "2024-02-10"),
        customer("Bruno Ribeiro", "bruno.ribeiro@example.com", "Seattle", "WA", "2024-03-05"),
    ]
}

fn default_products() -> Vec<ProductSeed> {
    vec![
        product("Dell Inspiron Laptop", "Electronics", 350_000, 15, "Dell Inc"),
        product("Logitech MX Mouse", "Electronics", 25_000, 50, "Logitech"),
        product("RGB Mechanical Keyboard", "Electronics", 45_000, 30, "Razer"),
        product("LG 27\" Monitor", "Electronics", 120_000, 20, "LG Electronics"),
        product("HD Webcam", "Electronics", 30_000, 40, "Logitech"),
        product("Gaming Headset", "Electronics", 35_000, 25, "HyperX"),
        product("Samsung 1TB SSD", "Electronics", 60_000, 35, "Samsung"),
        product("16GB RAM Module", "Electronics", 40_000, 45, "Kingston"),
        product("Gaming Chair", "Furniture", 110_000, 12, "DXRacer"),
        product("Computer Desk", "Furniture", 80_000, 18, "Madesa"),
        product("Large Mousepad", "Accessories", 8_000, 60, "Warrior"),
        product("USB 3.0 Hub", "Accessories", 12_000, 55, "Anker"),
        product("HDMI Cable 2m", "Accessories", 4_500, 70, "Elg"),
        product("Laptop Stand", "Accessories", 15_000, 40, "Octoo"),
        product("4K Webcam", "Electronics", 80_000, 15, "Logitech"),
        product("USB Microphone", "Electronics", 55_000, 22, "Blue Microphones"),
        product("8-Port Switch", "Electronics", 20_000, 28, "TP-Link"),
        product("Wi-Fi 6 Router", "Electronics", 45_000, 20, "TP-Link"),
        product("1200VA UPS", "Electronics", 65_000, 16, "SMS"),
        product("Voltage Stabilizer", "Electronics", 28_000, 24, "Enermax"),
    ]
}
