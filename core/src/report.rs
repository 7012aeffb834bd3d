//! Result reporter — plain-text tables over the engine's row sets.
//!
//! This is the only place monetary values are rounded: sums arrive as
//! exact integer cents, averages as full-precision f64 cents, and both
//! are rendered to two decimals here.

use crate::analytics::{
    CategoryRollupRow, ProductSalesRow, RecentOrderRow, RegionRollupRow, TopProductRow,
    VipCustomerRow,
};
use crate::types::Cents;

/// Format exact cents as a 2-decimal amount with thousands separators.
pub fn money(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", group_thousands(abs / 100), abs % 100)
}

/// Format an average (f64 cents): round once to whole cents, then render.
pub fn money_avg(cents: f64) -> String {
    money(cents.round() as Cents)
}

fn group_thousands(mut n: u64) -> String {
    let mut groups = Vec::new();
    loop {
        if n < 1000 {
            groups.push(n.to_string());
            break;
        }
        groups.push(format!("{:03}", n % 1000));
        n /= 1000;
    }
    groups.reverse();
    groups.join(",")
}

pub fn render_recent_orders(rows: &[RecentOrderRow]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<6} {:<22} {:<12} {:<4} {:<12} {:<10} {:>12}\n",
        "ID", "Customer", "City", "Reg", "Date", "Status", "Total"
    ));
    out.push_str(&"-".repeat(84));
    out.push('\n');
    for r in rows {
        out.push_str(&format!(
            "{:<6} {:<22} {:<12} {:<4} {:<12} {:<10} {:>12}\n",
            r.order_id,
            r.customer_name,
            r.city,
            r.region,
            r.order_date,
            r.status.as_str(),
            money(r.total_cents)
        ));
    }
    out.push_str(&format!("rows: {}\n", rows.len()));
    out
}

pub fn render_vip_customers(rows: &[VipCustomerRow]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<22} {:<12} {:<4} {:>7} {:>6} {:>14} {:>12}\n",
        "Customer", "City", "Reg", "Orders", "Items", "Spend", "Avg order"
    ));
    out.push_str(&"-".repeat(84));
    out.push('\n');
    for r in rows {
        out.push_str(&format!(
            "{:<22} {:<12} {:<4} {:>7} {:>6} {:>14} {:>12}\n",
            r.name,
            r.city,
            r.region,
            r.order_count,
            r.item_count,
            money(r.spend_cents),
            money_avg(r.avg_order_cents)
        ));
    }
    out.push_str(&format!("rows: {}\n", rows.len()));
    out
}

pub fn render_above_average_products(rows: &[ProductSalesRow]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<26} {:<12} {:>10} {:>7} {:>5} {:>14}\n",
        "Product", "Category", "List", "Orders", "Qty", "Revenue"
    ));
    out.push_str(&"-".repeat(80));
    out.push('\n');
    for r in rows {
        out.push_str(&format!(
            "{:<26} {:<12} {:>10} {:>7} {:>5} {:>14}\n",
            r.name,
            r.category,
            money(r.list_price_cents),
            r.order_count,
            r.quantity,
            money(r.revenue_cents)
        ));
    }
    out.push_str(&format!("rows: {}\n", rows.len()));
    out
}

pub fn render_category_rollup(rows: &[CategoryRollupRow]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<14} {:>7} {:>5} {:>14} {:>12}\n",
        "Category", "Orders", "Qty", "Revenue", "Avg price"
    ));
    out.push_str(&"-".repeat(58));
    out.push('\n');
    for r in rows {
        out.push_str(&format!(
            "{:<14} {:>7} {:>5} {:>14} {:>12}\n",
            r.category,
            r.order_count,
            r.quantity,
            money(r.revenue_cents),
            money_avg(r.avg_unit_price_cents)
        ));
    }
    out.push_str(&format!("rows: {}\n", rows.len()));
    out
}

pub fn render_top_products(rows: &[TopProductRow]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<26} {:<12} {:>5} {:>14}\n",
        "Product", "Category", "Qty", "Revenue"
    ));
    out.push_str(&"-".repeat(62));
    out.push('\n');
    for r in rows {
        out.push_str(&format!(
            "{:<26} {:<12} {:>5} {:>14}\n",
            r.name,
            r.category,
            r.quantity,
            money(r.revenue_cents)
        ));
    }
    out.push_str(&format!("rows: {}\n", rows.len()));
    out
}

pub fn render_regional_rollup(rows: &[RegionRollupRow]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<8} {:>9} {:>7} {:>14} {:>12}\n",
        "Region", "Customers", "Orders", "Revenue", "Avg order"
    ));
    out.push_str(&"-".repeat(56));
    out.push('\n');
    for r in rows {
        out.push_str(&format!(
            "{:<8} {:>9} {:>7} {:>14} {:>12}\n",
            r.region,
            r.customer_count,
            r.order_count,
            money(r.revenue_cents),
            money_avg(r.avg_order_cents)
        ));
    }
    out.push_str(&format!("rows: {}\n", rows.len()));
    out
}
