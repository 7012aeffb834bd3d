//! shopsim-runner: headless dataset seeder and report runner.
//!
//! Usage:
//!   shopsim-runner --seed 12345 --db shop.db
//!   shopsim-runner --seed 12345 --config config.json --json

use anyhow::Result;
use shopsim_core::{
    analytics::AnalyticsEngine,
    config::GenConfig,
    generator::DatasetGenerator,
    report,
    store::{Entity, SqlStore},
};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let json_mode = args.iter().any(|a| a == "--json");
    let db = args
        .windows(2)
        .find(|w| w[0] == "--db")
        .map(|w| w[1].as_str())
        .unwrap_or(":memory:");
    let config_path = args
        .windows(2)
        .find(|w| w[0] == "--config")
        .map(|w| w[1].as_str());

    let config = match config_path {
        Some(path) => GenConfig::from_json_file(path)?,
        None => GenConfig::default(),
    };

    let store = if db == ":memory:" {
        SqlStore::in_memory()?
    } else {
        SqlStore::open(db)?
    };
    store.migrate()?;

    // Seed idempotently: generate only against an empty store.
    if store.count(Entity::Customers)? == 0 {
        let summary = DatasetGenerator::new(config.clone(), seed).run(&store)?;
        log::info!(
            "seeded {} orders / {} items with seed {seed}",
            summary.orders,
            summary.items
        );
    } else {
        log::info!("store already populated, skipping generation");
    }

    let engine = AnalyticsEngine::new(&store, config.vip_threshold_cents);

    let recent = engine.recent_orders()?;
    let vips = engine.vip_customers()?;
    let above_avg = engine.above_average_products()?;
    let (categories, top, regions) = engine.all_rollups()?;

    if json_mode {
        let doc = serde_json::json!({
            "recent_orders": recent,
            "vip_customers": vips,
            "above_average_products": above_avg,
            "category_rollup": categories,
            "top_products": top,
            "regional_rollup": regions,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!("== Recent orders ==");
    print!("{}", report::render_recent_orders(&recent));
    println!("\n== VIP customers ==");
    print!("{}", report::render_vip_customers(&vips));
    println!("\n== Above-average products ==");
    print!("{}", report::render_above_average_products(&above_avg));
    println!("\n== Sales by category ==");
    print!("{}", report::render_category_rollup(&categories));
    println!("\n== Top products ==");
    print!("{}", report::render_top_products(&top));
    println!("\n== Sales by region ==");
    print!("{}", report::render_regional_rollup(&regions));

    Ok(())
}

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
