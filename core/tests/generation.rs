//! Generation invariants: referential integrity, distinct products per
//! order, exact totals, captured prices, and fatal constraint handling.

use chrono::NaiveDate;
use shopsim_core::{
    config::{BoundedRange, GenConfig},
    error::DataError,
    generator::{DatasetGenerator, GenerationSummary},
    store::{Entity, SqlStore},
};

fn generated(seed: u64) -> (SqlStore, GenConfig, GenerationSummary) {
    let store = SqlStore::in_memory().expect("in-memory store");
    store.migrate().expect("migration");
    let config = GenConfig::default();
    let summary = DatasetGenerator::new(config.clone(), seed)
        .run(&store)
        .expect("generation");
    (store, config, summary)
}

#[test]
fn order_totals_equal_sum_of_item_subtotals_exactly() {
    let (store, _, _) = generated(42);
    let orders = store.all_orders().unwrap();
    assert!(!orders.is_empty());
    for order in orders {
        let items = store.items_for_order(order.order_id).unwrap();
        assert!(!items.is_empty(), "order {} has no items", order.order_id);
        let expected: i64 = items.iter().map(|i| i.subtotal_cents).sum();
        assert_eq!(
            order.total_cents, expected,
            "order {} total diverges from its items",
            order.order_id
        );
        for item in &items {
            assert_eq!(item.subtotal_cents, item.unit_price_cents * item.quantity);
        }
    }
}

#[test]
fn products_within_an_order_are_pairwise_distinct() {
    let (store, _, _) = generated(7);
    for order in store.all_orders().unwrap() {
        let items = store.items_for_order(order.order_id).unwrap();
        let mut product_ids: Vec<i64> = items.iter().map(|i| i.product_id).collect();
        product_ids.sort_unstable();
        let before = product_ids.len();
        product_ids.dedup();
        assert_eq!(
            product_ids.len(),
            before,
            "order {} repeats a product",
            order.order_id
        );
    }
}

#[test]
fn configured_ranges_are_respected() {
    let (store, config, _) = generated(99);
    let customers = store.all_customers().unwrap();
    let window_end = config
        .base_order_date
        .checked_add_days(chrono::Days::new(config.order_day_window))
        .unwrap();

    for customer in &customers {
        let orders = store.orders_for_customer(customer.customer_id).unwrap();
        let n = orders.len() as u64;
        assert!(
            (config.orders_per_customer.lo..=config.orders_per_customer.hi).contains(&n),
            "customer {} has {n} orders",
            customer.customer_id
        );
        for order in orders {
            assert!(order.order_date >= config.base_order_date);
            assert!(order.order_date <= window_end);
            let items = store.items_for_order(order.order_id).unwrap();
            let k = items.len() as u64;
            assert!((config.items_per_order.lo..=config.items_per_order.hi).contains(&k));
            for item in items {
                let q = item.quantity as u64;
                assert!((config.quantity_per_item.lo..=config.quantity_per_item.hi).contains(&q));
            }
        }
    }
}

#[test]
fn every_reference_resolves() {
    let (store, _, _) = generated(5);
    for order in store.all_orders().unwrap() {
        store.get_customer(order.customer_id).expect("order customer");
        for item in store.items_for_order(order.order_id).unwrap() {
            store.get_product(item.product_id).expect("item product");
            assert_eq!(item.order_id, order.order_id);
        }
    }
}

#[test]
fn summary_matches_store_counts() {
    let (store, config, summary) = generated(2024);
    assert_eq!(summary.customers as i64, store.count(Entity::Customers).unwrap());
    assert_eq!(summary.products as i64, store.count(Entity::Products).unwrap());
    assert_eq!(summary.orders as i64, store.count(Entity::Orders).unwrap());
    assert_eq!(summary.items as i64, store.count(Entity::OrderItems).unwrap());
    assert_eq!(summary.customers as usize, config.customers.len());

    let gross: i64 = store.all_orders().unwrap().iter().map(|o| o.total_cents).sum();
    assert_eq!(summary.gross_cents, gross);
}

#[test]
fn captured_price_survives_catalog_reprice() {
    let (store, _, _) = generated(11);
    let orders = store.all_orders().unwrap();
    let order = &orders[0];
    let item = store.items_for_order(order.order_id).unwrap()[0].clone();
    let before = store.get_product(item.product_id).unwrap();
    assert_eq!(item.unit_price_cents, before.price_cents);

    store
        .update_product_price(item.product_id, before.price_cents + 12_345)
        .unwrap();

    let after = store.get_product(item.product_id).unwrap();
    assert_eq!(after.price_cents, before.price_cents + 12_345);

    let reread = store.items_for_order(order.order_id).unwrap()[0].clone();
    assert_eq!(
        reread.unit_price_cents, item.unit_price_cents,
        "captured unit price must not follow the catalog"
    );
    assert_eq!(reread.subtotal_cents, item.subtotal_cents);

    let order_after = store.get_order(order.order_id).unwrap();
    assert_eq!(order_after.total_cents, order.total_cents);
}

#[test]
fn invalid_config_is_rejected_before_any_insert() {
    let store = SqlStore::in_memory().unwrap();
    store.migrate().unwrap();

    let mut config = GenConfig::default();
    config.items_per_order = BoundedRange::new(1, config.products.len() as u64 + 1);

    let err = DatasetGenerator::new(config, 1).run(&store).unwrap_err();
    assert!(matches!(err, DataError::InvalidConfiguration(_)), "{err}");

    for entity in [
        Entity::Customers,
        Entity::Products,
        Entity::Orders,
        Entity::OrderItems,
    ] {
        assert_eq!(store.count(entity).unwrap(), 0);
    }
}

#[test]
fn duplicate_email_is_a_constraint_violation() {
    let store = SqlStore::in_memory().unwrap();
    store.migrate().unwrap();

    let seed = GenConfig::default().customers[0].clone();
    store.insert_customer(&seed).unwrap();
    let err = store.insert_customer(&seed).unwrap_err();
    assert!(matches!(err, DataError::ConstraintViolation { .. }), "{err}");
}

#[test]
fn order_for_missing_customer_is_a_constraint_violation() {
    let store = SqlStore::in_memory().unwrap();
    store.migrate().unwrap();

    let err = store
        .insert_order(
            999,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            shopsim_core::store::OrderStatus::Pending,
        )
        .unwrap_err();
    assert!(matches!(err, DataError::ConstraintViolation { .. }), "{err}");
}

#[test]
fn duplicate_product_line_is_a_constraint_violation() {
    let store = SqlStore::in_memory().unwrap();
    store.migrate().unwrap();

    let config = GenConfig::default();
    let customer_id = store.insert_customer(&config.customers[0]).unwrap();
    let product_id = store.insert_product(&config.products[0]).unwrap();
    let order_id = store
        .insert_order(
            customer_id,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            shopsim_core::store::OrderStatus::Completed,
        )
        .unwrap();

    store
        .insert_order_item(order_id, product_id, 1, 1_000, 1_000)
        .unwrap();
    let err = store
        .insert_order_item(order_id, product_id, 2, 1_000, 2_000)
        .unwrap_err();
    assert!(matches!(err, DataError::ConstraintViolation { .. }), "{err}");
}

#[test]
fn failed_generation_rolls_back_to_the_prior_state() {
    let store = SqlStore::in_memory().unwrap();
    store.migrate().unwrap();

    // Pre-claim the first catalog email so generation must hit a
    // uniqueness violation mid-run.
    let mut squatter = GenConfig::default().customers[0].clone();
    squatter.name = "Squatter".into();
    store.insert_customer(&squatter).unwrap();

    let err = DatasetGenerator::new(GenConfig::default(), 3)
        .run(&store)
        .unwrap_err();
    assert!(matches!(err, DataError::ConstraintViolation { .. }), "{err}");

    assert_eq!(store.count(Entity::Customers).unwrap(), 1);
    assert_eq!(store.count(Entity::Products).unwrap(), 0);
    assert_eq!(store.count(Entity::Orders).unwrap(), 0);
    assert_eq!(store.count(Entity::OrderItems).unwrap(), 0);
}

#[test]
fn lookup_miss_is_not_found() {
    let store = SqlStore::in_memory().unwrap();
    store.migrate().unwrap();
    let err = store.get_customer(1).unwrap_err();
    assert!(matches!(
        err,
        DataError::NotFound {
            entity: "customer",
            id: 1
        }
    ));
}
