//! Order desk walkthrough
//!
//! Usage: `cargo run --example order_desk [config.yaml]`
//!
//! Without a `storage_dir` in the config, orders live in memory for the run.

use anyhow::Result;
use foodfleet::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => FleetConfig::from_yaml_file(&path)?,
        None => FleetConfig::default(),
    };

    let storage: Box<dyn KeyValueStorage> = match &config.storage_dir {
        Some(dir) => Box::new(FileStorage::open(dir)?),
        None => Box::new(InMemoryStorage::new()),
    };

    let (mut desk, warning) = OrderManager::open(storage, &config);
    if let Some(warning) = warning {
        tracing::warn!("{}", warning);
    }

    println!("📦 FoodFleet order desk\n");

    if desk.orders().is_empty() {
        report(desk.load_demo_data()?);
        println!("Demo data loaded.");
    }

    match desk.add(&OrderInput::new("ORD100", "Zen Sushi", "2", "2.2", false)) {
        Ok(status) => {
            report(status);
            println!("✅ Order ORD100 added");
        }
        Err(e) => println!("❌ {}", e),
    }

    // rejected: id too short
    if let Err(e) = desk.add(&OrderInput::new("AB", "Cafe", "5", "10.0", false)) {
        println!("❌ {}", e);
    }

    let stats = desk.stats();
    println!(
        "\nTotal: {}  Paid: {}  Unpaid: {}",
        stats.total, stats.paid, stats.unpaid
    );

    let view = desk.apply_filter(FilterCriteria::parse("unpaid", Some("5"))?)?;
    println!("\n🔍 {}", view.summary());
    for order in view.sorted() {
        println!(
            "  {:<8} {:<24} {:>3} items  {:>6.1} KM  {}",
            order.order_id,
            order.restaurant_name,
            order.item_count,
            order.delivery_distance,
            if order.is_paid { "✓ Paid" } else { "⏳ Unpaid" }
        );
    }

    for threshold in ["2", "1"] {
        match desk.assign_raw(threshold) {
            Ok(assignment) => println!(
                "\n✅ Assigned {} ({} KM). {}",
                assignment.order.order_id,
                assignment.order.delivery_distance,
                assignment.summary()
            ),
            Err(FleetError::Assignment(e)) => println!("\n❌ {}", e.details()),
            Err(e) => println!("\n❌ {}", e),
        }
    }

    Ok(())
}

fn report(status: SyncStatus) {
    if let Some(warning) = status.warning() {
        tracing::warn!("{}", warning);
    }
}
