//! Action logging commands

use std::path::Path;

use anyhow::{anyhow, Result};
use footprint_core::{
    compute_impact, parse_quick_log, Category, FactorCatalog, NewAction, TimeOfDay,
};

use super::core::{open_db, parse_date};

pub fn cmd_log(
    db_path: &Path,
    category: &str,
    item: &str,
    amount: f64,
    date: Option<&str>,
    time_of_day: Option<&str>,
    notes: Option<String>,
) -> Result<()> {
    let db = open_db(db_path)?;
    let catalog = FactorCatalog::builtin()?;
    let date = parse_date(date)?;

    let category: Category = category.parse().map_err(|e: String| anyhow!(e))?;
    let time_of_day: Option<TimeOfDay> = time_of_day
        .map(|s| s.parse().map_err(|e: String| anyhow!(e)))
        .transpose()?;

    let impact = compute_impact(&catalog, category, item, amount, time_of_day)?;

    let action = NewAction {
        date,
        category,
        item_key: item.to_string(),
        amount,
        time_of_day,
        notes,
    };
    let id = db.insert_action(&action, impact)?;

    println!(
        "✅ Logged #{}: {} x{} on {} -> {} kg CO2e, {} L water",
        id, item, amount, date, impact.co2e_kg, impact.water_l
    );

    Ok(())
}

pub fn cmd_quick(db_path: &Path, message: &str, date: Option<&str>) -> Result<()> {
    let db = open_db(db_path)?;
    let catalog = FactorCatalog::builtin()?;
    let date = parse_date(date)?;

    let parsed = parse_quick_log(message);
    if parsed.is_empty() {
        println!("🤔 Nothing recognizable in that message.");
        println!("   Try phrases like \"taxi 5km\", \"beef lunch\", or \"coffee\".");
        return Ok(());
    }

    for p in &parsed {
        let impact = compute_impact(&catalog, p.category, &p.item_key, p.amount, None)?;
        let action = NewAction {
            date,
            category: p.category,
            item_key: p.item_key.clone(),
            amount: p.amount,
            time_of_day: None,
            notes: None,
        };
        let id = db.insert_action(&action, impact)?;
        println!(
            "✅ Logged #{}: {} x{} -> {} kg CO2e (confidence {})",
            id, p.item_key, p.amount, impact.co2e_kg, p.confidence
        );
    }

    Ok(())
}
