//! Factor catalog listing

use anyhow::{anyhow, Result};
use footprint_core::{Category, FactorCatalog};

pub fn cmd_factors(category: Option<&str>) -> Result<()> {
    let catalog = FactorCatalog::builtin()?;

    let category: Option<Category> = category
        .map(|s| s.parse().map_err(|e: String| anyhow!(e)))
        .transpose()?;

    let entries = catalog.list(category);
    println!("📚 Factor catalog ({} entries)", entries.len());

    let mut current_category = None;
    for entry in entries {
        if current_category != Some(entry.category) {
            println!();
            println!("  [{}]", entry.category);
            current_category = Some(entry.category);
        }
        let group = entry
            .subcategory
            .as_deref()
            .map(|s| format!(" ({})", s))
            .unwrap_or_default();
        println!(
            "    {:<24} {} kg CO2e, {} L water per {}{}",
            entry.item_key, entry.co2e_per_unit, entry.water_per_unit, entry.unit_label, group
        );
    }

    Ok(())
}
