//! Factor catalog - immutable per-unit impact reference data
//!
//! Two logical tables ship embedded in the binary: transport/energy factors
//! and purchase factors. The catalog is built once at process start and is
//! read-only afterwards; engines receive it by reference so tests can
//! substitute fixture catalogs.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::models::{Category, FactorEntry};

/// Built-in transport and home-energy factor table
const EMISSION_FACTORS_JSON: &str = include_str!("../data/emission_factors.json");

/// Built-in purchase factor table (grouped by subcategory)
const PRODUCT_FACTORS_JSON: &str = include_str!("../data/product_factors.json");

/// Raw factor entry as it appears in the JSON tables
#[derive(Debug, Deserialize)]
struct RawFactor {
    co2e_per_unit: f64,
    #[serde(default)]
    water_per_unit: f64,
    unit: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    subcategory: Option<String>,
    #[serde(default)]
    modifiers: BTreeMap<String, f64>,
}

#[derive(Debug, Deserialize)]
struct EmissionTable {
    mobility: BTreeMap<String, RawFactor>,
    home_energy: BTreeMap<String, RawFactor>,
}

#[derive(Debug, Deserialize)]
struct ProductTable {
    /// subcategory -> item_key -> factor
    purchase: BTreeMap<String, BTreeMap<String, RawFactor>>,
}

/// Read-only map of `(category, item_key)` to impact coefficients
#[derive(Debug, Clone)]
pub struct FactorCatalog {
    entries: BTreeMap<(Category, String), FactorEntry>,
}

impl FactorCatalog {
    /// Build the catalog from the embedded reference tables
    pub fn builtin() -> Result<Self> {
        let emission: EmissionTable = serde_json::from_str(EMISSION_FACTORS_JSON)?;
        let product: ProductTable = serde_json::from_str(PRODUCT_FACTORS_JSON)?;

        let mut entries = BTreeMap::new();

        for (item_key, raw) in emission.mobility {
            insert_entry(&mut entries, Category::Mobility, raw.subcategory.clone(), item_key, raw)?;
        }
        for (item_key, raw) in emission.home_energy {
            insert_entry(&mut entries, Category::HomeEnergy, raw.subcategory.clone(), item_key, raw)?;
        }
        for (subcategory, items) in product.purchase {
            for (item_key, raw) in items {
                insert_entry(
                    &mut entries,
                    Category::Purchase,
                    Some(subcategory.clone()),
                    item_key,
                    raw,
                )?;
            }
        }

        tracing::debug!(entries = entries.len(), "Factor catalog loaded");
        Ok(Self { entries })
    }

    /// Build a catalog from explicit entries (fixture catalogs for tests)
    pub fn from_entries(entries: impl IntoIterator<Item = FactorEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|mut e| {
                e.item_key = normalize_key(&e.item_key);
                ((e.category, e.item_key.clone()), e)
            })
            .collect();
        Self { entries }
    }

    /// Resolve a factor entry. Item keys are matched case-insensitively with
    /// surrounding whitespace ignored.
    pub fn lookup(&self, category: Category, item_key: &str) -> Result<&FactorEntry> {
        let key = normalize_key(item_key);
        self.entries
            .get(&(category, key.clone()))
            .ok_or(Error::UnknownItem {
                category,
                item_key: key,
            })
    }

    /// List entries, optionally restricted to one category.
    ///
    /// Ordering is stable: category in canonical order, then item_key.
    pub fn list(&self, category: Option<Category>) -> Vec<&FactorEntry> {
        self.entries
            .values()
            .filter(|e| category.map_or(true, |c| e.category == c))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn insert_entry(
    entries: &mut BTreeMap<(Category, String), FactorEntry>,
    category: Category,
    subcategory: Option<String>,
    item_key: String,
    raw: RawFactor,
) -> Result<()> {
    let item_key = normalize_key(&item_key);
    if raw.co2e_per_unit < 0.0 || raw.water_per_unit < 0.0 {
        return Err(Error::InvalidData(format!(
            "Negative coefficient for {}/{}",
            category, item_key
        )));
    }
    let entry = FactorEntry {
        category,
        subcategory,
        item_key: item_key.clone(),
        co2e_per_unit: raw.co2e_per_unit,
        water_per_unit: raw.water_per_unit,
        unit_label: raw.unit,
        description: raw.description,
        modifiers: raw.modifiers,
    };
    if entries.insert((category, item_key.clone()), entry).is_some() {
        return Err(Error::InvalidData(format!(
            "Duplicate factor entry {}/{}",
            category, item_key
        )));
    }
    Ok(())
}

fn normalize_key(s: &str) -> String {
    s.trim().to_lowercase()
}
