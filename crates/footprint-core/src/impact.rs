//! Impact calculation engine
//!
//! Pure functions from logged actions and the factor catalog to CO2e and
//! water footprints. Nothing here is cached or persisted: an impact is a
//! deterministic function of its inputs.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::catalog::FactorCatalog;
use crate::error::{Error, Result};
use crate::models::{
    BenchmarkComparison, Category, CategoryTotals, Contributor, DailySummary, ImpactResult,
    LoggedAction, TimeOfDay,
};

/// How many top contributors a daily summary carries
pub const TOP_CONTRIBUTOR_LIMIT: usize = 3;

/// Rounding convention for all computed impacts: 3 decimal places.
///
/// Keeps downstream sums stable and human-readable; applied at every point
/// an impact leaves the engine.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Compute the impact of one action from its raw fields.
///
/// The modifier multiplier applies when the resolved entry carries a
/// modifier matching `time_of_day` (peak/off-peak electricity); a missing or
/// unmatched time of day falls back to the base coefficients and is not an
/// error.
pub fn compute_impact(
    catalog: &FactorCatalog,
    category: Category,
    item_key: &str,
    amount: f64,
    time_of_day: Option<TimeOfDay>,
) -> Result<ImpactResult> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::InvalidAmount(amount));
    }

    let entry = catalog.lookup(category, item_key)?;

    let multiplier = time_of_day
        .and_then(|tod| entry.modifiers.get(tod.as_str()))
        .copied()
        .unwrap_or(1.0);

    Ok(ImpactResult {
        co2e_kg: round3(amount * entry.co2e_per_unit * multiplier),
        water_l: round3(amount * entry.water_per_unit * multiplier),
    })
}

/// Compute the impact of a logged action
pub fn compute_action_impact(
    catalog: &FactorCatalog,
    action: &LoggedAction,
) -> Result<ImpactResult> {
    compute_impact(
        catalog,
        action.category,
        &action.item_key,
        action.amount,
        action.time_of_day,
    )
}

/// Aggregate all actions sharing `date` into a daily summary.
///
/// Actions that fail to resolve (unknown item, bad amount) contribute
/// nothing; an empty input yields an all-zero summary, never an error.
pub fn compute_daily_summary(
    catalog: &FactorCatalog,
    date: NaiveDate,
    actions: &[LoggedAction],
) -> DailySummary {
    let mut by_category: BTreeMap<Category, CategoryTotals> = BTreeMap::new();
    let mut contributors: Vec<Contributor> = Vec::new();
    let mut total_co2e = 0.0;
    let mut total_water = 0.0;
    let mut count = 0;

    for action in actions.iter().filter(|a| a.date == date) {
        let impact = match compute_action_impact(catalog, action) {
            Ok(impact) => impact,
            Err(e) => {
                tracing::debug!(
                    action_id = action.id,
                    error = %e,
                    "Skipping unresolvable action in daily summary"
                );
                continue;
            }
        };

        total_co2e += impact.co2e_kg;
        total_water += impact.water_l;
        count += 1;

        let totals = by_category.entry(action.category).or_default();
        totals.co2e_kg = round3(totals.co2e_kg + impact.co2e_kg);
        totals.water_l = round3(totals.water_l + impact.water_l);
        totals.action_count += 1;

        contributors.push(Contributor {
            action_id: action.id,
            category: action.category,
            item_key: action.item_key.clone(),
            amount: action.amount,
            co2e_kg: impact.co2e_kg,
            water_l: impact.water_l,
        });
    }

    // Highest-impact first; action id breaks ties so output is reproducible
    contributors.sort_by(|a, b| {
        b.co2e_kg
            .partial_cmp(&a.co2e_kg)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.action_id.cmp(&b.action_id))
    });
    contributors.truncate(TOP_CONTRIBUTOR_LIMIT);

    DailySummary {
        date,
        total_co2e_kg: round3(total_co2e),
        total_water_l: round3(total_water),
        by_category,
        top_contributors: contributors,
        action_count: count,
    }
}

/// Average daily footprint for a typical person, per category
pub fn category_benchmark(category: Category) -> (f64, f64) {
    match category {
        Category::Mobility => (3.5, 8.0),
        Category::Purchase => (4.2, 2500.0),
        Category::HomeEnergy => (2.8, 0.0),
    }
}

/// Compare a day's category impact against the benchmark.
///
/// Percentages are signed: positive means above average.
pub fn compare_to_benchmark(category: Category, co2e_kg: f64, water_l: f64) -> BenchmarkComparison {
    let (co2e_benchmark, water_benchmark) = category_benchmark(category);

    let percent = |actual: f64, benchmark: f64| {
        if benchmark > 0.0 {
            ((actual / benchmark - 1.0) * 1000.0).round() / 10.0
        } else {
            0.0
        }
    };

    BenchmarkComparison {
        co2e_vs_avg_percent: percent(co2e_kg, co2e_benchmark),
        water_vs_avg_percent: percent(water_l, water_benchmark),
        co2e_benchmark_kg: co2e_benchmark,
        water_benchmark_l: water_benchmark,
    }
}
