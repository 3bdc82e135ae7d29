//! Recommendation engine
//!
//! Suggests lower-impact substitutes for logged actions. A substitute must
//! come from the same category and subcategory (swapping a beef meal for a
//! vegetarian one, not for a reusable bag) and must have a strictly lower
//! CO2e coefficient.

use crate::catalog::FactorCatalog;
use crate::impact::{compute_impact, round3};
use crate::models::{DailySummary, FactorEntry, LoggedAction, Recommendation};

/// Generate substitute suggestions for a set of logged actions.
///
/// One recommendation at most per action. Actions that fail to resolve are
/// skipped; actions already at the lowest coefficient in their group get
/// nothing. Output order is fully deterministic: largest CO2e saving first.
pub fn recommend(catalog: &FactorCatalog, actions: &[LoggedAction]) -> Vec<Recommendation> {
    let mut out: Vec<Recommendation> = Vec::new();

    for action in actions {
        let entry = match catalog.lookup(action.category, &action.item_key) {
            Ok(entry) => entry,
            Err(_) => continue,
        };

        let Some(alternative) = best_alternative(catalog, entry) else {
            continue;
        };

        let current = match compute_impact(
            catalog,
            action.category,
            &action.item_key,
            action.amount,
            action.time_of_day,
        ) {
            Ok(impact) => impact,
            Err(_) => continue,
        };
        let substituted = match compute_impact(
            catalog,
            action.category,
            &alternative.item_key,
            action.amount,
            action.time_of_day,
        ) {
            Ok(impact) => impact,
            Err(_) => continue,
        };

        let percent_cut =
            ((1.0 - alternative.co2e_per_unit / entry.co2e_per_unit) * 100.0).round() as i64;

        out.push(Recommendation {
            target_action_id: action.id,
            category: action.category,
            item_key: entry.item_key.clone(),
            suggested_item_key: alternative.item_key.clone(),
            estimated_co2e_saved_kg: round3(current.co2e_kg - substituted.co2e_kg),
            estimated_water_saved_l: round3(current.water_l - substituted.water_l),
            rationale: format!(
                "Switching from {} to {} cuts CO2e per {} by about {}%",
                entry.item_key, alternative.item_key, entry.unit_label, percent_cut
            ),
        });
    }

    out.sort_by(|a, b| {
        b.estimated_co2e_saved_kg
            .partial_cmp(&a.estimated_co2e_saved_kg)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| {
                b.estimated_water_saved_l
                    .partial_cmp(&a.estimated_water_saved_l)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .then_with(|| a.target_action_id.cmp(&b.target_action_id))
            .then_with(|| a.suggested_item_key.cmp(&b.suggested_item_key))
    });

    out
}

/// Lowest-CO2e entry in the same substitution group, if any beats `entry`.
///
/// Ties on CO2e fall back to the lower water coefficient, then to item key
/// order so the pick never depends on map iteration order.
fn best_alternative<'a>(
    catalog: &'a FactorCatalog,
    entry: &FactorEntry,
) -> Option<&'a FactorEntry> {
    catalog
        .list(Some(entry.category))
        .into_iter()
        .filter(|candidate| candidate.subcategory == entry.subcategory)
        .filter(|candidate| candidate.co2e_per_unit < entry.co2e_per_unit)
        .min_by(|a, b| {
            a.co2e_per_unit
                .partial_cmp(&b.co2e_per_unit)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| {
                    a.water_per_unit
                        .partial_cmp(&b.water_per_unit)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .then_with(|| a.item_key.cmp(&b.item_key))
        })
}

/// One-paragraph coaching message for a daily summary.
///
/// Bands follow the footprint magnitude: under 2 kg is a light day, under
/// 5 kg moderate, under 10 kg high, anything above that very high.
pub fn daily_message(summary: &DailySummary) -> String {
    if summary.action_count == 0 {
        return "No actions logged yet today. Log what you did to see your footprint.".to_string();
    }

    let top = summary
        .top_contributors
        .first()
        .map(|c| {
            format!(
                " Your biggest contributor was {} at {} kg CO2e.",
                c.item_key, c.co2e_kg
            )
        })
        .unwrap_or_default();

    let total = summary.total_co2e_kg;
    let opening = if total < 2.0 {
        format!("Great job! Today's footprint is only {} kg CO2e.", total)
    } else if total < 5.0 {
        format!("Today's footprint is {} kg CO2e, a moderate day.", total)
    } else if total < 10.0 {
        format!(
            "Today's footprint is {} kg CO2e, on the high side.",
            total
        )
    } else {
        format!(
            "Today's footprint is {} kg CO2e, well above a typical day.",
            total
        )
    };

    format!("{}{}", opening, top)
}
