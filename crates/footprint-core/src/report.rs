//! Report rendering
//!
//! Assembles a daily summary (or a weekly trend) together with its
//! recommendations and the logging streak into one report value, then
//! renders it as plain text or markdown. JSON output is just the serialized
//! report value.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::FactorCatalog;
use crate::impact::{compute_action_impact, round3};
use crate::models::{
    Category, CategoryTotals, Contributor, DailySummary, LoggedAction, Recommendation, WeeklyTrend,
};
use crate::recommend::daily_message;

/// Week-level contributors shown in the weekly report
const WEEKLY_CONTRIBUTOR_LIMIT: usize = 5;

/// Suggestions shown in the weekly report
const WEEKLY_RECOMMENDATION_LIMIT: usize = 3;

/// Everything a daily report shows, in one serializable value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportData {
    pub summary: DailySummary,
    pub recommendations: Vec<Recommendation>,
    /// Consecutive days with at least one logged action
    pub streak_days: u32,
    pub message: String,
}

impl ReportData {
    pub fn new(summary: DailySummary, recommendations: Vec<Recommendation>, streak_days: u32) -> Self {
        let message = daily_message(&summary);
        Self {
            summary,
            recommendations,
            streak_days,
            message,
        }
    }
}

/// Everything a weekly report shows: the 7-day trend plus week-level
/// rollups the per-day summaries don't carry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyReportData {
    pub trend: WeeklyTrend,
    /// Per-category totals over the whole week
    pub by_category: BTreeMap<Category, CategoryTotals>,
    /// Heaviest individual actions of the week, largest CO2e first
    pub top_contributors: Vec<Contributor>,
    pub recommendations: Vec<Recommendation>,
    pub streak_days: u32,
}

impl WeeklyReportData {
    /// Assemble a weekly report from the trend and the week's raw actions.
    ///
    /// Category totals and contributors are recomputed from the actions
    /// through the engine; actions that fail to resolve contribute nothing.
    /// Contributors and recommendations are capped to keep the report short.
    pub fn new(
        catalog: &FactorCatalog,
        trend: WeeklyTrend,
        actions: &[LoggedAction],
        mut recommendations: Vec<Recommendation>,
        streak_days: u32,
    ) -> Self {
        let mut by_category: BTreeMap<Category, CategoryTotals> = BTreeMap::new();
        let mut contributors: Vec<Contributor> = Vec::new();

        for action in actions {
            let Ok(impact) = compute_action_impact(catalog, action) else {
                continue;
            };
            let totals = by_category.entry(action.category).or_default();
            totals.co2e_kg += impact.co2e_kg;
            totals.water_l += impact.water_l;
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

        for totals in by_category.values_mut() {
            totals.co2e_kg = round3(totals.co2e_kg);
            totals.water_l = round3(totals.water_l);
        }

        contributors.sort_by(|a, b| {
            b.co2e_kg
                .partial_cmp(&a.co2e_kg)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.action_id.cmp(&b.action_id))
        });
        contributors.truncate(WEEKLY_CONTRIBUTOR_LIMIT);
        recommendations.truncate(WEEKLY_RECOMMENDATION_LIMIT);

        Self {
            trend,
            by_category,
            top_contributors: contributors,
            recommendations,
            streak_days,
        }
    }
}

/// Render a report as plain text
pub fn render_text(report: &ReportData) -> String {
    let mut out = String::new();
    let summary = &report.summary;

    out.push_str(&format!("Daily Impact Report - {}\n", summary.date));
    out.push_str(&format!(
        "Total: {} kg CO2e, {} L water ({} actions)\n",
        summary.total_co2e_kg, summary.total_water_l, summary.action_count
    ));
    if report.streak_days > 0 {
        out.push_str(&format!("Logging streak: {} days\n", report.streak_days));
    }
    out.push('\n');
    out.push_str(&report.message);
    out.push('\n');

    if !summary.by_category.is_empty() {
        out.push_str("\nBy category:\n");
        for (category, totals) in &summary.by_category {
            out.push_str(&format!(
                "  {}: {} kg CO2e, {} L water ({} actions)\n",
                category, totals.co2e_kg, totals.water_l, totals.action_count
            ));
        }
    }

    if !summary.top_contributors.is_empty() {
        out.push_str("\nTop contributors:\n");
        for c in &summary.top_contributors {
            out.push_str(&format!(
                "  {} x{}: {} kg CO2e\n",
                c.item_key, c.amount, c.co2e_kg
            ));
        }
    }

    if !report.recommendations.is_empty() {
        out.push_str("\nSuggestions:\n");
        for rec in &report.recommendations {
            out.push_str(&format!(
                "  {} -> {}: save {} kg CO2e\n",
                rec.item_key, rec.suggested_item_key, rec.estimated_co2e_saved_kg
            ));
        }
    }

    out
}

/// Render a report as markdown
pub fn render_markdown(report: &ReportData) -> String {
    let mut out = String::new();
    let summary = &report.summary;

    out.push_str(&format!("# Daily Impact Report - {}\n\n", summary.date));
    out.push_str(&format!(
        "**Total:** {} kg CO2e, {} L water ({} actions)\n\n",
        summary.total_co2e_kg, summary.total_water_l, summary.action_count
    ));
    if report.streak_days > 0 {
        out.push_str(&format!("**Logging streak:** {} days\n\n", report.streak_days));
    }
    out.push_str(&report.message);
    out.push('\n');

    if !summary.by_category.is_empty() {
        out.push_str("\n## By category\n\n");
        out.push_str("| Category | CO2e (kg) | Water (L) | Actions |\n");
        out.push_str("|---|---|---|---|\n");
        for (category, totals) in &summary.by_category {
            out.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                category, totals.co2e_kg, totals.water_l, totals.action_count
            ));
        }
    }

    if !summary.top_contributors.is_empty() {
        out.push_str("\n## Top contributors\n\n");
        for c in &summary.top_contributors {
            out.push_str(&format!(
                "- **{}** x{}: {} kg CO2e\n",
                c.item_key, c.amount, c.co2e_kg
            ));
        }
    }

    if !report.recommendations.is_empty() {
        out.push_str("\n## Suggestions\n\n");
        for rec in &report.recommendations {
            out.push_str(&format!(
                "- {} -> **{}**: save {} kg CO2e ({})\n",
                rec.item_key, rec.suggested_item_key, rec.estimated_co2e_saved_kg, rec.rationale
            ));
        }
    }

    out
}

/// Render a weekly report as plain text
pub fn render_weekly_text(report: &WeeklyReportData) -> String {
    let mut out = String::new();
    let trend = &report.trend;

    out.push_str(&format!(
        "Weekly Impact Report - {} to {}\n",
        trend.start_date, trend.end_date
    ));
    out.push_str(&format!(
        "Total: {} kg CO2e, {} L water\n",
        trend.total_co2e_kg, trend.total_water_l
    ));
    out.push_str(&format!("Direction: {}\n", trend.direction));
    if report.streak_days > 0 {
        out.push_str(&format!("Logging streak: {} days\n", report.streak_days));
    }
    out.push('\n');
    out.push_str(&trend.insight_message);
    out.push('\n');

    out.push_str("\nDaily totals:\n");
    for day in &trend.days {
        out.push_str(&format!(
            "  {}: {} kg CO2e ({} actions)\n",
            day.date, day.total_co2e_kg, day.action_count
        ));
    }

    if !report.by_category.is_empty() {
        out.push_str("\nBy category:\n");
        for (category, totals) in &report.by_category {
            out.push_str(&format!(
                "  {}: {} kg CO2e, {} L water ({} actions)\n",
                category, totals.co2e_kg, totals.water_l, totals.action_count
            ));
        }
    }

    if !report.top_contributors.is_empty() {
        out.push_str("\nTop contributors:\n");
        for c in &report.top_contributors {
            out.push_str(&format!(
                "  {} x{}: {} kg CO2e\n",
                c.item_key, c.amount, c.co2e_kg
            ));
        }
    }

    if !report.recommendations.is_empty() {
        out.push_str("\nSuggestions:\n");
        for rec in &report.recommendations {
            out.push_str(&format!(
                "  {} -> {}: save {} kg CO2e\n",
                rec.item_key, rec.suggested_item_key, rec.estimated_co2e_saved_kg
            ));
        }
    }

    out
}

/// Render a weekly report as markdown
pub fn render_weekly_markdown(report: &WeeklyReportData) -> String {
    let mut out = String::new();
    let trend = &report.trend;

    out.push_str(&format!(
        "# Weekly Impact Report - {} to {}\n\n",
        trend.start_date, trend.end_date
    ));
    out.push_str(&format!(
        "**Total:** {} kg CO2e, {} L water\n\n",
        trend.total_co2e_kg, trend.total_water_l
    ));
    out.push_str(&format!("**Direction:** {}\n\n", trend.direction));
    if report.streak_days > 0 {
        out.push_str(&format!("**Logging streak:** {} days\n\n", report.streak_days));
    }
    out.push_str(&trend.insight_message);
    out.push('\n');

    out.push_str("\n## Daily totals\n\n");
    out.push_str("| Date | CO2e (kg) | Actions |\n");
    out.push_str("|---|---|---|\n");
    for day in &trend.days {
        out.push_str(&format!(
            "| {} | {} | {} |\n",
            day.date, day.total_co2e_kg, day.action_count
        ));
    }

    if !report.by_category.is_empty() {
        out.push_str("\n## By category\n\n");
        out.push_str("| Category | CO2e (kg) | Water (L) | Actions |\n");
        out.push_str("|---|---|---|---|\n");
        for (category, totals) in &report.by_category {
            out.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                category, totals.co2e_kg, totals.water_l, totals.action_count
            ));
        }
    }

    if !report.top_contributors.is_empty() {
        out.push_str("\n## Top contributors\n\n");
        for c in &report.top_contributors {
            out.push_str(&format!(
                "- **{}** x{}: {} kg CO2e\n",
                c.item_key, c.amount, c.co2e_kg
            ));
        }
    }

    if !report.recommendations.is_empty() {
        out.push_str("\n## Suggestions\n\n");
        for rec in &report.recommendations {
            out.push_str(&format!(
                "- {} -> **{}**: save {} kg CO2e ({})\n",
                rec.item_key, rec.suggested_item_key, rec.estimated_co2e_saved_kg, rec.rationale
            ));
        }
    }

    out
}
