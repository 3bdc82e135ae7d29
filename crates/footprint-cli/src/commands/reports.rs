//! Summary, recommendation, trend, and report commands

use std::path::Path;

use anyhow::{anyhow, Result};
use chrono::Duration;
use footprint_core::{
    aggregate, compute_daily_summary, daily_message, recommend, render_markdown, render_text,
    render_weekly_markdown, render_weekly_text, FactorCatalog, ReportData, WeeklyReportData,
};

use super::core::{open_db, parse_date};

pub fn cmd_summary(db_path: &Path, date: Option<&str>) -> Result<()> {
    let db = open_db(db_path)?;
    let catalog = FactorCatalog::builtin()?;
    let date = parse_date(date)?;

    let actions = db.actions_by_date(date)?;
    let summary = compute_daily_summary(&catalog, date, &actions);

    println!("📊 Impact for {}", date);
    println!(
        "   Total: {} kg CO2e, {} L water ({} actions)",
        summary.total_co2e_kg, summary.total_water_l, summary.action_count
    );
    for (category, totals) in &summary.by_category {
        println!(
            "   {}: {} kg CO2e, {} L water",
            category, totals.co2e_kg, totals.water_l
        );
    }
    if !summary.top_contributors.is_empty() {
        println!("   Top contributors:");
        for c in &summary.top_contributors {
            println!("     {} x{} -> {} kg CO2e", c.item_key, c.amount, c.co2e_kg);
        }
    }
    println!();
    println!("{}", daily_message(&summary));

    Ok(())
}

pub fn cmd_recommend(db_path: &Path, date: Option<&str>) -> Result<()> {
    let db = open_db(db_path)?;
    let catalog = FactorCatalog::builtin()?;
    let date = parse_date(date)?;

    let actions = db.actions_by_date(date)?;
    let recs = recommend(&catalog, &actions);

    if recs.is_empty() {
        println!("👍 No lower-impact substitutes for {} - nothing to improve.", date);
        return Ok(());
    }

    println!("💡 Suggestions for {}:", date);
    for rec in &recs {
        println!(
            "   {} -> {}: save {} kg CO2e, {} L water",
            rec.item_key,
            rec.suggested_item_key,
            rec.estimated_co2e_saved_kg,
            rec.estimated_water_saved_l
        );
        println!("      {}", rec.rationale);
    }

    Ok(())
}

pub fn cmd_trend(db_path: &Path, end: Option<&str>) -> Result<()> {
    let db = open_db(db_path)?;
    let catalog = FactorCatalog::builtin()?;

    let end = parse_date(end)?;
    let start = end - Duration::days(6);

    let summaries = db.daily_summaries(&catalog, start, end)?;
    let trend = aggregate(&summaries, start);

    println!("📈 Week of {} to {}", trend.start_date, trend.end_date);
    for day in &trend.days {
        println!(
            "   {}: {} kg CO2e ({} actions)",
            day.date, day.total_co2e_kg, day.action_count
        );
    }
    println!(
        "   Total: {} kg CO2e, {} L water",
        trend.total_co2e_kg, trend.total_water_l
    );
    println!("   Direction: {}", trend.direction);
    println!();
    println!("{}", trend.insight_message);

    Ok(())
}

pub fn cmd_report(db_path: &Path, date: Option<&str>, format: &str) -> Result<()> {
    let db = open_db(db_path)?;
    let catalog = FactorCatalog::builtin()?;
    let date = parse_date(date)?;

    let actions = db.actions_by_date(date)?;
    let summary = compute_daily_summary(&catalog, date, &actions);
    let recommendations = recommend(&catalog, &actions);
    let streak = db.streak_days(date)?;
    let report = ReportData::new(summary, recommendations, streak);

    match format {
        "text" => print!("{}", render_text(&report)),
        "markdown" | "md" => print!("{}", render_markdown(&report)),
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        other => return Err(anyhow!("Unknown format '{}': use text, markdown, or json", other)),
    }

    Ok(())
}

pub fn cmd_weekly_report(db_path: &Path, end: Option<&str>, format: &str) -> Result<()> {
    let db = open_db(db_path)?;
    let catalog = FactorCatalog::builtin()?;

    let end = parse_date(end)?;
    let start = end - Duration::days(6);

    let actions = db.actions_in_range(start, end)?;
    let summaries = db.daily_summaries(&catalog, start, end)?;
    let trend = aggregate(&summaries, start);
    let recommendations = recommend(&catalog, &actions);
    let streak = db.streak_days(end)?;
    let report = WeeklyReportData::new(&catalog, trend, &actions, recommendations, streak);

    match format {
        "text" => print!("{}", render_weekly_text(&report)),
        "markdown" | "md" => print!("{}", render_weekly_markdown(&report)),
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        other => return Err(anyhow!("Unknown format '{}': use text, markdown, or json", other)),
    }

    Ok(())
}
