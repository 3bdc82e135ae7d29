//! Weekly aggregation and trend detection
//!
//! Rolls seven daily summaries into one window, gap-filling missing days
//! with zeros, and compares the first three days against the last three to
//! decide whether the footprint is improving, worsening, or flat.

use chrono::{Duration, NaiveDate};

use crate::impact::round3;
use crate::models::{DailySummary, TrendDirection, WeeklyTrend};

/// Window length in days
pub const WEEK_DAYS: usize = 7;

/// Relative change under this fraction counts as flat
const FLAT_THRESHOLD: f64 = 0.01;

/// Relative change at or above this fraction counts as a strong move
const STRONG_THRESHOLD: f64 = 0.20;

/// Build the weekly trend for the 7 days starting at `start_date`.
///
/// Summaries outside the window are ignored; days without a summary appear
/// as zero entries so the series always has exactly 7 days in order.
pub fn aggregate(summaries: &[DailySummary], start_date: NaiveDate) -> WeeklyTrend {
    let end_date = start_date + Duration::days(WEEK_DAYS as i64 - 1);

    let days: Vec<DailySummary> = (0..WEEK_DAYS)
        .map(|offset| {
            let date = start_date + Duration::days(offset as i64);
            summaries
                .iter()
                .find(|s| s.date == date)
                .cloned()
                .unwrap_or_else(|| DailySummary::empty(date))
        })
        .collect();

    let total_co2e = round3(days.iter().map(|d| d.total_co2e_kg).sum());
    let total_water = round3(days.iter().map(|d| d.total_water_l).sum());

    // First and last three days; the middle day sits out so halves match
    let earlier: f64 = days[..3].iter().map(|d| d.total_co2e_kg).sum();
    let later: f64 = days[4..].iter().map(|d| d.total_co2e_kg).sum();

    let direction = direction_of(earlier, later);
    let insight_message = insight(direction, earlier, later, total_co2e);

    WeeklyTrend {
        start_date,
        end_date,
        days,
        total_co2e_kg: total_co2e,
        total_water_l: total_water,
        direction,
        insight_message,
    }
}

fn direction_of(earlier: f64, later: f64) -> TrendDirection {
    if earlier == 0.0 && later == 0.0 {
        return TrendDirection::Flat;
    }
    if earlier == 0.0 {
        return TrendDirection::Worsening;
    }
    let change = (later - earlier) / earlier;
    if change.abs() < FLAT_THRESHOLD {
        TrendDirection::Flat
    } else if change < 0.0 {
        TrendDirection::Improving
    } else {
        TrendDirection::Worsening
    }
}

fn insight(direction: TrendDirection, earlier: f64, later: f64, total_co2e: f64) -> String {
    let percent = if earlier > 0.0 {
        (((later - earlier) / earlier).abs() * 1000.0).round() / 10.0
    } else {
        0.0
    };
    let strong = earlier > 0.0 && ((later - earlier) / earlier).abs() >= STRONG_THRESHOLD;

    match direction {
        TrendDirection::Improving => {
            if strong {
                format!(
                    "Strong progress: your daily CO2e dropped about {}% over the week. Keep it up!",
                    percent
                )
            } else {
                format!(
                    "Your daily CO2e dropped about {}% over the week. Heading the right way.",
                    percent
                )
            }
        }
        TrendDirection::Worsening => {
            if earlier == 0.0 {
                "Your footprint picked up later in the week after a quiet start. Worth a look at the biggest contributors.".to_string()
            } else if strong {
                format!(
                    "Your daily CO2e rose sharply, about {}% over the week. Check the top contributors below.",
                    percent
                )
            } else {
                format!(
                    "Your daily CO2e rose about {}% over the week. A small course correction would help.",
                    percent
                )
            }
        }
        TrendDirection::Flat => {
            let mean = round3(total_co2e / WEEK_DAYS as f64);
            format!(
                "Your footprint held steady this week, averaging {} kg CO2e per day.",
                mean
            )
        }
    }
}
