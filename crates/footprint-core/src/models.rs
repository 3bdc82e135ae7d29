//! Domain models for Footprint

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Top-level action categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Mobility,
    Purchase,
    HomeEnergy,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mobility => "mobility",
            Self::Purchase => "purchase",
            Self::HomeEnergy => "home_energy",
        }
    }

    /// All categories, in their canonical order
    pub fn all() -> [Category; 3] {
        [Self::Mobility, Self::Purchase, Self::HomeEnergy]
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mobility" => Ok(Self::Mobility),
            "purchase" => Ok(Self::Purchase),
            "home_energy" | "homeenergy" | "energy" => Ok(Self::HomeEnergy),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Time of day for energy consumption tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Peak,
    OffPeak,
    #[default]
    Standard,
}

impl TimeOfDay {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Peak => "peak",
            Self::OffPeak => "off_peak",
            Self::Standard => "standard",
        }
    }
}

impl std::str::FromStr for TimeOfDay {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "peak" => Ok(Self::Peak),
            "off_peak" | "offpeak" | "off-peak" => Ok(Self::OffPeak),
            "standard" => Ok(Self::Standard),
            _ => Err(format!("Unknown time of day: {}", s)),
        }
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry in the factor catalog: per-unit impact coefficients for a
/// loggable item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorEntry {
    pub category: Category,
    /// Substitution group within the category (e.g. "food" for purchases).
    /// Recommendations never cross subcategory boundaries.
    pub subcategory: Option<String>,
    pub item_key: String,
    /// kg CO2e per unit
    pub co2e_per_unit: f64,
    /// Litres of water per unit (0 when untracked)
    #[serde(default)]
    pub water_per_unit: f64,
    /// Human-readable unit, e.g. "km", "meal", "kWh"
    pub unit_label: String,
    pub description: String,
    /// Conditional multipliers keyed by time of day ("peak", "off_peak")
    #[serde(default)]
    pub modifiers: BTreeMap<String, f64>,
}

/// A new action to be logged (before persistence assigns an id)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAction {
    pub date: NaiveDate,
    pub category: Category,
    pub item_key: String,
    pub amount: f64,
    pub time_of_day: Option<TimeOfDay>,
    pub notes: Option<String>,
}

/// A logged action as stored in the action log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggedAction {
    pub id: i64,
    pub date: NaiveDate,
    pub category: Category,
    pub item_key: String,
    pub amount: f64,
    pub time_of_day: Option<TimeOfDay>,
    pub notes: Option<String>,
    /// Denormalized impact copy for browsing; summaries recompute from the
    /// raw action through the engine
    pub co2e_kg: f64,
    pub water_l: f64,
    pub created_at: DateTime<Utc>,
}

/// Computed environmental impact of a single action
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactResult {
    pub co2e_kg: f64,
    pub water_l: f64,
}

/// Per-category subtotal within a daily summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub co2e_kg: f64,
    pub water_l: f64,
    pub action_count: usize,
}

/// One action's contribution to a day, for top-contributor lists
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contributor {
    pub action_id: i64,
    pub category: Category,
    pub item_key: String,
    pub amount: f64,
    pub co2e_kg: f64,
    pub water_l: f64,
}

/// Aggregate impact over all actions sharing a date (derived view, never
/// persisted)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub total_co2e_kg: f64,
    pub total_water_l: f64,
    pub by_category: BTreeMap<Category, CategoryTotals>,
    pub top_contributors: Vec<Contributor>,
    pub action_count: usize,
}

impl DailySummary {
    /// All-zero summary for a day with no logged actions
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            total_co2e_kg: 0.0,
            total_water_l: 0.0,
            by_category: BTreeMap::new(),
            top_contributors: Vec::new(),
            action_count: 0,
        }
    }
}

/// A lower-impact substitute suggestion for one logged action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    /// The logged action this responds to
    pub target_action_id: i64,
    pub category: Category,
    pub item_key: String,
    pub suggested_item_key: String,
    pub estimated_co2e_saved_kg: f64,
    /// May be negative when the substitute uses more water
    pub estimated_water_saved_l: f64,
    pub rationale: String,
}

/// Qualitative trend over a weekly window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Improving,
    Worsening,
    Flat,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Worsening => "worsening",
            Self::Flat => "flat",
        }
    }
}

impl std::str::FromStr for TrendDirection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "improving" => Ok(Self::Improving),
            "worsening" => Ok(Self::Worsening),
            "flat" => Ok(Self::Flat),
            _ => Err(format!("Unknown trend direction: {}", s)),
        }
    }
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Week-level rollup: a gap-filled 7-day series plus a trend signal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyTrend {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Exactly 7 entries, one per day, zero-valued where nothing was logged
    pub days: Vec<DailySummary>,
    pub total_co2e_kg: f64,
    pub total_water_l: f64,
    pub direction: TrendDirection,
    pub insight_message: String,
}

/// Comparison of a day's impact to the per-category benchmark
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BenchmarkComparison {
    /// Signed percent above (+) or below (-) the benchmark
    pub co2e_vs_avg_percent: f64,
    pub water_vs_avg_percent: f64,
    pub co2e_benchmark_kg: f64,
    pub water_benchmark_l: f64,
}

/// An action recognized in a free-text quick-log message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedAction {
    pub category: Category,
    pub item_key: String,
    pub amount: f64,
    /// 0.8 when an explicit amount was found near the keyword, 0.6 otherwise
    pub confidence: f64,
}
