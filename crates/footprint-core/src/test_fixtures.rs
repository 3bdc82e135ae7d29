//! Shared builders for unit tests

use chrono::{NaiveDate, Utc};

use crate::models::{Category, LoggedAction};

pub(crate) fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

pub(crate) fn action(id: i64, category: Category, item_key: &str, amount: f64) -> LoggedAction {
    LoggedAction {
        id,
        date: test_date(),
        category,
        item_key: item_key.to_string(),
        amount,
        time_of_day: None,
        notes: None,
        co2e_kg: 0.0,
        water_l: 0.0,
        created_at: Utc::now(),
    }
}
