//! Action log operations

use chrono::{Duration, NaiveDate};
use rusqlite::params;

use super::{parse_datetime, Database};
use crate::catalog::FactorCatalog;
use crate::error::Result;
use crate::impact::compute_daily_summary;
use crate::models::{DailySummary, ImpactResult, LoggedAction, NewAction};

impl Database {
    /// Insert an action along with its computed impact, returning the new id
    pub fn insert_action(&self, action: &NewAction, impact: ImpactResult) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO action_logs (date, category, item_key, amount, time_of_day, notes, co2e_kg, water_l)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                action.date.to_string(),
                action.category.as_str(),
                action.item_key,
                action.amount,
                action.time_of_day.map(|t| t.as_str()),
                action.notes,
                impact.co2e_kg,
                impact.water_l,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// All actions logged on one date, oldest first
    pub fn actions_by_date(&self, date: NaiveDate) -> Result<Vec<LoggedAction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, date, category, item_key, amount, time_of_day, notes, co2e_kg, water_l, created_at
            FROM action_logs
            WHERE date = ?
            ORDER BY id
            "#,
        )?;

        let actions = stmt
            .query_map(params![date.to_string()], Self::row_to_action)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(actions)
    }

    /// All actions in an inclusive date range, ordered by date then id
    pub fn actions_in_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<LoggedAction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, date, category, item_key, amount, time_of_day, notes, co2e_kg, water_l, created_at
            FROM action_logs
            WHERE date BETWEEN ? AND ?
            ORDER BY date, id
            "#,
        )?;

        let actions = stmt
            .query_map(
                params![start.to_string(), end.to_string()],
                Self::row_to_action,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(actions)
    }

    /// Delete one action; returns whether a row existed
    pub fn delete_action(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM action_logs WHERE id = ?", params![id])?;
        Ok(deleted > 0)
    }

    /// Daily summaries for an inclusive range, recomputed from the raw
    /// actions through the engine. Only days with logged actions appear.
    pub fn daily_summaries(
        &self,
        catalog: &FactorCatalog,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailySummary>> {
        let actions = self.actions_in_range(start, end)?;

        let mut dates: Vec<NaiveDate> = actions.iter().map(|a| a.date).collect();
        dates.sort();
        dates.dedup();

        Ok(dates
            .into_iter()
            .map(|date| compute_daily_summary(catalog, date, &actions))
            .collect())
    }

    /// Number of consecutive days with at least one logged action, counting
    /// back from `today`. Zero when nothing was logged today.
    pub fn streak_days(&self, today: NaiveDate) -> Result<u32> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT DISTINCT date FROM action_logs ORDER BY date DESC")?;
        let dates = stmt
            .query_map([], |row| {
                let s: String = row.get(0)?;
                Ok(s)
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut streak = 0u32;
        let mut expected = today;
        for s in dates {
            let Ok(date) = NaiveDate::parse_from_str(&s, "%Y-%m-%d") else {
                continue;
            };
            if date != expected {
                break;
            }
            streak += 1;
            expected = expected - Duration::days(1);
        }

        Ok(streak)
    }

    pub(crate) fn row_to_action(row: &rusqlite::Row) -> rusqlite::Result<LoggedAction> {
        let date_str: String = row.get(1)?;
        let category_str: String = row.get(2)?;
        let time_of_day_str: Option<String> = row.get(5)?;
        let created_at_str: String = row.get(9)?;

        let category = category_str.parse().map_err(|e: String| {
            rusqlite::Error::FromSqlConversionFailure(
                2,
                rusqlite::types::Type::Text,
                e.into(),
            )
        })?;

        Ok(LoggedAction {
            id: row.get(0)?,
            date: chrono::NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").unwrap_or_default(),
            category,
            item_key: row.get(3)?,
            amount: row.get(4)?,
            time_of_day: time_of_day_str.and_then(|s| s.parse().ok()),
            notes: row.get(6)?,
            co2e_kg: row.get(7)?,
            water_l: row.get(8)?,
            created_at: parse_datetime(&created_at_str),
        })
    }
}
