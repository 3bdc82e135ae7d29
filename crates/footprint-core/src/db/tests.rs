//! Database layer tests

use chrono::{Duration, NaiveDate};

use super::Database;
use crate::catalog::FactorCatalog;
use crate::impact::compute_impact;
use crate::models::{Category, ImpactResult, NewAction, TimeOfDay};

fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

fn new_action(date: NaiveDate, category: Category, item_key: &str, amount: f64) -> NewAction {
    NewAction {
        date,
        category,
        item_key: item_key.to_string(),
        amount,
        time_of_day: None,
        notes: None,
    }
}

fn log(db: &Database, catalog: &FactorCatalog, action: &NewAction) -> i64 {
    let impact = compute_impact(
        catalog,
        action.category,
        &action.item_key,
        action.amount,
        action.time_of_day,
    )
    .unwrap();
    db.insert_action(action, impact).unwrap()
}

#[test]
fn test_insert_and_read_back() {
    let db = Database::in_memory().unwrap();
    let catalog = FactorCatalog::builtin().unwrap();

    let mut action = new_action(test_date(), Category::Mobility, "taxi_ice", 5.0);
    action.notes = Some("airport run".to_string());
    let id = log(&db, &catalog, &action);
    assert!(id > 0);

    let actions = db.actions_by_date(test_date()).unwrap();
    assert_eq!(actions.len(), 1);
    let stored = &actions[0];
    assert_eq!(stored.id, id);
    assert_eq!(stored.category, Category::Mobility);
    assert_eq!(stored.item_key, "taxi_ice");
    assert_eq!(stored.amount, 5.0);
    assert_eq!(stored.notes.as_deref(), Some("airport run"));
    assert_eq!(stored.co2e_kg, 1.05);
    assert_eq!(stored.water_l, 2.5);
}

#[test]
fn test_time_of_day_round_trips() {
    let db = Database::in_memory().unwrap();
    let catalog = FactorCatalog::builtin().unwrap();

    let mut action = new_action(test_date(), Category::HomeEnergy, "electricity_kwh", 10.0);
    action.time_of_day = Some(TimeOfDay::Peak);
    log(&db, &catalog, &action);

    let stored = &db.actions_by_date(test_date()).unwrap()[0];
    assert_eq!(stored.time_of_day, Some(TimeOfDay::Peak));
    // 10 * 0.459 * 1.31
    assert_eq!(stored.co2e_kg, 6.013);
}

#[test]
fn test_actions_in_range_ordering() {
    let db = Database::in_memory().unwrap();
    let catalog = FactorCatalog::builtin().unwrap();
    let d0 = test_date();
    let d1 = d0 + Duration::days(1);

    log(&db, &catalog, &new_action(d1, Category::Mobility, "subway", 3.0));
    log(&db, &catalog, &new_action(d0, Category::Purchase, "coffee", 1.0));
    log(&db, &catalog, &new_action(d0, Category::Mobility, "bus", 2.0));

    let actions = db.actions_in_range(d0, d1).unwrap();
    assert_eq!(actions.len(), 3);
    assert_eq!(actions[0].date, d0);
    assert_eq!(actions[1].date, d0);
    assert!(actions[0].id < actions[1].id);
    assert_eq!(actions[2].date, d1);

    // Range excludes days outside it
    let only_d1 = db.actions_in_range(d1, d1).unwrap();
    assert_eq!(only_d1.len(), 1);
    assert_eq!(only_d1[0].item_key, "subway");
}

#[test]
fn test_delete_action() {
    let db = Database::in_memory().unwrap();
    let catalog = FactorCatalog::builtin().unwrap();

    let id = log(
        &db,
        &catalog,
        &new_action(test_date(), Category::Mobility, "bus", 2.0),
    );

    assert!(db.delete_action(id).unwrap());
    assert!(!db.delete_action(id).unwrap());
    assert!(db.actions_by_date(test_date()).unwrap().is_empty());
}

#[test]
fn test_daily_summaries_recompute_from_actions() {
    let db = Database::in_memory().unwrap();
    let catalog = FactorCatalog::builtin().unwrap();
    let d0 = test_date();
    let d2 = d0 + Duration::days(2);

    log(&db, &catalog, &new_action(d0, Category::Purchase, "beef_meal", 1.0));
    log(&db, &catalog, &new_action(d2, Category::Mobility, "taxi_ice", 10.0));

    let summaries = db.daily_summaries(&catalog, d0, d2).unwrap();
    // Only days with actions appear
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].date, d0);
    assert_eq!(summaries[0].total_co2e_kg, 6.5);
    assert_eq!(summaries[1].date, d2);
    assert_eq!(summaries[1].total_co2e_kg, 2.1);
}

#[test]
fn test_streak_counts_back_from_today() {
    let db = Database::in_memory().unwrap();
    let catalog = FactorCatalog::builtin().unwrap();
    let today = test_date();

    assert_eq!(db.streak_days(today).unwrap(), 0);

    log(&db, &catalog, &new_action(today, Category::Mobility, "bus", 1.0));
    log(
        &db,
        &catalog,
        &new_action(today - Duration::days(1), Category::Mobility, "bus", 1.0),
    );
    log(
        &db,
        &catalog,
        &new_action(today - Duration::days(2), Category::Mobility, "bus", 1.0),
    );
    // Gap at day -3 ends the streak
    log(
        &db,
        &catalog,
        &new_action(today - Duration::days(4), Category::Mobility, "bus", 1.0),
    );

    assert_eq!(db.streak_days(today).unwrap(), 3);
}

#[test]
fn test_streak_is_zero_without_today() {
    let db = Database::in_memory().unwrap();
    let catalog = FactorCatalog::builtin().unwrap();
    let today = test_date();

    log(
        &db,
        &catalog,
        &new_action(today - Duration::days(1), Category::Mobility, "bus", 1.0),
    );
    assert_eq!(db.streak_days(today).unwrap(), 0);
}

#[test]
fn test_throwaway_database_removes_its_file_on_drop() {
    let path = {
        let db = Database::in_memory().unwrap();
        let path = std::path::PathBuf::from(db.path());
        assert!(path.exists());
        path
    };
    assert!(!path.exists());
}

#[test]
fn test_clear_actions() {
    let db = Database::in_memory().unwrap();
    let catalog = FactorCatalog::builtin().unwrap();

    log(&db, &catalog, &new_action(test_date(), Category::Mobility, "bus", 1.0));
    db.clear_actions().unwrap();
    assert!(db.actions_by_date(test_date()).unwrap().is_empty());
}
