use anyhow::{Context, Result};
use rusqlite::Row;

use crate::models::working_hours::WorkingHours;
use crate::models::window::TimeWindow;
use crate::services::database::Database;

/// Reads and writes location opening hours.
pub struct WorkingHoursRepository<'a> {
    db: &'a Database,
}

fn row_to_working_hours(row: &Row) -> Result<WorkingHours, rusqlite::Error> {
    Ok(WorkingHours {
        location_code: row.get(0)?,
        start: row.get(1)?,
        end: row.get(2)?,
    })
}

impl<'a> WorkingHoursRepository<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Store a record. Zero-length or inverted hours are refused.
    pub fn insert(&self, hours: &WorkingHours) -> Result<i64> {
        TimeWindow::checked(hours.start, hours.end)
            .with_context(|| format!("Invalid working hours for {}", hours.location_code))?;

        let conn = self.db.connection();
        conn.execute(
            "INSERT INTO working_hours (location_code, start_datetime, end_datetime)
             VALUES (?1, ?2, ?3)",
            (&hours.location_code, hours.start, hours.end),
        )
        .context("Failed to insert working hours")?;

        Ok(conn.last_insert_rowid())
    }

    pub fn contains(&self, hours: &WorkingHours) -> Result<bool> {
        let count: i64 = self
            .db
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM working_hours
                 WHERE location_code = ?1 AND start_datetime = ?2 AND end_datetime = ?3",
                (&hours.location_code, hours.start, hours.end),
                |row| row.get(0),
            )
            .context("Failed to look up working hours")?;
        Ok(count > 0)
    }

    /// Store each record not already present. Returns how many were added.
    pub fn insert_missing(&self, records: &[WorkingHours]) -> Result<usize> {
        let mut added = 0;
        for hours in records {
            if !self.contains(hours)? {
                self.insert(hours)?;
                added += 1;
            }
        }
        if added > 0 {
            log::info!("Added {} working-hours records", added);
        }
        Ok(added)
    }

    /// Every record, in insertion order.
    pub fn list(&self) -> Result<Vec<WorkingHours>> {
        let conn = self.db.connection();
        let mut stmt = conn
            .prepare(
                "SELECT location_code, start_datetime, end_datetime
                 FROM working_hours ORDER BY id",
            )
            .context("Failed to prepare working hours query")?;

        let rows = stmt
            .query_map([], row_to_working_hours)
            .context("Failed to query working hours")?;

        rows.collect::<Result<Vec<_>, _>>()
            .context("Failed to read working hours")
    }

    /// Records for one location, in insertion order.
    pub fn list_for_location(&self, location_code: &str) -> Result<Vec<WorkingHours>> {
        let conn = self.db.connection();
        let mut stmt = conn
            .prepare(
                "SELECT location_code, start_datetime, end_datetime
                 FROM working_hours WHERE location_code = ?1 ORDER BY id",
            )
            .context("Failed to prepare working hours query")?;

        let rows = stmt
            .query_map([location_code], row_to_working_hours)
            .context("Failed to query working hours")?;

        rows.collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("Failed to read working hours for {}", location_code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn setup_test_db() -> Database {
        Database::in_memory().unwrap()
    }

    fn hours(code: &str, open: u32, close: u32) -> WorkingHours {
        WorkingHours::new(
            code,
            Utc.with_ymd_and_hms(2024, 3, 11, open, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 11, close, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_insert_and_list() {
        let db = setup_test_db();
        let repo = WorkingHoursRepository::new(&db);

        repo.insert(&hours("NYC", 8, 17)).unwrap();
        repo.insert(&hours("LA", 9, 18)).unwrap();

        let all = repo.list().unwrap();
        assert_eq!(all, vec![hours("NYC", 8, 17), hours("LA", 9, 18)]);
    }

    #[test]
    fn test_list_for_location_filters() {
        let db = setup_test_db();
        let repo = WorkingHoursRepository::new(&db);

        repo.insert(&hours("NYC", 8, 17)).unwrap();
        repo.insert(&hours("LA", 9, 18)).unwrap();

        let nyc = repo.list_for_location("NYC").unwrap();
        assert_eq!(nyc.len(), 1);
        assert_eq!(nyc[0].location_code, "NYC");
        assert!(repo.list_for_location("SF").unwrap().is_empty());
    }

    #[test]
    fn test_insert_rejects_inverted_hours() {
        let db = setup_test_db();
        let repo = WorkingHoursRepository::new(&db);

        assert!(repo.insert(&hours("NYC", 17, 8)).is_err());
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn test_insert_missing_adds_only_new_records() {
        let db = setup_test_db();
        let repo = WorkingHoursRepository::new(&db);
        repo.insert(&hours("NYC", 8, 17)).unwrap();

        let next_day = WorkingHours::new(
            "NYC",
            Utc.with_ymd_and_hms(2024, 3, 12, 8, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 12, 17, 0, 0).unwrap(),
        );
        let added = repo
            .insert_missing(&[hours("NYC", 8, 17), next_day.clone()])
            .unwrap();

        assert_eq!(added, 1);
        assert!(repo.contains(&next_day).unwrap());
        assert_eq!(repo.list().unwrap().len(), 2);
        assert_eq!(repo.insert_missing(&[next_day]).unwrap(), 0);
    }
}
