use crate::models::settings::Settings;
use rusqlite::Row;

pub fn row_to_settings(row: &Row) -> Result<Settings, rusqlite::Error> {
    Ok(Settings {
        id: Some(row.get(0)?),
        time_format: row.get(1)?,
        hour_duration: row.get(2)?,
        step_minutes: row.get(3)?,
        min_resize: row.get(4)?,
    })
}
