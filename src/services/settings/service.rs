use crate::models::settings::Settings;
use crate::services::database::Database;
use anyhow::{Context, Result};

use super::mapper::row_to_settings;

pub struct SettingsService<'a> {
    db: &'a Database,
}

impl<'a> SettingsService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Get the current settings
    pub fn get(&self) -> Result<Settings> {
        let conn = self.db.connection();

        let settings = conn
            .query_row(
                "SELECT id, time_format, hour_duration, step_minutes, min_resize
                 FROM settings WHERE id = 1",
                [],
                row_to_settings,
            )
            .context("Failed to load settings")?;

        Ok(settings)
    }

    /// Update settings
    pub fn update(&self, settings: &Settings) -> Result<()> {
        settings.validate().context("Invalid settings")?;

        self.db
            .connection()
            .execute(
                "UPDATE settings \
                 SET time_format = ?1, \
                     hour_duration = ?2, \
                     step_minutes = ?3, \
                     min_resize = ?4, \
                     updated_at = CURRENT_TIMESTAMP \
                 WHERE id = 1",
                (
                    &settings.time_format,
                    settings.hour_duration,
                    settings.step_minutes,
                    settings.min_resize,
                ),
            )
            .context("Failed to update settings")?;

        log::info!(
            "Saved settings: time_format={}, hour_duration={}",
            settings.time_format,
            settings.hour_duration
        );
        Ok(())
    }

    /// Persist only the zoom level, keeping it above the configured floor.
    pub fn save_hour_duration(&self, hour_duration: u32) -> Result<()> {
        let mut settings = self.get()?;
        settings.hour_duration = hour_duration;
        self.update(&settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_test_db() -> Database {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();
        db
    }

    #[test]
    fn test_get_default_settings() {
        let db = setup_test_db();
        let service = SettingsService::new(&db);

        let settings = service.get().unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_update_settings() {
        let db = setup_test_db();
        let service = SettingsService::new(&db);

        let mut settings = service.get().unwrap();
        settings.time_format = "24h".to_string();
        settings.hour_duration = 180;

        service.update(&settings).unwrap();

        let updated = service.get().unwrap();
        assert!(updated.uses_24_hour_clock());
        assert_eq!(updated.hour_duration, 180);
    }

    #[test]
    fn test_update_rejects_invalid_settings() {
        let db = setup_test_db();
        let service = SettingsService::new(&db);

        let mut settings = service.get().unwrap();
        settings.step_minutes = 0;

        assert!(service.update(&settings).is_err());
        assert_eq!(service.get().unwrap().step_minutes, 15, "Nothing should be written");
    }

    #[test]
    fn test_save_hour_duration_below_floor_fails() {
        let db = setup_test_db();
        let service = SettingsService::new(&db);

        assert!(service.save_hour_duration(135).is_ok());
        assert_eq!(service.get().unwrap().hour_duration, 135);
        assert!(service.save_hour_duration(15).is_err());
    }
}
