// Lane calendar demo
// Main entry point

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use lane_calendar::models::settings::Settings;
use lane_calendar::models::working_hours::WorkingHours;
use lane_calendar::services::database::Database;
use lane_calendar::services::localization::Localizer;
use lane_calendar::services::settings::SettingsService;
use lane_calendar::services::working_hours::WorkingHoursRepository;
use lane_calendar::ui_egui::{LaneCalendarApp, Scenario};

fn resolve_db_path() -> Result<PathBuf> {
    #[cfg(debug_assertions)]
    {
        Ok(PathBuf::from("lane_calendar.db"))
    }

    #[cfg(not(debug_assertions))]
    {
        use directories::ProjectDirs;

        match ProjectDirs::from("com", "KenBoyle", "LaneCalendar") {
            Some(dirs) => {
                let data_dir = dirs.data_dir();
                std::fs::create_dir_all(data_dir)
                    .with_context(|| format!("Failed to create {}", data_dir.display()))?;
                Ok(data_dir.join("lane_calendar.db"))
            }
            None => Ok(PathBuf::from("lane_calendar_prod.db")),
        }
    }
}

fn load_settings_or_default(db: &Database) -> Settings {
    match SettingsService::new(db).get() {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Failed to load settings: {}, using defaults", e);
            Settings::default()
        }
    }
}

/// Working hours from the database, topped up with the scenario's records.
fn load_working_hours(db: &Database, scenario: &Scenario) -> Result<Vec<WorkingHours>> {
    let repository = WorkingHoursRepository::new(db);
    repository.insert_missing(&scenario.working_hours)?;
    repository.list()
}

/// Translations named by `LANE_CALENDAR_TRANSLATIONS`, or the English labels.
fn load_localizer() -> Result<Localizer> {
    match std::env::var_os("LANE_CALENDAR_TRANSLATIONS") {
        Some(path) => Localizer::from_file(Path::new(&path)),
        None => Ok(Localizer::new()),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Starting lane calendar");

    let scenario = match std::env::args().nth(1) {
        Some(path) => Scenario::from_file(Path::new(&path))?,
        None => Scenario::demo()?,
    };

    let db_path = resolve_db_path()?;
    let db = Database::new(&db_path.to_string_lossy())?;
    db.initialize_schema().context("Failed to initialize database schema")?;

    let settings = load_settings_or_default(&db);
    let working_hours = load_working_hours(&db, &scenario)?;
    let localizer = load_localizer()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 640.0])
            .with_min_inner_size([800.0, 400.0])
            .with_title("Lane calendar"),
        ..Default::default()
    };

    eframe::run_native(
        "Lane calendar",
        options,
        Box::new(move |_cc| {
            let app = LaneCalendarApp::new(settings, working_hours, scenario)
                .with_localizer(localizer)
                .with_database(db);
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run the lane calendar window: {e}"))
}
