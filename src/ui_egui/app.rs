//! Demo host for the lane grid.
//!
//! Plays the part of the scheduling form: owns the store and a scenario,
//! syncs the controller every frame and opens the edit dialog when a lane is
//! clicked.

use crate::models::settings::Settings;
use crate::models::working_hours::WorkingHours;
use crate::services::database::Database;
use crate::services::lane_editor::LaneEditor;
use crate::services::localization::Localizer;
use crate::services::manage_calendars::{ManageCalendars, SyncOutcome};
use crate::services::scheduler_store::SchedulerStore;
use crate::services::settings::SettingsService;
use crate::services::working_hours::GridMode;
use crate::ui_egui::edit_dialog::render_edit_dialog;
use crate::ui_egui::grid::{render_lane_grid, GridAction};
use crate::ui_egui::palette::LaneGridPalette;
use crate::ui_egui::scenario::Scenario;
use crate::utils::date::is_same_day;

pub struct LaneCalendarApp {
    store: SchedulerStore,
    controller: ManageCalendars,
    editor: Option<LaneEditor>,
    scenario: Scenario,
    localizer: Localizer,
    database: Option<Database>,
    scroll_pending: bool,
}

impl LaneCalendarApp {
    /// The appointment slice only gets the records that open on the
    /// scenario's day; availability keeps them all and picks per day.
    pub fn new(settings: Settings, working_hours: Vec<WorkingHours>, scenario: Scenario) -> Self {
        let controller = ManageCalendars::new(&settings);
        let mut store = SchedulerStore::new(settings);
        let appointment_day: Vec<WorkingHours> = working_hours
            .iter()
            .filter(|hours| is_same_day(hours.start, scenario.window.start))
            .cloned()
            .collect();
        store.set_appointment_working_hours(appointment_day);
        store.set_availability_working_hours(&scenario.tab_id, working_hours);

        Self {
            store,
            controller,
            editor: None,
            scenario,
            localizer: Localizer::new(),
            database: None,
            scroll_pending: true,
        }
    }

    pub fn with_localizer(mut self, localizer: Localizer) -> Self {
        self.localizer = localizer;
        self
    }

    /// Persist zoom changes to `db`.
    pub fn with_database(mut self, db: Database) -> Self {
        self.database = Some(db);
        self
    }

    fn zoom(&mut self, zoom_in: bool) {
        let changed = if zoom_in {
            self.controller.plus_resize();
            true
        } else {
            self.controller.minus_resize()
        };
        if !changed {
            return;
        }

        if let Some(db) = &self.database {
            let hour_duration = self.controller.scale().hour_duration();
            if let Err(e) = SettingsService::new(db).save_hour_duration(hour_duration) {
                log::warn!("Failed to save zoom level: {}", e);
            }
        }
    }

    fn open_editor(&mut self, row: usize) {
        let props = self.scenario.props();
        let Some(lane) = self
            .store
            .structure(props.tab_id, props.mode)
            .lanes
            .get(row)
            .cloned()
        else {
            return;
        };

        if self
            .controller
            .select_lane(props.tab_id, props.mode, &lane, false, &mut self.store)
        {
            self.editor = Some(LaneEditor::open(
                props.tab_id,
                props.mode,
                props.window,
                self.controller.working_hours().cloned(),
                self.controller.scale(),
                lane.items,
                &mut self.store,
            ));
        }
    }

    fn render_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Lane calendar");
            ui.separator();

            let before = self.scenario.mode;
            ui.selectable_value(&mut self.scenario.mode, GridMode::Scheduling, "Scheduling");
            ui.selectable_value(&mut self.scenario.mode, GridMode::Availability, "Availability");
            if self.scenario.mode != before {
                log::info!("Switched grid to {:?}", self.scenario.mode);
                self.editor = None;
            }

            ui.separator();
            ui.label(format!(
                "{} – {}",
                self.scenario.window.start.format("%Y-%m-%d %H:%M"),
                self.scenario.window.end.format("%H:%M")
            ));
        });
    }
}

impl eframe::App for LaneCalendarApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let outcome = self.controller.sync(&self.scenario.props(), &mut self.store);
        if matches!(outcome, SyncOutcome::Published(_) | SyncOutcome::Cleared) {
            self.scroll_pending = true;
        }

        let palette = LaneGridPalette::from_visuals(&ctx.style().visuals);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| self.render_toolbar(ui));

        let mut action = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            let props = self.scenario.props();
            let selected = self
                .store
                .item_calendar(props.tab_id)
                .first()
                .map(|item| item.id.clone());
            let grid = self.controller.view(&props, &self.store, selected.as_deref());
            action = render_lane_grid(ui, "main", &grid, &palette, self.scroll_pending);
        });
        self.scroll_pending = false;

        match action {
            Some(GridAction::SelectLane(row)) => self.open_editor(row),
            Some(GridAction::ZoomIn) => self.zoom(true),
            Some(GridAction::ZoomOut) => self.zoom(false),
            None => {}
        }

        if let Some(editor) = self.editor.as_mut() {
            render_edit_dialog(ctx, editor, &mut self.store, &self.localizer, &palette);
            if !editor.is_open() {
                self.editor = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn app_with_database() -> LaneCalendarApp {
        let db = Database::in_memory().unwrap();
        let settings = SettingsService::new(&db).get().unwrap();
        LaneCalendarApp::new(settings, Vec::new(), Scenario::demo().unwrap()).with_database(db)
    }

    fn saved_hour_duration(app: &LaneCalendarApp) -> u32 {
        let db = app.database.as_ref().unwrap();
        SettingsService::new(db).get().unwrap().hour_duration
    }

    #[test]
    fn test_zoom_is_saved() {
        let mut app = app_with_database();
        let start = app.controller.scale().hour_duration();

        app.zoom(true);
        assert_eq!(saved_hour_duration(&app), start + 15);

        app.zoom(false);
        app.zoom(false);
        assert_eq!(saved_hour_duration(&app), start - 15);
    }

    #[test]
    fn test_zoom_at_floor_keeps_saved_value() {
        let db = Database::in_memory().unwrap();
        let mut settings = SettingsService::new(&db).get().unwrap();
        settings.hour_duration = settings.step_minutes * settings.min_resize;
        SettingsService::new(&db).update(&settings).unwrap();

        let mut app = LaneCalendarApp::new(settings.clone(), Vec::new(), Scenario::demo().unwrap())
            .with_database(db);
        app.zoom(false);
        assert_eq!(saved_hour_duration(&app), settings.hour_duration);
    }

    #[test]
    fn test_appointment_hours_limited_to_window_day() {
        let scenario = Scenario::demo().unwrap();
        let day = scenario.window.start;
        let open = Utc.with_ymd_and_hms(2024, 3, 11, 8, 0, 0).unwrap();
        let day_before = open - Duration::days(1);
        let hours = vec![
            WorkingHours::new("NYC", day_before, day_before + Duration::hours(9)),
            WorkingHours::new("NYC", open, open + Duration::hours(9)),
        ];

        let app = LaneCalendarApp::new(Settings::default(), hours, scenario);
        let tab_id = app.scenario.tab_id.as_str();
        let appointment = app.store.working_hours(tab_id, GridMode::Scheduling);
        assert_eq!(appointment.len(), 1);
        assert!(is_same_day(appointment[0].start, day));
        assert_eq!(app.store.working_hours(tab_id, GridMode::Availability).len(), 2);
    }
}
