//! Shared scheduler state.
//!
//! Holds every tab's lane structures and the lookup lists the grid needs.
//! Writers go through [`CalendarDispatch`] so the controller and the edit
//! view can be tested against a mock.

use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::lane::CalendarStructure;
use crate::models::settings::Settings;
use crate::models::timed_item::TimedItem;
use crate::models::working_hours::WorkingHours;
use crate::services::working_hours::GridMode;

static EMPTY_STRUCTURE: CalendarStructure = CalendarStructure { lanes: Vec::new() };

/// Per-tab scheduling state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabState {
    pub manage_calendars_data: CalendarStructure,
    /// Working copy edited by the lane edit view.
    pub manage_modal_data: CalendarStructure,
    /// Items of the lane currently selected for editing.
    pub item_calendar: Vec<TimedItem>,
}

/// Per-tab availability-search state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityTabState {
    pub manage_calendars_data_availability: CalendarStructure,
    pub availability_working_hours: Vec<WorkingHours>,
}

/// Publishing side of the store.
#[cfg_attr(test, mockall::automock)]
pub trait CalendarDispatch {
    fn set_manage_calendars_data(&mut self, tab_id: &str, structure: CalendarStructure);
    fn set_manage_calendars_data_availability(&mut self, tab_id: &str, structure: CalendarStructure);
    fn set_item_calendar(&mut self, tab_id: &str, items: Vec<TimedItem>);
    fn set_manage_modal_data(&mut self, tab_id: &str, structure: CalendarStructure);
}

/// Publish `structure` to the slice that belongs to `mode`.
pub fn publish_structure<D: CalendarDispatch + ?Sized>(
    dispatch: &mut D,
    tab_id: &str,
    mode: GridMode,
    structure: CalendarStructure,
) {
    match mode {
        GridMode::Scheduling => dispatch.set_manage_calendars_data(tab_id, structure),
        GridMode::Availability => dispatch.set_manage_calendars_data_availability(tab_id, structure),
    }
}

#[derive(Debug, Clone, Default)]
pub struct SchedulerStore {
    tabs: HashMap<String, TabState>,
    availability_tabs: HashMap<String, AvailabilityTabState>,
    appointment_working_hours: Vec<WorkingHours>,
    settings: Settings,
}

impl SchedulerStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn tab(&self, tab_id: &str) -> Option<&TabState> {
        self.tabs.get(tab_id)
    }

    pub fn availability_tab(&self, tab_id: &str) -> Option<&AvailabilityTabState> {
        self.availability_tabs.get(tab_id)
    }

    /// The structure shown for `mode`, empty when the tab has none yet.
    pub fn structure(&self, tab_id: &str, mode: GridMode) -> &CalendarStructure {
        let found = match mode {
            GridMode::Scheduling => self.tab(tab_id).map(|tab| &tab.manage_calendars_data),
            GridMode::Availability => self
                .availability_tab(tab_id)
                .map(|tab| &tab.manage_calendars_data_availability),
        };
        found.unwrap_or(&EMPTY_STRUCTURE)
    }

    pub fn modal_data(&self, tab_id: &str) -> &CalendarStructure {
        self.tab(tab_id)
            .map(|tab| &tab.manage_modal_data)
            .unwrap_or(&EMPTY_STRUCTURE)
    }

    pub fn item_calendar(&self, tab_id: &str) -> &[TimedItem] {
        self.tab(tab_id)
            .map(|tab| tab.item_calendar.as_slice())
            .unwrap_or_default()
    }

    /// Working-hours list consulted for `mode`.
    pub fn working_hours(&self, tab_id: &str, mode: GridMode) -> &[WorkingHours] {
        match mode {
            GridMode::Scheduling => &self.appointment_working_hours,
            GridMode::Availability => self
                .availability_tab(tab_id)
                .map(|tab| tab.availability_working_hours.as_slice())
                .unwrap_or_default(),
        }
    }

    pub fn set_appointment_working_hours(&mut self, hours: Vec<WorkingHours>) {
        self.appointment_working_hours = hours;
    }

    pub fn set_availability_working_hours(&mut self, tab_id: &str, hours: Vec<WorkingHours>) {
        self.availability_tabs
            .entry(tab_id.to_string())
            .or_default()
            .availability_working_hours = hours;
    }

    /// Pretty JSON dump of one tab, for diagnostics.
    pub fn snapshot_json(&self, tab_id: &str) -> Result<String> {
        #[derive(Serialize)]
        struct Snapshot<'a> {
            tab_id: &'a str,
            calendar: Option<&'a TabState>,
            availability: Option<&'a AvailabilityTabState>,
        }

        serde_json::to_string_pretty(&Snapshot {
            tab_id,
            calendar: self.tab(tab_id),
            availability: self.availability_tab(tab_id),
        })
        .with_context(|| format!("Failed to serialize tab {}", tab_id))
    }

    fn tab_mut(&mut self, tab_id: &str) -> &mut TabState {
        self.tabs.entry(tab_id.to_string()).or_default()
    }
}

impl CalendarDispatch for SchedulerStore {
    fn set_manage_calendars_data(&mut self, tab_id: &str, structure: CalendarStructure) {
        log::debug!("Tab {}: published {} lanes", tab_id, structure.len());
        self.tab_mut(tab_id).manage_calendars_data = structure;
    }

    fn set_manage_calendars_data_availability(&mut self, tab_id: &str, structure: CalendarStructure) {
        log::debug!(
            "Tab {}: published {} availability lanes",
            tab_id,
            structure.len()
        );
        self.availability_tabs
            .entry(tab_id.to_string())
            .or_default()
            .manage_calendars_data_availability = structure;
    }

    fn set_item_calendar(&mut self, tab_id: &str, items: Vec<TimedItem>) {
        self.tab_mut(tab_id).item_calendar = items;
    }

    fn set_manage_modal_data(&mut self, tab_id: &str, structure: CalendarStructure) {
        self.tab_mut(tab_id).manage_modal_data = structure;
    }
}
