// Service module exports

pub mod database;
pub mod grid_layout;
pub mod lane_editor;
pub mod lane_merge;
pub mod localization;
pub mod manage_calendars;
pub mod scheduler_store;
pub mod settings;
pub mod working_hours;
