//! Label lookup for the lane grid and edit view.
//!
//! Hosts can supply a translation map (typically loaded from JSON); any key it
//! lacks falls back to the built-in English text, and unknown keys render as
//! themselves.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

pub const MODAL_TITLE: &str = "scheduler.managecalendars.modal.title";
pub const BUTTON_CANCEL: &str = "layout.modal.button.cancel";
pub const BUTTON_SAVE: &str = "layout.modal.button.save";
pub const START_TIME: &str = "scheduler.modal.starttime";
pub const END_TIME: &str = "scheduler.modal.endtime";
pub const ADD_INSTANCE: &str = "scheduler.managecalendars.modal.addinstance";
pub const INPUT_START_AFTER: &str = "scheduler.managecalendars.modal.input.starttime";
pub const INPUT_DURATION: &str = "scheduler.managecalendars.modal.input.duration";
pub const INPUT_MINUTES: &str = "scheduler.managecalendars.modal.input.duration.minutes";

fn english(key: &str) -> Option<&'static str> {
    let text = match key {
        MODAL_TITLE => "Manage calendars",
        BUTTON_CANCEL => "Cancel",
        BUTTON_SAVE => "Save",
        START_TIME => "Start time",
        END_TIME => "End time",
        ADD_INSTANCE => "Add instance",
        INPUT_START_AFTER => "Start after",
        INPUT_DURATION => "Duration",
        INPUT_MINUTES => "min",
        _ => return None,
    };
    Some(text)
}

#[derive(Debug, Clone, Default)]
pub struct Localizer {
    translations: HashMap<String, String>,
}

impl Localizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_translations(translations: HashMap<String, String>) -> Self {
        Self { translations }
    }

    /// Parse a flat `{"key": "text"}` JSON object.
    pub fn from_json(json: &str) -> Result<Self> {
        let translations: HashMap<String, String> =
            serde_json::from_str(json).context("Failed to parse translation map")?;
        log::debug!("Loaded {} translations", translations.len());
        Ok(Self::with_translations(translations))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read translations {}", path.display()))?;
        Self::from_json(&json)
    }

    pub fn localize<'a>(&'a self, key: &'a str) -> &'a str {
        self.translations
            .get(key)
            .map(String::as_str)
            .or_else(|| english(key))
            .unwrap_or(key)
    }
}
