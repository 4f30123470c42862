//! Horizontal scale of the grid and the zoom actions that change it.

use crate::models::settings::Settings;

/// Pixels per hour together with the grid step and the zoom floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourScale {
    hour_duration: u32,
    step: u32,
    min_resize: u32,
}

impl HourScale {
    /// A scale below the floor is raised to the floor.
    pub fn new(hour_duration: u32, step: u32, min_resize: u32) -> Self {
        let step = step.max(1);
        let min_resize = min_resize.max(1);
        Self {
            hour_duration: hour_duration.max(step * min_resize),
            step,
            min_resize,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.hour_duration, settings.step_minutes, settings.min_resize)
    }

    pub fn hour_duration(&self) -> u32 {
        self.hour_duration
    }

    /// Grid step in minutes.
    pub fn step(&self) -> u32 {
        self.step
    }

    /// Smallest allowed pixels-per-hour value.
    pub fn floor(&self) -> u32 {
        self.step * self.min_resize
    }

    /// Pixels covered by `minutes` at the current scale.
    pub fn px(&self, minutes: i64) -> f32 {
        minutes as f32 * self.hour_duration as f32 / 60.0
    }

    /// Width of one grid step.
    pub fn tick_width(&self) -> f32 {
        self.px(self.step as i64)
    }

    /// Zoom in by one step.
    pub fn plus(&mut self) {
        self.hour_duration += self.step;
        log::debug!("Zoomed in to {} px/hour", self.hour_duration);
    }

    /// Zoom out by one step. Returns false (and changes nothing) at the floor.
    pub fn minus(&mut self) -> bool {
        if self.hour_duration < self.floor() + self.step {
            return false;
        }
        self.hour_duration -= self.step;
        log::debug!("Zoomed out to {} px/hour", self.hour_duration);
        true
    }
}

impl Default for HourScale {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}
