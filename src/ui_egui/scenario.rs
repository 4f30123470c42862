//! Demo scenarios.
//!
//! A scenario is everything a host form would hand to the lane grid for one
//! tab, stored as JSON so the binary can be pointed at different setups.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::participant::{
    AppointmentLink, Location, LocationRef, PatientParticipant, ResourceDefinition, ResourceLink,
    Specialist, SpecialistLink,
};
use crate::models::window::TimeWindow;
use crate::models::working_hours::WorkingHours;
use crate::services::manage_calendars::ManageCalendarsProps;
use crate::services::working_hours::GridMode;

const DEMO_SCENARIO: &str = include_str!("../../demos/scenario.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub tab_id: String,
    pub window: TimeWindow,
    #[serde(default)]
    pub mode: GridMode,
    #[serde(default)]
    pub is_recurrence: bool,
    pub patient: Option<PatientParticipant>,
    pub appointment: Option<AppointmentLink>,
    pub location: Option<LocationRef>,
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub specialist_links: Vec<SpecialistLink>,
    #[serde(default)]
    pub specialists: Vec<Specialist>,
    #[serde(default)]
    pub resource_links: Vec<ResourceLink>,
    #[serde(default)]
    pub resources: Vec<ResourceDefinition>,
    /// Seeded into the database when it has no working hours yet.
    #[serde(default)]
    pub working_hours: Vec<WorkingHours>,
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse scenario")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        Self::from_json(&json)
    }

    /// The scenario bundled with the binary.
    pub fn demo() -> Result<Self> {
        Self::from_json(DEMO_SCENARIO)
    }

    pub fn props(&self) -> ManageCalendarsProps<'_> {
        ManageCalendarsProps {
            tab_id: &self.tab_id,
            window: self.window,
            mode: self.mode,
            is_recurrence: self.is_recurrence,
            patient: self.patient.as_ref(),
            appointment: self.appointment.as_ref(),
            location: self.location.as_ref(),
            locations: &self.locations,
            specialist_links: &self.specialist_links,
            specialists: &self.specialists,
            resource_links: &self.resource_links,
            resources: &self.resources,
        }
    }
}
