// Test fixtures - reusable test data
// Provides consistent appointments and participants across test files

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};

use lane_calendar::models::participant::{
    LocationRef, PatientParticipant, ResourceLink, Specialist, SpecialistLink,
};
use lane_calendar::models::color::RgbColor;
use lane_calendar::models::window::TimeWindow;
use lane_calendar::models::working_hours::WorkingHours;

/// 11 March 2024 at the given UTC time.
pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 11, hour, minute, 0).unwrap()
}

pub fn morning_window() -> TimeWindow {
    TimeWindow::new(at(9, 0), at(11, 0))
}

pub fn nyc_hours() -> WorkingHours {
    WorkingHours::new("NYC", at(8, 0), at(17, 0))
}

pub fn patient() -> PatientParticipant {
    PatientParticipant::new("Jane Doe", Some("P-1042".to_string()))
}

pub fn nyc() -> LocationRef {
    LocationRef::Code("NYC".to_string())
}

pub fn specialist_links() -> Vec<SpecialistLink> {
    vec![SpecialistLink::new("Dr. Adams"), SpecialistLink::new("Dr. Baker")]
}

pub fn specialists() -> Vec<Specialist> {
    vec![
        Specialist {
            name: "Dr. Adams".to_string(),
            color: Some(RgbColor::new(0x1E, 0x88, 0xE5)),
        },
        Specialist {
            name: "Dr. Baker".to_string(),
            color: None,
        },
    ]
}

pub fn resource_links() -> Vec<ResourceLink> {
    vec![ResourceLink::with_code("XR-1")]
}
