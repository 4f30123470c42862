// Participant module
// Who takes part in an appointment, and the catalogues that color them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::color::RgbColor;

/// The patient booked into the appointment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatientParticipant {
    pub name: String,
    pub patient_number: Option<String>,
}

impl PatientParticipant {
    pub fn new(name: impl Into<String>, patient_number: Option<String>) -> Self {
        Self {
            name: name.into(),
            patient_number,
        }
    }
}

/// The patient link already stored on an existing appointment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppointmentLink {
    pub patient_number: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

/// A specialist attached to the appointment, optionally with its own interval.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpecialistLink {
    pub specialist_name: String,
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
}

impl SpecialistLink {
    pub fn new(specialist_name: impl Into<String>) -> Self {
        Self {
            specialist_name: specialist_name.into(),
            start: None,
            end: None,
        }
    }
}

/// A bookable resource (room, device) attached to the appointment.
///
/// Older records only carry `resource`; newer ones carry `resource_code`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceLink {
    #[serde(default)]
    pub resource_code: Option<String>,
    #[serde(default)]
    pub resource: Option<String>,
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
}

impl ResourceLink {
    pub fn with_code(code: impl Into<String>) -> Self {
        Self {
            resource_code: Some(code.into()),
            resource: None,
            start: None,
            end: None,
        }
    }

    /// The code used to key and name the resource lane.
    pub fn code(&self) -> Option<&str> {
        self.resource_code.as_deref().or(self.resource.as_deref())
    }
}

/// Specialist catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specialist {
    pub name: String,
    pub color: Option<RgbColor>,
}

/// Resource catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDefinition {
    pub resource: String,
    pub color: Option<RgbColor>,
}

/// Location catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub location_code: String,
    pub color: Option<RgbColor>,
}

/// The appointment's location: either a code to look up in the catalogue or
/// the full record handed over directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocationRef {
    Code(String),
    Inline(Location),
}

impl LocationRef {
    pub fn code(&self) -> &str {
        match self {
            LocationRef::Code(code) => code,
            LocationRef::Inline(location) => &location.location_code,
        }
    }

    /// Color of the location, looking codes up in `locations`.
    pub fn color(&self, locations: &[Location]) -> Option<RgbColor> {
        match self {
            LocationRef::Code(code) => locations
                .iter()
                .find(|location| &location.location_code == code)
                .and_then(|location| location.color),
            LocationRef::Inline(location) => location.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_code_falls_back_to_resource() {
        let legacy = ResourceLink {
            resource_code: None,
            resource: Some("ROOM1".into()),
            start: None,
            end: None,
        };
        assert_eq!(legacy.code(), Some("ROOM1"));
        assert_eq!(ResourceLink::with_code("BOOTH").code(), Some("BOOTH"));
    }

    #[test]
    fn test_location_color_lookup() {
        let red = RgbColor::new(200, 0, 0);
        let catalogue = vec![Location {
            location_code: "NYC".into(),
            color: Some(red),
        }];

        assert_eq!(LocationRef::Code("NYC".into()).color(&catalogue), Some(red));
        assert_eq!(LocationRef::Code("LA".into()).color(&catalogue), None);

        let inline = LocationRef::Inline(Location {
            location_code: "LA".into(),
            color: Some(RgbColor::neutral()),
        });
        assert_eq!(inline.color(&catalogue), Some(RgbColor::neutral()));
        assert_eq!(inline.code(), "LA");
    }

    #[test]
    fn test_location_ref_deserializes_untagged() {
        let code: LocationRef = serde_json::from_str("\"NYC\"").unwrap();
        assert_eq!(code, LocationRef::Code("NYC".into()));

        let inline: LocationRef =
            serde_json::from_str(r#"{"location_code":"LA","color":null}"#).unwrap();
        assert_eq!(inline.code(), "LA");
    }
}
