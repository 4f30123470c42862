//! Lane-merge engine.
//!
//! Rebuilds a tab's [`CalendarStructure`] from the current participants while
//! keeping every interval the user already adjusted. The result is a pure
//! function of the previous structure and the inputs; publishing it is the
//! caller's job.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::models::lane::{CalendarStructure, Lane};
use crate::models::participant::{
    AppointmentLink, Location, LocationRef, PatientParticipant, ResourceDefinition, ResourceLink,
    Specialist, SpecialistLink,
};
use crate::models::timed_item::{TimedItem, PATIENT_ITEM_ID};
use crate::models::window::TimeWindow;

/// Everything merge reads besides the previous structure.
#[derive(Debug, Clone, Copy)]
pub struct MergeInput<'a> {
    pub window: TimeWindow,
    pub patient: Option<&'a PatientParticipant>,
    pub appointment: Option<&'a AppointmentLink>,
    pub location: Option<&'a LocationRef>,
    pub locations: &'a [Location],
    pub specialist_links: &'a [SpecialistLink],
    pub specialists: &'a [Specialist],
    pub resource_links: &'a [ResourceLink],
    pub resources: &'a [ResourceDefinition],
}

impl<'a> MergeInput<'a> {
    /// Input with no participants at all.
    pub fn new(window: TimeWindow) -> Self {
        Self {
            window,
            patient: None,
            appointment: None,
            location: None,
            locations: &[],
            specialist_links: &[],
            specialists: &[],
            resource_links: &[],
            resources: &[],
        }
    }
}

pub fn specialist_item_id(name: &str) -> String {
    format!("specialistLinks-{}", name)
}

pub fn resource_item_id(code: &str) -> String {
    format!("resourceLinks-{}", code)
}

/// A participant's default item, used only when nothing is carried over.
struct Candidate {
    id: String,
    name: String,
    color: Option<crate::models::color::RgbColor>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Candidate {
    fn into_item(self) -> TimedItem {
        TimedItem::new(self.id, self.name, self.start, self.end).with_color(self.color)
    }
}

/// Merge the previous structure with the current participants.
///
/// Lane order is patient, specialists, resources. Items already present in
/// `previous` win over freshly computed defaults.
pub fn merge(previous: &CalendarStructure, input: &MergeInput<'_>) -> CalendarStructure {
    let existing = previous.flatten();
    let mut lanes = Vec::new();

    if let Some(patient) = input.patient {
        lanes.push(Lane::new(vec![patient_item(&existing, patient, input)]));
    }

    let window = input.window;
    let specialist_candidates = input
        .specialist_links
        .iter()
        .map(|link| {
            let name = link.specialist_name.clone();
            let color = input
                .specialists
                .iter()
                .find(|specialist| specialist.name == name)
                .and_then(|specialist| specialist.color);
            Candidate {
                id: specialist_item_id(&name),
                name,
                color,
                start: link.start.unwrap_or(window.start),
                end: link.end.unwrap_or(window.end),
            }
        })
        .collect();
    lanes.extend(merge_participants(&existing, specialist_candidates));

    let resource_candidates = input
        .resource_links
        .iter()
        .filter_map(|link| {
            let Some(code) = link.code() else {
                log::warn!("Skipping resource link without a code");
                return None;
            };
            let color = input
                .resources
                .iter()
                .find(|resource| resource.resource == code)
                .and_then(|resource| resource.color);
            Some(Candidate {
                id: resource_item_id(code),
                name: code.to_string(),
                color,
                start: link.start.unwrap_or(window.start),
                end: link.end.unwrap_or(window.end),
            })
        })
        .collect();
    lanes.extend(merge_participants(&existing, resource_candidates));

    let merged = CalendarStructure::new(lanes);
    log::debug!(
        "Merged {} previous items into {} lanes",
        existing.len(),
        merged.len()
    );
    merged
}

fn patient_item(
    existing: &[TimedItem],
    patient: &PatientParticipant,
    input: &MergeInput<'_>,
) -> TimedItem {
    if let Some(found) = existing.iter().find(|item| item.id == PATIENT_ITEM_ID) {
        return TimedItem {
            name: patient.name.clone(),
            ..found.clone()
        };
    }

    let appointment = input.appointment;
    TimedItem {
        id: PATIENT_ITEM_ID.to_string(),
        name: patient.name.clone(),
        color: input
            .location
            .and_then(|location| location.color(input.locations)),
        start: appointment
            .and_then(|link| link.start)
            .or(Some(input.window.start)),
        end: appointment.and_then(|link| link.end).or(Some(input.window.end)),
        patient_number: patient
            .patient_number
            .clone()
            .or_else(|| appointment.and_then(|link| link.patient_number.clone())),
    }
}

/// Carry over items of current participants, add defaults for newcomers,
/// drop repeated ids and group by name in first-seen order.
fn merge_participants(existing: &[TimedItem], candidates: Vec<Candidate>) -> Vec<Lane> {
    if candidates.is_empty() {
        return Vec::new();
    }

    let names: HashSet<String> = candidates.iter().map(|c| c.name.clone()).collect();
    let existing_ids: HashSet<&str> = existing.iter().map(|item| item.id.as_str()).collect();

    let carried = existing
        .iter()
        .filter(|item| !item.is_patient() && names.contains(&item.name))
        .cloned();
    let fresh = candidates
        .into_iter()
        .filter(|candidate| !existing_ids.contains(candidate.id.as_str()))
        .map(Candidate::into_item);

    let mut seen = HashSet::new();
    let mut lanes: Vec<Lane> = Vec::new();
    for item in carried.chain(fresh) {
        if !seen.insert(item.id.clone()) {
            continue;
        }
        match lanes.iter_mut().find(|lane| lane.name() == Some(item.name.as_str())) {
            Some(lane) => lane.items.push(item),
            None => lanes.push(Lane::new(vec![item])),
        }
    }

    lanes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::color::RgbColor;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 11, hour, minute, 0).unwrap()
    }

    fn window() -> TimeWindow {
        TimeWindow::new(at(9, 0), at(10, 0))
    }

    #[test]
    fn test_new_patient_gets_location_color_and_window() {
        let patient = PatientParticipant::new("Jane Roe", Some("P-100".into()));
        let location = LocationRef::Code("NYC".into());
        let locations = vec![Location {
            location_code: "NYC".into(),
            color: Some(RgbColor::new(10, 20, 30)),
        }];
        let input = MergeInput {
            patient: Some(&patient),
            location: Some(&location),
            locations: &locations,
            ..MergeInput::new(window())
        };

        let merged = merge(&CalendarStructure::empty(), &input);

        assert_eq!(merged.len(), 1);
        let item = &merged.lanes[0].items[0];
        assert_eq!(item.id, "patient");
        assert_eq!(item.name, "Jane Roe");
        assert_eq!(item.color, Some(RgbColor::new(10, 20, 30)));
        assert_eq!(item.interval(), Some((at(9, 0), at(10, 0))));
        assert_eq!(item.patient_number.as_deref(), Some("P-100"));
    }

    #[test]
    fn test_new_patient_prefers_appointment_link_interval() {
        let patient = PatientParticipant::new("Jane Roe", None);
        let appointment = AppointmentLink {
            patient_number: Some("P-7".into()),
            start: Some(at(9, 15)),
            end: Some(at(9, 45)),
        };
        let input = MergeInput {
            patient: Some(&patient),
            appointment: Some(&appointment),
            ..MergeInput::new(window())
        };

        let merged = merge(&CalendarStructure::empty(), &input);
        let item = &merged.lanes[0].items[0];
        assert_eq!(item.interval(), Some((at(9, 15), at(9, 45))));
        assert_eq!(item.patient_number.as_deref(), Some("P-7"));
    }

    #[test]
    fn test_existing_patient_keeps_interval_and_refreshes_name() {
        let previous = CalendarStructure::from(vec![vec![TimedItem::new(
            "patient",
            "Old Name",
            at(9, 30),
            at(9, 50),
        )
        .with_color(Some(RgbColor::new(1, 2, 3)))]]);
        let patient = PatientParticipant::new("New Name", None);
        let input = MergeInput {
            patient: Some(&patient),
            ..MergeInput::new(window())
        };

        let merged = merge(&previous, &input);
        let item = &merged.lanes[0].items[0];
        assert_eq!(item.name, "New Name");
        assert_eq!(item.interval(), Some((at(9, 30), at(9, 50))));
        assert_eq!(item.color, Some(RgbColor::new(1, 2, 3)));
    }

    #[test]
    fn test_specialist_edit_survives_remerge() {
        let links = vec![SpecialistLink::new("Dr. A")];
        let input = MergeInput {
            specialist_links: &links,
            ..MergeInput::new(window())
        };
        let previous = CalendarStructure::from(vec![vec![TimedItem::new(
            specialist_item_id("Dr. A"),
            "Dr. A",
            at(9, 0),
            at(9, 20),
        )]]);

        let merged = merge(&previous, &input);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged.lanes[0].items.len(), 1);
        assert_eq!(
            merged.lanes[0].items[0].interval(),
            Some((at(9, 0), at(9, 20)))
        );
    }

    #[test]
    fn test_carried_items_come_before_newcomers() {
        let links = vec![SpecialistLink::new("Dr. B"), SpecialistLink::new("Dr. A")];
        let input = MergeInput {
            specialist_links: &links,
            ..MergeInput::new(window())
        };
        let previous = CalendarStructure::from(vec![vec![TimedItem::new(
            specialist_item_id("Dr. A"),
            "Dr. A",
            at(9, 10),
            at(9, 40),
        )]]);

        let merged = merge(&previous, &input);

        let names: Vec<_> = merged.lanes.iter().filter_map(Lane::name).collect();
        assert_eq!(names, vec!["Dr. A", "Dr. B"]);
        assert_eq!(
            merged.lanes[0].items[0].interval(),
            Some((at(9, 10), at(9, 40)))
        );
    }

    #[test]
    fn test_new_specialist_defaults_to_window_with_catalogue_color() {
        let links = vec![SpecialistLink::new("Dr. B")];
        let catalogue = vec![Specialist {
            name: "Dr. B".into(),
            color: Some(RgbColor::new(0, 0, 200)),
        }];
        let input = MergeInput {
            specialist_links: &links,
            specialists: &catalogue,
            ..MergeInput::new(window())
        };

        let merged = merge(&CalendarStructure::empty(), &input);
        let item = &merged.lanes[0].items[0];
        assert_eq!(item.id, "specialistLinks-Dr. B");
        assert_eq!(item.interval(), Some((at(9, 0), at(10, 0))));
        assert_eq!(item.color, Some(RgbColor::new(0, 0, 200)));
    }

    #[test]
    fn test_specialist_link_interval_is_used_when_present() {
        let links = vec![SpecialistLink {
            specialist_name: "Dr. C".into(),
            start: Some(at(9, 10)),
            end: Some(at(9, 25)),
        }];
        let input = MergeInput {
            specialist_links: &links,
            ..MergeInput::new(window())
        };

        let merged = merge(&CalendarStructure::empty(), &input);
        assert_eq!(
            merged.lanes[0].items[0].interval(),
            Some((at(9, 10), at(9, 25)))
        );
    }

    #[test]
    fn test_removed_specialist_lane_is_dropped() {
        let previous = CalendarStructure::from(vec![
            vec![TimedItem::new(specialist_item_id("Dr. A"), "Dr. A", at(9, 0), at(9, 20))],
            vec![TimedItem::new(specialist_item_id("Dr. B"), "Dr. B", at(9, 0), at(9, 40))],
        ]);
        let links = vec![SpecialistLink::new("Dr. B")];
        let input = MergeInput {
            specialist_links: &links,
            ..MergeInput::new(window())
        };

        let merged = merge(&previous, &input);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.lanes[0].name(), Some("Dr. B"));
        assert_eq!(
            merged.lanes[0].items[0].interval(),
            Some((at(9, 0), at(9, 40)))
        );
    }

    #[test]
    fn test_multiple_instances_stay_in_one_lane() {
        let id = specialist_item_id("Dr. A");
        let previous = CalendarStructure::from(vec![vec![
            TimedItem::new(id.clone(), "Dr. A", at(9, 0), at(9, 10)),
            TimedItem::new(format!("{}#2", id), "Dr. A", at(9, 30), at(9, 40)),
        ]]);
        let links = vec![SpecialistLink::new("Dr. A")];
        let input = MergeInput {
            specialist_links: &links,
            ..MergeInput::new(window())
        };

        let merged = merge(&previous, &input);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.lanes[0].items.len(), 2);
    }

    #[test]
    fn test_resources_follow_specialists_and_use_code() {
        let patient = PatientParticipant::new("Jane", None);
        let specialists = vec![SpecialistLink::new("Dr. A")];
        let resources = vec![
            ResourceLink::with_code("ROOM1"),
            ResourceLink {
                resource_code: None,
                resource: Some("BOOTH".into()),
                start: None,
                end: None,
            },
        ];
        let input = MergeInput {
            patient: Some(&patient),
            specialist_links: &specialists,
            resource_links: &resources,
            ..MergeInput::new(window())
        };

        let merged = merge(&CalendarStructure::empty(), &input);
        let ids: Vec<_> = merged.lanes.iter().map(|lane| lane.id().unwrap()).collect();
        assert_eq!(
            ids,
            vec![
                "patient",
                "specialistLinks-Dr. A",
                "resourceLinks-ROOM1",
                "resourceLinks-BOOTH"
            ]
        );
    }

    #[test]
    fn test_merge_is_idempotent() {
        let patient = PatientParticipant::new("Jane", None);
        let specialists = vec![SpecialistLink::new("Dr. A"), SpecialistLink::new("Dr. B")];
        let resources = vec![ResourceLink::with_code("ROOM1")];
        let input = MergeInput {
            patient: Some(&patient),
            specialist_links: &specialists,
            resource_links: &resources,
            ..MergeInput::new(window())
        };

        let once = merge(&CalendarStructure::empty(), &input);
        let twice = merge(&once, &input);
        assert_eq!(once, twice);

        let ids: Vec<_> = twice.items().map(|item| item.id.clone()).collect();
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(ids.len(), unique.len());
    }

    #[test]
    fn test_duplicate_links_produce_one_item() {
        let specialists = vec![SpecialistLink::new("Dr. A"), SpecialistLink::new("Dr. A")];
        let input = MergeInput {
            specialist_links: &specialists,
            ..MergeInput::new(window())
        };

        let merged = merge(&CalendarStructure::empty(), &input);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.lanes[0].items.len(), 1);
    }

    #[test]
    fn test_no_participants_gives_empty_structure() {
        let previous = CalendarStructure::from(vec![vec![TimedItem::new(
            "patient",
            "Jane",
            at(9, 0),
            at(9, 0) + Duration::minutes(30),
        )]]);
        let merged = merge(&previous, &MergeInput::new(window()));
        assert!(merged.is_empty());
    }
}
