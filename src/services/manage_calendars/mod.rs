//! Manage-calendars controller.
//!
//! Glue between the host's scheduling form and the lane grid. Each frame the
//! host calls [`ManageCalendars::sync`] with the current props; when a tracked
//! input changed the lane structure is rebuilt and published before
//! [`ManageCalendars::view`] lays it out.

use chrono::NaiveDate;

use crate::models::lane::{CalendarStructure, Lane};
use crate::models::participant::{
    AppointmentLink, Location, LocationRef, PatientParticipant, ResourceDefinition, ResourceLink,
    Specialist, SpecialistLink,
};
use crate::models::settings::Settings;
use crate::models::window::TimeWindow;
use crate::models::working_hours::WorkingHours;
use crate::services::grid_layout::{layout, GridLayout, HourScale, LayoutParams};
use crate::services::lane_merge::{merge, MergeInput};
use crate::services::scheduler_store::{publish_structure, CalendarDispatch, SchedulerStore};
use crate::services::working_hours::{self, GridMode};

/// Everything the host hands to the grid for one tab.
#[derive(Debug, Clone, Copy)]
pub struct ManageCalendarsProps<'a> {
    pub tab_id: &'a str,
    pub window: TimeWindow,
    pub mode: GridMode,
    /// Recurring appointments own their structure elsewhere.
    pub is_recurrence: bool,
    pub patient: Option<&'a PatientParticipant>,
    pub appointment: Option<&'a AppointmentLink>,
    pub location: Option<&'a LocationRef>,
    pub locations: &'a [Location],
    pub specialist_links: &'a [SpecialistLink],
    pub specialists: &'a [Specialist],
    pub resource_links: &'a [ResourceLink],
    pub resources: &'a [ResourceDefinition],
}

impl<'a> ManageCalendarsProps<'a> {
    pub fn merge_input(&self) -> MergeInput<'a> {
        MergeInput {
            window: self.window,
            patient: self.patient,
            appointment: self.appointment,
            location: self.location,
            locations: self.locations,
            specialist_links: self.specialist_links,
            specialists: self.specialists,
            resource_links: self.resource_links,
            resources: self.resources,
        }
    }
}

/// Owned copy of the inputs whose change triggers a rebuild.
#[derive(Debug, Clone, PartialEq)]
struct TrackedInputs {
    tab_id: String,
    mode: GridMode,
    window: TimeWindow,
    patient: Option<PatientParticipant>,
    location: Option<LocationRef>,
    specialist_links: Vec<SpecialistLink>,
    resource_links: Vec<ResourceLink>,
}

impl TrackedInputs {
    fn capture(props: &ManageCalendarsProps<'_>) -> Self {
        Self {
            tab_id: props.tab_id.to_string(),
            mode: props.mode,
            window: props.window,
            patient: props.patient.cloned(),
            location: props.location.cloned(),
            specialist_links: props.specialist_links.to_vec(),
            resource_links: props.resource_links.to_vec(),
        }
    }
}

/// What a sync pass did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// No tracked input changed.
    Unchanged,
    /// A merged structure with this many lanes was published.
    Published(usize),
    /// The window collapsed and the tab's structure was emptied.
    Cleared,
    /// Recurrence mode: the structure is left alone.
    Suppressed,
}

/// Rebuild the structure for `props` and publish it through `dispatch`.
///
/// Collapsed windows empty the tab unless recurrence is on. Outside
/// availability mode a recurring appointment never publishes.
pub fn recompute<D: CalendarDispatch + ?Sized>(
    props: &ManageCalendarsProps<'_>,
    previous: &CalendarStructure,
    dispatch: &mut D,
) -> SyncOutcome {
    if props.window.is_collapsed() {
        if props.is_recurrence {
            return SyncOutcome::Suppressed;
        }
        log::debug!("Tab {}: window collapsed, clearing lanes", props.tab_id);
        publish_structure(dispatch, props.tab_id, props.mode, CalendarStructure::empty());
        return SyncOutcome::Cleared;
    }

    if props.mode == GridMode::Scheduling && props.is_recurrence {
        return SyncOutcome::Suppressed;
    }

    let merged = merge(previous, &props.merge_input());

    let lanes = merged.len();
    publish_structure(dispatch, props.tab_id, props.mode, merged);
    SyncOutcome::Published(lanes)
}

/// Day used to pick availability working hours.
fn reference_day(store: &SchedulerStore, props: &ManageCalendarsProps<'_>) -> NaiveDate {
    store
        .structure(props.tab_id, GridMode::Availability)
        .items()
        .next()
        .and_then(|item| item.start)
        .unwrap_or(props.window.start)
        .date_naive()
}

pub struct ManageCalendars {
    scale: HourScale,
    tracked: Option<TrackedInputs>,
    working_hours: Option<WorkingHours>,
}

impl ManageCalendars {
    pub fn new(settings: &Settings) -> Self {
        Self {
            scale: HourScale::from_settings(settings),
            tracked: None,
            working_hours: None,
        }
    }

    pub fn scale(&self) -> HourScale {
        self.scale
    }

    pub fn working_hours(&self) -> Option<&WorkingHours> {
        self.working_hours.as_ref()
    }

    /// Bring the store up to date with `props`.
    ///
    /// Working hours are resolved on every call; the merge only runs when a
    /// tracked input changed since the previous call.
    pub fn sync(&mut self, props: &ManageCalendarsProps<'_>, store: &mut SchedulerStore) -> SyncOutcome {
        let tracked = TrackedInputs::capture(props);
        let outcome = if self.tracked.as_ref() == Some(&tracked) {
            SyncOutcome::Unchanged
        } else {
            let previous = store.structure(props.tab_id, props.mode).clone();
            let outcome = recompute(props, &previous, store);
            self.tracked = Some(tracked);
            outcome
        };

        self.working_hours = props.location.and_then(|location| {
            working_hours::resolve(
                store.working_hours(props.tab_id, props.mode),
                location.code(),
                reference_day(store, props),
                props.mode,
            )
            .cloned()
        });

        outcome
    }

    /// Geometry of the tab's current structure.
    pub fn view(
        &self,
        props: &ManageCalendarsProps<'_>,
        store: &SchedulerStore,
        selected_lane: Option<&str>,
    ) -> GridLayout {
        let params = LayoutParams {
            window: props.window,
            working_hours: self.working_hours.as_ref(),
            scale: self.scale,
            mode: props.mode,
            use_24_hour_clock: store.settings().uses_24_hour_clock(),
        };
        layout(&params, store.structure(props.tab_id, props.mode), selected_lane)
    }

    pub fn plus_resize(&mut self) {
        self.scale.plus();
    }

    pub fn minus_resize(&mut self) -> bool {
        self.scale.minus()
    }

    /// Forward a clicked lane to the host.
    ///
    /// Returns true when the edit view should be opened, which is never the
    /// case when the grid is already embedded in it or the lane is disabled.
    pub fn select_lane<D: CalendarDispatch + ?Sized>(
        &self,
        tab_id: &str,
        mode: GridMode,
        lane: &Lane,
        embedded: bool,
        dispatch: &mut D,
    ) -> bool {
        if mode.is_availability() && lane.is_patient() {
            return false;
        }
        dispatch.set_item_calendar(tab_id, lane.items.clone());
        log::debug!("Tab {}: selected lane {:?}", tab_id, lane.id());
        !embedded
    }
}
