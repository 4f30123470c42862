//! Lane edit view.
//!
//! Edits the instances of one lane. The view keeps a list of entries (one per
//! instance) and, after every change, rebases them onto the tab's latest
//! modal draft so the summary grid and the edit view never write from stale
//! copies. Nothing reaches the tab's real structure until [`LaneEditor::save`].

mod entry;
mod options;

pub use entry::ManageEntry;
pub use options::{end_options, format_option, start_options};

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::models::lane::CalendarStructure;
use crate::models::timed_item::TimedItem;
use crate::models::window::TimeWindow;
use crate::models::working_hours::WorkingHours;
use crate::services::grid_layout::{layout, GridLayout, HourScale, LayoutParams};
use crate::services::scheduler_store::{publish_structure, CalendarDispatch, SchedulerStore};
use crate::services::working_hours::GridMode;

/// Minimum gap between availability instances, and their minimum duration.
pub const INSTANCE_GAP_MINUTES: i64 = 5;
/// A clock start this close after the previous end counts as overlapping.
pub const OVERLAP_TOLERANCE_MINUTES: i64 = 4;
/// Availability instances cannot be added this close to the window end.
pub const ADD_INSTANCE_MARGIN_MINUTES: i64 = 10;

/// Id of the `index`-th instance of the lane whose first item is `lane_id`.
pub fn instance_id(lane_id: &str, index: usize) -> String {
    if index == 0 {
        lane_id.to_string()
    } else {
        format!("{}#{}", lane_id, index + 1)
    }
}

pub struct LaneEditor {
    tab_id: String,
    mode: GridMode,
    window: TimeWindow,
    appointment_day: NaiveDate,
    working_hours: Option<WorkingHours>,
    scale: HourScale,
    selection: Vec<TimedItem>,
    entries: Vec<ManageEntry>,
    open: bool,
}

impl LaneEditor {
    /// Open the edit view on `items` (one lane) and seed the modal draft from
    /// the tab's current structure.
    pub fn open(
        tab_id: &str,
        mode: GridMode,
        window: TimeWindow,
        working_hours: Option<WorkingHours>,
        scale: HourScale,
        items: Vec<TimedItem>,
        store: &mut SchedulerStore,
    ) -> Self {
        let draft = store.structure(tab_id, mode).clone();
        store.set_manage_modal_data(tab_id, draft);

        let mut editor = Self {
            tab_id: tab_id.to_string(),
            mode,
            window,
            appointment_day: window.start.date_naive(),
            working_hours,
            scale,
            entries: ManageEntry::from_items(&items, mode, &window),
            selection: items,
            open: true,
        };
        editor.rebase(store);
        log::info!(
            "Tab {}: editing lane {:?} ({} instances)",
            tab_id,
            editor.lane_id(),
            editor.entries.len()
        );
        editor
    }

    pub fn tab_id(&self) -> &str {
        &self.tab_id
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn mode(&self) -> GridMode {
        self.mode
    }

    pub fn window(&self) -> TimeWindow {
        self.window
    }

    pub fn working_hours(&self) -> Option<&WorkingHours> {
        self.working_hours.as_ref()
    }

    pub fn entries(&self) -> &[ManageEntry] {
        &self.entries
    }

    pub fn selection(&self) -> &[TimedItem] {
        &self.selection
    }

    pub fn lane_id(&self) -> Option<&str> {
        self.selection.first().map(|item| item.id.as_str())
    }

    pub fn scale(&self) -> HourScale {
        self.scale
    }

    /// Only the last entry accepts edits.
    pub fn is_entry_editable(&self, index: usize) -> bool {
        index + 1 == self.entries.len()
    }

    pub fn can_remove(&self, index: usize) -> bool {
        index > 0 && self.is_entry_editable(index)
    }

    fn window_minutes(&self) -> i64 {
        self.window.duration_minutes()
    }

    /// Earliest and latest instants the scheduling choices span. Working
    /// hours only lend their clock times; the day is the appointment's.
    pub fn bounds(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        match &self.working_hours {
            Some(hours) => {
                let open = self.on_appointment_day(hours.start.time());
                (open, open + hours.span())
            }
            None => (self.window.start, self.window.end),
        }
    }

    fn end_bound(&self) -> DateTime<Utc> {
        self.bounds().1
    }

    pub fn start_choices(&self, index: usize) -> Vec<DateTime<Utc>> {
        start_options(&self.entries, index, self.bounds())
    }

    pub fn end_choices(&self, index: usize) -> Vec<DateTime<Utc>> {
        end_options(&self.entries, index, self.bounds())
    }

    fn on_appointment_day(&self, time: NaiveTime) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.appointment_day.and_time(time))
    }

    /// Set the clock start of entry `index`. A start overlapping the previous
    /// instance or not before its own end is cleared instead.
    pub fn set_start(&mut self, index: usize, time: NaiveTime, store: &mut SchedulerStore) -> bool {
        if !self.is_entry_editable(index) {
            return false;
        }
        let value = self.on_appointment_day(time);
        let tolerance = Duration::minutes(OVERLAP_TOLERANCE_MINUTES);
        let previous_end = index
            .checked_sub(1)
            .and_then(|prev| self.entries[prev].clock_end());

        let ManageEntry::Clock { start, end } = &mut self.entries[index] else {
            return false;
        };
        let overlaps_previous = previous_end.is_some_and(|prev| value - tolerance <= prev);
        let after_own_end = end.is_some_and(|end| value >= end);
        let accepted = !overlaps_previous && !after_own_end;
        *start = accepted.then_some(value);

        self.after_change(store);
        accepted
    }

    /// Set the clock end of entry `index`; an end too close to its start is
    /// cleared instead.
    pub fn set_end(&mut self, index: usize, time: NaiveTime, store: &mut SchedulerStore) -> bool {
        if !self.is_entry_editable(index) {
            return false;
        }
        let value = self.on_appointment_day(time);
        let tolerance = Duration::minutes(OVERLAP_TOLERANCE_MINUTES);

        let ManageEntry::Clock { start, end } = &mut self.entries[index] else {
            return false;
        };
        let accepted = !start.is_some_and(|start| value - tolerance <= start);
        *end = accepted.then_some(value);

        self.after_change(store);
        accepted
    }

    /// Set the availability offset of entry `index`, clamped between the end
    /// of the previous instance plus a gap and the latest start that still
    /// fits the window.
    pub fn set_start_after(&mut self, index: usize, minutes: i64, store: &mut SchedulerStore) -> i64 {
        if !self.is_entry_editable(index) {
            return self.entries.get(index).and_then(ManageEntry::start_after).unwrap_or_default();
        }
        let min = self.earliest_start_after(index);
        let window_minutes = self.window_minutes();

        let ManageEntry::Offset { start_after, duration } = &mut self.entries[index] else {
            return 0;
        };
        let max = (window_minutes - *duration).max(min);
        *start_after = minutes.clamp(min, max);
        let applied = *start_after;

        self.after_change(store);
        applied
    }

    /// Set the availability duration of entry `index`, clamped to at least
    /// the gap and at most what is left of the window.
    pub fn set_duration(&mut self, index: usize, minutes: i64, store: &mut SchedulerStore) -> i64 {
        if !self.is_entry_editable(index) {
            return self.entries.get(index).and_then(ManageEntry::duration).unwrap_or_default();
        }
        let window_minutes = self.window_minutes();

        let ManageEntry::Offset { start_after, duration } = &mut self.entries[index] else {
            return 0;
        };
        let max = (window_minutes - *start_after).max(INSTANCE_GAP_MINUTES);
        *duration = minutes.clamp(INSTANCE_GAP_MINUTES, max);
        let applied = *duration;

        self.after_change(store);
        applied
    }

    fn earliest_start_after(&self, index: usize) -> i64 {
        index
            .checked_sub(1)
            .and_then(|prev| self.entries[prev].offset_end())
            .map_or(0, |prev_end| prev_end + INSTANCE_GAP_MINUTES)
    }

    pub fn can_add_instance(&self) -> bool {
        let Some(last) = self.entries.last() else {
            return false;
        };

        match self.mode {
            GridMode::Scheduling => {
                let is_patient = self.selection.first().is_some_and(TimedItem::is_patient);
                let all_complete = self.entries.iter().all(ManageEntry::is_complete);
                let before_bound = last.clock_end().is_some_and(|end| end < self.end_bound());
                !is_patient && all_complete && before_bound
            }
            GridMode::Availability => last
                .offset_end()
                .is_some_and(|end| end < self.window_minutes() - ADD_INSTANCE_MARGIN_MINUTES),
        }
    }

    /// Append an empty instance (scheduling) or one placed right after the
    /// last instance (availability).
    pub fn add_instance(&mut self, store: &mut SchedulerStore) -> bool {
        if !self.can_add_instance() {
            return false;
        }

        let entry = match self.mode {
            GridMode::Scheduling => ManageEntry::empty_clock(),
            GridMode::Availability => {
                let start_after = self.earliest_start_after(self.entries.len());
                ManageEntry::Offset {
                    start_after: start_after.min(self.window_minutes() - INSTANCE_GAP_MINUTES),
                    duration: INSTANCE_GAP_MINUTES,
                }
            }
        };
        self.entries.push(entry);
        self.after_change(store);
        true
    }

    pub fn remove_instance(&mut self, index: usize, store: &mut SchedulerStore) -> bool {
        if !self.can_remove(index) {
            return false;
        }
        self.entries.remove(index);
        self.after_change(store);
        true
    }

    /// Switch the edit view to another lane clicked inside it.
    pub fn select_lane(&mut self, items: Vec<TimedItem>, store: &mut SchedulerStore) -> bool {
        let Some(current) = self.lane_id() else {
            return false;
        };
        if !items.iter().any(|item| item.id != current) {
            return false;
        }
        if self.mode.is_availability() && items.first().is_some_and(TimedItem::is_patient) {
            return false;
        }

        self.entries = ManageEntry::from_items(&items, self.mode, &self.window);
        self.selection = items;
        self.rebase(store);
        true
    }

    pub fn plus_resize(&mut self) {
        self.scale.plus();
    }

    pub fn minus_resize(&mut self) -> bool {
        self.scale.minus()
    }

    /// Publish the modal draft to the tab and close.
    pub fn save(&mut self, store: &mut SchedulerStore) {
        let draft = store.modal_data(&self.tab_id).clone();
        log::info!("Tab {}: saving {} lanes from edit view", self.tab_id, draft.len());
        publish_structure(store, &self.tab_id, self.mode, draft);
        self.close(store);
    }

    /// Close without touching the tab's structure.
    pub fn cancel(&mut self, store: &mut SchedulerStore) {
        log::debug!("Tab {}: edit view cancelled", self.tab_id);
        self.close(store);
    }

    /// Drop the selection and the draft so nothing stays highlighted.
    fn close(&mut self, store: &mut SchedulerStore) {
        store.set_item_calendar(&self.tab_id, Vec::new());
        store.set_manage_modal_data(&self.tab_id, CalendarStructure::empty());
        self.open = false;
    }

    /// Geometry of the modal draft, highlighting the lane being edited.
    pub fn view(&self, store: &SchedulerStore) -> GridLayout {
        let params = LayoutParams {
            window: self.window,
            working_hours: self.working_hours.as_ref(),
            scale: self.scale,
            mode: self.mode,
            use_24_hour_clock: store.settings().uses_24_hour_clock(),
        };
        layout(&params, store.modal_data(&self.tab_id), self.lane_id())
    }

    fn after_change(&mut self, store: &mut SchedulerStore) {
        if self.mode == GridMode::Scheduling {
            if let Some(ManageEntry::Clock { start: Some(start), end }) = self.entries.first_mut() {
                if end.is_some_and(|end| end <= *start) {
                    *end = None;
                }
            }
        }
        self.rebase(store);
    }

    /// Items the entries currently describe.
    fn edited_items(&self) -> Vec<TimedItem> {
        let Some(template) = self.selection.first() else {
            return Vec::new();
        };

        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let (start, end) = entry.interval(&self.window);
                TimedItem {
                    id: instance_id(&template.id, index),
                    start,
                    end,
                    ..template.clone()
                }
            })
            .collect()
    }

    /// Replace the edited lane in the latest modal draft and publish both the
    /// draft and the new selection.
    fn rebase(&self, store: &mut SchedulerStore) {
        let Some(name) = self.selection.first().map(|item| item.name.clone()) else {
            return;
        };
        let edited = self.edited_items();

        let mut draft: CalendarStructure = store.modal_data(&self.tab_id).clone();
        for lane in draft.lanes.iter_mut() {
            if lane.name() == Some(name.as_str()) {
                lane.items = edited.clone();
            }
        }

        store.set_item_calendar(&self.tab_id, edited);
        store.set_manage_modal_data(&self.tab_id, draft);
    }
}
