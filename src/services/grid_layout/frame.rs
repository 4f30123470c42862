//! Time anchors of the grid: where minute zero sits and how far it runs.

use chrono::{DateTime, Duration, Utc};

use crate::models::window::TimeWindow;
use crate::models::working_hours::WorkingHours;
use crate::services::working_hours::GridMode;
use crate::utils::date::{minutes_between, start_of_day};

/// Minutes of lead-in drawn before the first meaningful tick.
pub const LEAD_IN_MINUTES: i64 = 45;
/// Ticks always added on top of the visible span.
pub const LEAD_IN_TICKS: usize = 6;

/// Which edge of the row the out-of-grid block hugs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverflowSide {
    Left,
    Right,
}

/// Portion of the window outside the location's working hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfGrid {
    pub minutes: i64,
    pub side: OverflowSide,
}

impl OutOfGrid {
    /// A late window end takes precedence over an early window start.
    pub fn compute(window: &TimeWindow, hours: &WorkingHours) -> Option<Self> {
        if window.end > hours.end {
            Some(Self {
                minutes: minutes_between(hours.end, window.end),
                side: OverflowSide::Right,
            })
        } else if window.start < hours.start {
            Some(Self {
                minutes: minutes_between(window.start, hours.start),
                side: OverflowSide::Left,
            })
        } else {
            None
        }
    }

    /// Minutes the grid is shifted left by an early start.
    pub fn left_minutes(block: Option<Self>) -> i64 {
        match block {
            Some(Self {
                minutes,
                side: OverflowSide::Left,
            }) => minutes,
            _ => 0,
        }
    }

    /// Minutes covered by the shaded block, lead-in included.
    pub fn block_minutes(&self) -> i64 {
        self.minutes + LEAD_IN_MINUTES
    }
}

/// How tick labels are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelStyle {
    /// Wall-clock hours.
    Clock { use_24_hour_clock: bool },
    /// Hours elapsed since the window start ("0 HR", "1 HR", ...).
    Elapsed,
}

/// Anchors and span for one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridFrame {
    /// Instant at pixel zero for items.
    pub item_anchor: DateTime<Utc>,
    /// Instant of tick zero.
    pub tick_anchor: DateTime<Utc>,
    /// Minutes covered beyond the lead-in ticks.
    pub span_minutes: i64,
    pub out_of_grid: Option<OutOfGrid>,
    pub labels: LabelStyle,
}

impl GridFrame {
    pub fn new(
        window: &TimeWindow,
        hours: Option<&WorkingHours>,
        mode: GridMode,
        use_24_hour_clock: bool,
    ) -> Self {
        let lead_in = Duration::minutes(LEAD_IN_MINUTES);
        let out_of_grid = hours.and_then(|hours| OutOfGrid::compute(window, hours));

        match (mode, hours) {
            (GridMode::Scheduling, Some(hours)) => {
                let left = OutOfGrid::left_minutes(out_of_grid);
                let base = start_of_day(window.start)
                    + Duration::hours(hours.start_hour() as i64)
                    - lead_in
                    - Duration::minutes(left);
                let tick_anchor = base + Duration::minutes(left % 60);
                Self {
                    item_anchor: base,
                    tick_anchor,
                    span_minutes: hours.span_minutes() + out_of_grid.map_or(0, |o| o.minutes),
                    out_of_grid,
                    labels: LabelStyle::Clock { use_24_hour_clock },
                }
            }
            (mode, _) => {
                let anchor = window.start - lead_in;
                Self {
                    item_anchor: anchor,
                    tick_anchor: anchor,
                    span_minutes: window.duration_minutes().max(0),
                    out_of_grid,
                    labels: if mode.is_availability() {
                        LabelStyle::Elapsed
                    } else {
                        LabelStyle::Clock { use_24_hour_clock }
                    },
                }
            }
        }
    }

    /// `LEAD_IN_TICKS + floor(span / step)`.
    pub fn tick_count(&self, step_minutes: u32) -> usize {
        let step = step_minutes.max(1) as i64;
        LEAD_IN_TICKS + (self.span_minutes.max(0) / step) as usize
    }

    /// Minutes from the item anchor to `at`.
    pub fn minutes_from_anchor(&self, at: DateTime<Utc>) -> i64 {
        minutes_between(self.item_anchor, at)
    }
}
