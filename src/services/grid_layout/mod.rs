//! Grid layout engine.
//!
//! Turns a lane structure into pixel geometry: the tick strip along the top,
//! one row per lane with positioned items, and the shaded out-of-grid block.
//! Layout is recomputed from scratch on every input change; zooming only
//! changes the [`HourScale`] and never the underlying times.

mod duration;
mod frame;
mod scale;

pub use duration::format_duration;
pub use frame::{GridFrame, LabelStyle, OutOfGrid, OverflowSide, LEAD_IN_MINUTES, LEAD_IN_TICKS};
pub use scale::HourScale;

use chrono::{DateTime, Duration, Timelike, Utc};

use crate::models::color::RgbColor;
use crate::models::lane::{CalendarStructure, Lane};
use crate::models::window::TimeWindow;
use crate::models::working_hours::WorkingHours;
use crate::services::working_hours::GridMode;
use crate::utils::color::legible_background;
use crate::utils::date::minutes_between;

/// One column of the tick strip.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub time: DateTime<Utc>,
    pub left: f32,
    /// True on full hours; only those carry a label.
    pub is_hour: bool,
    pub label: Option<String>,
    /// "AM"/"PM" on 12-hour clocks, "HR" on elapsed labels.
    pub suffix: Option<String>,
}

/// An item placed inside its row.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedItem {
    pub id: String,
    pub name: String,
    pub left: f32,
    pub width: f32,
    pub duration_label: String,
    pub background: RgbColor,
}

/// One lane as drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct LaneRow {
    pub lane_id: String,
    pub name: String,
    /// The lane currently open in the edit view.
    pub active: bool,
    /// The patient lane cannot be picked in availability search.
    pub disabled: bool,
    pub items: Vec<PositionedItem>,
}

/// Shaded block covering time outside working hours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutOfGridBlock {
    pub width: f32,
    pub side: OverflowSide,
}

/// Complete geometry for one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    pub ticks: Vec<Tick>,
    pub rows: Vec<LaneRow>,
    pub tick_width: f32,
    pub row_width: f32,
    pub out_of_grid: Option<OutOfGridBlock>,
    /// Horizontal scroll that brings the window start into view.
    pub initial_scroll: f32,
}

/// Inputs of a layout pass other than the structure itself.
#[derive(Debug, Clone, Copy)]
pub struct LayoutParams<'a> {
    pub window: TimeWindow,
    pub working_hours: Option<&'a WorkingHours>,
    pub scale: HourScale,
    pub mode: GridMode,
    pub use_24_hour_clock: bool,
}

impl<'a> LayoutParams<'a> {
    pub fn frame(&self) -> GridFrame {
        GridFrame::new(
            &self.window,
            self.working_hours,
            self.mode,
            self.use_24_hour_clock,
        )
    }

    /// Left offset of an instant at the current scale.
    pub fn offset_of(&self, at: DateTime<Utc>) -> f32 {
        self.scale.px(self.frame().minutes_from_anchor(at))
    }
}

/// Lay out `structure` on the grid described by `params`.
///
/// `selected_lane` is the id of the lane open in the edit view, if any.
pub fn layout(
    params: &LayoutParams<'_>,
    structure: &CalendarStructure,
    selected_lane: Option<&str>,
) -> GridLayout {
    let frame = params.frame();
    let scale = params.scale;
    let tick_width = scale.tick_width();
    let tick_count = frame.tick_count(scale.step());

    let ticks = (0..tick_count)
        .map(|index| build_tick(&frame, params.window.start, scale, index, tick_width))
        .collect();

    let rows = structure
        .lanes
        .iter()
        .filter_map(|lane| build_row(lane, &frame, params, selected_lane))
        .collect();

    GridLayout {
        ticks,
        rows,
        tick_width,
        row_width: tick_width * tick_count as f32,
        out_of_grid: frame.out_of_grid.map(|overflow| OutOfGridBlock {
            width: scale.px(overflow.block_minutes()),
            side: overflow.side,
        }),
        initial_scroll: scale.px(frame.minutes_from_anchor(params.window.start)),
    }
}

fn build_tick(
    frame: &GridFrame,
    window_start: DateTime<Utc>,
    scale: HourScale,
    index: usize,
    tick_width: f32,
) -> Tick {
    let time = frame.tick_anchor + Duration::minutes(index as i64 * scale.step() as i64);
    let left = index as f32 * tick_width;

    match frame.labels {
        LabelStyle::Clock { use_24_hour_clock } => {
            let is_hour = time.minute() == 0;
            let (label, suffix) = match (is_hour, use_24_hour_clock) {
                (false, _) => (None, None),
                (true, true) => (Some(time.format("%H:%M").to_string()), None),
                (true, false) => (
                    Some(time.format("%-I").to_string()),
                    Some(time.format("%p").to_string()),
                ),
            };
            Tick { time, left, is_hour, label, suffix }
        }
        LabelStyle::Elapsed => {
            let elapsed = minutes_between(window_start, time);
            let is_hour = elapsed >= 0 && elapsed % 60 == 0;
            Tick {
                time,
                left,
                is_hour,
                label: is_hour.then(|| (elapsed / 60).to_string()),
                suffix: is_hour.then(|| "HR".to_string()),
            }
        }
    }
}

fn build_row(
    lane: &Lane,
    frame: &GridFrame,
    params: &LayoutParams<'_>,
    selected_lane: Option<&str>,
) -> Option<LaneRow> {
    let lane_id = lane.id()?.to_string();
    let name = lane.name().unwrap_or_default().to_string();

    let items = lane
        .items
        .iter()
        .filter(|item| item.is_renderable())
        .filter_map(|item| {
            let (start, end) = item.interval()?;
            let minutes = minutes_between(start, end);
            Some(PositionedItem {
                id: item.id.clone(),
                name: item.name.clone(),
                left: params.scale.px(frame.minutes_from_anchor(start)),
                width: params.scale.px(minutes),
                duration_label: format_duration(minutes),
                background: legible_background(item.color),
            })
        })
        .collect();

    Some(LaneRow {
        active: selected_lane == Some(lane_id.as_str()),
        disabled: params.mode.is_availability() && lane.is_patient(),
        lane_id,
        name,
        items,
    })
}
