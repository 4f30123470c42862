mod app;
mod edit_dialog;
pub mod grid;
pub mod palette;
mod scenario;

pub use app::LaneCalendarApp;
pub use edit_dialog::{render_edit_dialog, DialogAction};
pub use grid::{render_lane_grid, GridAction};
pub use scenario::Scenario;
