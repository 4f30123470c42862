//! Lane grid rendering.
//!
//! Paints a precomputed [`GridLayout`]: lane names down the left, then a
//! horizontally scrolling strip with the tick header, one row per lane, the
//! positioned items and the out-of-grid shading. All geometry comes from the
//! layout; this module only adds row heights and margins.

use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Vec2};

use crate::services::grid_layout::{GridLayout, OverflowSide, PositionedItem};
use crate::ui_egui::palette::LaneGridPalette;

pub const ROW_HEIGHT: f32 = 34.0;
pub const HEADER_HEIGHT: f32 = 26.0;
pub const NAME_WIDTH: f32 = 150.0;
const ITEM_MARGIN: f32 = 4.0;

/// What the user did on the grid this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAction {
    /// Index into `GridLayout::rows`.
    SelectLane(usize),
    ZoomIn,
    ZoomOut,
}

/// Render `grid` and report at most one interaction.
///
/// `scroll_to_start` snaps the strip to the window start; hosts set it on the
/// first frame and after the structure was rebuilt.
pub fn render_lane_grid(
    ui: &mut egui::Ui,
    id_salt: &str,
    grid: &GridLayout,
    palette: &LaneGridPalette,
    scroll_to_start: bool,
) -> Option<GridAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        if ui.button("−").on_hover_text("Zoom out").clicked() {
            action = Some(GridAction::ZoomOut);
        }
        if ui.button("+").on_hover_text("Zoom in").clicked() {
            action = Some(GridAction::ZoomIn);
        }
    });

    ui.horizontal_top(|ui| {
        ui.spacing_mut().item_spacing = Vec2::ZERO;

        if let Some(row) = render_names(ui, id_salt, grid, palette) {
            action = Some(GridAction::SelectLane(row));
        }

        let mut scroll = egui::ScrollArea::horizontal().id_source(("lane_grid", id_salt));
        if scroll_to_start {
            scroll = scroll.horizontal_scroll_offset(grid.initial_scroll);
        }
        scroll.show(ui, |ui| {
            if let Some(row) = render_strip(ui, id_salt, grid, palette) {
                action = Some(GridAction::SelectLane(row));
            }
        });
    });

    action
}

fn grid_height(grid: &GridLayout) -> f32 {
    HEADER_HEIGHT + grid.rows.len() as f32 * ROW_HEIGHT
}

fn row_rect(origin: Pos2, index: usize, width: f32) -> Rect {
    Rect::from_min_size(
        Pos2::new(origin.x, origin.y + HEADER_HEIGHT + index as f32 * ROW_HEIGHT),
        Vec2::new(width, ROW_HEIGHT),
    )
}

fn row_fill(palette: &LaneGridPalette, index: usize, active: bool) -> Color32 {
    if active {
        palette.active_row_bg
    } else if index % 2 == 1 {
        palette.row_alt_bg
    } else {
        palette.row_bg
    }
}

fn render_names(
    ui: &mut egui::Ui,
    id_salt: &str,
    grid: &GridLayout,
    palette: &LaneGridPalette,
) -> Option<usize> {
    let (rect, _) = ui.allocate_exact_size(Vec2::new(NAME_WIDTH, grid_height(grid)), Sense::hover());
    let painter = ui.painter_at(rect);
    let mut clicked = None;

    painter.rect_filled(
        Rect::from_min_size(rect.min, Vec2::new(NAME_WIDTH, HEADER_HEIGHT)),
        0.0,
        palette.header_bg,
    );

    for (index, row) in grid.rows.iter().enumerate() {
        let cell = row_rect(rect.min, index, NAME_WIDTH);
        painter.rect_filled(cell, 0.0, row_fill(palette, index, row.active));

        let color = if row.disabled {
            palette.disabled_text
        } else {
            palette.name_text
        };
        painter.text(
            Pos2::new(cell.left() + 8.0, cell.center().y),
            Align2::LEFT_CENTER,
            &row.name,
            FontId::proportional(13.0),
            color,
        );

        let sense = if row.disabled { Sense::hover() } else { Sense::click() };
        let response = ui.interact(cell, ui.id().with((id_salt, "name", index)), sense);
        if response.clicked() {
            clicked = Some(index);
        }
    }

    clicked
}

fn render_strip(
    ui: &mut egui::Ui,
    id_salt: &str,
    grid: &GridLayout,
    palette: &LaneGridPalette,
) -> Option<usize> {
    let size = Vec2::new(grid.row_width.max(grid.tick_width), grid_height(grid));
    let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter_at(rect);
    let mut clicked = None;

    painter.rect_filled(
        Rect::from_min_size(rect.min, Vec2::new(size.x, HEADER_HEIGHT)),
        0.0,
        palette.header_bg,
    );

    for (index, row) in grid.rows.iter().enumerate() {
        let cell = row_rect(rect.min, index, size.x);
        painter.rect_filled(cell, 0.0, row_fill(palette, index, row.active));

        let sense = if row.disabled { Sense::hover() } else { Sense::click() };
        let response = ui.interact(cell, ui.id().with((id_salt, "row", index)), sense);
        if response.clicked() {
            clicked = Some(index);
        }
    }

    for tick in &grid.ticks {
        let x = rect.left() + tick.left;
        let (top, stroke) = if tick.is_hour {
            (rect.top(), Stroke::new(1.0, palette.hour_line))
        } else {
            (rect.top() + HEADER_HEIGHT * 0.6, Stroke::new(1.0, palette.slot_line))
        };
        painter.line_segment([Pos2::new(x, top), Pos2::new(x, rect.bottom())], stroke);

        if let Some(label) = &tick.label {
            let text = match &tick.suffix {
                Some(suffix) => format!("{} {}", label, suffix),
                None => label.clone(),
            };
            painter.text(
                Pos2::new(x + 4.0, rect.top() + HEADER_HEIGHT / 2.0),
                Align2::LEFT_CENTER,
                text,
                FontId::proportional(11.0),
                palette.header_text,
            );
        }
    }

    for (index, row) in grid.rows.iter().enumerate() {
        let cell = row_rect(rect.min, index, size.x);
        for item in &row.items {
            paint_item(ui, cell, item, palette);
        }
    }

    if let Some(block) = grid.out_of_grid {
        let left = match block.side {
            OverflowSide::Left => rect.left(),
            OverflowSide::Right => rect.left() + grid.row_width - block.width,
        };
        let shade = Rect::from_min_size(
            Pos2::new(left, rect.top() + HEADER_HEIGHT),
            Vec2::new(block.width, size.y - HEADER_HEIGHT),
        );
        painter.rect_filled(shade, 0.0, palette.out_of_grid);
    }

    clicked
}

fn paint_item(ui: &egui::Ui, cell: Rect, item: &PositionedItem, palette: &LaneGridPalette) {
    let fill = Color32::from(item.background);
    let block = Rect::from_min_size(
        Pos2::new(cell.left() + item.left, cell.top() + ITEM_MARGIN),
        Vec2::new(item.width.max(2.0), cell.height() - ITEM_MARGIN * 2.0),
    );
    let painter = ui.painter_at(cell);
    painter.rect_filled(block, 3.0, fill);
    painter.rect_filled(
        Rect::from_min_size(block.min, Vec2::new(3.0_f32.min(block.width()), block.height())),
        3.0,
        fill.linear_multiply(0.7),
    );

    let text = format!("{}  {}", item.name, item.duration_label);
    let job = egui::text::LayoutJob::simple_singleline(
        text,
        FontId::proportional(12.0),
        palette.item_text,
    );
    let galley = ui.fonts(|fonts| fonts.layout_job(job));
    let clip = block.shrink2(Vec2::new(6.0, 0.0));
    painter.with_clip_rect(clip).galley(
        Pos2::new(clip.left(), block.center().y - galley.size().y / 2.0),
        galley,
        palette.item_text,
    );
}
