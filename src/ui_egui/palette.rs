use egui::{Color32, Visuals};

fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

fn blend(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |c1: u8, c2: u8| -> u8 { ((c1 as f32 * (1.0 - t)) + (c2 as f32 * t)).round() as u8 };
    Color32::from_rgb(lerp(a.r(), b.r()), lerp(a.g(), b.g()), lerp(a.b(), b.b()))
}

#[derive(Clone, Copy, Debug)]
pub struct LaneGridPalette {
    pub header_bg: Color32,
    pub header_text: Color32,
    pub row_bg: Color32,
    pub row_alt_bg: Color32,
    pub active_row_bg: Color32,
    pub disabled_text: Color32,
    pub name_text: Color32,
    pub hour_line: Color32,
    pub slot_line: Color32,
    pub out_of_grid: Color32,
    pub item_text: Color32,
}

impl LaneGridPalette {
    pub fn from_visuals(visuals: &Visuals) -> Self {
        let background = visuals.extreme_bg_color;
        let panel = visuals.panel_fill;
        let accent = visuals.selection.bg_fill;
        let text = visuals.text_color();
        let line = visuals.widgets.noninteractive.bg_stroke.color;

        Self {
            header_bg: blend(panel, background, 0.5),
            header_text: text,
            row_bg: background,
            row_alt_bg: blend(background, panel, 0.35),
            active_row_bg: with_alpha(accent, if visuals.dark_mode { 90 } else { 60 }),
            disabled_text: visuals.weak_text_color(),
            name_text: text,
            hour_line: line,
            slot_line: with_alpha(line, 110),
            out_of_grid: if visuals.dark_mode {
                Color32::from_rgba_unmultiplied(0, 0, 0, 110)
            } else {
                Color32::from_rgba_unmultiplied(120, 120, 120, 70)
            },
            item_text: Color32::WHITE,
        }
    }
}
