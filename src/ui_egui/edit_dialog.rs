//! Lane edit dialog.
//!
//! Entry editors on top, the modal draft's grid below. Every control feeds
//! straight into [`LaneEditor`], which republishes the draft after each edit.

use chrono::{DateTime, Utc};

use crate::services::lane_editor::{format_option, LaneEditor, ManageEntry};
use crate::services::localization::{self as keys, Localizer};
use crate::services::scheduler_store::SchedulerStore;
use crate::ui_egui::grid::{render_lane_grid, GridAction};
use crate::ui_egui::palette::LaneGridPalette;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    Saved,
    Cancelled,
}

/// Show the edit dialog for `editor`. Returns what closed it, if anything.
pub fn render_edit_dialog(
    ctx: &egui::Context,
    editor: &mut LaneEditor,
    store: &mut SchedulerStore,
    localizer: &Localizer,
    palette: &LaneGridPalette,
) -> Option<DialogAction> {
    let mut action = None;
    let mut open = editor.is_open();

    egui::Window::new(localizer.localize(keys::MODAL_TITLE))
        .collapsible(false)
        .resizable(true)
        .default_width(720.0)
        .open(&mut open)
        .show(ctx, |ui| {
            render_entries(ui, editor, store, localizer);

            ui.add_space(6.0);
            let can_add = editor.can_add_instance();
            if ui
                .add_enabled(can_add, egui::Button::new(localizer.localize(keys::ADD_INSTANCE)))
                .clicked()
            {
                editor.add_instance(store);
            }

            ui.separator();
            let grid = editor.view(store);
            match render_lane_grid(ui, "edit_dialog", &grid, palette, false) {
                Some(GridAction::SelectLane(row)) => {
                    let items = store
                        .modal_data(editor.tab_id())
                        .lanes
                        .get(row)
                        .map(|lane| lane.items.clone());
                    if let Some(items) = items {
                        editor.select_lane(items, store);
                    }
                }
                Some(GridAction::ZoomIn) => editor.plus_resize(),
                Some(GridAction::ZoomOut) => {
                    editor.minus_resize();
                }
                None => {}
            }

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button(localizer.localize(keys::BUTTON_CANCEL)).clicked() {
                    action = Some(DialogAction::Cancelled);
                }
                if ui.button(localizer.localize(keys::BUTTON_SAVE)).clicked() {
                    action = Some(DialogAction::Saved);
                }
            });
        });

    if !open && action.is_none() {
        action = Some(DialogAction::Cancelled);
    }

    match action {
        Some(DialogAction::Saved) => editor.save(store),
        Some(DialogAction::Cancelled) => editor.cancel(store),
        None => {}
    }
    action
}

fn render_entries(
    ui: &mut egui::Ui,
    editor: &mut LaneEditor,
    store: &mut SchedulerStore,
    localizer: &Localizer,
) {
    let use_24_hour_clock = store.settings().uses_24_hour_clock();
    let entries = editor.entries().to_vec();

    for (index, entry) in entries.iter().enumerate() {
        let editable = editor.is_entry_editable(index);
        ui.horizontal(|ui| {
            ui.add_enabled_ui(editable, |ui| match *entry {
                ManageEntry::Clock { start, end } => {
                    let starts = editor.start_choices(index);
                    if let Some(picked) = time_combo(
                        ui,
                        ("start", index),
                        localizer.localize(keys::START_TIME),
                        start,
                        &starts,
                        use_24_hour_clock,
                    ) {
                        editor.set_start(index, picked.time(), store);
                    }

                    let ends = editor.end_choices(index);
                    if let Some(picked) = time_combo(
                        ui,
                        ("end", index),
                        localizer.localize(keys::END_TIME),
                        end,
                        &ends,
                        use_24_hour_clock,
                    ) {
                        editor.set_end(index, picked.time(), store);
                    }
                }
                ManageEntry::Offset {
                    start_after,
                    duration,
                } => {
                    let minutes = localizer.localize(keys::INPUT_MINUTES);

                    ui.label(localizer.localize(keys::INPUT_START_AFTER));
                    let mut value = start_after;
                    let suffix = format!(" {}", minutes);
                    if ui
                        .add(egui::DragValue::new(&mut value).speed(5).suffix(suffix.as_str()))
                        .changed()
                    {
                        editor.set_start_after(index, value, store);
                    }

                    ui.label(localizer.localize(keys::INPUT_DURATION));
                    let mut value = duration;
                    if ui
                        .add(egui::DragValue::new(&mut value).speed(5).suffix(suffix.as_str()))
                        .changed()
                    {
                        editor.set_duration(index, value, store);
                    }
                }
            });

            if editor.can_remove(index) && ui.small_button("🗑").clicked() {
                editor.remove_instance(index, store);
            }
        });
    }
}

fn time_combo(
    ui: &mut egui::Ui,
    id: (&str, usize),
    label: &str,
    current: Option<DateTime<Utc>>,
    options: &[DateTime<Utc>],
    use_24_hour_clock: bool,
) -> Option<DateTime<Utc>> {
    let mut picked = None;
    let selected = current
        .map(|at| format_option(at, use_24_hour_clock))
        .unwrap_or_default();

    ui.label(label);
    egui::ComboBox::from_id_source(id)
        .selected_text(selected)
        .show_ui(ui, |ui| {
            for option in options {
                let is_current = current == Some(*option);
                if ui
                    .selectable_label(is_current, format_option(*option, use_24_hour_clock))
                    .clicked()
                {
                    picked = Some(*option);
                }
            }
        });
    picked
}
