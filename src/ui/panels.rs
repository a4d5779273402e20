use eframe::egui::{self, Color32, RichText, ScrollArea, TextEdit, Ui};

use crate::data::export::export_results;
use crate::data::model::DstArea;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – the search form
// ---------------------------------------------------------------------------

/// Render the search form panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Airport Search");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Airport name");
            ui.text_edit_singleline(&mut state.form.airport_name);

            ui.strong("City name");
            ui.text_edit_singleline(&mut state.form.city_name);

            ui.strong("Country");
            country_combo(ui, state);

            ui.horizontal(|ui: &mut Ui| {
                ui.vertical(|ui: &mut Ui| {
                    ui.strong("IATA/FAA");
                    ui.add(
                        TextEdit::singleline(&mut state.form.iata_code)
                            .desired_width(60.0)
                            .char_limit(3),
                    );
                });
                ui.vertical(|ui: &mut Ui| {
                    ui.strong("ICAO");
                    ui.add(
                        TextEdit::singleline(&mut state.form.icao_code)
                            .desired_width(60.0)
                            .char_limit(4),
                    );
                });
            });

            ui.strong("Latitude");
            ui.text_edit_singleline(&mut state.form.latitude);
            ui.strong("Longitude");
            ui.text_edit_singleline(&mut state.form.longitude);

            ui.horizontal(|ui: &mut Ui| {
                ui.vertical(|ui: &mut Ui| {
                    ui.strong("Elevation (ft)");
                    ui.add(
                        TextEdit::singleline(&mut state.form.elevation).desired_width(80.0),
                    );
                });
                ui.vertical(|ui: &mut Ui| {
                    ui.strong("UTC offset");
                    ui.add(
                        TextEdit::singleline(&mut state.form.utc_offset).desired_width(60.0),
                    );
                });
            });

            ui.strong("DST area");
            dst_combo(ui, state);

            ui.add_space(8.0);
            ui.separator();

            // ---- Action buttons ----
            ui.horizontal(|ui: &mut Ui| {
                let idle = !state.loading;
                if ui.add_enabled(idle, egui::Button::new("Search")).clicked() {
                    state.start_search();
                }
                if ui.add_enabled(idle, egui::Button::new("Show All")).clicked() {
                    state.start_show_all();
                }
                if ui.button("Clear").clicked() {
                    state.clear();
                }
            });

            if state.loading {
                ui.horizontal(|ui: &mut Ui| {
                    ui.spinner();
                    ui.label("Fetching airport data…");
                });
            }
        });
}

/// Country dropdown: `ALL` plus the unique countries of the loaded dataset.
fn country_combo(ui: &mut Ui, state: &mut AppState) {
    let selected = if state.form.country_name.is_empty() {
        "–".to_owned()
    } else {
        state.form.country_name.clone()
    };

    egui::ComboBox::from_id_salt("country_name")
        .selected_text(selected)
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(state.form.country_name.is_empty(), "–")
                .clicked()
            {
                state.form.country_name.clear();
            }
            if ui
                .selectable_label(state.form.country_name == "ALL", "ALL")
                .clicked()
            {
                state.form.country_name = "ALL".to_owned();
            }
            if let Some(dataset) = &state.dataset {
                for country in &dataset.countries {
                    if ui
                        .selectable_label(state.form.country_name == *country, country)
                        .clicked()
                    {
                        state.form.country_name = country.clone();
                    }
                }
            }
        });
}

/// DST dropdown over the fixed label set.
fn dst_combo(ui: &mut Ui, state: &mut AppState) {
    let selected = if state.form.dst_area.is_empty() {
        "–".to_owned()
    } else {
        state.form.dst_area.clone()
    };

    egui::ComboBox::from_id_salt("dst_area")
        .selected_text(selected)
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(state.form.dst_area.is_empty(), "–")
                .clicked()
            {
                state.form.dst_area.clear();
            }
            for label in DstArea::LABELS {
                if ui
                    .selectable_label(state.form.dst_area == label, label)
                    .clicked()
                {
                    state.form.dst_area = label.to_owned();
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / status bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            let exportable = state.results.as_ref().is_some_and(|r| !r.is_empty());
            if ui
                .add_enabled(exportable, egui::Button::new("Export results…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(dataset) = &state.dataset {
            ui.label(format!("{} airports loaded", dataset.len()));
            ui.separator();
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Export dialog
// ---------------------------------------------------------------------------

/// Pick a destination with a native save dialog and write the current
/// results to it. Cancelling the dialog is a no-op.
pub fn export_dialog(state: &mut AppState) {
    let Some(results) = &state.results else { return };
    if results.is_empty() {
        state.status_message = Some("Will not export with no results".to_owned());
        return;
    }

    let file = rfd::FileDialog::new()
        .set_title("Export search results")
        .set_file_name("results_export.dat")
        .add_filter("Data file", &["dat", "txt"])
        .save_file();

    if let Some(path) = file {
        match export_results(&path, results) {
            Ok(()) => {
                state.status_message =
                    Some(format!("Exported {} results to {}", results.len(), path.display()));
            }
            Err(e) => {
                log::error!("export failed: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
