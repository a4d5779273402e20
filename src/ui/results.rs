use eframe::egui::{ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Results list (central panel)
// ---------------------------------------------------------------------------

/// Render the matched airports in the central panel.
pub fn results_panel(ui: &mut Ui, state: &AppState) {
    let Some(results) = &state.results else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Search for airports, or Show All to list every record");
        });
        return;
    };

    ui.label(format!("Number of results: {}", results.len()));
    ui.separator();

    // The full dataset runs to thousands of rows; only lay out what is
    // actually on screen.
    let row_height = ui.text_style_height(&eframe::egui::TextStyle::Body);
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show_rows(ui, row_height, results.len(), |ui: &mut Ui, range| {
            for row in range {
                ui.label(&results[row]);
            }
        });
}
