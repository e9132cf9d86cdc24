use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, Ui};
use frp_bond_predictor::pipeline::Predictor;

use crate::state::{AppState, BatchStatus, Notice};
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// Batch prediction tab
// ---------------------------------------------------------------------------

/// Render the batch tab. Returns a notice when starting a run needs one.
pub fn batch_tab(ui: &mut Ui, state: &mut AppState, predictor: &Arc<Predictor>) -> Option<Notice> {
    let lang = state.language;
    let s = lang.strings();
    let running = state.is_batch_running();
    let mut notice = None;

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(RichText::new(s.batch_title).size(20.0).strong());
        ui.add_space(20.0);

        ui.horizontal(|ui: &mut Ui| {
            ui.label(s.select_file);
            let mut shown = state
                .selected_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            ui.add_enabled(
                false,
                egui::TextEdit::singleline(&mut shown).desired_width(420.0),
            );
            if ui.add_enabled(!running, egui::Button::new(s.browse)).clicked() {
                if let Some(path) = panels::open_file_dialog(lang) {
                    state.select_file(path);
                }
            }
        });
        ui.add_space(20.0);

        let run = ui.add_enabled(
            !running,
            egui::Button::new(RichText::new(s.batch_button).strong()),
        );
        if run.clicked() {
            let ctx = ui.ctx().clone();
            notice = state.start_batch(Arc::clone(predictor), move || ctx.request_repaint());
        }
        ui.add_space(10.0);

        let color = match state.batch_status {
            BatchStatus::Failed(_) => Color32::RED,
            _ => ui.visuals().text_color(),
        };
        ui.label(RichText::new(state.batch_status.text(lang)).size(12.0).color(color));
        if state.is_batch_running() {
            ui.add(egui::Spinner::new().size(24.0));
        }
    });

    if let Some(report) = &state.last_report {
        ui.separator();
        ui.label(RichText::new(s.preview_title).strong());
        if report.out_of_range_rows > 0 {
            ui.label(
                RichText::new(format!("{} {}", report.out_of_range_rows, s.out_of_range_rows))
                    .color(Color32::YELLOW),
            );
        }
        plot::prediction_plot(ui, report, lang);
    }

    notice
}
