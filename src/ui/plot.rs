use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, Plot, PlotPoints, Points};
use frp_bond_predictor::batch::BatchReport;
use frp_bond_predictor::i18n::Language;

// ---------------------------------------------------------------------------
// Batch prediction preview
// ---------------------------------------------------------------------------

/// Scatter of predicted τu against 1-based input row.
pub fn prediction_plot(ui: &mut Ui, report: &BatchReport, lang: Language) {
    let s = lang.strings();
    let points: PlotPoints = report
        .predictions
        .iter()
        .enumerate()
        .map(|(i, &v)| [(i + 1) as f64, v])
        .collect();

    Plot::new("prediction_plot")
        .legend(Legend::default())
        .x_axis_label(s.row_axis)
        .y_axis_label("τu (MPa)")
        .height(260.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(points)
                    .name(s.preview_title)
                    .color(Color32::LIGHT_BLUE)
                    .radius(3.0),
            );
        });
}
