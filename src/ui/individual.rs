use eframe::egui::{self, Color32, ComboBox, RichText, Ui};
use frp_bond_predictor::features::{Categorical, Feature, FormInput};
use frp_bond_predictor::i18n::Language;
use frp_bond_predictor::pipeline::Predictor;

use crate::state::{AppState, PredictionDisplay};

const RESULT_COLOR: Color32 = Color32::from_rgb(0x4a, 0x90, 0xe2);

// ---------------------------------------------------------------------------
// Individual prediction tab
// ---------------------------------------------------------------------------

pub fn individual_tab(ui: &mut Ui, state: &mut AppState, predictor: &Predictor) {
    let lang = state.language;
    let s = lang.strings();

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(RichText::new(s.title).size(20.0).strong());
    });
    ui.add_space(20.0);

    egui::Grid::new("feature_form")
        .num_columns(3)
        .spacing([10.0, 10.0])
        .show(ui, |ui: &mut Ui| {
            for feature in Feature::ALL {
                ui.label(feature.label(lang));
                feature_input(ui, &mut state.form, feature, lang);
                ui.label(feature.unit());
                ui.end_row();
            }
        });

    ui.add_space(20.0);
    ui.vertical_centered(|ui: &mut Ui| {
        if ui.button(RichText::new(s.predict_button).strong()).clicked() {
            state.predict(predictor);
        }
        ui.add_space(20.0);

        let text = state.result.text(lang);
        let color = match state.result {
            PredictionDisplay::Value(_) => RESULT_COLOR,
            _ => Color32::RED,
        };
        ui.label(RichText::new(text).size(14.0).strong().color(color));
    });
}

/// Text box for continuous features, drop-down for categorical ones.
fn feature_input(ui: &mut Ui, form: &mut FormInput, feature: Feature, lang: Language) {
    match feature {
        Feature::FailureMode => category_combo(ui, feature, &mut form.failure_mode, lang),
        Feature::FrpType => category_combo(ui, feature, &mut form.frp_type, lang),
        Feature::BarSurface => category_combo(ui, feature, &mut form.bar_surface, lang),
        _ => {
            if let Some(text) = form.text_mut(feature) {
                ui.add(egui::TextEdit::singleline(text).desired_width(260.0));
            }
        }
    }
}

fn category_combo<C: Categorical>(ui: &mut Ui, feature: Feature, value: &mut C, lang: Language) {
    ComboBox::from_id_salt(feature.symbol())
        .width(260.0)
        .selected_text(value.display(lang))
        .show_ui(ui, |ui: &mut Ui| {
            for option in C::ALL {
                ui.selectable_value(value, *option, option.display(lang));
            }
        });
}
