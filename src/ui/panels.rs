use std::path::PathBuf;

use eframe::egui::{self, RichText, ScrollArea, Ui};
use frp_bond_predictor::config::AppConfig;
use frp_bond_predictor::i18n::Language;

use crate::state::{AppState, Notice, NoticeLevel, Tab};

/// Optional figures shown on the home tab: (file, caption selector).
const FIGURES: [(&str, fn(Language) -> &'static str); 2] = [
    ("experiment_diagram.jpg", |l| l.strings().experiment_diagram_desc),
    ("dt_model_structure.jpg", |l| l.strings().dt_model_structure_desc),
];

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the menu bar and the tab selector.
pub fn top_bar(ui: &mut Ui, state: &mut AppState, cjk_font: bool) {
    let s = state.language.strings();
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button(s.language_menu, |ui: &mut Ui| {
            for lang in Language::ALL {
                let usable = cjk_font || !lang.needs_cjk_font();
                let item = ui
                    .add_enabled(
                        usable,
                        egui::SelectableLabel::new(state.language == lang, lang.menu_label()),
                    )
                    .on_disabled_hover_text("No CJK font installed");
                if item.clicked() {
                    log::info!("Language switched to {lang:?}");
                    state.language = lang;
                    ui.close_menu();
                }
            }
        });
    });

    ui.horizontal(|ui: &mut Ui| {
        let s = state.language.strings();
        ui.selectable_value(&mut state.tab, Tab::Home, s.tab_home);
        ui.selectable_value(&mut state.tab, Tab::Individual, s.tab_individual);
        ui.selectable_value(&mut state.tab, Tab::Batch, s.tab_batch);
    });
}

// ---------------------------------------------------------------------------
// Home tab
// ---------------------------------------------------------------------------

/// Instructions on the left, optional figures on the right.
pub fn home_tab(ui: &mut Ui, lang: Language, config: &AppConfig) {
    let s = lang.strings();
    ui.columns(2, |cols| {
        ScrollArea::vertical()
            .id_salt("instructions")
            .auto_shrink([false, false])
            .show(&mut cols[0], |ui: &mut Ui| {
                ui.label(RichText::new(s.instructions).size(14.0));
            });

        let ui = &mut cols[1];
        for (file, caption) in FIGURES {
            let path = config.resource(file);
            if !path.is_file() {
                continue;
            }
            ui.vertical_centered(|ui: &mut Ui| {
                ui.add(
                    egui::Image::new(format!("file://{}", path.display()))
                        .max_width(400.0)
                        .max_height(300.0),
                );
                ui.label(RichText::new(caption(lang)).size(12.0));
            });
            ui.add_space(10.0);
        }
    });
}

// ---------------------------------------------------------------------------
// Dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(lang: Language) -> Option<PathBuf> {
    let s = lang.strings();
    rfd::FileDialog::new()
        .set_title(s.open_title)
        .add_filter(s.spreadsheet_filter, &["xlsx", "xls", "xlsm", "ods"])
        .add_filter("CSV", &["csv"])
        .pick_file()
}

/// Ask for the results destination. A name typed without extension gets
/// `.xlsx`.
pub fn save_file_dialog(lang: Language, suggested_name: &str) -> Option<PathBuf> {
    let s = lang.strings();
    let mut path = rfd::FileDialog::new()
        .set_title(s.save_title)
        .set_file_name(suggested_name)
        .add_filter(s.spreadsheet_filter, &["xlsx"])
        .add_filter("CSV", &["csv"])
        .save_file()?;
    if path.extension().is_none() {
        path.set_extension("xlsx");
    }
    Some(path)
}

pub fn show_notice(notice: &Notice) {
    let level = match notice.level {
        NoticeLevel::Info => rfd::MessageLevel::Info,
        NoticeLevel::Warning => rfd::MessageLevel::Warning,
        NoticeLevel::Error => rfd::MessageLevel::Error,
    };
    rfd::MessageDialog::new()
        .set_level(level)
        .set_title(&notice.title)
        .set_description(&notice.message)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}
