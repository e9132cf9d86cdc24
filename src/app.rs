use std::sync::Arc;
use std::time::Duration;

use eframe::egui;
use frp_bond_predictor::config::AppConfig;
use frp_bond_predictor::i18n::Language;
use frp_bond_predictor::pipeline::Predictor;

use crate::fonts;
use crate::state::{AppState, Tab};
use crate::ui::{batch, individual, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct BondStrengthApp {
    pub state: AppState,
    predictor: Arc<Predictor>,
    config: AppConfig,
    cjk_font: bool,
    /// Language the window title was last set for.
    titled: Option<Language>,
}

impl BondStrengthApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig, predictor: Arc<Predictor>) -> Self {
        let cjk_font = fonts::install_cjk_fallback(&cc.egui_ctx, &config.resource_dir);
        let language = if config.language.needs_cjk_font() && !cjk_font {
            log::warn!("Falling back to English display");
            Language::English
        } else {
            config.language
        };
        Self {
            state: AppState::new(language),
            predictor,
            config,
            cjk_font,
            titled: None,
        }
    }
}

impl eframe::App for BondStrengthApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Batch events from the worker thread ----
        let lang = self.state.language;
        let notices = self
            .state
            .poll_batch(&mut |name| panels::save_file_dialog(lang, name));
        for notice in &notices {
            panels::show_notice(notice);
        }
        if self.state.is_batch_running() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        if self.titled != Some(self.state.language) {
            let title = self.state.language.strings().title;
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.to_owned()));
            self.titled = Some(self.state.language);
        }

        // ---- Top panel: menu bar and tabs ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state, self.cjk_font);
        });

        // ---- Central panel: active tab ----
        let mut notice = None;
        egui::CentralPanel::default().show(ctx, |ui| match self.state.tab {
            Tab::Home => panels::home_tab(ui, self.state.language, &self.config),
            Tab::Individual => individual::individual_tab(ui, &mut self.state, &self.predictor),
            Tab::Batch => notice = batch::batch_tab(ui, &mut self.state, &self.predictor),
        });
        if let Some(notice) = notice {
            panels::show_notice(&notice);
        }
    }
}
