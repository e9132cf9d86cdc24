mod app;
mod fonts;
mod state;
mod ui;

use std::backtrace::Backtrace;
use std::sync::Arc;

use app::BondStrengthApp;
use eframe::egui;
use frp_bond_predictor::config::AppConfig;
use frp_bond_predictor::i18n::Language;
use frp_bond_predictor::logging;
use frp_bond_predictor::pipeline::Predictor;

fn main() -> eframe::Result {
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    logging::init(&config);
    if let Some(e) = config_error {
        log::warn!("Ignoring settings: {e:#}");
    }
    install_panic_hook(config.language);

    let predictor = match Predictor::load(&config.scaler_path(), &config.model_path()) {
        Ok(predictor) => Arc::new(predictor),
        Err(e) => {
            log::error!("Error loading model or scaler: {e}");
            let s = config.language.strings();
            rfd::MessageDialog::new()
                .set_level(rfd::MessageLevel::Error)
                .set_title(s.error_title)
                .set_description(format!("{} {e}", s.error_occurred))
                .set_buttons(rfd::MessageButtons::Ok)
                .show();
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        config.language.strings().title,
        options,
        Box::new(|cc| {
            // Image loaders for the optional figures on the home tab.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(BondStrengthApp::new(cc, config, predictor)))
        }),
    )
}

/// Log every panic with a backtrace. On the UI thread also raise a generic
/// error dialog; batch-thread panics surface through the batch channel.
fn install_panic_hook(language: Language) {
    std::panic::set_hook(Box::new(move |info| {
        let backtrace = Backtrace::force_capture();
        log::error!("Uncaught panic: {info}\n{backtrace}");
        if std::thread::current().name() == Some("main") {
            let s = language.strings();
            rfd::MessageDialog::new()
                .set_level(rfd::MessageLevel::Error)
                .set_title(s.error_title)
                .set_description(format!("{}\n\n{info}", s.unexpected_error))
                .set_buttons(rfd::MessageButtons::Ok)
                .show();
        }
    }));
}
