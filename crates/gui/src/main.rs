mod app;
mod ui;
mod viewport;

// Re-export library modules so that `crate::state`, `crate::build`, etc.
// resolve to the lib crate types everywhere in the binary.
pub use prism_gui_lib::build;
pub use prism_gui_lib::i18n;
pub use prism_gui_lib::lifecycle;
pub use prism_gui_lib::presentation;
pub use prism_gui_lib::state;

use app::PrismApp;
use state::AppSettings;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prism_gui=info,prism_gui_lib=info,shared=info".into()),
        )
        .init();

    let settings = load_settings();
    i18n::set_lang(i18n::Lang::from_code(&settings.ui.language));

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(i18n::t("app.title"))
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "prism-gui",
        native_options,
        Box::new(move |cc| Ok(Box::new(PrismApp::new(cc, settings)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}

/// `--config <path>` takes priority over the settings file in the config dir
fn load_settings() -> AppSettings {
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        if args[i] == "--config" && i + 1 < args.len() {
            let path = std::path::Path::new(&args[i + 1]);
            match AppSettings::load_from(path) {
                Ok(settings) => return settings,
                Err(e) => {
                    tracing::error!("{e}; falling back to defaults");
                    return AppSettings::default();
                }
            }
        }
        i += 1;
    }
    AppSettings::load()
}
