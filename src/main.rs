/// Main imlabel entry point
fn main() -> eframe::Result<()> {
    use imlabel::LabelingApp;
    use imlabel::config::AppConfig;
    use imlabel::ui_constants::window;

    // The logger passes everything through; the configured level is applied
    // with set_max_level once the config is read, unless RUST_LOG is set.
    let env_filter = std::env::var_os("RUST_LOG").is_some();
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Trace)
        .parse_default_env()
        .init();
    if !env_filter {
        log::set_max_level(log::LevelFilter::Info);
    }

    let config = AppConfig::load_from_default_path().unwrap_or_default();
    if let Some(level) = config.max_log_level(env_filter) {
        log::set_max_level(level);
    }

    let config_path = AppConfig::default_path();
    if let Some(path) = &config_path {
        if !path.exists() {
            if let Err(e) = config.save_to(path) {
                log::warn!("Could not write default configuration: {}", e);
            }
        }
    }

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size(window::DEFAULT_SIZE)
            .with_min_inner_size(window::MIN_SIZE)
            .with_title(window::TITLE),
        ..Default::default()
    };

    eframe::run_native(
        window::TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(LabelingApp::new(config, config_path)))),
    )
}
