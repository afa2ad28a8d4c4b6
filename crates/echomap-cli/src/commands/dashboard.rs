pub fn run(url: &str, reconnect_ms: u64, speed: u8) {
    let config = super::make_link_config(url, reconnect_ms);
    let mut app = crate::tui::app::App::new(config, speed as f64);
    if let Err(e) = app.run() {
        eprintln!("TUI error: {e}");
        std::process::exit(1);
    }
}
