use log::LevelFilter;

#[derive(Debug, Default, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
}

impl AppSettings {
    pub fn load() -> Self {
        // Log level override via LIGATUI_LOG (error/warn/info/debug/trace).
        let log_level = std::env::var("LIGATUI_LOG")
            .ok()
            .and_then(|v| v.parse::<LevelFilter>().ok());
        Self { full_screen: false, log_level }
    }
}
