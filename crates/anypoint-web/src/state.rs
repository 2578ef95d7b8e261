use anypoint_core::{system_clock, Clock, Config, Mode};

/// Version reported by the info endpoints
pub const API_VERSION: &str = "1.0.0";

/// Everything the handlers report, fixed at startup
#[derive(Clone)]
pub struct AppState {
    pub mode: Mode,
    /// `MULESOFT_MOCK_MODE` as given, echoed by `/info`
    pub mode_flag: String,
    pub version: &'static str,
    /// Bind address, used for `base_url` when a request has no `Host`
    pub listen: String,
    pub clock: Clock,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            mode: config.mode(),
            mode_flag: config.mode_flag(),
            version: API_VERSION,
            listen: config.web.addr(),
            clock: system_clock(),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }
}
