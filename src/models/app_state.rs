use std::sync::Arc;

use crate::config::PulseConfig;
use crate::dashboard::Dashboard;

/// Shared state handed to every HTTP handler.
///
/// Everything in here is immutable after start-up; each request performs
/// its own fetches.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<PulseConfig>,
    pub dashboard: Arc<Dashboard>,
}

impl AppState {
    pub fn new(config: PulseConfig, dashboard: Dashboard) -> Self {
        Self {
            config: Arc::new(config),
            dashboard: Arc::new(dashboard),
        }
    }
}
