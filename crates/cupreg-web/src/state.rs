use std::sync::Arc;

use cupreg_core::{RateLimiter, TeamStore};

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Shared failure tracker for both login surfaces. Process-local;
    /// lockout state is lost on restart and not shared across instances.
    pub limiter: Arc<RateLimiter>,
    pub teams: Arc<dyn TeamStore>,
}
