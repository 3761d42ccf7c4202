use std::sync::Arc;

use crate::config::Config;
use crate::database::AccountStore;

/// Built once at startup and shared with every handler
pub struct AppState {
    pub db: Arc<dyn AccountStore>,
    pub config: Config,
}
