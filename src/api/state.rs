use std::sync::Arc;

use crate::catalog::RaceCatalog;
use crate::config::AppConfig;

/// Read-only state shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<RaceCatalog>,
    pub config: Arc<AppConfig>,
}
