use std::sync::Arc;

use crate::{config::Config, portal::PortalConnector, services::demo::DemoDataset};

/// Read-only process state shared with every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub portal: Arc<dyn PortalConnector>,
    pub demo: Arc<DemoDataset>,
}

impl AppState {
    pub fn new(config: Config, portal: Arc<dyn PortalConnector>) -> Self {
        Self {
            config: Arc::new(config),
            portal,
            demo: Arc::new(DemoDataset::new()),
        }
    }
}
