use std::sync::{Arc, PoisonError, RwLock};

use crate::config::Config;
use crate::interview::gateway::Gateway;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Current gateway. Swapped wholesale on reconfiguration; the lock is held
    /// only long enough to clone or replace the `Arc`.
    gateway: Arc<RwLock<Arc<Gateway>>>,
}

impl AppState {
    pub fn new(config: Config, gateway: Gateway) -> Self {
        Self {
            config,
            gateway: Arc::new(RwLock::new(Arc::new(gateway))),
        }
    }

    pub fn gateway(&self) -> Arc<Gateway> {
        self.gateway
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn replace_gateway(&self, gateway: Gateway) {
        *self
            .gateway
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::new(gateway);
    }
}
