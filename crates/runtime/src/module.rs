//! Module bootstrap: wires the controller to the host and registers the
//! behavior type, mirroring the host's init hook.

use std::sync::Arc;

use tracing::info;

use crate::controller::{ControllerConfig, CountdownController};
use crate::error::Result;
use crate::host::HostEnv;
use crate::registry::{BehaviorDescriptor, BehaviorRegistry};

/// The delayed-teleport module as the host sees it after initialization.
pub struct Module {
    registry: BehaviorRegistry,
    controller: Arc<CountdownController>,
}

impl Module {
    /// Builds the controller and registers the behavior type.
    pub fn init(host: HostEnv, config: ControllerConfig) -> Result<Self> {
        let controller = Arc::new(CountdownController::new(host, config));

        let mut registry = BehaviorRegistry::new();
        registry.register(BehaviorDescriptor::delayed_teleport(), controller.clone())?;

        info!("initialization complete");
        Ok(Self {
            registry,
            controller,
        })
    }

    /// Registry the host queries for descriptors and event dispatch.
    pub fn registry(&self) -> &BehaviorRegistry {
        &self.registry
    }

    pub fn controller(&self) -> &CountdownController {
        &self.controller
    }

    /// Tears down every live timer, e.g. on scene unload or module disable.
    pub fn shutdown(&self) -> Result<()> {
        self.controller.shutdown()
    }
}
