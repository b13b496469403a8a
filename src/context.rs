use crate::Config;
use crate::cards::Catalog;
use crate::registry::Registry;
use crate::scheduler::Announcer;
use crate::scheduler::Broadcaster;
use std::sync::Arc;

/// Process-wide wiring, built once at startup and passed by reference.
/// There is no hidden global: everything that touches shared state gets
/// here through this struct.
pub struct Context {
    pub config: Config,
    pub registry: Registry,
    pub catalog: Arc<dyn Catalog>,
    pub broadcaster: Arc<dyn Broadcaster>,
    pub announcer: Arc<dyn Announcer>,
    /// Process-unique id used for the external alive announcement.
    pub server_id: String,
}

impl Context {
    pub fn new(
        config: Config,
        catalog: Arc<dyn Catalog>,
        broadcaster: Arc<dyn Broadcaster>,
        announcer: Arc<dyn Announcer>,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            registry: Registry::new(),
            catalog,
            broadcaster,
            announcer,
            server_id: uuid::Uuid::now_v7().to_string(),
        })
    }
}
