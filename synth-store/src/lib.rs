mod config;
mod marketplace;
mod scheduler;
mod seed;
mod store;

use std::sync::Arc;

pub use config::*;
pub use marketplace::*;
pub use scheduler::*;
pub use seed::*;
pub use store::*;

/// The Synth data layer, facilitating storage, marketplace rules, and
/// scheduled transitions.
pub struct Synth<S> {
    pub store: Arc<S>,
    pub marketplace: Marketplace<S>,
    pub scheduler: Scheduler<S>,
}

impl<S> Synth<S>
where
    S: Storage,
{
    pub fn new(store: S, config: StoreConfig) -> Self {
        let store = Arc::new(store);

        let marketplace = Marketplace::new(&store, config.clone());
        let scheduler = Scheduler::new(&store, config);

        Self {
            store,
            marketplace,
            scheduler,
        }
    }
}
