pub mod config;
pub mod error;
pub mod guards;
pub mod identity;
pub mod logging;
pub mod model;
pub mod persist;
pub mod quiz;
pub mod store;
pub mod tutor;

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::config::Config;
use crate::error::AppError;
use crate::identity::{FirebaseAuth, IdentityProvider};
use crate::persist::{FileStore, PersistenceMirror, Storage};
use crate::store::SessionStore;

/// Wired application core: the session store, its persistence mirror,
/// and the identity watcher. Created once at startup and torn down at
/// exit; consumers receive the store by reference.
pub struct App {
    store: Arc<SessionStore>,
    mirror: Arc<PersistenceMirror>,
    mirror_task: JoinHandle<()>,
    identity_task: JoinHandle<()>,
}

impl App {
    /// Assembles the core from injected components. The mirror and the
    /// identity watcher subscribe before this returns, so no event is
    /// missed.
    pub fn start(provider: Arc<dyn IdentityProvider>, storage: Arc<dyn Storage>) -> Self {
        let store = Arc::new(SessionStore::new(provider));
        let mirror = Arc::new(PersistenceMirror::new(Arc::clone(&store), storage));
        let mirror_task = Arc::clone(&mirror).spawn();
        let identity_task = store.spawn_identity_watch();

        Self {
            store,
            mirror,
            mirror_task,
            identity_task,
        }
    }

    /// Default wiring: Firebase identity adapter and the file-backed
    /// local mirror under the configured data directory.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let provider: Arc<dyn IdentityProvider> = Arc::new(FirebaseAuth::new(config));
        let storage: Arc<dyn Storage> = Arc::new(FileStore::open(config.data_dir.clone())?);
        Ok(Self::start(provider, storage))
    }

    pub fn store(&self) -> Arc<SessionStore> {
        Arc::clone(&self.store)
    }

    pub fn mirror(&self) -> Arc<PersistenceMirror> {
        Arc::clone(&self.mirror)
    }

    pub fn shutdown(self) {
        self.mirror_task.abort();
        self.identity_task.abort();
    }
}
