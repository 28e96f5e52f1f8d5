//! Services backing the web front end

mod session_store;
mod timer;

use market_core::config::DirectoryConfig;
use market_core::directory::{Backend, FirebaseDirectory, MemoryDirectory};

pub use session_store::SessionStore;
pub use timer::sleep;

/// The directory the whole app talks to
pub type Directory = Backend<SessionStore>;

/// Connect to the hosted directory, or fall back to the in-memory one.
pub fn connect_directory(config: Option<DirectoryConfig>) -> Directory {
    let Some(config) = config else {
        tracing::warn!("No Firebase config in this build, running in demo mode");
        return Backend::Memory(MemoryDirectory::new());
    };

    match FirebaseDirectory::new(&config, SessionStore::default()) {
        Ok(directory) => {
            tracing::info!("Using hosted directory for project {}", config.project_id);
            Backend::Hosted(directory)
        }
        Err(error) => {
            tracing::error!("Failed to create hosted directory: {}", error);
            Backend::Memory(MemoryDirectory::new())
        }
    }
}
