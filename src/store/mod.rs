//! Session store adapters.
//!
//! The session database is owned by the messaging client; the dispatcher only
//! needs the device that was registered during pairing. Every storage driver
//! implements [`DeviceStore`] so the dispatcher never depends on a concrete
//! backend.

mod memory;
#[cfg(feature = "full")]
mod sqlite;

pub use memory::MemoryStore;
#[cfg(feature = "full")]
pub use sqlite::SqliteStore;

use crate::types::Jid;
use async_trait::async_trait;

/// File name of the session database inside the store directory.
pub const DEFAULT_DB_NAME: &str = "whatsapp.db";

/// The linked device as far as the bridge cares about it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Device {
    /// Our JID after pairing (None if not paired).
    pub id: Option<Jid>,
    pub push_name: Option<String>,
}

impl Device {
    pub fn is_logged_in(&self) -> bool {
        self.id.is_some()
    }
}

/// Read access to the registered device.
#[async_trait]
pub trait DeviceStore: Send + Sync {
    /// Get the first (or only) registered device.
    async fn get_first_device(&self) -> crate::Result<Option<Device>>;
}
