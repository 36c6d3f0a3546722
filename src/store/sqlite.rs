//! Session database maintained by the WhatsApp client.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use wacore::store::traits::DeviceStore as _;
use whatsapp_rust_sqlite_storage::SqliteStore as Backend;

use super::{Device, DeviceStore};
use crate::error::StoreError;
use crate::types::Jid;
use crate::Result;

/// The client's SQLite session database, opened for an existing session only.
pub struct SqliteStore {
    backend: Arc<Backend>,
}

impl SqliteStore {
    /// Open `dir/db_name`. A missing file is [`StoreError::NotFound`]: pairing
    /// happens elsewhere and this never starts a fresh session.
    pub async fn open(dir: &Path, db_name: &str) -> Result<Self> {
        let path = dir.join(db_name);
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StoreError::NotFound(path).into());
        }
        let backend = Backend::new(path.to_string_lossy().as_ref())
            .await
            .map_err(|e| StoreError::Open(e.to_string()))?;
        tracing::debug!(path = %path.display(), "session database opened");
        Ok(Self {
            backend: Arc::new(backend),
        })
    }

    /// Backend handle for building a client on the same session.
    pub fn backend(&self) -> Arc<Backend> {
        Arc::clone(&self.backend)
    }
}

#[async_trait]
impl DeviceStore for SqliteStore {
    async fn get_first_device(&self) -> Result<Option<Device>> {
        let Some(stored) = self
            .backend
            .load()
            .await
            .map_err(|e| StoreError::Load(e.to_string()))?
        else {
            return Ok(None);
        };
        let id = stored
            .pn
            .as_ref()
            .map(|jid| jid.to_string().parse::<Jid>())
            .transpose()
            .map_err(|e| StoreError::Load(format!("stored device JID: {e}")))?;
        Ok(Some(Device {
            id,
            push_name: Some(stored.push_name.clone()).filter(|n| !n.is_empty()),
        }))
    }
}
