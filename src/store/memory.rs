use super::{Device, DeviceStore};
use crate::Result;
use async_trait::async_trait;

/// In-memory device store (tests and single runs; nothing is persisted).
#[derive(Default)]
pub struct MemoryStore {
    devices: Vec<Device>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one device.
    pub fn with_device(device: Device) -> Self {
        Self {
            devices: vec![device],
        }
    }
}

#[async_trait]
impl DeviceStore for MemoryStore {
    async fn get_first_device(&self) -> Result<Option<Device>> {
        Ok(self.devices.first().cloned())
    }
}
