use anyhow::Result;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::domain::models::HostEvent;
use crate::domain::models::Surface;

/// A surface fed through an in-process channel. Transports drain the
/// receiving end and write each event out to their peer.
pub struct ChannelSurface {
    id: String,
    tx: mpsc::UnboundedSender<HostEvent>,
}

impl ChannelSurface {
    pub fn new(tx: mpsc::UnboundedSender<HostEvent>) -> ChannelSurface {
        return ChannelSurface {
            id: Uuid::new_v4().to_string(),
            tx,
        };
    }
}

impl Surface for ChannelSurface {
    fn id(&self) -> &str {
        return &self.id;
    }

    fn post(&self, event: HostEvent) -> Result<()> {
        self.tx.send(event)?;
        return Ok(());
    }
}
