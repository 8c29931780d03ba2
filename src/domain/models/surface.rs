use std::sync::Arc;

use anyhow::Result;

use super::HostEvent;

/// One open chat panel. Every surface renders the same conversation and
/// receives pushes from a single session.
pub trait Surface {
    fn id(&self) -> &str;

    /// Queues an event for the surface. Delivery is best effort, nothing is
    /// acknowledged or retried.
    fn post(&self, event: HostEvent) -> Result<()>;
}

pub type SurfaceBox = Arc<dyn Surface + Send + Sync>;
