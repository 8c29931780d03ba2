#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

pub mod echo;
pub mod galaxy_cli;

use std::path;

use crate::domain::models::Engine;
use crate::domain::models::EngineBox;

pub struct EngineManager {}

impl EngineManager {
    /// Looks for the orchestrator inside the workspace. Anything that keeps
    /// it from being used selects the echo engine instead, so discovery never
    /// fails.
    pub async fn discover(workspace: &str, engine_path: &str) -> EngineBox {
        if workspace.is_empty() || engine_path.is_empty() {
            tracing::warn!("No workspace to discover the orchestrator in, using echo engine");
            return Box::<echo::Echo>::default();
        }

        let entrypoint = path::Path::new(workspace).join(engine_path);
        let engine = galaxy_cli::GalaxyCli::new(workspace, entrypoint.clone());
        if let Err(err) = engine.health_check().await {
            tracing::warn!(
                error = ?err,
                path = ?entrypoint,
                "Could not use the Galaxy CLI orchestrator, using echo engine"
            );
            return Box::<echo::Echo>::default();
        }

        tracing::info!(path = ?entrypoint, "Using Galaxy CLI orchestrator");
        return Box::new(engine);
    }
}
