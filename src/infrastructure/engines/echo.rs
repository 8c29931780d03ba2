#[cfg(test)]
#[path = "echo_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::domain::models::Engine;
use crate::domain::models::EngineName;
use crate::domain::models::EngineOptions;
use crate::domain::models::EngineProgress;
use crate::domain::models::EnginePrompt;
use crate::domain::models::EngineResult;

/// Stands in for the orchestrator when none is installed in the workspace.
#[derive(Default)]
pub struct Echo {}

#[async_trait]
impl Engine for Echo {
    fn name(&self) -> EngineName {
        return EngineName::Echo;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn handle_user_input<'a>(
        &self,
        prompt: EnginePrompt,
        _options: EngineOptions,
        _progress: &'a mpsc::UnboundedSender<EngineProgress>,
    ) -> Result<EngineResult> {
        let content = format!(
            "Echo: {}\n\nNote: Full Galaxy CLI orchestrator not found. This is a fallback response. To use the full features, ensure the Galaxy CLI is installed in your workspace at terminal/galaxy_cli/",
            prompt.text
        );

        return Ok(EngineResult {
            content: Some(content),
        });
    }
}
