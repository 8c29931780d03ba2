#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod tests;

use anyhow::anyhow;
use anyhow::Result;
use tokio::sync::mpsc;
use tokio::sync::RwLock;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::EngineBox;
use crate::domain::models::EngineName;
use crate::domain::models::EngineOptions;
use crate::domain::models::EngineProgress;
use crate::domain::models::EnginePrompt;
use crate::domain::models::ProviderName;
use crate::domain::models::WorkspaceContext;
use crate::infrastructure::engines::EngineManager;

/// What the orchestrator answered. `failed` is set when the text is an error
/// report rather than an answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrchestratorReply {
    pub content: String,
    pub failed: bool,
}

impl OrchestratorReply {
    fn answer(content: &str) -> OrchestratorReply {
        return OrchestratorReply {
            content: content.to_string(),
            failed: false,
        };
    }
}

pub fn api_key_prompt(provider: ProviderName) -> String {
    return format!(
        r#"# API Key Required

To use Galaxy Code, you need to configure an API key.

## Steps:
1. Run `galaxy-chat config set-api-key`
2. Or start galaxy-chat with `--api-key` or the `GALAXY_API_KEY` environment variable
3. Enter your API key for {provider}

### Get API Keys:
- **Gemini**: https://ai.google.dev/
- **Claude**: https://www.anthropic.com/
- **Ollama**: No API key needed (local)

Alternatively, you can add to your config.toml:
```toml
provider = "{provider}"
api-key = "your-api-key-here"
```
"#
    );
}

pub fn error_report(err: &anyhow::Error) -> String {
    return format!(
        r#"# Error Processing Request

An error occurred while processing your request:

```
{err:#}
```

## Troubleshooting:
- Check your API key configuration
- Ensure your internet connection is stable
- Try restarting the chat panel
- Run with `RUST_LOG=galaxy_chat` and check the debug log for more details

If the problem persists, please report it on GitHub.
"#
    );
}

/// Fronts whichever engine discovery selected. Every call produces reply text,
/// failures included, so callers only decide how to present it.
pub struct Orchestrator {
    engine: EngineBox,
    provider: RwLock<ProviderName>,
    api_key: RwLock<String>,
    config_file: String,
    options: EngineOptions,
}

impl Orchestrator {
    pub fn new(engine: EngineBox, provider: ProviderName, api_key: &str) -> Orchestrator {
        return Orchestrator {
            engine,
            provider: RwLock::new(provider),
            api_key: RwLock::new(api_key.to_string()),
            config_file: "".to_string(),
            options: EngineOptions::default(),
        };
    }

    pub async fn from_config() -> Result<Orchestrator> {
        let provider_str = Config::get(ConfigKey::Provider);
        let provider = ProviderName::parse(&provider_str)
            .ok_or_else(|| return anyhow!(format!("No provider named {provider_str}")))?;

        let engine = EngineManager::discover(
            &Config::get(ConfigKey::Workspace),
            &Config::get(ConfigKey::EnginePath),
        )
        .await;

        let mut orchestrator = Orchestrator::new(engine, provider, &Config::get(ConfigKey::ApiKey));
        orchestrator.config_file = Config::get(ConfigKey::ConfigFile);

        return Ok(orchestrator);
    }

    pub fn engine_name(&self) -> EngineName {
        return self.engine.name();
    }

    pub async fn provider(&self) -> ProviderName {
        return *self.provider.read().await;
    }

    pub async fn process_message(
        &self,
        text: &str,
        context: Option<&WorkspaceContext>,
    ) -> OrchestratorReply {
        let provider = self.provider().await;
        if provider.requires_api_key() && self.api_key.read().await.is_empty() {
            tracing::info!(provider = %provider, "No API key configured");
            return OrchestratorReply::answer(&api_key_prompt(provider));
        }

        let prompt = EnginePrompt::compose(text, context);
        let (tx, mut rx) = mpsc::unbounded_channel::<EngineProgress>();
        let progress_logger = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                if let Some(tool_name) = &event.tool_name {
                    tracing::debug!(tool = %tool_name, content = %event.content, "Tool");
                }
            }
        });

        let res = self
            .engine
            .handle_user_input(prompt, self.options.clone(), &tx)
            .await;
        drop(tx);
        if let Err(err) = progress_logger.await {
            tracing::warn!(error = ?err, "Progress logger stopped");
        }

        match res {
            Ok(res) => {
                let content = res
                    .content
                    .filter(|content| return !content.is_empty())
                    .unwrap_or_else(|| return "No response received".to_string());

                return OrchestratorReply::answer(&content);
            }
            Err(err) => {
                tracing::error!(error = ?err, engine = %self.engine.name(), "Orchestrator failed");
                return OrchestratorReply {
                    content: error_report(&err),
                    failed: true,
                };
            }
        }
    }

    pub async fn change_provider(&self, provider: ProviderName) -> Result<()> {
        *self.provider.write().await = provider;
        Config::persist(
            &self.config_file,
            ConfigKey::Provider,
            &provider.to_string(),
        )
        .await?;

        return Ok(());
    }

    pub async fn set_api_key(&self, api_key: &str) -> Result<()> {
        *self.api_key.write().await = api_key.to_string();
        Config::persist(&self.config_file, ConfigKey::ApiKey, api_key).await?;

        return Ok(());
    }
}
