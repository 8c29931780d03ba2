#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use strum::EnumIter;
use strum::EnumVariantNames;
use tokio::sync::mpsc;

use super::WorkspaceContext;

#[derive(Clone, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum EngineName {
    GalaxyCli,
    Echo,
}

#[derive(Debug, PartialEq, Eq)]
pub struct EnginePrompt {
    pub text: String,
}

impl EnginePrompt {
    pub fn new(text: &str) -> EnginePrompt {
        return EnginePrompt {
            text: text.to_string(),
        };
    }

    /// Prefixes the user's text with whatever the editor knew at submit time.
    /// Metadata lines always come in the order file, language, selection,
    /// workspace, and each is skipped when absent.
    pub fn compose(text: &str, context: Option<&WorkspaceContext>) -> EnginePrompt {
        let context = match context {
            Some(context) => context,
            None => return EnginePrompt::new(text),
        };

        let mut lines: Vec<String> = vec![];
        if let Some(file) = context.active_file() {
            lines.push(format!("[Active File: {file}]"));
        }
        if let Some(language) = context.language() {
            lines.push(format!("[Language: {language}]"));
        }
        if let Some(code) = context.selected_text() {
            lines.push(format!("[Selected Code:\n{code}\n]"));
        }
        if let Some(root) = context.workspace_root() {
            lines.push(format!("[Workspace: {root}]"));
        }

        if lines.is_empty() {
            return EnginePrompt::new(text);
        }

        return EnginePrompt {
            text: format!("{}\n\nUser Question: {text}", lines.join("\n")),
        };
    }
}

/// Capabilities the orchestrator may use while answering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineOptions {
    pub git_enabled: bool,
    pub test_enabled: bool,
    pub review_enabled: bool,
}

impl Default for EngineOptions {
    fn default() -> EngineOptions {
        return EngineOptions {
            git_enabled: true,
            test_enabled: true,
            review_enabled: true,
        };
    }
}

/// Intermediate output from the engine, such as a tool starting to run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineProgress {
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tool_name: Option<String>,
    #[serde(default)]
    pub tool_info: Option<serde_json::Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineResult {
    #[serde(default)]
    pub content: Option<String>,
}

#[async_trait]
pub trait Engine {
    fn name(&self) -> EngineName;

    /// Used during discovery to decide whether the engine can be used at all.
    /// A failing health check selects the fallback engine.
    async fn health_check(&self) -> Result<()>;

    /// Answers a single prompt. Progress events are informational and may be
    /// sent any number of times before the final result is returned.
    async fn handle_user_input<'a>(
        &self,
        prompt: EnginePrompt,
        options: EngineOptions,
        progress: &'a mpsc::UnboundedSender<EngineProgress>,
    ) -> Result<EngineResult>;
}

pub type EngineBox = Box<dyn Engine + Send + Sync>;
