use std::sync::Arc;
use std::sync::Mutex;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

use super::Orchestrator;
use crate::domain::models::Engine;
use crate::domain::models::EngineName;
use crate::domain::models::EngineOptions;
use crate::domain::models::EngineProgress;
use crate::domain::models::EnginePrompt;
use crate::domain::models::EngineResult;
use crate::domain::models::ProviderName;
use crate::domain::models::WorkspaceContext;
use crate::infrastructure::engines::echo::Echo;

#[derive(Default)]
struct RecordingEngine {
    prompts: Arc<Mutex<Vec<(String, EngineOptions)>>>,
    content: Option<String>,
}

#[async_trait]
impl Engine for RecordingEngine {
    fn name(&self) -> EngineName {
        return EngineName::GalaxyCli;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn handle_user_input<'a>(
        &self,
        prompt: EnginePrompt,
        options: EngineOptions,
        progress: &'a mpsc::UnboundedSender<EngineProgress>,
    ) -> Result<EngineResult> {
        self.prompts.lock().unwrap().push((prompt.text, options));
        progress.send(EngineProgress {
            author: "orchestrator".to_string(),
            content: "git diff".to_string(),
            tool_name: Some("git".to_string()),
            tool_info: None,
        })?;

        return Ok(EngineResult {
            content: self.content.clone(),
        });
    }
}

struct FailingEngine {}

#[async_trait]
impl Engine for FailingEngine {
    fn name(&self) -> EngineName {
        return EngineName::GalaxyCli;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn handle_user_input<'a>(
        &self,
        _prompt: EnginePrompt,
        _options: EngineOptions,
        _progress: &'a mpsc::UnboundedSender<EngineProgress>,
    ) -> Result<EngineResult> {
        bail!("quota exceeded");
    }
}

fn recording(content: Option<&str>) -> (Orchestrator, Arc<Mutex<Vec<(String, EngineOptions)>>>) {
    let prompts = Arc::new(Mutex::new(vec![]));
    let engine = RecordingEngine {
        prompts: prompts.clone(),
        content: content.map(|e| return e.to_string()),
    };

    return (
        Orchestrator::new(Box::new(engine), ProviderName::Gemini, "key"),
        prompts,
    );
}

#[tokio::test]
async fn it_asks_for_an_api_key_without_calling_the_engine() {
    let prompts = Arc::new(Mutex::new(vec![]));
    let engine = RecordingEngine {
        prompts: prompts.clone(),
        content: Some("unused".to_string()),
    };
    let orchestrator = Orchestrator::new(Box::new(engine), ProviderName::Gemini, "");

    let res = orchestrator.process_message("explain", None).await;

    assert!(!res.failed);
    assert!(res.content.starts_with("# API Key Required"));
    assert!(res.content.contains("Enter your API key for gemini"));
    assert!(res.content.contains("provider = \"gemini\""));
    assert!(prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn it_does_not_need_an_api_key_for_ollama() {
    let orchestrator = Orchestrator::new(Box::<Echo>::default(), ProviderName::Ollama, "");
    let res = orchestrator.process_message("hi", None).await;

    assert!(res.content.starts_with("Echo: hi"));
}

#[tokio::test]
async fn it_sends_the_composed_prompt_and_options() -> Result<()> {
    let (orchestrator, prompts) = recording(Some("answer"));
    let context: WorkspaceContext = serde_json::from_str(test_utils::workspace_context_json())?;

    let res = orchestrator.process_message("explain", Some(&context)).await;
    assert_eq!(res.content, "answer");
    assert!(!res.failed);

    let prompts = prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    insta::assert_snapshot!(prompts[0].0, @r###"
    [Active File: a.ts]
    [Language: typescript]
    [Selected Code:
    x
    ]
    [Workspace: /w]

    User Question: explain
    "###);
    assert_eq!(prompts[0].1, EngineOptions::default());

    return Ok(());
}

#[tokio::test]
async fn it_replaces_missing_content() {
    let (orchestrator, _) = recording(None);
    let res = orchestrator.process_message("hi", None).await;
    assert_eq!(res.content, "No response received");

    let (orchestrator, _) = recording(Some(""));
    let res = orchestrator.process_message("hi", None).await;
    assert_eq!(res.content, "No response received");
}

#[tokio::test]
async fn it_reports_engine_failures() {
    let orchestrator = Orchestrator::new(Box::new(FailingEngine {}), ProviderName::Claude, "key");
    let res = orchestrator.process_message("hi", None).await;

    assert!(res.failed);
    insta::assert_snapshot!(res.content, @r###"
    # Error Processing Request

    An error occurred while processing your request:

    ```
    quota exceeded
    ```

    ## Troubleshooting:
    - Check your API key configuration
    - Ensure your internet connection is stable
    - Try restarting the chat panel
    - Run with `RUST_LOG=galaxy_chat` and check the debug log for more details

    If the problem persists, please report it on GitHub.
    "###);
}

#[tokio::test]
async fn it_changes_provider_and_api_key() -> Result<()> {
    let (orchestrator, prompts) = recording(Some("answer"));
    orchestrator.set_api_key("").await?;
    orchestrator.change_provider(ProviderName::Claude).await?;

    let res = orchestrator.process_message("hi", None).await;
    assert!(res.content.contains("Enter your API key for claude"));

    orchestrator.set_api_key("new-key").await?;
    let res = orchestrator.process_message("hi", None).await;
    assert_eq!(res.content, "answer");
    assert_eq!(orchestrator.provider().await, ProviderName::Claude);
    assert_eq!(prompts.lock().unwrap().len(), 1);

    return Ok(());
}

#[test]
fn it_names_the_engine() {
    let orchestrator = Orchestrator::new(Box::<Echo>::default(), ProviderName::Ollama, "");
    assert_eq!(orchestrator.engine_name(), EngineName::Echo);
}
