use anyhow::Result;
use tokio::sync::mpsc;

use super::Echo;
use crate::domain::models::Engine;
use crate::domain::models::EngineName;
use crate::domain::models::EngineOptions;
use crate::domain::models::EngineProgress;
use crate::domain::models::EnginePrompt;

#[tokio::test]
async fn it_successfully_health_checks() -> Result<()> {
    Echo::default().health_check().await?;
    return Ok(());
}

#[test]
fn it_is_named_echo() {
    assert_eq!(Echo::default().name(), EngineName::Echo);
}

#[tokio::test]
async fn it_echoes_the_prompt() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<EngineProgress>();
    let res = Echo::default()
        .handle_user_input(EnginePrompt::new("hi"), EngineOptions::default(), &tx)
        .await?;

    insta::assert_snapshot!(res.content.unwrap(), @r###"
    Echo: hi

    Note: Full Galaxy CLI orchestrator not found. This is a fallback response. To use the full features, ensure the Galaxy CLI is installed in your workspace at terminal/galaxy_cli/
    "###);

    drop(tx);
    assert!(rx.recv().await.is_none());
    return Ok(());
}
