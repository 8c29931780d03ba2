#[cfg(test)]
#[path = "galaxy_cli_test.rs"]
mod tests;

use std::path;
use std::process::Stdio;

use anyhow::anyhow;
use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use tokio::io::AsyncBufReadExt;
use tokio::io::AsyncReadExt;
use tokio::io::AsyncWriteExt;
use tokio::io::BufReader;
use tokio::process::Command;
use tokio::sync::mpsc;

use crate::domain::models::Engine;
use crate::domain::models::EngineName;
use crate::domain::models::EngineOptions;
use crate::domain::models::EngineProgress;
use crate::domain::models::EnginePrompt;
use crate::domain::models::EngineResult;

#[derive(Debug, Serialize)]
struct EngineRequest<'a> {
    prompt: &'a str,
    options: &'a EngineOptions,
}

/// One line of the orchestrator's stdout.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum EngineLine {
    Progress(EngineProgress),
    Result(EngineResult),
}

fn is_script(entrypoint: &path::Path) -> bool {
    return entrypoint
        .extension()
        .and_then(|ext| return ext.to_str())
        .map(|ext| return ["js", "mjs", "cjs"].contains(&ext))
        .unwrap_or(false);
}

/// Runs the Galaxy CLI orchestrator as a child process, one process per
/// prompt. The request is written to stdin as JSON, and the orchestrator
/// answers with JSON lines tagged `progress` or `result`.
pub struct GalaxyCli {
    program: String,
    args: Vec<String>,
    entrypoint: Option<path::PathBuf>,
    workspace: String,
}

impl GalaxyCli {
    pub fn new(workspace: &str, entrypoint: path::PathBuf) -> GalaxyCli {
        let entrypoint_str = entrypoint.to_string_lossy().to_string();
        let (program, args) = if is_script(&entrypoint) {
            ("node".to_string(), vec![entrypoint_str])
        } else {
            (entrypoint_str, vec![])
        };

        return GalaxyCli {
            program,
            args,
            entrypoint: Some(entrypoint),
            workspace: workspace.to_string(),
        };
    }
}

#[async_trait]
impl Engine for GalaxyCli {
    fn name(&self) -> EngineName {
        return EngineName::GalaxyCli;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if let Some(entrypoint) = &self.entrypoint {
            if !entrypoint.is_file() {
                bail!(format!(
                    "Galaxy CLI orchestrator not found at {}",
                    entrypoint.display()
                ));
            }

            if is_script(entrypoint) {
                let status = Command::new(&self.program)
                    .arg("--version")
                    .stdout(Stdio::null())
                    .stderr(Stdio::null())
                    .status()
                    .await;

                if !matches!(status, Ok(status) if status.success()) {
                    bail!("Node.js is required to run the Galaxy CLI orchestrator");
                }
            }
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn handle_user_input<'a>(
        &self,
        prompt: EnginePrompt,
        options: EngineOptions,
        progress: &'a mpsc::UnboundedSender<EngineProgress>,
    ) -> Result<EngineResult> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if !self.workspace.is_empty() {
            cmd.current_dir(&self.workspace);
        }

        let mut child = cmd.spawn()?;

        let req = serde_json::to_string(&EngineRequest {
            prompt: &prompt.text,
            options: &options,
        })?;
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| return anyhow!("Orchestrator stdin is unavailable"))?;
        stdin.write_all(format!("{req}\n").as_bytes()).await?;
        drop(stdin);

        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| return anyhow!("Orchestrator stderr is unavailable"))?;
        let stderr_reader = tokio::spawn(async move {
            let mut text = String::new();
            stderr.read_to_string(&mut text).await?;
            return Ok::<String, anyhow::Error>(text);
        });

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| return anyhow!("Orchestrator stdout is unavailable"))?;
        let mut lines_reader = BufReader::new(stdout).lines();

        let mut result = EngineResult::default();
        while let Some(line) = lines_reader.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<EngineLine>(&line) {
                Ok(EngineLine::Progress(event)) => {
                    progress.send(event)?;
                }
                Ok(EngineLine::Result(res)) => {
                    result = res;
                }
                Err(err) => {
                    tracing::debug!(error = ?err, line = %line, "Skipping orchestrator output");
                }
            }
        }

        let status = child.wait().await?;
        let stderr_text = stderr_reader.await??;
        if !status.success() {
            tracing::error!(status = ?status, stderr = %stderr_text, "Orchestrator failed");
            bail!(format!(
                "Galaxy CLI orchestrator exited with {status}: {}",
                stderr_text.trim()
            ));
        }

        return Ok(result);
    }
}
