#[cfg(test)]
#[path = "terminal_test.rs"]
mod tests;

use std::env;
use std::path;
use std::process::Stdio;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::apply_text_edits;
use crate::domain::models::Editor;
use crate::domain::models::EditorName;
use crate::domain::models::TextEdit;
use crate::domain::models::WorkspaceContext;

/// Plain terminal editing. The workspace root is the only context available,
/// commands run through `sh`, and files open in `$EDITOR`.
pub struct Terminal {
    workspace: String,
}

impl Default for Terminal {
    fn default() -> Terminal {
        return Terminal {
            workspace: Config::get(ConfigKey::Workspace),
        };
    }
}

impl Terminal {
    fn resolve(&self, file_path: &str) -> path::PathBuf {
        let file_path = path::PathBuf::from(file_path);
        if file_path.is_absolute() || self.workspace.is_empty() {
            return file_path;
        }

        return path::Path::new(&self.workspace).join(file_path);
    }
}

#[async_trait]
impl Editor for Terminal {
    fn name(&self) -> EditorName {
        return EditorName::Terminal;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if !self.workspace.is_empty() && !path::Path::new(&self.workspace).is_dir() {
            bail!(format!("Workspace {} is not a directory", self.workspace));
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn get_context(&self) -> Result<Option<WorkspaceContext>> {
        if self.workspace.is_empty() {
            return Ok(None);
        }

        return Ok(Some(WorkspaceContext {
            workspace_root: Some(self.workspace.to_string()),
            ..WorkspaceContext::default()
        }));
    }

    #[allow(clippy::implicit_return)]
    async fn execute_command(&self, command: &str) -> Result<()> {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command).stdin(Stdio::null());
        if !self.workspace.is_empty() {
            cmd.current_dir(&self.workspace);
        }

        let output = cmd.output().await?;
        tracing::info!(command, status = ?output.status, "Ran command");

        // stdout may be carrying the bridge, so command output goes to stderr.
        let mut stderr = tokio::io::stderr();
        stderr.write_all(&output.stdout).await?;
        stderr.write_all(&output.stderr).await?;
        stderr.flush().await?;

        if !output.status.success() {
            bail!(format!("Command `{command}` exited with {}", output.status));
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn open_file(&self, file_path: &str, line: Option<u32>) -> Result<()> {
        let editor = env::var("EDITOR").unwrap_or_default();
        if editor.is_empty() {
            bail!("Set $EDITOR to open files from the chat");
        }

        let mut args = vec![];
        if let Some(line) = line {
            args.push(format!("+{line}"));
        }
        args.push(self.resolve(file_path).to_string_lossy().to_string());

        let status = Command::new(&editor).args(&args).status().await?;
        if !status.success() {
            bail!(format!("{editor} exited with {status}"));
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn apply_edit(&self, file_path: &str, edits: &[TextEdit]) -> Result<()> {
        let file_path = self.resolve(file_path);
        let text = fs::read_to_string(&file_path).await?;
        let res = apply_text_edits(&text, edits)?;
        fs::write(&file_path, res).await?;

        tracing::info!(path = ?file_path, edits = edits.len(), "Applied edits");
        return Ok(());
    }
}
