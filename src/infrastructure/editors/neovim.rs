#[cfg(test)]
#[path = "neovim_test.rs"]
mod tests;

use std::env;
use std::path;
use std::str;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as b64;
use base64::Engine;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use tokio::fs;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use uuid::Uuid;

use crate::domain::models::Editor;
use crate::domain::models::EditorName;
use crate::domain::models::Position;
use crate::domain::models::Selection;
use crate::domain::models::TextEdit;
use crate::domain::models::WorkspaceContext;

fn base64_to_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let val = String::deserialize(deserializer)?;
    let b64_res = b64.decode(val).map_err(serde::de::Error::custom)?;
    let str_res = str::from_utf8(&b64_res)
        .map_err(serde::de::Error::custom)?
        .to_string();

    return Ok(str_res);
}

#[derive(Debug, Deserialize, Serialize)]
struct ContextResponse {
    workspace_root: String,
    file_path: String,
    language: String,
    #[serde(deserialize_with = "base64_to_string")]
    code: String,
    start_line: u32,
    start_col: u32,
    end_line: u32,
    end_col: u32,
}

impl From<ContextResponse> for WorkspaceContext {
    fn from(val: ContextResponse) -> Self {
        return WorkspaceContext {
            workspace_root: Some(val.workspace_root),
            active_file: Some(val.file_path),
            language: Some(val.language),
            selection: Some(Selection {
                start: Position {
                    line: val.start_line,
                    character: val.start_col,
                },
                end: Position {
                    line: val.end_line,
                    character: val.end_col,
                },
                text: val.code,
            }),
        };
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum ActionRequest<'a> {
    ExecuteCommand {
        command: &'a str,
    },
    OpenFile {
        file_path: &'a str,
        line: Option<u32>,
    },
    ApplyEdit {
        file_path: &'a str,
        edits: &'a [TextEdit],
    },
}

fn parse_context(json_str: &str) -> Result<Option<WorkspaceContext>> {
    if json_str.trim() == "[]" || json_str.trim().is_empty() {
        return Ok(None);
    }
    let ctx: ContextResponse = serde_json::from_str(json_str)?;

    return Ok(Some(ctx.into()));
}

async fn run_lua_command(func: &str) -> Result<String> {
    let nvim_server_path = env::var("NVIM")?;
    let lua_func = format!("v:lua.{func}");
    let args = vec![
        "--headless",
        "--server",
        &nvim_server_path,
        "--remote-expr",
        &lua_func,
    ];

    let stdout = Command::new("nvim")
        .args(args.clone())
        .output()
        .await?
        .stdout;
    let res = String::from_utf8(stdout)?;

    tracing::debug!(args = ?args, res = ?res, "Neovim request/response");

    return Ok(res);
}

/// Actions are written to a temp file which the plugin reads, since
/// `--remote-expr` arguments do not survive arbitrary code well. Each action
/// gets its own file so concurrent actions never read each other's payload.
async fn write_action_file(req: &ActionRequest<'_>) -> Result<path::PathBuf> {
    let json_str = serde_json::to_string(req)?;

    let temp_file_path = env::temp_dir().join(format!("galaxy-chat-action-{}", Uuid::new_v4()));
    let mut file = File::create(&temp_file_path).await?;
    file.write_all(json_str.as_bytes()).await?;
    file.sync_all().await?;

    return Ok(temp_file_path);
}

async fn send_action(req: ActionRequest<'_>) -> Result<()> {
    let temp_file_path = write_action_file(&req).await?;

    let res = run_lua_command(&format!(
        "galaxy_handle_action(\"{}\")",
        temp_file_path.display()
    ))
    .await;
    if let Err(err) = fs::remove_file(&temp_file_path).await {
        tracing::warn!(error = ?err, path = ?temp_file_path, "Failed to remove Neovim action file");
    }

    let res = res?;
    if !res.trim().is_empty() && res.trim() != "v:null" {
        bail!(format!("Neovim failed the request: {}", res.trim()));
    }

    return Ok(());
}

#[derive(Default)]
pub struct Neovim {}

#[async_trait]
impl Editor for Neovim {
    fn name(&self) -> EditorName {
        return EditorName::Neovim;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if env::var("NVIM").is_err() {
            bail!("Not running within a Neovim terminal")
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn get_context(&self) -> Result<Option<WorkspaceContext>> {
        let json_str = run_lua_command("galaxy_get_context()").await?;
        return parse_context(&json_str);
    }

    #[allow(clippy::implicit_return)]
    async fn execute_command(&self, command: &str) -> Result<()> {
        return send_action(ActionRequest::ExecuteCommand { command }).await;
    }

    #[allow(clippy::implicit_return)]
    async fn open_file(&self, file_path: &str, line: Option<u32>) -> Result<()> {
        return send_action(ActionRequest::OpenFile { file_path, line }).await;
    }

    #[allow(clippy::implicit_return)]
    async fn apply_edit(&self, file_path: &str, edits: &[TextEdit]) -> Result<()> {
        return send_action(ActionRequest::ApplyEdit { file_path, edits }).await;
    }
}
