#[cfg(test)]
#[path = "noop_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::Editor;
use crate::domain::models::EditorName;
use crate::domain::models::TextEdit;
use crate::domain::models::WorkspaceContext;

#[derive(Default)]
pub struct NoopEditor {}

#[async_trait]
impl Editor for NoopEditor {
    fn name(&self) -> EditorName {
        return EditorName::None;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn get_context(&self) -> Result<Option<WorkspaceContext>> {
        return Ok(None);
    }

    #[allow(clippy::implicit_return)]
    async fn execute_command(&self, _command: &str) -> Result<()> {
        bail!("None/noop editor cannot run commands. Consider using the 'terminal' or 'neovim' editor instead");
    }

    #[allow(clippy::implicit_return)]
    async fn open_file(&self, _file_path: &str, _line: Option<u32>) -> Result<()> {
        bail!("None/noop editor cannot open files. Consider using the 'terminal' or 'neovim' editor instead");
    }

    #[allow(clippy::implicit_return)]
    async fn apply_edit(&self, _file_path: &str, _edits: &[TextEdit]) -> Result<()> {
        bail!("None/noop editor cannot apply edits. Consider using the 'terminal' or 'neovim' editor instead");
    }
}
