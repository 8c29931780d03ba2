#[cfg(test)]
#[path = "code_blocks_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;

use crate::domain::models::CodeBlock;
use crate::domain::models::Message;
use crate::domain::models::Role;
use crate::domain::models::SlashCommand;

/// Code blocks from assistant messages, numbered from one in conversation
/// order so they can be picked with `/run`.
#[derive(Default)]
pub struct CodeBlocks {
    codeblocks: Vec<CodeBlock>,
}

impl CodeBlocks {
    pub fn replace_from_messages(&mut self, messages: &[Message]) {
        self.codeblocks = messages
            .iter()
            .filter(|msg| return msg.role == Role::Assistant)
            .flat_map(|msg| {
                return msg.codeblocks();
            })
            .collect();
    }

    pub fn count(&self) -> usize {
        return self.codeblocks.len();
    }

    /// Returns the command picked by `/run`: the given block, or the last shell
    /// block when no index is passed.
    pub fn command_from_slash_command(&self, command: &SlashCommand) -> Result<String> {
        let arg = command
            .args
            .iter()
            .map(|e| return e.trim())
            .find(|e| return !e.is_empty());

        let idx = match arg {
            Some(arg) => arg.parse::<usize>()?,
            None => {
                if let Some(codeblock) = self.codeblocks.iter().rev().find(|e| return e.is_command()) {
                    return Ok(codeblock.code.to_string());
                }
                bail!("There are no shell code blocks to run");
            }
        };

        let codeblock = match idx.checked_sub(1).and_then(|e| return self.codeblocks.get(e)) {
            Some(codeblock) => codeblock,
            None => bail!(format!("Code block index {idx} is not valid")),
        };

        if !codeblock.is_command() {
            bail!(format!(
                "Code block {idx} is not a shell code block and cannot be run"
            ));
        }

        return Ok(codeblock.code.to_string());
    }
}
