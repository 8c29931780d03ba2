#[cfg(test)]
#[path = "editor_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

use super::Position;
use super::Range;
use super::WorkspaceContext;

#[derive(Clone, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum EditorName {
    None,
    Neovim,
    Terminal,
}

impl EditorName {
    pub fn parse(text: String) -> Option<EditorName> {
        return EditorName::iter().find(|e| return e.to_string() == text);
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEdit {
    pub range: Range,
    #[serde(rename = "newText")]
    pub new_text: String,
}

fn offset_of(text: &str, position: Position) -> Result<usize> {
    let mut line_start = 0;
    let mut line_count = 0;

    for (idx, line) in text.split_inclusive('\n').enumerate() {
        if idx == position.line as usize {
            let content = line.strip_suffix('\n').unwrap_or(line);
            let content = content.strip_suffix('\r').unwrap_or(content);
            // Characters past the end of a line clamp to the line end.
            let mut char_offset = content.len();
            let mut units = 0;
            for (offset, c) in content.char_indices() {
                if units >= position.character as usize {
                    char_offset = offset;
                    break;
                }
                units += c.len_utf16();
            }

            return Ok(line_start + char_offset);
        }

        line_start += line.len();
        line_count += 1;
    }

    // The empty line after a trailing newline, or an empty document.
    if position.line as usize == line_count && (text.is_empty() || text.ends_with('\n')) {
        return Ok(text.len());
    }

    bail!(format!(
        "Line {} is outside of the document, which has {line_count} lines",
        position.line
    ));
}

/// Applies edits whose ranges refer to the original text. Edits may arrive in
/// any order but must not overlap. Inserts at the same position keep the
/// order they were given in.
pub fn apply_text_edits(text: &str, edits: &[TextEdit]) -> Result<String> {
    let mut resolved = edits
        .iter()
        .enumerate()
        .map(|(idx, edit)| -> Result<(usize, usize, usize, &str)> {
            let start = offset_of(text, edit.range.start)?;
            let end = offset_of(text, edit.range.end)?;
            if end < start {
                bail!("Edit range ends before it starts");
            }

            return Ok((start, end, idx, edit.new_text.as_str()));
        })
        .collect::<Result<Vec<_>>>()?;

    // Applied back to front, so offsets of edits still to come stay valid.
    resolved.sort_by(|a, b| return b.0.cmp(&a.0).then(b.2.cmp(&a.2)));
    for pair in resolved.windows(2) {
        if pair[1].1 > pair[0].0 {
            bail!("Edits overlap and cannot be applied together");
        }
    }

    let mut result = text.to_string();
    for (start, end, _, new_text) in resolved {
        result.replace_range(start..end, new_text);
    }

    return Ok(result);
}

/// The host editor the chat panel lives in. Everything the panel asks of the
/// editor goes through here.
#[async_trait]
pub trait Editor {
    /// Returns the name of the editor.
    fn name(&self) -> EditorName;

    /// Used at startup to verify all configurations are available to work with
    /// the editor.
    async fn health_check(&self) -> Result<()>;

    /// Snapshot of the workspace root, active file, language and selection,
    /// taken when the user submits a message.
    async fn get_context(&self) -> Result<Option<WorkspaceContext>>;

    /// Runs a shell command in a terminal owned by the editor.
    async fn execute_command(&self, command: &str) -> Result<()>;

    /// Opens a file, moving the cursor to the one based `line` when provided.
    async fn open_file(&self, file_path: &str, line: Option<u32>) -> Result<()>;

    /// Replaces each edit's range in the file with its new text.
    async fn apply_edit(&self, file_path: &str, edits: &[TextEdit]) -> Result<()>;
}

pub type EditorBox = Box<dyn Editor + Send + Sync>;
