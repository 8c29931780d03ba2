use serde_derive::Deserialize;
use serde_derive::Serialize;

/// Zero based line and character offsets, as editors report them.
/// `character` counts UTF-16 code units, not chars or bytes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    #[serde(default)]
    pub start: Position,
    #[serde(default)]
    pub end: Position,
    #[serde(default)]
    pub text: String,
}

/// Snapshot of the editor taken when the user submits a message. Never stored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceContext {
    #[serde(default)]
    pub workspace_root: Option<String>,
    #[serde(default)]
    pub active_file: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub selection: Option<Selection>,
}

fn present(value: &Option<String>) -> Option<&str> {
    return value
        .as_deref()
        .filter(|value| return !value.is_empty());
}

impl WorkspaceContext {
    pub fn workspace_root(&self) -> Option<&str> {
        return present(&self.workspace_root);
    }

    pub fn active_file(&self) -> Option<&str> {
        return present(&self.active_file);
    }

    pub fn language(&self) -> Option<&str> {
        return present(&self.language);
    }

    pub fn selected_text(&self) -> Option<&str> {
        return self
            .selection
            .as_ref()
            .map(|selection| return selection.text.as_str())
            .filter(|text| return !text.is_empty());
    }
}
