#[cfg(test)]
#[path = "event_test.rs"]
mod tests;

use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;

use super::Message;
use super::Status;
use super::TextEdit;

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// Events crossing the bridge between the host and a chat surface. Each event
/// is one JSON object on its own line, tagged by `type`.
pub trait BridgeEvent: Serialize + DeserializeOwned {
    /// Every `type` this side of the bridge understands.
    const KINDS: &'static [&'static str];

    /// Returns `None` for kinds this version does not know about, so newer
    /// peers can add events without breaking older ones.
    fn decode(line: &str) -> Result<Option<Self>> {
        let envelope: Envelope = serde_json::from_str(line)?;
        match envelope.kind {
            Some(kind) if Self::KINDS.contains(&kind.as_str()) => {
                return Ok(Some(serde_json::from_str(line)?));
            }
            _ => return Ok(None),
        }
    }

    fn encode(&self) -> Result<String> {
        return Ok(serde_json::to_string(self)?);
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: Status,
}

/// Host to surface.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum HostEvent {
    Message(Message),
    History(Vec<Message>),
    ClearHistory,
    Status(StatusUpdate),
}

impl HostEvent {
    pub fn status(status: Status) -> HostEvent {
        return HostEvent::Status(StatusUpdate { status });
    }
}

impl BridgeEvent for HostEvent {
    const KINDS: &'static [&'static str] = &["message", "history", "clearHistory", "status"];
}

/// Surface to host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum UiEvent {
    SendMessage {
        content: String,
    },
    GetHistory,
    ClearHistory,
    ExecuteCommand {
        command: String,
    },
    OpenFile {
        #[serde(rename = "filePath")]
        file_path: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        line: Option<u32>,
    },
    ApplyEdit {
        #[serde(rename = "filePath")]
        file_path: String,
        edits: Vec<TextEdit>,
    },
}

impl BridgeEvent for UiEvent {
    const KINDS: &'static [&'static str] = &[
        "sendMessage",
        "getHistory",
        "clearHistory",
        "executeCommand",
        "openFile",
        "applyEdit",
    ];
}
