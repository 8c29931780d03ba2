#[cfg(test)]
#[path = "chat_session_test.rs"]
mod tests;

use anyhow::Result;
use dashmap::DashMap;
use tokio::sync::Mutex;

use super::Orchestrator;
use crate::domain::models::EditorBox;
use crate::domain::models::HostEvent;
use crate::domain::models::Message;
use crate::domain::models::Role;
use crate::domain::models::Status;
use crate::domain::models::SurfaceBox;
use crate::domain::models::UiEvent;
use crate::domain::models::WorkspaceContext;

/// Owns the conversation and every surface showing it. One session lives for
/// the whole process; surfaces come and go.
pub struct ChatSession {
    history: Mutex<Vec<Message>>,
    surfaces: DashMap<String, SurfaceBox>,
    orchestrator: Orchestrator,
    editor: EditorBox,
}

impl ChatSession {
    pub fn new(orchestrator: Orchestrator, editor: EditorBox) -> ChatSession {
        return ChatSession {
            history: Mutex::new(vec![]),
            surfaces: DashMap::new(),
            orchestrator,
            editor,
        };
    }

    pub fn orchestrator(&self) -> &Orchestrator {
        return &self.orchestrator;
    }

    pub fn editor(&self) -> &EditorBox {
        return &self.editor;
    }

    pub fn register_surface(&self, surface: SurfaceBox) {
        tracing::debug!(surface = surface.id(), "Registered surface");
        self.surfaces.insert(surface.id().to_string(), surface);
    }

    pub fn unregister_surface(&self, surface_id: &str) {
        if self.surfaces.remove(surface_id).is_some() {
            tracing::debug!(surface = surface_id, "Unregistered surface");
        }
    }

    pub fn surface_count(&self) -> usize {
        return self.surfaces.len();
    }

    pub async fn history(&self) -> Vec<Message> {
        return self.history.lock().await.clone();
    }

    fn broadcast(&self, event: HostEvent) {
        for surface in self.surfaces.iter() {
            if let Err(err) = surface.post(event.clone()) {
                tracing::warn!(error = ?err, surface = %surface.key(), "Failed to post to surface");
            }
        }
    }

    fn post_to(&self, surface_id: &str, event: HostEvent) {
        match self.surfaces.get(surface_id) {
            Some(surface) => {
                if let Err(err) = surface.post(event) {
                    tracing::warn!(error = ?err, surface = surface_id, "Failed to post to surface");
                }
            }
            None => {
                tracing::debug!(surface = surface_id, "Dropping event for unknown surface");
            }
        }
    }

    /// Broadcasting while the history lock is held keeps every surface seeing
    /// messages in history order.
    async fn append(&self, role: Role, content: &str) -> Message {
        let message = Message::new(role, content);
        let mut history = self.history.lock().await;
        history.push(message.clone());
        self.broadcast(HostEvent::Message(message.clone()));

        return message;
    }

    /// Submits a message with the editor's current context.
    pub async fn send_message(&self, content: &str) {
        self.respond(content, self.capture_context()).await;
    }

    async fn capture_context(&self) -> Result<Option<WorkspaceContext>> {
        return self.editor.get_context().await;
    }

    /// Adds the user's message and the assistant's answer to the history,
    /// always two messages per call. Failures end up in the conversation,
    /// never in the return value.
    pub async fn submit_user_message(&self, content: &str, context: Option<WorkspaceContext>) {
        self.respond(content, async { return Ok(context) }).await;
    }

    async fn respond<F>(&self, content: &str, context: F)
    where
        F: std::future::Future<Output = Result<Option<WorkspaceContext>>>,
    {
        self.append(Role::User, content).await;
        self.broadcast(HostEvent::status(Status::Thinking));

        let context = match context.await {
            Ok(context) => context,
            Err(err) => {
                tracing::error!(error = ?err, "Failed to capture workspace context");
                self.append(Role::Assistant, &format!("Error: {err}")).await;
                self.broadcast(HostEvent::status(Status::Error));
                return;
            }
        };

        let reply = self
            .orchestrator
            .process_message(content, context.as_ref())
            .await;
        self.append(Role::Assistant, &reply.content).await;

        if reply.failed {
            self.broadcast(HostEvent::status(Status::Error));
        } else {
            self.broadcast(HostEvent::status(Status::Idle));
        }
    }

    pub async fn clear_history(&self) {
        let mut history = self.history.lock().await;
        history.clear();
        self.broadcast(HostEvent::ClearHistory);
    }

    /// Dispatches one event from a surface. Only editor actions can fail.
    pub async fn handle_event(&self, surface_id: &str, event: UiEvent) -> Result<()> {
        match event {
            UiEvent::SendMessage { content } => {
                self.send_message(&content).await;
            }
            UiEvent::GetHistory => {
                let history = self.history().await;
                self.post_to(surface_id, HostEvent::History(history));
            }
            UiEvent::ClearHistory => {
                self.clear_history().await;
            }
            UiEvent::ExecuteCommand { command } => {
                self.editor.execute_command(&command).await?;
            }
            UiEvent::OpenFile { file_path, line } => {
                self.editor.open_file(&file_path, line).await?;
            }
            UiEvent::ApplyEdit { file_path, edits } => {
                self.editor.apply_edit(&file_path, &edits).await?;
            }
        }

        return Ok(());
    }
}
