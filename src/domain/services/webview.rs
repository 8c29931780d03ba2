#[cfg(test)]
#[path = "webview_test.rs"]
mod tests;

use anyhow::Result;

use super::renderer::escape_html;
use super::renderer::ContentRenderer;
use crate::domain::models::CodeBlock;
use crate::domain::models::Composer;
use crate::domain::models::FileLink;
use crate::domain::models::HostEvent;
use crate::domain::models::KeyInput;
use crate::domain::models::Message;
use crate::domain::models::Status;
use crate::domain::models::UiEvent;

/// Something the user clicked inside an assistant message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickTarget {
    CodeBlock(CodeBlock),
    Link(String),
}

/// Asks the user a yes or no question.
pub trait Confirmation {
    fn confirm(&self, prompt: &str) -> bool;
}

const WELCOME: &str = r#"<div class="empty-state">
<div class="empty-state-icon">💬</div>
<h2>Welcome to Galaxy Code</h2>
<p>Start a conversation with your AI coding assistant</p>
<div class="suggestions">
<div class="suggestion-item"><span class="suggestion-icon">🔍</span><span>Explain code</span></div>
<div class="suggestion-item"><span class="suggestion-icon">✨</span><span>Generate code</span></div>
<div class="suggestion-item"><span class="suggestion-icon">🐛</span><span>Fix bugs</span></div>
<div class="suggestion-item"><span class="suggestion-icon">📝</span><span>Write tests</span></div>
</div>
</div>"#;

const LOADING: &str = r#"<div class="loading-message"><div class="loading-avatar"><div class="loading-spinner"></div></div><div class="loading-content"><div class="loading-text">Thinking...</div><div class="loading-dots"><span></span><span></span><span></span></div></div></div>"#;

/// Everything a chat surface shows. The state only changes through host
/// events and user input, and user intents come back out as bridge events.
#[derive(Default)]
pub struct WebviewState {
    messages: Vec<Message>,
    status: Status,
    is_loading: bool,
    composer: Composer,
}

impl WebviewState {
    /// First event a surface sends once it is ready.
    pub fn mount(&self) -> UiEvent {
        return UiEvent::GetHistory;
    }

    pub fn messages(&self) -> &[Message] {
        return &self.messages;
    }

    pub fn status(&self) -> Status {
        return self.status;
    }

    pub fn is_loading(&self) -> bool {
        return self.is_loading;
    }

    pub fn composer(&self) -> &Composer {
        return &self.composer;
    }

    pub fn composer_mut(&mut self) -> &mut Composer {
        return &mut self.composer;
    }

    pub fn handle_host_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::Message(message) => {
                self.messages.push(message);
                self.is_loading = false;
            }
            HostEvent::History(messages) => {
                self.messages = messages;
            }
            HostEvent::ClearHistory => {
                self.messages.clear();
            }
            HostEvent::Status(update) => {
                self.status = update.status;
                self.is_loading = update.status == Status::Thinking;
            }
        }
    }

    /// Content is trimmed, and nothing is sent while an answer is pending.
    pub fn send_message(&mut self, content: &str) -> Option<UiEvent> {
        let content = content.trim();
        if content.is_empty() || self.is_loading {
            return None;
        }

        self.is_loading = true;
        return Some(UiEvent::SendMessage {
            content: content.to_string(),
        });
    }

    pub fn key(&mut self, input: KeyInput) -> Option<UiEvent> {
        let content = self.composer.input(input, self.is_loading)?;
        return self.send_message(&content);
    }

    pub fn clear_history(&mut self) -> UiEvent {
        self.messages.clear();
        return UiEvent::ClearHistory;
    }

    pub fn message_count_label(&self) -> String {
        if self.messages.len() == 1 {
            return "1 message".to_string();
        }

        return format!("{} messages", self.messages.len());
    }

    /// Shell code blocks run only after the user confirms. `file://` links
    /// open in the editor and are never followed by the surface itself.
    pub fn click(&self, target: &ClickTarget, confirmation: &dyn Confirmation) -> Option<UiEvent> {
        match target {
            ClickTarget::CodeBlock(codeblock) => {
                if !codeblock.is_command() {
                    return None;
                }
                if !confirmation.confirm("Execute this command in terminal?") {
                    return None;
                }

                return Some(UiEvent::ExecuteCommand {
                    command: codeblock.code.to_string(),
                });
            }
            ClickTarget::Link(href) => {
                let link = FileLink::parse(href)?;
                return Some(UiEvent::OpenFile {
                    file_path: link.path,
                    line: link.line,
                });
            }
        }
    }

    fn render_header(&self) -> String {
        return format!(
            r#"<div class="header"><div class="header-left"><div class="header-logo"><span class="logo-icon">🌌</span><span class="logo-text">Galaxy Code</span></div><div class="header-status"><span class="status-indicator" style="background-color: {}"></span><span class="status-text">{}</span></div></div><div class="header-right"><div class="message-count">{}</div></div></div>"#,
            self.status.color(),
            self.status.label(),
            self.message_count_label()
        );
    }

    fn render_message(&self, message: &Message, renderer: &ContentRenderer) -> Result<String> {
        return Ok(format!(
            r#"<div class="message-item message-{role}" data-id="{id}"><div class="message-avatar"><span class="avatar-icon">{avatar}</span></div><div class="message-body"><div class="message-header"><span class="message-role">{label}</span><span class="message-time">{time}</span></div><div class="message-content">{content}</div></div></div>"#,
            role = message.role,
            id = escape_html(&message.id)?,
            avatar = message.role.avatar(),
            label = message.role.label(),
            time = message.time_label(),
            content = renderer.render(message)?,
        ));
    }

    /// The header and message list as HTML.
    pub fn render(&self, renderer: &ContentRenderer) -> Result<String> {
        let mut items = vec![];
        if self.messages.is_empty() && !self.is_loading {
            items.push(WELCOME.to_string());
        }
        for message in self.messages.iter() {
            items.push(self.render_message(message, renderer)?);
        }
        if self.is_loading {
            items.push(LOADING.to_string());
        }

        return Ok(format!(
            "{}\n<div class=\"message-list\">\n{}\n</div>",
            self.render_header(),
            items.join("\n")
        ));
    }
}
