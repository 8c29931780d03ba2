#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use chrono::Local;
use chrono::TimeZone;
use chrono::Utc;
use pulldown_cmark::Event;
use pulldown_cmark::Parser;
use pulldown_cmark::Tag;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use uuid::Uuid;

use super::codeblock_language;
use super::markdown_options;
use super::Role;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeBlock {
    pub language: String,
    pub code: String,
}

impl CodeBlock {
    /// Shell blocks can be sent to a terminal once the user confirms.
    pub fn is_command(&self) -> bool {
        return ["bash", "sh", "shell"].contains(&self.language.as_str());
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: i64,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Message {
        let timestamp = Utc::now().timestamp_millis();

        return Message {
            id: Message::create_id(timestamp),
            role,
            content: content.to_string(),
            timestamp,
        };
    }

    fn create_id(timestamp: i64) -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        return format!("{timestamp}-{}", &suffix[..9]);
    }

    /// Local wall clock time of the message, such as `03:45 PM`.
    pub fn time_label(&self) -> String {
        if let Some(date) = Local.timestamp_millis_opt(self.timestamp).single() {
            return date.format("%I:%M %p").to_string();
        }

        return "".to_string();
    }

    /// Code blocks in the order they are displayed, found with the same
    /// markdown parser the renderer uses.
    pub fn codeblocks(&self) -> Vec<CodeBlock> {
        let mut codeblocks: Vec<CodeBlock> = vec![];
        let mut current: Option<CodeBlock> = None;

        for event in Parser::new_ext(&self.content, markdown_options()) {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    current = Some(CodeBlock {
                        language: codeblock_language(&kind),
                        code: String::new(),
                    });
                }
                Event::Text(text) => {
                    if let Some(codeblock) = current.as_mut() {
                        codeblock.code.push_str(&text);
                    }
                }
                Event::End(Tag::CodeBlock(_)) => {
                    if let Some(mut codeblock) = current.take() {
                        if codeblock.code.ends_with('\n') {
                            codeblock.code.pop();
                        }
                        codeblocks.push(codeblock);
                    }
                }
                _ => {}
            }
        }

        return codeblocks;
    }
}
