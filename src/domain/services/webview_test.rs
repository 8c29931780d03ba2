use std::cell::RefCell;

use anyhow::Result;

use super::ClickTarget;
use super::Confirmation;
use super::WebviewState;
use crate::domain::models::CodeBlock;
use crate::domain::models::HostEvent;
use crate::domain::models::Key;
use crate::domain::models::KeyInput;
use crate::domain::models::Message;
use crate::domain::models::Role;
use crate::domain::models::Status;
use crate::domain::models::UiEvent;
use crate::domain::services::ContentRenderer;

struct Answer {
    accept: bool,
    prompts: RefCell<Vec<String>>,
}

impl Answer {
    fn new(accept: bool) -> Answer {
        return Answer {
            accept,
            prompts: RefCell::new(vec![]),
        };
    }
}

impl Confirmation for Answer {
    fn confirm(&self, prompt: &str) -> bool {
        self.prompts.borrow_mut().push(prompt.to_string());
        return self.accept;
    }
}

fn shell_block() -> ClickTarget {
    return ClickTarget::CodeBlock(CodeBlock {
        language: "bash".to_string(),
        code: "cargo test".to_string(),
    });
}

#[test]
fn it_requests_history_on_mount() {
    assert_eq!(WebviewState::default().mount(), UiEvent::GetHistory);
}

#[test]
fn it_applies_host_events() {
    let mut state = WebviewState::default();
    state.handle_host_event(HostEvent::status(Status::Thinking));
    assert!(state.is_loading());
    assert_eq!(state.status(), Status::Thinking);

    state.handle_host_event(HostEvent::Message(Message::new(Role::Assistant, "hi")));
    assert!(!state.is_loading());
    assert_eq!(state.messages().len(), 1);

    state.handle_host_event(HostEvent::History(vec![
        Message::new(Role::User, "a"),
        Message::new(Role::Assistant, "b"),
    ]));
    assert_eq!(state.messages().len(), 2);

    state.handle_host_event(HostEvent::status(Status::Error));
    assert!(!state.is_loading());
    assert_eq!(state.status().label(), "Error");

    state.handle_host_event(HostEvent::ClearHistory);
    assert!(state.messages().is_empty());
}

#[test]
fn it_sends_trimmed_messages() {
    let mut state = WebviewState::default();
    let res = state.send_message("  hello \n");

    assert_eq!(
        res,
        Some(UiEvent::SendMessage {
            content: "hello".to_string()
        })
    );
    assert!(state.is_loading());
}

#[test]
fn it_refuses_to_send_while_loading_or_blank() {
    let mut state = WebviewState::default();
    assert_eq!(state.send_message("   "), None);

    state.handle_host_event(HostEvent::status(Status::Thinking));
    assert_eq!(state.send_message("hello"), None);
}

#[test]
fn it_submits_from_the_composer() {
    let mut state = WebviewState::default();
    for c in "hi".chars() {
        assert_eq!(state.key(KeyInput::new(Key::Char(c))), None);
    }
    assert_eq!(state.key(KeyInput::shifted(Key::Enter)), None);
    for c in "there".chars() {
        state.key(KeyInput::new(Key::Char(c)));
    }

    let res = state.key(KeyInput::new(Key::Enter));
    assert_eq!(
        res,
        Some(UiEvent::SendMessage {
            content: "hi\nthere".to_string()
        })
    );
    assert_eq!(state.composer().text(), "");

    state.key(KeyInput::new(Key::Char('x')));
    assert_eq!(state.key(KeyInput::new(Key::Enter)), None);
    assert_eq!(state.composer().text(), "x");
}

#[test]
fn it_clears_locally_right_away() {
    let mut state = WebviewState::default();
    state.handle_host_event(HostEvent::Message(Message::new(Role::User, "a")));

    assert_eq!(state.clear_history(), UiEvent::ClearHistory);
    assert!(state.messages().is_empty());
}

#[test]
fn it_labels_message_counts() {
    let mut state = WebviewState::default();
    assert_eq!(state.message_count_label(), "0 messages");

    state.handle_host_event(HostEvent::Message(Message::new(Role::User, "a")));
    assert_eq!(state.message_count_label(), "1 message");

    state.handle_host_event(HostEvent::Message(Message::new(Role::Assistant, "b")));
    assert_eq!(state.message_count_label(), "2 messages");
}

#[test]
fn it_runs_shell_blocks_after_confirmation() {
    let answer = Answer::new(true);
    let res = WebviewState::default().click(&shell_block(), &answer);

    assert_eq!(
        res,
        Some(UiEvent::ExecuteCommand {
            command: "cargo test".to_string()
        })
    );
    assert_eq!(
        *answer.prompts.borrow(),
        vec!["Execute this command in terminal?".to_string()]
    );
}

#[test]
fn it_does_nothing_when_declined() {
    let answer = Answer::new(false);
    let res = WebviewState::default().click(&shell_block(), &answer);

    assert_eq!(res, None);
    assert_eq!(answer.prompts.borrow().len(), 1);
}

#[test]
fn it_ignores_clicks_on_other_code() {
    let answer = Answer::new(true);
    let target = ClickTarget::CodeBlock(CodeBlock {
        language: "rust".to_string(),
        code: "fn main() {}".to_string(),
    });

    assert_eq!(WebviewState::default().click(&target, &answer), None);
    assert!(answer.prompts.borrow().is_empty());
}

#[test]
fn it_opens_file_links() {
    let answer = Answer::new(true);
    let state = WebviewState::default();

    let res = state.click(
        &ClickTarget::Link("file:///w/src/main.rs#L42".to_string()),
        &answer,
    );
    assert_eq!(
        res,
        Some(UiEvent::OpenFile {
            file_path: "/w/src/main.rs".to_string(),
            line: Some(42),
        })
    );

    let res = state.click(
        &ClickTarget::Link("file:///w/src/main.rs".to_string()),
        &answer,
    );
    assert_eq!(
        res,
        Some(UiEvent::OpenFile {
            file_path: "/w/src/main.rs".to_string(),
            line: None,
        })
    );

    let res = state.click(&ClickTarget::Link("https://example.com".to_string()), &answer);
    assert_eq!(res, None);
}

#[test]
fn it_renders_the_empty_state() -> Result<()> {
    let res = WebviewState::default().render(&ContentRenderer::new(true))?;

    assert!(res.contains("Welcome to Galaxy Code"));
    assert!(res.contains("<span class=\"status-text\">Ready</span>"));
    assert!(res.contains("0 messages"));
    assert!(!res.contains("Thinking..."));
    return Ok(());
}

#[test]
fn it_renders_messages_and_loading() -> Result<()> {
    let mut state = WebviewState::default();
    state.handle_host_event(HostEvent::Message(Message::new(Role::User, "<hi>")));
    state.handle_host_event(HostEvent::status(Status::Thinking));

    let res = state.render(&ContentRenderer::new(true))?;
    assert!(!res.contains("Welcome to Galaxy Code"));
    assert!(res.contains("<span class=\"message-role\">You</span>"));
    assert!(res.contains("<div class=\"message-text\">&lt;hi&gt;</div>"));
    assert!(res.contains("Processing..."));
    assert!(res.contains("Thinking..."));
    return Ok(());
}
