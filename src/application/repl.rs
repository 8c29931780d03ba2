use std::io;
use std::sync::Arc;

use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;
use tokio::sync::mpsc;
use tokio::task;
use yansi::Paint;

use crate::domain::models::CodeBlock;
use crate::domain::models::HostEvent;
use crate::domain::models::Key;
use crate::domain::models::KeyInput;
use crate::domain::models::Message;
use crate::domain::models::ProviderName;
use crate::domain::models::Role;
use crate::domain::models::SlashCommand;
use crate::domain::models::Status;
use crate::domain::models::Surface;
use crate::domain::models::SurfaceBox;
use crate::domain::models::UiEvent;
use crate::domain::services::ChatSession;
use crate::domain::services::ClickTarget;
use crate::domain::services::CodeBlocks;
use crate::domain::services::Confirmation;
use crate::domain::services::WebviewState;
use crate::infrastructure::surfaces::ChannelSurface;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /clear (/cl) - Clears the conversation for every open chat panel.
- /run (/r) [CODE_BLOCK_NUMBER?] - Runs a shell code block in the editor's terminal after confirming. Defaults to the last shell code block.
- /open (/o) [file://PATH#LLINE] - Opens a file link from the conversation in the editor.
- /provider (/p) [gemini,claude,ollama] - Switches the model provider and saves it to the config file.
- /quit /exit (/q) - Exit Galaxy Chat.
- /help (/h) - Provides this help menu.

INPUT:
- Enter - Sends the message.
- End a line with \ - Continues the message on a new line, the same as Shift+Enter in a chat panel.
        "#;

    return text.trim().to_string();
}

struct TerminalConfirmation {}

impl Confirmation for TerminalConfirmation {
    fn confirm(&self, prompt: &str) -> bool {
        return task::block_in_place(|| {
            return Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(prompt)
                .default(false)
                .interact()
                .unwrap_or(false);
        });
    }
}

fn print_message(message: &Message, codeblock_offset: usize) {
    let label = match message.role {
        Role::User => Paint::cyan(message.role.label()).bold(),
        Role::Assistant => Paint::magenta(message.role.label()).bold(),
    };
    println!("\n{label} {}", Paint::new(message.time_label()).dimmed());
    println!("{}", message.content);

    if message.role != Role::Assistant {
        return;
    }

    for (idx, codeblock) in message.codeblocks().iter().enumerate() {
        if codeblock.is_command() {
            println!(
                "{}",
                Paint::new(format!(
                    "({}) {} can be run with /run {}",
                    codeblock_offset + idx + 1,
                    codeblock.language,
                    codeblock_offset + idx + 1
                ))
                .dimmed()
            );
        }
    }
}

fn codeblock_count(messages: &[Message]) -> usize {
    let mut codeblocks = CodeBlocks::default();
    codeblocks.replace_from_messages(messages);
    return codeblocks.count();
}

fn print_error(text: &str) {
    eprintln!("{}", Paint::red(text));
}

/// Reads one line without holding stdin between reads, so confirmation
/// prompts can use the terminal in between.
async fn read_line() -> Result<Option<String>> {
    let res = task::spawn_blocking(|| -> Result<Option<String>> {
        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        return Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()));
    })
    .await??;

    return Ok(res);
}

struct Repl {
    session: Arc<ChatSession>,
    surface_id: String,
    state: WebviewState,
}

impl Repl {
    async fn dispatch(&self, event: UiEvent) {
        if let UiEvent::SendMessage { .. } = event {
            let session = self.session.clone();
            let surface_id = self.surface_id.clone();
            tokio::spawn(async move {
                if let Err(err) = session.handle_event(&surface_id, event).await {
                    tracing::error!(error = ?err, "Failed to send message");
                }
            });
            return;
        }

        if let Err(err) = self.session.handle_event(&self.surface_id, event).await {
            print_error(&err.to_string());
        }
    }

    fn handle_host_event(&mut self, event: HostEvent) {
        match &event {
            HostEvent::Message(message) => {
                print_message(message, codeblock_count(self.state.messages()));
            }
            HostEvent::History(messages) => {
                for (idx, message) in messages.iter().enumerate() {
                    print_message(message, codeblock_count(&messages[..idx]));
                }
            }
            HostEvent::ClearHistory => {
                println!("{}", Paint::new("Chat history cleared.").dimmed());
            }
            HostEvent::Status(update) => {
                if update.status != Status::Idle {
                    println!(
                        "{}",
                        Paint::blue(update.status.label()).dimmed()
                    );
                }
            }
        }

        self.state.handle_host_event(event);
    }

    /// Returns false when the user asked to quit.
    async fn handle_command(&mut self, command: SlashCommand) -> bool {
        if command.is_quit() {
            return false;
        }

        if command.is_help() {
            println!("{}", help_text());
        } else if command.is_clear() {
            let event = self.state.clear_history();
            self.dispatch(event).await;
        } else if command.is_run() {
            let mut codeblocks = CodeBlocks::default();
            codeblocks.replace_from_messages(self.state.messages());
            match codeblocks.command_from_slash_command(&command) {
                Ok(code) => {
                    println!("{}", Paint::new(&code).dimmed());
                    let target = ClickTarget::CodeBlock(CodeBlock {
                        language: "bash".to_string(),
                        code,
                    });
                    if let Some(event) = self.state.click(&target, &TerminalConfirmation {}) {
                        self.dispatch(event).await;
                    }
                }
                Err(err) => print_error(&err.to_string()),
            }
        } else if command.is_open() {
            let href = command.args.first().map(|e| return e.to_string()).unwrap_or_default();
            match self
                .state
                .click(&ClickTarget::Link(href), &TerminalConfirmation {})
            {
                Some(event) => self.dispatch(event).await,
                None => print_error("Only file:// links can be opened, such as /open file:///src/main.rs#L12"),
            }
        } else if command.is_provider() {
            let name = command.args.first().map(|e| return e.as_str()).unwrap_or("");
            match ProviderName::parse(name) {
                Some(provider) => {
                    if let Err(err) = self.session.orchestrator().change_provider(provider).await {
                        print_error(&err.to_string());
                    } else {
                        println!("Provider set to {provider}");
                    }
                }
                None => print_error("Pick one of gemini, claude or ollama, such as /provider ollama"),
            }
        }

        return true;
    }

    /// Returns false when the user asked to quit.
    async fn handle_line(&mut self, line: String) -> bool {
        if self.state.composer().text().is_empty() {
            if let Some(command) = SlashCommand::parse(&line) {
                return self.handle_command(command).await;
            }
        }

        if let Some(continued) = line.strip_suffix('\\') {
            self.state.composer_mut().type_str(continued);
            self.state.key(KeyInput::shifted(Key::Enter));
            return true;
        }

        self.state.composer_mut().type_str(&line);
        if self.state.is_loading() {
            print_error("Still waiting on the last answer, your message is kept until it arrives.");
            self.state.key(KeyInput::shifted(Key::Enter));
            return true;
        }
        if let Some(event) = self.state.key(KeyInput::new(Key::Enter)) {
            self.dispatch(event).await;
        }

        return true;
    }
}

/// Chat from the terminal. The terminal is just another surface of the
/// session, so it behaves the same as a webview panel.
pub async fn start(session: Arc<ChatSession>) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<HostEvent>();
    let surface: SurfaceBox = Arc::new(ChannelSurface::new(tx));
    let surface_id = surface.id().to_string();
    session.register_surface(surface);

    println!(
        "{} {}",
        Paint::new("Galaxy Code").bold(),
        Paint::new(format!(
            "({}, {}). Type /help for commands.",
            session.orchestrator().engine_name(),
            session.orchestrator().provider().await
        ))
        .dimmed()
    );

    let mut repl = Repl {
        session: session.clone(),
        surface_id: surface_id.clone(),
        state: WebviewState::default(),
    };
    let mount = repl.state.mount();
    repl.dispatch(mount).await;

    let mut input = Box::pin(read_line());
    loop {
        tokio::select!(
            Some(event) = rx.recv() => {
                repl.handle_host_event(event);
            }
            line = &mut input => {
                let line = match line? {
                    Some(line) => line,
                    None => break,
                };
                if !repl.handle_line(line).await {
                    break;
                }
                input = Box::pin(read_line());
            }
        );
    }

    session.unregister_surface(&surface_id);
    return Ok(());
}
