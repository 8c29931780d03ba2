#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

mod application;
mod configuration;
mod domain;
mod infrastructure;

use std::env;
use std::process;
use std::sync::Arc;

use anyhow::anyhow;
use anyhow::Error;
use anyhow::Result;
use yansi::Paint;

use crate::application::cli;
use crate::application::cli::Mode;
use crate::application::host;
use crate::application::repl;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::EditorName;
use crate::domain::services::ChatSession;
use crate::domain::services::Orchestrator;
use crate::infrastructure::editors::EditorManager;

fn handle_error(err: Error) {
    eprintln!(
        "{}",
        Paint::red(format!(
            "Oh no! Galaxy Chat has failed with the following app version and error.\n\nVersion: {}\nCommit: {}\nError: {:#}",
            env!("CARGO_PKG_VERSION"),
            env!("VERGEN_GIT_DESCRIBE"),
            err
        ))
    );

    let backtrace = err.backtrace();
    if backtrace.to_string() == "disabled backtrace" {
        let args = env::args().collect::<Vec<String>>().join(" ");
        eprintln!("\nRunning the following can help explain further what the issue is:");
        eprintln!("\nRUST_BACKTRACE=1 {args}");
        eprintln!(
            "\nDebug logs are written to {} when RUST_LOG=galaxy_chat is set.",
            cli::log_dir().join("debug.log").display()
        );
    } else {
        eprintln!("\n{}", backtrace);
    }

    process::exit(1);
}

async fn build_session() -> Result<Arc<ChatSession>> {
    let editor_str = Config::get(ConfigKey::Editor);
    let editor_name = EditorName::parse(editor_str.to_string())
        .ok_or_else(|| return anyhow!(format!("No editor named {editor_str}")))?;
    let editor = EditorManager::get(editor_name)?;
    if let Err(err) = editor.health_check().await {
        tracing::warn!(editor = %editor.name(), err = ?err, "Editor failed its health check");
    }

    let orchestrator = Orchestrator::from_config().await?;
    tracing::info!(
        engine = %orchestrator.engine_name(),
        provider = %orchestrator.provider().await,
        "Chat session ready"
    );

    return Ok(Arc::new(ChatSession::new(orchestrator, editor)));
}

async fn run(mode: Mode) -> Result<()> {
    let session = build_session().await?;

    match mode {
        Mode::Serve => return host::start(session, &Config::get(ConfigKey::Listen)).await,
        Mode::Chat => return repl::start(session).await,
    }
}

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    // stdout belongs to the bridge, so logs only ever go to a file.
    let file_appender = tracing_appender::rolling::never(cli::log_dir(), "debug.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    if env::var("RUST_LOG")
        .unwrap_or_else(|_| return "".to_string())
        .contains("galaxy_chat")
    {
        tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(writer)
            .init();
    }

    let mode = match cli::parse().await {
        Ok(Some(mode)) => mode,
        Ok(None) => process::exit(0),
        Err(err) => {
            handle_error(err);
            return;
        }
    };

    if let Err(err) = run(mode).await {
        handle_error(err);
    }

    process::exit(0);
}
