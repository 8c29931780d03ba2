#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::env;
use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Password;
use dialoguer::Select;
use strum::VariantNames;
use tokio::fs;
use yansi::Paint;

use super::repl::help_text;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::EditorName;
use crate::domain::models::ProviderName;
use crate::domain::services::ContentRenderer;
use crate::domain::services::Syntaxes;
use crate::domain::services::Themes;
use crate::domain::services::WebviewPage;
use crate::domain::services::WebviewState;

/// What the binary should run once the command line is handled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Serve,
    Chat,
}

pub fn log_dir() -> path::PathBuf {
    if let Ok(dir) = env::var("GALAXY_LOG_DIR") {
        return path::PathBuf::from(dir);
    }

    return dirs::cache_dir()
        .unwrap_or_else(env::temp_dir)
        .join("galaxy-chat");
}

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::write(&config_file_path, Config::serialize_default(build())).await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

async fn set_provider(provider: Option<&String>) -> Result<()> {
    let provider = match provider {
        Some(provider) => provider.to_string(),
        None => {
            let idx = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("Which provider should Galaxy Code use?")
                .default(0)
                .items(ProviderName::VARIANTS)
                .interact_opt()?;

            match idx {
                Some(idx) => ProviderName::VARIANTS[idx].to_string(),
                None => return Ok(()),
            }
        }
    };

    Config::persist(
        &Config::get(ConfigKey::ConfigFile),
        ConfigKey::Provider,
        &provider,
    )
    .await?;
    println!("Provider set to {provider}");

    return Ok(());
}

async fn set_api_key() -> Result<()> {
    let provider = Config::get(ConfigKey::Provider);
    let api_key = Password::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("API key for {provider}"))
        .interact()?;

    Config::persist(
        &Config::get(ConfigKey::ConfigFile),
        ConfigKey::ApiKey,
        api_key.trim(),
    )
    .await?;
    println!("API key saved to {}", Config::get(ConfigKey::ConfigFile));

    return Ok(());
}

async fn print_page(page_matches: &ArgMatches) -> Result<()> {
    let arg = |name: &str| -> String {
        return page_matches
            .get_one::<String>(name)
            .map(|e| return e.to_string())
            .unwrap_or_default();
    };

    let theme_css = Themes::css(
        &Config::get(ConfigKey::Theme),
        &Config::get(ConfigKey::ThemeFile),
    )?;
    let renderer = ContentRenderer::new(Config::get(ConfigKey::SanitizeHtml) == "true");
    let body = WebviewState::default().render(&renderer)?;
    let page = WebviewPage::new(
        &arg("script-uri"),
        &arg("style-uri"),
        &arg("csp-source"),
        &theme_css,
    )
    .with_body(&body);
    println!("{}", page.render()?);

    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        )
        .subcommand(
            Command::new("set-provider")
                .about("Saves the provider to the configuration file. Omit the provider for an interactive selection.")
                .arg(
                    clap::Arg::new("provider-name")
                        .help("Provider to use")
                        .value_parser(PossibleValuesParser::new(ProviderName::VARIANTS))
                        .required(false),
                )
        )
        .subcommand(
            Command::new("set-api-key").about("Prompts for an API key and saves it to the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    let mut cmd = Command::new("debug");
    cmd = cmd.about("Debug helpers for Galaxy Chat")
        .hide(true)
        .subcommand(
            Command::new("syntaxes").about("List all supported code highlighting languages.")
        )
        .subcommand(
            Command::new("themes").about("List all supported code highlighting themes.")
        )
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running Galaxy Chat with environment variable RUST_LOG=galaxy_chat")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );

    return cmd;
}

fn subcommand_page() -> Command {
    return Command::new("page")
        .about("Outputs the HTML document for a webview chat panel.")
        .long_about("Outputs the HTML document for a webview chat panel. The document only shows the empty conversation until its script mounts. The script bundle and stylesheet are supplied by the editor plugin, not by galaxy-chat, so point the URIs at the plugin's files.")
        .arg(
            clap::Arg::new("script-uri")
                .long("script-uri")
                .help("URI of the webview script bundle supplied by the editor plugin.")
                .default_value("webview-dist/index.js"),
        )
        .arg(
            clap::Arg::new("style-uri")
                .long("style-uri")
                .help("URI of the webview stylesheet supplied by the editor plugin.")
                .default_value("webview-dist/index.css"),
        )
        .arg(
            clap::Arg::new("csp-source")
                .long("csp-source")
                .help("Source allowed to serve stylesheets in the content security policy.")
                .default_value("'self'"),
        );
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") || line.starts_with("INPUT:") {
                return Paint::new(format!("CHAT {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("galaxy-chat")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(Command::new("serve").about("Run the chat host over stdio, one JSON event per line. This is the default."))
        .subcommand(Command::new("chat").about("Chat from the terminal."))
        .subcommand(subcommand_page())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .subcommand(Command::new("manpages").about("Generates manpages and outputs to stdout."))
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("GALAXY_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(
            Arg::new(ConfigKey::Provider.to_string())
                .short('p')
                .long(ConfigKey::Provider.to_string())
                .env("GALAXY_PROVIDER")
                .num_args(1)
                .help(format!("The model provider the orchestrator talks to. [default: {}]", Config::default(ConfigKey::Provider)))
                .value_parser(PossibleValuesParser::new(ProviderName::VARIANTS))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ApiKey.to_string())
                .long(ConfigKey::ApiKey.to_string())
                .env("GALAXY_API_KEY")
                .hide_env_values(true)
                .num_args(1)
                .help("API key for the provider. Not needed for ollama.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Editor.to_string())
                .short('e')
                .long(ConfigKey::Editor.to_string())
                .env("GALAXY_EDITOR")
                .num_args(1)
                .help(format!("The editor to integrate with. [default: {}]", Config::default(ConfigKey::Editor)))
                .value_parser(PossibleValuesParser::new(EditorName::VARIANTS))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::EnginePath.to_string())
                .long(ConfigKey::EnginePath.to_string())
                .env("GALAXY_ENGINE_PATH")
                .num_args(1)
                .help(format!("Location of the Galaxy CLI orchestrator, relative to the workspace. [default: {}]", Config::default(ConfigKey::EnginePath)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Workspace.to_string())
                .short('w')
                .long(ConfigKey::Workspace.to_string())
                .env("GALAXY_WORKSPACE")
                .num_args(1)
                .help("Workspace root the orchestrator is discovered in. [default: current directory]")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Listen.to_string())
                .short('l')
                .long(ConfigKey::Listen.to_string())
                .env("GALAXY_LISTEN")
                .num_args(1)
                .help("Address to accept more chat panels on, such as 127.0.0.1:7300. Panels connected here share the conversation.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Theme.to_string())
                .short('t')
                .long(ConfigKey::Theme.to_string())
                .env("GALAXY_THEME")
                .num_args(1)
                .help(format!("Sets code syntax highlighting theme. [default: {}]", Config::default(ConfigKey::Theme)))
                .value_parser(PossibleValuesParser::new(Themes::list()))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ThemeFile.to_string())
                .long(ConfigKey::ThemeFile.to_string())
                .env("GALAXY_THEME_FILE")
                .num_args(1)
                .help(
                    "Absolute path to a TextMate tmTheme to use for code syntax highlighting."
                )
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::SanitizeHtml.to_string())
                .long(ConfigKey::SanitizeHtml.to_string())
                .env("GALAXY_SANITIZE_HTML")
                .num_args(1)
                .help(format!("Escape raw HTML and drop script links in assistant messages. [default: {}]", Config::default(ConfigKey::SanitizeHtml)))
                .value_parser(PossibleValuesParser::new(["true", "false"]))
                .global(true),
        );
}

pub async fn parse() -> Result<Option<Mode>> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("syntaxes", _)) => {
                    println!("{}", Syntaxes::list().join("\n"));
                }
                Some(("themes", _)) => {
                    println!("{}", Themes::list().join("\n"));
                }
                Some(("log-path", _)) => {
                    let log_path = log_dir().join("debug.log");
                    println!("{}", log_path.display());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(None);
        }
        Some(("serve", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            return Ok(Some(Mode::Serve));
        }
        Some(("chat", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            return Ok(Some(Mode::Chat));
        }
        Some(("page", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            print_page(subcmd_matches).await?;
            return Ok(None);
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(None);
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(None);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(None);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(None);
            }
            Some(("set-provider", provider_matches)) => {
                Config::load(build(), vec![&matches, subcmd_matches, provider_matches]).await?;
                set_provider(provider_matches.get_one::<String>("provider-name")).await?;
                return Ok(None);
            }
            Some(("set-api-key", key_matches)) => {
                Config::load(build(), vec![&matches, subcmd_matches, key_matches]).await?;
                set_api_key().await?;
                return Ok(None);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(None);
            }
        },
        Some(("manpages", _)) => {
            clap_mangen::Man::new(build()).render(&mut io::stdout())?;
            return Ok(None);
        }
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(Some(Mode::Serve));
}
