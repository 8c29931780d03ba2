use anyhow::Result;

use super::build;
use super::help_text;
use super::subcommand_page;
use crate::configuration::ConfigKey;

#[test]
fn it_builds_a_valid_command() {
    build().debug_assert();
}

#[test]
fn it_accepts_global_config_flags_on_subcommands() -> Result<()> {
    let matches = build().try_get_matches_from(vec![
        "galaxy-chat",
        "chat",
        "--provider",
        "ollama",
        "--editor",
        "terminal",
        "-w",
        "/w",
    ])?;
    let (name, chat_matches) = matches.subcommand().unwrap();

    assert_eq!(name, "chat");
    assert_eq!(
        chat_matches.get_one::<String>(&ConfigKey::Provider.to_string()),
        Some(&"ollama".to_string())
    );
    assert_eq!(
        chat_matches.get_one::<String>(&ConfigKey::Workspace.to_string()),
        Some(&"/w".to_string())
    );
    return Ok(());
}

#[test]
fn it_rejects_unknown_providers() {
    let res = build().try_get_matches_from(vec!["galaxy-chat", "serve", "--provider", "openai"]);
    assert!(res.is_err());
}

#[test]
fn it_lists_chat_commands_in_help() {
    let res = help_text();
    assert!(res.starts_with("COMMANDS:"));
    assert!(res.contains("- /run (/r)"));
}

#[test]
fn it_explains_where_the_page_script_comes_from() {
    let res = subcommand_page().render_long_help().to_string();
    assert!(res.contains("supplied by the editor plugin"));
    assert!(res.contains("webview-dist/index.js"));
}
