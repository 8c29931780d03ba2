use super::SlashCommand;

#[test]
fn it_parse_empty_string() {
    let text = "";
    assert!(SlashCommand::parse(text).is_none());
}
#[test]
fn it_parse_space_only() {
    let text = " ";
    assert!(SlashCommand::parse(text).is_none());
}
#[test]
fn it_parse_single_slash() {
    let text = "/";
    assert!(SlashCommand::parse(text).is_none());
}
#[test]
fn it_parse_invalid_prefix() {
    let text = "!q";
    assert!(SlashCommand::parse(text).is_none());
}
#[test]
fn it_parse_plain_question() {
    let text = "what does /run do?";
    assert!(SlashCommand::parse(text).is_none());
}
#[test]
fn it_parse_valid_prefix() {
    let text = "/q";
    let cmd = SlashCommand::parse(text);
    assert!(cmd.is_some());
    assert_eq!(cmd.unwrap().command, "/q");
}

#[test]
fn it_is_short_quit() {
    let cmd = SlashCommand::parse("/q").unwrap();
    assert!(cmd.is_quit());
}
#[test]
fn it_is_quit() {
    let cmd = SlashCommand::parse("/quit").unwrap();
    assert!(cmd.is_quit());
}
#[test]
fn it_is_exit() {
    let cmd = SlashCommand::parse("/exit").unwrap();
    assert!(cmd.is_quit());
}
#[test]
fn it_is_not_is_quit() {
    let cmd = SlashCommand::parse("/clear").unwrap();
    assert!(!cmd.is_quit());
}

#[test]
fn it_is_short_clear() {
    let cmd = SlashCommand::parse("/cl").unwrap();
    assert!(cmd.is_clear());
}
#[test]
fn it_is_clear() {
    let cmd = SlashCommand::parse("/clear").unwrap();
    assert!(cmd.is_clear());
}

#[test]
fn it_is_short_run() {
    let cmd = SlashCommand::parse("/r").unwrap();
    assert!(cmd.is_run());
    assert!(cmd.args.is_empty());
}
#[test]
fn it_is_run_with_index() {
    let cmd = SlashCommand::parse("/run 2").unwrap();
    assert!(cmd.is_run());
    assert_eq!(cmd.args, vec!["2".to_string()]);
}

#[test]
fn it_is_open_with_link() {
    let cmd = SlashCommand::parse("/open file:///w/src/main.rs#L12").unwrap();
    assert!(cmd.is_open());
    assert_eq!(cmd.args, vec!["file:///w/src/main.rs#L12".to_string()]);
}
#[test]
fn it_is_short_open() {
    let cmd = SlashCommand::parse("/o  file:///w/a.ts").unwrap();
    assert!(cmd.is_open());
    assert_eq!(cmd.args, vec!["file:///w/a.ts".to_string()]);
}

#[test]
fn it_is_provider() {
    let cmd = SlashCommand::parse("/provider ollama").unwrap();
    assert!(cmd.is_provider());
    assert_eq!(cmd.args, vec!["ollama".to_string()]);
}
#[test]
fn it_is_short_provider() {
    let cmd = SlashCommand::parse("/p claude").unwrap();
    assert!(cmd.is_provider());
}

#[test]
fn it_is_short_help() {
    let cmd = SlashCommand::parse("/h").unwrap();
    assert!(cmd.is_help());
}
#[test]
fn it_is_help() {
    let cmd = SlashCommand::parse("/help").unwrap();
    assert!(cmd.is_help());
}
#[test]
fn it_is_not_help() {
    let cmd = SlashCommand::parse("/run").unwrap();
    assert!(!cmd.is_help());
}
