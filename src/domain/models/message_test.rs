use test_utils::codeblock_fixture;

use super::CodeBlock;
use super::Message;
use super::Role;

#[test]
fn it_executes_new() {
    let msg = Message::new(Role::User, "Hi there!");
    assert_eq!(msg.role, Role::User);
    assert_eq!(msg.role.label(), "You");
    assert_eq!(msg.content, "Hi there!".to_string());
    assert!(msg.timestamp > 0);
}

#[test]
fn it_creates_unique_ids() {
    let first = Message::new(Role::User, "Hi there!");
    let second = Message::new(Role::User, "Hi there!");

    assert_ne!(first.id, second.id);
    assert!(first.id.starts_with(&first.timestamp.to_string()));
}

#[test]
fn it_keeps_content_untouched() {
    let msg = Message::new(Role::Assistant, "\tIndented <b>html</b>");
    assert_eq!(msg.content, "\tIndented <b>html</b>");
}

#[test]
fn it_serializes_wire_fields() {
    let msg = Message {
        id: "1-abc".to_string(),
        role: Role::Assistant,
        content: "Hello".to_string(),
        timestamp: 1700000000000,
    };

    insta::assert_snapshot!(serde_json::to_string(&msg).unwrap(), @r###"{"id":"1-abc","role":"assistant","content":"Hello","timestamp":1700000000000}"###);
}

#[test]
fn it_formats_time_label() {
    let msg = Message::new(Role::User, "Hi there!");
    let label = msg.time_label();

    assert_eq!(label.len(), 8);
    assert!(label.ends_with("AM") || label.ends_with("PM"));
}

#[test]
fn it_executes_codeblocks() {
    let msg = Message::new(Role::Assistant, codeblock_fixture());
    let codeblocks = msg.codeblocks();

    assert_eq!(codeblocks.len(), 3);
    assert_eq!(codeblocks[0].language, "rust");
    insta::assert_snapshot!(codeblocks[0].code, @r###"
    fn print_numbers() {
        for i in 0..=10 {
            println!("{i}");
        }
    }
    "###);

    assert_eq!(
        codeblocks[1],
        CodeBlock {
            language: "bash".to_string(),
            code: "cargo run --release".to_string(),
        }
    );
    assert_eq!(
        codeblocks[2],
        CodeBlock {
            language: "".to_string(),
            code: "abc123".to_string(),
        }
    );
}

#[test]
fn it_finds_codeblocks_the_way_they_render() {
    let content = "~~~bash\nls -la\n~~~\n\n````markdown\n```bash\nrm -rf /\n```\n````\n\n    indented";
    let codeblocks = Message::new(Role::Assistant, content).codeblocks();

    assert_eq!(
        codeblocks,
        vec![
            CodeBlock {
                language: "bash".to_string(),
                code: "ls -la".to_string(),
            },
            CodeBlock {
                language: "markdown".to_string(),
                code: "```bash\nrm -rf /\n```".to_string(),
            },
            CodeBlock {
                language: "".to_string(),
                code: "indented".to_string(),
            },
        ]
    );
}

#[test]
fn it_detects_command_codeblocks() {
    let command = |language: &str| {
        return CodeBlock {
            language: language.to_string(),
            code: "ls".to_string(),
        }
        .is_command();
    };

    assert!(command("bash"));
    assert!(command("sh"));
    assert!(command("shell"));
    assert!(!command("zsh"));
    assert!(!command("rust"));
    assert!(!command(""));
}
