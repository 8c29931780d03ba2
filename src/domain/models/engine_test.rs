use test_utils::workspace_context_json;

use super::EngineOptions;
use super::EnginePrompt;
use crate::domain::models::Selection;
use crate::domain::models::WorkspaceContext;

#[test]
fn it_forwards_raw_text_without_context() {
    let prompt = EnginePrompt::compose("explain", None);
    assert_eq!(prompt.text, "explain");
}

#[test]
fn it_forwards_raw_text_with_empty_context() {
    let prompt = EnginePrompt::compose("explain", Some(&WorkspaceContext::default()));
    assert_eq!(prompt.text, "explain");
}

#[test]
fn it_adds_every_context_line_in_order() {
    let context: WorkspaceContext = serde_json::from_str(workspace_context_json()).unwrap();
    let prompt = EnginePrompt::compose("explain", Some(&context));

    insta::assert_snapshot!(prompt.text, @r###"
    [Active File: a.ts]
    [Language: typescript]
    [Selected Code:
    x
    ]
    [Workspace: /w]

    User Question: explain
    "###);
}

#[test]
fn it_skips_missing_context_lines() {
    let context = WorkspaceContext {
        workspace_root: Some("/w".to_string()),
        active_file: None,
        language: Some("rust".to_string()),
        selection: Some(Selection::default()),
    };
    let prompt = EnginePrompt::compose("what is this?", Some(&context));

    insta::assert_snapshot!(prompt.text, @r###"
    [Language: rust]
    [Workspace: /w]

    User Question: what is this?
    "###);
}

#[test]
fn it_accepts_a_selection_with_only_text() {
    let context: WorkspaceContext =
        serde_json::from_str(r#"{"selection":{"text":"let x = 5;"}}"#).unwrap();
    let prompt = EnginePrompt::compose("explain", Some(&context));

    assert_eq!(
        prompt.text,
        "[Selected Code:\nlet x = 5;\n]\n\nUser Question: explain"
    );
}

#[test]
fn it_enables_every_capability_by_default() {
    let options = EngineOptions::default();
    insta::assert_snapshot!(serde_json::to_string(&options).unwrap(), @r###"{"gitEnabled":true,"testEnabled":true,"reviewEnabled":true}"###);
}
