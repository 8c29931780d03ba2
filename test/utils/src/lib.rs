pub fn codeblock_fixture() -> &'static str {
    return r#"
Here's how to print in Rust.

```rust
fn print_numbers() {
    for i in 0..=10 {
        println!("{i}");
    }
}
```

Run it with cargo.

```bash
cargo run --release
```

This is a markdown codeblock that has no language. We count it as well incase the engine doesn't attach a language.

```
abc123
```

The entry point lives in [main.rs](file:///w/src/main.rs#L12).
"#
    .trim();
}

pub fn workspace_context_json() -> &'static str {
    return r#"{
  "workspaceRoot": "/w",
  "activeFile": "a.ts",
  "language": "typescript",
  "selection": {
    "start": { "line": 1, "character": 0 },
    "end": { "line": 1, "character": 1 },
    "text": "x"
  }
}"#;
}
