use super::FileLink;

#[test]
fn it_parses_links_with_a_line() {
    let res = FileLink::parse("file:///w/src/main.rs#L42");
    assert_eq!(
        res,
        Some(FileLink {
            path: "/w/src/main.rs".to_string(),
            line: Some(42),
        })
    );
}

#[test]
fn it_parses_links_without_a_line() {
    let res = FileLink::parse("file:///w/src/main.rs");
    assert_eq!(
        res,
        Some(FileLink {
            path: "/w/src/main.rs".to_string(),
            line: None,
        })
    );
}

#[test]
fn it_keeps_other_fragments_in_the_path() {
    let res = FileLink::parse("file:///w/README.md#usage").unwrap();
    assert_eq!(res.path, "/w/README.md#usage");
    assert_eq!(res.line, None);
}

#[test]
fn it_rejects_other_schemes() {
    assert!(FileLink::parse("https://example.com/a.rs#L1").is_none());
    assert!(FileLink::parse("file://").is_none());
    assert!(FileLink::parse("").is_none());
}
