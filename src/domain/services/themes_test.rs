use super::Themes;

#[test]
fn it_lists_themes() {
    let res = Themes::list();
    assert!(res.contains(&"base16-ocean.dark".to_string()));
    assert!(res.contains(&"InspiredGitHub".to_string()));
}

#[test]
fn it_gets_bundled_themes() {
    assert!(Themes::get("base16-ocean.dark", "").is_ok());
}

#[test]
fn it_fails_on_missing_themes() {
    let err = Themes::get("nope", "").unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"Theme nope does not exist in assets");

    assert!(Themes::get("base16-ocean.dark", "/does-not-exist.tmTheme").is_err());
}

#[test]
fn it_generates_css_for_code_classes() -> anyhow::Result<()> {
    let res = Themes::css("base16-ocean.dark", "")?;
    assert!(res.contains(".code {"));
    return Ok(());
}
