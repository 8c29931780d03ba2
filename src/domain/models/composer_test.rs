use super::Composer;
use super::Key;
use super::KeyInput;

fn typed(text: &str) -> Composer {
    let mut composer = Composer::default();
    composer.type_str(text);
    return composer;
}

#[test]
fn it_submits_on_enter() {
    let mut composer = typed("hello");
    let res = composer.input(KeyInput::new(Key::Enter), false);

    assert_eq!(res, Some("hello".to_string()));
    assert_eq!(composer.text(), "");
}

#[test]
fn it_inserts_newline_on_shift_enter() {
    let mut composer = typed("first");
    let res = composer.input(KeyInput::shifted(Key::Enter), false);
    composer.type_str("second");

    assert_eq!(res, None);
    assert_eq!(composer.text(), "first\nsecond");
}

#[test]
fn it_ignores_enter_on_blank_text() {
    let mut composer = typed("   ");
    let res = composer.input(KeyInput::new(Key::Enter), false);

    assert_eq!(res, None);
    assert_eq!(composer.text(), "   ");
}

#[test]
fn it_refuses_to_submit_while_disabled() {
    let mut composer = typed("hello");
    let res = composer.input(KeyInput::new(Key::Enter), true);

    assert_eq!(res, None);
    assert_eq!(composer.text(), "hello");
    assert!(!composer.can_submit(true));
    assert!(composer.can_submit(false));
}

#[test]
fn it_deletes_with_backspace() {
    let mut composer = typed("helloo");
    composer.input(KeyInput::new(Key::Backspace), false);

    assert_eq!(composer.text(), "hello");
}

#[test]
fn it_types_characters() {
    let mut composer = Composer::default();
    composer.input(KeyInput::new(Key::Char('h')), false);
    composer.input(KeyInput::shifted(Key::Char('I')), false);

    assert_eq!(composer.text(), "hI");
}
