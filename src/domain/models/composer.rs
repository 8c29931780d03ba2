#[cfg(test)]
#[path = "composer_test.rs"]
mod tests;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Enter,
    Backspace,
    Char(char),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub shift: bool,
}

impl KeyInput {
    pub fn new(key: Key) -> KeyInput {
        return KeyInput { key, shift: false };
    }

    pub fn shifted(key: Key) -> KeyInput {
        return KeyInput { key, shift: true };
    }
}

/// The message input box. Enter submits, Shift+Enter starts a new line.
#[derive(Default)]
pub struct Composer {
    text: String,
}

impl Composer {
    pub fn text(&self) -> &str {
        return &self.text;
    }

    pub fn can_submit(&self, disabled: bool) -> bool {
        return !disabled && !self.text.trim().is_empty();
    }

    /// Returns the composed text when the input submits it. Text is kept when
    /// a submit is refused so nothing the user typed gets lost.
    pub fn input(&mut self, input: KeyInput, disabled: bool) -> Option<String> {
        match input.key {
            Key::Enter if input.shift => {
                self.text.push('\n');
            }
            Key::Enter => {
                if self.can_submit(disabled) {
                    return Some(std::mem::take(&mut self.text));
                }
            }
            Key::Backspace => {
                self.text.pop();
            }
            Key::Char(c) => {
                self.text.push(c);
            }
        }

        return None;
    }

    pub fn type_str(&mut self, text: &str) {
        self.text.push_str(text);
    }
}
