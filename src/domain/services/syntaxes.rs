#[cfg(test)]
#[path = "syntaxes_test.rs"]
mod tests;

use once_cell::sync::Lazy;
use syntect::parsing::SyntaxReference;
use syntect::parsing::SyntaxSet;

pub static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);

// Fence names engines commonly use that the bundled syntaxes don't know.
const ALIASES: [(&str, &str); 7] = [
    ("typescript", "js"),
    ("ts", "js"),
    ("tsx", "js"),
    ("jsx", "js"),
    ("shell", "bash"),
    ("zsh", "bash"),
    ("console", "bash"),
];

pub struct Syntaxes {}

impl Syntaxes {
    pub fn list() -> Vec<String> {
        let mut syntaxes = SYNTAX_SET
            .syntaxes()
            .iter()
            .map(|syntax| return syntax.name.to_string())
            .collect::<Vec<String>>();
        syntaxes.sort();
        syntaxes.dedup();

        return syntaxes;
    }

    /// Resolves a code fence language, falling back to plain text.
    pub fn get(name: &str) -> &'static SyntaxReference {
        let name = name.trim().to_lowercase();
        let token = ALIASES
            .iter()
            .find(|(alias, _)| return *alias == name)
            .map(|(_, token)| return *token)
            .unwrap_or(name.as_str());

        if token.is_empty() {
            return SYNTAX_SET.find_syntax_plain_text();
        }

        return SYNTAX_SET
            .find_syntax_by_token(token)
            .unwrap_or_else(|| return SYNTAX_SET.find_syntax_plain_text());
    }
}
