use pulldown_cmark::CodeBlockKind;
use pulldown_cmark::Options;

/// Extensions used wherever assistant markdown is parsed, so code blocks are
/// found the same way they are displayed.
pub fn markdown_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    return options;
}

/// First word of a fence's info string, lowercased. Indented blocks have none.
pub fn codeblock_language(kind: &CodeBlockKind) -> String {
    match kind {
        CodeBlockKind::Fenced(info) => {
            return info
                .split_whitespace()
                .next()
                .unwrap_or("")
                .to_lowercase();
        }
        CodeBlockKind::Indented => return "".to_string(),
    }
}
