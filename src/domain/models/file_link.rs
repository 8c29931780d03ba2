#[cfg(test)]
#[path = "file_link_test.rs"]
mod tests;

use once_cell::sync::Lazy;
use regex::Regex;

static FILE_LINK: Lazy<Regex> = Lazy::new(|| {
    return Regex::new(r"^file://(.+?)(?:#L(\d+))?$").unwrap();
});

/// A `file://<path>#L<line>` reference found in assistant content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileLink {
    pub path: String,
    pub line: Option<u32>,
}

impl FileLink {
    pub fn parse(href: &str) -> Option<FileLink> {
        let captures = FILE_LINK.captures(href)?;
        let path = captures.get(1)?.as_str().to_string();
        let line = captures
            .get(2)
            .and_then(|line| return line.as_str().parse::<u32>().ok());

        return Some(FileLink { path, line });
    }
}
