#[cfg(test)]
#[path = "renderer_test.rs"]
mod tests;

use anyhow::Result;
use pulldown_cmark::escape::escape_html as push_escaped;
use pulldown_cmark::html;
use pulldown_cmark::CowStr;
use pulldown_cmark::Event;
use pulldown_cmark::Parser;
use pulldown_cmark::Tag;
use syntect::html::ClassStyle;
use syntect::html::ClassedHTMLGenerator;
use syntect::util::LinesWithEndings;

use super::syntaxes::Syntaxes;
use super::syntaxes::SYNTAX_SET;
use crate::domain::models::codeblock_language;
use crate::domain::models::markdown_options;
use crate::domain::models::Message;
use crate::domain::models::Role;

pub fn escape_html(text: &str) -> Result<String> {
    let mut res = String::new();
    push_escaped(&mut res, text)?;
    return Ok(res);
}

fn is_script_url(url: &str) -> bool {
    let normalized = url
        .chars()
        .filter(|c| return !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_lowercase();

    return normalized.starts_with("javascript:")
        || normalized.starts_with("vbscript:")
        || normalized.starts_with("data:text/html");
}

fn highlight(language: &str, code: &str) -> Result<String> {
    let syntax = Syntaxes::get(language);
    let mut generator =
        ClassedHTMLGenerator::new_with_class_style(syntax, &SYNTAX_SET, ClassStyle::Spaced);
    for line in LinesWithEndings::from(code) {
        generator.parse_html_for_line_which_includes_newline(line)?;
    }

    return Ok(generator.finalize());
}

fn render_codeblock(language: &str, code: &str) -> Result<String> {
    let highlighted = highlight(language, code)?;
    if language.is_empty() {
        return Ok(format!("<pre><code>{highlighted}</code></pre>\n"));
    }

    return Ok(format!(
        "<pre><code class=\"language-{}\">{highlighted}</code></pre>\n",
        escape_html(language)?
    ));
}

/// Turns message content into HTML for the chat thread. User text is shown
/// literally, assistant text is markdown.
pub struct ContentRenderer {
    sanitize: bool,
}

impl ContentRenderer {
    pub fn new(sanitize: bool) -> ContentRenderer {
        return ContentRenderer { sanitize };
    }

    pub fn render(&self, message: &Message) -> Result<String> {
        match message.role {
            Role::User => {
                return Ok(format!(
                    "<div class=\"message-text\">{}</div>",
                    escape_html(&message.content)?
                ));
            }
            Role::Assistant => {
                return Ok(format!(
                    "<div class=\"message-markdown\">{}</div>",
                    self.render_markdown(&message.content)?
                ));
            }
        }
    }

    fn sanitize_event<'a>(&self, event: Event<'a>) -> Event<'a> {
        if !self.sanitize {
            return event;
        }

        match event {
            Event::Html(html) => return Event::Text(html),
            Event::Start(Tag::Link(link_type, url, title)) if is_script_url(&url) => {
                return Event::Start(Tag::Link(link_type, CowStr::Borrowed("#"), title));
            }
            Event::Start(Tag::Image(link_type, url, title)) if is_script_url(&url) => {
                return Event::Start(Tag::Image(link_type, CowStr::Borrowed(""), title));
            }
            _ => return event,
        }
    }

    /// GitHub flavored markdown where single line breaks are kept, and fenced
    /// code is highlighted into classed spans.
    pub fn render_markdown(&self, markdown: &str) -> Result<String> {
        let mut events: Vec<Event> = vec![];
        let mut codeblock: Option<(String, String)> = None;

        for event in Parser::new_ext(markdown, markdown_options()) {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    codeblock = Some((codeblock_language(&kind), String::new()));
                }
                Event::End(Tag::CodeBlock(_)) => {
                    if let Some((language, code)) = codeblock.take() {
                        events.push(Event::Html(CowStr::from(render_codeblock(
                            &language, &code,
                        )?)));
                    }
                }
                Event::Text(text) if codeblock.is_some() => {
                    if let Some((_, code)) = codeblock.as_mut() {
                        code.push_str(&text);
                    }
                }
                Event::SoftBreak => {
                    events.push(Event::HardBreak);
                }
                event => {
                    events.push(self.sanitize_event(event));
                }
            }
        }

        let mut res = String::new();
        html::push_html(&mut res, events.into_iter());

        return Ok(res);
    }
}
