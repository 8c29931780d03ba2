#[cfg(test)]
#[path = "page_test.rs"]
mod tests;

use anyhow::Result;
use uuid::Uuid;

use super::renderer::escape_html;

/// The HTML document a webview panel loads. Scripts only run when they carry
/// the page's nonce.
pub struct WebviewPage {
    pub script_uri: String,
    pub style_uri: String,
    pub csp_source: String,
    pub theme_css: String,
    /// First paint shown until the script mounts.
    pub body: String,
    nonce: String,
}

impl WebviewPage {
    pub fn new(script_uri: &str, style_uri: &str, csp_source: &str, theme_css: &str) -> WebviewPage {
        return WebviewPage {
            script_uri: script_uri.to_string(),
            style_uri: style_uri.to_string(),
            csp_source: csp_source.to_string(),
            theme_css: theme_css.to_string(),
            body: "".to_string(),
            nonce: Uuid::new_v4().simple().to_string(),
        };
    }

    pub fn with_body(mut self, body: &str) -> WebviewPage {
        self.body = body.to_string();
        return self;
    }

    pub fn nonce(&self) -> &str {
        return &self.nonce;
    }

    pub fn render(&self) -> Result<String> {
        return Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <meta http-equiv="Content-Security-Policy" content="default-src 'none'; style-src {csp_source} 'unsafe-inline'; script-src 'nonce-{nonce}';">
  <link href="{style_uri}" rel="stylesheet">
  <style>
{theme_css}
  </style>
  <title>Galaxy Code Chat</title>
</head>
<body>
  <div id="root">{body}</div>
  <script nonce="{nonce}" src="{script_uri}"></script>
</body>
</html>"#,
            csp_source = escape_html(&self.csp_source)?,
            nonce = self.nonce,
            style_uri = escape_html(&self.style_uri)?,
            theme_css = self.theme_css.replace("</", "<\\/"),
            script_uri = escape_html(&self.script_uri)?,
            body = self.body,
        ));
    }
}
