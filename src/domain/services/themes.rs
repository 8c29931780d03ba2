#[cfg(test)]
#[path = "themes_test.rs"]
mod tests;

use std::fs::File;
use std::io::BufReader;

use anyhow::bail;
use anyhow::Result;
use syntect::highlighting::Theme;
use syntect::highlighting::ThemeSet;
use syntect::html::css_for_theme_with_class_style;
use syntect::html::ClassStyle;

#[derive(Default)]
pub struct Themes {}

impl Themes {
    pub fn list() -> Vec<String> {
        let mut themes = ThemeSet::load_defaults()
            .themes
            .keys()
            .map(|e| return e.to_string())
            .collect::<Vec<String>>();
        themes.sort();

        return themes;
    }

    fn get_from_memory(theme_name: &str) -> Result<Theme> {
        let mut themes = ThemeSet::load_defaults();
        if let Some(theme) = themes.themes.remove(theme_name) {
            return Ok(theme);
        }

        bail!(format!("Theme {theme_name} does not exist in assets"));
    }

    fn get_from_file(theme_file: &str) -> Result<Theme> {
        let file = File::open(theme_file)?;
        let mut reader = BufReader::new(file);
        let theme = ThemeSet::load_from_reader(&mut reader)?;

        return Ok(theme);
    }

    pub fn get(theme_name: &str, theme_file: &str) -> Result<Theme> {
        if !theme_file.is_empty() {
            return Themes::get_from_file(theme_file);
        }
        return Themes::get_from_memory(theme_name);
    }

    /// Stylesheet for the classes the renderer puts on highlighted code.
    pub fn css(theme_name: &str, theme_file: &str) -> Result<String> {
        let theme = Themes::get(theme_name, theme_file)?;
        return Ok(css_for_theme_with_class_style(
            &theme,
            ClassStyle::Spaced,
        )?);
    }
}
