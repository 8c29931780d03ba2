#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::env;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

use crate::domain::models::EditorName;
use crate::domain::models::ProviderName;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    ApiKey,
    ConfigFile,
    Editor,
    EnginePath,
    Listen,
    Provider,
    SanitizeHtml,
    Theme,
    ThemeFile,
    Workspace,
}

fn default_config_path() -> path::PathBuf {
    #[cfg(not(target_os = "macos"))]
    let config_dir = dirs::config_dir().unwrap_or_else(env::temp_dir);
    #[cfg(target_os = "macos")]
    let config_dir = dirs::home_dir()
        .map(|home| return home.join(".config"))
        .unwrap_or_else(env::temp_dir);

    return config_dir.join("galaxy-chat/config.toml");
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        let default_provider = ProviderName::Gemini.to_string();
        let default_editor = EditorName::None.to_string();
        let config_path = default_config_path().to_string_lossy().to_string();
        let workspace = env::current_dir()
            .map(|dir| return dir.to_string_lossy().to_string())
            .unwrap_or_default();

        let res = match key {
            ConfigKey::ApiKey => "",
            ConfigKey::Editor => &default_editor,
            ConfigKey::EnginePath => "terminal/galaxy_cli/source/ai/orchestrator.js",
            ConfigKey::Listen => "",
            ConfigKey::Provider => &default_provider,
            ConfigKey::SanitizeHtml => "true",
            ConfigKey::Theme => "base16-ocean.dark",
            ConfigKey::ThemeFile => "",

            // Special
            ConfigKey::ConfigFile => &config_path,
            ConfigKey::Workspace => &workspace,
        };

        return res.to_string();
    }

    fn possible_values(cmd: &Command, key: ConfigKey) -> Vec<String> {
        let name = key.to_string();
        if let Some(arg) = cmd
            .get_arguments()
            .find(|e| return e.get_long() == Some(name.as_str()))
        {
            return arg
                .get_possible_values()
                .iter()
                .map(|e| return e.get_name().to_string())
                .collect::<Vec<String>>();
        }

        return vec![];
    }

    pub async fn load(cmd: Command, clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        let config_path = path::PathBuf::from(&config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                if let Some(val) = doc.get(&key.to_string()) {
                    // Use clap value parsers to do validation.
                    let possible_values = Config::possible_values(&cmd, key);

                    if let Some(val_bool) = val.as_bool() {
                        Config::set(key, &val_bool.to_string());
                    } else if let Some(val_str) = val.as_str() {
                        if val_str.is_empty() {
                            continue;
                        }
                        if !possible_values.is_empty()
                            && !possible_values.contains(&val_str.to_string())
                        {
                            bail!(format!("config.toml has an invalid value for key '{key}': {val_str}\nPossible values are: {}", possible_values.join(", ")));
                        }
                        Config::set(key, val_str);
                    }
                }
            }
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::set(key, val)
                }
            }
        }
        Config::set(ConfigKey::ConfigFile, &config_file);

        tracing::debug!(
            provider = Config::get(ConfigKey::Provider),
            editor = Config::get(ConfigKey::Editor),
            engine_path = Config::get(ConfigKey::EnginePath),
            workspace = Config::get(ConfigKey::Workspace),
            listen = Config::get(ConfigKey::Listen),
            theme = Config::get(ConfigKey::Theme),
            theme_file = Config::get(ConfigKey::ThemeFile),
            "config"
        );

        return Ok(());
    }

    /// Writes a single key to the config file, keeping everything else in the
    /// file as it was. Nothing is written when `config_file` is empty.
    pub async fn persist(config_file: &str, key: ConfigKey, value: &str) -> Result<()> {
        if config_file.is_empty() {
            return Ok(());
        }

        let config_path = path::PathBuf::from(config_file);
        let mut doc = toml_edit::Document::new();
        if config_path.exists() {
            doc = fs::read_to_string(&config_path)
                .await?
                .parse::<toml_edit::Document>()?;
        } else if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        doc[&key.to_string()] = toml_edit::value(value);
        fs::write(&config_path, doc.to_string()).await?;
        tracing::debug!(key = key.to_string(), path = config_file, "Persisted config");

        return Ok(());
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }

                let name = key.to_string();
                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(name.as_str()))?;

                let mut description = arg
                    .get_help()
                    .map(|help| return help.to_string())
                    .unwrap_or_default();

                description = description
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                let possible_values = Config::possible_values(&cmd, key);
                if !possible_values.is_empty() {
                    description = format!(
                        "{description} [possible values: {}]",
                        possible_values.join(", ")
                    );
                }

                let mut val = Config::default(key);
                if val.is_empty() || key == ConfigKey::Workspace {
                    val = format!("# {key} = \"\"");
                } else if val == "true" || val == "false" {
                    val = format!("{key} = {val}");
                } else {
                    val = format!("{key} = \"{val}\"");
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
