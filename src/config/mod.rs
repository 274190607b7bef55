use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::{env, fs};

use chrono::NaiveDate;
use serde::Deserialize;

use crate::content::CollectionDef;
use crate::error::ConfigError;
use crate::util::toml_date::TomlDate;

pub mod styling;

pub use styling::StylingConfig;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Devtools {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContentConfig {
    /// Root of the content files. Relative paths are resolved against the
    /// directory of the configuration file.
    #[serde(default = "default_content_dir")]
    pub dir: PathBuf,
    /// Glob of the blog collection, relative to `dir`.
    #[serde(default = "default_blog_source")]
    pub blog_source: String,
    /// Endpoint of the live preview service. Empty disables it.
    #[serde(default = "default_preview_api")]
    pub preview_api: String,
}

impl ContentConfig {
    pub fn blog_collection(&self) -> CollectionDef {
        CollectionDef {
            source: self.blog_source.clone(),
            ..CollectionDef::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DevServer {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl DevServer {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Light,
    Dark,
}

impl ColorScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }
}

#[derive(Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorPreference {
    /// Follow the visitor's system setting.
    System,
    Light,
    Dark,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ColorMode {
    #[serde(default = "default_preference")]
    pub preference: ColorPreference,
    /// Used when the preference is `system` and the system setting is unknown.
    #[serde(default = "default_fallback")]
    pub fallback: ColorScheme,
    #[serde(default)]
    pub class_suffix: String,
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

impl ColorMode {
    pub fn resolve(&self, system: Option<ColorScheme>) -> ColorScheme {
        match self.preference {
            ColorPreference::Light => ColorScheme::Light,
            ColorPreference::Dark => ColorScheme::Dark,
            ColorPreference::System => system.unwrap_or(self.fallback),
        }
    }

    /// Class put on the root element for `scheme`, e.g. `dark`.
    pub fn class_name(&self, scheme: ColorScheme) -> String {
        format!("{}{}", scheme.as_str(), self.class_suffix)
    }
}

#[derive(Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum TransitionMode {
    #[serde(rename = "out-in")]
    OutIn,
    #[serde(rename = "in-out")]
    InOut,
    #[serde(rename = "default")]
    Default,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PageTransition {
    #[serde(default = "default_transition_name")]
    pub name: String,
    #[serde(default = "default_transition_mode")]
    pub mode: TransitionMode,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default = "default_compatibility_date")]
    pub compatibility_date: TomlDate,
    #[serde(default = "default_modules")]
    pub modules: Vec<String>,
    #[serde(default)]
    pub devtools: Devtools,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub dev_server: DevServer,
    #[serde(default)]
    pub color_mode: ColorMode,
    #[serde(default)]
    pub page_transition: PageTransition,
    #[serde(default)]
    pub styling: StylingConfig,
    pub log: Option<Log>,
}

fn default_true() -> bool {
    true
}

fn default_compatibility_date() -> TomlDate {
    TomlDate(NaiveDate::from_ymd_opt(2024, 11, 1).unwrap_or_default())
}

fn default_modules() -> Vec<String> {
    [
        "@nuxt/content",
        "@nuxt/fonts",
        "@nuxt/icon",
        "@nuxtjs/tailwindcss",
        "@nuxtjs/color-mode",
    ].iter().map(|s| s.to_string()).collect()
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}

fn default_blog_source() -> String {
    CollectionDef::default().source
}

fn default_preview_api() -> String {
    "https://api.nuxt.studio".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_preference() -> ColorPreference {
    ColorPreference::System
}

fn default_fallback() -> ColorScheme {
    ColorScheme::Light
}

fn default_storage_key() -> String {
    "nuxt-color-mode".to_string()
}

fn default_transition_name() -> String {
    "page".to_string()
}

fn default_transition_mode() -> TransitionMode {
    TransitionMode::OutIn
}

impl Default for Devtools {
    fn default() -> Self {
        Devtools { enabled: true }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        ContentConfig {
            dir: default_content_dir(),
            blog_source: default_blog_source(),
            preview_api: default_preview_api(),
        }
    }
}

impl Default for DevServer {
    fn default() -> Self {
        DevServer {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ColorMode {
    fn default() -> Self {
        ColorMode {
            preference: default_preference(),
            fallback: default_fallback(),
            class_suffix: String::new(),
            storage_key: default_storage_key(),
        }
    }
}

impl Default for PageTransition {
    fn default() -> Self {
        PageTransition {
            name: default_transition_name(),
            mode: default_transition_mode(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            compatibility_date: default_compatibility_date(),
            modules: default_modules(),
            devtools: Devtools::default(),
            content: ContentConfig::default(),
            dev_server: DevServer::default(),
            color_mode: ColorMode::default(),
            page_transition: PageTransition::default(),
            styling: StylingConfig::default(),
            log: None,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for module in self.modules.iter() {
            if module.trim().is_empty() {
                return Err(ConfigError::invalid("module names can not be empty"));
            }
            if !seen.insert(module.as_str()) {
                return Err(ConfigError::invalid(format!("module {} is enabled twice", module)));
            }
        }

        if self.dev_server.host.trim().is_empty() {
            return Err(ConfigError::invalid("dev_server.host can not be empty"));
        }
        if self.dev_server.port == 0 {
            return Err(ConfigError::invalid("dev_server.port has to be greater than 0"));
        }

        if self.color_mode.storage_key.trim().is_empty() {
            return Err(ConfigError::invalid("color_mode.storage_key can not be empty"));
        }

        if self.page_transition.name.trim().is_empty() {
            return Err(ConfigError::invalid("page_transition.name can not be empty"));
        }

        if let Err(e) = self.content.blog_collection().pattern() {
            return Err(ConfigError::invalid(e.to_string()));
        }

        self.styling.validate()
    }

    pub fn blog_collection(&self) -> CollectionDef {
        self.content.blog_collection()
    }
}

fn expand_exe_dir(path: PathBuf) -> Result<PathBuf, ConfigError> {
    let Some(str_path) = path.to_str() else {
        return Ok(path);
    };
    if !str_path.starts_with("${exe_dir}") {
        return Ok(path);
    }

    let cur_exe = env::current_exe()
        .map_err(|e| ConfigError::invalid(format!("Could not locate the executable: {}", e)))?;
    let exe_dir = cur_exe.parent().and_then(|p| p.to_str()).unwrap_or(".");
    Ok(PathBuf::from(str_path.replace("${exe_dir}", exe_dir)))
}

/// Parses a configuration and resolves its paths against `base_dir`.
pub fn parse_config(cfg_content: &str, base_dir: &Path) -> Result<Config, ConfigError> {
    let mut cfg: Config = toml::from_str(cfg_content)?;

    let content_dir = expand_exe_dir(cfg.content.dir)?;
    cfg.content.dir = if content_dir.is_relative() {
        base_dir.join(content_dir)
    } else {
        content_dir
    };

    if let Some(ref mut log) = cfg.log {
        if let Some(location) = log.location.take() {
            log.location = Some(expand_exe_dir(location)?);
        }
    }

    cfg.validate()?;
    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> Result<Config, ConfigError> {
    let cfg_content = fs::read_to_string(cfg_path).map_err(|source| ConfigError::Io {
        path: cfg_path.to_path_buf(),
        source,
    })?;

    let base_dir = cfg_path.parent().unwrap_or(Path::new(""));
    parse_config(&cfg_content, base_dir)
}
