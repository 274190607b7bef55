//! Sources scanned for utility CSS classes and the theme's font stacks.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use glob_match::glob_match;
use serde::Deserialize;

use crate::content::source_files::{relative_str, SourceFiles};
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StylingConfig {
    /// Globs, relative to the site root, of files scanned for class names.
    /// `{a,b}` alternations are allowed.
    #[serde(default = "default_content")]
    pub content: Vec<String>,
    #[serde(default = "default_font_family")]
    pub font_family: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub plugins: Vec<String>,
}

fn default_content() -> Vec<String> {
    [
        "./components/**/*.{vue,js,ts}",
        "./layouts/**/*.vue",
        "./pages/**/*.vue",
        "./app.vue",
        "./plugins/**/*.{js,ts}",
    ].iter().map(|s| s.to_string()).collect()
}

fn default_font_family() -> BTreeMap<String, Vec<String>> {
    let mut fonts = BTreeMap::new();
    fonts.insert("sans".to_string(), vec!["\"Noto Sans JP\"".to_string(), "sans-serif".to_string()]);
    fonts
}

impl Default for StylingConfig {
    fn default() -> Self {
        StylingConfig {
            content: default_content(),
            font_family: default_font_family(),
            plugins: vec![],
        }
    }
}

impl StylingConfig {
    /// Content globs relative to the site root.
    pub fn sources(&self) -> Result<StylingSources, ConfigError> {
        let mut patterns = vec![];
        for source in self.content.iter() {
            let pattern = source.trim().strip_prefix("./").unwrap_or(source.trim());
            if pattern.is_empty() {
                return Err(ConfigError::invalid(format!("styling pattern {:?} is empty", source)));
            }
            patterns.push(pattern.to_string());
        }
        Ok(StylingSources { patterns })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sources()?;
        for (family, stack) in self.font_family.iter() {
            if stack.is_empty() || stack.iter().any(|f| f.trim().is_empty()) {
                return Err(ConfigError::invalid(format!("font family {} has an empty font stack", family)));
            }
        }
        Ok(())
    }
}

pub struct StylingSources {
    patterns: Vec<String>,
}

impl StylingSources {
    pub fn matches(&self, rel_path: &Path) -> bool {
        self.matches_str(&relative_str(rel_path))
    }

    fn matches_str(&self, rel: &str) -> bool {
        self.patterns.iter().any(|p| glob_match(p, rel))
    }

    /// Files below `root` that are scanned for classes, relative to `root`.
    pub fn scan(&self, root: &Path) -> io::Result<Vec<PathBuf>> {
        SourceFiles::new(root).filtered(|rel| self.matches_str(rel))
    }
}

#[cfg(test)]
mod tests {
    use std::fs::{create_dir_all, File};

    use super::*;

    #[test]
    fn test_brace_alternatives() {
        let styling = StylingConfig {
            content: vec!["./{layouts,pages}/**/*.{vue,ts}".to_string()],
            ..StylingConfig::default()
        };
        let sources = styling.sources().unwrap();
        assert!(sources.matches(Path::new("layouts/default.vue")));
        assert!(sources.matches(Path::new("pages/blog/list.ts")));
        assert!(!sources.matches(Path::new("pages/blog/list.js")));
        assert!(!sources.matches(Path::new("components/Card.vue")));
    }

    #[test]
    fn test_default_sources_match() {
        let sources = StylingConfig::default().sources().unwrap();
        assert!(sources.matches(Path::new("components/blog/Card.vue")));
        assert!(sources.matches(Path::new("plugins/color/mode.ts")));
        assert!(sources.matches(Path::new("app.vue")));
        assert!(!sources.matches(Path::new("content/blog/hello.md")));
        assert!(!sources.matches(Path::new("nested/app.vue")));
    }

    #[test]
    fn test_scan() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        for rel in ["app.vue", "layouts/sub/default.vue", "pages/blog/index.vue", "content/blog/a.md", "README.md"] {
            let path = dir.path().join(rel);
            create_dir_all(path.parent().unwrap())?;
            File::create(path)?;
        }

        let files = StylingConfig::default().sources().unwrap().scan(dir.path())?;
        let files: Vec<String> = files.iter().map(|f| relative_str(f)).collect();
        assert_eq!(files, ["app.vue", "layouts/sub/default.vue", "pages/blog/index.vue"]);
        Ok(())
    }

    #[test]
    fn test_validate() {
        assert!(StylingConfig::default().validate().is_ok());

        let mut empty_glob = StylingConfig::default();
        empty_glob.content.push("./".to_string());
        assert!(empty_glob.validate().is_err());

        let mut empty_stack = StylingConfig::default();
        empty_stack.font_family.insert("serif".to_string(), vec![]);
        assert!(empty_stack.validate().is_err());
    }
}
