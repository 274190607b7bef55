//! Front matter extraction for content files.

use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::content::RawMetadata;
use crate::error::ContentError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontMatterFormat {
    /// YAML header delimited by `---`.
    Yaml,
    /// TOML header delimited by `+++`.
    Toml,
}

impl FrontMatterFormat {
    pub fn delimiter(&self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }

    fn from_delimiter(line: &str) -> Option<Self> {
        match line.trim_end() {
            "---" => Some(Self::Yaml),
            "+++" => Some(Self::Toml),
            _ => None,
        }
    }
}

fn next_line(s: &str) -> (&str, &str) {
    match s.find('\n') {
        Some(i) => (&s[..i], &s[i + 1..]),
        None => (s, ""),
    }
}

fn skip_leading(content: &str) -> &str {
    content.trim_start_matches('\u{feff}').trim_start()
}

/// Splits `content` into header and body.
///
/// Returns `None` when the text does not open with a delimiter line or when
/// the closing delimiter line is missing.
pub fn split_front_matter(content: &str) -> Option<(FrontMatterFormat, &str, &str)> {
    let (open, rest) = next_line(skip_leading(content));
    let format = FrontMatterFormat::from_delimiter(open)?;

    let mut offset = 0;
    let mut remaining = rest;
    while !remaining.is_empty() {
        let (line, next) = next_line(remaining);
        if line.trim_end() == format.delimiter() {
            let header = &rest[..offset];
            let body = next.trim_start_matches(|c| c == '\n' || c == '\r');
            return Some((format, header, body));
        }
        offset += remaining.len() - next.len();
        remaining = next;
    }

    None
}

/// Reads the metadata header of a content file.
///
/// A file without a header yields an empty mapping and its whole text as body.
pub fn parse_front_matter(content: &str, path: &Path) -> Result<(RawMetadata, String), ContentError> {
    let Some((format, header, body)) = split_front_matter(content) else {
        let (open, _) = next_line(skip_leading(content));
        if let Some(format) = FrontMatterFormat::from_delimiter(open) {
            return Err(ContentError::front_matter(
                path,
                format!("closing {} of the header is missing", format.delimiter()),
            ));
        }
        return Ok((RawMetadata::new(), content.to_string()));
    };

    if header.trim().is_empty() {
        return Ok((RawMetadata::new(), body.to_string()));
    }

    let metadata = match format {
        FrontMatterFormat::Yaml => parse_yaml(header, path)?,
        FrontMatterFormat::Toml => parse_toml(header, path)?,
    };

    Ok((metadata, body.to_string()))
}

fn parse_yaml(header: &str, path: &Path) -> Result<RawMetadata, ContentError> {
    let value: Value = serde_yaml::from_str(header)
        .map_err(|e| ContentError::front_matter(path, e.to_string()))?;

    let mapping = match value {
        Value::Mapping(mapping) => mapping,
        Value::Null => return Ok(RawMetadata::new()),
        _ => return Err(ContentError::front_matter(path, "header is not a key/value mapping")),
    };

    let mut metadata = RawMetadata::new();
    for (key, val) in mapping {
        match key {
            Value::String(key) => {
                metadata.insert(key, val);
            }
            other => {
                return Err(ContentError::front_matter(path, format!("key {:?} is not a string", other)));
            }
        }
    }
    Ok(metadata)
}

fn parse_toml(header: &str, path: &Path) -> Result<RawMetadata, ContentError> {
    let table: toml::Table = toml::from_str(header)
        .map_err(|e| ContentError::front_matter(path, e.to_string()))?;

    Ok(table.into_iter()
        .map(|(key, val)| (key, toml_to_yaml(val)))
        .collect())
}

// TOML dates have no YAML counterpart and become their canonical string.
fn toml_to_yaml(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => Value::Number(f.into()),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Sequence(items.into_iter().map(toml_to_yaml).collect()),
        toml::Value::Table(table) => {
            let mut mapping = Mapping::new();
            for (key, val) in table {
                mapping.insert(Value::String(key), toml_to_yaml(val));
            }
            Value::Mapping(mapping)
        }
    }
}
