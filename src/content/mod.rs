use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Serialize;

pub mod collection;
pub mod front_matter;
pub mod schema;
pub mod source_files;

pub use collection::{CheckReport, Collection, CollectionDef, CollectionKind};
pub use front_matter::{parse_front_matter, split_front_matter, FrontMatterFormat};
pub use schema::{validate, FieldKind, FieldSpec, BLOG_SCHEMA};

/// Untyped metadata as read from a content header.
pub type RawMetadata = BTreeMap<String, serde_yaml::Value>;

/// Validated metadata of one blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlogPost {
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub tags: Option<Vec<String>>,
    pub image: Option<String>,
}

impl BlogPost {
    pub fn has_tag(&self, tag: &str) -> bool {
        match self.tags {
            Some(ref tags) => tags.iter().any(|t| t == tag),
            None => false,
        }
    }

    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or_default()
    }
}

impl Display for BlogPost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.date.format("%Y-%m-%d"), self.title)?;
        if let Some(ref tags) = self.tags {
            if !tags.is_empty() {
                write!(f, " [{}]", tags.join(", "))?;
            }
        }
        Ok(())
    }
}

/// A blog post together with the file it was loaded from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogEntry {
    /// Route of the page, e.g. `/blog/hello-world`.
    pub path: String,
    pub file: PathBuf,
    #[serde(flatten)]
    pub post: BlogPost,
    #[serde(skip)]
    pub body: String,
}
