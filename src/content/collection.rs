use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;
use serde::{Deserialize, Serialize};
use spdlog::{debug, info};

use crate::content::front_matter::parse_front_matter;
use crate::content::schema::{unknown_keys, validate};
use crate::content::source_files::{relative_str, SourceFiles};
use crate::content::BlogEntry;
use crate::error::ContentError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    /// Every entry becomes a page with its own route.
    Page,
}

/// Which files under the content directory belong to a collection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CollectionDef {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CollectionKind,
    /// Glob relative to the content directory.
    pub source: String,
}

impl Default for CollectionDef {
    fn default() -> Self {
        CollectionDef {
            name: "blog".to_string(),
            kind: CollectionKind::Page,
            source: "blog/*.md".to_string(),
        }
    }
}

impl CollectionDef {
    pub fn pattern(&self) -> Result<Pattern, ContentError> {
        Pattern::new(&self.source).map_err(|e| ContentError::pattern(&self.source, e))
    }

    /// Relative paths of the files that belong to this collection, sorted.
    pub fn source_files(&self, content_dir: &Path) -> Result<Vec<PathBuf>, ContentError> {
        let pattern = self.pattern()?;
        Ok(SourceFiles::new(content_dir).matching(&[pattern])?)
    }
}

/// Route of a page: its path below the content directory without the
/// extension, `index` files standing for their directory.
pub fn route_path(rel_file: &Path) -> String {
    let without_ext = rel_file.with_extension("");
    let mut route = relative_str(&without_ext);
    if route == "index" {
        route.clear();
    } else if let Some(parent) = route.strip_suffix("/index") {
        route = parent.to_string();
    }
    format!("/{}", route)
}

pub fn load_entry(content_dir: &Path, rel_file: &Path) -> Result<BlogEntry, ContentError> {
    let file = content_dir.join(rel_file);
    let raw_content = fs::read_to_string(&file)?;
    let (metadata, body) = parse_front_matter(&raw_content, &file)?;

    for key in unknown_keys(&metadata) {
        debug!("Ignoring metadata key {} in {}", key, file.display());
    }

    let post = validate(&metadata).map_err(|source| ContentError::Schema {
        path: file.clone(),
        source,
    })?;

    Ok(BlogEntry {
        path: route_path(rel_file),
        file,
        post,
        body,
    })
}

pub struct CheckFailure {
    pub file: PathBuf,
    pub error: ContentError,
}

/// Result of validating every file of a collection.
pub struct CheckReport {
    pub entries: Vec<BlogEntry>,
    pub failures: Vec<CheckFailure>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn checked(&self) -> usize {
        self.entries.len() + self.failures.len()
    }
}

#[derive(Debug, Clone)]
pub struct Collection {
    pub name: String,
    pub entries: Vec<BlogEntry>,
}

impl Collection {
    /// Loads every file of the collection. The first file that fails to parse
    /// or validate stops the load.
    pub fn load(content_dir: &Path, def: &CollectionDef) -> Result<Collection, ContentError> {
        let files = def.source_files(content_dir)?;
        let mut entries = Vec::with_capacity(files.len());
        for rel_file in files {
            entries.push(load_entry(content_dir, &rel_file)?);
        }

        info!("Loaded {} entries into collection {}", entries.len(), def.name);
        Ok(Collection {
            name: def.name.clone(),
            entries,
        })
    }

    /// Validates every file of the collection and collects all failures.
    pub fn check(content_dir: &Path, def: &CollectionDef) -> Result<CheckReport, ContentError> {
        let files = def.source_files(content_dir)?;
        let mut report = CheckReport {
            entries: vec![],
            failures: vec![],
        };

        for rel_file in files {
            match load_entry(content_dir, &rel_file) {
                Ok(entry) => report.entries.push(entry),
                Err(error) => {
                    let file = content_dir.join(&rel_file);
                    debug!("{}", error);
                    report.failures.push(CheckFailure { file, error });
                }
            }
        }

        Ok(report)
    }

    /// Entries by date, newest first. Same-day entries are ordered by title
    /// and then by route.
    pub fn newest_first(&self) -> Vec<&BlogEntry> {
        let mut list: Vec<&BlogEntry> = self.entries.iter().collect();
        list.sort_by(|a, b| {
            b.post.date.cmp(&a.post.date)
                .then_with(|| a.post.title.cmp(&b.post.title))
                .then_with(|| a.path.cmp(&b.path))
        });
        list
    }

    pub fn with_tag(&self, tag: &str) -> Vec<&BlogEntry> {
        self.newest_first()
            .into_iter()
            .filter(|e| e.post.has_tag(tag))
            .collect()
    }

    /// Number of entries carrying each tag.
    pub fn tag_counts(&self) -> BTreeMap<&str, usize> {
        let mut tag_map = BTreeMap::new();
        for entry in self.entries.iter() {
            let unique: BTreeSet<&str> = entry.post.tags().iter().map(|t| t.as_str()).collect();
            for tag in unique {
                *tag_map.entry(tag).or_insert(0) += 1;
            }
        }
        tag_map
    }

    pub fn find(&self, path: &str) -> Option<&BlogEntry> {
        self.entries.iter().find(|e| e.path == path)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::content::BlogPost;

    use super::*;

    fn entry(path: &str, title: &str, date: (i32, u32, u32), tags: &[&str]) -> BlogEntry {
        BlogEntry {
            path: path.to_string(),
            file: PathBuf::from(format!("content{}.md", path)),
            post: BlogPost {
                title: title.to_string(),
                description: None,
                date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
                tags: if tags.is_empty() { None } else { Some(tags.iter().map(|t| t.to_string()).collect()) },
                image: None,
            },
            body: String::new(),
        }
    }

    fn collection() -> Collection {
        Collection {
            name: "blog".to_string(),
            entries: vec![
                entry("/blog/older", "Older", (2023, 5, 1), &["nuxt"]),
                entry("/blog/newest", "Newest", (2024, 11, 1), &["nuxt", "blog", "nuxt"]),
                entry("/blog/same-day-b", "B", (2024, 1, 1), &[]),
                entry("/blog/same-day-a", "A", (2024, 1, 1), &["blog"]),
            ],
        }
    }

    #[test]
    fn test_route_path() {
        assert_eq!(route_path(Path::new("blog/hello.md")), "/blog/hello");
        assert_eq!(route_path(Path::new("blog/index.md")), "/blog");
        assert_eq!(route_path(Path::new("index.md")), "/");
        assert_eq!(route_path(Path::new("blog/2024/recap.md")), "/blog/2024/recap");
    }

    #[test]
    fn test_newest_first() {
        let c = collection();
        let titles: Vec<&str> = c.newest_first().iter().map(|e| e.post.title.as_str()).collect();
        assert_eq!(titles, ["Newest", "A", "B", "Older"]);
    }

    #[test]
    fn test_with_tag() {
        let c = collection();
        let paths: Vec<&str> = c.with_tag("blog").iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["/blog/newest", "/blog/same-day-a"]);
        assert!(c.with_tag("rust").is_empty());
    }

    #[test]
    fn test_tag_counts() {
        let c = collection();
        let counts = c.tag_counts();
        assert_eq!(counts.get("nuxt"), Some(&2));
        assert_eq!(counts.get("blog"), Some(&2));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_find() {
        let c = collection();
        assert_eq!(c.find("/blog/older").map(|e| e.post.title.as_str()), Some("Older"));
        assert!(c.find("/blog/missing").is_none());
    }

    #[test]
    fn test_invalid_source_pattern() {
        let def = CollectionDef {
            source: "blog/[*.md".to_string(),
            ..CollectionDef::default()
        };
        assert!(matches!(def.pattern(), Err(ContentError::Pattern { .. })));
    }
}
