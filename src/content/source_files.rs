use std::io;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use spdlog::warn;
use walkdir::{DirEntry, WalkDir};

/// `*` stops at `/`, only `**` crosses directories.
pub const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

pub struct SourceFiles {
    pub root_dir: PathBuf,
}

impl SourceFiles {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        SourceFiles { root_dir: root_dir.into() }
    }

    /// Every file below the root, relative to it, in sorted order. Symbolic
    /// links are followed, hidden files and directories are skipped.
    pub fn retrieve_files(&self) -> io::Result<Vec<PathBuf>> {
        let walker = WalkDir::new(&self.root_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_hidden(e));

        let mut files = vec![];
        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(rel_path) = entry.path().strip_prefix(&self.root_dir) else {
                continue;
            };
            if rel_path.to_str().is_none() {
                warn!("Skipping {}, the path is not valid UTF-8", entry.path().display());
                continue;
            }
            files.push(rel_path.to_path_buf());
        }
        Ok(files)
    }

    /// Files whose relative path, written with `/`, satisfies `matches`.
    pub fn filtered<F>(&self, matches: F) -> io::Result<Vec<PathBuf>>
    where
        F: Fn(&str) -> bool,
    {
        let files = self.retrieve_files()?;
        Ok(files.into_iter()
            .filter(|f| matches(&relative_str(f)))
            .collect())
    }

    /// Files whose relative path matches any of `patterns`.
    pub fn matching(&self, patterns: &[Pattern]) -> io::Result<Vec<PathBuf>> {
        self.filtered(|rel| patterns.iter().any(|p| p.matches_with(rel, MATCH_OPTIONS)))
    }
}

/// Relative path with `/` separators, the form glob patterns are written in.
pub fn relative_str(path: &Path) -> String {
    let parts: Vec<String> = path.components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect();
    parts.join("/")
}

#[cfg(test)]
mod tests {
    use std::fs::{create_dir_all, File};

    use super::*;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        create_dir_all(path.parent().unwrap()).unwrap();
        File::create(path).unwrap();
    }

    #[test]
    fn test_retrieve_files() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        touch(dir.path(), "blog/b.md");
        touch(dir.path(), "blog/a.md");
        touch(dir.path(), "blog/nested/c.md");
        touch(dir.path(), "blog/.draft.md");
        touch(dir.path(), ".git/config");
        touch(dir.path(), "index.md");

        let files = SourceFiles::new(dir.path()).retrieve_files()?;
        let files: Vec<String> = files.iter().map(|f| relative_str(f)).collect();
        assert_eq!(files, ["blog/a.md", "blog/b.md", "blog/nested/c.md", "index.md"]);
        Ok(())
    }

    #[test]
    fn test_matching_stops_at_separator() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        touch(dir.path(), "blog/a.md");
        touch(dir.path(), "blog/nested/c.md");
        touch(dir.path(), "blog/notes.txt");

        let pattern = Pattern::new("blog/*.md").unwrap();
        let files = SourceFiles::new(dir.path()).matching(&[pattern])?;
        assert_eq!(files, [PathBuf::from("blog/a.md")]);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_files_are_listed() -> io::Result<()> {
        use std::os::unix::fs::symlink;

        let dir = tempfile::tempdir()?;
        let shared = tempfile::tempdir()?;
        touch(shared.path(), "shared.md");
        touch(shared.path(), "series/part-1.md");
        touch(dir.path(), "blog/a.md");
        symlink(shared.path().join("shared.md"), dir.path().join("blog/linked.md"))?;
        symlink(shared.path().join("series"), dir.path().join("blog/series"))?;

        let pattern = Pattern::new("blog/**/*.md").unwrap();
        let files = SourceFiles::new(dir.path()).matching(&[pattern])?;
        let files: Vec<String> = files.iter().map(|f| relative_str(f)).collect();
        assert_eq!(files, ["blog/a.md", "blog/linked.md", "blog/series/part-1.md"]);
        Ok(())
    }

    #[test]
    fn test_filtered() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        touch(dir.path(), "blog/a.md");
        touch(dir.path(), "blog/notes.txt");

        let files = SourceFiles::new(dir.path()).filtered(|rel| rel.ends_with(".txt"))?;
        assert_eq!(files, [PathBuf::from("blog/notes.txt")]);
        Ok(())
    }

    #[test]
    fn test_missing_root() {
        let files = SourceFiles::new("/does/not/exist/blogsite").retrieve_files();
        assert!(files.is_err());
    }
}
