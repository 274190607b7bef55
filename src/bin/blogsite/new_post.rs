use std::fmt::Write;
use std::fs::{create_dir_all, OpenOptions};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use spdlog::info;

use blogsite::config::Config;
use blogsite::content::{parse_front_matter, validate};
use blogsite::text_utils::{format_date, slug_from_title};

use crate::{NewArgs, PostOutput};

// Double quoted YAML scalar, so titles like `a: b` stay strings
fn yaml_str(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n");
    format!("\"{}\"", escaped)
}

fn render_header(args: &NewArgs, date: &NaiveDate) -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "---");
    let _ = writeln!(&mut buf, "title: {}", yaml_str(&args.title));
    if let Some(ref description) = args.description {
        let _ = writeln!(&mut buf, "description: {}", yaml_str(description));
    }
    let _ = writeln!(&mut buf, "date: {}", format_date(date));
    if !args.tag.is_empty() {
        let _ = writeln!(&mut buf, "tags:");
        for tag in args.tag.iter() {
            let _ = writeln!(&mut buf, "  - {}", yaml_str(tag));
        }
    }
    if let Some(ref image) = args.image {
        let _ = writeln!(&mut buf, "image: {}", yaml_str(image));
    }
    let _ = writeln!(&mut buf, "---");
    buf
}

fn render_body(title: &str) -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "# {}", title);
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "This is a body example");
    let _ = writeln!(&mut buf, "Please remove it and replace with your content");

    buf
}

pub(crate) fn render_post(args: &NewArgs, date: &NaiveDate) -> Result<String> {
    let post = format!("{}{}", render_header(args, date), render_body(&args.title));

    // The scaffold has to pass the same checks as every other post
    let (metadata, _) = parse_front_matter(&post, &PathBuf::from("<new post>"))?;
    validate(&metadata).context("The new post does not validate")?;

    Ok(post)
}

/// Where a post file goes: the directory part of the blog source glob.
fn post_dir(config: &Config) -> PathBuf {
    let source = config.blog_collection().source;
    let static_part: Vec<&str> = source
        .split('/')
        .take_while(|part| !part.contains(|c: char| matches!(c, '*' | '?' | '[' | '{')))
        .collect();
    // The last part is the file name pattern unless the glob had a wildcard
    let dir_parts = if static_part.len() == source.split('/').count() {
        &static_part[..static_part.len().saturating_sub(1)]
    } else {
        &static_part[..]
    };

    dir_parts.iter().fold(config.content.dir.clone(), |dir, part| dir.join(part))
}

pub(crate) fn new_cmd(args: NewArgs, config: &Config) -> Result<()> {
    let date = Local::now().date_naive();
    let post = render_post(&args, &date)?;

    match args.output {
        PostOutput::Stdout => {
            print!("{}", post);
        }
        PostOutput::File => {
            use std::io::Write;

            let slug = slug_from_title(&args.title);
            if slug.is_empty() {
                bail!("Could not build a file name from the title {:?}", args.title);
            }

            let dir = post_dir(config);
            create_dir_all(&dir).with_context(|| format!("Error creating directory {}", dir.display()))?;
            let full_path = dir.join(format!("{}.md", slug));

            let mut file = OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&full_path)
                .with_context(|| format!("Error creating {}", full_path.display()))?;
            file.write_all(post.as_bytes())?;

            info!("Created post {}", full_path.display());
            println!("{}", full_path.display());
        }
    };

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(title: &str) -> NewArgs {
        NewArgs {
            title: title.to_string(),
            description: None,
            tag: vec![],
            image: None,
            output: PostOutput::Stdout,
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 27).unwrap()
    }

    #[test]
    fn test_minimal_post() {
        let post = render_post(&args("This is a title"), &date()).unwrap();
        assert!(post.starts_with("---\ntitle: \"This is a title\"\ndate: 2024-02-27\n---\n"));
        assert!(post.contains("# This is a title"));
    }

    #[test]
    fn test_full_post_validates() {
        let mut full = args("Colons: \"quotes\" and more");
        full.description = Some("About things".to_string());
        full.tag = vec!["nuxt".to_string(), "yes".to_string()];
        full.image = Some("/images/a.png".to_string());

        let post = render_post(&full, &date()).unwrap();
        let (metadata, _) = parse_front_matter(&post, &PathBuf::from("a.md")).unwrap();
        let validated = validate(&metadata).unwrap();
        assert_eq!(validated.title, "Colons: \"quotes\" and more");
        assert_eq!(validated.tags(), ["nuxt", "yes"]);
        assert_eq!(validated.image.as_deref(), Some("/images/a.png"));
    }

    #[test]
    fn test_blank_title_is_rejected() {
        assert!(render_post(&args("  "), &date()).is_err());
    }

    #[test]
    fn test_post_dir() {
        let mut config = Config::default();
        config.content.dir = PathBuf::from("/site/content");
        assert_eq!(post_dir(&config), PathBuf::from("/site/content/blog"));

        config.content.blog_source = "posts/**/*.md".to_string();
        assert_eq!(post_dir(&config), PathBuf::from("/site/content/posts"));

        config.content.blog_source = "*.md".to_string();
        assert_eq!(post_dir(&config), PathBuf::from("/site/content"));
    }
}
