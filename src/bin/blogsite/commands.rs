use anyhow::{anyhow, bail, Context, Result};

use blogsite::config::{ColorScheme, Config};
use blogsite::content::{BlogEntry, Collection};
use blogsite::error::ContentError;
use blogsite::paginator::Paginator;
use blogsite::text_utils::format_date;

use crate::{ListArgs, StylesArgs};

pub(crate) fn check_cmd(config: &Config) -> Result<()> {
    let def = config.blog_collection();
    let report = Collection::check(&config.content.dir, &def)
        .with_context(|| format!("Error reading {}", config.content.dir.display()))?;

    for failure in report.failures.iter() {
        match failure.error {
            ContentError::Schema { ref source, .. } => {
                println!("{}: {}: {}", failure.file.display(), source.field, source.kind);
            }
            ref other => println!("{}: {}", failure.file.display(), other),
        }
    }

    println!("Checked {} files in collection {}, {} failed", report.checked(), def.name, report.failures.len());
    if !report.is_ok() {
        bail!("{} of {} files have invalid metadata", report.failures.len(), report.checked());
    }
    Ok(())
}

fn load_blog(config: &Config) -> Result<Collection> {
    let collection = Collection::load(&config.content.dir, &config.blog_collection())?;
    Ok(collection)
}

fn format_entry(entry: &BlogEntry) -> String {
    let tags = entry.post.tags();
    if tags.is_empty() {
        format!("{}  {}  {}", format_date(&entry.post.date), entry.post.title, entry.path)
    } else {
        format!("{}  {}  [{}]  {}", format_date(&entry.post.date), entry.post.title, tags.join(", "), entry.path)
    }
}

pub(crate) fn list_cmd(args: ListArgs, config: &Config) -> Result<()> {
    let collection = load_blog(config)?;
    let entries = match args.tag {
        Some(ref tag) => collection.with_tag(tag),
        None => collection.newest_first(),
    };

    if entries.is_empty() {
        if !args.json {
            println!("No posts found");
        } else {
            println!("[]");
        }
        return Ok(());
    }

    let paginator = Paginator::new(&entries, args.page_size);
    let page = paginator.get_page(args.page).map_err(|e| anyhow!(e))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(page)?);
        return Ok(());
    }

    for entry in page {
        println!("{}", format_entry(entry));
    }
    if paginator.page_count() > 1 {
        println!("Page {} of {}", args.page, paginator.page_count());
    }
    Ok(())
}

pub(crate) fn tags_cmd(config: &Config) -> Result<()> {
    let collection = load_blog(config)?;
    for (tag, count) in collection.tag_counts() {
        println!("{:>4}  {}", count, tag);
    }
    Ok(())
}

pub(crate) fn styles_cmd(args: StylesArgs, config: &Config) -> Result<()> {
    let sources = config.styling.sources()?;
    let files = sources.scan(&args.root)
        .with_context(|| format!("Error scanning {}", args.root.display()))?;
    for file in files {
        println!("{}", file.display());
    }
    Ok(())
}

pub(crate) fn config_cmd(config: &Config) -> Result<()> {
    println!("compatibility date: {}", config.compatibility_date);
    println!("devtools: {}", if config.devtools.enabled { "enabled" } else { "disabled" });
    println!("modules:");
    for module in config.modules.iter() {
        println!("  {}", module);
    }
    println!("content dir: {}", config.content.dir.display());
    println!("blog source: {}", config.blog_collection().source);
    if !config.content.preview_api.is_empty() {
        println!("preview api: {}", config.content.preview_api);
    }
    println!("dev server: {}", config.dev_server.address());

    let color_mode = &config.color_mode;
    println!(
        "color mode: {:?}, fallback {} (storage key {}, dark class {:?})",
        color_mode.preference,
        color_mode.fallback.as_str(),
        color_mode.storage_key,
        color_mode.class_name(ColorScheme::Dark),
    );
    println!("page transition: {} ({:?})", config.page_transition.name, config.page_transition.mode);
    for (family, stack) in config.styling.font_family.iter() {
        println!("font {}: {}", family, stack.join(", "));
    }
    Ok(())
}
