use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use spdlog::{debug, warn};

use blogsite::logger::configure_logger;

use crate::commands::{check_cmd, config_cmd, list_cmd, styles_cmd, tags_cmd};
use crate::config::open_config;
use crate::new_post::new_cmd;

mod commands;
mod config;
mod new_post;

const CFG_FILE_NAME: &str = "blogsite.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long, global = true)]
    config_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate the metadata of every blog post
    Check,
    /// List blog posts, newest first
    List(ListArgs),
    /// Count posts per tag
    Tags,
    /// Create a new blog post
    New(NewArgs),
    /// List the files scanned for CSS classes
    Styles(StylesArgs),
    /// Print the effective site configuration
    Config,
}

#[derive(clap::Args, Debug)]
struct ListArgs {
    /// Only posts with this tag
    #[arg(short, long)]
    tag: Option<String>,

    /// Page to show, starting at 1
    #[arg(short, long, default_value_t = 1)]
    page: usize,

    /// Posts per page
    #[arg(short = 's', long, default_value_t = 10)]
    page_size: usize,

    /// Print the page as JSON
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args, Debug)]
struct NewArgs {
    /// Title of the post
    #[arg(short, long)]
    title: String,

    /// Short description of the post
    #[arg(short, long)]
    description: Option<String>,

    /// Tag of the post. Repeat for more than one
    #[arg(long)]
    tag: Vec<String>,

    /// Cover image path or URL
    #[arg(short, long)]
    image: Option<String>,

    /// Post generation options
    #[arg(short, long, value_enum, default_value_t = PostOutput::Stdout)]
    output: PostOutput,
}

#[derive(clap::Args, Debug)]
struct StylesArgs {
    /// Site root the styling patterns are relative to
    #[arg(short, long, default_value = ".")]
    root: PathBuf,
}

#[derive(Clone, Debug, ValueEnum)]
enum PostOutput {
    /// Writes the new post to the stdout
    Stdout,
    /// Writes the new post to a file in the blog directory
    File,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = open_config(args.config_path)?;

    if let Err(err) = configure_logger(config.log.as_ref()) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }
    debug!("Content directory is {}", config.content.dir.display());

    match args.command {
        Command::Check => check_cmd(&config),
        Command::List(args) => list_cmd(args, &config),
        Command::Tags => tags_cmd(&config),
        Command::New(args) => new_cmd(args, &config),
        Command::Styles(args) => styles_cmd(args, &config),
        Command::Config => config_cmd(&config),
    }
}
