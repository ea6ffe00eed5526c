use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::model::SortMode;

#[derive(Parser)]
#[command(
    name = "blogview",
    about = concat!("blogview v", env!("CARGO_PKG_VERSION"), " - browse, filter and sort blog posts"),
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: $XDG_CONFIG_HOME/blogview/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON file with articles (default: built-in posts)
    #[arg(long, global = true)]
    pub articles: Option<PathBuf>,

    /// Directory holding the persisted view state
    #[arg(long = "state-dir", global = true)]
    pub state_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the posts the widget would show
    List(ListArgs),
    /// List categories, marking the active one
    Categories,
    /// Find the first post whose title contains QUERY
    Find(FindArgs),
    /// Show or reset the persisted view state
    State(StateArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Category to show (default: the persisted one)
    #[arg(long)]
    pub category: Option<String>,
    /// Title filter (default: the persisted one)
    #[arg(long)]
    pub query: Option<String>,
    /// Sort order: new, old or title
    #[arg(long)]
    pub sort: Option<SortMode>,
    /// Print the HTML fragments instead of text
    #[arg(long)]
    pub html: bool,
}

#[derive(Args)]
pub struct FindArgs {
    /// Text to look for in titles (case-insensitive)
    pub query: String,
}

#[derive(Args)]
pub struct StateArgs {
    /// Store the default state
    #[arg(long)]
    pub reset: bool,
}
