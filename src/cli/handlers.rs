use std::error::Error;
use std::path::PathBuf;

use tracing::debug;

use crate::cli::commands::*;
use crate::cli::logging;
use crate::cli::output::*;
use crate::controller::{ControllerOptions, InputController};
use crate::io::articles_io;
use crate::io::config_io;
use crate::io::kv::{FileStore, KvStore};
use crate::io::state::load_view_state;
use crate::model::{ArticleStore, Config, ViewState};
use crate::ops::pipeline;
use crate::render::markup::HtmlSurface;
use crate::render::{self, render_category_bar, render_results};
use crate::tui::app::App;
use crate::tui::surface::TuiSurface;
use crate::tui::theme::Theme;

/// Everything a command needs: resolved config, articles, and the slot
pub struct Context {
    pub config: Config,
    pub articles: ArticleStore,
    pub store: FileStore,
    pub state_dir: PathBuf,
}

impl Context {
    fn state_key(&self) -> &str {
        &self.config.widget.state_key
    }

    fn load_state(&self) -> ViewState {
        load_view_state(&self.store, self.state_key())
    }
}

/// Resolve config, article source and state dir. Flags win over the file.
pub fn load_context(cli: &Cli) -> Result<Context, Box<dyn Error>> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(config_io::default_config_path);
    let config = config_io::read_config(&config_path)?;

    let articles_path = cli.articles.as_deref().or(config.widget.articles.as_deref());
    let articles = articles_io::load_articles(articles_path)?;

    let state_dir = cli
        .state_dir
        .clone()
        .or_else(|| config.storage.dir.clone())
        .unwrap_or_else(config_io::default_state_dir);
    let store = FileStore::in_dir(&state_dir);
    debug!(config = %config_path.display(), store = %store.path().display(), articles = articles.len(), "context loaded");

    Ok(Context {
        config,
        articles,
        store,
        state_dir,
    })
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn Error>> {
    let json = cli.json;
    let mut ctx = load_context(&cli)?;

    match cli.command {
        None => launch_tui(ctx),
        Some(cmd) => match cmd {
            Commands::List(args) => cmd_list(&ctx, args, json),
            Commands::Categories => cmd_categories(&ctx, json),
            Commands::Find(args) => cmd_find(&ctx, args, json),
            Commands::State(args) => cmd_state(&mut ctx, args, json),
        },
    }
}

/// Run the interactive widget against the file-backed slot
fn launch_tui(ctx: Context) -> Result<(), Box<dyn Error>> {
    logging::init_file(&ctx.state_dir)?;

    let store: Box<dyn KvStore> = Box::new(ctx.store);
    let controller = InputController::new(
        ctx.articles,
        store,
        TuiSurface::default(),
        ControllerOptions::from(&ctx.config.widget),
    );
    let app = App::new(
        controller,
        Theme::from_config(&ctx.config.ui),
        ctx.config.ui.show_key_hints,
    );
    crate::tui::run(app)
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(ctx: &Context, args: ListArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let mut state = ctx.load_state();
    if let Some(category) = args.category {
        state.set_category(category);
    }
    if let Some(query) = args.query {
        state.set_query(query.trim());
    }
    if let Some(sort) = args.sort {
        state.set_sort(sort);
    }

    let list = pipeline::run(ctx.articles.all(), &state);

    if args.html {
        let mut surface = HtmlSurface::default();
        render_category_bar(&mut surface, &ctx.articles.categories(), &state);
        render_results(&mut surface, &list, &state);
        print!("{}", surface.page());
    } else if json {
        println!("{}", serde_json::to_string_pretty(&list_to_json(&list, &state))?);
    } else {
        let doc = render::results_document(&list, &state);
        println!("{}", format_results(&doc));
        println!();
        println!("{}", render::count_text(pipeline::count(&list)));
    }
    Ok(())
}

fn cmd_categories(ctx: &Context, json: bool) -> Result<(), Box<dyn Error>> {
    let state = ctx.load_state();
    let bar = render::category_bar(&ctx.articles.categories(), &state);
    if json {
        println!("{}", serde_json::to_string_pretty(&categories_to_json(&bar))?);
    } else {
        println!("{}", format_categories(&bar));
    }
    Ok(())
}

fn cmd_find(ctx: &Context, args: FindArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let query = args.query.trim();
    let found = pipeline::find_by_title(ctx.articles.all(), query);
    if json {
        let value = found.map(article_to_json);
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        match found {
            Some(article) => {
                let post = render::post_block(article, query);
                println!("{}", format_post(&post));
            }
            None => println!("no match for \"{}\"", query),
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

fn cmd_state(ctx: &mut Context, args: StateArgs, json: bool) -> Result<(), Box<dyn Error>> {
    if args.reset {
        let key = ctx.state_key().to_string();
        let value = serde_json::to_string(&ViewState::default())?;
        ctx.store.set(&key, &value)?;
    }
    let state = ctx.load_state();
    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        println!("{}", format_state(&state));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn cli(dir: &TempDir, extra: &[&str]) -> Cli {
        let config = dir.path().join("config.toml");
        let state = dir.path().join("state");
        let mut args = vec![
            "blogview".to_string(),
            "--config".into(),
            config.display().to_string(),
            "--state-dir".into(),
            state.display().to_string(),
        ];
        args.extend(extra.iter().map(|s| s.to_string()));
        Cli::parse_from(args)
    }

    #[test]
    fn context_uses_builtin_articles_and_flag_state_dir() {
        let dir = TempDir::new().unwrap();
        let ctx = load_context(&cli(&dir, &["categories"])).unwrap();
        assert_eq!(ctx.articles.len(), 4);
        assert_eq!(ctx.state_dir, dir.path().join("state"));
        assert_eq!(ctx.state_key(), "blogState");
    }

    #[test]
    fn context_reads_config_file() {
        let dir = TempDir::new().unwrap();
        let articles = dir.path().join("posts.json");
        fs::write(
            &articles,
            r#"[{"title":"Один","author":"A","date":"2025-01-01","category":"Rust","content":"x"}]"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("config.toml"),
            format!(
                "[widget]\nstate_key = \"custom\"\narticles = \"{}\"\n",
                articles.display()
            ),
        )
        .unwrap();
        let ctx = load_context(&cli(&dir, &["categories"])).unwrap();
        assert_eq!(ctx.articles.len(), 1);
        assert_eq!(ctx.state_key(), "custom");
    }

    #[test]
    fn missing_articles_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.json");
        let err = load_context(&cli(
            &dir,
            &["--articles", missing.to_str().unwrap(), "categories"],
        ));
        assert!(err.is_err());
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.toml"), "[widget\n").unwrap();
        assert!(load_context(&cli(&dir, &["state"])).is_err());
    }

    #[test]
    fn state_reset_writes_default_record() {
        let dir = TempDir::new().unwrap();
        let mut ctx = load_context(&cli(&dir, &["state"])).unwrap();
        ctx.store
            .set("blogState", r#"{"category":"HTML","query":"x","sort":"old"}"#)
            .unwrap();
        cmd_state(&mut ctx, StateArgs { reset: true }, false).unwrap();
        assert_eq!(ctx.load_state(), ViewState::default());
    }

    #[test]
    fn sort_flag_parses_tokens() {
        let dir = TempDir::new().unwrap();
        let parsed = cli(&dir, &["list", "--sort", "title"]);
        let Some(Commands::List(args)) = parsed.command else {
            panic!("expected list");
        };
        assert_eq!(args.sort, Some(crate::model::SortMode::Title));

        let bad = Cli::try_parse_from(["blogview", "list", "--sort", "sideways"]);
        assert!(bad.is_err());
    }
}
