//! # Startpage CLI Entry Point
//!
//! Command-line front end for the start page ordering core. It plays the
//! part of the presentation layer: it loads the data source, prints ordered
//! views and forwards clicks, reorders and resets to the core.
//!
//! ## Usage
//!
//! ```bash
//! # Categories in display order
//! startpage --data ./data.json categories
//!
//! # Links of one category
//! startpage links "Dev"
//!
//! # Count a click, then show the frequent sites
//! startpage click https://github.com
//! startpage frequent --limit 5
//!
//! # Save a manual order, then drop it again
//! startpage reorder-links "Dev" https://docs.rs https://github.com
//! startpage reset-links "Dev"
//!
//! # Build a search URL, or list the engines to pick from
//! startpage search --engine google rust borrow checker
//! startpage engines
//! ```
//!
//! ## Configuration
//!
//! Defaults come from `~/.config/startpage/config.json` (see
//! [`startpage::config::Config`]); `--data` and `--state-dir` override it.
//! Set `RUST_LOG` to control log output.

use startpage::catalog::{self, Category, Link};
use startpage::config::Config;
use startpage::logging;
use startpage::search::SearchEngine;
use startpage::store::{default_state_dir, FileStore, Scope};
use startpage::StartPage;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Startpage - ordering, ranking and usage tracking for your start page
#[derive(Parser, Debug)]
#[command(name = "startpage")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Ordering and frequent-sites core for a personal start page", long_about = None)]
struct Args {
    /// Path to the data source JSON
    #[arg(short, long, value_name = "FILE")]
    data: Option<PathBuf>,

    /// Directory holding persisted state
    #[arg(long, value_name = "DIR")]
    state_dir: Option<PathBuf>,

    /// Path to an alternative config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log debug output when RUST_LOG is unset
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(flatten)]
    Page(PageCommand),
    /// Print a search URL
    Search {
        #[arg(short, long)]
        engine: Option<SearchEngine>,
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// List the available search engines
    Engines,
}

/// Commands that work on the loaded catalog and persisted state
#[derive(Subcommand, Debug)]
enum PageCommand {
    /// List categories in display order
    Categories,
    /// List the links of a category in display order
    Links { category: String },
    /// Show the most clicked links
    Frequent {
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Record a click on a link
    Click { url: String },
    /// Save a manual category order
    ReorderCategories {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Save a manual link order for a category
    ReorderLinks {
        category: String,
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Forget the manual category order
    ResetCategories,
    /// Forget the manual link order of a category
    ResetLinks { category: String },
    /// Clear all click counts
    ClearUsage,
    /// Show or hide the frequent-sites panel
    ToggleFrequent,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };

    run_application(args, config).await
}

async fn run_application(args: Args, config: Config) -> Result<()> {
    match args.command {
        // Search needs neither the data source nor persisted state
        Command::Search { engine, query } => {
            let engine = engine.unwrap_or(config.search_engine);
            match engine.search_url(&query.join(" ")) {
                Some(url) => println!("{}", url),
                None => eprintln!("Nothing to search for"),
            }
            Ok(())
        }
        Command::Engines => {
            for line in engine_lines(config.search_engine) {
                println!("{}", line);
            }
            Ok(())
        }
        Command::Page(command) => {
            run_page_command(command, args.data, args.state_dir, config).await
        }
    }
}

async fn run_page_command(
    command: PageCommand,
    data: Option<PathBuf>,
    state_dir: Option<PathBuf>,
    config: Config,
) -> Result<()> {
    let data_path = data.unwrap_or(config.data_source);
    let catalog = match catalog::load_catalog(&data_path).await {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("\nCheck that the data source exists and is valid JSON, then try again:");
            eprintln!("  {}", data_path.display());
            std::process::exit(1);
        }
    };

    let state_dir = match state_dir.or(config.state_dir) {
        Some(dir) => dir,
        None => default_state_dir()?,
    };
    let store = FileStore::open(&state_dir)
        .with_context(|| format!("Failed to open state directory: {}", state_dir.display()))?;

    let mut page = StartPage::new(catalog, store).with_link_fallback(config.link_fallback);

    match command {
        PageCommand::Categories => {
            if page.catalog().is_empty() {
                println!("No categories");
            }
            for category in page.ordered_categories() {
                print_category(category);
            }
        }
        PageCommand::Links { category } => {
            for link in page.ordered_links(&category)? {
                print_link(link);
            }
        }
        PageCommand::Frequent { limit } => {
            if !page.frequent_sites_visible() {
                println!("(frequent sites panel is hidden)");
            }
            let frequent = page.frequent_links(limit.unwrap_or(config.frequent_limit));
            if frequent.is_empty() {
                println!("Click any link and your frequent sites will show up here");
            }
            for link in frequent {
                let count = page.usage().stats().count(&link.url);
                println!("{:>5}  {}  ({})", count, link.name, link.domain());
            }
        }
        PageCommand::Click { url } => {
            let count = page.record_usage(&url)?;
            println!("{} clicked {} time(s)", url, count);
        }
        PageCommand::ReorderCategories { names } => {
            page.request_reorder(&Scope::Categories, &names)?;
            println!("Category order saved");
        }
        PageCommand::ReorderLinks { category, urls } => {
            page.request_reorder(&Scope::links(category), &urls)?;
            println!("Link order saved");
        }
        PageCommand::ResetCategories => {
            page.request_reset(&Scope::Categories)?;
            println!("Category order reset");
        }
        PageCommand::ResetLinks { category } => {
            page.request_reset(&Scope::links(category))?;
            println!("Link order reset");
        }
        PageCommand::ClearUsage => {
            page.clear_usage()?;
            println!("Frequent sites cleared");
        }
        PageCommand::ToggleFrequent => {
            let visible = page.toggle_frequent_sites()?;
            println!(
                "Frequent sites panel {}",
                if visible { "shown" } else { "hidden" }
            );
        }
    }

    Ok(())
}

/// One line per engine, the selected one marked with `*`.
fn engine_lines(selected: SearchEngine) -> Vec<String> {
    SearchEngine::all()
        .iter()
        .map(|&engine| {
            let marker = if engine == selected { '*' } else { ' ' };
            format!(
                "{} {:<10} {:<16} {}",
                marker,
                engine.name(),
                engine.label(),
                engine.placeholder()
            )
        })
        .collect()
}

fn print_category(category: &Category) {
    println!("{} ({} links)", category.name, category.links.len());
}

fn print_link(link: &Link) {
    if link.description.is_empty() {
        println!("{}  {}", link.name, link.url);
    } else {
        println!("{}  {}  - {}", link.name, link.url, link.description);
    }
}
