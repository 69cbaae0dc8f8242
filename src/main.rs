//! Bookmark Box CLI - command-line interface for the bookmark folder store

use std::path::PathBuf;

use bookmarkbox::storage::Database;
use bookmarkbox::{BookmarkFolder, GlyphBadge};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "bookmarkbox")]
#[command(version)]
#[command(about = "Bookmark folder store - named link collections in SQLite")]
#[command(long_about = r#"
Bookmark Box keeps named folders of bookmarks in a single-file SQLite
database. Each folder has a title, a display icon, and a set of
name -> URL links.

Example usage:
  bookmarkbox add --title "Social" --link Reddit=https://www.reddit.com
  bookmarkbox show --title "Social"
  bookmarkbox list
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a bookmarkbox.toml config file
    Init {
        /// Database path to record in the config
        #[arg(short, long, default_value = "bookmark-box.sqlite")]
        database: PathBuf,

        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Create or replace a bookmark folder
    Add {
        /// Folder title (saving an existing title replaces the folder)
        #[arg(short, long)]
        title: String,

        /// Links as NAME=URL pairs; repeatable
        #[arg(short, long, value_name = "NAME=URL")]
        link: Vec<String>,

        /// Icon file to attach; a glyph badge is generated when omitted
        #[arg(short, long)]
        icon: Option<PathBuf>,

        /// Glyph for the generated badge (defaults to the title's first character)
        #[arg(short, long)]
        glyph: Option<String>,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Show one folder by title
    Show {
        /// Folder title
        #[arg(short, long)]
        title: String,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// List all folder titles
    List {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Init { database, force } => {
            let config = bookmarkbox::config::BookmarkBoxConfig {
                database: Some(database.to_string_lossy().to_string()),
            };
            let path = bookmarkbox::config::default_config_path();
            bookmarkbox::config::write_config(&path, &config, force)?;
            println!("Wrote {}", path.display().bold());
        }

        Commands::Add {
            title,
            link,
            icon,
            glyph,
            database,
        } => {
            let mut links = std::collections::BTreeMap::new();
            for pair in &link {
                let Some((name, url)) = pair.split_once('=') else {
                    anyhow::bail!("invalid link '{pair}', expected NAME=URL");
                };
                links.insert(name.to_string(), url.to_string());
            }

            let folder = match icon {
                Some(path) => {
                    let bytes = std::fs::read(&path)?;
                    BookmarkFolder::new(&title, bytes, links)
                }
                None => {
                    let glyph = glyph.unwrap_or_else(|| {
                        title.chars().next().map(String::from).unwrap_or_default()
                    });
                    BookmarkFolder::with_generated_icon(&GlyphBadge::new(), &glyph, &title, links)?
                }
            };

            let db = Database::open(&resolve_database(database)?)?;
            folder.save(db.conn())?;
            db.close()?;

            println!("{} Saved {}", "✓".green(), folder);
        }

        Commands::Show { title, database } => {
            let db = Database::open(&resolve_database(database)?)?;
            let folder = BookmarkFolder::load(db.conn(), &title)?;
            db.close()?;

            println!("{}", folder.title.bold());
            println!("  icon: {} bytes", folder.icon.len());
            for (name, url) in &folder.links {
                println!("  {} {}", name.bold(), url.dimmed());
            }
        }

        Commands::List { database } => {
            let db = Database::open(&resolve_database(database)?)?;
            let titles = BookmarkFolder::list_titles(db.conn())?;
            db.close()?;

            if titles.is_empty() {
                println!("No bookmark folders yet.");
            } else {
                for title in titles {
                    println!("{title}");
                }
            }
        }
    }

    Ok(())
}

/// Database path resolution: CLI flag, then config file, then the default
fn resolve_database(flag: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    let path = if let Some(path) = flag {
        path
    } else if let Some(config) = bookmarkbox::config::load_config(None)? {
        config
            .database
            .map(PathBuf::from)
            .unwrap_or_else(bookmarkbox::config::default_database_path)
    } else {
        bookmarkbox::config::default_database_path()
    };

    bookmarkbox::config::ensure_db_dir(&path)?;
    Ok(path)
}
